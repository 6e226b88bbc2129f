use thiserror::Error;

#[derive(Error, Debug)]
pub enum AutomationError {
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Operation timed out: {0}")]
    Timeout(String),

    #[error("Element is not visible: {0}")]
    ElementNotVisible(String),

    #[error("Element is not enabled: {0}")]
    ElementNotEnabled(String),

    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    #[error("WebDriver session error: {0}")]
    Session(#[from] thirtyfour::error::WebDriverError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
