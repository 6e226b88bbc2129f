//! Ways to locate an element on the remote page.

/// Represents ways to locate a page element
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// Select by CSS selector
    Css(String),
    /// Select by XPath query (relative queries are evaluated against a root element)
    Xpath(String),
    /// Select by element id
    Id(String),
    /// Select by tag name
    Tag(String),
    /// Represents an invalid selector string, with a reason.
    Invalid(String),
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Selector::Css(s) => write!(f, "css:{s}"),
            Selector::Xpath(s) => write!(f, "xpath:{s}"),
            Selector::Id(s) => write!(f, "id:{s}"),
            Selector::Tag(s) => write!(f, "tag:{s}"),
            Selector::Invalid(reason) => write!(f, "invalid:{reason}"),
        }
    }
}

impl From<&str> for Selector {
    fn from(s: &str) -> Self {
        let s = s.trim();
        match s {
            "" => Selector::Invalid("empty selector string".to_string()),
            _ if s.starts_with("css:") => Selector::Css(s["css:".len()..].to_string()),
            _ if s.starts_with("xpath:") => Selector::Xpath(s["xpath:".len()..].to_string()),
            _ if s.starts_with("id:") => Selector::Id(s["id:".len()..].to_string()),
            _ if s.starts_with("tag:") => Selector::Tag(s["tag:".len()..].to_string()),
            // Bare XPath queries, absolute or relative
            _ if s.starts_with("//") || s.starts_with("./") || s.starts_with('(') => {
                Selector::Xpath(s.to_string())
            }
            // A lone `#ident` is an id lookup; anything more structured is CSS
            _ if s.starts_with('#')
                && !s[1..].contains([' ', '.', '#', '>', ':', '[']) =>
            {
                Selector::Id(s[1..].to_string())
            }
            _ => Selector::Css(s.to_string()),
        }
    }
}

impl From<String> for Selector {
    fn from(s: String) -> Self {
        Selector::from(s.as_str())
    }
}

/// Fixed structure of the two zhipin.com pages this bot drives.
///
/// These are duck-typed lookups into an external, unversioned page: any
/// upstream markup change breaks them. Keeping them in one place is the
/// whole containment strategy.
pub mod zhipin {
    /// Login panel, present once the login page has rendered
    pub const LOGIN_PANEL: &str = ".login-register-content";
    /// Control that switches the login UI to QR-code mode
    pub const QR_SWITCH: &str = ".btn-sign-switch.ewm-switch";
    /// The QR code image itself
    pub const QR_IMAGE: &str = ".qr-code-box .qr-img-box img";
    /// Status title shown while a scan is in progress
    pub const SCAN_STATUS: &str = ".login-step-title";
    /// Post-login landing marker on the recommend page
    pub const LANDING_MARKER: &str = ".job-recommend-main";

    /// Conversation list container on the message-center page
    pub const USER_LIST: &str = ".user-list-content";
    /// Grouped list subtree inside the container
    pub const CHAT_GROUP: &str = "xpath:.//ul[@role=\"group\"]";
    /// One conversation row
    pub const CHAT_ROW: &str = "tag:li";
    /// Unread counter badge; absent when there is nothing unread
    pub const UNREAD_BADGE: &str = ".notice-badge";
    pub const ROW_TIME: &str = ".time";
    pub const ROW_NAME: &str = ".name-text";
    pub const ROW_COMPANY: &str = "xpath:.//span[@class=\"name-box\"]/span[2]";
    pub const ROW_POSITION: &str = "xpath:.//span[@class=\"name-box\"]/span[last()]";
    pub const ROW_LAST_MESSAGE: &str = ".last-msg-text";

    /// Message pane, present once a conversation is open
    pub const MESSAGE_PANE: &str = ".message-content";
    pub const CHAT_INPUT: &str = "id:chat-input";
    pub const SEND_BUTTON: &str = ".chat-op .btn-v2.btn-sure-v2.btn-send";
}
