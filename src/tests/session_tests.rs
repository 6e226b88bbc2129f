use std::path::Path;

use crate::config::BotConfig;
use crate::session::Checkpoint;

#[test]
fn checkpoint_paths_are_fixed_per_run() {
    let root = Path::new("screenshot");
    assert_eq!(
        Checkpoint::Login.path(root),
        Path::new("screenshot/boss/login.zhipin.com.png")
    );
    assert_eq!(
        Checkpoint::Qr.path(root),
        Path::new("screenshot/boss/qr.zhipin.com.png")
    );
    assert_eq!(
        Checkpoint::Home.path(root),
        Path::new("screenshot/boss/home.zhipin.com.png")
    );
    assert_eq!(
        Checkpoint::MessageList.path(root),
        Path::new("screenshot/boss/message.zhipin.com.png")
    );
}

#[test]
fn default_config_matches_the_fixed_workflow_constants() {
    let config = BotConfig::default();
    assert_eq!(config.webdriver_url, "http://selenium:4444/wd/hub");
    assert!(config.login_url.contains("ka=header-login"));
    assert!(config.chat_url.contains("ka=header-message"));
    assert_eq!(config.poll_interval.as_secs(), 5);
    assert_eq!(config.settle_delay.as_secs(), 2);
    assert_eq!(config.qr_timeout.as_secs(), 30);
    assert_eq!(config.scan_timeout.as_secs(), 60);
    assert_eq!(config.landing_timeout.as_secs(), 30);
    assert!(!config.skip_bad_rows);
}
