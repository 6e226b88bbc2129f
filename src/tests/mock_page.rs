//! A scripted page for exercising the workflow without a browser.
//!
//! Nodes are keyed by the canonical string of the selector that finds them,
//! so fixtures are built with the same constants the workflow uses. Waits
//! resolve immediately: a present node is returned, a missing one times out.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::config::BotConfig;
use crate::element::{PageElement, PageElementImpl};
use crate::errors::AutomationError;
use crate::page::PageEngine;
use crate::selector::{zhipin, Selector};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Goto(String),
    Clicked(String),
    Cleared(String),
    Typed(String, String),
    Screenshot(PathBuf),
}

pub type EventLog = Arc<Mutex<Vec<Event>>>;

#[derive(Debug)]
pub struct MockNode {
    label: String,
    text: String,
    displayed: bool,
    enabled: bool,
    children: HashMap<String, Vec<Arc<MockNode>>>,
}

impl MockNode {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            text: String::new(),
            displayed: true,
            enabled: true,
            children: HashMap::new(),
        }
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn displayed(mut self, displayed: bool) -> Self {
        self.displayed = displayed;
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn child(mut self, selector: &str, node: MockNode) -> Self {
        self.children
            .entry(Selector::from(selector).to_string())
            .or_default()
            .push(Arc::new(node));
        self
    }

    fn lookup(&self, selector: &Selector) -> Option<&Vec<Arc<MockNode>>> {
        self.children.get(&selector.to_string())
    }
}

#[derive(Debug, Clone)]
struct MockElement {
    node: Arc<MockNode>,
    log: EventLog,
}

impl MockElement {
    fn wrap(node: Arc<MockNode>, log: EventLog) -> PageElement {
        PageElement::new(Box::new(MockElement { node, log }))
    }
}

#[async_trait]
impl PageElementImpl for MockElement {
    async fn text(&self) -> Result<String, AutomationError> {
        Ok(self.node.text.clone())
    }

    async fn click(&self) -> Result<(), AutomationError> {
        self.log
            .lock()
            .unwrap()
            .push(Event::Clicked(self.node.label.clone()));
        Ok(())
    }

    async fn clear(&self) -> Result<(), AutomationError> {
        self.log
            .lock()
            .unwrap()
            .push(Event::Cleared(self.node.label.clone()));
        Ok(())
    }

    async fn type_text(&self, text: &str) -> Result<(), AutomationError> {
        self.log
            .lock()
            .unwrap()
            .push(Event::Typed(self.node.label.clone(), text.to_string()));
        Ok(())
    }

    async fn is_displayed(&self) -> Result<bool, AutomationError> {
        Ok(self.node.displayed)
    }

    async fn is_enabled(&self) -> Result<bool, AutomationError> {
        Ok(self.node.enabled)
    }

    async fn find(&self, selector: &Selector) -> Result<PageElement, AutomationError> {
        match self.node.lookup(selector).and_then(|nodes| nodes.first()) {
            Some(node) => Ok(MockElement::wrap(node.clone(), self.log.clone())),
            None => Err(AutomationError::ElementNotFound(format!(
                "no descendant matching {selector}"
            ))),
        }
    }

    async fn find_all(&self, selector: &Selector) -> Result<Vec<PageElement>, AutomationError> {
        let nodes = self.node.lookup(selector).cloned().unwrap_or_default();
        Ok(nodes
            .into_iter()
            .map(|node| MockElement::wrap(node, self.log.clone()))
            .collect())
    }

    fn clone_box(&self) -> Box<dyn PageElementImpl> {
        Box::new(self.clone())
    }
}

pub struct MockEngine {
    root: Arc<MockNode>,
    pub log: EventLog,
}

impl MockEngine {
    pub fn new(root: MockNode) -> Self {
        Self {
            root: Arc::new(root),
            log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn events(&self) -> Vec<Event> {
        self.log.lock().unwrap().clone()
    }

    fn root_find(&self, selector: &Selector) -> Result<PageElement, AutomationError> {
        match self.root.lookup(selector).and_then(|nodes| nodes.first()) {
            Some(node) => Ok(MockElement::wrap(node.clone(), self.log.clone())),
            None => Err(AutomationError::ElementNotFound(format!(
                "no element matching {selector}"
            ))),
        }
    }
}

#[async_trait]
impl PageEngine for MockEngine {
    async fn goto(&self, url: &str) -> Result<(), AutomationError> {
        self.log.lock().unwrap().push(Event::Goto(url.to_string()));
        Ok(())
    }

    async fn current_url(&self) -> Result<String, AutomationError> {
        Ok("https://www.zhipin.com/web/geek/recommend".to_string())
    }

    async fn find(&self, selector: &Selector) -> Result<PageElement, AutomationError> {
        self.root_find(selector)
    }

    async fn find_all(&self, selector: &Selector) -> Result<Vec<PageElement>, AutomationError> {
        let nodes = self.root.lookup(selector).cloned().unwrap_or_default();
        Ok(nodes
            .into_iter()
            .map(|node| MockElement::wrap(node, self.log.clone()))
            .collect())
    }

    async fn wait_for(
        &self,
        selector: &Selector,
        timeout: Duration,
    ) -> Result<PageElement, AutomationError> {
        self.root_find(selector).map_err(|e| match e {
            AutomationError::ElementNotFound(msg) => AutomationError::Timeout(format!(
                "timed out after {timeout:?} waiting for {selector}: {msg}"
            )),
            other => other,
        })
    }

    async fn wait_clickable(
        &self,
        selector: &Selector,
        timeout: Duration,
    ) -> Result<PageElement, AutomationError> {
        let element = self.wait_for(selector, timeout).await?;
        if !element.is_displayed().await? {
            return Err(AutomationError::ElementNotVisible(selector.to_string()));
        }
        if !element.is_enabled().await? {
            return Err(AutomationError::ElementNotEnabled(selector.to_string()));
        }
        Ok(element)
    }

    async fn screenshot(&self, path: &Path) -> Result<(), AutomationError> {
        self.log
            .lock()
            .unwrap()
            .push(Event::Screenshot(path.to_path_buf()));
        Ok(())
    }

    async fn close(&self) -> Result<(), AutomationError> {
        Ok(())
    }
}

/// Zero the fixed pauses and keep screenshots out of the working directory
pub fn test_config() -> BotConfig {
    BotConfig {
        screenshot_dir: std::env::temp_dir().join("zhipin-bot-tests"),
        poll_interval: Duration::ZERO,
        settle_delay: Duration::ZERO,
        ..BotConfig::default()
    }
}

/// One conversation row; `badge` is the unread badge text, absent when None
pub fn row(name: &str, badge: Option<&str>) -> MockNode {
    let mut row = MockNode::new(&format!("row:{name}"))
        .child(zhipin::ROW_TIME, MockNode::new("time").text("10:24"))
        .child(zhipin::ROW_NAME, MockNode::new("name").text(name))
        .child(zhipin::ROW_COMPANY, MockNode::new("company").text("Acme"))
        .child(
            zhipin::ROW_POSITION,
            MockNode::new("position").text("Backend Engineer"),
        )
        .child(
            zhipin::ROW_LAST_MESSAGE,
            MockNode::new("last-msg").text("你好，看了你的简历"),
        );
    if let Some(text) = badge {
        row = row.child(zhipin::UNREAD_BADGE, MockNode::new("badge").text(text));
    }
    row
}

/// A message-center page with the given rows and a send button state
pub fn inbox_page(rows: Vec<MockNode>, send_enabled: bool) -> MockNode {
    let mut group = MockNode::new("group");
    for row in rows {
        group = group.child(zhipin::CHAT_ROW, row);
    }
    MockNode::new("root")
        .child(
            zhipin::USER_LIST,
            MockNode::new("user-list").child(zhipin::CHAT_GROUP, group),
        )
        .child(zhipin::MESSAGE_PANE, MockNode::new("message-pane"))
        .child(zhipin::CHAT_INPUT, MockNode::new("chat-input"))
        .child(
            zhipin::SEND_BUTTON,
            MockNode::new("send-button").enabled(send_enabled),
        )
}

/// Turn a fixture node into a standalone element plus its event log
pub fn element(node: MockNode) -> (PageElement, EventLog) {
    let log: EventLog = Arc::new(Mutex::new(Vec::new()));
    (MockElement::wrap(Arc::new(node), log.clone()), log)
}
