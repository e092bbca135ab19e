//! Notifications and the context-menu entry

use serde::{Deserialize, Serialize};

use crate::messaging::{MessagingError, Port, Request};

/// Notification style; only basic notifications are used
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    #[default]
    Basic,
}

/// A desktop notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub icon_url: String,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub const ICON: &'static str = "icons/icon48.png";

    pub fn basic(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Basic,
            icon_url: Self::ICON.to_string(),
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Delivers notifications to the user
pub trait Notifier: Send + Sync + 'static {
    fn notify(&self, notification: &Notification);
}

/// Notifier that writes to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: &Notification) {
        tracing::info!("[notification] {}: {}", notification.title, notification.message);
    }
}

/// Where a context-menu entry appears
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuContext {
    Selection,
}

/// A registered context-menu entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    pub id: String,
    pub title: String,
    pub contexts: Vec<MenuContext>,
}

/// Id of the "Ask Coding Mentor" entry
pub const ASK_MENTOR_MENU_ID: &str = "askMentor";

/// Registered context-menu entries
#[derive(Debug, Clone, Default)]
pub struct ContextMenu {
    entries: Vec<MenuEntry>,
}

impl ContextMenu {
    /// Register an entry, replacing any entry with the same id
    pub fn register(&mut self, entry: MenuEntry) {
        self.entries.retain(|e| e.id != entry.id);
        self.entries.push(entry);
    }

    /// Register the mentor's only entry
    pub fn register_ask_mentor(&mut self) {
        self.register(MenuEntry {
            id: ASK_MENTOR_MENU_ID.to_string(),
            title: "Ask Coding Mentor".to_string(),
            contexts: vec![MenuContext::Selection],
        });
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&MenuEntry> {
        self.entries.iter().find(|e| e.id == id)
    }
}

/// Routes context-menu clicks to the widget
#[derive(Debug, Clone)]
pub struct MenuClickHandler {
    menu: ContextMenu,
    content: Option<Port>,
}

impl MenuClickHandler {
    pub fn new(menu: ContextMenu, content: Option<Port>) -> Self {
        Self { menu, content }
    }

    /// An entry was clicked with `selection` highlighted
    ///
    /// Returns `Ok(false)` for entries that are not registered.
    pub fn on_click(&self, item_id: &str, selection: &str) -> Result<bool, MessagingError> {
        if item_id != ASK_MENTOR_MENU_ID || self.menu.get(item_id).is_none() {
            return Ok(false);
        }
        let Some(content) = &self.content else {
            return Err(MessagingError::Disconnected { endpoint: "content", action: "askAboutSelection" });
        };
        content.send(Request::AskAboutSelection { selected_text: selection.to_string() })?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_json_shape() {
        let json = serde_json::to_value(Notification::basic("Done", "All hints used")).unwrap();
        assert_eq!(json["type"], "basic");
        assert_eq!(json["iconUrl"], "icons/icon48.png");
    }

    #[test]
    fn registering_twice_keeps_one_entry() {
        let mut menu = ContextMenu::default();
        menu.register_ask_mentor();
        menu.register_ask_mentor();

        assert_eq!(menu.entries().len(), 1);
        let entry = menu.get(ASK_MENTOR_MENU_ID).unwrap();
        assert_eq!(entry.title, "Ask Coding Mentor");
        assert_eq!(entry.contexts, vec![MenuContext::Selection]);
    }

    #[test]
    fn click_without_widget_is_disconnected() {
        let mut menu = ContextMenu::default();
        menu.register_ask_mentor();
        let handler = MenuClickHandler::new(menu, None);

        assert!(matches!(
            handler.on_click(ASK_MENTOR_MENU_ID, "heap"),
            Err(MessagingError::Disconnected { endpoint: "content", .. })
        ));
    }
}
