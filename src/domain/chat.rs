use super::message::InboundMessage;

/// WhatsApp chat id: `user@server`, serialized as a single string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatId {
    pub user: String,
    pub serialized: String,
}

impl ChatId {
    pub fn parse(serialized: &str) -> Self {
        let user = serialized.split('@').next().unwrap_or_default().to_owned();
        Self {
            user,
            serialized: serialized.to_owned(),
        }
    }
}

/// Chat as reported by the automation client.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatRecord {
    pub id: ChatId,
    pub name: Option<String>,
    pub is_group: bool,
    pub unread_count: i32,
    /// Seconds since epoch of the last activity.
    pub timestamp: Option<i64>,
    pub last_message: Option<InboundMessage>,
}

impl ChatRecord {
    /// Name shown in the chat list: explicit name, else the id user part,
    /// else a group placeholder, else the raw id.
    pub fn display_name(&self) -> String {
        if let Some(name) = self.explicit_name() {
            return name.to_owned();
        }

        if !self.id.user.trim().is_empty() {
            return self.id.user.clone();
        }

        if self.id.serialized.contains('-') {
            return "Group Chat".to_owned();
        }

        self.id.serialized.clone()
    }

    pub fn explicit_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatSummary {
    pub id: String,
    pub name: String,
    pub last_message: String,
    /// Seconds since epoch.
    pub timestamp: f64,
    /// Profile picture URL, empty when unknown.
    pub pic: String,
    pub unread_count: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSummary {
    pub id: String,
    pub name: String,
}
