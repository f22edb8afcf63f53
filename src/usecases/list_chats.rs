use futures_util::future::join_all;

use crate::{
    domain::{
        chat::{ChatRecord, ChatSummary},
        events::now_unix_secs,
        text::resolve_text,
    },
    usecases::contracts::{AutomationClient, AutomationError},
};

pub const CHAT_LIST_LIMIT: usize = 15;

const PROFILE_PIC_LOOKUP_FAILED: &str = "PROXY_PROFILE_PIC_LOOKUP_FAILED";

/// Most recent chats, enriched with a preview and profile picture.
///
/// Profile pictures are looked up concurrently and degrade to an empty URL.
pub async fn list_chats(client: &dyn AutomationClient) -> Result<Vec<ChatSummary>, AutomationError> {
    let chats = client.get_chats().await?;

    let summaries = chats
        .into_iter()
        .take(CHAT_LIST_LIMIT)
        .map(|chat| summarize(client, chat));

    Ok(join_all(summaries).await)
}

async fn summarize(client: &dyn AutomationClient, chat: ChatRecord) -> ChatSummary {
    let pic = profile_pic(client, &chat.id.serialized).await;

    ChatSummary {
        name: chat.display_name(),
        last_message: chat
            .last_message
            .as_ref()
            .map(resolve_text)
            .unwrap_or_default(),
        timestamp: chat
            .timestamp
            .map(|secs| secs as f64)
            .unwrap_or_else(now_unix_secs),
        pic,
        unread_count: chat.unread_count,
        id: chat.id.serialized,
    }
}

async fn profile_pic(client: &dyn AutomationClient, contact_id: &str) -> String {
    if contact_id.is_empty() {
        return String::new();
    }

    match client.profile_pic_url(contact_id).await {
        Ok(url) => url.unwrap_or_default(),
        Err(error) => {
            tracing::debug!(
                code = PROFILE_PIC_LOOKUP_FAILED,
                contact_id,
                error = %error,
                "profile picture lookup failed"
            );
            String::new()
        }
    }
}
