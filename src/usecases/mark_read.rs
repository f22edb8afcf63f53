use crate::usecases::contracts::{AutomationClient, AutomationError};

/// Marks a chat as seen. Read state itself lives in the automation client.
pub async fn mark_read(client: &dyn AutomationClient, chat_id: &str) -> Result<(), AutomationError> {
    let chat = client.get_chat_by_id(chat_id).await?;
    client.send_seen(&chat.id.serialized).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{chat, StubAutomation};

    #[tokio::test]
    async fn looks_up_chat_then_sends_seen() {
        let client = StubAutomation {
            chats: Ok(vec![chat("9@c.us", Some("Nine"), false)]),
            ..StubAutomation::default()
        };

        mark_read(&client, "9@c.us").await.expect("mark read should succeed");

        assert_eq!(
            client.calls(),
            vec![
                "get_chat_by_id:9@c.us".to_owned(),
                "send_seen:9@c.us".to_owned(),
            ]
        );
    }

    #[tokio::test]
    async fn unknown_chat_never_sends_seen() {
        let client = StubAutomation::default();

        let result = mark_read(&client, "9@c.us").await;

        assert!(matches!(result, Err(AutomationError::ChatNotFound(_))));
        assert_eq!(client.calls(), vec!["get_chat_by_id:9@c.us".to_owned()]);
    }
}
