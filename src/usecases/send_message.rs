//! Use case for sending a text message to a chat.

use crate::usecases::contracts::{AutomationClient, AutomationError};

/// Command to send a message to a specific chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendMessageCommand {
    pub chat_id: String,
    pub text: String,
}

/// Sends `command.text` exactly as typed; the automation client decides what
/// it accepts.
pub async fn send_message(
    client: &dyn AutomationClient,
    command: SendMessageCommand,
) -> Result<(), AutomationError> {
    client.send_text(&command.chat_id, &command.text).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StubAutomation;

    fn command(text: &str) -> SendMessageCommand {
        SendMessageCommand {
            chat_id: "1@c.us".to_owned(),
            text: text.to_owned(),
        }
    }

    #[tokio::test]
    async fn whitespace_only_text_is_forwarded_unchanged() {
        let client = StubAutomation::default();

        let result = send_message(&client, command("   ")).await;

        assert_eq!(result, Ok(()));
        assert_eq!(client.calls(), vec!["send_text:1@c.us:   ".to_owned()]);
    }

    #[tokio::test]
    async fn passes_chat_id_and_text_through() {
        let client = StubAutomation::default();

        let result = send_message(&client, command(" hi ")).await;

        assert_eq!(result, Ok(()));
        assert_eq!(client.calls(), vec!["send_text:1@c.us: hi ".to_owned()]);
    }

    #[tokio::test]
    async fn returns_upstream_failure() {
        let client = StubAutomation {
            send: Err(AutomationError::ChatNotFound("1@c.us".to_owned())),
            ..StubAutomation::default()
        };

        let result = send_message(&client, command("hi")).await;

        assert_eq!(
            result,
            Err(AutomationError::ChatNotFound("1@c.us".to_owned()))
        );
    }
}
