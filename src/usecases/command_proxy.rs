//! Per-connection command dispatch.
//!
//! Every command is independent and best-effort: a failure turns into the
//! command's fallback [`Reply`] and is only visible in the logs.

use std::sync::Arc;

use crate::{
    domain::{
        chat::{ChatSummary, ContactSummary},
        events::HistoryEntry,
    },
    usecases::{
        contracts::AutomationClient,
        list_chats::list_chats,
        list_contacts::list_contacts,
        load_messages::load_messages,
        mark_read::mark_read,
        send_media::{send_media, SendMediaCommand},
        send_message::{send_message, SendMessageCommand},
    },
};

const PROXY_LIST_CHATS_FAILED: &str = "PROXY_LIST_CHATS_FAILED";
const PROXY_LIST_CONTACTS_FAILED: &str = "PROXY_LIST_CONTACTS_FAILED";
const PROXY_LOAD_MESSAGES_FAILED: &str = "PROXY_LOAD_MESSAGES_FAILED";
const PROXY_SEND_MESSAGE_FAILED: &str = "PROXY_SEND_MESSAGE_FAILED";
const PROXY_SEND_MEDIA_FAILED: &str = "PROXY_SEND_MEDIA_FAILED";
const PROXY_MARK_READ_FAILED: &str = "PROXY_MARK_READ_FAILED";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCommand {
    ListChats,
    ListContacts,
    GetMessages { chat_id: String },
    SendMessage(SendMessageCommand),
    SendMedia(SendMediaCommand),
    MarkRead { chat_id: String },
}

impl ClientCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ListChats => "get_chats",
            Self::ListContacts => "get_all_contacts",
            Self::GetMessages { .. } => "get_messages",
            Self::SendMessage(_) => "send_message",
            Self::SendMedia(_) => "send_image",
            Self::MarkRead { .. } => "mark_read",
        }
    }
}

/// What goes back to the requesting dashboard.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    ChatList(Vec<ChatSummary>),
    Contacts(Vec<ContactSummary>),
    History(Vec<HistoryEntry>),
    /// Nothing is sent back.
    Silent,
}

#[derive(Clone)]
pub struct CommandProxy {
    client: Arc<dyn AutomationClient>,
}

impl CommandProxy {
    pub fn new(client: Arc<dyn AutomationClient>) -> Self {
        Self { client }
    }

    pub async fn dispatch(&self, command: ClientCommand) -> Reply {
        let client = self.client.as_ref();

        match command {
            ClientCommand::ListChats => match list_chats(client).await {
                Ok(chats) => Reply::ChatList(chats),
                Err(error) => {
                    tracing::warn!(code = PROXY_LIST_CHATS_FAILED, error = %error, "chat list failed");
                    Reply::ChatList(Vec::new())
                }
            },
            ClientCommand::ListContacts => match list_contacts(client).await {
                Ok(contacts) => Reply::Contacts(contacts),
                Err(error) => {
                    tracing::warn!(
                        code = PROXY_LIST_CONTACTS_FAILED,
                        error = %error,
                        "contact list failed"
                    );
                    Reply::Contacts(Vec::new())
                }
            },
            ClientCommand::GetMessages { chat_id } => match load_messages(client, &chat_id).await {
                Ok(history) => Reply::History(history),
                Err(error) => {
                    tracing::warn!(
                        code = PROXY_LOAD_MESSAGES_FAILED,
                        chat_id = %chat_id,
                        error = %error,
                        "message history failed"
                    );
                    Reply::Silent
                }
            },
            ClientCommand::SendMessage(command) => {
                let chat_id = command.chat_id.clone();
                if let Err(error) = send_message(client, command).await {
                    tracing::warn!(
                        code = PROXY_SEND_MESSAGE_FAILED,
                        chat_id = %chat_id,
                        error = %error,
                        "send message failed"
                    );
                }
                Reply::Silent
            }
            ClientCommand::SendMedia(command) => {
                let chat_id = command.chat_id.clone();
                if let Err(error) = send_media(client, command).await {
                    tracing::warn!(
                        code = PROXY_SEND_MEDIA_FAILED,
                        chat_id = %chat_id,
                        error = ?error,
                        "send media failed"
                    );
                }
                Reply::Silent
            }
            ClientCommand::MarkRead { chat_id } => {
                if let Err(error) = mark_read(client, &chat_id).await {
                    tracing::warn!(
                        code = PROXY_MARK_READ_FAILED,
                        chat_id = %chat_id,
                        error = %error,
                        "mark read failed"
                    );
                }
                Reply::Silent
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::media::OutgoingMedia,
        test_support::{chat, StubAutomation},
        usecases::contracts::AutomationError,
    };

    fn proxy(client: StubAutomation) -> (CommandProxy, Arc<StubAutomation>) {
        let client = Arc::new(client);
        (CommandProxy::new(client.clone()), client)
    }

    fn failing() -> StubAutomation {
        let down = AutomationError::Unavailable("browser crashed".to_owned());
        StubAutomation {
            chats: Err(down.clone()),
            messages: Err(down.clone()),
            send: Err(down),
            ..StubAutomation::default()
        }
    }

    #[tokio::test]
    async fn failed_chat_list_replies_with_empty_list() {
        let (proxy, _) = proxy(failing());

        assert_eq!(
            proxy.dispatch(ClientCommand::ListChats).await,
            Reply::ChatList(Vec::new())
        );
    }

    #[tokio::test]
    async fn failed_contact_list_replies_with_empty_list() {
        let (proxy, _) = proxy(failing());

        assert_eq!(
            proxy.dispatch(ClientCommand::ListContacts).await,
            Reply::Contacts(Vec::new())
        );
    }

    #[tokio::test]
    async fn failed_history_emits_nothing() {
        let (proxy, _) = proxy(failing());

        let reply = proxy
            .dispatch(ClientCommand::GetMessages {
                chat_id: "1@c.us".to_owned(),
            })
            .await;

        assert_eq!(reply, Reply::Silent);
    }

    #[tokio::test]
    async fn history_replies_with_entries() {
        let (proxy, _) = proxy(StubAutomation {
            chats: Ok(vec![chat("1@c.us", Some("One"), false)]),
            ..StubAutomation::default()
        });

        let reply = proxy
            .dispatch(ClientCommand::GetMessages {
                chat_id: "1@c.us".to_owned(),
            })
            .await;

        assert_eq!(reply, Reply::History(Vec::new()));
    }

    #[tokio::test]
    async fn fire_and_forget_commands_are_silent_even_on_failure() {
        let (proxy, client) = proxy(failing());

        let commands = [
            ClientCommand::SendMessage(SendMessageCommand {
                chat_id: "1@c.us".to_owned(),
                text: "hi".to_owned(),
            }),
            ClientCommand::SendMedia(SendMediaCommand {
                chat_id: "1@c.us".to_owned(),
                data: "AAAA".to_owned(),
                is_audio: false,
                caption: None,
            }),
            ClientCommand::MarkRead {
                chat_id: "1@c.us".to_owned(),
            },
        ];

        for command in commands {
            assert_eq!(proxy.dispatch(command).await, Reply::Silent);
        }
        assert_eq!(client.calls().len(), 3);
    }

    #[tokio::test]
    async fn send_image_with_audio_flag_goes_out_as_voice_note() {
        let (proxy, client) = proxy(StubAutomation::default());

        proxy
            .dispatch(ClientCommand::SendMedia(SendMediaCommand {
                chat_id: "1@c.us".to_owned(),
                data: "T2dnUw==".to_owned(),
                is_audio: true,
                caption: Some("caption".to_owned()),
            }))
            .await;

        assert!(matches!(
            client.sent_media()[0].1,
            OutgoingMedia::VoiceNote { .. }
        ));
    }

    #[test]
    fn command_names_match_wire_events() {
        assert_eq!(ClientCommand::ListChats.name(), "get_chats");
        assert_eq!(ClientCommand::ListContacts.name(), "get_all_contacts");
    }
}
