//! HTTP adapter for a WhatsApp HTTP API service running the
//! whatsapp-web.js engine. The service owns the browser and the session.

use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client, RequestBuilder, Response, Url};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    automation::wire::{WireChat, WireMessage, WireProfilePicture, WireQrCode},
    domain::{
        chat::ChatRecord,
        media::{DownloadedMedia, OutgoingMedia},
        message::InboundMessage,
    },
    infra::{config::AutomationConfig, error::AppError},
    usecases::contracts::{AutomationClient, AutomationError},
};

const API_KEY_HEADER: &str = "X-Api-Key";
const FALLBACK_MIMETYPE: &str = "application/octet-stream";

#[derive(Debug, Clone)]
pub struct WahaClient {
    http: Client,
    base_url: Url,
    session: String,
    api_key: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChatRequest<'a> {
    session: &'a str,
    chat_id: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendTextRequest<'a> {
    session: &'a str,
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct FilePayload<'a> {
    mimetype: &'a str,
    filename: &'a str,
    data: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendImageRequest<'a> {
    session: &'a str,
    chat_id: &'a str,
    file: FilePayload<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    caption: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendVoiceRequest<'a> {
    session: &'a str,
    chat_id: &'a str,
    file: FilePayload<'a>,
    convert: bool,
}

impl WahaClient {
    pub fn new(config: &AutomationConfig) -> Result<Self, AppError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|err| anyhow::anyhow!("invalid automation base_url {:?}: {err}", config.base_url))?;
        let http = Client::builder()
            .build()
            .map_err(AppError::HttpClientBuild)?;

        Ok(Self {
            http,
            base_url,
            session: config.session.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, AutomationError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AutomationError::InvalidData("base_url cannot carry a path".to_owned()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.header(API_KEY_HEADER, key),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, AutomationError> {
        let response = self.execute(self.http.get(url)).await?;
        response
            .json::<T>()
            .await
            .map_err(|err| AutomationError::InvalidData(err.to_string()))
    }

    async fn post_json<B: Serialize + ?Sized>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<(), AutomationError> {
        let url = self.endpoint(segments)?;
        self.execute(self.http.post(url).json(body)).await?;
        Ok(())
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Response, AutomationError> {
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(|err| AutomationError::Unavailable(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let details = response.text().await.unwrap_or_default();
        Err(AutomationError::Rejected {
            status: status.as_u16(),
            details,
        })
    }
}

#[async_trait]
impl AutomationClient for WahaClient {
    async fn get_chats(&self) -> Result<Vec<ChatRecord>, AutomationError> {
        let url = self.endpoint(&["api", self.session.as_str(), "chats"])?;
        let chats: Vec<WireChat> = self.get_json(url).await?;

        Ok(chats.into_iter().map(ChatRecord::from).collect())
    }

    // The HTTP API has no single-chat lookup, so the listing is searched.
    async fn get_chat_by_id(&self, chat_id: &str) -> Result<ChatRecord, AutomationError> {
        self.get_chats()
            .await?
            .into_iter()
            .find(|chat| chat.id.serialized == chat_id)
            .ok_or_else(|| AutomationError::ChatNotFound(chat_id.to_owned()))
    }

    async fn fetch_messages(
        &self,
        chat_id: &str,
        limit: usize,
    ) -> Result<Vec<InboundMessage>, AutomationError> {
        let mut url = self.endpoint(&["api", self.session.as_str(), "chats", chat_id, "messages"])?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string())
            .append_pair("downloadMedia", "true");

        let messages: Vec<WireMessage> = self.get_json(url).await?;
        let mut messages: Vec<InboundMessage> =
            messages.into_iter().map(InboundMessage::from).collect();
        messages.sort_by_key(|message| message.timestamp);

        Ok(messages)
    }

    async fn profile_pic_url(&self, contact_id: &str) -> Result<Option<String>, AutomationError> {
        let mut url = self.endpoint(&["api", "contacts", "profile-picture"])?;
        url.query_pairs_mut()
            .append_pair("contactId", contact_id)
            .append_pair("session", &self.session);

        let picture: WireProfilePicture = self.get_json(url).await?;
        Ok(picture.profile_picture_url.filter(|url| !url.is_empty()))
    }

    async fn download_media(
        &self,
        message: &InboundMessage,
    ) -> Result<Option<DownloadedMedia>, AutomationError> {
        let Some(locator) = &message.media else {
            return Ok(None);
        };

        let url = Url::parse(&locator.url)
            .or_else(|_| self.base_url.join(&locator.url))
            .map_err(|err| AutomationError::InvalidData(err.to_string()))?;
        let response = self.execute(self.http.get(url)).await?;

        let mimetype = locator
            .mimetype
            .clone()
            .or_else(|| {
                response
                    .headers()
                    .get(CONTENT_TYPE)
                    .and_then(|value| value.to_str().ok())
                    .map(ToOwned::to_owned)
            })
            .unwrap_or_else(|| FALLBACK_MIMETYPE.to_owned());
        let bytes = response
            .bytes()
            .await
            .map_err(|err| AutomationError::Unavailable(err.to_string()))?;

        if bytes.is_empty() {
            return Ok(None);
        }

        Ok(Some(DownloadedMedia::from_bytes(mimetype, &bytes)))
    }

    async fn send_text(&self, chat_id: &str, text: &str) -> Result<(), AutomationError> {
        let request = SendTextRequest {
            session: &self.session,
            chat_id,
            text,
        };
        self.post_json(&["api", "sendText"], &request).await
    }

    async fn send_media(&self, chat_id: &str, media: OutgoingMedia) -> Result<(), AutomationError> {
        match &media {
            OutgoingMedia::Image {
                mimetype,
                filename,
                data,
                caption,
            } => {
                let request = SendImageRequest {
                    session: &self.session,
                    chat_id,
                    file: FilePayload {
                        mimetype,
                        filename,
                        data,
                    },
                    caption: caption.as_deref(),
                };
                self.post_json(&["api", "sendImage"], &request).await
            }
            OutgoingMedia::VoiceNote {
                mimetype,
                filename,
                data,
            } => {
                let request = SendVoiceRequest {
                    session: &self.session,
                    chat_id,
                    file: FilePayload {
                        mimetype,
                        filename,
                        data,
                    },
                    convert: true,
                };
                self.post_json(&["api", "sendVoice"], &request).await
            }
        }
    }

    async fn send_seen(&self, chat_id: &str) -> Result<(), AutomationError> {
        let request = ChatRequest {
            session: &self.session,
            chat_id,
        };
        self.post_json(&["api", "sendSeen"], &request).await
    }

    async fn pairing_code(&self) -> Result<String, AutomationError> {
        let mut url = self.endpoint(&["api", self.session.as_str(), "auth", "qr"])?;
        url.query_pairs_mut().append_pair("format", "raw");

        let qr: WireQrCode = self.get_json(url).await?;
        qr.value
            .filter(|value| !value.is_empty())
            .ok_or_else(|| AutomationError::InvalidData("empty pairing code".to_owned()))
    }
}
