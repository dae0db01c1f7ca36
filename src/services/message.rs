//! Message dispatch endpoints.

use serde::Serialize;

use crate::attachment::Attachment;
use crate::client::EvolutionClient;
use crate::error::Result;
use crate::models::{
    AudioMessage, ButtonMessage, ContactMessage, ListMessage, LocationMessage, MediaMessage,
    PollMessage, PtvMessage, ReactionMessage, SentMessage, StatusMessage, StickerMessage,
    TextMessage,
};

use super::instance_path;

/// Message operations, obtained from [`EvolutionClient::messages`].
///
/// Every method posts to `message/send<Kind>/{instance}`. The `*_file`
/// variants upload the media as a multipart attachment instead of a URL.
///
/// # Example
///
/// ```no_run
/// use evoapi::{Attachment, EvolutionClient, MediaMessage, MediaType, TextMessage};
///
/// # async fn example() -> evoapi::Result<()> {
/// let client = EvolutionClient::from_env()?;
/// let messages = client.messages();
///
/// messages
///     .send_text("Sales", &TextMessage::new("5511999999999", "Hello!"))
///     .await?;
///
/// let photo = Attachment::from_path("photo.jpg").await?;
/// messages
///     .send_media_file(
///         "Sales",
///         &MediaMessage::for_upload("5511999999999", MediaType::Image),
///         photo,
///     )
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Copy)]
pub struct Messages<'a> {
    client: &'a EvolutionClient,
    token: Option<&'a str>,
}

impl<'a> Messages<'a> {
    pub(crate) fn new(client: &'a EvolutionClient) -> Self {
        Self {
            client,
            token: None,
        }
    }

    /// Authenticate calls made through this handle with an instance token
    /// instead of the global API key.
    #[must_use]
    pub fn with_token(mut self, token: &'a str) -> Self {
        self.token = Some(token);
        self
    }

    pub async fn send_text(&self, instance: &str, message: &TextMessage) -> Result<SentMessage> {
        self.dispatch("sendText", instance, message, None).await
    }

    /// Send media referenced by URL or base64.
    pub async fn send_media(&self, instance: &str, message: &MediaMessage) -> Result<SentMessage> {
        self.dispatch("sendMedia", instance, message, None).await
    }

    /// Upload media as a multipart attachment.
    pub async fn send_media_file(
        &self,
        instance: &str,
        message: &MediaMessage,
        file: Attachment,
    ) -> Result<SentMessage> {
        self.dispatch("sendMedia", instance, message, Some(file))
            .await
    }

    pub async fn send_ptv(&self, instance: &str, message: &PtvMessage) -> Result<SentMessage> {
        self.dispatch("sendPtv", instance, message, None).await
    }

    /// Upload a video note as a multipart attachment.
    pub async fn send_ptv_file(
        &self,
        instance: &str,
        message: &PtvMessage,
        file: Attachment,
    ) -> Result<SentMessage> {
        self.dispatch("sendPtv", instance, message, Some(file)).await
    }

    pub async fn send_audio(&self, instance: &str, message: &AudioMessage) -> Result<SentMessage> {
        self.dispatch("sendWhatsAppAudio", instance, message, None)
            .await
    }

    /// Upload a voice note as a multipart attachment.
    pub async fn send_audio_file(
        &self,
        instance: &str,
        message: &AudioMessage,
        file: Attachment,
    ) -> Result<SentMessage> {
        self.dispatch("sendWhatsAppAudio", instance, message, Some(file))
            .await
    }

    pub async fn send_status(&self, instance: &str, message: &StatusMessage) -> Result<SentMessage> {
        self.dispatch("sendStatus", instance, message, None).await
    }

    pub async fn send_sticker(
        &self,
        instance: &str,
        message: &StickerMessage,
    ) -> Result<SentMessage> {
        self.dispatch("sendSticker", instance, message, None).await
    }

    pub async fn send_location(
        &self,
        instance: &str,
        message: &LocationMessage,
    ) -> Result<SentMessage> {
        self.dispatch("sendLocation", instance, message, None).await
    }

    pub async fn send_contact(
        &self,
        instance: &str,
        message: &ContactMessage,
    ) -> Result<SentMessage> {
        self.dispatch("sendContact", instance, message, None).await
    }

    pub async fn send_reaction(
        &self,
        instance: &str,
        message: &ReactionMessage,
    ) -> Result<SentMessage> {
        self.dispatch("sendReaction", instance, message, None).await
    }

    pub async fn send_poll(&self, instance: &str, message: &PollMessage) -> Result<SentMessage> {
        self.dispatch("sendPoll", instance, message, None).await
    }

    pub async fn send_list(&self, instance: &str, message: &ListMessage) -> Result<SentMessage> {
        self.dispatch("sendList", instance, message, None).await
    }

    pub async fn send_buttons(
        &self,
        instance: &str,
        message: &ButtonMessage,
    ) -> Result<SentMessage> {
        self.dispatch("sendButtons", instance, message, None).await
    }

    async fn dispatch<B>(
        &self,
        kind: &str,
        instance: &str,
        message: &B,
        file: Option<Attachment>,
    ) -> Result<SentMessage>
    where
        B: Serialize + ?Sized,
    {
        let endpoint = instance_path(&format!("message/{kind}"), instance)?;

        match file {
            Some(file) => {
                self.client
                    .post_multipart(&endpoint, Some(message), self.token, vec![file])
                    .await
            }
            None => self.client.post(&endpoint, Some(message), self.token).await,
        }
    }
}
