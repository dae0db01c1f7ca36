//! Outgoing message payloads and the send response.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use serde_with::skip_serializing_none;

/// Kind of media carried by a [`MediaMessage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
    Document,
}

/// Kind of status (story) update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusType {
    Text,
    Image,
    Video,
    Audio,
}

/// Font of a text status. Sent as its numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontType {
    Serif = 1,
    NoricanRegular = 2,
    BryndanWrite = 3,
    BebasneueRegular = 4,
    OswaldHeavy = 5,
}

impl Serialize for FontType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

/// Identifies a message in a chat.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MessageKey {
    /// Chat JID the message belongs to.
    pub remote_jid: String,
    /// Whether the message was sent by this instance.
    pub from_me: bool,
    /// Message ID.
    pub id: String,
    /// Sender JID inside group chats.
    pub participant: Option<String>,
}

impl MessageKey {
    pub fn new(remote_jid: impl Into<String>, from_me: bool, id: impl Into<String>) -> Self {
        Self {
            remote_jid: remote_jid.into(),
            from_me,
            id: id.into(),
            participant: None,
        }
    }
}

/// A message being replied to.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuotedMessage {
    pub key: MessageKey,
    /// Original message content, e.g. `{"conversation": "hi"}`.
    pub message: Option<Value>,
}

/// Plain text message.
///
/// ```
/// use evoapi::TextMessage;
///
/// let msg = TextMessage {
///     delay: Some(1200),
///     ..TextMessage::new("5511999999999", "Hello!")
/// };
/// assert_eq!(msg.text, "Hello!");
/// ```
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextMessage {
    /// Recipient number or JID.
    pub number: String,
    pub text: String,
    /// Presence delay before sending, in milliseconds.
    pub delay: Option<u32>,
    pub quoted: Option<QuotedMessage>,
    pub link_preview: Option<bool>,
    pub mentions_every_one: Option<bool>,
    pub mentioned: Option<Vec<String>>,
}

impl TextMessage {
    pub fn new(number: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            text: text.into(),
            ..Default::default()
        }
    }
}

/// Image, video or document message.
///
/// `media` is a URL or base64 string. Leave it unset when the file is
/// uploaded as an attachment.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaMessage {
    pub number: String,
    pub mediatype: MediaType,
    pub mimetype: Option<String>,
    pub caption: Option<String>,
    pub media: Option<String>,
    pub file_name: Option<String>,
    pub delay: Option<u32>,
    pub quoted: Option<QuotedMessage>,
    pub mentions_every_one: Option<bool>,
    pub mentioned: Option<Vec<String>>,
}

impl MediaMessage {
    /// Media referenced by URL or base64.
    pub fn new(number: impl Into<String>, mediatype: MediaType, media: impl Into<String>) -> Self {
        Self {
            media: Some(media.into()),
            ..Self::for_upload(number, mediatype)
        }
    }

    /// Media whose bytes are sent as a multipart attachment.
    pub fn for_upload(number: impl Into<String>, mediatype: MediaType) -> Self {
        Self {
            number: number.into(),
            mediatype,
            mimetype: None,
            caption: None,
            media: None,
            file_name: None,
            delay: None,
            quoted: None,
            mentions_every_one: None,
            mentioned: None,
        }
    }
}

/// Round "push to talk" video note.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PtvMessage {
    pub number: String,
    /// Video URL or base64; unset when uploading an attachment.
    pub video: Option<String>,
    pub delay: Option<u32>,
    pub quoted: Option<QuotedMessage>,
    pub mentions_every_one: Option<bool>,
    pub mentioned: Option<Vec<String>>,
}

impl PtvMessage {
    pub fn new(number: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            ..Default::default()
        }
    }
}

/// Voice note.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioMessage {
    pub number: String,
    /// Audio URL or base64; unset when uploading an attachment.
    pub audio: Option<String>,
    /// Let the server re-encode the audio as a voice note.
    pub encoding: Option<bool>,
    pub delay: Option<u32>,
    pub quoted: Option<QuotedMessage>,
    pub mentions_every_one: Option<bool>,
    pub mentioned: Option<Vec<String>>,
}

impl AudioMessage {
    pub fn new(number: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            ..Default::default()
        }
    }
}

/// Sticker message.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StickerMessage {
    pub number: String,
    /// Sticker image URL or base64.
    pub sticker: String,
    pub delay: Option<u32>,
    pub quoted: Option<QuotedMessage>,
    pub mentions_every_one: Option<bool>,
    pub mentioned: Option<Vec<String>>,
}

impl StickerMessage {
    pub fn new(number: impl Into<String>, sticker: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            sticker: sticker.into(),
            ..Default::default()
        }
    }
}

/// Status (story) update.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusMessage {
    #[serde(rename = "type")]
    pub status_type: StatusType,
    /// Text for text statuses, media URL otherwise.
    pub content: String,
    pub caption: Option<String>,
    /// Hex color, e.g. `#008000`.
    pub background_color: Option<String>,
    pub font: Option<FontType>,
    /// Publish to every contact instead of `status_jid_list`.
    pub all_contacts: bool,
    pub status_jid_list: Option<Vec<String>>,
}

impl StatusMessage {
    pub fn new(status_type: StatusType, content: impl Into<String>) -> Self {
        Self {
            status_type,
            content: content.into(),
            caption: None,
            background_color: None,
            font: None,
            all_contacts: false,
            status_jid_list: None,
        }
    }
}

/// Location pin.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationMessage {
    pub number: String,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub delay: Option<u32>,
    pub quoted: Option<QuotedMessage>,
}

impl LocationMessage {
    pub fn new(
        number: impl Into<String>,
        name: impl Into<String>,
        address: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            number: number.into(),
            name: name.into(),
            address: address.into(),
            latitude,
            longitude,
            delay: None,
            quoted: None,
        }
    }
}

/// A vCard entry in a [`ContactMessage`].
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub full_name: String,
    /// WhatsApp user id (digits only).
    pub wuid: String,
    pub phone_number: String,
    pub organization: Option<String>,
    pub email: Option<String>,
    pub url: Option<String>,
}

impl Contact {
    pub fn new(
        full_name: impl Into<String>,
        wuid: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            wuid: wuid.into(),
            phone_number: phone_number.into(),
            ..Default::default()
        }
    }
}

/// One or more contact cards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactMessage {
    pub number: String,
    pub contact: Vec<Contact>,
}

impl ContactMessage {
    pub fn new(number: impl Into<String>, contact: Vec<Contact>) -> Self {
        Self {
            number: number.into(),
            contact,
        }
    }
}

/// Emoji reaction to an existing message. An empty reaction removes it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReactionMessage {
    pub key: MessageKey,
    pub reaction: String,
}

impl ReactionMessage {
    pub fn new(key: MessageKey, reaction: impl Into<String>) -> Self {
        Self {
            key,
            reaction: reaction.into(),
        }
    }
}

/// Poll with selectable options.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PollMessage {
    pub number: String,
    pub name: String,
    /// How many options a voter may pick.
    pub selectable_count: u32,
    pub values: Vec<String>,
    pub delay: Option<u32>,
    pub quoted: Option<QuotedMessage>,
}

impl PollMessage {
    pub fn new(
        number: impl Into<String>,
        name: impl Into<String>,
        selectable_count: u32,
        values: Vec<String>,
    ) -> Self {
        Self {
            number: number.into(),
            name: name.into(),
            selectable_count,
            values,
            delay: None,
            quoted: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRow {
    pub title: String,
    pub description: String,
    pub row_id: String,
}

impl ListRow {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        row_id: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            row_id: row_id.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListSection {
    pub title: String,
    pub rows: Vec<ListRow>,
}

impl ListSection {
    pub fn new(title: impl Into<String>, rows: Vec<ListRow>) -> Self {
        Self {
            title: title.into(),
            rows,
        }
    }
}

/// Interactive list message.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMessage {
    pub number: String,
    pub title: String,
    pub description: String,
    pub button_text: String,
    pub footer_text: String,
    pub sections: Vec<ListSection>,
    pub delay: Option<u32>,
    pub quoted: Option<QuotedMessage>,
}

/// Button behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonType {
    Reply,
    Copy,
    Url,
    Call,
    Pix,
}

/// A button in a [`ButtonMessage`]. Which optional fields apply depends on
/// [`ButtonType`].
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Button {
    #[serde(rename = "type")]
    pub button_type: ButtonType,
    pub display_text: String,
    pub id: Option<String>,
    pub copy_code: Option<String>,
    pub url: Option<String>,
    pub phone_number: Option<String>,
    pub currency: Option<String>,
    pub name: Option<String>,
    pub key_type: Option<String>,
    pub key: Option<String>,
}

impl Button {
    pub fn new(button_type: ButtonType, display_text: impl Into<String>) -> Self {
        Self {
            button_type,
            display_text: display_text.into(),
            id: None,
            copy_code: None,
            url: None,
            phone_number: None,
            currency: None,
            name: None,
            key_type: None,
            key: None,
        }
    }

    /// Quick-reply button.
    pub fn reply(display_text: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::new(ButtonType::Reply, display_text)
        }
    }

    /// Button opening a URL.
    pub fn url(display_text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::new(ButtonType::Url, display_text)
        }
    }

    /// Button dialing a phone number.
    pub fn call(display_text: impl Into<String>, phone_number: impl Into<String>) -> Self {
        Self {
            phone_number: Some(phone_number.into()),
            ..Self::new(ButtonType::Call, display_text)
        }
    }

    /// Button copying a code to the clipboard.
    pub fn copy(display_text: impl Into<String>, copy_code: impl Into<String>) -> Self {
        Self {
            copy_code: Some(copy_code.into()),
            ..Self::new(ButtonType::Copy, display_text)
        }
    }
}

/// Interactive buttons message.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonMessage {
    pub number: String,
    pub title: String,
    pub description: String,
    pub footer: String,
    pub buttons: Vec<Button>,
    pub delay: Option<u32>,
    pub quoted: Option<QuotedMessage>,
}

/// Response returned by the send endpoints.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SentMessage {
    pub key: Option<MessageKey>,
    pub push_name: Option<String>,
    /// Delivery status, e.g. `PENDING`.
    pub status: Option<String>,
    pub message: Option<Value>,
    pub message_type: Option<String>,
    /// Unix timestamp; the server sends it as a number or a string.
    pub message_timestamp: Option<Value>,
    pub instance_id: Option<String>,
    pub source: Option<String>,
}

impl SentMessage {
    /// ID of the sent message, if the server returned one.
    pub fn id(&self) -> Option<&str> {
        self.key.as_ref().map(|k| k.id.as_str())
    }
}
