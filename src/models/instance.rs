//! Instance records and instance creation settings.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// Connection state of an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    /// Session is connected.
    Open,
    /// Session is closed.
    #[serde(alias = "closed")]
    Close,
    /// Waiting for pairing or reconnecting.
    Connecting,
}

impl ConnectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Close => "close",
            Self::Connecting => "connecting",
        }
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Messaging backend an instance connects through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Integration {
    /// Unofficial multi-device web protocol.
    #[default]
    #[serde(rename = "WHATSAPP-BAILEYS")]
    WhatsappBaileys,
    /// Official Cloud API.
    #[serde(rename = "WHATSAPP-BUSINESS")]
    WhatsappBusiness,
    /// Evolution's own channel.
    #[serde(rename = "EVOLUTION")]
    Evolution,
}

impl Integration {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WhatsappBaileys => "WHATSAPP-BAILEYS",
            Self::WhatsappBusiness => "WHATSAPP-BUSINESS",
            Self::Evolution => "EVOLUTION",
        }
    }
}

impl fmt::Display for Integration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Integration {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "WHATSAPP-BAILEYS" | "BAILEYS" => Ok(Self::WhatsappBaileys),
            "WHATSAPP-BUSINESS" | "BUSINESS" => Ok(Self::WhatsappBusiness),
            "EVOLUTION" => Ok(Self::Evolution),
            other => Err(format!(
                "unknown integration '{other}': expected WHATSAPP-BAILEYS, WHATSAPP-BUSINESS or EVOLUTION"
            )),
        }
    }
}

/// Webhook delivery settings.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WebhookConfig {
    /// Target URL receiving event posts.
    pub url: Option<String>,
    /// Post each event to `{url}/{event-name}`.
    pub by_events: bool,
    /// Inline media as base64 in event payloads.
    pub base64: bool,
    /// Extra headers sent with every delivery.
    pub headers: Option<HashMap<String, String>>,
    /// Event names to deliver.
    pub events: Option<Vec<String>>,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            url: None,
            by_events: false,
            base64: true,
            headers: None,
            events: None,
        }
    }
}

impl WebhookConfig {
    /// Create a webhook pointing at `url` with default settings.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }
}

/// Event channel settings (websocket / queue integrations).
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventsConfig {
    pub enabled: bool,
    pub events: Option<Vec<String>>,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            events: None,
        }
    }
}

/// Chatwoot inbox integration settings.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChatwootConfig {
    pub chatwoot_account_id: Option<String>,
    pub chatwoot_token: Option<String>,
    pub chatwoot_url: Option<String>,
    pub chatwoot_sign_msg: bool,
    pub chatwoot_reopen_conversation: bool,
    pub chatwoot_conversation_pending: bool,
    pub chatwoot_import_contacts: bool,
    pub chatwoot_name_inbox: String,
    pub chatwoot_merge_brazil_contacts: bool,
    pub chatwoot_import_messages: bool,
    pub chatwoot_days_limit_import_messages: u32,
    pub chatwoot_organization: String,
    pub chatwoot_logo: String,
}

impl Default for ChatwootConfig {
    fn default() -> Self {
        Self {
            chatwoot_account_id: None,
            chatwoot_token: None,
            chatwoot_url: None,
            chatwoot_sign_msg: true,
            chatwoot_reopen_conversation: true,
            chatwoot_conversation_pending: false,
            chatwoot_import_contacts: true,
            chatwoot_name_inbox: "evolution".to_string(),
            chatwoot_merge_brazil_contacts: true,
            chatwoot_import_messages: true,
            chatwoot_days_limit_import_messages: 3,
            chatwoot_organization: "Evolution Bot".to_string(),
            chatwoot_logo: "https://evolution-api.com/files/evolution-api-favicon.png".to_string(),
        }
    }
}

impl ChatwootConfig {
    /// Create settings for a Chatwoot account with default behaviour flags.
    pub fn new(
        account_id: impl Into<String>,
        token: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            chatwoot_account_id: Some(account_id.into()),
            chatwoot_token: Some(token.into()),
            chatwoot_url: Some(url.into()),
            ..Default::default()
        }
    }
}

/// An Evolution API instance.
///
/// Instances are named sessions on the messaging platform. Decoding accepts
/// flat records where the identifier is `id` or `instanceId`, the name is
/// `name` or `instanceName` and the state is `connectionStatus`, `status` or
/// `state`. When several spellings are present the first one in that order
/// wins. Every field is optional on the wire and falls back to its default.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawInstance")]
pub struct Instance {
    /// Server-assigned identifier.
    pub id: String,

    /// Instance name, unique per server.
    pub name: String,

    /// Current connection state. Unrecognised values decode as `None`.
    pub connection_status: Option<ConnectionStatus>,

    /// JID of the paired account.
    pub owner_jid: Option<String>,
    pub profile_name: Option<String>,
    pub profile_pic_url: Option<String>,
    pub integration: Option<String>,
    pub number: Option<String>,
    pub business_id: Option<String>,

    /// Instance-specific API token.
    pub token: Option<String>,
    pub client_name: Option<String>,

    pub disconnection_reason_code: Option<i32>,
    pub disconnection_object: Option<serde_json::Value>,
    pub disconnection_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,

    pub qrcode: bool,
    pub reject_call: bool,
    pub msg_call: Option<String>,
    pub groups_ignore: bool,
    pub always_online: bool,
    pub read_messages: bool,
    pub read_status: bool,
    pub sync_full_history: bool,

    pub webhook: Option<WebhookConfig>,
    pub events: Option<EventsConfig>,
    pub chatwoot: Option<ChatwootConfig>,
}

/// Wire form of [`Instance`] with every accepted spelling as its own field.
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct RawInstance {
    id: Option<String>,
    instance_id: Option<String>,
    name: Option<String>,
    instance_name: Option<String>,
    connection_status: Option<serde_json::Value>,
    status: Option<serde_json::Value>,
    state: Option<serde_json::Value>,
    owner_jid: Option<String>,
    profile_name: Option<String>,
    profile_pic_url: Option<String>,
    integration: Option<String>,
    number: Option<String>,
    business_id: Option<String>,
    token: Option<String>,
    client_name: Option<String>,
    disconnection_reason_code: Option<i32>,
    disconnection_object: Option<serde_json::Value>,
    disconnection_at: Option<DateTime<Utc>>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    qrcode: bool,
    reject_call: bool,
    msg_call: Option<String>,
    groups_ignore: bool,
    always_online: bool,
    read_messages: bool,
    read_status: bool,
    sync_full_history: bool,
    webhook: Option<WebhookConfig>,
    events: Option<EventsConfig>,
    chatwoot: Option<ChatwootConfig>,
}

impl From<RawInstance> for Instance {
    fn from(raw: RawInstance) -> Self {
        // Delete and logout reply with `"status": "SUCCESS"`, which is not a connection state
        let connection_status = [raw.connection_status, raw.status, raw.state]
            .into_iter()
            .flatten()
            .find_map(|v| ConnectionStatus::deserialize(v).ok());

        Self {
            id: raw.id.or(raw.instance_id).unwrap_or_default(),
            name: raw.name.or(raw.instance_name).unwrap_or_default(),
            connection_status,
            owner_jid: raw.owner_jid,
            profile_name: raw.profile_name,
            profile_pic_url: raw.profile_pic_url,
            integration: raw.integration,
            number: raw.number,
            business_id: raw.business_id,
            token: raw.token,
            client_name: raw.client_name,
            disconnection_reason_code: raw.disconnection_reason_code,
            disconnection_object: raw.disconnection_object,
            disconnection_at: raw.disconnection_at,
            created_at: raw.created_at,
            updated_at: raw.updated_at,
            qrcode: raw.qrcode,
            reject_call: raw.reject_call,
            msg_call: raw.msg_call,
            groups_ignore: raw.groups_ignore,
            always_online: raw.always_online,
            read_messages: raw.read_messages,
            read_status: raw.read_status,
            sync_full_history: raw.sync_full_history,
            webhook: raw.webhook,
            events: raw.events,
            chatwoot: raw.chatwoot,
        }
    }
}

impl Instance {
    /// Check if the session is connected.
    pub fn is_open(&self) -> bool {
        self.connection_status == Some(ConnectionStatus::Open)
    }
}

/// Settings for creating an instance.
///
/// ```
/// use evoapi::InstanceConfig;
///
/// let config = InstanceConfig {
///     qrcode: true,
///     ..InstanceConfig::new("Test1")
/// };
/// assert!(config.read_messages);
/// ```
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceConfig {
    /// Desired instance name (required).
    pub instance_name: String,
    /// Instance-specific token; generated server-side when absent.
    pub token: Option<String>,
    /// Phone number to pair with a pairing code instead of a QR code.
    pub number: Option<String>,
    /// Generate a QR code on creation.
    pub qrcode: bool,
    pub integration: Integration,
    /// Reject incoming calls. The API spells this key in snake case.
    #[serde(rename = "reject_call")]
    pub reject_call: bool,
    /// Reply sent when a call is rejected.
    pub msg_call: Option<String>,
    pub groups_ignore: bool,
    pub always_online: bool,
    pub read_messages: bool,
    pub read_status: bool,
    pub sync_full_history: bool,
    pub webhook: Option<WebhookConfig>,
    /// Chatwoot settings, sent as top-level `chatwoot*` keys.
    #[serde(flatten)]
    pub chatwoot: Option<ChatwootConfig>,
}

impl Default for InstanceConfig {
    fn default() -> Self {
        Self {
            instance_name: String::new(),
            token: None,
            number: None,
            qrcode: false,
            integration: Integration::default(),
            reject_call: false,
            msg_call: None,
            groups_ignore: false,
            always_online: false,
            read_messages: true,
            read_status: false,
            sync_full_history: false,
            webhook: None,
            chatwoot: None,
        }
    }
}

impl InstanceConfig {
    /// Create settings for `instance_name` with default flags.
    pub fn new(instance_name: impl Into<String>) -> Self {
        Self {
            instance_name: instance_name.into(),
            ..Default::default()
        }
    }
}

/// Pairing data returned by the connect endpoint.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QrCode {
    /// Code to type on the phone when pairing by number.
    pub pairing_code: Option<String>,
    /// Raw QR payload.
    pub code: Option<String>,
    /// QR image as a `data:image/png;base64,...` URL.
    pub base64: Option<String>,
    /// Number of QR codes generated so far.
    pub count: Option<u32>,
}
