//! Evolution API client library.
//!
//! A Rust library for the Evolution API messaging REST API: instance
//! lifecycle management and message dispatch over a single pooled HTTP
//! client.
//!
//! # Quick Start
//!
//! ```no_run
//! use evoapi::{EvolutionClient, InstanceConfig, TextMessage};
//!
//! #[tokio::main]
//! async fn main() -> evoapi::Result<()> {
//!     // Create client from environment variables
//!     let client = EvolutionClient::from_env()?;
//!
//!     // Create an instance and fetch its QR code
//!     let config = InstanceConfig { qrcode: true, ..InstanceConfig::new("Sales") };
//!     let instance = client.instances().create(&config).await?;
//!     println!("Instance {} is {:?}", instance.name, instance.connection_status);
//!
//!     // List all instances
//!     let instances = client.instances().fetch_all().await?;
//!     println!("Found {} instances", instances.len());
//!
//!     // Send a text message
//!     let sent = client
//!         .messages()
//!         .send_text("Sales", &TextMessage::new("5511999999999", "Hello!"))
//!         .await?;
//!     println!("Sent {:?}", sent.id());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! [`EvolutionClient`] owns the configuration and the transport. Every call
//! goes through one pipeline that attaches the `apikey` header, encodes the
//! body as JSON (camelCase keys, nulls omitted) or multipart when files are
//! attached, maps non-success statuses to [`EvolutionError`] variants and
//! decodes the body.
//!
//! - [`Instances`] - create, list, delete, logout, restart, state, QR code
//! - [`Messages`] - text, media, PTV, audio, status, sticker, location,
//!   contact, reaction, poll, list and buttons
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `EVOLUTION_BASE_URL` (required) - Root URL of the Evolution API server
//! - `EVOLUTION_API_TOKEN` (required) - Global API key

mod attachment;
mod client;
mod error;
mod models;
mod services;

pub mod cli;
pub mod output;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use attachment::{guess_content_type, Attachment, DEFAULT_FIELD};
pub use client::{EvolutionClient, API_TOKEN_ENV, BASE_URL_ENV};
pub use error::{EvolutionError, Result};
pub use services::{Instances, Messages};

// Re-export output formatting
pub use output::PrettyPrint;

// Re-export models
pub use models::{
    // Instance types
    ChatwootConfig,
    ConnectionStatus,
    EventsConfig,
    Instance,
    InstanceConfig,
    Integration,
    QrCode,
    WebhookConfig,
    // Message types
    AudioMessage,
    Button,
    ButtonMessage,
    ButtonType,
    Contact,
    ContactMessage,
    FontType,
    ListMessage,
    ListRow,
    ListSection,
    LocationMessage,
    MediaMessage,
    MediaType,
    MessageKey,
    PollMessage,
    PtvMessage,
    QuotedMessage,
    ReactionMessage,
    SentMessage,
    StatusMessage,
    StatusType,
    StickerMessage,
    TextMessage,
};
