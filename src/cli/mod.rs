//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the evoapi binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::{Integration, MediaType};

/// Evolution API command-line interface.
#[derive(Parser, Debug)]
#[command(name = "evoapi", about = "Evolution API CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Log requests and responses to stderr.
    #[arg(short, long, global = true, default_value = "false")]
    pub verbose: bool,

    /// Instance token to authenticate with instead of the global API key.
    #[arg(long, global = true, env = "EVOLUTION_INSTANCE_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List all instances.
    #[command(alias = "ls")]
    List,

    /// Create an instance.
    Create {
        /// Name of the new instance.
        name: String,

        /// Generate a QR code on creation.
        #[arg(long)]
        qrcode: bool,

        /// Instance-specific token (generated by the server when omitted).
        #[arg(long = "instance-token")]
        instance_token: Option<String>,

        /// Phone number to pair by code instead of QR.
        #[arg(long)]
        number: Option<String>,

        /// Messaging backend.
        #[arg(long, default_value_t = Integration::WhatsappBaileys)]
        integration: Integration,

        /// Reject incoming calls.
        #[arg(long)]
        reject_call: bool,

        /// Message sent when rejecting a call.
        #[arg(long)]
        msg_call: Option<String>,

        /// Ignore group messages.
        #[arg(long)]
        groups_ignore: bool,

        /// Keep presence online.
        #[arg(long)]
        always_online: bool,

        /// Mark status updates as read.
        #[arg(long)]
        read_status: bool,

        /// Sync the full message history on pairing.
        #[arg(long)]
        sync_full_history: bool,
    },

    /// Delete an instance.
    Delete {
        /// Instance name.
        name: String,
    },

    /// Log an instance out of its session.
    Logout {
        /// Instance name.
        name: String,
    },

    /// Restart an instance.
    Restart {
        /// Instance name.
        name: String,
    },

    /// Show the connection state of an instance.
    State {
        /// Instance name.
        name: String,
    },

    /// Fetch the QR code for connecting an instance.
    Qrcode {
        /// Instance name.
        name: String,
    },

    /// Send a text message.
    SendText {
        /// Sending instance.
        instance: String,

        /// Recipient number or JID.
        number: String,

        /// Message text.
        text: String,

        /// Presence delay in milliseconds.
        #[arg(long)]
        delay: Option<u32>,
    },

    /// Upload and send an image, video or document.
    SendMedia {
        /// Sending instance.
        instance: String,

        /// Recipient number or JID.
        number: String,

        /// File to upload.
        path: PathBuf,

        /// Kind of media.
        #[arg(long, value_enum, default_value_t = MediaKind::Image)]
        mediatype: MediaKind,

        /// Caption shown with the media.
        #[arg(long)]
        caption: Option<String>,

        /// MIME type (guessed from the extension when omitted).
        #[arg(long)]
        mimetype: Option<String>,
    },
}

/// Media kinds accepted by `send-media`.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
    Document,
}

impl From<MediaKind> for MediaType {
    fn from(kind: MediaKind) -> Self {
        match kind {
            MediaKind::Image => MediaType::Image,
            MediaKind::Video => MediaType::Video,
            MediaKind::Document => MediaType::Document,
        }
    }
}
