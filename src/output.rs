//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use crate::{Instance, QrCode, SentMessage};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Trait for human-readable key-value output.
///
/// Implemented by response types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

impl PrettyPrint for Instance {
    fn pretty_print(&self) -> String {
        let divider = "─".repeat(self.name.len().max(30));

        let mut lines = vec![
            format!("Instance: {}", self.name),
            divider,
            format!("ID:             {}", self.id),
            format!(
                "Status:         {}",
                self.connection_status
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "unknown".to_string())
            ),
        ];

        if let Some(ref integration) = self.integration {
            lines.push(format!("Integration:    {}", integration));
        }

        if let Some(ref number) = self.number {
            lines.push(format!("Number:         {}", number));
        }

        if let Some(ref owner) = self.owner_jid {
            lines.push(format!("Owner:          {}", owner));
        }

        if let Some(ref profile) = self.profile_name {
            lines.push(format!("Profile:        {}", profile));
        }

        if let Some(ref disconnected) = self.disconnection_at {
            let code = self
                .disconnection_reason_code
                .map(|c| format!(" (code {c})"))
                .unwrap_or_default();
            lines.push(format!(
                "Disconnected:   {}{}",
                disconnected.format(TIMESTAMP_FORMAT),
                code
            ));
        }

        if let Some(ref created) = self.created_at {
            lines.push(format!("Created:        {}", created.format(TIMESTAMP_FORMAT)));
        }

        if let Some(ref updated) = self.updated_at {
            lines.push(format!("Updated:        {}", updated.format(TIMESTAMP_FORMAT)));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for QrCode {
    fn pretty_print(&self) -> String {
        let mut lines = vec!["QR Code".to_string(), "─".repeat(30)];

        if let Some(ref pairing) = self.pairing_code {
            lines.push(format!("Pairing Code:   {}", pairing));
        }

        if let Some(ref code) = self.code {
            lines.push(format!("Code:           {}", code));
        }

        if let Some(count) = self.count {
            lines.push(format!("Count:          {}", count));
        }

        if self.base64.is_some() {
            lines.push("Image:          available (use --json)".to_string());
        }

        if lines.len() == 2 {
            lines.push("No QR code returned; the instance may already be connected.".to_string());
        }

        lines.join("\n")
    }
}

impl PrettyPrint for SentMessage {
    fn pretty_print(&self) -> String {
        let mut lines = vec!["Message sent".to_string(), "─".repeat(30)];

        if let Some(ref key) = self.key {
            lines.push(format!("ID:             {}", key.id));
            lines.push(format!("Chat:           {}", key.remote_jid));
        }

        if let Some(ref status) = self.status {
            lines.push(format!("Status:         {}", status));
        }

        if let Some(ref message_type) = self.message_type {
            lines.push(format!("Type:           {}", message_type));
        }

        lines.join("\n")
    }
}
