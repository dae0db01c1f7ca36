//! Resource services.
//!
//! Each service is a borrowed handle over an [`EvolutionClient`](crate::EvolutionClient)
//! mapping typed inputs onto one request against a fixed endpoint.

mod instance;
mod message;

pub use instance::Instances;
pub use message::Messages;

use crate::error::{EvolutionError, Result};

/// Build `{prefix}/{instance}`, rejecting blank instance names.
///
/// `.` and `..` are rejected too: URL resolution would collapse them and
/// the request would land on a different endpoint.
pub(crate) fn instance_path(prefix: &str, instance: &str) -> Result<String> {
    if instance.trim().is_empty() {
        return Err(EvolutionError::blank_argument("instance_name"));
    }
    if matches!(instance, "." | "..") {
        return Err(EvolutionError::InvalidArgument {
            name: "instance_name",
            reason: format!("'{instance}' is not a valid instance name"),
        });
    }
    Ok(format!("{prefix}/{}", urlencoding::encode(instance)))
}
