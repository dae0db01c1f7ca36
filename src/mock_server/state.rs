//! Mock server state management.
//!
//! Provides the in-memory data store for the mock Evolution API server.

use std::collections::HashMap;
use std::sync::Arc;

use axum::http::HeaderMap;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::{ConnectionStatus, Instance};

/// A message received by the mock server.
#[derive(Debug, Clone)]
pub struct RecordedMessage {
    /// Instance the message was sent through.
    pub instance: String,
    /// Endpoint kind, e.g. `sendText`.
    pub kind: String,
    /// `Content-Type` of the request.
    pub content_type: Option<String>,
    /// Parsed body for JSON requests.
    pub json: Option<Value>,
    /// Raw request body.
    pub raw: Vec<u8>,
}

impl RecordedMessage {
    /// Returns true if the message was uploaded as multipart/form-data.
    pub fn is_multipart(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.starts_with("multipart/form-data"))
    }

    /// Raw body as lossy UTF-8, for asserting on multipart contents.
    pub fn raw_text(&self) -> String {
        String::from_utf8_lossy(&self.raw).into_owned()
    }
}

/// Shared state for the mock server.
///
/// This struct holds all the mock data that the server will serve.
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug, Default)]
pub struct MockState {
    /// Instances indexed by name.
    pub instances: HashMap<String, Instance>,

    /// Messages in the order they were received.
    pub messages: Vec<RecordedMessage>,

    /// Global API key. If set, requests must send it (or the addressed
    /// instance's own token) in the `apikey` header.
    pub api_key: Option<String>,

    /// QR codes generated per instance.
    qr_counts: HashMap<String, u32>,

    next_id: u64,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Add an instance to the state, replacing any with the same name.
    pub fn with_instance(mut self, instance: Instance) -> Self {
        self.remove_instance(&instance.name);
        self.insert_instance(instance);
        self
    }

    /// Set the required global API key.
    pub fn with_api_key(mut self, api_key: &str) -> Self {
        self.api_key = Some(api_key.to_string());
        self
    }

    /// Check the `apikey` header against the global key or the instance token.
    pub fn is_authorized(&self, headers: &HeaderMap, instance: Option<&str>) -> bool {
        let Some(presented) = headers
            .get("apikey")
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
        else {
            return false;
        };

        let Some(ref api_key) = self.api_key else {
            return true;
        };

        if presented == api_key {
            return true;
        }

        instance
            .and_then(|name| self.instances.get(name))
            .and_then(|i| i.token.as_deref())
            .is_some_and(|token| token == presented)
    }

    /// Get an instance by name.
    pub fn get_instance(&self, name: &str) -> Option<&Instance> {
        self.instances.get(name)
    }

    /// List all instances sorted by name.
    pub fn list_instances(&self) -> Vec<&Instance> {
        let mut instances: Vec<&Instance> = self.instances.values().collect();
        instances.sort_by(|a, b| a.name.cmp(&b.name));
        instances
    }

    /// Insert a new instance, assigning it an ID.
    ///
    /// Returns `None` if the name is already taken.
    pub fn insert_instance(&mut self, mut instance: Instance) -> Option<&Instance> {
        if self.instances.contains_key(&instance.name) {
            return None;
        }

        self.next_id += 1;
        instance.id = format!("mock-{:04}", self.next_id);
        instance.created_at = Some(chrono::Utc::now());
        instance.updated_at = instance.created_at;

        let name = instance.name.clone();
        self.instances.insert(name.clone(), instance);
        self.instances.get(&name)
    }

    /// Remove an instance by name.
    pub fn remove_instance(&mut self, name: &str) -> Option<Instance> {
        self.qr_counts.remove(name);
        self.instances.remove(name)
    }

    /// Change the connection status of an instance.
    pub fn set_status(&mut self, name: &str, status: ConnectionStatus) -> Option<&Instance> {
        let instance = self.instances.get_mut(name)?;
        instance.connection_status = Some(status);
        instance.updated_at = Some(chrono::Utc::now());
        if status == ConnectionStatus::Close {
            instance.owner_jid = None;
        }
        Some(instance)
    }

    /// Bump and return the QR counter of an instance.
    pub fn next_qr_count(&mut self, name: &str) -> u32 {
        let count = self.qr_counts.entry(name.to_string()).or_insert(0);
        *count += 1;
        *count
    }

    /// Record a received message and return its generated ID.
    pub fn record_message(&mut self, message: RecordedMessage) -> String {
        self.messages.push(message);
        format!("MOCK{:012X}", self.messages.len())
    }

    /// Messages sent through an instance.
    pub fn messages_for(&self, instance: &str) -> Vec<&RecordedMessage> {
        self.messages
            .iter()
            .filter(|m| m.instance == instance)
            .collect()
    }
}
