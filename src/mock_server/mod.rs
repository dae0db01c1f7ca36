//! Mock Evolution API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the Evolution
//! API for integration and end-to-end testing. Unlike wiremock which mocks at
//! the HTTP level per-test, this server keeps instances and sent messages
//! across requests, so whole workflows can be exercised.
//!
//! # Example
//!
//! ```ignore
//! use evoapi::mock_server::MockServer;
//! use evoapi::{EvolutionClient, TextMessage};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = EvolutionClient::new(server.url(), "test-key").unwrap();
//!
//!     // Server comes with default fixtures
//!     let state = client.instances().connection_state("Sales").await.unwrap();
//!     assert!(state.is_open());
//!
//!     client
//!         .messages()
//!         .send_text("Sales", &TextMessage::new("5511888888888", "hi"))
//!         .await
//!         .unwrap();
//!     assert_eq!(server.state().read().await.messages_for("Sales").len(), 1);
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{DefaultScenario, Fixtures};
pub use server::MockServer;
pub use state::{MockState, RecordedMessage};
