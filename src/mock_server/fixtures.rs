//! Test data fixtures for the mock server.

use crate::{ConnectionStatus, Instance};

/// Collection of fixture factories for test data.
pub struct Fixtures;

impl Fixtures {
    /// Create an instance with only a name and a status.
    pub fn minimal_instance(name: &str, status: ConnectionStatus) -> Instance {
        Instance {
            name: name.to_string(),
            connection_status: Some(status),
            integration: Some("WHATSAPP-BAILEYS".to_string()),
            read_messages: true,
            ..Default::default()
        }
    }

    /// Create a paired instance with an owner and a profile.
    pub fn connected_instance(name: &str, number: &str) -> Instance {
        Instance {
            owner_jid: Some(format!("{number}@s.whatsapp.net")),
            profile_name: Some(name.to_string()),
            number: Some(number.to_string()),
            ..Self::minimal_instance(name, ConnectionStatus::Open)
        }
    }

    /// Create a disconnected instance that authenticates with its own token.
    pub fn tokened_instance(name: &str, token: &str) -> Instance {
        Instance {
            token: Some(token.to_string()),
            ..Self::minimal_instance(name, ConnectionStatus::Close)
        }
    }

    /// Create a default set of test data for common scenarios.
    pub fn default_scenario() -> DefaultScenario {
        DefaultScenario::new()
    }
}

/// Instances the mock server starts with by default.
pub struct DefaultScenario {
    pub instances: Vec<Instance>,
}

impl DefaultScenario {
    fn new() -> Self {
        Self {
            instances: vec![
                Fixtures::connected_instance("Sales", "5511999999999"),
                Fixtures::tokened_instance("Support", "support-token"),
            ],
        }
    }
}
