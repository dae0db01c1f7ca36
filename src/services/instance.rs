//! Instance lifecycle endpoints.

use crate::client::EvolutionClient;
use crate::error::{EvolutionError, Result};
use crate::models::{Instance, InstanceConfig, QrCode};

use super::instance_path;

/// Instance operations, obtained from [`EvolutionClient::instances`].
///
/// # Example
///
/// ```no_run
/// use evoapi::{EvolutionClient, InstanceConfig};
///
/// # async fn example() -> evoapi::Result<()> {
/// let client = EvolutionClient::from_env()?;
///
/// let created = client
///     .instances()
///     .create(&InstanceConfig { qrcode: true, ..InstanceConfig::new("Sales") })
///     .await?;
/// println!("{} is {:?}", created.name, created.connection_status);
///
/// let qr = client.instances().qr_code("Sales").await?;
/// println!("{:?}", qr.base64);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Copy)]
pub struct Instances<'a> {
    client: &'a EvolutionClient,
    token: Option<&'a str>,
}

impl<'a> Instances<'a> {
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

    /// List every instance on the server.
    pub async fn fetch_all(&self) -> Result<Vec<Instance>> {
        self.client
            .get("instance/fetchInstances", self.token)
            .await
    }

    /// Create an instance.
    ///
    /// # Errors
    ///
    /// Returns [`EvolutionError::InvalidArgument`] if the instance name is
    /// blank, or a classified API error (409 when the name is taken).
    pub async fn create(&self, config: &InstanceConfig) -> Result<Instance> {
        if config.instance_name.trim().is_empty() {
            return Err(EvolutionError::blank_argument("instance_name"));
        }

        tracing::debug!(instance = %config.instance_name, "creating instance");
        self.client
            .post("instance/create", Some(config), self.token)
            .await
    }

    /// Delete an instance.
    pub async fn delete(&self, instance_name: &str) -> Result<Instance> {
        let endpoint = instance_path("instance/delete", instance_name)?;
        self.client.delete(&endpoint, self.token).await
    }

    /// Log an instance out of its session.
    pub async fn logout(&self, instance_name: &str) -> Result<Instance> {
        let endpoint = instance_path("instance/logout", instance_name)?;
        self.client.delete(&endpoint, self.token).await
    }

    /// Restart an instance. Sent without a body.
    pub async fn restart(&self, instance_name: &str) -> Result<Instance> {
        let endpoint = instance_path("instance/restart", instance_name)?;
        self.client
            .put::<(), _>(&endpoint, None, self.token)
            .await
    }

    /// Fetch the connection state of an instance.
    pub async fn connection_state(&self, instance_name: &str) -> Result<Instance> {
        let endpoint = instance_path("instance/connectionState", instance_name)?;
        self.client.get(&endpoint, self.token).await
    }

    /// Fetch a QR code (or pairing code) to connect an instance.
    pub async fn qr_code(&self, instance_name: &str) -> Result<QrCode> {
        let endpoint = instance_path("instance/connect", instance_name)?;
        self.client.get(&endpoint, self.token).await
    }
}
