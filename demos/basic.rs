//! Basic example demonstrating the Evolution API client.
//!
//! Run with:
//! ```
//! EVOLUTION_BASE_URL=http://localhost:8080 EVOLUTION_API_TOKEN=your-key \
//!     cargo run --example basic
//! ```

use evoapi::{EvolutionClient, InstanceConfig, TextMessage};

#[tokio::main]
async fn main() -> evoapi::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    // Create client from environment variables
    println!("Creating Evolution client...");
    let client = EvolutionClient::from_env()?;
    println!("Connected to: {}", client.base_url());

    // List instances
    println!("\n--- Listing Instances ---");
    let instances = client.instances().fetch_all().await?;
    println!("Found {} instances", instances.len());

    for instance in &instances {
        let status = instance
            .connection_status
            .map(|s| s.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        println!("  - {} ({}) [{}]", instance.name, instance.id, status);
    }

    // Create an instance and fetch its QR code
    println!("\n--- Creating Instance ---");
    let config = InstanceConfig {
        qrcode: true,
        ..InstanceConfig::new("Test1")
    };
    match client.instances().create(&config).await {
        Ok(created) => {
            println!("Created {} with ID {}", created.name, created.id);

            let qr = client.instances().qr_code(&created.name).await?;
            println!("QR code count: {:?}", qr.count);
            if let Some(code) = qr.pairing_code {
                println!("Pairing code: {}", code);
            }
        }
        Err(e) if e.status_code() == Some(409) => {
            println!("Instance Test1 already exists");
        }
        Err(e) => return Err(e),
    }

    // Send a message through the first connected instance
    if let Some(open) = instances.iter().find(|i| i.is_open()) {
        println!("\n--- Sending Message ---");
        let sent = client
            .messages()
            .send_text(&open.name, &TextMessage::new("5511999999999", "Hello from Rust!"))
            .await?;
        println!("Sent message {:?} via {}", sent.id(), open.name);
    }

    println!("\nDone!");
    Ok(())
}
