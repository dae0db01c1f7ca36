//! Evolution API CLI binary.
//!
//! A command-line interface for managing instances and sending messages.

use clap::Parser;
use evoapi::cli::{Cli, Command};
use evoapi::{
    Attachment, EvolutionClient, Instance, InstanceConfig, MediaMessage, PrettyPrint, TextMessage,
};
use serde::Serialize;
use std::process::ExitCode;
use tabled::{Table, Tabled};
use tracing::Level;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    let client = match EvolutionClient::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Set EVOLUTION_BASE_URL and EVOLUTION_API_TOKEN environment variables");
            return ExitCode::FAILURE;
        }
    };

    match run(&client, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(client: &EvolutionClient, cli: Cli) -> evoapi::Result<()> {
    let mut instances = client.instances();
    let mut messages = client.messages();
    if let Some(token) = cli.token.as_deref() {
        instances = instances.with_token(token);
        messages = messages.with_token(token);
    }

    match cli.command {
        Command::List => {
            let all = instances.fetch_all().await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&all)?);
            } else if all.is_empty() {
                println!("No instances found");
            } else {
                let rows: Vec<InstanceRow> = all.iter().map(InstanceRow::from).collect();
                println!("{}", Table::new(rows));
                println!("\n{} instance(s)", all.len());
            }
        }
        Command::Create {
            name,
            qrcode,
            instance_token,
            number,
            integration,
            reject_call,
            msg_call,
            groups_ignore,
            always_online,
            read_status,
            sync_full_history,
        } => {
            let config = InstanceConfig {
                token: instance_token,
                number,
                qrcode,
                integration,
                reject_call,
                msg_call,
                groups_ignore,
                always_online,
                read_status,
                sync_full_history,
                ..InstanceConfig::new(name)
            };
            let created = instances.create(&config).await?;
            output_single(&created, cli.json)?;
        }
        Command::Delete { name } => {
            let deleted = instances.delete(&name).await?;
            output_single(&deleted, cli.json)?;
        }
        Command::Logout { name } => {
            let instance = instances.logout(&name).await?;
            output_single(&instance, cli.json)?;
        }
        Command::Restart { name } => {
            let instance = instances.restart(&name).await?;
            output_single(&instance, cli.json)?;
        }
        Command::State { name } => {
            let instance = instances.connection_state(&name).await?;
            output_single(&instance, cli.json)?;
        }
        Command::Qrcode { name } => {
            let qr = instances.qr_code(&name).await?;
            output_single(&qr, cli.json)?;
        }
        Command::SendText {
            instance,
            number,
            text,
            delay,
        } => {
            let message = TextMessage {
                delay,
                ..TextMessage::new(number, text)
            };
            let sent = messages.send_text(&instance, &message).await?;
            output_single(&sent, cli.json)?;
        }
        Command::SendMedia {
            instance,
            number,
            path,
            mediatype,
            caption,
            mimetype,
        } => {
            let mut file = Attachment::from_path(&path).await?;
            if let Some(ref mime) = mimetype {
                file.content_type = Some(mime.clone());
            }
            let message = MediaMessage {
                caption,
                mimetype: file.content_type.clone(),
                file_name: Some(file.file_name.clone()),
                ..MediaMessage::for_upload(number, mediatype.into())
            };
            let sent = messages.send_media_file(&instance, &message, file).await?;
            output_single(&sent, cli.json)?;
        }
    }
    Ok(())
}

fn output_single<T: Serialize + PrettyPrint>(item: &T, json: bool) -> evoapi::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(item)?);
    } else {
        println!("{}", item.pretty_print());
    }
    Ok(())
}

// Table row types for non-JSON output

#[derive(Tabled)]
struct InstanceRow {
    name: String,
    status: String,
    number: String,
    owner: String,
}

impl From<&Instance> for InstanceRow {
    fn from(i: &Instance) -> Self {
        Self {
            name: i.name.clone(),
            status: i
                .connection_status
                .map(|s| s.to_string())
                .unwrap_or_default(),
            number: i.number.clone().unwrap_or_default(),
            owner: i.owner_jid.clone().unwrap_or_default(),
        }
    }
}
