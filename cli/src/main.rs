mod history;

use clap::{Args, Parser, Subcommand};
use reqwest::{StatusCode, Url};
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;
use whiteboard::{
    ReplayConfig, SnapshotSource, compute_final_state, compute_message_snapshots, inspect,
    render_whiteboard,
};

use crate::history::{HistoryError, parse_history, read_input};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    History(#[from] HistoryError),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned HTTP {status}: {message}")]
    ServerError { status: u16, message: String },
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("invalid base url {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

#[derive(Parser, Debug)]
#[command(name = "whiteboard-cli", about = "Replay whiteboard diffs from chat history")]
struct Cli {
    /// Sender name whose messages carry whiteboard edits.
    #[arg(long, env = "WHITEBOARD_AGENT_NAME", default_value = whiteboard::DEFAULT_WHITEBOARD_AGENT)]
    agent_name: String,

    #[arg(long, env = "CHATBOARD_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct InputArgs {
    #[arg(long, default_value = "-", help = "History file (JSON array, export object, or JSONL), or - for stdin")]
    input: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the whiteboard snapshot for every whiteboard message.
    Replay {
        #[command(flatten)]
        input: InputArgs,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the current whiteboard after the whole history.
    State {
        #[command(flatten)]
        input: InputArgs,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Classify one message body and list the operations it carries.
    Parse {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Send history to a running chatboard service.
    Api(ApiCommand),
}

#[derive(Args, Debug)]
struct ApiCommand {
    #[command(subcommand)]
    command: ApiSubcommand,
}

#[derive(Subcommand, Debug)]
enum ApiSubcommand {
    Ping,
    Snapshots {
        #[arg(long)]
        room: String,
        #[command(flatten)]
        input: InputArgs,
    },
    State {
        #[arg(long)]
        room: String,
        #[command(flatten)]
        input: InputArgs,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    let config = ReplayConfig::new(cli.agent_name);

    match cli.command {
        Command::Replay { input, json } => run_replay(&config, &input, json),
        Command::State { input, json } => run_state(&config, &input, json),
        Command::Parse { input } => run_parse(&input),
        Command::Api(api) => run_api(&cli.base_url, api).await,
    }
}

fn run_replay(config: &ReplayConfig, input: &InputArgs, json: bool) -> Result<(), CliError> {
    let messages = parse_history(&read_input(&input.input)?)?;
    let snapshots = compute_message_snapshots(&messages, config);

    if json {
        return print_json(&json!({ "snapshots": snapshots.entries() }));
    }

    for (idx, entry) in snapshots.entries().iter().enumerate() {
        if idx > 0 {
            println!();
        }
        let source = match entry.source {
            SnapshotSource::Diff => "diff",
            SnapshotSource::Legacy => "legacy",
        };
        println!("#{} [{source}]", entry.message_id);
        println!("{}", entry.info.rendered_content);
    }
    eprintln!("{} messages, {} whiteboard snapshots", messages.len(), snapshots.len());
    Ok(())
}

fn run_state(config: &ReplayConfig, input: &InputArgs, json: bool) -> Result<(), CliError> {
    let messages = parse_history(&read_input(&input.input)?)?;
    let state = compute_final_state(&messages, config);

    if json {
        return print_json(&json!({ "cells": state.cells() }));
    }
    println!("{}", render_whiteboard(&state));
    Ok(())
}

fn run_parse(input: &InputArgs) -> Result<(), CliError> {
    let content = read_input(&input.input)?;
    let report = serde_json::to_value(inspect(&content))?;
    print_json(&report)
}

async fn run_api(base_url: &str, api: ApiCommand) -> Result<(), CliError> {
    match api.command {
        ApiSubcommand::Ping => {
            let url = format!("{}/healthz", base_url.trim_end_matches('/'));
            let status = reqwest::get(url).await?.status();
            if !status.is_success() {
                return Err(CliError::ServerError {
                    status: status.as_u16(),
                    message: "health check failed".to_owned(),
                });
            }
            println!("ok");
            Ok(())
        }
        ApiSubcommand::Snapshots { room, input } => {
            let url = room_url(base_url, &room, "snapshots")?;
            let json = post_history(url, &input).await?;
            print_json(&json)
        }
        ApiSubcommand::State { room, input } => {
            let url = room_url(base_url, &room, "state")?;
            let json = post_history(url, &input).await?;
            print_json(&json)
        }
    }
}

/// `{base_url}/api/rooms/{room}/whiteboard/{leaf}` with `room` encoded as a
/// single path segment.
fn room_url(base_url: &str, room: &str, leaf: &str) -> Result<Url, CliError> {
    let invalid = |reason: String| CliError::InvalidBaseUrl { url: base_url.to_owned(), reason };
    let mut url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|()| invalid("cannot be a base".to_owned()))?
        .pop_if_empty()
        .extend(["api", "rooms", room, "whiteboard", leaf]);
    Ok(url)
}

async fn post_history(url: Url, input: &InputArgs) -> Result<Value, CliError> {
    let messages = parse_history(&read_input(&input.input)?)?;

    let response = reqwest::Client::new()
        .post(url)
        .json(&json!({ "messages": messages }))
        .send()
        .await?;
    let status = response.status();
    let body = response.text().await?;
    decode_reply(status, &body)
}

/// Error replies keep the server's raw text; success replies must be JSON.
fn decode_reply(status: StatusCode, body: &str) -> Result<Value, CliError> {
    if !status.is_success() {
        let message = if body.trim().is_empty() {
            status.canonical_reason().unwrap_or("no response body").to_owned()
        } else {
            body.trim().to_owned()
        };
        return Err(CliError::ServerError { status: status.as_u16(), message });
    }
    Ok(serde_json::from_str(body)?)
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
