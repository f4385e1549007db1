//! Manage PagerDuty's Slack connections from the command line.
//!
//! Results are printed to stdout as JSON. See [USAGE].

use dotenvy::dotenv;
use error::Failure;
use pagerduty_slack::{
    client::Client,
    config::Config,
    slack::{
        connection::{ListSlackConnectionsOptions, SlackConnection},
        id::{ConnectionId, WorkspaceId},
    },
};
use serde::Serialize;
use std::{env, io::Read, process::ExitCode};
use tracing::{error, info, warn};

mod error;

const USAGE: &str = "\
Usage:
  pagerduty-slack list   <workspace> [limit] [offset]
  pagerduty-slack all    <workspace>
  pagerduty-slack get    <workspace> <connection>
  pagerduty-slack create <workspace>    (connection JSON on stdin)
  pagerduty-slack update <workspace>    (connection JSON on stdin)
  pagerduty-slack delete <workspace> <connection>";

/// A single invocation of the binary.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    List(WorkspaceId, ListSlackConnectionsOptions),
    All(WorkspaceId),
    Get(WorkspaceId, ConnectionId),
    Create(WorkspaceId),
    Update(WorkspaceId),
    Delete(WorkspaceId, ConnectionId),
}

impl Command {
    fn parse(args: &[String]) -> Result<Self, Failure> {
        let strs: Vec<&str> = args.iter().map(String::as_str).collect();

        match strs.as_slice() {
            ["list", ws, rest @ ..] if rest.len() <= 2 => {
                let limit = rest.first().map(|x| parse_u32("limit", x)).transpose()?;
                let offset = rest.get(1).map(|x| parse_u32("offset", x)).transpose()?;

                Ok(Command::List(
                    (*ws).into(),
                    ListSlackConnectionsOptions { limit, offset },
                ))
            }
            ["all", ws] => Ok(Command::All((*ws).into())),
            ["get", ws, conn] => Ok(Command::Get((*ws).into(), (*conn).into())),
            ["create", ws] => Ok(Command::Create((*ws).into())),
            ["update", ws] => Ok(Command::Update((*ws).into())),
            ["delete", ws, conn] => Ok(Command::Delete((*ws).into(), (*conn).into())),
            [] => Err(Failure::Usage("No command given".into())),
            [cmd, ..] => Err(Failure::Usage(format!("Unrecognised arguments to `{}`", cmd))),
        }
    }
}

fn parse_u32(name: &str, x: &str) -> Result<u32, Failure> {
    x.parse()
        .map_err(|_| Failure::Usage(format!("Could not parse {} `{}` to u32", name, x)))
}

/// Application entrypoint. Initialises tracing, reads configuration from the
/// environment, and runs a single command.
#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_target(false)
        .compact()
        .with_writer(std::io::stderr)
        .init();

    let has_dotenv = dotenv().is_ok();
    if !has_dotenv {
        warn!("No .env found");
    }

    let args: Vec<String> = env::args().skip(1).collect();

    match run(&args).await {
        Ok(out) => {
            if let Some(out) = out {
                println!("{}", out);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &[String]) -> Result<Option<String>, Failure> {
    let cmd = Command::parse(args)?;
    let client = Config::from_env()?.client()?;

    info!("Using PagerDuty API at {}", client.base_url());

    execute(&client, cmd, std::io::stdin()).await
}

/// Run a command, reading any connection from `input`, and return the
/// output to print, if any.
async fn execute<R: Read>(
    client: &Client,
    cmd: Command,
    input: R,
) -> Result<Option<String>, Failure> {
    match cmd {
        Command::List(ws, opts) => to_json(&client.list_slack_connections(&ws, &opts).await?),
        Command::All(ws) => to_json(&client.list_all_slack_connections(&ws).await?),
        Command::Get(ws, conn) => to_json(&client.get_slack_connection(&ws, &conn).await?),
        Command::Create(ws) => {
            let conn = read_connection(input)?;
            to_json(&client.create_slack_connection(&ws, &conn).await?)
        }
        Command::Update(ws) => {
            let conn = read_connection(input)?;
            if conn.id.is_empty() {
                return Err(Failure::Usage(
                    "The connection to update must have an `id`".into(),
                ));
            }
            to_json(&client.update_slack_connection(&ws, &conn).await?)
        }
        Command::Delete(ws, conn) => {
            client.delete_slack_connection(&ws, &conn).await?;
            info!("Deleted Slack connection {} from workspace {}", conn, ws);
            Ok(None)
        }
    }
}

fn read_connection<R: Read>(mut input: R) -> Result<SlackConnection, Failure> {
    let mut buf = String::new();
    input
        .read_to_string(&mut buf)
        .map_err(Failure::ReadInput)?;

    serde_json::from_str(&buf).map_err(Failure::ParseInput)
}

fn to_json<T: Serialize>(x: &T) -> Result<Option<String>, Failure> {
    serde_json::to_string_pretty(x)
        .map(Some)
        .map_err(Failure::WriteOutput)
}
