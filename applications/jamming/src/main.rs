//! Jamming - build a playlist from Spotify searches and save it to your account
mod config;
mod shell;

use crate::config::AppConfig;
use clap::Parser;
use jamming_client::{parse_redirect_fragment, RedirectAuthorizer, SpotifyClient};
use jamming_core::TokenGrant;
use jamming_session::Session;
use shell::{Command, Flow};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "jamming")]
#[command(about = "Build a Spotify playlist from searches", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// URL the Spotify authorization redirected back to
    #[arg(long, env = "JAMMING_CALLBACK_URL")]
    callback: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (stderr, so it stays out of the shell output)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "jamming=info,jamming_session=info,jamming_client=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?;
    config.validate()?;

    let client = SpotifyClient::new(config.spotify_config())?;
    let authorizer = RedirectAuthorizer::new(client.authorize_url()?, |url| {
        println!("Log in to Spotify to continue:\n  {url}");
    });

    let grant = initial_grant(cli.callback.as_deref(), config.spotify.access_token.as_deref());

    let mut session = Session::new(
        Arc::new(client),
        Arc::new(authorizer),
        config.session_config(),
    );
    session.start(grant);

    run(&mut session).await?;

    info!("Session ended");
    Ok(())
}

/// Token from the redirect, falling back to a configured one.
fn initial_grant(callback: Option<&str>, configured: Option<&str>) -> Option<TokenGrant> {
    if let Some(callback) = callback {
        match parse_redirect_fragment(callback) {
            Ok(grant) => return Some(grant),
            Err(e) => warn!(error = %e, "Ignoring callback URL"),
        }
    }
    configured
        .filter(|token| !token.is_empty())
        .map(TokenGrant::new)
}

async fn run(session: &mut Session) -> anyhow::Result<()> {
    println!("{}", shell::HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("jamming> ");
        std::io::Write::flush(&mut std::io::stdout())?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(msg) => {
                println!("{msg}");
                continue;
            }
        };

        let (output, flow) = shell::execute(session, command).await;
        if !output.is_empty() {
            println!("{output}");
        }
        if flow == Flow::Stop {
            break;
        }
    }

    Ok(())
}
