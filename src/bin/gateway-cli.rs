use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::Value;

use edu_gateway::lifecycle::startup;
use edu_gateway::routing::RouteTable;
use edu_gateway::session::{GateDecision, SessionGate, SessionToken};

#[derive(Parser)]
#[command(name = "gateway-cli")]
#[command(about = "Operator CLI for the education platform gateway", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Query a running gateway's health endpoint
    Health {
        #[arg(short, long, default_value = "http://localhost:3000")]
        url: String,
    },
    /// Show how the session gate treats a page path
    Classify {
        path: String,
        /// Pretend the request carries a session cookie
        #[arg(long)]
        session: bool,
        /// Config file to read the route table from
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Health { url } => {
            let res = reqwest::Client::new()
                .get(format!("{}/api/health", url.trim_end_matches('/')))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Classify { path, session, config } => {
            let config = startup::load(config.as_deref())?;
            let table = RouteTable::from_config(&config.session);
            let gate = SessionGate::new(&config.session);

            let token = if session { SessionToken::new("cli") } else { None };
            let decision = gate.decide(&path, token.as_ref());

            println!("class:    {:?}", table.classify(&path));
            println!("demo:     {}", table.is_demo(&path));
            match decision {
                GateDecision::Redirect { location } => println!("decision: redirect → {}", location),
                other => println!("decision: {}", other.label()),
            }
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: gateway returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
