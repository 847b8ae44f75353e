//! session-gate command-line interface
//!
//! # Usage
//!
//! ## CPF Check (default mode)
//! ```bash
//! session-gate --cpf 529.982.247-25
//! ```
//!
//! ## Server Mode
//! ```bash
//! session-gate server --port 3000 --host 0.0.0.0
//! ```
//!
//! ## Request Mode
//! ```bash
//! session-gate request /me --token <session> --refresh-token <refresh>
//! ```

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use session_gate::cli::{
    cpf::{CpfArgs, run_cpf_mode},
    request::{RequestArgs, run_request_mode},
    server::{ServerArgs, run_server_mode},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "session-gate")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    // CPF mode options (when no subcommand is provided)
    /// CPF to validate, punctuation allowed
    #[arg(short, long, value_name = "CPF", allow_hyphen_values = true)]
    cpf: Option<String>,

    /// Print the CPF result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start HTTP server mode
    Server {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Configuration file path
        #[arg(long)]
        config: Option<String>,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },

    /// Send one authenticated GET request to the backend API
    Request {
        /// Request path, relative to the API base URL
        path: String,

        /// Session token
        #[arg(short, long)]
        token: Option<String>,

        /// Refresh token used if the session has expired
        #[arg(short, long)]
        refresh_token: Option<String>,

        /// Backend base URL (overrides configuration)
        #[arg(long)]
        base_url: Option<String>,

        /// Configuration file path
        #[arg(long)]
        config: Option<String>,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Server {
            port,
            host,
            config,
            verbose,
        }) => {
            let args = ServerArgs {
                port,
                host,
                config,
                verbose,
            };
            run_server_mode(args).await?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Request {
            path,
            token,
            refresh_token,
            base_url,
            config,
            verbose,
        }) => {
            let args = RequestArgs {
                path,
                token,
                refresh_token,
                base_url,
                config,
                verbose,
            };
            run_request_mode(args).await?;
            Ok(ExitCode::SUCCESS)
        }
        None => run_cpf_mode(CpfArgs {
            cpf: cli.cpf,
            json: cli.json,
        }),
    }
}
