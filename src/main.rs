use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use hyper::StatusCode;
use serde::Serialize;

use tracked_time_logger::clients::HttpClientFactory;
use tracked_time_logger::config::{self, AppState, Config};
use tracked_time_logger::history::TimeTrackedEntry;
use tracked_time_logger::{handler, http, logger, server};

#[derive(Parser)]
#[command(name = "tracked-time-logger", version, about = "Commit today's tracked coding time to GitHub")]
struct Cli {
    /// Configuration file (extension optional)
    #[arg(short, long, default_value = "config")]
    config: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the function over HTTP (default)
    Serve,
    /// Run the workflow once and print the outcome as JSON
    Run,
}

/// `run` output: the HTTP success body plus the entry that was appended
#[derive(Serialize)]
struct RunReport<'a> {
    #[serde(flatten)]
    response: http::CommitResponse<'a>,
    entry: &'a TimeTrackedEntry,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    config::load_env_file(Path::new(".env"))?;
    let cfg = Config::load_from(&cli.config)?;
    logger::init(&cfg.logging)?;
    logger::log_missing_credentials(&cfg);

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            runtime.block_on(serve(cfg))?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Run => Ok(runtime.block_on(run_once(cfg))),
    }
}

async fn serve(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let listener = server::create_listener(addr)?;
    logger::log_server_start(&addr, &cfg);

    let clients = Arc::new(HttpClientFactory::from_config(&cfg));
    let state = Arc::new(AppState::new(cfg, clients));
    server::serve(listener, state, server::shutdown_signal()).await?;
    Ok(())
}

/// One invocation without the HTTP layer, for cron-style scheduling
async fn run_once(cfg: Config) -> ExitCode {
    let clients = Arc::new(HttpClientFactory::from_config(&cfg));
    let state = AppState::new(cfg, clients);

    let (status, body) = match handler::invoke(&state, handler::today()).await {
        Ok(outcome) => (
            StatusCode::OK,
            serde_json::to_string(&RunReport {
                response: http::CommitResponse {
                    commit_url: &outcome.commit_url,
                },
                entry: &outcome.entry,
            }),
        ),
        Err(err) => {
            logger::log_workflow_error(&err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::to_string(&http::ErrorResponse::from_error(&err)),
            )
        }
    };

    match body {
        Ok(json) => println!("{json}"),
        Err(e) => logger::log_error(&format!("Failed to serialize response: {e}")),
    }

    if status.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
