use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

use simple_canary::config::Config;
use simple_canary::routes::routes;
use simple_canary::state::AppState;
use simple_canary::utils::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Configuration file; the format follows the extension
    #[arg(long, default_value = "config.yaml")]
    config: PathBuf,

    /// Log every request
    #[arg(long, default_value_t = false)]
    verbose: bool,

    /// Print the loaded configuration and exit
    #[arg(long, default_value_t = false)]
    displayconfig: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    setup_logger();

    info!("simple-canary v{}", env!("CARGO_PKG_VERSION"));

    let mut config = match Config::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            error!("Cannot load configuration {}: {}", args.config.display(), e);
            return ExitCode::FAILURE;
        }
    };
    config.verbose |= args.verbose;

    if args.displayconfig {
        println!("CONFIG: file : {}", args.config.display());
        for line in config.display_lines() {
            println!("CONFIG: {}", line);
        }
        return ExitCode::SUCCESS;
    }

    let addr = match config.listen_addr() {
        Ok(addr) => addr,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let state = AppState::new(&config);
    info!(
        "Tracking {} devices with a ttl of {}s: {}",
        state.registry.len(),
        config.ttl.as_secs(),
        state
            .registry
            .devices()
            .iter()
            .map(|d| d.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let server = warp::serve(routes(state, config.verbose))
        .try_bind_with_graceful_shutdown(addr, shutdown_signal());

    match server {
        Ok((bound, server)) => {
            info!("Server started at http://{}", bound);
            server.await;
            info!("Server stopped");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Cannot start server on {}: {}", addr, e);
            ExitCode::FAILURE
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for ctrl-c: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
