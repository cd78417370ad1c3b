use std::process::ExitCode;
use std::sync::Arc;

use modserve::config::{AppState, Config};
use modserve::http::{ContentTypeResolver, MimeTable};
use modserve::server::{Server, ShutdownSignals};
use modserve::{logger, Result};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            logger::log_error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let args = std::env::args_os().map(|a| a.to_string_lossy().into_owned());
    let cfg = Config::from_args(args)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<()> {
    let addr = cfg.socket_addr()?;

    // Built once, shared read-only by every connection
    let resolver: Arc<dyn ContentTypeResolver> = Arc::new(MimeTable::new());
    let state = Arc::new(AppState::new(&cfg, resolver));

    let file_server = Server::bind(addr, state)?;
    // Handlers must exist before the startup line is printed
    let signals = ShutdownSignals::register()?;
    logger::log_server_start(&cfg.server.host, cfg.server.port);

    file_server.run_until(signals.recv()).await;
    logger::log_shutdown();
    Ok(())
}
