//! `catalog` binary: load config, prepare the schema, serve.

use std::process::ExitCode;
use std::sync::Arc;

use catalog::store::PgStore;
use catalog::{Config, Error, Server, routes};
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("catalog: failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };
    config.logging.init();

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "catalog failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> Result<(), Error> {
    let addr = config.server.socket_addr()?;

    let store = Arc::new(PgStore::connect(&config.database).await?);
    // The listener never binds when the tables cannot be created.
    store.init_schema().await?;

    let app = routes::router(Arc::clone(&store)).cors(config.http.cors);
    info!(
        cors = config.http.cors,
        max_body_bytes = config.http.max_body_bytes,
        "routes registered"
    );

    Server::bind(addr)
        .max_body_bytes(config.http.max_body_bytes)
        .serve(app)
        .await?;

    store.close().await;
    Ok(())
}
