use log::*;

use std::env;
use std::sync::Arc;

mod api_models;
mod config;
mod db;
mod routes;
mod store;

use crate::config::Config;
use crate::store::VoteStore;

/**
 * Struct for carrying application state into tide request handlers
 */
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn VoteStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn VoteStore>) -> Self {
        Self { store }
    }
}

#[async_std::main]
async fn main() -> Result<(), std::io::Error> {
    dotenv::dotenv().ok();
    if env::var_os("RUST_LOG").is_none() {
        env::set_var("RUST_LOG", "info");
    }
    pretty_env_logger::init();

    let config = Config::from_env();

    info!("Starting API service, options: {} / {}", config.option_a, config.option_b);
    info!(
        "Connecting to DB at host={}, db={}, user={}",
        config.pg_host, config.pg_database, config.pg_user
    );
    debug!("Configuration: {:?}", config);

    match db::initialize(&config).await {
        Ok(pool) => {
            let state = AppState::new(Arc::new(db::PgStore::new(pool)));
            let app = routes::app(state);
            info!("Listening on {}", config.listen_addr);
            app.listen(config.listen_addr.as_str()).await?;
            Ok(())
        },
        Err(err) => {
            error!("Could not connect to database after {} attempts: {}", config.init_retries, err);
            std::process::exit(1);
        },
    }
}
