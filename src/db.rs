use async_std::task;
use async_trait::async_trait;
use log::*;
use sqlx::postgres::{PgConnectOptions, PgConnection, PgPool, PgPoolOptions};
use sqlx::Connection;

use crate::config::Config;
use crate::store::{generate_voter_id, Error, Tally, VoteStore};

const CREATE_VOTES: &str = "CREATE TABLE IF NOT EXISTS votes (
    id TEXT PRIMARY KEY,
    vote TEXT NOT NULL,
    created_at TIMESTAMP DEFAULT NOW()
)";

const INSERT_VOTE: &str = "INSERT INTO votes (id, vote, created_at) VALUES ($1, $2, NOW())";

const COUNT_VOTES: &str = "SELECT vote, COUNT(id) AS count FROM votes GROUP BY vote";

fn connect_options(config: &Config) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&config.pg_host)
        .port(config.pg_port)
        .database(&config.pg_database)
        .username(&config.pg_user)
        .password(&config.pg_password)
}

async fn create_table(options: &PgConnectOptions) -> Result<(), sqlx::Error> {
    let mut conn = PgConnection::connect_with(options).await?;
    sqlx::query(CREATE_VOTES).execute(&mut conn).await?;
    conn.close().await
}

/**
 * Wait for PostgreSQL to accept connections and make sure the votes table
 * exists
 *
 * Makes at most `config.init_retries` attempts, sleeping `config.init_delay`
 * after each failure. The error from the last attempt is returned once the
 * budget runs out. On success the returned pool has not opened any
 * connections yet.
 */
pub async fn initialize(config: &Config) -> Result<PgPool, Error> {
    let options = connect_options(config);
    let mut last_err = Error::Unavailable("no connection attempts configured".to_string());

    for attempt in 1..=config.init_retries {
        match create_table(&options).await {
            Ok(()) => {
                info!("Database ready (votes table exists)");
                return Ok(PgPoolOptions::new()
                    .max_connections(config.max_connections)
                    .connect_lazy_with(options));
            },
            Err(err) => {
                warn!("Database not ready yet ({}), retrying ({}/{})", err, attempt, config.init_retries);
                last_err = Error::from(err);
                task::sleep(config.init_delay).await;
            },
        }
    }
    Err(last_err)
}

/**
 * VoteStore backed by the PostgreSQL votes table
 */
#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VoteStore for PgStore {
    async fn insert(&self, vote: &str) -> Result<String, Error> {
        let id = generate_voter_id();
        sqlx::query(INSERT_VOTE)
            .bind(&id)
            .bind(vote)
            .execute(&self.pool)
            .await?;
        Ok(id)
    }

    async fn list_counts(&self) -> Result<Tally, Error> {
        let tally = sqlx::query_as::<_, (String, i64)>(COUNT_VOTES)
            .fetch_all(&self.pool)
            .await?;
        Ok(tally)
    }
}
