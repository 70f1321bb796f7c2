use async_trait::async_trait;
use rand::Rng;

/**
 * Failures surfaced by a VoteStore
 *
 * The Display output is only the underlying cause, since that is what ends up
 * in the `error` field of the JSON response
 */
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Database(#[from] sqlx::Error),
    #[error("{0}")]
    Unavailable(String),
}

/**
 * Aggregate tally: one (vote, count) pair per distinct vote value
 */
pub type Tally = Vec<(String, i64)>;

/**
 * Persistence for votes. The table is append-only, so there are only two
 * operations
 */
#[async_trait]
pub trait VoteStore: Send + Sync {
    /**
     * Record a single vote and return the generated voter id
     */
    async fn insert(&self, vote: &str) -> Result<String, Error>;

    /**
     * Count the votes grouped by their value, in no particular order
     */
    async fn list_counts(&self) -> Result<Tally, Error>;
}

/**
 * Generate a new voter id: 64 random bits as 16 lowercase hex characters
 */
pub fn generate_voter_id() -> String {
    format!("{:016x}", rand::thread_rng().gen::<u64>())
}
