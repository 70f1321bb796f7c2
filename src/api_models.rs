use serde::{Deserialize, Serialize};

/**
 * Form body of `POST /api/vote`
 */
#[derive(Debug, Default)]
pub struct VoteForm {
    pub vote: Option<String>,
}

impl VoteForm {
    /**
     * Build the form from decoded `key=value` pairs. When a key repeats, the
     * first value wins
     */
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let vote = pairs.into_iter().find(|(key, _)| key == "vote").map(|(_, value)| value);
        Self { vote }
    }

    /**
     * The submitted vote, if one was given and is not empty
     */
    pub fn vote(&self) -> Option<&str> {
        self.vote.as_deref().filter(|v| !v.is_empty())
    }
}

/**
 * Confirmation handed back after a vote has been recorded
 */
#[derive(Debug, Deserialize, Serialize)]
pub struct VoteReceipt {
    pub voter_id: String,
    pub vote: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl ToString) -> Self {
        Self { error: error.to_string() }
    }
}
