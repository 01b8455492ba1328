use serde::{Deserialize, Serialize};

pub trait Score {
    fn score(&self) -> f64;
}

/// Static description of a ranking, returned next to the ranked entries.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AlgorithmInfo {
    pub description: String,
    pub time_window: String,
    pub max_results: usize,
}

// Ingestion payloads. Ids are assigned by the caller, timestamps are epoch millis.

#[derive(Deserialize, Debug)]
pub struct User {
    pub user_id: i64,
    pub username: String,
    pub created_at: i64,
}

#[derive(Deserialize, Debug)]
pub struct Recording {
    pub recording_id: i64,
    pub user_id: i64,
    pub title: String,
    pub created_at: i64,
}

#[derive(Deserialize, Debug)]
pub struct Like {
    pub user_id: i64,
    pub recording_id: i64,
    pub created_at: i64,
}

#[derive(Deserialize, Debug)]
pub struct Comment {
    pub comment_id: i64,
    pub user_id: i64,
    pub recording_id: i64,
    pub parent_id: Option<i64>,
    pub content: String,
    pub created_at: i64,
}

#[derive(Deserialize, Debug)]
pub struct Play {
    pub user_id: Option<i64>,
    pub recording_id: i64,
    #[serde(default)]
    pub completed: bool,
    pub created_at: i64,
}

#[derive(Deserialize, Debug)]
pub struct Follow {
    pub follower_id: i64,
    pub followee_id: i64,
    pub created_at: i64,
}
