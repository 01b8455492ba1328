use crate::common::model::{AlgorithmInfo, Score};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngagementKind {
    Like,
    Comment,
    Play,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngagementEvent {
    pub kind: EngagementKind,
    pub occurred_at: DateTime<Utc>,
    /// Only meaningful for plays: the listener reached the end of the recording.
    pub completed: bool,
}

impl EngagementEvent {
    pub fn like(occurred_at: DateTime<Utc>) -> Self {
        EngagementEvent {
            kind: EngagementKind::Like,
            occurred_at,
            completed: false,
        }
    }

    pub fn comment(occurred_at: DateTime<Utc>) -> Self {
        EngagementEvent {
            kind: EngagementKind::Comment,
            occurred_at,
            completed: false,
        }
    }

    pub fn play(occurred_at: DateTime<Utc>, completed: bool) -> Self {
        EngagementEvent {
            kind: EngagementKind::Play,
            occurred_at,
            completed,
        }
    }
}

/// A recording together with its engagement inside the trending window.
#[derive(Debug, Clone)]
pub struct ScorableRecording {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub events: Vec<EngagementEvent>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrendingResult {
    pub entity_id: i64,
    pub trending_score: f64,
    pub recent_likes: usize,
    pub recent_comments: usize,
    pub recent_plays: usize,
    pub completed_plays: usize,
    pub completion_rate: f64,
    pub velocity_multiplier: f64,
    pub time_decay: f64,
    pub freshness_boost: f64,
    pub engagement_score: f64,
}

impl Score for TrendingResult {
    fn score(&self) -> f64 {
        self.trending_score
    }
}

/// Trending entry as served to clients: recording metadata plus every scoring metric.
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TrendingRecording {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub metrics: TrendingResult,
}

impl Score for TrendingRecording {
    fn score(&self) -> f64 {
        self.metrics.score()
    }
}

#[derive(Serialize, Debug)]
pub struct TrendingResponse {
    pub recordings: Vec<TrendingRecording>,
    pub algorithm: AlgorithmInfo,
}

#[derive(FromRow, Debug)]
pub struct RecordingRow {
    pub recording_id: i64,
    pub user_id: i64,
    pub title: String,
    pub created_at: i64,
}

#[derive(FromRow, Debug)]
pub struct EngagementRow {
    pub recording_id: i64,
    pub occurred_at: i64,
    pub completed: bool,
}
