use crate::common::model::{AlgorithmInfo, Score};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A user's activity inside the rising talent window.
#[derive(Debug, Clone)]
pub struct ScorableUser {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub recent_content_count: i64,
    pub recent_follower_gains: Vec<DateTime<Utc>>,
    pub recent_likes_received: i64,
    pub recent_comments_received: i64,
    pub recent_plays_received: i64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecentActivity {
    pub new_recordings: i64,
    pub new_followers: i64,
    pub likes_received: i64,
    pub comments_received: i64,
    pub plays_received: i64,
    pub engagement_score: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RisingResult {
    pub user_id: i64,
    pub rising_score: i64,
    pub recent_activity: RecentActivity,
    pub account_age_in_days: i64,
    pub age_factor: f64,
}

impl Score for RisingResult {
    fn score(&self) -> f64 {
        self.rising_score as f64
    }
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RisingUser {
    pub id: i64,
    pub username: String,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub metrics: RisingResult,
}

impl Score for RisingUser {
    fn score(&self) -> f64 {
        self.metrics.score()
    }
}

#[derive(Serialize, Debug)]
pub struct RisingTalentResponse {
    pub users: Vec<RisingUser>,
    pub algorithm: AlgorithmInfo,
}

#[derive(FromRow, Debug)]
pub struct UserActivityRow {
    pub user_id: i64,
    pub username: String,
    pub created_at: i64,
    pub recent_content_count: i64,
    pub recent_likes_received: i64,
    pub recent_comments_received: i64,
    pub recent_plays_received: i64,
}

#[derive(FromRow, Debug)]
pub struct FollowerGainRow {
    pub user_id: i64,
    pub followed_at: i64,
}
