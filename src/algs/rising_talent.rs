//! Rising talent: users gaining traction over the last month, favouring accounts
//! that are past their first week but not yet established.

use crate::algs::ranking::{rank, MAX_RESULTS};
use crate::common::{
    error::AppError,
    model::AlgorithmInfo,
    time::{from_millis, now_utc},
};
use chrono::{DateTime, Duration, Utc};
use model::{RecentActivity, RisingResult, RisingTalentResponse, RisingUser, ScorableUser};
use sqlx::{Sqlite, Transaction};
use tracing::{debug, info};

pub mod model;
mod repository;

pub const RISING_WINDOW_DAYS: i64 = 30;

const CONTENT_WEIGHT: f64 = 5.0;
const FOLLOWER_WEIGHT: f64 = 3.0;
const PLAY_WEIGHT: f64 = 0.1;

pub fn algorithm_info() -> AlgorithmInfo {
    AlgorithmInfo {
        description: "Users ranked by activity over the last 30 days (new recordings x5, new \
                      followers x3, likes and comments received, plays received x0.1), weighted \
                      by account age with a peak at 60 days"
            .to_string(),
        time_window: format!("{} days", RISING_WINDOW_DAYS),
        max_results: MAX_RESULTS,
    }
}

pub async fn get_ranking(
    tx: &mut Transaction<'_, Sqlite>,
) -> Result<RisingTalentResponse, AppError> {
    let now = now_utc();
    let since = now - Duration::days(RISING_WINDOW_DAYS);
    info!("getting rising talent ranking at: {:?}", now);

    let active_users = repository::get_active_users(tx, since, now).await?;
    let mut follower_gains = repository::get_follower_gains(tx, since, now).await?;
    debug!("scoring {} active users", active_users.len());

    let scored: Vec<RisingUser> = active_users
        .into_iter()
        .map(|row| {
            let user = ScorableUser {
                id: row.user_id,
                created_at: from_millis(row.created_at),
                recent_content_count: row.recent_content_count,
                recent_follower_gains: follower_gains.remove(&row.user_id).unwrap_or_default(),
                recent_likes_received: row.recent_likes_received,
                recent_comments_received: row.recent_comments_received,
                recent_plays_received: row.recent_plays_received,
            };
            RisingUser {
                id: row.user_id,
                username: row.username,
                created_at: user.created_at,
                metrics: compute_rising_score(&user, now),
            }
        })
        .collect();

    let users = rank(scored, MAX_RESULTS);
    info!("rising talent ranking has {} users", users.len());

    Ok(RisingTalentResponse {
        users,
        algorithm: algorithm_info(),
    })
}

pub fn compute_rising_score(user: &ScorableUser, now: DateTime<Utc>) -> RisingResult {
    let new_followers = user.recent_follower_gains.len() as i64;

    let engagement_score = user.recent_likes_received as f64
        + user.recent_comments_received as f64
        + user.recent_plays_received as f64 * PLAY_WEIGHT;

    let base_score = user.recent_content_count as f64 * CONTENT_WEIGHT
        + engagement_score
        + new_followers as f64 * FOLLOWER_WEIGHT;

    let account_age_in_days = (now - user.created_at).num_days();
    let age_factor = age_factor(account_age_in_days);

    RisingResult {
        user_id: user.id,
        rising_score: (base_score * age_factor).round() as i64,
        recent_activity: RecentActivity {
            new_recordings: user.recent_content_count,
            new_followers,
            likes_received: user.recent_likes_received,
            comments_received: user.recent_comments_received,
            plays_received: user.recent_plays_received,
            engagement_score,
        },
        account_age_in_days,
        age_factor,
    }
}

/// Multiplier by account age in whole days: halved during the first week, rising to 1.5 at
/// 60 days, back down to 1.0 at 180 days and flat after that.
///
/// The jump from 0.5 to ~1.058 on day 7 is kept as is.
pub fn age_factor(account_age_in_days: i64) -> f64 {
    let days = account_age_in_days as f64;
    match account_age_in_days {
        d if d < 7 => 0.5,
        7..=60 => 1.0 + (days / 60.0) * 0.5,
        61..=180 => 1.5 - ((days - 60.0) / 120.0) * 0.5,
        _ => 1.0,
    }
}
