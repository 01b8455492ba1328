//! Trending recordings: engagement in the last week, weighted by how recent and how fast it is.

use crate::algs::ranking::{rank, MAX_RESULTS};
use crate::common::{
    error::AppError,
    model::AlgorithmInfo,
    time::{from_millis, hours_between, now_utc},
};
use chrono::{DateTime, Duration, Utc};
use model::{
    EngagementEvent, EngagementKind, ScorableRecording, TrendingRecording, TrendingResponse,
    TrendingResult,
};
use sqlx::{Sqlite, Transaction};
use tracing::{debug, info};

pub mod model;
mod repository;

pub const TRENDING_WINDOW_DAYS: i64 = 7;

const LIKE_WEIGHT: usize = 3;
const COMMENT_WEIGHT: usize = 2;
const PLAY_WEIGHT: usize = 1;
const DECAY_HOURS: f64 = 48.0;
const MAX_VELOCITY_MULTIPLIER: f64 = 3.0;
const FRESHNESS_HOURS: f64 = 48.0;
const FRESHNESS_BOOST: f64 = 1.5;

pub fn algorithm_info() -> AlgorithmInfo {
    AlgorithmInfo {
        description: "Recordings ranked by engagement over the last 7 days (likes x3, comments x2, \
                      plays x1), decayed by the age of the latest activity, multiplied by \
                      engagement velocity and boosted for recordings younger than 48 hours"
            .to_string(),
        time_window: format!("{} days", TRENDING_WINDOW_DAYS),
        max_results: MAX_RESULTS,
    }
}

pub async fn get_ranking(tx: &mut Transaction<'_, Sqlite>) -> Result<TrendingResponse, AppError> {
    let now = now_utc();
    let since = now - Duration::days(TRENDING_WINDOW_DAYS);
    info!("getting trending ranking at: {:?}", now);

    let candidates = repository::get_candidate_recordings(tx, since, now).await?;
    let mut engagement = repository::get_recent_engagement(tx, since, now).await?;
    debug!("scoring {} candidate recordings", candidates.len());

    let scored: Vec<TrendingRecording> = candidates
        .into_iter()
        .map(|row| {
            let recording = ScorableRecording {
                id: row.recording_id,
                created_at: from_millis(row.created_at),
                events: engagement.remove(&row.recording_id).unwrap_or_default(),
            };
            TrendingRecording {
                id: row.recording_id,
                user_id: row.user_id,
                title: row.title,
                created_at: recording.created_at,
                metrics: compute_trending_score(&recording, now),
            }
        })
        .collect();

    let recordings = rank(scored, MAX_RESULTS);
    info!("trending ranking has {} recordings", recordings.len());

    Ok(TrendingResponse {
        recordings,
        algorithm: algorithm_info(),
    })
}

/// Scores a recording from the engagement it received inside the trending window.
///
/// `recording.events` must already be restricted to the window and must not lie after `now`.
pub fn compute_trending_score(recording: &ScorableRecording, now: DateTime<Utc>) -> TrendingResult {
    let events = &recording.events;

    let recent_likes = count_kind(events, EngagementKind::Like);
    let recent_comments = count_kind(events, EngagementKind::Comment);
    let recent_plays = count_kind(events, EngagementKind::Play);
    let completed_plays = events
        .iter()
        .filter(|e| e.kind == EngagementKind::Play && e.completed)
        .count();

    let engagement_score = (recent_likes * LIKE_WEIGHT
        + recent_comments * COMMENT_WEIGHT
        + recent_plays * PLAY_WEIGHT) as f64;

    let time_decay = time_decay(events, now);
    let velocity_multiplier = velocity_multiplier(events, now);
    let freshness_boost = freshness_boost(recording.created_at, now);

    let completion_rate = if recent_plays > 0 {
        completed_plays as f64 / recent_plays as f64 * 100.0
    } else {
        0.0
    };

    TrendingResult {
        entity_id: recording.id,
        trending_score: engagement_score * time_decay * velocity_multiplier * freshness_boost,
        recent_likes,
        recent_comments,
        recent_plays,
        completed_plays,
        completion_rate,
        velocity_multiplier,
        time_decay,
        freshness_boost,
        engagement_score,
    }
}

fn count_kind(events: &[EngagementEvent], kind: EngagementKind) -> usize {
    events.iter().filter(|e| e.kind == kind).count()
}

/// `exp(-h / 48)` where `h` is the number of hours since the latest event; 1 without events.
pub fn time_decay(events: &[EngagementEvent], now: DateTime<Utc>) -> f64 {
    match events.iter().map(|e| e.occurred_at).max() {
        Some(latest) => (-hours_between(latest, now) / DECAY_HOURS).exp(),
        None => 1.0,
    }
}

/// Events per day over the span since the oldest event (at least one hour), mapped into [1, 3].
pub fn velocity_multiplier(events: &[EngagementEvent], now: DateTime<Utc>) -> f64 {
    let Some(oldest) = events.iter().map(|e| e.occurred_at).min() else {
        return 1.0;
    };

    let span_hours = hours_between(oldest, now).max(1.0);
    let events_per_day = events.len() as f64 / (span_hours / 24.0);

    (1.0 + events_per_day / 10.0).min(MAX_VELOCITY_MULTIPLIER)
}

pub fn freshness_boost(created_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    if hours_between(created_at, now) <= FRESHNESS_HOURS {
        FRESHNESS_BOOST
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        from_millis(1_730_000_000_000)
    }

    fn recording(age: Duration, events: Vec<EngagementEvent>) -> ScorableRecording {
        ScorableRecording {
            id: 1,
            created_at: now() - age,
            events,
        }
    }

    #[test]
    fn empty_engagement_scores_zero() {
        let result = compute_trending_score(&recording(Duration::hours(2), vec![]), now());

        assert_eq!(result.time_decay, 1.0);
        assert_eq!(result.velocity_multiplier, 1.0);
        assert_eq!(result.trending_score, 0.0);
        assert_eq!(result.completion_rate, 0.0);
        assert_eq!(result.engagement_score, 0.0);
    }

    #[test]
    fn fresh_recording_with_burst_of_engagement() {
        let now = now();
        let events = vec![
            EngagementEvent::like(now),
            EngagementEvent::like(now),
            EngagementEvent::comment(now),
        ];
        let result = compute_trending_score(&recording(Duration::hours(1), events), now);

        assert_eq!(result.recent_likes, 2);
        assert_eq!(result.recent_comments, 1);
        assert_eq!(result.recent_plays, 0);
        assert_eq!(result.engagement_score, 8.0);
        assert_eq!(result.time_decay, 1.0);
        assert_eq!(result.velocity_multiplier, 3.0);
        assert_eq!(result.freshness_boost, 1.5);
        assert_eq!(result.trending_score, 36.0);
    }

    #[test]
    fn engagement_within_the_last_hour_is_close_to_undecayed() {
        let now = now();
        let events = vec![
            EngagementEvent::like(now - Duration::minutes(50)),
            EngagementEvent::like(now - Duration::minutes(30)),
            EngagementEvent::comment(now - Duration::minutes(10)),
        ];
        let result = compute_trending_score(&recording(Duration::hours(1), events), now);

        assert!(result.time_decay < 1.0);
        assert!(result.time_decay > 0.99);
        assert_eq!(result.velocity_multiplier, 3.0);
        assert!((result.trending_score - 36.0).abs() < 0.2);
    }

    #[test]
    fn decay_follows_latest_event() {
        let now = now();
        let events = vec![
            EngagementEvent::like(now - Duration::hours(100)),
            EngagementEvent::like(now - Duration::hours(48)),
        ];

        let decay = time_decay(&events, now);
        assert!((decay - (-1.0f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn decay_stays_in_unit_interval_across_window() {
        let now = now();
        for hours in [0, 1, 12, 47, 48, 96, 167, 168] {
            let decay = time_decay(&[EngagementEvent::like(now - Duration::hours(hours))], now);
            assert!(decay > 0.0 && decay <= 1.0, "decay {} at {}h", decay, hours);
        }
    }

    #[test]
    fn velocity_uses_events_per_day() {
        let now = now();
        // 5 events over 2 days: 2.5 per day
        let events: Vec<EngagementEvent> = (0..5)
            .map(|i| EngagementEvent::play(now - Duration::hours(48 - i), false))
            .collect();

        let velocity = velocity_multiplier(&events, now);
        assert!((velocity - 1.25).abs() < 1e-12);
    }

    #[test]
    fn velocity_span_is_at_least_one_hour() {
        let now = now();
        // one event at now: 1 / (1/24) = 24 per day -> 1 + 2.4
        let velocity = velocity_multiplier(&[EngagementEvent::like(now)], now);
        assert!((velocity - 3.0).abs() < 1e-12);

        let velocity = velocity_multiplier(&[EngagementEvent::like(now - Duration::hours(6))], now);
        assert!((velocity - 1.4).abs() < 1e-12);
    }

    #[test]
    fn velocity_stays_between_one_and_three() {
        let now = now();
        let sparse = vec![EngagementEvent::like(now - Duration::days(7))];
        let dense: Vec<EngagementEvent> = (0..500).map(|_| EngagementEvent::like(now)).collect();

        let low = velocity_multiplier(&sparse, now);
        let high = velocity_multiplier(&dense, now);
        assert!(low >= 1.0 && low <= 3.0);
        assert_eq!(high, 3.0);
    }

    #[test]
    fn freshness_boost_ends_after_48_hours() {
        let now = now();
        assert_eq!(freshness_boost(now, now), 1.5);
        assert_eq!(freshness_boost(now - Duration::hours(48), now), 1.5);
        assert_eq!(
            freshness_boost(now - Duration::hours(48) - Duration::milliseconds(1), now),
            1.0
        );
        assert_eq!(freshness_boost(now - Duration::days(30), now), 1.0);
    }

    #[test]
    fn completion_rate_counts_only_completed_plays() {
        let now = now();
        let events = vec![
            EngagementEvent::play(now - Duration::hours(3), true),
            EngagementEvent::play(now - Duration::hours(2), false),
            EngagementEvent::play(now - Duration::hours(1), true),
            EngagementEvent::play(now, false),
            EngagementEvent::like(now),
        ];
        let result = compute_trending_score(&recording(Duration::days(10), events), now);

        assert_eq!(result.recent_plays, 4);
        assert_eq!(result.completed_plays, 2);
        assert_eq!(result.completion_rate, 50.0);
        assert_eq!(result.engagement_score, 7.0);
        assert_eq!(result.freshness_boost, 1.0);
    }

    #[test]
    fn older_recording_loses_freshness_boost() {
        let now = now();
        let events = vec![EngagementEvent::like(now), EngagementEvent::like(now)];

        let fresh = compute_trending_score(&recording(Duration::hours(1), events.clone()), now);
        let old = compute_trending_score(&recording(Duration::days(5), events), now);

        assert_eq!(fresh.trending_score, old.trending_score * 1.5);
    }

    #[test]
    fn score_is_never_negative() {
        let now = now();
        let events = vec![
            EngagementEvent::comment(now - Duration::days(7)),
            EngagementEvent::play(now - Duration::days(6), false),
        ];
        let result = compute_trending_score(&recording(Duration::days(7), events), now);
        assert!(result.trending_score > 0.0);

        let empty = compute_trending_score(&recording(Duration::days(7), vec![]), now);
        assert!(empty.trending_score >= 0.0);
    }

    #[test]
    fn scoring_is_repeatable_for_fixed_now() {
        let now = now();
        let events = vec![
            EngagementEvent::like(now - Duration::minutes(17)),
            EngagementEvent::comment(now - Duration::hours(30)),
            EngagementEvent::play(now - Duration::hours(70), true),
        ];
        let rec = recording(Duration::days(3), events);

        let first = compute_trending_score(&rec, now);
        let second = compute_trending_score(&rec, now);
        assert_eq!(first, second);
        assert_eq!(
            first.trending_score.to_bits(),
            second.trending_score.to_bits()
        );
    }
}
