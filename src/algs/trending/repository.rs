use crate::algs::trending::model::{EngagementEvent, EngagementRow, RecordingRow};
use crate::common::error::AppError;
use crate::common::time::from_millis;
use chrono::{DateTime, Utc};
use itertools::Itertools;
use sqlx::{query_as, Sqlite, Transaction};
use std::collections::HashMap;

/// Recordings with engagement inside the window, or created inside it.
///
/// Newest first, ties broken by id, so the ranking input order is deterministic.
pub async fn get_candidate_recordings(
    tx: &mut Transaction<'_, Sqlite>,
    since: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<Vec<RecordingRow>, AppError> {
    let since = since.timestamp_millis();
    let now = now.timestamp_millis();

    let recordings = query_as::<_, RecordingRow>(
        "
        select
              r.recording_id
            , r.user_id
            , r.title
            , r.created_at
        from recording r
        where (r.created_at >= ? and r.created_at <= ?)
        or exists (
            select 1 from recording_like l
            where l.recording_id = r.recording_id
            and l.created_at >= ? and l.created_at <= ?
        )
        or exists (
            select 1 from comment c
            where c.recording_id = r.recording_id
            and c.created_at >= ? and c.created_at <= ?
        )
        or exists (
            select 1 from play p
            where p.recording_id = r.recording_id
            and p.created_at >= ? and p.created_at <= ?
        )
        order by r.created_at desc, r.recording_id asc
        ",
    )
    .bind(since)
    .bind(now)
    .bind(since)
    .bind(now)
    .bind(since)
    .bind(now)
    .bind(since)
    .bind(now)
    .fetch_all(&mut **tx)
    .await?;

    Ok(recordings)
}

/// All likes, comments and plays inside the window, grouped by recording.
///
/// Events after `now` are left out so every event handed to the scorer is in the past.
pub async fn get_recent_engagement(
    tx: &mut Transaction<'_, Sqlite>,
    since: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<HashMap<i64, Vec<EngagementEvent>>, AppError> {
    let likes = get_engagement_rows(
        tx,
        "
        select recording_id, created_at as occurred_at, 0 as completed
        from recording_like
        where created_at >= ? and created_at <= ?
        ",
        since,
        now,
    )
    .await?;

    let comments = get_engagement_rows(
        tx,
        "
        select recording_id, created_at as occurred_at, 0 as completed
        from comment
        where created_at >= ? and created_at <= ?
        ",
        since,
        now,
    )
    .await?;

    let plays = get_engagement_rows(
        tx,
        "
        select recording_id, created_at as occurred_at, completed
        from play
        where created_at >= ? and created_at <= ?
        ",
        since,
        now,
    )
    .await?;

    let events = likes
        .into_iter()
        .map(|row| (row.recording_id, EngagementEvent::like(from_millis(row.occurred_at))))
        .chain(comments.into_iter().map(|row| {
            (
                row.recording_id,
                EngagementEvent::comment(from_millis(row.occurred_at)),
            )
        }))
        .chain(plays.into_iter().map(|row| {
            (
                row.recording_id,
                EngagementEvent::play(from_millis(row.occurred_at), row.completed),
            )
        }))
        .into_group_map();

    Ok(events)
}

async fn get_engagement_rows(
    tx: &mut Transaction<'_, Sqlite>,
    sql: &'static str,
    since: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<Vec<EngagementRow>, AppError> {
    let rows = query_as::<_, EngagementRow>(sql)
        .bind(since.timestamp_millis())
        .bind(now.timestamp_millis())
        .fetch_all(&mut **tx)
        .await?;

    Ok(rows)
}
