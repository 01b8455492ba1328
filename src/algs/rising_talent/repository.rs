use crate::algs::rising_talent::model::{FollowerGainRow, UserActivityRow};
use crate::common::error::AppError;
use crate::common::time::from_millis;
use chrono::{DateTime, Utc};
use itertools::Itertools;
use sqlx::{query_as, Sqlite, Transaction};
use std::collections::HashMap;

/// Users who uploaded, gained a follower, or received engagement inside the window,
/// with their per-kind activity counts.
///
/// Newest accounts first, ties broken by id, so the ranking input order is deterministic.
pub async fn get_active_users(
    tx: &mut Transaction<'_, Sqlite>,
    since: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<Vec<UserActivityRow>, AppError> {
    let since = since.timestamp_millis();
    let now = now.timestamp_millis();

    let users = query_as::<_, UserActivityRow>(
        "
        with recent_recordings as (
            select user_id, count(*) as n
            from recording
            where created_at >= ? and created_at <= ?
            group by user_id
        )
        , recent_likes as (
            select r.user_id, count(*) as n
            from recording_like l
            join recording r
            on l.recording_id = r.recording_id
            where l.created_at >= ? and l.created_at <= ?
            group by r.user_id
        )
        , recent_comments as (
            select r.user_id, count(*) as n
            from comment c
            join recording r
            on c.recording_id = r.recording_id
            where c.created_at >= ? and c.created_at <= ?
            group by r.user_id
        )
        , recent_plays as (
            select r.user_id, count(*) as n
            from play p
            join recording r
            on p.recording_id = r.recording_id
            where p.created_at >= ? and p.created_at <= ?
            group by r.user_id
        )
        , recent_followers as (
            select followee_id as user_id, count(*) as n
            from follow
            where created_at >= ? and created_at <= ?
            group by followee_id
        )
        select
              u.user_id
            , u.username
            , u.created_at
            , coalesce(rr.n, 0) as recent_content_count
            , coalesce(rl.n, 0) as recent_likes_received
            , coalesce(rc.n, 0) as recent_comments_received
            , coalesce(rp.n, 0) as recent_plays_received
        from app_user u
        left outer join recent_recordings rr on u.user_id = rr.user_id
        left outer join recent_likes rl on u.user_id = rl.user_id
        left outer join recent_comments rc on u.user_id = rc.user_id
        left outer join recent_plays rp on u.user_id = rp.user_id
        left outer join recent_followers rf on u.user_id = rf.user_id
        where rr.n is not null
        or rl.n is not null
        or rc.n is not null
        or rp.n is not null
        or rf.n is not null
        order by u.created_at desc, u.user_id asc
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
    .bind(since)
    .bind(now)
    .fetch_all(&mut **tx)
    .await?;

    Ok(users)
}

/// Follow timestamps inside the window, grouped by the followed user.
pub async fn get_follower_gains(
    tx: &mut Transaction<'_, Sqlite>,
    since: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<HashMap<i64, Vec<DateTime<Utc>>>, AppError> {
    let gains = query_as::<_, FollowerGainRow>(
        "
        select
              followee_id as user_id
            , created_at as followed_at
        from follow
        where created_at >= ? and created_at <= ?
        order by created_at asc
        ",
    )
    .bind(since.timestamp_millis())
    .bind(now.timestamp_millis())
    .fetch_all(&mut **tx)
    .await?
    .into_iter()
    .map(|row| (row.user_id, from_millis(row.followed_at)))
    .into_group_map();

    Ok(gains)
}
