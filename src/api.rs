use crate::algs::rising_talent::{self, model::RisingTalentResponse};
use crate::algs::trending::{self, model::TrendingResponse};
use crate::common::error::AppError;
use crate::common::model;
use axum::{extract::State, http::StatusCode, Json};
use sqlx::{query, sqlite::SqlitePool};

pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

pub async fn register_user(
    State(pool): State<SqlitePool>,
    Json(payload): Json<model::User>,
) -> Result<StatusCode, AppError> {
    query(
        "
        insert into app_user (
              user_id
            , username
            , created_at
        ) values (?, ?, ?)
        ",
    )
    .bind(payload.user_id)
    .bind(payload.username)
    .bind(payload.created_at)
    .execute(&pool)
    .await?;

    Ok(StatusCode::OK)
}

pub async fn register_recording(
    State(pool): State<SqlitePool>,
    Json(payload): Json<model::Recording>,
) -> Result<StatusCode, AppError> {
    query(
        "
        insert into recording (
              recording_id
            , user_id
            , title
            , created_at
        ) values (?, ?, ?, ?)
        ",
    )
    .bind(payload.recording_id)
    .bind(payload.user_id)
    .bind(payload.title)
    .bind(payload.created_at)
    .execute(&pool)
    .await?;

    Ok(StatusCode::OK)
}

pub async fn register_like(
    State(pool): State<SqlitePool>,
    Json(payload): Json<model::Like>,
) -> Result<StatusCode, AppError> {
    query(
        "
        insert into recording_like (
              user_id
            , recording_id
            , created_at
        ) values (?, ?, ?)
        ",
    )
    .bind(payload.user_id)
    .bind(payload.recording_id)
    .bind(payload.created_at)
    .execute(&pool)
    .await?;

    Ok(StatusCode::OK)
}

pub async fn register_comment(
    State(pool): State<SqlitePool>,
    Json(payload): Json<model::Comment>,
) -> Result<StatusCode, AppError> {
    query(
        "
        insert into comment (
              comment_id
            , user_id
            , recording_id
            , parent_id
            , content
            , created_at
        ) values (?, ?, ?, ?, ?, ?)
        ",
    )
    .bind(payload.comment_id)
    .bind(payload.user_id)
    .bind(payload.recording_id)
    .bind(payload.parent_id)
    .bind(payload.content)
    .bind(payload.created_at)
    .execute(&pool)
    .await?;

    Ok(StatusCode::OK)
}

pub async fn register_play(
    State(pool): State<SqlitePool>,
    Json(payload): Json<model::Play>,
) -> Result<StatusCode, AppError> {
    query(
        "
        insert into play (
              user_id
            , recording_id
            , completed
            , created_at
        ) values (?, ?, ?, ?)
        ",
    )
    .bind(payload.user_id)
    .bind(payload.recording_id)
    .bind(payload.completed)
    .bind(payload.created_at)
    .execute(&pool)
    .await?;

    Ok(StatusCode::OK)
}

pub async fn register_follow(
    State(pool): State<SqlitePool>,
    Json(payload): Json<model::Follow>,
) -> Result<StatusCode, AppError> {
    query(
        "
        insert into follow (
              follower_id
            , followee_id
            , created_at
        ) values (?, ?, ?)
        ",
    )
    .bind(payload.follower_id)
    .bind(payload.followee_id)
    .bind(payload.created_at)
    .execute(&pool)
    .await?;

    Ok(StatusCode::OK)
}

pub async fn get_trending_recordings(
    State(pool): State<SqlitePool>,
) -> Result<Json<TrendingResponse>, AppError> {
    let mut tx = pool.begin().await?;
    let ranking = trending::get_ranking(&mut tx).await?;
    tx.commit().await?;

    Ok(Json(ranking))
}

pub async fn get_rising_talent(
    State(pool): State<SqlitePool>,
) -> Result<Json<RisingTalentResponse>, AppError> {
    let mut tx = pool.begin().await?;
    let ranking = rising_talent::get_ranking(&mut tx).await?;
    tx.commit().await?;

    Ok(Json(ranking))
}
