use axum::{
    Extension,
    extract::{
        Json, Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use crate::{AppState, error::AppError, utils::Claims};

use super::model::{CreatePostRequest, Post, UpdatePostRequest};

fn validate_post(title: &str, content: &str) -> Result<(), AppError> {
    if title.trim().is_empty() || content.trim().is_empty() {
        return Err(AppError::Validation("제목과 내용이 필요합니다.".to_string()));
    }
    Ok(())
}

#[axum::debug_handler]
pub async fn list_posts(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let posts = Post::list(&state.pool).await?;
    Ok(Json(posts))
}

#[axum::debug_handler]
pub async fn get_post(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(id) = id?;

    match Post::find_by_id(&state.pool, id).await? {
        Some(post) => Ok(Json(post)),
        None => Err(AppError::NotFound),
    }
}

#[axum::debug_handler]
pub async fn create_post(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    payload: Result<Json<CreatePostRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload?;

    validate_post(&req.title, &req.content)?;

    // 作者取自 token 的 subject
    let author_id = claims.user_id().ok_or(AppError::Unauthorized)?;

    let post = Post::create(&state.pool, req, author_id).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

#[axum::debug_handler]
pub async fn update_post(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdatePostRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(id) = id?;
    let Json(req) = payload?;

    validate_post(&req.title, &req.content)?;

    match Post::update(&state.pool, id, req).await? {
        Some(post) => Ok(Json(post)),
        None => Err(AppError::NotFound),
    }
}

#[axum::debug_handler]
pub async fn delete_post(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(id) = id?;

    if Post::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound)
    }
}
