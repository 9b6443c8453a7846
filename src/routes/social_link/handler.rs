use axum::{
    extract::{
        Json, Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use crate::{AppState, error::AppError};

use super::model::{CreateSocialLinkRequest, SocialLink};

#[axum::debug_handler]
pub async fn list_social_links(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(SocialLink::list(&state.pool).await?))
}

#[axum::debug_handler]
pub async fn create_social_link(
    State(state): State<AppState>,
    payload: Result<Json<CreateSocialLinkRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload?;

    let (platform, url) = (req.platform.trim(), req.url.trim());
    if platform.is_empty() || url.is_empty() {
        return Err(AppError::Validation(
            "플랫폼과 URL이 필요합니다.".to_string(),
        ));
    }

    let link = SocialLink::create(&state.pool, platform, url).await?;
    Ok((StatusCode::CREATED, Json(link)))
}

#[axum::debug_handler]
pub async fn delete_social_link(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(id) = id?;

    if SocialLink::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound)
    }
}
