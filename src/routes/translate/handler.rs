use axum::{
    extract::{Json, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::Value;

use crate::{
    AppState,
    error::AppError,
    translation::{
        OpenAiClient, TranslatePayload, TranslateResponse, TranslationRequest, Translator,
        UsageQuery,
    },
};

const TRANSLATION_FAILED: &str = "번역 중 오류가 발생했습니다.";
const USAGE_LOOKUP_FAILED: &str = "OpenAI 사용량 조회 중 오류가 발생했습니다.";

/// 配置检查 -> 参数校验 -> 用量检查 -> 模型调用
#[axum::debug_handler]
pub async fn translate(
    State(state): State<AppState>,
    payload: Result<Json<TranslatePayload>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let translator = Translator::from_config(state.http.clone(), &state.config)
        .map_err(|e| AppError::from_translate(e, TRANSLATION_FAILED))?;

    let Json(payload) = payload.map_err(|e| {
        tracing::debug!("Rejected translation payload: {}", e);
        AppError::Validation("제목과 내용이 필요합니다.".to_string())
    })?;
    let request = TranslationRequest::try_from(payload)
        .map_err(|e| AppError::from_translate(e, TRANSLATION_FAILED))?;

    let result = translator
        .translate(request)
        .await
        .map_err(|e| AppError::from_translate(e, TRANSLATION_FAILED))?;

    Ok((StatusCode::OK, Json(TranslateResponse::from(result))))
}

/// 原样返回用量报告
#[axum::debug_handler]
pub async fn usage_report(
    State(state): State<AppState>,
    Query(query): Query<UsageQuery>,
) -> Result<Json<Value>, AppError> {
    let client = OpenAiClient::from_config(state.http.clone(), &state.config)
        .map_err(|e| AppError::from_translate(e, USAGE_LOOKUP_FAILED))?;

    let report = client
        .usage(query.date)
        .await
        .map_err(|e| AppError::from_translate(e, USAGE_LOOKUP_FAILED))?;

    Ok(Json(report))
}
