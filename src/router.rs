use axum::{
    Router,
    routing::{delete, get, post},
};
use tower::ServiceBuilder;

use crate::{
    AppState,
    middleware::{auth_middleware, log_errors},
    routes,
};

// 翻译与用量接口，无需登录
fn translation_routes() -> Router<AppState> {
    Router::new()
        .route("/translate", post(routes::translate::translate))
        .route("/openai/usage", get(routes::translate::usage_report))
}

// 后台内容管理接口
fn content_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/posts",
            get(routes::post::list_posts).post(routes::post::create_post),
        )
        .route(
            "/posts/{id}",
            get(routes::post::get_post)
                .put(routes::post::update_post)
                .delete(routes::post::delete_post),
        )
        .route(
            "/tags",
            get(routes::tag::list_tags).post(routes::tag::create_tag),
        )
        .route("/tags/{id}", delete(routes::tag::delete_tag))
        .route(
            "/social-links",
            get(routes::social_link::list_social_links)
                .post(routes::social_link::create_social_link),
        )
        .route(
            "/social-links/{id}",
            delete(routes::social_link::delete_social_link),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
}

// 创建主路由
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .merge(translation_routes())
        .merge(content_routes(&state));

    // axum 不允许在根路径 nest
    let base = state.config.api_base_uri.trim_matches('/');
    let router = if base.is_empty() {
        api
    } else {
        Router::new().nest(&format!("/{base}"), api)
    };

    let router = router.layer(ServiceBuilder::new().layer(axum::middleware::from_fn(log_errors)));

    // 根据编译模式决定是否添加CORS
    #[cfg(debug_assertions)]
    let router = {
        tracing::debug!("Adding CORS layer for development mode");
        router.layer(tower_http::cors::CorsLayer::permissive())
    };

    router.with_state(state)
}
