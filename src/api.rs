//! HTTP surface: the joke endpoint, the translation pass-through, the
//! Telegram webhook, static SPA serving, CORS, and request logging.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};

use crate::bot::{self, memory::JokeMemory, telegram::TelegramBot, Update};
use crate::config::AppConfig;
use crate::jokes::JokeService;
use crate::translate::Translator;

// User-facing failure texts; upstream error details stay in the logs.
const JOKES_UNAVAILABLE: &str = "Анекдоты временно недоступны";
const TRANSLATION_FAILED: &str = "Ошибка перевода";
const BAD_REQUEST: &str = "Некорректный запрос";

#[derive(Clone)]
pub struct AppState {
    pub jokes: Arc<JokeService>,
    pub translator: Arc<Translator>,
    pub bot: Option<Arc<TelegramBot>>,
    pub memory: JokeMemory,
}

pub fn router(state: AppState, config: &AppConfig) -> Router {
    // Unknown GET paths fall through to the SPA entry point.
    let spa = ServeDir::new(&config.static_dir)
        .fallback(ServeFile::new(config.static_dir.join("index.html")));

    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/random-joke", get(random_joke))
        .route("/translate", post(translate))
        .route("/telegram-webhook", post(telegram_webhook))
        .fallback_service(spa)
        .layer(cors_layer(&config.allowed_origins))
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let parsed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(parsed))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

async fn random_joke(State(state): State<AppState>) -> Response {
    match state.jokes.fetch(None).await {
        Ok(joke) => Json(joke).into_response(),
        Err(e) => {
            tracing::error!(provider = e.provider(), error = ?e, "failed to fetch joke");
            (StatusCode::INTERNAL_SERVER_ERROR, JOKES_UNAVAILABLE).into_response()
        }
    }
}

#[derive(serde::Deserialize)]
struct TranslateReq {
    text: String,
}

#[derive(serde::Serialize)]
struct TranslateResp {
    translation: String,
}

async fn translate(
    State(state): State<AppState>,
    body: Result<Json<TranslateReq>, JsonRejection>,
) -> Response {
    let Ok(Json(req)) = body else {
        return (StatusCode::BAD_REQUEST, BAD_REQUEST).into_response();
    };
    if req.text.trim().is_empty() {
        return (StatusCode::BAD_REQUEST, BAD_REQUEST).into_response();
    }

    match state.translator.translate(&req.text).await {
        Ok(translation) => Json(TranslateResp { translation }).into_response(),
        Err(e) => {
            tracing::error!(error = ?e, "translation failed");
            (StatusCode::INTERNAL_SERVER_ERROR, TRANSLATION_FAILED).into_response()
        }
    }
}

async fn telegram_webhook(
    State(state): State<AppState>,
    body: Result<Json<Update>, JsonRejection>,
) -> Response {
    let Some(bot) = state.bot.clone() else {
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    };
    let Ok(Json(update)) = body else {
        return StatusCode::BAD_REQUEST.into_response();
    };

    bot::process_update(&bot, &state.jokes, &state.translator, &state.memory, update).await;
    StatusCode::OK.into_response()
}

async fn log_requests(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(req).await;

    tracing::info!(
        method = %method,
        path,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "http request"
    );
    response
}
