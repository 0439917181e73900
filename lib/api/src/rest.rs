use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer};
use embedquest_core::{check_answer, PuzzleResponse};
use embedquest_storage::{PuzzleService, StorageManager};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::error::ApiError;

type ApiResult = Result<HttpResponse, ApiError>;

/// Shared state behind every handler
pub struct AppState {
    pub puzzles: PuzzleService,
    pub storage: Arc<StorageManager>,
}

impl AppState {
    pub fn new(puzzles: PuzzleService, storage: Arc<StorageManager>) -> Self {
        Self { puzzles, storage }
    }
}

#[derive(Deserialize)]
struct AnswerRequest {
    puzzle: PuzzleResponse,
    selected: String,
}

#[derive(Deserialize)]
struct SaveScoreRequest {
    name: String,
    score: u32,
}

#[derive(Deserialize)]
struct ScoresQuery {
    limit: Option<usize>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WordCountResponse {
    model_id: String,
    count: usize,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(state: Arc<AppState>, host: &str, port: u16) -> std::io::Result<()> {
        info!("Binding HTTP server to {}:{}", host, port);
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(web::Data::new(state.clone()))
                .configure(Self::configure)
        })
        .bind((host, port))?
        .run()
        .await
    }

    /// Register all routes; shared by the server and the handler tests
    pub fn configure(cfg: &mut web::ServiceConfig) {
        cfg.route("/health", web::get().to(health))
            .route("/api/puzzle", web::get().to(get_puzzle))
            .route("/api/puzzle/answer", web::post().to(answer_puzzle))
            .route("/api/scores", web::get().to(list_scores))
            .route("/api/scores", web::post().to(save_score))
            .route("/api/words/count", web::get().to(word_count));
    }
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

async fn get_puzzle(state: web::Data<Arc<AppState>>) -> ApiResult {
    let response = state.puzzles.next_puzzle()?;
    Ok(HttpResponse::Ok().json(response))
}

async fn answer_puzzle(req: web::Json<AnswerRequest>) -> ApiResult {
    let feedback = check_answer(&req.puzzle, &req.selected)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;
    Ok(HttpResponse::Ok().json(feedback))
}

async fn list_scores(
    state: web::Data<Arc<AppState>>,
    query: web::Query<ScoresQuery>,
) -> ApiResult {
    let high_scores = state.storage.high_scores();
    let scores = match query.limit {
        Some(limit) => high_scores.top(limit)?,
        None => high_scores.list()?,
    };
    Ok(HttpResponse::Ok().json(scores))
}

async fn save_score(
    state: web::Data<Arc<AppState>>,
    req: web::Json<SaveScoreRequest>,
) -> ApiResult {
    let saved = state.storage.high_scores().save(req.score, &req.name)?;
    info!("Saved high score {} for {}", saved.score, saved.name);
    Ok(HttpResponse::Created().json(saved))
}

async fn word_count(state: web::Data<Arc<AppState>>) -> ApiResult {
    let count = state.puzzles.word_count()?;
    Ok(HttpResponse::Ok().json(WordCountResponse {
        model_id: state.puzzles.model_id().to_string(),
        count,
    }))
}
