use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Response,
    },
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tokio::sync::mpsc;
use tokio_stream::{wrappers::ReceiverStream, Stream, StreamExt};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::client::RiotClient;
use crate::error::{FlattenError, RiotError};
use crate::flatten::flatten;
use crate::table::MatchTable;

const MAX_PAGE: u32 = 100;

#[derive(Clone)]
struct AppState {
    client: Arc<RiotClient>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PageParams {
    #[serde(default)]
    pub start: u32,
    #[serde(default = "default_count")]
    pub count: u32,
    /// Replace perk ids with catalog names.
    #[serde(default)]
    pub named: bool,
}

fn default_count() -> u32 {
    20
}

impl PageParams {
    fn count(&self) -> u32 {
        self.count.min(MAX_PAGE)
    }
}

#[derive(Debug, Deserialize)]
struct LadderParams {
    #[serde(default = "default_top")]
    top: usize,
}

fn default_top() -> usize {
    300
}

#[derive(Debug, Deserialize)]
struct NamedParam {
    #[serde(default)]
    named: bool,
}

pub fn router(client: Arc<RiotClient>) -> Router {
    Router::new()
        .route("/status", get(status_handler))
        .route("/account/by-puuid/{puuid}", get(account_handler))
        .route("/account/{game_name}/{tag_line}", get(lookup_handler))
        .route("/ladder", get(ladder_handler))
        .route("/matches/{puuid}", get(match_ids_handler))
        .route("/matches/{puuid}/rows", get(rows_handler))
        .route("/matches/{puuid}/rows.csv", get(rows_csv_handler))
        .route("/matches/{puuid}/stream", get(stream_handler))
        .route("/match/{match_id}/{puuid}", get(match_row_handler))
        .with_state(AppState { client })
        .layer(CorsLayer::permissive())
}

fn error_response(e: RiotError) -> Response {
    let status = match &e {
        RiotError::NotFound | RiotError::Flatten(FlattenError::PlayerNotFound { .. }) => {
            StatusCode::NOT_FOUND
        }
        RiotError::Flatten(_) => StatusCode::UNPROCESSABLE_ENTITY,
        RiotError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
        RiotError::MissingApiKey(_) | RiotError::InvalidApiKey | RiotError::Config(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        _ => StatusCode::BAD_GATEWAY,
    };
    if status.is_server_error() {
        warn!(error = %e, "Request failed");
    }
    (status, Json(json!({ "error": e.to_string() }))).into_response()
}

fn ok_json<T: serde::Serialize>(result: Result<T, RiotError>) -> Response {
    match result {
        Ok(data) => (StatusCode::OK, Json(data)).into_response(),
        Err(e) => error_response(e),
    }
}

async fn status_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    let hosts = state.client.hosts();
    Json(json!({
        "running": true,
        "regional_host": hosts.regional,
        "platform_host": hosts.platform,
    }))
}

async fn lookup_handler(
    State(state): State<AppState>,
    Path((game_name, tag_line)): Path<(String, String)>,
) -> Response {
    match state.client.puuid_by_riot_id(&game_name, &tag_line).await {
        Ok(puuid) => (StatusCode::OK, Json(json!({ "puuid": puuid }))).into_response(),
        Err(e) => error_response(e),
    }
}

async fn account_handler(State(state): State<AppState>, Path(puuid): Path<String>) -> Response {
    ok_json(state.client.account_by_puuid(&puuid).await)
}

async fn ladder_handler(State(state): State<AppState>, Query(params): Query<LadderParams>) -> Response {
    ok_json(state.client.ladder(params.top).await)
}

async fn match_ids_handler(
    State(state): State<AppState>,
    Path(puuid): Path<String>,
    Query(params): Query<PageParams>,
) -> Response {
    ok_json(state.client.match_ids(&puuid, params.start, params.count()).await)
}

async fn load_rows(client: &RiotClient, puuid: &str, params: &PageParams) -> Result<MatchTable, RiotError> {
    let mut table = client.match_table(puuid, params.start, params.count()).await?;
    if params.named {
        let (perks, styles) = client.perk_tables().await?;
        table.rename_perks(&perks, &styles);
    }
    Ok(table)
}

async fn rows_handler(
    State(state): State<AppState>,
    Path(puuid): Path<String>,
    Query(params): Query<PageParams>,
) -> Response {
    ok_json(load_rows(&state.client, &puuid, &params).await)
}

async fn rows_csv_handler(
    State(state): State<AppState>,
    Path(puuid): Path<String>,
    Query(params): Query<PageParams>,
) -> Response {
    let table = match load_rows(&state.client, &puuid, &params).await {
        Ok(table) => table,
        Err(e) => return error_response(e),
    };

    let mut body = Vec::new();
    match table.write_csv(&mut body) {
        Ok(()) => (StatusCode::OK, [(header::CONTENT_TYPE, "text/csv")], body).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

async fn match_row_handler(
    State(state): State<AppState>,
    Path((match_id, puuid)): Path<(String, String)>,
    Query(params): Query<NamedParam>,
) -> Response {
    let result = async {
        let record = state.client.match_by_id(&match_id).await?;
        let mut row = flatten(&record, &puuid)?;
        if params.named {
            let (perks, styles) = state.client.perk_tables().await?;
            row.rename_perks(&perks, &styles);
        }
        Ok::<_, RiotError>(row)
    }
    .await;
    ok_json(result)
}

/// Streams one `row` event per flattened match as soon as it is fetched,
/// `skipped` for matches that cannot be flattened, then `done`.
async fn stream_handler(
    State(state): State<AppState>,
    Path(puuid): Path<String>,
    Query(params): Query<PageParams>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let (tx, rx) = mpsc::channel(16);
    tokio::spawn(stream_rows(state.client.clone(), puuid, params, tx));
    Sse::new(ReceiverStream::new(rx).map(Ok)).keep_alive(KeepAlive::default())
}

async fn stream_rows(client: Arc<RiotClient>, puuid: String, params: PageParams, tx: mpsc::Sender<Event>) {
    if let Err(e) = send_rows(&client, &puuid, &params, &tx).await {
        warn!(puuid = %puuid, error = %e, "Row stream aborted");
        let _ = tx.send(Event::default().event("error").data(e.to_string())).await;
    }
    let _ = tx.send(Event::default().event("done").data("")).await;
}

async fn send_rows(
    client: &RiotClient,
    puuid: &str,
    params: &PageParams,
    tx: &mpsc::Sender<Event>,
) -> Result<(), RiotError> {
    let tables = if params.named {
        Some(client.perk_tables().await?)
    } else {
        None
    };

    let ids = client.match_ids(puuid, params.start, params.count()).await?;
    let mut sent = 0usize;
    for match_id in ids {
        let record = client.match_by_id(&match_id).await?;
        let event = match flatten(&record, puuid) {
            Ok(mut row) => {
                if let Some((perks, styles)) = &tables {
                    row.rename_perks(perks, styles);
                }
                sent += 1;
                Event::default().event("row").data(serde_json::to_string(&row)?)
            }
            Err(e) => Event::default()
                .event("skipped")
                .data(json!({ "match_id": match_id, "error": e.to_string() }).to_string()),
        };
        if tx.send(event).await.is_err() {
            info!(puuid, sent, "Row stream closed by client");
            return Ok(());
        }
    }
    info!(puuid, sent, "Row stream finished");
    Ok(())
}
