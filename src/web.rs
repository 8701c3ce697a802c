use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::board::{BOARD_SIZE, Color, Piece, Position};
use crate::events::{GameEvent, Tone};
use crate::game::Game;

#[derive(Clone)]
pub struct AppState {
    game: Arc<Mutex<Game>>,
}

impl AppState {
    pub fn new() -> Self {
        AppState {
            game: Arc::new(Mutex::new(Game::new())),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize, Deserialize)]
pub struct SelectRequest {
    row: usize,
    col: usize,
}

#[derive(Serialize, Clone)]
pub struct CellResponse {
    row: usize,
    col: usize,
}

/// One event raised by a request, paired with the tones the client should
/// play for it.
#[derive(Serialize)]
pub struct EventResponse {
    event: GameEvent,
    cue: Vec<Tone>,
}

#[derive(Serialize)]
pub struct GameResponse {
    board: Vec<Vec<String>>,
    current_player: String,
    selected: Option<CellResponse>,
    highlights: Vec<CellResponse>,
    events: Vec<EventResponse>,
    game_over: bool,
    winner: Option<String>,
    message: String,
}

fn cell_to_string(cell: Option<Piece>) -> String {
    match cell {
        None => ".".to_string(),
        Some(piece) => piece.glyph().to_string(),
    }
}

fn player_to_string(color: Color) -> String {
    match color {
        Color::Black => "Black".to_string(),
        Color::Red => "Red".to_string(),
    }
}

fn cell_response(pos: Position) -> CellResponse {
    CellResponse {
        row: pos.row,
        col: pos.col,
    }
}

fn status_message(game: &Game) -> String {
    if let Some(winner) = game.winner() {
        format!("{} wins!", player_to_string(winner))
    } else if game.must_continue_capture() {
        format!(
            "{} must continue capturing",
            player_to_string(game.current_player())
        )
    } else {
        format!("{} to move", player_to_string(game.current_player()))
    }
}

/// Full snapshot sent back after every request, with the events the
/// request itself produced.
fn build_response(game: &Game, events: Vec<GameEvent>) -> GameResponse {
    let mut board = vec![vec![String::new(); BOARD_SIZE]; BOARD_SIZE];
    for row in 0..BOARD_SIZE {
        for col in 0..BOARD_SIZE {
            board[row][col] = cell_to_string(game.board().piece_at(Position::new(row, col)));
        }
    }

    let events = events
        .into_iter()
        .map(|event| {
            let cue = event.sound_cue().to_vec();
            EventResponse { event, cue }
        })
        .collect();

    GameResponse {
        board,
        current_player: player_to_string(game.current_player()),
        selected: game.selected().map(cell_response),
        highlights: game
            .highlighted_cells()
            .into_iter()
            .map(cell_response)
            .collect(),
        events,
        game_over: game.is_over(),
        winner: game.winner().map(player_to_string),
        message: status_message(game),
    }
}

#[axum::debug_handler]
async fn new_game(State(app_state): State<AppState>) -> Json<GameResponse> {
    let mut game = app_state.game.lock().unwrap();
    *game = Game::new();
    tracing::info!("new game started, Black to move");
    Json(build_response(&game, Vec::new()))
}

#[axum::debug_handler]
async fn select(State(app_state): State<AppState>, Json(req): Json<SelectRequest>) -> Response {
    let mut game = app_state.game.lock().unwrap();

    if game.is_over() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "error": "Game is over"
            })),
        )
            .into_response();
    }

    match game.select_cell(req.row, req.col) {
        Ok(events) => {
            if let Some(GameEvent::GameOver { winner }) = events
                .iter()
                .find(|e| matches!(e, GameEvent::GameOver { .. }))
            {
                tracing::info!("game over, {} wins", player_to_string(*winner));
            }
            Json(build_response(&game, events)).into_response()
        }
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "error": format!("Invalid input: {}", e)
            })),
        )
            .into_response(),
    }
}

async fn get_game_state(State(app_state): State<AppState>) -> Json<GameResponse> {
    let game = app_state.game.lock().unwrap();
    Json(build_response(&game, Vec::new()))
}

pub async fn run_server() -> Result<(), Box<dyn std::error::Error>> {
    let app_state = AppState::new();

    let app = Router::new()
        .route("/api/new-game", post(new_game))
        .route("/api/select", post(select))
        .route("/api/game-state", get(get_game_state))
        .nest_service("/", ServeDir::new("static"))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
    println!("🌐 Checkers server running at http://127.0.0.1:3000");
    println!("   Open your browser and start playing!");

    axum::serve(listener, app).await?;
    Ok(())
}
