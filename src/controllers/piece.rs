use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use log::info;
use serde::Deserialize;

use crate::errors::CustomError;
use crate::models::piece::{Piece, RoomNumber};
use crate::AppState;

// Query options for adding pieces, `?batched=true` sends the rows as multi-row inserts
#[derive(Deserialize, Debug, Default)]
pub struct AddOptions {
    #[serde(default)]
    batched: bool,
}

fn piece_count(count: usize) -> String {
    if count == 1 {
        "1 piece".to_string()
    } else {
        format!("{} pieces", count)
    }
}

//handler for loading all pieces of a room
pub async fn get_pieces(    Path(room_number): Path<RoomNumber>,
                            State(state): State<AppState>,
                            ) -> Result<Json<Vec<Piece>>, CustomError> {

    info!("get pieces request for room {}", room_number);

    let pieces = state.pieces.get_chess_pieces(room_number).await?;
    Ok(Json(pieces))
}

// Handler for saving pieces into a room. Pieces already in the room are kept,
// the new ones are added next to them
pub async fn add_pieces(    Path(room_number): Path<RoomNumber>,
                            Query(options): Query<AddOptions>,
                            State(state): State<AppState>,
                            Json(pieces): Json<Vec<Piece>>,
                            ) -> Result<(StatusCode, String), CustomError> {

    info!("add {} pieces request for room {}", pieces.len(), room_number);

    if options.batched {
        state.pieces.add_all_pieces_batched(room_number, &pieces).await?;
    } else {
        state.pieces.add_all_pieces(room_number, &pieces).await?;
    }
    Ok((StatusCode::CREATED, format!("{} added", piece_count(pieces.len()))))
}

// Handler for replacing the whole board of a room in one go
pub async fn replace_pieces(    Path(room_number): Path<RoomNumber>,
                                State(state): State<AppState>,
                                Json(pieces): Json<Vec<Piece>>,
                                ) -> Result<(StatusCode, String), CustomError> {

    info!("replace pieces request for room {}", room_number);

    state.pieces.replace_all_pieces(room_number, &pieces).await?;
    Ok((StatusCode::OK, "Pieces replaced".to_string()))
}

//handler for clearing a room
pub async fn delete_pieces( Path(room_number): Path<RoomNumber>,
                            State(state): State<AppState>,
                            ) -> Result<(StatusCode, String), CustomError> {

    info!("delete pieces request for room {}", room_number);

    let removed = state.pieces.delete_all_pieces(room_number).await?;
    Ok((StatusCode::OK, format!("{} removed", piece_count(removed as usize))))
}

// Handler for starting a fresh game in a room: the standard layout replaces whatever is stored
pub async fn reset_room(    Path(room_number): Path<RoomNumber>,
                            State(state): State<AppState>,
                            ) -> Result<(StatusCode, String), CustomError> {

    info!("reset request for room {}", room_number);

    state.pieces.replace_all_pieces(room_number, &Piece::initial_layout()).await?;
    Ok((StatusCode::OK, "Room reset to the starting position".to_string()))
}
