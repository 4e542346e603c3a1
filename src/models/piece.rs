use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const BOARD_SIZE: i32 = 8;

// Rooms are identified by the integer the game-room service hands out
pub type RoomNumber = i32;

/// Failures while turning raw values (stored rows, request bodies) into domain values.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("unrecognized {kind} value: {value:?}")]
    UnrecognizedEnum { kind: &'static str, value: String },
    #[error("position ({x}, {y}) is off the board")]
    OffBoard { x: i32, y: i32 },
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Player {
    White,
    Black,
}

impl Player {
    pub fn name(&self) -> &'static str {
        match self {
            Player::White => "WHITE",
            Player::Black => "BLACK",
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Player {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WHITE" => Ok(Player::White),
            "BLACK" => Ok(Player::Black),
            other => Err(ModelError::UnrecognizedEnum {
                kind: "player",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum PieceType {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl PieceType {
    pub fn name(&self) -> &'static str {
        match self {
            PieceType::King => "KING",
            PieceType::Queen => "QUEEN",
            PieceType::Rook => "ROOK",
            PieceType::Bishop => "BISHOP",
            PieceType::Knight => "KNIGHT",
            PieceType::Pawn => "PAWN",
        }
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PieceType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "KING" => Ok(PieceType::King),
            "QUEEN" => Ok(PieceType::Queen),
            "ROOK" => Ok(PieceType::Rook),
            "BISHOP" => Ok(PieceType::Bishop),
            "KNIGHT" => Ok(PieceType::Knight),
            "PAWN" => Ok(PieceType::Pawn),
            other => Err(ModelError::UnrecognizedEnum {
                kind: "piece type",
                value: other.to_string(),
            }),
        }
    }
}

// The struct used for receiving a position as json, validated into a Position
#[derive(Deserialize)]
struct RawPosition {
    x: i32,
    y: i32,
}

/// A square on the board. Columns and rows both run from 1 to 8.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(try_from = "RawPosition")]
pub struct Position {
    x: i32,
    y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Result<Self, ModelError> {
        let on_board = |c: i32| (1..=BOARD_SIZE).contains(&c);
        if on_board(x) && on_board(y) {
            Ok(Position { x, y })
        } else {
            Err(ModelError::OffBoard { x, y })
        }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }
}

impl TryFrom<RawPosition> for Position {
    type Error = ModelError;

    fn try_from(raw: RawPosition) -> Result<Self, Self::Error> {
        Position::new(raw.x, raw.y)
    }
}

// Algebraic notation, (3, 2) is c2
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + (self.x - 1) as u8) as char, self.y)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub player: Player,
    pub piece_type: PieceType,
    pub position: Position,
}

impl Piece {
    pub fn new(player: Player, piece_type: PieceType, position: Position) -> Self {
        Piece {
            player,
            piece_type,
            position,
        }
    }

    pub fn player_name(&self) -> &'static str {
        self.player.name()
    }

    pub fn piece_type_name(&self) -> &'static str {
        self.piece_type.name()
    }

    pub fn x(&self) -> i32 {
        self.position.x()
    }

    pub fn y(&self) -> i32 {
        self.position.y()
    }

    /// The 32 pieces of a fresh game, white on rows 1 and 2, black on rows 7 and 8.
    pub fn initial_layout() -> Vec<Piece> {
        const BACK_RANK: [PieceType; 8] = [
            PieceType::Rook,
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Queen,
            PieceType::King,
            PieceType::Bishop,
            PieceType::Knight,
            PieceType::Rook,
        ];

        let mut pieces = Vec::with_capacity(32);
        for (player, back_row, pawn_row) in [(Player::White, 1, 2), (Player::Black, 8, 7)] {
            for (column, piece_type) in (1..=BOARD_SIZE).zip(BACK_RANK) {
                pieces.push(Piece::new(player, piece_type, Position { x: column, y: back_row }));
                pieces.push(Piece::new(player, PieceType::Pawn, Position { x: column, y: pawn_row }));
            }
        }
        pieces
    }
}

// A row of the piece table, as selected for one room
#[derive(sqlx::FromRow, Debug)]
pub struct PieceRecord {
    pub player: String,
    pub piece_type: String,
    pub x_position: i32,
    pub y_position: i32,
}

impl TryFrom<PieceRecord> for Piece {
    type Error = ModelError;

    fn try_from(record: PieceRecord) -> Result<Self, Self::Error> {
        let player = record.player.parse::<Player>()?;
        let piece_type = record.piece_type.parse::<PieceType>()?;
        let position = Position::new(record.x_position, record.y_position)?;
        Ok(Piece::new(player, piece_type, position))
    }
}
