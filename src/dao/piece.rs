use sqlx::any::AnyConnection;

use crate::dao::DaoResult;
use crate::database::Database;
use crate::models::piece::{Piece, PieceRecord, RoomNumber};

const INSERT_PIECE: &str =
    "INSERT INTO piece (player, piece_type, x_position, y_position, room_number) VALUES (?, ?, ?, ?, ?)";
const INSERT_PIECES_PREFIX: &str =
    "INSERT INTO piece (player, piece_type, x_position, y_position, room_number) VALUES ";
// SQLite's limit on bind parameters per statement, MySQL allows 65535
const MAX_BIND_PARAMS: usize = 32766;
const PARAMS_PER_PIECE: usize = 5;
const MAX_PIECES_PER_INSERT: usize = MAX_BIND_PARAMS / PARAMS_PER_PIECE;

const DELETE_ALL_PIECES: &str = "DELETE FROM piece WHERE room_number = ?";
const SELECT_PIECES: &str =
    "SELECT player, piece_type, x_position, y_position FROM piece WHERE room_number = ?";

/// Room-scoped persistence of chess pieces.
///
/// Holds nothing but the connection provider. Every operation takes its own
/// connection from the pool and hands it back when it returns, error or not.
#[derive(Clone, Debug)]
pub struct PieceDao {
    db: Database,
}

impl PieceDao {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Insert one row per piece, one statement at a time.
    ///
    /// Not transactional: if a piece fails, the pieces before it stay stored.
    pub async fn add_all_pieces(&self, room_number: RoomNumber, pieces: &[Piece]) -> DaoResult<()> {
        for piece in pieces {
            self.add_piece(room_number, piece).await?;
        }
        Ok(())
    }

    async fn add_piece(&self, room_number: RoomNumber, piece: &Piece) -> DaoResult<()> {
        let mut conn = self.db.connection().await?;
        insert_piece(&mut conn, room_number, piece).await
    }

    /// Same rows as [`PieceDao::add_all_pieces`], sent as multi-row inserts of
    /// up to `MAX_PIECES_PER_INSERT` pieces each.
    ///
    /// Like the sequential variant, chunks stored before a failing one stay stored.
    pub async fn add_all_pieces_batched(
        &self,
        room_number: RoomNumber,
        pieces: &[Piece],
    ) -> DaoResult<()> {
        for chunk in pieces.chunks(MAX_PIECES_PER_INSERT) {
            self.add_pieces_chunk(room_number, chunk).await?;
        }
        Ok(())
    }

    async fn add_pieces_chunk(&self, room_number: RoomNumber, pieces: &[Piece]) -> DaoResult<()> {
        let sql = format!(
            "{}{}",
            INSERT_PIECES_PREFIX,
            vec!["(?, ?, ?, ?, ?)"; pieces.len()].join(", ")
        );
        let mut query = sqlx::query(&sql);
        for piece in pieces {
            query = query
                .bind(piece.player_name())
                .bind(piece.piece_type_name())
                .bind(piece.x())
                .bind(piece.y())
                .bind(room_number);
        }

        let mut conn = self.db.connection().await?;
        query.execute(&mut *conn).await?;
        Ok(())
    }

    /// Remove every piece of the room. Returns how many rows went away.
    pub async fn delete_all_pieces(&self, room_number: RoomNumber) -> DaoResult<u64> {
        let mut conn = self.db.connection().await?;
        let result = sqlx::query(DELETE_ALL_PIECES)
            .bind(room_number)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected())
    }

    /// All pieces stored for the room, in whatever order the database returns them.
    ///
    /// A row with an unknown player or piece type, or with coordinates off the
    /// board, fails the whole call.
    pub async fn get_chess_pieces(&self, room_number: RoomNumber) -> DaoResult<Vec<Piece>> {
        let mut conn = self.db.connection().await?;
        let records: Vec<PieceRecord> = sqlx::query_as(SELECT_PIECES)
            .bind(room_number)
            .fetch_all(&mut *conn)
            .await?;

        let pieces = records
            .into_iter()
            .map(Piece::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(pieces)
    }

    /// Delete the room's pieces and store `pieces` instead, inside one transaction.
    pub async fn replace_all_pieces(
        &self,
        room_number: RoomNumber,
        pieces: &[Piece],
    ) -> DaoResult<()> {
        // dropping the transaction before commit rolls it back
        let mut tx = self.db.begin().await?;

        sqlx::query(DELETE_ALL_PIECES)
            .bind(room_number)
            .execute(&mut *tx)
            .await?;
        for piece in pieces {
            insert_piece(&mut tx, room_number, piece).await?;
        }

        tx.commit().await?;
        Ok(())
    }
}

async fn insert_piece(
    conn: &mut AnyConnection,
    room_number: RoomNumber,
    piece: &Piece,
) -> DaoResult<()> {
    sqlx::query(INSERT_PIECE)
        .bind(piece.player_name())
        .bind(piece.piece_type_name())
        .bind(piece.x())
        .bind(piece.y())
        .bind(room_number)
        .execute(conn)
        .await?;
    Ok(())
}
