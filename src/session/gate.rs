//! Action gate.
//!
//! Validates a requested move against the store before it may be forwarded
//! to the transport. Legality beyond column range and match liveness (full
//! columns, whose turn it is) is the coordination service's job; the gate
//! never second-guesses it.

use super::board::BOARD_COLS;
use super::protocol::ClientEvent;
use super::store::SessionStore;

/// Why a move request was dropped. Never surfaced to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveRejected {
    /// No match is mirrored at all.
    NoActiveMatch,
    /// The mirrored match has reached a terminal state.
    MatchOver,
    /// Column outside 0..7.
    ColumnOutOfRange { column: usize },
}

impl std::fmt::Display for MoveRejected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoActiveMatch => write!(f, "No active match"),
            Self::MatchOver => write!(f, "Match is over"),
            Self::ColumnOutOfRange { column } => {
                write!(f, "Column {} out of range (0..{})", column, BOARD_COLS)
            }
        }
    }
}

impl std::error::Error for MoveRejected {}

/// Gate a move request.
///
/// Accepts iff the store holds a snapshot with terminal ongoing and the
/// column is in range, and returns the `submit-move` event to forward.
/// Takes the store by shared reference: a rejected move cannot have
/// mutated anything.
pub fn gate_move(store: &SessionStore, column: usize) -> Result<ClientEvent, MoveRejected> {
    let snapshot = store.snapshot().ok_or(MoveRejected::NoActiveMatch)?;
    if snapshot.terminal.is_over() {
        return Err(MoveRejected::MatchOver);
    }
    if column >= BOARD_COLS {
        return Err(MoveRejected::ColumnOutOfRange { column });
    }
    Ok(ClientEvent::SubmitMove {
        match_id: snapshot.match_id.clone(),
        column,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::board::{empty_board, Seat, Terminal};

    fn store_with_match() -> SessionStore {
        let mut store = SessionStore::new();
        store.apply_match_started("g1".to_string(), "bob".to_string(), true, Seat::One);
        store
    }

    #[test]
    fn test_accepts_in_range_move() {
        let store = store_with_match();
        let event = gate_move(&store, 3).unwrap();
        assert_eq!(
            event,
            ClientEvent::SubmitMove {
                match_id: "g1".to_string(),
                column: 3,
            }
        );
        // Boundary columns.
        assert!(gate_move(&store, 0).is_ok());
        assert!(gate_move(&store, 6).is_ok());
    }

    #[test]
    fn test_rejects_out_of_range() {
        let store = store_with_match();
        assert_eq!(
            gate_move(&store, 7),
            Err(MoveRejected::ColumnOutOfRange { column: 7 })
        );
        assert_eq!(
            gate_move(&store, usize::MAX),
            Err(MoveRejected::ColumnOutOfRange { column: usize::MAX })
        );
    }

    #[test]
    fn test_rejects_without_match() {
        let store = SessionStore::new();
        assert_eq!(gate_move(&store, 0), Err(MoveRejected::NoActiveMatch));
    }

    #[test]
    fn test_rejects_finished_match() {
        let mut store = store_with_match();
        store
            .apply_move_applied(empty_board(), Seat::One, Terminal::WonBy(Seat::Two))
            .unwrap();
        assert_eq!(gate_move(&store, 3), Err(MoveRejected::MatchOver));

        let mut store = store_with_match();
        store
            .apply_move_applied(empty_board(), Seat::One, Terminal::Draw)
            .unwrap();
        assert_eq!(gate_move(&store, 3), Err(MoveRejected::MatchOver));
    }

    #[test]
    fn test_rejection_does_not_mutate() {
        let mut store = store_with_match();
        store
            .apply_opponent_disconnected(Seat::One)
            .unwrap();
        let before = store.snapshot().cloned();

        let _ = gate_move(&store, 3);
        let _ = gate_move(&store, 99);

        assert_eq!(store.snapshot().cloned(), before);
    }
}
