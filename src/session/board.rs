//! Match snapshot types.
//!
//! The board is a fixed 6x7 grid of cells; every other piece of match state
//! (whose turn it is, whether the match has ended) lives next to it in a
//! [`MatchSnapshot`] so the whole thing can be replaced as one unit.

use serde::{Deserialize, Serialize};

/// Board rows.
pub const BOARD_ROWS: usize = 6;

/// Board columns.
pub const BOARD_COLS: usize = 7;

/// Numeric player slot within a match, distinct from display name.
///
/// Serializes as a bare `1` or `2` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Seat {
    One,
    Two,
}

impl Seat {
    /// The wire number for this seat.
    pub fn number(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }

    /// The opposing seat.
    pub fn other(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }
}

impl TryFrom<u8> for Seat {
    type Error = InvalidSeat;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            other => Err(InvalidSeat(other)),
        }
    }
}

impl From<Seat> for u8 {
    fn from(seat: Seat) -> Self {
        seat.number()
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Error for a seat number outside {1, 2}.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidSeat(pub u8);

impl std::fmt::Display for InvalidSeat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invalid seat number {} (expected 1 or 2)", self.0)
    }
}

impl std::error::Error for InvalidSeat {}

/// One board cell: empty or occupied by a seat.
///
/// On the wire this is `null`, `1`, or `2`.
pub type Cell = Option<Seat>;

/// 6x7 game board, row-major with row 0 at the top.
pub type Board = [[Cell; BOARD_COLS]; BOARD_ROWS];

/// An all-empty board.
pub fn empty_board() -> Board {
    [[None; BOARD_COLS]; BOARD_ROWS]
}

/// Terminal status of a match.
///
/// A winner and a draw cannot coexist; the enum makes the combination
/// unrepresentable. Wire form: `"ongoing"`, `{"won-by": 1}`, `"draw"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Terminal {
    #[default]
    Ongoing,
    WonBy(Seat),
    Draw,
}

impl Terminal {
    /// Check if the match is still live (can receive moves).
    pub fn is_ongoing(self) -> bool {
        matches!(self, Self::Ongoing)
    }

    /// Check if the match has reached a terminal state.
    pub fn is_over(self) -> bool {
        !self.is_ongoing()
    }

    /// The winning seat, if any.
    pub fn winner(self) -> Option<Seat> {
        match self {
            Self::WonBy(seat) => Some(seat),
            _ => None,
        }
    }

    /// Check if the match ended in a draw.
    pub fn is_draw(self) -> bool {
        matches!(self, Self::Draw)
    }
}

/// The complete authoritative state of one match as last pushed by the
/// coordination service.
///
/// The client never derives any of these fields itself; it mirrors whatever
/// the service last emitted. A snapshot is created wholesale on match-start,
/// replaced wholesale on resume, and has its board/active_player/terminal
/// replaced as one unit on every move update.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchSnapshot {
    /// Unique match ID assigned by the service.
    pub match_id: String,

    /// Opponent's display name.
    pub opponent_name: String,

    /// Whether the local player holds seat 1.
    pub local_player_is_first: bool,

    /// Seat whose turn it is.
    pub active_player: Seat,

    /// Authoritative board.
    pub board: Board,

    /// Terminal status.
    pub terminal: Terminal,

    /// When this client first saw the match.
    pub started_at: chrono::DateTime<chrono::Utc>,
}

impl MatchSnapshot {
    /// Create a fresh snapshot for a just-started match: empty board,
    /// terminal ongoing.
    pub fn new(
        match_id: String,
        opponent_name: String,
        local_player_is_first: bool,
        active_player: Seat,
    ) -> Self {
        Self {
            match_id,
            opponent_name,
            local_player_is_first,
            active_player,
            board: empty_board(),
            terminal: Terminal::Ongoing,
            started_at: chrono::Utc::now(),
        }
    }

    /// Create a snapshot for a resumed match, carrying the board the
    /// service rendered for us.
    pub fn resumed(
        match_id: String,
        opponent_name: String,
        active_player: Seat,
        board: Board,
        local_player_is_first: bool,
    ) -> Self {
        Self {
            match_id,
            opponent_name,
            local_player_is_first,
            active_player,
            board,
            terminal: Terminal::Ongoing,
            started_at: chrono::Utc::now(),
        }
    }

    /// The local player's seat.
    pub fn local_seat(&self) -> Seat {
        if self.local_player_is_first {
            Seat::One
        } else {
            Seat::Two
        }
    }

    /// The opponent's seat.
    pub fn opponent_seat(&self) -> Seat {
        self.local_seat().other()
    }

    /// Check if it is the local player's turn.
    pub fn is_local_turn(&self) -> bool {
        self.terminal.is_ongoing() && self.active_player == self.local_seat()
    }

    /// Resolve a seat to a display name.
    ///
    /// Seats are never compared against names anywhere else; this is the
    /// single place a seat becomes text.
    pub fn seat_name<'a>(&'a self, seat: Seat, local_name: &'a str) -> &'a str {
        if seat == self.local_seat() {
            local_name
        } else {
            &self.opponent_name
        }
    }

    /// Replace board, active player, and terminal status as one unit.
    pub fn apply_update(&mut self, board: Board, active_player: Seat, terminal: Terminal) {
        self.board = board;
        self.active_player = active_player;
        self.terminal = terminal;
    }
}
