//! Session state store.
//!
//! Single source of truth for the client: local identity, connection
//! status, the mirrored match snapshot, and the last service-reported
//! error. All mutators are synchronous and total; invalid input is
//! rejected by callers (the action gate, the login path) before it gets
//! here.

use super::board::{Board, MatchSnapshot, Seat, Terminal};

/// Maximum display name length after trimming.
pub const MAX_NAME_LEN: usize = 20;

/// Channel connection status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    /// No channel.
    #[default]
    Disconnected,

    /// Channel connect requested, not yet established.
    Connecting,

    /// Channel established.
    Connected,
}

impl ConnectionStatus {
    /// Check if the channel is established.
    pub fn is_connected(self) -> bool {
        matches!(self, Self::Connected)
    }
}

/// Local identity: the display name this client joined under.
///
/// Immutable once set; destroyed only by [`SessionStore::reset`].
#[derive(Debug, Clone, PartialEq)]
pub struct SessionIdentity {
    display_name: String,
    joined_at: chrono::DateTime<chrono::Utc>,
}

impl SessionIdentity {
    /// Validate and create an identity from raw user input.
    ///
    /// The name is trimmed; it must be 1 to [`MAX_NAME_LEN`] characters
    /// afterwards.
    pub fn new(raw_name: &str) -> Result<Self, NameError> {
        let trimmed = raw_name.trim();
        if trimmed.is_empty() {
            return Err(NameError::Empty);
        }
        let len = trimmed.chars().count();
        if len > MAX_NAME_LEN {
            return Err(NameError::TooLong { len });
        }
        Ok(Self {
            display_name: trimmed.to_string(),
            joined_at: chrono::Utc::now(),
        })
    }

    /// The trimmed display name.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// When this identity was created.
    pub fn joined_at(&self) -> chrono::DateTime<chrono::Utc> {
        self.joined_at
    }
}

/// Display name validation errors. User-visible at the login form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameError {
    /// Empty or whitespace-only.
    Empty,
    /// Longer than [`MAX_NAME_LEN`] characters after trimming.
    TooLong { len: usize },
}

impl std::fmt::Display for NameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "Please enter a display name"),
            Self::TooLong { len } => write!(
                f,
                "Display name too long ({} characters, maximum {})",
                len, MAX_NAME_LEN
            ),
        }
    }
}

impl std::error::Error for NameError {}

/// Store errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A match-scoped update arrived with no live snapshot to apply it to.
    NoActiveMatch,
    /// An identity is already set under a different name.
    IdentityAlreadySet,
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoActiveMatch => write!(f, "No active match"),
            Self::IdentityAlreadySet => write!(f, "Identity already set"),
        }
    }
}

impl std::error::Error for StoreError {}

/// The session state store.
///
/// Owns the identity and the match snapshot exclusively; other components
/// read through accessors and never retain copies beyond what they were
/// just handed for rendering. Constructed at application start, torn down
/// on shutdown — never ambient global state.
#[derive(Debug, Default)]
pub struct SessionStore {
    identity: Option<SessionIdentity>,
    connection: ConnectionStatus,
    snapshot: Option<MatchSnapshot>,
    last_error: Option<String>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ----- identity -----

    /// Set the identity. Idempotent for the same display name; rejected if
    /// a different identity is already live.
    pub fn set_identity(&mut self, identity: SessionIdentity) -> Result<(), StoreError> {
        match &self.identity {
            Some(existing) if existing.display_name() != identity.display_name() => {
                Err(StoreError::IdentityAlreadySet)
            }
            Some(_) => Ok(()),
            None => {
                self.identity = Some(identity);
                Ok(())
            }
        }
    }

    pub fn identity(&self) -> Option<&SessionIdentity> {
        self.identity.as_ref()
    }

    /// The live display name, if logged in.
    pub fn display_name(&self) -> Option<&str> {
        self.identity.as_ref().map(SessionIdentity::display_name)
    }

    // ----- connection -----

    pub fn connection(&self) -> ConnectionStatus {
        self.connection
    }

    pub fn set_connection(&mut self, status: ConnectionStatus) {
        self.connection = status;
    }

    // ----- match snapshot -----

    pub fn snapshot(&self) -> Option<&MatchSnapshot> {
        self.snapshot.as_ref()
    }

    /// The live match ID, if a match is mirrored.
    pub fn match_id(&self) -> Option<&str> {
        self.snapshot.as_ref().map(|s| s.match_id.as_str())
    }

    /// Check that a match is mirrored and still ongoing.
    pub fn has_live_match(&self) -> bool {
        self.snapshot
            .as_ref()
            .is_some_and(|s| s.terminal.is_ongoing())
    }

    /// Replace the snapshot with a fresh empty-board one for a new match.
    pub fn apply_match_started(
        &mut self,
        match_id: String,
        opponent_name: String,
        local_player_is_first: bool,
        active_player: Seat,
    ) {
        self.snapshot = Some(MatchSnapshot::new(
            match_id,
            opponent_name,
            local_player_is_first,
            active_player,
        ));
    }

    /// Replace board, active player, and terminal status as one unit.
    pub fn apply_move_applied(
        &mut self,
        board: Board,
        active_player: Seat,
        terminal: Terminal,
    ) -> Result<(), StoreError> {
        let snapshot = self.snapshot.as_mut().ok_or(StoreError::NoActiveMatch)?;
        snapshot.apply_update(board, active_player, terminal);
        Ok(())
    }

    /// The service awarded the match after the opponent dropped. Board is
    /// left exactly as it was.
    pub fn apply_opponent_disconnected(&mut self, winner: Seat) -> Result<(), StoreError> {
        let snapshot = self.snapshot.as_mut().ok_or(StoreError::NoActiveMatch)?;
        snapshot.terminal = Terminal::WonBy(winner);
        Ok(())
    }

    /// Replace the snapshot wholesale with recovered in-flight match state.
    pub fn apply_match_resumed(
        &mut self,
        match_id: String,
        opponent_name: String,
        active_player: Seat,
        board: Board,
        local_player_is_first: bool,
    ) {
        self.snapshot = Some(MatchSnapshot::resumed(
            match_id,
            opponent_name,
            active_player,
            board,
            local_player_is_first,
        ));
    }

    /// Discard the snapshot without touching the identity (explicit
    /// logout from a finished match).
    pub fn clear_match(&mut self) -> Option<MatchSnapshot> {
        self.snapshot.take()
    }

    // ----- errors -----

    /// Record a service-reported error for display.
    pub fn apply_protocol_error(&mut self, message: String) {
        self.last_error = Some(message);
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    // ----- reset -----

    /// Clear identity, snapshot, and error. Connection status is the
    /// transport's business and is left alone.
    pub fn reset(&mut self) {
        self.identity = None;
        self.snapshot = None;
        self.last_error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::board::{empty_board, BOARD_ROWS};

    #[test]
    fn test_name_validation() {
        assert!(SessionIdentity::new("alice").is_ok());
        assert_eq!(
            SessionIdentity::new("  alice  ").unwrap().display_name(),
            "alice"
        );
        assert_eq!(SessionIdentity::new(""), Err(NameError::Empty));
        assert_eq!(SessionIdentity::new("   "), Err(NameError::Empty));
        assert_eq!(
            SessionIdentity::new(&"x".repeat(21)),
            Err(NameError::TooLong { len: 21 })
        );
        assert!(SessionIdentity::new(&"x".repeat(20)).is_ok());
    }

    #[test]
    fn test_identity_immutable_once_set() {
        let mut store = SessionStore::new();
        store
            .set_identity(SessionIdentity::new("alice").unwrap())
            .unwrap();

        // Same name is idempotent.
        assert!(store
            .set_identity(SessionIdentity::new("alice").unwrap())
            .is_ok());

        // A different name is rejected.
        assert_eq!(
            store.set_identity(SessionIdentity::new("mallory").unwrap()),
            Err(StoreError::IdentityAlreadySet)
        );
        assert_eq!(store.display_name(), Some("alice"));
    }

    #[test]
    fn test_match_started_replaces_snapshot() {
        let mut store = SessionStore::new();
        store.apply_match_started("g1".to_string(), "bob".to_string(), true, Seat::One);

        assert_eq!(store.match_id(), Some("g1"));
        assert!(store.has_live_match());
        assert_eq!(store.snapshot().unwrap().board, empty_board());

        // A second match-start replaces the snapshot wholesale.
        store.apply_match_started("g2".to_string(), "carol".to_string(), false, Seat::Two);
        assert_eq!(store.match_id(), Some("g2"));
        assert_eq!(store.snapshot().unwrap().opponent_name, "carol");
    }

    #[test]
    fn test_opponent_disconnected_keeps_board() {
        let mut store = SessionStore::new();
        store.apply_match_started("g1".to_string(), "bob".to_string(), true, Seat::One);

        let mut board = empty_board();
        board[BOARD_ROWS - 1][0] = Some(Seat::One);
        store
            .apply_move_applied(board, Seat::Two, Terminal::Ongoing)
            .unwrap();

        store.apply_opponent_disconnected(Seat::One).unwrap();

        let snapshot = store.snapshot().unwrap();
        assert_eq!(snapshot.terminal, Terminal::WonBy(Seat::One));
        assert_eq!(snapshot.board[BOARD_ROWS - 1][0], Some(Seat::One));
        assert!(!store.has_live_match());
    }

    #[test]
    fn test_match_scoped_updates_need_a_match() {
        let mut store = SessionStore::new();
        assert_eq!(
            store.apply_move_applied(empty_board(), Seat::One, Terminal::Ongoing),
            Err(StoreError::NoActiveMatch)
        );
        assert_eq!(
            store.apply_opponent_disconnected(Seat::One),
            Err(StoreError::NoActiveMatch)
        );
    }

    #[test]
    fn test_reset_clears_session_not_connection() {
        let mut store = SessionStore::new();
        store
            .set_identity(SessionIdentity::new("alice").unwrap())
            .unwrap();
        store.set_connection(ConnectionStatus::Connected);
        store.apply_match_started("g1".to_string(), "bob".to_string(), true, Seat::One);
        store.apply_protocol_error("boom".to_string());

        store.reset();

        assert!(store.identity().is_none());
        assert!(store.snapshot().is_none());
        assert!(store.last_error().is_none());
        assert_eq!(store.connection(), ConnectionStatus::Connected);
    }

    #[test]
    fn test_clear_match_keeps_identity() {
        let mut store = SessionStore::new();
        store
            .set_identity(SessionIdentity::new("alice").unwrap())
            .unwrap();
        store.apply_match_started("g1".to_string(), "bob".to_string(), true, Seat::One);

        let taken = store.clear_match();
        assert!(taken.is_some());
        assert!(store.snapshot().is_none());
        assert_eq!(store.display_name(), Some("alice"));
    }
}
