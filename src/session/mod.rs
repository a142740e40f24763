//! Session module for the Fourline client.
//!
//! This module provides the core state types and the client aggregate:
//!
//! - `board` - Seats, the 6x7 board, terminal status, match snapshots
//! - `store` - Session state store (identity, connection, snapshot, error)
//! - `gate` - Move validation ahead of the transport
//! - `reconnect` - Login/resume lifecycle across channel drops
//! - `navigator` - Screen navigation state machine
//! - `protocol` - Typed channel events and query response bodies
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        SessionClient                          │
//! │                                                               │
//! │   inbound ServerEvent ──▶ SessionStore ──▶ ViewMode           │
//! │                               ▲   │                           │
//! │   channel connected ──▶ ReconnectController ──▶ resume event  │
//! │                               │   │                           │
//! │   submit_move(col) ──▶ gate ──┘   └──▶ renderer reads         │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Inbound channel events mutate the store; store transitions drive the
//! navigator; user moves pass through the gate before anything reaches the
//! transport; a channel (re)connection asks the reconnect controller, which
//! reads the *live* store, whether to emit a resume. The transport binding
//! itself lives outside this crate: it calls these methods and sends
//! whatever [`ClientEvent`]s they return.

pub mod board;
pub mod gate;
pub mod navigator;
pub mod protocol;
pub mod reconnect;
pub mod store;

// Re-export commonly used types
pub use board::{
    empty_board, Board, Cell, InvalidSeat, MatchSnapshot, Seat, Terminal, BOARD_COLS, BOARD_ROWS,
};
pub use gate::{gate_move, MoveRejected};
pub use navigator::{transition, NavTrigger, ViewMode};
pub use protocol::{
    ClientEvent, LeaderboardEntry, LeaderboardResponse, PlayerStatsResponse, ServerEvent,
};
pub use reconnect::{ReconnectController, ResumePhase};
pub use store::{
    ConnectionStatus, NameError, SessionIdentity, SessionStore, StoreError, MAX_NAME_LEN,
};

use log::{debug, warn};

/// Login failures. User-visible at the login form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginError {
    /// The display name failed validation.
    InvalidName(NameError),
    /// Already logged in under a different name; reset first.
    AlreadyLoggedIn,
}

impl std::fmt::Display for LoginError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName(err) => err.fmt(f),
            Self::AlreadyLoggedIn => write!(f, "Already logged in; reset the session first"),
        }
    }
}

impl std::error::Error for LoginError {}

impl From<NameError> for LoginError {
    fn from(err: NameError) -> Self {
        Self::InvalidName(err)
    }
}

/// The client aggregate: one owned object wiring the store, the gate, the
/// reconnect controller, and the navigator together.
///
/// Constructed at application start and torn down on shutdown. All methods
/// take `&mut self` and are called from the single event loop, so no two
/// mutations ever race; snapshot updates are whole-object replacements, so
/// a renderer reading between calls never sees a half-updated match.
#[derive(Debug, Default)]
pub struct SessionClient {
    store: SessionStore,
    reconnect: ReconnectController,
    view: ViewMode,
    leaderboard: Vec<LeaderboardEntry>,
    player_stats: Option<LeaderboardEntry>,
}

impl SessionClient {
    pub fn new() -> Self {
        Self::default()
    }

    // ----- reads for the render layer -----

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    pub fn resume_phase(&self) -> ResumePhase {
        self.reconnect.phase()
    }

    pub fn leaderboard(&self) -> &[LeaderboardEntry] {
        &self.leaderboard
    }

    pub fn player_stats(&self) -> Option<&LeaderboardEntry> {
        self.player_stats.as_ref()
    }

    // ----- user actions -----

    /// Submit the login form.
    ///
    /// Validates the display name, sets the identity, and returns the
    /// `join` event to send once the channel is up. Submitting again with
    /// the same name just re-emits `join`.
    pub fn login(&mut self, raw_name: &str) -> Result<ClientEvent, LoginError> {
        let identity = SessionIdentity::new(raw_name)?;
        let display_name = identity.display_name().to_string();

        self.store
            .set_identity(identity)
            .map_err(|_| LoginError::AlreadyLoggedIn)?;
        self.store.clear_error();
        if self.store.connection() == ConnectionStatus::Disconnected {
            self.store.set_connection(ConnectionStatus::Connecting);
        }
        self.reconnect.on_login();

        Ok(ClientEvent::Join { display_name })
    }

    /// Request a move. Returns the `submit-move` event to forward, or
    /// `None` when the gate dropped it (not user-visible).
    pub fn submit_move(&mut self, column: usize) -> Option<ClientEvent> {
        match gate_move(&self.store, column) {
            Ok(event) => Some(event),
            Err(rejection) => {
                debug!("move request dropped: {rejection}");
                None
            }
        }
    }

    /// Back from the leaderboard or stats screen. Leaves identity and any
    /// mirrored match untouched.
    pub fn back(&mut self) {
        self.view = transition(self.view, NavTrigger::Back);
    }

    /// Leave a (typically finished) match without dropping the identity.
    pub fn logout(&mut self) {
        self.store.clear_match();
        self.view = transition(self.view, NavTrigger::Reset);
    }

    /// Explicit full reset: identity, snapshot, and error are cleared and
    /// the view returns to login. Connection status is left to the
    /// transport.
    pub fn reset(&mut self) {
        self.store.reset();
        self.reconnect.reset();
        self.player_stats = None;
        self.view = transition(self.view, NavTrigger::Reset);
    }

    // ----- transport notifications -----

    /// The channel came up (first connect or any later reconnect).
    /// Returns a `resume` event when an in-flight match should be
    /// recovered.
    pub fn channel_connected(&mut self) -> Option<ClientEvent> {
        self.store.set_connection(ConnectionStatus::Connected);
        self.reconnect.on_channel_connected(&self.store)
    }

    /// The channel dropped. Nothing user-visible happens unless a later
    /// resumption fails, which the service reports as a protocol error.
    pub fn channel_disconnected(&mut self) {
        self.store.set_connection(ConnectionStatus::Disconnected);
    }

    /// Apply one inbound channel event. One arm per variant; adding an
    /// event to the protocol forces an arm here.
    pub fn handle_server_event(&mut self, event: ServerEvent) {
        match event {
            ServerEvent::MatchStarted {
                match_id,
                opponent_name,
                local_player_is_first,
                active_player,
            } => {
                self.store.apply_match_started(
                    match_id,
                    opponent_name,
                    local_player_is_first,
                    active_player,
                );
                self.view = transition(self.view, NavTrigger::MatchStarted);
            }

            ServerEvent::MoveApplied {
                board,
                active_player,
                terminal,
            } => {
                if let Err(err) = self.store.apply_move_applied(board, active_player, terminal) {
                    // Update for a match we no longer mirror, e.g. queued
                    // across a reset.
                    warn!("dropped move update: {err}");
                    return;
                }
                self.view = transition(self.view, NavTrigger::MatchUpdated);
            }

            ServerEvent::OpponentDisconnected { winner } => {
                if let Err(err) = self.store.apply_opponent_disconnected(winner) {
                    warn!("dropped opponent-disconnected: {err}");
                    return;
                }
                self.view = transition(self.view, NavTrigger::MatchUpdated);
            }

            ServerEvent::MatchResumed {
                match_id,
                opponent_name,
                active_player,
                board,
                local_player_is_first,
            } => {
                self.store.apply_match_resumed(
                    match_id,
                    opponent_name,
                    active_player,
                    board,
                    local_player_is_first,
                );
                self.reconnect.on_match_resumed();
                self.view = transition(self.view, NavTrigger::MatchStarted);
            }

            ServerEvent::ProtocolError { message } => {
                warn!("service error: {message}");
                self.store.apply_protocol_error(message);
                self.view = transition(self.view, NavTrigger::ProtocolError);
            }
        }
    }

    // ----- query responses -----

    /// Apply a leaderboard query response. On success the rows are stored
    /// and the view navigates; on failure everything stays as it was.
    pub fn apply_leaderboard(&mut self, response: LeaderboardResponse) {
        if !response.success {
            warn!("leaderboard query failed");
            self.view = transition(self.view, NavTrigger::QueryFailed);
            return;
        }
        self.leaderboard = response.leaderboard;
        self.view = transition(self.view, NavTrigger::LeaderboardLoaded);
    }

    /// Apply a player stats query response. Same contract as
    /// [`Self::apply_leaderboard`].
    pub fn apply_player_stats(&mut self, response: PlayerStatsResponse) {
        let Some(player) = response.player.filter(|_| response.success) else {
            warn!("player stats query failed");
            self.view = transition(self.view, NavTrigger::QueryFailed);
            return;
        };
        self.player_stats = Some(player);
        self.view = transition(self.view, NavTrigger::StatsLoaded);
    }
}
