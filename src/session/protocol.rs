//! Wire types for the realtime channel and the query service.
//!
//! The channel event set is closed: one enum variant per event, matched
//! exhaustively by the session client. Event names are kebab-case under a
//! `"type"` tag, field names camelCase, mirroring what the coordination
//! service emits.

use serde::{Deserialize, Serialize};

use super::board::{Board, Seat, Terminal};

/// Inbound channel events (service -> client).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerEvent {
    /// A match has been created and both players assigned seats.
    #[serde(rename_all = "camelCase")]
    MatchStarted {
        match_id: String,
        opponent_name: String,
        local_player_is_first: bool,
        active_player: Seat,
    },

    /// Authoritative post-move state. The service computed the outcome;
    /// the client only mirrors it.
    #[serde(rename_all = "camelCase")]
    MoveApplied {
        board: Board,
        active_player: Seat,
        terminal: Terminal,
    },

    /// The opponent dropped and the service awarded the match.
    OpponentDisconnected { winner: Seat },

    /// Full state of an in-flight match recovered after reconnection.
    #[serde(rename_all = "camelCase")]
    MatchResumed {
        match_id: String,
        opponent_name: String,
        active_player: Seat,
        board: Board,
        local_player_is_first: bool,
    },

    /// Service-reported error, surfaced verbatim to the user.
    ProtocolError { message: String },
}

/// Outbound channel events (client -> service).
///
/// All fire-and-forget: the protocol has no acknowledgement for any of
/// these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientEvent {
    /// Enter the matchmaking queue under a display name.
    #[serde(rename_all = "camelCase")]
    Join { display_name: String },

    /// Drop a piece into a column of the identified match.
    #[serde(rename_all = "camelCase")]
    SubmitMove { match_id: String, column: usize },

    /// Ask the service to recover an in-flight match for this name.
    #[serde(rename_all = "camelCase")]
    Resume { display_name: String },
}

/// One row of the leaderboard (`GET /leaderboard`), also the shape of a
/// single player's stats (`GET /leaderboard/player/{username}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub username: String,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub total_games: u32,
    pub win_percentage: f64,
}

/// Response body of `GET /leaderboard`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardResponse {
    pub success: bool,
    #[serde(default)]
    pub leaderboard: Vec<LeaderboardEntry>,
}

/// Response body of `GET /leaderboard/player/{username}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStatsResponse {
    pub success: bool,
    #[serde(default)]
    pub player: Option<LeaderboardEntry>,
}
