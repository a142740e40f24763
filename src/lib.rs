//! Fourline Session Library
//!
//! This crate provides session and match state management for the Fourline
//! client.
//!
//! # Overview
//!
//! The session module provides:
//!
//! - **Session State Store** - The single source of truth for local
//!   identity, connection status, the mirrored match snapshot, and the last
//!   service-reported error.
//!
//! - **Reconnection Controller** - Login/resume lifecycle across channel
//!   drops; always resumes from the store's live identifiers, never from
//!   values captured earlier.
//!
//! - **Action Gate** - Validates move requests (range, match liveness)
//!   before they reach the transport.
//!
//! - **View Navigator** - A total transition function across the four
//!   screens (login, match, leaderboard, stats).
//!
//! - **Protocol Types** - Closed, serde-tagged enums for every channel
//!   event, matched exhaustively.
//!
//! # Design Principles
//!
//! 1. **The service is authoritative** - The client never computes a move's
//!    outcome; it mirrors whatever snapshot the service last emitted,
//!    replacing it wholesale.
//!
//! 2. **State machines validate transitions** - Navigation and the resume
//!    lifecycle are explicit enums with total transition functions.
//!
//! 3. **No networking** - This crate is pure state, no WebSocket or HTTP.
//!    The transport binding calls in with events and sends out whatever
//!    [`ClientEvent`]s come back.
//!
//! # Example
//!
//! ```rust
//! use fourline_session::{ClientEvent, Seat, ServerEvent, SessionClient, ViewMode};
//!
//! let mut client = SessionClient::new();
//!
//! // Login produces the join event for the transport to send.
//! let join = client.login("Alice").unwrap();
//! assert_eq!(join, ClientEvent::Join { display_name: "Alice".to_string() });
//!
//! client.channel_connected();
//! client.handle_server_event(ServerEvent::MatchStarted {
//!     match_id: "g1".to_string(),
//!     opponent_name: "Bob".to_string(),
//!     local_player_is_first: true,
//!     active_player: Seat::One,
//! });
//!
//! assert_eq!(client.view(), ViewMode::Match);
//! let submit = client.submit_move(3).unwrap();
//! assert_eq!(submit, ClientEvent::SubmitMove { match_id: "g1".to_string(), column: 3 });
//! ```

pub mod config;
pub mod session;

// Re-export everything from the session module at crate root
pub use session::*;
