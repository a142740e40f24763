//! Reconnection controller.
//!
//! Tracks where this client is in the login/resume lifecycle and decides,
//! when the transport reports a (re)connection, whether to ask the service
//! to recover an in-flight match.
//!
//! The controller holds *no* identifiers of its own. Everything it needs —
//! display name, live match id — is read out of the [`SessionStore`] at the
//! instant the connected notification fires. A controller that captured the
//! match id at construction would resume with a stale id after the match
//! state moved on; storing nothing makes that bug unrepresentable.
//!
//! # State Diagram
//!
//! ```text
//! ┌──────┐ login ┌─────────────────┐ connected + live ┌───────────┐
//! │ Idle │──────▶│ AwaitingChannel │─────────────────▶│ Rejoining │
//! └──────┘       └─────────────────┘   match in store └─────┬─────┘
//!     ▲                                                     │ match-resumed
//!     │                  reset (from any state)       ┌─────▼─────┐
//!     └───────────────────────────────────────────────│  Synced   │
//!                                                     └───────────┘
//! ```

use log::debug;

use super::protocol::ClientEvent;
use super::store::SessionStore;

/// Where the client is in the login/resume lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResumePhase {
    /// Not logged in.
    #[default]
    Idle,

    /// Identity set, waiting for the channel to come up.
    AwaitingChannel,

    /// Resume request sent, waiting for the match-resumed event.
    Rejoining,

    /// Resumed match state received and mirrored.
    Synced,
}

impl ResumePhase {
    /// Check if a resume request is in flight.
    pub fn is_rejoining(self) -> bool {
        matches!(self, Self::Rejoining)
    }
}

/// Reconnection controller. See module docs for the lifecycle.
#[derive(Debug, Default)]
pub struct ReconnectController {
    phase: ResumePhase,
}

impl ReconnectController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> ResumePhase {
        self.phase
    }

    /// Login submitted: identity is set and a channel connect has been
    /// requested.
    pub fn on_login(&mut self) {
        self.phase = ResumePhase::AwaitingChannel;
    }

    /// The transport reports the channel is up.
    ///
    /// Reads the store *now*: a resume is attempted iff the store currently
    /// holds both an identity and a snapshot with a match id. Returns the
    /// `resume` event to send, or `None` when there is nothing to recover.
    pub fn on_channel_connected(&mut self, store: &SessionStore) -> Option<ClientEvent> {
        if self.phase == ResumePhase::Idle {
            return None;
        }

        let display_name = store.display_name()?;
        let match_id = store.match_id()?;

        debug!("channel up, resuming match {match_id} as {display_name}");
        self.phase = ResumePhase::Rejoining;
        Some(ClientEvent::Resume {
            display_name: display_name.to_string(),
        })
    }

    /// The service delivered the recovered match state.
    pub fn on_match_resumed(&mut self) {
        if self.phase.is_rejoining() {
            self.phase = ResumePhase::Synced;
        }
    }

    /// Explicit session reset.
    pub fn reset(&mut self) {
        self.phase = ResumePhase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::board::Seat;
    use crate::session::store::SessionIdentity;

    fn logged_in_store(name: &str) -> SessionStore {
        let mut store = SessionStore::new();
        store
            .set_identity(SessionIdentity::new(name).unwrap())
            .unwrap();
        store
    }

    #[test]
    fn test_no_resume_while_idle() {
        let mut controller = ReconnectController::new();
        let mut store = logged_in_store("alice");
        store.apply_match_started("g1".to_string(), "bob".to_string(), true, Seat::One);

        // Controller never saw a login; a stray connect does nothing.
        assert_eq!(controller.on_channel_connected(&store), None);
        assert_eq!(controller.phase(), ResumePhase::Idle);
    }

    #[test]
    fn test_no_resume_without_live_match() {
        let mut controller = ReconnectController::new();
        controller.on_login();

        let store = logged_in_store("alice");
        assert_eq!(controller.on_channel_connected(&store), None);
        assert_eq!(controller.phase(), ResumePhase::AwaitingChannel);
    }

    #[test]
    fn test_resume_uses_store_at_connect_time() {
        let mut controller = ReconnectController::new();
        controller.on_login();

        // The store's match changes after the controller was registered.
        let mut store = logged_in_store("alice");
        store.apply_match_started("g1".to_string(), "bob".to_string(), true, Seat::One);
        store.apply_match_started("g2".to_string(), "carol".to_string(), false, Seat::Two);

        let event = controller.on_channel_connected(&store).unwrap();
        assert_eq!(
            event,
            ClientEvent::Resume {
                display_name: "alice".to_string(),
            }
        );
        // The decision was driven by the store's *current* match id.
        assert_eq!(store.match_id(), Some("g2"));
        assert_eq!(controller.phase(), ResumePhase::Rejoining);
    }

    #[test]
    fn test_no_resume_after_match_discarded() {
        let mut controller = ReconnectController::new();
        controller.on_login();

        let mut store = logged_in_store("alice");
        store.apply_match_started("g1".to_string(), "bob".to_string(), true, Seat::One);
        store.clear_match();

        // The match is gone; a controller that froze "g1" earlier would
        // wrongly resume here.
        assert_eq!(controller.on_channel_connected(&store), None);
        assert_eq!(controller.phase(), ResumePhase::AwaitingChannel);
    }

    #[test]
    fn test_full_resume_cycle() {
        let mut controller = ReconnectController::new();
        controller.on_login();

        let mut store = logged_in_store("alice");
        store.apply_match_started("g1".to_string(), "bob".to_string(), true, Seat::One);

        assert!(controller.on_channel_connected(&store).is_some());
        controller.on_match_resumed();
        assert_eq!(controller.phase(), ResumePhase::Synced);

        // A later drop and reconnect resumes again from the live store.
        assert!(controller.on_channel_connected(&store).is_some());
        assert_eq!(controller.phase(), ResumePhase::Rejoining);

        controller.reset();
        assert_eq!(controller.phase(), ResumePhase::Idle);
    }
}
