//! View navigation.
//!
//! One total transition function from (current view, trigger) to the next
//! view, unit-testable with no rendering anywhere near it. Every pair has a
//! defined successor; triggers a view does not care about leave it where it
//! is.

/// Which screen the client is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Login form plus menu.
    #[default]
    Login,
    /// Active (or just-finished) match.
    Match,
    /// Leaderboard table.
    Leaderboard,
    /// Single player's statistics.
    Stats,
}

impl ViewMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Match => "match",
            Self::Leaderboard => "leaderboard",
            Self::Stats => "stats",
        }
    }
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Navigation triggers: store transitions plus explicit user actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTrigger {
    /// A match started or was resumed.
    MatchStarted,
    /// Authoritative match update arrived, terminal-reaching or not.
    MatchUpdated,
    /// Leaderboard query succeeded.
    LeaderboardLoaded,
    /// Player stats query succeeded.
    StatsLoaded,
    /// Leaderboard or stats query failed.
    QueryFailed,
    /// User pressed back on a menu screen.
    Back,
    /// Explicit session reset.
    Reset,
    /// Service reported a protocol error.
    ProtocolError,
}

/// The transition function.
///
/// A starting or resumed match takes over from any view: a resumption
/// landing while the user is reading the leaderboard must win. A
/// terminal-reaching update keeps the match on screen; the user leaves it
/// explicitly.
pub fn transition(current: ViewMode, trigger: NavTrigger) -> ViewMode {
    use NavTrigger::*;
    use ViewMode::*;

    match (current, trigger) {
        (_, MatchStarted) => Match,
        (_, LeaderboardLoaded) => Leaderboard,
        (_, StatsLoaded) => Stats,
        (_, Reset) => Login,
        (Leaderboard | Stats, Back) => Login,
        (current, Back) => current,
        (current, MatchUpdated | QueryFailed | ProtocolError) => current,
    }
}
