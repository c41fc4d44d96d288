//! Runtime configuration for room access resolution.

use std::env;

use chrono::Duration;

/// Redirect targets, input limits and cookie lifetime.
///
/// The sentinel token and the delimiter are fixed by the room identifier
/// format and are not configurable; see [`room::SELF_SENTINEL`](crate::room::SELF_SENTINEL).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateConfig {
    /// Where unauthenticated requests are sent
    pub login_path: String,
    /// Where a user viewing their own profile through a room link is sent
    pub dashboard_path: String,
    /// Longest accepted participant token, in characters
    pub max_token_len: usize,
    /// Lifetime of preference cookies
    pub preference_max_age: Duration,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            login_path: "/login".to_string(),
            dashboard_path: "/dashboard".to_string(),
            max_token_len: 128,
            preference_max_age: Duration::days(30),
        }
    }
}

impl GateConfig {
    /// Loads configuration from the environment, using defaults for anything
    /// missing or unparsable.
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `ROOM_GATE_LOGIN_PATH` | `/login` |
    /// | `ROOM_GATE_DASHBOARD_PATH` | `/dashboard` |
    /// | `ROOM_GATE_MAX_TOKEN_LEN` | `128` |
    /// | `ROOM_GATE_PREFERENCE_MAX_AGE_DAYS` | `30` |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let login_path = lookup("ROOM_GATE_LOGIN_PATH")
            .filter(|p| p.starts_with('/'))
            .unwrap_or(defaults.login_path);

        let dashboard_path = lookup("ROOM_GATE_DASHBOARD_PATH")
            .filter(|p| p.starts_with('/'))
            .unwrap_or(defaults.dashboard_path);

        let max_token_len = lookup("ROOM_GATE_MAX_TOKEN_LEN")
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(defaults.max_token_len);

        let preference_max_age = lookup("ROOM_GATE_PREFERENCE_MAX_AGE_DAYS")
            .and_then(|v| v.parse::<i64>().ok())
            .filter(|d| *d > 0)
            .and_then(Duration::try_days)
            .unwrap_or(defaults.preference_max_age);

        Self {
            login_path,
            dashboard_path,
            max_token_len,
            preference_max_age,
        }
    }
}
