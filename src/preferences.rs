//! Long-lived display preference cookies.
//!
//! Theme and animated-background settings are opaque values written
//! straight into a cookie. They involve no room resolution and no session.

use std::fmt;

use chrono::Duration;

use crate::config::GateConfig;
use crate::error::{Violation, ViolationKind};
use crate::sanitizer::{Sanitizer, StringSanitizer};
use crate::Tainted;

/// Cookie name for the colour theme.
pub const THEME_COOKIE: &str = "theme";

/// Cookie name for the animated background toggle.
pub const ANIMATED_BACKGROUND_COOKIE: &str = "animatedBackground";

const MAX_PREFERENCE_LEN: usize = 64;

/// A preference cookie ready to be written to the response.
///
/// # Examples
///
/// ```
/// use room_gate::{GateConfig, Tainted, preferences::theme_cookie};
///
/// let cookie = theme_cookie(Tainted::new("dark".to_string()), &GateConfig::default()).unwrap();
/// assert_eq!(
///     cookie.header_value(),
///     "theme=dark; Path=/; Max-Age=2592000; SameSite=Lax"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceCookie {
    /// Cookie name
    pub name: &'static str,
    /// Sanitized value
    pub value: String,
    /// Cookie lifetime
    pub max_age: Duration,
}

impl PreferenceCookie {
    /// Renders the `Set-Cookie` header value.
    pub fn header_value(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PreferenceCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}={}; Path=/; Max-Age={}; SameSite=Lax",
            self.name,
            self.value,
            self.max_age.num_seconds()
        )
    }
}

/// Builds the theme cookie from an untrusted value.
///
/// # Errors
///
/// Returns `InvalidInput` if the value is empty, too long, contains control
/// characters, or contains `;` or `=` which would corrupt the header.
pub fn theme_cookie(value: Tainted<String>, config: &GateConfig) -> Result<PreferenceCookie, Violation> {
    let value = StringSanitizer::new(MAX_PREFERENCE_LEN)
        .sanitize(value)?
        .into_inner();

    if value.contains([';', '=', ',']) || value.contains(char::is_whitespace) {
        return Err(Violation::new(
            ViolationKind::InvalidInput,
            "theme contains characters not allowed in a cookie",
        ));
    }

    Ok(PreferenceCookie {
        name: THEME_COOKIE,
        value,
        max_age: config.preference_max_age,
    })
}

/// Builds the animated background cookie from an untrusted toggle value.
///
/// Accepts `true`/`false` in any case, plus `1`/`0` and `on`/`off`, and
/// always stores `true` or `false`.
///
/// # Errors
///
/// Returns `InvalidInput` for anything else.
pub fn animated_background_cookie(
    value: Tainted<String>,
    config: &GateConfig,
) -> Result<PreferenceCookie, Violation> {
    let value = StringSanitizer::new(MAX_PREFERENCE_LEN)
        .sanitize(value)?
        .into_inner();

    let enabled = match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "on" => true,
        "false" | "0" | "off" => false,
        _ => {
            return Err(Violation::new(
                ViolationKind::InvalidInput,
                "animated background must be a boolean",
            ))
        }
    };

    Ok(PreferenceCookie {
        name: ANIMATED_BACKGROUND_COOKIE,
        value: enabled.to_string(),
        max_age: config.preference_max_age,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tainted(s: &str) -> Tainted<String> {
        Tainted::new(s.to_string())
    }

    #[test]
    fn theme_cookie_lasts_thirty_days() {
        let cookie = theme_cookie(tainted("midnight"), &GateConfig::default()).unwrap();
        assert_eq!(cookie.max_age, Duration::days(30));
        assert_eq!(cookie.value, "midnight");
    }

    #[test]
    fn theme_rejects_header_injection() {
        let err = theme_cookie(tainted("dark; Domain=evil"), &GateConfig::default()).unwrap_err();
        assert_eq!(err.kind, ViolationKind::InvalidInput);
    }

    #[test]
    fn theme_rejects_empty() {
        assert!(theme_cookie(tainted("  "), &GateConfig::default()).is_err());
    }

    #[test]
    fn animated_background_normalises() {
        let cfg = GateConfig::default();
        assert_eq!(animated_background_cookie(tainted("ON"), &cfg).unwrap().value, "true");
        assert_eq!(animated_background_cookie(tainted("0"), &cfg).unwrap().value, "false");
    }

    #[test]
    fn animated_background_rejects_other_values() {
        let err = animated_background_cookie(tainted("maybe"), &GateConfig::default()).unwrap_err();
        assert_eq!(err.kind, ViolationKind::InvalidInput);
    }

    #[test]
    fn configured_max_age_is_used() {
        let cfg = GateConfig {
            preference_max_age: Duration::days(2),
            ..GateConfig::default()
        };
        let cookie = animated_background_cookie(tainted("true"), &cfg).unwrap();
        assert!(cookie.header_value().contains("Max-Age=172800"));
    }
}
