//! Room identifier encoding and decoding.

use std::collections::BTreeSet;
use std::fmt;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Serialize, Serializer};

use crate::config::GateConfig;
use crate::error::{Violation, ViolationKind};
use crate::sanitizer::{is_control_char, SanitizationError, SanitizationErrorKind, Sanitizer};
use crate::{Tainted, Verified};

/// Reserved token standing in for "the requesting principal".
///
/// It can never be a real participant id: [`RoomCodec::encode`] rejects it.
pub const SELF_SENTINEL: &str = "@me";

/// Separator between the two participant tokens.
pub const DELIMITER: char = ':';

/// Characters left unescaped in a path segment (RFC 3986 unreserved).
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Canonical identifier of a two-party room.
///
/// Holds exactly two tokens in canonical order: the sentinel, if present,
/// always comes second, otherwise the tokens are sorted. `RoomIdentifier`
/// values for `(a, b)` and `(b, a)` are therefore equal.
///
/// # Examples
///
/// ```
/// use room_gate::room::RoomCodec;
///
/// let codec = RoomCodec::default();
/// let ab = codec.encode("u2", "u1").unwrap();
/// let ba = codec.encode("u1", "u2").unwrap();
///
/// assert_eq!(ab, ba);
/// assert_eq!(ab.to_string(), "u1:u2");
/// assert_eq!(ab.path_segment(), "u1%3Au2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoomIdentifier {
    first: String,
    second: String,
}

impl RoomIdentifier {
    fn canonical(a: String, b: String) -> Self {
        let a_is_sentinel = a == SELF_SENTINEL;
        let b_is_sentinel = b == SELF_SENTINEL;
        let swap = match (a_is_sentinel, b_is_sentinel) {
            (true, false) => true,
            (false, true) | (true, true) => false,
            (false, false) => b < a,
        };
        if swap {
            Self {
                first: b,
                second: a,
            }
        } else {
            Self {
                first: a,
                second: b,
            }
        }
    }

    /// Returns both tokens in canonical order.
    pub fn tokens(&self) -> [&str; 2] {
        [&self.first, &self.second]
    }

    /// Percent-encoded form suitable for a URL path segment.
    pub fn path_segment(&self) -> String {
        utf8_percent_encode(&self.to_string(), PATH_SEGMENT).to_string()
    }

    /// Resolves the participants of this room from one principal's viewpoint.
    ///
    /// The sentinel and the principal's own id are removed from the token
    /// set. No token left means a room with oneself; one token left is the
    /// other participant.
    ///
    /// # Errors
    ///
    /// Returns `MalformedRoomIdentifier` if two distinct tokens remain, i.e.
    /// the principal is not a participant of this room.
    pub fn pair_for(&self, principal_id: &str) -> Result<ParticipantPair, Violation> {
        let remaining: BTreeSet<&str> = self
            .tokens()
            .into_iter()
            .filter(|t| *t != SELF_SENTINEL && *t != principal_id)
            .collect();

        let mut others = remaining.into_iter();
        match (others.next(), others.next()) {
            (None, _) => Ok(ParticipantPair {
                self_id: principal_id.to_string(),
                other_id: principal_id.to_string(),
            }),
            (Some(other), None) => Ok(ParticipantPair {
                self_id: principal_id.to_string(),
                other_id: other.to_string(),
            }),
            (Some(_), Some(_)) => Err(Violation::new(
                ViolationKind::MalformedRoomIdentifier,
                "room names two participants other than the principal",
            )),
        }
    }
}

impl fmt::Display for RoomIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.first, DELIMITER, self.second)
    }
}

impl Serialize for RoomIdentifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A room's participants relative to the requesting principal.
///
/// Derived per request and never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantPair {
    /// The requesting principal
    pub self_id: String,
    /// The other participant; equal to `self_id` for a room with oneself
    pub other_id: String,
}

impl ParticipantPair {
    /// Returns `true` if the principal is alone in the room.
    pub fn is_self_room(&self) -> bool {
        self.self_id == self.other_id
    }
}

/// Encodes participant pairs into room identifiers and decodes them back.
#[derive(Debug, Clone, Copy)]
pub struct RoomCodec {
    max_token_len: usize,
}

impl Default for RoomCodec {
    fn default() -> Self {
        Self::from_config(&GateConfig::default())
    }
}

impl RoomCodec {
    /// Creates a codec accepting tokens up to `max_token_len` characters.
    pub fn new(max_token_len: usize) -> Self {
        Self {
            max_token_len: max_token_len.max(1),
        }
    }

    /// Creates a codec using the configured token limit.
    pub fn from_config(config: &GateConfig) -> Self {
        Self::new(config.max_token_len)
    }

    /// Encodes two participant ids into their room identifier.
    ///
    /// Order does not matter: `encode(a, b) == encode(b, a)`. Encoding an id
    /// with itself yields the self room `id:@me`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParticipant` if either id is empty, too long, equal to
    /// the sentinel, or contains the delimiter or a control character.
    pub fn encode(&self, a: &str, b: &str) -> Result<RoomIdentifier, Violation> {
        self.check_participant(a)?;
        self.check_participant(b)?;

        let second = if a == b { SELF_SENTINEL } else { b };
        Ok(RoomIdentifier::canonical(a.to_string(), second.to_string()))
    }

    /// Decodes a raw path segment and resolves it for `principal_id`.
    ///
    /// Structure is checked before anything else, so malformed input never
    /// reaches a profile lookup.
    ///
    /// # Errors
    ///
    /// Returns `MalformedRoomIdentifier` if the segment is not two valid
    /// tokens joined by one delimiter, or names two participants other than
    /// the principal.
    ///
    /// # Examples
    ///
    /// ```
    /// use room_gate::{Tainted, room::RoomCodec};
    ///
    /// let codec = RoomCodec::default();
    /// let pair = codec.decode(Tainted::new("u2%3Au1".to_string()), "u1").unwrap();
    /// assert_eq!(pair.other_id, "u2");
    ///
    /// let own = codec.decode(Tainted::new("u1:@me".to_string()), "u1").unwrap();
    /// assert!(own.is_self_room());
    ///
    /// assert!(codec.decode(Tainted::new("u1:u2:u3".to_string()), "u1").is_err());
    /// ```
    pub fn decode(
        &self,
        raw: Tainted<String>,
        principal_id: &str,
    ) -> Result<ParticipantPair, Violation> {
        let room = self.sanitize(raw).map_err(|e| {
            Violation::new(ViolationKind::MalformedRoomIdentifier, e.message().to_string())
        })?;
        room.as_ref().pair_for(principal_id)
    }

    fn check_participant(&self, id: &str) -> Result<(), Violation> {
        let problem = if id.is_empty() {
            Some("participant id is empty")
        } else if id == SELF_SENTINEL {
            Some("participant id collides with the self sentinel")
        } else if id.contains(DELIMITER) {
            Some("participant id contains the room delimiter")
        } else if id.chars().any(is_control_char) {
            Some("participant id contains control characters")
        } else if id.chars().count() > self.max_token_len {
            Some("participant id is too long")
        } else {
            None
        };

        match problem {
            Some(message) => Err(Violation::new(ViolationKind::InvalidParticipant, message)),
            None => Ok(()),
        }
    }

    fn check_token(&self, token: &str) -> Result<(), SanitizationError> {
        if token.is_empty() {
            return Err(SanitizationError::new(
                SanitizationErrorKind::Empty,
                "room token is empty",
            ));
        }
        if token.chars().any(is_control_char) {
            return Err(SanitizationError::new(
                SanitizationErrorKind::ContainsControlChars,
                "room token contains control characters",
            ));
        }
        if token.chars().count() > self.max_token_len {
            return Err(SanitizationError::new(
                SanitizationErrorKind::TooLong,
                format!("room token exceeds {} characters", self.max_token_len),
            ));
        }
        Ok(())
    }
}

/// Structural validation of an inbound room path segment.
///
/// Percent-decodes the segment, then requires exactly one delimiter and two
/// acceptable tokens. Resolution against a principal is a separate step,
/// see [`RoomIdentifier::pair_for`].
impl Sanitizer<String> for RoomCodec {
    type Output = RoomIdentifier;

    fn sanitize(&self, input: Tainted<String>) -> Result<Verified<RoomIdentifier>, SanitizationError> {
        let raw = input.into_inner();
        let decoded = percent_decode_str(&raw).decode_utf8().map_err(|_| {
            SanitizationError::new(
                SanitizationErrorKind::MalformedInput,
                "room identifier is not valid UTF-8 once decoded",
            )
        })?;

        let tokens: Vec<&str> = decoded.split(DELIMITER).collect();
        if tokens.len() != 2 {
            return Err(SanitizationError::new(
                SanitizationErrorKind::MalformedInput,
                format!(
                    "expected one delimiter, found {}",
                    tokens.len().saturating_sub(1)
                ),
            ));
        }

        for token in &tokens {
            self.check_token(token)?;
        }

        Ok(Verified::new_unchecked(RoomIdentifier::canonical(
            tokens[0].to_string(),
            tokens[1].to_string(),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> RoomCodec {
        RoomCodec::new(32)
    }

    fn decode(raw: &str, principal: &str) -> Result<ParticipantPair, Violation> {
        codec().decode(Tainted::new(raw.to_string()), principal)
    }

    #[test]
    fn encode_is_commutative() {
        let c = codec();
        assert_eq!(c.encode("alice", "bob").unwrap(), c.encode("bob", "alice").unwrap());
    }

    #[test]
    fn encode_same_id_uses_sentinel() {
        let room = codec().encode("u1", "u1").unwrap();
        assert_eq!(room.to_string(), "u1:@me");
        assert_eq!(room.path_segment(), "u1%3A%40me");
    }

    #[test]
    fn encode_rejects_sentinel_and_delimiter() {
        let c = codec();
        for bad in ["@me", "a:b", "", "tab\there"] {
            let err = c.encode(bad, "u1").unwrap_err();
            assert_eq!(err.kind, ViolationKind::InvalidParticipant, "input {:?}", bad);
        }
    }

    #[test]
    fn encode_rejects_overlong_id() {
        let long = "x".repeat(33);
        assert!(codec().encode(&long, "u1").is_err());
    }

    #[test]
    fn decode_finds_other_in_either_order() {
        assert_eq!(decode("u1:u2", "u1").unwrap().other_id, "u2");
        assert_eq!(decode("u2:u1", "u1").unwrap().other_id, "u2");
    }

    #[test]
    fn decode_percent_encoded_segment() {
        let pair = decode("u1%3Au2", "u2").unwrap();
        assert_eq!(pair.other_id, "u1");
        assert_eq!(pair.self_id, "u2");
    }

    #[test]
    fn decode_self_room_variants() {
        for raw in ["u1:@me", "@me:u1", "u1:u1", "@me:@me"] {
            let pair = decode(raw, "u1").unwrap();
            assert!(pair.is_self_room(), "input {:?}", raw);
            assert_eq!(pair.other_id, "u1");
        }
    }

    #[test]
    fn sentinel_from_other_viewpoint_names_owner() {
        let pair = decode("u1:@me", "u2").unwrap();
        assert_eq!(pair.other_id, "u1");
        assert!(!pair.is_self_room());
    }

    #[test]
    fn decode_rejects_wrong_delimiter_count() {
        for raw in ["u1", "u1:u2:u3", "u1::u2", "u1%3Au2%3Au3"] {
            let err = decode(raw, "u1").unwrap_err();
            assert_eq!(err.kind, ViolationKind::MalformedRoomIdentifier, "input {:?}", raw);
        }
    }

    #[test]
    fn decode_rejects_empty_tokens() {
        assert!(decode("u1:", "u1").is_err());
        assert!(decode(":u1", "u1").is_err());
    }

    #[test]
    fn decode_rejects_invalid_utf8() {
        assert!(decode("u1%3A%FF", "u1").is_err());
    }

    #[test]
    fn decode_rejects_rooms_without_principal() {
        let err = decode("u2:u3", "u1").unwrap_err();
        assert_eq!(err.kind, ViolationKind::MalformedRoomIdentifier);
    }

    #[test]
    fn sanitize_yields_canonical_identifier() {
        let c = codec();
        let a = c.sanitize(Tainted::new("u2:u1".to_string())).unwrap();
        let b = c.sanitize(Tainted::new("u1:u2".to_string())).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_ref().tokens(), ["u1", "u2"]);
    }

    #[test]
    fn path_segment_round_trips_through_decode() {
        let c = codec();
        let room = c.encode("jo é", "kim").unwrap();
        let pair = c.decode(Tainted::new(room.path_segment()), "kim").unwrap();
        assert_eq!(pair.other_id, "jo é");
    }

    #[test]
    fn room_identifier_serializes_as_string() {
        let room = codec().encode("u1", "u2").unwrap();
        assert_eq!(serde_json::to_string(&room).unwrap(), "\"u1:u2\"");
    }
}
