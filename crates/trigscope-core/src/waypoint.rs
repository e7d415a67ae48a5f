//! Waypoint token decoding.
//!
//! Waypoints are written as bijective base-26 letter sequences: `A` is
//! waypoint 0, `Z` is 25, `AA` is 26, `AZ` is 51, `BA` is 52.

use thiserror::Error;

/// Errors produced while decoding a waypoint token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WaypointError {
    #[error("empty waypoint token")]
    Empty,

    #[error("invalid waypoint letter `{0}`")]
    InvalidLetter(char),

    #[error("waypoint token `{0}` is too large")]
    Overflow(String),
}

/// Decodes a waypoint token into its zero-based index.
///
/// # Examples
///
/// ```
/// use trigscope_core::waypoint::decode_waypoint;
///
/// assert_eq!(decode_waypoint("A"), Ok(0));
/// assert_eq!(decode_waypoint("Z"), Ok(25));
/// assert_eq!(decode_waypoint("AA"), Ok(26));
/// ```
pub fn decode_waypoint(token: &str) -> Result<u64, WaypointError> {
    if token.is_empty() {
        return Err(WaypointError::Empty);
    }

    let mut value: u64 = 0;
    for ch in token.chars() {
        if !ch.is_ascii_uppercase() {
            return Err(WaypointError::InvalidLetter(ch));
        }
        let digit = u64::from(ch as u8 - b'A') + 1;
        value = value
            .checked_mul(26)
            .and_then(|v| v.checked_add(digit))
            .ok_or_else(|| WaypointError::Overflow(token.to_string()))?;
    }

    Ok(value - 1)
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    /// Strategy for waypoint tokens short enough to never overflow.
    fn token_strategy() -> impl Strategy<Value = String> {
        "[A-Z]{1,8}"
    }

    /// Appending `A` moves one bijective digit up: `(v + 1) * 26`.
    fn check_append_letter_a(token: &str) -> Result<(), TestCaseError> {
        let base = decode_waypoint(token).unwrap();
        let extended = decode_waypoint(&format!("{token}A")).unwrap();
        prop_assert_eq!(extended, (base + 1) * 26);
        Ok(())
    }

    /// Longer tokens always decode to larger indices.
    fn check_longer_is_larger(shorter: &str, longer: &str) -> Result<(), TestCaseError> {
        prop_assume!(shorter.len() < longer.len());
        prop_assert!(decode_waypoint(shorter).unwrap() < decode_waypoint(longer).unwrap());
        Ok(())
    }

    proptest! {
        #[test]
        fn append_letter_a(token in token_strategy()) {
            check_append_letter_a(&token)?;
        }

        #[test]
        fn longer_is_larger(shorter in token_strategy(), longer in token_strategy()) {
            check_longer_is_larger(&shorter, &longer)?;
        }
    }
}
