//! Extraction of the node's expected sequence from a check-tx log.
//!
//! The node reports a stale sequence with code 3 and a free-text log that
//! contains `expected <N>`. The first match in the log wins.

use regex::Regex;
use std::sync::OnceLock;

use crate::error::{ClientError, ClientResult};

/// `check_tx` code for an invalid sequence.
pub const INVALID_SEQUENCE_CODE: u32 = 3;

fn expected_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"expected (\d+)").expect("sequence regex must compile"))
}

/// Parse `expected <N>` out of a log, failing rather than guessing.
pub fn parse_expected_sequence(log: &str) -> ClientResult<u64> {
    expected_re()
        .captures(log)
        .and_then(|caps| caps[1].parse().ok())
        .ok_or_else(|| ClientError::MalformedSequence {
            log: log.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_expected() {
        assert_eq!(
            parse_expected_sequence("invalid sequence: got 2, expected 7").unwrap(),
            7
        );
        assert_eq!(parse_expected_sequence("expected 0").unwrap(), 0);
    }

    #[test]
    fn test_first_match_wins() {
        assert_eq!(parse_expected_sequence("expected 1; expected 9").unwrap(), 1);
    }

    #[test]
    fn test_missing_pattern_is_malformed() {
        for log in ["invalid sequence", "", "expected seven", "Expected 4"] {
            match parse_expected_sequence(log) {
                Err(ClientError::MalformedSequence { log: raw }) => assert_eq!(raw, log),
                other => panic!("expected MalformedSequence for {:?}, got {:?}", log, other),
            }
        }
    }

    #[test]
    fn test_overflowing_number_is_malformed() {
        let log = "expected 99999999999999999999999";
        assert!(matches!(
            parse_expected_sequence(log),
            Err(ClientError::MalformedSequence { .. })
        ));
    }
}
