//! Directory pagination constants and helpers.
//!
//! This module lives in `core` (zero internal deps) so the REST handlers and
//! the action dispatcher share one limit policy.

/// Default number of employees returned by list/search.
pub const DEFAULT_LIST_LIMIT: i64 = 20;

/// Maximum number of employees returned by list/search.
pub const MAX_LIST_LIMIT: i64 = 100;

/// Clamp a caller-provided limit to valid bounds.
///
/// Out-of-range values are brought into range rather than rejected: an
/// absent limit falls back to `default`, zero and negative limits floor at
/// 1, oversized limits cap at `max`.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_limit_uses_default_when_none() {
        assert_eq!(clamp_limit(None, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT), 20);
    }

    #[test]
    fn clamp_limit_respects_max() {
        assert_eq!(clamp_limit(Some(500), DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT), 100);
    }

    #[test]
    fn clamp_limit_floors_at_one() {
        assert_eq!(clamp_limit(Some(0), DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT), 1);
        assert_eq!(clamp_limit(Some(-5), DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT), 1);
    }

    #[test]
    fn clamp_limit_passes_through_valid_value() {
        assert_eq!(clamp_limit(Some(50), DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT), 50);
    }
}
