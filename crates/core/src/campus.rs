//! Campus (tenant) resolution.
//!
//! Every business row carries a `campus_id`. A request may name a campus via
//! header, query string, or body, but only privileged roles are allowed to
//! pick one; everyone else is pinned to the campus bound on their account.

use crate::roles::is_privileged;
use crate::types::DbId;

/// Header names accepted for a campus override, matched case-insensitively.
pub const CAMPUS_HEADER_NAMES: &[&str] = &["x-campus-id", "campus-id", "x-campusid", "campusid"];

/// Query-string keys accepted for a campus override.
pub const CAMPUS_QUERY_KEYS: &[&str] = &["campus_id", "campusId"];

/// Parse a raw campus id from a header, query, or body value.
///
/// Blank strings, non-numeric placeholders (`"undefined"`, `"null"`, `"NaN"`)
/// and non-positive numbers all mean "no campus".
pub fn parse_campus_id(raw: &str) -> Option<DbId> {
    raw.trim().parse::<DbId>().ok().filter(|id| *id > 0)
}

/// Pick the first parseable campus id out of several candidate values.
pub fn first_campus_id<'a, I>(candidates: I) -> Option<DbId>
where
    I: IntoIterator<Item = &'a str>,
{
    candidates.into_iter().find_map(parse_campus_id)
}

/// Resolve the campus a request is scoped to.
///
/// - A non-privileged user bound to a campus always gets that campus; any
///   `requested` value is ignored.
/// - Otherwise the requested campus wins, falling back to the user's own.
///
/// `None` means no campus could be determined.
pub fn resolve_campus_id(
    role: &str,
    user_campus: Option<DbId>,
    requested: Option<DbId>,
) -> Option<DbId> {
    let user_campus = user_campus.filter(|id| *id > 0);
    let requested = requested.filter(|id| *id > 0);

    if !is_privileged(role) {
        if let Some(bound) = user_campus {
            return Some(bound);
        }
    }

    requested.or(user_campus)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_positive_integers() {
        assert_eq!(parse_campus_id("7"), Some(7));
        assert_eq!(parse_campus_id("  12 "), Some(12));
    }

    #[test]
    fn parse_rejects_placeholders() {
        for raw in ["", "   ", "undefined", "null", "NaN", "abc", "0", "-3", "1.5"] {
            assert_eq!(parse_campus_id(raw), None, "{raw:?} must not parse");
        }
    }

    #[test]
    fn first_campus_id_skips_unparseable() {
        assert_eq!(first_campus_id(["", "undefined", "4", "9"]), Some(4));
        assert_eq!(first_campus_id(["", "NaN"]), None);
    }

    #[test]
    fn bound_non_admin_ignores_override() {
        assert_eq!(resolve_campus_id("teacher", Some(3), Some(9)), Some(3));
        assert_eq!(resolve_campus_id("student", Some(3), None), Some(3));
    }

    #[test]
    fn unbound_non_admin_uses_request() {
        assert_eq!(resolve_campus_id("staff", None, Some(9)), Some(9));
        assert_eq!(resolve_campus_id("staff", None, None), None);
    }

    #[test]
    fn admin_override_beats_own_campus() {
        assert_eq!(resolve_campus_id("admin", Some(3), Some(9)), Some(9));
        assert_eq!(resolve_campus_id("owner", Some(3), None), Some(3));
        assert_eq!(resolve_campus_id("superadmin", None, Some(5)), Some(5));
        assert_eq!(resolve_campus_id("superadmin", None, None), None);
    }

    #[test]
    fn non_positive_ids_count_as_missing() {
        assert_eq!(resolve_campus_id("teacher", Some(0), Some(4)), Some(4));
        assert_eq!(resolve_campus_id("admin", Some(2), Some(-1)), Some(2));
    }
}
