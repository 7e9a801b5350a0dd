// src/services/role_guard.rs
// DOCUMENTATION: Role-based redirect guard for the dashboards
// PURPOSE: Decide whether a role may see a path, or where to send it instead

use crate::models::Role;

/// Where unauthenticated visitors go
pub const SIGN_IN_PATH: &str = "/auth/sign-in";

/// Outcome of the guard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow(Role),
    Redirect(String),
}

/// True when `path` is `prefix` itself or below it (segment boundary)
fn is_under(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/') || rest.starts_with('?'),
        None => false,
    }
}

/// Resolve the guard for a stored role string and the requested path
/// DOCUMENTATION: Missing or unrecognized role -> sign-in. A role outside its
/// own prefix -> that role's canonical dashboard. Resolving the redirect target
/// again always allows, so a browser is redirected at most once.
pub fn resolve(role: Option<&str>, path: &str) -> GuardDecision {
    let role = match role.and_then(Role::parse) {
        Some(role) => role,
        None => {
            log::debug!("Guard: no valid role for {}, sending to sign-in", path);
            return GuardDecision::Redirect(SIGN_IN_PATH.to_string());
        }
    };

    let prefix = role.dashboard_prefix();
    if is_under(path, prefix) {
        GuardDecision::Allow(role)
    } else {
        log::info!(
            "Guard: role {} may not open {}, redirecting to {}",
            role.as_str(),
            path,
            prefix
        );
        GuardDecision::Redirect(prefix.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_unknown_role_goes_to_sign_in() {
        assert_eq!(
            resolve(None, "/dashboard/admin"),
            GuardDecision::Redirect(SIGN_IN_PATH.to_string())
        );
        assert_eq!(
            resolve(Some("visitor"), "/dashboard/admin"),
            GuardDecision::Redirect(SIGN_IN_PATH.to_string())
        );
    }

    #[test]
    fn matching_prefix_is_allowed() {
        assert_eq!(
            resolve(Some("admin"), "/dashboard/admin/agents/4"),
            GuardDecision::Allow(Role::Admin)
        );
        assert_eq!(
            resolve(Some("marketer"), "/dashboard/marketer"),
            GuardDecision::Allow(Role::Marketer)
        );
    }

    #[test]
    fn mismatched_roles_redirect_exactly_once() {
        for (role, path) in [
            ("agent", "/dashboard/admin/agents"),
            ("admin", "/dashboard/marketer"),
            ("marketer", "/dashboard/agent/appointments"),
        ] {
            let first = resolve(Some(role), path);
            let target = match first {
                GuardDecision::Redirect(target) => target,
                other => panic!("expected redirect for {}, got {:?}", role, other),
            };
            assert_eq!(target, Role::parse(role).unwrap().dashboard_prefix());
            assert!(matches!(resolve(Some(role), &target), GuardDecision::Allow(_)));
        }
    }

    #[test]
    fn prefix_match_respects_segments() {
        assert!(!is_under("/dashboard/administrator", "/dashboard/admin"));
        assert!(is_under("/dashboard/admin?tab=1", "/dashboard/admin"));
    }
}
