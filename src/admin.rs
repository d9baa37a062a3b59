//! Admin authorization policy.

use std::collections::HashSet;

/// Capability check for admin-only commands.
///
/// Wraps the static id set supplied at startup; membership is the only
/// operation. Passed by reference into the command path rather than living as
/// module-level state.
#[derive(Debug, Clone, Default)]
pub struct AdminPolicy {
    admin_ids: HashSet<String>,
}

impl AdminPolicy {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            admin_ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// O(1) membership check against the configured admin set.
    pub fn is_admin(&self, user_id: &str) -> bool {
        self.admin_ids.contains(user_id)
    }

    pub fn is_empty(&self) -> bool {
        self.admin_ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.admin_ids.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_in_set_is_allowed() {
        let policy = AdminPolicy::new(["123", "456"]);
        assert!(policy.is_admin("123"));
        assert!(policy.is_admin("456"));
    }

    #[test]
    fn unknown_user_is_denied() {
        let policy = AdminPolicy::new(["123"]);
        assert!(!policy.is_admin("999"));
    }

    #[test]
    fn empty_policy_denies_everyone() {
        let policy = AdminPolicy::default();
        assert!(policy.is_empty());
        assert!(!policy.is_admin("123"));
    }

    #[test]
    fn membership_is_exact_match() {
        let policy = AdminPolicy::new(["123"]);
        assert!(!policy.is_admin("12"));
        assert!(!policy.is_admin("1234"));
        assert!(!policy.is_admin(""));
    }
}
