//! Rules a registry applies to the sessions it creates.

use super::Role;

/// Capability and input limits shared by every session in a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionPolicy {
    /// Reject scores from roles that do not estimate (Host, Viewer).
    pub enforce_scoring_roles: bool,

    /// Reject round control from roles that do not host (Player, Viewer).
    pub host_only_round_control: bool,

    /// Upper bound for a round's advertised duration.
    pub max_round_duration_secs: u32,

    /// Upper bound for session and display names, in characters.
    pub max_name_length: usize,
}

impl SessionPolicy {
    /// Whether a participant with this role is waited on before a reveal.
    ///
    /// Without role enforcement anyone may score, so everyone counts.
    pub fn is_estimator(&self, role: Role) -> bool {
        !self.enforce_scoring_roles || role.can_score()
    }

    /// Policy that lets any member score and control rounds.
    pub fn permissive() -> Self {
        Self {
            enforce_scoring_roles: false,
            host_only_round_control: false,
            ..Self::default()
        }
    }
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self {
            enforce_scoring_roles: true,
            host_only_round_control: false,
            max_round_duration_secs: 3600,
            max_name_length: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enforced_policy_waits_on_scoring_roles_only() {
        let policy = SessionPolicy::default();
        assert!(policy.is_estimator(Role::Player));
        assert!(policy.is_estimator(Role::ParticipatingHost));
        assert!(!policy.is_estimator(Role::Host));
        assert!(!policy.is_estimator(Role::Viewer));
    }

    #[test]
    fn permissive_policy_waits_on_everyone() {
        let policy = SessionPolicy::permissive();
        for role in [Role::Host, Role::ParticipatingHost, Role::Player, Role::Viewer] {
            assert!(policy.is_estimator(role), "{:?}", role);
        }
    }
}
