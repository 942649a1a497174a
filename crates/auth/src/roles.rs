use crate::Permission;
use crate::permissions::{
    DELETE_ACTORS, DELETE_MOVIES, GET_ACTORS, GET_MOVIES, PATCH_MOVIES, POST_ACTORS, POST_MOVIES,
};

/// Role bundles as granted by the identity provider.
///
/// Roles live with the signing authority, which flattens them into the
/// token's `permissions` claim. Validation and enforcement never look at a
/// role; these bundles exist for fixtures, token minting in tests and
/// operator documentation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    CastingAssistant,
    CastingDirector,
    ExecutiveProducer,
}

const CASTING_ASSISTANT: &[Permission] = &[GET_ACTORS, GET_MOVIES];

const CASTING_DIRECTOR: &[Permission] = &[GET_ACTORS, POST_ACTORS, DELETE_ACTORS, GET_MOVIES];

const EXECUTIVE_PRODUCER: &[Permission] = &[
    GET_ACTORS,
    POST_ACTORS,
    DELETE_ACTORS,
    GET_MOVIES,
    POST_MOVIES,
    PATCH_MOVIES,
    DELETE_MOVIES,
];

impl Role {
    pub const ALL: [Role; 3] = [
        Role::CastingAssistant,
        Role::CastingDirector,
        Role::ExecutiveProducer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::CastingAssistant => "casting_assistant",
            Role::CastingDirector => "casting_director",
            Role::ExecutiveProducer => "executive_producer",
        }
    }

    /// Flattened permission set the authority grants for this role.
    pub fn permissions(&self) -> &'static [Permission] {
        match self {
            Role::CastingAssistant => CASTING_ASSISTANT,
            Role::CastingDirector => CASTING_DIRECTOR,
            Role::ExecutiveProducer => EXECUTIVE_PRODUCER,
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assistant_is_read_only() {
        let perms = Role::CastingAssistant.permissions();
        assert!(perms.iter().all(|p| p.as_str().starts_with("get:")));
    }

    #[test]
    fn director_cannot_write_movies() {
        let perms = Role::CastingDirector.permissions();
        assert!(perms.contains(&POST_ACTORS));
        assert!(!perms.contains(&POST_MOVIES));
        assert!(!perms.contains(&PATCH_MOVIES));
        assert!(!perms.contains(&DELETE_MOVIES));
    }

    #[test]
    fn bundles_are_nested() {
        for perm in Role::CastingAssistant.permissions() {
            assert!(Role::CastingDirector.permissions().contains(perm));
        }
        for perm in Role::CastingDirector.permissions() {
            assert!(Role::ExecutiveProducer.permissions().contains(perm));
        }
    }
}
