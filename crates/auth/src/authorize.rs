use crate::operations::Operation;
use crate::{AuthError, Claims, Permission};

/// Proof that an authorization check passed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Allowed;

/// Authorize verified claims for a single required permission.
///
/// - No IO
/// - No panics
/// - Exact match only: no wildcard, no permission implies another
pub fn authorize(claims: &Claims, required: &Permission) -> Result<Allowed, AuthError> {
    if claims.has_permission(required) {
        Ok(Allowed)
    } else {
        Err(AuthError::Forbidden(required.clone()))
    }
}

/// Authorize when every listed permission is required (logical AND).
///
/// Reports the first missing permission. An empty list is allowed.
pub fn authorize_all(claims: &Claims, required: &[Permission]) -> Result<Allowed, AuthError> {
    for perm in required {
        authorize(claims, perm)?;
    }
    Ok(Allowed)
}

/// Authorize an operation from the route table.
pub fn authorize_operation(claims: &Claims, operation: Operation) -> Result<Allowed, AuthError> {
    authorize(claims, &operation.required_permission())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Role;
    use proptest::prelude::*;

    fn claims_for(role: Role) -> Claims {
        Claims::for_tests(role.permissions().iter().cloned())
    }

    #[test]
    fn casting_assistant_reads_but_cannot_write() {
        let claims = Claims::for_tests(["get:actors", "get:movies"]);

        assert_eq!(
            authorize(&claims, &Permission::new("post:actors")),
            Err(AuthError::Forbidden(Permission::new("post:actors")))
        );
        assert_eq!(authorize(&claims, &Permission::new("get:movies")), Ok(Allowed));
    }

    #[test]
    fn executive_producer_may_perform_every_operation() {
        let claims = Claims::for_tests([
            "get:actors",
            "post:actors",
            "delete:actors",
            "get:movies",
            "patch:movies",
            "delete:movies",
            "post:movies",
        ]);

        for op in Operation::ALL {
            assert_eq!(authorize_operation(&claims, op), Ok(Allowed), "{op}");
        }
    }

    #[test]
    fn casting_director_operations() {
        let claims = claims_for(Role::CastingDirector);

        let allowed: Vec<Operation> = Operation::ALL
            .into_iter()
            .filter(|op| authorize_operation(&claims, *op).is_ok())
            .collect();

        assert_eq!(
            allowed,
            vec![
                Operation::ListActors,
                Operation::GetActor,
                Operation::CreateActor,
                Operation::DeleteActor,
                Operation::ListMovies,
                Operation::GetMovie,
            ]
        );
    }

    #[test]
    fn delete_does_not_imply_read() {
        let claims = Claims::for_tests(["delete:actors"]);
        assert!(authorize(&claims, &Permission::new("delete:actors")).is_ok());
        assert!(authorize(&claims, &Permission::new("get:actors")).is_err());
    }

    #[test]
    fn no_prefix_or_case_matching() {
        let claims = Claims::for_tests(["get:actors"]);
        for candidate in ["get:actor", "get:actors ", "GET:actors", "get", "get:*", "*"] {
            assert!(
                authorize(&claims, &Permission::new(candidate)).is_err(),
                "{candidate:?} must not match"
            );
        }
    }

    #[test]
    fn wildcard_claim_grants_nothing_extra() {
        let claims = Claims::for_tests(["*"]);
        assert!(authorize(&claims, &Permission::new("get:actors")).is_err());
    }

    #[test]
    fn authorize_all_requires_every_permission() {
        let claims = Claims::for_tests(["get:movies", "patch:movies"]);

        assert_eq!(
            authorize_all(
                &claims,
                &[Permission::new("get:movies"), Permission::new("patch:movies")]
            ),
            Ok(Allowed)
        );
        assert_eq!(
            authorize_all(
                &claims,
                &[Permission::new("get:movies"), Permission::new("delete:movies")]
            ),
            Err(AuthError::Forbidden(Permission::new("delete:movies")))
        );
        assert_eq!(authorize_all(&claims, &[]), Ok(Allowed));
    }

    #[test]
    fn empty_permission_set_is_forbidden_everywhere() {
        let claims = Claims::for_tests(Vec::<&'static str>::new());
        for op in Operation::ALL {
            let err = authorize_operation(&claims, op).unwrap_err();
            assert!(err.is_forbidden());
        }
    }

    fn permission_strategy() -> impl Strategy<Value = String> {
        (
            prop::sample::select(vec!["get", "post", "patch", "delete"]),
            prop::sample::select(vec!["actors", "movies"]),
        )
            .prop_map(|(verb, resource)| format!("{verb}:{resource}"))
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: allowed exactly when the permission is in the set, and
        /// repeated checks agree.
        #[test]
        fn allowed_iff_member(
            granted in prop::collection::vec(permission_strategy(), 0..8),
            required in permission_strategy(),
        ) {
            let claims = Claims::for_tests(granted.iter().cloned().map(Permission::new));
            let required = Permission::new(required);

            let first = authorize(&claims, &required);
            let second = authorize(&claims, &required);

            prop_assert_eq!(first.is_ok(), granted.contains(&required.as_str().to_string()));
            prop_assert_eq!(first, second);
        }

        /// Property: removing a permission forbids exactly that permission.
        #[test]
        fn removing_one_permission_only_affects_it(
            granted in prop::collection::btree_set(permission_strategy(), 1..5),
        ) {
            for removed in &granted {
                let remaining = granted
                    .iter()
                    .filter(|p| *p != removed)
                    .cloned()
                    .map(Permission::new);
                let claims = Claims::for_tests(remaining);

                prop_assert!(authorize(&claims, &Permission::new(removed.clone())).is_err());
                for other in granted.iter().filter(|p| *p != removed) {
                    prop_assert!(authorize(&claims, &Permission::new(other.clone())).is_ok());
                }
            }
        }
    }
}
