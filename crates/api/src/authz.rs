//! API-side authorization guard.
//!
//! Every protected handler calls this with its own [`Operation`] before doing
//! any work; the operation → permission table lives in `casting-auth`.

use casting_auth::{Allowed, AuthError, Operation, authorize_operation};

use crate::context::PrincipalContext;

pub fn authorize(principal: &PrincipalContext, operation: Operation) -> Result<Allowed, AuthError> {
    authorize_operation(principal.claims(), operation).inspect_err(|e| {
        tracing::debug!(
            subject = principal.subject(),
            %operation,
            code = e.code(),
            "operation denied"
        );
    })
}
