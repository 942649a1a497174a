use std::sync::Arc;

use casting_auth::Claims;

/// Principal context for a request (verified token claims).
///
/// Inserted by the auth middleware; present for every protected route.
#[derive(Debug, Clone)]
pub struct PrincipalContext {
    claims: Arc<Claims>,
}

impl PrincipalContext {
    pub fn new(claims: Claims) -> Self {
        Self {
            claims: Arc::new(claims),
        }
    }

    pub fn claims(&self) -> &Claims {
        &self.claims
    }

    pub fn subject(&self) -> &str {
        self.claims.subject()
    }
}
