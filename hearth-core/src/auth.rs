//! Authenticated-identity accessor.
//!
//! Session bootstrapping (login, tokens) lives outside this workspace; callers
//! hand every operation an [`AuthContext`] holding the already-authenticated
//! viewer id, or an anonymous one when no session exists.

use tracing::debug;

use crate::error::{HearthError, Result};

/// The current viewer's identity, or anonymous.
///
/// Operations that require a viewer call [`AuthContext::viewer`] and surface
/// [`HearthError::AuthRequired`] as a redirect-to-login, not an inline error.
#[derive(Debug, Clone)]
pub struct AuthContext {
    viewer: Option<String>,
}

impl AuthContext {
    /// Context for an authenticated viewer.
    pub fn authenticated(user_id: impl Into<String>) -> Self {
        Self {
            viewer: Some(user_id.into()),
        }
    }

    /// Context with no session.
    pub fn anonymous() -> Self {
        Self { viewer: None }
    }

    pub fn is_authenticated(&self) -> bool {
        self.viewer.is_some()
    }

    /// Returns the viewer id, or [`HearthError::AuthRequired`] when anonymous.
    pub fn viewer(&self) -> Result<&str> {
        match self.viewer.as_deref() {
            Some(id) => Ok(id),
            None => {
                debug!("operation attempted without an authenticated viewer");
                Err(HearthError::AuthRequired)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authenticated_context_yields_viewer() {
        let auth = AuthContext::authenticated("user-1");
        assert_eq!(auth.viewer().unwrap(), "user-1");
        assert!(auth.is_authenticated());
    }

    #[test]
    fn anonymous_context_is_auth_required() {
        let auth = AuthContext::anonymous();
        assert!(matches!(auth.viewer(), Err(HearthError::AuthRequired)));
    }
}
