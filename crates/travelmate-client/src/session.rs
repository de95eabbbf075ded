//! Signed-in user context, passed explicitly to the client and the
//! submission workflow.

use std::fmt;

/// Who is booking, and the bearer token to send on their behalf.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    user_name: String,
    token: Option<String>,
}

impl Session {
    pub fn new(user_name: impl Into<String>, token: Option<String>) -> Self {
        Session {
            user_name: user_name.into(),
            token: token.filter(|t| !t.trim().is_empty()),
        }
    }

    /// A session without a token, for backends that do not check auth.
    pub fn anonymous(user_name: impl Into<String>) -> Self {
        Self::new(user_name, None)
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// True when there is a usable user name.
    pub fn is_signed_in(&self) -> bool {
        !self.user_name.trim().is_empty()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user_name", &self.user_name)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
