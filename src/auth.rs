use std::fmt;
use subtle::ConstantTimeEq;

use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Checkin,
    Status,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Checkin => f.write_str("Checkin"),
            TokenKind::Status => f.write_str("Status"),
        }
    }
}

/// A shared-secret gate for one family of endpoints.
#[derive(Clone)]
pub struct TokenCheck {
    kind: TokenKind,
    token: String,
    enforce: bool,
}

impl TokenCheck {
    pub fn new(kind: TokenKind, token: impl Into<String>, enforce: bool) -> Self {
        Self {
            kind,
            token: token.into(),
            enforce,
        }
    }

    pub fn check(&self, supplied: Option<&str>) -> Result<(), ApiError> {
        if !self.enforce {
            return Ok(());
        }

        let supplied = supplied.unwrap_or_default();
        if bool::from(self.token.as_bytes().ct_eq(supplied.as_bytes())) {
            Ok(())
        } else {
            Err(ApiError::InvalidToken(self.kind))
        }
    }
}

impl fmt::Debug for TokenCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCheck")
            .field("kind", &self.kind)
            .field("token", &"<redacted>")
            .field("enforce", &self.enforce)
            .finish()
    }
}
