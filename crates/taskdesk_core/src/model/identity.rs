//! Caller identity, team membership and user profiles.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

use super::{require_text, ValidationError};

const ANONYMOUS_PRINCIPAL: &str = "2vxsx-fae";

/// Opaque identity credential; authenticates a caller and keys its data.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Principal(String);

impl Principal {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Generates a fresh principal for members created without one
    /// (bulk team-member import).
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// The well-known principal of unauthenticated callers.
    pub fn anonymous() -> Self {
        Self(ANONYMOUS_PRINCIPAL.to_string())
    }

    pub fn is_anonymous(&self) -> bool {
        self.0 == ANONYMOUS_PRINCIPAL
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Principal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Team member shown in assignee pickers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub principal: Principal,
    pub name: String,
}

impl TeamMember {
    pub fn new(principal: Principal, name: impl Into<String>) -> Self {
        Self {
            principal,
            name: name.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text(self.principal.as_str(), "team member principal")?;
        require_text(&self.name, "team member name")
    }
}

/// Profile a signed-in user saves for themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub role: String,
}

impl UserProfile {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text(&self.name, "profile name")
    }
}

