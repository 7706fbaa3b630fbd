//! Newtype domain identifiers.
//!
//! Users and pull requests are keyed by externally supplied UUIDs; teams are
//! keyed by their name. Each is a distinct newtype so a [`UserId`] can never be
//! passed where a [`PullRequestId`] is expected even though both wrap a
//! [`Uuid`].

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Macro for UUID-wrapped newtypes.
// Generates: struct (Copy, Ord), from_uuid(), new_random(), as_uuid(),
// FromStr, Display.
// ---------------------------------------------------------------------------
macro_rules! uuid_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Wraps an existing UUID.
            pub fn from_uuid(id: Uuid) -> Self {
                Self(id)
            }

            /// Generates a fresh random (v4) identifier.
            pub fn new_random() -> Self {
                Self(Uuid::new_v4())
            }

            /// Returns the underlying [`Uuid`].
            pub fn as_uuid(self) -> Uuid {
                self.0
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

uuid_id! {
    /// Identifies a user. Supplied by the caller when the user is first
    /// registered as a team member.
    UserId
}

uuid_id! {
    /// Identifies a pull request. Supplied by the caller on creation.
    PullRequestId
}

// ---------------------------------------------------------------------------

/// The unique name of a team; doubles as the team's identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamName(String);

impl TeamName {
    /// Creates a team name, returning `None` if the value is empty.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let v = value.into();
        if v.is_empty() {
            None
        } else {
            Some(Self(v))
        }
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TeamName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_parses_textual_uuid() {
        let raw = "0b6f7c1e-8d1a-4c51-9a43-3e3c1d2b5f60";
        let id: UserId = raw.parse().unwrap();
        assert_eq!(id.to_string(), raw);
    }

    #[test]
    fn test_pull_request_id_rejects_garbage() {
        assert!("not-a-uuid".parse::<PullRequestId>().is_err());
        assert!("".parse::<PullRequestId>().is_err());
    }

    #[test]
    fn test_team_name_rejects_empty() {
        assert!(TeamName::new("").is_none());
        assert_eq!(TeamName::new("backend").unwrap().as_str(), "backend");
    }
}
