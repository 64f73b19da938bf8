//! Wire types for the JSON API.
//!
//! Field names here are the public contract. Several differ from the storage
//! columns (`name` vs `full_name`, `students` vs `students_count`); the API
//! handlers do the mapping. Request types carry `validator` schemas so the
//! server and the client reject the same payloads.

pub mod assessment;
pub mod auth;
pub mod content;
pub mod course;
pub mod user;
pub mod youtube;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Returned when a stored or submitted string is not a known enum value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! text_enum {
    ($(#[$meta:meta])* $name:ident, $kind:literal { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(UnknownVariant {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

text_enum!(
    /// Account state of a user.
    UserStatus, "user status" {
        Active => "active",
        Inactive => "inactive",
        Suspended => "suspended",
    }
);

text_enum!(
    /// Publication state shared by courses, content items and assessments.
    PublishStatus, "publish status" {
        Draft => "draft",
        Published => "published",
        Archived => "archived",
    }
);

text_enum!(
    /// Kind of content item in the library.
    ContentType, "content type" {
        Video => "video",
        File => "file",
        Page => "page",
    }
);

impl Default for UserStatus {
    fn default() -> Self {
        UserStatus::Active
    }
}

impl Default for PublishStatus {
    fn default() -> Self {
        PublishStatus::Draft
    }
}
