//! Application roles.
//!
//! The names must match the `chk_users_role` constraint in
//! `20260301000001_create_users.sql`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_INSTRUCTOR: &str = "instructor";
pub const ROLE_STUDENT: &str = "student";
pub const ROLE_COMMITTEE_TESTER: &str = "committee_tester";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Instructor,
    Student,
    CommitteeTester,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::Admin,
        Role::Instructor,
        Role::Student,
        Role::CommitteeTester,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => ROLE_ADMIN,
            Role::Instructor => ROLE_INSTRUCTOR,
            Role::Student => ROLE_STUDENT,
            Role::CommitteeTester => ROLE_COMMITTEE_TESTER,
        }
    }

    /// Admins and instructors manage the catalog and content library.
    pub fn is_staff(self) -> bool {
        matches!(self, Role::Admin | Role::Instructor)
    }

    /// Committee testers author and review assessments alongside staff.
    pub fn can_manage_assessments(self) -> bool {
        self.is_staff() || self == Role::CommitteeTester
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the known role names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role '{0}'")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_ADMIN => Ok(Role::Admin),
            ROLE_INSTRUCTOR => Ok(Role::Instructor),
            ROLE_STUDENT => Ok(Role::Student),
            ROLE_COMMITTEE_TESTER => Ok(Role::CommitteeTester),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}
