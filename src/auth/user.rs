//! Portal identities and roles.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Length of the hex user id derived from the login handle.
const USER_ID_LEN: usize = 16;

/// Which dashboard a user belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Faculty,
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Student, Role::Faculty, Role::Admin];

    /// Lowercase name, also the first path segment of the role's screens.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Faculty => "faculty",
            Role::Admin => "admin",
        }
    }

    /// Display label for pickers and badges
    pub fn label(self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::Faculty => "Faculty",
            Role::Admin => "Admin",
        }
    }

    /// Dashboard path for this role (e.g. `/student`).
    pub fn home_path(self) -> String {
        format!("/{}", self.as_str())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for strings that name no known role.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    /// Only the exact lowercase names are accepted; `Admin` is not a role.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

/// A signed-in portal user. Lives only in memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    /// Email address or register number used to sign in
    pub handle: String,
    pub role: Role,
}

impl User {
    /// Build a user from login inputs. Deterministic: the same handle and
    /// role always produce the same user.
    pub fn from_credentials(handle: &str, role: Role) -> Self {
        let handle = handle.trim();
        let digest = Sha256::digest(format!("{}:{}", role, handle).as_bytes());
        let mut id = hex::encode(digest);
        id.truncate(USER_ID_LEN);

        User {
            id,
            name: display_name(handle, role),
            handle: handle.to_string(),
            role,
        }
    }
}

/// `jane.doe@college.edu` becomes `Jane Doe`; anything else becomes
/// `<Role label> <handle>`.
fn display_name(handle: &str, role: Role) -> String {
    let local = match handle.split_once('@') {
        Some((local, _)) if !local.is_empty() => local,
        _ => return format!("{} {}", role.label(), handle),
    };

    local
        .split(['.', '_', '-'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
