//! Closed role set used for routing decisions.
//!
//! User profiles carry roles in several places (`role_front`, `role_system`,
//! a bare `role`) and with several spellings. [`Role::normalize`] reduces
//! them to one [`Role`] once, when the session is stored; nothing else
//! re-derives the role from raw profile fields.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Instructor,
    Manager,
    Admin,
    /// No recognizable role. Can use unscoped pages only.
    Guest,
}

impl Role {
    /// Parses one raw role string, accepting the spellings the backend uses.
    pub fn parse(raw: &str) -> Option<Role> {
        let key: String = raw
            .trim()
            .to_ascii_lowercase()
            .chars()
            .map(|c| if c == '-' || c == ' ' { '_' } else { c })
            .collect();

        match key.as_str() {
            "student" | "learner" | "swimmer" => Some(Role::Student),
            "instructor" | "teacher" | "coach" | "trainer" => Some(Role::Instructor),
            "manager" | "branch_manager" => Some(Role::Manager),
            "admin" | "administrator" | "super_admin" | "superadmin" | "owner" => Some(Role::Admin),
            _ => None,
        }
    }

    /// Reduces profile role fields to a single role.
    ///
    /// The first recognizable `role_front` entry wins, then `role_system`,
    /// then `role`. Falls back to [`Role::Guest`].
    pub fn normalize(role_front: &[String], role_system: Option<&str>, role: Option<&str>) -> Role {
        role_front
            .iter()
            .map(String::as_str)
            .chain(role_system)
            .chain(role)
            .find_map(Role::parse)
            .unwrap_or(Role::Guest)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Instructor => "instructor",
            Role::Manager => "manager",
            Role::Admin => "admin",
            Role::Guest => "guest",
        }
    }

    /// Landing page for this role.
    pub fn home_path(self) -> &'static str {
        match self {
            Role::Student => "/student",
            Role::Instructor => "/instructor",
            Role::Manager => "/manager",
            Role::Admin => "/admin",
            Role::Guest => "/",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
