//! Route guard.
//!
//! Decides the outcome of a navigation from two facts: whether the session
//! is valid, and whether its role may enter the requested section.
//!
//! | Session | Section | Decision |
//! |---|---|---|
//! | any | public | allow (valid session on the login page goes to its home) |
//! | missing/invalid | protected | redirect to login, keeping the destination |
//! | valid | role-scoped, other role | redirect home |
//! | valid | role-scoped, same role | allow |
//! | valid | unscoped | allow |
//!
//! This module only decides. Clearing the stale session and performing the
//! redirect belong to the caller.

use url::form_urlencoded;

use crate::roles::Role;

/// Area of the application a path belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Public,
    Student,
    Instructor,
    Manager,
    Admin,
    /// Requires a session but no particular role.
    General,
}

impl Section {
    /// Role required to enter, if the section is role-scoped.
    pub fn required_role(self) -> Option<Role> {
        match self {
            Section::Student => Some(Role::Student),
            Section::Instructor => Some(Role::Instructor),
            Section::Manager => Some(Role::Manager),
            Section::Admin => Some(Role::Admin),
            Section::Public | Section::General => None,
        }
    }
}

/// What the guard needs to know about the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionView {
    pub valid: bool,
    pub role: Option<Role>,
}

impl SessionView {
    pub fn anonymous() -> Self {
        Self {
            valid: false,
            role: None,
        }
    }

    pub fn authenticated(role: Role) -> Self {
        Self {
            valid: true,
            role: Some(role),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    RedirectToLogin { return_to: String },
    RedirectHome,
    RedirectToRoleHome(Role),
}

/// Path-prefix based route guard.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    pub login_path: String,
    pub home_path: String,
    pub public_paths: Vec<String>,
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self {
            login_path: "/login".to_string(),
            home_path: "/".to_string(),
            public_paths: vec![
                "/login".to_string(),
                "/register".to_string(),
                "/forgot-password".to_string(),
            ],
        }
    }
}

impl RouteGuard {
    pub fn classify(&self, path: &str) -> Section {
        let path = strip_query(path);

        if self
            .public_paths
            .iter()
            .any(|public| matches_prefix(path, public))
        {
            return Section::Public;
        }

        [
            ("/student", Section::Student),
            ("/instructor", Section::Instructor),
            ("/manager", Section::Manager),
            ("/admin", Section::Admin),
        ]
        .into_iter()
        .find(|(prefix, _)| matches_prefix(path, prefix))
        .map(|(_, section)| section)
        .unwrap_or(Section::General)
    }

    pub fn evaluate(&self, path: &str, session: &SessionView) -> GuardDecision {
        let section = self.classify(path);

        if section == Section::Public {
            if session.valid && matches_prefix(strip_query(path), &self.login_path) {
                return GuardDecision::RedirectToRoleHome(session.role.unwrap_or(Role::Guest));
            }
            return GuardDecision::Allow;
        }

        if !session.valid {
            return GuardDecision::RedirectToLogin {
                return_to: path.to_string(),
            };
        }

        match section.required_role() {
            Some(required) if session.role != Some(required) => GuardDecision::RedirectHome,
            _ => GuardDecision::Allow,
        }
    }

    /// Where to send the user for `decision`, `None` for [`GuardDecision::Allow`].
    pub fn location(&self, decision: &GuardDecision) -> Option<String> {
        match decision {
            GuardDecision::Allow => None,
            GuardDecision::RedirectToLogin { return_to } => {
                let encoded: String = form_urlencoded::byte_serialize(return_to.as_bytes()).collect();
                Some(format!("{}?redirect={}", self.login_path, encoded))
            }
            GuardDecision::RedirectHome => Some(self.home_path.clone()),
            GuardDecision::RedirectToRoleHome(role) => Some(role.home_path().to_string()),
        }
    }
}

fn strip_query(path: &str) -> &str {
    path.split(['?', '#']).next().unwrap_or(path)
}

/// `/student` matches `/student` and `/student/...`, not `/students`.
fn matches_prefix(path: &str, prefix: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}
