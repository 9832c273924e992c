//! The authenticated caller, as reported by the identity service.

use serde::{Deserialize, Serialize};

/// Profile of the caller behind a bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerProfile {
    /// Identifier assigned by the identity service.
    pub user_id: String,
    pub email: Option<String>,
    pub name: Option<String>,
    /// Primary role, e.g. `administrator`.
    pub role: String,
    /// Secondary role, e.g. `IT`.
    pub sub_role: Option<String>,
}

impl CallerProfile {
    /// The back-office is reserved for administrators of the IT area.
    ///
    /// Role must be `administrator` or `admin` and sub-role `IT`, both
    /// compared case-insensitively.
    pub fn is_it_administrator(&self) -> bool {
        let role = self.role.trim();
        let is_admin =
            role.eq_ignore_ascii_case("administrator") || role.eq_ignore_ascii_case("admin");
        let is_it = self
            .sub_role
            .as_deref()
            .is_some_and(|sub| sub.trim().eq_ignore_ascii_case("it"));
        is_admin && is_it
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(role: &str, sub_role: Option<&str>) -> CallerProfile {
        CallerProfile {
            user_id: "u-1".to_string(),
            email: Some("it@uni.edu".to_string()),
            name: None,
            role: role.to_string(),
            sub_role: sub_role.map(str::to_string),
        }
    }

    #[test]
    fn test_it_administrator_is_allowed() {
        assert!(profile("administrator", Some("IT")).is_it_administrator());
        assert!(profile("Admin", Some("it")).is_it_administrator());
        assert!(profile("ADMINISTRATOR", Some(" It ")).is_it_administrator());
    }

    #[test]
    fn test_other_profiles_are_rejected() {
        assert!(!profile("administrator", None).is_it_administrator());
        assert!(!profile("administrator", Some("finance")).is_it_administrator());
        assert!(!profile("teacher", Some("IT")).is_it_administrator());
        assert!(!profile("student", None).is_it_administrator());
    }
}
