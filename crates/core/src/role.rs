//! Role hierarchy for access control.
//!
//! Roles are ordered: `Employee < Manager < Hr < Admin`. Handlers use
//! the ordering to gate operations with a single comparison.

use serde::{Deserialize, Serialize};
use std::fmt;

/// User role within the organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Regular employee, can manage own requests and view own payslips.
    Employee,
    /// Manager, can review leave requests from direct reports.
    Manager,
    /// HR staff, can manage employees, leave assignment, and payroll.
    Hr,
    /// Administrator, full access including user management.
    Admin,
}

impl Role {
    /// Returns the string representation of the role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Employee => "EMPLOYEE",
            Self::Manager => "MANAGER",
            Self::Hr => "HR",
            Self::Admin => "ADMIN",
        }
    }

    /// Parses a role from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "EMPLOYEE" => Some(Self::Employee),
            "MANAGER" => Some(Self::Manager),
            "HR" => Some(Self::Hr),
            "ADMIN" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Returns true if this role can approve or reject leave requests.
    #[must_use]
    pub fn can_review_requests(&self) -> bool {
        *self >= Self::Manager
    }

    /// Returns true if this role can run payroll and assign leave balances.
    #[must_use]
    pub fn can_manage_hr(&self) -> bool {
        *self >= Self::Hr
    }

    /// Returns true if this role can manage login accounts.
    #[must_use]
    pub fn can_manage_users(&self) -> bool {
        *self == Self::Admin
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_ordering() {
        assert!(Role::Employee < Role::Manager);
        assert!(Role::Manager < Role::Hr);
        assert!(Role::Hr < Role::Admin);
    }

    #[test]
    fn test_role_parse_roundtrip() {
        for role in [Role::Employee, Role::Manager, Role::Hr, Role::Admin] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("hr"), Some(Role::Hr));
        assert_eq!(Role::parse("superuser"), None);
    }

    #[test]
    fn test_review_permission() {
        assert!(!Role::Employee.can_review_requests());
        assert!(Role::Manager.can_review_requests());
        assert!(Role::Hr.can_review_requests());
        assert!(Role::Admin.can_review_requests());
    }

    #[test]
    fn test_hr_permission() {
        assert!(!Role::Employee.can_manage_hr());
        assert!(!Role::Manager.can_manage_hr());
        assert!(Role::Hr.can_manage_hr());
        assert!(Role::Admin.can_manage_hr());
    }

    #[test]
    fn test_user_management_is_admin_only() {
        assert!(!Role::Hr.can_manage_users());
        assert!(Role::Admin.can_manage_users());
    }
}
