//! Users, roles, and companies.
//!
//! The directory is the engine's view of who exists: approval chains copy
//! each approver's current role from here, and the manager relationship
//! drives both rule normalization and fallback routing.

use serde::{Deserialize, Serialize};
use std::fmt;

use expensa_shared::{CompanyId, CurrencyCode, UserId};

/// A user's role within their company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Submits expense claims.
    Employee,
    /// Approves claims for direct reports.
    Manager,
    /// Senior approver for escalated claims.
    Director,
    /// Company administrator; configures rules and users.
    Admin,
}

impl Role {
    /// Parses a role from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "employee" => Some(Self::Employee),
            "manager" => Some(Self::Manager),
            "director" => Some(Self::Director),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Returns the string representation of the role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Employee => "employee",
            Self::Manager => "manager",
            Self::Director => "director",
            Self::Admin => "admin",
        }
    }

    /// Returns true if users with this role act on approval steps.
    #[must_use]
    pub fn can_approve(&self) -> bool {
        matches!(self, Self::Manager | Self::Director | Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A member of a company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address, unique within the company.
    pub email: String,
    /// Role within the company.
    pub role: Role,
    /// Direct manager, if any. Must reference a user in the same company.
    pub manager_id: Option<UserId>,
    /// Owning company.
    pub company_id: CompanyId,
}

/// A company and its base currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Unique identifier.
    pub id: CompanyId,
    /// Display name.
    pub name: String,
    /// Base currency; every expense's local amount is denominated in it.
    /// Immutable after creation.
    pub currency: CurrencyCode,
    /// Country of registration.
    pub country: String,
}
