//! Closed role enumerations and the effective-role precedence table.
//!
//! Roles are stored as snake_case text in the database but are always parsed
//! into these enums before use. An unknown role string is an error, never a
//! silent fallback. Authorization decisions compare a single
//! [`EffectiveRole`] resolved once per request via [`effective_role`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a stored role string does not match any known role.
#[derive(Debug, thiserror::Error)]
#[error("Unknown role: {0}")]
pub struct ParseRoleError(pub String);

/// Base account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Guest,
    User,
    Admin,
}

impl Role {
    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Guest => "guest",
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "guest" => Ok(Role::Guest),
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(ParseRoleError(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Enterprise role assigned to employees of a registered enterprise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnterpriseRole {
    Technician,
    SeniorTechnician,
    BranchManager,
    EnterpriseAdmin,
}

impl EnterpriseRole {
    pub const fn as_str(self) -> &'static str {
        match self {
            EnterpriseRole::Technician => "technician",
            EnterpriseRole::SeniorTechnician => "senior_technician",
            EnterpriseRole::BranchManager => "branch_manager",
            EnterpriseRole::EnterpriseAdmin => "enterprise_admin",
        }
    }
}

impl FromStr for EnterpriseRole {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "technician" => Ok(EnterpriseRole::Technician),
            "senior_technician" => Ok(EnterpriseRole::SeniorTechnician),
            "branch_manager" => Ok(EnterpriseRole::BranchManager),
            "enterprise_admin" => Ok(EnterpriseRole::EnterpriseAdmin),
            other => Err(ParseRoleError(other.to_string())),
        }
    }
}

impl fmt::Display for EnterpriseRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single role value authorization checks compare against.
///
/// The variant order IS the precedence table: a platform admin outranks every
/// enterprise role, enterprise roles outrank a plain user, and guests rank
/// lowest. Derived `Ord` makes the ordering explicit and testable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectiveRole {
    Guest,
    User,
    Technician,
    SeniorTechnician,
    BranchManager,
    EnterpriseAdmin,
    Admin,
}

impl EffectiveRole {
    pub const fn as_str(self) -> &'static str {
        match self {
            EffectiveRole::Guest => "guest",
            EffectiveRole::User => "user",
            EffectiveRole::Technician => "technician",
            EffectiveRole::SeniorTechnician => "senior_technician",
            EffectiveRole::BranchManager => "branch_manager",
            EffectiveRole::EnterpriseAdmin => "enterprise_admin",
            EffectiveRole::Admin => "admin",
        }
    }

    /// Numeric precedence rank (higher outranks lower).
    pub const fn rank(self) -> u8 {
        self as u8
    }

    /// Whether this role meets or exceeds the required minimum role.
    pub const fn satisfies(self, required: EffectiveRole) -> bool {
        self.rank() >= required.rank()
    }
}

impl fmt::Display for EffectiveRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve a base role and optional enterprise role into one effective role.
///
/// An admin is an admin regardless of enterprise assignment; a guest's
/// enterprise role (which should never exist) is ignored.
pub fn effective_role(role: Role, enterprise_role: Option<EnterpriseRole>) -> EffectiveRole {
    match role {
        Role::Admin => EffectiveRole::Admin,
        Role::Guest => EffectiveRole::Guest,
        Role::User => match enterprise_role {
            None => EffectiveRole::User,
            Some(EnterpriseRole::Technician) => EffectiveRole::Technician,
            Some(EnterpriseRole::SeniorTechnician) => EffectiveRole::SeniorTechnician,
            Some(EnterpriseRole::BranchManager) => EffectiveRole::BranchManager,
            Some(EnterpriseRole::EnterpriseAdmin) => EffectiveRole::EnterpriseAdmin,
        },
    }
}
