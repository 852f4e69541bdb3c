//! Staff roles and the permission matrix
//!
//! Authorization in the registry is role-global: a [`Role`] maps to a
//! fixed [`Permission`] set, with no per-record ownership rules. The
//! record keeps creator/updater ids for audit display only.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Staff account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Editor,
    Creator,
    Viewer,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Admin, Role::Editor, Role::Creator, Role::Viewer];

    /// Stable storage key (lowercase)
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Editor => "editor",
            Role::Creator => "creator",
            Role::Viewer => "viewer",
        }
    }

    /// Permission set carried by this role
    pub fn permissions(&self) -> Permission {
        match self {
            Role::Admin => Permission {
                can_create: true,
                can_edit: true,
                can_delete: true,
                can_manage_users: true,
            },
            Role::Editor => Permission {
                can_create: true,
                can_edit: true,
                can_delete: false,
                can_manage_users: false,
            },
            Role::Creator => Permission {
                can_create: true,
                can_edit: false,
                can_delete: false,
                can_manage_users: false,
            },
            Role::Viewer => Permission {
                can_create: false,
                can_edit: false,
                can_delete: false,
                can_manage_users: false,
            },
        }
    }

    /// Shorthand for `permissions().allows(kind)`
    pub fn allows(&self, kind: PermissionKind) -> bool {
        self.permissions().allows(kind)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown role text in a request or a stored row
#[derive(Debug, Error)]
#[error("unknown role: {0}")]
pub struct InvalidRole(pub String);

impl FromStr for Role {
    type Err = InvalidRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "editor" => Ok(Role::Editor),
            "creator" => Ok(Role::Creator),
            "viewer" => Ok(Role::Viewer),
            _ => Err(InvalidRole(s.to_string())),
        }
    }
}

/// The four capabilities gating mutations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionKind {
    Create,
    Edit,
    Delete,
    ManageUsers,
}

impl PermissionKind {
    /// Human-readable name used in rejection messages
    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionKind::Create => "create",
            PermissionKind::Edit => "edit",
            PermissionKind::Delete => "delete",
            PermissionKind::ManageUsers => "manage users",
        }
    }
}

/// Boolean capability set derived from a role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub can_create: bool,
    pub can_edit: bool,
    pub can_delete: bool,
    pub can_manage_users: bool,
}

impl Permission {
    pub fn allows(&self, kind: PermissionKind) -> bool {
        match kind {
            PermissionKind::Create => self.can_create,
            PermissionKind::Edit => self.can_edit,
            PermissionKind::Delete => self.can_delete,
            PermissionKind::ManageUsers => self.can_manage_users,
        }
    }
}
