//! Active enums mapped to database enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User role controlling what a caller may do.
///
/// Readers may only read, writers may mutate cash-count records, admins may
/// additionally manage users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_role")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Read-only access.
    #[sea_orm(string_value = "reader")]
    Reader,
    /// Read/write access to cash-count records.
    #[sea_orm(string_value = "writer")]
    Writer,
    /// Full access including user management.
    #[sea_orm(string_value = "admin")]
    Admin,
}

impl UserRole {
    /// Whether this role may mutate cash-count records.
    #[must_use]
    pub const fn can_write(self) -> bool {
        matches!(self, Self::Writer | Self::Admin)
    }

    /// Whether this role may manage users.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Returns the wire name of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reader => "reader",
            Self::Writer => "writer",
            Self::Admin => "admin",
        }
    }

    /// Parses a role from its wire name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "reader" => Some(Self::Reader),
            "writer" => Some(Self::Writer),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reader_cannot_write() {
        assert!(!UserRole::Reader.can_write());
        assert!(!UserRole::Reader.is_admin());
    }

    #[test]
    fn writer_can_write_but_not_admin() {
        assert!(UserRole::Writer.can_write());
        assert!(!UserRole::Writer.is_admin());
    }

    #[test]
    fn admin_can_do_both() {
        assert!(UserRole::Admin.can_write());
        assert!(UserRole::Admin.is_admin());
    }

    #[test]
    fn wire_names_round_trip() {
        for role in [UserRole::Reader, UserRole::Writer, UserRole::Admin] {
            assert_eq!(UserRole::from_name(role.as_str()), Some(role));
        }
        assert_eq!(UserRole::from_name("owner"), None);
    }
}
