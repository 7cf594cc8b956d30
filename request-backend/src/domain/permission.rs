// src/domain/permission.rs

use serde::{Deserialize, Serialize};

/// ユーザー権限のビット値
///
/// 権限はi32のビットマスクとして保存される。Adminビットを持つユーザーは
/// すべての権限チェックを通過する。
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i32)]
pub enum Permission {
    None = 0,
    Admin = 2,
    ManageSettings = 4,
    ManageUsers = 8,
    ManageRequests = 16,
    Request = 32,
    AutoApprove = 128,
}

/// 統合された権限チェック機能
pub struct PermissionChecker;

impl PermissionChecker {
    /// ビットマスクが指定された権限を含むかチェック
    ///
    /// Admin権限は他のすべての権限を包含する。
    pub fn has_permission(permissions: i32, permission: Permission) -> bool {
        if permissions & (Permission::Admin as i32) != 0 {
            return true;
        }
        permissions & (permission as i32) != 0
    }

    /// Adminビットそのものを含むかチェック（Adminによる包含なし）
    pub fn contains_flag(permissions: i32, permission: Permission) -> bool {
        permissions & (permission as i32) != 0
    }

    /// 管理者権限があるかチェック
    pub fn is_admin(permissions: i32) -> bool {
        Self::contains_flag(permissions, Permission::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_implies_every_permission() {
        let mask = Permission::Admin as i32;
        assert!(PermissionChecker::has_permission(mask, Permission::ManageSettings));
        assert!(PermissionChecker::has_permission(mask, Permission::ManageUsers));
        assert!(PermissionChecker::has_permission(mask, Permission::Request));
    }

    #[test]
    fn test_non_admin_needs_exact_flag() {
        let mask = Permission::ManageRequests as i32 | Permission::Request as i32;
        assert!(PermissionChecker::has_permission(mask, Permission::ManageRequests));
        assert!(PermissionChecker::has_permission(mask, Permission::Request));
        assert!(!PermissionChecker::has_permission(mask, Permission::ManageSettings));
        assert!(!PermissionChecker::is_admin(mask));
    }

    #[test]
    fn test_contains_flag_ignores_admin_inclusion() {
        let mask = Permission::Admin as i32;
        assert!(!PermissionChecker::contains_flag(mask, Permission::ManageSettings));
        assert!(PermissionChecker::contains_flag(mask, Permission::Admin));
    }

    #[test]
    fn test_empty_mask_has_nothing() {
        assert!(!PermissionChecker::has_permission(0, Permission::Request));
        assert!(!PermissionChecker::is_admin(0));
    }
}
