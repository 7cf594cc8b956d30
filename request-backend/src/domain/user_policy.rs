// src/domain/user_policy.rs

use super::permission::{Permission, PermissionChecker};
use super::user_model::OWNER_USER_ID;

/// 操作を行う側のユーザー
#[derive(Clone, Copy, Debug)]
pub struct Actor {
    pub user_id: i32,
    pub permissions: i32,
}

/// ユーザー更新の内容
#[derive(Clone, Copy, Debug)]
pub struct UpdateAttempt {
    pub target_id: i32,
    /// リクエストボディで指定された新しい権限（省略時はNone）
    pub requested_permissions: Option<i32>,
}

/// ポリシー拒否の結果
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PolicyDenial {
    pub policy: &'static str,
    pub reason: String,
}

type PolicyFn = fn(&Actor, &UpdateAttempt) -> Option<String>;

/// 名前付きの更新ポリシー
pub struct UpdatePolicy {
    pub name: &'static str,
    check: PolicyFn,
}

impl UpdatePolicy {
    pub fn evaluate(&self, actor: &Actor, attempt: &UpdateAttempt) -> Option<PolicyDenial> {
        (self.check)(actor, attempt).map(|reason| PolicyDenial {
            policy: self.name,
            reason,
        })
    }
}

fn owner_protection(actor: &Actor, attempt: &UpdateAttempt) -> Option<String> {
    if attempt.target_id == OWNER_USER_ID && actor.user_id != OWNER_USER_ID {
        return Some("Only the owner account can modify itself.".to_string());
    }
    None
}

fn admin_grant(actor: &Actor, attempt: &UpdateAttempt) -> Option<String> {
    let requested = attempt.requested_permissions?;
    if PermissionChecker::contains_flag(requested, Permission::Admin)
        && actor.user_id != OWNER_USER_ID
    {
        return Some("Only the owner account can grant administrative privileges.".to_string());
    }
    None
}

fn capability_containment(actor: &Actor, attempt: &UpdateAttempt) -> Option<String> {
    let requested = attempt.requested_permissions?;
    if PermissionChecker::contains_flag(requested, Permission::ManageSettings)
        && !PermissionChecker::has_permission(actor.permissions, Permission::ManageSettings)
    {
        return Some(
            "You cannot grant a permission tier you do not hold yourself.".to_string(),
        );
    }
    None
}

/// 更新ポリシーの評価順序
///
/// 先に定義されたポリシーが優先される。拒否は最初に該当したものを返す。
pub const UPDATE_POLICIES: &[UpdatePolicy] = &[
    UpdatePolicy {
        name: "owner-protection",
        check: owner_protection,
    },
    UpdatePolicy {
        name: "admin-grant",
        check: admin_grant,
    },
    UpdatePolicy {
        name: "capability-containment",
        check: capability_containment,
    },
];

/// ポリシーチェーン全体を順番に評価
pub fn evaluate_update(actor: &Actor, attempt: &UpdateAttempt) -> Result<(), PolicyDenial> {
    for policy in UPDATE_POLICIES {
        if let Some(denial) = policy.evaluate(actor, attempt) {
            return Err(denial);
        }
    }
    Ok(())
}
