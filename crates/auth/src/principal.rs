use liquorledger_core::{PrincipalId, UserId};

use crate::Role;

/// A caller resolved against the user directory.
///
/// `user` and `role` are `None` when the principal has no registered user;
/// such callers may read but never mutate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub id: PrincipalId,
    pub user: Option<UserId>,
    pub role: Option<Role>,
}

impl Principal {
    pub fn anonymous(id: PrincipalId) -> Self {
        Self {
            id,
            user: None,
            role: None,
        }
    }

    pub fn registered(id: PrincipalId, user: UserId, role: Role) -> Self {
        Self {
            id,
            user: Some(user),
            role: Some(role),
        }
    }

    pub fn is_registered(&self) -> bool {
        self.role.is_some()
    }
}
