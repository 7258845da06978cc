use liquorledger_core::{LedgerError, LedgerResult};

use crate::{Principal, Role};

/// Mutating operations subject to the role rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    AddProduct,
    UpdateProduct,
    DeleteProduct,
    SellProduct,
    AdjustInventory,
    LogSupplyChainEvent,
    ManageUsers,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::AddProduct => "add product",
            Action::UpdateProduct => "update product",
            Action::DeleteProduct => "delete product",
            Action::SellProduct => "sell product",
            Action::AdjustInventory => "adjust inventory",
            Action::LogSupplyChainEvent => "log supply chain event",
            Action::ManageUsers => "manage users",
        }
    }

    /// Roles allowed to perform this action.
    pub fn allowed_roles(&self) -> &'static [Role] {
        match self {
            Action::AddProduct
            | Action::UpdateProduct
            | Action::DeleteProduct
            | Action::SellProduct
            | Action::AdjustInventory
            | Action::LogSupplyChainEvent => &Role::OPERATORS,
            Action::ManageUsers => &[Role::Admin],
        }
    }
}

impl core::fmt::Display for Action {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authorize a resolved principal for an action.
///
/// - No IO
/// - No panics
/// - No business logic (pure policy check)
pub fn authorize(principal: &Principal, action: Action) -> LedgerResult<Role> {
    let Some(role) = principal.role else {
        return Err(LedgerError::unauthorized(format!(
            "principal {} is not a registered user and may not {}",
            principal.id, action
        )));
    };

    if action.allowed_roles().contains(&role) {
        Ok(role)
    } else {
        Err(LedgerError::unauthorized(format!(
            "role {role} may not {action}"
        )))
    }
}
