//! User directory.
//!
//! Users map an authenticated principal to a role. The ledger only consults
//! the directory for role lookups; registration and profile maintenance live
//! here so the role rule has something real to resolve against.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use liquorledger_core::{
    paginate, validation, Clock, Confirmation, Entity, EntityStore, LedgerError, LedgerResult,
    PageRequest, PrincipalId, SharedStore, UserId,
};

use crate::{authorize, Action, Principal, Role};

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    /// Principal this user record belongs to.
    pub owner: PrincipalId,
    pub username: String,
    pub role: Role,
    pub points: u64,
    pub contact_info: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Registration request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPayload {
    pub username: String,
    pub role: Role,
    pub contact_info: String,
}

/// Partial update; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpdate {
    pub username: Option<String>,
    pub role: Option<Role>,
    pub contact_info: Option<String>,
}

pub struct UserRegistry {
    users: SharedStore<User>,
    clock: Arc<dyn Clock>,
}

impl UserRegistry {
    pub fn new(users: SharedStore<User>, clock: Arc<dyn Clock>) -> Self {
        Self { users, clock }
    }

    /// Resolve a caller to its role. Unknown principals resolve to an
    /// anonymous principal rather than an error; the role rule rejects them.
    pub fn resolve(&self, principal: PrincipalId) -> LedgerResult<Principal> {
        Ok(match self.find_by_owner(principal)? {
            Some(user) => Principal::registered(principal, user.id, user.role),
            None => Principal::anonymous(principal),
        })
    }

    /// Register `owner` as a user on behalf of `caller`.
    ///
    /// A principal may register itself as a `Customer`. Any other role needs
    /// an `Admin` caller, except when the directory is still empty and the
    /// caller is registering itself (bootstrap).
    pub fn register(
        &self,
        caller: PrincipalId,
        owner: PrincipalId,
        payload: UserPayload,
    ) -> LedgerResult<User> {
        let username = validation::username(&payload.username)?;
        let contact_info = validation::required_text("contact_info", &payload.contact_info)?;

        let existing = self.users.values()?;
        let self_service = caller == owner && payload.role == Role::Customer;
        let bootstrap = caller == owner && existing.is_empty();
        if !self_service && !bootstrap {
            authorize(&self.resolve(caller)?, Action::ManageUsers)?;
        }

        if existing.iter().any(|u| u.owner == owner) {
            return Err(LedgerError::user_exists(format!(
                "principal {owner} is already registered"
            )));
        }
        if existing.iter().any(|u| same_username(&u.username, &username)) {
            return Err(LedgerError::user_exists(format!(
                "user with username {username} already exists"
            )));
        }

        let now = self.clock.now();
        let user = User {
            id: UserId::new(),
            owner,
            username,
            role: payload.role,
            points: 0,
            contact_info,
            created_at: now,
            updated_at: now,
        };
        self.users.put(user.clone())?;

        tracing::info!(user_id = %user.id, username = %user.username, role = %user.role, "user registered");
        Ok(user)
    }

    pub fn get(&self, id: UserId) -> LedgerResult<User> {
        self.users
            .get(&id.to_string())?
            .ok_or_else(|| LedgerError::user_missing(format!("user with id {id} does not exist")))
    }

    pub fn list(&self) -> LedgerResult<Vec<User>> {
        Ok(self.users.values()?)
    }

    pub fn list_page(&self, request: PageRequest) -> LedgerResult<Vec<User>> {
        paginate(self.list()?, request)
    }

    /// Update a user. Admins may change anything; users may change their own
    /// username and contact info but not their role.
    pub fn update(&self, caller: PrincipalId, id: UserId, update: UserUpdate) -> LedgerResult<User> {
        let mut user = self.get(id)?;
        let actor = self.resolve(caller)?;

        let changes_role = update.role.is_some_and(|r| r != user.role);
        let is_self = actor.user == Some(user.id);
        if changes_role || !is_self {
            authorize(&actor, Action::ManageUsers)?;
        }

        if let Some(raw) = update.username.as_deref() {
            let username = validation::username(raw)?;
            let taken = self
                .users
                .values()?
                .iter()
                .any(|u| u.id != user.id && same_username(&u.username, &username));
            if taken {
                return Err(LedgerError::user_exists(format!(
                    "username {username} is already taken"
                )));
            }
            user.username = username;
        }
        if let Some(raw) = update.contact_info.as_deref() {
            user.contact_info = validation::required_text("contact_info", raw)?;
        }
        if let Some(role) = update.role {
            user.role = role;
        }
        user.updated_at = self.clock.now();

        self.users.put(user.clone())?;
        tracing::info!(user_id = %user.id, "user updated");
        Ok(user)
    }

    pub fn delete(&self, caller: PrincipalId, id: UserId) -> LedgerResult<Confirmation> {
        authorize(&self.resolve(caller)?, Action::ManageUsers)?;

        match self.users.remove(&id.to_string())? {
            Some(user) => {
                tracing::info!(user_id = %id, username = %user.username, "user deleted");
                Ok(Confirmation::new(
                    id.to_string(),
                    format!("user with id {id} deleted successfully"),
                ))
            }
            None => Err(LedgerError::user_missing(format!(
                "user with id {id} does not exist"
            ))),
        }
    }

    fn find_by_owner(&self, owner: PrincipalId) -> LedgerResult<Option<User>> {
        Ok(self.users.values()?.into_iter().find(|u| u.owner == owner))
    }
}

fn same_username(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use liquorledger_core::{FixedClock, InMemoryStore};

    fn registry() -> UserRegistry {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap());
        UserRegistry::new(InMemoryStore::shared(), Arc::new(clock))
    }

    fn payload(username: &str, role: Role) -> UserPayload {
        UserPayload {
            username: username.to_string(),
            role,
            contact_info: "front desk".to_string(),
        }
    }

    /// Registry with a bootstrapped admin; returns the admin's principal.
    fn with_admin() -> (UserRegistry, PrincipalId) {
        let registry = registry();
        let admin = PrincipalId::new();
        registry.register(admin, admin, payload("admin", Role::Admin)).unwrap();
        (registry, admin)
    }

    #[test]
    fn first_user_may_bootstrap_as_admin() {
        let (registry, admin) = with_admin();
        let resolved = registry.resolve(admin).unwrap();
        assert_eq!(resolved.role, Some(Role::Admin));
    }

    #[test]
    fn self_registration_as_staff_requires_an_admin_once_bootstrapped() {
        let (registry, _admin) = with_admin();
        let newcomer = PrincipalId::new();

        let err = registry
            .register(newcomer, newcomer, payload("sneaky", Role::Staff))
            .unwrap_err();
        assert_eq!(err.kind(), "Unauthorized");

        let user = registry
            .register(newcomer, newcomer, payload("shopper", Role::Customer))
            .unwrap();
        assert_eq!(user.role, Role::Customer);
        assert_eq!(user.points, 0);
    }

    #[test]
    fn admin_registers_staff() {
        let (registry, admin) = with_admin();
        let clerk = PrincipalId::new();
        let user = registry.register(admin, clerk, payload("clerk", Role::Staff)).unwrap();
        assert_eq!(user.owner, clerk);
        assert_eq!(registry.resolve(clerk).unwrap().role, Some(Role::Staff));

        let users = registry.list().unwrap();
        assert_eq!(users.len(), 2);
        assert!(users.contains(&user));
    }

    #[test]
    fn usernames_are_unique_case_insensitively() {
        let (registry, admin) = with_admin();
        let other = PrincipalId::new();
        let err = registry.register(admin, other, payload("ADMIN", Role::Staff)).unwrap_err();
        assert_eq!(err.kind(), "UserAlreadyExists");
    }

    #[test]
    fn a_principal_registers_once() {
        let (registry, admin) = with_admin();
        let err = registry.register(admin, admin, payload("admin2", Role::Admin)).unwrap_err();
        assert_eq!(err.kind(), "UserAlreadyExists");
    }

    #[test]
    fn invalid_payloads_are_rejected() {
        let registry = registry();
        let p = PrincipalId::new();
        assert_eq!(
            registry.register(p, p, payload("a b", Role::Customer)).unwrap_err().kind(),
            "InvalidPayload"
        );
        let mut bad_contact = payload("valid_name", Role::Customer);
        bad_contact.contact_info = "  ".to_string();
        assert_eq!(registry.register(p, p, bad_contact).unwrap_err().kind(), "InvalidPayload");
    }

    #[test]
    fn unknown_principal_resolves_anonymous() {
        let registry = registry();
        let resolved = registry.resolve(PrincipalId::new()).unwrap();
        assert!(!resolved.is_registered());
    }

    #[test]
    fn users_edit_themselves_but_not_their_role() {
        let (registry, admin) = with_admin();
        let shopper = PrincipalId::new();
        let user = registry
            .register(shopper, shopper, payload("shopper", Role::Customer))
            .unwrap();

        let renamed = registry
            .update(
                shopper,
                user.id,
                UserUpdate {
                    contact_info: Some("555-0100".to_string()),
                    ..UserUpdate::default()
                },
            )
            .unwrap();
        assert_eq!(renamed.contact_info, "555-0100");

        let err = registry
            .update(
                shopper,
                user.id,
                UserUpdate {
                    role: Some(Role::Manager),
                    ..UserUpdate::default()
                },
            )
            .unwrap_err();
        assert_eq!(err.kind(), "Unauthorized");

        let promoted = registry
            .update(
                admin,
                user.id,
                UserUpdate {
                    role: Some(Role::Manager),
                    ..UserUpdate::default()
                },
            )
            .unwrap();
        assert_eq!(promoted.role, Role::Manager);
    }

    #[test]
    fn update_rejects_taken_username() {
        let (registry, _admin) = with_admin();
        let shopper = PrincipalId::new();
        let user = registry
            .register(shopper, shopper, payload("shopper", Role::Customer))
            .unwrap();
        let err = registry
            .update(
                shopper,
                user.id,
                UserUpdate {
                    username: Some("Admin".to_string()),
                    ..UserUpdate::default()
                },
            )
            .unwrap_err();
        assert_eq!(err.kind(), "UserAlreadyExists");
    }

    #[test]
    fn delete_requires_admin_and_existing_user() {
        let (registry, admin) = with_admin();
        let shopper = PrincipalId::new();
        let user = registry
            .register(shopper, shopper, payload("shopper", Role::Customer))
            .unwrap();

        assert_eq!(registry.delete(shopper, user.id).unwrap_err().kind(), "Unauthorized");

        let confirmation = registry.delete(admin, user.id).unwrap();
        assert_eq!(confirmation.id, user.id.to_string());
        assert_eq!(registry.get(user.id).unwrap_err().kind(), "UserDoesNotExist");
        assert_eq!(registry.delete(admin, user.id).unwrap_err().kind(), "UserDoesNotExist");
    }
}
