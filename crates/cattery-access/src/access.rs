//! The [`AccessControl`] component: admin and grantee set management.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use cattery_types::{Account, CallerId, GrantKind, GrantTarget, PetEvent};

use crate::AccessError;

/// Owns the root-admin identity, the secondary-admin set, and the
/// capability-grantee set.
///
/// All mutations are all-or-nothing: a rejected call changes neither set.
/// Admin additions may be performed by any admin; capability grants and
/// revocations are restricted to the root admin, so the capability set has
/// a single authority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessControl {
    /// The account that constructed the engine. Always an admin.
    root_admin: Account,
    /// All admin accounts, including the root admin.
    admins: BTreeSet<Account>,
    /// Component callers holding a capability grant.
    grantees: BTreeSet<CallerId>,
}

impl AccessControl {
    /// Create a new access-control state with the given root admin.
    ///
    /// The root admin is a member of the admin set from construction.
    pub fn new(root_admin: Account) -> Self {
        let mut admins = BTreeSet::new();
        admins.insert(root_admin);
        Self {
            root_admin,
            admins,
            grantees: BTreeSet::new(),
        }
    }

    /// Add a capability grantee during engine wiring, before any command
    /// is accepted.
    ///
    /// This is construction-time plumbing (the engine granting its own
    /// incubator), so no caller check applies. After construction, the
    /// only path into the grantee set is [`grant_capability`].
    ///
    /// [`grant_capability`]: AccessControl::grant_capability
    #[must_use]
    pub fn with_grantee(mut self, caller: CallerId) -> Self {
        self.grantees.insert(caller);
        self
    }

    /// The root admin configured at construction.
    pub const fn root_admin(&self) -> Account {
        self.root_admin
    }

    /// Whether the account is an admin (root or secondary).
    pub fn is_admin(&self, account: Account) -> bool {
        self.admins.contains(&account)
    }

    /// Whether the component caller holds a capability grant.
    pub fn is_granted_caller(&self, caller: CallerId) -> bool {
        self.grantees.contains(&caller)
    }

    /// Add `target` to the admin set.
    ///
    /// Callable by any admin. Idempotent: adding an existing admin is a
    /// no-op returning `Ok(None)`; a first-time addition returns the
    /// [`PetEvent::Granted`] event.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::Unauthorized`] if `caller` is not an admin.
    pub fn grant_admin(
        &mut self,
        caller: Account,
        target: Account,
    ) -> Result<Option<PetEvent>, AccessError> {
        if !self.is_admin(caller) {
            return Err(AccessError::Unauthorized { caller });
        }

        if !self.admins.insert(target) {
            return Ok(None);
        }

        tracing::debug!(%caller, %target, "admin granted");
        Ok(Some(PetEvent::Granted {
            kind: GrantKind::Admin,
            target: GrantTarget::Account(target),
        }))
    }

    /// Add `target` to the capability-grantee set.
    ///
    /// Callable only by the root admin. Idempotent like [`grant_admin`].
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::NotRootAdmin`] if `caller` is not the root
    /// admin.
    ///
    /// [`grant_admin`]: AccessControl::grant_admin
    pub fn grant_capability(
        &mut self,
        caller: Account,
        target: CallerId,
    ) -> Result<Option<PetEvent>, AccessError> {
        if caller != self.root_admin {
            return Err(AccessError::NotRootAdmin { caller });
        }

        if !self.grantees.insert(target) {
            return Ok(None);
        }

        tracing::debug!(%caller, %target, "capability granted");
        Ok(Some(PetEvent::Granted {
            kind: GrantKind::Capability,
            target: GrantTarget::Caller(target),
        }))
    }

    /// Remove `target` from the capability-grantee set.
    ///
    /// Callable only by the root admin. Revoking an absent grant is a
    /// no-op. Returns whether the grant was present.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::NotRootAdmin`] if `caller` is not the root
    /// admin.
    pub fn revoke_capability(
        &mut self,
        caller: Account,
        target: CallerId,
    ) -> Result<bool, AccessError> {
        if caller != self.root_admin {
            return Err(AccessError::NotRootAdmin { caller });
        }

        let removed = self.grantees.remove(&target);
        if removed {
            tracing::debug!(%caller, %target, "capability revoked");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_admin_is_admin_from_construction() {
        let root = Account::new();
        let access = AccessControl::new(root);
        assert!(access.is_admin(root));
        assert_eq!(access.root_admin(), root);
    }

    #[test]
    fn grant_admin_adds_member_and_emits_event() {
        let root = Account::new();
        let other = Account::new();
        let mut access = AccessControl::new(root);

        let result = access.grant_admin(root, other);
        assert!(matches!(
            result,
            Ok(Some(PetEvent::Granted {
                kind: GrantKind::Admin,
                target: GrantTarget::Account(t),
            })) if t == other
        ));
        assert!(access.is_admin(other));
    }

    #[test]
    fn grant_admin_is_idempotent() {
        let root = Account::new();
        let other = Account::new();
        let mut access = AccessControl::new(root);

        let first = access.grant_admin(root, other);
        assert!(matches!(first, Ok(Some(_))));

        // Second grant succeeds but emits nothing.
        let second = access.grant_admin(root, other);
        assert!(matches!(second, Ok(None)));
        assert!(access.is_admin(other));
    }

    #[test]
    fn secondary_admin_can_grant_admin() {
        let root = Account::new();
        let second = Account::new();
        let third = Account::new();
        let mut access = AccessControl::new(root);

        assert!(access.grant_admin(root, second).is_ok());
        assert!(access.grant_admin(second, third).is_ok());
        assert!(access.is_admin(third));
    }

    #[test]
    fn non_admin_cannot_grant_admin() {
        let root = Account::new();
        let outsider = Account::new();
        let target = Account::new();
        let mut access = AccessControl::new(root);

        let result = access.grant_admin(outsider, target);
        assert!(matches!(
            result,
            Err(AccessError::Unauthorized { caller }) if caller == outsider
        ));
        // No state change on failure.
        assert!(!access.is_admin(target));
    }

    #[test]
    fn only_root_admin_grants_capability() {
        let root = Account::new();
        let second = Account::new();
        let component = CallerId::new();
        let mut access = AccessControl::new(root);
        assert!(access.grant_admin(root, second).is_ok());

        // A secondary admin is rejected.
        let result = access.grant_capability(second, component);
        assert!(matches!(result, Err(AccessError::NotRootAdmin { .. })));
        assert!(!access.is_granted_caller(component));

        // The root admin succeeds.
        assert!(access.grant_capability(root, component).is_ok());
        assert!(access.is_granted_caller(component));
    }

    #[test]
    fn revoke_capability_removes_grant() {
        let root = Account::new();
        let component = CallerId::new();
        let mut access = AccessControl::new(root);

        assert!(access.grant_capability(root, component).is_ok());
        assert_eq!(access.revoke_capability(root, component).ok(), Some(true));
        assert!(!access.is_granted_caller(component));

        // Revoking again is a no-op.
        assert_eq!(access.revoke_capability(root, component).ok(), Some(false));
    }

    #[test]
    fn admin_and_grantee_sets_are_independent() {
        let root = Account::new();
        let component = CallerId::new();
        let mut access = AccessControl::new(root);

        assert!(access.grant_capability(root, component).is_ok());
        // A capability grant confers no admin status on any account, and
        // admin status confers no capability on any caller id.
        assert!(access.is_granted_caller(component));
        assert!(!access.is_admin(Account::from(component.into_inner())));
    }

    #[test]
    fn with_grantee_seeds_capability() {
        let root = Account::new();
        let component = CallerId::new();
        let access = AccessControl::new(root).with_grantee(component);
        assert!(access.is_granted_caller(component));
    }
}
