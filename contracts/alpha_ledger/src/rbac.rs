//! # RBAC: Role-Based Access Control
//!
//! Who may run the admin console:
//!
//! ```text
//! SuperAdmin
//!     └── Admin
//! ```
//!
//! The investor is not a role; investor entry points check the caller
//! against the profile bound at `init`.
//!
//! ## Storage layout
//!
//! - `RbacKey::SuperAdmin` → `Address`: the one and only super-admin.
//! - `RbacKey::Role(addr)` → `Role`: the role held by `addr`, if any.
//!
//! ## Event emissions
//!
//! | Event topic prefix | Trigger |
//! |--------------------|---------|
//! | `role_set`         | Role granted or replaced |
//! | `role_del`         | Role revoked |
//!
//! ## Rules
//!
//! - `SuperAdmin` is never granted; the seat moves only via `transfer_super_admin`.
//! - `SuperAdmin` cannot be removed via `revoke_role`; use `transfer_super_admin`.
//! - An address holds at most one role; granting replaces the old one.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::Error;

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Role {
    /// Full control: grants and revokes admins, transfers its own seat.
    SuperAdmin,
    /// Reviews deposits and withdrawals, credits wallets, maintains the log.
    Admin,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RbacKey {
    Role(Address),
    SuperAdmin,
}

fn store_role(env: &Env, address: &Address, role: Role) {
    env.storage()
        .persistent()
        .set(&RbacKey::Role(address.clone()), &role);
}

fn clear_role(env: &Env, address: &Address) {
    env.storage()
        .persistent()
        .remove(&RbacKey::Role(address.clone()));
}

pub fn get_role(env: &Env, address: &Address) -> Option<Role> {
    env.storage()
        .persistent()
        .get(&RbacKey::Role(address.clone()))
}

pub fn get_super_admin(env: &Env) -> Option<Address> {
    env.storage().persistent().get(&RbacKey::SuperAdmin)
}

// ─────────────────────────────────────────────────────────
// Initialisation
// ─────────────────────────────────────────────────────────

/// Set the first SuperAdmin. Fails with `AlreadyInitialized` on a second call.
pub fn init_super_admin(env: &Env, super_admin: &Address) -> Result<(), Error> {
    if env.storage().persistent().has(&RbacKey::SuperAdmin) {
        return Err(Error::AlreadyInitialized);
    }
    env.storage()
        .persistent()
        .set(&RbacKey::SuperAdmin, super_admin);
    store_role(env, super_admin, Role::SuperAdmin);
    emit_set(env, super_admin, Role::SuperAdmin, None);
    Ok(())
}

// ─────────────────────────────────────────────────────────
// Role assignment
// ─────────────────────────────────────────────────────────

pub fn grant_role(env: &Env, caller: &Address, target: &Address, role: Role) -> Result<(), Error> {
    require_admin_or_above(env, caller)?;

    // The SuperAdmin seat only moves through transfer_super_admin.
    if role == Role::SuperAdmin || get_role(env, target) == Some(Role::SuperAdmin) {
        return Err(Error::NotAuthorized);
    }

    store_role(env, target, role);
    emit_set(env, target, role, Some(caller.clone()));
    Ok(())
}

/// Revoke whatever role `target` holds. No-op if it holds none.
pub fn revoke_role(env: &Env, caller: &Address, target: &Address) -> Result<(), Error> {
    require_admin_or_above(env, caller)?;

    if get_super_admin(env).as_ref() == Some(target) {
        return Err(Error::NotAuthorized);
    }

    if get_role(env, target).is_some() {
        clear_role(env, target);
        emit_revoke(env, target, Some(caller.clone()));
    }
    Ok(())
}

/// Hand the SuperAdmin seat to `new`. The old holder keeps no role.
pub fn transfer_super_admin(env: &Env, current: &Address, new: &Address) -> Result<(), Error> {
    require_role(env, current, Role::SuperAdmin)?;

    clear_role(env, current);
    emit_revoke(env, current, Some(current.clone()));

    env.storage().persistent().set(&RbacKey::SuperAdmin, new);
    store_role(env, new, Role::SuperAdmin);
    emit_set(env, new, Role::SuperAdmin, Some(current.clone()));
    Ok(())
}

// ─────────────────────────────────────────────────────────
// Access guards
// ─────────────────────────────────────────────────────────

pub fn require_role(env: &Env, address: &Address, required: Role) -> Result<(), Error> {
    match get_role(env, address) {
        Some(r) if r == required => Ok(()),
        _ => Err(Error::NotAuthorized),
    }
}

#[inline]
pub fn require_admin_or_above(env: &Env, address: &Address) -> Result<(), Error> {
    match get_role(env, address) {
        Some(Role::SuperAdmin) | Some(Role::Admin) => Ok(()),
        None => Err(Error::NotAuthorized),
    }
}

pub fn has_role(env: &Env, address: &Address, role: Role) -> bool {
    get_role(env, address) == Some(role)
}

// ─────────────────────────────────────────────────────────
// Internal helpers
// ─────────────────────────────────────────────────────────

/// Topic: `(role_set, target, role)`, data: granting address if any.
fn emit_set(env: &Env, target: &Address, role: Role, by: Option<Address>) {
    env.events()
        .publish((symbol_short!("role_set"), target.clone(), role_symbol(role)), by);
}

fn emit_revoke(env: &Env, target: &Address, by: Option<Address>) {
    env.events()
        .publish((symbol_short!("role_del"), target.clone()), by);
}

fn role_symbol(role: Role) -> Symbol {
    match role {
        Role::SuperAdmin => symbol_short!("supadmin"),
        Role::Admin => symbol_short!("admin"),
    }
}
