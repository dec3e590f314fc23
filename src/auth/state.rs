//! Observable auth states and post-operation landing hints

use crate::client::models::{AuthRecord, Role};

/// Snapshot published by the auth provider.
///
/// A provider moves `Uninitialized -> Loading` when constructed, leaves
/// `Loading` exactly once after its first read of the session slot, and from
/// then on alternates between `Authenticated` and `Unauthenticated`.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthState {
    Uninitialized,
    Loading,
    Authenticated(AuthRecord),
    Unauthenticated,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated(_))
    }

    pub fn record(&self) -> Option<&AuthRecord> {
        match self {
            AuthState::Authenticated(record) => Some(record),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AuthState::Uninitialized => "uninitialized",
            AuthState::Loading => "loading",
            AuthState::Authenticated(_) => "authenticated",
            AuthState::Unauthenticated => "unauthenticated",
        }
    }
}

/// Where the seller should go next after a successful operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Landing {
    /// Signed in with a store
    Dashboard,
    /// Signed in, but no store exists yet
    CreateStore,
    /// Registered as a store owner
    StoreDashboard,
    /// Registered as a customer
    CustomerDashboard,
}

impl Landing {
    /// Landing after sign-in, decided by whether the account has a store
    pub fn after_login(record: &AuthRecord) -> Self {
        if record.store.is_some() {
            Landing::Dashboard
        } else {
            Landing::CreateStore
        }
    }

    /// Landing after registration, decided by the chosen role
    pub fn after_signup(role: Role) -> Self {
        match role {
            Role::StoreOwner => Landing::StoreDashboard,
            Role::Customer => Landing::CustomerDashboard,
        }
    }

    /// Web route of the landing page
    pub fn path(self) -> &'static str {
        match self {
            Landing::Dashboard => "/dashboard",
            Landing::CreateStore => "/auth/create-store",
            Landing::StoreDashboard => "/dashboard/store",
            Landing::CustomerDashboard => "/dashboard/customer",
        }
    }
}
