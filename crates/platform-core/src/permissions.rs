//! Permission authority contracts.
//!
//! Some hosts require an explicit, user-consented grant before motion or
//! orientation events are delivered. Grants are requested asynchronously and
//! may never resolve; callers wanting a deadline apply their own timeout.

use std::collections::HashMap;

pub use motionflow_common::error::PermissionCategory;

/// Outcome of a permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionState {
    Granted,
    Denied,
}

impl PermissionState {
    pub fn is_granted(&self) -> bool {
        matches!(self, PermissionState::Granted)
    }
}

/// Host permission authority.
#[allow(async_fn_in_trait)]
pub trait PermissionAuthority {
    /// Ask the host to grant access to a sensor category.
    async fn request(&mut self, category: PermissionCategory) -> PermissionState;
}

/// Marker for hosts that do not gate sensor access.
///
/// Uninhabited: it only exists to name the permission type of an ungated host.
#[derive(Debug)]
pub enum Ungated {}

impl PermissionAuthority for Ungated {
    async fn request(&mut self, _category: PermissionCategory) -> PermissionState {
        match *self {}
    }
}

/// Permission authority answering from a fixed table.
///
/// Categories without an entry are granted.
#[derive(Debug, Default)]
pub struct ScriptedPermissions {
    answers: HashMap<PermissionCategory, PermissionState>,
    requests: Vec<PermissionCategory>,
    never_resolve: bool,
}

impl ScriptedPermissions {
    /// Grant everything.
    pub fn granting() -> Self {
        Self::default()
    }

    /// Deny the given category.
    pub fn deny(mut self, category: PermissionCategory) -> Self {
        self.answers.insert(category, PermissionState::Denied);
        self
    }

    /// Requests stay pending forever, like a prompt the user never answers.
    pub fn never_resolving() -> Self {
        Self {
            never_resolve: true,
            ..Self::default()
        }
    }

    /// Categories requested so far, in order.
    pub fn requests(&self) -> &[PermissionCategory] {
        &self.requests
    }
}

impl PermissionAuthority for ScriptedPermissions {
    async fn request(&mut self, category: PermissionCategory) -> PermissionState {
        self.requests.push(category);
        if self.never_resolve {
            std::future::pending::<()>().await;
        }
        self.answers
            .get(&category)
            .copied()
            .unwrap_or(PermissionState::Granted)
    }
}
