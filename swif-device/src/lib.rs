//
// Copyright (c) The Swif Core Contributors
//
// SPDX-License-Identifier: MIT
//

#![warn(rust_2018_idioms)]

pub mod error;
pub mod simulated;

use async_trait::async_trait;
use derive_new::new;
use swif_model::{Acl, InterfaceId, Manifest, Platform, PropertyName, ResourceState};

pub use crate::error::Error;
pub use crate::simulated::SimulatedSwitch;

// Outcome of a manifest application.
#[derive(Clone, Debug, Eq, PartialEq, new)]
pub struct ApplyReport {
    // Whether the device configuration changed.
    pub changed: bool,
    // Manifest properties whose observed value changed.
    pub changed_props: Vec<PropertyName>,
}

// Seam between the harness and the managed device.
//
// The harness never talks to a device directly; everything goes through
// this trait. The only implementation shipped with this workspace is the
// in-memory [`SimulatedSwitch`].
#[async_trait]
pub trait DeviceAgent: Send {
    // Operating system of the managed device.
    fn platform(&self) -> Platform;

    // Inventory of physical interfaces, ordered by name.
    async fn interfaces(&self) -> Result<Vec<InterfaceId>, Error>;

    // Observed state of a single interface.
    async fn resource_state(
        &self,
        intf: &InterfaceId,
    ) -> Result<ResourceState, Error>;

    // Applies desired state to a single interface.
    async fn apply(
        &mut self,
        intf: &InterfaceId,
        manifest: &Manifest,
    ) -> Result<ApplyReport, Error>;

    // Creates the given ACL if it does not exist yet.
    async fn ensure_acl(&mut self, acl: &Acl) -> Result<(), Error>;

    // Toggles the system-wide default switchport mode for defaulted
    // interfaces.
    async fn system_default_switchport(
        &mut self,
        enabled: bool,
    ) -> Result<(), Error>;

    // Resets an interface to platform defaults, deleting its
    // sub-interfaces.
    async fn preclean(&mut self, intf: &InterfaceId) -> Result<(), Error>;
}

// ===== impl ApplyReport =====

impl ApplyReport {
    // Exit code of the run, following the convention the expected-code
    // lists in test cases use: 0 when the device was already in sync, 2
    // when changes were applied.
    pub fn exit_code(&self) -> u8 {
        if self.changed { 2 } else { 0 }
    }
}
