//
// Copyright (c) The Swif Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::collections::BTreeMap;

use async_trait::async_trait;
use bitflags::bitflags;
use generational_arena::{Arena, Index};
use ipnetwork::Ipv4Network;
use swif_model::{
    Acl, AclAfi, Duplex, InterfaceId, Manifest, Platform, PropertyName,
    PropertyValue, ResourceState, SwitchportMode,
};
use tracing::debug;

use crate::error::Error;
use crate::{ApplyReport, DeviceAgent};

bitflags! {
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub struct InterfaceFlags: u8 {
        const OPERATIVE = 0x01;
        const SUBINTERFACE = 0x02;
    }
}

// In-memory switch used by the acceptance suite in place of real hardware.
#[derive(Debug)]
pub struct SimulatedSwitch {
    platform: Platform,
    interfaces: Interfaces,
    // ACL table keyed by name (1:1).
    acls: BTreeMap<String, AclAfi>,
    // System-wide default switchport mode for defaulted interfaces.
    sys_def_switchport: bool,
}

#[derive(Debug, Default)]
struct Interfaces {
    // Interface arena.
    arena: Arena<Interface>,
    // Interface binary tree keyed by name (1:1).
    name_tree: BTreeMap<InterfaceId, Index>,
}

#[derive(Debug)]
struct Interface {
    id: InterfaceId,
    flags: InterfaceFlags,
    state: ResourceState,
}

// ===== impl SimulatedSwitch =====

impl SimulatedSwitch {
    // Creates a switch with `ports` ethernet interfaces in slot 1, all at
    // platform defaults.
    pub fn new(platform: Platform, ports: u32) -> SimulatedSwitch {
        let mut switch = SimulatedSwitch {
            platform,
            interfaces: Interfaces::default(),
            acls: BTreeMap::new(),
            sys_def_switchport: false,
        };
        for port in 1..=ports {
            let id = format!("ethernet1/{port}")
                .parse()
                .expect("seeded interface names are well-formed");
            switch.seed_interface(id, InterfaceFlags::OPERATIVE);
        }
        switch
    }

    fn seed_interface(&mut self, id: InterfaceId, flags: InterfaceFlags) {
        let mut state = ResourceState::platform_default(self.platform);
        if flags.contains(InterfaceFlags::SUBINTERFACE) {
            // Sub-interfaces are routed by nature.
            state.switchport_mode = None;
        } else if self.platform.has_switchport() && self.sys_def_switchport {
            state.switchport_mode = Some(SwitchportMode::Access);
        }
        self.interfaces.insert(id, flags, state);
    }

    // Validates that every manifest property can be applied to the given
    // interface on this platform.
    fn validate(
        &self,
        intf: &InterfaceId,
        manifest: &Manifest,
    ) -> Result<(), Error> {
        for (prop, value) in manifest.iter() {
            if !self.platform.supports(prop) {
                return Err(Error::UnsupportedProperty(self.platform, prop));
            }
            if prop.subinterface_only() && !intf.is_subinterface() {
                return Err(Error::InvalidPropertyValue(
                    prop,
                    "only valid on dot1q sub-interfaces".to_owned(),
                ));
            }

            // Bound ACLs must exist on the device.
            let afi = match prop {
                PropertyName::Ipv4AclIn | PropertyName::Ipv4AclOut => {
                    AclAfi::Ipv4
                }
                PropertyName::Ipv6AclIn | PropertyName::Ipv6AclOut => {
                    AclAfi::Ipv6
                }
                _ => continue,
            };
            if let Some(name) = value.as_str() {
                if self.acls.get(name) != Some(&afi) {
                    return Err(Error::AclNotFound(name.clone()));
                }
            }
        }

        Ok(())
    }

    // Looks up the target interface, auto-creating dot1q sub-interfaces
    // under a routed parent.
    fn lookup_or_create(&mut self, intf: &InterfaceId) -> Result<(), Error> {
        if self.interfaces.get_by_id(intf).is_some() {
            return Ok(());
        }

        let Some(parent_id) = intf.parent() else {
            return Err(Error::InterfaceNotFound(intf.clone()));
        };
        let parent = self
            .interfaces
            .get_by_id(&parent_id)
            .ok_or_else(|| Error::InterfaceNotFound(parent_id.clone()))?;
        if parent
            .state
            .switchport_mode
            .is_some_and(|mode| mode != SwitchportMode::Disabled)
        {
            return Err(Error::SubinterfaceParent(intf.clone()));
        }

        debug!(%intf, "creating dot1q sub-interface");
        self.seed_interface(
            intf.clone(),
            InterfaceFlags::OPERATIVE | InterfaceFlags::SUBINTERFACE,
        );
        Ok(())
    }

    // Computes the post-apply state of an interface.
    fn next_state(
        &self,
        old: &ResourceState,
        manifest: &Manifest,
    ) -> Result<ResourceState, Error> {
        let platform = self.platform;
        let mut state = old.clone();

        for (prop, value) in manifest.iter() {
            // Resolve the reset-to-default marker.
            let desired = match value {
                PropertyValue::Default => platform.default_value(prop),
                value => Some(value.clone()),
            };

            match prop {
                PropertyName::Description => {
                    state.description = opt_string(prop, desired)?;
                }
                PropertyName::Duplex => {
                    state.duplex = match desired {
                        Some(PropertyValue::Duplex(duplex)) => duplex,
                        Some(value) => return Err(invalid(prop, &value)),
                        None => Duplex::Auto,
                    };
                }
                PropertyName::EncapsulationDot1q => {
                    state.encapsulation_dot1q = opt_u32(prop, desired)?;
                }
                PropertyName::Ipv4AclIn => {
                    state.ipv4_acl_in = opt_string(prop, desired)?;
                }
                PropertyName::Ipv4AclOut => {
                    state.ipv4_acl_out = opt_string(prop, desired)?;
                }
                PropertyName::Ipv6AclIn => {
                    state.ipv6_acl_in = opt_string(prop, desired)?;
                }
                PropertyName::Ipv6AclOut => {
                    state.ipv6_acl_out = opt_string(prop, desired)?;
                }
                PropertyName::Ipv4Forwarding => {
                    state.ipv4_forwarding = req_bool(prop, desired)?;
                }
                PropertyName::Ipv4PimSparseMode => {
                    state.ipv4_pim_sparse_mode = req_bool(prop, desired)?;
                }
                PropertyName::Ipv4ProxyArp => {
                    state.ipv4_proxy_arp = req_bool(prop, desired)?;
                }
                PropertyName::Ipv4Redirects => {
                    state.ipv4_redirects = match desired {
                        Some(PropertyValue::Bool(value)) => value,
                        Some(value) => return Err(invalid(prop, &value)),
                        None => platform.default_ipv4_redirects(),
                    };
                }
                PropertyName::Mtu => {
                    state.mtu = match desired {
                        Some(PropertyValue::Uint(value)) => value,
                        Some(value) => return Err(invalid(prop, &value)),
                        None => platform.default_mtu(),
                    };
                }
                PropertyName::Shutdown => {
                    state.shutdown = req_bool(prop, desired)?;
                }
                PropertyName::SwitchportMode => {
                    state.switchport_mode = match desired {
                        Some(PropertyValue::Switchport(mode)) => Some(mode),
                        Some(value) => return Err(invalid(prop, &value)),
                        None => None,
                    };
                }
                PropertyName::Vrf => {
                    state.vrf = opt_string(prop, desired)?;
                }
                // Addresses are paired with their netmask length and
                // handled below.
                PropertyName::Ipv4Address
                | PropertyName::Ipv4AddressSecondary
                | PropertyName::Ipv4NetmaskLength
                | PropertyName::Ipv4NetmaskLengthSecondary => (),
            }
        }

        state.ipv4 = staged_network(
            manifest,
            PropertyName::Ipv4Address,
            PropertyName::Ipv4NetmaskLength,
            state.ipv4,
        )?;
        state.ipv4_secondary = staged_network(
            manifest,
            PropertyName::Ipv4AddressSecondary,
            PropertyName::Ipv4NetmaskLengthSecondary,
            state.ipv4_secondary,
        )?;

        // Turning a port into a routed forwarding port wipes its IP
        // addressing.
        if state.ipv4_forwarding && !old.ipv4_forwarding {
            state.ipv4 = None;
            state.ipv4_secondary = None;
        }

        Ok(state)
    }
}

#[async_trait]
impl DeviceAgent for SimulatedSwitch {
    fn platform(&self) -> Platform {
        self.platform
    }

    async fn interfaces(&self) -> Result<Vec<InterfaceId>, Error> {
        Ok(self
            .interfaces
            .iter()
            .filter(|iface| {
                !iface.flags.contains(InterfaceFlags::SUBINTERFACE)
            })
            .map(|iface| iface.id.clone())
            .collect())
    }

    async fn resource_state(
        &self,
        intf: &InterfaceId,
    ) -> Result<ResourceState, Error> {
        self.interfaces
            .get_by_id(intf)
            .map(|iface| iface.state.clone())
            .ok_or_else(|| Error::InterfaceNotFound(intf.clone()))
    }

    async fn apply(
        &mut self,
        intf: &InterfaceId,
        manifest: &Manifest,
    ) -> Result<ApplyReport, Error> {
        self.validate(intf, manifest)?;
        self.lookup_or_create(intf)?;

        let old = self
            .interfaces
            .get_by_id(intf)
            .map(|iface| iface.state.clone())
            .ok_or_else(|| Error::InterfaceNotFound(intf.clone()))?;
        let state = self.next_state(&old, manifest)?;

        let iface = self
            .interfaces
            .get_mut_by_id(intf)
            .ok_or_else(|| Error::InterfaceNotFound(intf.clone()))?;
        let changed = old != state;
        let changed_props = manifest
            .iter()
            .map(|(prop, _)| prop)
            .filter(|prop| old.get(*prop) != state.get(*prop))
            .collect();
        iface.state = state;
        iface.flags.set(InterfaceFlags::OPERATIVE, !iface.state.shutdown);

        let report = ApplyReport::new(changed, changed_props);
        debug!(%intf, changed = report.changed, "manifest applied");
        Ok(report)
    }

    async fn ensure_acl(&mut self, acl: &Acl) -> Result<(), Error> {
        self.acls.entry(acl.name.clone()).or_insert(acl.afi);
        Ok(())
    }

    async fn system_default_switchport(
        &mut self,
        enabled: bool,
    ) -> Result<(), Error> {
        self.sys_def_switchport = enabled;
        Ok(())
    }

    async fn preclean(&mut self, intf: &InterfaceId) -> Result<(), Error> {
        // Delete the sub-interfaces of the target first.
        let subinterfaces: Vec<_> = self
            .interfaces
            .iter()
            .filter(|iface| iface.id.parent().as_ref() == Some(intf))
            .map(|iface| iface.id.clone())
            .collect();
        for subintf in subinterfaces {
            self.interfaces.remove(&subintf);
        }

        if intf.is_subinterface() {
            // Precleaning a sub-interface removes it outright.
            self.interfaces.remove(intf);
            return Ok(());
        }

        let mut state = ResourceState::platform_default(self.platform);
        if self.platform.has_switchport() && self.sys_def_switchport {
            state.switchport_mode = Some(SwitchportMode::Access);
        }
        let iface = self
            .interfaces
            .get_mut_by_id(intf)
            .ok_or_else(|| Error::InterfaceNotFound(intf.clone()))?;
        iface.state = state;
        iface.flags.insert(InterfaceFlags::OPERATIVE);
        debug!(%intf, "interface precleaned");
        Ok(())
    }
}

// ===== impl Interfaces =====

impl Interfaces {
    // Adds a new interface entry.
    fn insert(
        &mut self,
        id: InterfaceId,
        flags: InterfaceFlags,
        state: ResourceState,
    ) {
        let iface = Interface { id: id.clone(), flags, state };
        let iface_idx = self.arena.insert(iface);
        self.name_tree.insert(id, iface_idx);
    }

    // Removes the specified interface.
    fn remove(&mut self, id: &InterfaceId) {
        let Some(iface_idx) = self.name_tree.remove(id) else {
            return;
        };
        self.arena.remove(iface_idx);
    }

    // Returns a reference to the interface corresponding to the given name.
    fn get_by_id(&self, id: &InterfaceId) -> Option<&Interface> {
        self.name_tree
            .get(id)
            .copied()
            .map(|iface_idx| &self.arena[iface_idx])
    }

    // Returns a mutable reference to the interface corresponding to the
    // given name.
    fn get_mut_by_id(&mut self, id: &InterfaceId) -> Option<&mut Interface> {
        self.name_tree
            .get(id)
            .copied()
            .map(move |iface_idx| &mut self.arena[iface_idx])
    }

    // Returns an iterator visiting all interfaces.
    //
    // Interfaces are ordered by their names.
    fn iter(&self) -> impl Iterator<Item = &'_ Interface> + '_ {
        self.name_tree.values().map(|iface_idx| &self.arena[*iface_idx])
    }
}

// ===== helper functions =====

fn invalid(prop: PropertyName, value: &PropertyValue) -> Error {
    Error::InvalidPropertyValue(prop, value.to_string())
}

fn req_bool(
    prop: PropertyName,
    value: Option<PropertyValue>,
) -> Result<bool, Error> {
    match value {
        Some(PropertyValue::Bool(value)) => Ok(value),
        Some(value) => Err(invalid(prop, &value)),
        None => Ok(false),
    }
}

fn opt_string(
    prop: PropertyName,
    value: Option<PropertyValue>,
) -> Result<Option<String>, Error> {
    match value {
        Some(PropertyValue::Str(value)) => Ok(Some(value)),
        Some(value) => Err(invalid(prop, &value)),
        None => Ok(None),
    }
}

fn opt_u32(
    prop: PropertyName,
    value: Option<PropertyValue>,
) -> Result<Option<u32>, Error> {
    match value {
        Some(PropertyValue::Uint(value)) => Ok(Some(value)),
        Some(value) => Err(invalid(prop, &value)),
        None => Ok(None),
    }
}

// Combines an address property with its netmask-length property into an
// IPv4 network, keeping the current value when the manifest does not touch
// the pair.
fn staged_network(
    manifest: &Manifest,
    addr_prop: PropertyName,
    plen_prop: PropertyName,
    current: Option<Ipv4Network>,
) -> Result<Option<Ipv4Network>, Error> {
    let addr = manifest.get(addr_prop);
    let plen = manifest.get(plen_prop);

    match (addr, plen) {
        (None, None) => Ok(current),
        (Some(PropertyValue::Default), _)
        | (None, Some(PropertyValue::Default)) => Ok(None),
        (None, Some(value)) => Err(invalid(plen_prop, value)),
        (Some(PropertyValue::Ipv4(addr)), Some(PropertyValue::Uint(plen))) => {
            let plen = u8::try_from(*plen).map_err(|_| {
                Error::InvalidPropertyValue(plen_prop, plen.to_string())
            })?;
            let network = Ipv4Network::new(*addr, plen).map_err(|_| {
                Error::InvalidPropertyValue(plen_prop, plen.to_string())
            })?;
            Ok(Some(network))
        }
        (Some(value), None) => Err(invalid(addr_prop, value)),
        (Some(_), Some(value)) => Err(invalid(plen_prop, value)),
    }
}
