//
// Copyright (c) The Swif Core Contributors
//
// SPDX-License-Identifier: MIT
//

use ipnetwork::Ipv4Network;

use crate::manifest::Manifest;
use crate::platform::Platform;
use crate::property::{Duplex, PropertyName, PropertyValue, SwitchportMode};

// Observed state of a single interface.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResourceState {
    pub platform: Platform,
    pub description: Option<String>,
    pub duplex: Duplex,
    pub mtu: u32,
    pub ipv4: Option<Ipv4Network>,
    pub ipv4_secondary: Option<Ipv4Network>,
    pub ipv4_acl_in: Option<String>,
    pub ipv4_acl_out: Option<String>,
    pub ipv6_acl_in: Option<String>,
    pub ipv6_acl_out: Option<String>,
    pub ipv4_forwarding: bool,
    pub ipv4_pim_sparse_mode: bool,
    pub ipv4_proxy_arp: bool,
    pub ipv4_redirects: bool,
    pub shutdown: bool,
    pub switchport_mode: Option<SwitchportMode>,
    pub vrf: Option<String>,
    pub encapsulation_dot1q: Option<u32>,
}

// A single expected-vs-actual difference found during verification.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PropertyMismatch {
    pub prop: PropertyName,
    pub expected: Option<PropertyValue>,
    pub actual: Option<PropertyValue>,
}

// ===== impl ResourceState =====

impl ResourceState {
    // Returns the state of a freshly cleaned interface on the given
    // platform.
    pub fn platform_default(platform: Platform) -> ResourceState {
        ResourceState {
            platform,
            description: None,
            duplex: Duplex::Auto,
            mtu: platform.default_mtu(),
            ipv4: None,
            ipv4_secondary: None,
            ipv4_acl_in: None,
            ipv4_acl_out: None,
            ipv6_acl_in: None,
            ipv6_acl_out: None,
            ipv4_forwarding: false,
            ipv4_pim_sparse_mode: false,
            ipv4_proxy_arp: false,
            ipv4_redirects: platform.default_ipv4_redirects(),
            shutdown: false,
            switchport_mode: platform
                .has_switchport()
                .then_some(SwitchportMode::Disabled),
            vrf: None,
            encapsulation_dot1q: None,
        }
    }

    // Returns the current value of the given property, or `None` when the
    // property is unset or not supported by the platform.
    pub fn get(&self, prop: PropertyName) -> Option<PropertyValue> {
        if !self.platform.supports(prop) {
            return None;
        }

        match prop {
            PropertyName::Description => {
                self.description.clone().map(PropertyValue::Str)
            }
            PropertyName::Duplex => Some(PropertyValue::Duplex(self.duplex)),
            PropertyName::EncapsulationDot1q => {
                self.encapsulation_dot1q.map(PropertyValue::Uint)
            }
            PropertyName::Ipv4AclIn => {
                self.ipv4_acl_in.clone().map(PropertyValue::Str)
            }
            PropertyName::Ipv4AclOut => {
                self.ipv4_acl_out.clone().map(PropertyValue::Str)
            }
            PropertyName::Ipv4Address => {
                self.ipv4.map(|addr| PropertyValue::Ipv4(addr.ip()))
            }
            PropertyName::Ipv4AddressSecondary => self
                .ipv4_secondary
                .map(|addr| PropertyValue::Ipv4(addr.ip())),
            PropertyName::Ipv4Forwarding => {
                Some(PropertyValue::Bool(self.ipv4_forwarding))
            }
            PropertyName::Ipv4NetmaskLength => self
                .ipv4
                .map(|addr| PropertyValue::Uint(addr.prefix() as u32)),
            PropertyName::Ipv4NetmaskLengthSecondary => self
                .ipv4_secondary
                .map(|addr| PropertyValue::Uint(addr.prefix() as u32)),
            PropertyName::Ipv4PimSparseMode => {
                Some(PropertyValue::Bool(self.ipv4_pim_sparse_mode))
            }
            PropertyName::Ipv4ProxyArp => {
                Some(PropertyValue::Bool(self.ipv4_proxy_arp))
            }
            PropertyName::Ipv4Redirects => {
                Some(PropertyValue::Bool(self.ipv4_redirects))
            }
            PropertyName::Ipv6AclIn => {
                self.ipv6_acl_in.clone().map(PropertyValue::Str)
            }
            PropertyName::Ipv6AclOut => {
                self.ipv6_acl_out.clone().map(PropertyValue::Str)
            }
            PropertyName::Mtu => Some(PropertyValue::Uint(self.mtu)),
            PropertyName::Shutdown => {
                Some(PropertyValue::Bool(self.shutdown))
            }
            PropertyName::SwitchportMode => {
                self.switchport_mode.map(PropertyValue::Switchport)
            }
            PropertyName::Vrf => self.vrf.clone().map(PropertyValue::Str),
        }
    }

    // Checks the observed state against an expected-state table.
    //
    // `Default` entries in the expected table resolve to the platform
    // default value of the property (absent defaults expect the property to
    // be unset).
    pub fn verify(&self, expected: &Manifest) -> Vec<PropertyMismatch> {
        let mut mismatches = Vec::new();

        for (prop, value) in expected.iter() {
            let expected = match value {
                PropertyValue::Default => self.platform.default_value(prop),
                value => Some(value.clone()),
            };
            let actual = self.get(prop);
            if expected != actual {
                mismatches.push(PropertyMismatch {
                    prop,
                    expected,
                    actual,
                });
            }
        }

        mismatches
    }
}

// ===== impl PropertyMismatch =====

impl std::fmt::Display for PropertyMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn fmt_value(value: &Option<PropertyValue>) -> String {
            match value {
                Some(value) => value.to_string(),
                None => "(unset)".to_owned(),
            }
        }

        write!(
            f,
            "{}: expected {}, got {}",
            self.prop,
            fmt_value(&self.expected),
            fmt_value(&self.actual)
        )
    }
}

// ===== unit tests =====
