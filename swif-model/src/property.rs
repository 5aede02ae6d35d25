//
// Copyright (c) The Swif Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::net::Ipv4Addr;
use std::str::FromStr;

use enum_as_inner::EnumAsInner;
use serde::{Deserialize, Serialize};

// Managed Layer-3 interface properties.
#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Deserialize,
    Serialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PropertyName {
    Description,
    Duplex,
    EncapsulationDot1q,
    Ipv4AclIn,
    Ipv4AclOut,
    Ipv4Address,
    Ipv4AddressSecondary,
    Ipv4Forwarding,
    Ipv4NetmaskLength,
    Ipv4NetmaskLengthSecondary,
    Ipv4PimSparseMode,
    Ipv4ProxyArp,
    Ipv4Redirects,
    Ipv6AclIn,
    Ipv6AclOut,
    Mtu,
    Shutdown,
    SwitchportMode,
    Vrf,
}

// A single property value as it appears in a manifest or in observed
// resource state.
//
// `Default` is the reset-to-platform-default marker: it never appears in
// observed state, only in manifests.
#[derive(Clone, Debug, Eq, EnumAsInner, Hash, PartialEq)]
pub enum PropertyValue {
    Default,
    Bool(bool),
    Uint(u32),
    Str(String),
    Ipv4(Ipv4Addr),
    Duplex(Duplex),
    Switchport(SwitchportMode),
}

#[derive(
    Clone, Copy, Debug, Eq, Hash, PartialEq, Deserialize, Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Duplex {
    Auto,
    Full,
    Half,
}

#[derive(
    Clone, Copy, Debug, Eq, Hash, PartialEq, Deserialize, Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SwitchportMode {
    Disabled,
    Access,
    Trunk,
}

// ===== impl PropertyName =====

impl PropertyName {
    // Iterates over all known property names.
    pub fn all() -> impl Iterator<Item = PropertyName> {
        [
            PropertyName::Description,
            PropertyName::Duplex,
            PropertyName::EncapsulationDot1q,
            PropertyName::Ipv4AclIn,
            PropertyName::Ipv4AclOut,
            PropertyName::Ipv4Address,
            PropertyName::Ipv4AddressSecondary,
            PropertyName::Ipv4Forwarding,
            PropertyName::Ipv4NetmaskLength,
            PropertyName::Ipv4NetmaskLengthSecondary,
            PropertyName::Ipv4PimSparseMode,
            PropertyName::Ipv4ProxyArp,
            PropertyName::Ipv4Redirects,
            PropertyName::Ipv6AclIn,
            PropertyName::Ipv6AclOut,
            PropertyName::Mtu,
            PropertyName::Shutdown,
            PropertyName::SwitchportMode,
            PropertyName::Vrf,
        ]
        .into_iter()
    }

    // Whether the property only makes sense on a dot1q sub-interface.
    pub fn subinterface_only(&self) -> bool {
        matches!(self, PropertyName::EncapsulationDot1q)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyName::Description => "description",
            PropertyName::Duplex => "duplex",
            PropertyName::EncapsulationDot1q => "encapsulation_dot1q",
            PropertyName::Ipv4AclIn => "ipv4_acl_in",
            PropertyName::Ipv4AclOut => "ipv4_acl_out",
            PropertyName::Ipv4Address => "ipv4_address",
            PropertyName::Ipv4AddressSecondary => "ipv4_address_secondary",
            PropertyName::Ipv4Forwarding => "ipv4_forwarding",
            PropertyName::Ipv4NetmaskLength => "ipv4_netmask_length",
            PropertyName::Ipv4NetmaskLengthSecondary => {
                "ipv4_netmask_length_secondary"
            }
            PropertyName::Ipv4PimSparseMode => "ipv4_pim_sparse_mode",
            PropertyName::Ipv4ProxyArp => "ipv4_proxy_arp",
            PropertyName::Ipv4Redirects => "ipv4_redirects",
            PropertyName::Ipv6AclIn => "ipv6_acl_in",
            PropertyName::Ipv6AclOut => "ipv6_acl_out",
            PropertyName::Mtu => "mtu",
            PropertyName::Shutdown => "shutdown",
            PropertyName::SwitchportMode => "switchport_mode",
            PropertyName::Vrf => "vrf",
        }
    }
}

impl std::fmt::Display for PropertyName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ===== impl PropertyValue =====

impl std::fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyValue::Default => f.write_str("default"),
            PropertyValue::Bool(value) => write!(f, "{value}"),
            PropertyValue::Uint(value) => write!(f, "{value}"),
            PropertyValue::Str(value) => f.write_str(value),
            PropertyValue::Ipv4(addr) => write!(f, "{addr}"),
            PropertyValue::Duplex(duplex) => write!(f, "{duplex}"),
            PropertyValue::Switchport(mode) => write!(f, "{mode}"),
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> PropertyValue {
        PropertyValue::Bool(value)
    }
}

impl From<u32> for PropertyValue {
    fn from(value: u32) -> PropertyValue {
        PropertyValue::Uint(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> PropertyValue {
        PropertyValue::Str(value.to_owned())
    }
}

impl From<Ipv4Addr> for PropertyValue {
    fn from(addr: Ipv4Addr) -> PropertyValue {
        PropertyValue::Ipv4(addr)
    }
}

impl From<Duplex> for PropertyValue {
    fn from(duplex: Duplex) -> PropertyValue {
        PropertyValue::Duplex(duplex)
    }
}

impl From<SwitchportMode> for PropertyValue {
    fn from(mode: SwitchportMode) -> PropertyValue {
        PropertyValue::Switchport(mode)
    }
}

// ===== impl Duplex =====

impl std::fmt::Display for Duplex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Duplex::Auto => f.write_str("auto"),
            Duplex::Full => f.write_str("full"),
            Duplex::Half => f.write_str("half"),
        }
    }
}

impl FromStr for Duplex {
    type Err = ();

    fn from_str(s: &str) -> Result<Duplex, ()> {
        match s {
            "auto" => Ok(Duplex::Auto),
            "full" => Ok(Duplex::Full),
            "half" => Ok(Duplex::Half),
            _ => Err(()),
        }
    }
}

// ===== impl SwitchportMode =====

impl std::fmt::Display for SwitchportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SwitchportMode::Disabled => f.write_str("disabled"),
            SwitchportMode::Access => f.write_str("access"),
            SwitchportMode::Trunk => f.write_str("trunk"),
        }
    }
}

// ===== unit tests =====

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn property_names() {
        assert_eq!(PropertyName::Ipv4AclIn.to_string(), "ipv4_acl_in");
        assert_eq!(
            PropertyName::EncapsulationDot1q.to_string(),
            "encapsulation_dot1q"
        );
        assert_eq!(PropertyName::all().count(), 19);
    }

    #[test]
    fn value_display() {
        assert_eq!(PropertyValue::Default.to_string(), "default");
        assert_eq!(PropertyValue::from(true).to_string(), "true");
        assert_eq!(PropertyValue::from(1500u32).to_string(), "1500");
        assert_eq!(
            PropertyValue::from(Duplex::Auto).to_string(),
            "auto"
        );
        assert_eq!(
            PropertyValue::from(SwitchportMode::Disabled).to_string(),
            "disabled"
        );
    }
}
