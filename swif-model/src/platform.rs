//
// Copyright (c) The Swif Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::property::{Duplex, PropertyName, PropertyValue, SwitchportMode};

// Switch operating system under test.
#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Deserialize,
    Serialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Nexus,
    IosXr,
}

// ===== impl Platform =====

impl Platform {
    // Default MTU of an ethernet interface.
    pub fn default_mtu(&self) -> u32 {
        match self {
            Platform::Nexus => 1500,
            Platform::IosXr => 1514,
        }
    }

    // Whether ICMP redirects are enabled out of the box.
    pub fn default_ipv4_redirects(&self) -> bool {
        match self {
            Platform::Nexus => true,
            Platform::IosXr => false,
        }
    }

    // Whether the platform has a switchport concept at all.
    pub fn has_switchport(&self) -> bool {
        matches!(self, Platform::Nexus)
    }

    // Whether the platform supports the given property.
    //
    // IOS XR ethernet interfaces are always routed ports and expose no
    // duplex, PIM or forwarding knobs through this resource.
    pub fn supports(&self, prop: PropertyName) -> bool {
        match self {
            Platform::Nexus => true,
            Platform::IosXr => !matches!(
                prop,
                PropertyName::Duplex
                    | PropertyName::Ipv4Forwarding
                    | PropertyName::Ipv4PimSparseMode
                    | PropertyName::SwitchportMode
            ),
        }
    }

    // Returns the factory-default value of the given property, or `None`
    // when the property has no value on a freshly cleaned interface (e.g.
    // addresses and ACL bindings are simply absent).
    pub fn default_value(
        &self,
        prop: PropertyName,
    ) -> Option<PropertyValue> {
        if !self.supports(prop) {
            return None;
        }

        match prop {
            PropertyName::Duplex => {
                Some(PropertyValue::Duplex(Duplex::Auto))
            }
            PropertyName::Mtu => {
                Some(PropertyValue::Uint(self.default_mtu()))
            }
            PropertyName::Ipv4Forwarding
            | PropertyName::Ipv4PimSparseMode
            | PropertyName::Ipv4ProxyArp
            | PropertyName::Shutdown => Some(PropertyValue::Bool(false)),
            PropertyName::Ipv4Redirects => {
                Some(PropertyValue::Bool(self.default_ipv4_redirects()))
            }
            PropertyName::SwitchportMode if self.has_switchport() => {
                Some(PropertyValue::Switchport(SwitchportMode::Disabled))
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Nexus => f.write_str("nexus"),
            Platform::IosXr => f.write_str("ios_xr"),
        }
    }
}

impl FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Platform, UnknownPlatform> {
        match s {
            "nexus" => Ok(Platform::Nexus),
            "ios_xr" => Ok(Platform::IosXr),
            _ => Err(UnknownPlatform(s.to_owned())),
        }
    }
}

// Error type for unrecognized platform names.
#[derive(Debug, Eq, PartialEq)]
pub struct UnknownPlatform(pub String);

impl std::fmt::Display for UnknownPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown platform: {}", self.0)
    }
}

impl std::error::Error for UnknownPlatform {}

// ===== unit tests =====

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_names() {
        assert_eq!("nexus".parse::<Platform>().unwrap(), Platform::Nexus);
        assert_eq!("ios_xr".parse::<Platform>().unwrap(), Platform::IosXr);
        assert!("junos".parse::<Platform>().is_err());
        assert_eq!(Platform::IosXr.to_string(), "ios_xr");
    }

    #[test]
    fn platform_defaults() {
        assert_eq!(Platform::Nexus.default_mtu(), 1500);
        assert_eq!(Platform::IosXr.default_mtu(), 1514);
        assert!(Platform::Nexus.default_ipv4_redirects());
        assert!(!Platform::IosXr.default_ipv4_redirects());
        assert_eq!(
            Platform::Nexus.default_value(PropertyName::SwitchportMode),
            Some(PropertyValue::Switchport(SwitchportMode::Disabled))
        );
        assert_eq!(
            Platform::IosXr.default_value(PropertyName::SwitchportMode),
            None
        );
        assert_eq!(
            Platform::Nexus.default_value(PropertyName::Ipv4Address),
            None
        );
    }
}
