//
// Copyright (c) The Swif Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::str::FromStr;
use std::sync::LazyLock as Lazy;

use regex::Regex;
use serde::{Deserialize, Serialize};

// Physical interface names look like "ethernet1/1"; dot1q sub-interfaces
// append a ".<unit>" suffix ("ethernet1/1.1").
static IFNAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<type>[a-z]+)(?P<slot>\d+)/(?P<port>\d+)(?:\.(?P<unit>\d+))?$")
        .unwrap()
});

// Validated interface name.
//
// Interface ids are ordered by their textual representation, which keeps
// sub-interfaces adjacent to their parents in sorted collections.
#[derive(
    Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Deserialize, Serialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct InterfaceId {
    name: String,
    unit: Option<u32>,
}

// Error type for malformed interface names.
#[derive(Debug, Eq, PartialEq)]
pub struct InvalidInterfaceId(pub String);

// ===== impl InterfaceId =====

impl InterfaceId {
    // Returns the full interface name, including the sub-interface unit.
    pub fn name(&self) -> &str {
        &self.name
    }

    // Returns the interface type prefix ("ethernet").
    pub fn intf_type(&self) -> &str {
        let end = self
            .name
            .find(|c: char| c.is_ascii_digit())
            .unwrap_or(self.name.len());
        &self.name[..end]
    }

    // Returns the dot1q sub-interface unit, if any.
    pub fn unit(&self) -> Option<u32> {
        self.unit
    }

    pub fn is_subinterface(&self) -> bool {
        self.unit.is_some()
    }

    // Returns the parent of a sub-interface, or `None` for physical
    // interfaces.
    pub fn parent(&self) -> Option<InterfaceId> {
        let unit = self.unit?;
        let suffix = format!(".{unit}");
        let name = self
            .name
            .strip_suffix(suffix.as_str())
            .unwrap_or(&self.name)
            .to_owned();
        Some(InterfaceId { name, unit: None })
    }

    // Returns the sub-interface of this interface with the given unit.
    pub fn subinterface(&self, unit: u32) -> InterfaceId {
        InterfaceId {
            name: format!("{}.{unit}", self.name),
            unit: Some(unit),
        }
    }
}

impl std::fmt::Display for InterfaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

impl FromStr for InterfaceId {
    type Err = InvalidInterfaceId;

    fn from_str(s: &str) -> Result<InterfaceId, InvalidInterfaceId> {
        let caps = IFNAME_RE
            .captures(s)
            .ok_or_else(|| InvalidInterfaceId(s.to_owned()))?;
        let unit = caps
            .name("unit")
            .map(|m| m.as_str().parse::<u32>())
            .transpose()
            .map_err(|_| InvalidInterfaceId(s.to_owned()))?;
        Ok(InterfaceId { name: s.to_owned(), unit })
    }
}

impl TryFrom<String> for InterfaceId {
    type Error = InvalidInterfaceId;

    fn try_from(s: String) -> Result<InterfaceId, InvalidInterfaceId> {
        s.parse()
    }
}

impl From<InterfaceId> for String {
    fn from(id: InterfaceId) -> String {
        id.name
    }
}

// ===== impl InvalidInterfaceId =====

impl std::fmt::Display for InvalidInterfaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid interface name: {}", self.0)
    }
}

impl std::error::Error for InvalidInterfaceId {}

// ===== unit tests =====

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_physical() {
        let intf: InterfaceId = "ethernet1/3".parse().unwrap();
        assert_eq!(intf.name(), "ethernet1/3");
        assert_eq!(intf.intf_type(), "ethernet");
        assert!(!intf.is_subinterface());
        assert_eq!(intf.parent(), None);
    }

    #[test]
    fn parse_subinterface() {
        let intf: InterfaceId = "ethernet1/3.30".parse().unwrap();
        assert!(intf.is_subinterface());
        assert_eq!(intf.unit(), Some(30));
        assert_eq!(intf.parent().unwrap().name(), "ethernet1/3");
    }

    #[test]
    fn subinterface_of() {
        let intf: InterfaceId = "ethernet1/1".parse().unwrap();
        let subintf = intf.subinterface(1);
        assert_eq!(subintf.name(), "ethernet1/1.1");
        assert_eq!(subintf.parent(), Some(intf));
    }

    #[test]
    fn parse_invalid() {
        for name in ["", "ethernet", "ethernet1", "1/1", "ethernet1/1.1.1"] {
            assert!(
                name.parse::<InterfaceId>().is_err(),
                "{name:?} should not parse"
            );
        }
    }
}
