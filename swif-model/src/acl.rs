//
// Copyright (c) The Swif Core Contributors
//
// SPDX-License-Identifier: MIT
//

use serde::{Deserialize, Serialize};

// Address family of an access control list.
#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Deserialize,
    Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum AclAfi {
    Ipv4,
    Ipv6,
}

// An access control list that must exist on the device before it can be
// bound to an interface.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Acl {
    pub name: String,
    pub afi: AclAfi,
}

// ===== impl AclAfi =====

impl std::fmt::Display for AclAfi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AclAfi::Ipv4 => f.write_str("ipv4"),
            AclAfi::Ipv6 => f.write_str("ipv6"),
        }
    }
}

// ===== impl Acl =====

impl Acl {
    pub fn new(name: impl Into<String>, afi: AclAfi) -> Acl {
        Acl { name: name.into(), afi }
    }
}

impl std::fmt::Display for Acl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.afi)
    }
}
