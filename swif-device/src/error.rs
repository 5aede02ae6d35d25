//
// Copyright (c) The Swif Core Contributors
//
// SPDX-License-Identifier: MIT
//

use swif_model::{InterfaceId, Platform, PropertyName};
use tracing::{warn, warn_span};

// Device errors.
#[derive(Debug)]
pub enum Error {
    InterfaceNotFound(InterfaceId),
    SubinterfaceParent(InterfaceId),
    AclNotFound(String),
    UnsupportedProperty(Platform, PropertyName),
    InvalidPropertyValue(PropertyName, String),
}

// ===== impl Error =====

impl Error {
    pub fn log(&self) {
        match self {
            Error::InterfaceNotFound(intf)
            | Error::SubinterfaceParent(intf) => {
                warn_span!("device", %intf).in_scope(|| warn!("{}", self));
            }
            Error::AclNotFound(name) => {
                warn_span!("device", acl = %name)
                    .in_scope(|| warn!("{}", self));
            }
            Error::UnsupportedProperty(platform, prop) => {
                warn_span!("device", %platform, %prop)
                    .in_scope(|| warn!("{}", self));
            }
            Error::InvalidPropertyValue(prop, value) => {
                warn_span!("device", %prop, %value)
                    .in_scope(|| warn!("{}", self));
            }
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InterfaceNotFound(intf) => {
                write!(f, "interface not found: {intf}")
            }
            Error::SubinterfaceParent(intf) => {
                write!(
                    f,
                    "sub-interface requires a routed (L3) parent: {intf}"
                )
            }
            Error::AclNotFound(name) => {
                write!(f, "ACL does not exist on the device: {name}")
            }
            Error::UnsupportedProperty(platform, prop) => {
                write!(f, "property {prop} is not supported on {platform}")
            }
            Error::InvalidPropertyValue(prop, value) => {
                write!(f, "invalid value for {prop}: {value}")
            }
        }
    }
}

impl std::error::Error for Error {}
