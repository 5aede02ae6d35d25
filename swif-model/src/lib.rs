//
// Copyright (c) The Swif Core Contributors
//
// SPDX-License-Identifier: MIT
//

#![warn(rust_2018_idioms)]

pub mod acl;
pub mod interface;
pub mod manifest;
pub mod platform;
pub mod property;
pub mod state;

pub use acl::{Acl, AclAfi};
pub use interface::InterfaceId;
pub use manifest::Manifest;
pub use platform::Platform;
pub use property::{Duplex, PropertyName, PropertyValue, SwitchportMode};
pub use state::{PropertyMismatch, ResourceState};
