//
// Copyright (c) The Swif Core Contributors
//
// SPDX-License-Identifier: MIT
//

#![warn(rust_2018_idioms)]

pub mod config;
pub mod error;
pub mod suite;
#[cfg(feature = "testing")]
pub mod test;

pub use config::Config;
pub use error::Error;
pub use suite::{
    CaseId, RunOutcome, Skip, SkipReason, TestCase, TestSuite,
    interface_cleanup,
};
