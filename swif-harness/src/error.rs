//
// Copyright (c) The Swif Core Contributors
//
// SPDX-License-Identifier: MIT
//

use itertools::Itertools;
use swif_model::{PropertyMismatch, PropertyName};
use tracing::{warn, warn_span};

use crate::suite::CaseId;

// Harness errors.
#[derive(Debug)]
pub enum Error {
    UnknownCase(CaseId),
    NoUsableInterface(String),
    UnexpectedExitCode(CaseId, u8, Vec<u8>),
    NotIdempotent(CaseId, Vec<PropertyName>),
    VerificationFailed(CaseId, Vec<PropertyMismatch>),
    Device(swif_device::Error),
}

// ===== impl Error =====

impl Error {
    pub fn log(&self) {
        match self {
            Error::UnknownCase(id)
            | Error::UnexpectedExitCode(id, ..)
            | Error::NotIdempotent(id, _)
            | Error::VerificationFailed(id, _) => {
                warn_span!("harness", case = %id)
                    .in_scope(|| warn!("{}", self));
            }
            Error::NoUsableInterface(intf_type) => {
                warn_span!("harness", %intf_type)
                    .in_scope(|| warn!("{}", self));
            }
            Error::Device(error) => error.log(),
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::UnknownCase(id) => {
                write!(f, "unknown test case: {id}")
            }
            Error::NoUsableInterface(intf_type) => {
                write!(f, "no usable {intf_type} interface found")
            }
            Error::UnexpectedExitCode(_, code, expected) => {
                write!(
                    f,
                    "unexpected exit code {code} (expected one of [{}])",
                    expected.iter().join(", ")
                )
            }
            Error::NotIdempotent(_, props) => {
                write!(
                    f,
                    "second manifest run changed properties: {}",
                    props.iter().join(", ")
                )
            }
            Error::VerificationFailed(_, mismatches) => {
                write!(
                    f,
                    "resource state verification failed: {}",
                    mismatches.iter().join("; ")
                )
            }
            Error::Device(error) => error.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Device(error) => Some(error),
            _ => None,
        }
    }
}

impl From<swif_device::Error> for Error {
    fn from(error: swif_device::Error) -> Error {
        Error::Device(error)
    }
}
