//
// Copyright (c) The Swif Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::collections::BTreeMap;

use crate::property::{PropertyName, PropertyValue};

// Desired-state key/value pairs applied to a single interface.
//
// Property order is stable (BTreeMap) so that logs and mismatch reports are
// deterministic.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Manifest {
    props: BTreeMap<PropertyName, PropertyValue>,
}

// ===== impl Manifest =====

impl Manifest {
    pub fn new() -> Manifest {
        Manifest::default()
    }

    // Sets a property, replacing any previous value.
    pub fn set(
        &mut self,
        prop: PropertyName,
        value: impl Into<PropertyValue>,
    ) -> &mut Manifest {
        self.props.insert(prop, value.into());
        self
    }

    // Removes a property, returning its previous value.
    pub fn remove(&mut self, prop: PropertyName) -> Option<PropertyValue> {
        self.props.remove(&prop)
    }

    pub fn get(&self, prop: PropertyName) -> Option<&PropertyValue> {
        self.props.get(&prop)
    }

    pub fn contains(&self, prop: PropertyName) -> bool {
        self.props.contains_key(&prop)
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    pub fn len(&self) -> usize {
        self.props.len()
    }

    // Iterates over the properties in name order.
    pub fn iter(
        &self,
    ) -> impl Iterator<Item = (PropertyName, &'_ PropertyValue)> + '_ {
        self.props.iter().map(|(prop, value)| (*prop, value))
    }

    // Returns a copy with the given properties removed. Used by the harness
    // to strip properties a platform does not support.
    pub fn without(&self, props: &[PropertyName]) -> Manifest {
        let props = self
            .props
            .iter()
            .filter(|&(prop, _)| !props.contains(prop))
            .map(|(prop, value)| (*prop, value.clone()))
            .collect();
        Manifest { props }
    }
}

impl FromIterator<(PropertyName, PropertyValue)> for Manifest {
    fn from_iter<I>(iter: I) -> Manifest
    where
        I: IntoIterator<Item = (PropertyName, PropertyValue)>,
    {
        Manifest { props: iter.into_iter().collect() }
    }
}

impl From<BTreeMap<PropertyName, PropertyValue>> for Manifest {
    fn from(props: BTreeMap<PropertyName, PropertyValue>) -> Manifest {
        Manifest { props }
    }
}

// ===== unit tests =====
