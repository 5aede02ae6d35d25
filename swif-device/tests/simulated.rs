//
// Copyright (c) The Swif Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::net::Ipv4Addr;

use swif_device::{DeviceAgent, Error, SimulatedSwitch};
use swif_model::{
    Acl, AclAfi, Duplex, InterfaceId, Manifest, Platform, PropertyName,
    PropertyValue, SwitchportMode,
};

fn intf(name: &str) -> InterfaceId {
    name.parse().unwrap()
}

#[tokio::test]
async fn inventory_is_physical_only() {
    let mut switch = SimulatedSwitch::new(Platform::Nexus, 3);
    let eth = intf("ethernet1/1");

    let mut manifest = Manifest::new();
    manifest.set(PropertyName::EncapsulationDot1q, 30u32);
    switch.apply(&eth.subinterface(1), &manifest).await.unwrap();

    let names: Vec<_> = switch
        .interfaces()
        .await
        .unwrap()
        .iter()
        .map(|intf| intf.to_string())
        .collect();
    assert_eq!(names, vec!["ethernet1/1", "ethernet1/2", "ethernet1/3"]);
}

#[tokio::test]
async fn apply_and_reapply() {
    let mut switch = SimulatedSwitch::new(Platform::Nexus, 1);
    let eth = intf("ethernet1/1");

    let mut manifest = Manifest::new();
    manifest
        .set(PropertyName::Description, "configured by swif")
        .set(PropertyName::Shutdown, true)
        .set(PropertyName::Ipv4Address, Ipv4Addr::new(1, 1, 1, 1))
        .set(PropertyName::Ipv4NetmaskLength, 31u32)
        .set(
            PropertyName::Ipv4AddressSecondary,
            Ipv4Addr::new(2, 2, 2, 2),
        )
        .set(PropertyName::Ipv4NetmaskLengthSecondary, 31u32)
        .set(PropertyName::SwitchportMode, SwitchportMode::Disabled)
        .set(PropertyName::Vrf, "test1");

    let report = switch.apply(&eth, &manifest).await.unwrap();
    assert!(report.changed);
    assert_eq!(report.exit_code(), 2);

    let state = switch.resource_state(&eth).await.unwrap();
    assert!(state.verify(&manifest).is_empty());
    assert_eq!(state.vrf.as_deref(), Some("test1"));
    assert_eq!(state.ipv4.unwrap().prefix(), 31);

    // Second run must be a no-op.
    let report = switch.apply(&eth, &manifest).await.unwrap();
    assert!(!report.changed);
    assert_eq!(report.exit_code(), 0);
    assert!(report.changed_props.is_empty());
}

#[tokio::test]
async fn default_marker_resets_property() {
    let mut switch = SimulatedSwitch::new(Platform::Nexus, 1);
    let eth = intf("ethernet1/1");

    let mut manifest = Manifest::new();
    manifest
        .set(PropertyName::Mtu, 1600u32)
        .set(PropertyName::Duplex, Duplex::Full);
    switch.apply(&eth, &manifest).await.unwrap();

    let mut manifest = Manifest::new();
    manifest
        .set(PropertyName::Mtu, PropertyValue::Default)
        .set(PropertyName::Duplex, PropertyValue::Default);
    let report = switch.apply(&eth, &manifest).await.unwrap();
    assert!(report.changed);

    let state = switch.resource_state(&eth).await.unwrap();
    assert_eq!(state.mtu, 1500);
    assert_eq!(state.duplex, Duplex::Auto);
}

#[tokio::test]
async fn unsupported_property_is_rejected() {
    let mut switch = SimulatedSwitch::new(Platform::IosXr, 1);
    let eth = intf("ethernet1/1");

    let mut manifest = Manifest::new();
    manifest.set(PropertyName::Duplex, Duplex::Full);
    match switch.apply(&eth, &manifest).await {
        Err(Error::UnsupportedProperty(Platform::IosXr, prop)) => {
            assert_eq!(prop, PropertyName::Duplex);
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn acl_binding_requires_existing_acl() {
    let mut switch = SimulatedSwitch::new(Platform::Nexus, 1);
    let eth = intf("ethernet1/1");

    let mut manifest = Manifest::new();
    manifest.set(PropertyName::Ipv4AclIn, "v4_in");
    match switch.apply(&eth, &manifest).await {
        Err(Error::AclNotFound(name)) => assert_eq!(name, "v4_in"),
        other => panic!("unexpected result: {other:?}"),
    }

    switch.ensure_acl(&Acl::new("v4_in", AclAfi::Ipv4)).await.unwrap();
    let report = switch.apply(&eth, &manifest).await.unwrap();
    assert!(report.changed);

    let state = switch.resource_state(&eth).await.unwrap();
    assert_eq!(state.ipv4_acl_in.as_deref(), Some("v4_in"));
}

#[tokio::test]
async fn dot1q_requires_routed_parent() {
    let mut switch = SimulatedSwitch::new(Platform::Nexus, 1);
    let eth = intf("ethernet1/1");

    // Put the parent in L2 access mode first.
    let mut manifest = Manifest::new();
    manifest.set(PropertyName::SwitchportMode, SwitchportMode::Access);
    switch.apply(&eth, &manifest).await.unwrap();

    let mut manifest = Manifest::new();
    manifest.set(PropertyName::EncapsulationDot1q, 30u32);
    match switch.apply(&eth.subinterface(1), &manifest).await {
        Err(Error::SubinterfaceParent(_)) => (),
        other => panic!("unexpected result: {other:?}"),
    }

    // Back to a routed port; the sub-interface can now be created.
    let mut parent_manifest = Manifest::new();
    parent_manifest
        .set(PropertyName::SwitchportMode, SwitchportMode::Disabled);
    switch.apply(&eth, &parent_manifest).await.unwrap();

    let report =
        switch.apply(&eth.subinterface(1), &manifest).await.unwrap();
    assert!(report.changed);
    let state =
        switch.resource_state(&eth.subinterface(1)).await.unwrap();
    assert_eq!(state.encapsulation_dot1q, Some(30));
}

#[tokio::test]
async fn forwarding_clears_addressing() {
    let mut switch = SimulatedSwitch::new(Platform::Nexus, 1);
    let eth = intf("ethernet1/1");

    let mut manifest = Manifest::new();
    manifest
        .set(PropertyName::Ipv4Address, Ipv4Addr::new(10, 0, 0, 1))
        .set(PropertyName::Ipv4NetmaskLength, 24u32);
    switch.apply(&eth, &manifest).await.unwrap();

    let mut manifest = Manifest::new();
    manifest.set(PropertyName::Ipv4Forwarding, true);
    switch.apply(&eth, &manifest).await.unwrap();

    let state = switch.resource_state(&eth).await.unwrap();
    assert!(state.ipv4_forwarding);
    assert_eq!(state.ipv4, None);
    assert_eq!(state.ipv4_secondary, None);
}

#[tokio::test]
async fn preclean_resets_interface_and_subinterfaces() {
    let mut switch = SimulatedSwitch::new(Platform::Nexus, 1);
    let eth = intf("ethernet1/1");

    let mut manifest = Manifest::new();
    manifest
        .set(PropertyName::Mtu, 9216u32)
        .set(PropertyName::Shutdown, true);
    switch.apply(&eth, &manifest).await.unwrap();

    let mut subif_manifest = Manifest::new();
    subif_manifest.set(PropertyName::EncapsulationDot1q, 30u32);
    switch
        .apply(&eth.subinterface(1), &subif_manifest)
        .await
        .unwrap();

    switch.preclean(&eth).await.unwrap();

    let state = switch.resource_state(&eth).await.unwrap();
    assert_eq!(state.mtu, 1500);
    assert!(!state.shutdown);
    assert!(
        switch.resource_state(&eth.subinterface(1)).await.is_err(),
        "sub-interface should be gone after preclean"
    );
}

#[tokio::test]
async fn unknown_interface() {
    let mut switch = SimulatedSwitch::new(Platform::Nexus, 1);
    let missing = intf("ethernet9/9");

    let mut manifest = Manifest::new();
    manifest.set(PropertyName::Shutdown, true);
    match switch.apply(&missing, &manifest).await {
        Err(Error::InterfaceNotFound(id)) => {
            assert_eq!(id.name(), "ethernet9/9");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}
