//
// Copyright (c) The Swif Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::collections::BTreeMap;

use swif_device::DeviceAgent;
use swif_model::{Acl, InterfaceId, Manifest, Platform, PropertyName};
use tokio::time::sleep;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::Error;

// Identifier of a test case inside a suite ("default", "acl", ...).
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct CaseId(pub &'static str);

// A single test scenario: desired state to apply plus the state expected
// afterwards.
#[derive(Clone, Debug)]
pub struct TestCase {
    // Human description, printed when the case runs.
    pub desc: String,
    // Target resource identifier.
    pub title_pattern: InterfaceId,
    // Acceptable exit codes of the first manifest run.
    pub code: Vec<u8>,
    // Reset the target interface before the run.
    pub preclean_intf: bool,
    // Toggle the system-wide default switchport mode before the run.
    pub sys_def_switchport: Option<bool>,
    // Restrict the case to a single platform.
    pub platform: Option<Platform>,
    // Desired-state key/value pairs.
    pub manifest_props: Manifest,
    // Expected-state key/value pairs; when absent, `manifest_props` itself
    // is verified.
    pub resource: Option<Manifest>,
    // ACLs that must exist before the manifest can be applied.
    pub acl: Vec<Acl>,
}

// Whether a case ran to completion or was skipped.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RunOutcome {
    Passed,
    Skipped,
}

// One entry of the skip ledger.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Skip {
    pub case: CaseId,
    pub reason: SkipReason,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SkipReason {
    // The case is restricted to another platform.
    PlatformGate(Platform),
    // A property the platform does not support was removed from the case.
    UnsupportedProperty(PropertyName),
    // Nothing was left to apply after stripping unsupported properties.
    NothingToTest,
}

// A suite of test cases sharing one device agent, executed sequentially.
pub struct TestSuite<A: DeviceAgent> {
    agent: A,
    config: Config,
    resource_name: String,
    cases: BTreeMap<CaseId, TestCase>,
    // Platform- and case-specific property exclusions, supplied by the
    // test file.
    unsupported_properties: fn(Platform, CaseId) -> Vec<PropertyName>,
    skipped: Vec<Skip>,
}

// ===== impl TestCase =====

impl TestCase {
    // Creates a case with the conventional defaults: exit codes [0, 2], no
    // preclean, no platform gate.
    pub fn new(desc: &str, title_pattern: InterfaceId) -> TestCase {
        TestCase {
            desc: desc.to_owned(),
            title_pattern,
            code: vec![0, 2],
            preclean_intf: false,
            sys_def_switchport: None,
            platform: None,
            manifest_props: Manifest::new(),
            resource: None,
            acl: Vec::new(),
        }
    }
}

// ===== impl CaseId =====

impl std::fmt::Display for CaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

// ===== impl TestSuite =====

impl<A> TestSuite<A>
where
    A: DeviceAgent,
{
    pub fn new(
        agent: A,
        config: Config,
        resource_name: &str,
        unsupported_properties: fn(Platform, CaseId) -> Vec<PropertyName>,
    ) -> TestSuite<A> {
        TestSuite {
            agent,
            config,
            resource_name: resource_name.to_owned(),
            cases: BTreeMap::new(),
            unsupported_properties,
            skipped: Vec::new(),
        }
    }

    pub fn resource_name(&self) -> &str {
        &self.resource_name
    }

    pub fn agent(&self) -> &A {
        &self.agent
    }

    pub fn agent_mut(&mut self) -> &mut A {
        &mut self.agent
    }

    // Registers a test case under the given id.
    pub fn insert(&mut self, id: CaseId, case: TestCase) {
        self.cases.insert(id, case);
    }

    pub fn case(&self, id: CaseId) -> Option<&TestCase> {
        self.cases.get(&id)
    }

    // Finds a usable interface of the configured type for this suite.
    pub async fn find_interface(&self) -> Result<InterfaceId, Error> {
        let intf = self
            .agent
            .interfaces()
            .await?
            .into_iter()
            .find(|intf| intf.intf_type() == self.config.intf_type)
            .ok_or_else(|| {
                Error::NoUsableInterface(self.config.intf_type.clone())
            })?;
        info!(%intf, "using interface");
        Ok(intf)
    }

    // Runs a single test case end to end: skip evaluation, prerequisites,
    // manifest run, idempotence re-run and resource-state verification.
    pub async fn run(&mut self, id: CaseId) -> Result<RunOutcome, Error> {
        let Some(case) = self.cases.get(&id).cloned() else {
            return Err(Error::UnknownCase(id));
        };
        let platform = self.agent.platform();
        info!(%id, desc = %case.desc, "running test case");

        // Platform gate.
        if let Some(required) = case.platform {
            if required != platform {
                info!(%id, %required, "skipping test case");
                self.skipped.push(Skip {
                    case: id,
                    reason: SkipReason::PlatformGate(required),
                });
                return Ok(RunOutcome::Skipped);
            }
        }

        // Strip properties the platform (or this specific case) does not
        // support, recording each removal.
        let unprops = (self.unsupported_properties)(platform, id);
        for prop in unprops
            .iter()
            .filter(|prop| case.manifest_props.contains(**prop))
        {
            debug!(%id, %prop, "skipping unsupported property");
            self.skipped.push(Skip {
                case: id,
                reason: SkipReason::UnsupportedProperty(*prop),
            });
        }
        let manifest = case.manifest_props.without(&unprops);
        let resource =
            case.resource.as_ref().map(|expected| expected.without(&unprops));

        if manifest.is_empty() {
            info!(%id, "skipping test case: nothing left to test");
            self.skipped
                .push(Skip { case: id, reason: SkipReason::NothingToTest });
            return Ok(RunOutcome::Skipped);
        }

        // Prerequisites.
        if let Some(sys_def) = case.sys_def_switchport {
            if platform.has_switchport() {
                self.agent.system_default_switchport(sys_def).await?;
            }
        }
        if case.preclean_intf {
            self.agent.preclean(&case.title_pattern).await?;
        }
        for acl in &case.acl {
            self.agent.ensure_acl(acl).await?;
        }

        // First manifest run.
        let report =
            self.agent.apply(&case.title_pattern, &manifest).await?;
        let exit_code = report.exit_code();
        if !case.code.contains(&exit_code) {
            return Err(Error::UnexpectedExitCode(
                id,
                exit_code,
                case.code.clone(),
            ));
        }

        // Idempotence: a second run must be a no-op.
        let report =
            self.agent.apply(&case.title_pattern, &manifest).await?;
        if report.changed {
            return Err(Error::NotIdempotent(id, report.changed_props));
        }

        // Verify the resulting resource state, retrying while the device
        // converges.
        let expected = resource.unwrap_or(manifest);
        let mut attempt = 0;
        loop {
            let state =
                self.agent.resource_state(&case.title_pattern).await?;
            let mismatches = state.verify(&expected);
            if mismatches.is_empty() {
                break;
            }
            if attempt >= self.config.verify_retries {
                let error = Error::VerificationFailed(id, mismatches);
                error.log();
                return Err(error);
            }
            attempt += 1;
            debug!(%id, attempt, "state not converged yet, retrying");
            sleep(self.config.retry_interval()).await;
        }

        info!(%id, "test case passed");
        Ok(RunOutcome::Passed)
    }

    // Resets the given interface after the suite is done with it.
    pub async fn cleanup(&mut self, intf: &InterfaceId) -> Result<(), Error> {
        interface_cleanup(&mut self.agent, intf).await
    }

    // Logs every recorded skip and returns the ledger.
    pub fn skipped_tests_summary(&self) -> &[Skip] {
        if self.skipped.is_empty() {
            info!("no tests were skipped");
        }
        for skip in &self.skipped {
            match &skip.reason {
                SkipReason::PlatformGate(required) => {
                    info!(case = %skip.case, %required,
                        "skipped: case restricted to another platform");
                }
                SkipReason::UnsupportedProperty(prop) => {
                    info!(case = %skip.case, %prop,
                        "skipped: unsupported property");
                }
                SkipReason::NothingToTest => {
                    info!(case = %skip.case,
                        "skipped: nothing left to test");
                }
            }
        }
        &self.skipped
    }
}

// ===== global functions =====

// Resets an interface to platform defaults, removing its sub-interfaces.
pub async fn interface_cleanup(
    agent: &mut impl DeviceAgent,
    intf: &InterfaceId,
) -> Result<(), Error> {
    info!(%intf, "cleaning up interface");
    agent.preclean(intf).await?;
    Ok(())
}
