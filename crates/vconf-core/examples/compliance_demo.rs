//! Compliance Demo
//!
//! This example walks a small fleet through check and remediation.
#![allow(clippy::unwrap_used, clippy::expect_used)]
//!
//! Key concepts illustrated:
//! 1. Implementing the controller contract over a product API
//! 2. Set semantics when comparing lists
//! 3. Fanning per-host work out over the bounded executor
//! 4. Rendering drift for humans

use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use vconf_core::comparator::{get_non_compliant_configs, render_drift_summary};
use vconf_core::logging_facility::{init, Profile};
use vconf_core::{ComplianceError, Controller, FrameworkConfig, Result, TaskExecutor};

/// NTP settings held in a pretend fleet inventory
struct NtpController {
    fleet: Mutex<HashMap<String, Value>>,
}

impl Controller for NtpController {
    type Context = String;

    fn name(&self) -> &str {
        "ntp"
    }

    fn get(&self, hostname: &String) -> Result<Value> {
        self.fleet
            .lock()
            .unwrap()
            .get(hostname)
            .cloned()
            .ok_or_else(|| ComplianceError::GetFailed {
                controller: self.name().to_string(),
                reason: format!("{} not in inventory", hostname),
            })
    }

    fn set(&self, hostname: &String, desired: &Value) -> Result<()> {
        self.fleet
            .lock()
            .unwrap()
            .insert(hostname.clone(), desired.clone());
        Ok(())
    }

    fn defaults(&self) -> Option<Value> {
        Some(json!({"enabled": true}))
    }
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let config = FrameworkConfig::from_env()?;
    init(config.logging.profile);

    println!("=== vconf Compliance Demo ===\n");

    // ===== Part 1: Comparing configuration =====
    println!("## Part 1: Comparator\n");

    let diff = get_non_compliant_configs(
        &json!({"servers": ["ntp-a", "ntp-b"], "enabled": true}),
        &json!({"servers": ["ntp-b", "ntp-c"], "enabled": true}),
    );
    println!("{}", render_drift_summary(&diff));

    // ===== Part 2: Checking a fleet =====
    println!("## Part 2: Fleet check\n");

    let mut fleet = HashMap::new();
    fleet.insert("esx-01".to_string(), json!({"servers": ["ntp-b", "ntp-c"]}));
    fleet.insert("esx-02".to_string(), json!({"servers": ["ntp-a"], "enabled": true}));
    fleet.insert("esx-03".to_string(), json!({"servers": ["ntp-c", "ntp-b"], "enabled": false}));
    let controller = Arc::new(NtpController {
        fleet: Mutex::new(fleet),
    });
    let desired = json!({"servers": ["ntp-b", "ntp-c"], "enabled": true});

    let executor = TaskExecutor::new(config.executor);
    let hosts = ["esx-01", "esx-02", "esx-03", "esx-04"];
    let handles: Vec<_> = hosts
        .iter()
        .map(|hostname| {
            let controller = Arc::clone(&controller);
            let hostname = hostname.to_string();
            let desired = desired.clone();
            executor.submit(move || {
                let result = controller.check_compliance(&hostname, &desired);
                (hostname, result)
            })
        })
        .collect::<Result<_>>()?;

    for handle in handles {
        let (hostname, result) = handle.join()?;
        println!("{}: {}", hostname, serde_json::to_string(&result)?);
    }

    // ===== Part 3: Remediation =====
    println!("\n## Part 3: Remediation\n");

    for hostname in hosts {
        let result = controller.remediate(&hostname.to_string(), &desired);
        println!("{}: {:?} {:?}", hostname, result.status, result.errors);
    }

    executor.shutdown();
    println!("\n=== Demo complete ===");
    Ok(())
}
