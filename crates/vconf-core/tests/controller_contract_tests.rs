#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{host, InMemoryController};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use vconf_core::controller::CONTROL_ALREADY_COMPLIANT;
use vconf_core::{ComplianceStatus, Controller, RemediateStatus, TaskExecutor};

#[test]
fn test_check_compliance_compliant() {
    let controller = InMemoryController::default().with_host("esx-01", json!({"timeout": 900}));
    let result = controller.check_compliance(&host("esx-01"), &json!({"timeout": 900}));
    assert_eq!(result.status, ComplianceStatus::Compliant);
    assert_eq!(result.current, None);
    assert_eq!(result.desired, None);
    assert!(result.errors.is_empty());
}

#[test]
fn test_check_compliance_reports_only_drift() {
    let controller = InMemoryController::default().with_host(
        "esx-01",
        json!({"timeout": 300, "servers": ["a", "b"], "enabled": true}),
    );
    let result = controller.check_compliance(
        &host("esx-01"),
        &json!({"timeout": 900, "servers": ["b", "a"], "enabled": true}),
    );
    assert_eq!(result.status, ComplianceStatus::NonCompliant);
    assert_eq!(result.current, Some(json!({"timeout": 300})));
    assert_eq!(result.desired, Some(json!({"timeout": 900})));
}

#[test]
fn test_check_compliance_get_failure() {
    let controller = InMemoryController {
        unreachable: vec!["esx-09".to_string()],
        ..Default::default()
    };
    let result = controller.check_compliance(&host("esx-09"), &json!({"timeout": 900}));
    assert_eq!(result.status, ComplianceStatus::Failed);
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].contains("esx-09 unreachable"));
}

#[test]
fn test_check_compliance_applies_defaults() {
    let controller = InMemoryController {
        defaults: Some(json!({"banner": ""})),
        ..Default::default()
    }
    .with_host("esx-01", json!({"timeout": 900}));
    let result =
        controller.check_compliance(&host("esx-01"), &json!({"timeout": 900, "banner": ""}));
    assert_eq!(result.status, ComplianceStatus::Compliant);
}

#[test]
fn test_remediate_skips_compliant_control() {
    let controller = InMemoryController::default().with_host("esx-01", json!({"timeout": 900}));
    let result = controller.remediate(&host("esx-01"), &json!({"timeout": 900}));
    assert_eq!(result.status, RemediateStatus::Skipped);
    assert_eq!(result.errors, vec![CONTROL_ALREADY_COMPLIANT.to_string()]);
    assert_eq!(controller.set_calls(), 0);
}

#[test]
fn test_remediate_applies_desired() {
    let controller = InMemoryController::default().with_host("esx-01", json!({"timeout": 300}));
    let desired = json!({"timeout": 900});
    let result = controller.remediate(&host("esx-01"), &desired);
    assert_eq!(result.status, RemediateStatus::Success);
    assert_eq!(result.old, Some(json!({"timeout": 300})));
    assert_eq!(result.new, Some(json!({"timeout": 900})));
    assert_eq!(controller.current("esx-01"), Some(desired.clone()));

    let recheck = controller.check_compliance(&host("esx-01"), &desired);
    assert_eq!(recheck.status, ComplianceStatus::Compliant);
}

#[test]
fn test_remediate_set_failure() {
    let controller = InMemoryController {
        read_only: vec!["esx-02".to_string()],
        ..Default::default()
    }
    .with_host("esx-02", json!({"timeout": 300}));
    let result = controller.remediate(&host("esx-02"), &json!({"timeout": 900}));
    assert_eq!(result.status, RemediateStatus::Failed);
    assert!(result.errors[0].contains("read-only"));
    assert_eq!(result.old, None);
    assert_eq!(controller.current("esx-02"), Some(json!({"timeout": 300})));
}

#[test]
fn test_remediate_get_failure_does_not_set() {
    let controller = InMemoryController {
        unreachable: vec!["esx-03".to_string()],
        ..Default::default()
    };
    let result = controller.remediate(&host("esx-03"), &json!({"timeout": 900}));
    assert_eq!(result.status, RemediateStatus::Failed);
    assert_eq!(controller.set_calls(), 0);
}

#[test]
fn test_results_serialize_with_stable_names() {
    let controller = InMemoryController::default().with_host("esx-01", json!({"timeout": 300}));
    let check = controller.check_compliance(&host("esx-01"), &json!({"timeout": 900}));
    assert_eq!(
        serde_json::to_value(&check).unwrap(),
        json!({
            "status": "NON_COMPLIANT",
            "current": {"timeout": 300},
            "desired": {"timeout": 900}
        })
    );

    let remediation = controller.remediate(&host("esx-01"), &json!({"timeout": 900}));
    assert_eq!(
        serde_json::to_value(&remediation).unwrap(),
        json!({
            "status": "SUCCESS",
            "old": {"timeout": 300},
            "new": {"timeout": 900}
        })
    );
}

#[test]
fn test_fan_out_across_hosts_with_executor() {
    let hosts: Vec<String> = (0..12).map(|i| format!("esx-{:02}", i)).collect();
    let mut controller = InMemoryController {
        unreachable: vec!["esx-11".to_string()],
        ..Default::default()
    };
    for (i, hostname) in hosts.iter().enumerate() {
        let timeout = if i % 2 == 0 { 900 } else { 300 };
        controller = controller.with_host(hostname, json!({"timeout": timeout}));
    }
    let controller = Arc::new(controller);
    let executor = TaskExecutor::with_workers(4);
    let desired = json!({"timeout": 900});

    let handles: Vec<_> = hosts
        .iter()
        .map(|hostname| {
            let controller = Arc::clone(&controller);
            let context = host(hostname);
            let desired = desired.clone();
            let handle = executor
                .submit(move || controller.check_compliance(&context, &desired))
                .unwrap();
            (hostname.clone(), handle)
        })
        .collect();

    let statuses: HashMap<String, ComplianceStatus> = handles
        .into_iter()
        .map(|(hostname, handle)| (hostname, handle.join().unwrap().status))
        .collect();

    assert_eq!(statuses["esx-00"], ComplianceStatus::Compliant);
    assert_eq!(statuses["esx-01"], ComplianceStatus::NonCompliant);
    assert_eq!(statuses["esx-11"], ComplianceStatus::Failed);
    assert_eq!(
        statuses
            .values()
            .filter(|s| **s == ComplianceStatus::NonCompliant)
            .count(),
        5
    );
}
