//! Human-readable summary renderer for configuration diffs.

use crate::comparator::model::ConfigDiff;
use serde_json::Value;
use std::collections::BTreeSet;

/// Render a Markdown summary of a [`ConfigDiff`].
///
/// Each drifted leaf is listed with its dotted key path as
/// `` - `path`: current `X`, desired `Y` ``. A key missing on one side is shown
/// as `<absent>`. The summary is informational only.
pub fn render_drift_summary(diff: &ConfigDiff) -> String {
    let mut out = String::new();
    out.push_str("## Configuration Drift\n\n");

    if diff.is_empty() {
        out.push_str("_No drift detected._\n");
        return out;
    }

    let mut lines = Vec::new();
    collect_lines("", diff.current.as_ref(), diff.desired.as_ref(), &mut lines);
    for line in lines {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

fn collect_lines(path: &str, current: Option<&Value>, desired: Option<&Value>, lines: &mut Vec<String>) {
    if let (Some(Value::Object(c)), Some(Value::Object(d))) = (current, desired) {
        let keys: BTreeSet<&String> = c.keys().chain(d.keys()).collect();
        for key in keys {
            let child = if path.is_empty() {
                key.clone()
            } else {
                format!("{}.{}", path, key)
            };
            collect_lines(&child, c.get(key), d.get(key), lines);
        }
        return;
    }

    lines.push(format!(
        "- `{}`: current {}, desired {}",
        if path.is_empty() { "<root>" } else { path },
        render(current),
        render(desired)
    ));
}

fn render(value: Option<&Value>) -> String {
    match value {
        Some(v) => format!("`{}`", v),
        None => "<absent>".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparator::get_non_compliant_configs;
    use serde_json::json;

    #[test]
    fn test_summary_no_drift() {
        let out = render_drift_summary(&ConfigDiff::none());
        assert!(out.contains("No drift detected"));
    }

    #[test]
    fn test_summary_scalar_root() {
        let diff = get_non_compliant_configs(&json!(300), &json!(900));
        let out = render_drift_summary(&diff);
        assert!(out.contains("- `<root>`: current `300`, desired `900`"));
    }

    #[test]
    fn test_summary_nested_paths() {
        let diff = get_non_compliant_configs(
            &json!({"ssh": {"timeout": 300, "enabled": true}}),
            &json!({"ssh": {"timeout": 900, "enabled": true}}),
        );
        let out = render_drift_summary(&diff);
        assert!(out.contains("- `ssh.timeout`: current `300`, desired `900`"));
        assert!(!out.contains("enabled"));
    }

    #[test]
    fn test_summary_absent_side() {
        let diff = get_non_compliant_configs(&json!({}), &json!({"banner": "authorized only"}));
        let out = render_drift_summary(&diff);
        assert!(out.contains("- `banner`: current <absent>, desired `\"authorized only\"`"));
    }

    #[test]
    fn test_summary_sequence_leaf() {
        let diff = get_non_compliant_configs(
            &json!({"ntp": ["a", "b"]}),
            &json!({"ntp": ["b", "c"]}),
        );
        let out = render_drift_summary(&diff);
        assert!(out.contains("- `ntp`: current `[\"a\"]`, desired `[\"c\"]`"));
    }
}
