use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use vconf_core::{ComplianceError, Controller, Result};

/// Connection details for one managed host
#[derive(Debug, Clone)]
pub struct HostContext {
    pub hostname: String,
}

#[allow(dead_code)]
pub fn host(hostname: &str) -> HostContext {
    HostContext {
        hostname: hostname.to_string(),
    }
}

/// Controller backed by an in-memory per-host store
///
/// `get` fails for hosts listed in `unreachable`, `set` fails for hosts
/// listed in `read_only`.
#[derive(Default)]
pub struct InMemoryController {
    pub store: Mutex<HashMap<String, Value>>,
    pub unreachable: Vec<String>,
    pub read_only: Vec<String>,
    pub defaults: Option<Value>,
    pub set_calls: AtomicUsize,
}

#[allow(dead_code)]
impl InMemoryController {
    pub fn with_host(self, hostname: &str, config: Value) -> Self {
        self.store
            .lock()
            .unwrap()
            .insert(hostname.to_string(), config);
        self
    }

    pub fn current(&self, hostname: &str) -> Option<Value> {
        self.store.lock().unwrap().get(hostname).cloned()
    }

    pub fn set_calls(&self) -> usize {
        self.set_calls.load(Ordering::SeqCst)
    }
}

impl Controller for InMemoryController {
    type Context = HostContext;

    fn name(&self) -> &str {
        "in_memory"
    }

    fn get(&self, context: &HostContext) -> Result<Value> {
        if self.unreachable.contains(&context.hostname) {
            return Err(ComplianceError::GetFailed {
                controller: self.name().to_string(),
                reason: format!("{} unreachable", context.hostname),
            });
        }
        Ok(self
            .current(&context.hostname)
            .unwrap_or(Value::Object(Default::default())))
    }

    fn set(&self, context: &HostContext, desired: &Value) -> Result<()> {
        self.set_calls.fetch_add(1, Ordering::SeqCst);
        if self.read_only.contains(&context.hostname) {
            return Err(ComplianceError::SetFailed {
                controller: self.name().to_string(),
                reason: format!("{} is read-only", context.hostname),
            });
        }
        self.store
            .lock()
            .unwrap()
            .insert(context.hostname.clone(), desired.clone());
        Ok(())
    }

    fn defaults(&self) -> Option<Value> {
        self.defaults.clone()
    }
}
