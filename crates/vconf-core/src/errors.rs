use thiserror::Error;
use vconf_core_types::TaskId;

/// Result type alias using ComplianceError
pub type Result<T> = std::result::Result<T, ComplianceError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and reporting in compliance results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Configuration
    InvalidConfig,
    ConfigRead,
    ConfigParse,

    // Executor
    InvalidWorkerCount,
    WorkerSpawn,
    TaskPanicked,
    TaskDisconnected,

    // Controller
    GetFailed,
    SetFailed,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Stable `ERR_*` code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::ConfigRead => "ERR_CONFIG_READ",
            ExErrorKind::ConfigParse => "ERR_CONFIG_PARSE",
            ExErrorKind::InvalidWorkerCount => "ERR_INVALID_WORKER_COUNT",
            ExErrorKind::WorkerSpawn => "ERR_WORKER_SPAWN",
            ExErrorKind::TaskPanicked => "ERR_TASK_PANICKED",
            ExErrorKind::TaskDisconnected => "ERR_TASK_DISCONNECTED",
            ExErrorKind::GetFailed => "ERR_GET_FAILED",
            ExErrorKind::SetFailed => "ERR_SET_FAILED",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification kind for programmatic handling plus optional
/// operation, controller and task context for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    controller: Option<String>,
    task_id: Option<TaskId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            controller: None,
            task_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Name of the operation that failed, e.g. `executor.configure`
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    pub fn with_controller(mut self, controller: impl Into<String>) -> Self {
        self.controller = Some(controller.into());
        self
    }

    pub fn with_task_id(mut self, task_id: TaskId) -> Self {
        self.task_id = Some(task_id);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Stable code such as `ERR_TASK_PANICKED`
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn controller(&self) -> Option<&str> {
        self.controller.as_deref()
    }

    pub fn task_id(&self) -> Option<&TaskId> {
        self.task_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Wrapped cause, when one error was raised while handling another
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(controller) = &self.controller {
            write!(f, " (controller: {})", controller)?;
        }
        if let Some(task_id) = &self.task_id {
            write!(f, " (task_id: {})", task_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Error taxonomy for vconf operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComplianceError {
    // ===== Configuration Errors =====
    /// Configuration file could not be read
    #[error("Failed to read configuration from {path}: {reason}")]
    ConfigRead { path: String, reason: String },

    /// Configuration text is not valid TOML for the expected schema
    #[error("Failed to parse configuration: {reason}")]
    ConfigParse { reason: String },

    /// A configuration value is present but unusable
    #[error("Invalid configuration for {field}: {reason}")]
    InvalidConfig { field: String, reason: String },

    // ===== Executor Errors =====
    /// Worker pools need at least one worker
    #[error("Invalid worker count {requested}: must be at least 1")]
    InvalidWorkerCount { requested: usize },

    /// The OS refused to start a worker thread
    #[error("Failed to spawn worker thread: {reason}")]
    WorkerSpawn { reason: String },

    /// The submitted callable panicked
    #[error("Task panicked: {message}")]
    TaskPanicked { message: String },

    /// The worker dropped the task without delivering a result
    #[error("Task result channel disconnected before a result was delivered")]
    TaskDisconnected,

    // ===== Controller Errors =====
    /// Reading the current configuration failed
    #[error("Controller {controller} failed to get current configuration: {reason}")]
    GetFailed { controller: String, reason: String },

    /// Writing the desired configuration failed
    #[error("Controller {controller} failed to set desired configuration: {reason}")]
    SetFailed { controller: String, reason: String },
}

impl ComplianceError {
    /// Canonical kind, used for the stable `ERR_*` code.
    pub fn kind(&self) -> ExErrorKind {
        match self {
            ComplianceError::ConfigRead { .. } => ExErrorKind::ConfigRead,
            ComplianceError::ConfigParse { .. } => ExErrorKind::ConfigParse,
            ComplianceError::InvalidConfig { .. } => ExErrorKind::InvalidConfig,
            ComplianceError::InvalidWorkerCount { .. } => ExErrorKind::InvalidWorkerCount,
            ComplianceError::WorkerSpawn { .. } => ExErrorKind::WorkerSpawn,
            ComplianceError::TaskPanicked { .. } => ExErrorKind::TaskPanicked,
            ComplianceError::TaskDisconnected => ExErrorKind::TaskDisconnected,
            ComplianceError::GetFailed { .. } => ExErrorKind::GetFailed,
            ComplianceError::SetFailed { .. } => ExErrorKind::SetFailed,
        }
    }

    /// Controller the error was raised by, for controller errors.
    pub fn controller(&self) -> Option<&str> {
        match self {
            ComplianceError::GetFailed { controller, .. }
            | ComplianceError::SetFailed { controller, .. } => Some(controller),
            _ => None,
        }
    }
}

impl From<ComplianceError> for ExError {
    fn from(err: ComplianceError) -> Self {
        let ex_err = ExError::new(err.kind()).with_message(err.to_string());
        match err.controller() {
            Some(controller) => ex_err.with_controller(controller),
            None => ex_err,
        }
    }
}
