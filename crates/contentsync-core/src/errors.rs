use serde_json::Value;
use thiserror::Error;

/// Result type alias using SyncError
pub type Result<T> = std::result::Result<T, SyncError>;

/// HTTP status the admin API returns for models that refuse writes
pub const STATUS_METHOD_NOT_ALLOWED: u16 = 405;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code used in structured log events
/// and in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Startup (fatal, before any network activity)
    Config,
    File,
    Parse,

    // Per-entity (recorded, run continues)
    Transport,
    ProtectionDetected,

    // Integration/IO
    Serialization,

    // Auth
    Unauthorised,
    Forbidden,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::Config => "ERR_CONFIG",
            ExErrorKind::File => "ERR_FILE",
            ExErrorKind::Parse => "ERR_PARSE",
            ExErrorKind::Transport => "ERR_TRANSPORT",
            ExErrorKind::ProtectionDetected => "ERR_PROTECTION_DETECTED",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Unauthorised => "ERR_UNAUTHORISED",
            ExErrorKind::Forbidden => "ERR_FORBIDDEN",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// Whether an error of this kind stops the run before it starts
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ExErrorKind::Config | ExErrorKind::File | ExErrorKind::Parse
        )
    }
}

/// Canonical structured error type
///
/// Carries a classification kind for programmatic handling plus the
/// context needed to diagnose a failure from the log alone.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    uid: Option<String>,
    path: Option<String>,
    status: Option<u16>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            uid: None,
            path: None,
            status: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add model UID context
    pub fn with_uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = Some(uid.into());
        self
    }

    /// Add file or request path context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add HTTP status context
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the model UID context, if any
    pub fn uid(&self) -> Option<&str> {
        self.uid.as_deref()
    }

    /// Get the path context, if any
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Get the HTTP status context, if any
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
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
        if let Some(uid) = &self.uid {
            write!(f, " (uid: {})", uid)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        if let Some(status) = self.status {
            write!(f, " (status: {})", status)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for contentsync operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SyncError {
    // ===== Startup =====
    /// A required setting was not supplied by flag or environment
    #[error("Missing configuration: {name}. {hint}")]
    MissingConfig { name: String, hint: String },

    /// A setting was supplied but could not be interpreted
    #[error("Invalid configuration for {name}: {reason}")]
    InvalidConfig { name: String, reason: String },

    /// Snapshot file could not be read
    #[error("Failed to read snapshot {path}: {message}")]
    SnapshotRead { path: String, message: String },

    /// Snapshot file could not be written
    #[error("Failed to write snapshot {path}: {message}")]
    SnapshotWrite { path: String, message: String },

    /// Snapshot content is not JSON, or not a snapshot object
    #[error("Failed to parse snapshot {path}: {message}")]
    SnapshotParse { path: String, message: String },

    // ===== Per-request =====
    /// Non-2xx response or a request that never got one
    #[error("HTTP {} {method} {path}: {message}", status.map(|s| s.to_string()).unwrap_or_else(|| "---".to_string()))]
    Transport {
        method: String,
        path: String,
        status: Option<u16>,
        body: Value,
        message: String,
    },

    /// The target refused writes for a model (405)
    #[error("Model {uid} rejects writes (405 Method Not Allowed)")]
    ProtectionDetected { uid: String },

    // ===== Other =====
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl SyncError {
    /// HTTP status of a transport failure, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            SyncError::Transport { status, .. } => *status,
            SyncError::ProtectionDetected { .. } => Some(STATUS_METHOD_NOT_ALLOWED),
            _ => None,
        }
    }

    /// True for the response that marks a model as protected
    pub fn is_method_not_allowed(&self) -> bool {
        self.status() == Some(STATUS_METHOD_NOT_ALLOWED)
    }

    /// Response body of a transport failure (parsed JSON or raw text)
    pub fn body(&self) -> Option<&Value> {
        match self {
            SyncError::Transport { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Conversion from SyncError to the canonical ExError
impl From<SyncError> for ExError {
    fn from(err: SyncError) -> Self {
        match err {
            SyncError::MissingConfig { name, hint } => ExError::new(ExErrorKind::Config)
                .with_op("resolve_config")
                .with_message(format!("Missing {}. {}", name, hint)),

            SyncError::InvalidConfig { name, reason } => ExError::new(ExErrorKind::Config)
                .with_op("resolve_config")
                .with_message(format!("Invalid {}: {}", name, reason)),

            SyncError::SnapshotRead { path, message } => ExError::new(ExErrorKind::File)
                .with_op("load_snapshot")
                .with_path(path)
                .with_message(message),

            SyncError::SnapshotWrite { path, message } => ExError::new(ExErrorKind::File)
                .with_op("write_snapshot")
                .with_path(path)
                .with_message(message),

            SyncError::SnapshotParse { path, message } => ExError::new(ExErrorKind::Parse)
                .with_op("load_snapshot")
                .with_path(path)
                .with_message(message),

            SyncError::Transport {
                method,
                path,
                status,
                message,
                ..
            } => {
                let kind = match status {
                    Some(401) => ExErrorKind::Unauthorised,
                    Some(403) => ExErrorKind::Forbidden,
                    Some(405) => ExErrorKind::ProtectionDetected,
                    _ => ExErrorKind::Transport,
                };
                let err = ExError::new(kind)
                    .with_op(method)
                    .with_path(path)
                    .with_message(message);
                match status {
                    Some(status) => err.with_status(status),
                    None => err,
                }
            }

            SyncError::ProtectionDetected { uid } => ExError::new(ExErrorKind::ProtectionDetected)
                .with_uid(uid)
                .with_status(STATUS_METHOD_NOT_ALLOWED)
                .with_message("Model rejects writes"),

            SyncError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }

            SyncError::Internal { message } => {
                ExError::new(ExErrorKind::Internal).with_message(message)
            }
        }
    }
}

/// Conversion from serde_json::Error to SyncError
impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        SyncError::Serialization {
            message: err.to_string(),
        }
    }
}
