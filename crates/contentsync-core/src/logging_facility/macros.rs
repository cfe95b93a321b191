//! Canonical logging macros
//!
//! Operation boundaries (`replay`, `export`, `export_model`) go through the
//! `log_op_*` macros. Per-model outcomes inside a run go through
//! [`log_model_event!`] so every one carries `run_id`, `group` and `uid`.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use contentsync_core::log_op_start;
/// log_op_start!("replay");
/// log_op_start!("export", models = 3u64);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = contentsync_core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = contentsync_core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// `duration_ms` is mandatory; run counters may follow it.
///
/// ```
/// # use contentsync_core::log_op_end;
/// log_op_end!("replay", duration_ms = 42, created = 2u64, failed = 0u64);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = contentsync_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($($field)*)?
        );
    };
}

/// Log a failed operation at error level
///
/// The error is converted into `ExError` first so the stable `ERR_*` code
/// lands in `err.code`.
///
/// ```
/// # use contentsync_core::{log_op_error, errors::SyncError};
/// let err = SyncError::ProtectionDetected { uid: "api::global.global".to_string() };
/// log_op_error!("export_model", err, duration_ms = 10, uid = "api::global.global");
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = contentsync_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            $($($field)*,)?
            "{}",
            ex_err
        );
    }};
}

/// Log one outcome for a model during a run
///
/// Takes the level, the event name, the run id, the [`Group`] and the UID,
/// then any extra fields and the message.
///
/// [`Group`]: crate::model::Group
///
/// ```
/// # use contentsync_core::log_model_event;
/// # use contentsync_core::model::Group;
/// # use contentsync_core_types::{schema::EVENT_MODEL_SKIPPED, RunId};
/// let run_id = RunId::new();
/// log_model_event!(
///     tracing::Level::WARN,
///     EVENT_MODEL_SKIPPED,
///     run_id,
///     Group::SingleTypes,
///     "api::global.global",
///     skipped = 1u64,
///     "Skipping protected model"
/// );
/// ```
#[macro_export]
macro_rules! log_model_event {
    ($level:expr, $event:expr, $run_id:expr, $group:expr, $uid:expr, $($rest:tt)+) => {{
        let group: $crate::model::Group = $group;
        tracing::event!(
            $level,
            run_id = %$run_id,
            group = group.as_str(),
            uid = $uid,
            event = $event,
            $($rest)+
        );
    }};
}
