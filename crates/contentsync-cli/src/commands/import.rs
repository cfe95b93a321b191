//! Import command: replay a snapshot into the target instance

use super::{clean_list, ConnectionArgs};
use clap::Args;
use contentsync_core::config::{parse_flag, parse_list, ReplayConfig, DEFAULT_SNAPSHOT_FILE};
use contentsync_core::protection::ProtectionConfig;
use contentsync_core::replay::replay_snapshot;
use contentsync_core::sanitize::SanitizePolicy;
use contentsync_core_types::RunId;
use contentsync_store::load_snapshot;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ImportArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Snapshot file to replay
    #[arg(long, env = "STRAPI_EXPORT_FILE", default_value = DEFAULT_SNAPSHOT_FILE)]
    pub file: PathBuf,

    /// Also write the built-in protected models (unrecognised values mean false)
    #[arg(
        long,
        env = "STRAPI_INCLUDE_PROTECTED",
        num_args = 0..=1,
        default_value = "false",
        default_missing_value = "true"
    )]
    pub include_protected: String,

    /// Extra protected model UIDs (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub protected: Vec<String>,

    /// Extra protected model UIDs from the environment; unioned with --protected
    #[arg(long = "protected-env", env = "STRAPI_PROTECTED_UIDS", hide = true)]
    pub protected_env: Option<String>,

    /// Models to replay first, in this order (comma separated)
    #[arg(long, env = "STRAPI_IMPORT_ORDER", value_delimiter = ',')]
    pub order: Vec<String>,

    /// Additional fields to strip at the entity root
    #[arg(long = "strip-root-field", value_delimiter = ',')]
    pub strip_root_fields: Vec<String>,

    /// Additional fields to strip below the entity root
    #[arg(long = "strip-nested-field", value_delimiter = ',')]
    pub strip_nested_fields: Vec<String>,
}

impl ImportArgs {
    fn include_protected(&self) -> bool {
        parse_flag(&self.include_protected).unwrap_or_else(|err| {
            tracing::warn!(
                value = self.include_protected.as_str(),
                "{}; include-protected stays off",
                err
            );
            false
        })
    }

    fn replay_config(&self) -> ReplayConfig {
        let mut extra_uids = clean_list(self.protected.clone());
        if let Some(from_env) = &self.protected_env {
            for uid in parse_list(from_env) {
                if !extra_uids.contains(&uid) {
                    extra_uids.push(uid);
                }
            }
        }

        ReplayConfig {
            protection: ProtectionConfig {
                include_protected: self.include_protected(),
                extra_uids,
            },
            order: clean_list(self.order.clone()),
            sanitize: SanitizePolicy::default()
                .with_root_fields(clean_list(self.strip_root_fields.clone()))
                .with_nested_fields(clean_list(self.strip_nested_fields.clone())),
        }
    }
}

pub fn execute(args: ImportArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = args.replay_config();
    let mut client = args.connection.connect()?;
    let snapshot = load_snapshot(&args.file)?;

    let run_id = RunId::new();
    tracing::info!(
        run_id = %run_id,
        base_url = client.base_url(),
        file = %args.file.display(),
        "Starting import"
    );

    let report = replay_snapshot(&mut client, &snapshot, &config, run_id);

    if !report.detected_protected.is_empty() {
        println!(
            "Protected (405) models detected: {}",
            report.detected_protected.join(", ")
        );
    }
    println!("Summary → {}", report.stats);

    if report.is_failure() {
        return Err(format!("{} entries failed to import", report.stats.failed).into());
    }
    Ok(())
}
