//! Export command: dump every content type into a snapshot file

use super::ConnectionArgs;
use clap::Args;
use contentsync_core::config::{ExportConfig, DEFAULT_SNAPSHOT_FILE};
use contentsync_core::export::export_snapshot;
use contentsync_core::model::Group;
use contentsync_core::pagination::DEFAULT_PAGE_SIZE;
use contentsync_core::{ContentApi, ContentTypeRef};
use contentsync_core_types::RunId;
use contentsync_store::write_snapshot;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Snapshot file to write
    #[arg(long, env = "STRAPI_EXPORT_FILE", default_value = DEFAULT_SNAPSHOT_FILE)]
    pub file: PathBuf,

    /// Entries requested per page
    #[arg(
        long,
        env = "STRAPI_PAGE_SIZE",
        default_value_t = DEFAULT_PAGE_SIZE,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub page_size: u32,

    /// Export only these collection types (skips discovery)
    #[arg(long = "collection-type", value_delimiter = ',')]
    pub collection_types: Vec<String>,

    /// Export only these single types (skips discovery)
    #[arg(long = "single-type", value_delimiter = ',')]
    pub single_types: Vec<String>,
}

impl ExportArgs {
    /// Explicit targets, or `None` when discovery should decide
    fn explicit_types(&self) -> Option<Vec<ContentTypeRef>> {
        let listed = |group: Group, uids: &[String]| {
            uids.iter()
                .map(|uid| uid.trim())
                .filter(|uid| !uid.is_empty())
                .map(|uid| ContentTypeRef::new(group, uid))
                .collect::<Vec<_>>()
        };
        let mut types = listed(Group::CollectionTypes, &self.collection_types);
        types.extend(listed(Group::SingleTypes, &self.single_types));
        (!types.is_empty()).then_some(types)
    }
}

pub fn execute(args: ExportArgs) -> Result<(), Box<dyn std::error::Error>> {
    let explicit = args.explicit_types();
    let mut client = args.connection.connect()?;
    let config = ExportConfig {
        source: client.base_url().to_string(),
        page_size: args.page_size,
    };

    let types = match explicit {
        Some(types) => types,
        None => client.list_content_types()?,
    };
    tracing::info!(models = types.len(), "Exporting content types");

    let run_id = RunId::new();
    let (snapshot, report) = export_snapshot(&mut client, &types, &config, &run_id);
    write_snapshot(&args.file, &snapshot)?;

    println!(
        "Exported {} models to {}",
        report.exported,
        args.file.display()
    );
    if report.is_failure() {
        return Err(format!(
            "{} models failed to export: {}",
            report.failed,
            report.failed_uids.join(", ")
        )
        .into());
    }
    Ok(())
}
