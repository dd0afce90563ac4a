use std::path::Path;

use anyhow::Context;
use tinymerge::{
    config::{IndexEncoding, MergeConfig, DEFAULT_INDEX_THRESHOLD},
    tiny::TinyFile,
    File,
};

use crate::app::MergeArgs;

/// Read and parse one table file.
pub fn load_table(path: &Path) -> anyhow::Result<TinyFile> {
    File::from_file(path)
        .and_then(|file| file.parse_with(TinyFile::parse))
        .with_context(|| format!("failed to read table: {}", path.display()))
}

/// Map the merge flags onto a configuration.
pub fn merge_config(args: &MergeArgs) -> MergeConfig {
    let mut config = if args.lenient {
        MergeConfig::lenient()
    } else {
        MergeConfig::strict()
    };

    let threshold = args.threshold.unwrap_or(DEFAULT_INDEX_THRESHOLD);
    config.index_encoding = if args.index_from_table {
        IndexEncoding::ParameterTable {
            fallback: threshold,
        }
    } else {
        IndexEncoding::Threshold(threshold)
    };

    config.escape_output = match (args.escape, args.no_escape) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    };
    config
}

/// Extract a display-friendly filename from a path.
pub fn file_display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |f| f.to_string_lossy().to_string(),
    )
}
