use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// tinymerge - merge tiny mapping tables over five namespaces
#[derive(Debug, Parser)]
#[command(name = "tinymerge", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared across all subcommands.
#[derive(Debug, Parser)]
pub struct GlobalOptions {
    /// Emit output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose (debug-level) logging output.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Merge the named, srg and mcp tables into one five-namespace table.
    Merge(MergeArgs),

    /// Show the namespaces, properties and record counts of a table file.
    Inspect {
        /// Path to the tiny v2 table.
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },
}

#[derive(Debug, Args)]
pub struct MergeArgs {
    /// Table with named, intermediary and official names and named parameters.
    #[arg(long, value_name = "FILE")]
    pub named: PathBuf,

    /// Table supplying srg names.
    #[arg(long, value_name = "FILE")]
    pub srg: PathBuf,

    /// Table supplying mcp names; blank class names keep the named name.
    #[arg(long, value_name = "FILE")]
    pub mcp: PathBuf,

    /// List of static srg method names.
    #[arg(long, value_name = "FILE")]
    pub static_methods: PathBuf,

    /// Constructor index list (`<index> <owner> <descriptor>`).
    #[arg(long, value_name = "FILE")]
    pub constructors: PathBuf,

    /// Parameter name table (`param,name,side`).
    #[arg(long, value_name = "FILE")]
    pub params: PathBuf,

    /// Where to write the merged table.
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Skip constructors without an index and use unnumbered method names as indices.
    #[arg(long)]
    pub lenient: bool,

    /// Member indices below N use the `p_i` marker.
    #[arg(long, value_name = "N")]
    pub threshold: Option<u32>,

    /// Take the `p_`/`p_i` marker from the parameter table where it names the index, the
    /// threshold deciding the rest.
    #[arg(long)]
    pub index_from_table: bool,

    /// Write the output with escaped names.
    #[arg(long, conflicts_with = "no_escape")]
    pub escape: bool,

    /// Write the output without escaped names.
    #[arg(long)]
    pub no_escape: bool,
}
