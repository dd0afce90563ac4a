use std::sync::{atomic::AtomicBool, Arc};

use anyhow::Context;
use serde::Serialize;
use tinymerge::{Error, MergeJob};

use crate::{
    app::{GlobalOptions, MergeArgs},
    commands::common::{file_display_name, merge_config},
    output::{print_counts, print_output},
};

#[derive(Debug, Serialize)]
pub struct MergeSummary {
    pub output: String,
    pub classes: usize,
    pub methods: usize,
    pub fields: usize,
    pub parameters: usize,
    pub bridges_skipped: usize,
    pub escaped_names: bool,
}

pub fn run(args: &MergeArgs, opts: &GlobalOptions, cancelled: Arc<AtomicBool>) -> anyhow::Result<()> {
    let result = MergeJob::standard(
        &args.named,
        &args.srg,
        &args.mcp,
        &args.static_methods,
        &args.constructors,
        &args.params,
        &args.output,
    )
    .config(merge_config(args))
    .cancel_on(cancelled)
    .run();

    if let Err(error) = &result {
        if matches!(error.root(), Error::Cancelled) {
            eprintln!("Cancelled, {} left unchanged.", args.output.display());
            std::process::exit(130);
        }
    }
    let report =
        result.with_context(|| format!("failed to merge into {}", args.output.display()))?;

    let summary = MergeSummary {
        output: report.output.display().to_string(),
        classes: report.classes,
        methods: report.methods,
        fields: report.fields,
        parameters: report.parameters,
        bridges_skipped: report.bridges_skipped,
        escaped_names: report.escaped_names,
    };

    print_output(&summary, opts, |summary| {
        println!("Wrote {}", file_display_name(&report.output));
        println!();

        print_counts(&[
            ("classes", summary.classes),
            ("methods", summary.methods),
            ("fields", summary.fields),
            ("parameters", summary.parameters),
            ("bridges skipped", summary.bridges_skipped),
        ]);

        if summary.escaped_names {
            println!();
            println!("Names are escaped.");
        }
    })
}
