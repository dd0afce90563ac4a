//! The merge pipeline: Builder, Deriver, Writer.
//!
//! A [`MergeJob`] names the source tables (each with its [`SourceSpec`]), the side files and the
//! output path. [`MergeJob::run`] executes the phases strictly one after another; the output is
//! only replaced when every phase succeeded.
//!
//! A job given a flag through [`MergeJob::cancel_on`] checks it between phases and stops with
//! [`crate::Error::Cancelled`] once it is set.
//!
//! # Examples
//!
//! ```rust,no_run
//! use tinymerge::{merge::MergeJob, MergeConfig};
//!
//! let report = MergeJob::standard(
//!     "yarn.tiny",
//!     "yarn-srg.tiny",
//!     "yarn-mcp.tiny",
//!     "static_methods.txt",
//!     "constructors.txt",
//!     "params.csv",
//!     "merged.tiny",
//! )
//! .config(MergeConfig::lenient())
//! .run()?;
//!
//! println!("{} classes written", report.classes);
//! # Ok::<(), tinymerge::Error>(())
//! ```

use std::{
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use log::info;

use crate::{
    auxiliary::Auxiliary,
    builder::{SourceSpec, TableBuilder, TargetSlot},
    config::MergeConfig,
    mapping::MappingTable,
    params::ParameterDeriver,
    writer::TableWriter,
    Error::Cancelled,
    Result,
};

/// Summary of a finished merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeReport {
    /// Where the table was written
    pub output: PathBuf,
    /// Class records written
    pub classes: usize,
    /// Method records written
    pub methods: usize,
    /// Field records written
    pub fields: usize,
    /// Parameter records written
    pub parameters: usize,
    /// Bridge methods left out
    pub bridges_skipped: usize,
    /// Whether the output uses `escaped-names`
    pub escaped_names: bool,
}

/// One merge run.
#[derive(Debug, Clone)]
pub struct MergeJob {
    sources: Vec<(PathBuf, SourceSpec)>,
    static_methods: Option<PathBuf>,
    constructors: Option<PathBuf>,
    parameters: Option<PathBuf>,
    output: PathBuf,
    config: MergeConfig,
    cancel: Option<Arc<AtomicBool>>,
}

impl MergeJob {
    /// A job writing to `output`, without any inputs yet.
    pub fn new(output: impl Into<PathBuf>) -> MergeJob {
        MergeJob {
            sources: Vec::new(),
            static_methods: None,
            constructors: None,
            parameters: None,
            output: output.into(),
            config: MergeConfig::default(),
            cancel: None,
        }
    }

    /// The standard five source merge.
    ///
    /// `named` supplies `official`, `intermediary` and the `named` parameter names, `mcp`
    /// supplies `mcp` (blank class names meaning "unchanged"), `srg` supplies `srg`. All three
    /// are keyed by `named`.
    pub fn standard(
        named: impl AsRef<Path>,
        srg: impl AsRef<Path>,
        mcp: impl AsRef<Path>,
        static_methods: impl AsRef<Path>,
        constructors: impl AsRef<Path>,
        parameters: impl AsRef<Path>,
        output: impl Into<PathBuf>,
    ) -> MergeJob {
        let named = named.as_ref();
        MergeJob::new(output)
            .source(named, SourceSpec::new(TargetSlot::SetOfficial))
            .source(named, SourceSpec::new(TargetSlot::SetIntermediary))
            .source(named, SourceSpec::new(TargetSlot::SetNamedParameters))
            .source(
                mcp,
                SourceSpec::new(TargetSlot::SetMcp).fill_blank_classes(true),
            )
            .source(srg, SourceSpec::new(TargetSlot::SetSrg))
            .static_methods(static_methods)
            .constructors(constructors)
            .parameter_names(parameters)
    }

    /// Adds a source table, applied after the ones added before.
    #[must_use]
    pub fn source(mut self, path: impl AsRef<Path>, spec: SourceSpec) -> MergeJob {
        self.sources.push((path.as_ref().to_path_buf(), spec));
        self
    }

    /// Sets the static method list.
    #[must_use]
    pub fn static_methods(mut self, path: impl AsRef<Path>) -> MergeJob {
        self.static_methods = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the constructor index list.
    #[must_use]
    pub fn constructors(mut self, path: impl AsRef<Path>) -> MergeJob {
        self.constructors = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the parameter name table.
    #[must_use]
    pub fn parameter_names(mut self, path: impl AsRef<Path>) -> MergeJob {
        self.parameters = Some(path.as_ref().to_path_buf());
        self
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn config(mut self, config: MergeConfig) -> MergeJob {
        self.config = config;
        self
    }

    /// Stops the run at the next phase boundary once `flag` is set.
    #[must_use]
    pub fn cancel_on(mut self, flag: Arc<AtomicBool>) -> MergeJob {
        self.cancel = Some(flag);
        self
    }

    /// The output path.
    #[must_use]
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Builds and derives the table without writing it.
    ///
    /// # Errors
    /// Any error of the Builder, the auxiliary loaders or the Deriver.
    pub fn prepare(&self) -> Result<MappingTable> {
        let mut builder = TableBuilder::new();
        for (path, spec) in &self.sources {
            self.check_cancelled()?;
            builder.load_file(path, spec)?;
        }
        let mut table = builder.finish();

        self.check_cancelled()?;

        let auxiliary = Auxiliary::load(
            self.static_methods.as_deref(),
            self.constructors.as_deref(),
            self.parameters.as_deref(),
            &table,
        )?;

        self.check_cancelled()?;
        ParameterDeriver::new(&self.config, &auxiliary).derive_table(&mut table)?;
        Ok(table)
    }

    /// Runs the whole merge and writes the output.
    ///
    /// # Errors
    /// Any error of the phases, or [`crate::Error::Cancelled`]; the output file is left
    /// untouched.
    pub fn run(&self) -> Result<MergeReport> {
        let table = self.prepare()?;
        self.check_cancelled()?;

        let escaped_names = self.config.escape_output.unwrap_or(table.escaped_names);
        let stats = TableWriter::new(escaped_names).write(&table, &self.output)?;

        let report = MergeReport {
            output: self.output.clone(),
            classes: stats.classes,
            methods: stats.methods,
            fields: stats.fields,
            parameters: stats.parameters,
            bridges_skipped: stats.bridges_skipped,
            escaped_names,
        };

        info!(
            "Wrote {}: {} classes, {} methods, {} fields, {} parameters ({} bridges skipped)",
            report.output.display(),
            report.classes,
            report.methods,
            report.fields,
            report.parameters,
            report.bridges_skipped
        );
        Ok(report)
    }

    fn check_cancelled(&self) -> Result<()> {
        match &self.cancel {
            Some(flag) if flag.load(Ordering::SeqCst) => Err(Cancelled),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn standard_source_order() {
        let job = MergeJob::standard("n", "s", "m", "st", "c", "p", "out");
        let slots: Vec<TargetSlot> = job.sources.iter().map(|(_, spec)| spec.slot).collect();
        assert_eq!(
            slots,
            [
                TargetSlot::SetOfficial,
                TargetSlot::SetIntermediary,
                TargetSlot::SetNamedParameters,
                TargetSlot::SetMcp,
                TargetSlot::SetSrg
            ]
        );
        assert!(job.sources[3].1.fill_blanks);
        assert_eq!(job.output(), Path::new("out"));
    }

    #[test]
    fn missing_source_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.tiny");
        let job = MergeJob::new(&output).source(
            dir.path().join("missing.tiny"),
            SourceSpec::new(TargetSlot::SetOfficial),
        );

        let err = job.run().unwrap_err();
        assert!(matches!(err.root(), Error::FileError(_)));
        assert!(!output.exists());
    }

    #[test]
    fn cancelled_job_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let named = dir.path().join("named.tiny");
        std::fs::write(&named, "tiny\t2\t0\tnamed\tofficial\nc\tx/Widget\ta\n").unwrap();

        let output = dir.path().join("out.tiny");
        let flag = Arc::new(AtomicBool::new(true));
        let job = MergeJob::new(&output)
            .source(&named, SourceSpec::new(TargetSlot::SetOfficial))
            .cancel_on(Arc::clone(&flag));

        let err = job.run().unwrap_err();
        assert!(matches!(err, Error::Cancelled));
        assert!(!output.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);

        // An unset flag does not interfere
        flag.store(false, Ordering::SeqCst);
        assert!(job.prepare().is_ok());
    }
}
