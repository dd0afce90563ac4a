//! Loaders for the side files consumed by the parameter deriver.
//!
//! | File                 | Format                               | Type                   |
//! |----------------------|--------------------------------------|------------------------|
//! | static method list   | one `srg` method name per line      | [`StaticMethods`]      |
//! | constructor indices  | `<index> <owner> <descriptor>`       | [`ConstructorIndices`] |
//! | parameter names      | CSV, `param,name,side`               | [`ParameterNames`]     |
//!
//! All three are loaded once per run and are immutable afterwards.

mod constructors;
mod params;
mod static_methods;

use std::path::Path;

use crate::{file, mapping::MappingTable, namespace::Namespace, Result};

pub use constructors::ConstructorIndices;
pub use params::{ParameterNames, PARAMS_HEADER};
pub use static_methods::StaticMethods;

/// The side tables of one run.
#[derive(Debug, Clone, Default)]
pub struct Auxiliary {
    /// Methods without a receiver
    pub static_methods: StaticMethods,
    /// Constructor member indices
    pub constructors: ConstructorIndices,
    /// Curated parameter names
    pub parameters: ParameterNames,
}

impl Auxiliary {
    /// Loads every side file which is given; missing ones stay empty.
    ///
    /// `table` must be fully built: constructor descriptors are remapped through its `srg` class
    /// names.
    ///
    /// # Errors
    /// Any loader error, wrapped with the offending path.
    pub fn load(
        static_methods: Option<&Path>,
        constructors: Option<&Path>,
        parameters: Option<&Path>,
        table: &MappingTable,
    ) -> Result<Auxiliary> {
        let mut auxiliary = Auxiliary::default();

        if let Some(path) = static_methods {
            auxiliary.static_methods = file::read_with(path, StaticMethods::parse)?;
        }

        if let Some(path) = constructors {
            let srg_to_named = table.class_lookup(Namespace::Srg, Namespace::Named);
            auxiliary.constructors =
                file::read_with(path, |text| ConstructorIndices::parse(text, &srg_to_named))?;
        }

        if let Some(path) = parameters {
            auxiliary.parameters = file::read_with(path, ParameterNames::parse)?;
        }

        log::info!(
            "Loaded {} static methods, {} constructors, {} named parameter lists",
            auxiliary.static_methods.len(),
            auxiliary.constructors.len(),
            auxiliary.parameters.len()
        );
        Ok(auxiliary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn load_given_files() {
        let dir = tempfile::tempdir().unwrap();
        let statics = dir.path().join("static_methods.txt");
        let ctors = dir.path().join("constructors.txt");
        std::fs::write(&statics, "func_1_a\n").unwrap();
        std::fs::write(&ctors, "5 net/A (Lnet/A;)V\n").unwrap();

        let mut table = MappingTable::new();
        table
            .class_or_insert("x/Alpha")
            .mapping
            .set(Namespace::Srg, "net/A")
            .unwrap();

        let auxiliary = Auxiliary::load(Some(&statics), Some(&ctors), None, &table).unwrap();
        assert!(auxiliary.static_methods.contains("func_1_a"));
        assert_eq!(auxiliary.constructors.get("net/A", "(Lx/Alpha;)V"), Some(5));
        assert!(auxiliary.parameters.is_empty());
    }

    #[test]
    fn load_error_carries_path() {
        let dir = tempfile::tempdir().unwrap();
        let params = dir.path().join("params.csv");
        std::fs::write(&params, "wrong,header\n").unwrap();

        let err = Auxiliary::load(None, None, Some(&params), &MappingTable::new()).unwrap_err();
        assert!(matches!(err, Error::InFile { .. }));
        assert!(matches!(err.root(), Error::InvalidAuxiliary(_)));
    }
}
