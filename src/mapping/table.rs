use std::collections::HashMap;

use indexmap::IndexMap;

use crate::{mapping::ClassMapping, namespace::Namespace};

/// The merged table of one run, keyed by the `named` class name.
#[derive(Debug, Clone, Default)]
pub struct MappingTable {
    classes: IndexMap<String, ClassMapping>,
    /// Whether the parameter source used escaped names
    pub escaped_names: bool,
}

impl MappingTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> MappingTable {
        MappingTable::default()
    }

    /// Returns the class `named`, creating it on first sight.
    pub fn class_or_insert(&mut self, named: &str) -> &mut ClassMapping {
        self.classes
            .entry(named.to_string())
            .or_insert_with(|| ClassMapping::new(named))
    }

    /// Looks up a class by its `named` name.
    #[must_use]
    pub fn class(&self, named: &str) -> Option<&ClassMapping> {
        self.classes.get(named)
    }

    /// Classes in first-seen order.
    pub fn classes(&self) -> impl Iterator<Item = &ClassMapping> {
        self.classes.values()
    }

    /// Mutable access to the classes in first-seen order.
    pub fn classes_mut(&mut self) -> impl Iterator<Item = &mut ClassMapping> {
        self.classes.values_mut()
    }

    /// Number of classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Returns `true` if no class was merged yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Builds a class name lookup from namespace `from` to namespace `to`.
    ///
    /// Classes missing either name are left out. This is the lookup used to remap descriptors
    /// and keys between namespaces.
    #[must_use]
    pub fn class_lookup(&self, from: Namespace, to: Namespace) -> HashMap<String, String> {
        self.classes
            .values()
            .filter_map(|class| {
                let from = class.mapping.get(from)?;
                let to = class.mapping.get(to)?;
                Some((from.to_string(), to.to_string()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classes_keep_insertion_order() {
        let mut table = MappingTable::new();
        assert!(table.is_empty());

        table.class_or_insert("b/Second");
        table.class_or_insert("a/First");
        table.class_or_insert("b/Second");

        let names: Vec<&str> = table.classes().map(ClassMapping::named).collect();
        assert_eq!(names, ["b/Second", "a/First"]);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn lookup_skips_incomplete_pairs() {
        let mut table = MappingTable::new();
        table
            .class_or_insert("x/Alpha")
            .mapping
            .set(Namespace::Official, "a")
            .unwrap();
        table.class_or_insert("x/Beta");

        let lookup = table.class_lookup(Namespace::Official, Namespace::Named);
        assert_eq!(lookup.len(), 1);
        assert_eq!(lookup["a"], "x/Alpha");
    }
}
