use std::collections::HashMap;

use crate::{
    descriptor,
    mapping::MappingTable,
    namespace::Namespace,
    Result,
};

/// Translates identities of a source keyed by another namespace into `named` identities.
///
/// Built from the pairs already merged into the table, so a source keyed by `official` can only
/// be applied after the `official` source.
pub(crate) struct Rekey {
    classes: HashMap<String, String>,
    /// `(named owner, key name, named descriptor)` to `named` name
    methods: HashMap<(String, String, String), String>,
    fields: HashMap<(String, String, String), String>,
}

impl Rekey {
    pub(crate) fn new(table: &MappingTable, key: Namespace) -> Rekey {
        let classes = table.class_lookup(key, Namespace::PRIMARY);
        let mut methods = HashMap::new();
        let mut fields = HashMap::new();

        for class in table.classes() {
            for method in class.methods() {
                if let Some(name) = method.mapping.get(key) {
                    methods.insert(
                        (
                            class.named().to_string(),
                            name.to_string(),
                            method.descriptor().to_string(),
                        ),
                        method.mapping.named().to_string(),
                    );
                }
            }

            for field in class.fields() {
                if let Some(name) = field.mapping.get(key) {
                    fields.insert(
                        (
                            class.named().to_string(),
                            name.to_string(),
                            field.descriptor().to_string(),
                        ),
                        field.mapping.named().to_string(),
                    );
                }
            }
        }

        Rekey {
            classes,
            methods,
            fields,
        }
    }

    pub(crate) fn class(&self, name: &str) -> Option<&str> {
        self.classes.get(name).map(String::as_str)
    }

    /// Rewrites a descriptor from the key namespace into `named`.
    pub(crate) fn descriptor(&self, descriptor: &str) -> Result<String> {
        descriptor::remap(descriptor, |name| self.class(name))
    }

    pub(crate) fn method(&self, owner: &str, name: &str, descriptor: &str) -> Option<&str> {
        self.methods
            .get(&(owner.to_string(), name.to_string(), descriptor.to_string()))
            .map(String::as_str)
    }

    pub(crate) fn field(&self, owner: &str, name: &str, descriptor: &str) -> Option<&str> {
        self.fields
            .get(&(owner.to_string(), name.to_string(), descriptor.to_string()))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::MemberKey;

    #[test]
    fn translate_official_identities() {
        let mut table = MappingTable::new();
        let class = table.class_or_insert("x/Widget");
        class.mapping.set(Namespace::Official, "a").unwrap();
        class
            .method_or_insert(MemberKey::new("resize", "(Lx/Widget;)V"))
            .mapping
            .set(Namespace::Official, "b")
            .unwrap();
        class
            .field_or_insert(MemberKey::new("size", "I"))
            .mapping
            .set(Namespace::Official, "c")
            .unwrap();

        let rekey = Rekey::new(&table, Namespace::Official);
        assert_eq!(rekey.class("a"), Some("x/Widget"));
        assert_eq!(rekey.class("z"), None);

        let descriptor = rekey.descriptor("(La;)V").unwrap();
        assert_eq!(descriptor, "(Lx/Widget;)V");
        assert_eq!(rekey.method("x/Widget", "b", &descriptor), Some("resize"));
        assert_eq!(rekey.method("x/Widget", "b", "()V"), None);
        assert_eq!(rekey.field("x/Widget", "c", "I"), Some("size"));
    }
}
