use indexmap::IndexMap;

use crate::{mapping::Mapping, namespace::Namespace, Error::DuplicateDeclaration, Result};

/// Name of every constructor, in every namespace.
pub const CONSTRUCTOR: &str = "<init>";

/// Identity of a member inside its class: `named` name plus `named` descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MemberKey {
    /// Name in the `named` namespace
    pub name: String,
    /// Descriptor in the `named` namespace
    pub descriptor: String,
}

impl MemberKey {
    /// Create a new key
    pub fn new(name: impl Into<String>, descriptor: impl Into<String>) -> MemberKey {
        MemberKey {
            name: name.into(),
            descriptor: descriptor.into(),
        }
    }
}

/// A class and its members, keyed by their `named` identity.
#[derive(Debug, Clone)]
pub struct ClassMapping {
    /// Names of the class itself
    pub mapping: Mapping,
    methods: IndexMap<MemberKey, MethodMapping>,
    fields: IndexMap<MemberKey, FieldMapping>,
}

impl ClassMapping {
    /// Creates an empty class with the `named` key `named`.
    #[must_use]
    pub fn new(named: impl Into<String>) -> ClassMapping {
        ClassMapping {
            mapping: Mapping::new(named),
            methods: IndexMap::new(),
            fields: IndexMap::new(),
        }
    }

    /// The `named` key of the class.
    #[must_use]
    pub fn named(&self) -> &str {
        self.mapping.named()
    }

    /// Returns the method `key`, creating it on first sight.
    pub fn method_or_insert(&mut self, key: MemberKey) -> &mut MethodMapping {
        self.methods
            .entry(key)
            .or_insert_with_key(|key| MethodMapping::new(&key.name, &key.descriptor))
    }

    /// Returns the field `key`, creating it on first sight.
    pub fn field_or_insert(&mut self, key: MemberKey) -> &mut FieldMapping {
        self.fields
            .entry(key)
            .or_insert_with_key(|key| FieldMapping::new(&key.name, &key.descriptor))
    }

    /// Looks up a method by its `named` identity.
    #[must_use]
    pub fn method(&self, name: &str, descriptor: &str) -> Option<&MethodMapping> {
        self.methods.get(&MemberKey::new(name, descriptor))
    }

    /// Looks up a field by its `named` identity.
    #[must_use]
    pub fn field(&self, name: &str, descriptor: &str) -> Option<&FieldMapping> {
        self.fields.get(&MemberKey::new(name, descriptor))
    }

    /// Methods in first-seen order.
    pub fn methods(&self) -> impl Iterator<Item = &MethodMapping> {
        self.methods.values()
    }

    /// Mutable access to the methods in first-seen order.
    pub fn methods_mut(&mut self) -> impl Iterator<Item = &mut MethodMapping> {
        self.methods.values_mut()
    }

    /// Fields in first-seen order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldMapping> {
        self.fields.values()
    }

    /// Number of methods.
    #[must_use]
    pub fn method_count(&self) -> usize {
        self.methods.len()
    }

    /// Number of fields.
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Identity of a member for error context, `owner#name descriptor`.
    #[must_use]
    pub fn member_identity(&self, name: &str, descriptor: &str) -> String {
        format!("{}#{}{}", self.named(), name, descriptor)
    }
}

/// A field with its `named` descriptor.
#[derive(Debug, Clone)]
pub struct FieldMapping {
    /// Names of the field
    pub mapping: Mapping,
    descriptor: String,
}

impl FieldMapping {
    fn new(named: &str, descriptor: &str) -> FieldMapping {
        FieldMapping {
            mapping: Mapping::new(named),
            descriptor: descriptor.to_string(),
        }
    }

    /// Field descriptor in the `named` namespace.
    #[must_use]
    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }
}

/// A method with its `named` descriptor and parameter names.
///
/// All three parameter lists are indexed by local variable slot: for an instance method slot 0
/// is the receiver and stays empty, and a `long` or `double` argument leaves the slot after it
/// empty.
#[derive(Debug, Clone)]
pub struct MethodMapping {
    /// Names of the method
    pub mapping: Mapping,
    descriptor: String,
    named_params: Vec<Option<String>>,
    srg_params: Vec<Option<String>>,
    mcp_params: Vec<Option<String>>,
}

impl MethodMapping {
    fn new(named: &str, descriptor: &str) -> MethodMapping {
        MethodMapping {
            mapping: Mapping::new(named),
            descriptor: descriptor.to_string(),
            named_params: Vec::new(),
            srg_params: Vec::new(),
            mcp_params: Vec::new(),
        }
    }

    /// Method descriptor in the `named` namespace.
    #[must_use]
    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }

    /// Returns `true` for `<init>`.
    #[must_use]
    pub fn is_constructor(&self) -> bool {
        self.mapping.named() == CONSTRUCTOR
    }

    /// Returns `true` for compiler generated bridges.
    ///
    /// A bridge shares its `intermediary` name with its `official` name while carrying a
    /// different `named` name; it has no identity of its own and is never written.
    #[must_use]
    pub fn is_bridge(&self) -> bool {
        match (
            self.mapping.get(Namespace::Intermediary),
            self.mapping.get(Namespace::Official),
        ) {
            (Some(intermediary), Some(official)) => {
                intermediary == official && self.mapping.named() != intermediary
            }
            _ => false,
        }
    }

    /// The `named` parameter name at `slot`, if known.
    #[must_use]
    pub fn named_parameter(&self, slot: usize) -> Option<&str> {
        self.named_params.get(slot).and_then(|name| name.as_deref())
    }

    /// All `named` parameter names by slot.
    #[must_use]
    pub fn named_parameters(&self) -> &[Option<String>] {
        &self.named_params
    }

    /// Records the `named` parameter name at `slot`.
    ///
    /// # Errors
    /// Returns [`crate::Error::DuplicateDeclaration`] if the slot already has another name.
    pub fn set_named_parameter(&mut self, slot: usize, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        if self.named_params.len() <= slot {
            self.named_params.resize(slot + 1, None);
        }

        if let Some(existing) = &self.named_params[slot] {
            if *existing != name {
                return Err(DuplicateDeclaration(format!(
                    "parameter {slot} is already \"{existing}\", refusing \"{name}\""
                )));
            }
            return Ok(());
        }

        self.named_params[slot] = Some(name);
        Ok(())
    }

    /// Derived `srg` parameter names by slot, empty before derivation.
    #[must_use]
    pub fn srg_parameters(&self) -> &[Option<String>] {
        &self.srg_params
    }

    /// Derived `mcp` parameter names by slot, empty before derivation.
    #[must_use]
    pub fn mcp_parameters(&self) -> &[Option<String>] {
        &self.mcp_params
    }

    pub(crate) fn set_derived(&mut self, srg: Vec<Option<String>>, mcp: Vec<Option<String>>) {
        self.srg_params = srg;
        self.mcp_params = mcp;
    }
}
