use log::{debug, warn};

use crate::{
    auxiliary::Auxiliary,
    config::{ConstructorPolicy, MergeConfig},
    descriptor::MethodDescriptor,
    error::ResultExt,
    mapping::{ClassMapping, MappingTable, MethodMapping},
    namespace::Namespace,
    params::{qualified_constructor, MemberIndex},
    Error::{ParameterMismatch, UnresolvedMemberIndex},
    Result,
};

/// Counters of one derivation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeriveStats {
    /// Methods which received derived lists
    pub methods: usize,
    /// Parameter slots named
    pub parameters: usize,
    /// Constructors left without parameters for lack of an index
    pub skipped_constructors: usize,
    /// Tolerated mismatching parameter lists
    pub known_mismatches: usize,
}

/// Fills the derived `srg` and `mcp` parameter lists of every method.
pub struct ParameterDeriver<'a> {
    config: &'a MergeConfig,
    auxiliary: &'a Auxiliary,
}

impl<'a> ParameterDeriver<'a> {
    /// Create a new deriver over the side tables of a run
    #[must_use]
    pub fn new(config: &'a MergeConfig, auxiliary: &'a Auxiliary) -> Self {
        ParameterDeriver { config, auxiliary }
    }

    /// Derives the parameter lists of every method in `table`.
    ///
    /// Bridges and methods without an `srg` name are left alone; the writer skips or rejects
    /// them.
    ///
    /// # Errors
    /// - [`crate::Error::UnresolvedMemberIndex`] if a method has no member index
    /// - [`crate::Error::ParameterMismatch`] if curated names do not fit the descriptor
    /// - [`crate::Error::StructuralViolation`] if a `named` parameter sits on a slot without an
    ///   `srg` parameter
    /// - [`crate::Error::InvalidDescriptor`] for a malformed method descriptor
    ///
    /// Errors are wrapped with the method's identity.
    pub fn derive_table(&self, table: &mut MappingTable) -> Result<DeriveStats> {
        let mut stats = DeriveStats::default();

        for class in table.classes_mut() {
            self.derive_class(class, &mut stats)?;
        }

        debug!(
            "Derived parameters of {} methods ({} slots, {} constructors skipped, {} known mismatches)",
            stats.methods, stats.parameters, stats.skipped_constructors, stats.known_mismatches
        );
        Ok(stats)
    }

    fn derive_class(&self, class: &mut ClassMapping, stats: &mut DeriveStats) -> Result<()> {
        let owner = class.named().to_string();
        let owner_srg = class.mapping.get(Namespace::Srg).map(str::to_string);

        for method in class.methods_mut() {
            if method.is_bridge() {
                continue;
            }

            let identity = format!(
                "{}#{}{}",
                owner,
                method.mapping.named(),
                method.descriptor()
            );
            self.derive_method(&owner, owner_srg.as_deref(), method, stats)
                .in_symbol(|| identity)?;
        }

        Ok(())
    }

    /// Resolves the member index of `method`, `None` when it is skipped.
    fn resolve(
        &self,
        owner_srg: Option<&str>,
        method: &MethodMapping,
        stats: &mut DeriveStats,
    ) -> Result<Option<MemberIndex>> {
        if !method.is_constructor() {
            let Some(srg) = method.mapping.get(Namespace::Srg) else {
                return Ok(None);
            };
            return MemberIndex::for_method(srg, self.config, &self.auxiliary.parameters)
                .map(Some);
        }

        let Some(owner_srg) = owner_srg else {
            return Ok(None);
        };

        let identity = qualified_constructor(owner_srg);
        let number = identity
            .strip_prefix(crate::mapping::CONSTRUCTOR)
            .and_then(|owner| self.auxiliary.constructors.get(owner, method.descriptor()));

        match (number, self.config.constructor_policy) {
            (Some(number), _) => Ok(Some(MemberIndex::Indexed(number))),
            (None, ConstructorPolicy::SkipParameters) => {
                debug!("No constructor index for {}{}", identity, method.descriptor());
                stats.skipped_constructors += 1;
                Ok(None)
            }
            (None, ConstructorPolicy::Required) => Err(UnresolvedMemberIndex(format!(
                "no constructor index for {}{}",
                identity,
                method.descriptor()
            ))),
        }
    }

    fn is_static(&self, method: &MethodMapping) -> bool {
        if method.is_constructor() {
            return false;
        }

        // Both lists hold srg names, the curated name may collide with them
        method.mapping.get(Namespace::Srg).is_some_and(|name| {
            self.auxiliary.static_methods.contains(name) || self.config.static_methods.contains(name)
        })
    }

    fn derive_method(
        &self,
        owner: &str,
        owner_srg: Option<&str>,
        method: &mut MethodMapping,
        stats: &mut DeriveStats,
    ) -> Result<()> {
        let descriptor = MethodDescriptor::parse(method.descriptor())?;
        if descriptor.params.is_empty() {
            method.set_derived(Vec::new(), Vec::new());
            return Ok(());
        }

        let Some(index) = self.resolve(owner_srg, method, stats)? else {
            method.set_derived(Vec::new(), Vec::new());
            return Ok(());
        };

        let slots = descriptor.slots(!self.is_static(method));
        let width = slots.last().map_or(0, |slot| slot + 1);

        let mut srg: Vec<Option<String>> = vec![None; width];
        for &slot in &slots {
            srg[slot] = Some(index.synthesize(slot));
        }

        let mut mcp: Vec<Option<String>> = self
            .auxiliary
            .parameters
            .get(&index)
            .map(<[Option<String>]>::to_vec)
            .unwrap_or_default();
        for &slot in &slots {
            if mcp.len() <= slot {
                mcp.resize(slot + 1, None);
            }
            if mcp[slot].is_none() {
                mcp[slot] = Some(index.synthesize(slot));
            }
        }

        if mcp.len() != srg.len() {
            if !self.config.is_known_mismatch(&mcp) {
                return Err(ParameterMismatch(format!(
                    "{} curated slots for {} derived slots: {:?}",
                    mcp.len(),
                    srg.len(),
                    mcp
                )));
            }

            warn!(
                "Ignoring extra curated parameters of {}#{}{}: {:?}",
                owner,
                method.mapping.named(),
                method.descriptor(),
                mcp
            );
            stats.known_mismatches += 1;
        }

        mcp.truncate(srg.len());
        for slot in 0..srg.len() {
            if srg[slot].is_some() {
                continue;
            }

            mcp[slot] = None;
            let Some(named) = method.named_parameter(slot) else {
                continue;
            };

            if slot != 0 || !self.config.is_receiverless(owner) {
                return Err(structural_error!(
                    "named parameter \"{}\" at slot {} has no srg slot",
                    named,
                    slot
                ));
            }

            warn!(
                "{}#{}{} names its receiver slot \"{}\", synthesizing slot 0",
                owner,
                method.mapping.named(),
                method.descriptor(),
                named
            );
            let name = index.synthesize(slot);
            srg[slot] = Some(name.clone());
            mcp[slot] = Some(name);
        }

        stats.methods += 1;
        stats.parameters += srg.iter().filter(|name| name.is_some()).count();
        method.set_derived(srg, mcp);
        Ok(())
    }
}
