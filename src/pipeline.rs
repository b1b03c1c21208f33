//! The translation pipeline: an ordered list of passes folded over the schema.

use std::fmt;

use serde_json::Value;

use crate::cleanup::{filter_field_keys, remove_outer_key, remove_outer_non_objects};
use crate::discriminator::resolve_one_of;
use crate::enums::convert_enums_to_options;
use crate::error::TranslateError;
use crate::flatten::{flatten_properties, promote_key, Precedence};
use crate::keywords::{move_to_parameters, rename_keys};
use crate::resolver::resolve_refs;
use crate::types::TranslateOptions;

/// A single tree-to-tree rewrite.
///
/// Passes hold no state; the tables they need come from [`TranslateOptions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pass {
    ConvertEnums,
    ResolveOneOf,
    ResolveRefs,
    RenameKeys,
    MoveToParameters,
    FlattenProperties,
    FlattenItems,
    PromoteParams,
    RemoveOuterKey,
    RemoveOuterNonObjects,
    FilterFieldKeys,
}

impl Pass {
    /// Every pass, in execution order.
    ///
    /// `ResolveOneOf` injects `$ref`s and must precede `ResolveRefs`; the
    /// flatteners need refs gone; `FilterFieldKeys` needs final key names.
    pub const ALL: [Pass; 11] = [
        Pass::ConvertEnums,
        Pass::ResolveOneOf,
        Pass::ResolveRefs,
        Pass::RenameKeys,
        Pass::MoveToParameters,
        Pass::FlattenProperties,
        Pass::FlattenItems,
        Pass::PromoteParams,
        Pass::RemoveOuterKey,
        Pass::RemoveOuterNonObjects,
        Pass::FilterFieldKeys,
    ];

    /// Stable kebab-case name, as accepted by [`Pass::parse`].
    pub fn name(&self) -> &'static str {
        match self {
            Pass::ConvertEnums => "convert-enums",
            Pass::ResolveOneOf => "resolve-one-of",
            Pass::ResolveRefs => "resolve-refs",
            Pass::RenameKeys => "rename-keys",
            Pass::MoveToParameters => "move-to-parameters",
            Pass::FlattenProperties => "flatten-properties",
            Pass::FlattenItems => "flatten-items",
            Pass::PromoteParams => "promote-params",
            Pass::RemoveOuterKey => "remove-outer-key",
            Pass::RemoveOuterNonObjects => "remove-outer-non-objects",
            Pass::FilterFieldKeys => "filter-field-keys",
        }
    }

    /// Parse a pass from its name.
    ///
    /// Returns `None` for unknown names.
    pub fn parse(s: &str) -> Option<Self> {
        Pass::ALL.into_iter().find(|pass| pass.name() == s)
    }

    /// Apply this pass to `schema`, returning a new tree.
    ///
    /// # Errors
    ///
    /// Only `Pass::ResolveRefs` can fail; see [`resolve_refs`].
    pub fn apply(
        &self,
        schema: &Value,
        options: &TranslateOptions,
    ) -> Result<Value, TranslateError> {
        let result = match self {
            Pass::ConvertEnums => convert_enums_to_options(schema),
            Pass::ResolveOneOf => resolve_one_of(schema, &options.discriminator_field),
            Pass::ResolveRefs => resolve_refs(schema)?,
            Pass::RenameKeys => rename_keys(schema, &options.key_mapping),
            Pass::MoveToParameters => {
                move_to_parameters(schema, &options.relocated_keys, &options.parameters_key)
            }
            Pass::FlattenProperties => flatten_properties(schema, "properties", Precedence::Parent),
            Pass::FlattenItems => flatten_properties(schema, "items", Precedence::Child),
            Pass::PromoteParams => promote_key(schema, &options.promoted_key),
            Pass::RemoveOuterKey => remove_outer_key(schema, &options.removed_outer_key),
            Pass::RemoveOuterNonObjects => remove_outer_non_objects(schema),
            Pass::FilterFieldKeys => filter_field_keys(schema, &options.allowed_keys),
        };
        Ok(result)
    }
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An ordered list of passes sharing one set of options.
#[derive(Debug, Clone)]
pub struct Pipeline {
    passes: Vec<Pass>,
    options: TranslateOptions,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(TranslateOptions::default())
    }
}

impl Pipeline {
    /// The standard pipeline: every pass in [`Pass::ALL`] order.
    pub fn new(options: TranslateOptions) -> Self {
        Self::with_passes(options, Pass::ALL.to_vec())
    }

    /// A pipeline running `passes` in the given order.
    ///
    /// Callers reordering passes are responsible for the dependencies
    /// documented on [`Pass::ALL`].
    pub fn with_passes(options: TranslateOptions, passes: Vec<Pass>) -> Self {
        Self { passes, options }
    }

    /// Passes in execution order.
    pub fn passes(&self) -> &[Pass] {
        &self.passes
    }

    /// Run every pass, feeding each one the previous pass's output.
    ///
    /// # Errors
    ///
    /// Fails fast with the first pass error; no partial output is returned.
    pub fn run(&self, schema: &Value) -> Result<Value, TranslateError> {
        self.run_passes(schema, &self.passes)
    }

    /// Run passes up to and including `last`.
    ///
    /// Runs the whole pipeline if `last` is not part of it.
    ///
    /// # Errors
    ///
    /// Same as [`Pipeline::run`].
    pub fn run_until(&self, schema: &Value, last: Pass) -> Result<Value, TranslateError> {
        let end = self
            .passes
            .iter()
            .position(|pass| *pass == last)
            .map_or(self.passes.len(), |i| i + 1);
        self.run_passes(schema, &self.passes[..end])
    }

    fn run_passes(&self, schema: &Value, passes: &[Pass]) -> Result<Value, TranslateError> {
        let result = passes.iter().try_fold(schema.clone(), |tree, pass| {
            tracing::debug!(pass = pass.name(), "running pass");
            pass.apply(&tree, &self.options)
        })?;
        tracing::debug!(passes = passes.len(), "pipeline complete");
        Ok(result)
    }
}

/// Translate a model schema into a form schema with the standard pipeline.
///
/// # Errors
///
/// Returns `TranslateError` if a `$ref` cannot be resolved.
pub fn translate(schema: &Value, options: &TranslateOptions) -> Result<Value, TranslateError> {
    Pipeline::new(options.clone()).run(schema)
}
