//! Action registry.
//!
//! Populated once through [`ActionRegistryBuilder`] during startup, then
//! read-only. Excluded names never reach the live table.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use pagepilot_protocols::{ActionDescriptor, RegistryError};

use crate::action::{Action, ActionHandler, TypedHandler};
use crate::schema::ParamSchema;

/// One registered action.
#[derive(Clone)]
pub struct ActionSpec {
    name: String,
    description: String,
    schema: ParamSchema,
    handler: Arc<dyn ActionHandler>,
    excluded: bool,
}

impl ActionSpec {
    /// Spec with a hand-written parameter schema.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        schema: Value,
        handler: Arc<dyn ActionHandler>,
    ) -> Result<Self, RegistryError> {
        let name = name.into();
        let schema = ParamSchema::from_value(&name, schema)?;
        Ok(Self {
            name,
            description: description.into(),
            schema,
            handler,
            excluded: false,
        })
    }

    /// Spec for a typed action, with the schema derived from its parameters.
    pub fn from_action<A: Action>(action: A) -> Result<Self, RegistryError> {
        let name = action.name().to_string();
        let description = action.description().to_string();
        let schema = ParamSchema::from_value(&name, ParamSchema::for_type::<A::Params>().into_value())?;
        Ok(Self {
            name,
            description,
            schema,
            handler: Arc::new(TypedHandler::new(action)),
            excluded: false,
        })
    }

    /// Mark the spec as excluded from the live registry.
    pub fn excluded(mut self, excluded: bool) -> Self {
        self.excluded = excluded;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn schema(&self) -> &ParamSchema {
        &self.schema
    }

    pub fn handler(&self) -> &Arc<dyn ActionHandler> {
        &self.handler
    }

    pub fn is_excluded(&self) -> bool {
        self.excluded
    }

    /// Description handed to the decision-maker.
    pub fn descriptor(&self) -> ActionDescriptor {
        ActionDescriptor {
            name: self.name.clone(),
            description: self.description.clone(),
            parameters_schema: self.schema.as_value().clone(),
        }
    }
}

impl std::fmt::Debug for ActionSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionSpec")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("excluded", &self.excluded)
            .finish_non_exhaustive()
    }
}

/// Collects registrations, then freezes into an [`ActionRegistry`].
#[derive(Debug, Default)]
pub struct ActionRegistryBuilder {
    excluded: HashSet<String>,
    specs: Vec<ActionSpec>,
    positions: HashMap<String, usize>,
}

impl ActionRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder with a configured exclusion list.
    pub fn with_excluded<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            excluded: names.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Exclude a name. Has no effect on an action already registered.
    pub fn exclude(&mut self, name: impl Into<String>) -> &mut Self {
        self.excluded.insert(name.into());
        self
    }

    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded.contains(name)
    }

    /// Register an action.
    ///
    /// Excluded specs and specs whose name is on the exclusion list are
    /// dropped, and the name stays excluded for later registrations. A name
    /// that is already live fails with [`RegistryError::AlreadyRegistered`].
    pub fn register(&mut self, spec: ActionSpec) -> Result<&mut Self, RegistryError> {
        if self.positions.contains_key(&spec.name) {
            return Err(RegistryError::AlreadyRegistered(spec.name));
        }

        if spec.excluded || self.excluded.contains(&spec.name) {
            debug!("Excluding action: {}", spec.name);
            self.excluded.insert(spec.name);
            return Ok(self);
        }

        debug!("Registered action: {}", spec.name);
        self.positions.insert(spec.name.clone(), self.specs.len());
        self.specs.push(spec);
        Ok(self)
    }

    /// Register a typed action.
    pub fn register_action<A: Action>(&mut self, action: A) -> Result<&mut Self, RegistryError> {
        self.register(ActionSpec::from_action(action)?)
    }

    pub fn build(self) -> ActionRegistry {
        ActionRegistry {
            specs: self.specs,
            positions: self.positions,
        }
    }
}

/// Immutable table of live actions, in registration order.
#[derive(Debug, Default)]
pub struct ActionRegistry {
    specs: Vec<ActionSpec>,
    positions: HashMap<String, usize>,
}

impl ActionRegistry {
    pub fn builder() -> ActionRegistryBuilder {
        ActionRegistryBuilder::new()
    }

    pub fn get(&self, name: &str) -> Option<&ActionSpec> {
        self.positions.get(name).map(|&i| &self.specs[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    /// Live actions in registration order.
    pub fn all(&self) -> &[ActionSpec] {
        &self.specs
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.specs.iter().map(ActionSpec::name)
    }

    /// Descriptors of all live actions.
    pub fn descriptors(&self) -> Vec<ActionDescriptor> {
        self.specs.iter().map(ActionSpec::descriptor).collect()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
