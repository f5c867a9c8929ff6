//! Capability tables — the immutable action-name → handler mapping of a
//! device type.
//!
//! A handler is a pure function from the current state and the call
//! arguments to either a [`Transition`] (the complete next state plus the
//! value reported to the caller) or an [`ActionError`]. Handlers never
//! mutate anything: committing the transition is the owner's job, which is
//! what makes validate-then-commit atomic.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::args::ActionArgs;
use crate::device::DeviceType;
use crate::error::ActionError;

/// Value reported back to the caller of a successful action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActionOutcome {
    /// Success indicator, or the new value of a toggled flag.
    Flag(bool),
    /// Echo of a committed numeric value.
    Number(i64),
    /// Echo of a committed enumerated or textual value.
    Text(String),
}

/// The result of a successful handler: the full next state and the outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition<S> {
    pub state: S,
    pub outcome: ActionOutcome,
}

impl<S> Transition<S> {
    #[must_use]
    pub fn new(state: S, outcome: ActionOutcome) -> Self {
        Self { state, outcome }
    }
}

/// Validator/mutator for one named action.
pub type Handler<S> = fn(&S, &ActionArgs) -> Result<Transition<S>, ActionError>;

/// Immutable action table for devices whose state is `S`.
pub struct CapabilityTable<S> {
    device_type: DeviceType,
    handlers: BTreeMap<&'static str, Handler<S>>,
}

impl<S> CapabilityTable<S> {
    /// Start building the table for `device_type`.
    #[must_use]
    pub fn builder(device_type: DeviceType) -> CapabilityTableBuilder<S> {
        CapabilityTableBuilder {
            device_type,
            handlers: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn device_type(&self) -> DeviceType {
        self.device_type
    }

    /// Supported action names, sorted.
    pub fn actions(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.handlers.keys().copied()
    }

    #[must_use]
    pub fn supports(&self, action: &str) -> bool {
        self.handlers.contains_key(action)
    }

    /// Look up `action` and run its handler against `state`.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::UnknownAction`] when the table has no such
    /// action, or whatever validation error the handler produces.
    pub fn apply(
        &self,
        state: &S,
        action: &str,
        args: &ActionArgs,
    ) -> Result<Transition<S>, ActionError> {
        let handler = self
            .handlers
            .get(action)
            .ok_or_else(|| ActionError::UnknownAction {
                action: action.to_string(),
            })?;
        handler(state, args)
    }
}

impl<S> fmt::Debug for CapabilityTable<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapabilityTable")
            .field("device_type", &self.device_type)
            .field("actions", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Step-by-step builder for [`CapabilityTable`].
pub struct CapabilityTableBuilder<S> {
    device_type: DeviceType,
    handlers: BTreeMap<&'static str, Handler<S>>,
}

impl<S> CapabilityTableBuilder<S> {
    #[must_use]
    pub fn action(mut self, name: &'static str, handler: Handler<S>) -> Self {
        self.handlers.insert(name, handler);
        self
    }

    #[must_use]
    pub fn build(self) -> CapabilityTable<S> {
        CapabilityTable {
            device_type: self.device_type,
            handlers: self.handlers,
        }
    }
}
