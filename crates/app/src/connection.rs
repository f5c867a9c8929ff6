//! Device connections — the live state machine of one device.
//!
//! A [`DeviceConnection`] owns the typed state of a single device and runs
//! actions against it through the device kind's capability table. Actions
//! are serialized per connection: validation, the simulated round trip and
//! the commit happen under one async lock, so two actions on the same device
//! never interleave. Once validated, the round trip and commit run in their
//! own task holding that lock, so an action that passed validation is
//! committed even when the caller stops waiting for it. Snapshots are read
//! under a separate lock that is only held for the instant of the commit, so
//! readers never wait on the round trip and never see a half-applied action.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use homegate_domain::args::ActionArgs;
use homegate_domain::capability::ActionOutcome;
use homegate_domain::device::{DeviceType, NetworkDeviceDescriptor};
use homegate_domain::error::ActionError;
use homegate_domain::model::{AcState, DeviceModel, DeviceState, LightState, TvState};
use tokio::sync::Mutex;
use tracing::Instrument;

use crate::latency::SimulatedLatency;

/// State machine of one connected device whose state is `S`.
#[derive(Debug)]
pub struct DeviceConnection<S> {
    descriptor: NetworkDeviceDescriptor,
    state: Arc<RwLock<S>>,
    in_flight: Arc<Mutex<()>>,
    latency: SimulatedLatency,
}

impl<S: DeviceModel> DeviceConnection<S> {
    /// Connect to `descriptor`, starting from the kind's default state.
    #[must_use]
    pub fn new(descriptor: NetworkDeviceDescriptor, latency: SimulatedLatency) -> Self {
        Self {
            descriptor,
            state: Arc::new(RwLock::new(S::default())),
            in_flight: Arc::new(Mutex::new(())),
            latency,
        }
    }

    #[must_use]
    pub fn descriptor(&self) -> &NetworkDeviceDescriptor {
        &self.descriptor
    }

    /// Copy of the last committed state.
    #[must_use]
    pub fn state(&self) -> S {
        self.read_state().clone()
    }

    /// Validate and apply `action`, then report its outcome.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::UnknownAction`] when the device kind has no
    /// such action, or the validation error of the handler. In both cases
    /// the state is left untouched.
    ///
    /// Dropping the returned future after validation does not cancel the
    /// action: the round trip still completes and the new state is committed.
    #[tracing::instrument(skip(self, args), fields(device = %self.descriptor.id))]
    pub async fn perform_action(
        &self,
        action: &str,
        args: &ActionArgs,
    ) -> Result<ActionOutcome, ActionError> {
        let turn = Arc::clone(&self.in_flight).lock_owned().await;
        let transition = S::capabilities().apply(&self.state(), action, args)?;
        let state = Arc::clone(&self.state);
        let latency = self.latency;
        let commit = tokio::spawn(
            async move {
                let _turn = turn;
                latency.round_trip().await;
                *write_state(&state) = transition.state;
                tracing::debug!(outcome = ?transition.outcome, "action committed");
                transition.outcome
            }
            .in_current_span(),
        );
        match commit.await {
            Ok(outcome) => Ok(outcome),
            Err(err) => match err.try_into_panic() {
                Ok(payload) => std::panic::resume_unwind(payload),
                // Only a runtime shutdown cancels the commit, and it takes
                // this caller down with it.
                Err(_) => std::future::pending().await,
            },
        }
    }

    fn read_state(&self) -> RwLockReadGuard<'_, S> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }
}

fn write_state<S>(state: &RwLock<S>) -> RwLockWriteGuard<'_, S> {
    state.write().unwrap_or_else(PoisonError::into_inner)
}

/// Handle on a live connection, whatever the device kind.
///
/// Cloning the handle shares the underlying connection.
#[derive(Debug, Clone)]
pub enum Connection {
    Ac(Arc<DeviceConnection<AcState>>),
    Tv(Arc<DeviceConnection<TvState>>),
    Light(Arc<DeviceConnection<LightState>>),
}

impl Connection {
    /// Open the state machine matching the descriptor's device type.
    #[must_use]
    pub fn open(descriptor: NetworkDeviceDescriptor, latency: SimulatedLatency) -> Self {
        match descriptor.device_type {
            DeviceType::Ac => Self::Ac(Arc::new(DeviceConnection::new(descriptor, latency))),
            DeviceType::Tv => Self::Tv(Arc::new(DeviceConnection::new(descriptor, latency))),
            DeviceType::Light => Self::Light(Arc::new(DeviceConnection::new(descriptor, latency))),
        }
    }

    #[must_use]
    pub fn descriptor(&self) -> &NetworkDeviceDescriptor {
        match self {
            Self::Ac(c) => c.descriptor(),
            Self::Tv(c) => c.descriptor(),
            Self::Light(c) => c.descriptor(),
        }
    }

    #[must_use]
    pub fn device_type(&self) -> DeviceType {
        self.descriptor().device_type
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> DeviceState {
        match self {
            Self::Ac(c) => c.state().snapshot(),
            Self::Tv(c) => c.state().snapshot(),
            Self::Light(c) => c.state().snapshot(),
        }
    }

    /// Sorted names of the actions this device accepts.
    #[must_use]
    pub fn actions(&self) -> Vec<&'static str> {
        homegate_domain::model::actions_for(self.device_type())
    }

    /// See [`DeviceConnection::perform_action`].
    ///
    /// # Errors
    ///
    /// Propagates the [`ActionError`] of the underlying connection.
    pub async fn perform_action(
        &self,
        action: &str,
        args: &ActionArgs,
    ) -> Result<ActionOutcome, ActionError> {
        match self {
            Self::Ac(c) => c.perform_action(action, args).await,
            Self::Tv(c) => c.perform_action(action, args).await,
            Self::Light(c) => c.perform_action(action, args).await,
        }
    }

    /// Whether both handles refer to the same live connection.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Ac(a), Self::Ac(b)) => Arc::ptr_eq(a, b),
            (Self::Tv(a), Self::Tv(b)) => Arc::ptr_eq(a, b),
            (Self::Light(a), Self::Light(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}
