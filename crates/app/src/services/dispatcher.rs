//! Command dispatcher — the single entry point for device commands.

use std::sync::Arc;

use homegate_domain::args::ActionArgs;
use homegate_domain::capability::ActionOutcome;
use homegate_domain::error::{ConnectionError, GatewayError, ValidationError};
use homegate_domain::id::DeviceId;
use homegate_domain::model::DeviceState;

use crate::connection::Connection;
use crate::registry::ConnectionRegistry;

/// Routes `(identifier, action, args)` triples to live connections.
#[derive(Debug, Clone)]
pub struct CommandDispatcher {
    registry: Arc<ConnectionRegistry>,
}

impl CommandDispatcher {
    #[must_use]
    pub fn new(registry: Arc<ConnectionRegistry>) -> Self {
        Self { registry }
    }

    #[must_use]
    pub fn registry(&self) -> &Arc<ConnectionRegistry> {
        &self.registry
    }

    /// Perform `action` on the device named by `identifier`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] when the identifier or action is
    /// empty, a [`GatewayError::Connection`] when the device cannot be
    /// resolved, and a [`GatewayError::Action`] when the device rejects the
    /// action.
    #[tracing::instrument(skip(self, args))]
    pub async fn dispatch(
        &self,
        identifier: &str,
        action: &str,
        args: ActionArgs,
    ) -> Result<ActionOutcome, GatewayError> {
        if identifier.trim().is_empty() {
            return Err(ValidationError::MissingIdentifier.into());
        }
        if action.trim().is_empty() {
            return Err(ValidationError::MissingAction.into());
        }
        let connection = self.resolve(identifier)?;
        let outcome = connection.perform_action(action, &args).await?;
        Ok(outcome)
    }

    /// Snapshot of the current state of the device named by `identifier`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] when the identifier is empty, or
    /// a [`GatewayError::Connection`] when the device cannot be resolved.
    #[tracing::instrument(skip(self))]
    pub fn query_state(&self, identifier: &str) -> Result<DeviceState, GatewayError> {
        if identifier.trim().is_empty() {
            return Err(ValidationError::MissingIdentifier.into());
        }
        Ok(self.resolve(identifier)?.state())
    }

    fn resolve(&self, identifier: &str) -> Result<Connection, ConnectionError> {
        // Only UUIDs are ever catalogued.
        let id: DeviceId = identifier
            .trim()
            .parse()
            .map_err(|_| ConnectionError::DeviceNotFound {
                id: identifier.to_string(),
            })?;
        self.registry.resolve(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use homegate_domain::device::{DeviceType, NetworkDeviceDescriptor};
    use homegate_domain::error::ActionError;
    use homegate_domain::model::{AcState, LightState, TvState};

    use crate::latency::SimulatedLatency;
    use crate::registry::CapabilityRegistry;

    struct Fixture {
        dispatcher: CommandDispatcher,
        ac: DeviceId,
        tv: DeviceId,
        light: DeviceId,
    }

    fn fixture() -> Fixture {
        let ac = NetworkDeviceDescriptor::new(DeviceId::new(), DeviceType::Ac, "192.168.1.33", 10203);
        let tv = NetworkDeviceDescriptor::new(DeviceId::new(), DeviceType::Tv, "192.168.1.35", 80);
        let light =
            NetworkDeviceDescriptor::new(DeviceId::new(), DeviceType::Light, "192.168.1.36", 3001);
        let registry = ConnectionRegistry::new(CapabilityRegistry::default(), SimulatedLatency::none());
        registry.update_catalog([ac.clone(), tv.clone(), light.clone()]);
        Fixture {
            dispatcher: CommandDispatcher::new(Arc::new(registry)),
            ac: ac.id,
            tv: tv.id,
            light: light.id,
        }
    }

    fn ac_state(state: DeviceState) -> AcState {
        match state {
            DeviceState::Ac(s) => s,
            other => panic!("expected an AC state, got {other:?}"),
        }
    }

    fn tv_state(state: DeviceState) -> TvState {
        match state {
            DeviceState::Tv(s) => s,
            other => panic!("expected a TV state, got {other:?}"),
        }
    }

    fn light_state(state: DeviceState) -> LightState {
        match state {
            DeviceState::Light(s) => s,
            other => panic!("expected a Light state, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn should_reject_empty_identifier_before_resolution() {
        let f = fixture();
        let result = f.dispatcher.dispatch("  ", "setVolume", ActionArgs::new(1)).await;
        assert!(matches!(
            result,
            Err(GatewayError::Validation(ValidationError::MissingIdentifier))
        ));
        assert_eq!(f.dispatcher.registry().connection_count(), 0);
    }

    #[tokio::test]
    async fn should_reject_empty_action_before_resolution() {
        let f = fixture();
        let result = f
            .dispatcher
            .dispatch(&f.tv.to_string(), "", ActionArgs::none())
            .await;
        assert!(matches!(
            result,
            Err(GatewayError::Validation(ValidationError::MissingAction))
        ));
        assert_eq!(f.dispatcher.registry().connection_count(), 0);
    }

    #[tokio::test]
    async fn should_report_not_found_for_unknown_identifier() {
        let f = fixture();
        let unknown = DeviceId::new().to_string();
        let result = f
            .dispatcher
            .dispatch(&unknown, "setVolume", ActionArgs::new(10))
            .await;
        assert!(matches!(
            result,
            Err(GatewayError::Connection(ConnectionError::DeviceNotFound { id })) if id == unknown
        ));
    }

    #[tokio::test]
    async fn should_report_not_found_for_malformed_identifier() {
        let f = fixture();
        let result = f
            .dispatcher
            .dispatch("not-a-uuid", "setVolume", ActionArgs::new(10))
            .await;
        assert!(matches!(
            result,
            Err(GatewayError::Connection(ConnectionError::DeviceNotFound { .. }))
        ));
    }

    #[tokio::test]
    async fn should_keep_temperature_when_out_of_range() {
        let f = fixture();
        let id = f.ac.to_string();
        let result = f
            .dispatcher
            .dispatch(&id, "setTemperature", ActionArgs::new(40))
            .await;
        assert!(matches!(
            result,
            Err(GatewayError::Action(ActionError::OutOfRange { min: 18, max: 32 }))
        ));
        assert_eq!(ac_state(f.dispatcher.query_state(&id).unwrap()).temperature, 28);

        let outcome = f
            .dispatcher
            .dispatch(&id, "setTemperature", ActionArgs::new(20))
            .await
            .unwrap();
        assert_eq!(outcome, ActionOutcome::Number(20));
        assert_eq!(ac_state(f.dispatcher.query_state(&id).unwrap()).temperature, 20);
    }

    #[tokio::test]
    async fn should_toggle_mute_once_per_key_press() {
        let f = fixture();
        let id = f.tv.to_string();
        for expected in [true, false, true] {
            f.dispatcher
                .dispatch(&id, "keyPress", ActionArgs::new("Mute"))
                .await
                .unwrap();
            assert_eq!(tv_state(f.dispatcher.query_state(&id).unwrap()).muted, expected);
        }
    }

    #[tokio::test]
    async fn should_refuse_volume_up_at_maximum() {
        let f = fixture();
        let id = f.tv.to_string();
        f.dispatcher
            .dispatch(&id, "setVolume", ActionArgs::new(100))
            .await
            .unwrap();
        let result = f
            .dispatcher
            .dispatch(&id, "keyPress", ActionArgs::new("VolumeUp"))
            .await;
        assert!(matches!(
            result,
            Err(GatewayError::Action(ActionError::OutOfRange { min: 0, max: 100 }))
        ));
        assert_eq!(tv_state(f.dispatcher.query_state(&id).unwrap()).volume, 100);
    }

    #[tokio::test]
    async fn should_accept_zero_volume_and_brightness() {
        let f = fixture();
        f.dispatcher
            .dispatch(&f.tv.to_string(), "setVolume", ActionArgs::new(0))
            .await
            .unwrap();
        f.dispatcher
            .dispatch(&f.light.to_string(), "setBrightness", ActionArgs::new(0))
            .await
            .unwrap();
        assert_eq!(
            tv_state(f.dispatcher.query_state(&f.tv.to_string()).unwrap()).volume,
            0
        );
        assert_eq!(
            light_state(f.dispatcher.query_state(&f.light.to_string()).unwrap()).brightness,
            0
        );
    }

    #[tokio::test]
    async fn should_validate_light_color_format() {
        let f = fixture();
        let id = f.light.to_string();
        let result = f
            .dispatcher
            .dispatch(&id, "setColor", ActionArgs::new("#ZZZZZZ"))
            .await;
        assert!(matches!(
            result,
            Err(GatewayError::Action(ActionError::ArgumentFormat { .. }))
        ));
        f.dispatcher
            .dispatch(&id, "setColor", ActionArgs::new("#112233"))
            .await
            .unwrap();
        assert_eq!(
            light_state(f.dispatcher.query_state(&id).unwrap()).color.as_str(),
            "#112233"
        );
    }

    #[tokio::test]
    async fn should_reject_unknown_action_on_every_type() {
        let f = fixture();
        for id in [f.ac, f.tv, f.light] {
            let result = f
                .dispatcher
                .dispatch(&id.to_string(), "nonexistentAction", ActionArgs::none())
                .await;
            assert!(matches!(
                result,
                Err(GatewayError::Action(ActionError::UnknownAction { .. }))
            ));
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn should_settle_on_one_requested_temperature_under_concurrency() {
        let f = fixture();
        let dispatcher = Arc::new(f.dispatcher);
        let id = f.ac.to_string();
        let requested = [18_u8, 21, 24, 27, 30, 32];
        let tasks: Vec<_> = requested
            .iter()
            .map(|&temperature| {
                let dispatcher = Arc::clone(&dispatcher);
                let id = id.clone();
                tokio::spawn(async move {
                    dispatcher
                        .dispatch(&id, "setTemperature", ActionArgs::new(temperature))
                        .await
                        .unwrap();
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap();
        }
        let final_temperature = ac_state(dispatcher.query_state(&id).unwrap()).temperature;
        assert!(requested.contains(&final_temperature));
    }
}
