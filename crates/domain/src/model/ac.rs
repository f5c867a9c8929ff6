//! Air conditioner.

use std::sync::LazyLock;

use serde::Serialize;

use super::{DeviceModel, DeviceState, PowerState, Powered, set_power};
use crate::args::{ActionArgs, Bounds, Enumerated};
use crate::capability::{ActionOutcome, CapabilityTable, Transition};
use crate::device::DeviceType;
use crate::error::ActionError;

/// Accepted target temperatures, in °C.
pub const TEMPERATURE: Bounds = Bounds::new(18, 32);

enumerated!(
    /// Operating mode.
    AcMode {
        Cool => "COOL",
        Fan => "FAN",
        Heat => "HEAT",
        Dry => "DRY",
        Auto => "AUTO",
    }
);

enumerated!(
    /// Fan speed.
    AcFanSpeed {
        High => "HIGH",
        Medium => "MEDIUM",
        Low => "LOW",
        Auto => "AUTO",
    }
);

enumerated!(
    /// Louvre swing angle.
    AcSwing {
        S30 => "S30",
        S45 => "S45",
        S60 => "S60",
        Auto => "AUTO",
        Off => "OFF",
    }
);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AcState {
    #[serde(rename = "temp")]
    pub temperature: u8,
    pub mode: AcMode,
    #[serde(rename = "fanSpeed")]
    pub fan_speed: AcFanSpeed,
    pub swing: AcSwing,
    #[serde(rename = "powerState")]
    pub power: PowerState,
}

impl Default for AcState {
    fn default() -> Self {
        Self {
            temperature: 28,
            mode: AcMode::Auto,
            fan_speed: AcFanSpeed::Auto,
            swing: AcSwing::Auto,
            power: PowerState::Off,
        }
    }
}

impl Powered for AcState {
    fn power_mut(&mut self) -> &mut PowerState {
        &mut self.power
    }
}

static CAPABILITIES: LazyLock<CapabilityTable<AcState>> = LazyLock::new(|| {
    CapabilityTable::builder(DeviceType::Ac)
        .action("setTemperature", set_temperature)
        .action("setMode", set_mode)
        .action("setFanSpeed", set_fan_speed)
        .action("setSwing", set_swing)
        .action("setPowerState", set_power)
        .build()
});

impl DeviceModel for AcState {
    const DEVICE_TYPE: DeviceType = DeviceType::Ac;

    fn capabilities() -> &'static CapabilityTable<Self> {
        &CAPABILITIES
    }

    fn snapshot(&self) -> DeviceState {
        DeviceState::Ac(self.clone())
    }
}

fn set_temperature(state: &AcState, args: &ActionArgs) -> Result<Transition<AcState>, ActionError> {
    let temperature = args.integer(TEMPERATURE)?;
    Ok(Transition::new(
        AcState {
            temperature,
            ..state.clone()
        },
        ActionOutcome::Number(i64::from(temperature)),
    ))
}

fn set_mode(state: &AcState, args: &ActionArgs) -> Result<Transition<AcState>, ActionError> {
    let mode = args.member::<AcMode>()?;
    Ok(Transition::new(
        AcState {
            mode,
            ..state.clone()
        },
        echo(mode),
    ))
}

fn set_fan_speed(state: &AcState, args: &ActionArgs) -> Result<Transition<AcState>, ActionError> {
    let fan_speed = args.member::<AcFanSpeed>()?;
    Ok(Transition::new(
        AcState {
            fan_speed,
            ..state.clone()
        },
        echo(fan_speed),
    ))
}

fn set_swing(state: &AcState, args: &ActionArgs) -> Result<Transition<AcState>, ActionError> {
    let swing = args.member::<AcSwing>()?;
    Ok(Transition::new(
        AcState {
            swing,
            ..state.clone()
        },
        echo(swing),
    ))
}

fn echo<T: Enumerated>(value: T) -> ActionOutcome {
    ActionOutcome::Text(value.as_str().to_string())
}
