//! Dimmable colour light.

use std::fmt;
use std::sync::LazyLock;

use serde::Serialize;

use super::{DeviceModel, DeviceState, PowerState, Powered, set_power};
use crate::args::{ActionArgs, Bounds};
use crate::capability::{ActionOutcome, CapabilityTable, Transition};
use crate::device::DeviceType;
use crate::error::ActionError;

pub const BRIGHTNESS: Bounds = Bounds::new(0, 100);

/// Name of the only colour format lights accept.
pub const HEX_COLOR_FORMAT: &str = "Hex Color String";

/// A `#RRGGBB` colour string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HexColor(String);

impl HexColor {
    /// Parse a strict `#RRGGBB` string (hex digits in either case).
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::ArgumentFormat`] for anything else.
    pub fn parse(raw: &str) -> Result<Self, ActionError> {
        match raw.strip_prefix('#') {
            Some(digits) if digits.len() == 6 && digits.bytes().all(|b| b.is_ascii_hexdigit()) => {
                Ok(Self(raw.to_string()))
            }
            _ => Err(ActionError::ArgumentFormat {
                formats: vec![HEX_COLOR_FORMAT.to_string()],
            }),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LightState {
    #[serde(rename = "powerState")]
    pub power: PowerState,
    pub color: HexColor,
    pub brightness: u8,
}

impl Default for LightState {
    fn default() -> Self {
        Self {
            power: PowerState::Off,
            color: HexColor("#FFFFFF".to_string()),
            brightness: 75,
        }
    }
}

impl Powered for LightState {
    fn power_mut(&mut self) -> &mut PowerState {
        &mut self.power
    }
}

static CAPABILITIES: LazyLock<CapabilityTable<LightState>> = LazyLock::new(|| {
    CapabilityTable::builder(DeviceType::Light)
        .action("setBrightness", set_brightness)
        .action("setColor", set_color)
        .action("setPowerState", set_power)
        .build()
});

impl DeviceModel for LightState {
    const DEVICE_TYPE: DeviceType = DeviceType::Light;

    fn capabilities() -> &'static CapabilityTable<Self> {
        &CAPABILITIES
    }

    fn snapshot(&self) -> DeviceState {
        DeviceState::Light(self.clone())
    }
}

fn set_brightness(state: &LightState, args: &ActionArgs) -> Result<Transition<LightState>, ActionError> {
    let brightness = args.integer(BRIGHTNESS)?;
    Ok(Transition::new(
        LightState {
            brightness,
            ..state.clone()
        },
        ActionOutcome::Flag(true),
    ))
}

fn set_color(state: &LightState, args: &ActionArgs) -> Result<Transition<LightState>, ActionError> {
    let color = HexColor::parse(args.text().unwrap_or_default())?;
    Ok(Transition::new(
        LightState {
            color,
            ..state.clone()
        },
        ActionOutcome::Flag(true),
    ))
}
