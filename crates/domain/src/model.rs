//! Device models — the typed state of each controllable device kind and its
//! capability table.
//!
//! | Kind | State | Actions |
//! |------|-------|---------|
//! | AC | [`AcState`] | `setTemperature`, `setMode`, `setFanSpeed`, `setSwing`, `setPowerState` |
//! | TV | [`TvState`] | `setVolume`, `toggleMute`, `setPowerState`, `keyPress` |
//! | Light | [`LightState`] | `setBrightness`, `setColor`, `setPowerState` |

use serde::Serialize;

use crate::args::{ActionArgs, Enumerated};
use crate::capability::{ActionOutcome, CapabilityTable, Transition};
use crate::device::DeviceType;
use crate::error::ActionError;

macro_rules! enumerated {
    ($(#[doc = $doc:expr])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $crate::args::Enumerated for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::args::Enumerated::as_str(*self))
            }
        }
    };
}

mod ac;
mod light;
mod tv;

pub use ac::{AcFanSpeed, AcMode, AcState, AcSwing, TEMPERATURE};
pub use light::{BRIGHTNESS, HEX_COLOR_FORMAT, HexColor, LightState};
pub use tv::{TvKey, TvState, VOLUME};

enumerated!(
    /// Power switch shared by every device kind.
    PowerState {
        On => "ON",
        Off => "OFF",
    }
);

impl PowerState {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::On => Self::Off,
            Self::Off => Self::On,
        }
    }
}

/// A device kind the gateway can drive: its state type plus the static
/// capability table built once for every instance of that kind.
pub trait DeviceModel: Clone + Default + Send + Sync + 'static {
    const DEVICE_TYPE: DeviceType;

    fn capabilities() -> &'static CapabilityTable<Self>;

    /// Wrap the state into the type-erased snapshot handed to callers.
    fn snapshot(&self) -> DeviceState;
}

/// Snapshot of a device's state, whatever its kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DeviceState {
    Ac(AcState),
    Tv(TvState),
    Light(LightState),
}

impl DeviceState {
    #[must_use]
    pub fn device_type(&self) -> DeviceType {
        match self {
            Self::Ac(_) => DeviceType::Ac,
            Self::Tv(_) => DeviceType::Tv,
            Self::Light(_) => DeviceType::Light,
        }
    }
}

/// Sorted action names supported by `device_type`.
#[must_use]
pub fn actions_for(device_type: DeviceType) -> Vec<&'static str> {
    match device_type {
        DeviceType::Ac => AcState::capabilities().actions().collect(),
        DeviceType::Tv => TvState::capabilities().actions().collect(),
        DeviceType::Light => LightState::capabilities().actions().collect(),
    }
}

/// State with a power switch.
trait Powered: Clone {
    fn power_mut(&mut self) -> &mut PowerState;
}

/// `setPowerState` handler shared by every kind.
fn set_power<S: Powered>(state: &S, args: &ActionArgs) -> Result<Transition<S>, ActionError> {
    let power = args.member::<PowerState>()?;
    let mut next = state.clone();
    *next.power_mut() = power;
    Ok(Transition::new(next, ActionOutcome::Text(power.as_str().to_string())))
}
