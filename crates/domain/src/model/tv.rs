//! Television.

use std::sync::LazyLock;

use serde::Serialize;

use super::{DeviceModel, DeviceState, PowerState, Powered, set_power};
use crate::args::{ActionArgs, Bounds};
use crate::capability::{ActionOutcome, CapabilityTable, Transition};
use crate::device::DeviceType;
use crate::error::ActionError;

pub const VOLUME: Bounds = Bounds::new(0, 100);

enumerated!(
    /// Remote-control keys.
    TvKey {
        Num1 => "Num1",
        Num2 => "Num2",
        Num3 => "Num3",
        Num4 => "Num4",
        Num5 => "Num5",
        Num6 => "Num6",
        Num7 => "Num7",
        Num8 => "Num8",
        Num9 => "Num9",
        Num0 => "Num0",
        VolumeUp => "VolumeUp",
        VolumeDown => "VolumeDown",
        Mute => "Mute",
        Right => "Right",
        Left => "Left",
        Up => "Up",
        Down => "Down",
        ChannelUp => "ChannelUp",
        ChannelDown => "ChannelDown",
        Confirm => "Confirm",
        Return => "Return",
        Red => "Red",
        Green => "Green",
        Yellow => "Yellow",
        Blue => "Blue",
        GGuide => "GGuide",
        Home => "Home",
        Rec => "Rec",
        Tv => "Tv",
        Rewind => "Rewind",
        Pause => "Pause",
        Forward => "Forward",
        TvPower => "TvPower",
    }
);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TvState {
    #[serde(rename = "powerState")]
    pub power: PowerState,
    pub volume: u8,
    #[serde(rename = "isMuted")]
    pub muted: bool,
}

impl Default for TvState {
    fn default() -> Self {
        Self {
            power: PowerState::Off,
            volume: 35,
            muted: false,
        }
    }
}

impl Powered for TvState {
    fn power_mut(&mut self) -> &mut PowerState {
        &mut self.power
    }
}

static CAPABILITIES: LazyLock<CapabilityTable<TvState>> = LazyLock::new(|| {
    CapabilityTable::builder(DeviceType::Tv)
        .action("setVolume", set_volume)
        .action("toggleMute", |state, _| Ok(toggle_mute(state)))
        .action("setPowerState", set_power)
        .action("keyPress", key_press)
        .build()
});

impl DeviceModel for TvState {
    const DEVICE_TYPE: DeviceType = DeviceType::Tv;

    fn capabilities() -> &'static CapabilityTable<Self> {
        &CAPABILITIES
    }

    fn snapshot(&self) -> DeviceState {
        DeviceState::Tv(self.clone())
    }
}

fn set_volume(state: &TvState, args: &ActionArgs) -> Result<Transition<TvState>, ActionError> {
    let volume = args.integer(VOLUME)?;
    Ok(with_volume(state, volume))
}

fn toggle_mute(state: &TvState) -> Transition<TvState> {
    let muted = !state.muted;
    Transition::new(
        TvState {
            muted,
            ..state.clone()
        },
        ActionOutcome::Flag(muted),
    )
}

fn key_press(state: &TvState, args: &ActionArgs) -> Result<Transition<TvState>, ActionError> {
    match args.member::<TvKey>()? {
        TvKey::Mute => Ok(toggle_mute(state)),
        TvKey::VolumeUp => step_volume(state, 1),
        TvKey::VolumeDown => step_volume(state, -1),
        TvKey::TvPower => Ok(Transition::new(
            TvState {
                power: state.power.toggled(),
                ..state.clone()
            },
            ActionOutcome::Flag(true),
        )),
        // No modelled effect; the device still acknowledges the key.
        _ => Ok(Transition::new(state.clone(), ActionOutcome::Flag(true))),
    }
}

fn step_volume(state: &TvState, delta: i64) -> Result<Transition<TvState>, ActionError> {
    let volume = VOLUME.check(i64::from(state.volume) + delta)?;
    Ok(with_volume(state, volume))
}

fn with_volume(state: &TvState, volume: u8) -> Transition<TvState> {
    Transition::new(
        TvState {
            volume,
            ..state.clone()
        },
        ActionOutcome::Flag(true),
    )
}
