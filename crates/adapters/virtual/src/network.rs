//! The simulated home network — seven devices at fixed addresses.
//!
//! Identifiers are fixed so that saved devices survive a restart.

use homegate_domain::device::{DeviceType, NetworkDeviceDescriptor};
use homegate_domain::id::DeviceId;
use uuid::Uuid;

const AC_PORT: u16 = 10203;
const TV_PORT: u16 = 80;
const LIGHT_PORT: u16 = 3001;

/// `(identifier, type, address, port)` of every simulated device.
const DEVICES: [(u128, DeviceType, &str, u16); 7] = [
    (0x5e0f_8a2c_41d7_4b0e_9c3a_0000_0001_0033, DeviceType::Ac, "192.168.1.33", AC_PORT),
    (0x5e0f_8a2c_41d7_4b0e_9c3a_0000_0001_0034, DeviceType::Ac, "192.168.1.34", AC_PORT),
    (0x5e0f_8a2c_41d7_4b0e_9c3a_0000_0001_0035, DeviceType::Tv, "192.168.1.35", TV_PORT),
    (0x5e0f_8a2c_41d7_4b0e_9c3a_0000_0001_0036, DeviceType::Light, "192.168.1.36", LIGHT_PORT),
    (0x5e0f_8a2c_41d7_4b0e_9c3a_0000_0001_0037, DeviceType::Light, "192.168.1.37", LIGHT_PORT),
    (0x5e0f_8a2c_41d7_4b0e_9c3a_0000_0001_0038, DeviceType::Light, "192.168.1.38", LIGHT_PORT),
    (0x5e0f_8a2c_41d7_4b0e_9c3a_0000_0001_0039, DeviceType::Light, "192.168.1.39", LIGHT_PORT),
];

/// Descriptors of every device on the simulated network.
pub fn devices() -> Vec<NetworkDeviceDescriptor> {
    DEVICES
        .iter()
        .map(|&(id, device_type, address, port)| {
            NetworkDeviceDescriptor::new(
                DeviceId::from_uuid(Uuid::from_u128(id)),
                device_type,
                address,
                port,
            )
        })
        .collect()
}
