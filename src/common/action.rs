// src/common/action.rs

use core::fmt;

/// A logical operation on the device: an optional command write followed by
/// one or more expected reads. See [`crate::common::registry`] for the wire side.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Action {
    /// Send `HELLOSUD`. Required before readings can be taken locally; stops the
    /// device caching readings for the cloud service.
    EnterInteractiveMode,
    /// Send `BYESUD`.
    LeaveInteractiveMode,
    /// Send `READING`, wait for the acknowledgement, then the reading itself.
    SensorReading,
    /// Passive read of the next light meter packet.
    LightReading,
}

impl Action {
    pub const ALL: [Action; 4] = [
        Action::EnterInteractiveMode,
        Action::LeaveInteractiveMode,
        Action::SensorReading,
        Action::LightReading,
    ];

    /// Position of this action in the registry table.
    #[inline]
    pub(crate) const fn index(self) -> usize {
        match self {
            Action::EnterInteractiveMode => 0,
            Action::LeaveInteractiveMode => 1,
            Action::SensorReading => 2,
            Action::LightReading => 3,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::EnterInteractiveMode => "enter interactive mode",
            Action::LeaveInteractiveMode => "leave interactive mode",
            Action::SensorReading => "sensor reading",
            Action::LightReading => "light reading",
        };
        f.write_str(name)
    }
}
