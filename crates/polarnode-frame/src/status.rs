//! Node status codes.
//!
//! The code space is sparse and matched by exact value. Codes outside the
//! table map to [`Status::Unknown`], so interpretation never fails.

/// Everything is within limits.
pub const NOMINAL: u8 = 0;

/// Node is not reporting.
pub const OFFLINE: u8 = 1;

/// Temperature below the lower limit.
pub const TOO_COLD: u8 = 2;

/// Temperature above the upper limit.
pub const TOO_HOT: u8 = 4;

/// Fan or heater control failed.
pub const CONTROL_ERROR: u8 = 8;

/// Interpreted status condition of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Nominal,
    Offline,
    TooCold,
    TooHot,
    ControlError,
    /// Any code without a table entry. Keeps the raw byte.
    Unknown(u8),
}

impl Status {
    /// Raw status byte as carried on the wire.
    pub fn code(self) -> u8 {
        match self {
            Status::Nominal => NOMINAL,
            Status::Offline => OFFLINE,
            Status::TooCold => TOO_COLD,
            Status::TooHot => TOO_HOT,
            Status::ControlError => CONTROL_ERROR,
            Status::Unknown(code) => code,
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Status::Nominal => "OK",
            Status::Offline => "Offline",
            Status::TooCold => "Too cold",
            Status::TooHot => "Too hot",
            Status::ControlError => "Control error",
            Status::Unknown(_) => "Unknown error",
        }
    }

    /// Returns true only for [`Status::Nominal`].
    pub fn is_nominal(self) -> bool {
        self == Status::Nominal
    }
}

impl From<u8> for Status {
    fn from(code: u8) -> Self {
        match code {
            NOMINAL => Status::Nominal,
            OFFLINE => Status::Offline,
            TOO_COLD => Status::TooCold,
            TOO_HOT => Status::TooHot,
            CONTROL_ERROR => Status::ControlError,
            other => Status::Unknown(other),
        }
    }
}

impl From<Status> for u8 {
    fn from(status: Status) -> Self {
        status.code()
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
