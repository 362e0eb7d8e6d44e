//! Field names, values and value maps of device status reports.

use core::fmt::{Display, Formatter};

/// The closed set of field names a status report can carry.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum FieldName {
    /// Whether the motor reports movement.
    Moving,
    /// Current position in percent (100 = closed).
    Position,
    /// Sun automatic enabled.
    SunAutomatic,
    /// Time automatic enabled.
    TimeAutomatic,
    /// Dawn automatic enabled.
    DawnAutomatic,
    /// Dusk automatic enabled.
    DuskAutomatic,
    /// Manual mode enabled.
    ManualMode,
    /// Wind automatic enabled.
    WindAutomatic,
    /// Rain automatic enabled.
    RainAutomatic,
    /// Sun mode engaged.
    SunMode,
    /// Wind mode engaged.
    WindMode,
    /// Rain mode engaged.
    RainMode,
    /// Ventilating mode enabled.
    VentilatingMode,
    /// Configured running time in seconds.
    RunningTime,
    /// Obstacle detected.
    Obstacle,
    /// Device blocked.
    Block,
    /// Target position of sun mode in percent.
    SunPosition,
    /// Ventilating position in percent.
    VentilatingPosition,
    /// Venetian blind mode enabled.
    BlindsMode,
    /// Slat running time in tenths of a second.
    SlatRunTime,
    /// Tilt slats after reaching the sun position.
    TiltInSunPos,
    /// Tilt slats after reaching the ventilating position.
    TiltInVentPos,
    /// Motor dead time preset.
    MotorDeadTime,
    /// Tilt slats after every movement.
    TiltAfterMoveLevel,
    /// Slat position in percent.
    SlatPosition,
    /// Return jump after reaching the end position.
    BackJump,
    /// Light curtain supervision active.
    LightCurtain,
    /// Reversal on obstacle detection.
    Reversal,
    /// Gate opening speed preset.
    OpenSpeed,
    /// Alarm after ten minutes in open state.
    TenMinuteAlarm,
    /// Service alarm after 2000 movement cycles.
    TwoThousandCycleAlarm,
    /// Automatic closing delay.
    AutomaticClosing,
    /// Rotation direction of the drive.
    RotationDirection,
    /// Relay hold time.
    RelayTime,
    /// Warning light lead time.
    WarningTime,
    /// Deadman control mode.
    DeadmanMode,
    /// Impulse control mode.
    ImpulseMode,
    /// Partial opening position in percent.
    PartialOpening,
}

impl FieldName {
    /// Returns the wire name of the field as published to hosts.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Moving => "moving",
            Self::Position => "position",
            Self::SunAutomatic => "sunAutomatic",
            Self::TimeAutomatic => "timeAutomatic",
            Self::DawnAutomatic => "dawnAutomatic",
            Self::DuskAutomatic => "duskAutomatic",
            Self::ManualMode => "manualMode",
            Self::WindAutomatic => "windAutomatic",
            Self::RainAutomatic => "rainAutomatic",
            Self::SunMode => "sunMode",
            Self::WindMode => "windMode",
            Self::RainMode => "rainMode",
            Self::VentilatingMode => "ventilatingMode",
            Self::RunningTime => "runningTime",
            Self::Obstacle => "obstacle",
            Self::Block => "block",
            Self::SunPosition => "sunPosition",
            Self::VentilatingPosition => "ventilatingPosition",
            Self::BlindsMode => "blindsMode",
            Self::SlatRunTime => "slatRunTime",
            Self::TiltInSunPos => "tiltInSunPos",
            Self::TiltInVentPos => "tiltInVentPos",
            Self::MotorDeadTime => "motorDeadTime",
            Self::TiltAfterMoveLevel => "tiltAfterMoveLevel",
            Self::SlatPosition => "slatPosition",
            Self::BackJump => "backJump",
            Self::LightCurtain => "lightCurtain",
            Self::Reversal => "reversal",
            Self::OpenSpeed => "openSpeed",
            Self::TenMinuteAlarm => "10minuteAlarm",
            Self::TwoThousandCycleAlarm => "2000cycleAlarm",
            Self::AutomaticClosing => "automaticClosing",
            Self::RotationDirection => "rotationDirection",
            Self::RelayTime => "relayTime",
            Self::WarningTime => "warningTime",
            Self::DeadmanMode => "deadmanMode",
            Self::ImpulseMode => "impulseMode",
            Self::PartialOpening => "partialOpening",
        }
    }
}

impl Display for FieldName {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded field value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldValue {
    /// A plain or inverted number.
    Number(i32),
    /// A mapped textual value.
    Text(&'static str),
}

impl Display for FieldValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Number(number) => Display::fmt(number, f),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// Translation applied to a raw field value.
///
/// Indexed maps translate the raw number into a fixed string; raw values
/// beyond the end of a map pass through as numbers. The scale transform is
/// declared for sensor readings only and is not applied to the device
/// classes served here, whose fields are reported as raw numbers.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ValueMap {
    /// `["off", "on"]`
    OnOff,
    /// `["up", "down"]`
    UpDown,
    /// Both bit values map to `"stop"`: motion truth is tracked by the
    /// host from issued commands, not from reported status bits.
    Moving,
    /// Motor dead time presets.
    Motor,
    /// Automatic closing delays in seconds.
    CloseT,
    /// Gate opening speed presets.
    OpenS,
    /// Divide-by-ten scale for sensor readings.
    Scale10,
}

impl ValueMap {
    /// Returns the indexed entries of the map.
    #[must_use]
    pub const fn entries(self) -> &'static [&'static str] {
        match self {
            Self::OnOff => &["off", "on"],
            Self::UpDown => &["up", "down"],
            Self::Moving => &["stop", "stop"],
            Self::Motor => &["off", "short(160ms)", "long(480ms)", "individual"],
            Self::CloseT => &["off", "30", "60", "90", "120", "150", "180", "210", "240"],
            Self::OpenS => &["error", "11", "15", "19"],
            Self::Scale10 => &[],
        }
    }

    /// Translates a raw value through the map.
    #[must_use]
    pub fn apply(self, raw: u16) -> FieldValue {
        self.entries()
            .get(raw as usize)
            .copied()
            .map_or(FieldValue::Number(raw as i32), FieldValue::Text)
    }
}

/// Bit-extraction rule for one field.
#[derive(Clone, Copy, Debug)]
pub struct FieldDef {
    /// Published name of the field.
    pub name: FieldName,
    /// Byte position of the 16-bit extraction window, relative to the format byte.
    pub position: usize,
    /// First bit of the value within the window.
    pub bit_from: u8,
    /// Last bit of the value within the window.
    pub bit_to: u8,
    /// Inversion base: the reported value is `base - raw`.
    pub invert: Option<i32>,
    /// Translation applied to the raw value.
    pub map: Option<ValueMap>,
}
