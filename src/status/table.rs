//! The declarative field table keyed by status format.

use super::field::{FieldDef, FieldName, ValueMap};

/// Numeric key of a field definition.
pub type FieldId = u16;

/// A status report format.
///
/// Inbound frames are keyed by their raw format byte, which resolves to
/// `21`, `22`, `23` or `24`. The `23a` and `24a` layouts share the format
/// bytes `0x23` and `0x24` on the wire and are therefore only selectable
/// through an explicit [`super::parse_with_format`] call.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Format {
    /// Plain roller shutter status.
    F21,
    /// Roller shutter status with running time.
    F22,
    /// Venetian blind status.
    F23,
    /// Venetian blind status, reduced layout.
    F23a,
    /// Gate actuator status.
    F24,
    /// Gate actuator configuration report.
    F24a,
}

impl Format {
    /// Resolves the format of an inbound status frame.
    #[must_use]
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x21 => Some(Self::F21),
            0x22 => Some(Self::F22),
            0x23 => Some(Self::F23),
            0x24 => Some(Self::F24),
            _ => None,
        }
    }

    /// Returns the ordered field ids of this format.
    #[must_use]
    pub const fn field_ids(self) -> &'static [FieldId] {
        match self {
            Self::F21 => &[100, 101, 102, 104, 105, 106, 111, 112, 113, 114, 50],
            Self::F22 => &[100, 101, 102, 104, 105, 106, 109, 111, 112, 113, 114, 50],
            Self::F23 => &[
                102, 107, 109, 115, 116, 117, 118, 119, 120, 121, 122, 123, 124, 125, 126, 127,
                128, 129, 130, 131, 132, 133, 134, 135, 136, 140, 141, 50,
            ],
            Self::F23a => &[
                102, 107, 109, 115, 116, 117, 118, 119, 120, 121, 122, 123, 124, 125, 126, 127,
                133, 140, 141, 50,
            ],
            Self::F24 => &[
                102, 107, 115, 116, 117, 118, 119, 120, 121, 122, 123, 124, 125, 126, 127, 140,
                141, 400, 402, 50,
            ],
            Self::F24a => &[
                102, 107, 115, 123, 124, 400, 402, 404, 405, 406, 407, 408, 409, 410, 411, 50,
            ],
        }
    }
}

/// Looks up the extraction rule for a field id.
#[must_use]
pub fn lookup(id: FieldId) -> Option<&'static FieldDef> {
    FIELDS
        .binary_search_by_key(&id, |(key, _)| *key)
        .ok()
        .map(|index| &FIELDS[index].1)
}

macro_rules! field {
    ($name:ident, $position:expr, $from:expr, $to:expr) => {
        FieldDef {
            name: FieldName::$name,
            position: $position,
            bit_from: $from,
            bit_to: $to,
            invert: None,
            map: None,
        }
    };
    ($name:ident, $position:expr, $from:expr, $to:expr, invert $base:expr) => {
        FieldDef {
            name: FieldName::$name,
            position: $position,
            bit_from: $from,
            bit_to: $to,
            invert: Some($base),
            map: None,
        }
    };
    ($name:ident, $position:expr, $from:expr, $to:expr, map $map:ident) => {
        FieldDef {
            name: FieldName::$name,
            position: $position,
            bit_from: $from,
            bit_to: $to,
            invert: None,
            map: Some(ValueMap::$map),
        }
    };
}

/// All known field definitions, sorted by id.
static FIELDS: &[(FieldId, FieldDef)] = &[
    (50, field!(Moving, 0, 0, 0, map Moving)),
    (100, field!(SunAutomatic, 0, 2, 2, map OnOff)),
    (101, field!(TimeAutomatic, 0, 1, 1, map OnOff)),
    (102, field!(Position, 7, 0, 6, invert 100)),
    (104, field!(DawnAutomatic, 0, 3, 3, map OnOff)),
    (105, field!(DuskAutomatic, 0, 4, 4, map OnOff)),
    (106, field!(ManualMode, 0, 7, 7, map OnOff)),
    (107, field!(VentilatingMode, 1, 6, 6, map OnOff)),
    (109, field!(RunningTime, 6, 0, 7)),
    (111, field!(SunMode, 1, 0, 0, map OnOff)),
    (112, field!(WindAutomatic, 0, 5, 5, map OnOff)),
    (113, field!(WindMode, 1, 1, 1, map OnOff)),
    (114, field!(RainAutomatic, 0, 6, 6, map OnOff)),
    (115, field!(SunAutomatic, 2, 2, 2, map OnOff)),
    (116, field!(TimeAutomatic, 2, 1, 1, map OnOff)),
    (117, field!(DawnAutomatic, 2, 3, 3, map OnOff)),
    (118, field!(DuskAutomatic, 2, 4, 4, map OnOff)),
    (119, field!(ManualMode, 2, 7, 7, map OnOff)),
    (120, field!(WindAutomatic, 2, 5, 5, map OnOff)),
    (121, field!(RainAutomatic, 2, 6, 6, map OnOff)),
    (122, field!(SunMode, 3, 0, 0, map OnOff)),
    (123, field!(WindMode, 3, 1, 1, map OnOff)),
    (124, field!(RainMode, 3, 2, 2, map OnOff)),
    (125, field!(Obstacle, 3, 4, 4, map OnOff)),
    (126, field!(Block, 3, 5, 5, map OnOff)),
    (127, field!(SunPosition, 8, 0, 6, invert 100)),
    (128, field!(VentilatingPosition, 10, 0, 6, invert 100)),
    (129, field!(BlindsMode, 4, 0, 0, map OnOff)),
    (130, field!(SlatRunTime, 5, 0, 7)),
    (131, field!(TiltInSunPos, 4, 1, 1, map OnOff)),
    (132, field!(TiltInVentPos, 4, 2, 2, map OnOff)),
    (133, field!(MotorDeadTime, 4, 3, 4, map Motor)),
    (134, field!(TiltAfterMoveLevel, 4, 5, 5, map OnOff)),
    (135, field!(SlatPosition, 9, 0, 6)),
    (136, field!(BackJump, 3, 3, 3, map OnOff)),
    (140, field!(LightCurtain, 1, 3, 3, map OnOff)),
    (141, field!(Reversal, 1, 4, 4, map OnOff)),
    (400, field!(OpenSpeed, 5, 0, 1, map OpenS)),
    (402, field!(TenMinuteAlarm, 5, 2, 2, map OnOff)),
    (404, field!(TwoThousandCycleAlarm, 1, 5, 5, map OnOff)),
    (405, field!(AutomaticClosing, 1, 0, 3, map CloseT)),
    (406, field!(RotationDirection, 4, 0, 0, map UpDown)),
    (407, field!(RelayTime, 6, 0, 7)),
    (408, field!(WarningTime, 8, 0, 7)),
    (409, field!(DeadmanMode, 4, 1, 1, map OnOff)),
    (410, field!(ImpulseMode, 4, 2, 2, map OnOff)),
    (411, field!(PartialOpening, 9, 0, 6)),
];
