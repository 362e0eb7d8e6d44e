//! Decoding of device status reports.
//!
//! A status frame starts with `0F FF 0F` followed by the format byte. The
//! format selects an ordered list of field ids, each of which carries a
//! declarative bit-extraction rule. Parsing is therefore a single walk
//! over the table without per-device branching.

pub use field::{FieldDef, FieldName, FieldValue, ValueMap};
pub use table::{Format, FieldId};

use table::lookup;

use crate::frame::Frame;

mod field;
mod table;

/// Byte offset of the format byte within a status frame.
const FORMAT_OFFSET: usize = 3;

/// The decoded fields of one status report, in table order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct StatusMap(Vec<(FieldName, FieldValue)>);

impl StatusMap {
    /// Returns the value of the named field, if the report carries it.
    #[must_use]
    pub fn get(&self, name: FieldName) -> Option<FieldValue> {
        self.0
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| *value)
    }

    /// Returns the number of decoded fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Determines whether the report decoded to no fields at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the decoded fields in table order.
    pub fn iter(&self) -> impl Iterator<Item = &(FieldName, FieldValue)> {
        self.0.iter()
    }
}

impl IntoIterator for StatusMap {
    type Item = (FieldName, FieldValue);
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Decodes the fields of a status frame.
///
/// Returns an empty map for frames that are not status reports and for
/// unknown format bytes.
#[must_use]
pub fn parse(frame: &Frame) -> StatusMap {
    if !frame.is_status() {
        return StatusMap::default();
    }

    Format::from_byte(frame.format_byte())
        .map_or_else(StatusMap::default, |format| parse_with_format(frame, format))
}

/// Decodes a status frame against an explicitly chosen format.
///
/// This is how the reduced `23a`/`24a` layouts are reached, since the wire
/// carries only the plain format byte.
#[must_use]
pub fn parse_with_format(frame: &Frame, format: Format) -> StatusMap {
    StatusMap(
        format
            .field_ids()
            .iter()
            .filter_map(|id| lookup(*id))
            .map(|def| (def.name, extract(frame, def)))
            .collect(),
    )
}

/// Applies one extraction rule to a frame.
///
/// The 16-bit big-endian window of position `p` starts at byte `3 + p`,
/// so position 0 overlaps the format byte itself: some status bits are
/// embedded there.
fn extract(frame: &Frame, def: &FieldDef) -> FieldValue {
    let bytes = frame.bytes();
    let window = u16::from_be_bytes([
        bytes[FORMAT_OFFSET + def.position],
        bytes[FORMAT_OFFSET + def.position + 1],
    ]);
    let width = def.bit_to - def.bit_from + 1;
    let raw = (window >> def.bit_from) & ((1 << width) - 1);

    if let Some(base) = def.invert {
        return FieldValue::Number(base - i32::from(raw));
    }

    def.map
        .map_or(FieldValue::Number(i32::from(raw)), |map| map.apply(raw))
}
