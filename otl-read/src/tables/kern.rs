//! The [kern](https://docs.microsoft.com/en-us/typography/opentype/spec/kern) table

use bytemuck::AnyBitPattern;
use types::{BigEndian, FixedSize, GlyphId, Tag};

use crate::{FontData, FontRead, ReadError};

/// 'kern'
pub const TAG: Tag = Tag::new(b"kern");

/// The OpenType [kerning](https://learn.microsoft.com/en-us/typography/opentype/spec/kern) table.
///
/// Only the version 0 (Microsoft) header is supported.
#[derive(Clone, Copy, Debug)]
pub struct Kern<'a> {
    data: FontData<'a>,
    num_tables: u16,
}

impl<'a> FontRead<'a> for Kern<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let version: u16 = data.read_at(0)?;
        if version != 0 {
            return Err(ReadError::InvalidFormat(version));
        }
        let num_tables = data.read_at(2)?;
        Ok(Kern { data, num_tables })
    }
}

impl<'a> Kern<'a> {
    /// Table version number—set to 0.
    pub fn version(&self) -> u16 {
        0
    }

    /// Number of subtables in the kerning table.
    pub fn num_tables(&self) -> u16 {
        self.num_tables
    }

    /// Iterate over the subtables.
    ///
    /// Iteration stops after the first subtable that cannot be read.
    pub fn subtables(&self) -> impl Iterator<Item = Result<Subtable<'a>, ReadError>> + 'a {
        let mut remaining = self.data.split_off(4);
        let mut count = self.num_tables;
        std::iter::from_fn(move || {
            if count == 0 {
                return None;
            }
            count -= 1;
            let data = remaining.take()?;
            match Subtable::read(data) {
                Ok(subtable) => {
                    remaining = data.split_off(subtable.data.len());
                    Some(Ok(subtable))
                }
                Err(e) => Some(Err(e)),
            }
        })
    }

    /// Returns the kerning adjustment for a pair of glyphs.
    ///
    /// This sums the values of every horizontal, format 0 subtable that
    /// is neither cross-stream nor a minimum value table.
    pub fn kerning(&self, left: GlyphId, right: GlyphId) -> i32 {
        self.subtables()
            .filter_map(Result::ok)
            .filter(|subtable| {
                let coverage = subtable.coverage();
                coverage.is_horizontal() && !coverage.is_cross_stream() && !coverage.is_minimum()
            })
            .filter_map(|subtable| match subtable.kind() {
                Some(SubtableKind::Format0(format0)) => format0.kerning(left, right),
                None => None,
            })
            .map(i32::from)
            .sum()
    }
}

/// The flags in the low byte of a subtable's coverage field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KernCoverage(u8);

impl KernCoverage {
    pub const HORIZONTAL: Self = KernCoverage(0x01);
    pub const MINIMUM: Self = KernCoverage(0x02);
    pub const CROSS_STREAM: Self = KernCoverage(0x04);
    pub const OVERRIDE: Self = KernCoverage(0x08);

    pub fn bits(self) -> u8 {
        self.0
    }

    /// Table has horizontal data (as opposed to vertical).
    pub fn is_horizontal(self) -> bool {
        self.0 & Self::HORIZONTAL.0 != 0
    }

    /// Table has minimum values (as opposed to kerning values).
    pub fn is_minimum(self) -> bool {
        self.0 & Self::MINIMUM.0 != 0
    }

    /// Kerning is perpendicular to the flow of the text.
    pub fn is_cross_stream(self) -> bool {
        self.0 & Self::CROSS_STREAM.0 != 0
    }

    /// The value in this table should replace the value currently being
    /// accumulated.
    pub fn is_override(self) -> bool {
        self.0 & Self::OVERRIDE.0 != 0
    }
}

/// A subtable in the `kern` table.
#[derive(Clone, Copy, Debug)]
pub struct Subtable<'a> {
    data: FontData<'a>,
    length: u16,
    format: u8,
    coverage: KernCoverage,
}

impl<'a> FontRead<'a> for Subtable<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        cursor.advance::<u16>(); // version
        let length: u16 = cursor.read()?;
        let format: u8 = cursor.read()?;
        let coverage = KernCoverage(cursor.read()?);
        let len = if format == 0 {
            // the length field overflows for large subtables, so compute the
            // real size from the pair count
            let n_pairs: u16 = data.read_at(6)?;
            6 + 8 + n_pairs as usize * KernPair::RAW_BYTE_LEN
        } else {
            length as usize
        };
        if len < 6 {
            return Err(ReadError::MalformedData("kern subtable length too small"));
        }
        let data = data.view(0, len)?;
        Ok(Subtable {
            data,
            length,
            format,
            coverage,
        })
    }
}

impl<'a> Subtable<'a> {
    /// The length field of the subtable header, in bytes.
    pub fn length(&self) -> u16 {
        self.length
    }

    pub fn format(&self) -> u8 {
        self.format
    }

    pub fn coverage(&self) -> KernCoverage {
        self.coverage
    }

    /// The parsed subtable, if its format is supported.
    pub fn kind(&self) -> Option<SubtableKind<'a>> {
        match self.format {
            0 => match Subtable0::read(self.data) {
                Ok(format0) => Some(SubtableKind::Format0(format0)),
                Err(e) => {
                    log::debug!("skipping malformed kern format 0 subtable: {e}");
                    None
                }
            },
            other => {
                log::debug!("skipping unsupported kern subtable format {other}");
                None
            }
        }
    }
}

/// The supported kern subtable formats.
#[derive(Clone, Copy, Debug)]
pub enum SubtableKind<'a> {
    Format0(Subtable0<'a>),
}

/// A format 0 subtable: an ordered list of kerning pairs.
#[derive(Clone, Copy, Debug)]
pub struct Subtable0<'a> {
    search_range: u16,
    entry_selector: u16,
    range_shift: u16,
    pairs: &'a [KernPair],
}

impl<'a> FontRead<'a> for Subtable0<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        // the common subtable header
        cursor.advance_by(6);
        let n_pairs: u16 = cursor.read()?;
        let search_range = cursor.read()?;
        let entry_selector = cursor.read()?;
        let range_shift = cursor.read()?;
        let pairs = cursor.read_array(n_pairs as usize)?;
        Ok(Subtable0 {
            search_range,
            entry_selector,
            range_shift,
            pairs,
        })
    }
}

impl<'a> Subtable0<'a> {
    pub fn num_pairs(&self) -> u16 {
        self.pairs.len() as u16
    }

    pub fn search_range(&self) -> u16 {
        self.search_range
    }

    pub fn entry_selector(&self) -> u16 {
        self.entry_selector
    }

    pub fn range_shift(&self) -> u16 {
        self.range_shift
    }

    /// Kerning pairs, ordered by the left and then the right glyph.
    pub fn pairs(&self) -> &'a [KernPair] {
        self.pairs
    }

    /// Returns the kerning adjustment for the given pair.
    pub fn kerning(&self, left: GlyphId, right: GlyphId) -> Option<i16> {
        let key = (left.to_u16() as u32) << 16 | right.to_u16() as u32;
        self.pairs
            .binary_search_by_key(&key, KernPair::key)
            .ok()
            .and_then(|ix| self.pairs.get(ix))
            .map(KernPair::value)
    }
}

/// A kerning pair in a format 0 subtable.
#[derive(Clone, Copy, Debug, AnyBitPattern)]
#[repr(C)]
#[repr(packed)]
pub struct KernPair {
    pub left: BigEndian<GlyphId>,
    pub right: BigEndian<GlyphId>,
    pub value: BigEndian<i16>,
}

impl KernPair {
    pub fn left(&self) -> GlyphId {
        self.left.get()
    }

    pub fn right(&self) -> GlyphId {
        self.right.get()
    }

    /// The kerning value, in font design units.
    pub fn value(&self) -> i16 {
        self.value.get()
    }

    fn key(&self) -> u32 {
        (self.left().to_u16() as u32) << 16 | self.right().to_u16() as u32
    }
}

impl FixedSize for KernPair {
    const RAW_BYTE_LEN: usize = GlyphId::RAW_BYTE_LEN * 2 + i16::RAW_BYTE_LEN;
}

#[cfg(test)]
mod tests {
    use super::*;
    use otl_test_data::kern as test_data;

    fn gid(raw: u16) -> GlyphId {
        GlyphId::new(raw)
    }

    #[test]
    fn smoke_test() {
        let data = FontData::new(test_data::KERN_VER_0_FMT_0_DATA);
        let kern = Kern::read(data).unwrap();
        assert_eq!(kern.version(), 0);
        assert_eq!(kern.num_tables(), 1);

        let subtable = kern.subtables().next().unwrap().unwrap();
        assert_eq!(subtable.format(), 0);
        assert_eq!(subtable.length(), 32);
        assert_eq!(subtable.coverage(), KernCoverage::HORIZONTAL);
        let Some(SubtableKind::Format0(format0)) = subtable.kind() else {
            panic!("expected a format 0 subtable");
        };
        assert_eq!(format0.num_pairs(), 3);
        assert_eq!(format0.search_range(), 12);
        assert_eq!(format0.entry_selector(), 1);
        assert_eq!(format0.range_shift(), 6);
        let pairs = format0
            .pairs()
            .iter()
            .map(|pair| (pair.left().to_u16(), pair.right().to_u16(), pair.value()))
            .collect::<Vec<_>>();
        assert_eq!(pairs, [(4, 12, -40), (4, 28, 40), (5, 40, -50)]);

        assert_eq!(kern.kerning(gid(4), gid(28)), 40);
        assert_eq!(kern.kerning(gid(5), gid(40)), -50);
        assert_eq!(kern.kerning(gid(5), gid(41)), 0);
    }

    #[test]
    fn only_horizontal_format0_values_are_summed() {
        let kern = Kern::read(FontData::new(test_data::KERN_VER_0_MIXED_SUBTABLES)).unwrap();
        let formats = kern
            .subtables()
            .map(|subtable| subtable.unwrap().format())
            .collect::<Vec<_>>();
        assert_eq!(formats, [0, 0, 0, 2, 0]);
        assert_eq!(kern.kerning(gid(4), gid(12)), -50);
        assert_eq!(kern.kerning(gid(5), gid(40)), 7);
    }

    #[test]
    fn unsupported_version() {
        let data = [0u8, 1, 0, 0, 0, 0, 0, 0];
        assert_eq!(
            Kern::read(FontData::new(&data)).err(),
            Some(ReadError::InvalidFormat(1))
        );
    }
}
