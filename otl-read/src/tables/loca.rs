//! The [loca (Index to Location)][loca] table
//!
//! [loca]: https://docs.microsoft.com/en-us/typography/opentype/spec/loca

use std::ops::Range;

use types::{BigEndian, GlyphId, Tag};

use crate::{FontData, ReadError};

/// 'loca'
pub const TAG: Tag = Tag::new(b"loca");

/// The [loca] table.
///
/// [loca]: https://docs.microsoft.com/en-us/typography/opentype/spec/loca
#[derive(Clone, Copy, Debug)]
pub enum Loca<'a> {
    Short(&'a [BigEndian<u16>]),
    Long(&'a [BigEndian<u32>]),
}

impl<'a> Loca<'a> {
    /// Read the table, which holds `num_glyphs + 1` offsets.
    ///
    /// `is_long` corresponds to a non-zero `indexToLocFormat` in the `head`
    /// table.
    pub fn read(data: FontData<'a>, is_long: bool, num_glyphs: u16) -> Result<Self, ReadError> {
        let count = num_glyphs as usize + 1;
        Ok(if is_long {
            Loca::Long(data.read_array_at(0, count)?)
        } else {
            Loca::Short(data.read_array_at(0, count)?)
        })
    }

    /// The number of glyphs with locations.
    pub fn len(&self) -> usize {
        match self {
            Loca::Short(data) => data.len().saturating_sub(1),
            Loca::Long(data) => data.len().saturating_sub(1),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Attempt to return the offset for a given glyph id.
    pub fn get_raw(&self, idx: usize) -> Option<u32> {
        match self {
            Loca::Short(data) => data.get(idx).map(|x| x.get() as u32 * 2),
            Loca::Long(data) => data.get(idx).map(|x| x.get()),
        }
    }

    /// The byte range of this glyph's data in the `glyf` table.
    ///
    /// An empty range means the glyph has no outline.
    pub fn glyph_range(&self, gid: GlyphId) -> Result<Range<u32>, ReadError> {
        let idx = gid.to_u16() as usize;
        let start = self.get_raw(idx).ok_or(ReadError::OutOfBounds)?;
        let end = self.get_raw(idx + 1).ok_or(ReadError::OutOfBounds)?;
        if end < start {
            return Err(ReadError::MalformedData("loca offsets are not ascending"));
        }
        Ok(start..end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use otl_test_data::bebuffer::BeBuffer;

    #[test]
    fn short_offsets_are_doubled() {
        let buf = otl_test_data::font::loca_short(4);
        let loca = Loca::read(FontData::new(&buf), false, 4).unwrap();
        assert_eq!(loca.len(), 4);
        assert_eq!(loca.glyph_range(GlyphId::new(1)), Ok(4..8));
        assert_eq!(loca.glyph_range(GlyphId::new(3)), Ok(12..16));
        assert!(loca.glyph_range(GlyphId::new(4)).is_err());
    }

    #[test]
    fn long_offsets() {
        let buf = BeBuffer::new().extend([0u32, 10, 10, 4]);
        let loca = Loca::read(FontData::new(&buf), true, 3).unwrap();
        assert_eq!(loca.glyph_range(GlyphId::new(0)), Ok(0..10));
        assert!(loca.glyph_range(GlyphId::new(1)).unwrap().is_empty());
        assert!(loca.glyph_range(GlyphId::new(2)).is_err());
        assert!(Loca::read(FontData::new(&buf), true, 4).is_err());
    }
}
