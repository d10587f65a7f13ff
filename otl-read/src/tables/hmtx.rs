//! The [hmtx (Horizontal Metrics)](https://docs.microsoft.com/en-us/typography/opentype/spec/hmtx) table

use bytemuck::AnyBitPattern;
use types::{BigEndian, FixedSize, GlyphId, Tag};

use crate::{FontData, ReadError};

/// 'hmtx'
pub const TAG: Tag = Tag::new(b"hmtx");

/// The [hmtx](https://docs.microsoft.com/en-us/typography/opentype/spec/hmtx)
/// table.
///
/// Reading this table requires the number of full metrics (from `hhea`) and
/// the number of glyphs (from `maxp`).
#[derive(Clone, Copy, Debug)]
pub struct Hmtx<'a> {
    h_metrics: &'a [LongMetric],
    left_side_bearings: &'a [BigEndian<i16>],
}

impl<'a> Hmtx<'a> {
    pub fn read(
        data: FontData<'a>,
        number_of_h_metrics: u16,
        num_glyphs: u16,
    ) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let h_metrics = cursor.read_array(number_of_h_metrics as usize)?;
        let num_lsbs = num_glyphs.saturating_sub(number_of_h_metrics);
        let left_side_bearings = cursor.read_array(num_lsbs as usize)?;
        Ok(Hmtx {
            h_metrics,
            left_side_bearings,
        })
    }

    /// Paired advance width and left side bearing values for each glyph. Records are indexed by glyph ID.
    pub fn h_metrics(&self) -> &'a [LongMetric] {
        self.h_metrics
    }

    /// Leading (left/top) side bearings for glyph IDs greater than or equal to numberOfLongMetrics.
    pub fn left_side_bearings(&self) -> &'a [BigEndian<i16>] {
        self.left_side_bearings
    }

    /// Returns the advance for the given glyph identifier.
    ///
    /// Glyphs past the last full metric share its advance.
    pub fn advance(&self, glyph_id: GlyphId) -> Option<u16> {
        let ix = glyph_id.to_u16() as usize;
        self.h_metrics
            .get(ix)
            .or_else(|| self.h_metrics.last())
            .map(|metric| metric.advance())
    }

    /// Returns the side bearing for the given glyph identifier.
    pub fn side_bearing(&self, glyph_id: GlyphId) -> Option<i16> {
        let ix = glyph_id.to_u16() as usize;
        match self.h_metrics.get(ix) {
            Some(metric) => Some(metric.side_bearing()),
            None => self
                .left_side_bearings
                .get(ix - self.h_metrics.len())
                .map(|lsb| lsb.get()),
        }
    }
}

/// A record of horizontal advance and left side bearing for a glyph.
#[derive(Clone, Copy, Debug, AnyBitPattern)]
#[repr(C)]
#[repr(packed)]
pub struct LongMetric {
    pub advance: BigEndian<u16>,
    pub side_bearing: BigEndian<i16>,
}

impl LongMetric {
    /// Advance width, in font design units.
    pub fn advance(&self) -> u16 {
        self.advance.get()
    }

    /// Glyph leading side bearing, in font design units.
    pub fn side_bearing(&self) -> i16 {
        self.side_bearing.get()
    }
}

impl FixedSize for LongMetric {
    const RAW_BYTE_LEN: usize = u16::RAW_BYTE_LEN + i16::RAW_BYTE_LEN;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_side_bearings() {
        let buf = otl_test_data::font::hmtx(3, 10);
        let hmtx = Hmtx::read(FontData::new(&buf), 3, 10).unwrap();
        assert_eq!(hmtx.h_metrics().len(), 3);
        assert_eq!(hmtx.left_side_bearings().len(), 7);
        assert_eq!(hmtx.advance(GlyphId::new(1)), Some(600));
        assert_eq!(hmtx.side_bearing(GlyphId::new(2)), Some(2));
        // past the long metrics, the last advance repeats
        assert_eq!(hmtx.advance(GlyphId::new(8)), Some(700));
        assert_eq!(hmtx.side_bearing(GlyphId::new(8)), Some(8));
        assert_eq!(hmtx.side_bearing(GlyphId::new(10)), None);
    }

    #[test]
    fn too_many_metrics() {
        let buf = otl_test_data::font::hmtx(3, 10);
        assert!(Hmtx::read(FontData::new(&buf), 3, 11).is_err());
        assert!(Hmtx::read(FontData::new(&buf), 30, 30).is_err());
    }
}
