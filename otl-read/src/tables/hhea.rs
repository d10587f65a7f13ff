//! The [hhea](https://docs.microsoft.com/en-us/typography/opentype/spec/hhea) table

use bytemuck::AnyBitPattern;
use types::{BigEndian, FixedSize, MajorMinor, Tag};

use crate::{FontData, FontRead, ReadError};

/// 'hhea'
pub const TAG: Tag = Tag::new(b"hhea");

/// [hhea](https://docs.microsoft.com/en-us/typography/opentype/spec/hhea) Horizontal Header Table
#[derive(Clone, Copy, Debug)]
pub struct Hhea<'a> {
    fields: &'a HheaFields,
}

#[derive(Clone, Copy, Debug, AnyBitPattern)]
#[repr(C)]
#[repr(packed)]
#[allow(dead_code)]
struct HheaFields {
    version: BigEndian<MajorMinor>,
    ascender: BigEndian<i16>,
    descender: BigEndian<i16>,
    line_gap: BigEndian<i16>,
    advance_width_max: BigEndian<u16>,
    min_left_side_bearing: BigEndian<i16>,
    min_right_side_bearing: BigEndian<i16>,
    x_max_extent: BigEndian<i16>,
    caret_slope_rise: BigEndian<i16>,
    caret_slope_run: BigEndian<i16>,
    caret_offset: BigEndian<i16>,
    reserved1: BigEndian<i16>,
    reserved2: BigEndian<i16>,
    reserved3: BigEndian<i16>,
    reserved4: BigEndian<i16>,
    metric_data_format: BigEndian<i16>,
    number_of_h_metrics: BigEndian<u16>,
}

impl FixedSize for HheaFields {
    const RAW_BYTE_LEN: usize = 36;
}

impl<'a> FontRead<'a> for Hhea<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let fields: &HheaFields = data.read_ref_at(0)?;
        if fields.version.get().major != 1 {
            return Err(ReadError::InvalidFormat(fields.version.get().major));
        }
        Ok(Hhea { fields })
    }
}

impl Hhea<'_> {
    /// The major/minor version (1, 0)
    pub fn version(&self) -> MajorMinor {
        self.fields.version.get()
    }

    /// Typographic ascent.
    pub fn ascender(&self) -> i16 {
        self.fields.ascender.get()
    }

    /// Typographic descent.
    pub fn descender(&self) -> i16 {
        self.fields.descender.get()
    }

    /// Typographic line gap. Negative LineGap values are treated as zero in
    /// some legacy platform implementations.
    pub fn line_gap(&self) -> i16 {
        self.fields.line_gap.get()
    }

    /// Maximum advance width value in 'hmtx' table.
    pub fn advance_width_max(&self) -> u16 {
        self.fields.advance_width_max.get()
    }

    /// Minimum left sidebearing value in 'hmtx' table for glyphs with
    /// contours (empty glyphs should be ignored).
    pub fn min_left_side_bearing(&self) -> i16 {
        self.fields.min_left_side_bearing.get()
    }

    /// Minimum right sidebearing value; calculated as min(aw - (lsb + xMax - xMin)) for glyphs with contours (empty glyphs should be ignored).
    pub fn min_right_side_bearing(&self) -> i16 {
        self.fields.min_right_side_bearing.get()
    }

    /// Max(lsb + (xMax-xMin))
    pub fn x_max_extent(&self) -> i16 {
        self.fields.x_max_extent.get()
    }

    /// Used to calculate the slope of the cursor (rise/run); 1 for vertical caret, 0 for horizontal.
    pub fn caret_slope_rise(&self) -> i16 {
        self.fields.caret_slope_rise.get()
    }

    /// 0 for vertical caret, 1 for horizontal.
    pub fn caret_slope_run(&self) -> i16 {
        self.fields.caret_slope_run.get()
    }

    /// The amount by which a slanted highlight on a glyph needs to be
    /// shifted to produce the best appearance. Set to 0 for non-slanted
    /// fonts
    pub fn caret_offset(&self) -> i16 {
        self.fields.caret_offset.get()
    }

    /// 0 for current format.
    pub fn metric_data_format(&self) -> i16 {
        self.fields.metric_data_format.get()
    }

    /// Number of hMetric entries in 'hmtx' table
    pub fn number_of_h_metrics(&self) -> u16 {
        self.fields.number_of_h_metrics.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_hhea() {
        let buf = otl_test_data::font::hhea(12);
        let hhea = Hhea::read(FontData::new(&buf)).unwrap();
        assert_eq!(hhea.version(), MajorMinor::VERSION_1_0);
        assert_eq!(hhea.ascender(), 800);
        assert_eq!(hhea.descender(), -200);
        assert_eq!(hhea.line_gap(), 90);
        assert_eq!(hhea.advance_width_max(), 1200);
        assert_eq!(hhea.number_of_h_metrics(), 12);
        assert!(Hhea::read(FontData::new(&buf[..35])).is_err());
    }
}
