//! The [maxp](https://docs.microsoft.com/en-us/typography/opentype/spec/maxp) table

use types::Tag;

use crate::{FontData, FontRead, ReadError};

/// 'maxp'
pub const TAG: Tag = Tag::new(b"maxp");

/// The version of the table used by fonts with CFF outlines.
pub const VERSION_0_5: u32 = 0x0000_5000;
/// The version of the table used by fonts with TrueType outlines.
pub const VERSION_1_0: u32 = 0x0001_0000;

/// [maxp](https://docs.microsoft.com/en-us/typography/opentype/spec/maxp)
#[derive(Clone, Copy, Debug)]
pub struct Maxp<'a> {
    data: FontData<'a>,
    version: u32,
    num_glyphs: u16,
}

impl<'a> FontRead<'a> for Maxp<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let version: u32 = cursor.read()?;
        let num_glyphs = cursor.read()?;
        match version {
            VERSION_0_5 => (),
            // thirteen more u16 fields
            VERSION_1_0 => cursor.advance_by(13 * 2),
            _ => return Err(ReadError::MalformedData("unknown maxp version")),
        }
        let data = cursor.finish()?;
        Ok(Maxp {
            data,
            version,
            num_glyphs,
        })
    }
}

impl Maxp<'_> {
    /// The version: 0x00005000 for version 0.5, 0x00010000 for version 1.0.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// The number of glyphs in the font.
    pub fn num_glyphs(&self) -> u16 {
        self.num_glyphs
    }

    // the version 1.0 fields all follow the glyph count
    fn v1_field(&self, index: usize) -> Option<u16> {
        if self.version != VERSION_1_0 {
            return None;
        }
        self.data.read_at(6 + index * 2).ok()
    }

    /// Maximum points in a non-composite glyph.
    pub fn max_points(&self) -> Option<u16> {
        self.v1_field(0)
    }

    /// Maximum contours in a non-composite glyph.
    pub fn max_contours(&self) -> Option<u16> {
        self.v1_field(1)
    }

    /// Maximum points in a composite glyph.
    pub fn max_composite_points(&self) -> Option<u16> {
        self.v1_field(2)
    }

    /// Maximum contours in a composite glyph.
    pub fn max_composite_contours(&self) -> Option<u16> {
        self.v1_field(3)
    }

    /// 1 if instructions do not use the twilight zone (Z0), or 2 if
    /// instructions do use Z0; should be set to 2 in most cases.
    pub fn max_zones(&self) -> Option<u16> {
        self.v1_field(4)
    }

    /// Maximum points used in Z0.
    pub fn max_twilight_points(&self) -> Option<u16> {
        self.v1_field(5)
    }

    /// Number of Storage Area locations.
    pub fn max_storage(&self) -> Option<u16> {
        self.v1_field(6)
    }

    /// Number of FDEFs, equal to the highest function number + 1.
    pub fn max_function_defs(&self) -> Option<u16> {
        self.v1_field(7)
    }

    /// Number of IDEFs.
    pub fn max_instruction_defs(&self) -> Option<u16> {
        self.v1_field(8)
    }

    /// Maximum stack depth across Font Program ('fpgm' table), CVT Program
    /// ('prep' table) and all glyph instructions (in the 'glyf' table).
    pub fn max_stack_elements(&self) -> Option<u16> {
        self.v1_field(9)
    }

    /// Maximum byte count for glyph instructions.
    pub fn max_size_of_instructions(&self) -> Option<u16> {
        self.v1_field(10)
    }

    /// Maximum number of components referenced at "top level" for any
    /// composite glyph.
    pub fn max_component_elements(&self) -> Option<u16> {
        self.v1_field(11)
    }

    /// Maximum levels of recursion; 1 for simple components.
    pub fn max_component_depth(&self) -> Option<u16> {
        self.v1_field(12)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use otl_test_data::bebuffer::BeBuffer;

    #[test]
    fn version_0_5() {
        let buf = otl_test_data::font::maxp(42);
        let maxp = Maxp::read(FontData::new(&buf)).unwrap();
        assert_eq!(maxp.version(), VERSION_0_5);
        assert_eq!(maxp.num_glyphs(), 42);
        assert_eq!(maxp.max_points(), None);
    }

    #[test]
    fn version_1_0() {
        let buf = BeBuffer::new()
            .push(VERSION_1_0)
            .push(7u16)
            .extend(1u16..=13);
        let maxp = Maxp::read(FontData::new(&buf)).unwrap();
        assert_eq!(maxp.num_glyphs(), 7);
        assert_eq!(maxp.max_points(), Some(1));
        assert_eq!(maxp.max_component_depth(), Some(13));
        // too short for version 1.0
        assert!(Maxp::read(FontData::new(&buf[..20])).is_err());
    }

    #[test]
    fn unknown_version() {
        let buf = BeBuffer::new().push(0x0002_0000u32).push(7u16);
        assert!(Maxp::read(FontData::new(&buf)).is_err());
    }
}
