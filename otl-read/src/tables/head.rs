//! The [head](https://docs.microsoft.com/en-us/typography/opentype/spec/head) table

use bytemuck::AnyBitPattern;
use types::{BigEndian, FixedSize, MajorMinor, Tag};

use crate::{FontData, FontRead, ReadError};

/// 'head'
pub const TAG: Tag = Tag::new(b"head");

/// The value of the `magicNumber` field in a well-formed table.
pub const MAGIC_NUMBER: u32 = 0x5F0F3CF5;

/// The [head](https://docs.microsoft.com/en-us/typography/opentype/spec/head)
/// (font header) table.
#[derive(Clone, Copy, Debug)]
pub struct Head<'a> {
    fields: &'a HeadFields,
}

#[derive(Clone, Copy, Debug, AnyBitPattern)]
#[repr(C)]
#[repr(packed)]
struct HeadFields {
    version: BigEndian<MajorMinor>,
    font_revision: BigEndian<i32>,
    checksum_adjustment: BigEndian<u32>,
    magic_number: BigEndian<u32>,
    flags: BigEndian<u16>,
    units_per_em: BigEndian<u16>,
    created: BigEndian<i64>,
    modified: BigEndian<i64>,
    x_min: BigEndian<i16>,
    y_min: BigEndian<i16>,
    x_max: BigEndian<i16>,
    y_max: BigEndian<i16>,
    mac_style: BigEndian<u16>,
    lowest_rec_ppem: BigEndian<u16>,
    font_direction_hint: BigEndian<i16>,
    index_to_loc_format: BigEndian<i16>,
    glyph_data_format: BigEndian<i16>,
}

impl FixedSize for HeadFields {
    const RAW_BYTE_LEN: usize = 54;
}

impl<'a> FontRead<'a> for Head<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let fields: &HeadFields = data.read_ref_at(0)?;
        let version = fields.version.get();
        if version.major != 1 {
            return Err(ReadError::InvalidFormat(version.major));
        }
        let magic = fields.magic_number.get();
        if magic != MAGIC_NUMBER {
            log::warn!("unexpected magic number 0x{magic:08X} in 'head' table");
        }
        Ok(Head { fields })
    }
}

impl Head<'_> {
    /// Version number of the font header table, set to (1, 0)
    pub fn version(&self) -> MajorMinor {
        self.fields.version.get()
    }

    /// Set by font manufacturer.
    ///
    /// This is stored as a 16.16 fixed point number.
    pub fn font_revision(&self) -> f64 {
        self.fields.font_revision.get() as f64 / 65536.0
    }

    pub fn checksum_adjustment(&self) -> u32 {
        self.fields.checksum_adjustment.get()
    }

    /// Set to 0x5F0F3CF5.
    pub fn magic_number(&self) -> u32 {
        self.fields.magic_number.get()
    }

    pub fn flags(&self) -> u16 {
        self.fields.flags.get()
    }

    /// Set to a value from 16 to 16384. Any value in this range is valid.
    pub fn units_per_em(&self) -> u16 {
        self.fields.units_per_em.get()
    }

    /// Number of seconds since 12:00 midnight that started January 1st 1904
    /// in GMT/UTC time zone.
    pub fn created(&self) -> i64 {
        self.fields.created.get()
    }

    /// Number of seconds since 12:00 midnight that started January 1st 1904
    /// in GMT/UTC time zone.
    pub fn modified(&self) -> i64 {
        self.fields.modified.get()
    }

    /// Minimum x coordinate across all glyph bounding boxes.
    pub fn x_min(&self) -> i16 {
        self.fields.x_min.get()
    }

    /// Minimum y coordinate across all glyph bounding boxes.
    pub fn y_min(&self) -> i16 {
        self.fields.y_min.get()
    }

    /// Maximum x coordinate across all glyph bounding boxes.
    pub fn x_max(&self) -> i16 {
        self.fields.x_max.get()
    }

    /// Maximum y coordinate across all glyph bounding boxes.
    pub fn y_max(&self) -> i16 {
        self.fields.y_max.get()
    }

    pub fn mac_style(&self) -> u16 {
        self.fields.mac_style.get()
    }

    /// Smallest readable size in pixels.
    pub fn lowest_rec_ppem(&self) -> u16 {
        self.fields.lowest_rec_ppem.get()
    }

    /// Deprecated (Set to 2).
    pub fn font_direction_hint(&self) -> i16 {
        self.fields.font_direction_hint.get()
    }

    /// 0 for short offsets (Offset16), 1 for long (Offset32).
    pub fn index_to_loc_format(&self) -> i16 {
        self.fields.index_to_loc_format.get()
    }

    /// 0 for current format.
    pub fn glyph_data_format(&self) -> i16 {
        self.fields.glyph_data_format.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoke_test() {
        let buf = otl_test_data::font::head(4096, 1);
        let head = Head::read(FontData::new(&buf)).unwrap();
        assert_eq!(head.version(), MajorMinor::VERSION_1_0);
        assert_eq!(head.font_revision(), 1.5);
        assert_eq!(head.magic_number(), MAGIC_NUMBER);
        assert_eq!(head.units_per_em(), 4096);
        assert_eq!(head.created(), 3_600_000_000);
        assert_eq!(head.y_min(), -200);
        assert_eq!(head.index_to_loc_format(), 1);
    }

    #[test]
    fn truncated() {
        let buf = otl_test_data::font::head(1000, 0);
        assert_eq!(
            Head::read(FontData::new(&buf[..53])).err(),
            Some(ReadError::OutOfBounds)
        );
    }
}
