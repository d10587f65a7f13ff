//! The font file: the table directory and its parsed tables

use bytemuck::AnyBitPattern;
use types::{
    BigEndian, FixedSize, GlyphId, Tag, CFF_SFNT_VERSION, TRUE_SFNT_VERSION, TT_SFNT_VERSION,
};

use crate::tables::{
    cmap::{self, Cmap},
    gdef::{self, Gdef},
    gpos::{self, Gpos},
    gsub::{self, Gsub},
    head::{self, Head},
    hhea::{self, Hhea},
    hmtx::{self, Hmtx},
    kern::{self, Kern},
    loca::{self, Loca},
    maxp::{self, Maxp},
};
use crate::{FontData, FontRead, FormatError, ReadError};

/// The [table directory](https://learn.microsoft.com/en-us/typography/opentype/spec/otff#table-directory)
/// at the start of a font file.
#[derive(Clone, Copy, Debug)]
pub struct TableDirectory<'a> {
    sfnt_version: u32,
    table_records: &'a [TableRecord],
}

impl<'a> FontRead<'a> for TableDirectory<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let sfnt_version = cursor.read()?;
        let num_tables: u16 = cursor.read()?;
        // searchRange, entrySelector, rangeShift
        cursor.advance_by(6);
        let table_records = cursor.read_array(num_tables as usize)?;
        Ok(TableDirectory {
            sfnt_version,
            table_records,
        })
    }
}

impl<'a> TableDirectory<'a> {
    /// 0x00010000, 'OTTO' or 'true'
    pub fn sfnt_version(&self) -> u32 {
        self.sfnt_version
    }

    /// Number of tables.
    pub fn num_tables(&self) -> u16 {
        self.table_records.len() as u16
    }

    /// Table records array—one for each top-level table in the font
    pub fn table_records(&self) -> &'a [TableRecord] {
        self.table_records
    }
}

/// Record for a table in a font.
#[derive(Clone, Copy, Debug, AnyBitPattern)]
#[repr(C)]
#[repr(packed)]
pub struct TableRecord {
    /// Table identifier.
    pub tag: BigEndian<Tag>,
    /// Checksum for the table.
    pub checksum: BigEndian<u32>,
    /// Offset from the beginning of the font data.
    pub offset: BigEndian<u32>,
    /// Length of the table.
    pub length: BigEndian<u32>,
}

impl TableRecord {
    /// Table identifier.
    pub fn tag(&self) -> Tag {
        self.tag.get()
    }

    /// Checksum for the table. This is not verified.
    pub fn checksum(&self) -> u32 {
        self.checksum.get()
    }

    /// Offset from the beginning of the font data.
    pub fn offset(&self) -> u32 {
        self.offset.get()
    }

    /// Length of the table.
    pub fn length(&self) -> u32 {
        self.length.get()
    }
}

impl FixedSize for TableRecord {
    const RAW_BYTE_LEN: usize =
        Tag::RAW_BYTE_LEN + u32::RAW_BYTE_LEN + u32::RAW_BYTE_LEN + u32::RAW_BYTE_LEN;
}

/// A table in a font, parsed according to its tag.
#[derive(Clone, Copy, Debug)]
pub enum Table<'a> {
    Head(Head<'a>),
    Maxp(Maxp<'a>),
    Hhea(Hhea<'a>),
    Hmtx(Hmtx<'a>),
    Loca(Loca<'a>),
    Kern(Kern<'a>),
    Cmap(Cmap<'a>),
    Gdef(Gdef<'a>),
    Gsub(Gsub<'a>),
    Gpos(Gpos<'a>),
    /// A table that is not interpreted, or that failed to parse.
    Opaque(FontData<'a>),
}

impl Table<'_> {
    /// Returns `true` if this table was not interpreted.
    pub fn is_opaque(&self) -> bool {
        matches!(self, Table::Opaque(_))
    }
}

/// A parsed font.
///
/// Every table in the file is kept, in directory order. Tables are views
/// into the bytes passed to [`parse`], and all structures reached through
/// them are resolved lazily from those same bytes.
#[derive(Clone, Debug)]
pub struct Font<'a> {
    data: FontData<'a>,
    directory: TableDirectory<'a>,
    tables: Vec<(Tag, Table<'a>)>,
}

/// Parse a font file.
///
/// The table directory must be well formed: the sfnt version must be one
/// of the known values, and the table records must be sorted by tag, start
/// on a four-byte boundary and lie within the file.
///
/// If present, `head` and `maxp` must parse. Any other table that fails to
/// parse is logged and kept as [`Table::Opaque`].
pub fn parse(bytes: &[u8]) -> Result<Font<'_>, FormatError> {
    let data = FontData::new(bytes);
    let directory = TableDirectory::read(data)?;
    let sfnt_version = directory.sfnt_version();
    if ![TT_SFNT_VERSION, CFF_SFNT_VERSION, TRUE_SFNT_VERSION].contains(&sfnt_version) {
        return Err(FormatError::InvalidSfnt(sfnt_version));
    }

    let mut entries: Vec<(Tag, FontData)> = Vec::with_capacity(directory.table_records.len());
    for record in directory.table_records() {
        let tag = record.tag();
        if let Some(&(prev, _)) = entries.last() {
            if tag <= prev {
                return Err(FormatError::UnsortedTables { prev, tag });
            }
        }
        let offset = record.offset();
        if offset % 4 != 0 {
            return Err(FormatError::MisalignedTable { tag, offset });
        }
        let table_data = data
            .view(offset as usize, record.length() as usize)
            .map_err(|_| FormatError::TableOutOfBounds { tag })?;
        entries.push((tag, table_data));
    }

    let mut tables = Vec::with_capacity(entries.len());
    for &(tag, table_data) in &entries {
        let table = match parse_table(tag, table_data, &entries) {
            Ok(table) => table,
            Err(source) if tag == head::TAG || tag == maxp::TAG => {
                return Err(FormatError::Table { tag, source });
            }
            Err(e) => {
                log::warn!("keeping malformed '{tag}' table as opaque: {e}");
                Table::Opaque(table_data)
            }
        };
        tables.push((tag, table));
    }

    Ok(Font {
        data,
        directory,
        tables,
    })
}

fn find<'a>(entries: &[(Tag, FontData<'a>)], tag: Tag) -> Option<FontData<'a>> {
    entries
        .binary_search_by_key(&tag, |(tag, _)| *tag)
        .ok()
        .map(|ix| entries[ix].1)
}

fn required<'a, T: FontRead<'a>>(
    entries: &[(Tag, FontData<'a>)],
    tag: Tag,
    missing: &'static str,
) -> Result<T, ReadError> {
    find(entries, tag)
        .ok_or(ReadError::MalformedData(missing))
        .and_then(T::read)
}

fn parse_table<'a>(
    tag: Tag,
    data: FontData<'a>,
    entries: &[(Tag, FontData<'a>)],
) -> Result<Table<'a>, ReadError> {
    Ok(match tag {
        head::TAG => Table::Head(Head::read(data)?),
        maxp::TAG => Table::Maxp(Maxp::read(data)?),
        hhea::TAG => Table::Hhea(Hhea::read(data)?),
        hmtx::TAG => {
            let hhea: Hhea = required(entries, hhea::TAG, "hmtx without hhea")?;
            let maxp: Maxp = required(entries, maxp::TAG, "hmtx without maxp")?;
            Table::Hmtx(Hmtx::read(
                data,
                hhea.number_of_h_metrics(),
                maxp.num_glyphs(),
            )?)
        }
        loca::TAG => {
            let head: Head = required(entries, head::TAG, "loca without head")?;
            let maxp: Maxp = required(entries, maxp::TAG, "loca without maxp")?;
            let is_long = head.index_to_loc_format() != 0;
            Table::Loca(Loca::read(data, is_long, maxp.num_glyphs())?)
        }
        kern::TAG => Table::Kern(Kern::read(data)?),
        cmap::TAG => Table::Cmap(Cmap::read(data)?),
        gdef::TAG => Table::Gdef(Gdef::read(data)?),
        gsub::TAG => Table::Gsub(Gsub::read(data)?),
        gpos::TAG => Table::Gpos(Gpos::read(data)?),
        _ => Table::Opaque(data),
    })
}

impl<'a> Font<'a> {
    /// The sfnt version from the table directory.
    pub fn sfnt_version(&self) -> u32 {
        self.directory.sfnt_version()
    }

    /// The number of tables in the font.
    pub fn num_tables(&self) -> u16 {
        self.directory.num_tables()
    }

    /// The table directory.
    pub fn table_directory(&self) -> &TableDirectory<'a> {
        &self.directory
    }

    /// The bytes of the whole font file.
    pub fn data(&self) -> FontData<'a> {
        self.data
    }

    /// The tags of all tables, in directory order.
    pub fn table_tags(&self) -> Vec<Tag> {
        self.tables.iter().map(|(tag, _)| *tag).collect()
    }

    /// Returns the table with the given tag, if present.
    pub fn table(&self, tag: Tag) -> Option<&Table<'a>> {
        self.tables
            .binary_search_by_key(&tag, |(tag, _)| *tag)
            .ok()
            .map(|ix| &self.tables[ix].1)
    }

    /// Returns the raw data of the table with the given tag, if present.
    pub fn table_data(&self, tag: Tag) -> Option<FontData<'a>> {
        let record = self
            .directory
            .table_records()
            .iter()
            .find(|record| record.tag() == tag)?;
        self.data
            .view(record.offset() as usize, record.length() as usize)
            .ok()
    }

    pub fn head(&self) -> Option<Head<'a>> {
        match self.table(head::TAG)? {
            Table::Head(table) => Some(*table),
            _ => None,
        }
    }

    pub fn maxp(&self) -> Option<Maxp<'a>> {
        match self.table(maxp::TAG)? {
            Table::Maxp(table) => Some(*table),
            _ => None,
        }
    }

    pub fn hhea(&self) -> Option<Hhea<'a>> {
        match self.table(hhea::TAG)? {
            Table::Hhea(table) => Some(*table),
            _ => None,
        }
    }

    pub fn hmtx(&self) -> Option<Hmtx<'a>> {
        match self.table(hmtx::TAG)? {
            Table::Hmtx(table) => Some(*table),
            _ => None,
        }
    }

    pub fn loca(&self) -> Option<Loca<'a>> {
        match self.table(loca::TAG)? {
            Table::Loca(table) => Some(*table),
            _ => None,
        }
    }

    pub fn kern(&self) -> Option<Kern<'a>> {
        match self.table(kern::TAG)? {
            Table::Kern(table) => Some(*table),
            _ => None,
        }
    }

    pub fn cmap(&self) -> Option<Cmap<'a>> {
        match self.table(cmap::TAG)? {
            Table::Cmap(table) => Some(*table),
            _ => None,
        }
    }

    pub fn gdef(&self) -> Option<Gdef<'a>> {
        match self.table(gdef::TAG)? {
            Table::Gdef(table) => Some(*table),
            _ => None,
        }
    }

    pub fn gsub(&self) -> Option<Gsub<'a>> {
        match self.table(gsub::TAG)? {
            Table::Gsub(table) => Some(*table),
            _ => None,
        }
    }

    pub fn gpos(&self) -> Option<Gpos<'a>> {
        match self.table(gpos::TAG)? {
            Table::Gpos(table) => Some(*table),
            _ => None,
        }
    }

    /// Map a character to a glyph, using the font's `cmap` table.
    ///
    /// Returns [`GlyphId::NOTDEF`] if the font has no usable `cmap` or the
    /// character is not mapped.
    pub fn glyph_index(&self, c: char) -> GlyphId {
        self.cmap()
            .and_then(|cmap| cmap.map_codepoint(c))
            .unwrap_or(GlyphId::NOTDEF)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use otl_test_data::font::{self as test_data, build_font, build_font_with_version};
    use pretty_assertions::assert_eq;

    fn tag(bytes: &[u8; 4]) -> Tag {
        Tag::new(bytes)
    }

    #[test]
    fn tables_in_directory_order() {
        let _ = env_logger::builder().is_test(true).try_init();
        let data = test_data::simple_font();
        let font = parse(&data).unwrap();
        assert_eq!(font.sfnt_version(), TT_SFNT_VERSION);
        assert_eq!(font.num_tables(), 9);
        let tags = font.table_tags();
        assert_eq!(
            tags,
            [
                tag(b"GDEF"),
                tag(b"GSUB"),
                tag(b"cmap"),
                tag(b"head"),
                tag(b"hhea"),
                tag(b"hmtx"),
                tag(b"kern"),
                tag(b"loca"),
                tag(b"maxp"),
            ]
        );
        let records = font.table_directory().table_records();
        assert!(tags.iter().zip(records).all(|(tag, rec)| *tag == rec.tag()));
        assert!(font.tables.iter().all(|(_, table)| !table.is_opaque()));
    }

    #[test]
    fn typed_tables() {
        let data = test_data::simple_font();
        let font = parse(&data).unwrap();
        assert_eq!(font.head().unwrap().units_per_em(), 1000);
        assert_eq!(font.maxp().unwrap().num_glyphs(), test_data::NUM_GLYPHS);
        let hmtx = font.hmtx().unwrap();
        assert_eq!(hmtx.advance(GlyphId::new(1)), Some(600));
        assert_eq!(hmtx.advance(GlyphId::new(200)), Some(700));
        let loca = font.loca().unwrap();
        assert_eq!(loca.glyph_range(GlyphId::new(3)).unwrap(), 12..16);
        assert_eq!(font.kern().unwrap().kerning(GlyphId::new(4), GlyphId::new(12)), -40);
        assert!(font.gdef().is_some());
        assert!(font.gsub().is_some());
        assert!(font.gpos().is_none());
        assert!(font.table(tag(b"name")).is_none());
        assert_eq!(font.table_data(tag(b"maxp")).unwrap().len(), 6);
    }

    #[test]
    fn glyph_index() {
        let data = test_data::simple_font();
        let font = parse(&data).unwrap();
        assert_eq!(font.glyph_index('A'), GlyphId::new(4));
        assert_eq!(font.glyph_index('B'), GlyphId::new(5));
        assert_eq!(font.glyph_index('C'), GlyphId::new(6));
        assert_eq!(font.glyph_index('Z'), GlyphId::NOTDEF);
        assert_eq!(font.glyph_index('\u{1F601}'), GlyphId::new(101));
    }

    #[test]
    fn no_cmap() {
        let maxp = test_data::maxp(10);
        let data = build_font(&[(tag(b"maxp"), maxp.as_slice())]);
        let font = parse(&data).unwrap();
        assert_eq!(font.glyph_index('A'), GlyphId::NOTDEF);
    }

    #[test]
    fn unknown_tables_are_opaque() {
        let data = build_font(&[(tag(b"abcd"), &[1u8, 2, 3][..]), (tag(b"name"), &[0u8; 8][..])]);
        let font = parse(&data).unwrap();
        let Some(Table::Opaque(raw)) = font.table(tag(b"abcd")) else {
            panic!("expected opaque table");
        };
        assert_eq!(raw.as_bytes(), &[1, 2, 3]);
        assert!(font.table(tag(b"name")).unwrap().is_opaque());
    }

    #[test]
    fn unsorted_tables() {
        let maxp = test_data::maxp(10);
        let data = build_font(&[(tag(b"maxp"), maxp.as_slice()), (tag(b"head"), &[0u8; 4][..])]);
        assert_eq!(
            parse(&data).err(),
            Some(FormatError::UnsortedTables {
                prev: tag(b"maxp"),
                tag: tag(b"head"),
            })
        );
        // repeated tags are not strictly ascending
        let data = build_font(&[(tag(b"maxp"), maxp.as_slice()), (tag(b"maxp"), maxp.as_slice())]);
        assert!(matches!(
            parse(&data),
            Err(FormatError::UnsortedTables { .. })
        ));
    }

    #[test]
    fn bad_sfnt_version() {
        let data = build_font_with_version(0x1234_5678, &[]);
        assert_eq!(parse(&data).err(), Some(FormatError::InvalidSfnt(0x1234_5678)));
        let data = build_font_with_version(CFF_SFNT_VERSION, &[]);
        assert!(parse(&data).is_ok());
    }

    #[test]
    fn table_count_exceeds_data() {
        let mut data = build_font(&[(tag(b"abcd"), &[0u8; 4][..])]);
        // numTables
        data[4..6].copy_from_slice(&500u16.to_be_bytes());
        assert_eq!(
            parse(&data).err(),
            Some(FormatError::Read(ReadError::OutOfBounds))
        );
        assert!(parse(&data[..10]).is_err());
        assert!(parse(&[]).is_err());
    }

    #[test]
    fn table_out_of_bounds() {
        let mut data = build_font(&[(tag(b"abcd"), &[0u8; 4][..])]);
        // the record's length field
        data[24..28].copy_from_slice(&64u32.to_be_bytes());
        assert_eq!(
            parse(&data).err(),
            Some(FormatError::TableOutOfBounds { tag: tag(b"abcd") })
        );
    }

    #[test]
    fn misaligned_table() {
        let mut data = build_font(&[(tag(b"abcd"), &[0u8; 4][..])]);
        // the record's offset field; the table starts at 28
        data[20..24].copy_from_slice(&29u32.to_be_bytes());
        assert_eq!(
            parse(&data).err(),
            Some(FormatError::MisalignedTable {
                tag: tag(b"abcd"),
                offset: 29
            })
        );
    }

    #[test]
    fn malformed_optional_table_is_kept() {
        let _ = env_logger::builder().is_test(true).try_init();
        let maxp = test_data::maxp(10);
        // a GSUB with major version 2
        let gsub = [0u8, 2, 0, 0, 0, 10, 0, 10, 0, 10];
        let data = build_font(&[(tag(b"GSUB"), &gsub[..]), (tag(b"maxp"), maxp.as_slice())]);
        let font = parse(&data).unwrap();
        assert!(font.table(tag(b"GSUB")).unwrap().is_opaque());
        assert!(font.gsub().is_none());
        assert_eq!(font.maxp().unwrap().num_glyphs(), 10);
    }

    #[test]
    fn malformed_required_table_fails() {
        let truncated = [0u8, 1, 0, 0];
        let data = build_font(&[(tag(b"head"), &truncated[..])]);
        assert!(matches!(
            parse(&data),
            Err(FormatError::Table { tag, .. }) if tag == head::TAG
        ));
    }

    #[test]
    fn dependent_tables_without_dependencies() {
        let _ = env_logger::builder().is_test(true).try_init();
        let hmtx = test_data::hmtx(2, 4);
        let maxp = test_data::maxp(4);
        let data = build_font(&[(tag(b"hmtx"), hmtx.as_slice()), (tag(b"maxp"), maxp.as_slice())]);
        let font = parse(&data).unwrap();
        assert!(font.table(tag(b"hmtx")).unwrap().is_opaque());
    }
}
