//! The [cmap](https://docs.microsoft.com/en-us/typography/opentype/spec/cmap) table

use std::ops::Range;

use bytemuck::AnyBitPattern;
use types::{BigEndian, FixedSize, GlyphId, Offset32, Tag};

use crate::{FontData, FontRead, ReadError, ResolveOffset};

/// 'cmap'
pub const TAG: Tag = Tag::new(b"cmap");

/// The largest number of segments accepted in a format 4 subtable.
pub const MAX_CMAP_SEGMENTS: usize = 20_000;

// (platform, encoding, format) combinations we know how to use
const SUPPORTED_SUBTABLES: [(u16, u16, u16); 4] = [(0, 3, 4), (0, 4, 12), (3, 1, 4), (3, 10, 12)];

/// [cmap](https://docs.microsoft.com/en-us/typography/opentype/spec/cmap)
///
/// The subtable used for mapping is chosen when the table is read: among
/// the records whose platform, encoding and format are supported, the one
/// with the widest encoding wins, and ties are broken in favour of the
/// earliest record.
#[derive(Clone, Copy, Debug)]
pub struct Cmap<'a> {
    data: FontData<'a>,
    version: u16,
    encoding_records: &'a [EncodingRecord],
    selected: Option<(usize, CmapSubtable<'a>)>,
}

impl<'a> FontRead<'a> for Cmap<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let version = cursor.read()?;
        let num_tables: u16 = cursor.read()?;
        let encoding_records: &[EncodingRecord] = cursor.read_array(num_tables as usize)?;
        let mut selected: Option<(usize, CmapSubtable)> = None;
        for (ix, record) in encoding_records.iter().enumerate() {
            let Some(subtable_data) = data.split_off(record.subtable_offset().to_u32() as usize)
            else {
                log::debug!("cmap subtable {ix} is out of bounds");
                continue;
            };
            let Ok(format) = subtable_data.read_at::<u16>(0) else {
                continue;
            };
            let key = (record.platform_id(), record.encoding_id(), format);
            if !SUPPORTED_SUBTABLES.contains(&key) {
                log::debug!(
                    "ignoring cmap subtable format {format} (platform {}, encoding {})",
                    key.0,
                    key.1
                );
                continue;
            }
            let subtable = match CmapSubtable::read(subtable_data) {
                Ok(subtable) => subtable,
                Err(e) => {
                    log::debug!("skipping malformed cmap subtable {ix}: {e}");
                    continue;
                }
            };
            let is_wider = selected
                .as_ref()
                .map(|(_, current)| subtable.encoding_width() > current.encoding_width())
                .unwrap_or(true);
            if is_wider {
                selected = Some((ix, subtable));
            }
        }
        Ok(Cmap {
            data,
            version,
            encoding_records,
            selected,
        })
    }
}

impl<'a> Cmap<'a> {
    /// Table version number (0).
    pub fn version(&self) -> u16 {
        self.version
    }

    pub fn num_tables(&self) -> u16 {
        self.encoding_records.len() as u16
    }

    pub fn encoding_records(&self) -> &'a [EncodingRecord] {
        self.encoding_records
    }

    /// The subtable used for mapping, if any record was usable.
    pub fn subtable(&self) -> Option<CmapSubtable<'a>> {
        self.selected.map(|(_, subtable)| subtable)
    }

    /// The index of the encoding record of the selected subtable.
    pub fn selected_record_index(&self) -> Option<usize> {
        self.selected.map(|(ix, _)| ix)
    }

    /// Map a codepoint to a nominal glyph identifier
    ///
    /// Returns `None` if the codepoint is not covered by the selected
    /// subtable, or if no subtable was usable.
    pub fn map_codepoint(&self, codepoint: impl Into<u32>) -> Option<GlyphId> {
        let codepoint = codepoint.into();
        match self.subtable()? {
            CmapSubtable::Format4(format4) => format4.map_codepoint(codepoint),
            CmapSubtable::Format12(format12) => format12.map_codepoint(codepoint),
        }
    }

    pub fn offset_data(&self) -> FontData<'a> {
        self.data
    }
}

/// [Encoding Record](https://docs.microsoft.com/en-us/typography/opentype/spec/cmap#encoding-records-and-encodings)
#[derive(Clone, Copy, Debug, AnyBitPattern)]
#[repr(C)]
#[repr(packed)]
pub struct EncodingRecord {
    pub platform_id: BigEndian<u16>,
    pub encoding_id: BigEndian<u16>,
    pub subtable_offset: BigEndian<Offset32>,
}

impl EncodingRecord {
    /// Platform ID.
    pub fn platform_id(&self) -> u16 {
        self.platform_id.get()
    }

    /// Platform-specific encoding ID.
    pub fn encoding_id(&self) -> u16 {
        self.encoding_id.get()
    }

    /// Byte offset from beginning of the cmap table to the subtable for this
    /// encoding.
    pub fn subtable_offset(&self) -> Offset32 {
        self.subtable_offset.get()
    }

    /// Attempt to resolve the subtable for this record.
    ///
    /// Unsupported formats are an error.
    pub fn subtable<'a>(&self, data: FontData<'a>) -> Result<CmapSubtable<'a>, ReadError> {
        self.subtable_offset().resolve(data)
    }
}

impl FixedSize for EncodingRecord {
    const RAW_BYTE_LEN: usize = u16::RAW_BYTE_LEN + u16::RAW_BYTE_LEN + Offset32::RAW_BYTE_LEN;
}

/// The cmap subtable formats that can be used for mapping.
#[derive(Clone, Copy, Debug)]
pub enum CmapSubtable<'a> {
    Format4(Cmap4<'a>),
    Format12(Cmap12<'a>),
}

impl<'a> FontRead<'a> for CmapSubtable<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let format: u16 = data.read_at(0)?;
        match format {
            4 => Cmap4::read(data).map(Self::Format4),
            12 => Cmap12::read(data).map(Self::Format12),
            other => Err(ReadError::InvalidFormat(other)),
        }
    }
}

impl CmapSubtable<'_> {
    pub fn format(&self) -> u16 {
        match self {
            CmapSubtable::Format4(_) => 4,
            CmapSubtable::Format12(_) => 12,
        }
    }

    /// The number of bits in the codepoints this subtable can map.
    pub fn encoding_width(&self) -> u32 {
        match self {
            CmapSubtable::Format4(_) => 16,
            CmapSubtable::Format12(_) => 32,
        }
    }
}

/// [cmap Format 4](https://docs.microsoft.com/en-us/typography/opentype/spec/cmap#format-4-segment-mapping-to-delta-values): Segment mapping to delta values
#[derive(Clone, Copy, Debug)]
pub struct Cmap4<'a> {
    language: u16,
    end_code: &'a [BigEndian<u16>],
    start_code: &'a [BigEndian<u16>],
    id_delta: &'a [BigEndian<i16>],
    id_range_offsets: &'a [BigEndian<u16>],
    glyph_id_array: &'a [BigEndian<u16>],
}

impl<'a> FontRead<'a> for Cmap4<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        cursor.advance::<u16>(); // format
        cursor.advance::<u16>(); // length
        let language = cursor.read()?;
        let seg_count_x2: u16 = cursor.read()?;
        if seg_count_x2 % 2 != 0 {
            return Err(ReadError::MalformedData("odd segCountX2 in cmap format 4"));
        }
        let seg_count = seg_count_x2 as usize / 2;
        if seg_count > MAX_CMAP_SEGMENTS {
            return Err(ReadError::MalformedData("too many cmap format 4 segments"));
        }
        // searchRange, entrySelector, rangeShift
        cursor.advance_by(6);
        let end_code = cursor.read_array(seg_count)?;
        cursor.advance::<u16>(); // reservedPad
        let start_code = cursor.read_array(seg_count)?;
        let id_delta = cursor.read_array(seg_count)?;
        let id_range_offsets = cursor.read_array(seg_count)?;
        let n_glyph_ids = cursor.remaining_bytes() / u16::RAW_BYTE_LEN;
        let glyph_id_array = cursor.read_array(n_glyph_ids)?;
        Ok(Cmap4 {
            language,
            end_code,
            start_code,
            id_delta,
            id_range_offsets,
            glyph_id_array,
        })
    }
}

impl<'a> Cmap4<'a> {
    pub fn language(&self) -> u16 {
        self.language
    }

    /// The number of segments.
    pub fn seg_count(&self) -> usize {
        self.end_code.len()
    }

    /// End characterCode for each segment, last=0xFFFF.
    pub fn end_code(&self) -> &'a [BigEndian<u16>] {
        self.end_code
    }

    /// Start character code for each segment.
    pub fn start_code(&self) -> &'a [BigEndian<u16>] {
        self.start_code
    }

    /// Delta for all character codes in segment.
    pub fn id_delta(&self) -> &'a [BigEndian<i16>] {
        self.id_delta
    }

    /// Offsets into glyphIdArray or 0
    pub fn id_range_offsets(&self) -> &'a [BigEndian<u16>] {
        self.id_range_offsets
    }

    /// Glyph index array (arbitrary length)
    pub fn glyph_id_array(&self) -> &'a [BigEndian<u16>] {
        self.glyph_id_array
    }

    /// Maps a codepoint to a nominal glyph identifier.
    pub fn map_codepoint(&self, codepoint: impl Into<u32>) -> Option<GlyphId> {
        let codepoint = u16::try_from(codepoint.into()).ok()?;
        let mut lo = 0;
        let mut hi = self.seg_count();
        while lo < hi {
            let i = (lo + hi) / 2;
            let start_code = self.start_code.get(i)?.get();
            if codepoint < start_code {
                hi = i;
            } else if codepoint > self.end_code.get(i)?.get() {
                lo = i + 1;
            } else {
                return self
                    .lookup_glyph_id(codepoint, i, start_code)
                    .filter(|gid| *gid != GlyphId::NOTDEF);
            }
        }
        None
    }

    /// Returns an iterator over all (codepoint, glyph identifier) pairs
    /// in the subtable.
    pub fn iter(&self) -> Cmap4Iter<'a> {
        Cmap4Iter::new(*self)
    }

    /// Does the final phase of glyph id lookup.
    ///
    /// Shared between Self::map_codepoint and Cmap4Iter.
    fn lookup_glyph_id(&self, codepoint: u16, index: usize, start_code: u16) -> Option<GlyphId> {
        let delta = self.id_delta.get(index)?.get();
        let range_offset = self.id_range_offsets.get(index)?.get() as usize;
        let gid = GlyphId::new(codepoint);
        if range_offset == 0 {
            return Some(gid.wrapping_add_delta(delta));
        }
        // the range offset is relative to its own position in the
        // idRangeOffset array, which directly precedes glyphIdArray
        let offset = (range_offset / 2 + (codepoint - start_code) as usize + index)
            .checked_sub(self.seg_count())?;
        let gid = GlyphId::new(self.glyph_id_array.get(offset)?.get());
        if gid == GlyphId::NOTDEF {
            Some(gid)
        } else {
            Some(gid.wrapping_add_delta(delta))
        }
    }

    /// Returns the [start_code, end_code] range at the given index.
    fn code_range(&self, index: usize) -> Option<Range<u32>> {
        // Extend to u32 to ensure we don't overflow on the end + 1 bound
        // below.
        let start = self.start_code.get(index)?.get() as u32;
        let end = self.end_code.get(index)?.get() as u32;
        // Use end + 1 here because the range in the table is inclusive
        Some(start..end + 1)
    }
}

/// Iterator over all (codepoint, glyph identifier) pairs in
/// the subtable.
#[derive(Clone)]
pub struct Cmap4Iter<'a> {
    subtable: Cmap4<'a>,
    cur_range: Range<u32>,
    cur_start_code: u16,
    cur_range_ix: usize,
}

impl<'a> Cmap4Iter<'a> {
    fn new(subtable: Cmap4<'a>) -> Self {
        let cur_range = subtable.code_range(0).unwrap_or_default();
        let cur_start_code = cur_range.start as u16;
        Self {
            subtable,
            cur_range,
            cur_start_code,
            cur_range_ix: 0,
        }
    }
}

impl Iterator for Cmap4Iter<'_> {
    type Item = (u32, GlyphId);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(codepoint) = self.cur_range.next() {
                let Some(glyph_id) = self.subtable.lookup_glyph_id(
                    codepoint as u16,
                    self.cur_range_ix,
                    self.cur_start_code,
                ) else {
                    continue;
                };
                // The table might explicitly map some codepoints to 0. Avoid
                // returning those here.
                if glyph_id == GlyphId::NOTDEF {
                    continue;
                }
                return Some((codepoint, glyph_id));
            } else {
                self.cur_range_ix += 1;
                self.cur_range = self.subtable.code_range(self.cur_range_ix)?;
                self.cur_start_code = self.cur_range.start as u16;
            }
        }
    }
}

/// [cmap Format 12](https://docs.microsoft.com/en-us/typography/opentype/spec/cmap#format-12-segmented-coverage): Segmented coverage
#[derive(Clone, Copy, Debug)]
pub struct Cmap12<'a> {
    language: u32,
    groups: &'a [SequentialMapGroup],
}

impl<'a> FontRead<'a> for Cmap12<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        cursor.advance::<u16>(); // format
        cursor.advance::<u16>(); // reserved
        cursor.advance::<u32>(); // length
        let language = cursor.read()?;
        let num_groups: u32 = cursor.read()?;
        let groups = cursor.read_array(num_groups as usize)?;
        Ok(Cmap12 { language, groups })
    }
}

impl<'a> Cmap12<'a> {
    pub fn language(&self) -> u32 {
        self.language
    }

    /// Array of SequentialMapGroup records.
    pub fn groups(&self) -> &'a [SequentialMapGroup] {
        self.groups
    }

    /// Maps a codepoint to a nominal glyph identifier.
    pub fn map_codepoint(&self, codepoint: impl Into<u32>) -> Option<GlyphId> {
        let codepoint = codepoint.into();
        let ix = self
            .groups
            .binary_search_by(|group| {
                if group.end_char_code() < codepoint {
                    std::cmp::Ordering::Less
                } else if group.start_char_code() > codepoint {
                    std::cmp::Ordering::Greater
                } else {
                    std::cmp::Ordering::Equal
                }
            })
            .ok()?;
        let group = self.groups.get(ix)?;
        Some(Self::lookup_glyph_id(
            codepoint,
            group.start_char_code(),
            group.start_glyph_id(),
        ))
        .filter(|gid| *gid != GlyphId::NOTDEF)
    }

    /// Returns an iterator over all (codepoint, glyph identifier) pairs
    /// in the subtable.
    pub fn iter(&self) -> impl Iterator<Item = (u32, GlyphId)> + 'a {
        self.groups
            .iter()
            .flat_map(|group| {
                let start = group.start_char_code();
                let start_glyph_id = group.start_glyph_id();
                // Use + 1 here because the group range is inclusive
                (start..group.end_char_code().saturating_add(1)).map(move |codepoint| {
                    (
                        codepoint,
                        Self::lookup_glyph_id(codepoint, start, start_glyph_id),
                    )
                })
            })
            .filter(|(_, gid)| *gid != GlyphId::NOTDEF)
    }

    /// Glyph ids that do not fit in 16 bits map to `.notdef`.
    fn lookup_glyph_id(codepoint: u32, start_char_code: u32, start_glyph_id: u32) -> GlyphId {
        start_glyph_id
            .checked_add(codepoint.wrapping_sub(start_char_code))
            .and_then(|gid| u16::try_from(gid).ok())
            .map(GlyphId::new)
            .unwrap_or(GlyphId::NOTDEF)
    }
}

/// Used in [Cmap12]
#[derive(Clone, Copy, Debug, AnyBitPattern)]
#[repr(C)]
#[repr(packed)]
pub struct SequentialMapGroup {
    pub start_char_code: BigEndian<u32>,
    pub end_char_code: BigEndian<u32>,
    pub start_glyph_id: BigEndian<u32>,
}

impl SequentialMapGroup {
    /// First character code in this group
    pub fn start_char_code(&self) -> u32 {
        self.start_char_code.get()
    }

    /// Last character code in this group
    pub fn end_char_code(&self) -> u32 {
        self.end_char_code.get()
    }

    /// Glyph index corresponding to the starting character code
    pub fn start_glyph_id(&self) -> u32 {
        self.start_glyph_id.get()
    }
}

impl FixedSize for SequentialMapGroup {
    const RAW_BYTE_LEN: usize = u32::RAW_BYTE_LEN * 3;
}
