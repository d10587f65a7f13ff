//! OpenType Layout common table formats

mod feature;
mod lookup_flag;
mod script;

#[cfg(test)]
mod spec_tests;

pub use lookup_flag::LookupFlag;
pub use script::SelectedScript;

use std::ops::Deref;

use bytemuck::AnyBitPattern;
use types::{BigEndian, FixedSize, GlyphId, MajorMinor, Offset16, Offset32, Tag};

use crate::{read::Format, FontData, FontRead, ReadError, ResolveOffset};

/// The header shared by the [GSUB] and [GPOS] tables.
///
/// [GSUB]: https://learn.microsoft.com/en-us/typography/opentype/spec/gsub#gsub-header
/// [GPOS]: https://learn.microsoft.com/en-us/typography/opentype/spec/gpos#gpos-header
#[derive(Clone, Copy, Debug)]
pub struct LayoutTable<'a> {
    data: FontData<'a>,
    version: MajorMinor,
    script_list_offset: Offset16,
    feature_list_offset: Offset16,
    lookup_list_offset: Offset16,
    feature_variations_offset: Option<Offset32>,
}

impl<'a> FontRead<'a> for LayoutTable<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let version: MajorMinor = cursor.read()?;
        if version.major != 1 {
            return Err(ReadError::InvalidFormat(version.major));
        }
        let script_list_offset = cursor.read()?;
        let feature_list_offset = cursor.read()?;
        let lookup_list_offset = cursor.read()?;
        let feature_variations_offset = if version.compatible(MajorMinor::VERSION_1_1) {
            Some(cursor.read()?)
        } else {
            None
        };
        cursor.finish()?;
        Ok(LayoutTable {
            data,
            version,
            script_list_offset,
            feature_list_offset,
            lookup_list_offset,
            feature_variations_offset,
        })
    }
}

impl<'a> LayoutTable<'a> {
    /// The major/minor version of the table (1.0 or 1.1).
    pub fn version(&self) -> MajorMinor {
        self.version
    }

    pub fn script_list_offset(&self) -> Offset16 {
        self.script_list_offset
    }

    pub fn feature_list_offset(&self) -> Offset16 {
        self.feature_list_offset
    }

    pub fn lookup_list_offset(&self) -> Offset16 {
        self.lookup_list_offset
    }

    /// Offset to the FeatureVariations table, present in version 1.1.
    ///
    /// Feature variations are not interpreted.
    pub fn feature_variations_offset(&self) -> Option<Offset32> {
        self.feature_variations_offset
    }

    /// Attempt to resolve [`script_list_offset`][Self::script_list_offset].
    pub fn script_list(&self) -> Result<ScriptList<'a>, ReadError> {
        self.script_list_offset.resolve(self.data)
    }

    /// Attempt to resolve [`feature_list_offset`][Self::feature_list_offset].
    pub fn feature_list(&self) -> Result<FeatureList<'a>, ReadError> {
        self.feature_list_offset.resolve(self.data)
    }

    /// Attempt to resolve [`lookup_list_offset`][Self::lookup_list_offset].
    pub fn lookup_list(&self) -> Result<LookupList<'a>, ReadError> {
        self.lookup_list_offset.resolve(self.data)
    }

    /// The raw table data.
    pub fn offset_data(&self) -> FontData<'a> {
        self.data
    }
}

/// A table and the tag of the record that pointed to it.
#[derive(Clone, Debug)]
pub struct TaggedElement<T> {
    pub tag: Tag,
    pub element: T,
}

impl<T> TaggedElement<T> {
    pub fn new(tag: Tag, element: T) -> Self {
        Self { tag, element }
    }
}

impl<T> Deref for TaggedElement<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.element
    }
}

/// A record of a tag and an offset, as used by the script, feature and
/// language system lists.
#[derive(Clone, Copy, Debug, AnyBitPattern)]
#[repr(C)]
#[repr(packed)]
pub struct TagRecord {
    pub tag: BigEndian<Tag>,
    pub offset: BigEndian<Offset16>,
}

impl TagRecord {
    pub fn tag(&self) -> Tag {
        self.tag.get()
    }

    /// Offset from the beginning of the list containing this record.
    pub fn offset(&self) -> Offset16 {
        self.offset.get()
    }
}

impl FixedSize for TagRecord {
    const RAW_BYTE_LEN: usize = Tag::RAW_BYTE_LEN + Offset16::RAW_BYTE_LEN;
}

/// A [ScriptRecord](https://learn.microsoft.com/en-us/typography/opentype/spec/chapter2#script-list-table-and-script-record)
pub type ScriptRecord = TagRecord;
/// A [FeatureRecord](https://learn.microsoft.com/en-us/typography/opentype/spec/chapter2#feature-list-table)
pub type FeatureRecord = TagRecord;
/// A [LangSysRecord](https://learn.microsoft.com/en-us/typography/opentype/spec/chapter2#script-table-and-language-system-record)
pub type LangSysRecord = TagRecord;

// Tags in these lists are not guaranteed to be unique, so we scan and take
// the first match.
fn first_index_for_tag(records: &[TagRecord], tag: Tag) -> Option<u16> {
    records
        .iter()
        .position(|rec| rec.tag() == tag)
        .and_then(|ix| u16::try_from(ix).ok())
}

fn read_tag_records<'a>(data: FontData<'a>) -> Result<&'a [TagRecord], ReadError> {
    let mut cursor = data.cursor();
    let count: u16 = cursor.read()?;
    cursor.read_array(count as usize)
}

/// [Script List Table](https://learn.microsoft.com/en-us/typography/opentype/spec/chapter2#script-list-table-and-script-record)
#[derive(Clone, Copy, Debug)]
pub struct ScriptList<'a> {
    data: FontData<'a>,
    script_records: &'a [ScriptRecord],
}

impl<'a> FontRead<'a> for ScriptList<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let script_records = read_tag_records(data)?;
        Ok(ScriptList {
            data,
            script_records,
        })
    }
}

impl<'a> ScriptList<'a> {
    /// Number of ScriptRecords
    pub fn script_count(&self) -> u16 {
        self.script_records.len() as u16
    }

    /// Array of ScriptRecords, listed alphabetically by script tag
    pub fn script_records(&self) -> &'a [ScriptRecord] {
        self.script_records
    }

    /// Returns the tag and script at the given index.
    pub fn get(&self, index: u16) -> Result<TaggedElement<Script<'a>>, ReadError> {
        let record = self
            .script_records
            .get(index as usize)
            .ok_or(ReadError::OutOfBounds)?;
        Ok(TaggedElement::new(
            record.tag(),
            record.offset().resolve(self.data)?,
        ))
    }

    /// Returns the first script with the given tag, if present.
    pub fn script(&self, tag: Tag) -> Option<Result<Script<'a>, ReadError>> {
        let index = self.index_for_tag(tag)?;
        Some(self.get(index).map(|script| script.element))
    }

    pub fn offset_data(&self) -> FontData<'a> {
        self.data
    }
}

/// [Script Table](https://learn.microsoft.com/en-us/typography/opentype/spec/chapter2#script-table-and-language-system-record)
#[derive(Clone, Copy, Debug)]
pub struct Script<'a> {
    data: FontData<'a>,
    default_lang_sys_offset: Offset16,
    lang_sys_records: &'a [LangSysRecord],
}

impl<'a> FontRead<'a> for Script<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let default_lang_sys_offset = data.read_at(0)?;
        let lang_sys_records = read_tag_records(data.split_off(2).ok_or(ReadError::OutOfBounds)?)?;
        Ok(Script {
            data,
            default_lang_sys_offset,
            lang_sys_records,
        })
    }
}

impl<'a> Script<'a> {
    /// Offset to default LangSys table, from beginning of Script table — may be NULL
    pub fn default_lang_sys_offset(&self) -> Offset16 {
        self.default_lang_sys_offset
    }

    /// The default language system, if present.
    pub fn default_lang_sys(&self) -> Option<Result<LangSys<'a>, ReadError>> {
        self.default_lang_sys_offset.resolve_nullable(self.data)
    }

    /// Number of LangSysRecords for this script — excluding the default LangSys
    pub fn lang_sys_count(&self) -> u16 {
        self.lang_sys_records.len() as u16
    }

    /// Array of LangSysRecords, listed alphabetically by LangSys tag
    pub fn lang_sys_records(&self) -> &'a [LangSysRecord] {
        self.lang_sys_records
    }

    pub fn offset_data(&self) -> FontData<'a> {
        self.data
    }
}

/// [Language System Table](https://learn.microsoft.com/en-us/typography/opentype/spec/chapter2#language-system-table)
#[derive(Clone, Copy, Debug)]
pub struct LangSys<'a> {
    required_feature_index: u16,
    feature_indices: &'a [BigEndian<u16>],
}

impl<'a> FontRead<'a> for LangSys<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        // lookupOrderOffset, reserved
        cursor.advance::<u16>();
        let required_feature_index = cursor.read()?;
        let count: u16 = cursor.read()?;
        let feature_indices = cursor.read_array(count as usize)?;
        Ok(LangSys {
            required_feature_index,
            feature_indices,
        })
    }
}

impl<'a> LangSys<'a> {
    /// The sentinel value of the required feature index, meaning that no
    /// feature is required.
    pub const NO_REQUIRED_FEATURE: u16 = 0xFFFF;

    /// Index of a feature required for this language system, if any.
    pub fn required_feature_index(&self) -> Option<u16> {
        (self.required_feature_index != Self::NO_REQUIRED_FEATURE)
            .then_some(self.required_feature_index)
    }

    /// Number of feature index values for this language system — excludes the
    /// required feature
    pub fn feature_index_count(&self) -> u16 {
        self.feature_indices.len() as u16
    }

    /// Array of indices into the FeatureList, in arbitrary order
    pub fn feature_indices(&self) -> &'a [BigEndian<u16>] {
        self.feature_indices
    }

    /// All of the feature indices of this language system, with the required
    /// feature (if any) first.
    pub fn all_feature_indices(&self) -> impl Iterator<Item = u16> + 'a {
        self.required_feature_index()
            .into_iter()
            .chain(self.feature_indices.iter().map(|ix| ix.get()))
    }
}

/// [Feature List Table](https://learn.microsoft.com/en-us/typography/opentype/spec/chapter2#feature-list-table)
#[derive(Clone, Copy, Debug)]
pub struct FeatureList<'a> {
    data: FontData<'a>,
    feature_records: &'a [FeatureRecord],
}

impl<'a> FontRead<'a> for FeatureList<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let feature_records = read_tag_records(data)?;
        Ok(FeatureList {
            data,
            feature_records,
        })
    }
}

impl<'a> FeatureList<'a> {
    /// Number of FeatureRecords in this table
    pub fn feature_count(&self) -> u16 {
        self.feature_records.len() as u16
    }

    /// Array of FeatureRecords — zero-based (first feature has FeatureIndex = 0), listed alphabetically by feature tag
    pub fn feature_records(&self) -> &'a [FeatureRecord] {
        self.feature_records
    }

    pub fn offset_data(&self) -> FontData<'a> {
        self.data
    }
}

/// [Feature Table](https://learn.microsoft.com/en-us/typography/opentype/spec/chapter2#feature-table)
#[derive(Clone, Copy, Debug)]
pub struct Feature<'a> {
    feature_params_offset: Offset16,
    lookup_list_indices: &'a [BigEndian<u16>],
}

impl<'a> FontRead<'a> for Feature<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let feature_params_offset = cursor.read()?;
        let count: u16 = cursor.read()?;
        let lookup_list_indices = cursor.read_array(count as usize)?;
        Ok(Feature {
            feature_params_offset,
            lookup_list_indices,
        })
    }
}

impl<'a> Feature<'a> {
    /// Offset from start of Feature table to FeatureParams table, if defined
    /// for the feature and present, else NULL
    pub fn feature_params_offset(&self) -> Offset16 {
        self.feature_params_offset
    }

    /// Number of LookupList indices for this feature
    pub fn lookup_index_count(&self) -> u16 {
        self.lookup_list_indices.len() as u16
    }

    /// Array of indices into the LookupList — zero-based (first lookup is
    /// LookupListIndex = 0)
    pub fn lookup_list_indices(&self) -> &'a [BigEndian<u16>] {
        self.lookup_list_indices
    }
}

/// [Lookup List Table](https://learn.microsoft.com/en-us/typography/opentype/spec/chapter2#lookup-list-table)
#[derive(Clone, Copy, Debug)]
pub struct LookupList<'a> {
    data: FontData<'a>,
    lookup_offsets: &'a [BigEndian<Offset16>],
}

impl<'a> FontRead<'a> for LookupList<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let count: u16 = cursor.read()?;
        let lookup_offsets = cursor.read_array(count as usize)?;
        Ok(LookupList {
            data,
            lookup_offsets,
        })
    }
}

impl<'a> LookupList<'a> {
    /// Number of lookups in this table
    pub fn lookup_count(&self) -> u16 {
        self.lookup_offsets.len() as u16
    }

    /// Array of offsets to Lookup tables, from beginning of LookupList
    pub fn lookup_offsets(&self) -> &'a [BigEndian<Offset16>] {
        self.lookup_offsets
    }

    /// Parse the lookup at `index`.
    ///
    /// Lookups are parsed on demand, every time this is called.
    pub fn lookup(&self, index: u16) -> Result<Lookup<'a>, ReadError> {
        self.lookup_offsets
            .get(index as usize)
            .ok_or(ReadError::OutOfBounds)?
            .get()
            .resolve(self.data)
    }

    /// Iterate over all the lookups in the list.
    pub fn lookups(&self) -> impl Iterator<Item = Result<Lookup<'a>, ReadError>> + 'a {
        let data = self.data;
        self.lookup_offsets
            .iter()
            .map(move |offset| offset.get().resolve(data))
    }
}

/// [Lookup Table](https://learn.microsoft.com/en-us/typography/opentype/spec/chapter2#lookup-table)
#[derive(Clone, Copy, Debug)]
pub struct Lookup<'a> {
    data: FontData<'a>,
    lookup_type: u16,
    lookup_flag: LookupFlag,
    subtable_offsets: &'a [BigEndian<Offset16>],
    mark_filtering_set: Option<u16>,
}

impl<'a> FontRead<'a> for Lookup<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let lookup_type = cursor.read()?;
        let lookup_flag: LookupFlag = cursor.read()?;
        let count: u16 = cursor.read()?;
        let subtable_offsets = cursor.read_array(count as usize)?;
        let mark_filtering_set = if lookup_flag.use_mark_filtering_set() {
            Some(cursor.read()?)
        } else {
            None
        };
        Ok(Lookup {
            data,
            lookup_type,
            lookup_flag,
            subtable_offsets,
            mark_filtering_set,
        })
    }
}

impl<'a> Lookup<'a> {
    /// Different enumerations for GSUB and GPOS
    pub fn lookup_type(&self) -> u16 {
        self.lookup_type
    }

    /// Lookup qualifiers
    pub fn lookup_flag(&self) -> LookupFlag {
        self.lookup_flag
    }

    /// Number of subtables for this lookup
    pub fn subtable_count(&self) -> u16 {
        self.subtable_offsets.len() as u16
    }

    /// Array of offsets to lookup subtables, from beginning of Lookup table
    pub fn subtable_offsets(&self) -> &'a [BigEndian<Offset16>] {
        self.subtable_offsets
    }

    /// Index (base 0) into GDEF mark glyph sets structure, present only if
    /// the `USE_MARK_FILTERING_SET` flag is set.
    pub fn mark_filtering_set(&self) -> Option<u16> {
        self.mark_filtering_set
    }

    /// The data for the subtable at `index`.
    pub fn subtable_data(&self, index: usize) -> Result<FontData<'a>, ReadError> {
        self.subtable_offsets
            .get(index)
            .ok_or(ReadError::OutOfBounds)?
            .get()
            .resolve(self.data)
    }

    pub fn offset_data(&self) -> FontData<'a> {
        self.data
    }
}

/// A [Coverage Table](https://learn.microsoft.com/en-us/typography/opentype/spec/chapter2#coverage-table)
#[derive(Clone, Copy, Debug)]
pub enum CoverageTable<'a> {
    Format1(CoverageFormat1<'a>),
    Format2(CoverageFormat2<'a>),
}

impl<'a> FontRead<'a> for CoverageTable<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let format: u16 = data.read_at(0)?;
        match format {
            CoverageFormat1::FORMAT => CoverageFormat1::read(data).map(Self::Format1),
            CoverageFormat2::FORMAT => CoverageFormat2::read(data).map(Self::Format2),
            other => Err(ReadError::InvalidFormat(other)),
        }
    }
}

impl<'a> CoverageTable<'a> {
    /// If this glyph is in the coverage table, returns its index
    pub fn get(&self, gid: GlyphId) -> Option<u16> {
        match self {
            CoverageTable::Format1(sub) => sub.get(gid),
            CoverageTable::Format2(sub) => sub.get(gid),
        }
    }

    /// Iterate over the covered glyphs, in coverage index order.
    pub fn iter(&self) -> impl Iterator<Item = GlyphId> + 'a {
        // all one expression so that we have a single return type
        let (iter1, iter2) = match self {
            CoverageTable::Format1(t) => (Some(t.glyph_array.iter().map(|g| g.get())), None),
            CoverageTable::Format2(t) => {
                let iter = t.range_records.iter().flat_map(RangeRecord::iter);
                (None, Some(iter))
            }
        };

        iter1
            .into_iter()
            .flatten()
            .chain(iter2.into_iter().flatten())
    }

    /// The number of glyphs covered by this table.
    pub fn len(&self) -> usize {
        match self {
            CoverageTable::Format1(t) => t.glyph_array.len(),
            CoverageTable::Format2(t) => t.range_records.iter().map(RangeRecord::len).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// [Coverage Format 1](https://learn.microsoft.com/en-us/typography/opentype/spec/chapter2#coverage-format-1)
#[derive(Clone, Copy, Debug)]
pub struct CoverageFormat1<'a> {
    glyph_array: &'a [BigEndian<GlyphId>],
}

impl Format<u16> for CoverageFormat1<'_> {
    const FORMAT: u16 = 1;
}

impl<'a> FontRead<'a> for CoverageFormat1<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        cursor.advance::<u16>();
        let count: u16 = cursor.read()?;
        let glyph_array = cursor.read_array(count as usize)?;
        Ok(CoverageFormat1 { glyph_array })
    }
}

impl<'a> CoverageFormat1<'a> {
    /// Array of glyph IDs — in numerical order
    pub fn glyph_array(&self) -> &'a [BigEndian<GlyphId>] {
        self.glyph_array
    }

    /// If this glyph is in the coverage table, returns its index
    pub fn get(&self, gid: GlyphId) -> Option<u16> {
        self.glyph_array
            .binary_search_by(|probe| probe.get().cmp(&gid))
            .ok()
            .map(|ix| ix as u16)
    }
}

/// [Coverage Format 2](https://learn.microsoft.com/en-us/typography/opentype/spec/chapter2#coverage-format-2)
#[derive(Clone, Copy, Debug)]
pub struct CoverageFormat2<'a> {
    range_records: &'a [RangeRecord],
}

impl Format<u16> for CoverageFormat2<'_> {
    const FORMAT: u16 = 2;
}

impl<'a> FontRead<'a> for CoverageFormat2<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        cursor.advance::<u16>();
        let count: u16 = cursor.read()?;
        let range_records = cursor.read_array(count as usize)?;
        Ok(CoverageFormat2 { range_records })
    }
}

impl<'a> CoverageFormat2<'a> {
    /// Array of glyph ranges — ordered by startGlyphID.
    pub fn range_records(&self) -> &'a [RangeRecord] {
        self.range_records
    }

    /// If this glyph is in the coverage table, returns its index
    pub fn get(&self, gid: GlyphId) -> Option<u16> {
        let ix = self
            .range_records
            .binary_search_by(|rec| rec.cmp_glyph(gid))
            .ok()?;
        let record = self.range_records.get(ix)?;
        let delta = gid.to_u16() - record.start_glyph_id().to_u16();
        record.start_coverage_index().checked_add(delta)
    }
}

/// Used in [CoverageFormat2]
#[derive(Clone, Copy, Debug, AnyBitPattern)]
#[repr(C)]
#[repr(packed)]
pub struct RangeRecord {
    pub start_glyph_id: BigEndian<GlyphId>,
    pub end_glyph_id: BigEndian<GlyphId>,
    pub start_coverage_index: BigEndian<u16>,
}

impl RangeRecord {
    /// First glyph ID in the range
    pub fn start_glyph_id(&self) -> GlyphId {
        self.start_glyph_id.get()
    }

    /// Last glyph ID in the range
    pub fn end_glyph_id(&self) -> GlyphId {
        self.end_glyph_id.get()
    }

    /// Coverage Index of first glyph ID in range
    pub fn start_coverage_index(&self) -> u16 {
        self.start_coverage_index.get()
    }

    fn cmp_glyph(&self, gid: GlyphId) -> std::cmp::Ordering {
        cmp_range(self.start_glyph_id(), self.end_glyph_id(), gid)
    }

    fn iter(&self) -> impl Iterator<Item = GlyphId> {
        (self.start_glyph_id().to_u16()..=self.end_glyph_id().to_u16()).map(GlyphId::new)
    }

    fn len(&self) -> usize {
        (self.end_glyph_id().to_u16() as usize + 1)
            .saturating_sub(self.start_glyph_id().to_u16() as usize)
    }
}

impl FixedSize for RangeRecord {
    const RAW_BYTE_LEN: usize = GlyphId::RAW_BYTE_LEN + GlyphId::RAW_BYTE_LEN + u16::RAW_BYTE_LEN;
}

/// Order a `[start, end]` glyph range relative to `gid`, for binary search.
fn cmp_range(start: GlyphId, end: GlyphId, gid: GlyphId) -> std::cmp::Ordering {
    use std::cmp::Ordering;
    if end < gid {
        Ordering::Less
    } else if start > gid {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

/// A [Class Definition Table](https://learn.microsoft.com/en-us/typography/opentype/spec/chapter2#class-definition-table)
#[derive(Clone, Copy, Debug)]
pub enum ClassDef<'a> {
    Format1(ClassDefFormat1<'a>),
    Format2(ClassDefFormat2<'a>),
}

impl<'a> FontRead<'a> for ClassDef<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let format: u16 = data.read_at(0)?;
        match format {
            ClassDefFormat1::FORMAT => ClassDefFormat1::read(data).map(Self::Format1),
            ClassDefFormat2::FORMAT => ClassDefFormat2::read(data).map(Self::Format2),
            other => Err(ReadError::InvalidFormat(other)),
        }
    }
}

impl<'a> ClassDef<'a> {
    /// Get the class for this glyph id; glyphs not assigned a class are in
    /// class 0.
    pub fn get(&self, gid: GlyphId) -> u16 {
        match self {
            ClassDef::Format1(table) => table.get(gid),
            ClassDef::Format2(table) => table.get(gid),
        }
    }

    /// Iterate over `(glyph, class)` pairs with a non-zero class.
    pub fn iter(&self) -> impl Iterator<Item = (GlyphId, u16)> + 'a {
        let (one, two) = match self {
            ClassDef::Format1(table) => (Some(table.iter()), None),
            ClassDef::Format2(table) => (None, Some(table.iter())),
        };
        one.into_iter()
            .flatten()
            .chain(two.into_iter().flatten())
            .filter(|(_, class)| *class != 0)
    }
}

/// [Class Definition Table Format 1](https://learn.microsoft.com/en-us/typography/opentype/spec/chapter2#class-definition-table-format-1)
#[derive(Clone, Copy, Debug)]
pub struct ClassDefFormat1<'a> {
    start_glyph_id: GlyphId,
    class_value_array: &'a [BigEndian<u16>],
}

impl Format<u16> for ClassDefFormat1<'_> {
    const FORMAT: u16 = 1;
}

impl<'a> FontRead<'a> for ClassDefFormat1<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        cursor.advance::<u16>();
        let start_glyph_id = cursor.read()?;
        let count: u16 = cursor.read()?;
        let class_value_array = cursor.read_array(count as usize)?;
        Ok(ClassDefFormat1 {
            start_glyph_id,
            class_value_array,
        })
    }
}

impl<'a> ClassDefFormat1<'a> {
    /// First glyph ID of the classValueArray
    pub fn start_glyph_id(&self) -> GlyphId {
        self.start_glyph_id
    }

    /// Array of Class Values — one per glyph ID
    pub fn class_value_array(&self) -> &'a [BigEndian<u16>] {
        self.class_value_array
    }

    /// Get the class for this glyph id
    pub fn get(&self, gid: GlyphId) -> u16 {
        gid.to_u16()
            .checked_sub(self.start_glyph_id.to_u16())
            .and_then(|ix| self.class_value_array.get(ix as usize))
            .map(|class| class.get())
            .unwrap_or(0)
    }

    fn iter(&self) -> impl Iterator<Item = (GlyphId, u16)> + 'a {
        let start = self.start_glyph_id.to_u16();
        (start..=u16::MAX)
            .zip(self.class_value_array)
            .map(|(gid, class)| (GlyphId::new(gid), class.get()))
    }
}

/// [Class Definition Table Format 2](https://learn.microsoft.com/en-us/typography/opentype/spec/chapter2#class-definition-table-format-2)
#[derive(Clone, Copy, Debug)]
pub struct ClassDefFormat2<'a> {
    class_range_records: &'a [ClassRangeRecord],
}

impl Format<u16> for ClassDefFormat2<'_> {
    const FORMAT: u16 = 2;
}

impl<'a> FontRead<'a> for ClassDefFormat2<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        cursor.advance::<u16>();
        let count: u16 = cursor.read()?;
        let class_range_records = cursor.read_array(count as usize)?;
        Ok(ClassDefFormat2 {
            class_range_records,
        })
    }
}

impl<'a> ClassDefFormat2<'a> {
    /// Array of ClassRangeRecords — ordered by startGlyphID
    pub fn class_range_records(&self) -> &'a [ClassRangeRecord] {
        self.class_range_records
    }

    /// Get the class for this glyph id
    pub fn get(&self, gid: GlyphId) -> u16 {
        self.class_range_records
            .binary_search_by(|rec| cmp_range(rec.start_glyph_id(), rec.end_glyph_id(), gid))
            .ok()
            .and_then(|ix| self.class_range_records.get(ix))
            .map(|rec| rec.class())
            .unwrap_or(0)
    }

    fn iter(&self) -> impl Iterator<Item = (GlyphId, u16)> + 'a {
        self.class_range_records.iter().flat_map(|rec| {
            let class = rec.class();
            (rec.start_glyph_id().to_u16()..=rec.end_glyph_id().to_u16())
                .map(move |gid| (GlyphId::new(gid), class))
        })
    }
}

/// Used in [ClassDefFormat2]
#[derive(Clone, Copy, Debug, AnyBitPattern)]
#[repr(C)]
#[repr(packed)]
pub struct ClassRangeRecord {
    pub start_glyph_id: BigEndian<GlyphId>,
    pub end_glyph_id: BigEndian<GlyphId>,
    pub class: BigEndian<u16>,
}

impl ClassRangeRecord {
    /// First glyph ID in the range
    pub fn start_glyph_id(&self) -> GlyphId {
        self.start_glyph_id.get()
    }

    /// Last glyph ID in the range
    pub fn end_glyph_id(&self) -> GlyphId {
        self.end_glyph_id.get()
    }

    /// Applied to all glyphs in the range
    pub fn class(&self) -> u16 {
        self.class.get()
    }
}

impl FixedSize for ClassRangeRecord {
    const RAW_BYTE_LEN: usize = GlyphId::RAW_BYTE_LEN + GlyphId::RAW_BYTE_LEN + u16::RAW_BYTE_LEN;
}
