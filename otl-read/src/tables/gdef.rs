//! the [GDEF] table
//!
//! [GDEF]: https://docs.microsoft.com/en-us/typography/opentype/spec/gdef

use types::{BigEndian, GlyphId, MajorMinor, Offset16, Offset32, Tag};

pub use super::layout::{ClassDef, CoverageTable};

use crate::{read::Format, FontData, FontRead, ReadError, ResolveOffset};

#[cfg(test)]
#[path = "../tests/test_gdef.rs"]
mod tests;

/// 'GDEF'
pub const TAG: Tag = Tag::new(b"GDEF");

/// [GDEF](https://docs.microsoft.com/en-us/typography/opentype/spec/gdef#gdef-header) 1.0, 1.2 and 1.3
///
/// Every offset may be null, and the later versions only add fields.
#[derive(Clone, Copy, Debug)]
pub struct Gdef<'a> {
    data: FontData<'a>,
    version: MajorMinor,
    glyph_class_def_offset: Offset16,
    attach_list_offset: Offset16,
    lig_caret_list_offset: Offset16,
    mark_attach_class_def_offset: Offset16,
    mark_glyph_sets_def_offset: Option<Offset16>,
    item_var_store_offset: Option<Offset32>,
}

impl<'a> FontRead<'a> for Gdef<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let version: MajorMinor = cursor.read()?;
        if version.major != 1 {
            return Err(ReadError::InvalidFormat(version.major));
        }
        let glyph_class_def_offset = cursor.read()?;
        let attach_list_offset = cursor.read()?;
        let lig_caret_list_offset = cursor.read()?;
        let mark_attach_class_def_offset = cursor.read()?;
        let mark_glyph_sets_def_offset = version
            .compatible(MajorMinor::VERSION_1_2)
            .then(|| cursor.read())
            .transpose()?;
        let item_var_store_offset = version
            .compatible(MajorMinor::VERSION_1_3)
            .then(|| cursor.read())
            .transpose()?;
        Ok(Gdef {
            data,
            version,
            glyph_class_def_offset,
            attach_list_offset,
            lig_caret_list_offset,
            mark_attach_class_def_offset,
            mark_glyph_sets_def_offset,
            item_var_store_offset,
        })
    }
}

impl<'a> Gdef<'a> {
    /// The major/minor version of the GDEF table
    pub fn version(&self) -> MajorMinor {
        self.version
    }

    /// Offset to class definition table for glyph type, from beginning
    /// of GDEF header (may be NULL)
    pub fn glyph_class_def_offset(&self) -> Offset16 {
        self.glyph_class_def_offset
    }

    /// Attempt to resolve [`glyph_class_def_offset`][Self::glyph_class_def_offset].
    pub fn glyph_class_def(&self) -> Option<Result<ClassDef<'a>, ReadError>> {
        self.glyph_class_def_offset.resolve_nullable(self.data)
    }

    /// Offset to attachment point list table, from beginning of GDEF
    /// header (may be NULL)
    pub fn attach_list_offset(&self) -> Offset16 {
        self.attach_list_offset
    }

    /// Attempt to resolve [`attach_list_offset`][Self::attach_list_offset].
    pub fn attach_list(&self) -> Option<Result<AttachList<'a>, ReadError>> {
        self.attach_list_offset.resolve_nullable(self.data)
    }

    /// Offset to ligature caret list table, from beginning of GDEF
    /// header (may be NULL)
    pub fn lig_caret_list_offset(&self) -> Offset16 {
        self.lig_caret_list_offset
    }

    /// Attempt to resolve [`lig_caret_list_offset`][Self::lig_caret_list_offset].
    pub fn lig_caret_list(&self) -> Option<Result<LigCaretList<'a>, ReadError>> {
        self.lig_caret_list_offset.resolve_nullable(self.data)
    }

    /// Offset to class definition table for mark attachment type, from
    /// beginning of GDEF header (may be NULL)
    pub fn mark_attach_class_def_offset(&self) -> Offset16 {
        self.mark_attach_class_def_offset
    }

    /// Attempt to resolve [`mark_attach_class_def_offset`][Self::mark_attach_class_def_offset].
    pub fn mark_attach_class_def(&self) -> Option<Result<ClassDef<'a>, ReadError>> {
        self.mark_attach_class_def_offset.resolve_nullable(self.data)
    }

    /// Offset to the table of mark glyph set definitions, from
    /// beginning of GDEF header (may be NULL). Present in version 1.2 and
    /// later.
    pub fn mark_glyph_sets_def_offset(&self) -> Option<Offset16> {
        self.mark_glyph_sets_def_offset
    }

    /// Attempt to resolve [`mark_glyph_sets_def_offset`][Self::mark_glyph_sets_def_offset].
    pub fn mark_glyph_sets_def(&self) -> Option<Result<MarkGlyphSets<'a>, ReadError>> {
        self.mark_glyph_sets_def_offset?
            .resolve_nullable(self.data)
    }

    /// Offset to the Item Variation Store table, from beginning of
    /// GDEF header (may be NULL). Present in version 1.3.
    ///
    /// The variation store itself is not interpreted.
    pub fn item_var_store_offset(&self) -> Option<Offset32> {
        self.item_var_store_offset
    }

    /// The glyph class of `gid`.
    ///
    /// Glyphs without a class, and fonts without a glyph class definition,
    /// yield [`GlyphClassDef::Unknown`].
    pub fn glyph_class(&self, gid: GlyphId) -> GlyphClassDef {
        match self.glyph_class_def() {
            Some(Ok(class_def)) => GlyphClassDef::new(class_def.get(gid)),
            _ => GlyphClassDef::Unknown,
        }
    }

    /// The mark attachment class of `gid`, or 0.
    pub fn mark_attach_class(&self, gid: GlyphId) -> u16 {
        match self.mark_attach_class_def() {
            Some(Ok(class_def)) => class_def.get(gid),
            _ => 0,
        }
    }

    pub fn offset_data(&self) -> FontData<'a> {
        self.data
    }
}

/// Used in the [Glyph Class Definition Table](https://docs.microsoft.com/en-us/typography/opentype/spec/gdef#glyph-class-definition-table)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum GlyphClassDef {
    Base = 1,
    Ligature = 2,
    Mark = 3,
    Component = 4,
    #[default]
    Unknown,
}

impl GlyphClassDef {
    /// Create from a raw class value; anything unrecognized is `Unknown`.
    pub fn new(raw: u16) -> Self {
        match raw {
            1 => Self::Base,
            2 => Self::Ligature,
            3 => Self::Mark,
            4 => Self::Component,
            _ => Self::Unknown,
        }
    }
}

/// [Attachment Point List Table](https://docs.microsoft.com/en-us/typography/opentype/spec/gdef#attachment-point-list-table)
#[derive(Clone, Copy, Debug)]
pub struct AttachList<'a> {
    data: FontData<'a>,
    coverage_offset: Offset16,
    attach_point_offsets: &'a [BigEndian<Offset16>],
}

impl<'a> FontRead<'a> for AttachList<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let coverage_offset = cursor.read()?;
        let glyph_count: u16 = cursor.read()?;
        let attach_point_offsets = cursor.read_array(glyph_count as usize)?;
        Ok(AttachList {
            data,
            coverage_offset,
            attach_point_offsets,
        })
    }
}

impl<'a> AttachList<'a> {
    /// Offset to Coverage table - from beginning of AttachList table
    pub fn coverage_offset(&self) -> Offset16 {
        self.coverage_offset
    }

    /// Attempt to resolve [`coverage_offset`][Self::coverage_offset].
    pub fn coverage(&self) -> Result<CoverageTable<'a>, ReadError> {
        self.coverage_offset.resolve(self.data)
    }

    /// Number of glyphs with attachment points
    pub fn glyph_count(&self) -> u16 {
        self.attach_point_offsets.len() as u16
    }

    /// Array of offsets to AttachPoint tables-from beginning of
    /// AttachList table-in Coverage Index order
    pub fn attach_point_offsets(&self) -> &'a [BigEndian<Offset16>] {
        self.attach_point_offsets
    }

    /// The attach point table at `index`, in coverage index order.
    pub fn attach_point(&self, index: u16) -> Result<AttachPoint<'a>, ReadError> {
        self.attach_point_offsets
            .get(index as usize)
            .ok_or(ReadError::OutOfBounds)?
            .get()
            .resolve(self.data)
    }

    /// The attachment points of `gid`, if it has any.
    pub fn points_for(&self, gid: GlyphId) -> Option<Result<AttachPoint<'a>, ReadError>> {
        let coverage = match self.coverage() {
            Ok(coverage) => coverage,
            Err(e) => return Some(Err(e)),
        };
        coverage.get(gid).map(|index| self.attach_point(index))
    }
}

/// Part of [AttachList]
#[derive(Clone, Copy, Debug)]
pub struct AttachPoint<'a> {
    point_indices: &'a [BigEndian<u16>],
}

impl<'a> FontRead<'a> for AttachPoint<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let point_count: u16 = cursor.read()?;
        let point_indices = cursor.read_array(point_count as usize)?;
        Ok(AttachPoint { point_indices })
    }
}

impl<'a> AttachPoint<'a> {
    /// Number of attachment points on this glyph
    pub fn point_count(&self) -> u16 {
        self.point_indices.len() as u16
    }

    /// Array of contour point indices -in increasing numerical order
    pub fn point_indices(&self) -> &'a [BigEndian<u16>] {
        self.point_indices
    }
}

/// [Ligature Caret List Table](https://docs.microsoft.com/en-us/typography/opentype/spec/gdef#ligature-caret-list-table)
#[derive(Clone, Copy, Debug)]
pub struct LigCaretList<'a> {
    data: FontData<'a>,
    coverage_offset: Offset16,
    lig_glyph_offsets: &'a [BigEndian<Offset16>],
}

impl<'a> FontRead<'a> for LigCaretList<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let coverage_offset = cursor.read()?;
        let lig_glyph_count: u16 = cursor.read()?;
        let lig_glyph_offsets = cursor.read_array(lig_glyph_count as usize)?;
        Ok(LigCaretList {
            data,
            coverage_offset,
            lig_glyph_offsets,
        })
    }
}

impl<'a> LigCaretList<'a> {
    /// Offset to Coverage table - from beginning of LigCaretList table
    pub fn coverage_offset(&self) -> Offset16 {
        self.coverage_offset
    }

    /// Attempt to resolve [`coverage_offset`][Self::coverage_offset].
    pub fn coverage(&self) -> Result<CoverageTable<'a>, ReadError> {
        self.coverage_offset.resolve(self.data)
    }

    /// Number of ligature glyphs
    pub fn lig_glyph_count(&self) -> u16 {
        self.lig_glyph_offsets.len() as u16
    }

    /// Array of offsets to LigGlyph tables, from beginning of
    /// LigCaretList table —in Coverage Index order
    pub fn lig_glyph_offsets(&self) -> &'a [BigEndian<Offset16>] {
        self.lig_glyph_offsets
    }

    /// The ligature glyph table at `index`, in coverage index order.
    pub fn lig_glyph(&self, index: u16) -> Result<LigGlyph<'a>, ReadError> {
        self.lig_glyph_offsets
            .get(index as usize)
            .ok_or(ReadError::OutOfBounds)?
            .get()
            .resolve(self.data)
    }

    /// The caret table for the ligature `gid`, if it has one.
    pub fn lig_glyph_for(&self, gid: GlyphId) -> Option<Result<LigGlyph<'a>, ReadError>> {
        let coverage = match self.coverage() {
            Ok(coverage) => coverage,
            Err(e) => return Some(Err(e)),
        };
        coverage.get(gid).map(|index| self.lig_glyph(index))
    }
}

/// [Ligature Glyph Table](https://docs.microsoft.com/en-us/typography/opentype/spec/gdef#ligature-glyph-table)
#[derive(Clone, Copy, Debug)]
pub struct LigGlyph<'a> {
    data: FontData<'a>,
    caret_value_offsets: &'a [BigEndian<Offset16>],
}

impl<'a> FontRead<'a> for LigGlyph<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let caret_count: u16 = cursor.read()?;
        let caret_value_offsets = cursor.read_array(caret_count as usize)?;
        Ok(LigGlyph {
            data,
            caret_value_offsets,
        })
    }
}

impl<'a> LigGlyph<'a> {
    /// Number of CaretValue tables for this ligature (components - 1)
    pub fn caret_count(&self) -> u16 {
        self.caret_value_offsets.len() as u16
    }

    /// Array of offsets to CaretValue tables, from beginning of
    /// LigGlyph table — in increasing coordinate order
    pub fn caret_value_offsets(&self) -> &'a [BigEndian<Offset16>] {
        self.caret_value_offsets
    }

    /// Iterate over the caret values, in order.
    pub fn caret_values(&self) -> impl Iterator<Item = Result<CaretValue<'a>, ReadError>> + 'a {
        let data = self.data;
        self.caret_value_offsets
            .iter()
            .map(move |offset| offset.get().resolve(data))
    }

    pub fn offset_data(&self) -> FontData<'a> {
        self.data
    }
}

/// [Caret Value Tables](https://docs.microsoft.com/en-us/typography/opentype/spec/gdef#caret-value-tables)
#[derive(Clone, Copy, Debug)]
pub enum CaretValue<'a> {
    Format1(CaretValueFormat1),
    Format2(CaretValueFormat2),
    Format3(CaretValueFormat3<'a>),
}

impl<'a> FontRead<'a> for CaretValue<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let format: u16 = data.read_at(0)?;
        match format {
            CaretValueFormat1::FORMAT => CaretValueFormat1::read(data).map(Self::Format1),
            CaretValueFormat2::FORMAT => CaretValueFormat2::read(data).map(Self::Format2),
            CaretValueFormat3::FORMAT => CaretValueFormat3::read(data).map(Self::Format3),
            other => Err(ReadError::InvalidFormat(other)),
        }
    }
}

/// [CaretValue Format 1](https://docs.microsoft.com/en-us/typography/opentype/spec/gdef#caretvalue-format-1)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CaretValueFormat1 {
    coordinate: i16,
}

impl Format<u16> for CaretValueFormat1 {
    const FORMAT: u16 = 1;
}

impl<'a> FontRead<'a> for CaretValueFormat1 {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        Ok(CaretValueFormat1 {
            coordinate: data.read_at(2)?,
        })
    }
}

impl CaretValueFormat1 {
    /// X or Y value, in design units
    pub fn coordinate(&self) -> i16 {
        self.coordinate
    }
}

/// [CaretValue Format 2](https://docs.microsoft.com/en-us/typography/opentype/spec/gdef#caretvalue-format-2)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CaretValueFormat2 {
    caret_value_point_index: u16,
}

impl Format<u16> for CaretValueFormat2 {
    const FORMAT: u16 = 2;
}

impl<'a> FontRead<'a> for CaretValueFormat2 {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        Ok(CaretValueFormat2 {
            caret_value_point_index: data.read_at(2)?,
        })
    }
}

impl CaretValueFormat2 {
    /// Contour point index on glyph
    pub fn caret_value_point_index(&self) -> u16 {
        self.caret_value_point_index
    }
}

/// [CaretValue Format 3](https://docs.microsoft.com/en-us/typography/opentype/spec/gdef#caretvalue-format-3)
#[derive(Clone, Copy, Debug)]
pub struct CaretValueFormat3<'a> {
    data: FontData<'a>,
    coordinate: i16,
    device_offset: Offset16,
}

impl Format<u16> for CaretValueFormat3<'_> {
    const FORMAT: u16 = 3;
}

impl<'a> FontRead<'a> for CaretValueFormat3<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        Ok(CaretValueFormat3 {
            data,
            coordinate: data.read_at(2)?,
            device_offset: data.read_at(4)?,
        })
    }
}

impl<'a> CaretValueFormat3<'a> {
    /// X or Y value, in design units
    pub fn coordinate(&self) -> i16 {
        self.coordinate
    }

    /// Offset to Device table (non-variable font) / Variation Index
    /// table (variable font) for X or Y value-from beginning of
    /// CaretValue table
    pub fn device_offset(&self) -> Offset16 {
        self.device_offset
    }

    /// The raw data of the device or variation index table.
    ///
    /// Device tables are not interpreted.
    pub fn device_data(&self) -> Option<Result<FontData<'a>, ReadError>> {
        self.device_offset.resolve_nullable(self.data)
    }
}

/// [Mark Glyph Sets Table](https://docs.microsoft.com/en-us/typography/opentype/spec/gdef#mark-glyph-sets-table)
#[derive(Clone, Copy, Debug)]
pub struct MarkGlyphSets<'a> {
    data: FontData<'a>,
    coverage_offsets: &'a [BigEndian<Offset32>],
}

impl Format<u16> for MarkGlyphSets<'_> {
    const FORMAT: u16 = 1;
}

impl<'a> FontRead<'a> for MarkGlyphSets<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let format: u16 = cursor.read()?;
        if format != Self::FORMAT {
            return Err(ReadError::InvalidFormat(format));
        }
        let count: u16 = cursor.read()?;
        let coverage_offsets = cursor.read_array(count as usize)?;
        Ok(MarkGlyphSets {
            data,
            coverage_offsets,
        })
    }
}

impl<'a> MarkGlyphSets<'a> {
    /// Number of mark glyph sets defined
    pub fn mark_glyph_set_count(&self) -> u16 {
        self.coverage_offsets.len() as u16
    }

    /// Array of offsets to mark glyph set coverage tables, from the
    /// start of the MarkGlyphSets table.
    pub fn coverage_offsets(&self) -> &'a [BigEndian<Offset32>] {
        self.coverage_offsets
    }

    /// The coverage table of the set at `index`.
    pub fn coverage(&self, index: u16) -> Result<CoverageTable<'a>, ReadError> {
        self.coverage_offsets
            .get(index as usize)
            .ok_or(ReadError::OutOfBounds)?
            .get()
            .resolve(self.data)
    }

    /// Returns `true` if `gid` is in the mark glyph set at `index`.
    ///
    /// A missing or malformed set contains no glyphs.
    pub fn contains(&self, index: u16, gid: GlyphId) -> bool {
        self.coverage(index)
            .map(|coverage| coverage.get(gid).is_some())
            .unwrap_or(false)
    }
}
