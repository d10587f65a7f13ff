//! the [GSUB] table
//!
//! [GSUB]: https://docs.microsoft.com/en-us/typography/opentype/spec/gsub

use std::ops::Deref;

use types::{BigEndian, GlyphId, Offset16, Offset32, Tag};

use super::layout::{CoverageTable, LayoutTable, Lookup};

use crate::{read::Format, FontData, FontRead, ReadError, ResolveOffset};

#[cfg(test)]
#[path = "../tests/test_gsub.rs"]
mod tests;

/// 'GSUB'
pub const TAG: Tag = Tag::new(b"GSUB");

/// [GSUB](https://docs.microsoft.com/en-us/typography/opentype/spec/gsub#gsub-header)
#[derive(Clone, Copy, Debug)]
pub struct Gsub<'a>(LayoutTable<'a>);

impl<'a> FontRead<'a> for Gsub<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        LayoutTable::read(data).map(Gsub)
    }
}

impl<'a> Deref for Gsub<'a> {
    type Target = LayoutTable<'a>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// The GSUB lookup types.
pub mod lookup_type {
    pub const SINGLE: u16 = 1;
    pub const MULTIPLE: u16 = 2;
    pub const ALTERNATE: u16 = 3;
    pub const LIGATURE: u16 = 4;
    pub const CONTEXT: u16 = 5;
    pub const CHAINING_CONTEXT: u16 = 6;
    pub const EXTENSION: u16 = 7;
    pub const REVERSE_CHAINING_CONTEXT: u16 = 8;
}

/// A GSUB lookup subtable, with extension subtables already unwrapped.
#[derive(Clone, Copy, Debug)]
pub enum SubstitutionSubtable<'a> {
    Single(SingleSubst<'a>),
    Multiple(MultipleSubstFormat1<'a>),
    Alternate(AlternateSubstFormat1<'a>),
    Ligature(LigatureSubstFormat1<'a>),
    /// A contextual lookup type that is not interpreted.
    Other {
        lookup_type: u16,
        data: FontData<'a>,
    },
}

impl<'a> SubstitutionSubtable<'a> {
    /// Read a subtable of the given lookup type.
    pub fn read(data: FontData<'a>, lookup_type: u16) -> Result<Self, ReadError> {
        match lookup_type {
            lookup_type::SINGLE => SingleSubst::read(data).map(Self::Single),
            lookup_type::MULTIPLE => MultipleSubstFormat1::read(data).map(Self::Multiple),
            lookup_type::ALTERNATE => AlternateSubstFormat1::read(data).map(Self::Alternate),
            lookup_type::LIGATURE => LigatureSubstFormat1::read(data).map(Self::Ligature),
            lookup_type::EXTENSION => {
                let extension = ExtensionSubstFormat1::read(data)?;
                if extension.extension_lookup_type() == lookup_type::EXTENSION {
                    return Err(ReadError::MalformedData("nested GSUB extension"));
                }
                Self::read(extension.extension_data()?, extension.extension_lookup_type())
            }
            lookup_type::CONTEXT
            | lookup_type::CHAINING_CONTEXT
            | lookup_type::REVERSE_CHAINING_CONTEXT => Ok(Self::Other { lookup_type, data }),
            _ => Err(ReadError::MalformedData("invalid GSUB lookup type")),
        }
    }

    /// The lookup type of this subtable, after unwrapping extensions.
    pub fn lookup_type(&self) -> u16 {
        match self {
            Self::Single(_) => lookup_type::SINGLE,
            Self::Multiple(_) => lookup_type::MULTIPLE,
            Self::Alternate(_) => lookup_type::ALTERNATE,
            Self::Ligature(_) => lookup_type::LIGATURE,
            Self::Other { lookup_type, .. } => *lookup_type,
        }
    }

    /// The coverage table of this subtable, if it is an interpreted type.
    pub fn coverage(&self) -> Option<Result<CoverageTable<'a>, ReadError>> {
        match self {
            Self::Single(SingleSubst::Format1(table)) => Some(table.coverage()),
            Self::Single(SingleSubst::Format2(table)) => Some(table.coverage()),
            Self::Multiple(table) => Some(table.coverage()),
            Self::Alternate(table) => Some(table.coverage()),
            Self::Ligature(table) => Some(table.coverage()),
            Self::Other { .. } => None,
        }
    }
}

/// Iterate over the subtables of a GSUB lookup, in order.
pub fn subtables<'a>(
    lookup: Lookup<'a>,
) -> impl Iterator<Item = Result<SubstitutionSubtable<'a>, ReadError>> + 'a {
    let lookup_type = lookup.lookup_type();
    (0..lookup.subtable_count() as usize).map(move |ix| {
        lookup
            .subtable_data(ix)
            .and_then(|data| SubstitutionSubtable::read(data, lookup_type))
    })
}

/// [Single Substitution](https://docs.microsoft.com/en-us/typography/opentype/spec/gsub#lookuptype-1-single-substitution-subtable)
#[derive(Clone, Copy, Debug)]
pub enum SingleSubst<'a> {
    Format1(SingleSubstFormat1<'a>),
    Format2(SingleSubstFormat2<'a>),
}

impl<'a> FontRead<'a> for SingleSubst<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let format: u16 = data.read_at(0)?;
        match format {
            SingleSubstFormat1::FORMAT => SingleSubstFormat1::read(data).map(Self::Format1),
            SingleSubstFormat2::FORMAT => SingleSubstFormat2::read(data).map(Self::Format2),
            other => Err(ReadError::InvalidFormat(other)),
        }
    }
}

/// [Single Substitution Format 1](https://docs.microsoft.com/en-us/typography/opentype/spec/gsub#11-single-substitution-format-1)
#[derive(Clone, Copy, Debug)]
pub struct SingleSubstFormat1<'a> {
    data: FontData<'a>,
    coverage_offset: Offset16,
    delta_glyph_id: i16,
}

impl Format<u16> for SingleSubstFormat1<'_> {
    const FORMAT: u16 = 1;
}

impl<'a> FontRead<'a> for SingleSubstFormat1<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        cursor.advance::<u16>();
        let coverage_offset = cursor.read()?;
        let delta_glyph_id = cursor.read()?;
        Ok(SingleSubstFormat1 {
            data,
            coverage_offset,
            delta_glyph_id,
        })
    }
}

impl<'a> SingleSubstFormat1<'a> {
    /// Offset to Coverage table, from beginning of substitution
    /// subtable
    pub fn coverage_offset(&self) -> Offset16 {
        self.coverage_offset
    }

    /// Attempt to resolve [`coverage_offset`][Self::coverage_offset].
    pub fn coverage(&self) -> Result<CoverageTable<'a>, ReadError> {
        self.coverage_offset.resolve(self.data)
    }

    /// Add to original glyph ID to get substitute glyph ID
    pub fn delta_glyph_id(&self) -> i16 {
        self.delta_glyph_id
    }
}

/// [Single Substitution Format 2](https://docs.microsoft.com/en-us/typography/opentype/spec/gsub#12-single-substitution-format-2)
#[derive(Clone, Copy, Debug)]
pub struct SingleSubstFormat2<'a> {
    data: FontData<'a>,
    coverage_offset: Offset16,
    substitute_glyph_ids: &'a [BigEndian<GlyphId>],
}

impl Format<u16> for SingleSubstFormat2<'_> {
    const FORMAT: u16 = 2;
}

impl<'a> FontRead<'a> for SingleSubstFormat2<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        cursor.advance::<u16>();
        let coverage_offset = cursor.read()?;
        let glyph_count: u16 = cursor.read()?;
        let substitute_glyph_ids = cursor.read_array(glyph_count as usize)?;
        Ok(SingleSubstFormat2 {
            data,
            coverage_offset,
            substitute_glyph_ids,
        })
    }
}

impl<'a> SingleSubstFormat2<'a> {
    /// Offset to Coverage table, from beginning of substitution
    /// subtable
    pub fn coverage_offset(&self) -> Offset16 {
        self.coverage_offset
    }

    /// Attempt to resolve [`coverage_offset`][Self::coverage_offset].
    pub fn coverage(&self) -> Result<CoverageTable<'a>, ReadError> {
        self.coverage_offset.resolve(self.data)
    }

    /// Array of substitute glyph IDs — ordered by Coverage index
    pub fn substitute_glyph_ids(&self) -> &'a [BigEndian<GlyphId>] {
        self.substitute_glyph_ids
    }
}

/// [Multiple Substitution Format 1](https://docs.microsoft.com/en-us/typography/opentype/spec/gsub#21-multiple-substitution-format-1)
#[derive(Clone, Copy, Debug)]
pub struct MultipleSubstFormat1<'a> {
    data: FontData<'a>,
    coverage_offset: Offset16,
    sequence_offsets: &'a [BigEndian<Offset16>],
}

impl Format<u16> for MultipleSubstFormat1<'_> {
    const FORMAT: u16 = 1;
}

impl<'a> FontRead<'a> for MultipleSubstFormat1<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let (coverage_offset, sequence_offsets) = read_format1_header::<Self>(data)?;
        Ok(MultipleSubstFormat1 {
            data,
            coverage_offset,
            sequence_offsets,
        })
    }
}

impl<'a> MultipleSubstFormat1<'a> {
    /// Offset to Coverage table, from beginning of substitution
    /// subtable
    pub fn coverage_offset(&self) -> Offset16 {
        self.coverage_offset
    }

    /// Attempt to resolve [`coverage_offset`][Self::coverage_offset].
    pub fn coverage(&self) -> Result<CoverageTable<'a>, ReadError> {
        self.coverage_offset.resolve(self.data)
    }

    /// Number of Sequence table offsets in the sequenceOffsets array
    pub fn sequence_count(&self) -> u16 {
        self.sequence_offsets.len() as u16
    }

    /// Array of offsets to Sequence tables. Offsets are from beginning
    /// of substitution subtable, ordered by Coverage index
    pub fn sequence_offsets(&self) -> &'a [BigEndian<Offset16>] {
        self.sequence_offsets
    }

    /// The sequence for the glyph at `coverage_index`.
    pub fn sequence(&self, coverage_index: u16) -> Result<Sequence<'a>, ReadError> {
        resolve_at(self.sequence_offsets, coverage_index, self.data)
    }
}

/// Part of [MultipleSubstFormat1]
#[derive(Clone, Copy, Debug)]
pub struct Sequence<'a> {
    substitute_glyph_ids: &'a [BigEndian<GlyphId>],
}

impl<'a> FontRead<'a> for Sequence<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        Ok(Sequence {
            substitute_glyph_ids: read_glyph_array(data)?,
        })
    }
}

impl<'a> Sequence<'a> {
    /// String of glyph IDs to substitute
    pub fn substitute_glyph_ids(&self) -> &'a [BigEndian<GlyphId>] {
        self.substitute_glyph_ids
    }
}

/// [Alternate Substitution Format 1](https://docs.microsoft.com/en-us/typography/opentype/spec/gsub#31-alternate-substitution-format-1)
#[derive(Clone, Copy, Debug)]
pub struct AlternateSubstFormat1<'a> {
    data: FontData<'a>,
    coverage_offset: Offset16,
    alternate_set_offsets: &'a [BigEndian<Offset16>],
}

impl Format<u16> for AlternateSubstFormat1<'_> {
    const FORMAT: u16 = 1;
}

impl<'a> FontRead<'a> for AlternateSubstFormat1<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let (coverage_offset, alternate_set_offsets) = read_format1_header::<Self>(data)?;
        Ok(AlternateSubstFormat1 {
            data,
            coverage_offset,
            alternate_set_offsets,
        })
    }
}

impl<'a> AlternateSubstFormat1<'a> {
    /// Offset to Coverage table, from beginning of substitution
    /// subtable
    pub fn coverage_offset(&self) -> Offset16 {
        self.coverage_offset
    }

    /// Attempt to resolve [`coverage_offset`][Self::coverage_offset].
    pub fn coverage(&self) -> Result<CoverageTable<'a>, ReadError> {
        self.coverage_offset.resolve(self.data)
    }

    /// Number of AlternateSet tables
    pub fn alternate_set_count(&self) -> u16 {
        self.alternate_set_offsets.len() as u16
    }

    /// Array of offsets to AlternateSet tables. Offsets are from
    /// beginning of substitution subtable, ordered by Coverage index
    pub fn alternate_set_offsets(&self) -> &'a [BigEndian<Offset16>] {
        self.alternate_set_offsets
    }

    /// The alternates for the glyph at `coverage_index`.
    pub fn alternate_set(&self, coverage_index: u16) -> Result<AlternateSet<'a>, ReadError> {
        resolve_at(self.alternate_set_offsets, coverage_index, self.data)
    }
}

/// Part of [AlternateSubstFormat1]
#[derive(Clone, Copy, Debug)]
pub struct AlternateSet<'a> {
    alternate_glyph_ids: &'a [BigEndian<GlyphId>],
}

impl<'a> FontRead<'a> for AlternateSet<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        Ok(AlternateSet {
            alternate_glyph_ids: read_glyph_array(data)?,
        })
    }
}

impl<'a> AlternateSet<'a> {
    /// Array of alternate glyph IDs, in arbitrary order
    pub fn alternate_glyph_ids(&self) -> &'a [BigEndian<GlyphId>] {
        self.alternate_glyph_ids
    }
}

/// [Ligature Substitution Format 1](https://docs.microsoft.com/en-us/typography/opentype/spec/gsub#41-ligature-substitution-format-1)
#[derive(Clone, Copy, Debug)]
pub struct LigatureSubstFormat1<'a> {
    data: FontData<'a>,
    coverage_offset: Offset16,
    ligature_set_offsets: &'a [BigEndian<Offset16>],
}

impl Format<u16> for LigatureSubstFormat1<'_> {
    const FORMAT: u16 = 1;
}

impl<'a> FontRead<'a> for LigatureSubstFormat1<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let (coverage_offset, ligature_set_offsets) = read_format1_header::<Self>(data)?;
        Ok(LigatureSubstFormat1 {
            data,
            coverage_offset,
            ligature_set_offsets,
        })
    }
}

impl<'a> LigatureSubstFormat1<'a> {
    /// Offset to Coverage table, from beginning of substitution
    /// subtable
    pub fn coverage_offset(&self) -> Offset16 {
        self.coverage_offset
    }

    /// Attempt to resolve [`coverage_offset`][Self::coverage_offset].
    pub fn coverage(&self) -> Result<CoverageTable<'a>, ReadError> {
        self.coverage_offset.resolve(self.data)
    }

    /// Number of LigatureSet tables
    pub fn ligature_set_count(&self) -> u16 {
        self.ligature_set_offsets.len() as u16
    }

    /// Array of offsets to LigatureSet tables. Offsets are from
    /// beginning of substitution subtable, ordered by Coverage index
    pub fn ligature_set_offsets(&self) -> &'a [BigEndian<Offset16>] {
        self.ligature_set_offsets
    }

    /// The ligatures starting with the glyph at `coverage_index`.
    pub fn ligature_set(&self, coverage_index: u16) -> Result<LigatureSet<'a>, ReadError> {
        resolve_at(self.ligature_set_offsets, coverage_index, self.data)
    }
}

/// All ligatures beginning with the same glyph
#[derive(Clone, Copy, Debug)]
pub struct LigatureSet<'a> {
    data: FontData<'a>,
    ligature_offsets: &'a [BigEndian<Offset16>],
}

impl<'a> FontRead<'a> for LigatureSet<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let count: u16 = cursor.read()?;
        let ligature_offsets = cursor.read_array(count as usize)?;
        Ok(LigatureSet {
            data,
            ligature_offsets,
        })
    }
}

impl<'a> LigatureSet<'a> {
    /// Number of Ligature tables
    pub fn ligature_count(&self) -> u16 {
        self.ligature_offsets.len() as u16
    }

    /// Array of offsets to Ligature tables. Offsets are from beginning
    /// of LigatureSet table, ordered by preference.
    pub fn ligature_offsets(&self) -> &'a [BigEndian<Offset16>] {
        self.ligature_offsets
    }

    /// The ligatures in this set, in order of preference.
    pub fn ligatures(&self) -> impl Iterator<Item = Result<Ligature<'a>, ReadError>> + 'a {
        let data = self.data;
        self.ligature_offsets
            .iter()
            .map(move |offset| offset.get().resolve(data))
    }
}

/// Glyph components for one ligature
#[derive(Clone, Copy, Debug)]
pub struct Ligature<'a> {
    ligature_glyph: GlyphId,
    component_glyph_ids: &'a [BigEndian<GlyphId>],
}

impl<'a> FontRead<'a> for Ligature<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let ligature_glyph = cursor.read()?;
        let component_count: u16 = cursor.read()?;
        // the first component is the covered glyph, and is not stored
        let stored = component_count
            .checked_sub(1)
            .ok_or(ReadError::MalformedData("ligature with no components"))?;
        let component_glyph_ids = cursor.read_array(stored as usize)?;
        Ok(Ligature {
            ligature_glyph,
            component_glyph_ids,
        })
    }
}

impl<'a> Ligature<'a> {
    /// glyph ID of ligature to substitute
    pub fn ligature_glyph(&self) -> GlyphId {
        self.ligature_glyph
    }

    /// Number of components in the ligature
    pub fn component_count(&self) -> u16 {
        self.component_glyph_ids.len() as u16 + 1
    }

    /// Array of component glyph IDs — start with the second
    /// component, ordered in writing direction
    pub fn component_glyph_ids(&self) -> &'a [BigEndian<GlyphId>] {
        self.component_glyph_ids
    }

    /// Returns `true` if the components after the first match the start of
    /// `glyphs`.
    pub fn matches(&self, glyphs: &[GlyphId]) -> bool {
        self.component_glyph_ids.len() <= glyphs.len()
            && self
                .component_glyph_ids
                .iter()
                .zip(glyphs)
                .all(|(component, glyph)| component.get() == *glyph)
    }
}

/// [Extension Substitution Subtable Format 1](https://docs.microsoft.com/en-us/typography/opentype/spec/gsub#71-extension-substitution-subtable-format-1)
#[derive(Clone, Copy, Debug)]
pub struct ExtensionSubstFormat1<'a> {
    data: FontData<'a>,
    extension_lookup_type: u16,
    extension_offset: Offset32,
}

impl Format<u16> for ExtensionSubstFormat1<'_> {
    const FORMAT: u16 = 1;
}

impl<'a> FontRead<'a> for ExtensionSubstFormat1<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let format: u16 = cursor.read()?;
        if format != Self::FORMAT {
            return Err(ReadError::InvalidFormat(format));
        }
        let extension_lookup_type = cursor.read()?;
        let extension_offset = cursor.read()?;
        Ok(ExtensionSubstFormat1 {
            data,
            extension_lookup_type,
            extension_offset,
        })
    }
}

impl<'a> ExtensionSubstFormat1<'a> {
    /// Lookup type of subtable referenced by extensionOffset (that is,
    /// the extension subtable).
    pub fn extension_lookup_type(&self) -> u16 {
        self.extension_lookup_type
    }

    /// Offset to the extension subtable, of lookup type
    /// extensionLookupType, relative to the start of the
    /// ExtensionSubstFormat1 subtable.
    pub fn extension_offset(&self) -> Offset32 {
        self.extension_offset
    }

    /// The data of the wrapped subtable.
    pub fn extension_data(&self) -> Result<FontData<'a>, ReadError> {
        self.extension_offset.resolve(self.data)
    }
}

// the header shared by format 1 multiple, alternate and ligature subtables
fn read_format1_header<'a, T: Format<u16>>(
    data: FontData<'a>,
) -> Result<(Offset16, &'a [BigEndian<Offset16>]), ReadError> {
    let mut cursor = data.cursor();
    let format: u16 = cursor.read()?;
    if format != T::FORMAT {
        return Err(ReadError::InvalidFormat(format));
    }
    let coverage_offset = cursor.read()?;
    let count: u16 = cursor.read()?;
    let offsets = cursor.read_array(count as usize)?;
    Ok((coverage_offset, offsets))
}

fn read_glyph_array(data: FontData) -> Result<&[BigEndian<GlyphId>], ReadError> {
    let mut cursor = data.cursor();
    let count: u16 = cursor.read()?;
    cursor.read_array(count as usize)
}

fn resolve_at<'a, T: FontRead<'a>>(
    offsets: &[BigEndian<Offset16>],
    index: u16,
    data: FontData<'a>,
) -> Result<T, ReadError> {
    offsets
        .get(index as usize)
        .ok_or(ReadError::OutOfBounds)?
        .get()
        .resolve(data)
}
