//! GSUB subtables, from the examples in the OpenType spec, and a complete
//! synthetic GSUB table.
//!
//! <https://learn.microsoft.com/en-us/typography/opentype/spec/gsub#gsub-table-examples>

use otl_types::Tag;

use crate::bebuffer::BeBuffer;
use crate::layout::build::{self, coverage, with_children};

// Example 2
#[rustfmt::skip]
pub static SINGLESUBSTFORMAT1_TABLE: &[u8] = &[
    0x00, 0x01, // substFormat
    0x00, 0x06, // coverageOffset
    0x00, 0xC0, // deltaGlyphID: 192
    0x00, 0x02, // coverageFormat
    0x00, 0x01, // rangeCount
    0x00, 0x4E, 0x00, 0x58, 0x00, 0x00,
];

// Example 3
#[rustfmt::skip]
pub static SINGLESUBSTFORMAT2_TABLE: &[u8] = &[
    0x00, 0x02, // substFormat
    0x00, 0x0E, // coverageOffset
    0x00, 0x04, // glyphCount
    0x01, 0x31, 0x01, 0x35, 0x01, 0x3E, 0x01, 0x43,
    0x00, 0x01, // coverageFormat
    0x00, 0x04,
    0x00, 0x3C, 0x00, 0x40, 0x00, 0x4B, 0x00, 0x4F,
];

// Example 4
#[rustfmt::skip]
pub static MULTIPLESUBSTFORMAT1_TABLE: &[u8] = &[
    0x00, 0x01, // substFormat
    0x00, 0x08, // coverageOffset
    0x00, 0x01, // sequenceCount
    0x00, 0x0E, // sequenceOffsets[0]
    0x00, 0x01, // coverageFormat
    0x00, 0x01,
    0x00, 0xF1,
    0x00, 0x03, // glyphCount
    0x00, 0x1A, 0x00, 0x1A, 0x00, 0x1D,
];

// Example 5
#[rustfmt::skip]
pub static ALTERNATESUBSTFORMAT1_TABLE: &[u8] = &[
    0x00, 0x01, // substFormat
    0x00, 0x08, // coverageOffset
    0x00, 0x01, // alternateSetCount
    0x00, 0x0E, // alternateSetOffsets[0]
    0x00, 0x01, // coverageFormat
    0x00, 0x01,
    0x00, 0x3A,
    0x00, 0x02, // glyphCount
    0x00, 0xC9, 0x00, 0xCA,
];

// Example 6, with offsets adjusted to the compact layout
#[rustfmt::skip]
pub static LIGATURESUBSTFORMAT1_TABLE: &[u8] = &[
    0x00, 0x01, // substFormat
    0x00, 0x0A, // coverageOffset
    0x00, 0x02, // ligatureSetCount
    0x00, 0x12, // ligatureSetOffsets[0]
    0x00, 0x1E, // ligatureSetOffsets[1]
    0x00, 0x01, // coverageFormat
    0x00, 0x02,
    0x00, 0x19, 0x00, 0x1A,
    // LigatureSet 0
    0x00, 0x01, // ligatureCount
    0x00, 0x04,
    0x01, 0x5B, // ligatureGlyph
    0x00, 0x03, // componentCount
    0x00, 0x28, 0x00, 0x17,
    // LigatureSet 1
    0x00, 0x02,
    0x00, 0x06,
    0x00, 0x0E,
    0x00, 0xF1,
    0x00, 0x03,
    0x00, 0x1A, 0x00, 0x1D,
    0x00, 0xF0,
    0x00, 0x02,
    0x00, 0x1D,
];

pub fn single_subst_format1(glyphs: &[u16], delta: i16) -> Vec<u8> {
    let mut out = BeBuffer::new()
        .push(1u16)
        .push(6u16)
        .push(delta)
        .into_vec();
    out.extend(coverage(glyphs));
    out
}

pub fn single_subst_format2(glyphs: &[u16], substitutes: &[u16]) -> Vec<u8> {
    let mut out = BeBuffer::new()
        .push(2u16)
        .push(build::offset16(6 + substitutes.len() * 2))
        .push(substitutes.len() as u16)
        .extend(substitutes.iter().copied())
        .into_vec();
    out.extend(coverage(glyphs));
    out
}

fn glyph_array(glyphs: &[u16]) -> Vec<u8> {
    BeBuffer::new()
        .push(glyphs.len() as u16)
        .extend(glyphs.iter().copied())
        .into_vec()
}

// format 1 multiple, alternate and ligature subtables share a layout: the
// coverage offset, then a count and one offset per covered glyph, then the
// coverage table and the per-glyph tables.
fn coverage_and_children(glyphs: &[u16], children: &[Vec<u8>]) -> Vec<u8> {
    let cov = coverage(glyphs);
    let header_len = 6 + children.len() * 2;
    let mut pos = header_len + cov.len();
    let mut buf = BeBuffer::new()
        .push(1u16)
        .push(build::offset16(header_len))
        .push(children.len() as u16);
    for child in children {
        buf = buf.push(build::offset16(pos));
        pos += child.len();
    }
    let mut out = buf.into_vec();
    out.extend(cov);
    for child in children {
        out.extend_from_slice(child);
    }
    out
}

pub fn multiple_subst(glyphs: &[u16], sequences: &[&[u16]]) -> Vec<u8> {
    let sequences = sequences.iter().map(|seq| glyph_array(seq)).collect::<Vec<_>>();
    coverage_and_children(glyphs, &sequences)
}

pub fn alternate_subst(glyphs: &[u16], alternates: &[&[u16]]) -> Vec<u8> {
    let sets = alternates.iter().map(|set| glyph_array(set)).collect::<Vec<_>>();
    coverage_and_children(glyphs, &sets)
}

/// A ligature subtable; each set is a list of `(ligature, components)`.
pub fn ligature_subst(first_glyphs: &[u16], sets: &[&[(u16, &[u16])]]) -> Vec<u8> {
    let set_tables = sets
        .iter()
        .map(|ligatures| {
            let ligatures = ligatures
                .iter()
                .map(|(glyph, components)| {
                    BeBuffer::new()
                        .push(*glyph)
                        .push(components.len() as u16 + 1)
                        .extend(components.iter().copied())
                        .into_vec()
                })
                .collect::<Vec<_>>();
            with_children(BeBuffer::new().push(ligatures.len() as u16), &ligatures)
        })
        .collect::<Vec<_>>();
    coverage_and_children(first_glyphs, &set_tables)
}

pub fn extension_subst(lookup_type: u16, subtable: &[u8]) -> Vec<u8> {
    let mut out = BeBuffer::new()
        .push(1u16)
        .push(lookup_type)
        .push(8u32)
        .into_vec();
    out.extend_from_slice(subtable);
    out
}

/// The lookups in [`synthetic_gsub`], by index.
pub mod lookups {
    /// single format 1: glyph 10 -> 15
    pub const SINGLE: u16 = 0;
    /// ligature: 20 21 -> 99
    pub const LIGATURE: u16 = 1;
    /// alternates: 30 -> [31, 32, 33]
    pub const ALTERNATE: u16 = 2;
    /// multiple: 40 -> 41 42 43, and 44 -> nothing
    pub const MULTIPLE: u16 = 3;
    /// extension wrapping single format 2: 50 -> 51
    pub const EXTENSION: u16 = 4;
}

/// A complete GSUB table exercising each substitution type.
///
/// The features are `aalt` (alternates), `ccmp` (multiple), `liga`
/// (ligature), `salt` (the extension lookup) and `smcp` (single), at feature
/// indices 0 to 4. The `DFLT` script enables all of them; `latn` enables
/// `aalt` and `salt` by default and has a `TRK ` language that requires
/// `liga` and also enables `ccmp`.
pub fn synthetic_gsub() -> Vec<u8> {
    let scripts = build::tagged_list(&[
        (
            Tag::new(b"DFLT"),
            build::script(Some(build::lang_sys(None, &[0, 1, 2, 3, 4])), &[]),
        ),
        (
            Tag::new(b"latn"),
            build::script(
                Some(build::lang_sys(None, &[0, 3])),
                &[(Tag::new(b"TRK "), build::lang_sys(Some(2), &[1]))],
            ),
        ),
    ]);
    let features = build::tagged_list(&[
        (Tag::new(b"aalt"), build::feature(&[lookups::ALTERNATE])),
        (Tag::new(b"ccmp"), build::feature(&[lookups::MULTIPLE])),
        (Tag::new(b"liga"), build::feature(&[lookups::LIGATURE])),
        (Tag::new(b"salt"), build::feature(&[lookups::EXTENSION])),
        (Tag::new(b"smcp"), build::feature(&[lookups::SINGLE])),
    ]);
    let ligature: &[(u16, &[u16])] = &[(99, &[21])];
    let lookups = build::lookup_list(&[
        build::lookup(1, 0, &[single_subst_format1(&[10], 5)]),
        build::lookup(4, 0, &[ligature_subst(&[20], &[ligature])]),
        build::lookup(3, 0, &[alternate_subst(&[30], &[&[31, 32, 33]])]),
        build::lookup(2, 0, &[multiple_subst(&[40, 44], &[&[41, 42, 43], &[]])]),
        build::lookup(
            7,
            0,
            &[extension_subst(1, &single_subst_format2(&[50], &[51]))],
        ),
    ]);
    build::layout_table(scripts, features, lookups)
}
