//! GDEF test data
//!
//! <https://learn.microsoft.com/en-us/typography/opentype/spec/gdef#gdef-table-examples>

use crate::bebuffer::BeBuffer;
use crate::layout::build::{self, coverage, with_children};

// Example 1, a version 1.0 header with only a glyph class def
#[rustfmt::skip]
pub static GDEF_HEADER: &[u8] = &[
    0x00, 0x01, 0x00, 0x00, // version 1.0
    0x00, 0x0C, // glyphClassDefOffset
    0x00, 0x00, // attachListOffset
    0x00, 0x00, // ligCaretListOffset
    0x00, 0x00, // markAttachClassDefOffset
    // ClassDefFormat2
    0x00, 0x02,
    0x00, 0x04,
    0x00, 0x24, 0x00, 0x24, 0x00, 0x01, // base
    0x00, 0x9F, 0x00, 0x9F, 0x00, 0x02, // ligature
    0x00, 0xA0, 0x00, 0xA0, 0x00, 0x03, // mark
    0x00, 0xC0, 0x00, 0xC0, 0x00, 0x04, // component
];

// Example 3
#[rustfmt::skip]
pub static ATTACHLIST_TABLE: &[u8] = &[
    0x00, 0x12, // coverageOffset
    0x00, 0x02, // glyphCount
    0x00, 0x08, // attachPointOffsets[0]
    0x00, 0x0C, // attachPointOffsets[1]
    0x00, 0x01, // pointCount
    0x00, 0x12,
    0x00, 0x02,
    0x00, 0x0E, 0x00, 0x17,
    // coverage
    0x00, 0x01,
    0x00, 0x02,
    0x00, 0x1C, 0x00, 0x20,
];

// Example 6
#[rustfmt::skip]
pub static CARETVALUEFORMAT3_TABLE: &[u8] = &[
    0x00, 0x03, // caretValueFormat
    0x04, 0xB0, // coordinate: 1200
    0x00, 0x06, // deviceOffset
    // Device
    0x00, 0x0C, // startSize
    0x00, 0x11, // endSize
    0x00, 0x02, // deltaFormat
    0x11, 0x11, 0x22, 0x00,
];

#[rustfmt::skip]
pub static MARKGLYPHSETS_TABLE: &[u8] = &[
    0x00, 0x01, // format
    0x00, 0x02, // markGlyphSetCount
    0x00, 0x00, 0x00, 0x0C, // coverageOffsets[0]
    0x00, 0x00, 0x00, 0x14, // coverageOffsets[1]
    0x00, 0x01, 0x00, 0x02, 0x00, 0xC8, 0x00, 0xC9,
    0x00, 0x01, 0x00, 0x01, 0x00, 0xCD,
];

fn caret_value(format: u16, value: u16) -> Vec<u8> {
    let buf = BeBuffer::new().push(format).push(value);
    match format {
        // device offset, then a device table with a single zero delta
        3 => buf
            .push(6u16)
            .push(12u16)
            .push(12u16)
            .push(1u16)
            .push(0u16)
            .into_vec(),
        _ => buf.into_vec(),
    }
}

/// A version 1.2 GDEF table with every subtable present.
///
/// - glyph classes: 10..=20 base, 99 ligature, 200..=210 mark
/// - attach points: glyph 10 at [1], glyph 12 at [2, 5]
/// - ligature carets: glyph 99 has a format 1 caret at 500, a format 2
///   caret on point 7 and a format 3 caret at 300
/// - mark attachment classes: 200, 201 class 1; 202 class 2
/// - mark glyph sets: set 0 is {200, 201}, set 1 is {205}
pub fn full_gdef() -> Vec<u8> {
    let glyph_class_def = BeBuffer::new()
        .push(2u16)
        .push(3u16)
        .extend([10u16, 20, 1, 99, 99, 2, 200, 210, 3])
        .into_vec();

    let attach_points = [vec![1u16], vec![2, 5]]
        .iter()
        .map(|points| {
            BeBuffer::new()
                .push(points.len() as u16)
                .extend(points.iter().copied())
                .into_vec()
        })
        .collect::<Vec<_>>();
    let attach_list = coverage_first(&[10, 12], &attach_points);

    let carets = [caret_value(1, 500), caret_value(2, 7), caret_value(3, 300)];
    let lig_glyph = with_children(BeBuffer::new().push(carets.len() as u16), &carets);
    let lig_caret_list = coverage_first(&[99], &[lig_glyph]);

    let mark_attach_class_def = BeBuffer::new()
        .push(1u16)
        .push(200u16)
        .push(3u16)
        .extend([1u16, 1, 2])
        .into_vec();

    let set_coverages = [coverage(&[200, 201]), coverage(&[205])];
    let mut pos = 4 + set_coverages.len() * 4;
    let mut buf = BeBuffer::new()
        .push(1u16)
        .push(set_coverages.len() as u16);
    for cov in &set_coverages {
        buf = buf.push(pos as u32);
        pos += cov.len();
    }
    let mut mark_glyph_sets = buf.into_vec();
    for cov in &set_coverages {
        mark_glyph_sets.extend_from_slice(cov);
    }

    let header = BeBuffer::new().push(1u16).push(2u16);
    with_children(
        header,
        &[
            glyph_class_def,
            attach_list,
            lig_caret_list,
            mark_attach_class_def,
            mark_glyph_sets,
        ],
    )
}

// AttachList and LigCaretList: a coverage offset, a count, offsets to one
// table per covered glyph, then the coverage and the tables.
fn coverage_first(glyphs: &[u16], children: &[Vec<u8>]) -> Vec<u8> {
    let cov = coverage(glyphs);
    let header_len = 4 + children.len() * 2;
    let mut pos = header_len + cov.len();
    let mut buf = BeBuffer::new()
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
