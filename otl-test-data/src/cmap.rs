//! cmap test data for scenarios not readily produced with ttx

use crate::{be_buffer, bebuffer::BeBuffer};

/// Contains two codepoint ranges, both [6, 64]. Surely you don't duplicate them?
pub fn repetitive_cmap4() -> BeBuffer {
    // <https://learn.microsoft.com/en-us/typography/opentype/spec/cmap#format-4-segment-mapping-to-delta-values>
    be_buffer! {
      4_u16,                      // uint16	format
      0_u16,                      // uint16	length, unused
      0_u16,                      // uint16	language, unused
      4_u16,                      // uint16	segCountX2, 2 * 2 segments
      0_u16,                      // uint16	searchRange, unused
      0_u16,                      // uint16	entrySelector, unused
      0_u16,                      // uint16	rangeShift, unused
      // segCount endCode entries
      64_u16,                    // uint16	endCode[0]
      64_u16,                    // uint16	endCode[1]

      0_u16,                      // uint16	reservedPad, unused

      // segCount startCode entries
      6_u16,                      // uint16	startCode[0]
      6_u16,                      // uint16	startCode[1]

      // segCount idDelta entries
      0_u16,                      // uint16	idDelta[0]
      0_u16,                      // uint16	idDelta[1]

      // segCount idRangeOffset entries
      0_u16,                      // uint16	idRangeOffset[0]
      0_u16                       // uint16	idRangeOffset[1]

      // no glyphIdArray entries
    }
}

/// Maps 'A'..='C' to glyphs 4..=6 with a delta, and 'a', 'c' to glyphs 10
/// and 12 through the glyph id array. 'b' maps to the array's zero entry
/// and so to no glyph.
pub fn letters_cmap4() -> BeBuffer {
    be_buffer! {
      4_u16,                      // format
      46_u16,                     // length
      0_u16,                      // language
      6_u16,                      // segCountX2, 3 segments
      4_u16,                      // searchRange
      1_u16,                      // entrySelector
      2_u16,                      // rangeShift
      // endCode
      0x43_u16, 0x63_u16, 0xFFFF_u16,
      0_u16,                      // reservedPad
      // startCode
      0x41_u16, 0x61_u16, 0xFFFF_u16,
      // idDelta
      -61_i16, 1_i16, 1_i16,
      // idRangeOffset; the second points at glyphIdArray[0]
      0_u16, 4_u16, 0_u16,
      // glyphIdArray
      9_u16, 0_u16, 11_u16,
    }
}

/// A format 4 subtable whose segCountX2 is odd.
pub fn odd_seg_count_cmap4() -> BeBuffer {
    be_buffer! {
      4_u16, 0_u16, 0_u16,
      3_u16,                      // segCountX2
      0_u16, 0_u16, 0_u16,
      0xFFFF_u16, 0_u16, 0xFFFF_u16, 1_i16, 0_u16,
    }
}

/// Maps 'A'..='C' to 4..=6 and U+1F600..=U+1F602 to 100..=102.
pub fn groups_cmap12() -> BeBuffer {
    be_buffer! {
      12_u16,                     // format
      0_u16,                      // reserved
      40_u32,                     // length
      0_u32,                      // language
      2_u32,                      // numGroups
      0x41_u32, 0x43_u32, 4_u32,
      0x1F600_u32, 0x1F602_u32, 100_u32,
    }
}

/// A format 6 subtable, which is not interpreted.
pub fn trimmed_cmap6() -> BeBuffer {
    be_buffer! {
      6_u16,                      // format
      14_u16,                     // length
      0_u16,                      // language
      0x41_u16,                   // firstCode
      2_u16,                      // entryCount
      7_u16, 8_u16,
    }
}

/// Assemble a cmap table from `(platform, encoding, subtable)` triples, in
/// the given order.
pub fn cmap_table(subtables: &[(u16, u16, &[u8])]) -> Vec<u8> {
    let mut pos = 4 + subtables.len() * 8;
    let mut buf = BeBuffer::new().push(0u16).push(subtables.len() as u16);
    for (platform, encoding, subtable) in subtables {
        buf = buf.push(*platform).push(*encoding).push(pos as u32);
        pos += subtable.len();
    }
    let mut out = buf.into_vec();
    for (_, _, subtable) in subtables {
        out.extend_from_slice(subtable);
    }
    out
}
