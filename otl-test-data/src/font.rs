//! Assembling complete fonts out of individual tables.

use otl_types::{Tag, TT_SFNT_VERSION};

use crate::bebuffer::BeBuffer;

/// The number of glyphs in [`simple_font`].
pub const NUM_GLYPHS: u16 = 256;

/// The number of full metrics in the `hmtx` table of [`simple_font`].
pub const NUM_H_METRICS: u16 = 3;

/// Build an sfnt file with the given tables.
///
/// Records are written in the order given, so passing unsorted tags
/// produces a font with an invalid directory. Table data is padded to a
/// multiple of four bytes.
pub fn build_font(tables: &[(Tag, &[u8])]) -> Vec<u8> {
    build_font_with_version(TT_SFNT_VERSION, tables)
}

pub fn build_font_with_version(sfnt_version: u32, tables: &[(Tag, &[u8])]) -> Vec<u8> {
    let num_tables = tables.len() as u16;
    let entry_selector = num_tables.checked_ilog2().unwrap_or(0) as u16;
    let search_range = (1u16 << entry_selector) * 16;
    let range_shift = (num_tables * 16).saturating_sub(search_range);

    let mut directory = BeBuffer::new()
        .push(sfnt_version)
        .push(num_tables)
        .push(search_range)
        .push(entry_selector)
        .push(range_shift);
    let mut pos = 12 + tables.len() * 16;
    for (tag, data) in tables {
        directory = directory
            .push(*tag)
            .push(checksum(data))
            .push(pos as u32)
            .push(data.len() as u32);
        pos += padded_len(data.len());
    }
    let mut out = directory.into_vec();
    for (_, data) in tables {
        out.extend_from_slice(data);
        out.resize(padded_len(out.len()), 0);
    }
    out
}

fn padded_len(len: usize) -> usize {
    (len + 3) & !3
}

fn checksum(data: &[u8]) -> u32 {
    data.chunks(4)
        .map(|chunk| {
            let mut word = [0u8; 4];
            word[..chunk.len()].copy_from_slice(chunk);
            u32::from_be_bytes(word)
        })
        .fold(0u32, |sum, word| sum.wrapping_add(word))
}

/// A version 1.0 `head` table.
pub fn head(units_per_em: u16, index_to_loc_format: i16) -> Vec<u8> {
    BeBuffer::new()
        .push(1u16) // majorVersion
        .push(0u16) // minorVersion
        .push(0x0001_8000_i32) // fontRevision: 1.5
        .push(0u32) // checksumAdjustment
        .push(0x5F0F3CF5_u32) // magicNumber
        .push(0b1011_u16) // flags
        .push(units_per_em)
        .push(3_600_000_000_i64) // created
        .push(3_700_000_000_i64) // modified
        .extend([-50i16, -200, 950, 800]) // xMin, yMin, xMax, yMax
        .push(0u16) // macStyle
        .push(8u16) // lowestRecPPEM
        .push(2i16) // fontDirectionHint
        .push(index_to_loc_format)
        .push(0i16) // glyphDataFormat
        .into_vec()
}

/// A version 0.5 `maxp` table.
pub fn maxp(num_glyphs: u16) -> Vec<u8> {
    BeBuffer::new()
        .push(0x0000_5000_u32)
        .push(num_glyphs)
        .into_vec()
}

pub fn hhea(number_of_h_metrics: u16) -> Vec<u8> {
    BeBuffer::new()
        .push(1u16)
        .push(0u16)
        .push(800i16) // ascender
        .push(-200i16) // descender
        .push(90i16) // lineGap
        .push(1200u16) // advanceWidthMax
        .push(-50i16) // minLeftSideBearing
        .push(-20i16) // minRightSideBearing
        .push(950i16) // xMaxExtent
        .push(1i16) // caretSlopeRise
        .push(0i16) // caretSlopeRun
        .push(0i16) // caretOffset
        .extend([0i16; 4])
        .push(0i16) // metricDataFormat
        .push(number_of_h_metrics)
        .into_vec()
}

/// Full metrics `(500 + 100 * i, i)` for the first `num_h_metrics`
/// glyphs, then left side bearings equal to the glyph id.
pub fn hmtx(num_h_metrics: u16, num_glyphs: u16) -> Vec<u8> {
    let mut buf = BeBuffer::new();
    for i in 0..num_h_metrics {
        buf = buf.push(500 + 100 * i).push(i as i16);
    }
    for i in num_h_metrics..num_glyphs {
        buf = buf.push(i as i16);
    }
    buf.into_vec()
}

/// A short `loca` table where every glyph is 4 bytes long.
pub fn loca_short(num_glyphs: u16) -> Vec<u8> {
    BeBuffer::new()
        .extend((0..=num_glyphs).map(|gid| gid * 2))
        .into_vec()
}

/// A font with every table the reader interprets.
///
/// The cmap maps 'A'..='C' to glyphs 4..=6, the GSUB table is
/// [`synthetic_gsub`](crate::gsub::synthetic_gsub) and the GDEF table is
/// [`full_gdef`](crate::gdef::full_gdef).
pub fn simple_font() -> Vec<u8> {
    let letters = crate::cmap::letters_cmap4();
    let groups = crate::cmap::groups_cmap12();
    let cmap = crate::cmap::cmap_table(&[(3, 1, letters.as_slice()), (3, 10, groups.as_slice())]);
    let gdef = crate::gdef::full_gdef();
    let gsub = crate::gsub::synthetic_gsub();
    let head = head(1000, 0);
    let hhea = hhea(NUM_H_METRICS);
    let hmtx = hmtx(NUM_H_METRICS, NUM_GLYPHS);
    let loca = loca_short(NUM_GLYPHS);
    let maxp = maxp(NUM_GLYPHS);
    build_font(&[
        (Tag::new(b"GDEF"), gdef.as_slice()),
        (Tag::new(b"GSUB"), gsub.as_slice()),
        (Tag::new(b"cmap"), cmap.as_slice()),
        (Tag::new(b"head"), head.as_slice()),
        (Tag::new(b"hhea"), hhea.as_slice()),
        (Tag::new(b"hmtx"), hmtx.as_slice()),
        (Tag::new(b"kern"), crate::kern::KERN_VER_0_FMT_0_DATA),
        (Tag::new(b"loca"), loca.as_slice()),
        (Tag::new(b"maxp"), maxp.as_slice()),
    ])
}
