//! Common layout tables, mostly from the examples in the OpenType spec.
//!
//! <https://learn.microsoft.com/en-us/typography/opentype/spec/chapter2#common-table-examples>

// Example 1, with the script tables shrunk to empty ones
#[rustfmt::skip]
pub static SCRIPTS: &[u8] = &[
    0x00, 0x03, // scriptCount
    0x68, 0x61, 0x6E, 0x69, 0x00, 0x14, // 'hani', offset 20
    0x6B, 0x61, 0x6E, 0x61, 0x00, 0x18, // 'kana', offset 24
    0x6C, 0x61, 0x74, 0x6E, 0x00, 0x1C, // 'latn', offset 28
    0x00, 0x00, 0x00, 0x00, // hani: no default LangSys, no records
    0x00, 0x00, 0x00, 0x00, // kana
    0x00, 0x00, 0x00, 0x00, // latn
];

// Example 2
#[rustfmt::skip]
pub static SCRIPTS_AND_LANGUAGES: &[u8] = &[
    0x00, 0x0A, // defaultLangSysOffset
    0x00, 0x01, // langSysCount
    0x55, 0x52, 0x44, 0x20, 0x00, 0x16, // 'URD ', offset 22
    // default LangSys
    0x00, 0x00, // lookupOrderOffset
    0xFF, 0xFF, // requiredFeatureIndex, none
    0x00, 0x03, // featureIndexCount
    0x00, 0x00, 0x00, 0x01, 0x00, 0x02,
    // Urdu LangSys
    0x00, 0x00,
    0x00, 0x03, // requiredFeatureIndex
    0x00, 0x03,
    0x00, 0x00, 0x00, 0x01, 0x00, 0x02,
];

// Example 3
#[rustfmt::skip]
pub static FEATURELIST_AND_FEATURE: &[u8] = &[
    0x00, 0x03, // featureCount
    0x6C, 0x69, 0x67, 0x61, 0x00, 0x14, // 'liga', offset 20
    0x6C, 0x69, 0x67, 0x61, 0x00, 0x1A, // 'liga', offset 26
    0x6C, 0x69, 0x67, 0x61, 0x00, 0x22, // 'liga', offset 34
    // TurkishLigatures
    0x00, 0x00, // featureParamsOffset
    0x00, 0x01, // lookupIndexCount
    0x00, 0x00,
    // DeuLigatures
    0x00, 0x00,
    0x00, 0x02,
    0x00, 0x00, 0x00, 0x01,
    // LatinLigatures
    0x00, 0x00,
    0x00, 0x02,
    0x00, 0x00, 0x00, 0x02,
];

// Example 4
#[rustfmt::skip]
pub static LOOKUPLIST_AND_LOOKUP: &[u8] = &[
    0x00, 0x01, // lookupCount
    0x00, 0x04, // lookupOffsets[0]
    // Lookup
    0x00, 0x04, // lookupType: ligature
    0x00, 0x0C, // lookupFlag: IGNORE_LIGATURES | IGNORE_MARKS
    0x00, 0x01, // subTableCount
    0x00, 0x08, // subtableOffsets[0]
    // LigatureSubstFormat1, with no ligature sets
    0x00, 0x01, // substFormat
    0x00, 0x06, // coverageOffset
    0x00, 0x00, // ligatureSetCount
    0x00, 0x01, 0x00, 0x00, // empty coverage
];

#[rustfmt::skip]
pub static LOOKUP_WITH_MARK_FILTERING_SET: &[u8] = &[
    0x00, 0x01, // lookupType
    0x00, 0x10, // lookupFlag: USE_MARK_FILTERING_SET
    0x00, 0x00, // subTableCount
    0x00, 0x02, // markFilteringSet
];

// Example 5
#[rustfmt::skip]
pub static COVERAGEFORMAT1_TABLE: &[u8] = &[
    0x00, 0x01, // coverageFormat
    0x00, 0x05, // glyphCount
    0x00, 0x38, 0x00, 0x3B, 0x00, 0x41, 0x00, 0x42, 0x00, 0x4A,
];

// Example 6
#[rustfmt::skip]
pub static COVERAGEFORMAT2_TABLE: &[u8] = &[
    0x00, 0x02, // coverageFormat
    0x00, 0x01, // rangeCount
    0x00, 0x4E, 0x00, 0x57, 0x00, 0x00, // start, end, startCoverageIndex
];

#[rustfmt::skip]
pub static COVERAGEFORMAT2_MULTI_RANGE: &[u8] = &[
    0x00, 0x02,
    0x00, 0x03,
    0x00, 0x10, 0x00, 0x12, 0x00, 0x00,
    0x00, 0x20, 0x00, 0x20, 0x00, 0x03,
    0x01, 0x00, 0x01, 0x04, 0x00, 0x04,
];

// Example 7
#[rustfmt::skip]
pub static CLASSDEFFORMAT1_TABLE: &[u8] = &[
    0x00, 0x01, // classFormat
    0x00, 0x32, // startGlyphID
    0x00, 0x06, // glyphCount
    0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x02,
];

// Example 8
#[rustfmt::skip]
pub static CLASSDEFFORMAT2_TABLE: &[u8] = &[
    0x00, 0x02, // classFormat
    0x00, 0x03, // classRangeCount
    0x00, 0x30, 0x00, 0x31, 0x00, 0x02,
    0x00, 0x40, 0x00, 0x41, 0x00, 0x03,
    0x00, 0xD2, 0x00, 0xD3, 0x00, 0x01,
];

#[rustfmt::skip]
pub static LAYOUT_HEADER_1_0: &[u8] = &[
    0x00, 0x01, 0x00, 0x00, // version 1.0
    0x00, 0x0A, // scriptListOffset
    0x00, 0x0C, // featureListOffset
    0x00, 0x0E, // lookupListOffset
];

#[rustfmt::skip]
pub static LAYOUT_HEADER_1_1: &[u8] = &[
    0x00, 0x01, 0x00, 0x01, // version 1.1
    0x00, 0x0E,
    0x00, 0x10,
    0x00, 0x12,
    0x00, 0x00, 0x00, 0x00, // featureVariationsOffset
];

/// Helpers for assembling layout tables with correct offsets.
///
/// Every function returns the bytes of one table, with any child tables
/// appended directly after it.
pub mod build {
    use otl_types::Tag;

    use crate::bebuffer::BeBuffer;

    pub(crate) fn offset16(len: usize) -> u16 {
        u16::try_from(len).expect("test table too large for a 16-bit offset")
    }

    /// A header of 16-bit offsets followed by the tables they point to.
    ///
    /// `header` is the fixed part preceding the offsets; `children` are
    /// appended in order.
    pub(crate) fn with_children(header: BeBuffer, children: &[Vec<u8>]) -> Vec<u8> {
        let mut pos = header.len() + children.len() * 2;
        let mut buf = header;
        for child in children {
            buf = buf.push(offset16(pos));
            pos += child.len();
        }
        let mut out = buf.into_vec();
        for child in children {
            out.extend_from_slice(child);
        }
        out
    }

    /// A ScriptList or FeatureList.
    pub fn tagged_list(items: &[(Tag, Vec<u8>)]) -> Vec<u8> {
        let mut pos = 2 + items.len() * 6;
        let mut buf = BeBuffer::new().push(items.len() as u16);
        for (tag, table) in items {
            buf = buf.push(*tag).push(offset16(pos));
            pos += table.len();
        }
        let mut out = buf.into_vec();
        for (_, table) in items {
            out.extend_from_slice(table);
        }
        out
    }

    pub fn script(default_lang_sys: Option<Vec<u8>>, lang_sys: &[(Tag, Vec<u8>)]) -> Vec<u8> {
        let header_len = 4 + lang_sys.len() * 6;
        let default_len = default_lang_sys.as_ref().map(Vec::len).unwrap_or_default();
        let default_offset = if default_lang_sys.is_some() {
            offset16(header_len)
        } else {
            0
        };
        let mut buf = BeBuffer::new()
            .push(default_offset)
            .push(lang_sys.len() as u16);
        let mut pos = header_len + default_len;
        for (tag, table) in lang_sys {
            buf = buf.push(*tag).push(offset16(pos));
            pos += table.len();
        }
        let mut out = buf.into_vec();
        out.extend(default_lang_sys.unwrap_or_default());
        for (_, table) in lang_sys {
            out.extend_from_slice(table);
        }
        out
    }

    pub fn lang_sys(required_feature: Option<u16>, features: &[u16]) -> Vec<u8> {
        BeBuffer::new()
            .push(0u16)
            .push(required_feature.unwrap_or(0xFFFF))
            .push(features.len() as u16)
            .extend(features.iter().copied())
            .into_vec()
    }

    pub fn feature(lookups: &[u16]) -> Vec<u8> {
        BeBuffer::new()
            .push(0u16)
            .push(lookups.len() as u16)
            .extend(lookups.iter().copied())
            .into_vec()
    }

    pub fn lookup_list(lookups: &[Vec<u8>]) -> Vec<u8> {
        with_children(BeBuffer::new().push(lookups.len() as u16), lookups)
    }

    pub fn lookup(lookup_type: u16, flag: u16, subtables: &[Vec<u8>]) -> Vec<u8> {
        let header = BeBuffer::new()
            .push(lookup_type)
            .push(flag)
            .push(subtables.len() as u16);
        with_children(header, subtables)
    }

    pub fn coverage(glyphs: &[u16]) -> Vec<u8> {
        BeBuffer::new()
            .push(1u16)
            .push(glyphs.len() as u16)
            .extend(glyphs.iter().copied())
            .into_vec()
    }

    /// A GSUB or GPOS table, with the three lists in the usual order.
    pub fn layout_table(scripts: Vec<u8>, features: Vec<u8>, lookups: Vec<u8>) -> Vec<u8> {
        let script_offset = 10;
        let feature_offset = script_offset + scripts.len();
        let lookup_offset = feature_offset + features.len();
        let mut out = BeBuffer::new()
            .push(1u16)
            .push(0u16)
            .push(offset16(script_offset))
            .push(offset16(feature_offset))
            .push(offset16(lookup_offset))
            .into_vec();
        out.extend(scripts);
        out.extend(features);
        out.extend(lookups);
        out
    }
}
