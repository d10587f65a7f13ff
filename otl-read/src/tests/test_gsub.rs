use types::GlyphId;

use super::*;
use otl_test_data::gsub as test_data;
use otl_test_data::layout::build;
use pretty_assertions::assert_eq;

fn gid(raw: u16) -> GlyphId {
    GlyphId::new(raw)
}

fn glyphs(ids: &[BigEndian<GlyphId>]) -> Vec<u16> {
    ids.iter().map(|id| id.get().to_u16()).collect()
}

#[test]
fn singlesubstformat1() {
    // https://learn.microsoft.com/en-us/typography/opentype/spec/gsub#example-2-singlesubstformat1-subtable
    let table = SingleSubstFormat1::read(test_data::SINGLESUBSTFORMAT1_TABLE.into()).unwrap();
    assert_eq!(table.delta_glyph_id(), 192);
    let coverage = table.coverage().unwrap();
    assert_eq!(coverage.get(gid(0x4E)), Some(0));
    assert_eq!(coverage.get(gid(0x58)), Some(10));
    assert_eq!(coverage.get(gid(0x59)), None);
}

#[test]
fn singlesubstformat2() {
    // https://learn.microsoft.com/en-us/typography/opentype/spec/gsub#example-3-singlesubstformat2-subtable
    let table = SingleSubstFormat2::read(test_data::SINGLESUBSTFORMAT2_TABLE.into()).unwrap();
    assert_eq!(
        glyphs(table.substitute_glyph_ids()),
        [0x131, 0x135, 0x13E, 0x143]
    );
    assert_eq!(table.coverage().unwrap().get(gid(0x4B)), Some(2));
}

#[test]
fn single_subst_dispatch() {
    let table = SingleSubst::read(test_data::SINGLESUBSTFORMAT2_TABLE.into()).unwrap();
    assert!(matches!(table, SingleSubst::Format2(_)));
    let bad = [0u8, 3, 0, 6, 0, 0];
    assert_eq!(
        SingleSubst::read(FontData::new(&bad)).err(),
        Some(ReadError::InvalidFormat(3))
    );
}

#[test]
fn multiplesubstformat1() {
    // https://learn.microsoft.com/en-us/typography/opentype/spec/gsub#example-4-multiplesubstformat1-subtable
    let table = MultipleSubstFormat1::read(test_data::MULTIPLESUBSTFORMAT1_TABLE.into()).unwrap();
    assert_eq!(table.sequence_count(), 1);
    let sequence = table.sequence(0).unwrap();
    assert_eq!(glyphs(sequence.substitute_glyph_ids()), [0x1A, 0x1A, 0x1D]);
    assert!(table.sequence(1).is_err());
}

#[test]
fn alternatesubstformat1() {
    // https://learn.microsoft.com/en-us/typography/opentype/spec/gsub#example-5-alternatesubstformat-1-subtable
    let table =
        AlternateSubstFormat1::read(test_data::ALTERNATESUBSTFORMAT1_TABLE.into()).unwrap();
    assert_eq!(table.alternate_set_count(), 1);
    assert_eq!(table.coverage().unwrap().get(gid(0x3A)), Some(0));
    let set = table.alternate_set(0).unwrap();
    assert_eq!(glyphs(set.alternate_glyph_ids()), [0xC9, 0xCA]);
}

#[test]
fn ligaturesubstformat1() {
    // https://learn.microsoft.com/en-us/typography/opentype/spec/gsub#example-6-ligaturesubstformat1-subtable
    let table = LigatureSubstFormat1::read(test_data::LIGATURESUBSTFORMAT1_TABLE.into()).unwrap();
    assert_eq!(table.ligature_set_count(), 2);

    let set = table.ligature_set(0).unwrap();
    let ligatures = set.ligatures().collect::<Result<Vec<_>, _>>().unwrap();
    assert_eq!(ligatures.len(), 1);
    assert_eq!(ligatures[0].ligature_glyph(), gid(0x15B));
    assert_eq!(ligatures[0].component_count(), 3);
    assert_eq!(glyphs(ligatures[0].component_glyph_ids()), [0x28, 0x17]);

    let set = table.ligature_set(1).unwrap();
    let ligatures = set.ligatures().collect::<Result<Vec<_>, _>>().unwrap();
    assert_eq!(ligatures.len(), 2);
    assert_eq!(ligatures[0].ligature_glyph(), gid(0xF1));
    assert_eq!(glyphs(ligatures[0].component_glyph_ids()), [0x1A, 0x1D]);
    assert_eq!(ligatures[1].ligature_glyph(), gid(0xF0));
    assert_eq!(glyphs(ligatures[1].component_glyph_ids()), [0x1D]);
}

#[test]
fn ligature_matching() {
    let table = LigatureSubstFormat1::read(test_data::LIGATURESUBSTFORMAT1_TABLE.into()).unwrap();
    let set = table.ligature_set(1).unwrap();
    let first = set.ligatures().next().unwrap().unwrap();
    assert!(first.matches(&[gid(0x1A), gid(0x1D)]));
    assert!(first.matches(&[gid(0x1A), gid(0x1D), gid(5)]));
    assert!(!first.matches(&[gid(0x1A)]));
    assert!(!first.matches(&[gid(0x1D), gid(0x1A)]));
}

#[test]
fn ligature_without_components() {
    let bad = [0u8, 0x10, 0, 0];
    assert!(matches!(
        Ligature::read(FontData::new(&bad)),
        Err(ReadError::MalformedData(_))
    ));
}

#[test]
fn extension_unwrapped() {
    let inner = test_data::single_subst_format2(&[50], &[51]);
    let data = test_data::extension_subst(lookup_type::SINGLE, &inner);
    let ext = ExtensionSubstFormat1::read(FontData::new(&data)).unwrap();
    assert_eq!(ext.extension_lookup_type(), 1);
    assert_eq!(ext.extension_offset().to_u32(), 8);

    let subtable = SubstitutionSubtable::read(FontData::new(&data), 7).unwrap();
    assert_eq!(subtable.lookup_type(), lookup_type::SINGLE);
    let SubstitutionSubtable::Single(SingleSubst::Format2(single)) = subtable else {
        panic!("expected single substitution, found {subtable:?}");
    };
    assert_eq!(glyphs(single.substitute_glyph_ids()), [51]);
}

#[test]
fn nested_extension_is_malformed() {
    let inner = test_data::extension_subst(1, &test_data::single_subst_format1(&[1], 1));
    let data = test_data::extension_subst(lookup_type::EXTENSION, &inner);
    assert!(matches!(
        SubstitutionSubtable::read(FontData::new(&data), 7),
        Err(ReadError::MalformedData(_))
    ));
}

#[test]
fn contextual_types_are_kept_uninterpreted() {
    let data = [0u8, 1, 0, 0];
    for ty in [5, 6, 8] {
        let subtable = SubstitutionSubtable::read(FontData::new(&data), ty).unwrap();
        assert_eq!(subtable.lookup_type(), ty);
        assert!(subtable.coverage().is_none());
    }
    assert!(SubstitutionSubtable::read(FontData::new(&data), 9).is_err());
}

#[test]
fn lookup_subtables() {
    let data = build::lookup(
        lookup_type::SINGLE,
        0,
        &[
            test_data::single_subst_format1(&[3], 1),
            test_data::single_subst_format2(&[4], &[9]),
        ],
    );
    let lookup = Lookup::read(FontData::new(&data)).unwrap();
    let all = subtables(lookup).collect::<Result<Vec<_>, _>>().unwrap();
    assert_eq!(all.len(), 2);
    let coverage = all[1].coverage().unwrap().unwrap();
    assert_eq!(coverage.get(gid(4)), Some(0));
}

#[test]
fn synthetic_table() {
    let data = test_data::synthetic_gsub();
    let gsub = Gsub::read(FontData::new(&data)).unwrap();
    let lookups = gsub.lookup_list().unwrap();
    assert_eq!(lookups.lookup_count(), 5);
    let types = lookups
        .lookups()
        .map(|lookup| lookup.unwrap().lookup_type())
        .collect::<Vec<_>>();
    assert_eq!(types, [1, 4, 3, 2, 7]);

    let extension = lookups.lookup(test_data::lookups::EXTENSION).unwrap();
    let subtable = subtables(extension).next().unwrap().unwrap();
    assert_eq!(subtable.lookup_type(), lookup_type::SINGLE);

    let multiple = lookups.lookup(test_data::lookups::MULTIPLE).unwrap();
    let Ok(SubstitutionSubtable::Multiple(table)) = subtables(multiple).next().unwrap() else {
        panic!("expected multiple substitution");
    };
    assert!(table.sequence(1).unwrap().substitute_glyph_ids().is_empty());
}
