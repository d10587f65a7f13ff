use super::*;
use otl_test_data::layout as test_data;
use pretty_assertions::assert_eq;

fn gid(raw: u16) -> GlyphId {
    GlyphId::new(raw)
}

#[test]
fn example_1_scripts() {
    // https://docs.microsoft.com/en-us/typography/opentype/spec/chapter2#example-1-scriptlist-table-and-scriptrecords
    let table = ScriptList::read(test_data::SCRIPTS.into()).unwrap();
    assert_eq!(table.script_count(), 3);
    assert_eq!(table.script_records()[0].tag(), Tag::new(b"hani"));
    assert_eq!(table.script_records()[1].tag(), Tag::new(b"kana"));
    assert_eq!(table.script_records()[2].tag(), Tag::new(b"latn"));
    let latn = table.script(Tag::new(b"latn")).unwrap().unwrap();
    assert!(latn.default_lang_sys().is_none());
}

#[test]
fn example_2_scripts_and_langs() {
    // https://docs.microsoft.com/en-us/typography/opentype/spec/chapter2#example-2-script-table-langsysrecord-and-langsys-table
    let table = Script::read(test_data::SCRIPTS_AND_LANGUAGES.into()).unwrap();
    let def_sys = table.default_lang_sys().unwrap().unwrap();
    assert_eq!(def_sys.required_feature_index(), None);
    assert_eq!(def_sys.feature_index_count(), 3);
    assert_eq!(def_sys.all_feature_indices().collect::<Vec<_>>(), [0, 1, 2]);
    assert_eq!(table.lang_sys_count(), 1);

    let urdu_record = &table.lang_sys_records()[0];
    assert_eq!(urdu_record.tag(), Tag::new(b"URD "));
    let urdu_sys: LangSys = urdu_record.offset().resolve(table.offset_data()).unwrap();
    assert_eq!(urdu_sys.required_feature_index(), Some(3));
    assert_eq!(urdu_sys.feature_index_count(), 3);
    assert_eq!(urdu_sys.all_feature_indices().collect::<Vec<_>>(), [3, 0, 1, 2]);
}

#[test]
fn example_3_featurelist_and_feature() {
    // https://docs.microsoft.com/en-us/typography/opentype/spec/chapter2#example-3-featurelist-table-and-feature-table
    let table = FeatureList::read(test_data::FEATURELIST_AND_FEATURE.into()).unwrap();
    assert_eq!(table.feature_count(), 3);
    let turkish_liga_record = &table.feature_records()[0];
    let feature: Feature = turkish_liga_record
        .offset()
        .resolve(table.offset_data())
        .unwrap();
    assert!(feature.feature_params_offset().is_null());
    assert_eq!(feature.lookup_list_indices().len(), 1);
    let last = table.get(2).unwrap();
    assert_eq!(
        last.lookup_list_indices()
            .iter()
            .map(|ix| ix.get())
            .collect::<Vec<_>>(),
        [0, 2]
    );
}

#[test]
fn example_4_lookuplist_and_lookup() {
    // https://docs.microsoft.com/en-us/typography/opentype/spec/chapter2#example-4-lookuplist-table-and-ligatures-lookup-table
    let table = LookupList::read(test_data::LOOKUPLIST_AND_LOOKUP.into()).unwrap();
    assert_eq!(table.lookup_count(), 1);
    let lookup = table.lookup(0).unwrap();
    assert_eq!(lookup.lookup_type(), 4);
    assert!(lookup.lookup_flag().ignore_ligatures());
    assert!(lookup.lookup_flag().ignore_marks());
    assert_eq!(lookup.subtable_count(), 1);
    assert_eq!(lookup.mark_filtering_set(), None);
    assert_eq!(lookup.subtable_data(0).unwrap().read_at::<u16>(0), Ok(1));
    assert!(table.lookup(1).is_err());
}

#[test]
fn lookup_with_mark_filtering_set() {
    let table = Lookup::read(test_data::LOOKUP_WITH_MARK_FILTERING_SET.into()).unwrap();
    assert!(table.lookup_flag().use_mark_filtering_set());
    assert_eq!(table.mark_filtering_set(), Some(2));
}

#[test]
fn example_5_coverage_format_1() {
    // https://docs.microsoft.com/en-us/typography/opentype/spec/chapter2#example-5-coverageformat1-table-glyph-list
    let coverage = CoverageTable::read(test_data::COVERAGEFORMAT1_TABLE.into()).unwrap();
    let CoverageTable::Format1(table) = coverage else {
        panic!("wrong coverage format");
    };
    assert_eq!(table.glyph_array().len(), 5);
    assert_eq!(table.glyph_array()[0].get(), gid(0x38));
    assert_eq!(table.glyph_array()[4].get(), gid(0x4a));
    assert_eq!(coverage.get(gid(0x41)), Some(2));
    assert_eq!(coverage.get(gid(0x40)), None);
}

#[test]
fn example_6_coverage_format_2() {
    // https://docs.microsoft.com/en-us/typography/opentype/spec/chapter2#example-6-coverageformat2-table-glyph-ranges
    let coverage = CoverageTable::read(test_data::COVERAGEFORMAT2_TABLE.into()).unwrap();
    let CoverageTable::Format2(table) = coverage else {
        panic!("wrong coverage format");
    };
    assert_eq!(table.range_records().len(), 1);
    let rec = table.range_records()[0];
    assert_eq!(rec.start_glyph_id(), gid(0x4e));
    assert_eq!(rec.end_glyph_id(), gid(0x57));
    assert_eq!(rec.start_coverage_index(), 0);
    assert_eq!(coverage.len(), 10);
    assert_eq!(coverage.get(gid(0x50)), Some(2));
}

#[test]
fn coverage_search_matches_linear_scan() {
    for bytes in [
        test_data::COVERAGEFORMAT1_TABLE,
        test_data::COVERAGEFORMAT2_TABLE,
        test_data::COVERAGEFORMAT2_MULTI_RANGE,
    ] {
        let coverage = CoverageTable::read(bytes.into()).unwrap();
        let covered = coverage.iter().collect::<Vec<_>>();
        for raw in 0..=0x200u16 {
            let linear = covered
                .iter()
                .position(|g| *g == gid(raw))
                .map(|ix| ix as u16);
            assert_eq!(coverage.get(gid(raw)), linear, "glyph {raw}");
        }
    }
}

#[test]
fn example_7_classdef_format_1() {
    // https://docs.microsoft.com/en-us/typography/opentype/spec/chapter2#example-7-classdefformat1-table-class-array
    let table = ClassDef::read(test_data::CLASSDEFFORMAT1_TABLE.into()).unwrap();
    let ClassDef::Format1(format1) = table else {
        panic!("wrong classdef format");
    };
    assert_eq!(format1.start_glyph_id(), gid(0x32));
    assert_eq!(format1.class_value_array().len(), 6);
    assert_eq!(table.get(gid(0x33)), 1);
    assert_eq!(table.get(gid(0x37)), 2);
    // outside of the array
    assert_eq!(table.get(gid(0x31)), 0);
    assert_eq!(table.get(gid(0x38)), 0);
    assert_eq!(
        table.iter().collect::<Vec<_>>(),
        [(gid(0x33), 1), (gid(0x35), 1), (gid(0x37), 2)]
    );
}

#[test]
fn example_8_classdef_format_2() {
    // https://docs.microsoft.com/en-us/typography/opentype/spec/chapter2#example-8-classdefformat2-table-class-ranges
    let table = ClassDef::read(test_data::CLASSDEFFORMAT2_TABLE.into()).unwrap();
    let ClassDef::Format2(format2) = table else {
        panic!("wrong classdef format");
    };
    assert_eq!(format2.class_range_records().len(), 3);
    assert_eq!(table.get(gid(0x30)), 2);
    assert_eq!(table.get(gid(0x41)), 3);
    assert_eq!(table.get(gid(0xd3)), 1);
}

#[test]
fn classdef_unlisted_glyphs_are_class_zero() {
    for bytes in [
        test_data::CLASSDEFFORMAT1_TABLE,
        test_data::CLASSDEFFORMAT2_TABLE,
    ] {
        let table = ClassDef::read(bytes.into()).unwrap();
        let assigned = table.iter().collect::<Vec<_>>();
        for raw in 0..=u16::MAX {
            if !assigned.iter().any(|(g, _)| *g == gid(raw)) {
                assert_eq!(table.get(gid(raw)), 0, "glyph {raw}");
            }
        }
    }
}

#[test]
fn unknown_formats() {
    let data = [0u8, 3, 0, 0];
    assert_eq!(
        CoverageTable::read(FontData::new(&data)).err(),
        Some(ReadError::InvalidFormat(3))
    );
    assert_eq!(
        ClassDef::read(FontData::new(&data)).err(),
        Some(ReadError::InvalidFormat(3))
    );
}

#[test]
fn truncated_arrays() {
    // format 1, claims three glyphs but only has one
    let data = [0u8, 1, 0, 3, 0, 5];
    assert_eq!(
        CoverageTable::read(FontData::new(&data)).err(),
        Some(ReadError::OutOfBounds)
    );
}

#[test]
fn layout_header_versions() {
    let table = LayoutTable::read(test_data::LAYOUT_HEADER_1_0.into()).unwrap();
    assert_eq!(table.version(), MajorMinor::VERSION_1_0);
    assert_eq!(table.script_list_offset(), Offset16::new(10));
    assert_eq!(table.feature_variations_offset(), None);

    let table = LayoutTable::read(test_data::LAYOUT_HEADER_1_1.into()).unwrap();
    assert_eq!(table.version(), MajorMinor::VERSION_1_1);
    assert_eq!(table.feature_variations_offset(), Some(Offset32::new(0)));
    assert!(LayoutTable::read(FontData::new(&[0, 2, 0, 0])).is_err());
}
