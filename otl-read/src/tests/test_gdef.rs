use types::{GlyphId, MajorMinor, Offset32};

use super::*;
use otl_test_data::bebuffer::BeBuffer;
use otl_test_data::gdef as test_data;
use pretty_assertions::assert_eq;

fn gid(raw: u16) -> GlyphId {
    GlyphId::new(raw)
}

#[test]
fn gdef_header() {
    let table = Gdef::read(test_data::GDEF_HEADER.into()).unwrap();
    assert_eq!(table.version(), MajorMinor::VERSION_1_0);
    assert!(table.attach_list().is_none());
    assert!(table.lig_caret_list().is_none());
    assert!(table.mark_attach_class_def().is_none());
    assert_eq!(table.mark_glyph_sets_def_offset(), None);
    assert_eq!(table.item_var_store_offset(), None);
}

#[test]
fn glyph_classes() {
    let table = Gdef::read(test_data::GDEF_HEADER.into()).unwrap();
    assert_eq!(table.glyph_class(gid(0x24)), GlyphClassDef::Base);
    assert_eq!(table.glyph_class(gid(0x9F)), GlyphClassDef::Ligature);
    assert_eq!(table.glyph_class(gid(0xA0)), GlyphClassDef::Mark);
    assert_eq!(table.glyph_class(gid(0xC0)), GlyphClassDef::Component);
    assert_eq!(table.glyph_class(gid(0x25)), GlyphClassDef::Unknown);
    // no mark attachment classes at all
    assert_eq!(table.mark_attach_class(gid(0xA0)), 0);
}

#[test]
fn attach_list_table() {
    let table = AttachList::read(test_data::ATTACHLIST_TABLE.into()).unwrap();
    assert_eq!(table.glyph_count(), 2);
    assert_eq!(table.attach_point_offsets().len(), 2);
    let attach_point = table.attach_point(1).unwrap();
    assert_eq!(attach_point.point_count(), 2);
    assert_eq!(attach_point.point_indices()[0].get(), 14);
    assert_eq!(attach_point.point_indices()[1].get(), 23);
    let first = table.points_for(gid(0x1C)).unwrap().unwrap();
    assert_eq!(first.point_indices()[0].get(), 18);
    assert!(table.points_for(gid(0x1D)).is_none());
    assert!(table.attach_point(2).is_err());
}

#[test]
fn caretvalueformat3() {
    let table = CaretValue::read(test_data::CARETVALUEFORMAT3_TABLE.into()).unwrap();
    let CaretValue::Format3(format3) = table else {
        panic!("wrong caret value format");
    };
    assert_eq!(format3.coordinate(), 1200);
    let device = format3.device_data().unwrap().unwrap();
    assert_eq!(device.read_at::<u16>(0), Ok(12));
    assert_eq!(device.read_at::<u16>(2), Ok(17));
}

#[test]
fn mark_glyph_sets() {
    let table = MarkGlyphSets::read(test_data::MARKGLYPHSETS_TABLE.into()).unwrap();
    assert_eq!(table.mark_glyph_set_count(), 2);
    assert!(table.contains(0, gid(200)));
    assert!(table.contains(0, gid(201)));
    assert!(!table.contains(0, gid(205)));
    assert!(table.contains(1, gid(205)));
    // sets that don't exist contain nothing
    assert!(!table.contains(2, gid(205)));
}

#[test]
fn full_table() {
    let data = test_data::full_gdef();
    let table = Gdef::read(FontData::new(&data)).unwrap();
    assert_eq!(table.version(), MajorMinor::VERSION_1_2);
    assert_eq!(table.glyph_class(gid(15)), GlyphClassDef::Base);
    assert_eq!(table.glyph_class(gid(99)), GlyphClassDef::Ligature);
    assert_eq!(table.glyph_class(gid(205)), GlyphClassDef::Mark);
    assert_eq!(table.glyph_class(gid(21)), GlyphClassDef::Unknown);

    assert_eq!(table.mark_attach_class(gid(201)), 1);
    assert_eq!(table.mark_attach_class(gid(202)), 2);
    assert_eq!(table.mark_attach_class(gid(203)), 0);

    let attach_list = table.attach_list().unwrap().unwrap();
    let points = attach_list.points_for(gid(12)).unwrap().unwrap();
    assert_eq!(
        points
            .point_indices()
            .iter()
            .map(|ix| ix.get())
            .collect::<Vec<_>>(),
        [2, 5]
    );

    let carets = table.lig_caret_list().unwrap().unwrap();
    assert_eq!(carets.lig_glyph_count(), 1);
    let lig_glyph = carets.lig_glyph_for(gid(99)).unwrap().unwrap();
    assert_eq!(lig_glyph.caret_count(), 3);
    let values = lig_glyph
        .caret_values()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert!(matches!(values[0], CaretValue::Format1(c) if c.coordinate() == 500));
    assert!(matches!(values[1], CaretValue::Format2(c) if c.caret_value_point_index() == 7));
    let CaretValue::Format3(format3) = values[2] else {
        panic!("expected a format 3 caret");
    };
    assert_eq!(format3.coordinate(), 300);
    assert!(format3.device_data().unwrap().is_ok());
    assert!(carets.lig_glyph_for(gid(98)).is_none());

    let sets = table.mark_glyph_sets_def().unwrap().unwrap();
    assert!(sets.contains(0, gid(200)));
    assert!(sets.contains(1, gid(205)));
}

#[test]
fn version_1_3() {
    let buf = BeBuffer::new()
        .push(MajorMinor::VERSION_1_3)
        .extend([0u16; 5])
        .push(0x1234u32);
    let table = Gdef::read(FontData::new(&buf)).unwrap();
    assert!(table.glyph_class_def().is_none());
    assert!(table.mark_glyph_sets_def().is_none());
    assert_eq!(table.item_var_store_offset(), Some(Offset32::new(0x1234)));
    assert_eq!(table.glyph_class(gid(1)), GlyphClassDef::Unknown);
    // truncated before the item variation store offset
    assert!(Gdef::read(FontData::new(&buf[..16])).is_err());
}

#[test]
fn unknown_major_version() {
    let buf = BeBuffer::new().push(MajorMinor::new(2, 0)).extend([0u16; 4]);
    assert_eq!(
        Gdef::read(FontData::new(&buf)).err(),
        Some(ReadError::InvalidFormat(2))
    );
}
