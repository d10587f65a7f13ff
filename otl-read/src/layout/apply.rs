//! Applying GSUB features to a glyph buffer

use types::GlyphId;

use super::{FontFeature, LayoutKind, Navigator};
use crate::tables::gsub::{self, SingleSubst, SubstitutionSubtable};
use crate::tables::layout::Lookup;
use crate::{Font, ReadError};

/// Apply a GSUB feature to the glyph at `pos`.
///
/// The feature's lookups are tried in order, and the first one that
/// applies is the only one used. Within a lookup, the first subtable whose
/// coverage contains the glyph decides the outcome.
///
/// `alt` picks the replacement for alternate substitutions; `-1` selects
/// the last alternate. It is ignored by the other lookup types.
///
/// Returns the position after the substituted glyphs and `true` if the
/// buffer was changed, or `(pos, false)` if nothing applied.
pub fn apply_feature(
    font: &Font,
    feature: &FontFeature,
    glyphs: &mut Vec<GlyphId>,
    pos: usize,
    alt: i32,
) -> (usize, bool) {
    if feature.table != LayoutKind::Gsub {
        log::debug!("'{}' is a positioning feature", feature.tag);
        return (pos, false);
    }
    if pos >= glyphs.len() {
        return (pos, false);
    }
    let Some(gsub) = font.gsub() else {
        return (pos, false);
    };
    let lookups = Navigator::from(gsub.lookup_list());
    let lookup_indices = match feature.navigator.list() {
        Ok(indices) => indices,
        Err(e) => {
            log::debug!("feature '{}' is malformed: {e}", feature.tag);
            return (pos, false);
        }
    };
    for index in lookup_indices {
        let lookup = match lookups.navigate(index) {
            Navigator::Lookup(lookup) => lookup,
            Navigator::Error(e) => {
                log::debug!("skipping lookup {index} of '{}': {e}", feature.tag);
                continue;
            }
            _ => continue,
        };
        if let Some(next) = apply_lookup(lookup, glyphs, pos, alt) {
            log::trace!(
                "'{}' lookup {index} applied at {pos}, continuing at {next}",
                feature.tag
            );
            return (next, true);
        }
    }
    (pos, false)
}

fn apply_lookup(lookup: Lookup, glyphs: &mut Vec<GlyphId>, pos: usize, alt: i32) -> Option<usize> {
    let glyph = *glyphs.get(pos)?;
    for subtable in gsub::subtables(lookup) {
        let subtable = match subtable {
            Ok(subtable) => subtable,
            Err(e) => {
                log::debug!("skipping malformed GSUB subtable: {e}");
                continue;
            }
        };
        let coverage = match subtable.coverage() {
            Some(Ok(coverage)) => coverage,
            Some(Err(e)) => {
                log::debug!("skipping GSUB subtable with malformed coverage: {e}");
                continue;
            }
            None => {
                log::debug!("skipping GSUB lookup type {}", subtable.lookup_type());
                continue;
            }
        };
        let Some(coverage_index) = coverage.get(glyph) else {
            continue;
        };
        return apply_subtable(subtable, coverage_index, glyphs, pos, alt).unwrap_or_else(|e| {
            log::debug!("failed to apply GSUB subtable: {e}");
            None
        });
    }
    None
}

fn apply_subtable(
    subtable: SubstitutionSubtable,
    coverage_index: u16,
    glyphs: &mut Vec<GlyphId>,
    pos: usize,
    alt: i32,
) -> Result<Option<usize>, ReadError> {
    match subtable {
        SubstitutionSubtable::Single(SingleSubst::Format1(table)) => {
            glyphs[pos] = glyphs[pos].wrapping_add_delta(table.delta_glyph_id());
            Ok(Some(pos + 1))
        }
        SubstitutionSubtable::Single(SingleSubst::Format2(table)) => {
            let substitute = table
                .substitute_glyph_ids()
                .get(coverage_index as usize)
                .ok_or(ReadError::OutOfBounds)?;
            glyphs[pos] = substitute.get();
            Ok(Some(pos + 1))
        }
        SubstitutionSubtable::Multiple(table) => {
            let sequence = table.sequence(coverage_index)?.substitute_glyph_ids();
            glyphs.splice(pos..pos + 1, sequence.iter().map(|gid| gid.get()));
            Ok(Some(pos + sequence.len()))
        }
        SubstitutionSubtable::Alternate(table) => {
            let alternates = table.alternate_set(coverage_index)?.alternate_glyph_ids();
            let Some(alternate) = select_alternate(alternates.len(), alt) else {
                log::debug!(
                    "alternate {alt} out of range for {} alternates",
                    alternates.len()
                );
                return Ok(None);
            };
            glyphs[pos] = alternates[alternate].get();
            Ok(Some(pos + 1))
        }
        SubstitutionSubtable::Ligature(table) => {
            let ligature_set = table.ligature_set(coverage_index)?;
            for ligature in ligature_set.ligatures() {
                let ligature = match ligature {
                    Ok(ligature) => ligature,
                    Err(e) => {
                        log::debug!("skipping malformed ligature: {e}");
                        continue;
                    }
                };
                if ligature.matches(&glyphs[pos + 1..]) {
                    let end = pos + ligature.component_count() as usize;
                    glyphs.splice(pos..end, [ligature.ligature_glyph()]);
                    return Ok(Some(pos + 1));
                }
            }
            Ok(None)
        }
        SubstitutionSubtable::Other { .. } => Ok(None),
    }
}

fn select_alternate(count: usize, alt: i32) -> Option<usize> {
    match alt {
        -1 => count.checked_sub(1),
        alt => usize::try_from(alt).ok().filter(|alt| *alt < count),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font_features;
    use crate::tables::gsub::lookup_type;
    use otl_test_data::{
        be_buffer,
        font::{self as test_data, build_font},
        gsub as gsub_data,
        layout::build,
    };
    use pretty_assertions::assert_eq;
    use types::Tag;

    fn tag(bytes: &[u8; 4]) -> Tag {
        Tag::new(bytes)
    }

    fn gids(raw: &[u16]) -> Vec<GlyphId> {
        raw.iter().copied().map(GlyphId::new).collect()
    }

    /// Run `feature` from the synthetic font over `glyphs` at `pos`.
    fn run(feature: &[u8; 4], glyphs: &[u16], pos: usize, alt: i32) -> (Vec<u16>, usize, bool) {
        let _ = env_logger::builder().is_test(true).try_init();
        let data = test_data::simple_font();
        let font = crate::parse(&data).unwrap();
        let (features, _, _) = font_features(&font, Tag::new(b"DFLT"), None);
        let feature = features
            .iter()
            .find(|feat| feat.tag == tag(feature))
            .unwrap();
        let mut buf = gids(glyphs);
        let (next, applied) = apply_feature(&font, feature, &mut buf, pos, alt);
        let buf = buf.iter().map(|gid| gid.to_u16()).collect();
        (buf, next, applied)
    }

    #[test]
    fn single_format1() {
        assert_eq!(run(b"smcp", &[10], 0, 0), (vec![15], 1, true));
        assert_eq!(run(b"smcp", &[3, 10, 4], 1, 0), (vec![3, 15, 4], 2, true));
        assert_eq!(run(b"smcp", &[11], 0, 0), (vec![11], 0, false));
    }

    #[test]
    fn single_format2_through_extension() {
        assert_eq!(run(b"salt", &[50, 50], 1, 0), (vec![50, 51], 2, true));
    }

    #[test]
    fn ligature() {
        assert_eq!(
            run(b"liga", &[19, 20, 21, 22], 1, 0),
            (vec![19, 99, 22], 2, true)
        );
        // the components must follow the covered glyph
        assert_eq!(
            run(b"liga", &[20, 22, 21], 0, 0),
            (vec![20, 22, 21], 0, false)
        );
        // and must all be present
        assert_eq!(run(b"liga", &[19, 20], 1, 0), (vec![19, 20], 1, false));
    }

    #[test]
    fn multiple() {
        assert_eq!(
            run(b"ccmp", &[1, 40, 2], 1, 0),
            (vec![1, 41, 42, 43, 2], 4, true)
        );
        // an empty sequence deletes the glyph
        assert_eq!(run(b"ccmp", &[1, 44, 2], 1, 0), (vec![1, 2], 1, true));
    }

    #[test]
    fn alternates() {
        assert_eq!(run(b"aalt", &[30], 0, 0), (vec![31], 1, true));
        assert_eq!(run(b"aalt", &[30], 0, 1), (vec![32], 1, true));
        assert_eq!(run(b"aalt", &[30], 0, -1), (vec![33], 1, true));
        assert_eq!(run(b"aalt", &[30], 0, 3), (vec![30], 0, false));
        assert_eq!(run(b"aalt", &[30], 0, -2), (vec![30], 0, false));
    }

    #[test]
    fn position_past_end() {
        assert_eq!(run(b"smcp", &[10], 1, 0), (vec![10], 1, false));
        assert_eq!(run(b"smcp", &[], 0, 0), (vec![], 0, false));
    }

    #[test]
    fn select_alternates() {
        assert_eq!(select_alternate(3, -1), Some(2));
        assert_eq!(select_alternate(0, -1), None);
        assert_eq!(select_alternate(3, 2), Some(2));
        assert_eq!(select_alternate(3, 3), None);
        assert_eq!(select_alternate(3, i32::MIN), None);
    }

    #[test]
    fn delta_wraps() {
        let lookups = build::lookup_list(&[build::lookup(
            lookup_type::SINGLE,
            0,
            &[gsub_data::single_subst_format1(&[0xFFFE], 5)],
        )]);
        let mut glyphs = gids(&[0xFFFE]);
        let data = single_lookup_font(lookups);
        let font = crate::parse(&data).unwrap();
        let (features, _, _) = font_features(&font, Tag::new(b"DFLT"), None);
        assert_eq!(apply_feature(&font, &features[0], &mut glyphs, 0, 0), (1, true));
        assert_eq!(glyphs, gids(&[3]));
    }

    #[test]
    fn first_covering_subtable_decides() {
        // the first subtable covers glyph 7 but needs an 8 to follow it; the
        // second would match, but is never reached
        let first: &[(u16, &[u16])] = &[(80, &[8])];
        let second: &[(u16, &[u16])] = &[(81, &[9])];
        let empty: &[(u16, &[u16])] = &[];
        let lookups = build::lookup_list(&[build::lookup(
            lookup_type::LIGATURE,
            0,
            &[
                gsub_data::ligature_subst(&[7], &[first]),
                gsub_data::ligature_subst(&[6, 7], &[empty, second]),
            ],
        )]);
        let data = single_lookup_font(lookups);
        let font = crate::parse(&data).unwrap();
        let (features, _, _) = font_features(&font, Tag::new(b"DFLT"), None);
        let mut glyphs = gids(&[7, 9]);
        assert_eq!(apply_feature(&font, &features[0], &mut glyphs, 0, 0), (0, false));
        assert_eq!(glyphs, gids(&[7, 9]));
    }

    #[test]
    fn later_lookups_are_tried_until_one_applies() {
        let ligature: &[(u16, &[u16])] = &[(80, &[8])];
        let lookups = build::lookup_list(&[
            build::lookup(
                lookup_type::LIGATURE,
                0,
                &[gsub_data::ligature_subst(&[7], &[ligature])],
            ),
            build::lookup(
                lookup_type::SINGLE,
                0,
                &[gsub_data::single_subst_format1(&[7], 1)],
            ),
        ]);
        let data = two_lookup_font(lookups);
        let font = crate::parse(&data).unwrap();
        let (features, _, _) = font_features(&font, Tag::new(b"DFLT"), None);
        // the ligature does not apply, so the single substitution is tried
        let mut glyphs = gids(&[7, 9]);
        assert_eq!(apply_feature(&font, &features[0], &mut glyphs, 0, 0), (1, true));
        assert_eq!(glyphs, gids(&[8, 9]));
        // the ligature applies, and is the only lookup used
        let mut glyphs = gids(&[7, 8]);
        assert_eq!(apply_feature(&font, &features[0], &mut glyphs, 0, 0), (1, true));
        assert_eq!(glyphs, gids(&[80]));
    }

    #[test]
    fn malformed_subtable_is_skipped() {
        // the first subtable has an unknown format; the second applies
        let bad = vec![0u8, 9, 0, 6, 0, 0];
        let lookups = build::lookup_list(&[build::lookup(
            lookup_type::SINGLE,
            0,
            &[bad, gsub_data::single_subst_format1(&[7], 2)],
        )]);
        let data = single_lookup_font(lookups);
        let font = crate::parse(&data).unwrap();
        let (features, _, _) = font_features(&font, Tag::new(b"DFLT"), None);
        let mut glyphs = gids(&[7]);
        assert_eq!(apply_feature(&font, &features[0], &mut glyphs, 0, 0), (1, true));
        assert_eq!(glyphs, gids(&[9]));
    }

    #[test]
    fn malformed_ligature_is_skipped() {
        // the set's first ligature offset points past the end of the table
        let subtable = be_buffer! {
            1_u16, 8_u16, 1_u16, 14_u16,    // format, coverage, one set at 14
            1_u16, 1_u16, 7_u16,            // coverage: glyph 7
            2_u16, 0xFFF0_u16, 6_u16,       // ligature set
            80_u16, 2_u16, 8_u16            // ligature 80 = 7 8
        };
        let lookups = build::lookup_list(&[build::lookup(
            lookup_type::LIGATURE,
            0,
            &[subtable.to_vec()],
        )]);
        let data = single_lookup_font(lookups);
        let font = crate::parse(&data).unwrap();
        let (features, _, _) = font_features(&font, Tag::new(b"DFLT"), None);
        let mut glyphs = gids(&[7, 8]);
        assert_eq!(apply_feature(&font, &features[0], &mut glyphs, 0, 0), (1, true));
        assert_eq!(glyphs, gids(&[80]));
    }

    #[test]
    fn positioning_features_do_nothing() {
        let data = test_data::simple_font();
        let font = crate::parse(&data).unwrap();
        let (mut features, _, _) = font_features(&font, Tag::new(b"DFLT"), None);
        let mut feature = features.remove(4);
        feature.table = LayoutKind::Gpos;
        let mut glyphs = gids(&[10]);
        assert_eq!(apply_feature(&font, &feature, &mut glyphs, 0, 0), (0, false));
        assert_eq!(glyphs, gids(&[10]));
    }

    // a font whose GSUB has one feature, 'test', using every lookup in order
    fn layout_font(lookups: Vec<u8>, lookup_indices: &[u16]) -> Vec<u8> {
        let scripts = build::tagged_list(&[(
            Tag::new(b"DFLT"),
            build::script(Some(build::lang_sys(None, &[0])), &[]),
        )]);
        let features = build::tagged_list(&[(Tag::new(b"test"), build::feature(lookup_indices))]);
        let gsub = build::layout_table(scripts, features, lookups);
        build_font(&[(Tag::new(b"GSUB"), gsub.as_slice())])
    }

    fn single_lookup_font(lookups: Vec<u8>) -> Vec<u8> {
        layout_font(lookups, &[0])
    }

    fn two_lookup_font(lookups: Vec<u8>) -> Vec<u8> {
        layout_font(lookups, &[0, 1])
    }
}
