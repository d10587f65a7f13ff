//! Additional support for working with OpenType features.

use super::{first_index_for_tag, Feature, FeatureList, ReadError, ResolveOffset, TaggedElement};
use types::Tag;

impl<'a> Feature<'a> {
    /// The indices of this feature's lookups, in the order they are applied.
    pub fn lookup_indices(&self) -> impl Iterator<Item = u16> + 'a {
        self.lookup_list_indices().iter().map(|ix| ix.get())
    }
}

impl<'a> FeatureList<'a> {
    /// Returns the tag and feature at the given index.
    pub fn get(&self, index: u16) -> Result<TaggedElement<Feature<'a>>, ReadError> {
        self.feature_records()
            .get(index as usize)
            .ok_or(ReadError::OutOfBounds)
            .and_then(|rec| {
                Ok(TaggedElement::new(
                    rec.tag(),
                    rec.offset().resolve(self.offset_data())?,
                ))
            })
    }

    /// Returns the index of the first feature with the given tag.
    ///
    /// Feature tags are frequently repeated (once per script or language
    /// system that uses them) so this is rarely what you want; prefer going
    /// through the indices of a [`LangSys`](super::LangSys).
    pub fn index_for_tag(&self, tag: Tag) -> Option<u16> {
        first_index_for_tag(self.feature_records(), tag)
    }

    /// Returns the first feature with the given tag, if present.
    pub fn feature(&self, tag: Tag) -> Option<Result<Feature<'a>, ReadError>> {
        let index = self.index_for_tag(tag)?;
        Some(self.get(index).map(|feature| feature.element))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FontData, FontRead};
    use otl_test_data::layout as test_data;

    #[test]
    fn feature_list_get() {
        let list = FeatureList::read(FontData::new(test_data::FEATURELIST_AND_FEATURE)).unwrap();
        assert_eq!(list.get(0).unwrap().tag, Tag::new(b"liga"));
        assert_eq!(list.get(2).unwrap().tag, Tag::new(b"liga"));
        assert!(list.get(3).is_err());
    }

    #[test]
    fn first_match_wins() {
        let list = FeatureList::read(FontData::new(test_data::FEATURELIST_AND_FEATURE)).unwrap();
        assert_eq!(list.index_for_tag(Tag::new(b"liga")), Some(0));
        let first = list.feature(Tag::new(b"liga")).unwrap().unwrap();
        assert_eq!(first.lookup_list_indices()[0].get(), 0);
        assert!(list.feature(Tag::new(b"smcp")).is_none());
    }
}
