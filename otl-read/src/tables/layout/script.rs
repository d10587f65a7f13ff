//! Additional support for working with OpenType scripts.

use super::{first_index_for_tag, LangSys, ReadError, ResolveOffset, Script, ScriptList, TaggedElement};
use types::Tag;

/// A script chosen from a set of candidate tags.
///
/// Returned by the [`ScriptList::select`] method.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SelectedScript {
    /// The actual OpenType tag of the chosen script.
    pub tag: Tag,
    /// Index of the script in the [`ScriptList`].
    pub index: u16,
    /// True if a script was chosen that wasn't in the requested list.
    pub is_fallback: bool,
}

impl<'a> ScriptList<'a> {
    /// Returns the index of the first script with the given tag.
    pub fn index_for_tag(&self, tag: Tag) -> Option<u16> {
        first_index_for_tag(self.script_records(), tag)
    }

    /// Finds the first available script that matches one of the given tags.
    ///
    /// When none of the requested scripts are available, then `DFLT`, `dflt`
    /// and `latn` tags are tried in that order.
    ///
    /// See [`hb_ot_layout_table_select_script`](https://github.com/harfbuzz/harfbuzz/blob/2edc371e97d6d2c5ad0e085b26e9af0123501647/src/hb-ot-layout.cc#L547)
    /// for the corresponding HarfBuzz function.
    pub fn select(&self, tags: &[Tag]) -> Option<SelectedScript> {
        for &tag in tags {
            if let Some(index) = self.index_for_tag(tag) {
                return Some(SelectedScript {
                    tag,
                    index,
                    is_fallback: false,
                });
            }
        }
        for tag in [
            // Try finding 'DFLT'
            Tag::new(b"DFLT"),
            // Try with 'dflt'; MS site has had typos and many fonts use it now :(
            Tag::new(b"dflt"),
            // try with 'latn'; some old fonts put their features there even though
            // they're really trying to support Thai, for example :(
            Tag::new(b"latn"),
        ] {
            if let Some(index) = self.index_for_tag(tag) {
                return Some(SelectedScript {
                    tag,
                    index,
                    is_fallback: true,
                });
            }
        }
        None
    }
}

impl<'a> Script<'a> {
    /// Returns the index of the first language system with the given tag.
    pub fn lang_sys_index_for_tag(&self, tag: Tag) -> Option<u16> {
        first_index_for_tag(self.lang_sys_records(), tag)
    }

    /// Returns the tag and language system at the given index.
    pub fn get(&self, index: u16) -> Result<TaggedElement<LangSys<'a>>, ReadError> {
        let record = self
            .lang_sys_records()
            .get(index as usize)
            .ok_or(ReadError::OutOfBounds)?;
        Ok(TaggedElement::new(
            record.tag(),
            record.offset().resolve(self.offset_data())?,
        ))
    }

    /// Returns the first language system with the given tag, if present.
    ///
    /// This does not fall back to the default language system.
    pub fn lang_sys(&self, tag: Tag) -> Option<Result<LangSys<'a>, ReadError>> {
        let index = self.lang_sys_index_for_tag(tag)?;
        Some(self.get(index).map(|lang_sys| lang_sys.element))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FontData, FontRead};
    use otl_test_data::layout as test_data;

    #[test]
    fn select_falls_back() {
        let list = ScriptList::read(FontData::new(test_data::SCRIPTS)).unwrap();
        let selected = list.select(&[Tag::new(b"kana")]).unwrap();
        assert_eq!(selected.index, 1);
        assert!(!selected.is_fallback);
        let selected = list.select(&[Tag::new(b"arab")]).unwrap();
        assert_eq!(selected.tag, Tag::new(b"latn"));
        assert!(selected.is_fallback);
        assert_eq!(list.index_for_tag(Tag::new(b"cyrl")), None);
    }

    #[test]
    fn lang_sys_by_tag() {
        let script = Script::read(FontData::new(test_data::SCRIPTS_AND_LANGUAGES)).unwrap();
        let urdu = script.lang_sys(Tag::new(b"URD ")).unwrap().unwrap();
        assert_eq!(urdu.required_feature_index(), Some(3));
        assert!(script.lang_sys(Tag::new(b"ENG ")).is_none());
        assert!(script.get(1).is_err());
    }
}
