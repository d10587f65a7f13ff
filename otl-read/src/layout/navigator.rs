//! Uniform, lazily-resolved access to the layout structures

use types::Tag;

use crate::tables::layout::{
    Feature, FeatureList, LangSys, Lookup, LookupList, Script, ScriptList,
};
use crate::ReadError;

/// A cursor over one of the structures shared by GSUB and GPOS.
///
/// A structure is reached from its parent in one of three ways:
///
/// - [`link`](Self::link): the single structure it points to (a script's
///   default language system);
/// - [`map`](Self::map): the first child with a given tag (scripts,
///   language systems and features);
/// - [`navigate`](Self::navigate): the child at a given index (scripts,
///   features and lookups).
///
/// [`list`](Self::list) returns the ordered indices held by a structure (the
/// features of a language system, or the lookups of a feature).
///
/// A way of moving that does not apply to a structure, or a child that is
/// not present, produces [`Navigator::Empty`]. A structure that fails to
/// parse produces [`Navigator::Error`], and every navigator derived from an
/// error carries that same error.
#[derive(Clone, Debug)]
pub enum Navigator<'a> {
    ScriptList(ScriptList<'a>),
    Script(Script<'a>),
    LangSys(LangSys<'a>),
    FeatureList(FeatureList<'a>),
    Feature(Feature<'a>),
    LookupList(LookupList<'a>),
    Lookup(Lookup<'a>),
    Empty,
    Error(ReadError),
}

macro_rules! navigator_from {
    ($($variant:ident),*) => {
        $(
            impl<'a> From<$variant<'a>> for Navigator<'a> {
                fn from(src: $variant<'a>) -> Self {
                    Navigator::$variant(src)
                }
            }
        )*
    };
}

navigator_from!(ScriptList, Script, LangSys, FeatureList, Feature, LookupList, Lookup);

impl<'a, T: Into<Navigator<'a>>> From<Result<T, ReadError>> for Navigator<'a> {
    fn from(src: Result<T, ReadError>) -> Self {
        match src {
            Ok(item) => item.into(),
            Err(e) => Navigator::Error(e),
        }
    }
}

impl<'a, T: Into<Navigator<'a>>> From<Option<Result<T, ReadError>>> for Navigator<'a> {
    fn from(src: Option<Result<T, ReadError>>) -> Self {
        match src {
            Some(item) => item.into(),
            None => Navigator::Empty,
        }
    }
}

impl<'a> Navigator<'a> {
    /// Follow the single link out of this structure.
    pub fn link(&self) -> Navigator<'a> {
        match self {
            Navigator::Script(script) => script.default_lang_sys().into(),
            Navigator::Error(e) => Navigator::Error(e.clone()),
            _ => Navigator::Empty,
        }
    }

    /// Find the first child with the given tag.
    pub fn map(&self, tag: Tag) -> Navigator<'a> {
        match self {
            Navigator::ScriptList(list) => list.script(tag).into(),
            Navigator::Script(script) => script.lang_sys(tag).into(),
            Navigator::FeatureList(list) => list.feature(tag).into(),
            Navigator::Error(e) => Navigator::Error(e.clone()),
            _ => Navigator::Empty,
        }
    }

    /// The child at `index`.
    pub fn navigate(&self, index: u16) -> Navigator<'a> {
        match self {
            Navigator::ScriptList(list) => list.get(index).map(|script| script.element).into(),
            Navigator::FeatureList(list) => list.get(index).map(|feature| feature.element).into(),
            Navigator::LookupList(list) => list.lookup(index).into(),
            Navigator::Error(e) => Navigator::Error(e.clone()),
            _ => Navigator::Empty,
        }
    }

    /// The ordered indices held by this structure.
    ///
    /// For a language system these are feature indices, with the required
    /// feature (if any) first; for a feature they are lookup indices.
    pub fn list(&self) -> Result<Vec<u16>, ReadError> {
        match self {
            Navigator::LangSys(lang_sys) => Ok(lang_sys.all_feature_indices().collect()),
            Navigator::Feature(feature) => Ok(feature.lookup_indices().collect()),
            Navigator::Error(e) => Err(e.clone()),
            _ => Ok(Vec::new()),
        }
    }

    /// The error carried by this navigator, if any.
    pub fn error(&self) -> Option<&ReadError> {
        match self {
            Navigator::Error(e) => Some(e),
            _ => None,
        }
    }

    /// Returns `true` if this navigator points at nothing.
    pub fn is_empty(&self) -> bool {
        matches!(self, Navigator::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::gsub::Gsub;
    use crate::{FontData, FontRead};
    use otl_test_data::{gsub::synthetic_gsub, layout as test_data};
    use pretty_assertions::assert_eq;

    fn tag(bytes: &[u8; 4]) -> Tag {
        Tag::new(bytes)
    }

    #[test]
    fn script_to_lookups() {
        let data = synthetic_gsub();
        let gsub = Gsub::read(FontData::new(&data)).unwrap();
        let scripts = Navigator::from(gsub.script_list());
        let latn = scripts.map(tag(b"latn"));
        assert_eq!(latn.link().list().unwrap(), [0, 3]);
        assert_eq!(latn.map(tag(b"TRK ")).list().unwrap(), [2, 1]);
        assert!(latn.map(tag(b"DEU ")).is_empty());

        let features = Navigator::from(gsub.feature_list());
        let liga = features.map(tag(b"liga"));
        assert_eq!(liga.list().unwrap(), [1]);
        assert_eq!(features.navigate(2).list().unwrap(), [1]);

        let lookups = Navigator::from(gsub.lookup_list());
        let Navigator::Lookup(lookup) = lookups.navigate(1) else {
            panic!("expected a lookup");
        };
        assert_eq!(lookup.lookup_type(), 4);
        assert!(lookups.navigate(5).error().is_some());
    }

    #[test]
    fn facades_without_meaning_are_empty() {
        let data = synthetic_gsub();
        let gsub = Gsub::read(FontData::new(&data)).unwrap();
        let lookups = Navigator::from(gsub.lookup_list());
        assert!(lookups.link().is_empty());
        assert!(lookups.map(tag(b"liga")).is_empty());
        assert_eq!(lookups.list().unwrap(), Vec::<u16>::new());
        let scripts = Navigator::from(gsub.script_list());
        assert!(scripts.link().is_empty());
        assert!(scripts.map(tag(b"cyrl")).is_empty());
        assert!(Navigator::Empty.navigate(0).is_empty());
    }

    #[test]
    fn errors_are_sticky() {
        // a script list whose only script offset points past the end
        let data = [0u8, 1, b'l', b'a', b't', b'n', 0, 0x40];
        let scripts = Navigator::from(ScriptList::read(FontData::new(&data)));
        let latn = scripts.map(tag(b"latn"));
        assert_eq!(latn.error(), Some(&ReadError::OutOfBounds));
        let lang_sys = latn.map(tag(b"TRK ")).link();
        assert_eq!(lang_sys.error(), Some(&ReadError::OutOfBounds));
        assert_eq!(lang_sys.list(), Err(ReadError::OutOfBounds));
        assert_eq!(
            lang_sys.navigate(3).error(),
            Some(&ReadError::OutOfBounds)
        );
    }

    #[test]
    fn default_lang_sys() {
        let script = Script::read(FontData::new(test_data::SCRIPTS_AND_LANGUAGES)).unwrap();
        let nav = Navigator::from(script);
        assert_eq!(nav.link().list().unwrap(), [0, 1, 2]);
        assert_eq!(nav.map(tag(b"URD ")).list().unwrap(), [3, 0, 1, 2]);

        // 'hani' has neither a default nor any other language system
        let script = Script::read(FontData::new(&test_data::SCRIPTS[0x14..])).unwrap();
        let nav = Navigator::from(script);
        assert!(nav.link().is_empty());
        assert!(nav.link().list().unwrap().is_empty());
    }

    #[test]
    fn navigation_is_repeatable() {
        let data = synthetic_gsub();
        let gsub = Gsub::read(FontData::new(&data)).unwrap();
        let resolve = || {
            let lang_sys = Navigator::from(gsub.script_list())
                .map(tag(b"latn"))
                .map(tag(b"TRK "));
            let feature_indices = lang_sys.list().unwrap();
            let features = Navigator::from(gsub.feature_list());
            let lookup_indices = feature_indices
                .iter()
                .map(|ix| features.navigate(*ix).list().unwrap())
                .collect::<Vec<_>>();
            let lookups = Navigator::from(gsub.lookup_list());
            let lookup_types = lookup_indices
                .iter()
                .flatten()
                .map(|ix| match lookups.navigate(*ix) {
                    Navigator::Lookup(lookup) => lookup.lookup_type(),
                    other => panic!("expected lookup, found {other:?}"),
                })
                .collect::<Vec<_>>();
            (feature_indices, lookup_indices, lookup_types)
        };
        let first = resolve();
        assert_eq!(first, resolve());
        assert_eq!(first.0, [2, 1]);
        assert_eq!(first.2, [4, 2]);
    }
}
