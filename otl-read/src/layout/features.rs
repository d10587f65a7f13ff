//! Resolving the features enabled for a script and language

use types::Tag;

use super::Navigator;
use crate::tables::{gpos, gsub, layout::LayoutTable};
use crate::{Font, FormatError, ReadError};

/// The script used when a font has no entry for the requested one.
pub const DEFAULT_SCRIPT: Tag = Tag::new(b"DFLT");

/// The two layout tables that carry features.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayoutKind {
    Gsub,
    Gpos,
}

impl LayoutKind {
    /// The tag of the table.
    pub fn tag(self) -> Tag {
        match self {
            LayoutKind::Gsub => gsub::TAG,
            LayoutKind::Gpos => gpos::TAG,
        }
    }
}

/// A feature enabled for some script and language.
#[derive(Clone, Debug)]
pub struct FontFeature<'a> {
    /// The feature's tag, such as `liga`.
    pub tag: Tag,
    /// The index of the feature in its table's feature list.
    pub index: u16,
    /// The table the feature belongs to.
    pub table: LayoutKind,
    /// A [`Navigator::Feature`] for the feature itself.
    pub navigator: Navigator<'a>,
}

/// Returns the GSUB and GPOS features enabled for `script` and `lang`.
///
/// If the font has no entry for `script`, the `DFLT` script is used
/// instead. If `lang` is `None`, or the script has no entry for it, the
/// script's default language system is used. A required feature comes
/// first in its list.
///
/// A table that is missing, or that has nothing for this script and
/// language, contributes an empty list. If a table's structures fail to
/// parse its list is also empty, and the first such error is returned
/// alongside the lists.
pub fn font_features<'a>(
    font: &Font<'a>,
    script: Tag,
    lang: Option<Tag>,
) -> (
    Vec<FontFeature<'a>>,
    Vec<FontFeature<'a>>,
    Result<(), FormatError>,
) {
    let mut status = Ok(());
    let mut resolve = |kind: LayoutKind, table: Option<LayoutTable<'a>>| {
        let Some(table) = table else {
            return Vec::new();
        };
        match table_features(kind, table, script, lang) {
            Ok(features) => features,
            Err(source) => {
                log::debug!("failed to resolve {} features: {source}", kind.tag());
                if status.is_ok() {
                    status = Err(FormatError::Table {
                        tag: kind.tag(),
                        source,
                    });
                }
                Vec::new()
            }
        }
    };
    let gsub = resolve(LayoutKind::Gsub, font.gsub().map(|gsub| *gsub));
    let gpos = resolve(LayoutKind::Gpos, font.gpos().map(|gpos| *gpos));
    (gsub, gpos, status)
}

fn table_features<'a>(
    kind: LayoutKind,
    table: LayoutTable<'a>,
    script: Tag,
    lang: Option<Tag>,
) -> Result<Vec<FontFeature<'a>>, ReadError> {
    let scripts = Navigator::from(table.script_list());
    let mut script_nav = scripts.map(script);
    if script_nav.is_empty() && script != DEFAULT_SCRIPT {
        log::trace!("no '{script}' script in {}, using '{DEFAULT_SCRIPT}'", kind.tag());
        script_nav = scripts.map(DEFAULT_SCRIPT);
    }
    let lang_sys = match lang.map(|lang| script_nav.map(lang)) {
        Some(nav) if !nav.is_empty() => nav,
        _ => script_nav.link(),
    };
    let indices = lang_sys.list()?;
    if indices.is_empty() {
        return Ok(Vec::new());
    }
    let feature_list = table.feature_list()?;
    indices
        .into_iter()
        .map(|index| {
            let feature = feature_list.get(index)?;
            log::trace!("{} feature {index} is '{}'", kind.tag(), feature.tag);
            Ok(FontFeature {
                tag: feature.tag,
                index,
                table: kind,
                navigator: Navigator::Feature(feature.element),
            })
        })
        .collect()
}
