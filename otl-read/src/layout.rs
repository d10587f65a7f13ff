//! Feature resolution and glyph substitution
//!
//! [`font_features`] finds the features a font enables for a script and
//! language, and [`apply_feature`] applies a GSUB feature at one position
//! of a glyph buffer. Both walk the layout structures through a
//! [`Navigator`].

mod apply;
mod features;
mod navigator;

pub use apply::apply_feature;
pub use features::{font_features, FontFeature, LayoutKind, DEFAULT_SCRIPT};
pub use navigator::Navigator;
