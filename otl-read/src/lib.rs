//! Reading OpenType character mapping and layout tables
//!
//! This crate provides memory safe, zero-copy parsing of font files. A font
//! is [parsed][parse] once from a byte slice; every table and every
//! structure reached from a table is a view into those bytes, resolved
//! lazily and bounds-checked on each access.
//!
//! The [`tables`] module contains a submodule for each interpreted
//! [table][table-directory]. The [`layout`] module finds the features a font
//! enables for a script and language, and applies GSUB substitutions to a
//! buffer of glyphs.
//!
//! # Example
//!
//! ```no_run
//! # let path_to_my_font_file = std::path::Path::new("");
//! use otl_read::{layout, types::Tag};
//! let font_bytes = std::fs::read(path_to_my_font_file).unwrap();
//! let font = otl_read::parse(&font_bytes).expect("failed to read font data");
//! let mut glyphs: Vec<_> = "ffi".chars().map(|c| font.glyph_index(c)).collect();
//!
//! let (gsub, _gpos, _) = layout::font_features(&font, Tag::new(b"latn"), None);
//! if let Some(liga) = gsub.iter().find(|feature| feature.tag == Tag::new(b"liga")) {
//!     let mut pos = 0;
//!     while pos < glyphs.len() {
//!         let (next, applied) = layout::apply_feature(&font, liga, &mut glyphs, pos, 0);
//!         pos = if applied { next } else { pos + 1 };
//!     }
//! }
//! println!("{glyphs:?}");
//! ```
//!
//! [table-directory]: https://learn.microsoft.com/en-us/typography/opentype/spec/otff#table-directory

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

mod error;
mod font;
mod font_data;
pub mod layout;
mod offset;
mod read;
pub mod tables;

pub use error::FormatError;
pub use font::{parse, Font, Table, TableDirectory, TableRecord};
pub use font_data::FontData;
pub use offset::ResolveOffset;
pub use read::{Format, FontRead, ReadError};

/// Public re-export of the otl-types crate.
pub extern crate otl_types as types;

pub use types::{GlyphId, Tag};
