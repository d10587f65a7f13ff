//! Common [scalar data types][data types] used when reading OpenType
//! layout tables.
//!
//! [data types]: https://docs.microsoft.com/en-us/typography/opentype/spec/otff#data-types

#![deny(rustdoc::broken_intra_doc_links)]

mod glyph_id;
mod offset;
pub mod raw;
mod tag;
mod version;

pub use glyph_id::GlyphId;
pub use offset::{Offset, Offset16, Offset32};
pub use raw::{BigEndian, FixedSize, Scalar};
pub use tag::{InvalidTag, Tag};
pub use version::MajorMinor;

/// The SFNT version for fonts containing TrueType outlines.
pub const TT_SFNT_VERSION: u32 = 0x00010000;
/// The SFNT version for fonts containing CFF outlines (`OTTO`).
pub const CFF_SFNT_VERSION: u32 = 0x4F54544F;
/// The legacy Apple SFNT version for TrueType fonts (`true`).
pub const TRUE_SFNT_VERSION: u32 = 0x74727565;
