//! Errors produced while parsing a font's table directory.

use thiserror::Error;
use types::Tag;

use crate::ReadError;

/// An error describing malformed structural data in a font file.
///
/// These are produced by [`parse`](crate::parse) for problems with the
/// table directory itself, or with one of the tables that every other table
/// depends on (`head` and `maxp`). Problems with any other table are logged
/// and the table is kept as [`Table::Opaque`](crate::Table::Opaque).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("invalid sfnt version 0x{0:08X}")]
    InvalidSfnt(u32),
    #[error("table records out of order: '{tag}' follows '{prev}'")]
    UnsortedTables { prev: Tag, tag: Tag },
    #[error("table '{tag}' starts at unaligned offset {offset}")]
    MisalignedTable { tag: Tag, offset: u32 },
    #[error("table '{tag}' extends past the end of the file")]
    TableOutOfBounds { tag: Tag },
    #[error("malformed '{tag}' table: {source}")]
    Table {
        tag: Tag,
        #[source]
        source: ReadError,
    },
    #[error(transparent)]
    Read(#[from] ReadError),
}

impl FormatError {
    /// The tag of the table this error relates to, if any.
    pub fn tag(&self) -> Option<Tag> {
        match self {
            FormatError::UnsortedTables { tag, .. }
            | FormatError::MisalignedTable { tag, .. }
            | FormatError::TableOutOfBounds { tag }
            | FormatError::Table { tag, .. } => Some(*tag),
            FormatError::InvalidSfnt(_) | FormatError::Read(_) => None,
        }
    }
}
