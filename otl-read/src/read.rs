//! Traits for interpreting font data

use thiserror::Error;

use crate::font_data::FontData;

/// A type that can be read from raw table data.
///
/// This trait is implemented for all font tables that are self-describing: that
/// is, tables that do not require any external state in order to interpret their
/// underlying bytes. (Tables that require external state, such as `hmtx`,
/// have their own constructors taking those arguments.)
pub trait FontRead<'a>: Sized {
    /// Read an instance of `Self` from the provided data, performing validation.
    ///
    /// In the case of a table, this method is responsible for ensuring the input
    /// data is consistent: this means ensuring that any versioned fields are
    /// present as required by the version, and that any array lengths are not
    /// out-of-bounds.
    fn read(data: FontData<'a>) -> Result<Self, ReadError>;
}

/// A trait for tables that have multiple possible formats.
pub trait Format<T> {
    /// The format value for this table.
    const FORMAT: T;
}

/// An error that occurs when reading font data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadError {
    #[error("An offset was out of bounds")]
    OutOfBounds,
    #[error("Invalid format '{0}'")]
    InvalidFormat(u16),
    #[error("Specified array length not a multiple of item size")]
    InvalidArrayLen,
    #[error("An offset was unexpectedly null")]
    NullOffset,
    #[error("Malformed data: '{0}'")]
    MalformedData(&'static str),
}
