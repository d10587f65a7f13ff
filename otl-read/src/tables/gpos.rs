//! the [GPOS] table
//!
//! Positioning lookups are not interpreted; this module exposes the shared
//! layout structure and identifies the type and format of each subtable.
//!
//! [GPOS]: https://docs.microsoft.com/en-us/typography/opentype/spec/gpos

use std::ops::Deref;

use types::{Offset32, Tag};

use super::layout::{LayoutTable, Lookup};
use crate::{FontData, FontRead, ReadError, ResolveOffset};

/// 'GPOS'
pub const TAG: Tag = Tag::new(b"GPOS");

/// The extension positioning lookup type.
pub const EXTENSION_LOOKUP_TYPE: u16 = 9;

/// [GPOS](https://docs.microsoft.com/en-us/typography/opentype/spec/gpos#gpos-header)
#[derive(Clone, Copy, Debug)]
pub struct Gpos<'a>(LayoutTable<'a>);

impl<'a> FontRead<'a> for Gpos<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        LayoutTable::read(data).map(Gpos)
    }
}

impl<'a> Deref for Gpos<'a> {
    type Target = LayoutTable<'a>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// A GPOS lookup subtable, with extension subtables already unwrapped.
#[derive(Clone, Copy, Debug)]
pub struct PositioningSubtable<'a> {
    lookup_type: u16,
    format: u16,
    data: FontData<'a>,
}

impl<'a> PositioningSubtable<'a> {
    /// Read a subtable of the given lookup type.
    pub fn read(data: FontData<'a>, lookup_type: u16) -> Result<Self, ReadError> {
        if !(1..=EXTENSION_LOOKUP_TYPE).contains(&lookup_type) {
            return Err(ReadError::MalformedData("invalid GPOS lookup type"));
        }
        let format: u16 = data.read_at(0)?;
        if lookup_type != EXTENSION_LOOKUP_TYPE {
            return Ok(PositioningSubtable {
                lookup_type,
                format,
                data,
            });
        }
        if format != 1 {
            return Err(ReadError::InvalidFormat(format));
        }
        let extension_type: u16 = data.read_at(2)?;
        if extension_type == EXTENSION_LOOKUP_TYPE {
            return Err(ReadError::MalformedData("nested GPOS extension"));
        }
        let offset: Offset32 = data.read_at(4)?;
        Self::read(offset.resolve(data)?, extension_type)
    }

    /// The lookup type, after unwrapping extensions.
    pub fn lookup_type(&self) -> u16 {
        self.lookup_type
    }

    /// The subtable's format field.
    pub fn format(&self) -> u16 {
        self.format
    }

    /// The raw subtable data.
    pub fn data(&self) -> FontData<'a> {
        self.data
    }
}

/// Iterate over the subtables of a GPOS lookup, in order.
pub fn subtables<'a>(
    lookup: Lookup<'a>,
) -> impl Iterator<Item = Result<PositioningSubtable<'a>, ReadError>> + 'a {
    let lookup_type = lookup.lookup_type();
    (0..lookup.subtable_count() as usize).map(move |ix| {
        lookup
            .subtable_data(ix)
            .and_then(|data| PositioningSubtable::read(data, lookup_type))
    })
}
