//! Handling offsets

use super::read::{FontRead, ReadError};
use crate::font_data::FontData;
use types::Offset;

/// A helper trait providing a 'resolve' method for offset types
///
/// An offset is a link from one structure to another, relative to the start
/// of some base data. A link is valid if the offset is within the base,
/// including an offset equal to its length (which resolves to empty data);
/// anything larger is dangling and resolves to [`ReadError::OutOfBounds`].
pub trait ResolveOffset {
    /// Resolve the offset against `data`, treating a null offset as an error.
    fn resolve<'a, T: FontRead<'a>>(&self, data: FontData<'a>) -> Result<T, ReadError>;

    /// Resolve the offset against `data`, returning `None` for a null offset.
    fn resolve_nullable<'a, T: FontRead<'a>>(
        &self,
        data: FontData<'a>,
    ) -> Option<Result<T, ReadError>> {
        match self.resolve(data) {
            Ok(thing) => Some(Ok(thing)),
            Err(ReadError::NullOffset) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

impl<O: Offset> ResolveOffset for O {
    fn resolve<'a, T: FontRead<'a>>(&self, data: FontData<'a>) -> Result<T, ReadError> {
        self.non_null()
            .ok_or(ReadError::NullOffset)
            .and_then(|off| data.split_off(off).ok_or(ReadError::OutOfBounds))
            .and_then(T::read)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::Offset16;

    struct Rest<'a>(FontData<'a>);

    impl<'a> FontRead<'a> for Rest<'a> {
        fn read(data: FontData<'a>) -> Result<Self, ReadError> {
            Ok(Rest(data))
        }
    }

    #[test]
    fn link_bounds() {
        let data = FontData::new(&[1, 2, 3, 4]);
        let rest: Rest = Offset16::new(4).resolve(data).unwrap();
        assert!(rest.0.is_empty());
        assert_eq!(
            Offset16::new(5).resolve::<Rest>(data).err(),
            Some(ReadError::OutOfBounds)
        );
        assert!(Offset16::null().resolve_nullable::<Rest>(data).is_none());
        let rest = Offset16::new(2).resolve_nullable::<Rest>(data).unwrap();
        assert_eq!(rest.unwrap().0.as_bytes(), &[3, 4]);
    }
}
