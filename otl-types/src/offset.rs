//! Offsets to tables

/// A trait for the different offset representations.
pub trait Offset: Copy {
    /// Returns this offset as a `usize`.
    fn to_usize(self) -> usize;

    /// Returns this offset as a `usize`, or `None` if it is `0`.
    fn non_null(self) -> Option<usize> {
        match self.to_usize() {
            0 => None,
            other => Some(other),
        }
    }
}

macro_rules! impl_offset {
    ($name:ident, $bits:literal, $rawty:ty) => {
        #[doc = concat!("A ", stringify!($bits), "-bit offset to a table.")]
        ///
        /// Specific offset fields may or may not permit NULL values; however we
        /// assume that errors are possible, and expect the caller to handle
        /// the `None` case.
        #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(transparent)]
        pub struct $name($rawty);

        impl $name {
            /// Create a new offset.
            pub const fn new(raw: $rawty) -> Self {
                Self(raw)
            }

            /// Return a null offset.
            pub const fn null() -> Self {
                Self(0)
            }

            /// Returns `true` if this offset is zero.
            pub const fn is_null(self) -> bool {
                self.0 == 0
            }

            /// The raw value of this offset.
            pub const fn to_u32(self) -> u32 {
                self.0 as u32
            }
        }

        impl crate::raw::Scalar for $name {
            type Raw = <$rawty as crate::raw::Scalar>::Raw;

            fn from_raw(raw: Self::Raw) -> Self {
                $name(<$rawty as crate::raw::Scalar>::from_raw(raw))
            }

            fn to_raw(self) -> Self::Raw {
                crate::raw::Scalar::to_raw(self.0)
            }
        }

        impl Offset for $name {
            #[inline]
            fn to_usize(self) -> usize {
                self.0 as usize
            }
        }
    };
}

impl_offset!(Offset16, 16, u16);
impl_offset!(Offset32, 32, u32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_offsets() {
        assert_eq!(Offset16::new(0).non_null(), None);
        assert_eq!(Offset16::new(12).non_null(), Some(12));
        assert!(Offset32::null().is_null());
        assert_eq!(Offset32::new(0x10000).to_usize(), 0x10000);
    }
}
