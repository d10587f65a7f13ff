//! The lookup flag type.
//!
//! This is kind-of-but-not-quite-exactly a bit enumeration, and so we implement
//! it manually.

/// The [LookupFlag](https://learn.microsoft.com/en-us/typography/opentype/spec/chapter2#lookupFlag) bit enumeration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LookupFlag(u16);

impl LookupFlag {
    /// This bit relates only to the correct processing of GPOS type 3 (cursive attachment) lookups
    ///
    /// When this bit is set, the last glyph in a given sequence to which the cursive
    /// attachment lookup is applied, will be positioned on the baseline.
    pub const RIGHT_TO_LEFT: Self = LookupFlag(0x0001);
    /// If set, skips over base glyphs
    pub const IGNORE_BASE_GLYPHS: Self = LookupFlag(0x002);
    /// If set, skips over ligatures
    pub const IGNORE_LIGATURES: Self = LookupFlag(0x004);
    /// If set, skips over all combining marks
    pub const IGNORE_MARKS: Self = LookupFlag(0x008);
    /// If set, indicates that the lookup table structure is followed by a
    /// MarkFilteringSet field.
    pub const USE_MARK_FILTERING_SET: Self = LookupFlag(0x010);

    /// Return new, empty flags
    pub fn empty() -> Self {
        Self(0)
    }

    /// Construct a LookupFlag from a raw value, discarding invalid bits
    pub fn from_bits_truncate(bits: u16) -> Self {
        const VALID_BITS: u16 = !0x00E0;
        Self(bits & VALID_BITS)
    }

    /// Raw transmutation to u16.
    pub fn to_bits(self) -> u16 {
        self.0
    }

    /// Returns `true` if all the bits of `other` are set in `self`.
    pub fn contains(self, other: LookupFlag) -> bool {
        self.0 & other.0 == other.0
    }

    /// This bit relates only to the correct processing of the cursive attachment
    /// lookup type (GPOS lookup type 3).
    pub fn right_to_left(self) -> bool {
        self.contains(Self::RIGHT_TO_LEFT)
    }

    /// If set, skips over base glyphs
    pub fn ignore_base_glyphs(self) -> bool {
        self.contains(Self::IGNORE_BASE_GLYPHS)
    }

    /// If set, skips over ligatures
    pub fn ignore_ligatures(self) -> bool {
        self.contains(Self::IGNORE_LIGATURES)
    }

    /// If set, skips over all combining marks
    pub fn ignore_marks(self) -> bool {
        self.contains(Self::IGNORE_MARKS)
    }

    /// If set, indicates that the lookup table structure is followed by a
    /// MarkFilteringSet field.
    ///
    /// The layout engine skips over all mark glyphs not in the mark filtering set
    /// indicated.
    pub fn use_mark_filtering_set(self) -> bool {
        self.contains(Self::USE_MARK_FILTERING_SET)
    }

    /// If not zero, skips over all marks of attachment type different from specified.
    pub fn mark_attachment_type_mask(self) -> Option<u16> {
        let val = self.0 & 0xff00;
        if val == 0 {
            None
        } else {
            Some(val >> 8)
        }
    }
}

impl types::Scalar for LookupFlag {
    type Raw = <u16 as types::Scalar>::Raw;
    fn to_raw(self) -> Self::Raw {
        types::Scalar::to_raw(self.0)
    }
    fn from_raw(raw: Self::Raw) -> Self {
        let t = <u16 as types::Scalar>::from_raw(raw);
        Self(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_bits() {
        let flag = LookupFlag::from_bits_truncate(0x0319);
        assert!(flag.right_to_left());
        assert!(!flag.ignore_base_glyphs());
        assert!(flag.ignore_marks());
        assert!(flag.use_mark_filtering_set());
        assert_eq!(flag.mark_attachment_type_mask(), Some(3));
        // reserved bits are dropped
        assert_eq!(LookupFlag::from_bits_truncate(0x00E0), LookupFlag::empty());
    }
}
