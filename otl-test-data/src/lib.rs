//! test data shared between the otl crates.
//!
//! Most of the data here is either copied from the examples in the OpenType
//! specification or assembled by hand to hit a particular edge case.

pub mod bebuffer;
pub mod cmap;
pub mod font;
pub mod gdef;
pub mod gsub;
pub mod kern;
pub mod layout;
