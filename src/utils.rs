//! Miscellaneous utility types and functions.

pub use hex::{parse_fixed, HexSlice};

mod hex;
