//! Hash-based collections.
//!
//! Currently this is only [`HashMap`], a map from owned string keys to values.

pub mod map;

#[doc(inline)]
pub use map::HashMap;
