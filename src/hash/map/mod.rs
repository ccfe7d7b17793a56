//! A module containing [`HashMap`] and associated types.
//!
//! The other included types are for iteration, providing owned and borrowed iteration over
//! entries, keys or values in a map, plus the error returned by [`HashMap::try_reserve`].
//!
//! As a note, there is no mutable iterator over keys because mutating the keys of a HashMap in
//! place would cause a logic error.
//!
//! [`HashMap`] is also re-exported under the parent module.

mod error;
mod hash_map;
mod iter;
#[cfg(feature = "serde")]
mod serde;
mod tests;

pub use error::*;
pub use hash_map::*;
pub use iter::*;
