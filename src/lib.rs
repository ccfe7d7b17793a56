//! A string-keyed hash map, the one data structure I kept out of a grab bag of conversion helpers.
//!
//! # Purpose
//! [`HashMap`] stores values of any single type `V` under owned [`String`] keys and offers the four
//! point operations you'd expect: [`put`](HashMap::put), [`get`](HashMap::get),
//! [`delete`](HashMap::delete) and [`contains`](HashMap::contains). Iteration, reservation and the
//! usual std traits come along with it.
//!
//! # Method
//! The map is written from scratch rather than wrapping [`std::collections::HashMap`]. It uses open
//! addressing with linear probing over a single boxed slice of buckets and backward-shift deletion,
//! so there are no tombstones to clean up. The hasher is pluggable via [`BuildHasher`], defaulting
//! to [`RandomState`].
//!
//! # Error Handling
//! Absence isn't an error. Looking up a key that isn't there gives [`None`] and deleting it does
//! nothing. The only error type is [`CapacityOverflow`](hash::map::CapacityOverflow), returned by
//! [`try_reserve`](HashMap::try_reserve) and used as the panic message of
//! [`reserve`](HashMap::reserve). Like the rest of this crate's errors, it is a plain struct that
//! implements [`Error`](std::error::Error).
//!
//! # Logging
//! Reallocations are reported at `trace` level through the [`log`] facade. The crate never installs
//! a logger itself.
//!
//! # Features
//! - `serde`: implements `Serialize` and `Deserialize` for [`HashMap`] as a plain map.
//!
//! [`BuildHasher`]: std::hash::BuildHasher
//! [`RandomState`]: std::hash::RandomState
#![warn(clippy::missing_safety_doc)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::missing_const_for_fn)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::module_inception)]

pub mod hash;

pub(crate) mod util;

#[doc(inline)]
pub use hash::HashMap;
