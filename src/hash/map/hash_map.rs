use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{BuildHasher, RandomState};
use std::ops::Index;
use std::{cmp, iter, mem};

use super::{CapacityOverflow, IntoKeys, IntoValues, Iter, IterMut, Keys, Values, ValuesMut};

const MIN_ALLOCATED_CAP: usize = 2;

const GROWTH_FACTOR: usize = 2;

const LOAD_FACTOR_NUMERATOR: usize = 4;
const LOAD_FACTOR_DENOMINATOR: usize = 5;

/// A map of [`String`] keys to values of type `V`.
///
/// Entries live in a single table of buckets using open addressing with linear probing. A custom
/// load factor is not supported, the table grows whenever it would exceed 4/5 full.
///
/// Looking up a key that was never inserted (or has been deleted) isn't an error: [`get`] returns
/// [`None`], which is distinct from any stored value, including "empty" ones like `""` or `0`.
///
/// The map doesn't synchronize anything internally. Sharing one between threads for mutation
/// requires wrapping it in something like a [`Mutex`](std::sync::Mutex).
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of entries in the HashMap.
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `put` | `O(1)`**, `O(n)` |
/// | `get` | `O(1)`* |
/// | `delete` | `O(1)`* |
/// | `contains` | `O(1)`* |
/// | `reserve` | `O(n)`***, `O(1)` |
/// | `clear` | `O(cap)` |
///
/// \* Colliding keys are stored in the buckets directly following their ideal bucket, so a
/// collision costs one extra comparison per displaced entry.
///
/// \** If the HashMap doesn't have enough capacity for the new entry, `put` reallocates and
/// rehashes every entry first. \* applies as well.
///
/// \*** If the HashMap already has room for the additional entries, `reserve` is `O(1)`.
///
/// [`get`]: HashMap::get
#[derive(Clone)]
pub struct HashMap<V, B: BuildHasher = RandomState> {
    pub(crate) buckets: Box<[Bucket<V>]>,
    pub(crate) len: usize,
    pub(crate) hasher: B,
}

pub(crate) type Bucket<V> = Option<(String, V)>;

impl<V> HashMap<V> {
    /// Creates a new, empty HashMap with capacity 0, hashing keys with [`RandomState`]. Memory
    /// will be allocated on the first [`put`](HashMap::put).
    pub fn new() -> HashMap<V> {
        HashMap::with_hasher(RandomState::new())
    }

    /// Creates a new HashMap with the provided `cap`acity, hashing keys with [`RandomState`].
    ///
    /// Note that the load factor still applies: only `cap * 4 / 5` entries fit before the map
    /// grows. Use [`reserve`](HashMap::reserve) to make room for an exact number of entries.
    pub fn with_cap(cap: usize) -> HashMap<V> {
        HashMap::with_cap_and_hasher(cap, RandomState::new())
    }
}

impl<V, B: BuildHasher> HashMap<V, B> {
    /// Creates a new HashMap with capacity 0 and the provided `hasher`.
    pub fn with_hasher(hasher: B) -> HashMap<V, B> {
        HashMap::with_cap_and_hasher(0, hasher)
    }

    /// Creates a new HashMap with the provided `cap`acity and `hasher`.
    pub fn with_cap_and_hasher(cap: usize, hasher: B) -> HashMap<V, B> {
        HashMap {
            buckets: empty_buckets(cap),
            len: 0,
            hasher,
        }
    }

    /// Returns the number of entries in the HashMap.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the HashMap contains no entries.
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of buckets currently allocated.
    pub fn cap(&self) -> usize {
        self.buckets.len()
    }

    /// Returns a reference to the hasher used by this HashMap.
    pub const fn hasher(&self) -> &B {
        &self.hasher
    }

    /// Associates `value` with `key`, growing the HashMap if required. If the key already had a
    /// value, it is replaced and the previous one is returned.
    ///
    /// As with the standard library, the stored key isn't changed if it already exists.
    pub fn put(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();

        // Overwriting never needs more room, so only a new key can trigger growth.
        if let Some(index) = self.find_index_for_key(&key)
            && let Some(existing) = &mut self.buckets[index]
        {
            return Some(mem::replace(&mut existing.1, value));
        }

        if self.should_grow() {
            self.grow();
        }

        let Some(index) = self.find_index_for_key(&key) else {
            unreachable!("HashMap has no buckets directly after growing");
        };

        self.buckets[index] = Some((key, value));
        self.len += 1;
        None
    }

    /// Returns a reference to the value associated with `key`, or None if there isn't one.
    pub fn get(&self, key: &str) -> Option<&V> {
        self.get_entry(key).map(|(_, v)| v)
    }

    /// Returns the stored key and value for `key` as a pair, or None if there is no entry.
    pub fn get_entry(&self, key: &str) -> Option<(&str, &V)> {
        let index = self.find_index_for_key(key)?;

        self.buckets[index].as_ref().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns a mutable reference to the value associated with `key`, or None if there isn't
    /// one.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let index = self.find_index_for_key(key)?;

        self.buckets[index].as_mut().map(|(_, v)| v)
    }

    /// Returns true if `key` is currently associated with a value.
    pub fn contains(&self, key: &str) -> bool {
        match self.find_index_for_key(key) {
            Some(index) => self.buckets[index].is_some(),
            None => false,
        }
    }

    /// Removes the value associated with `key`, returning it if it existed. Deleting a key that
    /// isn't present does nothing.
    pub fn delete(&mut self, key: &str) -> Option<V> {
        self.delete_entry(key).map(|(_, v)| v)
    }

    /// Removes the entry associated with `key`, returning both the stored key and value if it
    /// existed.
    pub fn delete_entry(&mut self, key: &str) -> Option<(String, V)> {
        let mut hole = self.find_index_for_key(key)?;
        let removed = self.buckets[hole].take()?;
        self.len -= 1;

        let cap = self.cap();
        let mut next_index = (hole + 1) % cap;

        // Close the gap by scanning the rest of the probe run. An entry only moves into the hole
        // if its ideal bucket doesn't lie cyclically within (hole, next_index], otherwise moving
        // it would put it before its ideal bucket and it is skipped instead.
        while let Some((next_key, _)) = &self.buckets[next_index] {
            if let Some(ideal) = self.index_from_key(next_key)
                && probe_distance(ideal, next_index, cap) >= probe_distance(hole, next_index, cap)
            {
                self.buckets[hole] = self.buckets[next_index].take();
                hole = next_index;
            }

            next_index = (next_index + 1) % cap;
        }

        Some(removed)
    }

    /// Drops every entry in the HashMap, keeping the allocated buckets.
    pub fn clear(&mut self) {
        self.buckets.iter_mut().for_each(|bucket| *bucket = None);
        self.len = 0;
    }

    /// Increases the capacity of the HashMap so that `extra` more entries fit without exceeding
    /// the load factor.
    ///
    /// # Panics
    /// Panics if the required capacity overflows, see [`HashMap::try_reserve`] for a fallible
    /// version.
    pub fn reserve(&mut self, extra: usize) {
        if let Err(err) = self.try_reserve(extra) {
            panic!("{err}");
        }
    }

    /// Increases the capacity of the HashMap so that `extra` more entries fit without exceeding
    /// the load factor, or returns [`CapacityOverflow`] if that capacity can't be represented.
    pub fn try_reserve(&mut self, extra: usize) -> Result<(), CapacityOverflow> {
        let new_cap = self.len.checked_add(extra)
            .and_then(|required| required.checked_mul(LOAD_FACTOR_DENOMINATOR))
            .map(|scaled| scaled.div_ceil(LOAD_FACTOR_NUMERATOR))
            .ok_or(CapacityOverflow)?;

        if new_cap <= self.cap() {
            return Ok(());
        }

        let bytes = new_cap.checked_mul(mem::size_of::<Bucket<V>>()).ok_or(CapacityOverflow)?;
        if bytes > isize::MAX as usize {
            return Err(CapacityOverflow);
        }

        self.realloc_with_cap(new_cap);
        Ok(())
    }

    /// Returns an iterator over all key-value pairs in the HashMap, as references.
    pub fn iter(&self) -> Iter<'_, V> {
        self.into_iter()
    }

    /// Returns an iterator over all key-value pairs, with mutable references to the values.
    pub fn iter_mut(&mut self) -> IterMut<'_, V> {
        self.into_iter()
    }

    /// Returns an iterator over all keys in the HashMap.
    pub fn keys(&self) -> Keys<'_, V> {
        Keys(self.iter())
    }

    /// Consumes self and returns an iterator over all contained keys.
    pub fn into_keys(self) -> IntoKeys<V> {
        IntoKeys(self.into_iter())
    }

    /// Returns an iterator over all values in the HashMap, as references.
    pub fn values(&self) -> Values<'_, V> {
        Values(self.iter())
    }

    /// Returns an iterator over all values in the HashMap, as mutable references.
    pub fn values_mut(&mut self) -> ValuesMut<'_, V> {
        ValuesMut(self.iter_mut())
    }

    /// Consumes self and returns an iterator over all contained values.
    pub fn into_values(self) -> IntoValues<V> {
        IntoValues(self.into_iter())
    }
}

impl<V, B: BuildHasher> HashMap<V, B> {
    /// Determines whether the HashMap's length has reached the load capacity, meaning that it
    /// should grow before inserting a new entry.
    pub(crate) fn should_grow(&self) -> bool {
        self.len >= self.cap() * LOAD_FACTOR_NUMERATOR / LOAD_FACTOR_DENOMINATOR
    }

    /// Grows the HashMap by the growth factor.
    pub(crate) fn grow(&mut self) {
        let new_cap = cmp::max(self.cap().saturating_mul(GROWTH_FACTOR), MIN_ALLOCATED_CAP);

        self.realloc_with_cap(new_cap);
    }

    /// Moves every entry into a fresh table of `new_cap` buckets. Requests that would leave the
    /// table over the load factor are ignored, the HashMap never drops entries to shrink.
    pub(crate) fn realloc_with_cap(&mut self, new_cap: usize) {
        if new_cap.saturating_mul(LOAD_FACTOR_NUMERATOR) / LOAD_FACTOR_DENOMINATOR < self.len {
            return;
        }

        log::trace!(
            "reallocating HashMap buckets: cap {} -> {}, len {}",
            self.cap(),
            new_cap,
            self.len
        );

        let old_buckets = mem::replace(&mut self.buckets, empty_buckets(new_cap));

        for (key, value) in old_buckets.into_vec().into_iter().flatten() {
            // A non-empty old table means the load factor check above kept new_cap above 0.
            let Some(index) = self.find_index_for_key(&key) else {
                unreachable!("entries can't be moved into a HashMap with no buckets");
            };

            self.buckets[index] = Some((key, value));
        }
    }

    /// Calculates the ideal bucket for `key`, ignoring collisions (or None if the HashMap has no
    /// buckets).
    pub(crate) fn index_from_key(&self, key: &str) -> Option<usize> {
        let key_hash = self.hasher.hash_one(key);
        key_hash.checked_rem(self.cap() as u64).map(|i| i as usize)
    }

    /// Finds the bucket that either holds `key` or is the empty bucket `key` would be placed in
    /// (or None if the HashMap has no buckets).
    pub(crate) fn find_index_for_key(&self, key: &str) -> Option<usize> {
        let mut index = self.index_from_key(key)?;

        // Terminates because the load factor always leaves at least one bucket empty.
        while let Some((existing, _)) = &self.buckets[index]
            && existing != key
        {
            index = (index + 1) % self.cap();
        }

        Some(index)
    }
}

/// Number of forward steps (wrapping at `cap`) needed to probe from bucket `from` to bucket `to`.
const fn probe_distance(from: usize, to: usize, cap: usize) -> usize {
    (to + cap - from) % cap
}

fn empty_buckets<V>(cap: usize) -> Box<[Bucket<V>]> {
    iter::repeat_with(|| None).take(cap).collect()
}

impl<V, B: BuildHasher + Default> Default for HashMap<V, B> {
    fn default() -> Self {
        HashMap::with_hasher(B::default())
    }
}

impl<V: PartialEq, B: BuildHasher, C: BuildHasher> PartialEq<HashMap<V, C>> for HashMap<V, B> {
    fn eq(&self, other: &HashMap<V, C>) -> bool {
        self.len() == other.len()
            && self.iter().all(|(key, value)| other.get(key) == Some(value))
    }
}

impl<V: Eq, B: BuildHasher> Eq for HashMap<V, B> {}

impl<V, B: BuildHasher> Index<&str> for HashMap<V, B> {
    type Output = V;

    /// # Panics
    /// Panics if `key` has no associated value.
    fn index(&self, key: &str) -> &V {
        match self.get(key) {
            Some(value) => value,
            None => panic!("HashMap has no value for key {key:?}!"),
        }
    }
}

impl<K: Into<String>, V, B: BuildHasher + Default> FromIterator<(K, V)> for HashMap<V, B> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = HashMap::with_hasher(B::default());
        map.extend(iter);
        map
    }
}

impl<K: Into<String>, V, B: BuildHasher> Extend<(K, V)> for HashMap<V, B> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        // Only a hint, duplicate keys would make this an over-estimate.
        self.reserve(iter.size_hint().0);

        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<K: Into<String>, V, const N: usize> From<[(K, V); N]> for HashMap<V> {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

/// Debug view of a single bucket, `-` when empty.
struct DebugBucket<'a, V>(&'a Bucket<V>);

impl<V: Debug> Debug for DebugBucket<'_, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some((k, v)) => write!(f, "({k:?}: {v:?})"),
            None => write!(f, "-"),
        }
    }
}

impl<V: Debug, B: BuildHasher + Debug> Debug for HashMap<V, B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        struct Buckets<'a, V>(&'a [Bucket<V>]);

        impl<V: Debug> Debug for Buckets<'_, V> {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.debug_list().entries(self.0.iter().map(DebugBucket)).finish()
            }
        }

        f.debug_struct("HashMap")
            .field("buckets", &Buckets(&self.buckets))
            .field("len", &self.len)
            .field("cap", &self.cap())
            .field("hasher", &self.hasher)
            .finish()
    }
}

impl<V: Debug, B: BuildHasher> Display for HashMap<V, B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#")?;
        f.debug_map().entries(self.iter()).finish()
    }
}
