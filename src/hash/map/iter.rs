use std::hash::BuildHasher;
use std::iter::FusedIterator;
use std::slice::{Iter as BucketIter, IterMut as BucketIterMut};
use std::vec::IntoIter as BucketIntoIter;

use super::{Bucket, HashMap};

impl<V, B: BuildHasher> IntoIterator for HashMap<V, B> {
    type Item = (String, V);

    type IntoIter = IntoIter<V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            len: self.len,
            inner: self.buckets.into_vec().into_iter(),
        }
    }
}

/// An owned iterator over the entries of a [`HashMap`], in no particular order.
pub struct IntoIter<V> {
    pub(crate) inner: BucketIntoIter<Bucket<V>>,
    pub(crate) len: usize,
}

impl<V> Iterator for IntoIter<V> {
    type Item = (String, V);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.inner.by_ref().flatten().next()?;
        self.len -= 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<V> ExactSizeIterator for IntoIter<V> {}

impl<V> FusedIterator for IntoIter<V> {}

impl<'a, V, B: BuildHasher> IntoIterator for &'a HashMap<V, B> {
    type Item = (&'a str, &'a V);

    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        Iter {
            len: self.len,
            inner: self.buckets.iter(),
        }
    }
}

/// A borrowed iterator over the entries of a [`HashMap`].
pub struct Iter<'a, V> {
    pub(crate) inner: BucketIter<'a, Bucket<V>>,
    pub(crate) len: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let (key, value) = self.inner.by_ref().flatten().next()?;
        self.len -= 1;
        Some((key.as_str(), value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V> FusedIterator for Iter<'_, V> {}

impl<V> Clone for Iter<'_, V> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
            len: self.len,
        }
    }
}

impl<'a, V, B: BuildHasher> IntoIterator for &'a mut HashMap<V, B> {
    type Item = (&'a str, &'a mut V);

    type IntoIter = IterMut<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        IterMut {
            len: self.len,
            inner: self.buckets.iter_mut(),
        }
    }
}

/// A borrowed iterator over the entries of a [`HashMap`], with mutable access to the values.
///
/// Keys are only ever handed out as shared references: changing a key in place would leave it in
/// the wrong bucket.
pub struct IterMut<'a, V> {
    pub(crate) inner: BucketIterMut<'a, Bucket<V>>,
    pub(crate) len: usize,
}

impl<'a, V> Iterator for IterMut<'a, V> {
    type Item = (&'a str, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        let (key, value) = self.inner.by_ref().flatten().next()?;
        self.len -= 1;
        Some((key.as_str(), value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<V> ExactSizeIterator for IterMut<'_, V> {}

impl<V> FusedIterator for IterMut<'_, V> {}

/// An owned iterator over the keys of a [`HashMap`], created by [`HashMap::into_keys`].
pub struct IntoKeys<V>(
    pub(crate) IntoIter<V>
);

impl<V> Iterator for IntoKeys<V> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|e| e.0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<V> ExactSizeIterator for IntoKeys<V> {}

impl<V> FusedIterator for IntoKeys<V> {}

/// A borrowed iterator over the keys of a [`HashMap`].
pub struct Keys<'a, V>(
    pub(crate) Iter<'a, V>
);

impl<'a, V> Iterator for Keys<'a, V> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|e| e.0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<V> ExactSizeIterator for Keys<'_, V> {}

impl<V> FusedIterator for Keys<'_, V> {}

/// An owned iterator over the values of a [`HashMap`], created by [`HashMap::into_values`].
pub struct IntoValues<V>(
    pub(crate) IntoIter<V>
);

impl<V> Iterator for IntoValues<V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|e| e.1)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<V> ExactSizeIterator for IntoValues<V> {}

impl<V> FusedIterator for IntoValues<V> {}

/// A borrowed iterator over the values of a [`HashMap`].
pub struct Values<'a, V>(
    pub(crate) Iter<'a, V>
);

impl<'a, V> Iterator for Values<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|e| e.1)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<V> ExactSizeIterator for Values<'_, V> {}

impl<V> FusedIterator for Values<'_, V> {}

/// A borrowed iterator over mutable references to the values of a [`HashMap`].
pub struct ValuesMut<'a, V>(
    pub(crate) IterMut<'a, V>
);

impl<'a, V> Iterator for ValuesMut<'a, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|e| e.1)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<V> ExactSizeIterator for ValuesMut<'_, V> {}

impl<V> FusedIterator for ValuesMut<'_, V> {}
