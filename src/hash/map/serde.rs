use std::cmp;
use std::fmt::{self, Formatter};
use std::hash::BuildHasher;
use std::marker::PhantomData;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::HashMap;

/// Upper bound on the number of entries reserved up front from an untrusted size hint.
const MAX_PREALLOCATED_ENTRIES: usize = 4096;

impl<V: Serialize, B: BuildHasher> Serialize for HashMap<V, B> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct HashMapVisitor<V, B: BuildHasher>(PhantomData<fn() -> HashMap<V, B>>);

impl<'de, V, B> Visitor<'de> for HashMapVisitor<V, B>
where
    V: Deserialize<'de>,
    B: BuildHasher + Default,
{
    type Value = HashMap<V, B>;

    fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "a map with string keys")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = HashMap::with_hasher(B::default());

        if let Some(hint) = access.size_hint() {
            map.try_reserve(cmp::min(hint, MAX_PREALLOCATED_ENTRIES))
                .map_err(de::Error::custom)?;
        }

        // Repeated keys overwrite, the same as calling put in sequence.
        while let Some((key, value)) = access.next_entry::<String, V>()? {
            map.put(key, value);
        }

        Ok(map)
    }
}

impl<'de, V, B> Deserialize<'de> for HashMap<V, B>
where
    V: Deserialize<'de>,
    B: BuildHasher + Default,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(HashMapVisitor(PhantomData))
    }
}
