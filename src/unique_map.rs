//! JSON objects decoded in document order, rejecting repeated keys.
//!
//! `serde_json` keeps the last value of a repeated key, which would let a
//! catalog file define one phrase twice without notice. Shared with `build.rs`.

use std::collections::HashSet;
use std::fmt;
use std::marker::PhantomData;

use serde::de::{ Deserialize, Deserializer, Error, MapAccess, Visitor };

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueMap<T>(pub Vec<(String, T)>);

impl<'de, T: Deserialize<'de>> Deserialize<'de> for UniqueMap<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(UniqueMapVisitor(PhantomData))
    }
}

struct UniqueMapVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for UniqueMapVisitor<T> {
    type Value = UniqueMap<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON object without repeated keys")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut entries: Vec<(String, T)> = Vec::with_capacity(access.size_hint().unwrap_or(0));
        let mut seen = HashSet::new();

        while let Some(key) = access.next_key::<String>()? {
            if !seen.insert(key.clone()) {
                return Err(A::Error::custom(format!("duplicate key '{key}'")));
            }
            let value = access.next_value()?;
            entries.push((key, value));
        }

        Ok(UniqueMap(entries))
    }
}
