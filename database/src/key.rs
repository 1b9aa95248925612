use crate::registry::DatabaseStorePrefixes;
use num_traits::FromPrimitive;
use std::fmt::{Debug, Display};

/// A full store key: a store prefix, optional buckets, then the item key.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct DbKey {
    path: Vec<u8>,
    prefix_len: usize,
}

impl DbKey {
    pub fn new<TKey>(prefix: &[u8], key: TKey) -> Self
    where
        TKey: AsRef<[u8]>,
    {
        Self { path: prefix.iter().chain(key.as_ref().iter()).copied().collect(), prefix_len: prefix.len() }
    }

    pub fn prefix_only(prefix: &[u8]) -> Self {
        Self::new(prefix, [])
    }

    /// Adds a bucket to the DB key. A bucket is considered part of the prefix
    pub fn add_bucket<TBucket>(&mut self, bucket: TBucket)
    where
        TBucket: AsRef<[u8]>,
    {
        self.path.extend(bucket.as_ref().iter().copied());
        self.prefix_len += bucket.as_ref().len();
    }

    pub fn add_key<TKey>(&mut self, key: TKey)
    where
        TKey: AsRef<[u8]>,
    {
        self.path.extend(key.as_ref().iter().copied());
    }

    pub fn prefix_len(&self) -> usize {
        self.prefix_len
    }
}

impl AsRef<[u8]> for DbKey {
    fn as_ref(&self) -> &[u8] {
        &self.path
    }
}

impl Display for DbKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut pos = 0;

        if self.prefix_len > 0 {
            if let Some(prefix) = DatabaseStorePrefixes::from_u8(self.path[0]) {
                Debug::fmt(&prefix, f)?;
                f.write_str("/")?;
                pos += 1;
            }
        }

        f.write_str(&faster_hex::hex_string(&self.path[pos..]))
    }
}

impl Debug for DbKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}
