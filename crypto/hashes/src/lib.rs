use serde::{Deserialize, Serialize};
use std::{
    fmt::{Debug, Display, Formatter},
    str::FromStr,
};

pub const HASH_SIZE: usize = 32;

/// Structured identity of a transaction. The string form used by stores is lower-case hex.
#[derive(PartialEq, Eq, Clone, Copy, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Hash([u8; HASH_SIZE]);

impl Hash {
    #[inline(always)]
    pub const fn from_bytes(bytes: [u8; HASH_SIZE]) -> Self {
        Hash(bytes)
    }

    #[inline(always)]
    pub const fn as_bytes(&self) -> [u8; HASH_SIZE] {
        self.0
    }

    /// # Panics
    /// Panics if `bytes` length is not exactly `HASH_SIZE`.
    #[inline(always)]
    pub fn from_slice(bytes: &[u8]) -> Self {
        Self(<[u8; HASH_SIZE]>::try_from(bytes).expect("Slice must have the length of Hash"))
    }

    /// Builds a hash whose first 8 bytes are the little endian encoding of `word`. Mostly useful in tests.
    #[inline(always)]
    pub const fn from_u64_word(word: u64) -> Self {
        let mut bytes = [0u8; HASH_SIZE];
        let le = word.to_le_bytes();
        let mut i = 0;
        while i < le.len() {
            bytes[i] = le[i];
            i += 1;
        }
        Hash(bytes)
    }
}

impl Display for Hash {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut hex = [0u8; HASH_SIZE * 2];
        f.write_str(faster_hex::hex_encode(&self.0, &mut hex).expect("The output is exactly twice the size of the input"))
    }
}

impl Debug for Hash {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl FromStr for Hash {
    type Err = faster_hex::Error;

    fn from_str(hash_str: &str) -> Result<Self, Self::Err> {
        // hex_decode accepts inputs longer than the output and ignores the tail
        if hash_str.len() != HASH_SIZE * 2 {
            return Err(faster_hex::Error::InvalidLength(hash_str.len()));
        }
        let mut bytes = [0u8; HASH_SIZE];
        faster_hex::hex_decode(hash_str.as_bytes(), &mut bytes)?;
        Ok(Hash(bytes))
    }
}

impl From<u64> for Hash {
    fn from(word: u64) -> Self {
        Self::from_u64_word(word)
    }
}

impl AsRef<[u8; HASH_SIZE]> for Hash {
    fn as_ref(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }
}

impl AsRef<[u8]> for Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
