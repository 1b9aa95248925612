use enum_primitive_derive::Primitive;

#[derive(Primitive, Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DatabaseStorePrefixes {
    // ---- Unspent output index ----
    /// Full unspent output records keyed by outpoint
    UnspentOutputs = 1,
    /// Per (account, asset) unspent output rows
    AccountUtxos = 2,
}

impl From<DatabaseStorePrefixes> for Vec<u8> {
    fn from(value: DatabaseStorePrefixes) -> Self {
        [value as u8].to_vec()
    }
}

impl From<DatabaseStorePrefixes> for u8 {
    fn from(value: DatabaseStorePrefixes) -> Self {
        value as u8
    }
}

impl AsRef<[u8]> for DatabaseStorePrefixes {
    fn as_ref(&self) -> &[u8] {
        // SAFETY: enum has repr(u8)
        std::slice::from_ref(unsafe { &*(self as *const Self as *const u8) })
    }
}
