//! Name-derived state identities
//!
//! States are located by a 32-bit FNV-1a hash of their name. The key is
//! computed once when the state is constructed and never changes for the
//! state's lifetime.

use std::fmt;

/// FNV-1a 32-bit offset basis
pub const FNV_SEED: u32 = 0x811C_9DC5;

/// FNV-1a 32-bit prime
pub const FNV_PRIME: u32 = 0x0100_0193;

/// State identity - FNV-1a hash of the state's name
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StateKey(pub u32);

impl StateKey {
    pub const ZERO: StateKey = StateKey(0);

    #[inline]
    pub const fn new(key: u32) -> Self {
        StateKey(key)
    }

    /// Hash a name into a key (32-bit FNV-1a)
    ///
    /// Case-sensitive; the empty string hashes to the seed. Two distinct
    /// names can collide - the registry rejects the second registration.
    pub const fn from_name(name: &str) -> Self {
        let bytes = name.as_bytes();
        let mut hash = FNV_SEED;
        let mut i = 0;
        while i < bytes.len() {
            hash = (hash ^ bytes[i] as u32).wrapping_mul(FNV_PRIME);
            i += 1;
        }
        StateKey(hash)
    }

    #[inline]
    pub fn to_bytes(self) -> [u8; 4] {
        self.0.to_le_bytes()
    }

    #[inline]
    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        StateKey(u32::from_le_bytes(bytes))
    }
}

impl fmt::Debug for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key({:08x})", self.0)
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}
