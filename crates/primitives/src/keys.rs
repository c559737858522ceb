//! Public keys and the addresses derived from them.

use std::{fmt, str::FromStr};

use secp256k1::XOnlyPublicKey;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::errors::ParseError;

/// Length of an [`Address`] in bytes.
pub const ADDRESS_LEN: usize = 20;

/// The public key of an application or a serving node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PublicKey(XOnlyPublicKey);

impl PublicKey {
    /// Creates a new [`PublicKey`] from an x-only key.
    pub const fn new(key: XOnlyPublicKey) -> Self {
        Self(key)
    }

    /// Returns the underlying x-only key.
    pub const fn inner(&self) -> &XOnlyPublicKey {
        &self.0
    }

    /// Returns the serialized key.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.serialize()
    }

    /// Derives the [`Address`] of this key: the first [`ADDRESS_LEN`] bytes of its SHA-256 hash.
    pub fn address(&self) -> Address {
        let digest = Sha256::digest(self.0.serialize());

        let mut address = [0u8; ADDRESS_LEN];
        address.copy_from_slice(&digest[..ADDRESS_LEN]);

        Address(address)
    }
}

impl From<XOnlyPublicKey> for PublicKey {
    fn from(key: XOnlyPublicKey) -> Self {
        Self(key)
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0.serialize()))
    }
}

impl FromStr for PublicKey {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(s, &mut bytes)?;

        Ok(Self(XOnlyPublicKey::from_slice(&bytes)?))
    }
}

/// The address of an account, derived from its [`PublicKey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(#[serde(with = "hex::serde")] [u8; ADDRESS_LEN]);

impl Address {
    /// Creates an address from raw bytes.
    pub const fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// Returns the raw bytes of the address.
    pub const fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; ADDRESS_LEN];
        hex::decode_to_slice(s, &mut bytes)?;

        Ok(Self(bytes))
    }
}

#[cfg(test)]
mod tests {
    use secp256k1::{Keypair, SecretKey, SECP256K1};

    use super::*;

    fn test_key(seed: u8) -> PublicKey {
        let sk = SecretKey::from_slice(&[seed; 32]).unwrap();
        PublicKey::new(Keypair::from_secret_key(SECP256K1, &sk).x_only_public_key().0)
    }

    #[test]
    fn test_address_is_deterministic() {
        let key = test_key(1);

        assert_eq!(key.address(), key.address());
        assert_ne!(key.address(), test_key(2).address());
    }

    #[test]
    fn test_display_roundtrips_through_from_str() {
        let key = test_key(7);

        assert_eq!(key.to_string().parse::<PublicKey>().unwrap(), key);
        assert_eq!(
            key.address().to_string().parse::<Address>().unwrap(),
            key.address()
        );
    }

    #[test]
    fn test_address_rejects_wrong_length() {
        assert!(matches!(
            "abcd".parse::<Address>(),
            Err(ParseError::Hex(hex::FromHexError::InvalidStringLength))
        ));
    }

    #[test]
    fn test_address_serializes_as_hex() {
        let address = Address::new([0xab; ADDRESS_LEN]);
        let json = serde_json::to_string(&address).unwrap();

        assert_eq!(json, format!("\"{}\"", "ab".repeat(ADDRESS_LEN)));
        assert_eq!(serde_json::from_str::<Address>(&json).unwrap(), address);
    }
}
