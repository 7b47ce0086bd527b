//! # Identifiers
//!
//! Fixed-size opaque identifiers. All of them compare by byte equality and
//! render as cb58 strings.
//!
//! | Type | Width | String form |
//! |------|-------|-------------|
//! | `Id` | 32 bytes | `cb58` |
//! | `ShortId` | 20 bytes | `cb58` |
//! | `NodeId` | 20 bytes | `NodeID-` + `cb58` |

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::cb58;
use crate::errors::IdError;

/// Numeric network identifier.
pub type NetworkId = u32;

/// Primary network mainnet.
pub const MAINNET_ID: NetworkId = 1;

/// Fuji testnet.
pub const FUJI_ID: NetworkId = 5;

/// Local development network.
pub const LOCAL_ID: NetworkId = 12345;

/// String prefix for node identifiers.
pub const NODE_ID_PREFIX: &str = "NodeID-";

macro_rules! fixed_id {
    ($(#[$meta:meta])* $name:ident, $len:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name([u8; $len]);

        impl $name {
            /// Width in bytes.
            pub const LEN: usize = $len;

            /// The all-zero identifier.
            pub const EMPTY: Self = Self([0u8; $len]);

            /// Wrap raw bytes.
            pub const fn new(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            /// Build from a slice, failing if the width is wrong.
            pub fn from_slice(bytes: &[u8]) -> Result<Self, IdError> {
                let arr: [u8; $len] = bytes.try_into().map_err(|_| IdError::InvalidLength {
                    expected: $len,
                    actual: bytes.len(),
                })?;
                Ok(Self(arr))
            }

            /// Borrow the raw bytes.
            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            /// Copy out the raw bytes.
            pub fn to_bytes(self) -> [u8; $len] {
                self.0
            }

            /// True if every byte is zero.
            pub fn is_empty(&self) -> bool {
                self.0 == [0u8; $len]
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(de::Error::custom)
            }
        }
    };
}

fixed_id!(
    /// 32-byte identifier for chains, subnets, messages and validations.
    Id,
    32
);

fixed_id!(
    /// 20-byte identifier for addresses.
    ShortId,
    20
);

fixed_id!(
    /// 20-byte identifier of a node, derived from its staking certificate.
    NodeId,
    20
);

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&cb58::encode(&self.0))
    }
}

impl FromStr for Id {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slice(&cb58::decode(s)?)
    }
}

impl fmt::Display for ShortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&cb58::encode(&self.0))
    }
}

impl FromStr for ShortId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slice(&cb58::decode(s)?)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", NODE_ID_PREFIX, cb58::encode(&self.0))
    }
}

impl FromStr for NodeId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = s.strip_prefix(NODE_ID_PREFIX).ok_or(IdError::MissingPrefix {
            expected: NODE_ID_PREFIX,
        })?;
        Self::from_slice(&cb58::decode(body)?)
    }
}
