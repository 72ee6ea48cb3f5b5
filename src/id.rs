#[cfg(not(feature = "std"))]
use core as std;

use std::{fmt, hash::Hasher, str};

use crate::base32;
use fstr::FStr;

/// Represents a Universally Unique Lexicographically Sortable Identifier.
///
/// The 16 bytes hold a 48-bit big-endian Unix timestamp in milliseconds followed by an 80-bit
/// random payload. The derived ordering compares the bytes as an unsigned big-endian integer, so
/// it agrees with the order of [`u128`] values and of canonical strings.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Ulid([u8; 16]);

impl Ulid {
    /// Nil ULID (00000000000000000000000000)
    pub const NIL: Self = Self([0x00; 16]);

    /// Max ULID (7ZZZZZZZZZZZZZZZZZZZZZZZZZ)
    pub const MAX: Self = Self([0xff; 16]);

    /// Returns a reference to the underlying byte array.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Creates an object from a 16-byte big-endian array. Every bit pattern is a valid ULID.
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Creates a ULID from a 48-bit `unix_ts_ms` and an 80-bit `randomness`.
    ///
    /// The payload is stored as given; see [`Generator`](crate::Generator) for the construction
    /// policy applied to freshly generated values.
    ///
    /// # Panics
    ///
    /// Panics if either argument exceeds its field width.
    pub const fn from_fields(unix_ts_ms: u64, randomness: u128) -> Self {
        if unix_ts_ms >= 1 << 48 || randomness >= 1 << 80 {
            panic!("invalid field value");
        }

        Self((((unix_ts_ms as u128) << 80) | randomness).to_be_bytes())
    }

    /// Returns the 48-bit `unix_ts_ms` field value.
    pub const fn unix_ts_ms(&self) -> u64 {
        let b = &self.0;
        u64::from_be_bytes([0, 0, b[0], b[1], b[2], b[3], b[4], b[5]])
    }

    /// Returns the 80-bit random payload.
    pub const fn randomness(&self) -> u128 {
        u128::from_be_bytes(self.0) & ((1 << 80) - 1)
    }

    /// Returns the 26-digit canonical string representation stored in a stack-allocated
    /// structure that can be dereferenced as `str` and [`Display`](fmt::Display)ed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pgulid::Ulid;
    ///
    /// let x = "01BX5ZZKBKACTAV9WEVGEMMVRY".parse::<Ulid>()?;
    /// let y = x.encode();
    /// assert_eq!(&y as &str, "01BX5ZZKBKACTAV9WEVGEMMVRY");
    /// assert_eq!(format!("{}", y), "01BX5ZZKBKACTAV9WEVGEMMVRY");
    /// # Ok::<(), pgulid::ParseError>(())
    /// ```
    pub fn encode(&self) -> FStr<26> {
        let buffer = base32::encode(&self.0);
        debug_assert!(buffer.is_ascii());
        // SAFETY: every byte comes from the ASCII alphabet table
        unsafe { FStr::from_inner_unchecked(buffer) }
    }

    /// Creates an object from the 26-digit canonical string representation.
    ///
    /// Only uppercase symbols are accepted. The length is checked before the characters.
    pub fn parse_str(src: &str) -> Result<Self, ParseError> {
        let bytes = <&[u8; 26]>::try_from(src.as_bytes())
            .map_err(|_| ParseError::InvalidLength { len: src.len() })?;
        base32::decode(bytes)
            .map(Self)
            .map_err(|position| ParseError::InvalidCharacter { position })
    }

    /// Returns a 64-bit FNV-1a hash of the 16 bytes.
    ///
    /// Unlike the [`Hash`](std::hash::Hash) implementation fed to a randomly seeded hasher, this
    /// value is the same in every process and on every platform.
    pub fn stable_hash(&self) -> u64 {
        let mut hasher = fnv::FnvHasher::default();
        hasher.write(&self.0);
        hasher.finish()
    }
}

impl fmt::Display for Ulid {
    /// Returns the 26-digit canonical string representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl str::FromStr for Ulid {
    type Err = ParseError;

    /// Creates an object from the 26-digit canonical string representation.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        Self::parse_str(src)
    }
}

impl TryFrom<&str> for Ulid {
    type Error = ParseError;

    fn try_from(src: &str) -> Result<Self, Self::Error> {
        Self::parse_str(src)
    }
}

impl From<Ulid> for [u8; 16] {
    fn from(src: Ulid) -> Self {
        src.0
    }
}

impl From<[u8; 16]> for Ulid {
    fn from(src: [u8; 16]) -> Self {
        Self(src)
    }
}

impl AsRef<[u8]> for Ulid {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<Ulid> for u128 {
    fn from(src: Ulid) -> Self {
        Self::from_be_bytes(src.0)
    }
}

impl From<u128> for Ulid {
    fn from(src: u128) -> Self {
        Self(src.to_be_bytes())
    }
}

/// Error parsing an invalid string representation of ULID.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ParseError {
    /// The input is not exactly 26 bytes long.
    InvalidLength {
        /// Length of the rejected input in bytes.
        len: usize,
    },

    /// The input contains a symbol outside the alphabet, or a leading symbol above `7`.
    InvalidCharacter {
        /// Zero-based byte offset of the first offending symbol.
        position: usize,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength { len } => {
                write!(f, "invalid length: expected 26 characters, found {}", len)
            }
            Self::InvalidCharacter { position } => {
                write!(f, "invalid character at position {}", position)
            }
        }
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
mod std_ext {
    use super::{ParseError, Ulid};

    impl From<Ulid> for String {
        fn from(src: Ulid) -> Self {
            src.to_string()
        }
    }

    impl TryFrom<String> for Ulid {
        type Error = ParseError;

        fn try_from(src: String) -> Result<Self, Self::Error> {
            src.parse()
        }
    }

    impl std::error::Error for ParseError {}
}

#[cfg(feature = "uuid")]
#[cfg_attr(docsrs, doc(cfg(feature = "uuid")))]
mod uuid_support {
    use super::Ulid;

    impl From<Ulid> for uuid::Uuid {
        fn from(src: Ulid) -> Self {
            uuid::Uuid::from_bytes(src.0)
        }
    }

    impl From<uuid::Uuid> for Ulid {
        fn from(src: uuid::Uuid) -> Self {
            Self(src.into_bytes())
        }
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::{fmt, Ulid};
    use serde::{de, Deserializer, Serializer};

    impl serde::Serialize for Ulid {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if serializer.is_human_readable() {
                serializer.serialize_str(&self.encode())
            } else {
                serializer.serialize_bytes(self.as_bytes())
            }
        }
    }

    impl<'de> serde::Deserialize<'de> for Ulid {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            if deserializer.is_human_readable() {
                deserializer.deserialize_str(VisitorImpl)
            } else {
                deserializer.deserialize_bytes(VisitorImpl)
            }
        }
    }

    struct VisitorImpl;

    impl<'de> de::Visitor<'de> for VisitorImpl {
        type Value = Ulid;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a ULID representation")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            value.parse::<Self::Value>().map_err(de::Error::custom)
        }

        fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
            <[u8; 16]>::try_from(value)
                .map(Self::Value::from)
                .map_err(de::Error::custom)
        }
    }

}
