//! Operator-style entry points for embedding ULIDs in a host engine.
//!
//! Each function mirrors one operation a database extension registers for its ULID column type:
//! text input and output, binary receive and send, timestamp casts, the comparison operators, the
//! B-tree support function, and the hash support function. Argument unwrapping and result
//! reporting belong to the host.
//!
//! ```rust
//! use pgulid::ops;
//!
//! let a = ops::parse("01ARZ3NDEKTSV4RRFFQ69G5FAV")?;
//! let b = ops::parse("01BX5ZZKBKACTAV9WEVGEMMVRY")?;
//! assert_eq!(ops::compare(&a, &b), -1);
//! assert!(ops::less(&a, &b));
//! assert_eq!(ops::decode_bytes(ops::encode_bytes(&b)), b);
//! # Ok::<(), pgulid::ParseError>(())
//! ```

#[cfg(not(feature = "std"))]
use core as std;

use std::cmp::Ordering;

use fstr::FStr;

#[cfg(feature = "global_gen")]
use crate::GenerateError;
use crate::{ParseError, Timestamp, Ulid};

/// Generates a new ULID from the current time.
#[cfg(feature = "global_gen")]
#[cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]
pub fn generate() -> Result<Ulid, GenerateError> {
    crate::try_ulid()
}

/// Parses the 26-digit canonical string representation.
pub fn parse(src: &str) -> Result<Ulid, ParseError> {
    Ulid::parse_str(src)
}

/// Returns the 26-digit canonical string representation.
pub fn format(value: &Ulid) -> FStr<26> {
    value.encode()
}

/// Creates a ULID from its 16-byte binary representation. Never fails.
pub const fn decode_bytes(bytes: [u8; 16]) -> Ulid {
    Ulid::from_bytes(bytes)
}

/// Returns the 16-byte binary representation.
pub const fn encode_bytes(value: &Ulid) -> [u8; 16] {
    *value.as_bytes()
}

/// Returns the embedded timestamp as a PostgreSQL timestamp.
pub const fn to_timestamp(value: &Ulid) -> Timestamp {
    value.to_timestamp()
}

/// Generates a new ULID carrying `timestamp` and a fresh random payload.
#[cfg(feature = "global_gen")]
#[cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]
pub fn from_timestamp(timestamp: Timestamp) -> Result<Ulid, GenerateError> {
    crate::ulid_from_timestamp(timestamp)
}

/// Returns `-1`, `0`, or `1` as `a` is less than, equal to, or greater than `b`.
pub fn compare(a: &Ulid, b: &Ulid) -> i32 {
    match a.cmp(b) {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}

pub fn equal(a: &Ulid, b: &Ulid) -> bool {
    compare(a, b) == 0
}

pub fn not_equal(a: &Ulid, b: &Ulid) -> bool {
    compare(a, b) != 0
}

pub fn less(a: &Ulid, b: &Ulid) -> bool {
    compare(a, b) < 0
}

pub fn less_or_equal(a: &Ulid, b: &Ulid) -> bool {
    compare(a, b) <= 0
}

pub fn greater(a: &Ulid, b: &Ulid) -> bool {
    compare(a, b) > 0
}

pub fn greater_or_equal(a: &Ulid, b: &Ulid) -> bool {
    compare(a, b) >= 0
}

/// Returns a 32-bit hash that is stable across processes, folded from [`Ulid::stable_hash`].
pub fn hash(value: &Ulid) -> u32 {
    let h = value.stable_hash();
    (h ^ (h >> 32)) as u32
}
