//! Sortable 128-bit ULIDs with a PostgreSQL-compatible timestamp bridge
//!
//! ```rust
//! use pgulid::ulid;
//!
//! let x = ulid();
//! println!("{}", x); // e.g., "01BX5ZZKBKACTAV9WEVGEMMVRY"
//! println!("{:?}", x.as_bytes()); // as 16-byte big-endian array
//! ```
//!
//! # Field and bit layout
//!
//! This implementation produces identifiers with the following bit layout:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                          unix_ts_ms                           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |          unix_ts_ms           |0|           rand              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                             rand                              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                             rand                              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Where:
//!
//! - The 48-bit `unix_ts_ms` field is dedicated to the Unix timestamp in milliseconds.
//! - The remaining 80 `rand` bits are filled with a cryptographically strong random number,
//!   except that the generator always clears the most significant one.
//!
//! The 16 bytes are the binary representation as is. The canonical text representation is 26
//! symbols of Crockford's base32 (`0123456789ABCDEFGHJKMNPQRSTVWXYZ`), uppercase only, five bits
//! per symbol starting from two implicit zero bits. Both representations sort in the same order as
//! the 128-bit unsigned integer.
//!
//! ULIDs generated within the same millisecond are not ordered among themselves.
//!
//! # Timestamp bridge
//!
//! [`Timestamp`] is the PostgreSQL `timestamptz` representation, microseconds since
//! 2000-01-01T00:00:00Z:
//!
//! ```rust
//! use pgulid::{Timestamp, Ulid};
//!
//! let x: Ulid = "01BX5ZZKBKACTAV9WEVGEMMVRY".parse()?;
//! assert_eq!(x.to_timestamp(), Timestamp::from_micros(562_123_776_371_000));
//! # Ok::<(), pgulid::ParseError>(())
//! ```
//!
//! # Crate features
//!
//! Default features:
//!
//! - `std` integrates the library with, among others, the system clock to draw current
//!   timestamps. Without `std`, this crate provides limited functionality available under
//!   `no_std` environments.
//! - `global_gen` (implies `std`) enables the thread-local default generator behind [`ulid()`].
//!
//! Optional features:
//!
//! - `serde` enables serialization/deserialization via serde.
//! - `uuid` enables conversion from/to the `uuid::Uuid` type.
//! - `chrono` enables conversion from/to `chrono::DateTime<Utc>`.

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod base32;

mod id;
pub use id::{ParseError, Ulid};

pub mod generator;
#[doc(no_inline)]
pub use generator::{GenerateError, Generator};

mod timestamp;
pub use timestamp::{Timestamp, PG_EPOCH_UNIX_MS};

pub mod ops;

mod global_gen;
#[cfg(feature = "global_gen")]
pub use global_gen::{try_ulid, ulid, ulid_from_timestamp};
