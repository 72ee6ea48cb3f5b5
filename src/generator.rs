//! ULID generator and related types.

#[cfg(not(feature = "std"))]
use core as std;

use std::fmt;

use crate::{Timestamp, Ulid};

pub mod with_rand08;


/// The largest value that fits in the 48-bit timestamp field.
const MAX_TIMESTAMP: u64 = (1 << 48) - 1;

/// A trait that defines the minimum random number generator interface for [`Generator`].
pub trait RandSource {
    /// Fills `dest` with cryptographically strong random data, or reports that the underlying
    /// source cannot provide it.
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), GenerateError>;
}

/// A trait that defines the minimum system clock interface for [`Generator`].
pub trait TimeSource {
    /// Returns the current Unix timestamp in milliseconds.
    fn unix_ts_ms(&mut self) -> u64;
}

/// The default [`TimeSource`] that uses [`std::time::SystemTime`].
///
/// The [`TimeSource`] implementation is available with the `std` feature only.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Default)]
pub struct StdSystemTime;

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl TimeSource for StdSystemTime {
    fn unix_ts_ms(&mut self) -> u64 {
        use std::time;
        match time::SystemTime::now().duration_since(time::UNIX_EPOCH) {
            Ok(elapsed) => elapsed.as_millis() as u64,
            Err(err) => {
                log::warn!("system clock reads before Unix epoch by {:?}", err.duration());
                0
            }
        }
    }
}

/// Represents a ULID generator that combines a clock and a random number generator.
///
/// The generator keeps no state between calls: two ULIDs produced within the same millisecond
/// are ordered only by their random payloads. It exists to let the caller choose the random
/// number generator and the system clock, for example to inject deterministic sources in tests.
///
/// # Examples
///
/// ```rust
/// use pgulid::Generator;
///
/// let mut g = Generator::with_rand08(rand::rngs::OsRng);
/// println!("{}", g.generate()?);
/// # Ok::<(), pgulid::GenerateError>(())
/// ```
///
/// # Construction policy
///
/// Every ULID built by the generator has the most significant bit of its payload (the top bit of
/// byte 6) cleared. The same policy applies to [`generate`], [`generate_core`], and
/// [`generate_at`], so values produced from a timestamp are indistinguishable in layout from
/// values produced from the clock.
///
/// [`generate`]: Generator::generate
/// [`generate_core`]: Generator::generate_core
/// [`generate_at`]: Generator::generate_at
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Generator<R, T = StdSystemTime> {
    /// The random number generator used by the generator.
    rand_source: R,

    /// The system clock used by the generator.
    time_source: T,
}

#[cfg(feature = "std")]
impl<R: RandSource> Generator<R> {
    /// Creates a generator object with a specified random number generator and the system clock.
    pub const fn new(rand_source: R) -> Self {
        Self::with_rand_and_time_sources(rand_source, StdSystemTime)
    }
}

impl<R, T> Generator<R, T> {
    /// Creates a generator object with specified random number generator and system clock.
    pub const fn with_rand_and_time_sources(rand_source: R, time_source: T) -> Self {
        Self {
            rand_source,
            time_source,
        }
    }
}

impl<R: RandSource, T: TimeSource> Generator<R, T> {
    /// Generates a new ULID object from the current timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::RandomSourceUnavailable`] if the random number generator fails.
    pub fn generate(&mut self) -> Result<Ulid, GenerateError> {
        let unix_ts_ms = self.time_source.unix_ts_ms();
        self.generate_core(unix_ts_ms)
    }
}

impl<R: RandSource, T> Generator<R, T> {
    /// Generates a new ULID object from the `unix_ts_ms` passed.
    ///
    /// Bits above the 48-bit timestamp field are discarded.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::RandomSourceUnavailable`] if the random number generator fails.
    pub fn generate_core(&mut self, unix_ts_ms: u64) -> Result<Ulid, GenerateError> {
        let mut bytes = [0u8; 16];
        bytes[..6].copy_from_slice(&(unix_ts_ms & MAX_TIMESTAMP).to_be_bytes()[2..]);
        self.rand_source.fill_bytes(&mut bytes[6..])?;
        bytes[6] &= 0x7f;
        Ok(Ulid::from(bytes))
    }

    /// Generates a new ULID object that carries `timestamp` and a fresh random payload.
    ///
    /// This does not reconstruct any earlier ULID; only the millisecond part of `timestamp` is
    /// kept, rounded toward negative infinity.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::TimestampOutOfRange`] if `timestamp` precedes the Unix epoch or
    /// overflows the 48-bit field, or [`GenerateError::RandomSourceUnavailable`] if the random
    /// number generator fails.
    pub fn generate_at(&mut self, timestamp: Timestamp) -> Result<Ulid, GenerateError> {
        let unix_ts_ms = timestamp
            .to_unix_ts_ms()
            .ok_or(GenerateError::TimestampOutOfRange)?;
        self.generate_core(unix_ts_ms)
    }
}

/// Error generating a ULID.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum GenerateError {
    /// The cryptographically strong random source could not produce bytes.
    RandomSourceUnavailable,

    /// The timestamp cannot be represented in the 48-bit Unix millisecond field.
    TimestampOutOfRange,
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RandomSourceUnavailable => write!(f, "random source unavailable"),
            Self::TimestampOutOfRange => write!(f, "timestamp out of range"),
        }
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl std::error::Error for GenerateError {}
