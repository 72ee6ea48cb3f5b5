//! Conversion between the embedded Unix millisecond timestamp and PostgreSQL timestamps.

use crate::Ulid;

/// Milliseconds between the Unix epoch and the PostgreSQL epoch (2000-01-01T00:00:00Z).
pub const PG_EPOCH_UNIX_MS: u64 = 946_684_800_000;

/// Represents a PostgreSQL `timestamptz` value: a signed count of microseconds since
/// 2000-01-01T00:00:00Z.
///
/// # Examples
///
/// ```rust
/// use pgulid::{Timestamp, Ulid};
///
/// let x = "01BX5ZZKBKACTAV9WEVGEMMVRY".parse::<Ulid>()?;
/// assert_eq!(x.to_timestamp(), Timestamp::from_micros(562_123_776_371_000));
/// # Ok::<(), pgulid::ParseError>(())
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Creates an object from microseconds since the PostgreSQL epoch.
    pub const fn from_micros(micros: i64) -> Self {
        Self(micros)
    }

    /// Returns microseconds since the PostgreSQL epoch.
    pub const fn as_micros(&self) -> i64 {
        self.0
    }

    /// Creates an object from a Unix timestamp in milliseconds.
    ///
    /// # Panics
    ///
    /// Panics if `unix_ts_ms` is not a 48-bit unsigned integer.
    pub const fn from_unix_ts_ms(unix_ts_ms: u64) -> Self {
        assert!(unix_ts_ms < 1 << 48, "`unix_ts_ms` must be a 48-bit integer");
        Self((unix_ts_ms as i64 - PG_EPOCH_UNIX_MS as i64) * 1000)
    }

    /// Returns the Unix timestamp in milliseconds, rounded toward negative infinity, or `None` if
    /// it falls outside the 48-bit unsigned range.
    pub const fn to_unix_ts_ms(&self) -> Option<u64> {
        let unix_ts_ms = self.0.div_euclid(1000) + PG_EPOCH_UNIX_MS as i64;
        if 0 <= unix_ts_ms && unix_ts_ms < 1 << 48 {
            Some(unix_ts_ms as u64)
        } else {
            None
        }
    }
}

impl Ulid {
    /// Returns the embedded timestamp as a PostgreSQL timestamp.
    ///
    /// ULIDs from before 2000-01-01 yield negative timestamps.
    pub const fn to_timestamp(&self) -> Timestamp {
        Timestamp::from_unix_ts_ms(self.unix_ts_ms())
    }
}

#[cfg(feature = "chrono")]
#[cfg_attr(docsrs, doc(cfg(feature = "chrono")))]
mod chrono_support {
    use super::{Timestamp, PG_EPOCH_UNIX_MS};
    use crate::Ulid;
    use chrono::{DateTime, Utc};

    const PG_EPOCH_UNIX_MICROS: i64 = PG_EPOCH_UNIX_MS as i64 * 1000;

    impl Timestamp {
        /// Creates an object from a [`DateTime<Utc>`], or returns `None` if the microsecond
        /// count overflows.
        pub fn from_datetime(datetime: &DateTime<Utc>) -> Option<Self> {
            datetime
                .timestamp_micros()
                .checked_sub(PG_EPOCH_UNIX_MICROS)
                .map(Self)
        }

        /// Returns the equivalent [`DateTime<Utc>`], or `None` if it is out of the range that
        /// `chrono` supports.
        pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
            let unix_micros = self.0.checked_add(PG_EPOCH_UNIX_MICROS)?;
            DateTime::from_timestamp(
                unix_micros.div_euclid(1_000_000),
                (unix_micros.rem_euclid(1_000_000) * 1000) as u32,
            )
        }
    }

    impl Ulid {
        /// Returns the embedded timestamp as a [`DateTime<Utc>`].
        pub fn datetime(&self) -> DateTime<Utc> {
            let unix_ts_ms = self.unix_ts_ms() as i64;
            // 48-bit millisecond counts end in year 10889, well within chrono's range
            DateTime::from_timestamp(unix_ts_ms / 1000, (unix_ts_ms % 1000) as u32 * 1_000_000)
                .unwrap_or(DateTime::<Utc>::MAX_UTC)
        }
    }

}

#[cfg(test)]
mod tests {
    use super::{Timestamp, PG_EPOCH_UNIX_MS};
    use crate::Ulid;

    /// Translates between Unix and PostgreSQL epochs
    #[test]
    fn translates_between_unix_and_postgresql_epochs() {
        let cases = [
            (0, -946_684_800_000_000),
            (PG_EPOCH_UNIX_MS, 0),
            (PG_EPOCH_UNIX_MS + 1, 1_000),
            (1_508_808_576_371, 562_123_776_371_000),
            ((1 << 48) - 1, 280_528_291_910_655_000),
        ];

        for (unix_ts_ms, micros) in cases {
            let ts = Timestamp::from_unix_ts_ms(unix_ts_ms);
            assert_eq!(ts.as_micros(), micros);
            assert_eq!(ts.to_unix_ts_ms(), Some(unix_ts_ms));
            assert_eq!(Ulid::from_fields(unix_ts_ms, 0).to_timestamp(), ts);
            assert_eq!(Ulid::from_fields(unix_ts_ms, (1 << 80) - 1).to_timestamp(), ts);
        }
    }

    /// Truncates sub-millisecond precision toward negative infinity
    #[test]
    fn truncates_sub_millisecond_precision_toward_negative_infinity() {
        assert_eq!(Timestamp::from_micros(999).to_unix_ts_ms(), Some(PG_EPOCH_UNIX_MS));
        assert_eq!(Timestamp::from_micros(1_999).to_unix_ts_ms(), Some(PG_EPOCH_UNIX_MS + 1));
        assert_eq!(Timestamp::from_micros(-1).to_unix_ts_ms(), Some(PG_EPOCH_UNIX_MS - 1));
        assert_eq!(Timestamp::from_micros(-1_000).to_unix_ts_ms(), Some(PG_EPOCH_UNIX_MS - 1));
        assert_eq!(Timestamp::from_micros(-1_001).to_unix_ts_ms(), Some(PG_EPOCH_UNIX_MS - 2));
    }

    /// Returns none outside 48-bit Unix millisecond range
    #[test]
    fn returns_none_outside_48_bit_unix_millisecond_range() {
        let lower = Timestamp::from_unix_ts_ms(0).as_micros();
        let upper = Timestamp::from_unix_ts_ms((1 << 48) - 1).as_micros();
        assert_eq!(Timestamp::from_micros(lower - 1).to_unix_ts_ms(), None);
        assert_eq!(Timestamp::from_micros(upper + 999).to_unix_ts_ms(), Some((1 << 48) - 1));
        assert_eq!(Timestamp::from_micros(upper + 1_000).to_unix_ts_ms(), None);
        assert_eq!(Timestamp::from_micros(i64::MIN).to_unix_ts_ms(), None);
        assert_eq!(Timestamp::from_micros(i64::MAX).to_unix_ts_ms(), None);
    }
}
