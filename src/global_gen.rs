//! Default generator and entry point functions.

#![cfg(feature = "global_gen")]
#![cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]

use std::cell::RefCell;

use crate::{GenerateError, Timestamp, Ulid};
use inner::GlobalGen;

thread_local! {
    static DEFAULT_GENERATOR: RefCell<Option<GlobalGen>> = const { RefCell::new(None) };
}

/// Runs `f` with the thread-local generator, creating one if none exists or if the process ID
/// has changed since the last call.
fn with_default_generator<T>(
    f: impl FnOnce(&mut GlobalGen) -> Result<T, GenerateError>,
) -> Result<T, GenerateError> {
    DEFAULT_GENERATOR.with(|cell| {
        let mut slot = cell.borrow_mut();
        if unix_fork_safety::pid_changed() && slot.take().is_some() {
            log::debug!("process ID changed; reseeding thread-local ULID generator");
        }

        let g = match &mut *slot {
            Some(g) => g,
            empty => empty.insert(inner::new_global_gen()?),
        };
        f(g)
    })
}

/// Generates a ULID object.
///
/// This function employs a thread-local generator seeded by the operating system. It shares no
/// lock with other threads and does not order ULIDs generated within the same millisecond. On
/// Unix, the generator is reseeded when the process ID changes (i.e., upon process forks) to
/// prevent collisions across processes.
///
/// # Panics
///
/// Panics if the operating system random source cannot seed the generator. Use [`try_ulid`] to
/// handle the failure instead.
///
/// # Examples
///
/// ```rust
/// let ulid = pgulid::ulid();
/// println!("{}", ulid); // e.g., "01BX5ZZKBKACTAV9WEVGEMMVRY"
/// println!("{:?}", ulid.as_bytes()); // as 16-byte big-endian array
///
/// let ulid_string: String = pgulid::ulid().to_string();
/// ```
pub fn ulid() -> Ulid {
    try_ulid().expect("pgulid: could not generate ULID")
}

/// Generates a ULID object, or returns an error if the random source is unavailable.
pub fn try_ulid() -> Result<Ulid, GenerateError> {
    with_default_generator(|g| g.generate())
}

/// Generates a new ULID object that carries `timestamp` and a fresh random payload.
///
/// # Examples
///
/// ```rust
/// use pgulid::{ulid_from_timestamp, Timestamp};
///
/// let ts = Timestamp::from_micros(562_123_776_371_000);
/// let x = ulid_from_timestamp(ts)?;
/// assert!(x.encode().starts_with("01BX5ZZKBK"));
/// assert_eq!(x.to_timestamp(), ts);
/// # Ok::<(), pgulid::GenerateError>(())
/// ```
pub fn ulid_from_timestamp(timestamp: Timestamp) -> Result<Ulid, GenerateError> {
    with_default_generator(|g| g.generate_at(timestamp))
}

mod inner {
    use rand::rngs::{adapter::ReseedingRng, OsRng};
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Core;

    use crate::generator::{with_rand08::Adapter, GenerateError, Generator};

    /// The type alias for the thread-local generator.
    ///
    /// The generator employs [`ChaCha12Core`] with [`ReseedingRng`] wrapper to emulate the
    /// strategy used by [`rand::rngs::ThreadRng`].
    pub type GlobalGen = Generator<Adapter<ReseedingRng<ChaCha12Core, OsRng>>>;

    /// Creates a generator seeded by the operating system random source.
    pub fn new_global_gen() -> Result<GlobalGen, GenerateError> {
        let core = ChaCha12Core::from_rng(OsRng).map_err(|err| {
            log::error!("could not seed ULID generator: {}", err);
            GenerateError::RandomSourceUnavailable
        })?;
        Ok(Generator::with_rand08(ReseedingRng::new(core, 1024 * 64, OsRng)))
    }
}

#[cfg(unix)]
mod unix_fork_safety {
    use std::{cell::Cell, process};

    thread_local! {
        static PID: Cell<u32> = Cell::new(process::id());
    }

    /// Returns true if the process ID differs from the one observed by the previous call on this
    /// thread.
    pub fn pid_changed() -> bool {
        PID.with(|last_pid| {
            let pid = process::id();
            pid != last_pid.replace(pid)
        })
    }
}

#[cfg(not(unix))]
mod unix_fork_safety {
    pub const fn pid_changed() -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::{try_ulid, ulid, ulid_from_timestamp};
    use crate::{Timestamp, Ulid};

    const N_SAMPLES: usize = 100_000;
    thread_local!(static SAMPLES: Vec<String> = (0..N_SAMPLES).map(|_| ulid().into()).collect());

    /// Generates canonical string
    #[test]
    fn generates_canonical_string() {
        let pattern = r"^[0-7][0-9A-HJKMNP-TV-Z]{9}[0-9A-G][0-9A-HJKMNP-TV-Z]{15}$";
        let re = regex::Regex::new(pattern).unwrap();
        SAMPLES.with(|samples| {
            for e in samples {
                assert!(re.is_match(e), "{}", e);
            }
        });
    }

    /// Generates 100k identifiers without collision
    #[test]
    fn generates_100k_identifiers_without_collision() {
        use std::collections::HashSet;
        SAMPLES.with(|samples| {
            let s: HashSet<&String> = samples.iter().collect();
            assert_eq!(s.len(), N_SAMPLES);
        });
    }

    /// Generates non-decreasing timestamps by creation time
    #[test]
    fn generates_non_decreasing_timestamps_by_creation_time() {
        SAMPLES.with(|samples| {
            for i in 1..N_SAMPLES {
                assert!(samples[i - 1][..10] <= samples[i][..10]);
            }
        });
    }

    /// Orders ULIDs generated milliseconds apart by creation time
    #[test]
    fn orders_ulids_generated_milliseconds_apart_by_creation_time() {
        use std::{thread, time};
        for _ in 0..10 {
            let earlier = ulid();
            thread::sleep(time::Duration::from_millis(5));
            let later = ulid();
            assert!(earlier < later);
            assert!(earlier.to_string() < later.to_string());
        }
    }

    /// Encodes up-to-date timestamp
    #[test]
    fn encodes_up_to_date_timestamp() {
        use std::time;
        for _ in 0..10_000 {
            let ts_now = (time::SystemTime::now()
                .duration_since(time::UNIX_EPOCH)
                .expect("clock may have gone backwards")
                .as_millis()) as i64;
            let timestamp = try_ulid().unwrap().unix_ts_ms() as i64;
            assert!((ts_now - timestamp).abs() < 16);
        }
    }

    /// Sets constant bits and random bits properly
    #[test]
    fn sets_constant_bits_and_random_bits_properly() {
        // count '1' of each bit
        let bins = SAMPLES.with(|samples| {
            let mut bins = [0u32; 128];
            for e in samples {
                let num = u128::from(e.parse::<Ulid>().unwrap());
                for (i, bin) in bins.iter_mut().enumerate() {
                    *bin += ((num >> (127 - i)) & 1) as u32;
                }
            }
            bins
        });

        // test if the top bit of the payload is always cleared
        assert_eq!(bins[48], 0, "payload bit 48");

        // test if random bits are set to 1 at ~50% probability
        // set margin based on binom dist 99.999% confidence interval
        let margin = 4.417173 * (0.5 * 0.5 / N_SAMPLES as f64).sqrt();
        for (i, bin) in bins.iter().enumerate().skip(49) {
            let p = *bin as f64 / N_SAMPLES as f64;
            assert!((p - 0.5).abs() < margin, "random bit {}: {}", i, p);
        }
    }

    /// Generates from timestamp with fresh payload
    #[test]
    fn generates_from_timestamp_with_fresh_payload() {
        let ts = Timestamp::from_micros(562_123_776_371_000);
        let a = ulid_from_timestamp(ts).unwrap();
        let b = ulid_from_timestamp(ts).unwrap();
        assert_eq!(a.to_timestamp(), ts);
        assert_eq!(b.to_timestamp(), ts);
        assert_ne!(a, b);
        assert_eq!(a.as_bytes()[6] & 0x80, 0);
        assert!(ulid_from_timestamp(Timestamp::from_micros(i64::MIN)).is_err());
    }

    /// Generates no duplicate IDs under multithreading
    #[test]
    fn generates_no_duplicate_ids_under_multithreading(
    ) -> Result<(), Box<dyn std::error::Error>> {
        use std::{collections::HashSet, sync::mpsc, thread};

        let (tx, rx) = mpsc::channel();
        for _ in 0..4 {
            let tx = tx.clone();
            thread::Builder::new()
                .spawn(move || {
                    for _ in 0..10_000 {
                        tx.send(ulid()).unwrap();
                    }
                })
                .map_err(|err| format!("failed to spawn thread: {:?}", err))?;
        }
        drop(tx);

        let mut s = HashSet::new();
        while let Ok(e) = rx.recv() {
            s.insert(e);
        }

        assert_eq!(s.len(), 4 * 10_000);
        Ok(())
    }
}
