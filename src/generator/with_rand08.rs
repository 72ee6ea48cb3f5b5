//! Integration with `rand` (v0.8) crate.

use super::{GenerateError, Generator, RandSource};
use rand::RngCore;

/// An adapter that implements [`RandSource`] for [`RngCore`] types.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Adapter<T>(/** The wrapped [`RngCore`] type. */ pub T);

impl<T: RngCore> RandSource for Adapter<T> {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), GenerateError> {
        self.0.try_fill_bytes(dest).map_err(|err| {
            log::error!("could not fill random bytes: {}", err);
            GenerateError::RandomSourceUnavailable
        })
    }
}

impl<T: RngCore> Generator<Adapter<T>> {
    /// Creates a generator object with a specified random number generator that implements
    /// [`RngCore`] from `rand` (v0.8) crate and the system clock.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pgulid::Generator;
    ///
    /// let mut g = Generator::with_rand08(rand::thread_rng());
    /// println!("{}", g.generate()?);
    /// # Ok::<(), pgulid::GenerateError>(())
    /// ```
    pub const fn with_rand08(rng: T) -> Self {
        Self::with_rand_and_time_sources(Adapter(rng), super::StdSystemTime)
    }
}

#[cfg(test)]
mod tests {
    use super::{Adapter, GenerateError, Generator};
    use rand::{rngs::mock::StepRng, Error, RngCore};

    /// A random number generator that always fails.
    struct BrokenRng;

    impl RngCore for BrokenRng {
        fn next_u32(&mut self) -> u32 {
            unreachable!()
        }

        fn next_u64(&mut self) -> u64 {
            unreachable!()
        }

        fn fill_bytes(&mut self, _: &mut [u8]) {
            unreachable!()
        }

        fn try_fill_bytes(&mut self, _: &mut [u8]) -> Result<(), Error> {
            Err(Error::from(core::num::NonZeroU32::new(Error::CUSTOM_START).unwrap()))
        }
    }

    /// Propagates failure of random number generator
    #[test]
    fn propagates_failure_of_random_number_generator() {
        let mut g = Generator::with_rand08(BrokenRng);
        assert_eq!(
            g.generate_core(0x0123_4567_89ab),
            Err(GenerateError::RandomSourceUnavailable)
        );
    }

    /// Fills payload from wrapped generator
    #[test]
    fn fills_payload_from_wrapped_generator() {
        let mut g = Generator::with_rand08(StepRng::new(u64::MAX, 0));
        let e = g.generate_core(0x0123_4567_89ab).unwrap();
        assert_eq!(e.unix_ts_ms(), 0x0123_4567_89ab);
        assert_eq!(e.randomness(), (1 << 79) - 1);

        let mut adapter = Adapter(StepRng::new(0x0102_0304_0506_0708, 0));
        let mut buffer = [0u8; 10];
        crate::generator::RandSource::fill_bytes(&mut adapter, &mut buffer).unwrap();
        assert_eq!(buffer, [8, 7, 6, 5, 4, 3, 2, 1, 8, 7]);
    }
}
