use crate::Generator;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{rng, Rng, SeedableRng};
use sticker_core::{Code, CodeLength};

/// Symbols allowed in every position but the last.
const BODY_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Symbols allowed in the last position: the body alphabet minus separators.
const TAIL_ALPHABET: &[u8; 62] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// A source of uniformly distributed random integers.
///
/// This abstraction allows you to plug in a real random source or a
/// deterministic one in tests.
pub trait RandSource: Send + Sync + 'static {
    /// Returns a random integer.
    fn rand(&self) -> u64;
}

/// A `RandSource` that uses the thread-local RNG.
///
/// This type does not store the RNG; it accesses the thread-local generator
/// on each call, so it may be freely shared across threads.
#[derive(Default, Clone, Debug)]
pub struct ThreadRandom;

impl RandSource for ThreadRandom {
    fn rand(&self) -> u64 {
        rng().random()
    }
}

/// A reproducible `RandSource` seeded from a `u64`.
#[derive(Debug)]
pub struct SeededRandom {
    inner: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandSource for SeededRandom {
    fn rand(&self) -> u64 {
        self.inner.lock().random()
    }
}

/// Draws each character uniformly at random.
///
/// Positions `0..length - 1` use letters, digits, `-` and `_` (64 symbols);
/// the last position uses letters and digits only (62 symbols).
#[derive(Debug, Default, Clone)]
pub struct RandomGenerator<R> {
    source: R,
}

impl<R: RandSource> RandomGenerator<R> {
    pub fn new(source: R) -> Self {
        Self { source }
    }

    /// Picks one symbol from `alphabet`, rejecting draws from the partial
    /// top bucket so every symbol is equally likely.
    fn pick(&self, alphabet: &[u8]) -> char {
        let bound = alphabet.len() as u64;
        let zone = u64::MAX - (u64::MAX % bound);
        loop {
            let value = self.source.rand();
            if value < zone {
                return char::from(alphabet[(value % bound) as usize]);
            }
        }
    }
}

impl RandomGenerator<ThreadRandom> {
    /// A generator backed by the thread-local RNG.
    pub fn thread_local() -> Self {
        Self::new(ThreadRandom)
    }
}

impl<R: RandSource> Generator for RandomGenerator<R> {
    fn generate(&self, length: CodeLength) -> Code {
        let length = length.get();
        let mut code = String::with_capacity(length);
        for _ in 1..length {
            code.push(self.pick(BODY_ALPHABET));
        }
        code.push(self.pick(TAIL_ALPHABET));
        Code::new_unchecked(code)
    }
}
