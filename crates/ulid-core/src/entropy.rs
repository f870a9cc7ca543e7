use anyhow::anyhow;
use rand::{rngs::StdRng, RngCore, SeedableRng};
use std::sync::Mutex;

/// Source of the random bits of new ULIDs
pub trait EntropySource: Send + Sync {
    fn fill(&self, buf: &mut [u8]) -> anyhow::Result<()>;
}

impl<E: EntropySource + ?Sized> EntropySource for std::sync::Arc<E> {
    fn fill(&self, buf: &mut [u8]) -> anyhow::Result<()> {
        (**self).fill(buf)
    }
}

/// Randomness from the operating system's CSPRNG
#[derive(Clone, Copy, Debug, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&self, buf: &mut [u8]) -> anyhow::Result<()> {
        getrandom::fill(buf).map_err(|e| anyhow!("failed reading OS randomness: {e}"))
    }
}

/// Reproducible randomness, for tests and replays
///
/// This is NOT suitable for identifiers that must be unguessable.
#[derive(Debug)]
pub struct SeededEntropy {
    rng: Mutex<StdRng>,
}

impl SeededEntropy {
    pub fn new(seed: u64) -> SeededEntropy {
        SeededEntropy {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl EntropySource for SeededEntropy {
    fn fill(&self, buf: &mut [u8]) -> anyhow::Result<()> {
        self.rng
            .lock()
            .map_err(|_| anyhow!("seeded entropy lock was poisoned"))?
            .fill_bytes(buf);
        Ok(())
    }
}
