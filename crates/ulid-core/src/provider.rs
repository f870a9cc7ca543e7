use crate::{
    Clock, EntropySource, Error, OsEntropy, Part, Randomness, ResultExt, SystemClock, Timestamp,
};
use anyhow::anyhow;
use std::sync::{Mutex, MutexGuard};

/// Source of the two halves of a new ULID
pub trait Provider: Send + Sync {
    fn timestamp(&self) -> crate::Result<Timestamp>;

    /// Randomness for a ULID that will carry timestamp `time`
    fn randomness(&self, time: Timestamp) -> crate::Result<Randomness>;

    fn new_parts(&self) -> crate::Result<(Timestamp, Randomness)> {
        let time = self.timestamp()?;
        let randomness = self.randomness(time)?;
        Ok((time, randomness))
    }
}

fn clock_timestamp<C: Clock>(clock: &C) -> crate::Result<Timestamp> {
    Timestamp::from_ms(clock.milliseconds()?)
}

fn fresh_randomness<E: EntropySource>(entropy: &E) -> crate::Result<Randomness> {
    let mut buf = [0; Part::Randomness.bytes()];
    entropy
        .fill(&mut buf)
        .wrap_context("gathering randomness for a new ULID")?;
    Ok(Randomness::from_bytes(buf))
}

/// Timestamp from the clock, 80 fresh random bits for every ULID
#[derive(Debug, Default)]
pub struct DefaultProvider<C = SystemClock, E = OsEntropy> {
    clock: C,
    entropy: E,
}

impl<C: Clock, E: EntropySource> DefaultProvider<C, E> {
    pub fn new(clock: C, entropy: E) -> Self {
        DefaultProvider { clock, entropy }
    }
}

impl<C: Clock, E: EntropySource> Provider for DefaultProvider<C, E> {
    fn timestamp(&self) -> crate::Result<Timestamp> {
        clock_timestamp(&self.clock)
    }

    fn randomness(&self, _time: Timestamp) -> crate::Result<Randomness> {
        fresh_randomness(&self.entropy)
    }
}

/// Generates strictly increasing ULIDs
///
/// Within a single millisecond, each ULID's randomness is the previous one's
/// plus one. Once the randomness space of a millisecond is exhausted,
/// generation fails with [`Error::MonotonicOverflow`] until the clock moves
/// on. If the clock goes backwards, the last seen millisecond keeps being
/// used so that ordering is preserved.
///
/// Explicit timestamps, as given to [`Api::from_timestamp`](crate::Api::from_timestamp),
/// continue the clock's sequence when they fall on its last millisecond.
/// Otherwise they run their own sequence, which never holds the clock back.
#[derive(Debug, Default)]
pub struct MonotonicProvider<C = SystemClock, E = OsEntropy> {
    clock: C,
    entropy: E,
    state: Mutex<MonotonicState>,
}

type LastParts = Option<(Timestamp, Randomness)>;

#[derive(Debug, Default)]
struct MonotonicState {
    /// Last parts handed out for a clock timestamp
    clock: LastParts,
    /// Last parts handed out for an explicit timestamp
    explicit: LastParts,
}

fn same_time(last: &LastParts, time: Timestamp) -> bool {
    last.is_some_and(|(last_time, _)| last_time == time)
}

impl<C: Clock, E: EntropySource> MonotonicProvider<C, E> {
    pub fn new(clock: C, entropy: E) -> Self {
        MonotonicProvider {
            clock,
            entropy,
            state: Mutex::new(MonotonicState::default()),
        }
    }

    fn next_randomness(&self, last: &mut LastParts, time: Timestamp) -> crate::Result<Randomness> {
        let randomness = match *last {
            Some((last_time, last_randomness)) if last_time == time => {
                last_randomness.checked_next().ok_or_else(|| {
                    tracing::debug!(?time, "monotonic randomness exhausted");
                    Error::MonotonicOverflow(time)
                })?
            }
            _ => fresh_randomness(&self.entropy)?,
        };
        *last = Some((time, randomness));
        Ok(randomness)
    }

    fn lock_state(&self) -> crate::Result<MutexGuard<'_, MonotonicState>> {
        self.state
            .lock()
            .map_err(|_| Error::Other(anyhow!("monotonic provider lock was poisoned")))
    }
}

impl<C: Clock, E: EntropySource> Provider for MonotonicProvider<C, E> {
    fn timestamp(&self) -> crate::Result<Timestamp> {
        clock_timestamp(&self.clock)
    }

    fn randomness(&self, time: Timestamp) -> crate::Result<Randomness> {
        let mut state = self.lock_state()?;
        let state = &mut *state;
        if same_time(&state.clock, time) {
            self.next_randomness(&mut state.clock, time)
        } else {
            self.next_randomness(&mut state.explicit, time)
        }
    }

    fn new_parts(&self) -> crate::Result<(Timestamp, Randomness)> {
        let mut state = self.lock_state()?;
        let state = &mut *state;
        let mut time = clock_timestamp(&self.clock)?;
        if let Some((last_time, _)) = state.clock {
            if time < last_time {
                tracing::warn!(
                    ?time,
                    ?last_time,
                    "clock went backwards, reusing last ULID timestamp"
                );
                time = last_time;
            }
        }
        if !same_time(&state.clock, time) && same_time(&state.explicit, time) {
            state.clock = state.explicit.take();
        }
        let randomness = self.next_randomness(&mut state.clock, time)?;
        tracing::trace!(?time, ?randomness, "generated monotonic ULID parts");
        Ok((time, randomness))
    }
}

/// Stores the microsecond within the millisecond in the top 16 bits of the
/// randomness, so ULIDs from the same millisecond sort by microsecond
#[derive(Debug, Default)]
pub struct MicrosecondProvider<C = SystemClock, E = OsEntropy> {
    clock: C,
    entropy: E,
}

impl<C: Clock, E: EntropySource> MicrosecondProvider<C, E> {
    pub fn new(clock: C, entropy: E) -> Self {
        MicrosecondProvider { clock, entropy }
    }

    fn randomness_at(&self, micros: u16) -> crate::Result<Randomness> {
        let mut buf = [0; Part::Randomness.bytes()];
        buf[..2].copy_from_slice(&micros.to_be_bytes());
        self.entropy
            .fill(&mut buf[2..])
            .wrap_context("gathering randomness for a new ULID")?;
        Ok(Randomness::from_bytes(buf))
    }
}

impl<C: Clock, E: EntropySource> Provider for MicrosecondProvider<C, E> {
    fn timestamp(&self) -> crate::Result<Timestamp> {
        clock_timestamp(&self.clock)
    }

    /// Uses the clock's microsecond only when it is within millisecond
    /// `time`, and 0 otherwise
    fn randomness(&self, time: Timestamp) -> crate::Result<Randomness> {
        let us = self.clock.microseconds()?;
        let micros = if us / 1000 == time.ms() { us % 1000 } else { 0 };
        self.randomness_at(micros as u16)
    }

    fn new_parts(&self) -> crate::Result<(Timestamp, Randomness)> {
        // Read the clock once so that both halves agree
        let us = self.clock.microseconds()?;
        let time = Timestamp::from_ms(us / 1000)?;
        let randomness = self.randomness_at((us % 1000) as u16)?;
        Ok((time, randomness))
    }
}
