use crate::SystemTimeExt;
use std::sync::atomic::{AtomicU64, Ordering};
use web_time::SystemTime;

/// Source of the current time for ULID generation
pub trait Clock: Send + Sync {
    /// Microseconds since UNIX_EPOCH
    fn microseconds(&self) -> crate::Result<u64>;

    /// Milliseconds since UNIX_EPOCH
    fn milliseconds(&self) -> crate::Result<u64> {
        Ok(self.microseconds()? / 1000)
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn microseconds(&self) -> crate::Result<u64> {
        (**self).microseconds()
    }

    fn milliseconds(&self) -> crate::Result<u64> {
        (**self).milliseconds()
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn microseconds(&self) -> crate::Result<u64> {
        SystemTime::now().us_since_posix()
    }

    fn milliseconds(&self) -> crate::Result<u64> {
        SystemTime::now().ms_since_posix()
    }
}

/// A clock that only moves when told to
#[derive(Debug, Default)]
pub struct ManualClock {
    us: AtomicU64,
}

impl ManualClock {
    pub fn new_ms(ms: u64) -> ManualClock {
        ManualClock {
            us: AtomicU64::new(ms.saturating_mul(1000)),
        }
    }

    pub fn set_ms(&self, ms: u64) {
        self.us.store(ms.saturating_mul(1000), Ordering::SeqCst);
    }

    pub fn set_us(&self, us: u64) {
        self.us.store(us, Ordering::SeqCst);
    }

    /// Saturates at `u64::MAX` microseconds
    pub fn advance_ms(&self, ms: u64) {
        let step = ms.saturating_mul(1000);
        let _ = self.us.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |us| {
            Some(us.saturating_add(step))
        });
    }
}

impl Clock for ManualClock {
    fn microseconds(&self) -> crate::Result<u64> {
        Ok(self.us.load(Ordering::SeqCst))
    }
}
