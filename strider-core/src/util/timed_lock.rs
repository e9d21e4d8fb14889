use std::cell::UnsafeCell;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_millis(10);
pub const DEFAULT_WRITE_TIMEOUT: Duration = Duration::from_millis(20);

#[derive(Default)]
struct LockState {
    readers: usize,
    writer: bool,
}

/// a reader-preferring reader/writer lock whose acquisitions are bounded
/// in time.
///
/// diagnostic overlays and background readers may query the graph and
/// spatial index while the game loop owns them, and those readers must
/// never queue behind maintenance writes. the off-the-shelf locks are
/// task-fair and hold a new reader back as soon as a writer is waiting,
/// so this one is built directly on a mutex and condvar: readers wait
/// only while a writer actually holds the lock, and writers wait for the
/// reader count to drain, timing out if it never does. a failed
/// acquisition returns `None` so the caller degrades to a benign
/// default, and is counted for diagnostics. no locking error ever
/// escapes to the host.
pub struct TimedRwLock<T> {
    state: Mutex<LockState>,
    released: Condvar,
    data: UnsafeCell<T>,
    read_timeout: Duration,
    write_timeout: Duration,
    read_timeouts: AtomicU64,
    write_timeouts: AtomicU64,
}

// same bounds as the standard reader/writer locks: the UnsafeCell is
// only ever exposed through the guards, which uphold shared-xor-mutable
unsafe impl<T: Send> Send for TimedRwLock<T> {}
unsafe impl<T: Send + Sync> Sync for TimedRwLock<T> {}

impl<T> TimedRwLock<T> {
    pub fn new(value: T) -> TimedRwLock<T> {
        TimedRwLock::with_timeouts(value, DEFAULT_READ_TIMEOUT, DEFAULT_WRITE_TIMEOUT)
    }

    pub fn with_timeouts(
        value: T,
        read_timeout: Duration,
        write_timeout: Duration,
    ) -> TimedRwLock<T> {
        TimedRwLock {
            state: Mutex::new(LockState::default()),
            released: Condvar::new(),
            data: UnsafeCell::new(value),
            read_timeout,
            write_timeout,
            read_timeouts: AtomicU64::new(0),
            write_timeouts: AtomicU64::new(0),
        }
    }

    /// acquire shared access, or `None` after the read timeout elapses.
    /// readers only ever wait for a writer that holds the lock; a writer
    /// that is merely waiting does not hold new readers back.
    pub fn read(&self) -> Option<TimedRwLockReadGuard<'_, T>> {
        let deadline = Instant::now() + self.read_timeout;
        let mut state = self.state.lock();
        while state.writer {
            let result = self.released.wait_until(&mut state, deadline);
            if result.timed_out() && state.writer {
                drop(state);
                self.read_timeouts.fetch_add(1, Ordering::Relaxed);
                log::warn!("read lock acquisition timed out after {:?}", self.read_timeout);
                return None;
            }
        }
        state.readers += 1;
        drop(state);
        Some(TimedRwLockReadGuard { lock: self })
    }

    /// acquire exclusive access, or `None` after the write timeout
    /// elapses. writers wait for the reader stream to drain and take the
    /// timeout when it does not.
    pub fn write(&self) -> Option<TimedRwLockWriteGuard<'_, T>> {
        let deadline = Instant::now() + self.write_timeout;
        let mut state = self.state.lock();
        while state.writer || state.readers > 0 {
            let result = self.released.wait_until(&mut state, deadline);
            if result.timed_out() && (state.writer || state.readers > 0) {
                drop(state);
                self.write_timeouts.fetch_add(1, Ordering::Relaxed);
                log::warn!(
                    "write lock acquisition timed out after {:?}",
                    self.write_timeout
                );
                return None;
            }
        }
        state.writer = true;
        drop(state);
        Some(TimedRwLockWriteGuard { lock: self })
    }

    /// number of reader acquisitions that have timed out so far
    pub fn read_timeout_count(&self) -> u64 {
        self.read_timeouts.load(Ordering::Relaxed)
    }

    /// number of writer acquisitions that have timed out so far
    pub fn write_timeout_count(&self) -> u64 {
        self.write_timeouts.load(Ordering::Relaxed)
    }
}

pub struct TimedRwLockReadGuard<'a, T> {
    lock: &'a TimedRwLock<T>,
}

impl<T> Deref for TimedRwLockReadGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        unsafe { &*self.lock.data.get() }
    }
}

impl<T> Drop for TimedRwLockReadGuard<'_, T> {
    fn drop(&mut self) {
        let mut state = self.lock.state.lock();
        state.readers -= 1;
        if state.readers == 0 {
            self.lock.released.notify_all();
        }
    }
}

pub struct TimedRwLockWriteGuard<'a, T> {
    lock: &'a TimedRwLock<T>,
}

impl<T> Deref for TimedRwLockWriteGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        unsafe { &*self.lock.data.get() }
    }
}

impl<T> DerefMut for TimedRwLockWriteGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        unsafe { &mut *self.lock.data.get() }
    }
}

impl<T> Drop for TimedRwLockWriteGuard<'_, T> {
    fn drop(&mut self) {
        let mut state = self.lock.state.lock();
        state.writer = false;
        self.lock.released.notify_all();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_uncontended_access() {
        let lock = TimedRwLock::new(41);
        {
            let mut guard = lock.write().unwrap();
            *guard += 1;
        }
        assert_eq!(*lock.read().unwrap(), 42);
        assert_eq!(lock.read_timeout_count(), 0);
        assert_eq!(lock.write_timeout_count(), 0);
    }

    #[test]
    fn test_multiple_readers_coexist() {
        let lock = TimedRwLock::new(7);
        let a = lock.read().unwrap();
        let b = lock.read().unwrap();
        assert_eq!(*a + *b, 14);
    }

    #[test]
    fn test_write_timeout_counted_while_read_held() {
        let lock = TimedRwLock::with_timeouts(
            0,
            Duration::from_millis(1),
            Duration::from_millis(1),
        );
        let _reader = lock.read().unwrap();
        assert!(lock.write().is_none());
        assert!(lock.write().is_none());
        assert_eq!(lock.write_timeout_count(), 2);
    }

    #[test]
    fn test_read_timeout_counted_while_write_held() {
        let lock = TimedRwLock::with_timeouts(
            0,
            Duration::from_millis(1),
            Duration::from_millis(1),
        );
        let _writer = lock.write().unwrap();
        assert!(lock.read().is_none());
        assert_eq!(lock.read_timeout_count(), 1);
    }

    /// the defining reader-preference case: a writer is already waiting
    /// behind an active reader, and a reader arriving after the writer
    /// must still acquire immediately
    #[test]
    fn test_new_reader_passes_waiting_writer() {
        let lock = Arc::new(TimedRwLock::with_timeouts(
            0,
            Duration::from_millis(10),
            Duration::from_millis(200),
        ));
        let reader = lock.read().unwrap();

        let contender = {
            let lock = lock.clone();
            thread::spawn(move || lock.write().is_none())
        };
        // let the writer reach its wait before the late reader arrives
        thread::sleep(Duration::from_millis(50));

        let late_reader = lock.read();
        assert!(
            late_reader.is_some(),
            "a waiting writer must not hold back new readers"
        );
        drop(late_reader);

        // the writer times out against the reader stream
        assert!(contender.join().unwrap());
        assert_eq!(lock.write_timeout_count(), 1);

        drop(reader);
        assert!(lock.write().is_some());
    }

    #[test]
    fn test_writer_acquires_once_readers_drain() {
        let lock = Arc::new(TimedRwLock::with_timeouts(
            0,
            Duration::from_millis(10),
            Duration::from_millis(200),
        ));
        let reader = lock.read().unwrap();
        let contender = {
            let lock = lock.clone();
            thread::spawn(move || {
                let mut guard = lock.write().unwrap();
                *guard = 9;
            })
        };
        thread::sleep(Duration::from_millis(20));
        drop(reader);
        contender.join().unwrap();
        assert_eq!(*lock.read().unwrap(), 9);
        assert_eq!(lock.write_timeout_count(), 0);
    }

    /// many simultaneous readers all succeed within the timeout
    #[test]
    fn test_concurrent_readers() {
        use rayon::prelude::*;

        let lock = Arc::new(TimedRwLock::new(vec![1, 2, 3]));
        let sums: Vec<i32> = (0..32)
            .into_par_iter()
            .map(|_| lock.read().map(|v| v.iter().sum()).unwrap_or(0))
            .collect();
        assert!(sums.iter().all(|s| *s == 6));
        assert_eq!(lock.read_timeout_count(), 0);
    }
}
