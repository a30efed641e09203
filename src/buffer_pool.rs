use std::fmt;
use std::ops::{Deref, DerefMut};

use parking_lot::Mutex;

/// A pool of reusable string buffers for text-mode rendering.
///
/// The pool exists to amortize allocations, not to limit them: it has no size
/// bound and [`BufferPool::acquire`] never blocks beyond the brief free-list
/// lock. Buffers are created on first demand and recycled indefinitely.
///
/// # Thread Safety
///
/// Any number of threads may acquire and release concurrently. Each checked
/// out buffer is owned by exactly one [`PooledBuffer`] guard, and buffers are
/// cleared both when returned and when handed out again, so no content moves
/// from one render to another.
///
/// # Examples
///
/// ```
/// # use pattern_logger::BufferPool;
/// let pool = BufferPool::new();
/// {
///     let mut buf = pool.acquire();
///     buf.push_str("scratch");
/// }
/// assert_eq!(pool.idle(), 1);
/// assert!(pool.acquire().is_empty());
/// ```
pub struct BufferPool {
    free: Mutex<Vec<String>>,
    initial_capacity: usize,
}

impl BufferPool {
    pub fn new() -> Self {
        Self::with_buffer_capacity(0)
    }

    /// Creates a pool whose fresh buffers start with `capacity` bytes reserved.
    pub fn with_buffer_capacity(capacity: usize) -> Self {
        Self {
            free: Mutex::new(Vec::new()),
            initial_capacity: capacity,
        }
    }

    /// Checks out an empty buffer, reusing an idle one when available.
    ///
    /// The buffer goes back to the pool when the guard is dropped, on every
    /// exit path including unwinding.
    pub fn acquire(&self) -> PooledBuffer<'_> {
        let buf = match self.free.lock().pop() {
            Some(mut buf) => {
                buf.clear();
                buf
            }
            None => String::with_capacity(self.initial_capacity),
        };
        PooledBuffer { pool: self, buf }
    }

    fn release(&self, mut buf: String) {
        buf.clear();
        self.free.lock().push(buf);
    }

    /// Number of buffers currently waiting in the pool.
    pub fn idle(&self) -> usize {
        self.free.lock().len()
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for BufferPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferPool")
            .field("idle", &self.idle())
            .field("initial_capacity", &self.initial_capacity)
            .finish()
    }
}

/// Scoped checkout of a [`BufferPool`] buffer.
pub struct PooledBuffer<'a> {
    pool: &'a BufferPool,
    buf: String,
}

impl PooledBuffer<'_> {
    /// Copies the contents out, leaving the pooled buffer in place.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.buf.as_bytes().to_vec()
    }
}

impl Deref for PooledBuffer<'_> {
    type Target = String;

    fn deref(&self) -> &String {
        &self.buf
    }
}

impl DerefMut for PooledBuffer<'_> {
    fn deref_mut(&mut self) -> &mut String {
        &mut self.buf
    }
}

impl Drop for PooledBuffer<'_> {
    fn drop(&mut self) {
        self.pool.release(std::mem::take(&mut self.buf));
    }
}
