/*
    Copyright Michael Lodder. All Rights Reserved.
    SPDX-License-Identifier: Apache-2.0
*/
//! A bounded pool of reusable scratch byte buffers, grounded in
//! `original_source/utils/bufferpool.go`'s `BytesBufferPool`: a fixed-size
//! channel of buffers where `get`/`put` never block, falling back to a
//! fresh allocation on a miss and silently dropping an over-capacity
//! return.

use std::sync::Mutex;
use tracing::trace;

/// Non-blocking, bounded buffer pool. `get`/`put` never wait: a `get` that
/// finds the pool empty allocates fresh, and a `put` that finds the pool
/// full drops the buffer instead of growing it past capacity.
pub struct BufferPool {
    slots: Mutex<Vec<Vec<u8>>>,
    capacity: usize,
}

impl BufferPool {
    /// Builds a pool bounded at `capacity` buffers.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Mutex::new(Vec::with_capacity(capacity)),
            capacity,
        }
    }

    /// Returns a buffer sized to `len`, either reused (truncated/zero-filled
    /// to `len`) from the pool or freshly allocated on a miss.
    pub fn get(&self, len: usize) -> Vec<u8> {
        let pooled = self.slots.lock().unwrap().pop();
        match pooled {
            Some(mut buf) => {
                buf.clear();
                buf.resize(len, 0);
                buf
            }
            None => {
                trace!(len, "buffer pool miss, allocating fresh");
                vec![0u8; len]
            }
        }
    }

    /// Returns `buf` to the pool for reuse, dropping it if the pool is
    /// already at capacity.
    pub fn put(&self, buf: Vec<u8>) {
        let mut slots = self.slots.lock().unwrap();
        if slots.len() < self.capacity {
            slots.push(buf);
        }
    }
}

impl Default for BufferPool {
    /// Default capacity is `available_parallelism() * 1024`, matching the
    /// original's `runtime.NumCPU() * 1024`.
    fn default() -> Self {
        let cpus = std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1);
        Self::with_capacity(cpus * 1024)
    }
}

/// A process-wide pool shared by every `split`/`combine` call, mirroring
/// the original's single package-level `polynomialBufferPool`.
pub fn shared() -> &'static BufferPool {
    static POOL: std::sync::OnceLock<BufferPool> = std::sync::OnceLock::new();
    POOL.get_or_init(BufferPool::default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_returns_correctly_sized_zeroed_buffer() {
        let pool = BufferPool::with_capacity(4);
        let buf = pool.get(16);
        assert_eq!(buf.len(), 16);
        assert!(buf.iter().all(|&b| b == 0));
    }

    #[test]
    fn put_then_get_reuses_allocation() {
        let pool = BufferPool::with_capacity(4);
        let mut buf = pool.get(32);
        buf[0] = 0xff;
        pool.put(buf);
        let reused = pool.get(32);
        assert_eq!(reused.len(), 32);
        assert!(reused.iter().all(|&b| b == 0));
    }

    #[test]
    fn put_never_grows_past_capacity() {
        let pool = BufferPool::with_capacity(1);
        pool.put(vec![0u8; 8]);
        pool.put(vec![0u8; 8]);
        assert_eq!(pool.slots.lock().unwrap().len(), 1);
    }

    #[test]
    fn default_capacity_is_positive() {
        let pool = BufferPool::default();
        assert!(pool.capacity > 0);
    }
}
