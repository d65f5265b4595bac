//! Fixed-capacity ring buffer for time-series history.
//!
//! Provides O(1) amortized push with oldest-first eviction, which keeps
//! every retained series bounded for the life of a session.

use std::collections::VecDeque;

/// A fixed-capacity FIFO ring buffer.
///
/// Once `len() == capacity()`, every push evicts the oldest element.
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    data: VecDeque<T>,
    capacity: usize,
}

impl<T> RingBuffer<T> {
    /// Create a new ring buffer with the specified capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            data: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a value to the buffer, removing the oldest if at capacity.
    /// O(1) amortized.
    pub fn push(&mut self, value: T) {
        if self.data.len() >= self.capacity {
            self.data.pop_front();
        }
        self.data.push_back(value);
    }

    /// Get the most recent value. O(1).
    pub fn latest(&self) -> Option<&T> {
        self.data.back()
    }

    /// Get the oldest value. O(1).
    pub fn oldest(&self) -> Option<&T> {
        self.data.front()
    }

    /// Get the number of elements in the buffer.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the capacity of the buffer.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Clear all elements from the buffer.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Get an iterator over the elements (oldest to newest).
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Iterate over the `k` most recent elements in chronological order
    /// (oldest of the slice first). Yields all elements if fewer than `k`
    /// exist; an empty buffer yields nothing.
    pub fn last(&self, k: usize) -> impl Iterator<Item = &T> {
        self.data.iter().skip(self.data.len().saturating_sub(k))
    }
}

impl RingBuffer<f64> {
    /// Find the minimum value. O(n).
    pub fn min(&self) -> f64 {
        self.data
            .iter()
            .copied()
            .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
            .unwrap_or(0.0)
    }

    /// Find the maximum value. O(n).
    pub fn max(&self) -> f64 {
        self.data
            .iter()
            .copied()
            .max_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_capacity() {
        let mut buf: RingBuffer<i32> = RingBuffer::new(3);
        assert!(buf.is_empty());

        buf.push(1);
        buf.push(2);
        buf.push(3);
        assert_eq!(buf.len(), 3);

        buf.push(4);
        assert_eq!(buf.len(), 3); // Capacity maintained
        assert_eq!(buf.oldest(), Some(&2)); // 1 was evicted
        assert_eq!(buf.latest(), Some(&4));
    }

    #[test]
    fn test_eviction_stays_fifo() {
        let mut buf: RingBuffer<u32> = RingBuffer::new(5);
        for i in 0..20 {
            buf.push(i);
            assert!(buf.len() <= 5);
        }
        let items: Vec<u32> = buf.iter().copied().collect();
        assert_eq!(items, vec![15, 16, 17, 18, 19]);
    }

    #[test]
    fn test_clear() {
        let mut buf: RingBuffer<i32> = RingBuffer::new(3);
        buf.push(1);
        buf.push(2);
        assert_eq!(buf.len(), 2);
        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.len(), 0);
    }

    #[test]
    fn test_iter_order() {
        let mut buf: RingBuffer<i32> = RingBuffer::new(3);
        buf.push(10);
        buf.push(20);
        buf.push(30);
        buf.push(40); // forces rotation
        let items: Vec<i32> = buf.iter().copied().collect();
        assert_eq!(items, vec![20, 30, 40]);
    }

    #[test]
    fn test_last_window() {
        let mut buf: RingBuffer<i32> = RingBuffer::new(10);
        for i in 1..=6 {
            buf.push(i);
        }
        let window: Vec<i32> = buf.last(3).copied().collect();
        assert_eq!(window, vec![4, 5, 6]); // chronological, oldest first
    }

    #[test]
    fn test_last_larger_than_len() {
        let mut buf: RingBuffer<i32> = RingBuffer::new(10);
        buf.push(1);
        buf.push(2);
        let window: Vec<i32> = buf.last(5).copied().collect();
        assert_eq!(window, vec![1, 2]);
    }

    #[test]
    fn test_last_on_empty() {
        let buf: RingBuffer<i32> = RingBuffer::new(3);
        assert_eq!(buf.last(4).count(), 0);
    }

    #[test]
    fn test_empty_latest_oldest() {
        let buf: RingBuffer<i32> = RingBuffer::new(3);
        assert_eq!(buf.latest(), None);
        assert_eq!(buf.oldest(), None);
    }

    #[test]
    fn test_f64_min_max() {
        let mut buf: RingBuffer<f64> = RingBuffer::new(5);
        buf.push(3.5);
        buf.push(-1.25);
        buf.push(7.0);
        assert!((buf.min() - (-1.25)).abs() < f64::EPSILON);
        assert!((buf.max() - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_f64_empty_min_max() {
        let buf: RingBuffer<f64> = RingBuffer::new(3);
        assert_eq!(buf.min(), 0.0);
        assert_eq!(buf.max(), 0.0);
    }
}
