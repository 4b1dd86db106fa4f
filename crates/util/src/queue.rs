//! FIFO queues built from two stacks.
//!
//! Items are pushed onto an "enqueue" stack; when the "dequeue" stack runs
//! dry the enqueue stack is poured into it, reversing the order so the oldest
//! item ends up on top. Every item is moved at most twice, so both operations
//! are amortised O(1).

use std::convert::Infallible;
use std::fmt;

use thiserror::Error;

/// Default capacity of a [`StaticQueue`].
pub const DEFAULT_CAPACITY: usize = 10;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    #[error("queue is full (capacity {capacity})")]
    Full { capacity: usize },
}

/// The queue interface breadth-first traversals are written against.
pub trait FifoQueue<T> {
    type Error;

    fn enqueue(&mut self, item: T) -> Result<(), Self::Error>;

    /// Remove the oldest item, or `None` when the queue is empty.
    fn dequeue(&mut self) -> Option<T>;

    fn is_empty(&self) -> bool;

    fn len(&self) -> usize;
}

#[derive(Clone)]
struct TwoStacks<T> {
    en_stack: Vec<T>,
    de_stack: Vec<T>,
}

impl<T> TwoStacks<T> {
    fn new() -> Self {
        Self {
            en_stack: Vec::new(),
            de_stack: Vec::new(),
        }
    }

    fn transfer(&mut self) {
        while let Some(item) = self.en_stack.pop() {
            self.de_stack.push(item);
        }
    }

    fn push(&mut self, item: T) {
        self.en_stack.push(item);
    }

    fn pop(&mut self) -> Option<T> {
        if self.de_stack.is_empty() {
            self.transfer();
        }
        self.de_stack.pop()
    }

    fn peek(&self) -> Option<&T> {
        match self.de_stack.last() {
            Some(item) => Some(item),
            None => self.en_stack.first(),
        }
    }

    fn len(&self) -> usize {
        self.en_stack.len() + self.de_stack.len()
    }

    fn clear(&mut self) {
        self.en_stack.clear();
        self.de_stack.clear();
    }

    /// Items in dequeue order.
    fn iter(&self) -> impl Iterator<Item = &T> {
        self.de_stack.iter().rev().chain(self.en_stack.iter())
    }
}

/// A queue holding at most `capacity` items.
#[derive(Clone)]
pub struct StaticQueue<T> {
    stacks: TwoStacks<T>,
    capacity: usize,
}

impl<T> StaticQueue<T> {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            stacks: TwoStacks::new(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The item the next `dequeue` returns.
    pub fn peek(&self) -> Option<&T> {
        self.stacks.peek()
    }

    pub fn clear(&mut self) {
        self.stacks.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.stacks.iter()
    }
}

impl<T> Default for StaticQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FifoQueue<T> for StaticQueue<T> {
    type Error = QueueError;

    fn enqueue(&mut self, item: T) -> Result<(), QueueError> {
        if self.stacks.len() >= self.capacity {
            return Err(QueueError::Full {
                capacity: self.capacity,
            });
        }
        self.stacks.push(item);
        Ok(())
    }

    fn dequeue(&mut self) -> Option<T> {
        self.stacks.pop()
    }

    fn is_empty(&self) -> bool {
        self.stacks.len() == 0
    }

    fn len(&self) -> usize {
        self.stacks.len()
    }
}

/// A queue without a size limit; enqueueing never fails.
#[derive(Clone)]
pub struct DynamicQueue<T> {
    stacks: TwoStacks<T>,
}

impl<T> DynamicQueue<T> {
    pub fn new() -> Self {
        Self {
            stacks: TwoStacks::new(),
        }
    }

    pub fn peek(&self) -> Option<&T> {
        self.stacks.peek()
    }

    pub fn clear(&mut self) {
        self.stacks.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.stacks.iter()
    }
}

impl<T> Default for DynamicQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FifoQueue<T> for DynamicQueue<T> {
    type Error = Infallible;

    fn enqueue(&mut self, item: T) -> Result<(), Infallible> {
        self.stacks.push(item);
        Ok(())
    }

    fn dequeue(&mut self) -> Option<T> {
        self.stacks.pop()
    }

    fn is_empty(&self) -> bool {
        self.stacks.len() == 0
    }

    fn len(&self) -> usize {
        self.stacks.len()
    }
}

macro_rules! queue_fmt_impls {
    ($ty:ident) => {
        impl<T: fmt::Debug> fmt::Debug for $ty<T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_list().entries(self.stacks.iter()).finish()
            }
        }

        impl<T: fmt::Display> fmt::Display for $ty<T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("[")?;
                for (i, item) in self.stacks.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    };
}

queue_fmt_impls!(StaticQueue);
queue_fmt_impls!(DynamicQueue);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_queue_order() {
        let mut q = StaticQueue::new();
        assert!(q.is_empty());
        for item in ["a", "b", "c", "d"] {
            q.enqueue(item).unwrap();
        }
        assert!(!q.is_empty());
        assert_eq!(q.dequeue(), Some("a"));
        assert_eq!(q.peek(), Some(&"b"));
        assert_eq!(q.len(), 3);
        assert_eq!(format!("{q}"), "[b, c, d]");
    }

    #[test]
    fn test_static_queue_full() {
        let mut q = StaticQueue::with_capacity(2);
        q.enqueue(1).unwrap();
        q.enqueue(2).unwrap();
        assert_eq!(q.enqueue(3), Err(QueueError::Full { capacity: 2 }));
        assert_eq!(q.dequeue(), Some(1));
        assert!(q.enqueue(3).is_ok());
        assert_eq!(format!("{q:?}"), "[2, 3]");
    }

    #[test]
    fn test_dequeue_empty() {
        let mut q: DynamicQueue<i32> = DynamicQueue::new();
        assert_eq!(q.dequeue(), None);
        assert_eq!(q.peek(), None);
    }

    #[test]
    fn test_interleaved_operations() {
        let mut q = DynamicQueue::new();
        q.enqueue(1).unwrap();
        q.enqueue(2).unwrap();
        assert_eq!(q.dequeue(), Some(1));
        q.enqueue(3).unwrap();
        assert_eq!(q.peek(), Some(&2));
        assert_eq!(q.iter().copied().collect::<Vec<_>>(), vec![2, 3]);
        assert_eq!(q.dequeue(), Some(2));
        assert_eq!(q.dequeue(), Some(3));
        assert!(q.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut q = StaticQueue::new();
        q.enqueue('x').unwrap();
        q.clear();
        assert!(q.is_empty());
        assert_eq!(format!("{q}"), "[]");
    }
}
