//! Fixed-capacity FIFO queue over a ring of preallocated slots.
//!
//! Enqueue and dequeue are O(1): slots are reused by advancing `head` and
//! `tail` modulo the capacity, so nothing is ever shifted or reallocated.

use crate::error::{AppError, ErrorType};

type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueState {
    Empty,
    Partial,
    Full,
}

/// Bounded FIFO queue.
///
/// Live elements occupy `[head, head + count) mod capacity`. Every other
/// slot holds `None`. Not synchronized; wrap it in a lock to share it
/// between threads.
#[derive(Debug)]
pub struct BoundedQueue<T> {
    head: usize,
    tail: usize,
    count: usize,
    storage: Box<[Option<T>]>,
}

impl<T> BoundedQueue<T> {
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(AppError::invalid_argument(
                "queue capacity must be positive",
            ));
        }
        let mut storage = Vec::new();
        if storage.try_reserve_exact(capacity).is_err() {
            return Err(AppError::new(
                ErrorType::InvalidArgument,
                format!("cannot allocate {} queue slots", capacity),
            ));
        }
        storage.resize_with(capacity, || None);
        return Ok(Self {
            head: 0,
            tail: 0,
            count: 0,
            storage: storage.into_boxed_slice(),
        });
    }

    /// Appends `value` at the back. A full queue is left untouched and the
    /// value is dropped.
    pub fn enqueue(&mut self, value: T) -> Result<()> {
        if self.is_full() {
            log::warn!("Queue is full; cannot enqueue");
            return Err(AppError::queue_full(self.capacity()));
        }
        self.storage[self.tail] = Some(value);
        self.tail = (self.tail + 1) % self.capacity();
        self.count += 1;
        return Ok(());
    }

    pub fn dequeue(&mut self) -> Result<T> {
        if self.is_empty() {
            log::warn!("Queue is empty; cannot dequeue");
            return Err(AppError::queue_empty());
        }
        let Some(value) = self.storage[self.head].take() else {
            return Err(AppError::runtime("live slot holds no value"));
        };
        self.head = (self.head + 1) % self.capacity();
        self.count -= 1;
        return Ok(value);
    }

    pub fn peek(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        return self.storage[self.head].as_ref();
    }

    /// Live elements from front to back.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        return (0..self.count).filter_map(move |offset| {
            self.storage[(self.head + offset) % self.capacity()].as_ref()
        });
    }

    pub fn clear(&mut self) {
        for slot in self.storage.iter_mut() {
            *slot = None;
        }
        self.head = 0;
        self.tail = 0;
        self.count = 0;
    }

    pub fn len(&self) -> usize {
        return self.count;
    }

    pub fn capacity(&self) -> usize {
        return self.storage.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.count == 0;
    }

    pub fn is_full(&self) -> bool {
        return self.count == self.capacity();
    }

    pub fn state(&self) -> QueueState {
        if self.is_empty() {
            return QueueState::Empty;
        }
        if self.is_full() {
            return QueueState::Full;
        }
        return QueueState::Partial;
    }
}
