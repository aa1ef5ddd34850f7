//! The LIFO and FIFO containers the iterative tree algorithms use as scratch space.

use std::collections::VecDeque;

use crate::error::{Error, Result};

/// A last-in, first-out stack.
#[derive(Debug, Clone)]
pub struct Stack<T> {
    items: Vec<T>,
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Stack<T> {
    /// Creates an empty stack.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Pushes `item` on top of the stack.
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Removes and returns the top item.
    pub fn pop(&mut self) -> Result<T> {
        self.items.pop().ok_or(Error::EmptyContainer)
    }

    /// Returns the top item without removing it.
    pub fn top(&self) -> Result<&T> {
        self.items.last().ok_or(Error::EmptyContainer)
    }

    /// Mutable access to the top item.
    pub fn top_mut(&mut self) -> Result<&mut T> {
        self.items.last_mut().ok_or(Error::EmptyContainer)
    }

    /// Whether the stack holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The number of items on the stack.
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// A first-in, first-out queue.
#[derive(Debug, Clone)]
pub struct Queue<T> {
    items: VecDeque<T>,
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for Queue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> Queue<T> {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }

    /// Appends `item` at the rear of the queue.
    pub fn enqueue(&mut self, item: T) {
        self.items.push_back(item);
    }

    /// Removes and returns the item at the front of the queue.
    pub fn dequeue(&mut self) -> Result<T> {
        self.items.pop_front().ok_or(Error::EmptyContainer)
    }

    /// The item that the next `dequeue` returns.
    pub fn front(&self) -> Result<&T> {
        self.items.front().ok_or(Error::EmptyContainer)
    }

    /// The most recently enqueued item.
    pub fn rear(&self) -> Result<&T> {
        self.items.back().ok_or(Error::EmptyContainer)
    }

    /// Whether the queue holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The number of items in the queue.
    pub fn len(&self) -> usize {
        self.items.len()
    }
}
