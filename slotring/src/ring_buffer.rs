use std::fmt;
use std::iter::FusedIterator;
use std::str::FromStr;

use tracing::{debug, trace};

use crate::capacity::Capacity;
use crate::error::{Result, RingBufferError};

/// Positions of the oldest and newest live slots. Only exists while the
/// buffer holds at least one item.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct Cursor {
    start: usize,
    end: usize,
}

/// A bounded FIFO queue over a fixed number of slots.
///
/// Writing appends the newest item, reading removes the oldest. A plain
/// [`write`](RingBuffer::write) on a full buffer fails with
/// [`RingBufferError::BufferFull`]; a [`force_write`](RingBuffer::force_write)
/// evicts the oldest item instead. Slots are reused in place and the storage
/// is never reallocated.
///
/// All mutation goes through `&mut self`. To share one buffer between threads
/// wrap it in a `Mutex` or keep it inside a single owning task.
#[derive(Clone)]
pub struct RingBuffer<T> {
    storage: Vec<Option<T>>,
    capacity: usize,
    cursor: Option<Cursor>,
    size: usize,
}

fn next_slot(index: usize, capacity: usize) -> usize {
    (index + 1) % capacity
}

impl<T> RingBuffer<T> {
    /// Creates an empty buffer holding up to `capacity` items.
    ///
    /// Fails with [`RingBufferError::InvalidCapacity`] when `capacity < 2`.
    pub fn new(capacity: usize) -> Result<Self> {
        Ok(Self::from_capacity(Capacity::new(capacity)?))
    }

    /// Creates an empty buffer from an already validated capacity.
    pub fn from_capacity(capacity: Capacity) -> Self {
        let capacity = capacity.get();
        debug!(capacity, "ring buffer created");
        RingBuffer {
            storage: std::iter::repeat_with(|| None).take(capacity).collect(),
            capacity,
            cursor: None,
            size: 0,
        }
    }

    /// Creates a buffer whose unread contents are `values`, oldest first.
    ///
    /// The values occupy slots `0..values.len()`, so the first read returns
    /// the first value. Fails with [`RingBufferError::InitialValuesTooLarge`]
    /// when there are more values than slots.
    pub fn with_initial_values<I>(capacity: usize, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        Self::from_capacity_with_values(Capacity::new(capacity)?, values)
    }

    pub fn from_capacity_with_values<I>(capacity: Capacity, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let values: Vec<T> = values.into_iter().collect();
        if values.len() > capacity.get() {
            return Err(RingBufferError::InitialValuesTooLarge {
                len: values.len(),
                capacity: capacity.get(),
            });
        }

        let mut buffer = Self::from_capacity(capacity);
        let len = values.len();
        for (slot, value) in buffer.storage.iter_mut().zip(values) {
            *slot = Some(value);
        }
        if len > 0 {
            buffer.cursor = Some(Cursor { start: 0, end: len - 1 });
            buffer.size = len;
        }
        Ok(buffer)
    }

    /// Appends `item` as the newest element.
    ///
    /// When the buffer is full and `force` is false nothing changes and
    /// [`RingBufferError::BufferFull`] is returned. With `force` set the
    /// oldest item is dropped to make room.
    pub fn write(&mut self, item: T, force: bool) -> Result<()> {
        let full = self.is_full();
        if full && !force {
            trace!(capacity = self.capacity, "write rejected, buffer full");
            return Err(RingBufferError::BufferFull);
        }

        let cursor = match self.cursor {
            Some(mut cursor) => {
                if full {
                    // the slot past `end` is the oldest one; it gets reused below
                    cursor.start = next_slot(cursor.start, self.capacity);
                    trace!(capacity = self.capacity, "oldest item evicted by force write");
                } else {
                    self.size += 1;
                }
                cursor.end = next_slot(cursor.end, self.capacity);
                cursor
            }
            None => {
                self.size = 1;
                Cursor { start: 0, end: 0 }
            }
        };

        self.storage[cursor.end] = Some(item);
        self.cursor = Some(cursor);
        Ok(())
    }

    /// Appends `item`, evicting the oldest element if the buffer is full.
    pub fn force_write(&mut self, item: T) {
        // a forced write has no failure path
        let _ = self.write(item, true);
    }

    /// Removes and returns the oldest element.
    pub fn read(&mut self) -> Result<T> {
        let mut cursor = self.cursor.ok_or(RingBufferError::BufferEmpty)?;
        let item = self.storage[cursor.start]
            .take()
            .ok_or(RingBufferError::BufferEmpty)?;

        self.size -= 1;
        if self.size == 0 {
            self.cursor = None;
        } else {
            cursor.start = next_slot(cursor.start, self.capacity);
            self.cursor = Some(cursor);
        }
        Ok(item)
    }

    /// Borrows the oldest element without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.cursor
            .and_then(|cursor| self.storage[cursor.start].as_ref())
    }

    /// Drops every held item and returns to the empty state.
    pub fn clear(&mut self) {
        debug!(capacity = self.capacity, dropped = self.size, "ring buffer cleared");
        for slot in self.storage.iter_mut() {
            *slot = None;
        }
        self.cursor = None;
        self.size = 0;
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn is_full(&self) -> bool {
        self.size == self.capacity
    }

    /// The raw slot array in physical order, `None` marking unused slots.
    ///
    /// This is the storage layout, not FIFO order; use [`iter`](Self::iter)
    /// for the latter.
    pub fn snapshot(&self) -> &[Option<T>] {
        &self.storage
    }

    /// Iterates over held items from oldest to newest.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            slots: &self.storage,
            position: self.cursor.map_or(0, |cursor| cursor.start),
            remaining: self.size,
        }
    }

    /// Reads every held item out in FIFO order.
    ///
    /// The buffer is empty once the returned iterator is dropped, even if it
    /// was not run to completion.
    pub fn drain(&mut self) -> Drain<'_, T> {
        Drain { buffer: self }
    }
}

impl<T> Extend<T> for RingBuffer<T> {
    /// Force-writes every item, so only the newest `capacity` items survive.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.force_write(item);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for RingBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingBuffer")
            .field("capacity", &self.capacity)
            .field("items", &self.iter().collect::<Vec<_>>())
            .finish()
    }
}

/// Parses `"<capacity>"` or `"<capacity>:<v1>,<v2>,..."`.
///
/// ```
/// use slotring::RingBuffer;
///
/// let mut buffer: RingBuffer<u32> = "4:1,2,3".parse().unwrap();
/// assert_eq!(buffer.size(), 3);
/// assert_eq!(buffer.read(), Ok(1));
/// ```
impl<T: FromStr> FromStr for RingBuffer<T> {
    type Err = RingBufferError;

    fn from_str(s: &str) -> Result<Self> {
        let (capacity, values) = match s.split_once(':') {
            Some((capacity, values)) => (capacity, Some(values)),
            None => (s, None),
        };
        let capacity: Capacity = capacity.parse()?;

        let values = match values.map(str::trim) {
            None | Some("") => Vec::new(),
            Some(values) => values
                .split(',')
                .enumerate()
                .map(|(index, raw)| {
                    raw.trim().parse::<T>().map_err(|_| {
                        RingBufferError::InvalidInitialValues(format!(
                            "element {} (`{}`) is not a valid value",
                            index,
                            raw.trim()
                        ))
                    })
                })
                .collect::<Result<Vec<T>>>()?,
        };

        Self::from_capacity_with_values(capacity, values)
    }
}

pub struct Iter<'a, T> {
    slots: &'a [Option<T>],
    position: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let item = self.slots[self.position].as_ref();
        self.position = next_slot(self.position, self.slots.len());
        self.remaining -= 1;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a RingBuffer<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct Drain<'a, T> {
    buffer: &'a mut RingBuffer<T>,
}

impl<T> Iterator for Drain<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.buffer.read().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.buffer.size(), Some(self.buffer.size()))
    }
}

impl<T> ExactSizeIterator for Drain<'_, T> {}

impl<T> Drop for Drain<'_, T> {
    fn drop(&mut self) {
        if !self.buffer.is_empty() {
            self.buffer.clear();
        }
    }
}
