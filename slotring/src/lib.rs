pub mod capacity;
pub mod error;
pub mod ring_buffer;

pub use capacity::{Capacity, MIN_CAPACITY};
pub use error::{Result, RingBufferError};
pub use ring_buffer::RingBuffer;
