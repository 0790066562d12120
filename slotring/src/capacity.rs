use std::fmt;
use std::str::FromStr;

use crate::error::{Result, RingBufferError};

/// Smallest capacity a ring buffer accepts.
pub const MIN_CAPACITY: usize = 2;

/// A slot count that has already been checked against [`MIN_CAPACITY`].
///
/// Untyped input (text, floats, signed integers) goes through one of the
/// conversions below; all of them reject values that are not a whole number
/// of at least two slots with [`RingBufferError::InvalidCapacity`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Capacity(usize);

impl Capacity {
    pub fn new(slots: usize) -> Result<Self> {
        if slots < MIN_CAPACITY {
            return Err(RingBufferError::InvalidCapacity(slots.to_string()));
        }
        Ok(Capacity(slots))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Capacity> for usize {
    fn from(capacity: Capacity) -> usize {
        capacity.0
    }
}

impl TryFrom<usize> for Capacity {
    type Error = RingBufferError;

    fn try_from(slots: usize) -> Result<Self> {
        Capacity::new(slots)
    }
}

impl TryFrom<u32> for Capacity {
    type Error = RingBufferError;

    fn try_from(slots: u32) -> Result<Self> {
        let slots = usize::try_from(slots)
            .map_err(|_| RingBufferError::InvalidCapacity(slots.to_string()))?;
        Capacity::new(slots)
    }
}

impl TryFrom<i64> for Capacity {
    type Error = RingBufferError;

    fn try_from(slots: i64) -> Result<Self> {
        let slots = usize::try_from(slots)
            .map_err(|_| RingBufferError::InvalidCapacity(slots.to_string()))?;
        Capacity::new(slots)
    }
}

impl TryFrom<f64> for Capacity {
    type Error = RingBufferError;

    fn try_from(slots: f64) -> Result<Self> {
        // NaN, infinities, fractions and anything past usize::MAX are rejected
        if !slots.is_finite() || slots.fract() != 0.0 || slots < 0.0 || slots > usize::MAX as f64 {
            return Err(RingBufferError::InvalidCapacity(slots.to_string()));
        }
        Capacity::new(slots as usize)
    }
}

impl FromStr for Capacity {
    type Err = RingBufferError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if let Ok(slots) = trimmed.parse::<usize>() {
            return Capacity::new(slots);
        }
        match trimmed.parse::<f64>() {
            Ok(slots) => Capacity::try_from(slots),
            Err(_) => Err(RingBufferError::InvalidCapacity(s.to_string())),
        }
    }
}
