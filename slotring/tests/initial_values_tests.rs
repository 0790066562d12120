use slotring::{Capacity, RingBuffer, RingBufferError};

#[test]
fn test_initial_values_layout() {
    let buffer = RingBuffer::with_initial_values(4, [1, 2, 3]).unwrap();

    assert_eq!(buffer.size(), 3);
    assert_eq!(buffer.snapshot(), &[Some(1), Some(2), Some(3), None]);
}

#[test]
fn test_initial_values_fill_capacity() {
    let mut buffer = RingBuffer::with_initial_values(3, vec![1, 2, 3]).unwrap();

    assert_eq!(buffer.snapshot(), &[Some(1), Some(2), Some(3)]);
    assert!(buffer.is_full());
    assert_eq!(buffer.write(4, false), Err(RingBufferError::BufferFull));
}

#[test]
fn test_initial_values_read_oldest_first() {
    let mut buffer = RingBuffer::with_initial_values(4, [1, 2, 3]).unwrap();

    buffer.write(4, false).unwrap();
    assert_eq!(buffer.read(), Ok(1));
    assert_eq!(buffer.read(), Ok(2));
    assert_eq!(buffer.read(), Ok(3));
    assert_eq!(buffer.read(), Ok(4));
    assert_eq!(buffer.read(), Err(RingBufferError::BufferEmpty));
}

#[test]
fn test_initial_values_force_write_evicts_first() {
    let mut buffer = RingBuffer::with_initial_values(3, [1, 2, 3]).unwrap();

    buffer.force_write(4);
    assert_eq!(buffer.snapshot(), &[Some(4), Some(2), Some(3)]);
    assert_eq!(buffer.read(), Ok(2));
}

#[test]
fn test_no_initial_values() {
    let buffer = RingBuffer::<i32>::with_initial_values(3, []).unwrap();

    assert!(buffer.is_empty());
    assert_eq!(buffer.snapshot(), &[None::<i32>; 3]);
}

#[test]
fn test_initial_values_too_large() {
    assert_eq!(
        RingBuffer::with_initial_values(3, [1, 2, 3, 4]).map(|b| b.size()),
        Err(RingBufferError::InitialValuesTooLarge { len: 4, capacity: 3 })
    );
}

#[test]
fn test_initial_values_invalid_capacity() {
    assert!(matches!(
        RingBuffer::with_initial_values(1, [1]),
        Err(RingBufferError::InvalidCapacity(_))
    ));
}

#[test]
fn test_from_capacity() {
    let capacity = Capacity::new(3).unwrap();
    let buffer = RingBuffer::<String>::from_capacity(capacity);
    assert_eq!(buffer.capacity(), 3);

    let buffer = RingBuffer::from_capacity_with_values(capacity, ["a", "b"]).unwrap();
    assert_eq!(buffer.peek(), Some(&"a"));
}

#[test]
fn test_parse_capacity_only() {
    let buffer: RingBuffer<i32> = "4".parse().unwrap();
    assert_eq!(buffer.capacity(), 4);
    assert!(buffer.is_empty());

    let buffer: RingBuffer<i32> = "4:".parse().unwrap();
    assert!(buffer.is_empty());
}

#[test]
fn test_parse_with_values() {
    let mut buffer: RingBuffer<i32> = "4: 1, 2 ,3".parse().unwrap();

    assert_eq!(buffer.snapshot(), &[Some(1), Some(2), Some(3), None]);
    assert_eq!(buffer.read(), Ok(1));
}

#[test]
fn test_parse_invalid_values() {
    assert!(matches!(
        "3:1,x,3".parse::<RingBuffer<i32>>(),
        Err(RingBufferError::InvalidInitialValues(_))
    ));
    assert!(matches!(
        "3:1,,3".parse::<RingBuffer<i32>>(),
        Err(RingBufferError::InvalidInitialValues(_))
    ));
}

#[test]
fn test_parse_too_many_values() {
    assert_eq!(
        "3:1,2,3,4".parse::<RingBuffer<i32>>().map(|b| b.size()),
        Err(RingBufferError::InitialValuesTooLarge { len: 4, capacity: 3 })
    );
}

#[test]
fn test_parse_invalid_capacity() {
    assert!(matches!(
        "abc:1,2".parse::<RingBuffer<i32>>(),
        Err(RingBufferError::InvalidCapacity(_))
    ));
    assert!(matches!(
        "1:1".parse::<RingBuffer<i32>>(),
        Err(RingBufferError::InvalidCapacity(_))
    ));
}
