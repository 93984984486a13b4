use std::fmt;
use std::mem;
use std::slice;



/// Smallest non-zero capacity handed out by `grow_capacity()`.
pub const MIN_CAPACITY: usize = 8;

/// Capacity to grow to once a buffer holding `capacity` elements is full.
#[inline]
pub fn grow_capacity(capacity: usize) -> usize {
    if capacity < MIN_CAPACITY { MIN_CAPACITY }
    else { capacity * 2 }
}

/// Resizes the allocation behind `buf` from `old_count` to `new_count` elements.
///
/// An empty `Vec` with no capacity stands for "no allocation". Shrinking discards
/// everything past `new_count`, resizing to zero releases the storage, and growing
/// keeps the existing elements in place (moving them if the allocator has to).
///
/// Failing to allocate is not recoverable and aborts the process.
pub fn reallocate<T>(mut buf: Vec<T>, old_count: usize, new_count: usize) -> Vec<T> {
    let elem_size = mem::size_of::<T>();
    log::debug!("reallocate {} -> {} bytes ({} byte elements)", old_count * elem_size, new_count * elem_size, elem_size);
    
    if new_count == 0 {
        // dropping the old buffer frees it
        return Vec::new();
    }
    
    if new_count < old_count {
        buf.truncate(new_count);
        buf.shrink_to(new_count);
        return buf;
    }
    
    let additional = new_count.saturating_sub(buf.len());
    if let Err(error) = buf.try_reserve_exact(additional) {
        log::error!("failed to allocate {} bytes: {}", new_count * elem_size, error);
        std::process::abort();
    }
    buf
}


/// An append-only sequence that grows its storage with `grow_capacity()`.
///
/// The logical capacity is tracked here rather than read back from the `Vec`,
/// since the allocator is free to hand out more than was asked for.
pub struct GrowableBuf<T> {
    items: Vec<T>,
    capacity: usize,
}

// a clone reserves the same logical capacity, so it grows at the same points
impl<T> Clone for GrowableBuf<T> where T: Clone {
    fn clone(&self) -> Self {
        Self {
            items: reallocate(self.items.clone(), 0, self.capacity),
            capacity: self.capacity,
        }
    }
}

impl<T> Default for GrowableBuf<T> {
    fn default() -> Self { Self::new() }
}

impl<T> GrowableBuf<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            capacity: 0,
        }
    }
    
    #[inline]
    pub fn len(&self) -> usize { self.items.len() }
    
    #[inline]
    pub fn is_empty(&self) -> bool { self.items.is_empty() }
    
    #[inline]
    pub fn capacity(&self) -> usize { self.capacity }
    
    #[inline]
    pub fn as_slice(&self) -> &[T] { self.items.as_slice() }
    
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> { self.items.get(index) }
    
    pub fn iter(&self) -> slice::Iter<'_, T> { self.items.iter() }
    
    /// Appends `item` and returns the index it was stored at.
    pub fn push(&mut self, item: T) -> usize {
        if self.len() == self.capacity {
            let old_capacity = self.capacity;
            self.capacity = grow_capacity(old_capacity);
            let items = mem::take(&mut self.items);
            self.items = reallocate(items, old_capacity, self.capacity);
        }
        
        let index = self.items.len();
        self.items.push(item);
        index
    }
    
    /// Releases the backing storage, leaving the buffer as if newly created.
    pub fn free(&mut self) {
        let items = mem::take(&mut self.items);
        self.items = reallocate(items, self.capacity, 0);
        self.capacity = 0;
    }
}

impl<'a, T> IntoIterator for &'a GrowableBuf<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;
    
    fn into_iter(self) -> Self::IntoIter { self.iter() }
}

impl<T> fmt::Debug for GrowableBuf<T> where T: fmt::Debug {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("GrowableBuf")
            .field("count", &self.len())
            .field("capacity", &self.capacity)
            .field("items", &self.items)
            .finish()
    }
}
