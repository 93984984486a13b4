use std::fmt;
use static_assertions::const_assert_eq;

use crate::language::FloatType;
use crate::memory::GrowableBuf;



/// A literal value as it appears in a constant pool.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Value(FloatType);

const_assert_eq!(core::mem::size_of::<Value>(), 8);

impl Value {
    #[inline]
    pub fn as_float(&self) -> FloatType { self.0 }
}

impl From<FloatType> for Value {
    fn from(value: FloatType) -> Self { Self(value) }
}

impl From<Value> for FloatType {
    fn from(value: Value) -> Self { value.0 }
}

impl fmt::Display for Value {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "{}", self.0)
    }
}


/// The constant pool. Values are only ever appended, so an index stays valid
/// for as long as the pool lives.
#[derive(Debug, Clone, Default)]
pub struct ValueArray {
    values: GrowableBuf<Value>,
}

impl ValueArray {
    pub fn new() -> Self {
        Self { values: GrowableBuf::new() }
    }
    
    pub fn len(&self) -> usize { self.values.len() }
    
    pub fn is_empty(&self) -> bool { self.values.is_empty() }
    
    pub fn capacity(&self) -> usize { self.values.capacity() }
    
    pub fn as_slice(&self) -> &[Value] { self.values.as_slice() }
    
    /// Appends `value`, returning its index in the pool.
    pub fn write(&mut self, value: impl Into<Value>) -> usize {
        self.values.push(value.into())
    }
    
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }
    
    pub fn iter(&self) -> impl Iterator<Item=&Value> {
        self.values.iter()
    }
    
    pub fn free(&mut self) {
        self.values.free()
    }
}
