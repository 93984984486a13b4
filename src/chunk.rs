use static_assertions::const_assert_eq;

use crate::language::LineNo;
use crate::memory::GrowableBuf;
use crate::value::{Value, ValueArray};

pub mod opcodes;
pub mod errors;

pub use opcodes::{OpCode, Instruction, ConstID, DecodeError, DecodeResult};
pub use errors::{ChunkError, ChunkResult, ErrorKind};



/// Largest number of constants a single chunk can address
pub const CONST_POOL_LIMIT: usize = ConstID::MAX as usize + 1;

const_assert_eq!(CONST_POOL_LIMIT, 256);


/// A unit of bytecode: the encoded instructions, the source line of every byte,
/// and the pool of constants the instructions refer to.
#[derive(Debug, Clone, Default)]
pub struct Chunk {
    code: GrowableBuf<u8>,
    lines: GrowableBuf<LineNo>,
    constants: ValueArray,
}

impl Chunk {
    pub fn new() -> Self {
        Self {
            code: GrowableBuf::new(),
            lines: GrowableBuf::new(),
            constants: ValueArray::new(),
        }
    }
    
    #[inline]
    pub fn len(&self) -> usize { self.code.len() }
    
    #[inline]
    pub fn is_empty(&self) -> bool { self.code.is_empty() }
    
    #[inline]
    pub fn capacity(&self) -> usize { self.code.capacity() }
    
    pub fn code(&self) -> &[u8] { self.code.as_slice() }
    
    pub fn lines(&self) -> &[LineNo] { self.lines.as_slice() }
    
    pub fn line_at(&self, offset: usize) -> Option<LineNo> {
        self.lines.get(offset).copied()
    }
    
    pub fn constants(&self) -> &ValueArray { &self.constants }
    
    pub fn lookup_const(&self, index: impl Into<ConstID>) -> Option<&Value> {
        self.constants.get(usize::from(index.into()))
    }
    
    // Bytes
    
    /// Appends a single byte along with the source line it came from.
    /// Nothing checks that the bytes written form valid instructions.
    pub fn write(&mut self, byte: impl Into<u8>, line: LineNo) {
        let old_capacity = self.capacity();
        
        // code and lines share a length, so they always grow together
        self.code.push(byte.into());
        self.lines.push(line);
        
        debug_assert_eq!(self.code.len(), self.lines.len());
        debug_assert_eq!(self.code.capacity(), self.lines.capacity());
        
        if self.capacity() != old_capacity {
            log::trace!("chunk grew from {} to {} bytes", old_capacity, self.capacity());
        }
    }
    
    pub fn write_op(&mut self, opcode: OpCode, line: LineNo) {
        self.write(opcode, line)
    }
    
    /// Encodes `instr`, giving every byte the same source line.
    pub fn write_instr(&mut self, instr: Instruction, line: LineNo) {
        let mut bytes = Vec::with_capacity(instr.len());
        instr.encode(&mut bytes);
        for byte in bytes {
            self.write(byte, line);
        }
    }
    
    // Constants
    
    /// Adds `value` to the constant pool and returns the index to use as an operand.
    /// Fails once the pool can no longer be addressed by a one byte operand.
    pub fn add_constant(&mut self, value: impl Into<Value>) -> ChunkResult<ConstID> {
        let cid = ConstID::try_from(self.constants.len())
            .map_err(|error| ChunkError::from(ErrorKind::ConstPoolLimit).caused_by(error))?;
        
        let value = value.into();
        self.constants.write(value);
        log::trace!("add constant {} at index {}", value, cid);
        Ok(cid)
    }
    
    /// Walks the code one instruction at a time. Bytes that fail to decode are
    /// yielded as errors and skipped over one at a time.
    pub fn instructions(&self) -> Instructions<'_> {
        Instructions { code: self.code(), offset: 0 }
    }
    
    /// Releases all storage, leaving the chunk empty.
    pub fn free(&mut self) {
        self.code.free();
        self.lines.free();
        self.constants.free();
    }
}


pub struct Instructions<'c> {
    code: &'c [u8],
    offset: usize,
}

impl Iterator for Instructions<'_> {
    type Item = (usize, DecodeResult);
    
    fn next(&mut self) -> Option<Self::Item> {
        if self.offset >= self.code.len() {
            return None;
        }
        
        let offset = self.offset;
        let result = Instruction::decode(&self.code[offset..]);
        self.offset += opcodes::decoded_len(&result);
        Some((offset, result))
    }
}
