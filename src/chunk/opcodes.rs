use std::fmt;
use std::error::Error;

use crate::utils;


// Opcodes

// Each opcode value is defined as a const so that converting between the enum
// and the raw byte stays explicit in both directions

                        // width set here so that the longest mnemonic is 16 chars
const OP_CONSTANT:      u8 = 0x00;  // load a constant from the chunk's const pool
const OP_RETURN:        u8 = 0x01;  // return from the current function


/// Index of a constant in the pool, encoded as a single operand byte
pub type ConstID = u8;


#[repr(u8)]
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum OpCode {
    Constant = OP_CONSTANT,
    Return = OP_RETURN,
}

impl OpCode {
    pub fn from_byte(byte: u8) -> Option<OpCode> {
        let opcode = match byte {
            OP_CONSTANT => Self::Constant,
            OP_RETURN => Self::Return,
            
            _ => return None,
        };
        Some(opcode)
    }
    
    /// Encoded width of an instruction with this opcode, including the opcode byte
    pub fn instr_len(&self) -> usize {
        match self {
            Self::Constant => 2,
            Self::Return => 1,
        }
    }
}

impl From<OpCode> for u8 {
    fn from(opcode: OpCode) -> Self { opcode as u8 }
}

impl PartialEq<u8> for OpCode {
    fn eq(&self, other: &u8) -> bool { *other == (*self).into() }
}

// For disassembly/debugging
impl fmt::Display for OpCode {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mnemonic = match *self {
            Self::Constant => "OP_CONSTANT",
            Self::Return => "OP_RETURN",
        };
        
        if let Some(width) = fmt.width() {
            write!(fmt, "{:1$}", mnemonic, width)
        } else {
            fmt.write_str(mnemonic)
        }
    }
}


/// A decoded instruction, carrying its operand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Constant(ConstID),
    Return,
}

impl Instruction {
    pub fn opcode(&self) -> OpCode {
        match self {
            Self::Constant(..) => OpCode::Constant,
            Self::Return => OpCode::Return,
        }
    }
    
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.opcode().instr_len() }
    
    /// Decodes the instruction at the start of `bytes`. Trailing bytes are ignored.
    pub fn decode(bytes: &[u8]) -> DecodeResult {
        let (&tag, operands) = bytes.split_first()
            .ok_or(DecodeError::EndOfCode)?;
        
        let opcode = OpCode::from_byte(tag)
            .ok_or(DecodeError::UnknownOpcode(tag))?;
        
        let instr = match opcode {
            OpCode::Constant => {
                let cid = *operands.first()
                    .ok_or(DecodeError::MissingOperand(opcode))?;
                Self::Constant(cid)
            },
            OpCode::Return => Self::Return,
        };
        Ok(instr)
    }
    
    /// Appends the encoded bytes of this instruction to `out`
    pub fn encode(&self, out: &mut impl Extend<u8>) {
        out.extend(Some(u8::from(self.opcode())));
        match self {
            Self::Constant(cid) => out.extend(Some(*cid)),
            Self::Return => { },
        }
    }
}


pub type DecodeResult = Result<Instruction, DecodeError>;

/// Number of bytes consumed by a decode, whether or not it succeeded
pub fn decoded_len(result: &DecodeResult) -> usize {
    match result {
        Ok(instr) => instr.len(),
        Err(error) => error.skip_len(),
    }
}


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    EndOfCode,
    UnknownOpcode(u8),
    MissingOperand(OpCode),
}

impl DecodeError {
    /// Bytes that don't decode are skipped one at a time
    pub fn skip_len(&self) -> usize { 1 }
}

impl Error for DecodeError { }

impl fmt::Display for DecodeError {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::EndOfCode => "unexpected end of bytecode".to_string(),
            Self::UnknownOpcode(byte) => format!("unknown opcode {}", byte),
            Self::MissingOperand(opcode) => format!("missing operand for {}", opcode),
        };
        
        utils::format_error(fmt, "decode error", Some(message.as_str()), None)
    }
}
