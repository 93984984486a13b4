use std::fmt;
use std::fmt::{Write, Formatter};

use crate::value::Value;
use crate::chunk::{Chunk, ConstID, Instruction, DecodeError};
use crate::chunk::opcodes::decoded_len;


pub struct Disassembler<'c> {
    chunk: &'c Chunk,
    name: Option<&'c str>,
}

impl<'c> Disassembler<'c> {
    pub fn new(chunk: &'c Chunk) -> Self {
        Self { chunk, name: None }
    }
    
    pub fn with_name(mut self, name: &'c str) -> Self {
        self.name.replace(name); self
    }
    
    fn decode_chunk(&self, fmt: &mut Formatter<'_>) -> fmt::Result {
        if let Some(name) = self.name {
            writeln!(fmt, "== {} ==", name)?;
        }
        
        let mut offset = 0;
        while offset < self.chunk.len() {
            offset = self.decode_instr(fmt, offset)?;
        }
        Ok(())
    }
    
    /// Writes a single line for the instruction at `offset` and returns the offset
    /// of the next instruction. Bytes that don't decode are reported and skipped.
    pub fn decode_instr(&self, fmt: &mut impl Write, offset: usize) -> Result<usize, fmt::Error> {
        let mut line = String::new();
        
        write!(line, "{:04} ", offset)?;
        self.write_lineno(&mut line, offset)?;
        
        let code = self.chunk.code().get(offset..).unwrap_or(&[]);
        let result = Instruction::decode(code);
        match result {
            Ok(instr @ Instruction::Constant(cid)) => {
                write!(line, "{:16} {: >4} ", instr.opcode(), cid)?;
                self.write_const(&mut line, cid, self.chunk.lookup_const(cid))?;
            },
            Ok(instr @ Instruction::Return) => {
                write!(line, "{}", instr.opcode())?;
            },
            Err(DecodeError::UnknownOpcode(byte)) => {
                write!(line, "Unknown opcode {}", byte)?;
            },
            Err(DecodeError::MissingOperand(opcode)) => {
                write!(line, "{:16} <missing operand>", opcode)?;
            },
            Err(error @ DecodeError::EndOfCode) => {
                write!(line, "<{}>", error)?;
            },
        }
        
        writeln!(fmt, "{}", line.trim_end())?;
        
        Ok(offset + decoded_len(&result))
    }
    
    // a bar marks a byte on the same source line as the one before it
    fn write_lineno(&self, fmt: &mut impl Write, offset: usize) -> fmt::Result {
        let lineno = self.chunk.line_at(offset);
        let prev = offset.checked_sub(1).and_then(|prev| self.chunk.line_at(prev));
        
        match lineno {
            Some(lineno) if prev == Some(lineno) => write!(fmt, "   | "),
            Some(lineno) => write!(fmt, "{: >4} ", lineno),
            None => write!(fmt, "   ? "),
        }
    }
    
    fn write_const(&self, fmt: &mut impl Write, cid: ConstID, value: Option<&Value>) -> fmt::Result {
        match value {
            Some(value) => write!(fmt, "'{}'", value),
            None => {
                log::debug!("constant index {} out of range ({} constants)", cid, self.chunk.constants().len());
                write!(fmt, "<invalid constant>")
            },
        }
    }
}

impl fmt::Display for Disassembler<'_> {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> fmt::Result {
        self.decode_chunk(fmt)
    }
}


/// Prints a header followed by every instruction in `chunk` to stdout.
pub fn disassemble_chunk(chunk: &Chunk, name: &str) {
    print!("{}", Disassembler::new(chunk).with_name(name));
}

/// Prints the instruction at `offset` to stdout, returning the offset of the next one.
pub fn disassemble_instruction(chunk: &Chunk, offset: usize) -> usize {
    let mut line = String::new();
    
    // writing into a String does not fail
    let next = Disassembler::new(chunk)
        .decode_instr(&mut line, offset)
        .unwrap_or(offset + 1);
    
    print!("{}", line);
    next
}
