//! Bytecode storage and introspection for a small virtual machine.
//!
//! A [`Chunk`] holds encoded instructions, the source line of every byte and a pool of
//! constants. The [`debug`] module turns a chunk back into a readable listing.

pub mod language;
pub mod utils;
pub mod memory;
pub mod value;
pub mod chunk;
pub mod debug;

pub use value::{Value, ValueArray};
pub use chunk::{Chunk, OpCode, Instruction};
pub use debug::{Disassembler, disassemble_chunk, disassemble_instruction};
