pub mod dasm;

pub use dasm::{Disassembler, disassemble_chunk, disassemble_instruction};

mod tests;
