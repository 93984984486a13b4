#![cfg(test)]

use crate::chunk::{Chunk, OpCode, Instruction};
use super::dasm::Disassembler;

fn decode_one(chunk: &Chunk, offset: usize) -> (String, usize) {
    let mut line = String::new();
    let next = Disassembler::new(chunk).decode_instr(&mut line, offset).unwrap();
    (line, next)
}

#[test]
fn dasm_test_empty_chunk() {
    let chunk = Chunk::new();
    let listing = Disassembler::new(&chunk).with_name("empty").to_string();
    assert_eq!(listing, "== empty ==\n");
    
    assert_eq!(Disassembler::new(&chunk).to_string(), "");
}

#[test]
fn dasm_test_constant_then_return() {
    let mut chunk = Chunk::new();
    let cid = chunk.add_constant(1.5).unwrap();
    chunk.write(OpCode::Constant, 123);
    chunk.write(cid, 123);
    chunk.write(OpCode::Return, 123);
    
    let (line, next) = decode_one(&chunk, 0);
    assert_eq!(line, "0000  123 OP_CONSTANT         0 '1.5'\n");
    assert_eq!(next, 2);
    
    let (line, next) = decode_one(&chunk, 2);
    assert_eq!(line, "0002    | OP_RETURN\n");
    assert_eq!(next, 3);
}

#[test]
fn dasm_test_line_changes() {
    let mut chunk = Chunk::new();
    chunk.write_op(OpCode::Return, 1);
    chunk.write_op(OpCode::Return, 1);
    chunk.write_op(OpCode::Return, 2);
    
    let listing = Disassembler::new(&chunk).with_name("lines").to_string();
    assert_eq!(listing, concat!(
        "== lines ==\n",
        "0000    1 OP_RETURN\n",
        "0001    | OP_RETURN\n",
        "0002    2 OP_RETURN\n",
    ));
}

#[test]
fn dasm_test_unknown_opcode() {
    let mut chunk = Chunk::new();
    chunk.write(0xFFu8, 1);
    chunk.write_op(OpCode::Return, 1);
    
    let (line, next) = decode_one(&chunk, 0);
    assert_eq!(line, "0000    1 Unknown opcode 255\n");
    assert_eq!(next, 1);
    
    let listing = Disassembler::new(&chunk).to_string();
    assert_eq!(listing.lines().count(), 2);
    assert!(listing.ends_with("0001    | OP_RETURN\n"));
}

#[test_log::test]
fn dasm_test_constant_out_of_range() {
    let mut chunk = Chunk::new();
    chunk.write_instr(Instruction::Constant(9), 4);
    
    let (line, next) = decode_one(&chunk, 0);
    assert_eq!(line, "0000    4 OP_CONSTANT         9 <invalid constant>\n");
    assert_eq!(next, 2);
}

#[test]
fn dasm_test_missing_operand() {
    let mut chunk = Chunk::new();
    chunk.write_op(OpCode::Constant, 7);
    
    let (line, next) = decode_one(&chunk, 0);
    assert_eq!(line, "0000    7 OP_CONSTANT      <missing operand>\n");
    assert_eq!(next, 1);
}

#[test]
fn dasm_test_visits_every_instruction_once() {
    let mut chunk = Chunk::new();
    let mut expected = Vec::new();
    for i in 0..50u8 {
        expected.push(chunk.len());
        if i % 3 == 0 {
            chunk.write_op(OpCode::Return, i32::from(i));
        } else {
            let cid = chunk.add_constant(f64::from(i)).unwrap();
            chunk.write_instr(Instruction::Constant(cid), i32::from(i));
        }
    }
    
    let dasm = Disassembler::new(&chunk);
    let mut sink = String::new();
    let mut visited = Vec::new();
    let mut offset = 0;
    while offset < chunk.len() {
        visited.push(offset);
        let next = dasm.decode_instr(&mut sink, offset).unwrap();
        assert!(next > offset);
        offset = next;
    }
    
    assert_eq!(offset, chunk.len());
    assert_eq!(visited, expected);
    assert_eq!(sink.lines().count(), 50);
}

#[test]
fn dasm_test_offsets_match_instruction_iterator() {
    let mut chunk = Chunk::new();
    let cid = chunk.add_constant(0.5).unwrap();
    chunk.write_instr(Instruction::Constant(cid), 1);
    chunk.write(0xEEu8, 1);
    chunk.write_instr(Instruction::Constant(77), 2);
    chunk.write_op(OpCode::Return, 2);
    chunk.write(0x05u8, 3);
    chunk.write_op(OpCode::Constant, 3);
    
    let dasm = Disassembler::new(&chunk);
    let mut sink = String::new();
    let mut offsets = Vec::new();
    let mut offset = 0;
    while offset < chunk.len() {
        offsets.push(offset);
        offset = dasm.decode_instr(&mut sink, offset).unwrap();
    }
    
    let expected = chunk.instructions().map(|(offset, _)| offset).collect::<Vec<_>>();
    assert_eq!(offsets, expected);
    assert_eq!(offsets, vec![0, 2, 3, 5, 6, 7]);
    assert_eq!(offset, chunk.len());
}
