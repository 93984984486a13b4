use std::num::ParseIntError;
use clap::{Command, Arg, ArgMatches};

use pepita::language::{FloatType, LineNo};
use pepita::chunk::{Chunk, ChunkError, OpCode};
use pepita::debug::disassemble_chunk;

fn main() {
    env_logger::init();
    
    let args = build_app().get_matches();
    
    let name = args.value_of("name").unwrap_or("code");
    
    let chunk =
        if args.is_present("demo") { build_demo() }
        else { build_from_args(&args) };
    
    let chunk = match chunk {
        Ok(chunk) => chunk,
        Err(message) => {
            println!("{}", message);
            return;
        }
    };
    
    if chunk.is_empty() && chunk.constants().is_empty() {
        println!("No input.");
        return;
    }
    
    log::debug!("{} bytes, {} constants", chunk.len(), chunk.constants().len());
    disassemble_chunk(&chunk, name);
}

fn build_app() -> Command<'static> {
    Command::new("pepita-dasm")
        .version(clap::crate_version!())
        .about("Bytecode disassembler for hand written chunks")
        .arg(
            Arg::new("bytes")
            .index(1)
            .help("bytes to append to the chunk, in decimal or 0x hex")
            .value_name("BYTE")
            .multiple_values(true)
        )
        .arg(
            Arg::new("const")
            .short('k')
            .long("const")
            .help("add a value to the constant pool (repeatable, in order)")
            .value_name("VALUE")
            .takes_value(true)
            .multiple_occurrences(true)
            .allow_hyphen_values(true)
        )
        .arg(
            Arg::new("line")
            .short('l')
            .long("line")
            .help("source line recorded for every byte")
            .value_name("LINE")
            .takes_value(true)
            .allow_hyphen_values(true)
        )
        .arg(
            Arg::new("name")
            .short('n')
            .long("name")
            .help("name printed in the listing header")
            .value_name("NAME")
            .takes_value(true)
        )
        .arg(
            Arg::new("demo")
            .long("demo")
            .help("disassemble a small sample chunk instead")
        )
}

fn build_demo() -> Result<Chunk, String> {
    let mut chunk = Chunk::new();
    
    let cid = chunk.add_constant(1.2).map_err(|error| error.to_string())?;
    chunk.write_op(OpCode::Constant, 123);
    chunk.write(cid, 123);
    chunk.write_op(OpCode::Return, 123);
    
    Ok(chunk)
}

fn build_from_args(args: &ArgMatches) -> Result<Chunk, String> {
    let line = match args.value_of("line") {
        Some(s) => s.parse::<LineNo>()
            .map_err(|error| format!("Invalid line \"{}\": {}.", s, error))?,
        None => 1,
    };
    
    let mut chunk = Chunk::new();
    
    for s in args.values_of("const").into_iter().flatten() {
        let value = s.parse::<FloatType>()
            .map_err(|error| format!("Invalid constant \"{}\": {}.", s, error))?;
        
        chunk.add_constant(value)
            .map_err(|error: ChunkError| format!("Could not add constant \"{}\": {}.", s, error))?;
    }
    
    for s in args.values_of("bytes").into_iter().flatten() {
        let byte = parse_byte(s)
            .map_err(|error| format!("Invalid byte \"{}\": {}.", s, error))?;
        chunk.write(byte, line);
    }
    
    Ok(chunk)
}

fn parse_byte(s: &str) -> Result<u8, ParseIntError> {
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => s.parse::<u8>(),
    }
}
