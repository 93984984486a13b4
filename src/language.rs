pub type FloatType = f64;  // internal representation for numeric literals
pub type LineNo = i32;     // source line attached to each byte of bytecode
