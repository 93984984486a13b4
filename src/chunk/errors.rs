use std::fmt;
use std::error::Error;

use crate::utils;


pub type ErrorKind = ChunkErrorKind;
pub type ChunkResult<T> = Result<T, ChunkError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkErrorKind {
    // more constants than a one byte operand can address
    ConstPoolLimit,
}

#[derive(Debug)]
pub struct ChunkError {
    kind: ErrorKind,
    cause: Option<Box<dyn Error>>,
}

impl ChunkError {
    pub fn caused_by(mut self, error: impl Error + 'static) -> Self {
        self.cause.replace(Box::new(error)); self
    }
    
    pub fn kind(&self) -> &ErrorKind { &self.kind }
}

impl From<ErrorKind> for ChunkError {
    fn from(kind: ErrorKind) -> Self {
        Self { kind, cause: None }
    }
}

impl Error for ChunkError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause.as_ref().map(|o| o.as_ref())
    }
}

impl fmt::Display for ChunkError {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        
        let message = match self.kind() {
            ErrorKind::ConstPoolLimit => "constant pool limit reached",
        };
        
        utils::format_error(fmt, "chunk error", Some(message), self.source())
    }
}
