use std::fmt;

use thiserror::Error;

use crate::memory::TypeAddr;

/// Which reserved region an image is being loaded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Font,
    Program,
}

impl fmt::Display for ImageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageKind::Font => write!(f, "font"),
            ImageKind::Program => write!(f, "program"),
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{image} image is {size} bytes, max size is {max} bytes")]
    TooLarge {
        image: ImageKind,
        size: usize,
        max: usize,
    },
}

/// Conditions that stop the machine. Every fault is raised before the state
/// it would corrupt is written, and leaves the machine halted.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MachineFault {
    #[error("stack overflow: call to {target:#05X} with all 16 levels in use")]
    StackOverflow { target: TypeAddr },
    #[error("stack underflow: return with an empty call stack")]
    StackUnderflow,
    #[error("memory access out of bounds at address {addr:#06X}")]
    AddressOutOfRange { addr: usize },
    #[error("no font glyph for value {0:#04X}")]
    InvalidGlyph(u8),
    #[error("keypad has no line {0:#04X}")]
    KeyOutOfRange(u8),
    #[error("machine is halted")]
    Halted,
}

#[derive(Debug, Error)]
pub enum TraceError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialize error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MachineFault>;
