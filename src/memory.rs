use std::{fs, path::Path};

use log::info;

use crate::decode::RawInstruction;
use crate::error::{ImageKind, LoadError, MachineFault, Result};
use crate::registers::{IndexRegister, ProgramCounter};

pub type TypeAddr = u16; // in reality u12

pub const MEMORY_SIZE: usize = 4096;
pub const STACK_LEVELS: usize = 16;

pub const FONT_START: TypeAddr = 0x050;
pub const FONT_CAPACITY: usize = 0x0A0 - 0x050;
pub const FONT_GLYPH_SIZE: u16 = 5;
pub const PROGRAM_START: TypeAddr = 0x200;
pub const PROGRAM_CAPACITY: usize = 0xFFF - 0x200;

pub type FontBytes = [u8; FONT_CAPACITY];

/// The usual 4x5 hex glyphs, 0 through F.
pub const DEFAULT_FONT: FontBytes = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

pub struct Memory {
    // 4k bytes
    // font data stored from 050 -> 09F, program from 200 onwards
    bytes: [u8; MEMORY_SIZE],
    pub pc: ProgramCounter,
    pub index: IndexRegister,
    pub stack: Stack,
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl Memory {
    pub fn new() -> Self {
        Self {
            bytes: [0; MEMORY_SIZE],
            pc: ProgramCounter(PROGRAM_START),
            index: IndexRegister(0x0),
            stack: Stack::new(),
        }
    }

    pub fn get(&self, addr: usize) -> Result<u8> {
        self.bytes
            .get(addr)
            .copied()
            .ok_or(MachineFault::AddressOutOfRange { addr })
    }

    pub fn set(&mut self, addr: usize, val: u8) -> Result<()> {
        let cell = self
            .bytes
            .get_mut(addr)
            .ok_or(MachineFault::AddressOutOfRange { addr })?;
        *cell = val;
        Ok(())
    }

    /// `len` bytes starting at `addr`, or a fault naming the first address
    /// past the end of memory.
    pub fn slice(&self, addr: usize, len: usize) -> Result<&[u8]> {
        self.bytes
            .get(addr..addr + len)
            .ok_or(MachineFault::AddressOutOfRange {
                addr: MEMORY_SIZE.max(addr),
            })
    }

    pub fn slice_mut(&mut self, addr: usize, len: usize) -> Result<&mut [u8]> {
        self.bytes
            .get_mut(addr..addr + len)
            .ok_or(MachineFault::AddressOutOfRange {
                addr: MEMORY_SIZE.max(addr),
            })
    }

    pub fn bytes(&self) -> &[u8; MEMORY_SIZE] {
        &self.bytes
    }

    /// Fetches the word at pc and moves pc past it.
    pub fn next_instruction(&mut self) -> Result<RawInstruction> {
        let at = self.pc.0 as usize;
        let (high, low) = (self.get(at)?, self.get(at + 1)?);
        self.pc.increment();
        Ok(RawInstruction::from_bytes(high, low))
    }

    pub fn set_pc(&mut self, addr: TypeAddr) {
        self.pc.set_addr(addr);
    }

    pub fn set_index(&mut self, addr: TypeAddr) {
        self.index.set_addr(addr);
    }

    pub fn load_font(&mut self, bytes: &[u8]) -> std::result::Result<(), LoadError> {
        self.load_image(ImageKind::Font, bytes)
    }

    // loads program instructions starting at address 0x200
    pub fn load_rom(&mut self, bytes: &[u8]) -> std::result::Result<(), LoadError> {
        self.load_image(ImageKind::Program, bytes)
    }

    pub fn load_font_by_file(&mut self, path: impl AsRef<Path>) -> std::result::Result<(), LoadError> {
        let font = fs::read(path)?;
        self.load_font(&font)
    }

    pub fn load_rom_by_file(&mut self, path: impl AsRef<Path>) -> std::result::Result<(), LoadError> {
        let program = fs::read(path)?;
        self.load_rom(&program)
    }

    fn load_image(&mut self, image: ImageKind, bytes: &[u8]) -> std::result::Result<(), LoadError> {
        let (start, max) = match image {
            ImageKind::Font => (FONT_START as usize, FONT_CAPACITY),
            ImageKind::Program => (PROGRAM_START as usize, PROGRAM_CAPACITY),
        };
        if bytes.len() > max {
            return Err(LoadError::TooLarge {
                image,
                size: bytes.len(),
                max,
            });
        }
        self.bytes[start..start + bytes.len()].copy_from_slice(bytes);
        info!("Loaded {image} image [size: {}, at: {start:#05X}]", bytes.len());
        Ok(())
    }
}

/// Return addresses for nested calls, 16 levels deep.
#[derive(Debug, Clone, Default)]
pub struct Stack {
    addresses: [TypeAddr; STACK_LEVELS],
    sp: u8,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `addr` at the current level. `target` is only used to
    /// describe the call in the fault.
    pub fn push(&mut self, addr: TypeAddr, target: TypeAddr) -> Result<()> {
        let slot = self
            .addresses
            .get_mut(self.sp as usize)
            .ok_or(MachineFault::StackOverflow { target })?;
        *slot = addr;
        self.sp += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<TypeAddr> {
        if self.sp == 0 {
            return Err(MachineFault::StackUnderflow);
        }
        self.sp -= 1;
        Ok(self.addresses[self.sp as usize])
    }

    pub fn sp(&self) -> u8 {
        self.sp
    }

    pub fn addresses(&self) -> &[TypeAddr; STACK_LEVELS] {
        &self.addresses
    }
}
