use std::path::Path;

use log::{debug, error, info, trace, warn};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    decode::{OpCodes, RawInstruction},
    display::FrameBuffer,
    error::{LoadError, MachineFault, Result},
    keyboard::{Keyboard, KeypadSender},
    memory::{Memory, DEFAULT_FONT, FONT_GLYPH_SIZE, FONT_START},
    registers::Registers,
    snapshot::MachineState,
    timer::Timer,
};

/// The whole machine plus the cycle controller that drives it.
///
/// Construct it, load a font and a program, then call [`Emulator::cycle`]
/// until it reports a fault or [`Emulator::halt`] is called. A halted
/// machine stays halted; start over with a new instance.
pub struct Emulator {
    fb: FrameBuffer,
    pub regs: Registers,
    pub mem: Memory,
    pub delay_timer: Timer,
    pub sound_timer: Timer,
    keyboard: Keyboard,
    rng: StdRng,
    opcode: RawInstruction,
    must_draw: bool,
    halted: bool,
}

impl Default for Emulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Emulator {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Same as [`Emulator::new`] but `RND` draws from a seeded generator,
    /// so runs are reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            fb: FrameBuffer::new(),
            regs: Registers::new(),
            mem: Memory::new(),
            delay_timer: Timer::new(0),
            sound_timer: Timer::new(0),
            keyboard: Keyboard::new(),
            rng,
            opcode: RawInstruction::default(),
            must_draw: false,
            halted: false,
        }
    }

    pub fn load_font(&mut self, font: &[u8]) -> std::result::Result<(), LoadError> {
        self.mem.load_font(font)
    }

    pub fn load_default_font(&mut self) -> std::result::Result<(), LoadError> {
        self.mem.load_font(&DEFAULT_FONT)
    }

    pub fn load_rom(&mut self, rom: &[u8]) -> std::result::Result<(), LoadError> {
        self.mem.load_rom(rom)
    }

    pub fn load_font_by_file(&mut self, path: impl AsRef<Path>) -> std::result::Result<(), LoadError> {
        self.mem.load_font_by_file(path)
    }

    pub fn load_rom_by_file(&mut self, path: impl AsRef<Path>) -> std::result::Result<(), LoadError> {
        self.mem.load_rom_by_file(path)
    }

    pub fn fetch_decode(&mut self) -> Result<OpCodes> {
        let ins = self.mem.next_instruction()?;
        self.opcode = ins;
        Ok(OpCodes::decode(ins))
    }

    pub fn execute_ins(&mut self, ins: OpCodes) -> Result<()> {
        match ins {
            OpCodes::ClearScreen => {
                self.fb.clear_buffer();
                self.must_draw = true;
            }
            OpCodes::PopSubroutine => {
                let addr = self.mem.stack.pop()?;
                self.mem.set_pc(addr);
                trace!("return: set PC to {addr:#05X}");
            }
            OpCodes::Jump(addr) => {
                self.mem.set_pc(addr);
            }
            OpCodes::PushSubroutine(addr) => {
                // pc already points past the call, which is where we come back to
                self.mem.stack.push(self.mem.pc.0, addr)?;
                self.mem.set_pc(addr);
                trace!("call: set PC to {addr:#05X} [sp: {}]", self.mem.stack.sp());
            }
            OpCodes::SkipEqualConstant(vx, kk) => {
                self.skip_if(self.regs.get(vx) == kk);
            }
            OpCodes::SkipNotEqualConstant(vx, kk) => {
                self.skip_if(self.regs.get(vx) != kk);
            }
            OpCodes::SkipEqualRegister(vx, vy) => {
                self.skip_if(self.regs.get(vx) == self.regs.get(vy));
            }
            OpCodes::SkipNotEqualRegister(vx, vy) => {
                self.skip_if(self.regs.get(vx) != self.regs.get(vy));
            }
            OpCodes::SetRegister(vx, kk) => {
                self.regs.set_register(vx, kk);
            }
            OpCodes::AddToRegister(vx, kk) => {
                self.regs.add_to_register(vx, kk);
            }
            OpCodes::CopyRegister(vx, vy) => {
                self.regs.set_register(vx, self.regs.get(vy));
            }
            OpCodes::Or(vx, vy) => {
                self.regs
                    .set_register(vx, self.regs.get(vx) | self.regs.get(vy));
            }
            OpCodes::And(vx, vy) => {
                self.regs
                    .set_register(vx, self.regs.get(vx) & self.regs.get(vy));
            }
            OpCodes::XOr(vx, vy) => {
                self.regs
                    .set_register(vx, self.regs.get(vx) ^ self.regs.get(vy));
            }
            OpCodes::Add(vx, vy) => {
                // carry is decided on the 9-bit sum, before truncating
                let sum = self.regs.get(vx) as u16 + self.regs.get(vy) as u16;
                self.regs.set_register(vx, (sum & 0xFF) as u8);
                self.regs.set_flag(sum > 0xFF);
            }
            // VF is written before the result, so with x or y = F the
            // result is computed from the new flag
            OpCodes::SubtractForward(vx, vy) => {
                self.regs.set_flag(self.regs.get(vx) > self.regs.get(vy));
                let (x, y) = (self.regs.get(vx), self.regs.get(vy));
                self.regs.set_register(vx, x.wrapping_sub(y));
            }
            OpCodes::RightShift(vx) => {
                self.regs.set_flag(self.regs.get(vx) & 1 == 1);
                self.regs.set_register(vx, self.regs.get(vx) >> 1);
            }
            OpCodes::SubtractBackward(vx, vy) => {
                self.regs.set_flag(self.regs.get(vy) > self.regs.get(vx));
                let (x, y) = (self.regs.get(vx), self.regs.get(vy));
                self.regs.set_register(vx, y.wrapping_sub(x));
            }
            OpCodes::LeftShift(vx) => {
                self.regs.set_flag(self.regs.get(vx) & 0x80 != 0);
                self.regs.set_register(vx, self.regs.get(vx).wrapping_shl(1));
            }
            OpCodes::SetIndexRegister(addr) => self.mem.set_index(addr),
            OpCodes::JumpWithOffset(addr) => {
                self.mem.set_pc(addr + self.regs.get(0) as u16);
            }
            OpCodes::Random(vx, kk) => {
                let ransuu: u8 = self.rng.gen();
                self.regs.set_register(vx, ransuu & kk);
            }
            OpCodes::Display(reg_x, reg_y, height) => {
                let (x, y) = (self.regs.get(reg_x), self.regs.get(reg_y));
                let sprite = self.mem.slice(self.mem.index.0 as usize, height as usize)?;
                let collision = self.fb.paint(x, y, sprite);
                self.regs.set_flag(collision);
                self.must_draw = true;
            }
            OpCodes::SkipIfPressed(vx) => {
                let key = self.regs.get(vx);
                if self.keyboard.get_key_status_from_num(key)? {
                    self.mem.pc.increment();
                    // one press satisfies one skip
                    self.keyboard.clear(key)?;
                }
            }
            OpCodes::SkipIfNotPressed(vx) => {
                let key = self.regs.get(vx);
                if self.keyboard.get_key_status_from_num(key)? {
                    self.keyboard.clear(key)?;
                } else {
                    self.mem.pc.increment();
                }
            }
            OpCodes::CopyDelayToRegister(vx) => self.regs.set_register(vx, self.delay_timer.get()),
            OpCodes::GetKey(vx) => match self.keyboard.first_pressed() {
                Some(key) => self.regs.set_register(vx, key),
                None => {
                    // run this instruction again next cycle
                    self.mem.pc.decrement();
                }
            },
            OpCodes::CopyRegisterToDelay(vx) => self.delay_timer.set(self.regs.get(vx)),
            OpCodes::CopyRegisterToSound(vx) => self.sound_timer.set(self.regs.get(vx)),
            OpCodes::AddToIndex(vx) => {
                self.mem
                    .set_index(self.mem.index.0.wrapping_add(self.regs.get(vx) as u16));
            }
            OpCodes::PointChar(vx) => {
                let char = self.regs.get(vx);
                if char > 0xF {
                    return Err(MachineFault::InvalidGlyph(char));
                }
                self.mem.set_index(FONT_START + char as u16 * FONT_GLYPH_SIZE);
            }
            OpCodes::ToDecimal(vx) => {
                let value = self.regs.get(vx);
                let digits = self.mem.slice_mut(self.mem.index.0 as usize, 3)?;
                digits.copy_from_slice(&[value / 100, (value / 10) % 10, value % 10]);
            }
            OpCodes::StoreRegisterToMemory(vx) => {
                let count = vx as usize + 1;
                let dst = self.mem.slice_mut(self.mem.index.0 as usize, count)?;
                dst.copy_from_slice(&self.regs.as_array()[..count]);
            }
            OpCodes::LoadRegisterFromMemory(vx) => {
                let src = self.mem.slice(self.mem.index.0 as usize, vx as usize + 1)?;
                for (reg, val) in src.iter().enumerate() {
                    self.regs.set_register(reg as u8, *val);
                }
            }
            OpCodes::Unimplemented(code) => {
                warn!("Unknown opcode {code:#06X}, skipping");
            }
        }
        Ok(())
    }

    fn skip_if(&mut self, cond: bool) {
        if cond {
            self.mem.pc.increment();
            trace!("skip: set PC to {:#05X}", self.mem.pc.0);
        }
    }

    pub fn sync_timers(&mut self) {
        self.sound_timer.tick();
        self.delay_timer.tick();
    }

    /// One fetch, decode, execute and timer step. A fault halts the machine
    /// and is handed back; the state is left as it was when the fault was
    /// detected.
    pub fn cycle(&mut self) -> Result<()> {
        if self.halted {
            return Err(MachineFault::Halted);
        }
        self.keyboard.sync();
        let outcome = self
            .fetch_decode()
            .and_then(|operation| {
                debug!("Processing instruction [{:?}]", operation);
                self.execute_ins(operation)
            });
        if let Err(fault) = outcome {
            error!("{fault} [pc: {:#05X}, opcode: {:#06X}]", self.mem.pc.0, self.opcode.0);
            self.halted = true;
            return Err(fault);
        }
        self.sync_timers();
        trace!(
            "Timers: [sound: {}] [delay: {}]",
            self.sound_timer.get(),
            self.delay_timer.get()
        );
        Ok(())
    }

    pub fn halt(&mut self) {
        if !self.halted {
            info!("Halting [pc: {:#05X}]", self.mem.pc.0);
        }
        self.halted = true;
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn is_running(&self) -> bool {
        !self.halted
    }

    pub fn must_draw(&self) -> bool {
        self.must_draw
    }

    /// Checks and clears the redraw flag.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.must_draw)
    }

    pub fn must_beep(&self) -> bool {
        self.sound_timer.is_active()
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.fb
    }

    pub fn keypad_sender(&self) -> KeypadSender {
        self.keyboard.sender()
    }

    pub fn press(&mut self, key: u8) {
        self.keyboard.apply(crate::keyboard::KeyEvent::Pressed(key));
    }

    pub fn release(&mut self, key: u8) {
        self.keyboard.apply(crate::keyboard::KeyEvent::Released(key));
    }

    pub fn snapshot(&self) -> MachineState {
        MachineState {
            memory: self.mem.bytes().to_vec(),
            registers: *self.regs.as_array(),
            pc: self.mem.pc.0,
            i: self.mem.index.0,
            stack: *self.mem.stack.addresses(),
            sp: self.mem.stack.sp(),
            opcode: self.opcode.0,
            keypad: self.keyboard.lines(),
            frame_buffer: self.fb.buffer().to_vec(),
            delay_timer: self.delay_timer.get(),
            sound_timer: self.sound_timer.get(),
            must_draw: self.must_draw,
            halted: self.halted,
        }
    }
}
