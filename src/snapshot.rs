use serde::{Deserialize, Serialize};

use crate::keyboard::KEY_COUNT;
use crate::memory::STACK_LEVELS;
use crate::registers::REGISTER_COUNT;

/// Everything observable about the machine between two cycles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineState {
    pub memory: Vec<u8>,
    pub registers: [u8; REGISTER_COUNT],
    pub pc: u16,
    pub i: u16,
    pub stack: [u16; STACK_LEVELS],
    pub sp: u8,
    pub opcode: u16,
    pub keypad: [bool; KEY_COUNT],
    pub frame_buffer: Vec<u8>,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub must_draw: bool,
    pub halted: bool,
}

impl MachineState {
    /// Name of the first field that differs from `other`, if any.
    pub fn diff(&self, other: &MachineState) -> Option<&'static str> {
        if self.memory != other.memory {
            Some("memory")
        } else if self.registers != other.registers {
            Some("registers")
        } else if self.pc != other.pc {
            Some("pc")
        } else if self.i != other.i {
            Some("i")
        } else if self.stack != other.stack {
            Some("stack")
        } else if self.sp != other.sp {
            Some("sp")
        } else if self.opcode != other.opcode {
            Some("opcode")
        } else if self.keypad != other.keypad {
            Some("keypad")
        } else if self.frame_buffer != other.frame_buffer {
            Some("frame_buffer")
        } else if self.delay_timer != other.delay_timer {
            Some("delay_timer")
        } else if self.sound_timer != other.sound_timer {
            Some("sound_timer")
        } else if self.must_draw != other.must_draw {
            Some("must_draw")
        } else if self.halted != other.halted {
            Some("halted")
        } else {
            None
        }
    }
}
