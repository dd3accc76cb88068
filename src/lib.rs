// 16 8-bit data registers named V0 to VF
// I -> address register
//
// 16 levels of call stack
//
// Delay timer & Sound timer: count down once per cycle until 0
// Beep while sound timer is non-zero
//
// Display res: 64 width, 32 height
//
// opcodes are 2 bytes (big-endian)
//      NNN: address
//      KK: 8-bit constant
//      N: 4-bit constant
//      X and Y: 4-bit register identifier

pub mod decode;
pub mod display;
pub mod emulator;
pub mod error;
pub mod keyboard;
pub mod memory;
pub mod registers;
pub mod snapshot;
pub mod timer;
pub mod trace;

pub use decode::{OpCodes, RawInstruction};
pub use display::{FrameBuffer, HEIGHT, WIDTH};
pub use emulator::Emulator;
pub use error::{ImageKind, LoadError, MachineFault, TraceError};
pub use keyboard::{KeyEvent, KeypadSender};
pub use memory::DEFAULT_FONT;
pub use snapshot::MachineState;
pub use trace::TraceRecorder;
