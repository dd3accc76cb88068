use crate::memory::TypeAddr;

/// A raw 16-bit instruction word, fetched big-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawInstruction(pub u16);

impl RawInstruction {
    pub fn new(code: u16) -> Self {
        RawInstruction(code)
    }

    pub fn from_bytes(high: u8, low: u8) -> Self {
        RawInstruction(((high as u16) << 8) | low as u16)
    }

    /// Dispatch key: the opcode family plus whichever nibbles select the
    /// operation within it.
    pub fn id(&self) -> u16 {
        match self.0 >> 12 {
            // 00E0 and 00EE only differ in the low nibble
            0x0 => self.0,
            0x8 | 0x9 => self.0 & 0xF00F,
            0xE | 0xF => self.0 & 0xF0FF,
            _ => self.0 & 0xF000,
        }
    }

    pub fn nnn(&self) -> TypeAddr {
        self.0 & 0x0FFF
    }

    pub fn kk(&self) -> u8 {
        (self.0 & 0x00FF) as u8
    }

    pub fn n(&self) -> u8 {
        (self.0 & 0x000F) as u8
    }

    pub fn x(&self) -> u8 {
        ((self.0 & 0x0F00) >> 8) as u8
    }

    pub fn y(&self) -> u8 {
        ((self.0 & 0x00F0) >> 4) as u8
    }
}

impl PartialEq<u16> for RawInstruction {
    fn eq(&self, ins: &u16) -> bool {
        ins.eq(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpCodes {
    // 00E0
    // turn all pixels to 0
    ClearScreen,
    // 00EE
    PopSubroutine,
    // 1NNN
    // set PC to address NNN, "jump" to memory location
    Jump(TypeAddr),
    // 2NNN
    PushSubroutine(TypeAddr),

    // 3XKK
    SkipEqualConstant(u8, u8),
    // 4XKK
    SkipNotEqualConstant(u8, u8),
    // 5XY0
    SkipEqualRegister(u8, u8),
    // 9XY0
    SkipNotEqualRegister(u8, u8),

    // 6XKK
    SetRegister(u8, u8),
    // 7XKK
    // add value KK to VX, no carry
    AddToRegister(u8, u8),

    // 8XY0
    CopyRegister(u8, u8),
    // 8XY1
    Or(u8, u8),
    // 8XY2
    And(u8, u8),
    // 8XY3
    XOr(u8, u8),
    /// 8XY4
    Add(u8, u8),
    // 8XY5
    SubtractForward(u8, u8),
    // 8XY6
    RightShift(u8),
    // 8XY7
    SubtractBackward(u8, u8),
    // 8XYE
    LeftShift(u8),

    // ANNN
    SetIndexRegister(TypeAddr),
    // BNNN
    JumpWithOffset(TypeAddr),
    // CXKK
    Random(u8, u8),
    // DXYN
    // draw an N pixel tall sprite starting at I
    // at Coordinates (VX, VY)
    // XOR pixels on screen using sprite data
    // if any pixel on screen was switched OFF: VF set to 1
    Display(u8, u8, u8),

    // EX9E
    SkipIfPressed(u8),
    // EXA1
    SkipIfNotPressed(u8),

    // FX07
    CopyDelayToRegister(u8),
    // FX0A
    GetKey(u8),
    // FX15
    CopyRegisterToDelay(u8),
    // FX18
    CopyRegisterToSound(u8),
    // FX1E
    AddToIndex(u8),
    // FX29
    PointChar(u8),
    // FX33
    ToDecimal(u8),
    // FX55
    StoreRegisterToMemory(u8),
    // FX65
    LoadRegisterFromMemory(u8),

    Unimplemented(u16),
}

impl OpCodes {
    pub fn decode_raw(ins: u16) -> Self {
        Self::decode(RawInstruction::new(ins))
    }

    pub fn decode(raw: RawInstruction) -> Self {
        let (x, y) = (raw.x(), raw.y());
        match raw.id() {
            0x00E0 => Self::ClearScreen,
            0x00EE => Self::PopSubroutine,
            0x1000 => Self::Jump(raw.nnn()),
            0x2000 => Self::PushSubroutine(raw.nnn()),
            0x3000 => Self::SkipEqualConstant(x, raw.kk()),
            0x4000 => Self::SkipNotEqualConstant(x, raw.kk()),
            0x5000 => Self::SkipEqualRegister(x, y),
            0x6000 => Self::SetRegister(x, raw.kk()),
            0x7000 => Self::AddToRegister(x, raw.kk()),
            0x8000 => Self::CopyRegister(x, y),
            0x8001 => Self::Or(x, y),
            0x8002 => Self::And(x, y),
            0x8003 => Self::XOr(x, y),
            0x8004 => Self::Add(x, y),
            0x8005 => Self::SubtractForward(x, y),
            0x8006 => Self::RightShift(x),
            0x8007 => Self::SubtractBackward(x, y),
            0x800E => Self::LeftShift(x),
            0x9000 => Self::SkipNotEqualRegister(x, y),
            0xA000 => Self::SetIndexRegister(raw.nnn()),
            0xB000 => Self::JumpWithOffset(raw.nnn()),
            0xC000 => Self::Random(x, raw.kk()),
            0xD000 => Self::Display(x, y, raw.n()),
            0xE09E => Self::SkipIfPressed(x),
            0xE0A1 => Self::SkipIfNotPressed(x),
            0xF007 => Self::CopyDelayToRegister(x),
            0xF00A => Self::GetKey(x),
            0xF015 => Self::CopyRegisterToDelay(x),
            0xF018 => Self::CopyRegisterToSound(x),
            0xF01E => Self::AddToIndex(x),
            0xF029 => Self::PointChar(x),
            0xF033 => Self::ToDecimal(x),
            0xF055 => Self::StoreRegisterToMemory(x),
            0xF065 => Self::LoadRegisterFromMemory(x),
            _ => Self::Unimplemented(raw.0),
        }
    }
}

#[test]
fn test_bit_manip() {
    assert_eq!(RawInstruction::new(0x8235).id(), 0x8005);
    assert_eq!(RawInstruction::new(0x1AAA).nnn(), 0xAAA);
    assert_eq!(RawInstruction::new(0x3A22).x(), 0xA);
    assert_eq!(RawInstruction::new(0x82B0).y(), 0xB);
    assert_eq!(RawInstruction::new(0x6922).kk(), 0x22);
    assert_eq!(RawInstruction::new(0xDAFD).n(), 0xD);
}
