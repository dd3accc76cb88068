use minifb::Key;

// Keyboard  Keypad
// 1 2 3 4   1 2 3 C
// Q W E R   4 5 6 D
// A S D F   7 8 9 E
// Z X C V   A 0 B F
pub fn key_to_num(key: Key) -> Option<u8> {
    match key {
        Key::Key1 => Some(0x1),
        Key::Key2 => Some(0x2),
        Key::Key3 => Some(0x3),
        Key::Key4 => Some(0xC),
        Key::Q => Some(0x4),
        Key::W => Some(0x5),
        Key::E => Some(0x6),
        Key::R => Some(0xD),
        Key::A => Some(0x7),
        Key::S => Some(0x8),
        Key::D => Some(0x9),
        Key::F => Some(0xE),
        Key::Z => Some(0xA),
        Key::X => Some(0x0),
        Key::C => Some(0xB),
        Key::V => Some(0xF),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_line_has_exactly_one_key() {
        let keys = [
            Key::Key1, Key::Key2, Key::Key3, Key::Key4, Key::Q, Key::W, Key::E, Key::R,
            Key::A, Key::S, Key::D, Key::F, Key::Z, Key::X, Key::C, Key::V,
        ];
        let mut lines: Vec<u8> = keys.iter().filter_map(|k| key_to_num(*k)).collect();
        lines.sort();
        assert_eq!(lines, (0..16).collect::<Vec<u8>>());
        assert_eq!(key_to_num(Key::Escape), None);
    }
}
