use std::thread;

use chip8vm::{Emulator, MachineFault};

const PROGRAM: [u8; 8] = [
    0xF3, 0x0A, // 200: LD V3, K
    0xE3, 0x9E, // 202: SKP V3
    0x12, 0x04, // 204: JP 204
    0x12, 0x06, // 206: JP 206
];

fn boot() -> Emulator {
    let mut emu = Emulator::with_seed(7);
    emu.load_default_font().unwrap();
    emu.load_rom(&PROGRAM).unwrap();
    emu
}

#[test]
fn wait_for_key_resumes_on_press_from_another_thread() {
    let mut emu = boot();
    for _ in 0..5 {
        emu.cycle().unwrap();
        assert_eq!(emu.mem.pc.0, 0x200);
        assert_eq!(emu.regs.get(3), 0);
    }

    let keypad = emu.keypad_sender();
    thread::spawn(move || keypad.press(5)).join().unwrap();

    emu.cycle().unwrap();
    assert_eq!(emu.regs.get(3), 5);
    assert_eq!(emu.mem.pc.0, 0x202);

    emu.cycle().unwrap();
    assert_eq!(emu.mem.pc.0, 0x206);
    assert!(!emu.snapshot().keypad[5]);
}

#[test]
fn released_key_is_not_seen_by_wait() {
    let mut emu = boot();
    let keypad = emu.keypad_sender();
    keypad.press(0xA);
    keypad.release(0xA);

    emu.cycle().unwrap();
    assert_eq!(emu.mem.pc.0, 0x200);
}

#[test]
fn halting_while_waiting_stops_the_machine() {
    let mut emu = boot();
    emu.cycle().unwrap();
    emu.halt();
    assert!(emu.is_halted());
    assert_eq!(emu.cycle(), Err(MachineFault::Halted));
    assert_eq!(emu.mem.pc.0, 0x200);
}
