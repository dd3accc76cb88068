use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use log::{trace, warn};
use serde::{Deserialize, Serialize};

use crate::error::{MachineFault, Result};

pub const KEY_COUNT: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyEvent {
    Pressed(u8),
    Released(u8),
}

/// Producer half of the keypad. Cheap to clone and safe to hand to another
/// thread; events are applied at the start of the next cycle.
#[derive(Debug, Clone)]
pub struct KeypadSender {
    tx: Sender<KeyEvent>,
}

impl KeypadSender {
    pub fn press(&self, key: u8) {
        self.send(KeyEvent::Pressed(key));
    }

    pub fn release(&self, key: u8) {
        self.send(KeyEvent::Released(key));
    }

    pub fn send(&self, event: KeyEvent) {
        // the receiver lives as long as the machine; after that events have nowhere to go
        if self.tx.send(event).is_err() {
            trace!("keypad event {event:?} dropped, machine is gone");
        }
    }
}

/// The 16 keypad lines as seen by the cycle thread.
pub struct Keyboard {
    keys: [bool; KEY_COUNT],
    tx: Sender<KeyEvent>,
    rx: Receiver<KeyEvent>,
}

impl Default for Keyboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Keyboard {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            keys: [false; KEY_COUNT],
            tx,
            rx,
        }
    }

    pub fn sender(&self) -> KeypadSender {
        KeypadSender {
            tx: self.tx.clone(),
        }
    }

    /// Drains every pending event so the lines form one consistent snapshot
    /// for the coming cycle.
    pub fn sync(&mut self) {
        loop {
            match self.rx.try_recv() {
                Ok(event) => self.apply(event),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
    }

    pub fn apply(&mut self, event: KeyEvent) {
        let (key, pressed) = match event {
            KeyEvent::Pressed(key) => (key, true),
            KeyEvent::Released(key) => (key, false),
        };
        match self.keys.get_mut(key as usize) {
            Some(line) => *line = pressed,
            None => warn!("ignoring event for keypad line {key:#04X}"),
        }
    }

    pub fn get_key_status_from_num(&self, n: u8) -> Result<bool> {
        self.keys
            .get(n as usize)
            .copied()
            .ok_or(MachineFault::KeyOutOfRange(n))
    }

    /// Marks a press as consumed.
    pub fn clear(&mut self, n: u8) -> Result<()> {
        let line = self
            .keys
            .get_mut(n as usize)
            .ok_or(MachineFault::KeyOutOfRange(n))?;
        *line = false;
        Ok(())
    }

    /// Lowest-numbered line currently pressed.
    pub fn first_pressed(&self) -> Option<u8> {
        self.keys.iter().position(|&k| k).map(|k| k as u8)
    }

    pub fn lines(&self) -> [bool; KEY_COUNT] {
        self.keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_apply_only_on_sync() {
        let mut kb = Keyboard::new();
        let sender = kb.sender();
        sender.press(0xA);
        assert_eq!(kb.get_key_status_from_num(0xA), Ok(false));
        kb.sync();
        assert_eq!(kb.get_key_status_from_num(0xA), Ok(true));
        sender.release(0xA);
        kb.sync();
        assert_eq!(kb.get_key_status_from_num(0xA), Ok(false));
    }

    #[test]
    fn events_apply_in_order() {
        let mut kb = Keyboard::new();
        let sender = kb.sender();
        sender.press(3);
        sender.release(3);
        sender.press(5);
        kb.sync();
        assert_eq!(kb.first_pressed(), Some(5));
    }

    #[test]
    fn first_pressed_is_lowest() {
        let mut kb = Keyboard::new();
        kb.apply(KeyEvent::Pressed(0xC));
        kb.apply(KeyEvent::Pressed(0x2));
        assert_eq!(kb.first_pressed(), Some(0x2));
        kb.apply(KeyEvent::Released(0x2));
        assert_eq!(kb.first_pressed(), Some(0xC));
        kb.apply(KeyEvent::Released(0xC));
        assert_eq!(kb.first_pressed(), None);
    }

    #[test]
    fn out_of_range_lines() {
        let mut kb = Keyboard::new();
        kb.apply(KeyEvent::Pressed(0x10));
        assert_eq!(kb.lines(), [false; KEY_COUNT]);
        assert_eq!(
            kb.get_key_status_from_num(0x10),
            Err(MachineFault::KeyOutOfRange(0x10))
        );
        assert_eq!(kb.clear(0xFF), Err(MachineFault::KeyOutOfRange(0xFF)));
    }

    #[test]
    fn sender_works_across_threads() {
        let mut kb = Keyboard::new();
        let sender = kb.sender();
        std::thread::spawn(move || sender.press(7)).join().unwrap();
        kb.sync();
        assert_eq!(kb.get_key_status_from_num(7), Ok(true));
    }
}
