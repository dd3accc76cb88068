use std::time::Duration;

use anyhow::Context;
use chip8vm::{FrameBuffer, KeypadSender, HEIGHT, WIDTH};
use log::warn;
use minifb::{Key, KeyRepeat, Scale, Window, WindowOptions};

use super::input::key_to_num;

const OFF: u32 = 0x000000;
const ON: u32 = 0x007FFF;

pub struct Screen {
    window: Window,
    pixel_buffer: Vec<u32>,
}

impl Screen {
    pub fn new(scale: u8) -> anyhow::Result<Self> {
        let mut window = Window::new(
            "chip8vm - ESC to exit",
            WIDTH,
            HEIGHT,
            WindowOptions {
                scale: scale_from(scale),
                ..WindowOptions::default()
            },
        )
        .context("opening window")?;
        // Limit to max ~60 fps update rate
        window.limit_update_rate(Some(Duration::from_micros(16600)));
        Ok(Self {
            window,
            pixel_buffer: vec![OFF; WIDTH * HEIGHT],
        })
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open() && !self.window.is_key_down(Key::Escape)
    }

    pub fn draw(&mut self, fb: &FrameBuffer) {
        for (pixel, bit) in self.pixel_buffer.iter_mut().zip(fb.buffer().iter()) {
            *pixel = if *bit == 0 { OFF } else { ON };
        }
    }

    /// Presents the pixel buffer and pumps window events.
    pub fn sync(&mut self) -> anyhow::Result<()> {
        self.window
            .update_with_buffer(&self.pixel_buffer, WIDTH, HEIGHT)
            .context("updating window")
    }

    /// Pumps window events without presenting a new frame.
    pub fn update(&mut self) {
        self.window.update();
    }

    /// Sends keypad presses and releases seen since the last update.
    pub fn forward_keys(&self, keypad: &KeypadSender) {
        for key in self.window.get_keys_pressed(KeyRepeat::No) {
            if let Some(n) = key_to_num(key) {
                keypad.press(n);
            }
        }
        for key in self.window.get_keys_released() {
            if let Some(n) = key_to_num(key) {
                keypad.release(n);
            }
        }
    }
}

fn scale_from(scale: u8) -> Scale {
    match scale {
        1 => Scale::X1,
        2 => Scale::X2,
        4 => Scale::X4,
        8 => Scale::X8,
        16 => Scale::X16,
        32 => Scale::X32,
        other => {
            warn!("unsupported window scale {other}, using 16");
            Scale::X16
        }
    }
}
