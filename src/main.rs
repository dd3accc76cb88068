//! Runs a CHIP-8 program in a window, or headless while recording a trace
//! of the machine state after every cycle.
//!
//! ```text
//! chip8vm roms/ibm.ch8
//! chip8vm roms/ibm.ch8 --trace ibm.json --cycles 200 --seed 1
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use chip8vm::{Emulator, TraceRecorder};
use clap::Parser;
use log::{info, warn};

mod frontend;

use frontend::{Screen, Sound};

const FRAME_RATE: u32 = 60;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Program image, loaded at 0x200
    rom: PathBuf,

    /// Font image, loaded at 0x050; the built-in hex font is used if absent
    #[arg(short, long)]
    font: Option<PathBuf>,

    /// Cycles per second
    #[arg(long, default_value_t = 500)]
    hz: u32,

    /// Window scale: 1, 2, 4, 8, 16 or 32
    #[arg(short, long, default_value_t = 16)]
    scale: u8,

    /// Run headless and write a JSON snapshot per cycle to this file
    #[arg(short, long)]
    trace: Option<PathBuf>,

    /// Number of cycles to run in trace mode
    #[arg(short, long, default_value_t = 1000)]
    cycles: usize,

    /// Seed for the random number instruction
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut emu = match args.seed {
        Some(seed) => Emulator::with_seed(seed),
        None => Emulator::new(),
    };
    match &args.font {
        Some(path) => emu
            .load_font_by_file(path)
            .with_context(|| format!("loading font {}", path.display()))?,
        None => emu
            .load_default_font()
            .context("loading built-in font")?,
    }
    emu.load_rom_by_file(&args.rom)
        .with_context(|| format!("loading program {}", args.rom.display()))?;

    match &args.trace {
        Some(path) => run_trace(&mut emu, path, args.cycles),
        None => run_window(&mut emu, &args),
    }
}

fn run_window(emu: &mut Emulator, args: &Args) -> anyhow::Result<()> {
    let mut screen = Screen::new(args.scale)?;
    let sound = match Sound::new() {
        Ok(sound) => Some(sound),
        Err(e) => {
            warn!("audio disabled: {e:#}");
            None
        }
    };
    let keypad = emu.keypad_sender();
    let cycles_per_frame = (args.hz / FRAME_RATE).max(1);
    info!("Running [hz: {}, cycles per frame: {cycles_per_frame}]", args.hz);

    while emu.is_running() {
        if !screen.is_open() {
            emu.halt();
            break;
        }
        screen.forward_keys(&keypad);
        for _ in 0..cycles_per_frame {
            emu.cycle().context("machine stopped")?;
        }
        if let Some(sound) = &sound {
            sound.set_beeping(emu.must_beep());
        }
        if emu.take_redraw() {
            screen.draw(emu.framebuffer());
            screen.sync()?;
        } else {
            screen.update();
        }
    }
    Ok(())
}

fn run_trace(emu: &mut Emulator, path: &Path, cycles: usize) -> anyhow::Result<()> {
    let mut recorder = TraceRecorder::new();
    for _ in 0..cycles {
        let outcome = emu.cycle();
        recorder.record(emu);
        if let Err(fault) = outcome {
            warn!("trace stopped after {} cycles: {fault}", recorder.len());
            break;
        }
    }
    recorder
        .save(path)
        .with_context(|| format!("writing trace {}", path.display()))
}
