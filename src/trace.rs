use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};

use log::info;

use crate::{error::TraceError, snapshot::MachineState, Emulator};

/// Collects one snapshot per cycle and writes them out as a JSON array.
#[derive(Debug, Default)]
pub struct TraceRecorder {
    states: Vec<MachineState>,
}

impl TraceRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, emu: &Emulator) {
        self.states.push(emu.snapshot());
    }

    pub fn states(&self) -> &[MachineState] {
        &self.states
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn write_to<W: Write>(&self, writer: W) -> Result<(), TraceError> {
        serde_json::to_writer(writer, &self.states)?;
        Ok(())
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), TraceError> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer)?;
        writer.flush()?;
        info!("Wrote trace [cycles: {}] to {}", self.states.len(), path.display());
        Ok(())
    }
}

pub fn read_trace<R: Read>(reader: R) -> Result<Vec<MachineState>, TraceError> {
    Ok(serde_json::from_reader(reader)?)
}

pub fn load_trace(path: impl AsRef<Path>) -> Result<Vec<MachineState>, TraceError> {
    read_trace(BufReader::new(File::open(path)?))
}

/// Index and field of the first cycle where `actual` departs from
/// `expected`. A trace that stops early diverges at its end.
pub fn first_divergence(
    expected: &[MachineState],
    actual: &[MachineState],
) -> Option<(usize, &'static str)> {
    for (cycle, (e, a)) in expected.iter().zip(actual).enumerate() {
        if let Some(field) = e.diff(a) {
            return Some((cycle, field));
        }
    }
    if expected.len() != actual.len() {
        return Some((expected.len().min(actual.len()), "length"));
    }
    None
}
