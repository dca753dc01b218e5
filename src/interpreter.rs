/// # interpreter
///
/// Runs a sketch: decode an instruction, step the plotter, hand the effects
/// to the surface, repeat until the bytes run out. Strictly one instruction at
/// a time and in file order, since every move depends on the one before.
///
/// Any decode or surface error ends the replay on the spot. Whatever was
/// already drawn stays drawn.
use crate::decoder::Decoder;
use crate::display::{apply_effect, Surface};
use crate::error::ReplayError;
use crate::plotter::{Effect, PlotterState};
use log::{debug, info};
use std::fmt::Write as _;
use std::io;

/// what a finished replay got up to
#[derive(Debug, Clone, PartialEq)]
pub struct ReplaySummary {
    pub instructions: usize,
    pub lines: usize,
    pub bytes: usize,
    pub state: PlotterState,
}

pub struct Executor<'a> {
    surface: &'a mut dyn Surface,
    state: PlotterState,
}

impl<'a> Executor<'a> {
    pub fn new(surface: &'a mut dyn Surface) -> Executor<'a> {
        Executor {
            surface,
            state: PlotterState::new(),
        }
    }

    /// the plotter as of the last instruction applied
    pub fn state(&self) -> &PlotterState {
        &self.state
    }

    /// replay everything in `source`
    pub fn run(&mut self, source: impl io::Read) -> Result<ReplaySummary, ReplayError> {
        let mut decoder = Decoder::new(source);
        let mut instructions = 0;
        let mut lines = 0;
        info!("replay started");

        while let Some(instruction) = decoder.next_instruction()? {
            let (next, effects) = self.state.step(&instruction);
            self.state = next;
            instructions += 1;
            for effect in effects.iter() {
                if let Effect::Line { .. } = effect {
                    lines += 1;
                }
                apply_effect(self.surface, effect).map_err(ReplayError::Surface)?;
            }
        }

        debug!("end of stream at byte {}", decoder.position());
        let summary = ReplaySummary {
            instructions,
            lines,
            bytes: decoder.position(),
            state: self.state,
        };
        info!(
            "replayed {} instructions ({} bytes), drew {} lines",
            summary.instructions, summary.bytes, summary.lines
        );
        Ok(summary)
    }
}

// keeps a copy of every byte read, so the listing can show them
struct Captured<R> {
    inner: R,
    seen: Vec<u8>,
}

impl<R: io::Read> io::Read for Captured<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.seen.extend_from_slice(&buf[..n]);
        Ok(n)
    }
}

/// write one line per instruction to `out`: offset, raw bytes, mnemonic.
/// returns the number of instructions listed
pub fn list(source: impl io::Read, out: &mut dyn io::Write) -> Result<usize, ReplayError> {
    let mut decoder = Decoder::new(Captured {
        inner: source,
        seen: Vec::new(),
    });
    let mut count = 0;
    loop {
        let offset = decoder.position();
        let instruction = match decoder.next_instruction()? {
            Some(i) => i,
            None => break,
        };
        let mut raw = String::new();
        for b in decoder.get_mut().seen.drain(..) {
            // infallible for String
            let _ = write!(raw, "{:02x} ", b);
        }
        writeln!(out, "{:06x}  {:<15} {}", offset, raw.trim_end(), instruction)
            .map_err(ReplayError::Output)?;
        count += 1;
    }
    Ok(count)
}
