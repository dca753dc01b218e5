use crossterm::event::{poll, read, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal;
use log::{debug, warn};
use std::io;
use std::time::Duration;

/// waits for keypresses
pub trait Input {
    /// block until a key is pressed
    fn wait_for_key(&mut self) -> Result<(), io::Error>;
}

/// Input from the controlling terminal, via crossterm. The terminal is in raw
/// mode for as long as this exists, so ctrl-c arrives as a key; it's turned
/// into an `Interrupted` error rather than swallowed.
pub struct TermInput {
    _private: (),
}

impl TermInput {
    pub fn new() -> Result<Self, io::Error> {
        terminal::enable_raw_mode()?;
        Ok(TermInput { _private: () })
    }

    /// throw away anything typed before we started waiting
    fn flush(&mut self) -> Result<(), io::Error> {
        while poll(Duration::from_millis(0))? {
            let evt = read()?;
            if let Event::Key(key) = evt {
                check_interrupt(&key)?;
                debug!("dropping early key {:?}", key.code);
            }
        }
        Ok(())
    }
}

impl Drop for TermInput {
    fn drop(&mut self) {
        if let Err(e) = terminal::disable_raw_mode() {
            warn!("couldn't leave raw mode: {}", e);
        }
    }
}

impl Input for TermInput {
    fn wait_for_key(&mut self) -> Result<(), io::Error> {
        self.flush()?;
        loop {
            match read()? {
                Event::Key(key) => {
                    check_interrupt(&key)?;
                    debug!("key {:?}", key.code);
                    return Ok(());
                }
                // resizes are handled on the next redraw
                _ => continue,
            }
        }
    }
}

fn check_interrupt(key: &KeyEvent) -> Result<(), io::Error> {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            Err(io::Error::new(io::ErrorKind::Interrupted, "interrupted"))
        }
        _ => Ok(()),
    }
}

/// dummy Input implementation for testing; counts how often it was waited on
pub struct DummyInput {
    pub presses: usize,
}

impl DummyInput {
    pub fn new() -> Self {
        DummyInput { presses: 0 }
    }
}

impl Input for DummyInput {
    fn wait_for_key(&mut self) -> Result<(), io::Error> {
        self.presses += 1;
        Ok(())
    }
}
