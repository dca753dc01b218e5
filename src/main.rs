use anyhow::{Context, Result};
use simple_logger::SimpleLogger;
use std::fs::File;
use std::io;
use std::io::BufReader;

use sketch::config::{Config, Mode};
use sketch::display::{Surface, TermSurface};
use sketch::input::TermInput;
use sketch::interpreter::{list, Executor};

fn main() -> Result<()> {
    let config = Config::from_args(std::env::args().skip(1))?;
    // stderr, not stdout: the canvas owns stdout during a replay
    SimpleLogger::new()
        .with_level(config.log_level)
        .init()
        .context("couldn't start logging")?;

    let f = File::open(&config.path)
        .with_context(|| format!("couldn't open {}", config.path.display()))?;
    let reader = BufReader::new(f);

    match config.mode {
        Mode::Dump => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            let n = list(reader, &mut out)
                .with_context(|| format!("couldn't list {}", config.path.display()))?;
            log::info!("listed {} instructions", n);
        }
        Mode::Replay => {
            let input = TermInput::new().context("couldn't set up the terminal")?;
            let mut surface = TermSurface::new(config.width, config.height, input)
                .context("couldn't set up the terminal")?;
            Executor::new(&mut surface)
                .run(reader)
                .with_context(|| format!("couldn't replay {}", config.path.display()))?;
            // the last frame stays up until a key is pressed
            if config.wait_at_end {
                surface.show_and_wait()?;
            } else {
                surface.render()?;
            }
        }
    }
    Ok(())
}
