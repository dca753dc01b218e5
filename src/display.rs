use crate::input::Input;
use crate::plotter::{Cursor, Effect};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use log::{debug, warn};
use std::io;
use std::time::Duration;
use tui::backend::CrosstermBackend;
use tui::style::Color;
use tui::symbols::Marker;
use tui::widgets::canvas::{Canvas, Line};
use tui::widgets::{Block, Borders};
use tui::Terminal;

/// Surface is what the replay draws on. It should abstract the implementation
/// details, so a variety of kinds of screen would work.
pub trait Surface {
    /// draw a straight line between two points, y growing downward
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) -> Result<(), io::Error>;

    /// hold the picture for `units` milliseconds
    fn pause(&mut self, units: i64) -> Result<(), io::Error>;

    /// wipe everything drawn so far
    fn clear(&mut self) -> Result<(), io::Error>;

    /// colour for subsequent lines, as 0xRRGGBBAA
    fn set_colour(&mut self, value: i32) -> Result<(), io::Error>;

    /// show the picture and wait for a key
    fn show_and_wait(&mut self) -> Result<(), io::Error>;
}

/// carry out one effect from the plotter
pub fn apply_effect(surface: &mut dyn Surface, effect: &Effect) -> Result<(), io::Error> {
    match *effect {
        Effect::Line { from, to } => surface.draw_line(from.x, from.y, to.x, to.y),
        Effect::Pause(units) => surface.pause(units),
        Effect::Clear => surface.clear(),
        Effect::SetColour(value) => surface.set_colour(value),
        Effect::ShowAndWait => surface.show_and_wait(),
    }
}

/// split 0xRRGGBBAA into a terminal colour; alpha is ignored
pub fn colour_from_rgba(value: i32) -> Color {
    let v = value as u32;
    Color::Rgb((v >> 24) as u8, (v >> 16) as u8, (v >> 8) as u8)
}

// the drawing area in file coordinates
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Resolution(pub usize, pub usize);

impl Resolution {
    fn x_bounds(&self) -> [f64; 2] {
        [0.0, (self.0.max(1) - 1) as f64]
    }

    // tui's canvas has y going up, files have it going down
    fn y_bounds(&self) -> [f64; 2] {
        [-1.0 * (self.1.max(1) - 1) as f64, 0.0]
    }

    fn to_canvas(&self, x: i32, y: i32) -> (f64, f64) {
        (f64::from(x), -1.0 * f64::from(y))
    }
}

// a line in canvas coordinates
#[derive(Debug, Clone, PartialEq)]
struct Segment {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    colour: Color,
}

/// Line drawing in a terminal, rendered using TUI and crossterm. Lines pile up
/// until something needs the picture on screen: a pause, a key wait or a clear.
pub struct TermSurface<I: Input> {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    resolution: Resolution,
    segments: Vec<Segment>,
    colour: Color,
    input: I,
}

impl<I: Input> TermSurface<I> {
    pub fn new(width: usize, height: usize, input: I) -> Result<TermSurface<I>, io::Error> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.hide_cursor()?;
        terminal.clear()?;
        Ok(TermSurface {
            terminal,
            resolution: Resolution(width, height),
            segments: Vec::new(),
            colour: Color::White,
            input,
        })
    }

    /// put the lines drawn so far on screen
    pub fn render(&mut self) -> Result<(), io::Error> {
        let resolution = self.resolution;
        let segments = &self.segments;
        self.terminal.draw(|f| {
            let canvas = Canvas::default()
                .block(Block::default().title("sketch").borders(Borders::ALL))
                .x_bounds(resolution.x_bounds())
                .y_bounds(resolution.y_bounds())
                .marker(Marker::Braille)
                .paint(|ctx| {
                    for s in segments {
                        ctx.draw(&Line {
                            x1: s.x1,
                            y1: s.y1,
                            x2: s.x2,
                            y2: s.y2,
                            color: s.colour,
                        });
                    }
                });
            f.render_widget(canvas, f.size());
        })?;
        Ok(())
    }
}

impl<I: Input> Drop for TermSurface<I> {
    fn drop(&mut self) {
        if let Err(e) = self.terminal.show_cursor() {
            warn!("couldn't restore cursor: {}", e);
        }
        if let Err(e) = execute!(self.terminal.backend_mut(), LeaveAlternateScreen) {
            warn!("couldn't leave alternate screen: {}", e);
        }
    }
}

impl<I: Input> Surface for TermSurface<I> {
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) -> Result<(), io::Error> {
        let (cx1, cy1) = self.resolution.to_canvas(x0, y0);
        let (cx2, cy2) = self.resolution.to_canvas(x1, y1);
        self.segments.push(Segment {
            x1: cx1,
            y1: cy1,
            x2: cx2,
            y2: cy2,
            colour: self.colour,
        });
        Ok(())
    }

    fn pause(&mut self, units: i64) -> Result<(), io::Error> {
        self.render()?;
        if units < 0 {
            warn!("ignoring negative pause of {}", units);
            return Ok(());
        }
        spin_sleep::sleep(Duration::from_millis(units as u64));
        Ok(())
    }

    fn clear(&mut self) -> Result<(), io::Error> {
        self.segments.clear();
        self.render()
    }

    fn set_colour(&mut self, value: i32) -> Result<(), io::Error> {
        self.colour = colour_from_rgba(value);
        debug!("colour now {:?}", self.colour);
        Ok(())
    }

    fn show_and_wait(&mut self) -> Result<(), io::Error> {
        self.render()?;
        self.input.wait_for_key()
    }
}

/// useful for testing the replay; writes down everything it's asked to do
pub struct RecordingSurface {
    pub effects: Vec<Effect>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        RecordingSurface {
            effects: Vec::new(),
        }
    }

    /// just the lines, in order
    pub fn lines(&self) -> Vec<(Cursor, Cursor)> {
        self.effects
            .iter()
            .filter_map(|e| match *e {
                Effect::Line { from, to } => Some((from, to)),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) -> Result<(), io::Error> {
        self.effects.push(Effect::Line {
            from: Cursor::new(x0, y0),
            to: Cursor::new(x1, y1),
        });
        Ok(())
    }

    fn pause(&mut self, units: i64) -> Result<(), io::Error> {
        self.effects.push(Effect::Pause(units));
        Ok(())
    }

    fn clear(&mut self) -> Result<(), io::Error> {
        self.effects.push(Effect::Clear);
        Ok(())
    }

    fn set_colour(&mut self, value: i32) -> Result<(), io::Error> {
        self.effects.push(Effect::SetColour(value));
        Ok(())
    }

    fn show_and_wait(&mut self) -> Result<(), io::Error> {
        self.effects.push(Effect::ShowAndWait);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::DummyInput;

    // Resolution tests
    #[test]
    fn test_x_bounds() {
        let r = Resolution(640, 480);
        assert_eq!(r.x_bounds(), [0.0, 639.0]);
    }

    #[test]
    fn test_y_bounds() {
        let r = Resolution(640, 480);
        assert_eq!(r.y_bounds(), [-479.0, 0.0]);
    }

    #[test]
    fn test_degenerate_bounds() {
        let r = Resolution(0, 0);
        assert_eq!(r.x_bounds(), [0.0, 0.0]);
        assert_eq!(r.y_bounds(), [-0.0, 0.0]);
    }

    #[test]
    fn test_to_canvas_flips_y() {
        let r = Resolution(640, 480);
        assert_eq!(r.to_canvas(5, 3), (5.0, -3.0));
    }

    #[test]
    fn test_colour_from_rgba() {
        assert_eq!(colour_from_rgba(0x336699ff), Color::Rgb(0x33, 0x66, 0x99));
        assert_eq!(colour_from_rgba(-1), Color::Rgb(0xff, 0xff, 0xff));
        assert_eq!(colour_from_rgba(0), Color::Rgb(0, 0, 0));
    }

    // RecordingSurface tests
    #[test]
    fn test_apply_effect_records() -> Result<(), io::Error> {
        let mut s = RecordingSurface::new();
        let effects = [
            Effect::Line {
                from: Cursor::new(0, 0),
                to: Cursor::new(5, 3),
            },
            Effect::Pause(630),
            Effect::Clear,
            Effect::SetColour(7),
            Effect::ShowAndWait,
        ];
        for e in effects.iter() {
            apply_effect(&mut s, e)?;
        }
        assert_eq!(s.effects, effects.to_vec());
        assert_eq!(s.lines(), vec![(Cursor::new(0, 0), Cursor::new(5, 3))]);
        Ok(())
    }

    // TermSurface tests
    #[test]
    #[ignore]
    // NB. needs a real terminal
    fn test_term_surface_draws() -> Result<(), io::Error> {
        let mut s = TermSurface::new(640, 480, DummyInput::new())?;
        s.draw_line(0, 0, 639, 479)?;
        s.show_and_wait()?;
        assert_eq!(s.input.presses, 1);
        s.clear()?;
        assert!(s.segments.is_empty());
        Ok(())
    }
}
