/// # plotter
///
/// The pen's state, and what each instruction does to it.
///
/// This is a reducer: `step` takes the state and one instruction and gives
/// back the next state plus the effects the surface should carry out. It
/// doesn't touch the surface itself.
///
/// Moves accumulate in `current`. Only a vertical move draws: if the pen is
/// down, a line goes from `last` to `current`, and `last` catches up with
/// `current` whether or not anything was drawn. A run of horizontal moves
/// therefore never draws on its own; it becomes part of the next diagonal.
use crate::instruction::Instruction;
use log::debug;

/// multiplier from file time units to surface time units (ms)
pub const WAIT_SCALE: i64 = 10;

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Cursor {
    pub x: i32,
    pub y: i32,
}

impl Cursor {
    pub fn new(x: i32, y: i32) -> Self {
        Cursor { x, y }
    }
}

/// Something the surface has to do.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Effect {
    Line { from: Cursor, to: Cursor },
    /// pause for this many surface time units
    Pause(i64),
    Clear,
    ShowAndWait,
    SetColour(i32),
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct PlotterState {
    /// where the last vertical move finished
    pub last: Cursor,
    /// where the pen is now
    pub current: Cursor,
    pub pen_down: bool,
}

impl PlotterState {
    /// pen up, at the origin
    pub fn new() -> Self {
        Self::default()
    }

    /// apply one instruction
    pub fn step(self, instruction: &Instruction) -> (PlotterState, Vec<Effect>) {
        let mut next = self;
        let mut effects = Vec::new();
        match *instruction {
            Instruction::MoveX { delta } => next.apply_move_x(delta),
            Instruction::MoveY { delta } => {
                effects.extend(next.apply_move_y(delta));
            }
            Instruction::Wait { duration } => effects.push(next.apply_wait(duration)),
            Instruction::TogglePen => next.apply_toggle_pen(),
            Instruction::Clear => effects.push(next.apply_clear()),
            Instruction::ShowAndWait => effects.push(next.apply_show_and_wait()),
            Instruction::SetColour { value } => effects.push(next.apply_set_colour(value)),
        }
        if !effects.is_empty() {
            debug!("{} -> {:?}", instruction, effects);
        }
        (next, effects)
    }

    pub fn apply_move_x(&mut self, delta: i32) {
        self.current.x = self.current.x.saturating_add(delta);
    }

    /// returns the line drawn, if the pen is down
    pub fn apply_move_y(&mut self, delta: i32) -> Option<Effect> {
        self.current.y = self.current.y.saturating_add(delta);
        let line = match self.pen_down {
            true => Some(Effect::Line {
                from: self.last,
                to: self.current,
            }),
            false => None,
        };
        self.last = self.current;
        line
    }

    pub fn apply_wait(&self, duration: i32) -> Effect {
        Effect::Pause(i64::from(duration) * WAIT_SCALE)
    }

    pub fn apply_toggle_pen(&mut self) {
        self.pen_down = !self.pen_down;
    }

    pub fn apply_clear(&self) -> Effect {
        Effect::Clear
    }

    pub fn apply_show_and_wait(&self) -> Effect {
        Effect::ShowAndWait
    }

    pub fn apply_set_colour(&self, value: i32) -> Effect {
        Effect::SetColour(value)
    }
}
