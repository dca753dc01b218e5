///
/// ## Design
///
/// * replay pen-plotter sketch files: a stream of one-byte instructions,
///   with an escape into wider operands when six bits aren't enough
/// * keep decoding, pen state and drawing apart, so each can be tested on
///   its own
/// * abstract the drawing surface so can plug alternatives; starting with TUI
///   in-console
/// * the plotter doesn't draw; it says what should be drawn
///
/// Instruction byte, MSB first:
///
/// ```text
///  00 dddddd   move x by d (signed)
///  01 dddddd   move y by d (signed), drawing if the pen is down
///  10 tttttt   wait t (unsigned) x 10ms
///  11 LL EEEE  extended op E with a next_power_of_two(L)-byte
///              big-endian signed operand following:
///              0 dx, 1 dy, 2 wait, 3 pen, 4 clear, 5 key, 6 colour
/// ```
///
/// Model
///
/// main
///  |-- config, logger
///  |-- surface(input)
///  `-- executor(surface)
///       |-- decoder(bytes)                 bits, instruction
///       |    `-- next instruction, or end of stream, or error
///       |-- plotter.step(instruction)      -> (plotter, effects)
///       `-- surface: draw_line / pause / clear / set_colour / show_and_wait
pub mod bits;
pub mod config;
pub mod decoder;
pub mod display;
pub mod encoder;
pub mod error;
pub mod input;
pub mod instruction;
pub mod interpreter;
pub mod plotter;
