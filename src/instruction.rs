/// The instruction set: base opcodes, extended opcodes and decoded
/// instructions.
use std::fmt;

/// The 2-bit opcode in the top of every instruction byte.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Opcode {
    /// `00`: move pen horizontally by a 6-bit signed delta
    MoveX = 0,
    /// `01`: move pen vertically by a 6-bit signed delta
    MoveY = 1,
    /// `10`: pause for a 6-bit unsigned duration
    Wait = 2,
    /// `11`: escape into the extended instruction set
    Extended = 3,
}

impl Opcode {
    /// classify an instruction byte by its top two bits
    pub fn from_byte(byte: u8) -> Opcode {
        match crate::bits::opcode(byte) {
            0 => Opcode::MoveX,
            1 => Opcode::MoveY,
            2 => Opcode::Wait,
            _ => Opcode::Extended,
        }
    }
}

/// The 4-bit sub-opcode of an extended instruction.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ExtendedOpcode {
    MoveX = 0,
    MoveY = 1,
    Wait = 2,
    TogglePen = 3,
    Clear = 4,
    /// show the picture so far and wait for a key
    ShowAndWait = 5,
    SetColour = 6,
}

impl TryFrom<u8> for ExtendedOpcode {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ExtendedOpcode::MoveX),
            1 => Ok(ExtendedOpcode::MoveY),
            2 => Ok(ExtendedOpcode::Wait),
            3 => Ok(ExtendedOpcode::TogglePen),
            4 => Ok(ExtendedOpcode::Clear),
            5 => Ok(ExtendedOpcode::ShowAndWait),
            6 => Ok(ExtendedOpcode::SetColour),
            _ => Err(value),
        }
    }
}

impl ExtendedOpcode {
    /// whether the instruction does anything with its operand
    pub fn takes_operand(self) -> bool {
        matches!(
            self,
            ExtendedOpcode::MoveX
                | ExtendedOpcode::MoveY
                | ExtendedOpcode::Wait
                | ExtendedOpcode::SetColour
        )
    }
}

/// A decoded instruction. Operands have already been widened from whatever
/// width they had on the wire.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// Move the cursor horizontally by `delta`
    MoveX { delta: i32 },
    /// Move the cursor vertically by `delta`, drawing if the pen is down
    MoveY { delta: i32 },
    /// Pause for `duration` file time units
    Wait { duration: i32 },
    /// Lift or lower the pen
    TogglePen,
    /// Wipe the surface
    Clear,
    /// Show the surface and wait for a key
    ShowAndWait,
    /// Set the drawing colour to `value` (0xRRGGBBAA)
    SetColour { value: i32 },
}

impl Instruction {
    /// the extended sub-opcode this instruction is written with when it
    /// doesn't fit a single byte
    pub fn extended_opcode(&self) -> ExtendedOpcode {
        match self {
            Instruction::MoveX { .. } => ExtendedOpcode::MoveX,
            Instruction::MoveY { .. } => ExtendedOpcode::MoveY,
            Instruction::Wait { .. } => ExtendedOpcode::Wait,
            Instruction::TogglePen => ExtendedOpcode::TogglePen,
            Instruction::Clear => ExtendedOpcode::Clear,
            Instruction::ShowAndWait => ExtendedOpcode::ShowAndWait,
            Instruction::SetColour { .. } => ExtendedOpcode::SetColour,
        }
    }

    /// operand value; operand-less instructions report 0
    pub fn operand(&self) -> i32 {
        match *self {
            Instruction::MoveX { delta } | Instruction::MoveY { delta } => delta,
            Instruction::Wait { duration } => duration,
            Instruction::SetColour { value } => value,
            Instruction::TogglePen | Instruction::Clear | Instruction::ShowAndWait => 0,
        }
    }

    /// build an instruction from an extended opcode and its widened operand
    pub fn from_extended(op: ExtendedOpcode, operand: i32) -> Instruction {
        match op {
            ExtendedOpcode::MoveX => Instruction::MoveX { delta: operand },
            ExtendedOpcode::MoveY => Instruction::MoveY { delta: operand },
            ExtendedOpcode::Wait => Instruction::Wait { duration: operand },
            ExtendedOpcode::TogglePen => Instruction::TogglePen,
            ExtendedOpcode::Clear => Instruction::Clear,
            ExtendedOpcode::ShowAndWait => Instruction::ShowAndWait,
            ExtendedOpcode::SetColour => Instruction::SetColour { value: operand },
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::MoveX { delta } => write!(f, "DX {}", delta),
            Instruction::MoveY { delta } => write!(f, "DY {}", delta),
            Instruction::Wait { duration } => write!(f, "DT {}", duration),
            Instruction::TogglePen => write!(f, "PEN"),
            Instruction::Clear => write!(f, "CLEAR"),
            Instruction::ShowAndWait => write!(f, "KEY"),
            Instruction::SetColour { value } => write!(f, "COL 0x{:08x}", value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opcode_from_byte() {
        assert_eq!(Opcode::from_byte(0x0a), Opcode::MoveX);
        assert_eq!(Opcode::from_byte(0x40), Opcode::MoveY);
        assert_eq!(Opcode::from_byte(0x80), Opcode::Wait);
        assert_eq!(Opcode::from_byte(0xc3), Opcode::Extended);
    }

    #[test]
    fn test_opcode_wire_values() {
        for b in 0..=255u8 {
            assert_eq!(Opcode::from_byte(b) as u8, b >> 6);
        }
    }

    #[test]
    fn test_extended_opcode_try_from() {
        for v in 0..=6u8 {
            let op = ExtendedOpcode::try_from(v).unwrap();
            assert_eq!(op as u8, v);
        }
        for v in 7..=15u8 {
            assert_eq!(ExtendedOpcode::try_from(v), Err(v));
        }
    }

    #[test]
    fn test_from_extended_drops_unused_operand() {
        assert_eq!(
            Instruction::from_extended(ExtendedOpcode::TogglePen, 99),
            Instruction::TogglePen
        );
        assert_eq!(
            Instruction::from_extended(ExtendedOpcode::SetColour, -1),
            Instruction::SetColour { value: -1 }
        );
    }

    #[test]
    fn test_extended_opcode_matches_instruction() {
        let all = [
            Instruction::MoveX { delta: 1 },
            Instruction::MoveY { delta: 2 },
            Instruction::Wait { duration: 3 },
            Instruction::TogglePen,
            Instruction::Clear,
            Instruction::ShowAndWait,
            Instruction::SetColour { value: 4 },
        ];
        for i in all {
            assert_eq!(
                Instruction::from_extended(i.extended_opcode(), i.operand()),
                i
            );
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Instruction::MoveX { delta: -3 }.to_string(), "DX -3");
        assert_eq!(Instruction::Wait { duration: 63 }.to_string(), "DT 63");
        assert_eq!(
            Instruction::SetColour { value: 0x00ff00ff }.to_string(),
            "COL 0x00ff00ff"
        );
        assert_eq!(Instruction::ShowAndWait.to_string(), "KEY");
    }
}
