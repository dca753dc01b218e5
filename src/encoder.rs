/// Writing instructions back out in the byte format the decoder reads.
///
/// Moves and waits that fit in six bits get a single byte. Anything else goes
/// through the extended form with the narrowest operand that holds the value.
use crate::bits::{fits_signed, next_power_of_two, to_unsigned};
use crate::instruction::{ExtendedOpcode, Instruction, Opcode};

/// the extended form of an instruction with an explicit 2-bit length
/// selector. operand bits that don't fit the selected width are dropped.
pub fn encode_extended(op: ExtendedOpcode, operand: i32, selector: u8) -> Vec<u8> {
    let selector = selector & 0x03;
    let count = next_power_of_two(u32::from(selector)) as usize;
    let raw = to_unsigned(i64::from(operand), count as u32 * 8);
    let mut bytes = Vec::with_capacity(1 + count);
    bytes.push((Opcode::Extended as u8) << 6 | selector << 4 | op as u8);
    bytes.extend((0..count).rev().map(|i| (raw >> (i * 8)) as u8));
    bytes
}

/// the narrowest length selector whose operand width holds `operand`
pub fn selector_for(operand: i32) -> u8 {
    (0..=3u8)
        .find(|&s| fits_signed(i64::from(operand), next_power_of_two(u32::from(s)) * 8))
        .unwrap_or(3)
}

/// encode one instruction as compactly as the format allows
pub fn encode(instruction: &Instruction) -> Vec<u8> {
    match *instruction {
        Instruction::MoveX { delta } if fits_signed(i64::from(delta), 6) => {
            vec![(Opcode::MoveX as u8) << 6 | (delta as u8 & 0x3f)]
        }
        Instruction::MoveY { delta } if fits_signed(i64::from(delta), 6) => {
            vec![(Opcode::MoveY as u8) << 6 | (delta as u8 & 0x3f)]
        }
        Instruction::Wait { duration } if (0..=0x3f).contains(&duration) => {
            vec![(Opcode::Wait as u8) << 6 | duration as u8]
        }
        _ => {
            let op = instruction.extended_opcode();
            let operand = instruction.operand();
            encode_extended(op, operand, selector_for(operand))
        }
    }
}

/// encode a whole stream, in order
pub fn encode_all<'a>(instructions: impl IntoIterator<Item = &'a Instruction>) -> Vec<u8> {
    instructions.into_iter().flat_map(encode).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_short_forms() {
        assert_eq!(encode(&Instruction::MoveX { delta: 10 }), vec![0x0a]);
        assert_eq!(encode(&Instruction::MoveX { delta: -1 }), vec![0x3f]);
        assert_eq!(encode(&Instruction::MoveY { delta: -32 }), vec![0x60]);
        assert_eq!(encode(&Instruction::Wait { duration: 63 }), vec![0xbf]);
    }

    #[test]
    fn test_encode_operandless() {
        assert_eq!(encode(&Instruction::TogglePen), vec![0xc3]);
        assert_eq!(encode(&Instruction::Clear), vec![0xc4]);
        assert_eq!(encode(&Instruction::ShowAndWait), vec![0xc5]);
    }

    #[test]
    fn test_encode_widens() {
        // one operand byte
        assert_eq!(encode(&Instruction::MoveX { delta: 32 }), vec![0xd0, 0x20]);
        assert_eq!(encode(&Instruction::MoveY { delta: -50 }), vec![0xd1, 0xce]);
        // negative waits can't use the unsigned short form
        assert_eq!(encode(&Instruction::Wait { duration: -1 }), vec![0xd2, 0xff]);
        // two
        assert_eq!(
            encode(&Instruction::MoveX { delta: -140 }),
            vec![0xe0, 0xff, 0x74]
        );
        // four
        assert_eq!(
            encode(&Instruction::SetColour { value: 0x11223344 }),
            vec![0xf6, 0x11, 0x22, 0x33, 0x44]
        );
    }

    #[test]
    fn test_selector_for() {
        assert_eq!(selector_for(0), 0);
        assert_eq!(selector_for(127), 1);
        assert_eq!(selector_for(128), 2);
        assert_eq!(selector_for(-32768), 2);
        assert_eq!(selector_for(40_000), 3);
        assert_eq!(selector_for(i32::MIN), 3);
    }

    #[test]
    fn test_encode_extended_forced_width() {
        assert_eq!(
            encode_extended(ExtendedOpcode::MoveX, 1, 3),
            vec![0xf0, 0x00, 0x00, 0x00, 0x01]
        );
        assert_eq!(encode_extended(ExtendedOpcode::Clear, 0, 0), vec![0xc4]);
    }

    #[test]
    fn test_encode_all() {
        let prog = [
            Instruction::TogglePen,
            Instruction::MoveX { delta: 5 },
            Instruction::MoveY { delta: 3 },
        ];
        assert_eq!(encode_all(&prog), vec![0xc3, 0x05, 0x43]);
    }
}
