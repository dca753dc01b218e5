/// # decoder
///
/// Turns a byte stream into instructions, one opcode byte at a time. For the
/// extended opcode the rest of the byte selects an operand width and a
/// sub-opcode, and the operand follows big-endian:
///
/// ```text
///  11 LL EEEE  [operand: next_power_of_two(LL) bytes]
/// ```
///
/// Running out of bytes where an opcode byte is expected ends the stream
/// normally. Running out inside an operand is an error.
use crate::bits::{next_power_of_two, read_big_endian, signed6, to_signed};
use crate::error::DecodeError;
use crate::instruction::{ExtendedOpcode, Instruction, Opcode};
use log::{debug, trace};
use std::io;
use std::iter::FusedIterator;

pub struct Decoder<R> {
    source: R,
    /// offset of the next unread byte
    offset: usize,
    /// set by the first error; nothing more is decoded after that
    failed: bool,
}

impl<R: io::Read> Decoder<R> {
    pub fn new(source: R) -> Self {
        Decoder {
            source,
            offset: 0,
            failed: false,
        }
    }

    /// how many bytes have been consumed so far
    pub fn position(&self) -> usize {
        self.offset
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.source
    }

    /// give the byte source back, positioned after the last byte consumed
    pub fn into_inner(self) -> R {
        self.source
    }

    /// decode the next instruction; `None` once the stream is exhausted or
    /// after an error has been returned
    pub fn next_instruction(&mut self) -> Result<Option<Instruction>, DecodeError> {
        if self.failed {
            return Ok(None);
        }
        let result = self.decode_one();
        if result.is_err() {
            self.failed = true;
        }
        result
    }

    fn decode_one(&mut self) -> Result<Option<Instruction>, DecodeError> {
        let start = self.offset;
        let byte = match self.read_opcode_byte()? {
            Some(b) => b,
            None => return Ok(None),
        };
        trace!("byte 0x{:02x} at {}", byte, start);

        let instruction = match Opcode::from_byte(byte) {
            Opcode::MoveX => Instruction::MoveX {
                delta: i32::from(signed6(byte)),
            },
            Opcode::MoveY => Instruction::MoveY {
                delta: i32::from(signed6(byte)),
            },
            Opcode::Wait => Instruction::Wait {
                duration: i32::from(byte & 0x3f),
            },
            Opcode::Extended => self.decode_extended(byte, start)?,
        };
        trace!("decoded {} at {}", instruction, start);
        Ok(Some(instruction))
    }

    fn decode_extended(&mut self, byte: u8, start: usize) -> Result<Instruction, DecodeError> {
        let selector = (byte & 0x30) >> 4;
        let count = next_power_of_two(u32::from(selector)) as usize;
        let op = ExtendedOpcode::try_from(byte & 0x0f).map_err(|opcode| {
            DecodeError::UnrecognizedExtendedOpcode {
                offset: start,
                opcode,
            }
        })?;

        let raw = read_big_endian(&mut self.source, count).map_err(|e| {
            match e.kind() {
                io::ErrorKind::UnexpectedEof => DecodeError::TruncatedStream {
                    offset: start,
                    needed: count,
                },
                _ => DecodeError::Io {
                    offset: start,
                    source: e,
                },
            }
        })?;
        self.offset += count;
        if count > 0 && !op.takes_operand() {
            debug!("{:?} at {} ignores its {}-byte operand", op, start, count);
        }

        // at most four operand bytes, so the widened value always fits
        let operand = to_signed(raw, count as u32 * 8) as i32;
        trace!(
            "extended {:?}, {} operand bytes, raw 0x{:x} -> {}",
            op,
            count,
            raw,
            operand
        );
        Ok(Instruction::from_extended(op, operand))
    }

    fn read_opcode_byte(&mut self) -> Result<Option<u8>, DecodeError> {
        let mut buf = [0u8; 1];
        loop {
            match self.source.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => {
                    self.offset += 1;
                    return Ok(Some(buf[0]));
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    return Err(DecodeError::Io {
                        offset: self.offset,
                        source: e,
                    })
                }
            }
        }
    }
}

impl<R: io::Read> Iterator for Decoder<R> {
    type Item = Result<Instruction, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_instruction().transpose()
    }
}

impl<R: io::Read> FusedIterator for Decoder<R> {}

/// decode a complete buffer
pub fn decode_all(bytes: &[u8]) -> Result<Vec<Instruction>, DecodeError> {
    Decoder::new(bytes).collect()
}
