/// # bits
///
/// Field extraction for the one-byte instruction format, and the two's
/// complement arithmetic used to widen extended operands.
///
/// ```text
///   7 6 5 4 3 2 1 0
///  [op ][ immediate ]     op 00/01/10: 6-bit operand
///  [1 1][len][ ext  ]     op 11: 2-bit length selector, 4-bit sub-opcode
/// ```
use std::io;

/// top two bits of an instruction byte
pub fn opcode(byte: u8) -> u8 {
    byte >> 6
}

/// the n-th bit of a byte, where 0 is the least significant
pub fn bit(byte: u8, n: u8) -> u8 {
    (byte >> n) & 1
}

/// low six bits as a two's complement number in -32..=31
pub fn signed6(byte: u8) -> i8 {
    to_signed(u64::from(byte & 0x3f), 6) as i8
}

/// 0 for 0, otherwise the smallest power of two >= n
///
/// NB. the decoder feeds a 2-bit length selector through this, so the
///     operand byte counts are 0, 1, 2 and 4. eight bytes can't be selected.
pub fn next_power_of_two(n: u32) -> u32 {
    match n {
        0 => 0,
        _ => n.next_power_of_two(),
    }
}

/// fold bytes into an unsigned integer, most significant first
pub fn from_big_endian(bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .fold(0u64, |acc, &b| (acc << 8) | u64::from(b))
}

/// read n bytes, most significant first. zero bytes reads nothing and yields
/// 0; running out of input is an `UnexpectedEof`
pub fn read_big_endian<R: io::Read + ?Sized>(source: &mut R, n: usize) -> io::Result<u64> {
    let mut buf = [0u8; 8];
    if n > buf.len() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("can't read {} bytes into a 64-bit integer", n),
        ));
    }
    source.read_exact(&mut buf[..n])?;
    Ok(from_big_endian(&buf[..n]))
}

/// interpret the low `bit_length` bits of `value` as two's complement
///
/// if the sign bit is clear the value is returned untouched; otherwise the
/// sign bit contributes -2^(bit_length - 1) and the bits beneath it are added
/// back on. a zero-width field is 0.
pub fn to_signed(value: u64, bit_length: u32) -> i64 {
    debug_assert!(bit_length <= 64, "no room for a {}-bit field", bit_length);
    if bit_length == 0 {
        return 0;
    }
    let sign_bit = bit_length - 1;
    if (value >> sign_bit) & 1 == 0 {
        return value as i64;
    }
    let mask = (1u64 << sign_bit) - 1;
    // arithmetic shift smears the sign: i64::MIN >> 56 == -128 etc.
    let negative_weight = i64::MIN >> (63 - sign_bit);
    negative_weight + (value & mask) as i64
}

/// whether `value` can be written as a `bit_length`-bit two's complement field
pub fn fits_signed(value: i64, bit_length: u32) -> bool {
    match bit_length {
        0 => value == 0,
        b if b >= 64 => true,
        _ => {
            let half = 1i64 << (bit_length - 1);
            (-half..half).contains(&value)
        }
    }
}

/// the low `bit_length` bits of `value`, ready to be written big-endian
pub fn to_unsigned(value: i64, bit_length: u32) -> u64 {
    match bit_length {
        0 => 0,
        b if b >= 64 => value as u64,
        _ => (value as u64) & ((1u64 << bit_length) - 1),
    }
}
