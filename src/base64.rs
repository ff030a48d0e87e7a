//! Standard base64 (RFC 4648 §4, `+` and `/`, `=` padding).
//!
//! Encoding always pads. Decoding is strict about everything except ASCII
//! whitespace, which is skipped so that line-wrapped text decodes:
//! - any other character outside `[A-Za-z0-9+/=]` is rejected
//! - at most two `=` are accepted, and only at the very end
//! - the significant length must be a multiple of 4

use crate::error::Base64Error;

/// Standard base64 alphabet.
pub const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Padding character.
pub const PAD: u8 = b'=';

const INVALID: u8 = 0xff;

/// Reverse lookup: byte value -> 6-bit index, `INVALID` for non-alphabet bytes.
static DECODE_TABLE: [u8; 256] = build_decode_table();

const fn build_decode_table() -> [u8; 256] {
    let mut table = [INVALID; 256];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
}

#[inline]
fn symbol(index: u32) -> char {
    ALPHABET[(index & 0x3f) as usize] as char
}

/// Length of the padded encoding of `n` bytes.
pub fn encoded_len(n: usize) -> usize {
    n.div_ceil(3) * 4
}

/// Encode bytes as padded standard base64.
pub fn encode(data: &[u8]) -> String {
    let mut out = String::with_capacity(encoded_len(data.len()));

    let mut chunks = data.chunks_exact(3);
    for chunk in &mut chunks {
        let n = (chunk[0] as u32) << 16 | (chunk[1] as u32) << 8 | chunk[2] as u32;
        out.push(symbol(n >> 18));
        out.push(symbol(n >> 12));
        out.push(symbol(n >> 6));
        out.push(symbol(n));
    }

    match *chunks.remainder() {
        [a] => {
            let n = (a as u32) << 16;
            out.push(symbol(n >> 18));
            out.push(symbol(n >> 12));
            out.push(PAD as char);
            out.push(PAD as char);
        }
        [a, b] => {
            let n = (a as u32) << 16 | (b as u32) << 8;
            out.push(symbol(n >> 18));
            out.push(symbol(n >> 12));
            out.push(symbol(n >> 6));
            out.push(PAD as char);
        }
        _ => {}
    }

    out
}

/// Decode padded standard base64.
///
/// The returned buffer is exactly as long as the encoded payload; trailing
/// padding never produces filler bytes.
pub fn decode(text: &str) -> Result<Vec<u8>, Base64Error> {
    let mut symbols = Vec::with_capacity(text.len());
    for (position, ch) in text.char_indices() {
        match ch {
            c if c.is_ascii_whitespace() => {}
            c if c.is_ascii() && (c as u8 == PAD || DECODE_TABLE[c as usize] != INVALID) => {
                symbols.push(c as u8)
            }
            _ => return Err(Base64Error::InvalidCharacter { ch, position }),
        }
    }

    if symbols.is_empty() {
        return Ok(Vec::new());
    }
    if symbols.len() % 4 != 0 {
        return Err(Base64Error::MalformedInput {
            len: symbols.len(),
        });
    }

    let mut padding = 0;
    while padding < 2 && symbols[symbols.len() - 1 - padding] == PAD {
        padding += 1;
    }
    let data = &symbols[..symbols.len() - padding];
    if data.contains(&PAD) {
        return Err(Base64Error::InvalidPadding);
    }

    let mut out = Vec::with_capacity(data.len() * 3 / 4);
    // With at most two pad characters every quartet keeps two or more data symbols.
    for quad in data.chunks(4) {
        let c0 = DECODE_TABLE[quad[0] as usize];
        let c1 = DECODE_TABLE[quad[1] as usize];
        out.push(c0 << 2 | c1 >> 4);

        if let Some(&s2) = quad.get(2) {
            let c2 = DECODE_TABLE[s2 as usize];
            out.push((c1 & 0x0f) << 4 | c2 >> 2);

            if let Some(&s3) = quad.get(3) {
                let c3 = DECODE_TABLE[s3 as usize];
                out.push((c2 & 0x03) << 6 | c3);
            }
        }
    }

    Ok(out)
}
