//! Packed bitstream form of a polyhash.
//!
//! Bits are written most significant first. Each entry of each block is
//! written in order:
//!
//! ```text
//! entry  := header [precision] char+
//! header := 1 on the first entry of a block, 0 otherwise
//! precision := 4 bits, present after a 1 header (16 is written as 0000)
//! char   := terminator (1 on the entry's last char) + 5-bit alphabet index
//! ```
//!
//! The stream is zero padded to a whole byte and rendered as standard base64.

use crate::cell::{ALPHABET, MAX_PRECISION, char_index};
use crate::compute::validation::validate_precision;
use crate::error::{Result, UnlError};
use base64::{Engine as _, engine::general_purpose};
use bytes::Bytes;
use smallvec::SmallVec;
use unl_types::PolyhashBlock;

use super::inflate;

const PRECISION_BITS: u32 = 4;
const INDEX_BITS: u32 = 5;
/// Terminator plus alphabet index
const CHAR_BITS: usize = 1 + INDEX_BITS as usize;

struct BitWriter {
    buf: Vec<u8>,
    len: usize,
}

impl BitWriter {
    fn with_capacity(bits: usize) -> Self {
        Self {
            buf: vec![0; bits.div_ceil(8)],
            len: 0,
        }
    }

    fn push(&mut self, bit: bool) {
        let byte = self.len / 8;
        if byte == self.buf.len() {
            self.buf.push(0);
        }
        if bit {
            self.buf[byte] |= 0x80 >> (self.len % 8);
        }
        self.len += 1;
    }

    fn push_bits(&mut self, value: u8, width: u32) {
        for shift in (0..width).rev() {
            self.push((value >> shift) & 1 == 1);
        }
    }

    fn into_bytes(mut self) -> Bytes {
        // trailing bits of the last byte are already zero
        self.buf.truncate(self.len.div_ceil(8));
        Bytes::from(self.buf)
    }
}

struct BitReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> BitReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn total(&self) -> usize {
        self.data.len() * 8
    }

    fn remaining(&self) -> usize {
        self.total().saturating_sub(self.pos)
    }

    /// Caller checks `remaining()` first.
    fn read_bit(&mut self) -> bool {
        let bit = self.data[self.pos / 8] & (0x80 >> (self.pos % 8)) != 0;
        self.pos += 1;
        bit
    }

    fn read_bits(&mut self, width: u32) -> u8 {
        (0..width).fold(0, |acc, _| (acc << 1) | self.read_bit() as u8)
    }
}

/// Exact bit count of the compressed form, before padding.
fn required_bits(blocks: &[PolyhashBlock]) -> usize {
    blocks
        .iter()
        .filter(|block| !block.is_empty())
        .map(|block| {
            let chars: usize = block.data.iter().map(String::len).sum();
            block.len() + PRECISION_BITS as usize + chars * CHAR_BITS
        })
        .sum()
}

/// Pack a polyhash into bytes.
///
/// Empty blocks are skipped since the header travels with an entry.
///
/// # Errors
///
/// `PrecisionOutOfRange` for a block precision outside `1..=16` and
/// `InvalidCellId` for an empty entry or a symbol outside the alphabet.
/// [`deflate`](super::deflate) writes an empty entry when an id is a proper
/// prefix of the one before it (`["dr", "d"]`), so such lists cannot be
/// compressed; sort them by length first as clusters are.
pub fn compress_to_bytes(blocks: &[PolyhashBlock]) -> Result<Bytes> {
    let mut writer = BitWriter::with_capacity(required_bits(blocks));

    for block in blocks.iter().filter(|block| !block.is_empty()) {
        validate_precision(block.precision)?;
        // 16 wraps to 0000; zero is never a valid precision on its own
        let header = (block.precision % 16) as u8;

        for (i, entry) in block.data.iter().enumerate() {
            if entry.is_empty() || entry.len() > MAX_PRECISION {
                return Err(UnlError::InvalidCellId(format!(
                    "Entry {:?} in block of precision {} must have 1..={} characters",
                    entry, block.precision, MAX_PRECISION
                )));
            }

            writer.push(i == 0);
            if i == 0 {
                writer.push_bits(header, PRECISION_BITS);
            }

            let last = entry.len() - 1;
            for (j, symbol) in entry.bytes().enumerate() {
                let index = char_index(symbol).ok_or_else(|| {
                    UnlError::InvalidCellId(format!(
                        "Entry {:?} contains invalid character {:?}",
                        entry, symbol as char
                    ))
                })?;
                writer.push(j == last);
                writer.push_bits(index, INDEX_BITS);
            }
        }
    }

    Ok(writer.into_bytes())
}

/// Pack a polyhash and render it as standard base64.
///
/// Fails like [`compress_to_bytes`], including on the empty entries
/// `deflate` produces for an id that prefixes its predecessor.
///
/// # Examples
///
/// ```rust
/// use unl_core::polyhash::{compress, deflate};
///
/// assert_eq!(compress(&deflate(&["d", "dr"]))?, "jZLc");
/// # Ok::<(), unl_core::UnlError>(())
/// ```
pub fn compress(blocks: &[PolyhashBlock]) -> Result<String> {
    let bytes = compress_to_bytes(blocks)?;
    Ok(general_purpose::STANDARD.encode(&bytes))
}

/// Unpack blocks from a bitstream without inflating them.
///
/// Reading stops one bit before the end of the data. An entry still open
/// when the data runs out is padding and is dropped.
pub fn decompress_blocks(data: &[u8]) -> Result<Vec<PolyhashBlock>> {
    let mut reader = BitReader::new(data);
    let mut blocks: Vec<PolyhashBlock> = Vec::new();
    let end = reader.total().saturating_sub(1);

    while reader.pos < end {
        if reader.read_bit() {
            if reader.remaining() < PRECISION_BITS as usize {
                return Err(UnlError::InvalidFormat(format!(
                    "Truncated block header at bit {}",
                    reader.pos
                )));
            }
            let precision = match reader.read_bits(PRECISION_BITS) as usize {
                0 => MAX_PRECISION,
                p => p,
            };
            blocks.push(PolyhashBlock::new(precision, Vec::new()));
        }

        let mut entry: SmallVec<[u8; MAX_PRECISION]> = SmallVec::new();
        let mut terminated = false;
        while reader.pos < end && reader.remaining() >= CHAR_BITS {
            let terminator = reader.read_bit();
            entry.push(ALPHABET[reader.read_bits(INDEX_BITS) as usize]);
            if entry.len() > MAX_PRECISION {
                return Err(UnlError::InvalidFormat(format!(
                    "Entry longer than {} characters ending at bit {}",
                    MAX_PRECISION, reader.pos
                )));
            }
            if terminator {
                terminated = true;
                break;
            }
        }

        if !terminated {
            log::trace!(
                "Dropping {} unterminated trailing bits",
                reader.remaining() + entry.len() * CHAR_BITS
            );
            break;
        }

        let block = blocks.last_mut().ok_or_else(|| {
            UnlError::InvalidFormat("Entry appears before any block header".to_string())
        })?;
        block.data.push(entry.iter().map(|&b| b as char).collect());
    }

    Ok(blocks)
}

/// Unpack and inflate a bitstream.
pub fn decompress_bytes(data: &[u8]) -> Result<Vec<String>> {
    inflate(&decompress_blocks(data)?)
}

/// Decode base64, unpack and inflate.
///
/// # Examples
///
/// ```rust
/// use unl_core::polyhash::decompress;
///
/// assert_eq!(decompress("jZLc")?, vec!["d", "dr"]);
/// # Ok::<(), unl_core::UnlError>(())
/// ```
pub fn decompress(text: &str) -> Result<Vec<String>> {
    let data = general_purpose::STANDARD
        .decode(text.trim())
        .map_err(|e| UnlError::InvalidFormat(format!("Invalid base64: {}", e)))?;
    decompress_bytes(&data)
}
