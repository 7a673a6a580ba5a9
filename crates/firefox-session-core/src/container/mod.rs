//! mozLz4 container decoding
//!
//! Firefox stores session data as `mozLz40\0` followed by an LZ4 block whose
//! first four bytes are the little-endian decompressed length. There is no
//! frame header and no checksum.
//!
//! ```text
//! +----------------+-------------------+---------------------------+
//! | magic (8)      | length (u32 LE)   | LZ4 block stream          |
//! | "mozLz40\0"    | decompressed size | exactly `length` bytes out |
//! +----------------+-------------------+---------------------------+
//! ```

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use crate::error::{Error, Result};

/// Container magic: ASCII `mozLz40` followed by a NUL byte
pub const MAGIC: &[u8; 8] = b"mozLz40\0";

/// Size of the little-endian length prefix in front of the block stream
const SIZE_PREFIX_LEN: usize = 4;

/// Decode a whole container held in memory.
///
/// Returns the raw decompressed bytes. Turning them into text and JSON is
/// left to [`crate::session`].
pub fn decode(bytes: &[u8]) -> Result<Vec<u8>> {
    let payload = strip_magic(bytes)?;
    decompress_payload(payload)
}

/// Open `path`, validate its magic and decompress the rest.
///
/// The file handle is dropped on every exit path, including decode
/// failures. Only the magic is read before validation so that a foreign file
/// is rejected without reading it in full.
pub fn read_file(path: &Path) -> Result<Vec<u8>> {
    let io_err = |source| Error::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).map_err(io_err)?;

    let mut header = [0u8; 8];
    match file.read_exact(&mut header) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
            return Err(Error::container_format("file is shorter than the magic"));
        }
        Err(e) => return Err(io_err(e)),
    }
    check_magic(&header)?;

    let mut payload = Vec::new();
    file.read_to_end(&mut payload).map_err(io_err)?;
    decompress_payload(&payload)
}

/// Wrap `data` in a container.
///
/// Produces the exact layout [`decode`] accepts. Used to build fixtures.
pub fn encode(data: &[u8]) -> Vec<u8> {
    let block = lz4_flex::block::compress(data);
    let mut out = Vec::with_capacity(MAGIC.len() + SIZE_PREFIX_LEN + block.len());
    out.extend_from_slice(MAGIC);
    // Session documents never approach 4 GiB; the format cannot express more.
    out.extend_from_slice(&(data.len() as u32).to_le_bytes());
    out.extend_from_slice(&block);
    out
}

fn strip_magic(bytes: &[u8]) -> Result<&[u8]> {
    let Some((header, payload)) = bytes.split_first_chunk::<8>() else {
        return Err(Error::container_format("file is shorter than the magic"));
    };
    check_magic(header)?;
    Ok(payload)
}

fn check_magic(header: &[u8; 8]) -> Result<()> {
    if header != MAGIC {
        return Err(Error::container_format(format!(
            "expected magic {:02x?}, found {:02x?}",
            MAGIC, header
        )));
    }
    Ok(())
}

/// Decompress the size-prefixed block that follows the magic
fn decompress_payload(payload: &[u8]) -> Result<Vec<u8>> {
    let Some((prefix, block)) = payload.split_first_chunk::<SIZE_PREFIX_LEN>() else {
        return Err(Error::decompression(format!(
            "payload is {} bytes, too short for the size prefix",
            payload.len()
        )));
    };
    let expected = u32::from_le_bytes(*prefix) as usize;

    // LZ4 cannot expand a block by more than ~255x; anything beyond that is
    // a corrupt or forged prefix and must not drive the allocation.
    let max_plausible = block.len().saturating_mul(255).saturating_add(16);
    if expected > max_plausible {
        return Err(Error::decompression(format!(
            "declared size {} is impossible for a {}-byte block",
            expected,
            block.len()
        )));
    }

    let mut out = vec![0u8; expected];
    let written = lz4_flex::block::decompress_into(block, &mut out)
        .map_err(|e| Error::decompression(e.to_string()))?;
    if written != expected {
        return Err(Error::decompression(format!(
            "declared size {} but block decompressed to {} bytes",
            expected, written
        )));
    }
    Ok(out)
}
