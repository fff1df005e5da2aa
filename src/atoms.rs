//! Low-level MP4 atom/box writing primitives.
//!
//! MP4 files are structured as nested boxes (atoms). Each box has:
//! - 4-byte big-endian size (includes header)
//! - 4-byte ASCII type (e.g. "ftyp", "moov", "mdat")
//!
//! "Full boxes" additionally have a 1-byte version and 3-byte flags.
//!
//! Two quantities cannot be known while streaming: the size of a container
//! box before its children are written, and the mdat payload size before
//! the stream ends. Both use the same idiom: write a placeholder, remember
//! the offset, seek back and patch once the value is known.

use byteorder::{BigEndian, WriteBytesExt};
use std::io::{Seek, SeekFrom, Write};

use crate::error::{MuxError, MuxResult};

/// Size of a standard box header (4-byte size + 4-byte type).
pub const BOX_HEADER_LEN: u64 = 8;

/// Write a standard box header: 4-byte size + 4-byte type.
///
/// `size` is the total box size including the 8-byte header. A size of 0
/// is the open-ended placeholder form patched later.
pub fn write_box_header<W: Write>(writer: &mut W, box_type: &[u8; 4], size: u32) -> MuxResult<()> {
    writer.write_u32::<BigEndian>(size)?;
    writer.write_all(box_type)?;
    Ok(())
}

/// Write a "full box" header: standard header + 1-byte version + 3-byte flags.
pub fn write_full_box_header<W: Write>(
    writer: &mut W,
    box_type: &[u8; 4],
    size: u32,
    version: u8,
    flags: u32,
) -> MuxResult<()> {
    writer.write_u32::<BigEndian>(size)?;
    writer.write_all(box_type)?;
    let version_flags = ((version as u32) << 24) | (flags & 0x00FF_FFFF);
    writer.write_u32::<BigEndian>(version_flags)?;
    Ok(())
}

/// Write a box size placeholder (4 bytes of zeros) and return the stream
/// position where the size should be patched later.
///
/// Usage pattern:
/// ```ignore
/// let pos = box_size_placeholder(&mut writer)?;
/// writer.write_all(b"moov")?;
/// // ... write box content ...
/// fill_box_size(&mut writer, pos)?;
/// ```
pub fn box_size_placeholder<W: Write + Seek>(writer: &mut W) -> MuxResult<u64> {
    let pos = writer.stream_position()?;
    writer.write_u32::<BigEndian>(0)?; // placeholder
    Ok(pos)
}

/// Patch the box size at the given position with the actual size
/// (from `size_pos` to the current position), then restore the cursor.
pub fn fill_box_size<W: Write + Seek>(writer: &mut W, size_pos: u64) -> MuxResult<()> {
    let current = writer.stream_position()?;
    let size = current - size_pos;
    if size > u32::MAX as u64 {
        return Err(MuxError::BoxTooLarge(size));
    }
    writer.seek(SeekFrom::Start(size_pos))?;
    writer.write_u32::<BigEndian>(size as u32)?;
    writer.seek(SeekFrom::Start(current))?;
    Ok(())
}

/// Overwrite 4 bytes at an absolute offset with a big-endian value.
///
/// Leaves the cursor after the patched field; callers doing a batch of
/// patches seek back to the end themselves when done.
pub fn patch_u32<W: Write + Seek>(writer: &mut W, pos: u64, value: u32) -> MuxResult<()> {
    writer.seek(SeekFrom::Start(pos))?;
    writer.write_u32::<BigEndian>(value)?;
    Ok(())
}

/// Write a fixed-point 16.16 number.
pub fn write_fixed_point_16_16<W: Write>(writer: &mut W, value: f64) -> MuxResult<()> {
    let fixed = (value * 65536.0).round() as i32;
    writer.write_i32::<BigEndian>(fixed)?;
    Ok(())
}

/// Write a fixed-point 8.8 number.
pub fn write_fixed_point_8_8<W: Write>(writer: &mut W, value: f64) -> MuxResult<()> {
    let fixed = (value * 256.0).round() as i16;
    writer.write_i16::<BigEndian>(fixed)?;
    Ok(())
}

/// Write zero padding bytes.
pub fn write_zeros<W: Write>(writer: &mut W, count: usize) -> MuxResult<()> {
    let zeros = vec![0u8; count];
    writer.write_all(&zeros)?;
    Ok(())
}

/// ISO 639-2/T language code packed into 3x5 bits ("und" = undetermined).
pub fn encode_language(lang: &str) -> u16 {
    let bytes = lang.as_bytes();
    if bytes.len() < 3 {
        return encode_language("und");
    }
    let a = (bytes[0] - 0x60) as u16;
    let b = (bytes[1] - 0x60) as u16;
    let c = (bytes[2] - 0x60) as u16;
    (a << 10) | (b << 5) | c
}
