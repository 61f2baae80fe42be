//! Memory-image persistence (C10): raw byte load/write, no header.

use std::fs;
use std::path::Path;

use dpu_core::{Memory, MEM_SIZE};
use log::warn;

use crate::error::ShellError;

/// Load `path` into memory starting at offset 0.
///
/// If the file exceeds `MEM_SIZE`, the excess is silently dropped and the
/// number of bytes actually copied is returned so the caller can tell the
/// operator.
pub fn load_image(mem: &mut Memory, path: &Path) -> Result<usize, ShellError> {
    let data = fs::read(path).map_err(|source| ShellError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let copy_len = data.len().min(MEM_SIZE);
    if data.len() > MEM_SIZE {
        warn!(
            "{} is {} bytes, truncating to {MEM_SIZE}",
            path.display(),
            data.len()
        );
    }
    mem.as_mut_slice()[..copy_len].copy_from_slice(&data[..copy_len]);
    Ok(copy_len)
}

/// Write the first `len` bytes of memory to `path`.
///
/// `len` is clamped to `MEM_SIZE` rather than silently partial-writing past
/// it; the caller is informed if clamping occurred.
pub fn write_image(mem: &Memory, path: &Path, len: usize) -> Result<usize, ShellError> {
    let clamped = len.min(MEM_SIZE);
    if len > MEM_SIZE {
        warn!("requested {len} bytes, clamping to {MEM_SIZE}");
    }
    fs::write(path, &mem.as_slice()[..clamped]).map_err(|source| ShellError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(clamped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_a_memory_prefix() {
        let dir = std::env::temp_dir().join("dpu-shell-test-round-trip");
        let mut mem = Memory::new();
        for (i, byte) in mem.as_mut_slice().iter_mut().take(16).enumerate() {
            *byte = i as u8;
        }
        write_image(&mem, &dir, 16).unwrap();

        let mut loaded = Memory::new();
        let copied = load_image(&mut loaded, &dir).unwrap();
        assert_eq!(copied, 16);
        assert_eq!(&loaded.as_slice()[..16], &mem.as_slice()[..16]);
        let _ = fs::remove_file(&dir);
    }

    #[test]
    fn oversized_file_is_truncated_not_rejected() {
        let dir = std::env::temp_dir().join("dpu-shell-test-oversized");
        fs::write(&dir, vec![0xAB; MEM_SIZE + 100]).unwrap();
        let mut mem = Memory::new();
        let copied = load_image(&mut mem, &dir).unwrap();
        assert_eq!(copied, MEM_SIZE);
        let _ = fs::remove_file(&dir);
    }
}
