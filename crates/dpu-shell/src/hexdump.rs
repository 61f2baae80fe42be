//! Hex/ASCII memory dump rendering for the `d` command.

use std::fmt::Write as _;

use dpu_core::{Memory, MEM_SIZE};

const BYTES_PER_LINE: usize = 16;

/// Render `len` bytes starting at `offset` as 16-byte hex/ASCII rows.
///
/// Stops at the end of memory even if `offset + len` would run past it,
/// rather than wrapping around and dumping memory a second time.
#[must_use]
pub fn dump(mem: &Memory, offset: u32, len: u32) -> String {
    let mut out = String::new();
    let mut address = offset;
    let end = offset.wrapping_add(len).min(MEM_SIZE as u32);
    while address < end {
        let _ = write!(out, "{address:04X}: ");
        let line_end = (address + BYTES_PER_LINE as u32).min(end);
        for a in address..address + BYTES_PER_LINE as u32 {
            if a < line_end {
                let _ = write!(out, "{:02X} ", mem.read(a));
            } else {
                out.push_str("   ");
            }
        }
        out.push_str(" |");
        for a in address..line_end {
            let byte = mem.read(a);
            let ch = if byte.is_ascii_graphic() || byte == b' ' {
                byte as char
            } else {
                '.'
            };
            out.push(ch);
        }
        out.push_str("|\n");
        address += BYTES_PER_LINE as u32;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use dpu_core::Bus;

    #[test]
    fn renders_printable_bytes_as_ascii() {
        let mut mem = Memory::new();
        mem.write(0, b'H');
        mem.write(1, b'i');
        let text = dump(&mem, 0, 2);
        assert!(text.contains("48 69"));
        assert!(text.contains("|Hi|"));
    }

    #[test]
    fn renders_non_printable_bytes_as_dots() {
        let mut mem = Memory::new();
        mem.write(0, 0x01);
        let text = dump(&mem, 0, 1);
        assert!(text.contains("|.|"));
    }

    #[test]
    fn stops_at_the_end_of_memory_instead_of_wrapping_around() {
        let mem = Memory::new();
        let start = (MEM_SIZE as u32) - 8;
        let text = dump(&mem, start, 64);
        assert!(text.contains(&format!("{start:04X}:")));
        // Only the 8 remaining bytes are rendered; nothing past the
        // boundary, and no wrap-around back to offset 0.
        assert_eq!(text.lines().count(), 1);
        assert!(!text.contains("0000:"));
    }
}
