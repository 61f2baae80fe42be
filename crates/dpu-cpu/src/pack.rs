//! Big-endian 32-bit word packing against a byte-addressable [`Bus`] (C4).
//!
//! Both the fetch stage (C7) and the load/store executor (C6) go through
//! these two functions rather than touching bytes directly, so the packing
//! rule of §4.1 has exactly one implementation.

use dpu_core::Bus;

/// `word(a) = (M[a]<<24) | (M[a+1]<<16) | (M[a+2]<<8) | M[a+3]`.
#[must_use]
pub fn read_word(bus: &impl Bus, address: u32) -> u32 {
    let b0 = u32::from(bus.read(address));
    let b1 = u32::from(bus.read(address.wrapping_add(1)));
    let b2 = u32::from(bus.read(address.wrapping_add(2)));
    let b3 = u32::from(bus.read(address.wrapping_add(3)));
    (b0 << 24) | (b1 << 16) | (b2 << 8) | b3
}

/// Inverse of [`read_word`]: write `value` as four big-endian bytes.
pub fn write_word(bus: &mut impl Bus, address: u32, value: u32) {
    bus.write(address, (value >> 24) as u8);
    bus.write(address.wrapping_add(1), (value >> 16) as u8);
    bus.write(address.wrapping_add(2), (value >> 8) as u8);
    bus.write(address.wrapping_add(3), value as u8);
}

#[cfg(test)]
mod tests {
    use super::*;
    use dpu_core::Memory;

    #[test]
    fn round_trips_through_a_bus() {
        let mut mem = Memory::new();
        write_word(&mut mem, 0x40, 0xDEAD_BEEF);
        assert_eq!(read_word(&mem, 0x40), 0xDEAD_BEEF);
        assert_eq!(mem.read(0x40), 0xDE);
    }
}
