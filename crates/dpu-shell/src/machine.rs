//! Couples the CPU engine to a concrete memory image.

use std::fmt::Write as _;

use dpu_core::Memory;
use dpu_cpu::Cpu;

/// The CPU plus the memory it runs against; what the shell commands act on.
pub struct Machine {
    pub cpu: Cpu,
    pub mem: Memory,
}

impl Machine {
    #[must_use]
    pub fn new() -> Self {
        Self {
            cpu: Cpu::new(),
            mem: Memory::new(),
        }
    }

    /// `z`: reset registers, flags, and hidden registers. Memory untouched.
    pub fn reset(&mut self) {
        self.cpu.reset();
    }

    /// `t`: one instruction cycle.
    pub fn step(&mut self) {
        self.cpu.step(&mut self.mem);
    }

    /// `g`: run cycles until `STOP` is asserted.
    pub fn run(&mut self) {
        self.cpu.run(&mut self.mem);
    }

    /// Render the register file, flags, and hidden registers for `r`/`t`.
    #[must_use]
    pub fn format_registers(&self) -> String {
        let mut out = String::new();
        for row in 0..4 {
            for col in 0..4 {
                let index = row * 4 + col;
                let _ = write!(out, "r{index:<2}={:08X} ", self.cpu.regs.get(index));
            }
            out.push('\n');
        }
        let _ = writeln!(
            out,
            "sp={:08X} lr={:08X} pc={:08X}",
            self.cpu.regs.sp(),
            self.cpu.regs.lr(),
            self.cpu.regs.pc()
        );
        let _ = writeln!(
            out,
            "Z={} S={} C={} STOP={} IR_ACTIVE={}",
            self.cpu.flags.zero() as u8,
            self.cpu.flags.sign() as u8,
            self.cpu.flags.carry() as u8,
            self.cpu.flags.stopped() as u8,
            self.cpu.ir_active() as u8,
        );
        let _ = writeln!(
            out,
            "MAR={:08X} MBR={:08X} IR0={:04X} IR1={:04X} ALU={:08X} CIR={:04X}",
            self.cpu.hidden.mar,
            self.cpu.hidden.mbr,
            self.cpu.hidden.ir0,
            self.cpu.hidden.ir1,
            self.cpu.hidden.alu,
            self.cpu.hidden.cir,
        );
        out
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_leaves_memory_but_clears_registers() {
        use dpu_core::Bus;
        let mut machine = Machine::new();
        machine.mem.write(0, 0xAB);
        machine.cpu.regs.set(1, 42);
        machine.reset();
        assert_eq!(machine.cpu.regs.get(1), 0);
        assert_eq!(machine.mem.read(0), 0xAB);
    }

    #[test]
    fn register_dump_mentions_every_flag() {
        let machine = Machine::new();
        let text = machine.format_registers();
        assert!(text.contains("Z=0"));
        assert!(text.contains("STOP=0"));
        assert!(text.contains("pc=00000000"));
    }
}
