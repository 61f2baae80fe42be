//! Exposes [`Cpu`] state through [`dpu_core::Observable`] for the register
//! dump (`r`/`t` shell commands).

use dpu_core::{Observable, Value};

use crate::cpu::Cpu;

const PATHS: &[&str] = &[
    "r0", "r1", "r2", "r3", "r4", "r5", "r6", "r7", "r8", "r9", "r10", "r11", "r12", "sp", "lr",
    "pc", "flags.z", "flags.s", "flags.c", "flags.stop", "ir_active", "hidden.mar", "hidden.mbr",
    "hidden.ir0", "hidden.ir1", "hidden.alu", "hidden.cir",
];

impl Observable for Cpu {
    fn query(&self, path: &str) -> Option<Value> {
        if let Some(index) = path.strip_prefix('r').and_then(|s| s.parse::<usize>().ok()) {
            if index < 13 {
                return Some(Value::U32(self.regs.get(index)));
            }
        }
        match path {
            "sp" => Some(Value::U32(self.regs.sp())),
            "lr" => Some(Value::U32(self.regs.lr())),
            "pc" => Some(Value::U32(self.regs.pc())),
            "flags.z" => Some(Value::Bool(self.flags.zero())),
            "flags.s" => Some(Value::Bool(self.flags.sign())),
            "flags.c" => Some(Value::Bool(self.flags.carry())),
            "flags.stop" => Some(Value::Bool(self.flags.stopped())),
            "ir_active" => Some(Value::Bool(self.ir_active())),
            "hidden.mar" => Some(Value::U32(self.hidden.mar)),
            "hidden.mbr" => Some(Value::U32(self.hidden.mbr)),
            "hidden.ir0" => Some(Value::U16(self.hidden.ir0)),
            "hidden.ir1" => Some(Value::U16(self.hidden.ir1)),
            "hidden.alu" => Some(Value::U32(self.hidden.alu)),
            "hidden.cir" => Some(Value::U16(self.hidden.cir)),
            _ => None,
        }
    }

    fn query_paths(&self) -> &'static [&'static str] {
        PATHS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queries_a_general_register_and_pc() {
        let mut cpu = Cpu::new();
        cpu.regs.set(4, 0x99);
        cpu.regs.set_pc(0x200);
        assert_eq!(cpu.query("r4"), Some(Value::U32(0x99)));
        assert_eq!(cpu.query("pc"), Some(Value::U32(0x200)));
        assert_eq!(cpu.query("r13"), None);
        assert_eq!(cpu.query("nonsense"), None);
    }
}
