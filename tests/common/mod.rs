//! Shared helpers for the integration tests.
#![allow(dead_code)]

use sp_emulator::core::Cpu;
use sp_emulator::isa::{self, Opcode};

/// Assembles one instruction word.
pub fn asm(op: Opcode, dst: u8, src0: u8, src1: u8, imm: u16) -> u32 {
    isa::encode(op, dst, src0, src1, imm)
}

/// Creates a core with the given program loaded into both SRAMs.
pub fn boot(program: &[u32]) -> Cpu {
    let mut cpu = Cpu::new();
    cpu.load_image(program);
    cpu
}

/// Ticks the clock until HLT retires, panicking past an upper bound.
pub fn run_until_halt(cpu: &mut Cpu, max_cycles: u64) {
    while !cpu.halted {
        assert!(
            cpu.stats.cycles < max_cycles,
            "no HLT within {} cycles",
            max_cycles
        );
        cpu.tick();
    }
}
