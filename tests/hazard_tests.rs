//! Hazard analyzer classification tests.

use sp_emulator::core::pipeline::hazards::{self, Hazard};
use sp_emulator::core::pipeline::latches::Snapshot;
use sp_emulator::isa::{self, Opcode};

/// Snapshot with a producer parked at Execute0.
fn with_exec0(op: Opcode, dst: usize) -> Snapshot {
    let mut snap = Snapshot::default();
    snap.exec0.active = true;
    snap.exec0.opcode = op;
    snap.exec0.dst = dst;
    snap
}

/// Snapshot with a producer parked at Execute1.
fn with_exec1(op: Opcode, dst: usize, aluout: i32) -> Snapshot {
    let mut snap = Snapshot::default();
    snap.exec1.active = true;
    snap.exec1.opcode = op;
    snap.exec1.dst = dst;
    snap.exec1.aluout = aluout;
    snap
}

/// Tests that a load at Execute0 writing the consumed register stalls.
#[test]
fn test_load_use_stall() {
    let snap = with_exec0(Opcode::Ld, 3);
    assert_eq!(hazards::decode_operand_hazard(&snap, 3), Hazard::LoadUseStall);
    assert_eq!(hazards::decode_operand_hazard(&snap, 4), Hazard::None);
}

/// Tests that r0/r1 destinations never trigger the stall.
#[test]
fn test_load_use_stall_low_registers() {
    let snap = with_exec0(Opcode::Ld, 1);
    assert_eq!(hazards::decode_operand_hazard(&snap, 1), Hazard::None);
}

/// Tests that an inactive Execute0 produces no stall.
#[test]
fn test_inactive_stage_is_harmless() {
    let mut snap = with_exec0(Opcode::Ld, 3);
    snap.exec0.active = false;
    assert_eq!(hazards::decode_operand_hazard(&snap, 3), Hazard::None);
}

/// Tests the link bypass for r7 against a retiring JIN.
#[test]
fn test_link_bypass_jin() {
    let snap = with_exec1(Opcode::Jin, 0, 1);
    assert_eq!(hazards::decode_operand_hazard(&snap, 7), Hazard::LinkBypass);
    assert_eq!(hazards::decode_operand_hazard(&snap, 6), Hazard::None);
}

/// Tests that a conditional branch links only when its condition held.
#[test]
fn test_link_bypass_requires_taken() {
    let taken = with_exec1(Opcode::Jeq, 0, 1);
    assert_eq!(hazards::decode_operand_hazard(&taken, 7), Hazard::LinkBypass);

    let not_taken = with_exec1(Opcode::Jeq, 0, 0);
    assert_eq!(hazards::decode_operand_hazard(&not_taken, 7), Hazard::None);
}

/// Tests the load bypass out of Execute1.
#[test]
fn test_load_bypass() {
    let snap = with_exec1(Opcode::Ld, 5, 0);
    assert_eq!(hazards::decode_operand_hazard(&snap, 5), Hazard::LoadBypass);
    assert_eq!(hazards::decode_operand_hazard(&snap, 2), Hazard::None);
}

/// Tests the ALU bypass out of Execute1, POL included.
#[test]
fn test_alu_bypass() {
    let snap = with_exec1(Opcode::Sub, 4, 99);
    assert_eq!(hazards::decode_operand_hazard(&snap, 4), Hazard::AluBypass);

    let pol = with_exec1(Opcode::Pol, 4, 1);
    assert_eq!(hazards::decode_operand_hazard(&pol, 4), Hazard::AluBypass);

    let ld = with_exec1(Opcode::Ld, 4, 0);
    assert_ne!(hazards::decode_operand_hazard(&ld, 4), Hazard::AluBypass);
}

/// Tests that the stall dominates every bypass.
#[test]
fn test_stall_beats_bypass() {
    let mut snap = with_exec0(Opcode::Ld, 7);
    snap.exec1.active = true;
    snap.exec1.opcode = Opcode::Jin;
    snap.exec1.aluout = 1;
    assert_eq!(hazards::decode_operand_hazard(&snap, 7), Hazard::LoadUseStall);
}

/// Tests that the link bypass outranks the ALU bypass on r7.
#[test]
fn test_link_beats_alu() {
    // a taken JEQ writes r7; the machine forwards the link value, not
    // the stale register, even though nothing else matches
    let mut snap = with_exec1(Opcode::Jeq, 7, 1);
    snap.exec1.dst = 7;
    assert_eq!(hazards::decode_operand_hazard(&snap, 7), Hazard::LinkBypass);
}

/// Tests the late Execute0 bypass site.
#[test]
fn test_execute_site_alu_bypass() {
    let snap = with_exec1(Opcode::Add, 3, 42);
    assert_eq!(hazards::execute_operand_hazard(&snap, 3), Hazard::AluBypass);
    assert_eq!(hazards::execute_operand_hazard(&snap, 2), Hazard::None);
}

/// Tests that the late site never touches r0/r1 operands.
#[test]
fn test_execute_site_low_register_guard() {
    let snap = with_exec1(Opcode::Add, 1, 42);
    assert_eq!(hazards::execute_operand_hazard(&snap, 1), Hazard::None);

    let zero = with_exec1(Opcode::Add, 0, 42);
    assert_eq!(hazards::execute_operand_hazard(&zero, 0), Hazard::None);
}

/// Tests the late link bypass at Execute0.
#[test]
fn test_execute_site_link_bypass() {
    let snap = with_exec1(Opcode::Jne, 0, 1);
    assert_eq!(hazards::execute_operand_hazard(&snap, 7), Hazard::LinkBypass);

    let not_taken = with_exec1(Opcode::Jne, 0, 0);
    assert_eq!(hazards::execute_operand_hazard(&not_taken, 7), Hazard::None);
}

/// Tests store-then-load detection across the decode stages.
#[test]
fn test_store_load_conflict() {
    let mut snap = Snapshot::default();
    snap.dec1.active = true;
    snap.dec1.opcode = Opcode::St;
    snap.dec0.active = true;
    snap.dec0.inst = isa::encode(Opcode::Ld, 2, 0, 1, 0x100);
    assert!(hazards::store_load_conflict(&snap));

    snap.dec1.opcode = Opcode::Add;
    assert!(!hazards::store_load_conflict(&snap));

    snap.dec1.opcode = Opcode::St;
    snap.dec1.active = false;
    assert!(!hazards::store_load_conflict(&snap));
}
