//! Hazard detection for the decode and execute operand sites.
//!
//! These functions are pure: they classify one operand site against the
//! producers currently in flight, given the frozen current snapshot.
//! The stage logic decides what to do with the classification (freeze,
//! bubble, or substitute a bypassed value).

use crate::core::pipeline::latches::{Exec1, Snapshot};
use crate::isa::Opcode;

/// Classification of one operand site against in-flight producers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hazard {
    /// The register file already holds the right value.
    None,
    /// The producer is a load still at Execute0; no bypass can help
    /// because the word is not yet out of memory. Decode1 must freeze.
    LoadUseStall,
    /// A taken branch at Execute1 is about to write this instruction's
    /// source r7; the link value is the branch's own pc.
    LinkBypass,
    /// A load at Execute1 is about to write this source register; the
    /// word is sitting on the data-memory dataout latch.
    LoadBypass,
    /// An ALU-class instruction at Execute1 is about to write this
    /// source register; the value is its aluout.
    AluBypass,
}

/// True when the Execute1 stage holds a branch that is actually
/// redirecting: JIN, or a conditional branch whose condition held.
fn is_taken_branch(exec1: &Exec1) -> bool {
    exec1.opcode == Opcode::Jin || (exec1.opcode.is_cond_branch() && exec1.aluout != 0)
}

/// Store-then-load conflict between the two decode stages.
///
/// A store at Decode1 followed immediately by a load at Decode0 would
/// contend for the data-memory port; Decode0 must freeze for one cycle
/// to separate them.
pub fn store_load_conflict(snap: &Snapshot) -> bool {
    snap.dec1.active
        && snap.dec1.opcode == Opcode::St
        && Opcode::from_word(snap.dec0.inst) == Opcode::Ld
}

/// Classifies a Decode1 source register against Execute0 and Execute1.
///
/// Priority: the load-use stall dominates, then the link bypass, then
/// the load bypass, then the ALU bypass. Only indexes above 1 can
/// stall (r0 and r1 are never written by a load).
pub fn decode_operand_hazard(snap: &Snapshot, idx: usize) -> Hazard {
    if snap.exec0.active
        && snap.exec0.opcode == Opcode::Ld
        && snap.exec0.dst == idx
        && idx > 1
    {
        return Hazard::LoadUseStall;
    }
    if snap.exec1.active && idx == 7 && is_taken_branch(&snap.exec1) {
        return Hazard::LinkBypass;
    }
    if snap.exec1.active && snap.exec1.opcode == Opcode::Ld && snap.exec1.dst == idx {
        return Hazard::LoadBypass;
    }
    if snap.exec1.active && snap.exec1.opcode.is_alu() && snap.exec1.dst == idx {
        return Hazard::AluBypass;
    }
    Hazard::None
}

/// Classifies an Execute0 source register against Execute1.
///
/// This is the late bypass site: the operand was already resolved at
/// Decode1, but an instruction that retired in between may have
/// produced a fresher value. Loads never forward here; their word is
/// handled one cycle earlier by [`Hazard::LoadBypass`].
pub fn execute_operand_hazard(snap: &Snapshot, idx: usize) -> Hazard {
    if idx > 1 && snap.exec1.active && idx == 7 && is_taken_branch(&snap.exec1) {
        return Hazard::LinkBypass;
    }
    if idx > 1
        && snap.exec1.active
        && snap.exec1.opcode.is_alu()
        && snap.exec1.dst == idx
    {
        return Hazard::AluBypass;
    }
    Hazard::None
}
