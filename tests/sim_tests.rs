//! Loader, trace sink and simulator harness tests.

mod common;

use common::asm;
use std::fs;
use std::path::PathBuf;

use sp_emulator::common::SimError;
use sp_emulator::config::Config;
use sp_emulator::core::pipeline::latches::Snapshot;
use sp_emulator::isa::Opcode;
use sp_emulator::sim::trace::TraceSink;
use sp_emulator::sim::{loader, RunOutcome, Simulator};

/// Unique scratch path under the host temp directory.
fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("sp_emulator_test_{}_{}", std::process::id(), name))
}

/// Tests parsing a well-formed program image.
#[test]
fn test_load_image() {
    let path = temp_path("image_ok.txt");
    fs::write(&path, "30000001\n00000000\ndeadbeef\n\n").unwrap();

    let words = loader::load_image(&path).unwrap();
    assert_eq!(words, vec![0x3000_0001, 0, 0xDEAD_BEEF]);

    fs::remove_file(&path).ok();
}

/// Tests that a malformed line is rejected with its line number.
#[test]
fn test_load_image_bad_token() {
    let path = temp_path("image_bad.txt");
    fs::write(&path, "30000001\nnot-hex\n").unwrap();

    match loader::load_image(&path) {
        Err(SimError::ImageParse { line, token, .. }) => {
            assert_eq!(line, 2);
            assert_eq!(token, "not-hex");
        }
        other => panic!("expected a parse error, got {:?}", other.map(|w| w.len())),
    }

    fs::remove_file(&path).ok();
}

/// Tests that a missing image file reports an I/O error.
#[test]
fn test_load_image_missing_file() {
    let path = temp_path("image_missing.txt");
    assert!(matches!(
        loader::load_image(&path),
        Err(SimError::Io { .. })
    ));
}

/// Tests the trace block shape for the reset snapshot.
#[test]
fn test_trace_block_format() {
    let mut sink = TraceSink::new(Vec::new());
    sink.write_cycle(&Snapshot::default()).unwrap();
    let text = String::from_utf8(sink.into_inner()).unwrap();

    assert!(text.starts_with("cycle 0\ncycle_counter 00000000\n"));
    assert!(text.contains("r2 00000000\n"));
    assert!(text.contains("r7 00000000\n"));
    assert!(text.contains("fetch0_active 00000000\n"));
    assert!(text.contains("dec1_immediate 00000000\n"));
    assert!(text.contains("exec1_aluout 00000000\n"));
    assert!(text.ends_with("\n\n"), "blocks are blank-line terminated");
    assert_eq!(text.lines().count(), 45);
}

/// Tests that negative values trace as 8-digit two's-complement hex.
#[test]
fn test_trace_negative_values() {
    let mut snap = Snapshot::default();
    snap.r[3] = -2;
    snap.exec1.aluout = -1;

    let mut sink = TraceSink::new(Vec::new());
    sink.write_cycle(&snap).unwrap();
    let text = String::from_utf8(sink.into_inner()).unwrap();

    assert!(text.contains("r3 fffffffe\n"));
    assert!(text.contains("exec1_aluout ffffffff\n"));
}

/// Tests the halt round trip: with no stores, both dumps equal the
/// loaded image padded to 65536 lines.
#[test]
fn test_halt_dumps_match_image() {
    let program_path = temp_path("smoke_program.txt");
    let image_words = [asm(Opcode::Hlt, 0, 0, 0, 1)];
    fs::write(&program_path, "30000001\n").unwrap();

    let mut config = Config::default();
    config.files.cycle_trace = temp_path("smoke_trace.txt").display().to_string();
    config.files.srami_dump = temp_path("smoke_srami.txt").display().to_string();
    config.files.sramd_dump = temp_path("smoke_sramd.txt").display().to_string();

    let image = loader::load_image(&program_path).unwrap();
    assert_eq!(image, image_words);

    let mut sim = Simulator::new(&config, &image).unwrap();
    let outcome = sim.run().unwrap();
    assert_eq!(outcome, RunOutcome::Halted);

    let srami = fs::read_to_string(&config.files.srami_dump).unwrap();
    let sramd = fs::read_to_string(&config.files.sramd_dump).unwrap();
    assert_eq!(srami, sramd, "no stores ran, the memories must agree");

    let lines: Vec<&str> = sramd.lines().collect();
    assert_eq!(lines.len(), 65536);
    assert_eq!(lines[0], "30000001");
    assert!(lines[1..].iter().all(|l| *l == "00000000"));

    let trace = fs::read_to_string(&config.files.cycle_trace).unwrap();
    assert!(trace.starts_with("cycle 0\n"));
    assert!(trace.contains("exec1_opcode 00000018"), "the HLT reaches Execute1");

    for path in [
        &program_path,
        &PathBuf::from(&config.files.cycle_trace),
        &PathBuf::from(&config.files.srami_dump),
        &PathBuf::from(&config.files.sramd_dump),
    ] {
        fs::remove_file(path).ok();
    }
}

/// Tests the cycle-limit guard on a program that never halts.
#[test]
fn test_cycle_limit() {
    let mut config = Config::default();
    config.general.trace_cycles = false;
    config.general.max_cycles = 50;

    let image = vec![0u32; 8];
    let mut sim = Simulator::new(&config, &image).unwrap();
    let outcome = sim.run().unwrap();

    assert_eq!(outcome, RunOutcome::CycleLimit);
    assert_eq!(sim.cpu.stats.cycles, 50);
    assert!(!sim.cpu.halted);
}
