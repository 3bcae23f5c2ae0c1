// End-to-end checks on the binary: exit codes and "no output on failure".

use std::path::Path;
use std::process::{Command, Output};

use fsb5_core::chunks::{Chunk, LoopPoints};
use fsb5_core::container::parse_container;
use ogg::{PacketWriteEndInfo, PacketWriter};

const SERIAL: u32 = 0x5EED;
const SETUP: &[u8] = include_bytes!("../../core/tests/data/setup_mono.bin");

fn run(args: &[&Path]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fsb5-remux"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to spawn fsb5-remux")
}

fn run_str(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fsb5-remux"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to spawn fsb5-remux")
}

/// Mono 44.1 kHz Vorbis file: three headers, then `audio` one packet per page.
fn vorbis_file(audio: &[Vec<u8>]) -> Vec<u8> {
    let mut ident = b"\x01vorbis".to_vec();
    ident.extend_from_slice(&0u32.to_le_bytes());
    ident.push(1);
    ident.extend_from_slice(&44_100u32.to_le_bytes());
    ident.extend_from_slice(&[0; 12]);
    ident.extend_from_slice(&[0xB8, 1]);

    let mut comment = b"\x03vorbis".to_vec();
    comment.extend_from_slice(&4u32.to_le_bytes());
    comment.extend_from_slice(b"test");
    comment.extend_from_slice(&0u32.to_le_bytes());
    comment.push(1);

    let mut w = PacketWriter::new(Vec::new());
    w.write_packet(ident, SERIAL, PacketWriteEndInfo::EndPage, 0).unwrap();
    w.write_packet(comment, SERIAL, PacketWriteEndInfo::NormalPacket, 0).unwrap();
    w.write_packet(SETUP.to_vec(), SERIAL, PacketWriteEndInfo::EndPage, 0).unwrap();
    for (i, packet) in audio.iter().enumerate() {
        let end = if i + 1 == audio.len() { PacketWriteEndInfo::EndStream } else { PacketWriteEndInfo::EndPage };
        w.write_packet(packet.clone(), SERIAL, end, 1024 * (i as u64 + 1)).unwrap();
    }
    w.into_inner()
}

#[test]
fn remuxes_vorbis_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("tone.ogg");
    let output = dir.path().join("tone.fsb");
    std::fs::write(&input, vorbis_file(&[vec![0x10; 100], vec![0x20; 200], vec![0x30; 300]])).unwrap();

    let out = run(&[input.as_path(), output.as_path()]);
    assert_eq!(out.status.code(), Some(0), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let bytes = std::fs::read(&output).unwrap();
    assert_eq!(&bytes[..4], b"FSB5");
    let c = parse_container(&bytes).unwrap();
    assert_eq!(c.packets.len(), 3);
    assert_eq!(c.sample_header.sample_count, 3072);
    assert_eq!(c.seek_table().unwrap().entries.len(), 3);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
}

#[test]
fn loop_pair_adds_loop_chunk() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("tone.ogg");
    let output = dir.path().join("tone.fsb");
    std::fs::write(&input, vorbis_file(&[vec![0x10; 100], vec![0x20; 100]])).unwrap();

    let out = run_str(&[input.to_str().unwrap(), output.to_str().unwrap(), "0", "2047"]);
    assert_eq!(out.status.code(), Some(0));

    let bytes = std::fs::read(&output).unwrap();
    let c = parse_container(&bytes).unwrap();
    assert!(c
        .chunks
        .iter()
        .any(|(_, chunk)| *chunk == Chunk::Loop(LoopPoints { start: 0, end: 2047 })));
}

#[test]
fn oversized_packet_exit_1_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("big.ogg");
    let output = dir.path().join("big.fsb");
    std::fs::write(&input, vorbis_file(&[vec![0x10; 100], vec![0x7F; 70_000]])).unwrap();

    let out = run(&[input.as_path(), output.as_path()]);
    assert_eq!(out.status.code(), Some(1));
    assert!(!output.exists());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn no_arguments_exit_2() {
    let out = run_str(&[]);
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn missing_output_exit_2() {
    let out = run_str(&["in.ogg"]);
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn non_numeric_loop_exit_2() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.fsb");
    let out = run_str(&["in.ogg", output.to_str().unwrap(), "start", "end"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(!output.exists());
}

#[test]
fn missing_input_exit_1_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("does-not-exist.ogg");
    let output = dir.path().join("out.fsb");

    let out = run(&[input.as_path(), output.as_path()]);
    assert_eq!(out.status.code(), Some(1));
    assert!(!output.exists());
}

#[test]
fn non_ogg_input_exit_1_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("noise.ogg");
    std::fs::write(&input, vec![0x5Au8; 4096]).unwrap();
    let output = dir.path().join("out.fsb");

    let out = run(&[input.as_path(), output.as_path()]);
    assert_eq!(out.status.code(), Some(1));
    assert!(!output.exists());
    // Only the input is left in the directory; the staged temp file is gone.
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn existing_output_survives_failure() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("noise.ogg");
    std::fs::write(&input, b"not ogg").unwrap();
    let output = dir.path().join("out.fsb");
    std::fs::write(&output, b"previous").unwrap();

    let out = run(&[input.as_path(), output.as_path()]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(std::fs::read(&output).unwrap(), b"previous");
}

#[test]
fn help_lists_arguments() {
    let out = run_str(&["--help"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Ogg Vorbis"));
    assert!(stdout.contains("LOOP_START"));
}
