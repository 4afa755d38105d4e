use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

fn test_dir() -> PathBuf {
    let dir = std::env::temp_dir().join("fskmodem-cli-tests");
    fs::create_dir_all(&dir).expect("Failed to create test dir");
    dir
}

fn create_test_file(name: &str, content: &[u8]) -> PathBuf {
    let path = test_dir().join(name);
    fs::write(&path, content).expect("Failed to write test file");
    path
}

fn run_fskmodem(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fskmodem"))
        .args(args)
        .output()
        .expect("Failed to execute fskmodem")
}

fn combined_output(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string() + &String::from_utf8_lossy(&output.stdout)
}

#[test]
fn test_modulate_demodulate_wav() {
    let input = create_test_file("wav_input.bin", b"Hello FSK!");
    let encoded = test_dir().join("wav_encoded.wav");
    let decoded = test_dir().join("wav_decoded.bin");

    let output = run_fskmodem(&[
        "modulate",
        input.to_str().unwrap(),
        encoded.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "modulate failed: {}", combined_output(&output));

    // 80 bits * 147 samples * 2 bytes + 44-byte header
    let size = fs::metadata(&encoded).expect("WAV not created").len();
    assert_eq!(size, 44 + 80 * 147 * 2);

    let output = run_fskmodem(&[
        "demodulate",
        encoded.to_str().unwrap(),
        decoded.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "demodulate failed: {}", combined_output(&output));
    assert_eq!(fs::read(&decoded).unwrap(), b"Hello FSK!");
}

#[test]
fn test_cpfsk_base64_with_custom_rates() {
    let payload: Vec<u8> = (0..=255u8).step_by(7).collect();
    let input = create_test_file("b64_input.bin", &payload);
    let encoded = test_dir().join("b64_encoded.txt");
    let decoded = test_dir().join("b64_decoded.bin");
    let rates = ["--sample-rate", "48000", "--baud-rate", "1200"];

    let mut args = vec![
        "modulate",
        input.to_str().unwrap(),
        encoded.to_str().unwrap(),
        "--mode",
        "cpfsk",
        "--base64",
    ];
    args.extend_from_slice(&rates);
    let output = run_fskmodem(&args);
    assert!(output.status.success(), "modulate failed: {}", combined_output(&output));

    let text = fs::read_to_string(&encoded).unwrap();
    assert!(text.starts_with("UklGR"), "expected Base64 RIFF header, got {}", &text[..8]);

    let mut args = vec![
        "demodulate",
        encoded.to_str().unwrap(),
        decoded.to_str().unwrap(),
        "--base64",
    ];
    args.extend_from_slice(&rates);
    let output = run_fskmodem(&args);
    assert!(output.status.success(), "demodulate failed: {}", combined_output(&output));
    assert_eq!(fs::read(&decoded).unwrap(), payload);
}

#[test]
fn test_roundtrip_command() {
    let output = run_fskmodem(&["roundtrip", "--message", "ping 123"]);
    let text = combined_output(&output);
    assert!(output.status.success(), "roundtrip failed: {}", text);
    assert!(text.contains("fsk:"));
    assert!(text.contains("cpfsk:"));
    assert!(!text.contains("MISMATCH"));
}

#[test]
fn test_identical_carriers_fail() {
    let input = create_test_file("same_carrier.bin", b"x");
    let encoded = test_dir().join("same_carrier.wav");

    let output = run_fskmodem(&[
        "modulate",
        input.to_str().unwrap(),
        encoded.to_str().unwrap(),
        "--freq0",
        "1500",
        "--freq1",
        "1500",
    ]);
    assert!(!output.status.success());
    assert!(combined_output(&output).contains("Carrier frequencies must differ"));
}

#[test]
fn test_demodulate_rejects_non_wav() {
    let input = create_test_file("not_audio.wav", b"definitely not a wav file");
    let decoded = test_dir().join("not_audio.bin");

    let output = run_fskmodem(&[
        "demodulate",
        input.to_str().unwrap(),
        decoded.to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    assert!(combined_output(&output).contains("WAV error"));
}

#[test]
fn test_missing_input_reports_path() {
    let missing = test_dir().join("does_not_exist.bin");
    let encoded = test_dir().join("does_not_exist.wav");

    let output = run_fskmodem(&[
        "modulate",
        missing.to_str().unwrap(),
        encoded.to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    assert!(combined_output(&output).contains("does_not_exist.bin"));
}

#[test]
fn test_absurd_symbol_length_fails_cleanly() {
    let input = create_test_file("huge_symbol.bin", b"x");
    let encoded = test_dir().join("huge_symbol.wav");

    let output = run_fskmodem(&[
        "modulate",
        input.to_str().unwrap(),
        encoded.to_str().unwrap(),
        "--sample-rate",
        "1e20",
        "--baud-rate",
        "1",
    ]);
    assert_eq!(output.status.code(), Some(1));
    assert!(combined_output(&output).contains("samples per symbol"));
}

#[test]
fn test_demodulate_checks_config_before_input() {
    let input = create_test_file("bad_config.txt", b"not*base64");
    let decoded = test_dir().join("bad_config.bin");

    let output = run_fskmodem(&[
        "demodulate",
        input.to_str().unwrap(),
        decoded.to_str().unwrap(),
        "--base64",
        "--freq0",
        "1000",
        "--freq1",
        "1000",
    ]);
    assert!(!output.status.success());
    assert!(combined_output(&output).contains("Carrier frequencies must differ"));
}
