use clap::Parser;
use dupesweep::app::{run_session, RunOptions};
use dupesweep::cli::Cli;
use dupesweep::config::Config;
use dupesweep::error::ExitCode;
use dupesweep::prompt::Prompter;
use std::fs::File;
use std::io::{Cursor, Write};
use std::path::Path;
use tempfile::{tempdir, TempDir};

fn write(path: &Path, content: &[u8]) {
    File::create(path).unwrap().write_all(content).unwrap();
}

fn fixture() -> TempDir {
    let dir = tempdir().unwrap();
    write(&dir.path().join("a.txt"), b"hello world\n");
    write(&dir.path().join("b.txt"), b"hello world\n");
    write(&dir.path().join("c.txt"), b"HELLO WORLD\n");
    write(&dir.path().join("notes.md"), b"hello world\n");
    dir
}

fn interactive() -> RunOptions {
    RunOptions {
        interactive: true,
        ..RunOptions::batch()
    }
}

fn run(args: &[&str], options: RunOptions, input: &str) -> (anyhow::Result<ExitCode>, String) {
    let cli = Cli::try_parse_from(args).unwrap();
    let mut prompter = Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
    let result = run_session(&cli, &Config::default(), options, &mut prompter);
    (result, String::from_utf8(prompter.into_output()).unwrap())
}

#[test]
fn test_interactive_session_deletes_selected_file() {
    let dir = fixture();
    let root = dir.path().to_str().unwrap();

    let (result, out) = run(&["dupesweep", root], interactive(), "txt\n1\nyes\nyes\n2\n");

    assert_eq!(result.unwrap(), ExitCode::Success);
    let order = [
        "Enter file format:",
        "Size sorting options:",
        "Enter a sorting option:",
        "12 bytes",
        "Check for duplicates?",
        "Hash: ",
        "Delete files?",
        "Enter file numbers to delete:",
        "Total freed up space: 12 bytes",
    ];
    let mut from = 0;
    for needle in order {
        let at = out[from..]
            .find(needle)
            .unwrap_or_else(|| panic!("{needle:?} missing or out of order in:\n{out}"));
        from += at + needle.len();
    }
    assert!(!out.contains("notes.md"));
    assert!(dir.path().join("a.txt").exists());
    assert!(!dir.path().join("b.txt").exists());
}

#[test]
fn test_interactive_session_retries_bad_answers() {
    let dir = fixture();
    let root = dir.path().to_str().unwrap();

    let (result, out) = run(
        &["dupesweep", root],
        interactive(),
        "\n5\n2\nmaybe\nyes\nyes\n\nx\n99\n",
    );

    assert_eq!(result.unwrap(), ExitCode::Success);
    assert_eq!(out.matches("Wrong option").count(), 2);
    assert_eq!(out.matches("Wrong format").count(), 2);
    assert!(out.contains("Total freed up space: 0 bytes"));
    assert!(dir.path().join("a.txt").exists());
    assert!(dir.path().join("b.txt").exists());
}

#[test]
fn test_interactive_session_declines_check() {
    let dir = fixture();
    let root = dir.path().to_str().unwrap();

    let (result, out) = run(&["dupesweep", root], interactive(), "\n2\nno\n");

    assert_eq!(result.unwrap(), ExitCode::Success);
    assert!(out.contains("notes.md"));
    assert!(!out.contains("Hash: "));
    assert!(!out.contains("Delete files?"));
}

#[test]
fn test_interactive_session_fails_on_eof() {
    let dir = fixture();
    let root = dir.path().to_str().unwrap();

    let (result, _) = run(&["dupesweep", root], interactive(), "txt\n");

    assert!(result.is_err());
}

#[test]
fn test_flags_skip_prompts() {
    let dir = fixture();
    let root = dir.path().to_str().unwrap();

    let (result, out) = run(
        &["dupesweep", root, "-e", "txt", "-s", "desc", "--check", "yes", "--delete", "1"],
        interactive(),
        "",
    );

    assert_eq!(result.unwrap(), ExitCode::Success);
    assert!(!out.contains("Enter file format:"));
    assert!(!out.contains("Delete files?"));
    assert!(out.contains("Total freed up space: 12 bytes"));
    assert!(!dir.path().join("a.txt").exists());
}

#[test]
fn test_non_interactive_without_duplicates() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("x"), b"1");
    write(&dir.path().join("y"), b"22");
    let root = dir.path().to_str().unwrap();

    let (result, out) = run(&["dupesweep", root, "--non-interactive"], RunOptions::batch(), "");

    assert_eq!(result.unwrap(), ExitCode::NoDuplicates);
    assert!(out.contains("1 bytes"));
    assert!(out.contains("2 bytes"));
    assert!(!out.contains("Total freed up space"));
}

#[test]
fn test_json_output() {
    let dir = fixture();
    let root = dir.path().to_str().unwrap();

    let (result, out) = run(
        &["dupesweep", root, "-o", "json", "--delete", "2,9"],
        RunOptions::batch(),
        "",
    );

    assert_eq!(result.unwrap(), ExitCode::Success);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    // a.txt, b.txt and notes.md share content; c.txt differs
    assert_eq!(parsed["duplicates"].as_array().unwrap().len(), 1);
    assert_eq!(parsed["duplicates"][0]["files"].as_array().unwrap().len(), 3);
    assert_eq!(parsed["deletion"]["bytes_freed"], 12);
    assert_eq!(parsed["deletion"]["ignored_numbers"][0], 9);
    assert_eq!(parsed["summary"]["exit_code_name"], "DS000");
}

#[cfg(target_os = "linux")]
#[test]
fn test_json_output_with_non_utf8_name_reports_deletion() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = tempdir().unwrap();
    let odd = dir.path().join(OsStr::from_bytes(b"a\xff.bin"));
    write(&odd, b"same");
    write(&dir.path().join("b.bin"), b"same");
    let root = dir.path().to_str().unwrap();

    let (result, out) = run(
        &["dupesweep", root, "-o", "json", "--delete", "2"],
        RunOptions::batch(),
        "",
    );

    assert_eq!(result.unwrap(), ExitCode::Success);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    let files = parsed["duplicates"][0]["files"].as_array().unwrap();
    assert_eq!(files.len(), 2);
    assert!(files[0]["path"].as_str().unwrap().ends_with("a\u{fffd}.bin"));
    assert_eq!(parsed["deletion"]["bytes_freed"], 4);
    assert!(odd.exists());
    assert!(!dir.path().join("b.bin").exists());
}

#[test]
fn test_missing_root_is_an_error() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("absent");

    let (result, _) = run(
        &["dupesweep", missing.to_str().unwrap(), "--non-interactive"],
        RunOptions::batch(),
        "",
    );

    let err = result.unwrap_err();
    assert!(format!("{err:#}").contains("Path not found"));
}
