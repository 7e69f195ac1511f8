use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use flate2::Compression;
use flate2::write::GzEncoder;

const PDB: &str = concat!(
    "HEADER    HYDROLASE                               01-JAN-00   1ABC              \n",
    "ATOM      1  N   MET A   3      11.104  13.207   2.100  1.00 20.00           N\n",
    "ATOM      2  CA  MET A   3      11.504  13.607   2.500  1.00 20.00           C\n",
    "ATOM      3  CB  MET A   3     -13.945 -18.120  61.032  1.00 20.00           C\n",
    "ATOM      4  CA  GLY A   4      12.304  14.407   3.300  1.00 20.00           C\n",
    "ATOM      5  CA  ALA A   6      12.704  14.807   3.700  1.00 20.00           C\n",
    "ATOM      6  CB  ALA A   6      13.104  15.207   4.100  1.00 20.00           C\n",
    "HETATM    7  O   HOH A 101      20.000  20.000  20.000  1.00 20.00           O\n",
    "TER       8      ALA A   6\n",
    "ATOM      9  CB  ALA B   7      13.504  15.607   4.500  1.00 20.00           C\n",
);

const EXPECTED: &str = "\
. 0 nan nan nan
. 1 nan nan nan
M 2 -13.945 -18.12 61.032
G 3 12.304 14.407 3.3
. 4 nan nan nan
A 5 13.104 15.207 4.1
";

fn write_gz(path: &Path, text: &str) {
    let file = File::create(path).unwrap();
    let mut enc = GzEncoder::new(file, Compression::default());
    enc.write_all(text.as_bytes()).unwrap();
    enc.finish().unwrap();
}

fn run_with_stdin(args: &[&str], stdin: &str) -> Output {
    let exe = env!("CARGO_BIN_EXE_pdb2res");
    let mut child = Command::new(exe)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to run pdb2res binary");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn path_list(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| format!("{}\n", p.display()))
        .collect()
}

#[test]
fn cli_extracts_residues_from_stdin_paths() {
    let dir = tempfile::tempdir().unwrap();
    let pdb = dir.path().join("pdb1abc.ent.gz");
    write_gz(&pdb, PDB);

    let output = run_with_stdin(&[], &path_list(&[pdb]));
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), EXPECTED);
}

#[test]
fn cli_continues_past_unreadable_files() {
    let dir = tempfile::tempdir().unwrap();
    let pdb = dir.path().join("pdb1abc.ent.gz");
    write_gz(&pdb, PDB);
    let corrupt = dir.path().join("pdb2bad.ent.gz");
    fs::write(&corrupt, [0x1f, 0x8b, 0x08, 0x00, 0xde, 0xad]).unwrap();
    let missing = dir.path().join("pdb3zzz.ent.gz");

    let output = run_with_stdin(&[], &path_list(&[missing, pdb.clone(), corrupt, pdb]));
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        format!("{EXPECTED}{EXPECTED}")
    );
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("pdb3zzz.ent.gz"));
    assert!(stderr.contains("pdb2bad.ent.gz"));
}

#[test]
fn cli_output_is_identical_across_runs_and_thread_counts() {
    let dir = tempfile::tempdir().unwrap();
    let mut paths = Vec::new();
    for i in 0..5 {
        let path = dir.path().join(format!("pdb{i}.ent.gz"));
        write_gz(&path, PDB);
        paths.push(path);
    }
    let list = path_list(&paths);

    let serial = run_with_stdin(&["--threads", "1"], &list);
    let parallel = run_with_stdin(&["-j", "4"], &list);
    assert!(serial.status.success() && parallel.status.success());
    assert_eq!(serial.stdout, parallel.stdout);
    assert_eq!(serial.stdout, EXPECTED.repeat(5).into_bytes());
}

#[test]
fn cli_reads_path_list_and_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let pdb = dir.path().join("pdb1abc.ent");
    fs::write(&pdb, PDB).unwrap();
    let list = dir.path().join("paths.txt");
    fs::write(&list, path_list(&[pdb])).unwrap();
    let out = dir.path().join("residues.txt");

    let status = Command::new(env!("CARGO_BIN_EXE_pdb2res"))
        .arg("--input")
        .arg(&list)
        .arg("--output")
        .arg(&out)
        .arg("--no-mmap")
        .status()
        .expect("failed to run pdb2res binary");
    assert!(status.success());
    assert_eq!(fs::read_to_string(out).unwrap(), EXPECTED);
}

#[test]
fn cli_strict_mode_drops_files_with_malformed_records() {
    let dir = tempfile::tempdir().unwrap();
    let bad = PDB.replace("  12.304  14.407", "  12.304  14.4x7");
    let path = dir.path().join("pdb4bad.ent.gz");
    write_gz(&path, &bad);
    let list = path_list(&[path]);

    let lenient = run_with_stdin(&[], &list);
    assert!(lenient.status.success());
    assert_eq!(
        String::from_utf8(lenient.stdout).unwrap(),
        EXPECTED.replace("G 3 12.304 14.407 3.3", ". 3 nan nan nan")
    );

    let strict = run_with_stdin(&["--strict"], &list);
    assert!(strict.status.success());
    assert!(strict.stdout.is_empty());
    assert!(String::from_utf8(strict.stderr).unwrap().contains("pdb4bad.ent.gz"));
}
