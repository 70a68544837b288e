use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn dnavault() -> Command {
    Command::cargo_bin("dnavault").unwrap()
}

#[test]
fn test_encode_writes_record() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("hello.txt");
    fs::write(&input, "Hello World").unwrap();
    let out_dir = temp.path().join("out");

    dnavault()
        .arg("encode")
        .arg(&input)
        .arg("--out-dir")
        .arg(&out_dir)
        .arg("--nsym")
        .arg("4")
        .assert()
        .success()
        .stdout(predicate::str::contains("GC content:"))
        .stdout(predicate::str::contains("rotated)"))
        .stdout(predicate::str::contains("Encoding complete"));

    let record = fs::read_to_string(out_dir.join("hello.fasta")).unwrap();
    assert!(record.starts_with(">hello nsym=4\n"));
    assert!(record.contains(">hello_metadata\n"));
    assert!(record.contains(">hello_filename\n"));
}

#[test]
fn test_encode_decode_round_trip() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("data.bin");
    let payload: Vec<u8> = (0..=255u8).cycle().take(700).collect();
    fs::write(&input, &payload).unwrap();
    let out_dir = temp.path().join("out");

    dnavault()
        .arg("encode")
        .arg(&input)
        .arg("-o")
        .arg(&out_dir)
        .assert()
        .success();

    let restored = temp.path().join("restored.bin");
    dnavault()
        .arg("decode")
        .arg(out_dir.join("data.fasta"))
        .arg("--output")
        .arg(&restored)
        .assert()
        .success()
        .stdout(predicate::str::contains("nsym: 10"));

    assert_eq!(fs::read(&restored).unwrap(), payload);
}

#[test]
fn test_decode_appends_detected_extension() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("notes.txt");
    fs::write(&input, "some plain text notes\n").unwrap();
    let out_dir = temp.path().join("out");

    dnavault()
        .args(["encode", "--nsym", "8", "--out-dir"])
        .arg(&out_dir)
        .arg(&input)
        .assert()
        .success();

    let restored = temp.path().join("restored");
    dnavault()
        .arg("decode")
        .arg(out_dir.join("notes.fasta"))
        .arg("--output")
        .arg(&restored)
        .assert()
        .success()
        .stdout(predicate::str::contains("detected type: .txt"));

    assert_eq!(
        fs::read_to_string(temp.path().join("restored.txt")).unwrap(),
        "some plain text notes\n"
    );
}

#[test]
fn test_encode_multiple_inputs() {
    let temp = tempdir().unwrap();
    let out_dir = temp.path().join("out");
    let inputs: Vec<_> = (0..3)
        .map(|i| {
            let path = temp.path().join(format!("file{i}.txt"));
            fs::write(&path, format!("contents of file {i}")).unwrap();
            path
        })
        .collect();

    dnavault()
        .arg("--threads")
        .arg("2")
        .arg("encode")
        .args(&inputs)
        .arg("--out-dir")
        .arg(&out_dir)
        .assert()
        .success();

    for i in 0..3 {
        assert!(out_dir.join(format!("file{i}.fasta")).exists());
    }
}

#[test]
fn test_encode_rejects_inputs_sharing_a_stem() {
    let temp = tempdir().unwrap();
    let first = temp.path().join("a").join("x.txt");
    let second = temp.path().join("b").join("x.txt");
    for (path, text) in [(&first, "first"), (&second, "second")] {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, text).unwrap();
    }
    let out_dir = temp.path().join("out");

    dnavault()
        .arg("encode")
        .arg(&first)
        .arg(&second)
        .arg("--out-dir")
        .arg(&out_dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("would both write"));

    assert!(!out_dir.join("x.fasta").exists());
}

#[test]
fn test_encode_with_config_and_repair() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("zeros.bin");
    fs::write(&input, vec![0u8; 32]).unwrap();
    let config = temp.path().join("pipeline.json");
    fs::write(&config, r#"{"nsym": 6, "repair": {"enabled": true, "seed": 3}}"#).unwrap();
    let out_dir = temp.path().join("out");

    dnavault()
        .arg("encode")
        .arg(&input)
        .arg("--config")
        .arg(&config)
        .arg("--out-dir")
        .arg(&out_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("nsym: 6"))
        .stdout(predicate::str::contains("Repair: enabled"));

    let restored = temp.path().join("zeros.out");
    dnavault()
        .arg("decode")
        .arg(out_dir.join("zeros.fasta"))
        .arg("--output")
        .arg(&restored)
        .assert()
        .success();
    assert_eq!(fs::read(&restored).unwrap(), vec![0u8; 32]);
}

#[test]
fn test_decode_requires_metadata() {
    let temp = tempdir().unwrap();
    let record = temp.path().join("bare.fasta");
    fs::write(&record, ">bare nsym=4\nACGTACGT\n").unwrap();

    dnavault()
        .arg("decode")
        .arg(&record)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no metadata record"));
}

#[test]
fn test_decode_reports_uncorrectable_damage() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("msg.txt");
    fs::write(&input, "Hello World").unwrap();
    let out_dir = temp.path().join("out");

    dnavault()
        .arg("encode")
        .arg(&input)
        .args(["--nsym", "4", "--out-dir"])
        .arg(&out_dir)
        .assert()
        .success();

    // Rotate three bases in three different bytes of the main sequence.
    let path = out_dir.join("msg.fasta");
    let text = fs::read_to_string(&path).unwrap();
    let mut lines: Vec<String> = text.lines().map(str::to_string).collect();
    let rotate = |c: u8| match c {
        b'A' => b'C',
        b'C' => b'G',
        b'G' => b'T',
        _ => b'A',
    };
    let mut bases = lines[1].clone().into_bytes();
    for i in [1, 22, 40] {
        bases[i] = rotate(bases[i]);
    }
    lines[1] = String::from_utf8(bases).unwrap();
    fs::write(&path, lines.join("\n")).unwrap();

    dnavault()
        .arg("decode")
        .arg(&path)
        .arg("--output")
        .arg(temp.path().join("msg.out"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Uncorrectable"));
}

#[test]
fn test_audit_reports_json() {
    let temp = tempdir().unwrap();
    let record = temp.path().join("seq.fasta");
    fs::write(&record, ">seq\nAAAAATATATGCGC\n").unwrap();

    dnavault()
        .arg("audit")
        .arg(&record)
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"longest_run\": 5"))
        .stdout(predicate::str::contains("ATATAT"));
}

#[test]
fn test_audit_uses_config_profile() {
    let temp = tempdir().unwrap();
    let record = temp.path().join("seq.fasta");
    fs::write(&record, ">seq\nAAAAATATATGCGC\n").unwrap();
    let config = temp.path().join("pipeline.json");
    fs::write(
        &config,
        r#"{"profile": {"max_homopolymer": 5, "gc_band": {"min": 0.0, "max": 100.0}}}"#,
    )
    .unwrap();

    dnavault()
        .arg("audit")
        .arg(&record)
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"homopolymer_violation\": true"));

    dnavault()
        .arg("audit")
        .arg(&record)
        .arg("--json")
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"max_homopolymer\": 5"))
        .stdout(predicate::str::contains("\"homopolymer_violation\": false"))
        .stdout(predicate::str::contains("\"gc_in_band\": true"));
}

#[test]
fn test_audit_custom_motifs() {
    let temp = tempdir().unwrap();
    let record = temp.path().join("seq.fasta");
    fs::write(&record, ">seq\nACGGTACCA\n").unwrap();

    dnavault()
        .arg("audit")
        .arg(&record)
        .args(["--motifs", "GGTA"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No metadata record"))
        .stdout(predicate::str::contains("Unstable motifs present: true (GGTA)"));
}

#[test]
fn test_rejects_invalid_motif() {
    let temp = tempdir().unwrap();
    let record = temp.path().join("seq.fasta");
    fs::write(&record, ">seq\nACGT\n").unwrap();

    dnavault()
        .arg("audit")
        .arg(&record)
        .args(["--motifs", "AXA"])
        .assert()
        .failure();
}
