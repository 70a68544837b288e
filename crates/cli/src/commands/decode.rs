use anyhow::{Context, Result};
use dnavault_core::Pipeline;
use std::fs;
use std::path::{Path, PathBuf};

use crate::args::DecodeArgs;
use crate::defaults;
use crate::filetype::detect_extension;
use crate::record::RecordSet;

/// Choose where decoded bytes go.
///
/// An explicit path is kept unless it lacks an extension. Otherwise the
/// final component of the stored filename is used inside the output
/// directory, and failing that the record id with a sniffed extension.
fn output_path(explicit: Option<&Path>, records: &RecordSet, data: &[u8]) -> PathBuf {
    let detected = detect_extension(data);
    match explicit {
        Some(path) if path.extension().is_some() => path.to_path_buf(),
        Some(path) => path.with_extension(detected.trim_start_matches('.')),
        None => {
            let name = records
                .filename
                .as_deref()
                .and_then(|name| Path::new(name).file_name())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(format!("{}{detected}", records.id)));
            Path::new(defaults::OUT_DIR).join(name)
        }
    }
}

pub fn decode_file(args: &DecodeArgs) -> Result<()> {
    println!("🧬 dnavault - Decoding");
    println!("============================================");

    let records = RecordSet::load(&args.input)?;
    let metadata = records.metadata.as_ref().with_context(|| {
        format!(
            "{} has no metadata record; the sequence cannot be decoded without its offsets",
            args.input.display()
        )
    })?;

    let nsym = match (args.nsym, records.nsym) {
        (Some(flag), Some(stored)) if flag != stored => {
            println!("⚠️  Warning: --nsym {flag} overrides nsym={stored} stored in the record");
            flag
        }
        (Some(flag), _) => flag,
        (None, Some(stored)) => stored,
        (None, None) => {
            tracing::warn!("record has no nsym field, assuming the default");
            defaults::NSYM
        }
    };
    println!("  • Record: {} ({} bases)", records.id, records.sequence.len());
    println!("  • nsym: {nsym}");

    let pipeline = Pipeline::with_nsym(nsym)?;
    let decoded = pipeline
        .decode(&records.sequence, metadata)
        .with_context(|| format!("Failed to decode {}", args.input.display()))?;

    if decoded.corrections > 0 {
        println!("  • Corrected {} byte error(s)", decoded.corrections);
    }

    let output = output_path(args.output.as_deref(), &records, &decoded.data);
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&output, &decoded.data)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "✓ Decoded {} bytes to {} (detected type: {})",
        decoded.data.len(),
        output.display(),
        detect_extension(&decoded.data)
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dnavault_core::Sequence;

    fn records(filename: Option<&str>) -> RecordSet {
        RecordSet {
            id: "doc".into(),
            nsym: Some(4),
            sequence: Sequence::new(),
            metadata: Some(Sequence::new()),
            filename: filename.map(str::to_string),
        }
    }

    #[test]
    fn test_output_path_rules() {
        let text = b"plain text payload";

        assert_eq!(
            output_path(Some(Path::new("out/file.dat")), &records(None), text),
            PathBuf::from("out/file.dat")
        );
        assert_eq!(
            output_path(Some(Path::new("out/file")), &records(None), text),
            PathBuf::from("out/file.txt")
        );
        assert_eq!(
            output_path(None, &records(Some("notes.md")), text),
            Path::new(defaults::OUT_DIR).join("notes.md")
        );
        assert_eq!(
            output_path(None, &records(None), b"%PDF-1.4"),
            Path::new(defaults::OUT_DIR).join("doc.pdf")
        );
    }

    #[test]
    fn test_stored_filename_stays_in_output_dir() {
        let text = b"plain text payload";
        let out_dir = Path::new(defaults::OUT_DIR);

        assert_eq!(
            output_path(None, &records(Some("../../tmp/pwned.txt")), text),
            out_dir.join("pwned.txt")
        );
        assert_eq!(
            output_path(None, &records(Some("/tmp/abs_pwned.txt")), text),
            out_dir.join("abs_pwned.txt")
        );
        assert_eq!(
            output_path(None, &records(Some("..")), text),
            out_dir.join("doc.txt")
        );
        assert_eq!(output_path(None, &records(Some("")), text), out_dir.join("doc.txt"));
    }
}
