//! FASTA-style container for an encoded unit.
//!
//! ```text
//! >report nsym=10
//! ACGTTGCA...            (wrapped at 80 columns)
//! >report_metadata
//! ATATCGCA...
//! >report_filename
//! CTGACGCC...
//! ```
//!
//! The metadata record carries the offset channel and is required for
//! decoding. The filename record is optional.

use anyhow::{bail, Context, Result};
use dnavault_codec::{to_bytes, to_symbols};
use dnavault_core::Sequence;
use std::fs;
use std::path::Path;

use crate::defaults::LINE_WIDTH;

const METADATA_SUFFIX: &str = "_metadata";
const FILENAME_SUFFIX: &str = "_filename";

/// The records stored for one encoded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSet {
    pub id: String,
    /// Parity bytes per block, if the header carries it.
    pub nsym: Option<u8>,
    pub sequence: Sequence,
    pub metadata: Option<Sequence>,
    pub filename: Option<String>,
}

/// Nucleotides for a filename: UTF-8 bytes packed into symbols, one base each.
pub fn filename_to_sequence(name: &str) -> Result<Sequence> {
    Sequence::from_symbols(&to_symbols(name.as_bytes()))
        .map_err(|(index, value)| anyhow::anyhow!("Invalid symbol {value} at {index}"))
}

pub fn sequence_to_filename(seq: &Sequence) -> Result<String> {
    let bytes = to_bytes(&seq.to_symbols()).context("Filename record is not byte aligned")?;
    String::from_utf8(bytes).context("Filename record is not valid UTF-8")
}

fn push_record(out: &mut String, header: &str, seq: &Sequence) {
    let text = seq.to_string();
    out.push('>');
    out.push_str(header);
    out.push('\n');
    // Sequences are pure ASCII so byte chunks are valid UTF-8.
    for line in text.as_bytes().chunks(LINE_WIDTH) {
        out.push_str(&String::from_utf8_lossy(line));
        out.push('\n');
    }
}

impl RecordSet {
    /// Render the record set as FASTA text.
    pub fn to_fasta(&self) -> Result<String> {
        let mut out = String::new();

        let header = match self.nsym {
            Some(nsym) => format!("{} nsym={nsym}", self.id),
            None => self.id.clone(),
        };
        push_record(&mut out, &header, &self.sequence);

        if let Some(metadata) = &self.metadata {
            push_record(&mut out, &format!("{}{METADATA_SUFFIX}", self.id), metadata);
        }
        if let Some(name) = &self.filename {
            let seq = filename_to_sequence(name)?;
            push_record(&mut out, &format!("{}{FILENAME_SUFFIX}", self.id), &seq);
        }

        Ok(out)
    }

    /// Parse FASTA text. The first record is the main sequence; later records
    /// are recognised by their id suffix.
    pub fn parse(text: &str) -> Result<Self> {
        let mut records: Vec<(String, String)> = Vec::new();
        for (lineno, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(header) = line.strip_prefix('>') {
                records.push((header.trim().to_string(), String::new()));
            } else if let Some((_, body)) = records.last_mut() {
                body.push_str(line);
            } else {
                bail!("Line {}: sequence data before the first header", lineno + 1);
            }
        }

        let mut records = records.into_iter();
        let Some((header, body)) = records.next() else {
            bail!("Record file contains no sequences");
        };

        let mut fields = header.split_whitespace();
        let id = fields.next().unwrap_or_default().to_string();
        let mut nsym = None;
        for field in fields {
            if let Some(value) = field.strip_prefix("nsym=") {
                nsym = Some(
                    value
                        .parse::<u8>()
                        .with_context(|| format!("Invalid nsym in header: {value}"))?,
                );
            }
        }
        let sequence: Sequence = body
            .parse()
            .with_context(|| format!("Invalid main sequence in record '{id}'"))?;

        let mut metadata = None;
        let mut filename = None;
        for (header, body) in records {
            let record_id = header.split_whitespace().next().unwrap_or_default();
            let seq: Sequence = body
                .parse()
                .with_context(|| format!("Invalid sequence in record '{record_id}'"))?;
            if record_id.ends_with(METADATA_SUFFIX) {
                metadata = Some(seq);
            } else if record_id.ends_with(FILENAME_SUFFIX) {
                filename = Some(sequence_to_filename(&seq)?);
            } else {
                tracing::warn!(record = record_id, "ignoring unknown record");
            }
        }

        Ok(Self {
            id,
            nsym,
            sequence,
            metadata,
            filename,
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read record file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Malformed record file {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_fasta()?)
            .with_context(|| format!("Failed to write record file {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RecordSet {
        RecordSet {
            id: "report".into(),
            nsym: Some(10),
            sequence: "ACGT".repeat(50).parse().unwrap(),
            metadata: Some("ATAT".repeat(50).parse().unwrap()),
            filename: Some("report.txt".into()),
        }
    }

    #[test]
    fn test_layout() {
        let text = sample().to_fasta().unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], ">report nsym=10");
        assert_eq!(lines[1].len(), 80);
        assert_eq!(lines[2].len(), 80);
        assert_eq!(lines[3].len(), 40);
        assert_eq!(lines[4], ">report_metadata");
        assert!(lines.contains(&">report_filename"));
    }

    #[test]
    fn test_parse_round_trip() {
        let records = sample();
        let parsed = RecordSet::parse(&records.to_fasta().unwrap()).unwrap();
        assert_eq!(parsed, records);
    }

    #[test]
    fn test_empty_sequence_record() {
        let records = RecordSet {
            id: "empty".into(),
            nsym: Some(4),
            sequence: Sequence::new(),
            metadata: Some(Sequence::new()),
            filename: None,
        };
        let parsed = RecordSet::parse(&records.to_fasta().unwrap()).unwrap();
        assert_eq!(parsed, records);
    }

    #[test]
    fn test_filename_encoding() {
        // 'A' = 0x41 = 01 00 00 01
        let seq = filename_to_sequence("A").unwrap();
        assert_eq!(seq.to_string(), "CAAC");
        assert_eq!(sequence_to_filename(&seq).unwrap(), "A");

        let unicode = "données.txt";
        let seq = filename_to_sequence(unicode).unwrap();
        assert_eq!(sequence_to_filename(&seq).unwrap(), unicode);
    }

    #[test]
    fn test_missing_metadata_and_header_fields() {
        let parsed = RecordSet::parse(">DNA_Sequence\nACGT\nAC\n").unwrap();
        assert_eq!(parsed.id, "DNA_Sequence");
        assert_eq!(parsed.nsym, None);
        assert_eq!(parsed.sequence.to_string(), "ACGTAC");
        assert!(parsed.metadata.is_none());
        assert!(parsed.filename.is_none());
    }

    #[test]
    fn test_rejects_malformed_input() {
        assert!(RecordSet::parse("").is_err());
        assert!(RecordSet::parse("ACGT\n>x\n").is_err());
        assert!(RecordSet::parse(">x\nACGN\n").is_err());
        assert!(RecordSet::parse(">x nsym=300\nACGT\n").is_err());
    }
}
