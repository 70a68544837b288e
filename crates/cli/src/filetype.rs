//! Guess a file extension from decoded bytes.

use crate::defaults::{TEXT_PRINTABLE_RATIO, TEXT_SNIFF_BYTES};

/// Extension (with leading dot) for `data`, from magic bytes or a printable
/// text heuristic. Falls back to `.bin`.
pub fn detect_extension(data: &[u8]) -> &'static str {
    const SIGNATURES: &[(&[u8], &str)] = &[
        (b"\xff\xd8\xff", ".jpg"),
        (b"\x89PNG\r\n\x1a\n", ".png"),
        (b"GIF87a", ".gif"),
        (b"GIF89a", ".gif"),
        (b"BM", ".bmp"),
        (b"ID3", ".mp3"),
        (b"\xff\xfb", ".mp3"),
        (b"\xff\xf3", ".mp3"),
    ];

    if let Some((_, ext)) = SIGNATURES.iter().find(|(magic, _)| data.starts_with(magic)) {
        return *ext;
    }
    if data.starts_with(b"RIFF") && data.get(8..12) == Some(&b"WAVE"[..]) {
        return ".wav";
    }
    if data.starts_with(b"PK\x03\x04") {
        return zip_flavour(data);
    }
    if data.starts_with(b"%PDF") {
        return ".pdf";
    }
    if data.starts_with(b"\x1f\x8b") {
        return ".gz";
    }
    if data.starts_with(b"PK\x05\x06") {
        return ".zip";
    }
    if looks_like_text(data) {
        return ".txt";
    }
    ".bin"
}

/// Office documents are ZIP archives; tell them apart by member paths.
fn zip_flavour(data: &[u8]) -> &'static str {
    let contains = |needle: &[u8]| data.windows(needle.len()).any(|w| w == needle);
    if contains(b"word/document.xml") {
        ".docx"
    } else if contains(b"xl/worksheets/") {
        ".xlsx"
    } else if contains(b"ppt/slides/") {
        ".pptx"
    } else {
        ".zip"
    }
}

/// More than 80% printable characters in the leading window. Invalid UTF-8
/// is skipped rather than counted.
fn looks_like_text(data: &[u8]) -> bool {
    let window = &data[..data.len().min(TEXT_SNIFF_BYTES)];
    let sample = String::from_utf8_lossy(window);
    let (printable, total) = sample
        .chars()
        .filter(|&c| c != char::REPLACEMENT_CHARACTER)
        .fold((0usize, 0usize), |(p, t), c| {
            let is_printable = (' '..='~').contains(&c) || matches!(c, '\n' | '\r' | '\t');
            (p + usize::from(is_printable), t + 1)
        });
    total > 0 && printable as f64 / total as f64 > TEXT_PRINTABLE_RATIO
}
