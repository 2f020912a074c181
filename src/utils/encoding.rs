//! Text file reading with an encoding fallback chain.
//!
//! READMEs and manifests are almost always UTF-8, but hand-edited files from
//! older projects show up as Latin-1 or UTF-16 often enough that a strict
//! `read_to_string` would silently drop whole metadata halves. The chain is:
//! byte-order mark, strict UTF-8, `chardetng` guess, lossy UTF-8.

use anyhow::{Context, Result};
use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8};
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub const DEFAULT_SAMPLE_SIZE: usize = 8192;

fn read_sample(path: &Path, sample_size: usize) -> std::io::Result<Vec<u8>> {
    let mut file = File::open(path)?;
    let mut sample = vec![0u8; sample_size];
    let n = file.read(&mut sample)?;
    sample.truncate(n);
    Ok(sample)
}

/// Encoding announced by a byte-order mark, if any.
fn bom_encoding(bytes: &[u8]) -> Option<&'static Encoding> {
    Encoding::for_bom(bytes).map(|(encoding, _)| encoding)
}

/// Best guess for the encoding of `bytes`.
pub fn detect_encoding(bytes: &[u8]) -> &'static Encoding {
    if let Some(encoding) = bom_encoding(bytes) {
        return encoding;
    }
    if std::str::from_utf8(bytes).is_ok() {
        return UTF_8;
    }
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    detector.guess(None, true)
}

/// Heuristic binary check on the leading bytes of a file: any NUL byte, or
/// fewer than 70% printable ASCII bytes. Unreadable files count as binary.
pub fn is_binary_file(path: &Path, sample_size: usize) -> bool {
    let Ok(sample) = read_sample(path, sample_size) else {
        return true;
    };
    if sample.is_empty() {
        return false;
    }
    if bom_encoding(&sample).is_some_and(|e| e == UTF_16LE || e == UTF_16BE) {
        return false;
    }
    if sample.contains(&0) {
        return true;
    }
    let printable = sample
        .iter()
        .filter(|&&b| (32..=126).contains(&b) || matches!(b, b'\t' | b'\n' | b'\r') || b >= 0x80)
        .count();
    (printable as f64 / sample.len() as f64) < 0.70
}

/// Read a file to a `String`, decoding with the detected (or explicit) encoding.
///
/// Returns the content, truncated to `max_chars` characters when given, and
/// the lower-cased name of the encoding that was used.
pub fn read_file_safe(
    path: &Path,
    max_chars: Option<usize>,
    encoding: Option<&str>,
) -> Result<(String, String)> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    let encoding = encoding
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or_else(|| detect_encoding(&bytes[..bytes.len().min(DEFAULT_SAMPLE_SIZE * 8)]));

    // `decode` strips a matching BOM and replaces malformed sequences.
    let (decoded, used, _had_errors) = encoding.decode(&bytes);

    let content = match max_chars {
        Some(limit) => decoded.chars().take(limit).collect(),
        None => decoded.into_owned(),
    };
    Ok((content, used.name().to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_with(bytes: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("tmp");
        file.write_all(bytes).expect("write");
        file.flush().expect("flush");
        file
    }

    #[test]
    fn reads_plain_utf8() {
        let file = temp_with("Résumé builder 🚀".as_bytes());
        let (content, encoding) = read_file_safe(file.path(), None, None).expect("read");
        assert_eq!(content, "Résumé builder 🚀");
        assert_eq!(encoding, "utf-8");
    }

    #[test]
    fn strips_utf8_bom() {
        let mut bytes = vec![0xef, 0xbb, 0xbf];
        bytes.extend_from_slice(b"# Title");
        let file = temp_with(&bytes);
        let (content, _) = read_file_safe(file.path(), None, None).expect("read");
        assert_eq!(content, "# Title");
    }

    #[test]
    fn decodes_utf16_with_bom() {
        let mut bytes = vec![0xff, 0xfe];
        for unit in "# Hi".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        let file = temp_with(&bytes);
        let (content, encoding) = read_file_safe(file.path(), None, None).expect("read");
        assert_eq!(content, "# Hi");
        assert_eq!(encoding, "utf-16le");
        assert!(!is_binary_file(file.path(), DEFAULT_SAMPLE_SIZE));
    }

    #[test]
    fn falls_back_for_latin1() {
        let file = temp_with(b"caf\xe9 cr\xe8me au lait, tr\xe8s bon");
        let (content, _) = read_file_safe(file.path(), None, None).expect("read");
        assert!(content.starts_with("caf"));
        assert!(!content.contains('\u{fffd}'));
    }

    #[test]
    fn truncates_by_characters() {
        let file = temp_with("Hello, world!".as_bytes());
        let (content, _) = read_file_safe(file.path(), Some(5), None).expect("read");
        assert_eq!(content, "Hello");
    }

    #[test]
    fn binary_detection() {
        assert!(is_binary_file(temp_with(&[0x00, 0x01, 0x02]).path(), DEFAULT_SAMPLE_SIZE));
        assert!(!is_binary_file(temp_with(b"fn main() {}\n").path(), DEFAULT_SAMPLE_SIZE));
        assert!(!is_binary_file(temp_with(b"").path(), DEFAULT_SAMPLE_SIZE));
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(read_file_safe(Path::new("/definitely/not/here.md"), None, None).is_err());
    }
}
