//! Text decoding and delimiter sniffing

use crate::constants::{CANDIDATE_DELIMITERS, DELIMITER_SNIFF_LINES};
use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use tracing::debug;

/// Decode source bytes to text
///
/// A byte-order mark selects its encoding and is stripped. Without one the
/// bytes are read as UTF-8, falling back to Windows-1252 (the usual encoding
/// of spreadsheet exports saved on Windows, a superset of Latin-1).
pub fn decode_bytes(bytes: &[u8]) -> String {
    if let Some((encoding, bom_length)) = Encoding::for_bom(bytes) {
        debug!("Byte-order mark found, decoding as {}", encoding.name());
        let (text, _) = encoding.decode_without_bom_handling(&bytes[bom_length..]);
        return text.into_owned();
    }

    match UTF_8.decode_without_bom_handling_and_without_replacement(bytes) {
        Some(text) => text.into_owned(),
        None => {
            debug!("Input is not valid UTF-8, decoding as {}", WINDOWS_1252.name());
            let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
            text.into_owned()
        }
    }
}

/// Pick the delimiter that splits the leading lines most consistently
///
/// Each candidate is scored by how many of the first non-blank lines contain
/// it and, on ties, by how many lines share the most common field count.
/// Falls back to a comma when no candidate appears at all.
pub fn sniff_delimiter(text: &str) -> u8 {
    let lines: Vec<&str> = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .take(DELIMITER_SNIFF_LINES)
        .collect();

    let best = CANDIDATE_DELIMITERS
        .iter()
        .map(|&delimiter| (delimiter, score(&lines, delimiter)))
        .filter(|(_, (present, _))| *present > 0)
        .max_by(|(_, a), (_, b)| a.cmp(b));

    let delimiter = best.map_or(b',', |(delimiter, _)| delimiter);
    debug!("Sniffed delimiter {:?}", char::from(delimiter));
    delimiter
}

fn score(lines: &[&str], delimiter: u8) -> (usize, usize) {
    let delimiter = char::from(delimiter);
    let counts: Vec<usize> = lines
        .iter()
        .map(|line| line.matches(delimiter).count())
        .collect();

    let present = counts.iter().filter(|&&count| count > 0).count();

    let consistent = counts
        .iter()
        .filter(|&&count| count > 0)
        .map(|count| counts.iter().filter(|&other| other == count).count())
        .max()
        .unwrap_or(0);

    (present, consistent)
}
