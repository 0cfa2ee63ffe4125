//! Byte markers recognised in a carrier and the helpers that search for them.

use std::ops::Range;

/// Every carrier must start with these bytes.
pub const PDF_SIGNATURE: &[u8] = b"%PDF-";

/// The package is appended after the last occurrence of this marker.
pub const EOF_MARKER: &[u8] = b"%%EOF";

/// Opens the hidden package.
pub const PACKAGE_START: &[u8] = b"<<HIDDEN_DATA_START>>";

/// Closes the hidden package.
pub const PACKAGE_END: &[u8] = b"<<HIDDEN_DATA_END>>";

/// First occurrence of `needle` in `haystack` at or after `start`.
pub fn find_subslice(haystack: &[u8], needle: &[u8], start: usize) -> Option<usize> {
    if needle.is_empty() || start >= haystack.len() {
        return None;
    }
    haystack[start..]
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|pos| start + pos)
}

/// Last occurrence of `needle` in `haystack` that starts at or after `start`.
pub fn rfind_subslice(haystack: &[u8], needle: &[u8], start: usize) -> Option<usize> {
    if needle.is_empty() || start >= haystack.len() {
        return None;
    }
    haystack[start..]
        .windows(needle.len())
        .rposition(|w| w == needle)
        .map(|pos| start + pos)
}

/// Offset immediately after the last `%%EOF` marker.
#[tracing::instrument(level = "debug", skip(data), fields(data_len = data.len()))]
pub fn find_eof_offset(data: &[u8]) -> Option<usize> {
    rfind_subslice(data, EOF_MARKER, 0).map(|pos| pos + EOF_MARKER.len())
}

/// Byte range of the package body: strictly between the end of the first
/// `PACKAGE_START` and the start of the last `PACKAGE_END` that follows it.
///
/// Returns `None` when there is no start marker, or no end marker after it.
/// An end marker that only appears before the start marker does not count.
#[tracing::instrument(level = "debug", skip(data), fields(data_len = data.len()))]
pub fn locate_package(data: &[u8]) -> Option<Range<usize>> {
    let start = find_subslice(data, PACKAGE_START, 0)? + PACKAGE_START.len();
    let end = rfind_subslice(data, PACKAGE_END, start)?;
    tracing::debug!(start, end, "package markers located");
    Some(start..end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_last_eof_when_multiple() {
        let pdf = b"%PDF-1.4\n%%EOF\nextra%%EOF\n";
        assert_eq!(find_eof_offset(pdf), Some(pdf.len() - 1));
    }

    #[test]
    fn missing_eof_is_none() {
        assert_eq!(find_eof_offset(b"%PDF-1.4\nno trailer"), None);
    }

    #[test]
    fn locates_package_between_markers() {
        let data = b"%%EOF\n<<HIDDEN_DATA_START>>abc<<HIDDEN_DATA_END>>\n";
        let range = locate_package(data).unwrap();
        assert_eq!(&data[range], b"abc");
    }

    #[test]
    fn reversed_markers_are_not_a_package() {
        let data = b"<<HIDDEN_DATA_END>>abc<<HIDDEN_DATA_START>>";
        assert_eq!(locate_package(data), None);
    }

    #[test]
    fn end_marker_inside_payload_is_skipped() {
        let data = b"<<HIDDEN_DATA_START>>a<<HIDDEN_DATA_END>>b<<HIDDEN_DATA_END>>";
        let range = locate_package(data).unwrap();
        assert_eq!(&data[range], b"a<<HIDDEN_DATA_END>>b");
    }

    #[test]
    fn adjacent_markers_give_empty_package() {
        let data = b"<<HIDDEN_DATA_START>><<HIDDEN_DATA_END>>";
        let range = locate_package(data).unwrap();
        assert!(range.is_empty());
    }

    #[test]
    fn find_subslice_respects_start() {
        assert_eq!(find_subslice(b"abcabc", b"abc", 1), Some(3));
        assert_eq!(find_subslice(b"abc", b"", 0), None);
        assert_eq!(find_subslice(b"abc", b"abc", 3), None);
    }
}
