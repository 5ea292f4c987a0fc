//! Shared string utilities for column extraction.

/// Returns the byte index of the `n`th (1-based) occurrence of `delimiter`.
///
/// The index is computed by splitting on the delimiter and summing the
/// lengths of the first `n` segments plus one delimiter width per boundary
/// crossed. Returns `None` when `n` is zero or the text has fewer than
/// `n + 1` segments (fewer than `n` delimiters).
///
/// # Examples
///
/// ```
/// use dhcp_lease_parser::util::nth_index_of;
///
/// assert_eq!(nth_index_of("a-bb-ccc", '-', 1), Some(1));
/// assert_eq!(nth_index_of("a-bb-ccc", '-', 2), Some(4));
/// assert_eq!(nth_index_of("a-bb-ccc", '-', 3), None);
/// ```
pub fn nth_index_of(text: &str, delimiter: char, n: usize) -> Option<usize> {
    if n == 0 {
        return None;
    }
    let width = delimiter.len_utf8();
    let mut index = 0;
    let mut segments = text.split(delimiter);
    for crossed in 0..n {
        let segment = segments.next()?;
        index += segment.len();
        if crossed + 1 < n {
            index += width;
        }
    }
    // The nth delimiter exists only if another segment follows.
    segments.next().map(|_| index)
}

/// Returns the text strictly between two byte positions, trimmed.
pub fn between(text: &str, start: usize, end: usize) -> &str {
    text.get(start..end).unwrap_or_default().trim()
}
