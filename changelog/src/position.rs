use std::ops::Range;

/// Offset just past the last line in `range` that has non-whitespace content.
///
/// Falls back to `range.start` when the range is blank.
pub fn end_of_last_content_line(content: &str, range: Range<usize>) -> usize {
    let slice = &content[range.clone()];
    let trimmed_len = slice.trim_end().len();
    if trimmed_len == 0 {
        return range.start;
    }

    slice[trimmed_len..]
        .find('\n')
        .map_or(range.end, |newline| range.start + trimmed_len + newline + 1)
}

/// Inserts `insertion` at `position`, starting a new line first when the
/// text before it does not end with one.
pub fn splice_lines(content: &str, position: usize, insertion: &str) -> String {
    let (before, after) = content.split_at(position);
    let mut result = String::with_capacity(content.len() + insertion.len() + 1);
    result.push_str(before);
    if !before.is_empty() && !before.ends_with('\n') {
        result.push('\n');
    }
    result.push_str(insertion);
    result.push_str(after);
    result
}
