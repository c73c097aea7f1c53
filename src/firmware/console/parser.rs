pub(super) const CONFIRMATION_WORD: &[u8] = b"YES";

pub(super) fn trim_ascii_whitespace(line: &[u8]) -> &[u8] {
    let mut start = 0usize;
    let mut end = line.len();
    while start < end && line[start].is_ascii_whitespace() {
        start += 1;
    }
    while end > start && line[end - 1].is_ascii_whitespace() {
        end -= 1;
    }
    &line[start..end]
}

/// A menu selection is a single decimal digit.
pub(super) fn parse_menu_key(line: &[u8]) -> Option<u8> {
    match trim_ascii_whitespace(line) {
        [digit] if digit.is_ascii_digit() => Some(digit - b'0'),
        _ => None,
    }
}

/// Case-sensitive: only an upper-case `YES` arms the recovery.
pub(super) fn is_confirmation(line: &[u8]) -> bool {
    trim_ascii_whitespace(line) == CONFIRMATION_WORD
}
