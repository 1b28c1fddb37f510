//! Small string utilities shared by the loader and interpreter.

/// `true` if `haystack` begins with `prefix`, byte-for-byte.
pub fn starts_with(haystack: &str, prefix: &str) -> bool {
    haystack.as_bytes().len() >= prefix.as_bytes().len() && &haystack.as_bytes()[..prefix.len()] == prefix.as_bytes()
}

/// Strip a single trailing file extension (the part after the last `.`,
/// including the dot), e.g. `"notes.txt" -> "notes"`. A filename with no
/// `.` is returned unchanged.
pub fn strip_extension(filename: &str) -> &str {
    match filename.rfind('.') {
        Some(idx) if idx > 0 => &filename[..idx],
        _ => filename,
    }
}

/// `true` if `ch` is one of the ASCII digits `0`-`9`.
pub fn is_ascii_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

/// `true` if `ch` is an ASCII letter, `a`-`z` or `A`-`Z`.
pub fn is_ascii_alpha(ch: char) -> bool {
    ch.is_ascii_alphabetic()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_extension_basic() {
        assert_eq!(strip_extension("notes.txt"), "notes");
        assert_eq!(strip_extension("archive.tar.gz"), "archive.tar");
        assert_eq!(strip_extension("noext"), "noext");
        assert_eq!(strip_extension(".hidden"), ".hidden");
    }

    #[test]
    fn starts_with_basic() {
        assert!(starts_with("#include foo", "#include "));
        assert!(!starts_with("#inc", "#include "));
        assert!(!starts_with("nope", "#include "));
    }
}
