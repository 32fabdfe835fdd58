/// Characters rejected by at least one common filesystem.
const ILLEGAL_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Strip characters that cannot appear in a filename and trim the result.
pub fn sanitize_filename(text: &str) -> String {
    text.chars()
        .filter(|c| !ILLEGAL_CHARS.contains(c))
        .collect::<String>()
        .trim()
        .to_string()
}
