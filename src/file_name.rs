//!
//! Naming policy for exported files
//!

/// Name used when the user did not provide one
pub const DEFAULT_FILE_NAME: &str = "pixel-art.png";

/// Extension every exported file ends up with
pub const EXPORT_EXTENSION: &str = "png";

const DEFAULT_STEM: &str = "pixel-art";

/// Characters that are not allowed in file names on at least one common platform
const FORBIDDEN_CHARS: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Turn user input into a safe file name that always ends in `.png`
///
/// Whatever follows the last `.` is dropped as the previous extension, path-hostile characters are removed,
/// runs of whitespace become a single `-` and the `png` extension is appended.
pub fn sanitize_file_name(name: &str) -> String {
    let name = match name.trim() {
        "" => DEFAULT_FILE_NAME,
        trimmed => trimmed,
    };
    let stem = match name.rfind('.') {
        Some(i) => &name[..i],
        None => name,
    };

    let mut sanitized = String::with_capacity(stem.len());
    let mut in_whitespace = false;
    for c in stem.chars().filter(|c| !FORBIDDEN_CHARS.contains(c)) {
        if c.is_whitespace() {
            if !in_whitespace {
                sanitized.push('-');
            }
            in_whitespace = true;
        } else {
            sanitized.push(c);
            in_whitespace = false;
        }
    }

    if sanitized.is_empty() {
        sanitized.push_str(DEFAULT_STEM);
    }
    format!("{sanitized}.{EXPORT_EXTENSION}")
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_extension_is_forced() {
        assert_eq!(sanitize_file_name("drawing.PNG"), "drawing.png");
        assert_eq!(sanitize_file_name("drawing.jpg"), "drawing.png");
        assert_eq!(sanitize_file_name("drawing"), "drawing.png");
        assert_eq!(sanitize_file_name("archive.tar.gz"), "archive.tar.png");
    }

    #[test]
    fn test_forbidden_chars_are_removed() {
        assert_eq!(sanitize_file_name(r#"a\b/c:d*e?f"g<h>i|j.png"#), "abcdefghij.png");
        assert_eq!(sanitize_file_name("a / b"), "a-b.png");
    }

    #[test]
    fn test_whitespace_is_collapsed() {
        assert_eq!(sanitize_file_name("my  \t cool art.png"), "my-cool-art.png");
        assert_eq!(sanitize_file_name("  padded  "), "padded.png");
    }

    #[test]
    fn test_defaults() {
        assert_eq!(sanitize_file_name(""), DEFAULT_FILE_NAME);
        assert_eq!(sanitize_file_name("   "), DEFAULT_FILE_NAME);
        assert_eq!(sanitize_file_name(".png"), DEFAULT_FILE_NAME);
        assert_eq!(sanitize_file_name("***.png"), DEFAULT_FILE_NAME);
    }
}
