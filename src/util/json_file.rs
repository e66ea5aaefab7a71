use std::path::Path;
use std::{fs, io};

use serde::ser::Error as _;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Serializer;

/// Pretty-prints `value` with four space indentation.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    String::from_utf8(buf).map_err(serde_json::Error::custom)
}

/// Replaces the file at `path`, creating its parent directories first.
pub fn write_file(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_to_pretty_json() {
        let value = json!({"rss": "<rss/>", "no": [1, 2]});
        let expected = "{\n    \"no\": [\n        1,\n        2\n    ],\n    \"rss\": \"<rss/>\"\n}";
        assert_eq!(to_pretty_json(&value).unwrap(), expected);
    }

    #[test]
    fn test_non_ascii_is_kept() {
        let value = json!({"title": "Caf\u{e9} \u{2615}"});
        assert_eq!(to_pretty_json(&value).unwrap(), "{\n    \"title\": \"Caf\u{e9} \u{2615}\"\n}");
    }

    #[test]
    fn test_write_file_creates_dirs() -> io::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("out").join("nested").join("archive.json");
        write_file(&path, "[]")?;
        write_file(&path, "[1]")?;
        assert_eq!(fs::read_to_string(&path)?, "[1]");
        Ok(())
    }
}
