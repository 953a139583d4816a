use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::error::Result;

/// Serializes `value` as indented JSON. Non-ASCII text is written as is.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T, indent: usize) -> Result<Vec<u8>> {
    let indent = " ".repeat(indent);
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    Ok(buffer)
}

/// Writes the whole document next to `path` first and renames it into place,
/// so a failed run never leaves a truncated file behind.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T, indent: usize) -> Result<()> {
    let json = to_pretty_json(value, indent)?;

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = tmp_path_for(path);
    let result = (|| -> Result<()> {
        let mut writer = BufWriter::new(File::create(&tmp_path)?);
        writer.write_all(&json)?;
        writer.flush()?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    })();

    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut file_name = path.file_name().unwrap_or_default().to_os_string();
    file_name.push(".tmp");
    path.with_file_name(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keeps_non_ascii_and_indent() {
        let json = to_pretty_json(&json!({"name": "Begoña"}), 2).unwrap();
        assert_eq!(String::from_utf8(json).unwrap(), "{\n  \"name\": \"Begoña\"\n}");

        let json = to_pretty_json(&json!(["Deusto"]), 4).unwrap();
        assert_eq!(String::from_utf8(json).unwrap(), "[\n    \"Deusto\"\n]");
    }

    #[test]
    fn writes_file_and_creates_parent() {
        let dir = std::env::temp_dir()
            .join(format!("bilbobus-data-output-{}", std::process::id()))
            .join("nested");
        let path = dir.join("lines.json");

        write_json(&path, &json!({"lines": []}), 2).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "{\n  \"lines\": []\n}");
        assert!(!tmp_path_for(&path).exists());
        fs::remove_dir_all(dir.parent().unwrap()).unwrap();
    }
}
