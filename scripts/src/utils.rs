//! Utilities shared by the presale scripts

use std::{fs::File, io::Read, path::Path};

use json::JsonValue;

/// Parses the JSON file at the given path, callers map the error to their own variant
pub fn get_json_from_file(path: &Path) -> Result<JsonValue, String> {
    let mut file_contents = String::new();
    File::open(path)
        .map_err(|e| format!("{}: {}", path.display(), e))?
        .read_to_string(&mut file_contents)
        .map_err(|e| format!("{}: {}", path.display(), e))?;

    json::parse(&file_contents).map_err(|e| format!("{}: {}", path.display(), e))
}
