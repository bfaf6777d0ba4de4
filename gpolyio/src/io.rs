use std::io::Write;
use std::path::Path;

use serde_json::Value;

use gpolyutil::Result;

pub fn read_json<P: AsRef<Path>>(path: P) -> Result<Value> {
    let contents = fs_err::read_to_string(path.as_ref())?;
    let doc = serde_json::from_str(&contents)?;
    Ok(doc)
}

/// Pretty-prints a JSON document to a file, creating parent directories as needed.
pub fn write_json<P: AsRef<Path>>(path: P, doc: &Value) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs_err::create_dir_all(parent)?;
        }
    }
    let mut file = fs_err::File::create(path)?;
    file.write_all(serde_json::to_string_pretty(doc)?.as_bytes())?;
    Ok(())
}
