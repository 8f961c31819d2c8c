//! JSON persistence for ~/.moonshot/ state files.
//!
//! The stall keeps its config, inventory, statistics and recent-wins list
//! as small JSON documents. A missing or unreadable file always means "use
//! defaults", never an error, so a fresh machine or a wiped save directory
//! can still run an event.

use std::fs;
use std::io;
use std::path::PathBuf;

/// Get the ~/.moonshot/ directory path, creating it if needed.
pub fn data_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(".moonshot");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get the full path for a state file in ~/.moonshot/.
pub fn state_path(filename: &str) -> io::Result<PathBuf> {
    Ok(data_dir()?.join(filename))
}

/// Load a JSON file from ~/.moonshot/, returning `T::default()` if missing
/// or invalid.
pub fn load_json_or_default<T: Default + serde::de::DeserializeOwned>(filename: &str) -> T {
    let path = match state_path(filename) {
        Ok(p) => p,
        Err(_) => return T::default(),
    };
    match fs::read_to_string(&path) {
        Ok(json) => serde_json::from_str(&json).unwrap_or_default(),
        Err(_) => T::default(),
    }
}

/// Save a value as pretty-printed JSON to ~/.moonshot/.
pub fn save_json<T: serde::Serialize>(filename: &str, data: &T) -> io::Result<()> {
    let path = state_path(filename)?;
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)?;
    Ok(())
}
