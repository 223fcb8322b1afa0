use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use crate::utils::error::{BoxResult, TocError};

/// Create a directory and any parent directories if they don't exist
pub fn create_directory<P: AsRef<Path>>(path: P) -> BoxResult<()> {
    fs::create_dir_all(path.as_ref())?;
    Ok(())
}

/// Read a file to string, or stdin when the path is `-`
pub fn read_input<P: AsRef<Path>>(path: P) -> BoxResult<String> {
    let path = path.as_ref();
    let mut contents = String::new();

    if path == Path::new("-") {
        io::stdin().read_to_string(&mut contents)?;
        return Ok(contents);
    }

    let mut file = fs::File::open(path).map_err(|e| {
        TocError::File(format!("Failed to open {}: {}", path.display(), e))
    })?;
    file.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Write a string to a file, creating the file if it doesn't exist
pub fn write_file<P: AsRef<Path>>(path: P, contents: &str) -> BoxResult<()> {
    // Create parent directories if they don't exist
    if let Some(parent) = path.as_ref().parent() {
        if !parent.as_os_str().is_empty() {
            create_directory(parent)?;
        }
    }

    let mut file = fs::File::create(path.as_ref())?;
    file.write_all(contents.as_bytes())?;
    Ok(())
}
