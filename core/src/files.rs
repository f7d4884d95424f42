//! File locations and whole-file I/O at the edges of the pipeline.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ConvertError, Result};

/// Export file name looked up in `~/Downloads` when no input is given.
pub const DEFAULT_INPUT_FILE: &str = "Team Resources-Grid view.csv";

/// Output directory, relative to the project root.
pub(crate) const OUTPUT_DIR: &str = "supabase";
/// Output file name inside [`OUTPUT_DIR`].
pub(crate) const OUTPUT_FILE: &str = "insert-resources.sql";

/// Default CSV location: `$HOME/Downloads/Team Resources-Grid view.csv`.
pub fn default_input_path() -> PathBuf {
    let home = std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    home.join("Downloads").join(DEFAULT_INPUT_FILE)
}

/// Output path two directories above `program`, under `supabase/`.
///
/// For `/repo/bin/resources-sql` this is `/repo/supabase/insert-resources.sql`.
pub fn output_path_for(program: &Path) -> PathBuf {
    let root = program.ancestors().nth(2).unwrap_or_else(|| Path::new("."));
    root.join(OUTPUT_DIR).join(OUTPUT_FILE)
}

/// Default output path derived from the running executable.
///
/// # Errors
///
/// Returns [`ConvertError::Io`] if the executable path cannot be resolved.
pub fn default_output_path() -> Result<PathBuf> {
    let exe = std::env::current_exe().map_err(|err| ConvertError::io("<current exe>", err))?;
    Ok(output_path_for(&exe))
}

/// Reads the whole CSV file as UTF-8.
///
/// # Errors
///
/// Returns [`ConvertError::InputNotFound`] if `path` does not exist and
/// [`ConvertError::Io`] if it cannot be read or is not valid UTF-8.
pub fn read_input(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(ConvertError::InputNotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path).map_err(|err| ConvertError::io(path, err))?;
    debug!(path = %path.display(), bytes = content.len(), "read input");
    Ok(content)
}

/// Writes the script, creating parent directories and replacing any
/// existing file.
pub fn write_output(path: &Path, sql: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|err| ConvertError::io(parent, err))?;
        }
    }
    fs::write(path, sql).map_err(|err| ConvertError::io(path, err))?;
    debug!(path = %path.display(), bytes = sql.len(), "wrote output");
    Ok(())
}
