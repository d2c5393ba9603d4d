use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};

/// Destination of a generated address-set definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// Write to standard output.
    Stdout,
    /// Replace the contents of a file.
    File(PathBuf),
}

impl Output {
    /// Run `f` against a writer for this destination.
    ///
    /// File destinations are written through a temporary file in the same directory, which is
    /// renamed over the destination only once `f` has succeeded and the data has been flushed.
    /// On failure the temporary file is removed and any existing destination is left untouched.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `f`, or an I/O error encountered while opening, flushing or
    /// renaming the output.
    pub fn write_with<F, T, E>(&self, f: F) -> anyhow::Result<T>
    where
        F: FnOnce(&mut dyn Write) -> Result<T, E>,
        E: Into<anyhow::Error>,
    {
        match self {
            Self::Stdout => {
                let mut stdout = io::stdout().lock();
                let value = f(&mut stdout).map_err(Into::<anyhow::Error>::into)?;
                stdout.flush().context("failed to flush standard output")?;
                Ok(value)
            }
            Self::File(path) => write_atomic(path, f),
        }
    }
}

impl From<Option<PathBuf>> for Output {
    fn from(path: Option<PathBuf>) -> Self {
        path.map_or(Self::Stdout, Self::File)
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => write!(f, "standard output"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

fn temp_path(path: &Path) -> anyhow::Result<PathBuf> {
    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow!("output path '{}' has no file name", path.display()))?;
    let mut temp_name = ".".to_owned();
    temp_name.push_str(&file_name.to_string_lossy());
    temp_name.push_str(".tmp");
    Ok(path.with_file_name(temp_name))
}

fn write_atomic<F, T, E>(path: &Path, f: F) -> anyhow::Result<T>
where
    F: FnOnce(&mut dyn Write) -> Result<T, E>,
    E: Into<anyhow::Error>,
{
    let temp = temp_path(path)?;
    tracing::debug!(path = %path.display(), temp = %temp.display(), "writing output");
    let result = File::create(&temp)
        .with_context(|| format!("failed to create '{}'", temp.display()))
        .and_then(|file| {
            let mut writer = BufWriter::new(file);
            let value = f(&mut writer).map_err(Into::<anyhow::Error>::into)?;
            writer
                .flush()
                .with_context(|| format!("failed to flush '{}'", temp.display()))?;
            Ok(value)
        })
        .and_then(|value| {
            fs::rename(&temp, path)
                .with_context(|| format!("failed to move output into place at '{}'", path.display()))
                .map(|()| value)
        });
    if result.is_err() {
        if let Err(err) = fs::remove_file(&temp) {
            if err.kind() != io::ErrorKind::NotFound {
                tracing::warn!(temp = %temp.display(), %err, "failed to remove temporary file");
            }
        }
    }
    result
}
