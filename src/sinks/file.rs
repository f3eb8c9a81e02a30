//! File sinks

use crate::core::message::generate_id;
use crate::core::{LogLevel, LoggerError, Output, Processor, Result};
use std::env;
use std::fs::{self, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// An output named `name` over any writer
pub fn file_based<W, I, P>(name: impl Into<String>, max_level: LogLevel, writer: W, processors: I) -> Output
where
    W: Write + Send + 'static,
    I: IntoIterator<Item = P>,
    P: Into<Arc<Processor>>,
{
    Output::new(name, max_level, writer).with_processors(processors)
}

/// "File": appends to `path`.
///
/// An empty path picks `<tmp>/<uuid>.log`; `-` means standard output.
/// Missing parent directories are created.
pub fn file<I, P>(path: impl AsRef<Path>, max_level: LogLevel, processors: I) -> Result<Output>
where
    I: IntoIterator<Item = P>,
    P: Into<Arc<Processor>>,
{
    file_in(path.as_ref(), &env::temp_dir(), max_level, processors)
}

/// `file` with `default_dir` holding the generated log when `path` is empty
fn file_in<I, P>(path: &Path, default_dir: &Path, max_level: LogLevel, processors: I) -> Result<Output>
where
    I: IntoIterator<Item = P>,
    P: Into<Arc<Processor>>,
{

    if path == Path::new("-") {
        return Ok(file_based("File", max_level, io::stdout(), processors));
    }

    let path: PathBuf = if path.as_os_str().is_empty() {
        let generated = default_dir.join(format!("{}.log", generate_id()));
        eprintln!(
            "[LOGGER WARNING] File output: no path provided, using \"{}\"",
            generated.display()
        );
        generated
    } else {
        path.to_path_buf()
    };

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| {
            LoggerError::file_output(
                path.display().to_string(),
                format!("failed to create directory {}: {}", dir.display(), e),
            )
        })?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| LoggerError::file_output(path.display().to_string(), e.to_string()))?;

    Ok(file_based("File", max_level, BufWriter::new(file), processors))
}
