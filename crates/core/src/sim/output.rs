//! Output writing.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::common::constants::{EXECUTION_FILE, STATUS_FILE};
use crate::common::{SimError, SimResult};
use crate::events::EventLog;
use crate::process::StatusLog;

/// Writes `execution.txt` and `system_status.txt` into `dir`, creating it if needed.
///
/// Returns the paths written, execution log first.
///
/// # Errors
///
/// Returns [`SimError::Io`] if the directory or either file cannot be written.
pub fn write_outputs(
    dir: &Path,
    execution: &EventLog,
    status: &StatusLog,
) -> SimResult<(PathBuf, PathBuf)> {
    fs::create_dir_all(dir).map_err(|e| SimError::io(dir, e))?;

    let execution_path = dir.join(EXECUTION_FILE);
    fs::write(&execution_path, execution.to_string())
        .map_err(|e| SimError::io(&execution_path, e))?;

    let status_path = dir.join(STATUS_FILE);
    fs::write(&status_path, status.as_str()).map_err(|e| SimError::io(&status_path, e))?;

    info!(
        execution = %execution_path.display(),
        status = %status_path.display(),
        "outputs written"
    );
    Ok((execution_path, status_path))
}
