//! External converter adapter.
//!
//! Shells out to a `pdftotext`-style command line tool as an additional
//! fallback tier. The input bytes are written to a temporary file that is
//! removed on every exit path, and the child process runs under a hard
//! wall-clock timeout after which it is killed and the tier reports
//! nothing rather than an error to the caller.

use crate::config::SalvageConfig;
use crate::error::{Result, SalvageError};
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tokio::time::{timeout, Duration};

/// RAII guard for temporary input file cleanup.
struct TempFile {
    path: PathBuf,
}

impl TempFile {
    fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

/// Invokes the configured converter executable on a byte buffer.
pub struct ExternalConverter {
    executable: String,
    timeout: Duration,
}

impl ExternalConverter {
    pub fn from_config(config: &SalvageConfig) -> Self {
        Self {
            executable: config.pdftotext_path.clone(),
            timeout: Duration::from_secs(config.pdftotext_timeout_secs),
        }
    }

    /// Convert PDF bytes to text via the external tool.
    ///
    /// Errors cover the missing executable, non-zero exits, and timeouts;
    /// the orchestrator treats all of them as tier-not-available.
    pub async fn convert(&self, bytes: &[u8]) -> Result<String> {
        let input_path = std::env::temp_dir().join(format!(
            "salvage_{}_{}.pdf",
            std::process::id(),
            uuid::Uuid::new_v4()
        ));
        let _guard = TempFile::new(input_path.clone());
        tokio::fs::write(&input_path, bytes).await?;

        let child = Command::new(&self.executable)
            .arg(&input_path)
            .arg("-")
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                SalvageError::MissingDependency(format!("failed to execute {}: {}", self.executable, e))
            })?;

        let output = match timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => return Err(SalvageError::Io(e)),
            Err(_) => {
                // Child was consumed by wait_with_output; kill_on_drop
                // terminates it now that the future is dropped.
                return Err(SalvageError::converter(format!(
                    "{} timed out after {}s",
                    self.executable,
                    self.timeout.as_secs()
                )));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SalvageError::converter(format!(
                "{} exited with {}: {}",
                self.executable,
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(path: &str, timeout_secs: u64) -> SalvageConfig {
        SalvageConfig {
            pdftotext_path: path.to_string(),
            pdftotext_timeout_secs: timeout_secs,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_missing_executable() {
        let converter = ExternalConverter::from_config(&config_with("/nonexistent/pdftotext-missing", 15));
        let result = converter.convert(b"%PDF-1.4").await;
        assert!(matches!(result, Err(SalvageError::MissingDependency(_))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_timeout_kills_and_returns() {
        use std::io::Write;
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("slow-converter.sh");
        {
            let mut f = std::fs::File::create(&script).unwrap();
            writeln!(f, "#!/bin/sh\nsleep 30").unwrap();
        }
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let converter = ExternalConverter::from_config(&config_with(script.to_str().unwrap(), 1));
        let start = std::time::Instant::now();
        let result = converter.convert(b"%PDF-1.4").await;
        assert!(start.elapsed() < Duration::from_secs(10));
        assert!(matches!(result, Err(SalvageError::Converter { .. })));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_successful_conversion_reads_stdout() {
        use std::io::Write;
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("fake-converter.sh");
        {
            let mut f = std::fs::File::create(&script).unwrap();
            writeln!(f, "#!/bin/sh\necho \"converted text output\"").unwrap();
        }
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let converter = ExternalConverter::from_config(&config_with(script.to_str().unwrap(), 15));
        let out = converter.convert(b"%PDF-1.4").await.unwrap();
        assert!(out.contains("converted text output"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_nonzero_exit_is_converter_error() {
        use std::io::Write;
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("broken-converter.sh");
        {
            let mut f = std::fs::File::create(&script).unwrap();
            writeln!(f, "#!/bin/sh\nexit 3").unwrap();
        }
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let converter = ExternalConverter::from_config(&config_with(script.to_str().unwrap(), 15));
        let result = converter.convert(b"%PDF-1.4").await;
        assert!(matches!(result, Err(SalvageError::Converter { .. })));
    }

    #[tokio::test]
    async fn test_temp_file_cleanup() {
        let before: Vec<_> = leftover_temp_files();
        let converter = ExternalConverter::from_config(&config_with("/nonexistent/pdftotext-missing", 15));
        let _ = converter.convert(b"%PDF-1.4").await;
        let after: Vec<_> = leftover_temp_files();
        assert_eq!(before.len(), after.len());
    }

    fn leftover_temp_files() -> Vec<PathBuf> {
        let prefix = format!("salvage_{}_", std::process::id());
        std::fs::read_dir(std::env::temp_dir())
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with(&prefix))
            })
            .collect()
    }
}
