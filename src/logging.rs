use std::fs::{self, File, OpenOptions};
use std::path::Path;

use anyhow::Result;
use log::LevelFilter;
use simplelog::WriteLogger;

/// Open `path` for appending, creating parent directories as needed.
fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}

/// Install a file-backed global logger. The terminal belongs to the TUI while
/// a session runs, so diagnostics cannot go to stderr.
pub fn init(path: &Path, level: LevelFilter) -> Result<()> {
    let file = open_log_file(path)?;
    WriteLogger::init(level, simplelog::Config::default(), file)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use log::{Level, Log, Record};
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_file_logger_writes_enabled_levels() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("app.log");
        let file = open_log_file(&path).unwrap();
        let logger = WriteLogger::new(LevelFilter::Warn, simplelog::Config::default(), file);

        logger.log(
            &Record::builder()
                .level(Level::Error)
                .target("typetutor::store")
                .args(format_args!("disk full"))
                .build(),
        );
        logger.log(
            &Record::builder()
                .level(Level::Info)
                .args(format_args!("should be filtered"))
                .build(),
        );
        logger.flush();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("ERROR"));
        assert!(content.contains("disk full"));
        assert!(!content.contains("should be filtered"));
    }

    #[test]
    fn test_open_log_file_appends() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.log");
        fs::write(&path, "earlier line\n").unwrap();
        drop(open_log_file(&path).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "earlier line\n");
    }
}
