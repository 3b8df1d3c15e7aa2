use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use env_logger::{Builder, Target};

/// Writes every record to the console and, when available, the log file.
pub struct TeeWriter<C: Write, F: Write> {
    console: C,
    file: Option<F>,
}

impl<C: Write, F: Write> TeeWriter<C, F> {
    pub fn new(console: C, file: Option<F>) -> Self {
        Self { console, file }
    }
}

impl<C: Write, F: Write> Write for TeeWriter<C, F> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.console.write_all(buf)?;
        if let Some(file) = self.file.as_mut() {
            // Console-only once the file fails.
            if file.write_all(buf).is_err() {
                self.file = None;
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.console.flush()?;
        if let Some(file) = self.file.as_mut() {
            file.flush()?;
        }
        Ok(())
    }
}

fn open_log_file(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global logger: console + `log_file` (append), filtered by
/// `level` and then `RUST_LOG`.
pub fn init(log_file: &Path, level: &str) {
    let (file, open_error) = match open_log_file(log_file) {
        Ok(file) => (Some(file), None),
        Err(err) => (None, Some(err)),
    };

    Builder::new()
        .parse_filters(level)
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.args()
            )
        })
        .target(Target::Pipe(Box::new(TeeWriter::new(io::stdout(), file))))
        .init();

    if let Some(err) = open_error {
        log::warn!("Failed to open log file {}: {err}", log_file.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn tee_writes_both_destinations() {
        let mut console = Vec::new();
        let mut file = Vec::new();
        {
            let mut tee = TeeWriter::new(&mut console, Some(&mut file));
            tee.write_all(b"INFO hello\n").unwrap();
            tee.flush().unwrap();
        }
        assert_eq!(console, b"INFO hello\n");
        assert_eq!(file, b"INFO hello\n");
    }

    #[test]
    fn tee_without_file_still_writes_console() {
        let mut console = Vec::new();
        let mut tee: TeeWriter<_, Vec<u8>> = TeeWriter::new(&mut console, None);
        tee.write_all(b"WARN only console\n").unwrap();
        assert_eq!(console, b"WARN only console\n");
    }

    #[test]
    fn log_file_is_appended_not_truncated() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("chatapp.log");
        fs::write(&path, "earlier run\n").unwrap();

        let mut tee = TeeWriter::new(io::sink(), Some(open_log_file(&path).unwrap()));
        tee.write_all(b"this run\n").unwrap();
        tee.flush().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "earlier run\nthis run\n");
    }
}
