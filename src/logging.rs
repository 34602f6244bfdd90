//! Diagnostic logging.
//!
//! `tracing` is the front end everywhere in the crate. Events go to stderr and,
//! when a data directory is available, to a daily desktop log file:
//! `<data dir>/logs/YYYY-MM-DD.log`. File writes happen on a background thread
//! so neither the UI frame loop nor the host loop ever blocks on disk I/O.

use chrono::Local;
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Logger manages the desktop log file without blocking the caller.
pub struct Logger {
    /// Channel to send formatted lines to the background thread
    tx: Sender<Vec<u8>>,
    handle: Option<JoinHandle<()>>,
}

impl Logger {
    /// Create a new logger writing into `log_dir` and spawn its writer thread.
    pub fn new(log_dir: PathBuf) -> Result<Self, String> {
        fs::create_dir_all(&log_dir)
            .map_err(|e| format!("Failed to create log directory: {}", e))?;

        let (tx, rx) = unbounded::<Vec<u8>>();
        let handle = thread::Builder::new()
            .name("desktop-log".into())
            .spawn(move || run_logger_thread(rx, log_dir))
            .map_err(|e| format!("Failed to spawn log thread: {}", e))?;

        Ok(Self {
            tx,
            handle: Some(handle),
        })
    }

    /// Stop accepting lines and wait until everything queued is on disk.
    ///
    /// The installed subscriber owns its logger for the life of the process,
    /// so only tests ever close one.
    #[cfg(test)]
    pub fn close(mut self) {
        let handle = self.handle.take();
        drop(self);
        if let Some(handle) = handle {
            let _ = handle.join();
        }
    }
}

/// `io::Write` handle handed to the fmt layer for each event.
pub struct LogLineWriter {
    tx: Sender<Vec<u8>>,
}

impl Write for LogLineWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let _ = self.tx.send(buf.to_vec());
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Logger {
    type Writer = LogLineWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogLineWriter {
            tx: self.tx.clone(),
        }
    }
}

/// Background thread that owns the log file handle
fn run_logger_thread(rx: Receiver<Vec<u8>>, log_dir: PathBuf) {
    let mut current: Option<(String, BufWriter<File>)> = None;

    while let Ok(line) = rx.recv() {
        if let Err(e) = write_log_line(&mut current, &log_dir, &line) {
            eprintln!("desktop log error: {}", e);
        }
    }

    if let Some((_, mut writer)) = current.take() {
        let _ = writer.flush();
    }
}

fn write_log_line(
    current: &mut Option<(String, BufWriter<File>)>,
    log_dir: &Path,
    line: &[u8],
) -> Result<(), String> {
    let date = Local::now().format("%Y-%m-%d").to_string();

    // Roll over at midnight
    let stale = current.as_ref().map_or(true, |(day, _)| *day != date);
    if stale {
        if let Some((_, mut old)) = current.take() {
            let _ = old.flush();
        }
        let path = log_file_path(log_dir, &date);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| format!("Failed to open log file {}: {}", path.display(), e))?;
        *current = Some((date, BufWriter::new(file)));
    }

    let Some((_, writer)) = current.as_mut() else {
        return Ok(());
    };
    writer
        .write_all(line)
        .map_err(|e| format!("Failed to write log line: {}", e))?;
    writer
        .flush()
        .map_err(|e| format!("Failed to flush log: {}", e))?;
    Ok(())
}

fn log_file_path(log_dir: &Path, date: &str) -> PathBuf {
    log_dir.join(format!("{}.log", date))
}

/// Log directory under the shell's data dir.
pub fn log_directory(data_dir: &Path) -> PathBuf {
    data_dir.join("logs")
}

/// Install the global subscriber. `RUST_LOG` overrides `default_level`.
///
/// Returns an error string if a subscriber was already installed.
pub fn init_tracing(default_level: &str, data_dir: Option<&Path>) -> Result<(), String> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let file_logger = match data_dir.map(|dir| Logger::new(log_directory(dir))) {
        Some(Ok(logger)) => Some(logger),
        Some(Err(e)) => {
            eprintln!("desktop log file disabled: {}", e);
            None
        }
        None => None,
    };
    let file_layer = file_logger.map(|logger| fmt::layer().with_ansi(false).with_writer(logger));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .try_init()
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_directory_layout() {
        let dir = log_directory(Path::new("/tmp/duet"));
        assert_eq!(dir, PathBuf::from("/tmp/duet/logs"));
        let file = log_file_path(&dir, "2024-05-01");
        assert!(file.to_string_lossy().ends_with("logs/2024-05-01.log"));
    }

    #[test]
    fn test_logger_writes_dated_file() {
        let tmp = tempfile::tempdir().unwrap();
        let log_dir = log_directory(tmp.path());
        let logger = Logger::new(log_dir.clone()).unwrap();

        {
            let mut writer = logger.make_writer();
            writer.write_all(b"host ready\n").unwrap();
        }
        {
            let mut writer = logger.make_writer();
            writer.write_all(b"menu installed\n").unwrap();
        }
        logger.close();

        let date = Local::now().format("%Y-%m-%d").to_string();
        let content = fs::read_to_string(log_file_path(&log_dir, &date)).unwrap();
        assert_eq!(content, "host ready\nmenu installed\n");
    }
}
