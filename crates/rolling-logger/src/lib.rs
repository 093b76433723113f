//! Rolling file logger for Tauri apps.
//!
//! Installs a `tracing` subscriber that writes to size-capped files in the
//! app log directory and to stderr, bridges `log` records, and keeps the
//! most recent lines in memory so the app can show them.

use std::collections::VecDeque;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024;
pub const DEFAULT_MAX_FILES: usize = 5;
pub const DEFAULT_RING_CAPACITY: usize = 200;

static RING: OnceLock<Ring> = OnceLock::new();

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub log_dir: PathBuf,
    /// File stem, `<app_name>.log`
    pub app_name: String,
    pub max_file_size: u64,
    /// Current file plus rotated ones
    pub max_files: usize,
    pub ring_capacity: usize,
    pub level: LevelFilter,
    pub stderr: bool,
}

impl LoggerConfig {
    pub fn new(log_dir: impl Into<PathBuf>, app_name: &str) -> Self {
        Self {
            log_dir: log_dir.into(),
            app_name: app_name.to_string(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            max_files: DEFAULT_MAX_FILES,
            ring_capacity: DEFAULT_RING_CAPACITY,
            level: if cfg!(debug_assertions) {
                LevelFilter::DEBUG
            } else {
                LevelFilter::INFO
            },
            stderr: true,
        }
    }
}

/// Bounded buffer of recent lines
#[derive(Debug, Clone)]
pub struct Ring {
    lines: Arc<Mutex<VecDeque<String>>>,
    capacity: usize,
}

impl Ring {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    fn push(&self, line: &str) {
        if self.capacity == 0 {
            return;
        }
        let mut lines = self.lines.lock().unwrap_or_else(|e| e.into_inner());
        while lines.len() >= self.capacity {
            lines.pop_front();
        }
        lines.push_back(line.to_string());
    }

    pub fn snapshot(&self) -> Vec<String> {
        let lines = self.lines.lock().unwrap_or_else(|e| e.into_inner());
        lines.iter().cloned().collect()
    }
}

struct RollingState {
    dir: PathBuf,
    stem: String,
    max_file_size: u64,
    max_files: usize,
    file: File,
    size: u64,
}

impl RollingState {
    fn path(&self, index: usize) -> PathBuf {
        if index == 0 {
            self.dir.join(format!("{}.log", self.stem))
        } else {
            self.dir.join(format!("{}.log.{}", self.stem, index))
        }
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;
        let oldest = self.max_files.saturating_sub(1);
        if oldest == 0 {
            self.file = File::create(self.path(0))?;
            self.size = 0;
            return Ok(());
        }
        let _ = fs::remove_file(self.path(oldest));
        for index in (0..oldest).rev() {
            let from = self.path(index);
            if from.exists() {
                fs::rename(&from, self.path(index + 1))?;
            }
        }
        self.file = File::create(self.path(0))?;
        self.size = 0;
        Ok(())
    }
}

/// File writer that rotates once the current file reaches the size cap
#[derive(Clone)]
pub struct RollingWriter {
    state: Arc<Mutex<RollingState>>,
    ring: Ring,
}

impl RollingWriter {
    pub fn open(config: &LoggerConfig, ring: Ring) -> io::Result<Self> {
        fs::create_dir_all(&config.log_dir)?;
        let path = config.log_dir.join(format!("{}.log", config.app_name));
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let size = file.metadata()?.len();
        Ok(Self {
            state: Arc::new(Mutex::new(RollingState {
                dir: config.log_dir.clone(),
                stem: config.app_name.clone(),
                max_file_size: config.max_file_size,
                max_files: config.max_files.max(1),
                file,
                size,
            })),
            ring,
        })
    }

    /// Path of the file currently written to
    pub fn current_path(&self) -> PathBuf {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.path(0)
    }
}

impl Write for RollingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if state.size > 0 && state.size + buf.len() as u64 > state.max_file_size {
            state.rotate()?;
        }
        state.file.write_all(buf)?;
        state.size += buf.len() as u64;
        drop(state);

        for line in String::from_utf8_lossy(buf).lines() {
            if !line.trim().is_empty() {
                self.ring.push(line);
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.file.flush()
    }
}

impl<'a> MakeWriter<'a> for RollingWriter {
    type Writer = RollingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Local wall-clock timestamps
struct LocalTime;

impl FormatTime for LocalTime {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

/// Install the global logger with default limits
pub fn init_logger(log_dir: impl AsRef<Path>, app_name: &str) -> Result<(), String> {
    init_logger_with(LoggerConfig::new(log_dir.as_ref(), app_name))
}

pub fn init_logger_with(config: LoggerConfig) -> Result<(), String> {
    let ring = RING.get_or_init(|| Ring::new(config.ring_capacity)).clone();
    let writer = RollingWriter::open(&config, ring)
        .map_err(|e| format!("Failed to open log file in {}: {}", config.log_dir.display(), e))?;

    let file_layer = tracing_subscriber::fmt::layer()
        .with_timer(LocalTime)
        .with_ansi(false)
        .with_writer(writer);
    let stderr_layer = config.stderr.then(|| {
        tracing_subscriber::fmt::layer()
            .with_timer(LocalTime)
            .with_writer(io::stderr)
    });

    tracing_subscriber::registry()
        .with(config.level)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| format!("Failed to install logger: {}", e))?;

    log::info!("{} logging to {}", config.app_name, config.log_dir.display());
    Ok(())
}

pub fn info(message: &str) -> Result<(), String> {
    tracing::info!("{}", message);
    Ok(())
}

pub fn error(message: &str) -> Result<(), String> {
    tracing::error!("{}", message);
    Ok(())
}

/// Most recent lines written by the installed logger, oldest first
pub fn recent_lines() -> Vec<String> {
    RING.get().map(Ring::snapshot).unwrap_or_default()
}
