use std::fs::File;
use std::fs::OpenOptions;
use std::io::Write;
use std::io::{self};
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use tracing_subscriber::fmt::MakeWriter;

/// A `MakeWriter` that creates the trace log only when the first event is written
#[derive(Clone)]
pub struct LazyFileWriter {
    path: PathBuf,
    file: Arc<Mutex<Option<File>>>,
}

impl LazyFileWriter {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            file: Arc::new(Mutex::new(None)),
        }
    }
}

/// Per-event writer sharing the lazily opened handle
pub struct LazyWriter {
    path: PathBuf,
    file: Arc<Mutex<Option<File>>>,
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

impl LazyWriter {
    fn lock(&self) -> io::Result<MutexGuard<'_, Option<File>>> {
        self.file
            .lock()
            .map_err(|_| io::Error::other("trace log mutex poisoned"))
    }
}

impl Write for LazyWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self.lock()?;

        // (Re)open when nothing is open yet or the log was deleted underneath us
        if guard.is_none() || !self.path.exists() {
            *guard = Some(open_append(&self.path)?);
        }

        if let Some(file) = guard.as_mut()
            && let Ok(bytes) = file.write(buf)
        {
            return Ok(bytes);
        }

        // Stale handle: retry once with a fresh one
        let mut file = open_append(&self.path)?;
        let bytes = file.write(buf)?;
        *guard = Some(file);
        Ok(bytes)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut guard = self.lock()?;

        if !self.path.exists() {
            *guard = None;
            return Ok(());
        }

        match guard.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

impl<'a> MakeWriter<'a> for LazyFileWriter {
    type Writer = LazyWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LazyWriter {
            path: self.path.clone(),
            file: Arc::clone(&self.file),
        }
    }
}
