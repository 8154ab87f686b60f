//! Scripted `ConsoleApi` used by the console-level tests

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::console::ConsoleApi;

pub struct ScriptedConsole {
    command_ok:     bool,
    output:         String,
    panic_on_fetch: bool,
    commands:       Mutex<Vec<String>>,
    fetches:        AtomicUsize,
}

impl ScriptedConsole {
    pub fn new(command_ok: bool, output: &str) -> Self {
        Self {
            command_ok,
            output: output.to_string(),
            panic_on_fetch: false,
            commands: Mutex::new(Vec::new()),
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn panicking() -> Self {
        Self {
            panic_on_fetch: true,
            ..Self::new(true, "")
        }
    }

    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConsoleApi for ScriptedConsole {
    async fn execute_server_command(&self, command: &str) -> bool {
        self.commands.lock().unwrap().push(command.to_string());
        self.command_ok
    }

    async fn get_output(&self, _size: u32) -> String {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        assert!(!self.panic_on_fetch, "console backend crashed");
        self.output.clone()
    }
}
