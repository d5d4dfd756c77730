use std::process::{Child, Command, Stdio};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info, warn};

use crate::core::model::Language;
use crate::narration::Narrator;

/// Substitutes `{voice}` and `{text}` in each argument.
pub fn render_args(args: &[String], text: &str, language: Language) -> Vec<String> {
    args.iter()
        .map(|arg| {
            arg.replace("{voice}", language.voice())
                .replace("{text}", text)
        })
        .collect()
}

/// Runs an external TTS program per utterance.
pub struct CommandNarrator {
    command: String,
    args: Vec<String>,
    current: Mutex<Option<Child>>,
    // Only the first spawn failure is logged as a warning
    spawn_failed: AtomicBool,
}

impl CommandNarrator {
    pub fn new(command: String, args: Vec<String>) -> Self {
        Self {
            command,
            args,
            current: Mutex::new(None),
            spawn_failed: AtomicBool::new(false),
        }
    }

    fn stop_current(current: &mut Option<Child>) {
        if let Some(mut child) = current.take() {
            match child.try_wait() {
                Ok(Some(_)) => {}
                _ => {
                    debug!("Interrupting utterance (pid {})", child.id());
                    let _ = child.kill();
                    let _ = child.wait();
                }
            }
        }
    }
}

impl Narrator for CommandNarrator {
    fn name(&self) -> &str {
        &self.command
    }

    fn speak(&self, text: &str, language: Language) {
        info!("Narration [{}]: {}", language.tag(), text);
        let Ok(mut current) = self.current.lock() else {
            warn!("Narrator lock poisoned, skipping utterance");
            return;
        };
        Self::stop_current(&mut current);

        let spawned = Command::new(&self.command)
            .args(render_args(&self.args, text, language))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        match spawned {
            Ok(child) => *current = Some(child),
            Err(e) => {
                if !self.spawn_failed.swap(true, Ordering::Relaxed) {
                    warn!("Failed to run narration command '{}': {}", self.command, e);
                } else {
                    debug!("Narration command '{}' unavailable: {}", self.command, e);
                }
            }
        }
    }
}

impl Drop for CommandNarrator {
    fn drop(&mut self) {
        if let Ok(mut current) = self.current.lock() {
            Self::stop_current(&mut current);
        }
    }
}
