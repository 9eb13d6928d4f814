use anyhow::{Context, Result};
use rustyline::error::ReadlineError;
use rustyline::{Config, DefaultEditor, EditMode};

/// Outcome of a single prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    Line(String),
    Interrupted,
    Eof,
    Failed(String),
}

/// Source of user input for the interactive shell.
pub trait LineReader {
    /// Reads a line and remembers it for recall.
    fn read_line(&mut self, prompt: &str) -> ReadOutcome;

    /// Reads a line that must never be recalled later, such as an API key.
    fn read_secret(&mut self, prompt: &str) -> ReadOutcome;
}

/// Line editor on the controlling terminal. History is kept in memory only.
pub struct Terminal {
    editor: DefaultEditor,
}

impl Terminal {
    pub fn new() -> Result<Self> {
        let config = Config::builder()
            .edit_mode(EditMode::Emacs)
            .auto_add_history(false)
            .build();

        let editor = DefaultEditor::with_config(config).context("failed to initialise line editor")?;
        Ok(Terminal { editor })
    }

    fn read(&mut self, prompt: &str, record: bool) -> ReadOutcome {
        match self.editor.readline(prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if record && !trimmed.is_empty() {
                    if let Err(e) = self.editor.add_history_entry(trimmed) {
                        log::debug!("could not record history entry: {}", e);
                    }
                }
                ReadOutcome::Line(line)
            }
            Err(ReadlineError::Interrupted) => ReadOutcome::Interrupted,
            Err(ReadlineError::Eof) => ReadOutcome::Eof,
            Err(err) => ReadOutcome::Failed(format!("Error reading input: {}", err)),
        }
    }
}

impl LineReader for Terminal {
    fn read_line(&mut self, prompt: &str) -> ReadOutcome {
        self.read(prompt, true)
    }

    fn read_secret(&mut self, prompt: &str) -> ReadOutcome {
        self.read(prompt, false)
    }
}
