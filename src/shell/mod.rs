mod state;

pub use state::{ShellEvent, ShellState};

use colored::*;
use log::{debug, warn};

use crate::answer::AnswerService;
use crate::config::Config;
use crate::question::normalize;
use crate::terminal::{LineReader, ReadOutcome};

const RULE_WIDTH: usize = 70;

/// Interactive question/answer loop on top of a [`LineReader`].
pub struct Shell<R: LineReader> {
    reader: R,
    answers: AnswerService,
    credential: String,
    state: ShellState,
}

/// Returns the API key from the config, or asks for one.
///
/// `None` means the user declined to provide a key.
pub fn acquire_credential<R: LineReader>(config: &Config, reader: &mut R) -> Option<String> {
    if let Some(key) = &config.api_key {
        debug!("using API key from environment");
        return Some(key.clone());
    }

    println!("\nNo GEMINI_API_KEY found in environment variables.");
    println!("Please enter your Gemini API key (or press Enter to exit):");

    match reader.read_secret("API Key: ") {
        ReadOutcome::Line(line) => {
            let key = line.trim();
            if key.is_empty() {
                None
            } else {
                Some(key.to_string())
            }
        }
        ReadOutcome::Interrupted | ReadOutcome::Eof => None,
        ReadOutcome::Failed(e) => {
            warn!("could not read API key: {}", e);
            None
        }
    }
}

pub fn print_banner() {
    println!("{}", rule('='));
    println!("{}", "Question-and-Answering CLI Application".bright_green());
    println!("{}", rule('='));
}

impl<R: LineReader> Shell<R> {
    pub fn new(reader: R, answers: AnswerService, credential: String) -> Self {
        Shell {
            reader,
            answers,
            credential,
            state: ShellState::AwaitingCredential.next(ShellEvent::CredentialAcquired),
        }
    }

    pub fn state(&self) -> &ShellState {
        &self.state
    }

    pub async fn run(&mut self) {
        while !self.state.is_terminated() {
            let event = match self.state.clone() {
                ShellState::AwaitingCredential => ShellEvent::CredentialAcquired,
                ShellState::Ready | ShellState::Help => {
                    self.show_help();
                    if self.state == ShellState::Ready {
                        ShellEvent::BannerShown
                    } else {
                        ShellEvent::HelpShown
                    }
                }
                ShellState::Reading => self.read_question(),
                ShellState::Answering(question) => self.answer(&question).await,
                ShellState::Terminated => break,
            };

            let next = self.state.next(event.clone());
            if next.is_terminated() {
                self.say_farewell(&event);
            }
            self.state = next;
        }
    }

    fn read_question(&mut self) -> ShellEvent {
        println!("{}", rule('-'));
        match self.reader.read_line("\nYour Question: ") {
            ReadOutcome::Line(line) => ShellEvent::Line(line),
            ReadOutcome::Interrupted => ShellEvent::Interrupted,
            ReadOutcome::Eof => ShellEvent::EndOfInput,
            ReadOutcome::Failed(e) => {
                println!("\n{} {}", "✗ Error:".red(), e);
                println!("Please try again.");
                ShellEvent::Failed(e)
            }
        }
    }

    async fn answer(&self, question: &str) -> ShellEvent {
        println!("\n{}", "[Processing...]".bright_blue());
        println!("Preprocessed: {}", normalize(question));

        println!("\n{}", "[Querying LLM API...]".bright_blue());
        let pending = self.answers.get_answer(question, Some(self.credential.as_str()));
        tokio::pin!(pending);

        let raced = tokio::select! {
            result = &mut pending => Ok(result),
            signal = tokio::signal::ctrl_c() => Err(signal),
        };
        let result = match raced {
            Ok(result) => result,
            Err(Ok(())) => return ShellEvent::Interrupted,
            Err(Err(e)) => {
                warn!("could not listen for ctrl-c: {}", e);
                pending.await
            }
        };

        let text = match result {
            Ok(answer) => answer,
            Err(e) => e.to_string(),
        };

        println!("\n{}", rule('='));
        println!("{}", "ANSWER:".bright_green());
        println!("{}", rule('='));
        println!("{}", text);
        println!("{}", rule('='));

        ShellEvent::Answered
    }

    fn show_help(&self) {
        println!("\n{}", "Commands:".bright_yellow());
        println!("  - Type your question and press Enter");
        println!("  - Type 'help' to see this message");
        println!("  - Type 'quit', 'exit' or 'q' to close the application");
        println!();
    }

    fn say_farewell(&self, event: &ShellEvent) {
        match event {
            ShellEvent::Interrupted => println!("\n\nInterrupted by user. Exiting..."),
            _ => println!("\nThank you for using the Q&A system. Goodbye!"),
        }
    }
}

fn rule(c: char) -> String {
    c.to_string().repeat(RULE_WIDTH)
}
