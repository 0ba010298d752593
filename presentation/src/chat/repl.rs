//! REPL (Read-Eval-Print Loop) for interactive writing

use crate::config::ReplConfig;
use crate::{ConsoleFormatter, ProgressReporter};
use colored::Colorize;
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};
use scribe_application::{Oracle, WorkerDispatcher, WritingSession};
use scribe_domain::{Request, WritingOutcome};
use std::path::PathBuf;
use tracing::warn;

const HISTORY_CAPACITY: usize = 500;

/// What the REPL should do with one line of input
#[derive(Debug, Clone, PartialEq, Eq)]
enum ReplInput {
    Quit,
    Command(String),
    Request(String),
    /// Empty line with no default prompt configured
    Blank,
}

impl ReplInput {
    fn parse(line: &str, default_prompt: &str) -> Self {
        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") {
            return ReplInput::Quit;
        }
        if line.starts_with('/') {
            return match line {
                "/quit" | "/exit" | "/q" => ReplInput::Quit,
                _ => ReplInput::Command(line.to_string()),
            };
        }
        if line.is_empty() {
            let default_prompt = default_prompt.trim();
            if default_prompt.is_empty() {
                return ReplInput::Blank;
            }
            return ReplInput::Request(default_prompt.to_string());
        }
        ReplInput::Request(line.to_string())
    }
}

/// Interactive writing REPL
pub struct ChatRepl<O: Oracle + ?Sized + 'static, D: WorkerDispatcher + ?Sized + 'static> {
    session: WritingSession<O, D>,
    config: ReplConfig,
}

impl<O, D> ChatRepl<O, D>
where
    O: Oracle + ?Sized + 'static,
    D: WorkerDispatcher + ?Sized + 'static,
{
    pub fn new(session: WritingSession<O, D>, config: ReplConfig) -> Self {
        Self { session, config }
    }

    fn history_path(&self) -> Option<PathBuf> {
        match &self.config.history_file {
            Some(path) => Some(PathBuf::from(path)),
            None => dirs::data_dir().map(|p| p.join("scribe-council").join("history.txt")),
        }
    }

    fn line_editor(&self) -> Reedline {
        let editor = Reedline::create();
        let Some(path) = self.history_path() else {
            return editor;
        };
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        match FileBackedHistory::with_file(HISTORY_CAPACITY, path) {
            Ok(history) => editor.with_history(Box::new(history)),
            Err(e) => {
                warn!("Could not open REPL history: {}", e);
                editor
            }
        }
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> std::io::Result<()> {
        let mut line_editor = self.line_editor();
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic("scribe".to_string()),
            DefaultPromptSegment::Empty,
        );

        self.print_welcome();

        loop {
            match line_editor.read_line(&prompt)? {
                Signal::Success(line) => {
                    match ReplInput::parse(&line, &self.config.default_prompt) {
                        ReplInput::Quit => break,
                        ReplInput::Command(command) => self.handle_command(&command),
                        ReplInput::Request(request) => self.process_request(request).await,
                        ReplInput::Blank => {
                            println!("No request entered and no default prompt is configured.")
                        }
                    }
                }
                Signal::CtrlC => {
                    println!("^C");
                    continue;
                }
                _ => break,
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│          Scribe Council - Writing           │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!(
            "Writers: {}",
            self.session
                .registry()
                .iter()
                .map(|t| t.name())
                .collect::<Vec<_>>()
                .join(", ")
        );
        println!(
            "Empty input writes: {}",
            self.config.default_prompt.dimmed()
        );
        println!();
        Self::print_help();
    }

    fn print_help() {
        println!("Commands:");
        println!("  /help, /h, /?     - Show this help");
        println!("  /outline          - Show the current outline");
        println!("  /article          - Show the current article");
        println!("  /reset            - Start a new document and conversation");
        println!("  quit, /quit, /q   - Exit");
        println!();
    }

    fn handle_command(&mut self, command: &str) {
        match command {
            "/help" | "/h" | "/?" => Self::print_help(),
            "/outline" => println!("\n{}\n", self.session.state().outline()),
            "/article" => println!("\n{}\n", self.session.state().article()),
            "/reset" => {
                self.session.reset();
                println!("Started a new document.");
            }
            _ => {
                println!("Unknown command: {}", command);
                println!("Type /help for available commands");
            }
        }
    }

    async fn process_request(&mut self, request: String) {
        let request = match Request::try_new(request) {
            Ok(request) => request,
            Err(e) => {
                println!("{} {}", "Skipped:".yellow(), e);
                return;
            }
        };
        println!();

        let outcome: WritingOutcome = if self.config.show_progress {
            let progress = ProgressReporter::new();
            self.session.submit_with_progress(request, &progress).await
        } else {
            self.session.submit(request).await
        };

        println!("{}", ConsoleFormatter::format(&outcome));
        println!("{}", ConsoleFormatter::format_summary(&outcome));
    }
}
