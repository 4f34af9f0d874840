//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::output::console::ConsoleFormatter;
use crate::progress::{ProgressMode, ProgressNotifier, stream_council};
use colored::Colorize;
use council_application::{ModelClient, RunCouncilError, RunCouncilInput, RunCouncilUseCase};
use council_domain::{CouncilConfig, CouncilEvent, CouncilOutcome, HistoryTurn};
use reedline::{DefaultPrompt, DefaultPromptSegment, Reedline, Signal};
use tracing::debug;

/// Slash commands understood by the REPL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    Help,
    Models,
    History,
    Clear,
    Quit,
    Unknown(String),
}

impl ChatCommand {
    /// Parse a line starting with `/`; other lines are questions.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if !line.starts_with('/') {
            return None;
        }
        let command = match line {
            "/help" | "/h" | "/?" => ChatCommand::Help,
            "/models" => ChatCommand::Models,
            "/history" => ChatCommand::History,
            "/clear" => ChatCommand::Clear,
            "/quit" | "/exit" | "/q" => ChatCommand::Quit,
            other => ChatCommand::Unknown(other.to_string()),
        };
        Some(command)
    }
}

/// Interactive chat REPL
pub struct ChatRepl<C: ModelClient + ?Sized + 'static> {
    use_case: RunCouncilUseCase<C>,
    council: CouncilConfig,
    history: Vec<HistoryTurn>,
    title: Option<String>,
    show_progress: bool,
}

impl<C: ModelClient + ?Sized + 'static> ChatRepl<C> {
    /// Create a new ChatRepl
    pub fn new(use_case: RunCouncilUseCase<C>, council: CouncilConfig) -> Self {
        Self {
            use_case,
            council,
            history: Vec::new(),
            title: None,
            show_progress: true,
        }
    }

    /// Set whether to show progress
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Turns of the current conversation
    pub fn history(&self) -> &[HistoryTurn] {
        &self.history
    }

    /// Title generated on the first turn
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> std::io::Result<()> {
        let mut line_editor = Reedline::create();
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic("council".to_string()),
            DefaultPromptSegment::Empty,
        );

        self.print_welcome();

        loop {
            match line_editor.read_line(&prompt)? {
                Signal::Success(line) => {
                    let line = line.trim();

                    // Skip empty lines
                    if line.is_empty() {
                        continue;
                    }

                    if let Some(command) = ChatCommand::parse(line) {
                        if self.handle_command(command) {
                            break;
                        }
                        continue;
                    }

                    self.process_question(line).await;
                }
                Signal::CtrlC => {
                    println!("^C");
                    continue;
                }
                Signal::CtrlD => {
                    println!("Bye!");
                    break;
                }
            }
        }

        Ok(())
    }

    /// Run one turn of the conversation and record it in history.
    ///
    /// The first turn also requests a title. Failed runs leave history
    /// untouched.
    pub async fn ask(&mut self, question: &str) -> Result<CouncilOutcome, RunCouncilError> {
        let mut input = RunCouncilInput::new(question, self.council.clone())
            .with_history(self.history.clone());
        if self.history.is_empty() && self.title.is_none() {
            input = input.with_title();
        }

        let progress = ProgressMode::detect(self.show_progress).notifier();

        let mut title = None;
        let outcome = stream_council(&self.use_case, input, |event| {
            progress.on_event(&event);
            if let CouncilEvent::TitleComplete { data } = event {
                title = Some(data.title);
            }
        })
        .await?;

        if title.is_some() {
            self.title = title;
        }
        self.history.push(HistoryTurn::user(question));
        self.history
            .push(HistoryTurn::assistant(outcome.final_answer()));
        debug!(turns = self.history.len(), "Conversation updated");

        Ok(outcome)
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│           LLM Council - Chat Mode           │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        self.print_models();
        println!("Type /help for commands.");
        println!();
    }

    fn print_models(&self) {
        println!("Council:");
        for member in &self.council.members {
            println!("  - {}", member);
        }
        println!("Chairman: {}", self.council.chairman);
        println!();
    }

    /// Handle slash commands. Returns true if should exit.
    fn handle_command(&mut self, command: ChatCommand) -> bool {
        match command {
            ChatCommand::Quit => {
                println!("Bye!");
                return true;
            }
            ChatCommand::Help => {
                println!();
                println!("Commands:");
                println!("  {}   - Show this help", "/help".cyan());
                println!("  {} - Show council members and chairman", "/models".cyan());
                println!("  {} - Show this conversation", "/history".cyan());
                println!("  {}  - Start a new conversation", "/clear".cyan());
                println!("  {}   - Exit chat", "/quit".cyan());
                println!();
            }
            ChatCommand::Models => self.print_models(),
            ChatCommand::History => self.print_history(),
            ChatCommand::Clear => {
                self.history.clear();
                self.title = None;
                println!("{}", "Conversation history cleared.".green());
            }
            ChatCommand::Unknown(cmd) => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
            }
        }
        false
    }

    fn print_history(&self) {
        println!();
        if let Some(title) = &self.title {
            println!("{}", title.bold());
        }
        if self.history.is_empty() {
            println!("{}", "(no messages yet)".dimmed());
        }
        for turn in &self.history {
            let text = turn.prompt_text().unwrap_or("(no answer)");
            println!("{} {}", format!("[{}]", turn.role().display_name()).cyan(), text);
        }
        println!();
    }

    async fn process_question(&mut self, question: &str) {
        println!();
        match self.ask(question).await {
            Ok(outcome) => {
                if let Some(title) = self.title().filter(|_| self.history.len() == 2) {
                    println!("{} {}", "Conversation:".dimmed(), title);
                }
                println!("{}", ConsoleFormatter::format_synthesis_only(&outcome));
            }
            Err(e) => {
                eprintln!("Error: {}", e);
            }
        }
        println!();
    }
}
