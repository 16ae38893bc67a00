//! The toy terminal overlay: a prompt, a scrollback, and the fixed command
//! set from [`crate::command`].

use crate::command::{Command, ParseError};
use crate::content::{Section, PORTFOLIO};

pub const BANNER: &str = "Portfolio OS [Version 1.0.0]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Input(String),
    Output(String),
}

/// Side effect of one submitted command, handled by the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleAction {
    None,
    Close,
    Goto(Section),
}

#[derive(Debug, Clone)]
pub struct Console {
    history: Vec<Entry>,
    input: String,
}

impl Console {
    pub fn new() -> Self {
        Self {
            history: vec![
                Entry::Output(BANNER.to_string()),
                Entry::Output("Type \"help\" for available commands.".to_string()),
            ],
            input: String::new(),
        }
    }

    pub fn history(&self) -> &[Entry] {
        &self.history
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn insert_char(&mut self, c: char) {
        if !c.is_control() {
            self.input.push(c);
        }
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    fn respond<I: IntoIterator<Item = String>>(&mut self, lines: I) {
        self.history.extend(lines.into_iter().map(Entry::Output));
    }

    /// Execute the current input line and clear it.
    pub fn submit(&mut self) -> ConsoleAction {
        let line = std::mem::take(&mut self.input);
        if line.trim().is_empty() {
            return ConsoleAction::None;
        }
        self.history.push(Entry::Input(line.trim().to_string()));

        match Command::parse(&line) {
            Ok(Command::Help) => {
                self.respond([
                    "Available commands:".to_string(),
                    "  about       - Learn about me".to_string(),
                    "  skills      - View my technical skills".to_string(),
                    "  projects    - Browse my projects".to_string(),
                    "  contact     - Get my contact info".to_string(),
                    "  goto [page] - Navigate to a section".to_string(),
                    "  clear       - Clear the console".to_string(),
                    "  exit        - Close the console".to_string(),
                ]);
                ConsoleAction::None
            }
            Ok(Command::About) => {
                self.respond([format!("Hi, I'm {}!", PORTFOLIO.name)]);
                let lines: Vec<String> = PORTFOLIO
                    .about
                    .iter()
                    .filter(|l| !l.is_empty())
                    .map(|l| l.to_string())
                    .collect();
                self.respond(lines);
                self.respond(["Type \"skills\" to learn more about my technical expertise.".to_string()]);
                ConsoleAction::None
            }
            Ok(Command::Skills) => {
                self.respond(["Technical Skills:".to_string()]);
                let lines: Vec<String> = PORTFOLIO
                    .skills
                    .iter()
                    .map(|group| {
                        let names: Vec<&str> = group.skills.iter().map(|(n, _)| *n).collect();
                        format!("* {}: {}", group.title, names.join(", "))
                    })
                    .collect();
                self.respond(lines);
                ConsoleAction::None
            }
            Ok(Command::Projects) => {
                self.respond(["Featured Projects:".to_string()]);
                let lines: Vec<String> = PORTFOLIO
                    .projects
                    .iter()
                    .enumerate()
                    .flat_map(|(i, p)| {
                        [
                            format!("{}. {}", i + 1, p.name),
                            format!("   - {}", p.description),
                        ]
                    })
                    .collect();
                self.respond(lines);
                self.respond([
                    String::new(),
                    "Type \"goto projects\" to view more details.".to_string(),
                ]);
                ConsoleAction::None
            }
            Ok(Command::Contact) => {
                self.respond([
                    "Contact Information:".to_string(),
                    format!("* Email: {}", PORTFOLIO.contact.email),
                    format!("* GitHub: {}", PORTFOLIO.contact.github),
                    format!("* Location: {}", PORTFOLIO.contact.location),
                ]);
                ConsoleAction::None
            }
            Ok(Command::Goto(section)) => {
                self.respond([format!("Navigating to {} section...", section.anchor())]);
                ConsoleAction::Goto(section)
            }
            Ok(Command::Clear) => {
                self.history.clear();
                ConsoleAction::None
            }
            Ok(Command::Exit) => ConsoleAction::Close,
            Err(ParseError::Empty) => ConsoleAction::None,
            Err(ParseError::UnknownSection(section)) => {
                self.respond([format!("Error: Unknown section \"{}\"", section)]);
                ConsoleAction::None
            }
            Err(ParseError::Unknown(cmd)) => {
                self.respond([
                    format!("Command not recognized: {}", cmd),
                    "Type \"help\" for available commands.".to_string(),
                ]);
                ConsoleAction::None
            }
        }
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}
