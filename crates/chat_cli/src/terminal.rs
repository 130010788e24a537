//! Terminal rendering for a chat session

use std::io::{self, Write};

use chat_core::{Message, Sender};
use chat_state::{ChatView, Notifier, NotifyError, SessionState};
use colored::Colorize;

/// Prints transcript entries as they are appended.
pub struct TerminalView<W: Write> {
    out: W,
    /// Echo user messages back (off in interactive mode, where the user
    /// already sees what they typed).
    echo_user: bool,
    was_typing: bool,
}

impl TerminalView<io::Stdout> {
    pub fn stdout(echo_user: bool) -> Self {
        Self::new(io::stdout(), echo_user)
    }
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W, echo_user: bool) -> Self {
        Self {
            out,
            echo_user,
            was_typing: false,
        }
    }

    pub fn print_message(&mut self, message: &Message) {
        let line = match message.sender() {
            Sender::User => format!("{} {}", "You:".cyan().bold(), message.text()),
            Sender::Bot => format!("{} {}", "Bot:".green().bold(), message.text()),
        };
        self.write_line(&line);
    }

    pub fn print_prompt(&mut self) {
        let _ = write!(self.out, "{} ", "You:".cyan().bold());
        let _ = self.out.flush();
    }

    pub fn print_notice(&mut self, notice: &str) {
        self.write_line(&notice.dimmed().to_string());
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, line: &str) {
        // A closed stdout is not worth aborting the session over.
        let _ = writeln!(self.out, "{line}");
        let _ = self.out.flush();
    }
}

impl<W: Write> ChatView for TerminalView<W> {
    fn render(&mut self, state: &SessionState) {
        if state.is_typing() && !self.was_typing {
            self.write_line(&state.description().dimmed().italic().to_string());
        }
        self.was_typing = state.is_typing();
    }

    fn scroll_to_latest(&mut self, latest: &Message) {
        if latest.is_from_user() && !self.echo_user {
            return;
        }
        self.print_message(latest);
    }
}

/// Rings the terminal bell when a reply arrives.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalBell;

impl Notifier for TerminalBell {
    fn notify(&self) -> Result<(), NotifyError> {
        let mut out = io::stdout();
        out.write_all(b"\x07")?;
        out.flush()?;
        Ok(())
    }
}
