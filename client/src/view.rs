use std::io::{self, Stderr, Stdout, Write};

pub trait View {
    /// Blocking notice shown to the user.
    fn alert(&mut self, message: &str);
    fn show_status(&mut self, text: &str);
    fn show_answer(&mut self, text: &str);
}

pub struct TerminalView<O: Write, E: Write> {
    out: O,
    err: E,
}

impl TerminalView<Stdout, Stderr> {
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl<O: Write, E: Write> TerminalView<O, E> {
    pub fn new(out: O, err: E) -> Self {
        Self { out, err }
    }

    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }
}

impl<O: Write, E: Write> View for TerminalView<O, E> {
    fn alert(&mut self, message: &str) {
        if let Err(e) = writeln!(self.err, "{message}") {
            log::warn!("Failed to write alert: {e}");
        }
    }

    fn show_status(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{text}") {
            log::warn!("Failed to write status: {e}");
        }
    }

    fn show_answer(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{text}") {
            log::warn!("Failed to write answer: {e}");
        }
    }
}
