use std::path::PathBuf;

pub const USAGE: &str = "usage: pdf-assistant <command>

commands:
  upload <file.pdf>     upload a PDF to the assistant
  ask [question...]     ask a question about the uploaded PDF
  chat [file.pdf]       optionally upload, then ask one question per stdin line
  health                check that the backend is up

The backend address is read from PDF_ASSISTANT_URL.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `None` when no file was given.
    Upload(Option<PathBuf>),
    Ask(String),
    Chat(Option<PathBuf>),
    Health,
    Help,
}

impl Command {
    pub fn parse<I, S>(args: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = args.into_iter().map(Into::into);
        let Some(command) = args.next() else {
            return Ok(Command::Help);
        };
        let rest: Vec<String> = args.collect();

        match command.as_str() {
            "upload" => Ok(Command::Upload(selected_path(&rest))),
            "ask" => Ok(Command::Ask(rest.join(" "))),
            "chat" => Ok(Command::Chat(selected_path(&rest))),
            "health" => Ok(Command::Health),
            "help" | "-h" | "--help" => Ok(Command::Help),
            other => Err(format!("unknown command `{other}`")),
        }
    }
}

fn selected_path(rest: &[String]) -> Option<PathBuf> {
    rest.first()
        .filter(|path| !path.trim().is_empty())
        .map(PathBuf::from)
}
