//! Parsing of the one-line commands typed at the prompt.

use todo_core::TodoId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    List,
    New,
    Done(TodoId),
    Delete(TodoId),
    Show(TodoId),
    Reload,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unknown command {0:?}, type `help` for a list")]
    Unknown(String),

    #[error("`{0}` needs a todo id")]
    MissingId(&'static str),

    #[error("{0:?} is not a todo id")]
    BadId(String),
}

pub const HELP: &str = "\
commands:
  list           show all todos
  new            create a todo (prompts for each field)
  done <id>      mark a todo finished
  delete <id>    delete a todo
  show <id>      re-read one todo from the server
  reload         re-read the whole list
  help           this text
  quit           leave";

impl Command {
    /// `Ok(None)` for a blank line.
    pub fn parse(line: &str) -> Result<Option<Self>, ParseError> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };
        let command = match verb.to_ascii_lowercase().as_str() {
            "list" | "ls" => Command::List,
            "new" | "add" => Command::New,
            "done" | "finish" => Command::Done(id_arg("done", words.next())?),
            "delete" | "rm" => Command::Delete(id_arg("delete", words.next())?),
            "show" => Command::Show(id_arg("show", words.next())?),
            "reload" => Command::Reload,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(ParseError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

fn id_arg(verb: &'static str, arg: Option<&str>) -> Result<TodoId, ParseError> {
    let arg = arg.ok_or(ParseError::MissingId(verb))?;
    arg.parse().map_err(|_| ParseError::BadId(arg.to_string()))
}
