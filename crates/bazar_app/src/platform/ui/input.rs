use listing_core::{CurrentUser, FieldEdit, FieldEditError, Msg, SourceHandle};
use thiserror::Error;

/// One line typed at the prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Wizard(Msg),
    NewListing,
    Login(CurrentUser),
    Logout,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command `{0}` (type `help`)")]
    Unknown(String),
    #[error("missing {0}")]
    MissingArgument(&'static str),
    #[error("`{0}` is not a photo number (photos are numbered from 1)")]
    InvalidIndex(String),
    #[error(transparent)]
    Field(#[from] FieldEditError),
}

pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb {
        "set" => {
            let (name, value) = match rest.split_once(char::is_whitespace) {
                Some((name, value)) => (name, value.trim()),
                None if !rest.is_empty() => (rest, ""),
                None => return Err(CommandError::MissingArgument("field name")),
            };
            Command::Wizard(Msg::EditField(FieldEdit::from_name_value(name, value)?))
        }
        "add" => {
            let sources: Vec<SourceHandle> =
                rest.split_whitespace().map(SourceHandle::from).collect();
            if sources.is_empty() {
                return Err(CommandError::MissingArgument("photo path"));
            }
            Command::Wizard(Msg::AddImages(sources))
        }
        "remove" => {
            let position: usize = rest
                .parse()
                .map_err(|_| CommandError::InvalidIndex(rest.to_string()))?;
            let index = position
                .checked_sub(1)
                .ok_or_else(|| CommandError::InvalidIndex(rest.to_string()))?;
            Command::Wizard(Msg::RemoveImage(index))
        }
        "next" => Command::Wizard(Msg::Next),
        "back" => Command::Wizard(Msg::Back),
        "publish" | "submit" => Command::Wizard(Msg::Submit),
        "cancel" => Command::Wizard(Msg::Dismissed),
        "new" => Command::NewListing,
        "login" => Command::Login(parse_user(rest)?),
        "logout" => Command::Logout,
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

/// `login <id> <name> <university...>`
fn parse_user(rest: &str) -> Result<CurrentUser, CommandError> {
    let mut parts = rest.splitn(3, char::is_whitespace);
    let id = parts
        .next()
        .filter(|id| !id.is_empty())
        .ok_or(CommandError::MissingArgument("user id"))?;
    let name = parts
        .next()
        .ok_or(CommandError::MissingArgument("display name"))?;
    let university = parts
        .next()
        .map(str::trim)
        .filter(|university| !university.is_empty())
        .ok_or(CommandError::MissingArgument("university"))?;
    Ok(CurrentUser {
        id: id.to_string(),
        name: name.to_string(),
        email: None,
        university: university.to_string(),
    })
}

pub const HELP: &str = "\
Commands:
  new                         open the create-listing wizard
  set <field> <value>         title | description | price | category | condition |
                              contactMethod | phone | location
  add <path> [<path>...]      attach photos (up to 5)
  remove <n>                  remove photo number n
  next | back                 move between steps
  publish                     publish from the review step
  cancel                      leave the wizard
  show                        print the current step again
  login <id> <name> <university>
  logout | help | quit";
