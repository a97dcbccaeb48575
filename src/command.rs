use std::fmt;

use crate::error::{DesktopError, Result};

/// One line of the desktop command language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Apps,
    List,
    Open(String),
    Close(String),
    Focus(String),
    Minimize(String),
    // clears the minimized flag without raising the window
    Restore(String),
    Move { id: String, x: i32, y: i32 },
    Resize { id: String, width: u32, height: u32 },
    Taskbar(String),
    Host(String),
    Preview,
    Help,
    Quit,
}

impl Command {
    /// Parse a line. Blank lines and `#` comments yield `None`.
    pub fn parse(line: &str, line_no: usize) -> Result<Option<Command>> {
        let err = |message: String| DesktopError::Command {
            line: line_no,
            message,
        };
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(None);
        }
        let (verb, rest) = trimmed
            .split_once(char::is_whitespace)
            .map(|(v, r)| (v, r.trim()))
            .unwrap_or((trimmed, ""));
        let args: Vec<&str> = rest.split_whitespace().collect();

        let id = |args: &[&str]| -> Result<String> {
            match args {
                [id] => Ok((*id).to_string()),
                _ => Err(err(format!("`{verb}` expects exactly one app id"))),
            }
        };
        let number = |value: &str| -> Result<i64> {
            value
                .parse::<i64>()
                .map_err(|_| err(format!("`{value}` is not a number")))
        };

        let command = match verb {
            "apps" => Command::Apps,
            "list" | "ls" => Command::List,
            "open" => Command::Open(id(args.as_slice())?),
            "close" => Command::Close(id(args.as_slice())?),
            "focus" => Command::Focus(id(args.as_slice())?),
            "minimize" | "min" => Command::Minimize(id(args.as_slice())?),
            "restore" => Command::Restore(id(args.as_slice())?),
            "taskbar" => Command::Taskbar(id(args.as_slice())?),
            "move" => match args.as_slice() {
                [id, x, y] => Command::Move {
                    id: (*id).to_string(),
                    x: i32::try_from(number(*x)?)
                        .map_err(|_| err(format!("`{x}` is out of range")))?,
                    y: i32::try_from(number(*y)?)
                        .map_err(|_| err(format!("`{y}` is out of range")))?,
                },
                _ => return Err(err("`move` expects: move ID X Y".to_string())),
            },
            "resize" => match args.as_slice() {
                [id, w, h] => Command::Resize {
                    id: (*id).to_string(),
                    width: u32::try_from(number(*w)?)
                        .map_err(|_| err(format!("`{w}` is not a valid width")))?,
                    height: u32::try_from(number(*h)?)
                        .map_err(|_| err(format!("`{h}` is not a valid height")))?,
                },
                _ => return Err(err("`resize` expects: resize ID WIDTH HEIGHT".to_string())),
            },
            "host" if !rest.is_empty() => Command::Host(rest.to_string()),
            "host" => return Err(err("`host` expects a JSON message".to_string())),
            "preview" => Command::Preview,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(err(format!("unknown command `{other}`"))),
        };
        Ok(Some(command))
    }

    /// Whether running the command may change the window set.
    pub fn mutates_windows(&self) -> bool {
        matches!(
            self,
            Command::Open(_)
                | Command::Close(_)
                | Command::Focus(_)
                | Command::Minimize(_)
                | Command::Restore(_)
                | Command::Move { .. }
                | Command::Resize { .. }
                | Command::Taskbar(_)
        )
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Apps => write!(f, "apps"),
            Command::List => write!(f, "list"),
            Command::Open(id) => write!(f, "open {id}"),
            Command::Close(id) => write!(f, "close {id}"),
            Command::Focus(id) => write!(f, "focus {id}"),
            Command::Minimize(id) => write!(f, "minimize {id}"),
            Command::Restore(id) => write!(f, "restore {id}"),
            Command::Move { id, x, y } => write!(f, "move {id} {x} {y}"),
            Command::Resize { id, width, height } => write!(f, "resize {id} {width} {height}"),
            Command::Taskbar(id) => write!(f, "taskbar {id}"),
            Command::Host(json) => write!(f, "host {json}"),
            Command::Preview => write!(f, "preview"),
            Command::Help => write!(f, "help"),
            Command::Quit => write!(f, "quit"),
        }
    }
}
