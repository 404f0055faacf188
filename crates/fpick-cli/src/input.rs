use fpick_core::event::Command;
use fpick_core::nav::lister::SelectionMode;

/// Actions that can result from an input line.
#[derive(Debug, PartialEq, Eq)]
pub enum InputAction {
    /// Dispatch a core Command.
    Command(Command),
    /// Commit the current directory (directory mode).
    Commit,
    /// Print the command summary.
    Help,
    /// Quit without selecting anything.
    Quit,
    /// Unrecognised input.
    None,
}

pub const HELP: &str = "\
  <n>          open entry n
  c <n>        jump to breadcrumb n
  b, back      go back
  r, roots     show storage roots
  h            toggle hidden entries
  mode file    select files
  mode dir     select directories
  ok           choose the current directory
  q, quit      quit";

/// Parses one line of user input.
pub fn parse_line(line: &str) -> InputAction {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return InputAction::None;
    };
    let arg = words.next();
    if words.next().is_some() {
        return InputAction::None;
    }

    match (head, arg) {
        ("q" | "quit", None) => InputAction::Quit,
        ("?" | "help", None) => InputAction::Help,
        ("ok", None) => InputAction::Commit,
        ("b" | "back", None) => InputAction::Command(Command::Back),
        ("r" | "roots", None) => InputAction::Command(Command::Roots),
        ("h", None) => InputAction::Command(Command::ToggleHidden),
        ("c", Some(n)) => match n.parse() {
            Ok(index) => InputAction::Command(Command::Breadcrumb(index)),
            Err(_) => InputAction::None,
        },
        ("mode", Some("file")) => {
            InputAction::Command(Command::SetSelectionMode(SelectionMode::File))
        }
        ("mode", Some("dir" | "directory")) => {
            InputAction::Command(Command::SetSelectionMode(SelectionMode::Directory))
        }
        (n, None) => match n.parse() {
            Ok(index) => InputAction::Command(Command::Activate(index)),
            Err(_) => InputAction::None,
        },
        _ => InputAction::None,
    }
}
