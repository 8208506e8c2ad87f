//! Parses one line of terminal input into a session action.

use deadhold_core::Direction;
use thiserror::Error;

use crate::simulation::TickInput;

/// Something the player asked the session to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Action {
    /// Advance one tick with the provided intents.
    Tick(TickInput),
    /// Advance the provided number of idle ticks.
    Run(u32),
    TogglePause,
    Save,
    Load,
    Quit,
}

/// Errors produced when a line cannot be understood.
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum InputError {
    #[error("unknown command `{0}`")]
    Unknown(String),
    #[error("`run` expects a tick count, got `{0}`")]
    BadCount(String),
}

/// Parses a line. Single-letter intents may be combined, e.g. `df` walks
/// east and attacks in the same tick.
pub(crate) fn parse(line: &str) -> Result<Action, InputError> {
    let line = line.trim();
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(Action::Tick(TickInput::default()));
    };

    match head {
        "q" | "quit" => return Ok(Action::Quit),
        "p" | "pause" => return Ok(Action::TogglePause),
        "save" => return Ok(Action::Save),
        "load" => return Ok(Action::Load),
        "run" => {
            let count = words.next().unwrap_or("");
            return count
                .parse()
                .map(Action::Run)
                .map_err(|_| InputError::BadCount(count.to_owned()));
        }
        _ => {}
    }

    let mut input = TickInput::default();
    for key in line.chars().filter(|key| !key.is_whitespace()) {
        match key {
            'w' => input.direction = Some(Direction::North),
            'a' => input.direction = Some(Direction::West),
            's' => input.direction = Some(Direction::South),
            'd' => input.direction = Some(Direction::East),
            'f' => input.attack = true,
            'e' => input.interact = true,
            'b' => input.builder.build = true,
            'c' => input.builder.cycle_blueprint = true,
            'u' => input.builder.unlock = true,
            _ => return Err(InputError::Unknown(line.to_owned())),
        }
    }
    Ok(Action::Tick(input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use deadhold_system_builder::BuilderInput;

    #[test]
    fn empty_line_is_an_idle_tick() {
        assert_eq!(parse("  "), Ok(Action::Tick(TickInput::default())));
    }

    #[test]
    fn letters_combine_into_one_tick() {
        assert_eq!(
            parse("d f c"),
            Ok(Action::Tick(TickInput {
                direction: Some(Direction::East),
                attack: true,
                interact: false,
                builder: BuilderInput::new(true, false, false),
            }))
        );
    }

    #[test]
    fn session_commands() {
        assert_eq!(parse("q"), Ok(Action::Quit));
        assert_eq!(parse("p"), Ok(Action::TogglePause));
        assert_eq!(parse("save"), Ok(Action::Save));
        assert_eq!(parse("load"), Ok(Action::Load));
        assert_eq!(parse("run 12"), Ok(Action::Run(12)));
    }

    #[test]
    fn bad_input_is_reported() {
        assert_eq!(parse("run"), Err(InputError::BadCount(String::new())));
        assert_eq!(
            parse("run lots"),
            Err(InputError::BadCount("lots".to_owned()))
        );
        assert_eq!(parse("x"), Err(InputError::Unknown("x".to_owned())));
    }
}
