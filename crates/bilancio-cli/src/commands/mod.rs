pub mod compare;
pub mod crisis;
pub mod indicators;
pub mod projection;
pub mod reference;
pub mod statements;

use serde::de::DeserializeOwned;

use crate::input;

/// Load a command's input from `--input` or, failing that, piped stdin.
pub(crate) fn load_input<T: DeserializeOwned>(
    path: Option<&str>,
    command: &str,
) -> Result<T, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        input::file::read_data(path)
    } else if let Some(data) = input::stdin::read_stdin()? {
        Ok(serde_json::from_value(data)?)
    } else {
        Err(format!("--input <file> or stdin required for {command}").into())
    }
}
