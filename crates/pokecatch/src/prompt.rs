//! Interactive leader-name prompt.

use std::io::{self, BufRead, Write};

use crate::config::DEFAULT_LEADER_NAME;

/// Asks for the leader's display name on `output` and reads one line
/// from `input`.
///
/// An empty answer, end of input, or input that is not valid UTF-8
/// falls back to [`DEFAULT_LEADER_NAME`].
pub fn read_leader_name<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<String> {
    write!(output, "Enter the leader's name: ")?;
    output.flush()?;

    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(_) => {}
        Err(err) if err.kind() == io::ErrorKind::InvalidData => {
            tracing::warn!(error = %err, "leader name is not valid UTF-8");
            line.clear();
        }
        Err(err) => return Err(err),
    }
    let name = line.trim();
    if name.is_empty() {
        Ok(DEFAULT_LEADER_NAME.to_string())
    } else {
        Ok(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ask(input: &str) -> (String, String) {
        let mut out = Vec::new();
        let name = read_leader_name(&mut input.as_bytes(), &mut out).unwrap();
        (name, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_read_leader_name_trims_answer() {
        let (name, prompt) = ask("  Ash Ketchum \nignored\n");
        assert_eq!(name, "Ash Ketchum");
        assert_eq!(prompt, "Enter the leader's name: ");
    }

    #[test]
    fn test_read_leader_name_defaults_on_empty_line() {
        assert_eq!(ask("\n").0, "Leader");
        assert_eq!(ask("   \n").0, "Leader");
    }

    #[test]
    fn test_read_leader_name_defaults_on_eof() {
        assert_eq!(ask("").0, "Leader");
    }

    #[test]
    fn test_read_leader_name_defaults_on_invalid_utf8() {
        let mut input: &[u8] = b"\xff\xfeAsh\n";
        let name = read_leader_name(&mut input, &mut Vec::new()).unwrap();
        assert_eq!(name, "Leader");
    }
}
