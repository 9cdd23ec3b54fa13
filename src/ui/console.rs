//! Line-oriented terminal I/O.

use quest_chronicles::error::{GameError, Result};
use std::fmt::Display;
use std::io::{self, BufRead, Write};

/// Prompts and output over any reader/writer pair, so menus can be driven
/// by a script in tests.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, text: impl Display) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    pub fn blank(&mut self) -> Result<()> {
        writeln!(self.output)?;
        Ok(())
    }

    /// Prints `label` and reads one trimmed line. A closed input is an
    /// `UnexpectedEof` error so callers can unwind to the top.
    pub fn prompt(&mut self, label: &str) -> Result<String> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(GameError::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed",
            )));
        }
        Ok(line.trim().to_string())
    }

    /// Reads a 1-based menu choice. Returns `None` for anything outside
    /// `1..=max`.
    pub fn choose(&mut self, label: &str, max: usize) -> Result<Option<usize>> {
        let answer = self.prompt(label)?;
        Ok(answer
            .parse::<usize>()
            .ok()
            .filter(|n| (1..=max).contains(n)))
    }

    pub fn confirm(&mut self, label: &str) -> Result<bool> {
        let answer = self.prompt(label)?;
        Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes"))
    }

    pub fn output(&self) -> &W {
        &self.output
    }
}

/// True when the error only means the player closed stdin.
pub fn is_input_closed(error: &GameError) -> bool {
    matches!(error, GameError::Io(e) if e.kind() == io::ErrorKind::UnexpectedEof)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_prompt_trims_and_echoes_label() {
        let mut console = console("  hello  \n");
        assert_eq!(console.prompt("> ").unwrap(), "hello");
        assert_eq!(String::from_utf8_lossy(console.output()), "> ");
    }

    #[test]
    fn test_choose_range() {
        let mut console = console("2\n9\nx\n");
        assert_eq!(console.choose("", 3).unwrap(), Some(2));
        assert_eq!(console.choose("", 3).unwrap(), None);
        assert_eq!(console.choose("", 3).unwrap(), None);
    }

    #[test]
    fn test_eof_is_input_closed() {
        let mut console = console("");
        let err = console.prompt("").unwrap_err();
        assert!(is_input_closed(&err));
        assert!(!is_input_closed(&GameError::InventoryFull));
    }

    #[test]
    fn test_confirm() {
        let mut console = console("Y\nno\n");
        assert!(console.confirm("").unwrap());
        assert!(!console.confirm("").unwrap());
    }
}
