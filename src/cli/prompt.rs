use std::io::{self, BufRead, Write};

use crate::error::InputError;
use crate::game::{Board, CELLS};

/// Parse one line of user input into a free cell on `board`.
pub fn parse_cell(line: &str, board: &Board) -> Result<usize, InputError> {
    let trimmed = line.trim();
    let value: i64 = trimmed
        .parse()
        .map_err(|_| InputError::NotANumber(trimmed.to_string()))?;
    if value < 0 || value >= CELLS as i64 {
        return Err(InputError::OutOfRange(value));
    }
    let cell = value as usize;
    if !board.is_legal(cell) {
        return Err(InputError::Occupied(cell));
    }
    Ok(cell)
}

/// Read one line, replacing bytes that are not valid UTF-8. `Ok(None)` at
/// end of input.
fn read_text_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut buf = Vec::new();
    if input.read_until(b'\n', &mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}

/// Prompt until the user names a free cell. `Ok(None)` means input ended.
pub fn read_human_move<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    board: &Board,
) -> io::Result<Option<usize>> {
    loop {
        write!(output, "Enter your move (0-8): ")?;
        output.flush()?;

        let Some(line) = read_text_line(input)? else {
            writeln!(output)?;
            return Ok(None);
        };
        match parse_cell(&line, board) {
            Ok(cell) => return Ok(Some(cell)),
            Err(e) => writeln!(output, "Position Invalid: {e}")?,
        }
    }
}

/// Ask whether to start another game. End of input counts as "no".
pub fn ask_play_again<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<bool> {
    loop {
        write!(output, "Play again? (y/n): ")?;
        output.flush()?;

        let Some(line) = read_text_line(input)? else {
            writeln!(output)?;
            return Ok(false);
        };
        match line.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => writeln!(output, "Please answer y or n")?,
        }
    }
}
