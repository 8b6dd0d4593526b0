//! Confirmation prompt for destructive operations.

use crate::error::Result;
use std::io::{BufRead, Write};

/// Read one line of operator input without the line terminator. End of
/// input reads as an empty answer.
pub fn read_answer<R: BufRead>(input: &mut R) -> Result<String> {
    let mut line = String::new();
    input.read_line(&mut line)?;

    let trimmed = line.strip_suffix('\n').unwrap_or(&line);
    let trimmed = trimmed.strip_suffix('\r').unwrap_or(trimmed);
    Ok(trimmed.to_string())
}

/// Ask the operator to retype `name`. Only an exact match confirms.
pub fn confirm_by_name<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    kind: &str,
    name: &str,
) -> Result<bool> {
    write!(out, "Enter the {} name ({}) to continue: ", kind, name)?;
    out.flush()?;

    let answer = read_answer(input)?;
    Ok(answer == name)
}
