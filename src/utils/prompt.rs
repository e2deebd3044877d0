use crate::utils::error::{CalcError, Result};
use std::io::{BufRead, Write};
use std::str::FromStr;

/// Writes `label`, reads one line and returns it without the line ending.
pub fn prompt_line<R: BufRead, W: Write>(input: &mut R, output: &mut W, label: &str) -> Result<String> {
    write!(output, "{}", label)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(CalcError::IoError(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            format!("no input for prompt '{}'", label.trim()),
        )));
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Like [`prompt_line`] but parses the answer; unparsable text is `InvalidInput` for `field`.
pub fn prompt_parsed<T, R, W>(input: &mut R, output: &mut W, field: &str, label: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    R: BufRead,
    W: Write,
{
    let raw = prompt_line(input, output, label)?;
    raw.trim()
        .parse::<T>()
        .map_err(|e| CalcError::invalid_input(field, raw.trim(), e.to_string()))
}
