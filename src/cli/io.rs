//! Output handling for CLI
//!
//! - Command output goes to stdout, diagnostics to stderr
//! - Lines are newline terminated, UTF-8 only

use std::io::Write;

use super::errors::CliResult;

/// Write each item on its own line and flush. Returns the number of lines written.
pub fn write_lines<I, W>(lines: I, out: &mut W) -> CliResult<u64>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
    W: Write + ?Sized,
{
    let mut count = 0;
    for line in lines {
        writeln!(out, "{}", line.as_ref())?;
        count += 1;
    }
    out.flush()?;
    Ok(count)
}
