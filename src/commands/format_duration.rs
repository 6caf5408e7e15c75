use crate::formatting::format_duration_secs;
use anyhow::Result;
use std::io::Write;

pub fn print_duration<W: Write>(seconds: f64, out: &mut W) -> Result<()> {
    writeln!(out, "{}", format_duration_secs(seconds))?;
    Ok(())
}
