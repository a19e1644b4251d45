use crate::srt::{secs_to_duration, Line, Subtitle};

use std::io::{BufWriter, Cursor, Write};
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};

pub fn serialise<P: AsRef<Path>>(subs: &[Subtitle], output: P) -> Result<()> {
    let output = output.as_ref();
    let file = std::fs::File::create(output)
        .with_context(|| format!("Failed to create file: '{}'", output.display()))?;
    let mut writer = BufWriter::new(file);
    write_subs(&mut writer, subs).context("Failed to write to output file.")?;
    writer.flush().context("Failed to write to output file.")?;
    Ok(())
}

/// Formats float seconds as an SRT timestamp.
pub fn format_seconds(secs: f64) -> String {
    let mut buf = Cursor::new(vec![]);
    // Writing into a Vec cannot fail.
    let _ = write_ts(&mut buf, secs_to_duration(secs));
    String::from_utf8_lossy(&buf.into_inner()).into_owned()
}

fn write_subs<W: Write>(buf: &mut W, subs: &[Subtitle]) -> Result<()> {
    if subs.is_empty() {
        writeln!(buf)?;
    }
    for (i, sub) in subs.iter().enumerate() {
        if i > 0 {
            writeln!(buf)?;
        }
        write_sub(buf, sub)?;
    }
    Ok(())
}

fn write_sub<W: Write>(buf: &mut W, sub: &Subtitle) -> Result<()> {
    writeln!(buf, "{}", sub.sequence_number)?;
    for line in &sub.lines {
        match line {
            Line::Timing { raw: Some(raw), .. } => writeln!(buf, "{}", raw)?,
            Line::Timing {
                show_at,
                hide_at,
                trailer,
                raw: None,
            } => {
                write_ts(buf, *show_at)?;
                write!(buf, " --> ")?;
                write_ts(buf, *hide_at)?;
                writeln!(buf, "{}", trailer)?;
            }
            Line::Text(text) => writeln!(buf, "{}", text)?,
        }
    }
    Ok(())
}

fn write_ts<W: Write>(buf: &mut W, timestamp: Duration) -> Result<()> {
    let total_secs = timestamp.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    let millis = timestamp.subsec_millis();
    write!(
        buf,
        "{:02}:{:02}:{:02},{:03}",
        hours, minutes, seconds, millis
    )?;
    Ok(())
}
