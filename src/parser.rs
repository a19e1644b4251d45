use crate::srt::{Line, Subtitle};

use std::time::Duration;

use nom::bytes::complete::{tag, take_while_m_n};
use nom::character::complete::{digit1, space1};
use nom::combinator::{map_res, opt};
use nom::error::{ErrorKind, VerboseError};
use nom::{error_position, IResult};

pub struct Parser;
impl Parser {
    pub fn new() -> Self {
        Self {}
    }

    /// Splits SRT text into blocks. This never fails: lines that do not look
    /// like a timing range are kept as text.
    pub fn parse(&self, input: &str) -> Vec<Subtitle> {
        let input = match optional_bom(input) {
            Ok((rest, _)) => rest,
            Err(_) => input,
        };

        let mut subs = Vec::new();
        let mut block: Vec<&str> = Vec::new();
        for line in input.lines() {
            if line.trim().is_empty() {
                if !block.is_empty() {
                    subs.push(subtitle(&block));
                    block.clear();
                }
            } else {
                block.push(line);
            }
        }
        if !block.is_empty() {
            subs.push(subtitle(&block));
        }
        subs
    }
}

fn subtitle(block: &[&str]) -> Subtitle {
    let (header, rest) = match block.split_first() {
        Some((header, rest)) => (*header, rest),
        None => ("", block),
    };
    Subtitle {
        sequence_number: seq_num(header.trim()).map(|(_, n)| n).unwrap_or(0),
        lines: rest.iter().map(|line| classify(line)).collect(),
    }
}

fn classify(line: &str) -> Line {
    match parse_timing(line) {
        Some((show_at, hide_at, trailer)) => Line::Timing {
            show_at,
            hide_at,
            trailer: trailer.to_string(),
            raw: Some(line.to_string()),
        },
        None => Line::Text(line.to_string()),
    }
}

/// Recognises a `start --> end` line. Anything after the end timestamp must be
/// separated by whitespace and is returned as the trailer.
pub fn parse_timing(line: &str) -> Option<(Duration, Duration, &str)> {
    let (rest, (show_at, hide_at)) = show_hide(line).ok()?;
    let rest = rest.trim_end();
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some((show_at, hide_at, rest))
    } else {
        None
    }
}

fn optional_bom(input: &str) -> IResult<&str, Option<&str>, VerboseError<&str>> {
    opt(tag("\u{FEFF}"))(input)
}

fn show_hide(input: &str) -> IResult<&str, (Duration, Duration), VerboseError<&str>> {
    let (input, show_at) = timestamp(input)?;
    let (input, _) = space1(input)?;
    let (input, _) = tag("-->")(input)?;
    let (input, _) = space1(input)?;
    let (input, hide_at) = timestamp(input)?;

    Ok((input, (show_at, hide_at)))
}

fn timestamp(input: &str) -> IResult<&str, Duration, VerboseError<&str>> {
    const MILLIS_MIN: usize = 0;
    const MILLIS_MAX: usize = 3;
    let take_millis = || {
        map_res(
            take_while_m_n(MILLIS_MIN, MILLIS_MAX, |c: char| c.is_ascii_digit()),
            move |s: &str| {
                // `,2` means 200 ms, so pad on the right.
                format!("{:0<3}", s).parse::<u64>()
            },
        )
    };

    const MS_MIN: usize = 1;
    const MS_MAX: usize = 2;
    let take_ms = || {
        map_res(
            take_while_m_n(MS_MIN, MS_MAX, |c: char| c.is_ascii_digit()),
            |s: &str| s.parse::<u64>(),
        )
    };

    // Hours are unbounded: merged output can run past 99 hours.
    let (input, hours) = map_res(digit1, |s: &str| s.parse::<u64>())(input)?;
    let (input, _) = tag(":")(input)?;
    let (input, minutes) = take_ms()(input)?;
    let (input, _) = tag(":")(input)?;
    let (input, seconds) = take_ms()(input)?;
    let (input, _) = tag(",")(input)?;
    let (input, millis) = take_millis()(input)?;

    let total = hours
        .checked_mul(60 * 60 * 1000)
        .and_then(|h| h.checked_add(minutes * 60 * 1000 + seconds * 1000 + millis));
    match total {
        Some(total) => Ok((input, Duration::from_millis(total))),
        None => Err(nom::Err::Error(error_position!(input, ErrorKind::TooLarge))),
    }
}

fn seq_num(input: &str) -> IResult<&str, usize, VerboseError<&str>> {
    map_res(digit1, |s: &str| s.parse())(input)
}
