use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum Line {
    Timing {
        show_at: Duration,
        hide_at: Duration,
        /// Anything following the end timestamp, e.g. position coordinates.
        trailer: String,
        /// The line as read. Dropped once the times change.
        raw: Option<String>,
    },
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Subtitle {
    pub(crate) sequence_number: usize,
    pub(crate) lines: Vec<Line>,
}

impl Subtitle {
    pub fn shift(&mut self, offset: Duration) {
        for line in self.lines.iter_mut() {
            if let Line::Timing {
                show_at,
                hide_at,
                raw,
                ..
            } = line
            {
                *show_at += offset;
                *hide_at += offset;
                *raw = None;
            }
        }
    }
}

/// Converts float seconds to a `Duration`, rounding to the nearest nanosecond
/// so that values like `5.001` keep their last millisecond.
pub fn secs_to_duration(secs: f64) -> Duration {
    Duration::from_nanos((secs * 1e9).round() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_moves_only_timing_lines_and_drops_raw_text() {
        let mut sub = Subtitle {
            sequence_number: 3,
            lines: vec![
                Line::Timing {
                    show_at: Duration::from_millis(5_000),
                    hide_at: Duration::from_millis(7_000),
                    trailer: String::new(),
                    raw: Some("00:00:05,0 --> 00:00:07,0".to_string()),
                },
                Line::Text("00:00:01,000 is not a range".to_string()),
            ],
        };

        sub.shift(Duration::from_secs(60));

        assert_eq!(
            sub.lines,
            vec![
                Line::Timing {
                    show_at: Duration::from_millis(65_000),
                    hide_at: Duration::from_millis(67_000),
                    trailer: String::new(),
                    raw: None,
                },
                Line::Text("00:00:01,000 is not a range".to_string()),
            ]
        );
    }

    #[test]
    fn secs_to_duration_keeps_millis() {
        assert_eq!(secs_to_duration(5.001).as_millis(), 5001);
        assert_eq!(secs_to_duration(3725.5).as_millis(), 3_725_500);
        assert_eq!(secs_to_duration(0.0), Duration::ZERO);
    }
}
