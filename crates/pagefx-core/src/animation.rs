#![forbid(unsafe_code)]

//! Animation primitives for page effects.
//!
//! Counters advance one step per host frame and staggers are plain
//! [`Duration`] offsets, so both behave identically under a browser frame
//! loop and in deterministic tests.

use std::time::Duration;

// ---------------------------------------------------------------------------
// CountUp
// ---------------------------------------------------------------------------

/// What a counter should display after one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountFrame {
    /// Still below target: show this (floored) value and schedule another frame.
    Running(i64),
    /// Reached or passed target: show the original text and stop.
    Done,
}

/// Accumulator that climbs from zero to `target` in fixed per-frame steps.
///
/// The per-frame increment is `target / (duration / frame)`, so a 2s count
/// at 16ms frames takes 125 frames. The displayed value is the floor of the
/// accumulator and is strictly below `target` until the count is done.
#[derive(Debug, Clone, Copy)]
pub struct CountUp {
    target: f64,
    current: f64,
    duration: Duration,
    frame: Duration,
}

impl CountUp {
    /// Create a counter for `target` animated over `duration` at `frame` pacing.
    pub fn new(target: f64, duration: Duration, frame: Duration) -> Self {
        Self {
            target,
            current: 0.0,
            duration: if duration.is_zero() {
                Duration::from_nanos(1)
            } else {
                duration
            },
            frame: if frame.is_zero() {
                Duration::from_nanos(1)
            } else {
                frame
            },
        }
    }

    /// Amount added to the accumulator each frame.
    #[must_use]
    pub fn increment(&self) -> f64 {
        self.target / (self.duration.as_secs_f64() / self.frame.as_secs_f64())
    }

    /// Advance one frame and report what to display.
    pub fn step(&mut self) -> CountFrame {
        self.current += self.increment();
        if self.current < self.target {
            CountFrame::Running(self.current.floor() as i64)
        } else {
            CountFrame::Done
        }
    }
}

/// Parse a counter target from a statistic element's text.
///
/// Reads like `parseInt(text, 10)`: leading whitespace, an optional sign,
/// then the longest run of ASCII digits. Whatever follows the digits is
/// ignored, so `"1e3"` counts to 1 and `"98%"` to 98. Text without a leading
/// digit run (`"N/A"`, `""`) is not a counter.
#[must_use]
pub fn parse_count_target(text: &str) -> Option<f64> {
    let rest = text.trim_start();
    let (negative, rest) = match rest.as_bytes().first() {
        Some(b'-') => (true, &rest[1..]),
        Some(b'+') => (false, &rest[1..]),
        _ => (false, rest),
    };
    let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return None;
    }
    let value: f64 = rest[..digits].parse().ok()?;
    let value = if negative { -value } else { value };
    value.is_finite().then_some(value)
}

// ---------------------------------------------------------------------------
// Stagger
// ---------------------------------------------------------------------------

/// Linear stagger offsets: `offset[i] = i * delay`.
///
/// Uses integer arithmetic on [`Duration`] so offsets carry no float drift.
#[must_use]
pub fn stagger_offsets(count: usize, delay: Duration) -> Vec<Duration> {
    (0..count)
        .map(|i| delay.saturating_mul(u32::try_from(i).unwrap_or(u32::MAX)))
        .collect()
}

/// Format a duration as a CSS time value in seconds (`0.45s`).
#[must_use]
pub fn css_seconds(d: Duration) -> String {
    format!("{}s", d.as_secs_f64())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const TWO_SECONDS: Duration = Duration::from_secs(2);
    const FRAME: Duration = Duration::from_millis(16);

    #[test]
    fn count_up_increment_matches_sixty_fps_pacing() {
        let counter = CountUp::new(1200.0, TWO_SECONDS, FRAME);
        assert!((counter.increment() - 9.6).abs() < 1e-9);
    }

    #[test]
    fn count_up_never_displays_target_before_done() {
        let mut counter = CountUp::new(1200.0, TWO_SECONDS, FRAME);
        let mut frames = 0;
        let mut last = -1;
        loop {
            frames += 1;
            match counter.step() {
                CountFrame::Running(v) => {
                    assert!(v < 1200, "displayed {v} at frame {frames}");
                    assert!(v >= last, "counter went backwards");
                    last = v;
                }
                CountFrame::Done => break,
            }
            assert!(frames < 200, "counter never finished");
        }
        assert!((125..=126).contains(&frames), "took {frames} frames");
    }

    #[test]
    fn zero_target_finishes_on_first_frame() {
        let mut counter = CountUp::new(0.0, TWO_SECONDS, FRAME);
        assert_eq!(counter.step(), CountFrame::Done);
    }

    #[test]
    fn parse_count_target_reads_leading_integer() {
        assert_eq!(parse_count_target("1200"), Some(1200.0));
        assert_eq!(parse_count_target(" 42 "), Some(42.0));
        assert_eq!(parse_count_target("12.9"), Some(12.0));
        assert_eq!(parse_count_target("98%"), Some(98.0));
        assert_eq!(parse_count_target("1,200"), Some(1.0));
        assert_eq!(parse_count_target("-5"), Some(-5.0));
        assert_eq!(parse_count_target("+7"), Some(7.0));
        assert_eq!(parse_count_target("N/A"), None);
        assert_eq!(parse_count_target(""), None);
        assert_eq!(parse_count_target("inf"), None);
        assert_eq!(parse_count_target("-"), None);
    }

    #[test]
    fn exponent_text_counts_to_its_leading_digit() {
        let target = parse_count_target("1e3").unwrap();
        assert_eq!(target, 1.0);
        let mut counter = CountUp::new(target, TWO_SECONDS, FRAME);
        let mut shown = Vec::new();
        while let CountFrame::Running(v) = counter.step() {
            shown.push(v);
        }
        assert!(!shown.is_empty());
        assert!(shown.iter().all(|&v| v == 0), "showed {shown:?}");
    }

    #[test]
    fn stagger_is_linear_from_zero() {
        let offsets = stagger_offsets(4, Duration::from_millis(150));
        assert_eq!(
            offsets,
            vec![
                Duration::ZERO,
                Duration::from_millis(150),
                Duration::from_millis(300),
                Duration::from_millis(450),
            ]
        );
        assert!(stagger_offsets(0, Duration::from_millis(100)).is_empty());
    }

    #[test]
    fn css_seconds_has_no_float_noise() {
        assert_eq!(css_seconds(Duration::ZERO), "0s");
        assert_eq!(css_seconds(Duration::from_millis(300)), "0.3s");
        assert_eq!(css_seconds(Duration::from_millis(450)), "0.45s");
    }
}
