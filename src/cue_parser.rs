use std::collections::BTreeMap;
use std::fmt;
use regex::Regex;
use once_cell::sync::Lazy;
use log::debug;
use serde::Serialize;
use crate::errors::CueError;

// @module: WebVTT-style cue parsing

// @const: One timestamp, `H+:MM:SS[.fff]` or `MM:SS[.fff]`, comma or dot separator
const TIMESTAMP_PATTERN: &str = r"(?:[0-9]+:[0-5][0-9]:[0-5][0-9](?:[.,][0-9]+)?|[0-5][0-9]:[0-5][0-9](?:[.,][0-9]+)?)";

// @const: Timing line, `<start> --> <end>` at the start of a line
static TIMING_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^ *{ts} +--> +{ts}", ts = TIMESTAMP_PATTERN)).unwrap()
});

// @const: Timestamp components, hours optional
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:([0-9]+):)?([0-5][0-9]):([0-5][0-9](?:[.,][0-9]+)?)").unwrap()
});

const CUE_ARROW: &str = "-->";

// @struct: Single timed cue
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CueRecord {
    // @field: Start time in seconds (inclusive)
    pub start_time: f64,

    // @field: End time in seconds
    pub end_time: f64,

    // @field: Cue settings from the timing line, kept verbatim
    pub settings: BTreeMap<String, String>,

    // @field: Payload lines, newline-joined
    pub text: String,
}

impl CueRecord {
    pub fn new(start_time: f64, end_time: f64, settings: BTreeMap<String, String>, text: String) -> Self {
        CueRecord {
            start_time,
            end_time,
            settings,
            text,
        }
    }

    /// Cue length in seconds. Negative when the cue ends before it starts.
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// Whether `end_time >= start_time`. The parser accepts inverted ranges,
    /// this lets callers decide what to do with them.
    pub fn has_valid_range(&self) -> bool {
        self.end_time >= self.start_time
    }

    /// Format seconds as a WebVTT timestamp (HH:MM:SS.mmm)
    pub fn format_timestamp(seconds: f64) -> String {
        let ms = (seconds.max(0.0) * 1000.0).round() as u64;
        let hours = ms / 3_600_000;
        let minutes = (ms % 3_600_000) / 60_000;
        let secs = (ms % 60_000) / 1_000;
        let millis = ms % 1_000;

        format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, secs, millis)
    }
}

impl fmt::Display for CueRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            Self::format_timestamp(self.start_time),
            CUE_ARROW,
            Self::format_timestamp(self.end_time)
        )?;
        for (key, value) in &self.settings {
            write!(f, " {}:{}", key, value)?;
        }
        writeln!(f)?;
        if !self.text.is_empty() {
            writeln!(f, "{}", self.text)?;
        }
        Ok(())
    }
}

/// Parse cue text into records, in source order.
///
/// Blocks are separated by empty lines; only blocks holding a timing line
/// become cues, so headers, `NOTE` blocks and stray text are skipped. Time
/// ranges are not validated: inverted, overlapping or unsorted cues are
/// returned as found.
pub fn parse_cues(input: &str) -> Result<Vec<CueRecord>, CueError> {
    let normalized = normalize_line_endings(input);
    let blocks = split_into_blocks(&normalized);

    let mut cues = Vec::new();
    for block in &blocks {
        if let Some(timing_index) = find_timing_line(block) {
            cues.push(parse_cue_block(block, timing_index)?);
        }
    }

    debug!(
        "Parsed {} cue(s) from {} block(s), {} block(s) without timing line skipped",
        cues.len(),
        blocks.len(),
        blocks.len() - cues.len()
    );

    let inverted = cues.iter().filter(|cue| !cue.has_valid_range()).count();
    if inverted > 0 {
        debug!("{} cue(s) end before they start", inverted);
    }

    Ok(cues)
}

/// Convert one timestamp to seconds.
///
/// The first timestamp found in `timestamp` is used; surrounding text is
/// ignored.
pub fn parse_timestamp(timestamp: &str) -> Result<f64, CueError> {
    let caps = TIMESTAMP_REGEX
        .captures(timestamp)
        .ok_or_else(|| CueError::MalformedTimestamp(timestamp.to_string()))?;

    let malformed = || CueError::MalformedTimestamp(timestamp.to_string());

    let hours: f64 = match caps.get(1) {
        Some(m) => m.as_str().parse().map_err(|_| malformed())?,
        None => 0.0,
    };
    let minutes: f64 = caps[2].parse().map_err(|_| malformed())?;
    let seconds: f64 = caps[3].replace(',', ".").parse().map_err(|_| malformed())?;

    Ok(hours * 3600.0 + minutes * 60.0 + seconds)
}

/// Extract `key:value` settings from the text following a timing line.
///
/// Tokens are space separated and split at their first colon; tokens with
/// an empty key or value are dropped. A repeated key keeps its last value.
pub fn parse_cue_settings(settings: &str) -> BTreeMap<String, String> {
    settings
        .split(' ')
        .filter_map(|part| part.split_once(':'))
        .filter(|(key, value)| !key.is_empty() && !value.is_empty())
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

fn normalize_line_endings(input: &str) -> String {
    input.replace("\r\n", "\n").replace('\r', "\n")
}

// Maximal runs of non-empty lines; any number of empty lines separates two blocks.
// Whitespace-only lines belong to the surrounding block.
fn split_into_blocks(text: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();

    for line in text.split('\n') {
        if line.is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }

    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
}

fn find_timing_line(block: &[&str]) -> Option<usize> {
    block.iter().position(|line| TIMING_LINE_REGEX.is_match(line))
}

fn parse_cue_block(block: &[&str], timing_index: usize) -> Result<CueRecord, CueError> {
    let timing_line = block[timing_index];

    let (start_part, end_part) = timing_line
        .split_once(CUE_ARROW)
        .ok_or_else(|| CueError::MalformedTimestamp(timing_line.to_string()))?;
    let start_time = parse_timestamp(start_part)?;
    let end_time = parse_timestamp(end_part)?;

    let settings = parse_cue_settings(&TIMING_LINE_REGEX.replace(timing_line, ""));

    // Later timing lines in the same block stay in the payload
    let text = block[timing_index + 1..].join("\n");

    Ok(CueRecord::new(start_time, end_time, settings, text))
}
