use std::fmt;
use std::str::FromStr;

use tracing::warn;

use crate::error::StyleError;
use crate::models::Syllable;

/// HTS label times are in units of 100 ns
const HTS_TIME_UNITS_PER_SECOND: f64 = 10_000_000.0;

/// Supported label file layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelFormat {
    /// HTS full-context phone labels, grouped into syllables
    #[default]
    Hts,
    /// `start end name` lines in seconds, one segment per line
    Simple,
}

impl FromStr for LabelFormat {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hts" => Ok(LabelFormat::Hts),
            "simple" => Ok(LabelFormat::Simple),
            other => Err(StyleError::invalid_argument(format!(
                "unknown label format '{}' (expected hts or simple)",
                other
            ))),
        }
    }
}

impl fmt::Display for LabelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelFormat::Hts => f.write_str("hts"),
            LabelFormat::Simple => f.write_str("simple"),
        }
    }
}

/// Delimiters locating the phone identity and the phone's position in its
/// syllable inside an HTS full-context label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtsDelimiters {
    /// Precedes the current phone (`-` in `a^b-c+d`)
    pub phone_start: String,
    /// Follows the current phone
    pub phone_end: String,
    /// Precedes the `forward_backward` position field
    pub position_start: String,
    /// Follows the position field
    pub position_end: String,
}

impl Default for HtsDelimiters {
    fn default() -> Self {
        Self {
            phone_start: "-".to_string(),
            phone_end: "+".to_string(),
            position_start: "@".to_string(),
            position_end: "/A:".to_string(),
        }
    }
}

impl FromStr for HtsDelimiters {
    type Err = StyleError;

    /// Parse four comma-separated delimiters, e.g. `-,+,@,/A:`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != 4 || parts.iter().any(|p| p.is_empty()) {
            return Err(StyleError::invalid_argument(format!(
                "expected 4 non-empty comma-separated HTS delimiters, got '{}'",
                s
            )));
        }
        Ok(Self {
            phone_start: parts[0].to_string(),
            phone_end: parts[1].to_string(),
            position_start: parts[2].to_string(),
            position_end: parts[3].to_string(),
        })
    }
}

impl HtsDelimiters {
    /// Text between `open` and the next `close` after it
    fn between<'a>(context: &'a str, open: &str, close: &str) -> Option<&'a str> {
        let from = context.find(open)? + open.len();
        let len = context[from..].find(close)?;
        Some(&context[from..from + len])
    }

    fn phone<'a>(&self, context: &'a str) -> Option<&'a str> {
        Self::between(context, &self.phone_start, &self.phone_end)
    }

    /// Forward and backward position of the phone in its syllable
    fn position<'a>(&self, context: &'a str) -> Option<(&'a str, &'a str)> {
        Self::between(context, &self.position_start, &self.position_end)?.split_once('_')
    }
}

/// Position markers that open or close a syllable (`x` marks silence)
fn is_boundary(position: &str) -> bool {
    position == "1" || position == "x"
}

/// Parse HTS full-context phone labels into syllables.
///
/// A phone whose forward position is `1` (or `x`) opens a syllable, each
/// phone inside it appends its identity, and a phone whose backward position
/// is `1` (or `x`) closes it.
pub fn parse_hts_lab(name: &str, content: &str, delimiters: &HtsDelimiters) -> Vec<Syllable> {
    let mut sylls = Vec::new();
    let mut syll_start: Option<f64> = None;
    let mut identity = String::new();

    for (i, line) in content.lines().enumerate() {
        let columns: Vec<&str> = line.split_whitespace().collect();
        if columns.len() != 3 {
            continue;
        }

        let (Ok(phone_start), Ok(phone_end)) = (columns[0].parse::<f64>(), columns[1].parse::<f64>())
        else {
            warn!("Line {} in {} has malformed times. Skipping...", i + 1, name);
            continue;
        };
        let context = columns[2];
        let (Some(phone), Some((forward, backward))) =
            (delimiters.phone(context), delimiters.position(context))
        else {
            warn!("Line {} in {} does not match the HTS delimiters. Skipping...", i + 1, name);
            continue;
        };

        // Phones before the first syllable onset belong to no syllable
        if is_boundary(forward) {
            syll_start = Some(phone_start / HTS_TIME_UNITS_PER_SECOND);
            identity.clear();
        }
        if syll_start.is_none() {
            continue;
        }
        identity.push_str(phone);

        if is_boundary(backward) {
            if let Some(start) = syll_start.take() {
                let end = phone_end / HTS_TIME_UNITS_PER_SECOND;
                sylls.push(Syllable::new(start, end, std::mem::take(&mut identity)));
            }
        }
    }

    sylls
}

/// Parse `start end name` lines (seconds) into syllables.
/// Empty lines are skipped silently, other malformed lines with a warning.
pub fn parse_simple_lab(name: &str, content: &str) -> Vec<Syllable> {
    let mut sylls = Vec::new();

    for (i, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let columns: Vec<&str> = line.split_whitespace().collect();
        let parsed = match columns.as_slice() {
            [start, end, label] => start
                .parse::<f64>()
                .ok()
                .zip(end.parse::<f64>().ok())
                .map(|(start, end)| Syllable::new(start, end, *label)),
            _ => None,
        };
        match parsed {
            Some(syll) => sylls.push(syll),
            None => warn!("Line {} in {} is malformed. Skipping...", i + 1, name),
        }
    }

    sylls
}

/// Parse label file content in the given format
pub fn parse_labels(
    name: &str,
    content: &str,
    format: LabelFormat,
    delimiters: &HtsDelimiters,
) -> Vec<Syllable> {
    match format {
        LabelFormat::Hts => parse_hts_lab(name, content, delimiters),
        LabelFormat::Simple => parse_simple_lab(name, content),
    }
}
