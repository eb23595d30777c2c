//! Line-tag state machine that turns one record block into a [`TimeSeries`].
//!
//! The decoder is fed one line at a time. Outside a sub-block every line
//! must carry a known tag. Three tags open a sub-block:
//!
//! - `NOT:` collects raw lines into the notes until a line starting with `@`
//!   (the terminator is consumed, not stored).
//! - `TEX:` collects raw lines into the free text until the block end `#`.
//! - `NOB:` declares the observation count, then reads whitespace separated
//!   value tokens until a flag tag (`PUB:`, `PRI:`, `DET:`) or the block end.
//!   The flag line is then handled as an ordinary tagged line.
//!
//! A `#` line inside notes is a note, not the block end. [`Mode::after`] is
//! the single place that decides, and block splitting relies on it too.
//!
//! Period payloads are parsed once the whole block has been read, so they
//! may appear before or after `FRE:`.

use bdsice_model::text::fold_diacritics;
use bdsice_model::{Frequency, MISSING_VALUE_SENTINEL, Observations, TimeSeries};
use tracing::debug;

use crate::calendar::{observation_dates, parse_period, to_timestamp};
use crate::error::DecodeError;
use crate::tag::{LineKind, SECTION_END, Tag, classify};

/// Tokens that stand for a missing observation.
pub const MISSING_VALUE_TOKENS: [&str; 2] = ["OM", "ND"];

/// Which part of the block the next line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Ordinary tagged lines.
    Fields,
    /// Inside a `NOT:` section.
    Notes,
    /// Inside a `TEX:` section.
    FreeText,
    /// Reading value rows after `NOB:`.
    Values,
    /// The block end has been seen; further lines are ignored.
    Done,
}

impl Mode {
    /// The mode that follows once `line` has been read in this mode.
    pub fn after(self, line: &str) -> Mode {
        match (self, classify(line)) {
            (Mode::Done, _) => Mode::Done,
            (Mode::Notes, _) if line.starts_with(SECTION_END) => Mode::Fields,
            (Mode::Notes, _) => Mode::Notes,
            (_, LineKind::BlockEnd) => Mode::Done,
            (Mode::FreeText, _) => Mode::FreeText,
            (Mode::Values, LineKind::Tagged(tag, _)) if tag.is_flag() => Mode::Fields,
            (Mode::Values, _) => Mode::Values,
            (Mode::Fields, LineKind::Tagged(Tag::Notes, _)) => Mode::Notes,
            (Mode::Fields, LineKind::Tagged(Tag::FreeText, _)) => Mode::FreeText,
            (Mode::Fields, LineKind::Tagged(Tag::ObservationCount, _)) => Mode::Values,
            (Mode::Fields, _) => Mode::Fields,
        }
    }
}

/// A raw payload together with the line it came from.
#[derive(Debug, Clone)]
struct Located {
    line: usize,
    payload: String,
}

/// Incremental decoder for a single record block.
#[derive(Debug)]
pub struct BlockDecoder {
    mode: Mode,
    line: usize,
    code: String,
    title: String,
    units: String,
    source: String,
    notes: Vec<String>,
    free_text: Vec<String>,
    notes_at: Option<Located>,
    decimals: u32,
    frequency: Option<Frequency>,
    start: Option<Located>,
    end: Option<Located>,
    declared_count: Option<(Located, usize)>,
    values: Vec<f64>,
    contains_missing: bool,
    is_active: bool,
}

impl Default for BlockDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockDecoder {
    pub fn new() -> Self {
        Self {
            mode: Mode::Fields,
            line: 0,
            code: String::new(),
            title: String::new(),
            units: String::new(),
            source: String::new(),
            notes: Vec::new(),
            free_text: Vec::new(),
            notes_at: None,
            decimals: 0,
            frequency: None,
            start: None,
            end: None,
            declared_count: None,
            values: Vec::new(),
            contains_missing: false,
            is_active: false,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Consume the next line of the block.
    pub fn feed(&mut self, line: &str) -> Result<(), DecodeError> {
        if self.mode == Mode::Done {
            return Ok(());
        }
        self.line += 1;
        let next = self.mode.after(line);
        match (self.mode, next) {
            (Mode::Notes, Mode::Notes) => self.notes.push(line.to_string()),
            (Mode::FreeText, Mode::FreeText) => self.free_text.push(line.to_string()),
            (Mode::Values, Mode::Values) => self.read_values(line)?,
            (Mode::Fields | Mode::Values, _) => self.dispatch(line)?,
            _ => {}
        }
        self.mode = next;
        Ok(())
    }

    fn dispatch(&mut self, line: &str) -> Result<(), DecodeError> {
        let (tag, payload) = match classify(line) {
            LineKind::Tagged(tag, payload) => (tag, payload),
            LineKind::BlockEnd => return Ok(()),
            LineKind::Other => {
                return Err(DecodeError::UnrecognizedLine {
                    line: self.line,
                    content: line.to_string(),
                });
            }
        };
        let here = self.line;
        match tag {
            Tag::Code => self.code = payload.to_string(),
            Tag::Title => self.title = fold_diacritics(payload),
            Tag::Units => self.units = payload.to_string(),
            Tag::Source => self.source = payload.to_string(),
            Tag::Notes => self.notes_at = Some(located(here, payload)),
            Tag::FreeText => {}
            Tag::Decimals => {
                self.decimals = payload.parse().map_err(|_| {
                    DecodeError::malformed(tag, here, payload, "expected a non-negative integer")
                })?;
            }
            Tag::Frequency => {
                // Trailing tokens (`FRE: 12 3`) carry no information we use.
                let first = payload.split_whitespace().next().unwrap_or_default();
                let value: i64 = first.parse().map_err(|_| {
                    DecodeError::malformed(tag, here, payload, "expected an integer")
                })?;
                let frequency = Frequency::try_from(value)
                    .map_err(|err| DecodeError::malformed(tag, here, payload, err.to_string()))?;
                self.frequency = Some(frequency);
            }
            Tag::Start => self.start = Some(located(here, payload)),
            Tag::End => self.end = Some(located(here, payload)),
            Tag::ObservationCount => {
                if self.declared_count.is_some() {
                    return Err(DecodeError::malformed(
                        tag,
                        here,
                        payload,
                        "observation count declared twice",
                    ));
                }
                let count: usize = payload.parse().map_err(|_| {
                    DecodeError::malformed(tag, here, payload, "expected a non-negative integer")
                })?;
                self.declared_count = Some((located(here, payload), count));
            }
            // Every decoded series is public; the flags carry no override.
            Tag::Public | Tag::Private => {}
            Tag::Active => {
                self.is_active = match payload {
                    "0" => false,
                    "1" => true,
                    _ => {
                        return Err(DecodeError::malformed(tag, here, payload, "must be 0 or 1"));
                    }
                };
            }
        }
        Ok(())
    }

    fn read_values(&mut self, line: &str) -> Result<(), DecodeError> {
        for token in line.split_whitespace() {
            if MISSING_VALUE_TOKENS.contains(&token) {
                self.values.push(MISSING_VALUE_SENTINEL);
                self.contains_missing = true;
                continue;
            }
            let value: f64 = token
                .parse()
                .ok()
                .filter(|value: &f64| value.is_finite())
                .ok_or_else(|| {
                    DecodeError::malformed(
                        Tag::ObservationCount,
                        self.line,
                        token,
                        "value is neither a finite number nor a missing-value token",
                    )
                })?;
            self.values.push(value);
        }
        Ok(())
    }

    /// Validate the collected fields and build the series.
    pub fn finish(self) -> Result<TimeSeries, DecodeError> {
        if self.mode == Mode::Notes
            && let Some(opened) = &self.notes_at
        {
            return Err(DecodeError::malformed(
                Tag::Notes,
                opened.line,
                &opened.payload,
                format!("notes section is not closed by a line starting with {SECTION_END:?}"),
            ));
        }
        let frequency = self.frequency.ok_or(DecodeError::MissingField {
            tag: Tag::Frequency,
        })?;
        let (count_at, declared) = self.declared_count.ok_or(DecodeError::MissingField {
            tag: Tag::ObservationCount,
        })?;
        if declared != self.values.len() {
            return Err(DecodeError::malformed(
                Tag::ObservationCount,
                count_at.line,
                count_at.payload,
                format!(
                    "declared {declared} observations but found {}",
                    self.values.len()
                ),
            ));
        }

        let start_at = self
            .start
            .ok_or(DecodeError::MissingField { tag: Tag::Start })?;
        let start = parse_period(&start_at.payload, frequency).map_err(|err| {
            DecodeError::malformed(Tag::Start, start_at.line, &start_at.payload, err.to_string())
        })?;
        let dates = observation_dates(start, frequency, declared).map_err(|err| {
            DecodeError::malformed(Tag::Start, start_at.line, &start_at.payload, err.to_string())
        })?;
        let last = dates.last().copied().unwrap_or(start);

        let end = match &self.end {
            Some(end_at) => {
                let end = parse_period(&end_at.payload, frequency).map_err(|err| {
                    DecodeError::malformed(Tag::End, end_at.line, &end_at.payload, err.to_string())
                })?;
                if end < start {
                    return Err(DecodeError::malformed(
                        Tag::End,
                        end_at.line,
                        &end_at.payload,
                        format!("end {end} precedes start {start}"),
                    ));
                }
                if end != last {
                    debug!(code = %self.code, %end, %last, "declared end differs from last observation date");
                }
                end
            }
            None => last,
        };

        let mut series = TimeSeries::new(self.code, frequency);
        series.title = self.title;
        series.units = self.units;
        series.source = self.source;
        series.notes = self.notes;
        series.free_text = self.free_text;
        series.decimals = self.decimals;
        series.start = Some(to_timestamp(start));
        series.end = Some(to_timestamp(end));
        series.observation_count = declared;
        series.observations = Observations {
            dates: dates.into_iter().map(to_timestamp).collect(),
            values: self.values,
        };
        series.contains_missing = self.contains_missing;
        series.is_active = self.is_active;
        Ok(series)
    }
}

fn located(line: usize, payload: &str) -> Located {
    Located {
        line,
        payload: payload.to_string(),
    }
}

/// Decode one record block.
///
/// Lines after the block-end marker are ignored. A failure never yields a
/// partial series.
pub fn decode<S: AsRef<str>>(lines: &[S]) -> Result<TimeSeries, DecodeError> {
    let mut decoder = BlockDecoder::new();
    for line in lines {
        decoder.feed(line.as_ref())?;
        if decoder.mode() == Mode::Done {
            break;
        }
    }
    let series = decoder.finish()?;
    debug!(
        code = %series.code,
        frequency = %series.frequency,
        observations = series.observation_count,
        contains_missing = series.contains_missing,
        "decoded record block"
    );
    Ok(series)
}
