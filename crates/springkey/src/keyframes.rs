//! Keyframe quantization and `@keyframes` serialization.
//!
//! A sampled curve of `n` values is laid onto an evenly spaced percentage
//! axis: sample `i` lands at `i * 100 / (n - 1)` percent, rounded to five
//! decimal places. Each sample is turned into a CSS declaration fragment by
//! a caller-supplied mapper.

use std::fmt::Write as _;

use crate::error::{Result, SpringError};

/// Decimal places kept on keyframe percentages.
pub const PERCENT_PRECISION: i32 = 5;

/// Rounds `value` to [`PERCENT_PRECISION`] decimal places.
#[inline]
pub fn round_percent(value: f64) -> f64 {
    let scale = 10f64.powi(PERCENT_PRECISION);
    (value * scale).round() / scale
}

/// One percentage-indexed snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Keyframe {
    /// Position on the timeline, `0..=100`.
    pub percent: f64,
    /// Declaration fragment produced by the mapper.
    pub value: String,
}

/// An ordered list of keyframes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyframeSet {
    frames: Vec<Keyframe>,
}

impl KeyframeSet {
    /// Returns the keyframes in timeline order.
    pub fn frames(&self) -> &[Keyframe] {
        &self.frames
    }

    /// Number of keyframes.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns true if there are no keyframes.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Iterator over the percentages.
    pub fn percents(&self) -> impl Iterator<Item = f64> + '_ {
        self.frames.iter().map(|frame| frame.percent)
    }

    /// Renders the frame list without the surrounding `@keyframes` block,
    /// e.g. `0%{opacity:1}100%{opacity:0}`.
    pub fn render_frames(&self) -> String {
        let mut out = String::new();
        for frame in &self.frames {
            let _ = write!(out, "{}%{{{}}}", frame.percent, frame.value);
        }
        out
    }

    /// Renders one `@<prefix>keyframes <name> {...}` block per dialect, in
    /// dialect order.
    ///
    /// # Errors
    ///
    /// [`SpringError::InvalidName`] for an unusable name and
    /// [`SpringError::NoDialects`] for an empty dialect list.
    pub fn render(&self, name: &str, dialects: &Dialects) -> Result<String> {
        validate_name(name)?;
        dialects.ensure_not_empty()?;
        Ok(self.render_blocks(name, dialects))
    }

    pub(crate) fn render_blocks(&self, name: &str, dialects: &Dialects) -> String {
        let frames = self.render_frames();
        let mut out = String::new();
        for prefix in dialects.iter() {
            let _ = write!(out, "@{prefix}keyframes {name} {{{frames}}}");
        }
        out
    }
}

/// Maps a sampled curve onto keyframes.
///
/// A single sample becomes one keyframe at 100%, so the animation holds
/// that value for its (zero) duration.
///
/// # Errors
///
/// [`SpringError::EmptyCurve`] when `samples` is empty.
///
/// # Example
///
/// ```rust
/// use springkey::quantize;
///
/// let set = quantize(&[0.5, 0.2, 0.05], |v| v.to_string())?;
/// let percents: Vec<f64> = set.percents().collect();
/// assert_eq!(percents, vec![0.0, 50.0, 100.0]);
/// # Ok::<(), springkey::SpringError>(())
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn quantize<F>(samples: &[f64], mapper: F) -> Result<KeyframeSet>
where
    F: Fn(f64) -> String,
{
    let frames = match samples {
        [] => return Err(SpringError::EmptyCurve),
        [only] => vec![Keyframe {
            percent: 100.0,
            value: mapper(*only),
        }],
        _ => {
            let spacing = 100.0 / (samples.len() - 1) as f64;
            samples
                .iter()
                .enumerate()
                .map(|(i, &sample)| Keyframe {
                    percent: round_percent(i as f64 * spacing),
                    value: mapper(sample),
                })
                .collect()
        }
    };
    Ok(KeyframeSet { frames })
}

/// Ordered style-dialect variants, written as vendor prefixes.
///
/// Order is the cascade order of the emitted rules. Put vendor prefixes
/// before the unprefixed `""` entry so the standard rule wins wherever both
/// are understood.
///
/// # Example
///
/// ```rust
/// use springkey::Dialects;
///
/// let dialects = Dialects::new(["-moz-", ""]);
/// assert_eq!(dialects.iter().collect::<Vec<_>>(), vec!["-moz-", ""]);
/// assert_eq!(Dialects::default().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialects {
    prefixes: Vec<String>,
}

impl Dialects {
    /// Creates a dialect list from prefixes in cascade order.
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    /// Only the unprefixed dialect.
    pub fn standard() -> Self {
        Self::new([""])
    }

    /// WebKit and Gecko prefixes followed by the standard spelling.
    pub fn legacy() -> Self {
        Self::new(["-webkit-", "-moz-", ""])
    }

    /// Iterates prefixes in cascade order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.prefixes.iter().map(String::as_str)
    }

    /// Number of dialects.
    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    /// Returns true if no dialect is configured.
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    pub(crate) fn ensure_not_empty(&self) -> Result<()> {
        if self.is_empty() {
            Err(SpringError::NoDialects)
        } else {
            Ok(())
        }
    }
}

impl Default for Dialects {
    fn default() -> Self {
        Self::standard()
    }
}

/// Checks that `name` can be used both as an `@keyframes` name and as a
/// class selector: ASCII letters, digits, `-` and `_`, not starting with a
/// digit, and not a lone `-` or a `-` followed by a digit.
pub fn validate_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let head_ok = match (chars.next(), chars.next()) {
        (None, _) | (Some('-'), None) => false,
        (Some(first), _) if first.is_ascii_digit() => false,
        (Some('-'), Some(second)) => !second.is_ascii_digit(),
        _ => true,
    };
    let valid = head_ok
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(SpringError::InvalidName(name.to_string()))
    }
}
