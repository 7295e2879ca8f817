//! Two-column text layout: a label on the left, a word-wrapped description
//! on the right.
//!
//! ```text
//! <indentation><label slice, padded><spacing><description segment>
//! ```
//!
//! Widths are counted in characters. Only ASCII whitespace (including the
//! vertical tab) is a break point.

use std::ops::Range;

use crate::config::LayoutConfig;
use crate::error::{ArgError, Result};

#[derive(Debug, Clone, Default)]
pub struct TextLayout {
    config: LayoutConfig,
}

impl TextLayout {
    /// Validate `config` so that every later `wrap` has a right column of at
    /// least one character.
    pub fn new(config: LayoutConfig) -> Result<Self> {
        let fixed = config.indentation.chars().count() + config.spacing.chars().count();
        if config.maximum_left_length < fixed {
            return Err(ArgError::Layout(format!(
                "maximum left length {} is smaller than indentation + spacing ({fixed})",
                config.maximum_left_length
            )));
        }
        if config.line_length <= config.maximum_left_length {
            return Err(ArgError::Layout(format!(
                "line length {} leaves no room for descriptions (maximum left length {})",
                config.line_length, config.maximum_left_length
            )));
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    fn indentation_len(&self) -> usize {
        self.config.indentation.chars().count()
    }

    fn spacing_len(&self) -> usize {
        self.config.spacing.chars().count()
    }

    /// Label column width actually used for a requested width.
    pub fn left_column_width(&self, requested: usize) -> usize {
        let cap = self
            .config
            .maximum_left_length
            .saturating_sub(self.spacing_len())
            .saturating_sub(self.indentation_len());
        cap.min(requested)
    }

    /// Characters left for the description once the label column is `left` wide.
    pub fn right_column_width(&self, left: usize) -> usize {
        self.config
            .line_length
            .saturating_sub(self.indentation_len())
            .saturating_sub(left)
            .saturating_sub(self.spacing_len())
    }

    /// Render `label` and `description` as aligned lines, each ending in `\n`.
    ///
    /// The label is cut into `left_column_width` slices, one per description
    /// line. Slices left over once the description is exhausted are emitted
    /// on their own indented lines. An empty description renders the label
    /// rows only.
    pub fn wrap(&self, label: &str, left_column_width: usize, description: &str) -> String {
        let left = self.left_column_width(left_column_width);
        let right = self.right_column_width(left);

        let label: Vec<char> = label.chars().collect();
        let text: Vec<char> = description.chars().collect();
        let segments = split_lines(&text, right);
        tracing::trace!(lines = segments.len(), left, right, "wrapped description");

        let mut out = String::new();
        let mut label_pos = 0;
        for segment in &segments {
            let slice = take_slice(&label, &mut label_pos, left);
            out.push_str(&self.config.indentation);
            out.push_str(&slice);
            out.extend(std::iter::repeat_n(' ', left - slice.chars().count()));
            out.push_str(&self.config.spacing);
            out.extend(&text[segment.clone()]);
            out.push('\n');
        }

        if segments.is_empty() || (left > 0 && label_pos < label.len()) {
            loop {
                let slice = take_slice(&label, &mut label_pos, left);
                out.push_str(&self.config.indentation);
                out.push_str(&slice);
                out.push('\n');
                if left == 0 || label_pos >= label.len() {
                    break;
                }
            }
        }
        out
    }
}

/// Next `width` characters of `label` starting at `pos`; advances `pos`.
fn take_slice(label: &[char], pos: &mut usize, width: usize) -> String {
    let start = (*pos).min(label.len());
    let end = (start + width).min(label.len());
    *pos = end;
    label[start..end].iter().collect()
}

/// Greedy line breaking. Returns the character range of every line.
///
/// A line ends at the last whitespace once it grows past `width`, at exactly
/// `width` characters when it holds no whitespace, at an explicit newline, or
/// at the end of the text. The next line skips one leading whitespace
/// character. A newline is only kept after a newline break, so blank lines
/// survive but a width break never produces an empty line.
fn split_lines(text: &[char], width: usize) -> Vec<Range<usize>> {
    let width = width.max(1);
    let total = text.len();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut breakable: Option<usize> = None;
    let mut i = 0;

    while i < total {
        let c = text[i];
        if is_break(c) {
            breakable = Some(i);
        }
        let count = i - start + 1;

        let cut = match breakable {
            Some(at) if count > width => Some((at, at + 1, text[at] == '\n')),
            None if count >= width => Some((i + 1, i + 1, false)),
            _ if c == '\n' => Some((i, i + 1, true)),
            _ if i + 1 == total => Some((total, total, false)),
            _ => None,
        };

        let Some((end, mut next, after_newline)) = cut else {
            i += 1;
            continue;
        };
        lines.push(start..end);
        if next < total && text[next] != '\n' && is_break(text[next]) {
            next += 1;
        }
        // a newline right behind a width break ends the line already emitted
        if !after_newline && next < total && text[next] == '\n' {
            next += 1;
        }
        start = next;
        i = next;
        breakable = None;
    }
    lines
}

fn is_break(c: char) -> bool {
    c.is_ascii_whitespace() || c == '\x0B'
}
