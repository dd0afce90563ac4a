//! Line-level primitives of the tiny table format.
//!
//! Records are tab separated, nesting depth is encoded as leading tabs, and names may use a
//! two-character escape scheme when the file header carries the `escaped-names` property.
//!
//! | Character       | Escaped |
//! |-----------------|---------|
//! | backslash       | `\\`    |
//! | line feed       | `\n`    |
//! | carriage return | `\r`    |
//! | NUL             | `\0`    |
//! | tab             | `\t`    |

use std::borrow::Cow;

use crate::{Error::MalformedEscape, Result};

/// The field separator of the table format.
pub const SEPARATOR: char = '\t';

/// Characters which are escaped when `escaped-names` is active.
const TO_ESCAPE: [char; 5] = ['\\', '\n', '\r', '\0', '\t'];
/// The escape letter for each entry of [`TO_ESCAPE`], at the same position.
const ESCAPED: [char; 5] = ['\\', 'n', 'r', '0', 't'];

/// Returns the nesting depth of `line`, i.e. the number of leading tabs.
///
/// # Examples
///
/// ```rust
/// use tinymerge::tiny::codec::indent_of;
///
/// assert_eq!(indent_of("c\ta\tb"), 0);
/// assert_eq!(indent_of("\t\tp\t1\tx"), 2);
/// ```
#[must_use]
pub fn indent_of(line: &str) -> usize {
    line.bytes().take_while(|&b| b == b'\t').count()
}

/// Splits `line` into its tab separated fields, starting at byte `offset`.
///
/// The offset is normally the indentation returned by [`indent_of`]. A trailing tab produces a
/// trailing empty field, so blank names survive the split.
///
/// # Examples
///
/// ```rust
/// use tinymerge::tiny::codec::split_record;
///
/// assert_eq!(split_record("\tm\t()V\ta\t", 1), ["m", "()V", "a", ""]);
/// ```
#[must_use]
pub fn split_record(line: &str, offset: usize) -> Vec<&str> {
    line.get(offset..).unwrap_or_default().split(SEPARATOR).collect()
}

/// Escapes every reserved character in `text`.
///
/// Borrows the input when nothing needs escaping.
#[must_use]
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(TO_ESCAPE) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 4);
    escape_into(&mut out, text);
    Cow::Owned(out)
}

/// Appends `text` to `out`, escaping every reserved character on the way.
pub fn escape_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match TO_ESCAPE.iter().position(|&e| e == c) {
            Some(index) => {
                out.push('\\');
                out.push(ESCAPED[index]);
            }
            None => out.push(c),
        }
    }
}

/// Reverses [`escape`].
///
/// # Errors
/// Returns [`crate::Error::MalformedEscape`] if a backslash ends the text or is followed by a
/// character which is not an escape letter.
///
/// # Examples
///
/// ```rust
/// use tinymerge::tiny::codec::unescape;
///
/// assert_eq!(unescape("a\\tb").unwrap(), "a\tb");
/// assert!(unescape("trailing\\").is_err());
/// ```
pub fn unescape(text: &str) -> Result<Cow<'_, str>> {
    let Some(first) = text.find('\\') else {
        return Ok(Cow::Borrowed(text));
    };

    let mut out = String::with_capacity(text.len());
    out.push_str(&text[..first]);

    let mut chars = text[first..].chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        match chars.next() {
            None => {
                return Err(MalformedEscape(format!(
                    "incomplete escape sequence at the end of \"{text}\""
                )))
            }
            Some(letter) => match ESCAPED.iter().position(|&e| e == letter) {
                Some(index) => out.push(TO_ESCAPE[index]),
                None => {
                    return Err(MalformedEscape(format!(
                        "invalid escape character \\{letter} in \"{text}\""
                    )))
                }
            },
        }
    }

    Ok(Cow::Owned(out))
}

/// Applies [`unescape`] only when `escaped` is set.
///
/// # Errors
/// See [`unescape`].
pub fn unescape_opt(text: &str, escaped: bool) -> Result<Cow<'_, str>> {
    if escaped {
        unescape(text)
    } else {
        Ok(Cow::Borrowed(text))
    }
}

/// Returns `true` if `text` cannot be written verbatim into an unescaped table.
#[must_use]
pub fn needs_escape(text: &str) -> bool {
    text.contains(['\t', '\n', '\r'])
}
