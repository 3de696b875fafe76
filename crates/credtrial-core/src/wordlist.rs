//! Wordlist line filtering.
//!
//! Turns any buffered text source into a lazy sequence of candidate seeds:
//! lines are trimmed, blank lines dropped, `#` and `//` comments skipped
//! when requested, and the sequence ends at the optional limit. Invalid
//! UTF-8 is replaced rather than rejected. Opening and decompressing the
//! source is the caller's job.

use std::io::{self, BufRead};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordlistOptions {
    pub skip_comments: bool,
    pub limit: Option<usize>,
}

impl Default for WordlistOptions {
    fn default() -> Self {
        Self {
            skip_comments: true,
            limit: None,
        }
    }
}

/// Iterator returned by [`filter_lines`].
#[derive(Debug)]
pub struct WordlistLines<R> {
    reader: R,
    options: WordlistOptions,
    yielded: usize,
    buf: Vec<u8>,
}

pub fn filter_lines<R: BufRead>(reader: R, options: WordlistOptions) -> WordlistLines<R> {
    WordlistLines {
        reader,
        options,
        yielded: 0,
        buf: Vec::new(),
    }
}

/// Drain a source eagerly, stopping at the first read error.
pub fn collect_lines<R: BufRead>(reader: R, options: WordlistOptions) -> io::Result<Vec<String>> {
    filter_lines(reader, options).collect()
}

impl<R: BufRead> WordlistLines<R> {
    fn keep(&self, line: &str) -> bool {
        !line.is_empty() && !(self.options.skip_comments && (line.starts_with('#') || line.starts_with("//")))
    }
}

impl<R: BufRead> Iterator for WordlistLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.options.limit.is_some_and(|limit| self.yielded >= limit) {
            return None;
        }
        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {
                    let kept = {
                        let text = String::from_utf8_lossy(&self.buf);
                        let line = text.trim();
                        self.keep(line).then(|| line.to_string())
                    };
                    if let Some(line) = kept {
                        self.yielded += 1;
                        return Some(Ok(line));
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SAMPLE: &str = "# corporate defaults\n  Winter2026!  \n\n// legacy\npassword\r\nhunter2\n";

    #[test]
    fn test_trims_and_skips_comments() {
        let lines = collect_lines(Cursor::new(SAMPLE), WordlistOptions::default()).unwrap();
        assert_eq!(lines, vec!["Winter2026!", "password", "hunter2"]);
    }

    #[test]
    fn test_keeps_comments_when_asked() {
        let options = WordlistOptions {
            skip_comments: false,
            limit: None,
        };
        let lines = collect_lines(Cursor::new(SAMPLE), options).unwrap();
        assert_eq!(lines.first().map(String::as_str), Some("# corporate defaults"));
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_limit_stops_early() {
        let options = WordlistOptions {
            skip_comments: true,
            limit: Some(2),
        };
        let lines = collect_lines(Cursor::new(SAMPLE), options).unwrap();
        assert_eq!(lines, vec!["Winter2026!", "password"]);
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let bytes: &[u8] = b"caf\xe9\nok\n";
        let lines = collect_lines(bytes, WordlistOptions::default()).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "ok");
    }

    #[test]
    fn test_no_trailing_newline() {
        let lines = collect_lines(Cursor::new("last"), WordlistOptions::default()).unwrap();
        assert_eq!(lines, vec!["last"]);
    }
}
