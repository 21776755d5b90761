// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Loading harness-supplied samples and the errors of the sample interface.
//!
//! Sample files hold one integer per line, decimal or `0x`-prefixed hex.
//! Blank lines are skipped and `#` starts a comment that runs to the end of
//! the line:
//!
//! ```text
//! # ramp on channel 3
//! 0
//! 0x400
//! 2048   # midscale
//! ```
//!
//! A file is parsed completely before any of it is used, so a malformed file
//! never leaves a channel half loaded.

use std::fs;
use std::path::{Path, PathBuf};

/// Errors returned by the sample feeding interface. The converter is left
/// unchanged whenever one of these is returned.
#[derive(Debug, thiserror::Error)]
pub enum SampleError {
    #[error("channel {channel} does not exist, the converter has {count} channels")]
    ChannelOutOfRange { channel: usize, count: usize },
    #[error("repeat count must not be zero")]
    ZeroRepeat,
    #[error("cannot read samples from {}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("line {line}: {content:?} is not a sample value")]
    Parse { line: usize, content: String },
    #[error("no samples found")]
    Empty,
}

fn parse_value(text: &str) -> Option<u32> {
    match text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
    {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => text.parse().ok(),
    }
}

/// Parse sample text. Line numbers in errors start at 1.
pub fn parse_samples(text: &str) -> Result<Vec<u32>, SampleError> {
    let mut samples = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let content = match line.split_once('#') {
            Some((before, _comment)) => before,
            None => line,
        }
        .trim();
        if content.is_empty() {
            continue;
        }
        match parse_value(content) {
            Some(value) => samples.push(value),
            None => {
                return Err(SampleError::Parse {
                    line: index + 1,
                    content: content.to_string(),
                })
            }
        }
    }
    if samples.is_empty() {
        return Err(SampleError::Empty);
    }
    Ok(samples)
}

/// Read and parse the sample file at `path`.
pub fn load_samples(path: &Path) -> Result<Vec<u32>, SampleError> {
    let text = fs::read_to_string(path).map_err(|source| SampleError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_samples(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_hex_comments_and_blanks() {
        let text = "# header\n\n12\n0x1F\n  0X10  \n7 # trailing\n";
        assert_eq!(parse_samples(text).unwrap(), vec![12, 0x1F, 0x10, 7]);
    }

    #[test]
    fn malformed_line_is_reported_with_its_number() {
        match parse_samples("1\n2\nthree\n4\n") {
            Err(SampleError::Parse { line, content }) => {
                assert_eq!(line, 3);
                assert_eq!(content, "three");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn negative_and_overflowing_values_are_malformed() {
        assert!(matches!(
            parse_samples("-1"),
            Err(SampleError::Parse { line: 1, .. })
        ));
        assert!(matches!(
            parse_samples("0x1_0000_0000"),
            Err(SampleError::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn only_comments_is_empty() {
        assert!(matches!(parse_samples("# nothing\n\n"), Err(SampleError::Empty)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let path = Path::new("/nonexistent/samples.txt");
        match load_samples(path) {
            Err(SampleError::Io { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("unexpected {:?}", other),
        }
    }
}
