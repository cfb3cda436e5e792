//! Clipboard via the OSC 52 terminal escape
//!
//! Works over SSH and inside multiplexers that forward OSC 52, with no
//! platform clipboard library.

use std::io::{self, Write};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Escape sequence that asks the terminal to put `text` on the clipboard
pub fn osc52_sequence(text: &str) -> String {
    let encoded = STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x1b\\")
}

/// Write the OSC 52 sequence for `text` and flush
pub fn copy<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    out.write_all(osc52_sequence(text).as_bytes())?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_encodes_payload() {
        assert_eq!(osc52_sequence("hello"), "\x1b]52;c;aGVsbG8=\x1b\\");
    }

    #[test]
    fn test_copy_writes_sequence() {
        let mut out = Vec::new();
        copy(&mut out, "http://localhost:5173/matrix/abc").unwrap();
        let written = String::from_utf8(out).unwrap();
        assert!(written.starts_with("\x1b]52;c;"));
        assert!(written.ends_with("\x1b\\"));
    }
}
