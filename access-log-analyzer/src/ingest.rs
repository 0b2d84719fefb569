use std::io::{self, BufRead};

/// Yields lines from `reader` with the line ending stripped. Invalid UTF-8
/// is replaced rather than rejected so the parser can report the line.
pub fn read_lines<R: BufRead>(mut reader: R) -> impl Iterator<Item = io::Result<String>> {
    let mut buf = Vec::new();
    std::iter::from_fn(move || {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => None,
            Ok(_) => {
                let line = buf
                    .strip_suffix(b"\n")
                    .map(|l| l.strip_suffix(b"\r").unwrap_or(l))
                    .unwrap_or(&buf);
                Some(Ok(String::from_utf8_lossy(line).into_owned()))
            }
            Err(e) => Some(Err(e)),
        }
    })
}

/// Reads the whole source up front. An I/O error ends the run.
pub fn collect_lines<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    read_lines(reader).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use asserting::prelude::*;

    #[test]
    fn strips_line_endings() {
        let lines = collect_lines(&b"one\r\ntwo\nthree"[..]).unwrap();
        assert_eq!(lines, ["one", "two", "three"]);
    }

    #[test]
    fn empty_source_has_no_lines() {
        assert_that!(collect_lines(&b""[..]).unwrap()).is_empty();
    }

    #[test]
    fn blank_lines_are_kept() {
        let lines = collect_lines(&b"a\n\nb\n"[..]).unwrap();
        assert_eq!(lines, ["a", "", "b"]);
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let lines = collect_lines(&b"ok\xff\n"[..]).unwrap();
        assert_eq!(lines, ["ok\u{fffd}"]);
    }
}
