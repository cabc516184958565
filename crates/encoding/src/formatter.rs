use serde_json::ser::Formatter;
use std::io;

/// Compact JSON with a space after each separator and printable-ASCII-only output.
///
/// Produces `[{"id": "1", "price": "9.99"}]`, the body format existing
/// consumers of this endpoint already receive.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpacedAsciiFormatter;

impl Formatter for SpacedAsciiFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start: usize = 0;

        for (index, ch) in fragment.char_indices() {
            // Control characters never reach here, serde_json escapes them itself
            if ch <= '~' {
                continue;
            }

            writer.write_all(fragment[start..index].as_bytes())?;

            let mut units: [u16; 2] = [0; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }

            start = index + ch.len_utf8();
        }

        writer.write_all(fragment[start..].as_bytes())
    }
}
