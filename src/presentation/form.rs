use crate::types::form::{FormField, FormInput};
use std::io::{self, BufRead, Write};

/// The five-field input form, drawn as consecutive prompts on a text stream.
///
/// Every prompt shows the current value in brackets; an empty answer keeps
/// it. The API key is never echoed back in clear text.
pub struct InputForm<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> InputForm<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Asks for all five fields, starting from `defaults`.
    ///
    /// Returns `Ok(None)` once the input stream is closed, which closes the
    /// application.
    pub fn prompt(&mut self, defaults: &FormInput) -> io::Result<Option<FormInput>> {
        let mut input = defaults.clone();
        writeln!(self.writer)?;
        writeln!(self.writer, "Run forecast (press Enter to keep a value)")?;

        for field in FormField::ALL {
            let current = input.value(field);
            let shown = match field {
                FormField::ApiKey => mask(current),
                _ => current.to_string(),
            };
            write!(self.writer, "{} [{}]: ", field.label(), shown)?;
            self.writer.flush()?;

            let mut line = Vec::new();
            if self.reader.read_until(b'\n', &mut line)? == 0 {
                return Ok(None);
            }
            // Bytes that are not UTF-8 are kept as U+FFFD.
            let line = String::from_utf8_lossy(&line);
            let answer = line.trim_end_matches(['\r', '\n']);
            if !answer.trim().is_empty() {
                *input.value_mut(field) = answer.to_string();
            }
        }
        Ok(Some(input))
    }
}

fn mask(secret: &str) -> String {
    "*".repeat(secret.chars().count())
}
