use std::io::{self, Read};

use super::Document;

/// Read a piped JSON or YAML document from stdin.
/// Returns None if stdin is a TTY (interactive) or empty.
pub fn read_stdin() -> Result<Option<Document>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    Ok(classify(&buffer))
}

/// Tag piped text by syntax. Anything that opens like JSON is treated as
/// JSON, so broken JSON reports a JSON error instead of a YAML one.
pub(crate) fn classify(buffer: &str) -> Option<Document> {
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return None;
    }
    let text = trimmed.to_string();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        Some(Document::Json(text))
    } else {
        Some(Document::Yaml(text))
    }
}
