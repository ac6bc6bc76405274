pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;

/// Raw input text tagged with the syntax it was written in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Document {
    Json(String),
    Yaml(String),
}

impl Document {
    /// Deserialize into a typed record with the matching parser.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, Box<dyn std::error::Error>> {
        Ok(match self {
            Document::Json(text) => serde_json::from_str(text)?,
            Document::Yaml(text) => serde_yaml::from_str(text)?,
        })
    }
}

/// Read the document from `--input <path>` or, failing that, piped stdin.
///
/// Returns `None` when neither source supplied data.
pub fn read(path: Option<&str>) -> Result<Option<Document>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return Ok(Some(file::read_document(path)?));
    }
    stdin::read_stdin()
}

/// Load a typed record from `--input <path>` or piped stdin.
pub fn load<T: DeserializeOwned>(path: Option<&str>) -> Result<Option<T>, Box<dyn std::error::Error>> {
    read(path)?.map(|document| document.parse()).transpose()
}
