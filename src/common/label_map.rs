use std::collections::BTreeMap;
use std::path::Path;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LabelMapError {
    #[error("Failed to read label map file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse label map: {0}")]
    Csv(#[from] csv::Error),
    #[error("Each row of the csv label map file must be in `id:name` format (line {line}: {row:?})")]
    MalformedRow { line: usize, row: String },
    #[error("Invalid class id {id:?} on line {line}")]
    InvalidId { line: usize, id: String },
    #[error("Unsupported label map format: {0}")]
    UnsupportedFormat(String),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelMapFormat {
    #[default] Csv,
}

impl LabelMapFormat {
    pub fn from_str(format: &str) -> Result<Self, LabelMapError> {
        match format.to_lowercase().as_str() {
            "csv" => Ok(LabelMapFormat::Csv),
            _ => Err(LabelMapError::UnsupportedFormat(format.to_string())),
        }
    }

    pub fn str(&self) -> &'static str {
        match self {
            LabelMapFormat::Csv => "csv",
        }
    }
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEntry {
    pub id: usize,
    pub name: String,
}

impl LabelEntry {
    pub fn new(id: usize, name: String) -> Self {
        Self { id, name }
    }
}

/// Class id to class name lookup loaded from an `id:name` file.
#[derive(Default, Debug, Clone, Serialize, Deserialize)]
pub struct LabelMap {
    entries: BTreeMap<usize, LabelEntry>,
}

impl LabelMap {
    pub fn from_file<P: AsRef<Path>>(path: P, format: LabelMapFormat) -> Result<Self, LabelMapError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text, format)
    }

    pub fn parse(text: &str, format: LabelMapFormat) -> Result<Self, LabelMapError> {
        match format {
            LabelMapFormat::Csv => Self::parse_csv(text),
        }
    }

    fn parse_csv(text: &str) -> Result<Self, LabelMapError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b':')
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut entries = BTreeMap::new();
        for record in reader.records() {
            let record = record?;
            let line = record.position().map_or(0, |p| p.line() as usize);
            if record.iter().all(|field| field.trim().is_empty()) {
                continue;
            }

            if record.len() != 2 {
                let row = record.iter().collect::<Vec<_>>().join(":");
                return Err(LabelMapError::MalformedRow { line, row });
            }

            let id = record[0].trim().parse::<usize>().map_err(|_| LabelMapError::InvalidId {
                line,
                id: record[0].to_string(),
            })?;
            let name = record[1].to_string();

            // later rows win, same as a dict insert
            entries.insert(id, LabelEntry::new(id, name));
        }

        Ok(Self { entries })
    }

    pub fn name(&self, id: usize) -> Option<&str> {
        self.entries.get(&id).map(|e| e.name.as_str())
    }

    /// Name for logging, falls back to `# <id>` for ids missing from the map.
    pub fn display_name(&self, id: usize) -> String {
        match self.name(id) {
            Some(name) => name.to_string(),
            None => format!("# {}", id),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LabelEntry> {
        self.entries.values()
    }
}
