//! File input and output for the `sift` CLI.
//!
//! Inputs are JSON Lines (one value per line), a single JSON array, or
//! plain text (one string per line). The engine itself never touches files.

use sift_core::{json_kind, Record, Result, SiftError, ValidationError};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Input/output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// One JSON value per line.
    Jsonl,
    /// A single JSON array.
    Json,
    /// One string per line.
    Text,
}

impl InputFormat {
    /// Detect format from file path extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?;
        match ext.to_lowercase().as_str() {
            "jsonl" | "ndjson" => Some(Self::Jsonl),
            "json" => Some(Self::Json),
            "txt" | "text" | "lst" => Some(Self::Text),
            _ => None,
        }
    }
}

/// Read every element of the input, paired with its 1-based source line.
///
/// For [`InputFormat::Json`] the line is the element's 1-based position in
/// the array.
pub fn read_values<P: AsRef<Path>>(
    path: P,
    format: InputFormat,
) -> Result<Vec<(usize, serde_json::Value)>> {
    match format {
        InputFormat::Jsonl => {
            let reader = BufReader::new(File::open(path)?);
            let mut values = Vec::new();

            for (line_num, line) in reader.lines().enumerate() {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                let value = serde_json::from_str(&line).map_err(|e| SiftError::Json {
                    line: line_num + 1,
                    message: e.to_string(),
                })?;
                values.push((line_num + 1, value));
            }

            Ok(values)
        }
        InputFormat::Json => {
            let reader = BufReader::new(File::open(path)?);
            let value: serde_json::Value =
                serde_json::from_reader(reader).map_err(|e| SiftError::Json {
                    line: e.line(),
                    message: e.to_string(),
                })?;
            match value {
                serde_json::Value::Array(items) => {
                    Ok(items.into_iter().enumerate().map(|(i, v)| (i + 1, v)).collect())
                }
                other => Err(ValidationError::NotAList(json_kind(&other)).into()),
            }
        }
        InputFormat::Text => Ok(read_lines(path)?
            .into_iter()
            .map(|(line, text)| (line, serde_json::Value::String(text)))
            .collect()),
    }
}

fn read_lines<P: AsRef<Path>>(path: P) -> Result<Vec<(usize, String)>> {
    let reader = BufReader::new(File::open(path)?);
    let mut lines = Vec::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        lines.push((line_num + 1, line));
    }

    Ok(lines)
}

/// Read a list of strings.
///
/// With `field`, every element must be an object whose `field` is a string;
/// otherwise every element must itself be a string.
pub fn read_strings<P: AsRef<Path>>(
    path: P,
    format: InputFormat,
    field: Option<&str>,
) -> Result<Vec<String>> {
    read_values(path, format)?
        .into_iter()
        .map(|(line, value)| {
            let target = match field {
                Some(field) => value.get(field).ok_or_else(|| {
                    SiftError::InvalidFormat(format!("line {line}: field '{field}' not found"))
                })?,
                None => &value,
            };
            target.as_str().map(str::to_string).ok_or_else(|| {
                SiftError::InvalidFormat(format!(
                    "line {line}: expected a string, got {}",
                    json_kind(target)
                ))
            })
        })
        .collect()
}

/// Read a list of records.
///
/// Fails on the first element that is not an object, naming its zero-based
/// position among the input elements.
pub fn read_records<P: AsRef<Path>>(path: P, format: InputFormat) -> Result<Vec<Record>> {
    read_values(path, format)?
        .into_iter()
        .enumerate()
        .map(|(index, (_, value))| Record::from_json(value, index).map_err(SiftError::from))
        .collect()
}

/// Write records to a file.
///
/// [`InputFormat::Json`] writes one pretty-printed array; any other format
/// writes one compact object per line.
pub fn write_records<P: AsRef<Path>>(
    path: P,
    records: &[Record],
    format: InputFormat,
) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    let to_io = |e: serde_json::Error| SiftError::Io(e.into());

    match format {
        InputFormat::Json => {
            let array: Vec<serde_json::Value> = records.iter().map(Record::to_json).collect();
            serde_json::to_writer_pretty(&mut writer, &array).map_err(to_io)?;
            writeln!(writer)?;
        }
        InputFormat::Jsonl | InputFormat::Text => {
            for record in records {
                serde_json::to_writer(&mut writer, &record.to_json()).map_err(to_io)?;
                writeln!(writer)?;
            }
        }
    }

    writer.flush()?;
    Ok(())
}
