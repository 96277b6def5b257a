//! JSON interchange of recording files and results.

use serde::Serialize;
use serde::de::DeserializeOwned;
use skybox_core::RecordGroup;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::Result;

/// Read any serde type from a JSON file.
pub fn read_json<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Write any serde type to a JSON file, pretty-printed.
pub fn write_json<T: Serialize + ?Sized, P: AsRef<Path>>(path: P, value: &T) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Read a recording file as produced by the structured-record reader.
///
/// The file holds one JSON object mapping each top-level entry name to a
/// tagged record, `{"type": "struct", ...}` or `{"type": "flat", ...}`.
pub fn read_record_group<P: AsRef<Path>>(path: P) -> Result<RecordGroup> {
    let path = path.as_ref();
    let group: RecordGroup = read_json(path)?;
    tracing::debug!(path = %path.display(), entries = group.len(), "read record group");
    Ok(group)
}

/// Write a recording file in the form [`read_record_group`] accepts.
pub fn write_record_group<P: AsRef<Path>>(path: P, group: &RecordGroup) -> Result<()> {
    write_json(path, group)
}
