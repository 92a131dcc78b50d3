use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use sha2::{Digest, Sha256};

use crate::model::InputFingerprint;

pub fn now_utc_string() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub fn utc_compact_string(ts: DateTime<Utc>) -> String {
    ts.format("%Y%m%dT%H%M%SZ").to_string()
}

pub fn ensure_directory(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .with_context(|| format!("failed to create directory: {}", path.display()))
}

/// Fails unless `path` names an existing regular file.
pub fn ensure_input_file(path: &Path, what: &str) -> Result<()> {
    if !path.exists() {
        bail!("{what} does not exist: {}", path.display());
    }
    if !path.is_file() {
        bail!("{what} is not a file: {}", path.display());
    }
    Ok(())
}

/// Creates the parent directory of an output file and refuses directory targets.
pub fn prepare_output_file(path: &Path) -> Result<()> {
    if path.is_dir() {
        bail!("output path is a directory: {}", path.display());
    }
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        ensure_directory(parent)?;
    }
    Ok(())
}

pub fn sha256_file(path: &Path) -> Result<String> {
    let mut file = File::open(path)
        .with_context(|| format!("failed to open file for hashing: {}", path.display()))?;

    let mut hasher = Sha256::new();
    let mut buf = [0_u8; 8192];

    loop {
        let count = file
            .read(&mut buf)
            .with_context(|| format!("failed to read file for hashing: {}", path.display()))?;
        if count == 0 {
            break;
        }
        hasher.update(&buf[..count]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

pub fn fingerprint(path: &Path) -> Result<InputFingerprint> {
    Ok(InputFingerprint {
        path: path.display().to_string(),
        sha256: sha256_file(path)?,
    })
}

pub fn write_json_pretty<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    prepare_output_file(path)?;

    let data = serde_json::to_vec_pretty(value)
        .with_context(|| format!("failed to serialize json: {}", path.display()))?;

    let mut file = File::create(path)
        .with_context(|| format!("failed to create json file: {}", path.display()))?;
    file.write_all(&data)
        .with_context(|| format!("failed to write json file: {}", path.display()))?;
    file.write_all(b"\n")
        .with_context(|| format!("failed to finalize json file: {}", path.display()))?;

    Ok(())
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_slice(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

pub fn read_csv_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open csv file: {}", path.display()))?;

    let mut records = Vec::new();
    for (row, record) in reader.deserialize::<T>().enumerate() {
        let record = record
            .with_context(|| format!("failed to parse row {} of {}", row + 1, path.display()))?;
        records.push(record);
    }

    Ok(records)
}

pub fn write_csv_records<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    prepare_output_file(path)?;

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create csv file: {}", path.display()))?;
    for record in records {
        writer
            .serialize(record)
            .with_context(|| format!("failed to write csv row: {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to finalize csv file: {}", path.display()))?;

    Ok(())
}
