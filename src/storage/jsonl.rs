//! JSONL (JSON Lines) storage.
//!
//! Each line is one JSON object. Reads are tolerant: a line that fails to
//! parse is logged and skipped, so one corrupt row never takes the log
//! down with it.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::PathBuf;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use super::StorageError;

/// JSONL file writer.
pub struct JsonlWriter<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: Serialize> JsonlWriter<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    fn ensure_dir(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Append a single entity to the file.
    pub fn append(&self, entity: &T) -> Result<(), StorageError> {
        self.ensure_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = BufWriter::new(file);
        let json = serde_json::to_string(entity)?;
        writeln!(writer, "{}", json)?;
        writer.flush()?;

        debug!("Appended entity to {:?}", self.path);
        Ok(())
    }

    /// Write entities, replacing the entire file.
    pub fn write_all(&self, entities: &[T]) -> Result<usize, StorageError> {
        self.ensure_dir()?;

        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        let mut count = 0;

        for entity in entities {
            let json = serde_json::to_string(entity)?;
            writeln!(writer, "{}", json)?;
            count += 1;
        }

        writer.flush()?;
        debug!("Wrote {} entities to {:?}", count, self.path);

        Ok(count)
    }
}

/// JSONL file reader.
pub struct JsonlReader<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: DeserializeOwned> JsonlReader<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read all entities. A missing file reads as empty; malformed lines
    /// are skipped with a warning.
    pub fn read_all(&self) -> Result<Vec<T>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let mut entities = Vec::new();
        let mut line_num = 0;

        for line in reader.lines() {
            line_num += 1;
            let line = line?;

            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str(&line) {
                Ok(entity) => entities.push(entity),
                Err(e) => {
                    warn!("Failed to parse line {} in {:?}: {}", line_num, self.path, e);
                }
            }
        }

        debug!("Read {} entities from {:?}", entities.len(), self.path);
        Ok(entities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Player, RawMatchRow};
    use tempfile::TempDir;

    #[test]
    fn test_write_and_read_round_trip() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("matches.jsonl");

        let rows = vec![
            RawMatchRow {
                match_id: "AR Q1 2024-01".to_string(),
                date: "2024-02-01".to_string(),
                team1_player1: "Ana".to_string(),
                team2_player1: "Ben".to_string(),
                winner: "Team1".to_string(),
                ..Default::default()
            },
            RawMatchRow {
                match_id: "AR Q1 2024-02".to_string(),
                ..Default::default()
            },
        ];

        let writer: JsonlWriter<RawMatchRow> = JsonlWriter::new(path.clone());
        assert_eq!(writer.write_all(&rows).unwrap(), 2);

        let reader: JsonlReader<RawMatchRow> = JsonlReader::new(path);
        let read = reader.read_all().unwrap();
        assert_eq!(read.len(), 2);
        assert_eq!(read[0].match_id, "AR Q1 2024-01");
        assert_eq!(read[1].date, "");
    }

    #[test]
    fn test_append() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("players.jsonl");

        let writer: JsonlWriter<Player> = JsonlWriter::new(path.clone());
        writer.append(&Player::new("Ana".to_string())).unwrap();
        writer.append(&Player::new("Ben".to_string())).unwrap();

        let reader: JsonlReader<Player> = JsonlReader::new(path);
        let players = reader.read_all().unwrap();
        assert_eq!(players.len(), 2);
        assert_eq!(players[1].name, "Ben");
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let tmp = TempDir::new().unwrap();
        let reader: JsonlReader<Player> = JsonlReader::new(tmp.path().join("nope.jsonl"));
        assert!(!reader.exists());
        assert!(reader.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_bad_lines_skipped() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("mixed.jsonl");
        std::fs::write(
            &path,
            "{\"name\":\"Ana\"}\nnot-json\n\n{\"name\":\"Ben\"}\n",
        )
        .unwrap();

        let reader: JsonlReader<Player> = JsonlReader::new(path);
        let players = reader.read_all().unwrap();
        assert_eq!(players.len(), 2);
        assert_eq!(players[0].name, "Ana");
    }

    #[test]
    fn test_write_all_overwrites() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("overwrite.jsonl");

        let writer: JsonlWriter<Player> = JsonlWriter::new(path.clone());
        writer.write_all(&[Player::new("Old".to_string())]).unwrap();
        writer
            .write_all(&[Player::new("New1".to_string()), Player::new("New2".to_string())])
            .unwrap();

        let reader: JsonlReader<Player> = JsonlReader::new(path);
        let players = reader.read_all().unwrap();
        assert_eq!(players.len(), 2);
        assert_eq!(players[0].name, "New1");
    }

    #[test]
    fn test_append_creates_parent_dirs() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("deep").join("p.jsonl");

        let writer: JsonlWriter<Player> = JsonlWriter::new(path.clone());
        writer.append(&Player::new("Ana".to_string())).unwrap();
        assert!(path.exists());
    }
}
