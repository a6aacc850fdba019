use log::info;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::pipeline::NoteHost;

/// Keeps notes in memory. The last created note is the active one.
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    content: String,
    saves: usize,
    notes: Vec<String>,
}

impl MemoryHost {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn created_notes(&self) -> &[String] {
        &self.notes
    }

    pub fn active_note(&self) -> Option<&str> {
        self.notes.last().map(String::as_str)
    }

    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl NoteHost for MemoryHost {
    fn get_content(&self) -> String {
        self.content.clone()
    }

    fn save_current(&mut self) -> Result<()> {
        self.saves += 1;
        Ok(())
    }

    fn create_and_activate(&mut self, content: &str) -> Result<()> {
        self.notes.push(content.to_string());
        Ok(())
    }
}

/// Reads notes once up front and writes the rendered block to a file or stdout.
#[derive(Debug, Clone)]
pub struct FileHost {
    content: String,
    output: Option<PathBuf>,
}

impl FileHost {
    pub fn from_path(path: &Path, output: Option<PathBuf>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(Self { content, output })
    }

    pub fn from_reader<R: Read>(mut reader: R, output: Option<PathBuf>) -> Result<Self> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        Ok(Self { content, output })
    }
}

impl NoteHost for FileHost {
    fn get_content(&self) -> String {
        self.content.clone()
    }

    fn create_and_activate(&mut self, content: &str) -> Result<()> {
        match &self.output {
            Some(path) => {
                fs::write(path, content)?;
                info!("Wrote caption to {}", path.display());
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                writeln!(stdout, "{}", content)?;
                stdout.flush()?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_host_activates_last_note() {
        let mut host = MemoryHost::new("notes");
        host.create_and_activate("first").unwrap();
        host.create_and_activate("second").unwrap();

        assert_eq!(host.get_content(), "notes");
        assert_eq!(host.created_notes().len(), 2);
        assert_eq!(host.active_note(), Some("second"));
    }

    #[test]
    fn test_file_host_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("notes.txt");
        let output = dir.path().join("caption.txt");
        fs::write(&input, "Night market, Cairo").unwrap();

        let mut host = FileHost::from_path(&input, Some(output.clone())).unwrap();
        assert_eq!(host.get_content(), "Night market, Cairo");

        host.create_and_activate("Slug: NightMarket").unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), "Slug: NightMarket");
    }

    #[test]
    fn test_file_host_from_reader() {
        let host = FileHost::from_reader("from stdin".as_bytes(), None).unwrap();
        assert_eq!(host.get_content(), "from stdin");
    }
}
