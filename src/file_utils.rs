use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use log::debug;

use crate::cue_parser::{self, CueRecord};

// @module: File utilities

// @const: Extensions recognised as cue files
const CUE_FILE_EXTENSIONS: &[&str] = &["vtt"];

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Extension is a known cue format (case-insensitive)
    pub fn is_cue_file<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| CUE_FILE_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)))
    }

    // @reads: Whole file as UTF-8
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        let path = path.as_ref();
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))
    }

    // @reads: Cue file and parses it
    pub fn load_cues<P: AsRef<Path>>(path: P) -> Result<Vec<CueRecord>> {
        let path = path.as_ref();
        let content = Self::read_to_string(path)?;
        let cues = cue_parser::parse_cues(&content)
            .with_context(|| format!("Failed to parse cue file: {:?}", path))?;
        debug!("Loaded {} cue(s) from {:?}", cues.len(), path);
        Ok(cues)
    }
}
