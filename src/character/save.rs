use super::character::Character;
use crate::core::constants::SAVE_VERSION_MAGIC;
use crate::error::{SaveError, SaveResult};
use crate::items::{Equipment, EquippedItems};
use crate::zones::ZoneProgression;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Everything needed to restore a party between sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartySave {
    pub characters: Vec<Character>,
    /// (character id, gear) pairs.
    pub equipped: Vec<(String, EquippedItems)>,
    pub inventory: Vec<Equipment>,
    pub gold: u64,
    pub progression: ZoneProgression,
    /// Unix seconds.
    pub saved_at: i64,
}

/// Saves and loads the party with a checksummed binary format
pub struct SaveManager {
    save_path: PathBuf,
}

impl SaveManager {
    /// Creates a SaveManager writing to the platform config directory.
    pub fn new() -> SaveResult<Self> {
        let project_dirs =
            ProjectDirs::from("", "", "stick-ranger").ok_or(SaveError::NoSaveDirectory)?;

        let config_dir = project_dirs.config_dir();
        fs::create_dir_all(config_dir)?;

        Ok(Self {
            save_path: config_dir.join("party.dat"),
        })
    }

    /// Creates a SaveManager for an explicit file.
    pub fn with_path(path: impl AsRef<Path>) -> Self {
        Self {
            save_path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.save_path
    }

    /// Saves the party to disk
    ///
    /// File format:
    /// - Version magic (8 bytes)
    /// - Data length (4 bytes)
    /// - Serialized party (variable length)
    /// - SHA256 checksum (32 bytes)
    pub fn save(&self, party: &PartySave) -> SaveResult<()> {
        let data = bincode::serialize(party)?;
        let data_len = data.len() as u32;

        // Checksum covers version + length + data
        let mut hasher = Sha256::new();
        hasher.update(SAVE_VERSION_MAGIC.to_le_bytes());
        hasher.update(data_len.to_le_bytes());
        hasher.update(&data);
        let checksum = hasher.finalize();

        if let Some(parent) = self.save_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::File::create(&self.save_path)?;
        file.write_all(&SAVE_VERSION_MAGIC.to_le_bytes())?;
        file.write_all(&data_len.to_le_bytes())?;
        file.write_all(&data)?;
        file.write_all(&checksum)?;

        log::info!(
            "Saved {} characters to {}",
            party.characters.len(),
            self.save_path.display()
        );
        Ok(())
    }

    /// Loads the party from disk.
    ///
    /// Fails if the file is missing, the version magic is wrong, the checksum
    /// does not match, or the payload cannot be decoded.
    pub fn load(&self) -> SaveResult<PartySave> {
        let mut file = fs::File::open(&self.save_path)?;

        let mut version_bytes = [0u8; 8];
        file.read_exact(&mut version_bytes)?;
        let version = u64::from_le_bytes(version_bytes);
        if version != SAVE_VERSION_MAGIC {
            return Err(SaveError::BadMagic {
                expected: SAVE_VERSION_MAGIC,
                found: version,
            });
        }

        let mut length_bytes = [0u8; 4];
        file.read_exact(&mut length_bytes)?;
        let data_len = u32::from_le_bytes(length_bytes);

        let mut data = vec![0u8; data_len as usize];
        file.read_exact(&mut data)?;

        let mut stored_checksum = [0u8; 32];
        file.read_exact(&mut stored_checksum)?;

        let mut hasher = Sha256::new();
        hasher.update(version_bytes);
        hasher.update(length_bytes);
        hasher.update(&data);
        if stored_checksum != hasher.finalize().as_slice() {
            return Err(SaveError::ChecksumMismatch);
        }

        Ok(bincode::deserialize::<PartySave>(&data)?)
    }

    pub fn save_exists(&self) -> bool {
        self.save_path.exists()
    }
}
