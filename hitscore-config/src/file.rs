//! The config file on disk and its seasonal backup.
use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use crate::{from_reader, to_writer, Config, ConfigError, VersionProbe};

/// Location of the config file and its backup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    path: PathBuf,
    backup_path: PathBuf,
}

impl ConfigFile {
    /// Creates a `ConfigFile` for `path`.
    ///
    /// The backup lives next to it, with `_backup` appended to the file stem.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let stem = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let backup_name = match path.extension() {
            Some(ext) => format!("{stem}_backup.{}", ext.to_string_lossy()),
            None => format!("{stem}_backup"),
        };
        let backup_path = path.with_file_name(backup_name);

        Self { path, backup_path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn backup_path(&self) -> &Path {
        &self.backup_path
    }

    /// Reads, parses and validates the config.
    pub fn load(&self) -> Result<Config, ConfigError> {
        let config = read(&self.path)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads only the version out of the config file.
    ///
    /// This works for old configs whose layout no longer parses as a [`Config`].
    pub fn probe_version(&self) -> Result<VersionProbe, ConfigError> {
        let file = File::open(&self.path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    /// Writes the config, creating parent directories as needed.
    pub fn write(&self, config: &Config) -> Result<(), ConfigError> {
        write(&self.path, config)
    }

    /// Writes the config to the backup location.
    pub fn backup(&self, config: &Config) -> Result<(), ConfigError> {
        write(&self.backup_path, config)
    }

    /// Returns `true` if a backup exists.
    pub fn has_backup(&self) -> bool {
        self.backup_path.is_file()
    }

    /// Replaces the config file with the backup.
    ///
    /// The backup itself is left in place.
    pub fn restore(&self) -> Result<(), ConfigError> {
        fs::copy(&self.backup_path, &self.path)?;
        Ok(())
    }

    /// Deletes the backup.
    pub fn remove_backup(&self) -> Result<(), ConfigError> {
        fs::remove_file(&self.backup_path)?;
        Ok(())
    }
}

fn read(path: &Path) -> Result<Config, ConfigError> {
    let file = File::open(path)?;
    Ok(from_reader(BufReader::new(file))?)
}

fn write(path: &Path, config: &Config) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut writer = BufWriter::new(File::create(path)?);
    to_writer(&mut writer, config)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backup_path() {
        let file = ConfigFile::new("/sdcard/mods/HitScoreVisualizer.json");
        assert_eq!(
            file.backup_path(),
            Path::new("/sdcard/mods/HitScoreVisualizer_backup.json")
        );

        let file = ConfigFile::new("config");
        assert_eq!(file.backup_path(), Path::new("config_backup"));
    }
}
