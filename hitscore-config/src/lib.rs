//! The hit score visualizer configuration file.
//!
//! The file is JSON with camelCase keys. Missing keys take their values from the standard theme,
//! see [`themes::standard()`].

#[macro_use]
extern crate tracing;

use std::{
    fmt,
    io::{self, Read, Write},
};

use hitscore_core::{
    color::Color,
    judgment::{first_out_of_order, SegmentTables, Tier},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod file;
pub mod lifecycle;
pub mod season;
pub mod themes;

/// The config version written by this crate.
pub const CURRENT_VERSION: (i32, i32, i32) = (2, 5, 0);

/// Configs at or below this version are replaced with the standard theme on load.
pub const LAST_OUTDATED_VERSION: (i32, i32, i32) = (2, 4, 0);

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigType {
    #[default]
    Standard,
    Christmas,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DisplayMode {
    #[default]
    Format,
    Numeric,
    ScoreOnTop,
    TextOnly,
    TextOnTop,
    ImageOnly,
    ImageAndText,
}

impl From<DisplayMode> for hitscore_core::display::DisplayMode {
    #[inline]
    fn from(mode: DisplayMode) -> Self {
        use hitscore_core::display::DisplayMode as Core;

        match mode {
            DisplayMode::Format => Core::Format,
            DisplayMode::Numeric => Core::Numeric,
            DisplayMode::ScoreOnTop => Core::ScoreOnTop,
            DisplayMode::TextOnly => Core::TextOnly,
            DisplayMode::TextOnTop => Core::TextOnTop,
            DisplayMode::ImageOnly => Core::ImageOnly,
            DisplayMode::ImageAndText => Core::ImageAndText,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Judgment {
    pub threshold: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<[f32; 4]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fade: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound_volume: Option<f32>,
}

impl Judgment {
    /// Creates a judgment with text and color and nothing else.
    pub fn new(threshold: i32, text: &str, color: [f32; 4]) -> Self {
        Self {
            threshold,
            text: Some(text.to_owned()),
            color: Some(color),
            fade: None,
            image_path: None,
            sound_path: None,
            sound_volume: None,
        }
    }

    /// Sets the fade flag.
    pub fn fading(mut self) -> Self {
        self.fade = Some(true);
        self
    }
}

impl Tier for Judgment {
    #[inline]
    fn threshold(&self) -> i32 {
        self.threshold
    }
}

impl From<&Judgment> for hitscore_core::judgment::Judgment {
    #[inline]
    fn from(judgment: &Judgment) -> Self {
        Self {
            threshold: judgment.threshold,
            text: judgment.text.clone(),
            color: judgment.color.map(Color::from),
            fade: judgment.fade.unwrap_or(false),
            image_path: judgment.image_path.clone(),
            sound_path: judgment.sound_path.clone(),
            sound_volume: judgment.sound_volume,
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Segment {
    pub threshold: i32,
    pub text: String,
}

impl Segment {
    pub fn new(threshold: i32, text: &str) -> Self {
        Self {
            threshold,
            text: text.to_owned(),
        }
    }
}

impl Tier for Segment {
    #[inline]
    fn threshold(&self) -> i32 {
        self.threshold
    }
}

impl From<&Segment> for hitscore_core::judgment::Segment {
    #[inline]
    fn from(segment: &Segment) -> Self {
        Self {
            threshold: segment.threshold,
            text: segment.text.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub major_version: i32,
    pub minor_version: i32,
    pub patch_version: i32,
    #[serde(rename = "type")]
    pub config_type: ConfigType,
    pub use_seasonal_themes: bool,
    pub backup_before_season: bool,
    pub restore_after_season: bool,
    pub display_mode: DisplayMode,
    pub judgments: Vec<Judgment>,
    pub before_cut_angle_judgments: Vec<Segment>,
    pub accuracy_judgments: Vec<Segment>,
    pub after_cut_angle_judgments: Vec<Segment>,
    pub do_intermediate_updates: bool,
    pub use_fixed_pos: bool,
    pub fixed_pos_x: f32,
    pub fixed_pos_y: f32,
    pub fixed_pos_z: f32,
}

impl Default for Config {
    #[inline]
    fn default() -> Self {
        themes::standard()
    }
}

impl Config {
    /// Returns the `(major, minor, patch)` version of the config.
    #[inline]
    pub fn version(&self) -> (i32, i32, i32) {
        (self.major_version, self.minor_version, self.patch_version)
    }

    /// Returns `true` if the config version is at most the given one.
    #[inline]
    pub fn version_at_most(&self, major: i32, minor: i32, patch: i32) -> bool {
        self.version() <= (major, minor, patch)
    }

    /// Returns `true` if the config version is too old to be used and must be replaced with the
    /// standard theme on load.
    #[inline]
    pub fn is_outdated(&self) -> bool {
        let (major, minor, patch) = LAST_OUTDATED_VERSION;
        self.version_at_most(major, minor, patch)
    }

    /// Returns `true` if the config is stuck on a seasonal theme that nothing will switch back.
    #[inline]
    pub fn is_stale_season(&self) -> bool {
        self.config_type != ConfigType::Standard && !self.use_seasonal_themes
    }

    /// Checks that every table is sorted by strictly descending threshold and that sound volumes
    /// make sense.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let tables: [(Table, Option<usize>); 4] = [
            (Table::Judgments, first_out_of_order(&self.judgments)),
            (
                Table::BeforeCutAngle,
                first_out_of_order(&self.before_cut_angle_judgments),
            ),
            (Table::Accuracy, first_out_of_order(&self.accuracy_judgments)),
            (
                Table::AfterCutAngle,
                first_out_of_order(&self.after_cut_angle_judgments),
            ),
        ];
        for (table, index) in tables {
            if let Some(index) = index {
                return Err(ValidationError::NotDescending { table, index });
            }
        }

        for (index, judgment) in self.judgments.iter().enumerate() {
            if let Some(volume) = judgment.sound_volume {
                if !volume.is_finite() || volume < 0. {
                    return Err(ValidationError::InvalidSoundVolume { index, volume });
                }
            }
        }

        Ok(())
    }

    /// Converts the judgments into the core representation.
    pub fn judgment_table(&self) -> Vec<hitscore_core::judgment::Judgment> {
        self.judgments.iter().map(Into::into).collect()
    }

    /// Converts the three segment tables into the core representation.
    pub fn segment_tables(&self) -> SegmentTables {
        let convert = |segments: &[Segment]| segments.iter().map(Into::into).collect();

        SegmentTables {
            before_cut_angle: convert(&self.before_cut_angle_judgments),
            accuracy: convert(&self.accuracy_judgments),
            after_cut_angle: convert(&self.after_cut_angle_judgments),
        }
    }

    /// Returns the fixed score effect position.
    #[inline]
    pub fn fixed_pos(&self) -> [f32; 3] {
        [self.fixed_pos_x, self.fixed_pos_y, self.fixed_pos_z]
    }
}

/// One of the threshold tables of a [`Config`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Table {
    Judgments,
    BeforeCutAngle,
    Accuracy,
    AfterCutAngle,
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Table::Judgments => "judgments",
            Table::BeforeCutAngle => "beforeCutAngleJudgments",
            Table::Accuracy => "accuracyJudgments",
            Table::AfterCutAngle => "afterCutAngleJudgments",
        })
    }
}

/// A config that parsed, but doesn't make sense.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{table} thresholds are not strictly descending at index {index}")]
    NotDescending { table: Table, index: usize },
    #[error("judgment {index} has an invalid sound volume {volume}")]
    InvalidSoundVolume { index: usize, volume: f32 },
}

/// An error loading or storing a config.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("error accessing config file: {0}")]
    Io(#[from] io::Error),
    #[error("error parsing config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(#[from] ValidationError),
}

impl ConfigError {
    /// Returns `true` if the config file doesn't exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ConfigError::Io(err) if err.kind() == io::ErrorKind::NotFound)
    }
}

/// Deserializes a `Config` from an IO stream of JSON.
///
/// The config is not validated.
pub fn from_reader<R: Read>(reader: R) -> Result<Config, serde_json::Error> {
    serde_json::from_reader(reader)
}

/// Serializes a `Config` as pretty-printed JSON into the IO stream.
pub fn to_writer<W: Write>(writer: W, config: &Config) -> Result<(), serde_json::Error> {
    serde_json::to_writer_pretty(writer, config)
}

/// Just the version of a config, which can be read from configs that otherwise fail to parse.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VersionProbe {
    pub major_version: i32,
    pub minor_version: i32,
    pub patch_version: i32,
}

impl VersionProbe {
    /// Returns `true` if the probed version is at or below [`LAST_OUTDATED_VERSION`].
    #[inline]
    pub fn is_outdated(&self) -> bool {
        (self.major_version, self.minor_version, self.patch_version) <= LAST_OUTDATED_VERSION
    }
}
