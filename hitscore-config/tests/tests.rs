use std::{
    fs::{self, File},
    path::PathBuf,
    process,
};

extern crate hitscore_config;
use chrono::NaiveDate;
use hitscore_config::{
    file::ConfigFile,
    from_reader,
    lifecycle::{self, INVALID_CONFIG_MESSAGE},
    themes, to_writer, Config, ConfigType, DisplayMode, Judgment, Segment,
};

use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// A scratch directory for one test, removed on drop.
struct Scratch(PathBuf);

impl Scratch {
    fn new(name: &str) -> Self {
        let dir = std::env::temp_dir().join(format!("hitscore-config-{}-{name}", process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        Self(dir)
    }

    fn config_file(&self) -> ConfigFile {
        ConfigFile::new(self.0.join("HitScoreVisualizer.json"))
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, month, day).unwrap()
}

fn sample() -> Config {
    Config {
        major_version: 2,
        minor_version: 5,
        patch_version: 0,
        config_type: ConfigType::Standard,
        use_seasonal_themes: false,
        backup_before_season: true,
        restore_after_season: true,
        display_mode: DisplayMode::ImageAndText,
        judgments: vec![
            Judgment {
                image_path: Some("images/perfect.png".to_owned()),
                sound_path: Some("sounds/perfect.ogg".to_owned()),
                sound_volume: Some(0.5),
                ..Judgment::new(115, "%BPerfect%A%n%s", [1., 1., 1., 1.])
            },
            Judgment::new(100, "<size=80%>Nice</size>%n%p%", [0., 1., 0., 1.]),
            Judgment::new(0, "<size=80%>Miss</size>", [1., 0., 0., 1.]).fading(),
        ],
        before_cut_angle_judgments: vec![Segment::new(70, "+"), Segment::new(0, " ")],
        accuracy_judgments: vec![Segment::new(15, "*"), Segment::new(0, " ")],
        after_cut_angle_judgments: vec![Segment::new(30, "+"), Segment::new(0, " ")],
        do_intermediate_updates: false,
        use_fixed_pos: true,
        fixed_pos_x: 0.,
        fixed_pos_y: 1.5,
        fixed_pos_z: 12.,
    }
}

/// A valid custom config with seasonal switching turned on.
fn seasonal_sample() -> Config {
    Config {
        use_seasonal_themes: true,
        ..sample()
    }
}

#[test]
fn parse_sample() {
    let file = File::open("tests/data/sample.json").unwrap();
    let config = from_reader(file).unwrap();

    assert_eq!(config, sample());
    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn missing_keys_use_defaults() {
    let config = from_reader(&br#"{ "displayMode": "textOnTop", "useFixedPos": true }"#[..]).unwrap();

    assert_eq!(
        config,
        Config {
            display_mode: DisplayMode::TextOnTop,
            use_fixed_pos: true,
            ..Config::default()
        }
    );
}

#[test]
fn unknown_display_mode_fails() {
    assert!(from_reader(&br#"{ "displayMode": "hologram" }"#[..]).is_err());
}

#[test]
fn written_config_reads_back() {
    let mut buf = Vec::new();
    to_writer(&mut buf, &sample()).unwrap();

    let text = String::from_utf8(buf.clone()).unwrap();
    assert!(text.contains("\"imagePath\": \"images/perfect.png\""));
    assert!(!text.contains("soundPath\": null"));

    assert_eq!(from_reader(&buf[..]).unwrap(), sample());
}

#[test]
fn load_missing_file_writes_default() {
    let scratch = Scratch::new("missing");
    let file = scratch.config_file();

    let loaded = lifecycle::load(&file, date(6, 1));
    assert!(loaded.valid);
    assert_eq!(loaded.notification(), None);
    assert_eq!(loaded.config, Config::default());
    assert_eq!(file.load().unwrap(), Config::default());
}

#[test]
fn load_valid_config() {
    let scratch = Scratch::new("valid");
    let file = scratch.config_file();
    file.write(&sample()).unwrap();

    let loaded = lifecycle::load(&file, date(6, 1));
    assert!(loaded.valid);
    assert_eq!(loaded.config, sample());
}

#[test]
fn load_unsorted_config_is_invalid() {
    let scratch = Scratch::new("unsorted");
    let file = scratch.config_file();
    fs::copy("tests/data/unsorted.json", file.path()).unwrap();

    let loaded = lifecycle::load(&file, date(6, 1));
    assert!(!loaded.valid);
    assert_eq!(loaded.notification(), Some(INVALID_CONFIG_MESSAGE));

    // The user's file is left alone so it can be fixed.
    assert_eq!(
        fs::read_to_string(file.path()).unwrap(),
        fs::read_to_string("tests/data/unsorted.json").unwrap()
    );
}

#[test]
fn load_broken_json_is_invalid() {
    let scratch = Scratch::new("broken");
    let file = scratch.config_file();
    fs::copy("tests/data/broken.json", file.path()).unwrap();

    let loaded = lifecycle::load(&file, date(12, 23));
    assert!(!loaded.valid);
    assert!(!file.has_backup());
}

#[test]
fn load_outdated_config_is_replaced() {
    let scratch = Scratch::new("outdated");
    let file = scratch.config_file();
    fs::copy("tests/data/outdated.json", file.path()).unwrap();

    let loaded = lifecycle::load(&file, date(6, 1));
    assert!(loaded.valid);
    assert_eq!(loaded.config, Config::default());
    assert_eq!(file.load().unwrap(), Config::default());
}

#[test]
fn load_outdated_parseable_config_is_replaced() {
    let scratch = Scratch::new("outdated-parseable");
    let file = scratch.config_file();
    file.write(&Config {
        minor_version: 4,
        ..sample()
    })
    .unwrap();

    let loaded = lifecycle::load(&file, date(6, 1));
    assert!(loaded.valid);
    assert_eq!(loaded.config, Config::default());
}

#[test]
fn christmas_switch_backs_up() {
    let scratch = Scratch::new("christmas");
    let file = scratch.config_file();
    file.write(&seasonal_sample()).unwrap();

    let loaded = lifecycle::load(&file, date(12, 23));
    assert!(loaded.valid);
    assert_eq!(loaded.config, themes::christmas(&seasonal_sample()));
    assert_eq!(file.load().unwrap(), loaded.config);

    assert!(file.has_backup());
    let backup = from_reader(File::open(file.backup_path()).unwrap()).unwrap();
    assert_eq!(backup, seasonal_sample());

    // The next day keeps the theme and doesn't overwrite the backup.
    let loaded = lifecycle::load(&file, date(12, 24));
    assert_eq!(loaded.config.config_type, ConfigType::Christmas);
    let backup = from_reader(File::open(file.backup_path()).unwrap()).unwrap();
    assert_eq!(backup, seasonal_sample());
}

#[test]
fn christmas_switch_without_backup() {
    let scratch = Scratch::new("christmas-no-backup");
    let file = scratch.config_file();
    file.write(&Config {
        backup_before_season: false,
        ..seasonal_sample()
    })
    .unwrap();

    let loaded = lifecycle::load(&file, date(12, 24));
    assert_eq!(loaded.config.config_type, ConfigType::Christmas);
    assert!(!file.has_backup());
}

#[test]
fn season_end_restores_backup() {
    let scratch = Scratch::new("restore");
    let file = scratch.config_file();
    file.write(&seasonal_sample()).unwrap();

    lifecycle::load(&file, date(12, 23));
    let loaded = lifecycle::load(&file, date(12, 26));

    assert!(loaded.valid);
    assert_eq!(loaded.config, seasonal_sample());
    assert_eq!(file.load().unwrap(), seasonal_sample());
    assert!(!file.has_backup());
}

#[test]
fn season_end_without_backup_uses_standard() {
    let scratch = Scratch::new("restore-no-backup");
    let file = scratch.config_file();
    file.write(&themes::christmas(&seasonal_sample())).unwrap();

    let loaded = lifecycle::load(&file, date(12, 26));
    assert!(loaded.valid);
    assert_eq!(loaded.config.config_type, ConfigType::Standard);
    assert_eq!(loaded.config.judgments, Config::default().judgments);
    assert!(loaded.config.use_seasonal_themes);
}

#[test]
fn season_end_without_restoring_uses_standard() {
    let scratch = Scratch::new("no-restore");
    let file = scratch.config_file();
    let config = Config {
        restore_after_season: false,
        ..seasonal_sample()
    };
    file.write(&config).unwrap();

    let loaded = lifecycle::load(&file, date(12, 24));
    assert_eq!(loaded.config.config_type, ConfigType::Christmas);
    assert!(file.has_backup());

    let loaded = lifecycle::load(&file, date(12, 27));
    assert!(loaded.valid);
    assert_eq!(loaded.config.config_type, ConfigType::Standard);
    assert_eq!(loaded.config.judgments, Config::default().judgments);
    assert!(loaded.config.use_seasonal_themes);
    assert!(!loaded.config.restore_after_season);
    assert_eq!(file.load().unwrap(), loaded.config);
    // The backup is left for the user.
    assert!(file.has_backup());
}

#[test]
fn season_end_with_broken_backup_is_invalid() {
    let scratch = Scratch::new("broken-backup");
    let file = scratch.config_file();
    file.write(&themes::christmas(&seasonal_sample())).unwrap();
    fs::copy("tests/data/unsorted.json", file.backup_path()).unwrap();

    let loaded = lifecycle::load(&file, date(12, 26));
    assert!(!loaded.valid);
}

#[test]
fn seasonal_themes_off() {
    let scratch = Scratch::new("no-seasons");
    let file = scratch.config_file();
    file.write(&sample()).unwrap();

    let loaded = lifecycle::load(&file, date(12, 23));
    assert_eq!(loaded.config, sample());
    assert!(!file.has_backup());
}

#[test]
fn stale_christmas_theme_is_left() {
    let scratch = Scratch::new("stale");
    let file = scratch.config_file();
    file.write(&themes::christmas(&sample())).unwrap();

    let loaded = lifecycle::load(&file, date(3, 1));
    assert!(loaded.valid);
    assert_eq!(loaded.config.config_type, ConfigType::Standard);
    assert!(!loaded.config.use_seasonal_themes);
}

proptest! {
    #[test]
    fn from_reader_doesnt_panic(text in "\\PC*") {
        let _ = from_reader(text.as_bytes());
    }

    #[test]
    fn fixed_pos_round_trips(x in -100f32..100., y in -100f32..100., z in -100f32..100.) {
        let config = Config {
            fixed_pos_x: x,
            fixed_pos_y: y,
            fixed_pos_z: z,
            ..Config::default()
        };

        let mut buf = Vec::new();
        to_writer(&mut buf, &config).unwrap();
        prop_assert_eq!(from_reader(&buf[..]).unwrap().fixed_pos(), [x, y, z]);
    }
}
