//! Loading the config at startup.
use chrono::NaiveDate;

use crate::{file::ConfigFile, season, Config};

/// The notification shown when the config fails to load.
pub const INVALID_CONFIG_MESSAGE: &str =
    "Config failed to load properly! Please ensure your JSON was configured correctly!";

/// Result of [`load()`].
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded {
    /// The config to use.
    ///
    /// If the config is invalid, this is the standard theme.
    pub config: Config,
    /// Whether the config loaded correctly.
    ///
    /// Judgments must not be displayed while the config is invalid.
    pub valid: bool,
}

impl Loaded {
    /// Returns the message to show to the user, if any.
    pub fn notification(&self) -> Option<&'static str> {
        (!self.valid).then_some(INVALID_CONFIG_MESSAGE)
    }

    fn invalid() -> Self {
        Self {
            config: Config::default(),
            valid: false,
        }
    }
}

/// Loads the config from `file`, migrating and switching seasons as needed.
///
/// - A missing file is created with the standard theme.
/// - Configs at or below version 2.4.0 are replaced with the standard theme, even if they don't
///   parse anymore.
/// - Configs stuck on a seasonal theme with seasonal switching turned off go back to the standard
///   theme.
/// - Finally the seasonal theme for `today` is applied, see
///   [`season::switch_to_current_season()`].
pub fn load(file: &ConfigFile, today: NaiveDate) -> Loaded {
    info!("loading config from {:?}", file.path());

    let mut config = match file.load() {
        Ok(config) => config,
        Err(err) if err.is_not_found() => {
            info!("no config file, writing the default");
            reset(file)
        }
        Err(err) => {
            let outdated = file
                .probe_version()
                .map(|version| version.is_outdated())
                .unwrap_or(false);
            if !outdated {
                error!("config failed to load: {err}");
                return Loaded::invalid();
            }

            info!("replacing outdated config that failed to load: {err}");
            reset(file)
        }
    };

    if config.is_outdated() {
        let (major, minor, patch) = config.version();
        debug!("replacing config with the default, version: {major}.{minor}.{patch}");
        config = reset(file);
    } else if config.is_stale_season() {
        debug!("leaving stale {:?} theme", config.config_type);
        config = Config {
            use_seasonal_themes: config.use_seasonal_themes,
            backup_before_season: config.backup_before_season,
            restore_after_season: config.restore_after_season,
            ..Config::default()
        };
        if let Err(err) = file.write(&config) {
            warn!("error writing config: {err}");
        }
    }

    info!(
        "loaded config, type: {:?}, seasonal themes: {}, restore after season: {}",
        config.config_type, config.use_seasonal_themes, config.restore_after_season
    );

    if let Err(err) = season::switch_to_current_season(&mut config, file, today) {
        error!("config failed to load after the seasonal switch: {err}");
        return Loaded::invalid();
    }

    info!("switched config to the current season, type: {:?}", config.config_type);

    Loaded {
        config,
        valid: true,
    }
}

/// Loads the config using the current local date.
pub fn load_now(file: &ConfigFile) -> Loaded {
    load(file, chrono::Local::now().date_naive())
}

fn reset(file: &ConfigFile) -> Config {
    let config = Config::default();
    if let Err(err) = file.write(&config) {
        warn!("error writing config: {err}");
    }
    config
}
