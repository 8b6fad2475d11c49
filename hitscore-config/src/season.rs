//! Seasonal theme switching.
use chrono::{Datelike, NaiveDate};

use crate::{file::ConfigFile, themes, Config, ConfigError, ConfigType};

/// Returns `true` on the days the Christmas theme is active.
#[inline]
pub fn is_christmas(date: NaiveDate) -> bool {
    date.month() == 12 && (23..=24).contains(&date.day())
}

/// Switches `config` to the theme of the season `today` falls into and writes it back.
///
/// Does nothing unless seasonal themes are enabled. Entering a season optionally backs up the
/// current config first. Leaving one restores the backup if allowed and present, and otherwise
/// switches to the standard theme, keeping the seasonal switching flags.
///
/// Returns an error only if a restored backup fails to load, in which case the config should be
/// considered invalid. Failures to write files are logged and otherwise ignored.
pub fn switch_to_current_season(
    config: &mut Config,
    file: &ConfigFile,
    today: NaiveDate,
) -> Result<(), ConfigError> {
    if !config.use_seasonal_themes {
        return Ok(());
    }

    debug!("current date: {today}");

    if is_christmas(today) {
        if config.backup_before_season && config.config_type == ConfigType::Standard {
            debug!("backing up config before the seasonal switch");
            if let Err(err) = file.write(config) {
                warn!("error writing config: {err}");
            }
            if let Err(err) = file.backup(config) {
                warn!("error backing up config: {err}");
            }
        }

        debug!("switching to the Christmas theme");
        *config = themes::christmas(config);
    } else if config.config_type != ConfigType::Standard {
        if config.restore_after_season && file.has_backup() {
            debug!("restoring config from {:?}", file.backup_path());
            file.restore()?;
            *config = file.load()?;
            if let Err(err) = file.remove_backup() {
                warn!("error removing config backup: {err}");
            }
        } else {
            debug!("leaving the season, switching to the standard theme");
            *config = Config {
                use_seasonal_themes: config.use_seasonal_themes,
                backup_before_season: config.backup_before_season,
                restore_after_season: config.restore_after_season,
                ..themes::standard()
            };
        }
    }

    if let Err(err) = file.write(config) {
        warn!("error writing config: {err}");
    }

    Ok(())
}
