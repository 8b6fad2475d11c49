//! Built-in themes.
use crate::{Config, ConfigType, DisplayMode, Judgment, Segment, CURRENT_VERSION};

/// The standard theme, which is also the default config.
pub fn standard() -> Config {
    let (major_version, minor_version, patch_version) = CURRENT_VERSION;

    Config {
        major_version,
        minor_version,
        patch_version,
        config_type: ConfigType::Standard,
        use_seasonal_themes: true,
        backup_before_season: true,
        restore_after_season: true,
        display_mode: DisplayMode::Format,
        judgments: vec![
            Judgment::new(115, "%BFantastic%A%n%s", [1., 1., 1., 1.]),
            Judgment::new(101, "<size=80%>%BExcellent%A</size>%n%s", [0., 1., 0., 1.]),
            Judgment::new(90, "<size=80%>%BGreat%A</size>%n%s", [1., 0.980392158, 0., 1.]),
            Judgment::new(80, "<size=80%>%BGood%A</size>%n%s", [1., 0.6, 0., 1.]).fading(),
            Judgment::new(60, "<size=80%>%BDecent%A</size>%n%s", [1., 0., 0., 1.]).fading(),
            Judgment::new(0, "<size=80%>%BWay Off%A</size>%n%s", [0.5, 0., 0., 1.]).fading(),
        ],
        before_cut_angle_judgments: vec![Segment::new(70, "+"), Segment::new(0, " ")],
        accuracy_judgments: vec![Segment::new(15, "+"), Segment::new(0, " ")],
        after_cut_angle_judgments: vec![Segment::new(30, "+"), Segment::new(0, " ")],
        do_intermediate_updates: true,
        use_fixed_pos: false,
        fixed_pos_x: 0.,
        fixed_pos_y: 0.,
        fixed_pos_z: 0.,
    }
}

/// The Christmas theme.
///
/// Preferences that aren't part of the look (seasonal switching, intermediate updates, fixed
/// position) are carried over from `base`.
pub fn christmas(base: &Config) -> Config {
    Config {
        config_type: ConfigType::Christmas,
        display_mode: DisplayMode::Format,
        judgments: vec![
            Judgment::new(115, "%BMerry Christmas%A%n%s", [1., 1., 1., 1.]),
            Judgment::new(101, "<size=80%>%BHo Ho Ho%A</size>%n%s", [0.1, 0.7, 0.2, 1.]),
            Judgment::new(90, "<size=80%>%BJingle%A</size>%n%s", [1., 0.84, 0., 1.]),
            Judgment::new(80, "<size=80%>%BSnowball%A</size>%n%s", [0.6, 0.9, 1., 1.]).fading(),
            Judgment::new(60, "<size=80%>%BCoal%A</size>%n%s", [0.8, 0.1, 0.1, 1.]).fading(),
            Judgment::new(0, "<size=80%>%BGrinch%A</size>%n%s", [0.3, 0.4, 0.1, 1.]).fading(),
        ],
        before_cut_angle_judgments: vec![Segment::new(70, "*"), Segment::new(0, " ")],
        accuracy_judgments: vec![Segment::new(15, "*"), Segment::new(0, " ")],
        after_cut_angle_judgments: vec![Segment::new(30, "*"), Segment::new(0, " ")],
        ..base.clone()
    }
}
