//! State shared by all hooks.
use hitscore_config::{lifecycle::Loaded, Config};
use hitscore_core::{
    color::Color,
    display::DisplayMode,
    judgment::{Judgment, SegmentTables},
};

use crate::{
    context::ContextStore,
    effect::TextBases,
    host::{Handle, Vector3},
};

/// The parts of the config the hooks use, converted once on load.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Settings {
    /// Judgments, sorted by descending threshold.
    pub judgments: Vec<Judgment>,
    /// Segment tables for the `%B`, `%C` and `%A` directives.
    pub segments: SegmentTables,
    /// How judgments are shown.
    pub display_mode: DisplayMode,
    /// Whether judgments are updated while the swing rating changes.
    pub do_intermediate_updates: bool,
    /// Where score effects are pinned, if anywhere.
    pub fixed_pos: Option<Vector3>,
}

impl From<&Config> for Settings {
    fn from(config: &Config) -> Self {
        Self {
            judgments: config.judgment_table(),
            segments: config.segment_tables(),
            display_mode: config.display_mode.into(),
            do_intermediate_updates: config.do_intermediate_updates,
            fixed_pos: config
                .use_fixed_pos
                .then(|| Vector3::from(config.fixed_pos())),
        }
    }
}

/// Everything the hooks remember between calls.
#[derive(Debug)]
pub struct PipelineState {
    /// Settings of the loaded config.
    pub settings: Settings,
    config_valid: bool,
    /// Notes waiting for their swing to finish.
    pub contexts: ContextStore,
    /// Host texts that had a judgment appended.
    pub texts: TextBases,
    current_effect: Option<Handle>,
    debug_color: Option<Color>,
}

impl PipelineState {
    /// Creates a `PipelineState` for a loaded config.
    pub fn new(loaded: &Loaded) -> Self {
        Self {
            settings: Settings::from(&loaded.config),
            config_valid: loaded.valid,
            contexts: ContextStore::new(),
            texts: TextBases::new(),
            current_effect: None,
            debug_color: None,
        }
    }

    /// Switches to a freshly loaded config.
    ///
    /// A valid config turns judgments back on after a failed load.
    pub fn reload(&mut self, loaded: &Loaded) {
        self.settings = Settings::from(&loaded.config);
        self.config_valid = loaded.valid;
    }

    /// Returns `false` if the config failed to load, in which case no judgments are shown.
    #[inline]
    pub fn is_config_valid(&self) -> bool {
        self.config_valid
    }

    /// The effect presented last in fixed position mode.
    #[inline]
    pub fn current_effect(&self) -> Option<Handle> {
        self.current_effect
    }

    /// Makes `effect` the current effect, returning the previous one.
    pub fn replace_current_effect(&mut self, effect: Handle) -> Option<Handle> {
        self.current_effect.replace(effect)
    }

    /// Forgets the current effect if it is `effect`.
    pub fn effect_finished(&mut self, effect: Handle) {
        if self.current_effect == Some(effect) {
            self.current_effect = None;
        }
    }

    /// Drops all references into the scene that is being replaced.
    pub fn leave_scene(&mut self) {
        self.contexts.clear();
        self.texts.clear();
        self.current_effect = None;
    }

    /// The color forced onto every score effect, if any.
    #[inline]
    pub fn debug_color(&self) -> Option<Color> {
        self.debug_color
    }

    /// Sets a color forced onto every score effect each frame, for checking that hooks run.
    pub fn set_debug_color(&mut self, color: Option<Color>) {
        self.debug_color = color;
    }
}
