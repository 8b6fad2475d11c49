//! Applying a judgment to a live score effect.
//!
//! A judgment is applied in four independent steps: color, image, text and audio. A step that
//! fails is logged and skipped, and the remaining steps still run.
use std::collections::HashMap;

use hitscore_core::{
    display::DisplayMode,
    format,
    judgment::{judgment_color, Judgment},
    score::RawScore,
};

use crate::{
    assets::{AssetCache, AssetLoader},
    error::JudgeError,
    host::{Class, Handle, Host, HostExt, Rect, Target, Value, Vector2},
    state::Settings,
};

pub(crate) const COLOR_FIELD: &str = "_color";
pub(crate) const TEXT_FIELD: &str = "_text";

const SPRITE_RENDERER: Class = Class::new("UnityEngine", "SpriteRenderer");
const SPRITE: Class = Class::new("UnityEngine", "Sprite");
const AUDIO_SOURCE: Class = Class::new("UnityEngine", "AudioSource");

/// `TextOverflowModes.Overflow`.
const OVERFLOW_MODE_OVERFLOW: i32 = 0;
const SPRITE_PIVOT: Vector2 = Vector2 { x: 0.5, y: 0.5 };
const SPRITE_PIXELS_PER_UNIT: f32 = 1024.;
const SPRITE_EXTRUDE: u32 = 1;
/// `SpriteMeshType.FullRect`.
const SPRITE_MESH_TYPE_FULL_RECT: i32 = 0;

const DEFAULT_VOLUME: f32 = 1.;

/// The result of each step of [`apply()`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectOutcome {
    /// Setting the judgment color, or the faded color.
    pub color: Result<(), JudgeError>,
    /// Attaching the judgment image.
    pub image: Result<(), JudgeError>,
    /// Rendering the judgment text.
    pub text: Result<(), JudgeError>,
    /// Playing the judgment sound.
    pub audio: Result<(), JudgeError>,
}

impl EffectOutcome {
    /// Returns `true` if every step succeeded.
    pub fn is_ok(&self) -> bool {
        self.color.is_ok() && self.image.is_ok() && self.text.is_ok() && self.audio.is_ok()
    }
}

/// The host's own texts of score effects that had a judgment text appended.
///
/// Keyed by text object. A text object that still shows what was last rendered into it hasn't
/// been reset by the host, so the judgment is appended to the stored text instead.
#[derive(Debug, Default)]
pub struct TextBases {
    texts: HashMap<Handle, AppendedText>,
}

#[derive(Debug)]
struct AppendedText {
    base: String,
    rendered: String,
}

impl TextBases {
    /// Creates an empty `TextBases`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the host's own text of `text`, given that it currently shows `current`.
    pub fn base<'a>(&'a self, text: Handle, current: &'a str) -> &'a str {
        match self.texts.get(&text) {
            Some(appended) if appended.rendered == current => &appended.base,
            _ => current,
        }
    }

    /// Remembers that `rendered` was built from the host's text `base`.
    pub fn record(&mut self, text: Handle, base: String, rendered: String) {
        self.texts.insert(text, AppendedText { base, rendered });
    }

    /// Forgets every text object.
    pub fn clear(&mut self) {
        self.texts.clear();
    }

    /// Returns the number of text objects remembered.
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    /// Returns `true` if no text objects are remembered.
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}

/// Applies the judgment at `index` to `effect`.
///
/// # Panics
///
/// Panics if `index` is out of bounds of the judgment table.
pub fn apply<H, L>(
    host: &mut H,
    assets: &mut AssetCache<L>,
    texts: &mut TextBases,
    settings: &Settings,
    effect: Handle,
    index: usize,
    score: RawScore,
) -> EffectOutcome
where
    H: Host + ?Sized,
    L: AssetLoader,
{
    let judgment = &settings.judgments[index];
    trace!("applying judgment {index} to {effect} for score {}", score.total());

    let outcome = EffectOutcome {
        color: apply_color(host, settings, effect, index, score),
        image: apply_image(host, assets, settings.display_mode, effect, judgment),
        text: apply_text(host, texts, settings, effect, judgment, score),
        audio: apply_audio(host, assets, effect, judgment),
    };

    for (step, result) in [
        ("color", &outcome.color),
        ("image", &outcome.image),
        ("text", &outcome.text),
        ("audio", &outcome.audio),
    ] {
        if let Err(err) = result {
            error!("error applying judgment {step}: {err}");
        }
    }

    outcome
}

fn apply_color<H: Host + ?Sized>(
    host: &mut H,
    settings: &Settings,
    effect: Handle,
    index: usize,
    score: RawScore,
) -> Result<(), JudgeError> {
    let Some(color) = judgment_color(&settings.judgments, index, score.total()) else {
        return Ok(());
    };

    host.set_field(effect, COLOR_FIELD, Value::Color(color))?;
    Ok(())
}

fn apply_image<H, L>(
    host: &mut H,
    assets: &mut AssetCache<L>,
    mode: DisplayMode,
    effect: Handle,
    judgment: &Judgment,
) -> Result<(), JudgeError>
where
    H: Host + ?Sized,
    L: AssetLoader,
{
    if !mode.shows_images() {
        return Ok(());
    }

    let path = match (&judgment.image_path, mode) {
        (Some(path), _) => path,
        // The text is shown on its own.
        (None, DisplayMode::ImageAndText) => return Ok(()),
        (None, _) => return Err(JudgeError::MissingField("image path")),
    };

    if host.component(effect, SPRITE_RENDERER)?.is_some() {
        return Ok(());
    }
    let renderer = host.add_component(effect, SPRITE_RENDERER)?;

    let texture = assets
        .texture(path)
        .ok_or_else(|| JudgeError::LookupMiss(format!("texture {path:?}")))?;
    let width: i32 = host.property(texture, "width")?;
    let height: i32 = host.property(texture, "height")?;

    let sprite: Handle = host.call(
        Target::Static(SPRITE),
        "Create",
        &[
            Value::Object(texture),
            Value::Rect(Rect {
                x: 0.,
                y: 0.,
                width: width as f32,
                height: height as f32,
            }),
            Value::Vector2(SPRITE_PIVOT),
            Value::Float(SPRITE_PIXELS_PER_UNIT),
            Value::UInt(SPRITE_EXTRUDE),
            Value::Int(SPRITE_MESH_TYPE_FULL_RECT),
        ],
    )?;
    host.set_property(renderer, "sprite", Value::Object(sprite))?;

    if let Some(color) = judgment.color {
        host.set_property(renderer, "color", Value::Color(color))?;
    }

    Ok(())
}

fn apply_text<H: Host + ?Sized>(
    host: &mut H,
    texts: &mut TextBases,
    settings: &Settings,
    effect: Handle,
    judgment: &Judgment,
    score: RawScore,
) -> Result<(), JudgeError> {
    let text: Handle = host.field(effect, TEXT_FIELD)?;
    host.set_property(text, "richText", Value::Bool(true))?;
    host.set_property(text, "enableWordWrapping", Value::Bool(false))?;
    host.set_property(text, "overflowMode", Value::Int(OVERFLOW_MODE_OVERFLOW))?;

    let judgment_text = judgment.text.as_deref();
    let required = || judgment_text.ok_or(JudgeError::MissingField("text"));

    let rendered = match settings.display_mode {
        DisplayMode::Numeric | DisplayMode::ImageOnly => return Ok(()),
        DisplayMode::ImageAndText => match judgment_text {
            Some(template) => format::expand(template, score, &settings.segments),
            None => return Ok(()),
        },
        DisplayMode::Format | DisplayMode::TextOnly => {
            format::expand(required()?, score, &settings.segments)
        }
        mode @ (DisplayMode::ScoreOnTop | DisplayMode::TextOnTop) => {
            let judgment_text = required()?;
            let current: String = host.property(text, "text")?;
            let base = texts.base(text, &current).to_owned();

            let rendered = if mode == DisplayMode::ScoreOnTop {
                format!("{base}\n{judgment_text}")
            } else {
                format!("{judgment_text}\n{base}")
            };
            host.set_property(text, "text", Value::String(rendered.clone()))?;
            texts.record(text, base, rendered);
            return Ok(());
        }
    };

    host.set_property(text, "text", Value::String(rendered))?;
    Ok(())
}

fn apply_audio<H, L>(
    host: &mut H,
    assets: &mut AssetCache<L>,
    effect: Handle,
    judgment: &Judgment,
) -> Result<(), JudgeError>
where
    H: Host + ?Sized,
    L: AssetLoader,
{
    let Some(path) = &judgment.sound_path else {
        return Ok(());
    };

    if host.component(effect, AUDIO_SOURCE)?.is_some() {
        return Ok(());
    }
    let source = host.add_component(effect, AUDIO_SOURCE)?;

    let clip = assets
        .audio_clip(path)
        .ok_or_else(|| JudgeError::LookupMiss(format!("audio clip {path:?}")))?;
    let volume = judgment.sound_volume.unwrap_or(DEFAULT_VOLUME);

    host.run_method(
        Target::Instance(source),
        "PlayOneShot",
        &[Value::Object(clip), Value::Float(volume)],
    )?;
    Ok(())
}
