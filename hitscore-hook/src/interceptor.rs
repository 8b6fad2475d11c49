//! The hook bodies.
//!
//! Each method runs in place of one hooked host method. It gets the original implementation as
//! a closure and decides what to run before and after it.
use hitscore_config::{file::ConfigFile, lifecycle::Loaded};
use hitscore_core::{color::Color, score::RawScore};

use crate::{
    assets::{AssetCache, AssetLoader},
    effect::COLOR_FIELD,
    host::{Handle, Host, HostError, HostExt, Value, Vector3},
    hooks::{HookId, HookInstaller, HookRegistry, InstallError},
    judge,
    notify::Notifier,
    state::PipelineState,
};

/// The scene gameplay happens in.
pub const GAME_SCENE: &str = "GameCore";

const DURATION_FIELD: &str = "_duration";
const NOTE_CUT_INFO_FIELD: &str = "_noteCutInfo";

/// Presentation time of a score effect while its judgment is applied without intermediate
/// updates. Zero would destroy the effect before it's judged.
const HIDDEN_DURATION: f32 = 0.01;
/// The host's own presentation time of a score effect.
const DEFAULT_DURATION: f32 = 0.7;

/// Arguments of `FlyingScoreEffect.InitAndPresent` that the hook may change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresentArgs {
    /// Score multiplier at the time of the cut.
    pub multiplier: i32,
    /// How long the effect is shown, in seconds.
    pub duration: f32,
    /// Where the effect flies to.
    pub target_pos: Vector3,
    /// Initial color of the effect.
    pub color: Color,
}

/// Runs the hooks against the pipeline state.
///
/// All hooks take `&mut self`. A host that calls hooks from several threads must put the
/// `Interceptor` behind a single `Mutex`.
#[derive(Debug)]
pub struct Interceptor<L, N> {
    state: PipelineState,
    assets: AssetCache<L>,
    notifier: N,
    hooks: HookRegistry,
}

impl<L: AssetLoader, N: Notifier> Interceptor<L, N> {
    /// Creates an `Interceptor` with a loaded config.
    ///
    /// An invalid config queues a notification for the user.
    pub fn new(loaded: &Loaded, loader: L, mut notifier: N) -> Self {
        if let Some(message) = loaded.notification() {
            notifier.push(message);
        }

        Self {
            state: PipelineState::new(loaded),
            assets: AssetCache::new(loader),
            notifier,
            hooks: HookRegistry::new(),
        }
    }

    /// Module entry point: loads the config from `file` and installs the hooks.
    pub fn load(
        file: &ConfigFile,
        loader: L,
        notifier: N,
        installer: &mut dyn HookInstaller,
    ) -> (Self, Vec<InstallError>) {
        let loaded = hitscore_config::lifecycle::load_now(file);
        let mut interceptor = Self::new(&loaded, loader, notifier);
        let errors = interceptor.install_hooks(installer);
        (interceptor, errors)
    }

    /// Installs the hooks that aren't installed yet, returning the failures.
    pub fn install_hooks(&mut self, installer: &mut dyn HookInstaller) -> Vec<InstallError> {
        self.hooks.install_all(installer)
    }

    /// Switches to a freshly loaded config.
    pub fn reload(&mut self, loaded: &Loaded) {
        self.state.reload(loaded);
        match loaded.notification() {
            Some(message) => self.notifier.push(message),
            None => info!("reloaded config"),
        }
    }

    /// Returns the pipeline state.
    pub fn state(&self) -> &PipelineState {
        &self.state
    }

    /// Returns the pipeline state mutably.
    pub fn state_mut(&mut self) -> &mut PipelineState {
        &mut self.state
    }

    /// Returns the judgment asset cache.
    pub fn assets(&self) -> &AssetCache<L> {
        &self.assets
    }

    /// Returns the notification box.
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Returns the state of every hook.
    pub fn hooks(&self) -> &HookRegistry {
        &self.hooks
    }

    /// `ScoreModel.RawScoreWithoutMultiplier`.
    pub fn raw_score_without_multiplier<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        original: impl FnOnce(&mut H) -> RawScore,
    ) -> RawScore {
        self.hooks.enter(HookId::RawScoreWithoutMultiplier);

        let score = original(host);
        debug!(
            "raw score: before cut {}, after cut {}, cut distance {}",
            score.before_cut, score.after_cut, score.cut_distance
        );
        score
    }

    /// `FlyingScoreEffect.InitAndPresent`.
    ///
    /// In fixed position mode the effect is moved to the fixed position and replaces the
    /// current effect, which is ended. Otherwise, without intermediate updates, the effect is
    /// presented with a tiny duration until its judgment is applied. After presenting, the
    /// judgment is applied and the note is remembered for when its swing finishes.
    pub fn init_and_present<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        effect: Handle,
        note_cut_info: Handle,
        mut args: PresentArgs,
        original: impl FnOnce(&mut H, PresentArgs),
    ) {
        self.hooks.enter(HookId::InitAndPresent);

        if let Some(position) = self.state.settings.fixed_pos {
            args.target_pos = position;
            if let Err(err) = move_to(host, effect, position) {
                error!("error moving score effect to the fixed position: {err}");
            }

            match self.state.replace_current_effect(effect) {
                Some(previous) if previous != effect => {
                    if let Err(err) = host.set_field(previous, DURATION_FIELD, Value::Float(0.)) {
                        error!("error ending the previous score effect: {err}");
                    }
                }
                _ => {}
            }
        } else if !self.state.settings.do_intermediate_updates {
            args.duration = HIDDEN_DURATION;
        }

        original(host, args);

        let result = judge::judge_no_context(
            &mut self.state,
            &mut self.assets,
            host,
            effect,
            note_cut_info,
        );
        judge::log_result(&result);

        if !self.state.settings.do_intermediate_updates {
            if let Err(err) = host.set_field(effect, DURATION_FIELD, Value::Float(DEFAULT_DURATION))
            {
                error!("error restoring the score effect duration: {err}");
            }
        }

        match host.property::<Option<Handle>>(note_cut_info, "swingRatingCounter") {
            Ok(Some(counter)) => self.state.contexts.record(counter, note_cut_info, effect),
            Ok(None) => debug!("note has no swing rating counter"),
            Err(err) => error!("error getting the swing rating counter: {err}"),
        }
    }

    /// `FlyingScoreEffect.HandleSaberSwingRatingCounterDidChangeEvent`.
    pub fn swing_rating_counter_did_change<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        effect: Handle,
        original: impl FnOnce(&mut H),
    ) {
        self.hooks.enter(HookId::SwingRatingCounterDidChange);

        original(host);

        if !self.state.settings.do_intermediate_updates {
            return;
        }

        let note_cut_info = match host.field::<Handle>(effect, NOTE_CUT_INFO_FIELD) {
            Ok(note_cut_info) => note_cut_info,
            Err(err) => {
                error!("error getting the note cut info: {err}");
                return;
            }
        };

        let result = judge::judge_no_context(
            &mut self.state,
            &mut self.assets,
            host,
            effect,
            note_cut_info,
        );
        judge::log_result(&result);
    }

    /// `BeatmapObjectExecutionRatingsRecorder.CutScoreHandler.HandleSwingRatingCounterDidFinishEvent`.
    pub fn swing_rating_counter_did_finish<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        counter: Handle,
        original: impl FnOnce(&mut H),
    ) {
        self.hooks.enter(HookId::SwingRatingCounterDidFinish);

        original(host);

        let result = judge::judge(&mut self.state, &mut self.assets, host, counter);
        judge::log_result(&result);
    }

    /// `FlyingScoreSpawner.HandleFlyingScoreEffectDidFinish`.
    pub fn flying_score_effect_did_finish<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        effect: Handle,
        original: impl FnOnce(&mut H),
    ) {
        self.hooks.enter(HookId::FlyingScoreEffectDidFinish);

        self.state.effect_finished(effect);
        original(host);
    }

    /// `FlyingScoreEffect.ManualUpdate`.
    pub fn manual_update<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        effect: Handle,
        original: impl FnOnce(&mut H),
    ) {
        self.hooks.enter(HookId::ManualUpdate);

        if let Some(color) = self.state.debug_color() {
            if let Err(err) = host.set_field(effect, COLOR_FIELD, Value::Color(color)) {
                error!("error setting the debug color: {err}");
            }
        }

        original(host);
    }

    /// `MainMenuViewController.DidActivate`.
    pub fn main_menu_did_activate<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        view_controller: Handle,
        original: impl FnOnce(&mut H),
    ) {
        self.hooks.enter(HookId::MainMenuDidActivate);

        original(host);

        match host.property::<Handle>(view_controller, "transform") {
            Ok(transform) => {
                self.notifier.init(transform);
                if !self.notifier.create() {
                    error!("couldn't create the notification box");
                }
            }
            Err(err) => error!("error getting the main menu transform: {err}"),
        }
    }

    /// `MainMenuViewController.HandleMenuButton`.
    pub fn main_menu_handle_menu_button(&mut self, original: impl FnOnce()) {
        self.hooks.enter(HookId::MainMenuHandleMenuButton);

        self.notifier.mark_invalid();
        original();
    }

    /// `VRUIControls.VRPointer.Process`.
    pub fn vr_pointer_process(&mut self, original: impl FnOnce()) {
        self.hooks.enter(HookId::VRPointerProcess);

        original();
        self.notifier.update();
    }

    /// `SceneManager.Internal_SceneLoaded`.
    ///
    /// Loading the game scene reloads the judgment assets and forgets the objects of the
    /// previous level.
    pub fn scene_loaded(&mut self, scene_name: &str, original: impl FnOnce()) {
        self.hooks.enter(HookId::SceneLoaded);

        original();

        debug!("scene loaded: {scene_name}");
        if scene_name != GAME_SCENE {
            return;
        }

        info!("reloading judgment assets");
        self.state.leave_scene();
        self.assets.clear();
        self.assets.preload(&self.state.settings.judgments);
    }
}

fn move_to<H: Host + ?Sized>(
    host: &mut H,
    effect: Handle,
    position: Vector3,
) -> Result<(), HostError> {
    let transform: Handle = host.property(effect, "transform")?;
    host.set_property(transform, "position", Value::Vector3(position))
}
