//! Resolving and showing judgments.
use hitscore_core::{judgment::best_judgment, score::RawScore};

use crate::{
    assets::{AssetCache, AssetLoader},
    effect::{self, EffectOutcome},
    error::JudgeError,
    host::{Class, Handle, Host, HostError, HostExt, Target, Value},
    state::PipelineState,
};

const SCORE_MODEL: Class = Class::new("", "ScoreModel");

/// Computes the cut score of a note with the host's own scoring.
pub fn raw_score<H: Host + ?Sized>(
    host: &mut H,
    note_cut_info: Handle,
) -> Result<RawScore, HostError> {
    host.call(
        Target::Static(SCORE_MODEL),
        "RawScoreWithoutMultiplier",
        &[Value::Object(note_cut_info)],
    )
}

/// Shows the best judgment for `score` on `effect`.
///
/// Nothing is touched while the config is invalid or the judgment table is empty.
pub fn check_judgments<H, L>(
    state: &mut PipelineState,
    assets: &mut AssetCache<L>,
    host: &mut H,
    effect: Handle,
    score: RawScore,
) -> Result<EffectOutcome, JudgeError>
where
    H: Host + ?Sized,
    L: AssetLoader,
{
    if !state.is_config_valid() {
        return Err(JudgeError::ConfigInvalid);
    }

    let index =
        best_judgment(&state.settings.judgments, score.total()).ok_or(JudgeError::NoMatch)?;

    Ok(effect::apply(
        host,
        assets,
        &mut state.texts,
        &state.settings,
        effect,
        index,
        score,
    ))
}

/// Scores `note_cut_info` and shows the judgment on `effect`.
pub fn judge_no_context<H, L>(
    state: &mut PipelineState,
    assets: &mut AssetCache<L>,
    host: &mut H,
    effect: Handle,
    note_cut_info: Handle,
) -> Result<EffectOutcome, JudgeError>
where
    H: Host + ?Sized,
    L: AssetLoader,
{
    if !state.is_config_valid() {
        return Err(JudgeError::ConfigInvalid);
    }

    let score = raw_score(host, note_cut_info)?;
    check_judgments(state, assets, host, effect, score)
}

/// Shows the judgment recorded for a swing rating counter that has finished.
pub fn judge<H, L>(
    state: &mut PipelineState,
    assets: &mut AssetCache<L>,
    host: &mut H,
    counter: Handle,
) -> Result<EffectOutcome, JudgeError>
where
    H: Host + ?Sized,
    L: AssetLoader,
{
    let context = state
        .contexts
        .resolve(counter)
        .ok_or_else(|| JudgeError::LookupMiss(format!("context for counter {counter}")))?;

    judge_no_context(state, assets, host, context.effect, context.note_cut_info)
}

/// Logs a judgment that couldn't be shown at all.
pub(crate) fn log_result(result: &Result<EffectOutcome, JudgeError>) {
    match result {
        Ok(_) => {}
        Err(JudgeError::ConfigInvalid) => trace!("skipping judgment, the config is invalid"),
        Err(err @ (JudgeError::NoMatch | JudgeError::LookupMiss(_))) => {
            debug!("skipping judgment: {err}")
        }
        Err(err) => error!("error judging: {err}"),
    }
}
