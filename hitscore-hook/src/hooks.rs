//! The host methods that are hooked, and their installation.
use std::fmt;

use thiserror::Error;

/// A hooked host method.
///
/// See [`HookId::target()`] for the method of each hook, and the
/// [`Interceptor`](crate::Interceptor) method of the same name for what it does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum HookId {
    RawScoreWithoutMultiplier,
    InitAndPresent,
    SwingRatingCounterDidChange,
    SwingRatingCounterDidFinish,
    FlyingScoreEffectDidFinish,
    ManualUpdate,
    MainMenuDidActivate,
    MainMenuHandleMenuButton,
    VRPointerProcess,
    SceneLoaded,
}

impl HookId {
    /// Every hook, in installation order.
    pub const ALL: [HookId; 10] = [
        HookId::RawScoreWithoutMultiplier,
        HookId::InitAndPresent,
        HookId::SwingRatingCounterDidChange,
        HookId::SwingRatingCounterDidFinish,
        HookId::FlyingScoreEffectDidFinish,
        HookId::ManualUpdate,
        HookId::MainMenuDidActivate,
        HookId::MainMenuHandleMenuButton,
        HookId::VRPointerProcess,
        HookId::SceneLoaded,
    ];

    /// Returns the host method this hook replaces.
    pub fn target(self) -> HookTarget {
        let (namespace, class, method, arg_count) = match self {
            HookId::RawScoreWithoutMultiplier => ("", "ScoreModel", "RawScoreWithoutMultiplier", 4),
            HookId::InitAndPresent => ("", "FlyingScoreEffect", "InitAndPresent", 6),
            HookId::SwingRatingCounterDidChange => (
                "",
                "FlyingScoreEffect",
                "HandleSaberSwingRatingCounterDidChangeEvent",
                2,
            ),
            HookId::SwingRatingCounterDidFinish => (
                "",
                "BeatmapObjectExecutionRatingsRecorder/CutScoreHandler",
                "HandleSwingRatingCounterDidFinishEvent",
                1,
            ),
            HookId::FlyingScoreEffectDidFinish => {
                ("", "FlyingScoreSpawner", "HandleFlyingScoreEffectDidFinish", 1)
            }
            HookId::ManualUpdate => ("", "FlyingScoreEffect", "ManualUpdate", 1),
            HookId::MainMenuDidActivate => ("", "MainMenuViewController", "DidActivate", 2),
            HookId::MainMenuHandleMenuButton => {
                ("", "MainMenuViewController", "HandleMenuButton", 1)
            }
            HookId::VRPointerProcess => ("VRUIControls", "VRPointer", "Process", 1),
            HookId::SceneLoaded => (
                "UnityEngine.SceneManagement",
                "SceneManager",
                "Internal_SceneLoaded",
                2,
            ),
        };

        HookTarget {
            namespace,
            class,
            method,
            arg_count,
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// A method in the host runtime, found by name and argument count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HookTarget {
    /// Namespace, empty for the global namespace.
    pub namespace: &'static str,
    /// Class name. Nested classes are written as `Outer/Inner`.
    pub class: &'static str,
    /// Method name.
    pub method: &'static str,
    /// Number of parameters, including the instance for instance methods.
    pub arg_count: u8,
}

impl fmt::Display for HookTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.namespace.is_empty() {
            write!(f, "{}.", self.namespace)?;
        }
        write!(f, "{}.{}/{}", self.class, self.method, self.arg_count)
    }
}

/// Failure to install a hook.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstallError {
    /// The host has no such method.
    #[error("method {0} not found")]
    MethodNotFound(HookTarget),
    /// The method was found but couldn't be redirected.
    #[error("couldn't patch {target}: {reason}")]
    Patch {
        /// The method.
        target: HookTarget,
        /// What went wrong.
        reason: String,
    },
}

/// Redirects host methods to the hooks.
///
/// Installing a hook routes calls of the target method to the matching
/// [`Interceptor`](crate::Interceptor) method, which receives the original implementation to
/// call.
pub trait HookInstaller {
    /// Redirects `target` to the hook `id`.
    fn install(&mut self, id: HookId, target: &HookTarget) -> Result<(), InstallError>;
}

/// State of a hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HookState {
    /// Not installed, or failed to install.
    #[default]
    Uninstalled,
    /// Installed, but not called yet.
    Installed,
    /// Installed and called at least once.
    Active,
}

/// Tracks which hooks are installed and in use.
#[derive(Debug, Default)]
pub struct HookRegistry {
    states: [HookState; HookId::ALL.len()],
}

impl HookRegistry {
    /// Creates a `HookRegistry` with no hooks installed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the state of the hook.
    #[inline]
    pub fn state(&self, id: HookId) -> HookState {
        self.states[id.index()]
    }

    /// Installs every hook that isn't installed yet.
    ///
    /// A hook that fails to install is logged and left uninstalled; the others are still
    /// installed. Returns the failures.
    pub fn install_all(&mut self, installer: &mut dyn HookInstaller) -> Vec<InstallError> {
        info!("installing hooks");

        let mut errors = Vec::new();
        for id in HookId::ALL {
            if self.state(id) != HookState::Uninstalled {
                continue;
            }

            let target = id.target();
            match installer.install(id, &target) {
                Ok(()) => {
                    debug!("installed hook {id:?} on {target}");
                    self.states[id.index()] = HookState::Installed;
                }
                Err(err) => {
                    error!("error installing hook {id:?}: {err}");
                    errors.push(err);
                }
            }
        }

        info!(
            "installed {} of {} hooks",
            self.states
                .iter()
                .filter(|&&state| state != HookState::Uninstalled)
                .count(),
            HookId::ALL.len()
        );
        errors
    }

    /// Records a call of the hook.
    pub fn enter(&mut self, id: HookId) {
        let state = &mut self.states[id.index()];
        match *state {
            HookState::Installed => {
                trace!("hook {id:?} is active");
                *state = HookState::Active;
            }
            HookState::Active => {}
            HookState::Uninstalled => warn!("hook {id:?} called without being installed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Failing(HookId);

    impl HookInstaller for Failing {
        fn install(&mut self, id: HookId, target: &HookTarget) -> Result<(), InstallError> {
            if id == self.0 {
                Err(InstallError::MethodNotFound(*target))
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn ids_are_indices() {
        for (i, id) in HookId::ALL.into_iter().enumerate() {
            assert_eq!(id.index(), i);
        }
    }

    #[test]
    fn target_display() {
        assert_eq!(
            HookId::InitAndPresent.target().to_string(),
            "FlyingScoreEffect.InitAndPresent/6"
        );
        assert_eq!(
            HookId::VRPointerProcess.target().to_string(),
            "VRUIControls.VRPointer.Process/1"
        );
    }

    #[test]
    fn state_machine() {
        let mut registry = HookRegistry::new();
        let errors = registry.install_all(&mut Failing(HookId::ManualUpdate));

        assert_eq!(
            errors,
            [InstallError::MethodNotFound(HookId::ManualUpdate.target())]
        );
        assert_eq!(registry.state(HookId::ManualUpdate), HookState::Uninstalled);
        assert_eq!(registry.state(HookId::InitAndPresent), HookState::Installed);

        registry.enter(HookId::InitAndPresent);
        assert_eq!(registry.state(HookId::InitAndPresent), HookState::Active);

        registry.enter(HookId::ManualUpdate);
        assert_eq!(registry.state(HookId::ManualUpdate), HookState::Uninstalled);

        // Retrying only touches the missing hook and keeps the active ones active.
        let errors = registry.install_all(&mut Failing(HookId::SceneLoaded));
        assert!(errors.is_empty());
        assert_eq!(registry.state(HookId::ManualUpdate), HookState::Installed);
        assert_eq!(registry.state(HookId::InitAndPresent), HookState::Active);
    }
}
