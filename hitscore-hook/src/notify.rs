//! The in-game notification box.
use crate::host::Handle;

/// Shows messages to the user in the main menu.
pub trait Notifier {
    /// Attaches the notification box under `parent`.
    fn init(&mut self, parent: Handle);
    /// Creates the notification box, returning `false` on failure.
    fn create(&mut self) -> bool;
    /// Called every frame while the menu pointer is active.
    fn update(&mut self);
    /// Marks the box as gone, e.g. when its menu is left.
    fn mark_invalid(&mut self);
    /// Queues `message` for display.
    fn push(&mut self, message: &str);
}

