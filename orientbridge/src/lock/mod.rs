//! Orientation-lock state and control.
//!
//! Two independent concerns live here:
//!
//! - [`LockSettingObserver`] watches the OS auto-rotate setting and
//!   reports boolean changes.
//! - [`LockController`] applies programmatic lock requests to the
//!   foreground activity.
//!
//! They share nothing but the name: the setting observer reports what
//! the user configured at the OS level, while the controller forces an
//! orientation regardless of that setting.

mod control;
mod settings;

pub use control::LockController;
pub use settings::LockSettingObserver;
