//! Observer for the OS auto-rotate setting.
//!
//! The observer caches the auto-rotate boolean, watches the underlying
//! OS setting through the [`SettingsStore`] seam, and broadcasts every
//! change unconditionally (the platform already deduplicates delivery).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use tracing::debug;

use crate::events::LockSettingChanged;
use crate::platform::{SettingsError, SettingsStore};

/// Channel capacity for setting-change broadcasts. Changes are rare
/// (the user toggling a system setting), so a small buffer suffices.
const CHANGE_CHANNEL_CAPACITY: usize = 16;

/// Watches the OS auto-rotate setting and caches its value.
///
/// # Naming
///
/// The external contract speaks of orientation *lock*, which is the
/// logical negation of auto-rotate: rotation locked means auto-rotate
/// disabled. [`LockSettingObserver::is_orientation_locked_in_settings`]
/// preserves that inversion exactly.
pub struct LockSettingObserver {
    store: Arc<dyn SettingsStore>,

    /// Cached auto-rotate value, initialized at `start()` and updated
    /// by the watch loop. Queries never hit the OS.
    enabled: Arc<AtomicBool>,

    /// Broadcast channel for setting changes.
    change_tx: broadcast::Sender<LockSettingChanged>,
}

impl LockSettingObserver {
    /// Create an observer over the given settings store.
    ///
    /// The cached value stays `false` until [`start()`](Self::start)
    /// performs the first read.
    pub fn new(store: Arc<dyn SettingsStore>) -> Self {
        let (change_tx, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            store,
            enabled: Arc::new(AtomicBool::new(false)),
            change_tx,
        }
    }

    /// Read the current setting, register the watch, and spawn the
    /// re-read loop.
    ///
    /// An absent or unreadable setting reads as disabled; that is not
    /// an error. The only failure is the watch registration itself,
    /// which is surfaced verbatim and never retried.
    ///
    /// # Returns
    ///
    /// A handle to the spawned loop. The loop runs until the store
    /// drops its notify sender.
    pub fn start(&self) -> Result<tokio::task::JoinHandle<()>, SettingsError> {
        let initial = self.store.auto_rotate_enabled().unwrap_or(false);
        self.enabled.store(initial, Ordering::Relaxed);

        let (notify_tx, mut notify_rx) = mpsc::unbounded_channel();
        self.store.watch(notify_tx)?;

        let store = Arc::clone(&self.store);
        let enabled = Arc::clone(&self.enabled);
        let change_tx = self.change_tx.clone();

        Ok(tokio::spawn(async move {
            debug!(auto_rotate = initial, "lock setting observer started");

            while notify_rx.recv().await.is_some() {
                let value = store.auto_rotate_enabled().unwrap_or(false);
                enabled.store(value, Ordering::Relaxed);
                debug!(auto_rotate = value, "auto-rotate setting changed");
                // Broadcast every notification - the platform dedupes.
                let _ = change_tx.send(LockSettingChanged {
                    is_orientation_enabled: value,
                });
            }

            debug!("lock setting observer stopped (watch closed)");
        }))
    }

    /// Cached auto-rotate value.
    pub fn is_lock_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Whether orientation is locked in settings.
    ///
    /// This is the NEGATION of the auto-rotate flag: auto-rotate
    /// enabled means the orientation is not locked. The inversion is
    /// the established external contract, preserved deliberately.
    pub fn is_orientation_locked_in_settings(&self) -> bool {
        !self.is_lock_enabled()
    }

    /// Subscribe to setting changes.
    pub fn subscribe(&self) -> broadcast::Receiver<LockSettingChanged> {
        self.change_tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::time::Duration;

    /// Settings store double with a controllable value and watch.
    #[derive(Default)]
    struct FakeStore {
        value: Mutex<Option<bool>>,
        notify: Mutex<Option<mpsc::UnboundedSender<()>>>,
        refuse_watch: bool,
    }

    impl FakeStore {
        fn with_value(value: Option<bool>) -> Self {
            Self {
                value: Mutex::new(value),
                ..Self::default()
            }
        }

        fn set_value(&self, value: Option<bool>) {
            *self.value.lock() = value;
        }

        fn trigger_change(&self) {
            if let Some(tx) = self.notify.lock().as_ref() {
                tx.send(()).unwrap();
            }
        }
    }

    impl SettingsStore for FakeStore {
        fn auto_rotate_enabled(&self) -> Option<bool> {
            *self.value.lock()
        }

        fn watch(&self, notify: mpsc::UnboundedSender<()>) -> Result<(), SettingsError> {
            if self.refuse_watch {
                return Err(SettingsError::Registration("refused".to_string()));
            }
            *self.notify.lock() = Some(notify);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_start_reads_initial_value() {
        let store = Arc::new(FakeStore::with_value(Some(true)));
        let observer = LockSettingObserver::new(store);

        assert!(!observer.is_lock_enabled(), "false before start");
        observer.start().unwrap();
        assert!(observer.is_lock_enabled());
        assert!(!observer.is_orientation_locked_in_settings());
    }

    #[tokio::test]
    async fn test_absent_setting_defaults_to_disabled() {
        let store = Arc::new(FakeStore::with_value(None));
        let observer = LockSettingObserver::new(store);

        observer.start().unwrap();
        assert!(!observer.is_lock_enabled());
        // Inversion: auto-rotate off means locked in settings.
        assert!(observer.is_orientation_locked_in_settings());
    }

    #[tokio::test]
    async fn test_watch_registration_failure_surfaces() {
        let store = Arc::new(FakeStore {
            refuse_watch: true,
            ..FakeStore::default()
        });
        let observer = LockSettingObserver::new(store);

        let err = observer.start().unwrap_err();
        assert!(matches!(err, SettingsError::Registration(_)));
    }

    #[tokio::test]
    async fn test_change_notification_rereads_and_broadcasts() {
        let store = Arc::new(FakeStore::with_value(Some(false)));
        let observer = LockSettingObserver::new(Arc::clone(&store) as Arc<dyn SettingsStore>);
        let mut rx = observer.subscribe();

        observer.start().unwrap();
        assert!(!observer.is_lock_enabled());

        store.set_value(Some(true));
        store.trigger_change();
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert!(observer.is_lock_enabled());
        let change = rx.try_recv().unwrap();
        assert!(change.is_orientation_enabled);
    }

    #[tokio::test]
    async fn test_unchanged_value_still_broadcasts() {
        // No debounce here: the platform dedupes, we forward every
        // notification it delivers.
        let store = Arc::new(FakeStore::with_value(Some(true)));
        let observer = LockSettingObserver::new(Arc::clone(&store) as Arc<dyn SettingsStore>);
        let mut rx = observer.subscribe();

        observer.start().unwrap();
        store.trigger_change();
        store.trigger_change();
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_ok());
    }
}
