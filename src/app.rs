use std::cell::Cell;
use std::time::Duration;

use crate::dispatch;
use crate::error::Result;
use crate::toolkit::{self, with_toolkit, Toolkit};
use crate::view::View;

pub struct AppConfig {
    /// Pause between two toolkit ticks in [`App::run`].
    pub tick_interval: Duration,
    /// Stop [`App::run`] after this many ticks.
    pub max_ticks: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(5),
            max_ticks: None,
        }
    }
}

/// A callback that gets called each tick before the toolkit runs.
/// Use this to process external events (like channel messages) and update views.
pub type UpdateCallback = Box<dyn FnMut()>;

thread_local! {
    static EXIT_REQUESTED: Cell<bool> = const { Cell::new(false) };
}

/// Ask the running [`App`] on this thread to stop after the current tick.
pub fn request_exit() {
    EXIT_REQUESTED.with(|flag| flag.set(true));
}

fn take_exit_request() -> bool {
    EXIT_REQUESTED.with(|flag| flag.replace(false))
}

/// Owner of the toolkit and of the root view for the current thread.
///
/// Creating an `App` installs the toolkit, so views can be built afterwards.
/// Dropping it tears down in a fixed order: the root view (releasing every
/// native object), then the callback registry, then the toolkit.
pub struct App {
    config: AppConfig,
    root: Option<Box<dyn View>>,
    on_update: Option<UpdateCallback>,
    ticks: u64,
}

impl App {
    /// Install `toolkit` and create the app that owns it.
    ///
    /// Panics if another toolkit is already installed on this thread; see
    /// [`try_new`](Self::try_new).
    pub fn new(toolkit: impl Toolkit + 'static) -> Self {
        Self::with_config(toolkit, AppConfig::default())
    }

    pub fn with_config(toolkit: impl Toolkit + 'static, config: AppConfig) -> Self {
        match Self::try_with_config(toolkit, config) {
            Ok(app) => app,
            Err(err) => panic!("failed to create app: {err}"),
        }
    }

    /// Like [`new`](Self::new), but fails with
    /// [`DuiError::AlreadyInstalled`](crate::DuiError::AlreadyInstalled)
    /// while another app owns this thread's toolkit.
    pub fn try_new(toolkit: impl Toolkit + 'static) -> Result<Self> {
        Self::try_with_config(toolkit, AppConfig::default())
    }

    pub fn try_with_config(toolkit: impl Toolkit + 'static, config: AppConfig) -> Result<Self> {
        toolkit::try_install(toolkit)?;
        Ok(Self {
            config,
            root: None,
            on_update: None,
            ticks: 0,
        })
    }

    pub fn tick_interval(mut self, interval: Duration) -> Self {
        self.config.tick_interval = interval;
        self
    }

    pub fn max_ticks(mut self, ticks: u64) -> Self {
        self.config.max_ticks = Some(ticks);
        self
    }

    /// Set a callback that gets called each tick before the toolkit runs.
    ///
    /// # Example
    /// ```ignore
    /// let (tx, rx) = std::sync::mpsc::channel();
    ///
    /// App::new(HeadlessToolkit::default())
    ///     .on_update(move || {
    ///         while let Ok(line) = rx.try_recv() {
    ///             log::info!("{line}");
    ///         }
    ///     })
    ///     .run();
    /// ```
    pub fn on_update<F: FnMut() + 'static>(mut self, callback: F) -> Self {
        self.on_update = Some(Box::new(callback));
        self
    }

    /// Make `root` the tree this app keeps alive, dropping any previous root.
    pub fn mount(&mut self, root: impl View) -> &mut Self {
        self.root = Some(Box::new(root));
        self
    }

    pub fn root(&self) -> Option<&(dyn View + 'static)> {
        self.root.as_deref()
    }

    pub fn root_mut(&mut self) -> Option<&mut (dyn View + 'static)> {
        self.root.as_deref_mut()
    }

    /// Drop the root view, releasing its native objects.
    pub fn unmount(&mut self) -> &mut Self {
        self.root = None;
        self
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Run one toolkit round and the callbacks it fired.
    ///
    /// Callbacks run after the toolkit call returns, so they may use the
    /// toolkit themselves. Returns the number of callbacks invoked.
    pub fn tick(&mut self) -> usize {
        self.ticks += 1;
        let fired = match with_toolkit(|tk| tk.timer_handler()) {
            Ok(fired) => fired,
            Err(err) => {
                log::warn!("Skipping tick {}: {}", self.ticks, err);
                return 0;
            }
        };
        dispatch::dispatch(&fired)
    }

    /// Drive the toolkit until [`request_exit`] is called or `max_ticks` is reached.
    pub fn run(mut self) {
        let _ = env_logger::try_init();
        // Requests made by callbacks of earlier manual ticks do not count
        take_exit_request();
        log::info!(
            "Starting loop: tick interval {:?}, max ticks {:?}",
            self.config.tick_interval,
            self.config.max_ticks
        );

        loop {
            // Call the update callback to process external events
            if let Some(ref mut callback) = self.on_update {
                callback();
            }

            self.tick();

            if take_exit_request() {
                log::info!("Exit requested after {} ticks", self.ticks);
                break;
            }
            if self.config.max_ticks.is_some_and(|max| self.ticks >= max) {
                log::info!("Reached tick limit {}", self.ticks);
                break;
            }

            std::thread::sleep(self.config.tick_interval);
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.root = None;
        self.on_update = None;
        dispatch::reset();
        toolkit::uninstall();
    }
}
