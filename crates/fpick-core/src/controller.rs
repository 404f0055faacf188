//! The picker state machine.
//!
//! [`PickerController`] owns the session: the displayed directory (or the
//! storage root list), its listing, the navigation stack, and the selection
//! settings. Hosts drive it with [`PickerController::select_directory`],
//! [`PickerController::select_file`] and [`PickerController::go_back`] (or
//! [`Command`]s), and render from [`PickerController::view`].
//!
//! Listings run without holding the session lock. Each navigation takes a
//! new generation number, and a listing that finishes after a newer
//! navigation started is dropped.

use std::path::PathBuf;
use std::sync::{Arc, Weak};

use tokio::sync::Mutex;

use crate::classify::Classifier;
use crate::config::Config;
use crate::error::PickerError;
use crate::event::{Command, Outcome};
use crate::fs::accessor::FileSystem;
use crate::fs::entry::Entry;
use crate::nav::lister::{DirectoryLister, Listing, SelectionMode};
use crate::nav::stack::NavigationStack;
use crate::storage::{StorageProvider, StorageRootResolver, StorageRoots};

/// Callbacks implemented by the host.
///
/// Invoked synchronously on the task that performed the transition, after
/// the session lock is released. The controller holds only a weak
/// reference; once the host drops its listener, notifications stop.
pub trait SelectionListener: Send + Sync {
    fn on_file_selected(&self, entry: &Entry);

    fn on_directory_selected(&self, entry: &Entry);

    /// A listing or storage problem the host may want to show.
    fn on_error(&self, _error: &PickerError) {}
}

/// Whether a navigation took effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Applied,
    /// A newer navigation started first; the result was discarded.
    Superseded,
}

/// Snapshot of the session for a renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerView {
    /// `None` while the storage root list is shown.
    pub current: Option<Entry>,
    /// The listing, in enumeration order.
    pub entries: Vec<Entry>,
    /// Visited directories, oldest first.
    pub breadcrumbs: Vec<Entry>,
    pub selection_mode: SelectionMode,
    pub show_hidden: bool,
    /// Message of the last listing or storage failure, cleared by the next
    /// successful navigation.
    pub last_error: Option<String>,
}

impl PickerView {
    pub fn is_root_list(&self) -> bool {
        self.current.is_none()
    }
}

struct PickerSession {
    current: Option<Entry>,
    entries: Vec<Entry>,
    stack: NavigationStack,
    selection_mode: SelectionMode,
    show_hidden: bool,
    last_error: Option<String>,
    generation: u64,
    /// Directory being entered whose listing has not landed yet.
    pending: Option<Entry>,
    listener: Option<Weak<dyn SelectionListener>>,
}

impl PickerSession {
    fn listener(&self) -> Option<Arc<dyn SelectionListener>> {
        self.listener.as_ref().and_then(Weak::upgrade)
    }
}

/// Orchestrates listing, navigation and listener notification.
///
/// Shareable across tasks (`Arc<PickerController>`); all session state is
/// behind one async mutex.
pub struct PickerController {
    lister: DirectoryLister,
    roots: StorageRoots,
    root_entries: Vec<Entry>,
    session: Mutex<PickerSession>,
}

impl PickerController {
    /// Resolves storage roots through `provider` and opens a session showing
    /// the root list.
    pub async fn open(
        fs: Arc<dyn FileSystem>,
        provider: Arc<dyn StorageProvider>,
        config: &Config,
    ) -> Self {
        let resolver = StorageRootResolver::new(provider, Arc::clone(&fs));
        let resolution = resolver.resolve().await;
        let controller = Self::with_roots(fs, resolution.roots, config);
        if let Some(warning) = resolution.warning {
            controller.session.lock().await.last_error = Some(warning.to_string());
        }
        controller
    }

    /// Opens a session over already resolved roots.
    pub fn with_roots(fs: Arc<dyn FileSystem>, roots: StorageRoots, config: &Config) -> Self {
        let classifier = Arc::new(Classifier::new(&roots, config.storage.root_detection));
        let root_entries = roots.to_entries(&classifier);
        let last_error = roots
            .is_empty()
            .then(|| PickerError::NoAccessibleStorage.to_string());

        Self {
            lister: DirectoryLister::new(fs, classifier),
            roots,
            session: Mutex::new(PickerSession {
                current: None,
                entries: root_entries.clone(),
                stack: NavigationStack::new(),
                selection_mode: config.picker.selection_mode,
                show_hidden: config.picker.show_hidden,
                last_error,
                generation: 0,
                pending: None,
                listener: None,
            }),
            root_entries,
        }
    }

    /// Registers `listener` without taking ownership of it.
    pub async fn set_listener<L: SelectionListener + 'static>(&self, listener: &Arc<L>) {
        let weak = Arc::downgrade(listener);
        let weak: Weak<dyn SelectionListener> = weak;
        self.session.lock().await.listener = Some(weak);
    }

    pub async fn clear_listener(&self) {
        self.session.lock().await.listener = None;
    }

    pub fn roots(&self) -> &StorageRoots {
        &self.roots
    }

    pub fn classifier(&self) -> &Arc<Classifier> {
        self.lister.classifier()
    }

    /// Builds an [`Entry`] for `path` with this session's classifier.
    pub async fn probe(&self, path: impl Into<PathBuf>) -> Entry {
        Entry::probe(
            path.into(),
            self.lister.fs().as_ref(),
            Arc::clone(self.lister.classifier()),
        )
        .await
    }

    /// Shows `dir`, or the storage root list for `None`.
    ///
    /// Entering a directory lists it, makes it current, pushes it on the
    /// navigation stack and notifies
    /// [`SelectionListener::on_directory_selected`]. A failed listing is
    /// shown as empty and also reported through
    /// [`SelectionListener::on_error`]. Returning to the root list leaves
    /// the stack alone.
    pub async fn select_directory(&self, dir: Option<Entry>) -> Navigation {
        match dir {
            Some(dir) => self.load(dir, true).await,
            None => self.show_roots().await,
        }
    }

    /// Reports `entry` as the chosen file. Navigation state is untouched.
    pub async fn select_file(&self, entry: &Entry) {
        tracing::debug!("file selected: {}", entry.path().display());
        let listener = self.session.lock().await.listener();
        if let Some(listener) = listener {
            listener.on_file_selected(entry);
        }
    }

    /// Descends into directories and selects files.
    pub async fn open_entry(&self, entry: &Entry) -> Outcome {
        if entry.is_dir() {
            self.select_directory(Some(entry.clone())).await.into()
        } else {
            self.select_file(entry).await;
            Outcome::FileSelected(entry.clone())
        }
    }

    /// Pops the navigation stack and shows the new top, or the root list
    /// when the stack empties.
    ///
    /// Returns `false` if the stack was already empty, meaning the host
    /// should close the picker.
    pub async fn go_back(&self) -> bool {
        let top = {
            let mut session = self.session.lock().await;
            match session.stack.pop() {
                Some((stack, top)) => {
                    session.stack = stack;
                    top
                }
                None => return false,
            }
        };
        self.select_directory(top).await;
        true
    }

    /// Changes the hidden-entry policy and re-lists the current directory
    /// in place.
    ///
    /// If a directory is still being entered, that navigation is restarted
    /// with the new policy instead, so it is not lost.
    pub async fn set_show_hidden(&self, show_hidden: bool) -> Navigation {
        let (target, enter) = {
            let mut session = self.session.lock().await;
            session.show_hidden = show_hidden;
            match session.pending.clone() {
                Some(pending) => (Some(pending), true),
                None => (session.current.clone(), false),
            }
        };
        match target {
            Some(dir) => self.load(dir, enter).await,
            None => Navigation::Applied,
        }
    }

    /// Changes the selection mode. Takes effect on the next navigation.
    pub async fn set_selection_mode(&self, mode: SelectionMode) {
        self.session.lock().await.selection_mode = mode;
    }

    /// Runs a UI command.
    pub async fn execute(&self, command: Command) -> Outcome {
        match command {
            Command::Activate(index) => {
                let entry = self.session.lock().await.entries.get(index).cloned();
                match entry {
                    Some(entry) => self.open_entry(&entry).await,
                    None => Outcome::Ignored,
                }
            }
            Command::Breadcrumb(index) => {
                let dir = self.session.lock().await.stack.entries().get(index).cloned();
                match dir {
                    Some(dir) => self.select_directory(Some(dir)).await.into(),
                    None => Outcome::Ignored,
                }
            }
            Command::Roots => self.select_directory(None).await.into(),
            Command::Back => {
                if self.go_back().await {
                    Outcome::Navigated
                } else {
                    Outcome::Exit
                }
            }
            Command::SetShowHidden(show_hidden) => {
                self.set_show_hidden(show_hidden).await;
                Outcome::Updated
            }
            Command::ToggleHidden => {
                let show_hidden = !self.session.lock().await.show_hidden;
                self.set_show_hidden(show_hidden).await;
                Outcome::Updated
            }
            Command::SetSelectionMode(mode) => {
                self.set_selection_mode(mode).await;
                Outcome::Updated
            }
        }
    }

    /// A snapshot for rendering.
    pub async fn view(&self) -> PickerView {
        let session = self.session.lock().await;
        PickerView {
            current: session.current.clone(),
            entries: session.entries.clone(),
            breadcrumbs: session.stack.entries().to_vec(),
            selection_mode: session.selection_mode,
            show_hidden: session.show_hidden,
            last_error: session.last_error.clone(),
        }
    }

    /// The displayed directory, `None` on the root list.
    pub async fn current_directory(&self) -> Option<Entry> {
        self.session.lock().await.current.clone()
    }

    pub async fn navigation_stack(&self) -> NavigationStack {
        self.session.lock().await.stack.clone()
    }

    /// Starts a navigation and returns its generation together with the
    /// settings the listing should use. `entering` is recorded as pending
    /// until its listing is applied.
    async fn begin(&self, entering: Option<&Entry>) -> (u64, SelectionMode, bool) {
        let mut session = self.session.lock().await;
        session.generation += 1;
        if let Some(dir) = entering {
            session.pending = Some(dir.clone());
        }
        (
            session.generation,
            session.selection_mode,
            session.show_hidden,
        )
    }

    /// Lists `dir` and, unless superseded, makes it current. `enter`
    /// distinguishes a navigation (stack push, listener notified) from an
    /// in-place refresh.
    async fn load(&self, dir: Entry, enter: bool) -> Navigation {
        let (generation, mode, show_hidden) = self.begin(enter.then_some(&dir)).await;
        let Listing { entries, error } = self.lister.list(&dir, mode, show_hidden).await;

        let listener = {
            let mut session = self.session.lock().await;
            if session.generation != generation {
                tracing::debug!("discarding stale listing of {}", dir.path().display());
                return Navigation::Superseded;
            }
            session.pending = None;
            session.current = Some(dir.clone());
            session.entries = entries;
            if enter {
                session.stack = session.stack.push(dir.clone());
            }
            session.last_error = error.as_ref().map(ToString::to_string);
            session.listener()
        };

        tracing::debug!(
            "showing {} ({})",
            dir.path().display(),
            if enter { "entered" } else { "refreshed" }
        );
        if let Some(listener) = listener {
            if let Some(error) = &error {
                listener.on_error(error);
            }
            if enter {
                listener.on_directory_selected(&dir);
            }
        }
        Navigation::Applied
    }

    async fn show_roots(&self) -> Navigation {
        let listener = {
            let mut session = self.session.lock().await;
            session.generation += 1;
            session.pending = None;
            session.current = None;
            session.entries = self.root_entries.clone();
            session.last_error = self
                .roots
                .is_empty()
                .then(|| PickerError::NoAccessibleStorage.to_string());
            session.listener()
        };

        tracing::debug!("showing storage root list");
        if self.roots.is_empty() {
            if let Some(listener) = listener {
                listener.on_error(&PickerError::NoAccessibleStorage);
            }
        }
        Navigation::Applied
    }
}

impl From<Navigation> for Outcome {
    fn from(navigation: Navigation) -> Self {
        match navigation {
            Navigation::Applied => Outcome::Navigated,
            Navigation::Superseded => Outcome::Superseded,
        }
    }
}
