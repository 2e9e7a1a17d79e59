use super::pipeline::{DataMerger, LoadOutcome};
use std::cell::{Cell, RefCell};
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::SystemTime;

/// Modification time and length of the watched source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceFingerprint {
    modified: Option<SystemTime>,
    len: u64,
}

impl SourceFingerprint {
    pub fn of(path: &Path) -> Option<Self> {
        let meta = fs::metadata(path).ok()?;
        Some(Self {
            modified: meta.modified().ok(),
            len: meta.len(),
        })
    }
}

/// Compute-once holder for the merged table.
///
/// Readers get an `Rc` to an immutable outcome. Invalidation drops the cached
/// value; the next read recomputes and stores a fresh one, so outstanding
/// handles keep seeing the old table.
pub struct MergedTableCache {
    compute: Box<dyn Fn() -> LoadOutcome>,
    watched: Option<PathBuf>,
    cached: RefCell<Option<Rc<LoadOutcome>>>,
    fingerprint: Cell<Option<SourceFingerprint>>,
    computations: Cell<usize>,
}

impl MergedTableCache {
    pub fn new(compute: impl Fn() -> LoadOutcome + 'static) -> Self {
        Self {
            compute: Box::new(compute),
            watched: None,
            cached: RefCell::new(None),
            fingerprint: Cell::new(None),
            computations: Cell::new(0),
        }
    }

    /// Cache over `merger.load_or_empty()`, watching the merger's source file.
    pub fn for_merger(merger: DataMerger) -> Self {
        let watched = merger.settings().path.clone();
        let mut cache = Self::new(move || merger.load_or_empty());
        cache.watched = Some(watched);
        cache
    }

    pub fn get_or_compute(&self) -> Rc<LoadOutcome> {
        if let Some(outcome) = self.cached.borrow().as_ref() {
            log::debug!("Merged table cache hit");
            return Rc::clone(outcome);
        }

        log::debug!("Merged table cache miss, computing");
        let outcome = Rc::new((self.compute)());
        self.computations.set(self.computations.get() + 1);
        self.fingerprint
            .set(self.watched.as_deref().and_then(SourceFingerprint::of));
        *self.cached.borrow_mut() = Some(Rc::clone(&outcome));
        outcome
    }

    pub fn invalidate(&self) {
        log::debug!("Merged table cache invalidated");
        self.cached.borrow_mut().take();
    }

    /// Drops the cached value if the watched file changed since it was
    /// computed. Returns whether an invalidation happened.
    pub fn refresh_if_stale(&self) -> bool {
        let Some(path) = self.watched.as_deref() else {
            return false;
        };
        if self.cached.borrow().is_none() {
            return false;
        }
        if SourceFingerprint::of(path) != self.fingerprint.get() {
            log::info!("Source {} changed, recomputing on next read", path.display());
            self.invalidate();
            return true;
        }
        false
    }

    pub fn is_cached(&self) -> bool {
        self.cached.borrow().is_some()
    }

    /// Number of times the pipeline actually ran.
    pub fn computations(&self) -> usize {
        self.computations.get()
    }
}
