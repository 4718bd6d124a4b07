//! Development-mode hot reload
//!
//! Watches the content root and config file, and on every relevant change
//! runs a full fresh load. A successful load atomically replaces the
//! served collection; a failed one is reported and the previous collection
//! stays in place, so readers never see partial or broken content.

use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::sync::broadcast;

use crate::collection::Collection;
use crate::config;
use crate::error::{Result, ShelfError};
use crate::Shelf;

/// Handle to the collection currently being served
///
/// Readers take an `Arc` snapshot and keep it for as long as they like;
/// `replace` swaps the whole collection in one step underneath them.
pub struct SharedCollection {
    inner: RwLock<Arc<Collection>>,
}

impl SharedCollection {
    /// Wrap an initial collection
    pub fn new(collection: Collection) -> Self {
        Self {
            inner: RwLock::new(Arc::new(collection)),
        }
    }

    /// The current snapshot
    pub fn current(&self) -> Arc<Collection> {
        let guard = self.inner.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    /// Atomically swap in a freshly loaded collection
    pub fn replace(&self, collection: Collection) {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *guard = Arc::new(collection);
    }
}

/// Watch for file changes and reload the collection
///
/// Blocks the calling thread. `reload_tx` is notified after every
/// successful swap, for anything serving the shared collection.
pub fn run(
    shelf: &Shelf,
    shared: &SharedCollection,
    reload_tx: broadcast::Sender<()>,
) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();

    // Debounce to avoid several reloads for one save
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)
        .map_err(|e| ShelfError::Watch(e.to_string()))?;

    if shelf.content_dir.exists() {
        debouncer
            .watcher()
            .watch(&shelf.content_dir, RecursiveMode::Recursive)
            .map_err(|e| ShelfError::Watch(e.to_string()))?;
        tracing::debug!("Watching: {:?}", shelf.content_dir);
    }

    let config_path = shelf.base_dir.join(config::CONFIG_FILE);
    if config_path.exists() {
        debouncer
            .watcher()
            .watch(&config_path, RecursiveMode::NonRecursive)
            .map_err(|e| ShelfError::Watch(e.to_string()))?;
        tracing::debug!("Watching: {:?}", config_path);
    }

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                // Filter out irrelevant events (like .git, .DS_Store, etc.)
                let relevant_events: Vec<_> = events
                    .iter()
                    .filter(|e| {
                        let path_str = e.path.to_string_lossy();
                        !path_str.contains(".git")
                            && !path_str.contains(".DS_Store")
                            && !path_str.contains("node_modules")
                            && !path_str.ends_with('~')
                    })
                    .collect();

                if relevant_events.is_empty() {
                    continue;
                }

                println!();
                for event in &relevant_events {
                    println!("📝 File changed: {}", event.path.display());
                }

                println!("\n🔄 Reloading content...");
                reload(shelf, shared, &reload_tx);
            }
            Ok(Err(e)) => {
                tracing::error!("Watch error: {:?}", e);
            }
            Err(e) => {
                tracing::error!("Channel error: {:?}", e);
                break;
            }
        }
    }

    Ok(())
}

/// One reload pass: fresh load, swap on success, keep the old on failure
///
/// Config is re-read so edits to shelf.yml take effect; the declared types
/// are carried over from the running shelf.
fn reload(shelf: &Shelf, shared: &SharedCollection, reload_tx: &broadcast::Sender<()>) -> bool {
    let fresh = Shelf::new(&shelf.base_dir)
        .map(|s| s.with_types(shelf.types().to_vec()))
        .and_then(|s| s.load());

    match fresh {
        Ok(collection) => {
            println!("✅ Reloaded {} records", collection.len());
            shared.replace(collection);
            let _ = reload_tx.send(());
            true
        }
        Err(e) => {
            println!("❌ Reload failed, keeping previous content: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use tempfile::TempDir;

    use super::*;

    fn shelf_with_post(dir: &TempDir, body: &str) -> Shelf {
        let posts = dir.path().join("content/posts");
        fs::create_dir_all(&posts).unwrap();
        fs::write(posts.join("note.md"), body).unwrap();
        Shelf::new(dir.path()).unwrap()
    }

    fn valid_post(title: &str) -> String {
        format!(
            "---\ntitle: {}\ndescription: D\ndate: 2024-01-01\ncategory: tech\n---\nBody.\n",
            title
        )
    }

    #[test]
    fn test_replace_swaps_the_snapshot() {
        let dir = TempDir::new().unwrap();
        let shelf = shelf_with_post(&dir, &valid_post("One"));

        let shared = SharedCollection::new(shelf.load().unwrap());
        let before = shared.current();
        assert_eq!(before.posts().find_by_slug("note").unwrap().title, "One");

        fs::write(
            dir.path().join("content/posts/note.md"),
            valid_post("Two"),
        )
        .unwrap();
        let (tx, _rx) = broadcast::channel(4);
        assert!(reload(&shelf, &shared, &tx));

        assert_eq!(
            shared.current().posts().find_by_slug("note").unwrap().title,
            "Two"
        );
        // The old snapshot is untouched for anyone still holding it
        assert_eq!(before.posts().find_by_slug("note").unwrap().title, "One");
    }

    #[test]
    fn test_failed_reload_keeps_previous_collection() {
        let dir = TempDir::new().unwrap();
        let shelf = shelf_with_post(&dir, &valid_post("Good"));

        let shared = SharedCollection::new(shelf.load().unwrap());

        // Break the document: category outside the closed set
        fs::write(
            dir.path().join("content/posts/note.md"),
            "---\ntitle: Bad\ndescription: D\ndate: 2024-01-01\ncategory: nope\n---\nBody.\n",
        )
        .unwrap();
        let (tx, _rx) = broadcast::channel(4);
        assert!(!reload(&shelf, &shared, &tx));
        assert_eq!(
            shared.current().posts().find_by_slug("note").unwrap().title,
            "Good"
        );

        // Fix it again and the next pass picks it up
        fs::write(dir.path().join("content/posts/note.md"), valid_post("Fixed")).unwrap();
        assert!(reload(&shelf, &shared, &tx));
        assert_eq!(
            shared.current().posts().find_by_slug("note").unwrap().title,
            "Fixed"
        );
    }

    #[test]
    fn test_successful_reload_notifies_subscribers() {
        let dir = TempDir::new().unwrap();
        let shelf = shelf_with_post(&dir, &valid_post("One"));
        let shared = SharedCollection::new(shelf.load().unwrap());

        let (tx, mut rx) = broadcast::channel(4);
        assert!(reload(&shelf, &shared, &tx));
        assert!(rx.try_recv().is_ok());
    }
}
