//! Collection store: the single source of truth for caught/shiny state.
//!
//! Exactly one backend is authoritative at a time: local storage while
//! signed out, the user's cloud document while signed in. The store never
//! performs I/O itself; every mutation returns the [`StoreEffect`]s the
//! bridge must carry out, and the in-memory collection is already updated
//! when they are returned.
//!
//! Remote snapshots replace the collection outright. There is no merge and
//! no timestamp comparison: whichever event is processed last wins.

use crate::tracker::collection::Collection;
use crate::tracker::ui::Toast;

/// Which backend currently owns the collection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Backend {
    #[default]
    Local,
    Remote {
        uid: String,
        /// Set once the first snapshot for this subscription was handled.
        observed: bool,
    },
}

/// Side effects requested by a store operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEffect {
    /// Write the serialized collection to local storage.
    SaveLocal { json: String },
    /// Merge-write `{collection}` into `users/{uid}`.
    SaveRemote { uid: String, json: String },
    /// Start the live subscription on `users/{uid}`.
    Subscribe { uid: String },
    /// Drop the live subscription.
    Unsubscribe,
    /// Show a transient notification.
    Notify(Toast),
}

/// What the live subscription reported for the user's document.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteSnapshot {
    Missing,
    /// Document exists. `None` when it has no usable `collection` field.
    Present(Option<Collection>),
}

/// Failures reported back by the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// A remote merge-write was rejected.
    RemoteSave,
    /// The live subscription errored.
    RemoteListen,
    /// Sign-in popup failed or was dismissed.
    Auth,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionStore {
    collection: Collection,
    backend: Backend,
}

impl CollectionStore {
    /// Start from the locally persisted string. Absent or unreadable data
    /// yields an empty collection.
    pub fn load(saved: Option<&str>) -> Self {
        Self {
            collection: decode_local(saved),
            backend: Backend::Local,
        }
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    pub fn signed_in_uid(&self) -> Option<&str> {
        match &self.backend {
            Backend::Remote { uid, .. } => Some(uid.as_str()),
            Backend::Local => None,
        }
    }

    /// Authentication changed. `local_saved` is the current local-storage
    /// value, read only when leaving a remote backend. A signed-out event
    /// while already local changes nothing.
    pub fn on_auth_change(&mut self, user: Option<&str>, local_saved: Option<&str>) -> Vec<StoreEffect> {
        let mut effects = Vec::new();
        match user {
            None => {
                if self.backend == Backend::Local {
                    log::debug!("signed-out event while already local; keeping {} entries", self.collection.len());
                    return effects;
                }
                effects.push(StoreEffect::Unsubscribe);
                self.backend = Backend::Local;
                self.collection = decode_local(local_saved);
                log::info!("signed out; {} local entries loaded", self.collection.len());
                effects.push(StoreEffect::Notify(Toast::info("Logged out - Switched to local data")));
            }
            Some(uid) => {
                if self.signed_in_uid() == Some(uid) {
                    return effects;
                }
                if matches!(self.backend, Backend::Remote { .. }) {
                    effects.push(StoreEffect::Unsubscribe);
                }
                log::info!("signed in as {}; subscribing to remote collection", uid);
                self.backend = Backend::Remote {
                    uid: uid.to_string(),
                    observed: false,
                };
                effects.push(StoreEffect::Subscribe { uid: uid.to_string() });
            }
        }
        effects
    }

    /// Handle a push from the live subscription.
    pub fn on_remote_snapshot(&mut self, uid: &str, snapshot: RemoteSnapshot) -> Vec<StoreEffect> {
        let first = match &mut self.backend {
            Backend::Remote { uid: current, observed } if current.as_str() == uid => {
                let first = !*observed;
                *observed = true;
                first
            }
            _ => {
                log::debug!("ignoring stale snapshot for {}", uid);
                return Vec::new();
            }
        };

        match snapshot {
            RemoteSnapshot::Present(Some(remote)) => {
                log::info!("remote collection applied ({} entries)", remote.len());
                self.collection = remote;
                Vec::new()
            }
            RemoteSnapshot::Present(None) => {
                log::warn!("remote document for {} has no usable collection", uid);
                Vec::new()
            }
            RemoteSnapshot::Missing if first && !self.collection.is_empty() => {
                log::info!("adopting {} local entries into new remote document", self.collection.len());
                vec![
                    StoreEffect::SaveRemote {
                        uid: uid.to_string(),
                        json: self.collection.to_json(),
                    },
                    StoreEffect::Notify(Toast::success("Local data synced to cloud!")),
                ]
            }
            RemoteSnapshot::Missing => Vec::new(),
        }
    }

    /// Replace the whole collection and persist it to the active backend.
    pub fn set(&mut self, next: Collection) -> Vec<StoreEffect> {
        self.collection = next;
        let json = self.collection.to_json();
        match &self.backend {
            Backend::Local => vec![StoreEffect::SaveLocal { json }],
            Backend::Remote { uid, .. } => vec![StoreEffect::SaveRemote { uid: uid.clone(), json }],
        }
    }

    /// Flip `caught` for one species. Returns the new value.
    pub fn toggle_caught(&mut self, id: u32) -> (bool, Vec<StoreEffect>) {
        let caught = !self.collection.is_caught(id);
        let next = self.collection.with_caught(id, caught);
        (caught, self.set(next))
    }

    /// Flip `shiny` for one species. Returns the new value.
    pub fn toggle_shiny(&mut self, id: u32) -> (bool, Vec<StoreEffect>) {
        let shiny = !self.collection.is_shiny(id);
        let next = self.collection.with_shiny(id, shiny);
        (shiny, self.set(next))
    }

    /// Set `caught` on every id with one persistence round-trip.
    pub fn bulk_set<I>(&mut self, ids: I, caught: bool) -> Vec<StoreEffect>
    where
        I: IntoIterator<Item = u32>,
    {
        let next = self.collection.with_caught_all(ids, caught);
        self.set(next)
    }

    /// Log a bridge-side failure and turn it into a notification. The
    /// in-memory collection is left as is.
    pub fn report_failure(&self, kind: FailureKind, detail: &str) -> Vec<StoreEffect> {
        let message = match kind {
            FailureKind::RemoteSave => "Error saving to cloud",
            FailureKind::RemoteListen => "Error syncing data",
            FailureKind::Auth => "Login failed",
        };
        log::error!("{}: {}", message, detail);
        vec![StoreEffect::Notify(Toast::info(message))]
    }
}

fn decode_local(saved: Option<&str>) -> Collection {
    match saved.map(str::trim).filter(|s| !s.is_empty() && *s != "null") {
        None => Collection::new(),
        Some(json) => Collection::from_json(json).unwrap_or_else(|e| {
            log::warn!("discarding unreadable local collection: {}", e);
            Collection::new()
        }),
    }
}
