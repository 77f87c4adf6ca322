//! Bounded LRU cache and function memoization.
//!
//! Entries live in a slotmap arena linked in recency order (most recent at the
//! head). A hash index maps keys to arena slots, so lookups, refreshes and
//! evictions are O(1).
//!
//! Caches are plain values. Nothing here is global; every engine or memoized
//! function owns its own instance.

use std::cell::RefCell;
use std::collections::HashMap;
use std::hash::Hash;
use std::marker::PhantomData;

use serde::Serialize;
use slotmap::{new_key_type, SlotMap};
use tracing::trace;

new_key_type! {
    /// Arena slot of one cache entry.
    struct EntryId;
}

struct Entry<K, V> {
    key: K,
    value: V,
    prev: Option<EntryId>,
    next: Option<EntryId>,
}

/// A bounded least-recently-used cache.
///
/// Inserting into a full cache evicts the entry that was touched least
/// recently. Both [`LruCache::get`] and [`LruCache::insert`] count as a touch;
/// [`LruCache::peek`] does not. A cache with capacity 0 stores nothing.
pub struct LruCache<K, V> {
    entries: SlotMap<EntryId, Entry<K, V>>,
    index: HashMap<K, EntryId>,
    head: Option<EntryId>,
    tail: Option<EntryId>,
    capacity: usize,
}

impl<K: Hash + Eq + Clone, V> LruCache<K, V> {
    /// An empty cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: SlotMap::with_key(),
            index: HashMap::new(),
            head: None,
            tail: None,
            capacity,
        }
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `true` if `key` is cached. Does not refresh recency.
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Look up `key` and mark it most recently used.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let Some(&id) = self.index.get(key) else {
            trace!("cache miss");
            return None;
        };
        trace!("cache hit");
        self.detach(id);
        self.push_front(id);
        self.entries.get(id).map(|entry| &entry.value)
    }

    /// Look up `key` without touching recency.
    pub fn peek(&self, key: &K) -> Option<&V> {
        let id = *self.index.get(key)?;
        self.entries.get(id).map(|entry| &entry.value)
    }

    /// Insert or replace `key`, marking it most recently used.
    ///
    /// Returns the entry evicted to make room, if any.
    pub fn insert(&mut self, key: K, value: V) -> Option<(K, V)> {
        if self.capacity == 0 {
            return None;
        }

        if let Some(&id) = self.index.get(&key) {
            if let Some(entry) = self.entries.get_mut(id) {
                entry.value = value;
            }
            self.detach(id);
            self.push_front(id);
            return None;
        }

        let evicted = if self.entries.len() >= self.capacity {
            self.pop_back()
        } else {
            None
        };
        if evicted.is_some() {
            trace!(capacity = self.capacity, "cache eviction");
        }

        let id = self.entries.insert(Entry {
            key: key.clone(),
            value,
            prev: None,
            next: None,
        });
        self.index.insert(key, id);
        self.push_front(id);
        evicted
    }

    /// Remove `key`, returning its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let id = self.index.remove(key)?;
        self.detach(id);
        self.entries.remove(id).map(|entry| entry.value)
    }

    /// Drop every entry. The capacity is unchanged.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
        self.head = None;
        self.tail = None;
    }

    /// Keys from most to least recently used.
    pub fn keys_by_recency(&self) -> Vec<&K> {
        let mut keys = Vec::with_capacity(self.entries.len());
        let mut cursor = self.head;
        while let Some(id) = cursor {
            let Some(entry) = self.entries.get(id) else {
                break;
            };
            keys.push(&entry.key);
            cursor = entry.next;
        }
        keys
    }

    // -- linked list ---------------------------------------------------------

    fn detach(&mut self, id: EntryId) {
        let Some(entry) = self.entries.get(id) else {
            return;
        };
        let (prev, next) = (entry.prev, entry.next);
        match prev.and_then(|p| self.entries.get_mut(p)) {
            Some(p) => p.next = next,
            None => self.head = next,
        }
        match next.and_then(|n| self.entries.get_mut(n)) {
            Some(n) => n.prev = prev,
            None => self.tail = prev,
        }
        if let Some(entry) = self.entries.get_mut(id) {
            entry.prev = None;
            entry.next = None;
        }
    }

    fn push_front(&mut self, id: EntryId) {
        let old_head = self.head;
        if let Some(entry) = self.entries.get_mut(id) {
            entry.prev = None;
            entry.next = old_head;
        }
        if let Some(h) = old_head.and_then(|h| self.entries.get_mut(h)) {
            h.prev = Some(id);
        }
        self.head = Some(id);
        if self.tail.is_none() {
            self.tail = Some(id);
        }
    }

    fn pop_back(&mut self) -> Option<(K, V)> {
        let id = self.tail?;
        self.detach(id);
        let entry = self.entries.remove(id)?;
        self.index.remove(&entry.key);
        Some((entry.key, entry.value))
    }
}

impl<K, V> std::fmt::Debug for LruCache<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LruCache")
            .field("len", &self.entries.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Memoization
// ---------------------------------------------------------------------------

/// A pure function wrapped with its own LRU cache.
///
/// Arguments are keyed by their JSON serialization, so structurally equal
/// arguments share a cache entry. Arguments that cannot be serialized bypass
/// the cache.
pub struct Memoized<A: ?Sized, R, F> {
    func: F,
    cache: RefCell<LruCache<String, R>>,
    _args: PhantomData<fn(&A)>,
}

/// Wrap `func` with an LRU cache of `size` entries.
pub fn memoize<A, R, F>(func: F, size: usize) -> Memoized<A, R, F>
where
    A: Serialize + ?Sized,
    R: Clone,
    F: Fn(&A) -> R,
{
    Memoized {
        func,
        cache: RefCell::new(LruCache::new(size)),
        _args: PhantomData,
    }
}

impl<A, R, F> Memoized<A, R, F>
where
    A: Serialize + ?Sized,
    R: Clone,
    F: Fn(&A) -> R,
{
    /// Call the function, serving repeated arguments from the cache.
    pub fn call(&self, args: &A) -> R {
        let Ok(key) = serde_json::to_string(args) else {
            return (self.func)(args);
        };
        if let Some(hit) = self.cache.borrow_mut().get(&key) {
            return hit.clone();
        }
        let result = (self.func)(args);
        self.cache.borrow_mut().insert(key, result.clone());
        result
    }

    /// Number of cached results.
    pub fn size(&self) -> usize {
        self.cache.borrow().len()
    }

    /// Drop every cached result.
    pub fn clear(&self) {
        self.cache.borrow_mut().clear();
    }

    /// `true` if a result for `args` is cached.
    pub fn is_cached(&self, args: &A) -> bool {
        serde_json::to_string(args)
            .map(|key| self.cache.borrow().contains(&key))
            .unwrap_or(false)
    }
}
