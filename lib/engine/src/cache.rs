use parking_lot::Mutex;
use std::fmt::{Debug, Formatter};
use std::hash::Hash;
use std::num::NonZeroUsize;

/// A fixed-capacity key-value cache.
///
/// Implementations must be safe to use from multiple threads.
pub trait BoundedCache<TKey, TValue>: Send + Sync {
    /// Returns the value for `key`, if cached.
    fn find(&self, key: &TKey) -> Option<TValue>;

    /// Caches `value` for `key`. May evict other entries.
    fn insert(&self, key: TKey, value: TValue);

    /// Returns the number of cached entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the maximum number of entries.
    fn capacity(&self) -> usize;

    /// Removes all entries.
    fn clear(&self);
}

/// A [BoundedCache] that evicts the least recently used entry once its capacity is exceeded.
///
/// All operations, including lookups that update the recency order, are serialized by a single
/// lock.
pub struct LruCache<TKey, TValue> {
    inner: Mutex<lru::LruCache<TKey, TValue>>,
}

impl<TKey: Hash + Eq, TValue> LruCache<TKey, TValue> {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            inner: Mutex::new(lru::LruCache::new(capacity)),
        }
    }
}

impl<TKey, TValue> BoundedCache<TKey, TValue> for LruCache<TKey, TValue>
where
    TKey: Hash + Eq + Send,
    TValue: Clone + Send,
{
    fn find(&self, key: &TKey) -> Option<TValue> {
        self.inner.lock().get(key).cloned()
    }

    fn insert(&self, key: TKey, value: TValue) {
        self.inner.lock().put(key, value);
    }

    fn len(&self) -> usize {
        self.inner.lock().len()
    }

    fn capacity(&self) -> usize {
        self.inner.lock().cap().get()
    }

    fn clear(&self) {
        self.inner.lock().clear();
    }
}

impl<TKey: Hash + Eq, TValue> Debug for LruCache<TKey, TValue> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("LruCache")
            .field("len", &inner.len())
            .field("capacity", &inner.cap())
            .finish()
    }
}

/// A [BoundedCache] that never holds an entry.
#[derive(Debug, Default, Clone, Copy)]
pub struct NopCache;

impl<TKey, TValue> BoundedCache<TKey, TValue> for NopCache {
    fn find(&self, _key: &TKey) -> Option<TValue> {
        None
    }

    fn insert(&self, _key: TKey, _value: TValue) {}

    fn len(&self) -> usize {
        0
    }

    fn capacity(&self) -> usize {
        0
    }

    fn clear(&self) {}
}
