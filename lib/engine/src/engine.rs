use crate::bindings::compute_binding_restricted_fragment;
use crate::cache::{BoundedCache, LruCache, NopCache};
use crate::config::FragmentEngineConfig;
use crate::error::{ConfigError, FragmentError};
use crate::fragment::Fragment;
use crate::request::FragmentRequest;
use crate::triple_pattern::compute_fragment;
use ldf_common::TripleSource;
use ldf_model::{BindingTable, TriplePattern};
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Computes fragments over a [TripleSource].
///
/// The engine holds no mutable state. It can be shared between threads and all methods can be
/// called concurrently.
#[derive(Debug)]
pub struct FragmentEngine<TSource: ?Sized> {
    config: FragmentEngineConfig,
    source: Arc<TSource>,
}

impl<TSource: TripleSource + ?Sized> FragmentEngine<TSource> {
    /// Creates a new [FragmentEngine] with the default configuration.
    pub fn new(source: Arc<TSource>) -> Self {
        Self {
            config: FragmentEngineConfig::default(),
            source,
        }
    }

    /// Creates a new [FragmentEngine] with the given `config`.
    pub fn try_new(
        source: Arc<TSource>,
        config: FragmentEngineConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, source })
    }

    pub fn config(&self) -> &FragmentEngineConfig {
        &self.config
    }

    pub fn source(&self) -> &Arc<TSource> {
        &self.source
    }

    /// Computes the fragment of `pattern` from `offset` with at most `limit` triples.
    pub fn compute_fragment(
        &self,
        pattern: &TriplePattern,
        offset: u64,
        limit: u64,
    ) -> Result<Fragment, FragmentError> {
        compute_fragment(self.source.as_ref(), pattern, offset, limit)
    }

    /// Computes the fragment of `pattern` restricted by `bindings` from `offset` with at most
    /// `limit` triples.
    pub fn compute_binding_restricted_fragment(
        &self,
        pattern: &TriplePattern,
        bindings: &BindingTable,
        offset: u64,
        limit: u64,
    ) -> Result<Fragment, FragmentError> {
        compute_binding_restricted_fragment(
            self.source.as_ref(),
            pattern,
            bindings,
            offset,
            limit,
            self.config.estimation_sample_size,
        )
    }

    /// Computes the fragment described by `request`.
    pub fn execute(&self, request: &FragmentRequest) -> Result<Fragment, FragmentError> {
        match request.bindings() {
            None => self.compute_fragment(request.pattern(), request.offset(), request.limit()),
            Some(bindings) => self.compute_binding_restricted_fragment(
                request.pattern(),
                bindings,
                request.offset(),
                request.limit(),
            ),
        }
    }
}

/// Identifies a computed fragment in a cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FragmentKey {
    pattern: TriplePattern,
    offset: u64,
    limit: u64,
    /// The fingerprint of the binding table, if any.
    bindings: Option<u64>,
}

impl FragmentKey {
    pub fn new(request: &FragmentRequest) -> Self {
        Self {
            pattern: request.pattern().clone(),
            offset: request.offset(),
            limit: request.limit(),
            bindings: request.bindings().map(BindingTable::fingerprint),
        }
    }
}

/// Counters of a [CachingFragmentEngine].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStatistics {
    /// The number of executed requests.
    pub requests: u64,
    /// The number of requests that were answered from the cache.
    pub hits: u64,
    /// The number of cached fragments.
    pub entries: usize,
}

/// A [FragmentEngine] that memoizes computed fragments.
///
/// Errors are never cached.
pub struct CachingFragmentEngine<TSource: ?Sized> {
    engine: FragmentEngine<TSource>,
    cache: Box<dyn BoundedCache<FragmentKey, Arc<Fragment>>>,
    requests: AtomicU64,
    hits: AtomicU64,
}

impl<TSource: TripleSource + ?Sized> CachingFragmentEngine<TSource> {
    /// Wraps `engine` with a cache that holds up to
    /// [cache_capacity](FragmentEngineConfig::cache_capacity) fragments.
    pub fn new(engine: FragmentEngine<TSource>) -> Self {
        let cache: Box<dyn BoundedCache<FragmentKey, Arc<Fragment>>> =
            match NonZeroUsize::new(engine.config().cache_capacity) {
                Some(capacity) => Box::new(LruCache::new(capacity)),
                None => Box::new(NopCache),
            };
        Self::with_cache(engine, cache)
    }

    pub fn with_cache(
        engine: FragmentEngine<TSource>,
        cache: Box<dyn BoundedCache<FragmentKey, Arc<Fragment>>>,
    ) -> Self {
        Self {
            engine,
            cache,
            requests: AtomicU64::new(0),
            hits: AtomicU64::new(0),
        }
    }

    pub fn engine(&self) -> &FragmentEngine<TSource> {
        &self.engine
    }

    /// Computes the fragment described by `request` or returns the cached one.
    pub fn execute(&self, request: &FragmentRequest) -> Result<Arc<Fragment>, FragmentError> {
        self.requests.fetch_add(1, Ordering::Relaxed);

        let key = FragmentKey::new(request);
        if let Some(fragment) = self.cache.find(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(pattern = %request.pattern(), "Answered fragment from cache");
            return Ok(fragment);
        }

        let fragment = Arc::new(self.engine.execute(request)?);
        self.cache.insert(key, Arc::clone(&fragment));
        Ok(fragment)
    }

    pub fn statistics(&self) -> CacheStatistics {
        CacheStatistics {
            requests: self.requests.load(Ordering::Relaxed),
            hits: self.hits.load(Ordering::Relaxed),
            entries: self.cache.len(),
        }
    }

    /// Removes all cached fragments and resets the counters.
    pub fn clear(&self) {
        self.cache.clear();
        self.requests.store(0, Ordering::Relaxed);
        self.hits.store(0, Ordering::Relaxed);
    }
}
