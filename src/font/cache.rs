//! A cache for font measurements, shared across threads.
//!
//! Measuring a string on a canvas is comparatively expensive and the same (font, string) pairs come up over and over
//! while laying out formulas. [`MetricsCache`] stores every measurement keyed by font, string and device,
//! and [`CachedMetrics`] puts the cache in front of any [`FontMetrics`] implementation.

use std::collections::HashMap;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::dimensions::{Unit, units::Px};
use crate::font::{FontDescriptor, FontMetrics};
use crate::geometry::BBox;

type TextKey = (FontDescriptor, String, Option<usize>);
type CharKey = (FontDescriptor, char, Option<usize>);
type FontKey = (FontDescriptor, Option<usize>);

/// Entries kept per kind of measurement by [`MetricsCache::new`]
pub const DEFAULT_CAPACITY : usize = 4096;

/// Measurements which only depend on the font
#[derive(Debug, Clone, Copy)]
struct FontLevelMetrics {
    ascent : Unit<Px>,
    descent : Unit<Px>,
    leading : Unit<Px>,
    line_spacing : Unit<Px>,
    strikeout_pos : Unit<Px>,
    line_width : Unit<Px>,
    x_height : Unit<Px>,
}

/// Number of lookups answered from the cache and of lookups that had to measure
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// lookups answered from the cache
    pub hits : u64,
    /// lookups forwarded to the underlying metrics
    pub misses : u64,
}

/// Thread-safe store of font measurements.
///
/// Each kind of measurement holds at most `capacity` entries: a map that is full is emptied before the next insertion,
/// so a long-lived cache such as [`MetricsCache::global`] stays bounded.
pub struct MetricsCache {
    capacity : usize,
    widths : RwLock<HashMap<TextKey, Unit<Px>>>,
    tight_boxes : RwLock<HashMap<TextKey, BBox<Px>>>,
    boxes : RwLock<HashMap<TextKey, BBox<Px>>>,
    bearings : RwLock<HashMap<CharKey, (Unit<Px>, Unit<Px>)>>,
    fonts : RwLock<HashMap<FontKey, FontLevelMetrics>>,
    hits : AtomicU64,
    misses : AtomicU64,
}

impl Default for MetricsCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MetricsCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricsCache")
            .field("entries", &self.len())
            .field("stats", &self.stats())
            .finish()
    }
}

impl MetricsCache {
    /// Creates an empty cache holding up to [`DEFAULT_CAPACITY`] entries per kind of measurement
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty cache holding up to `capacity` entries per kind of measurement
    pub fn with_capacity(capacity : usize) -> Self {
        Self {
            capacity : capacity.max(1),
            widths : RwLock::default(),
            tight_boxes : RwLock::default(),
            boxes : RwLock::default(),
            bearings : RwLock::default(),
            fonts : RwLock::default(),
            hits : AtomicU64::new(0),
            misses : AtomicU64::new(0),
        }
    }

    /// The process-wide cache, bounded by [`DEFAULT_CAPACITY`].
    /// Call [`MetricsCache::clear`] to drop its entries earlier, e.g. after unloading fonts.
    pub fn global() -> &'static MetricsCache {
        static GLOBAL : OnceLock<MetricsCache> = OnceLock::new();
        GLOBAL.get_or_init(MetricsCache::new)
    }

    /// Empties the cache and resets its statistics
    pub fn clear(&self) {
        self.widths.write().clear();
        self.tight_boxes.write().clear();
        self.boxes.write().clear();
        self.bearings.write().clear();
        self.fonts.write().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    /// Hits and misses since creation or the last [`MetricsCache::clear`]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits : self.hits.load(Ordering::Relaxed),
            misses : self.misses.load(Ordering::Relaxed),
        }
    }

    /// Number of stored (font, string) entries
    pub fn len(&self) -> usize {
        self.widths.read().len() + self.tight_boxes.read().len() + self.boxes.read().len()
        + self.bearings.read().len() + self.fonts.read().len()
    }

    /// Whether nothing is stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lookup<K, V, F>(&self, map : &RwLock<HashMap<K, V>>, key : K, compute : F) -> V
    where
        K : std::hash::Hash + Eq,
        V : Copy,
        F : FnOnce() -> V,
    {
        if let Some(value) = map.read().get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return *value;
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        let value = compute();
        let mut map = map.write();
        if map.len() >= self.capacity && !map.contains_key(&key) {
            debug!("metrics cache full ({} entries), dropping them", map.len());
            map.clear();
        }
        // Another thread may have measured the same key meanwhile, both values are equal.
        *map.entry(key).or_insert(value)
    }

    /// Wraps `metrics` so that its measurements go through this cache
    pub fn wrap<M : FontMetrics>(&self, metrics : M) -> CachedMetrics<'_, M> {
        CachedMetrics { inner : metrics, cache : self }
    }
}

/// A [`FontMetrics`] answering from a [`MetricsCache`] and measuring with `M` on a miss.
pub struct CachedMetrics<'c, M> {
    inner : M,
    cache : &'c MetricsCache,
}

impl<'c, M : FontMetrics> CachedMetrics<'c, M> {
    /// The wrapped metrics
    pub fn inner(&self) -> &M {
        &self.inner
    }

    fn text_key(&self, font : &FontDescriptor, text : &str) -> TextKey {
        (font.clone(), text.to_string(), self.inner.device_id())
    }

    fn font_metrics(&self, font : &FontDescriptor) -> FontLevelMetrics {
        let key = (font.clone(), self.inner.device_id());
        self.cache.lookup(&self.cache.fonts, key, || {
            trace!("measuring font {:?}", font);
            FontLevelMetrics {
                ascent : self.inner.ascent(font),
                descent : self.inner.descent(font),
                leading : self.inner.leading(font),
                line_spacing : self.inner.line_spacing(font),
                strikeout_pos : self.inner.strikeout_pos(font),
                line_width : self.inner.line_width(font),
                x_height : self.inner.x_height(font),
            }
        })
    }

    fn bearings(&self, font : &FontDescriptor, c : char) -> (Unit<Px>, Unit<Px>) {
        let key = (font.clone(), c, self.inner.device_id());
        self.cache.lookup(&self.cache.bearings, key, || {
            (self.inner.left_bearing(font, c), self.inner.right_bearing(font, c))
        })
    }
}

impl<'c, M : FontMetrics> FontMetrics for CachedMetrics<'c, M> {
    fn width(&self, font : &FontDescriptor, text : &str) -> Unit<Px> {
        self.cache.lookup(&self.cache.widths, self.text_key(font, text), || {
            trace!("measuring width of {:?}", text);
            self.inner.width(font, text)
        })
    }

    fn tight_bounding_box(&self, font : &FontDescriptor, text : &str) -> BBox<Px> {
        self.cache.lookup(&self.cache.tight_boxes, self.text_key(font, text), || {
            trace!("measuring tight box of {:?}", text);
            self.inner.tight_bounding_box(font, text)
        })
    }

    fn bounding_box(&self, font : &FontDescriptor, text : &str) -> BBox<Px> {
        self.cache.lookup(&self.cache.boxes, self.text_key(font, text), || self.inner.bounding_box(font, text))
    }

    fn left_bearing(&self, font : &FontDescriptor, c : char) -> Unit<Px> {
        self.bearings(font, c).0
    }

    fn right_bearing(&self, font : &FontDescriptor, c : char) -> Unit<Px> {
        self.bearings(font, c).1
    }

    fn strikeout_pos(&self, font : &FontDescriptor) -> Unit<Px> { self.font_metrics(font).strikeout_pos }
    fn line_width(&self, font : &FontDescriptor) -> Unit<Px> { self.font_metrics(font).line_width }
    fn ascent(&self, font : &FontDescriptor) -> Unit<Px> { self.font_metrics(font).ascent }
    fn descent(&self, font : &FontDescriptor) -> Unit<Px> { self.font_metrics(font).descent }
    fn leading(&self, font : &FontDescriptor) -> Unit<Px> { self.font_metrics(font).leading }
    fn line_spacing(&self, font : &FontDescriptor) -> Unit<Px> { self.font_metrics(font).line_spacing }
    fn x_height(&self, font : &FontDescriptor) -> Unit<Px> { self.font_metrics(font).x_height }

    fn device_id(&self) -> Option<usize> {
        self.inner.device_id()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::Environment;
    use crate::font::{FontSet, fixed::FixedMetrics};
    use std::sync::Arc;

    fn font() -> FontDescriptor {
        Environment::default().font(&FontSet::default())
    }

    #[test]
    fn second_lookup_is_a_hit() {
        let cache = MetricsCache::new();
        let metrics = cache.wrap(FixedMetrics::default());
        let font = font();

        let first = metrics.width(&font, "abc");
        assert_eq!(cache.stats(), CacheStats { hits : 0, misses : 1 });
        let second = metrics.width(&font, "abc");
        assert_eq!(first, second);
        assert_eq!(cache.stats(), CacheStats { hits : 1, misses : 1 });

        assert_eq!(metrics.ascent(&font), FixedMetrics::default().ascent(&font));
        assert_eq!(metrics.descent(&font), FixedMetrics::default().descent(&font));
        assert_eq!(cache.stats().misses, 2);

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.stats(), CacheStats::default());
    }

    #[test]
    fn full_maps_start_over() {
        let cache = MetricsCache::with_capacity(2);
        let metrics = cache.wrap(FixedMetrics::default());
        let font = font();
        for text in ["a", "b", "c", "d", "e"] {
            metrics.width(&font, text);
            assert!(cache.len() <= 2);
        }
        metrics.width(&font, "e");
        assert_eq!(cache.stats(), CacheStats { hits : 1, misses : 5 });
    }

    #[test]
    fn keys_distinguish_fonts() {
        let cache = MetricsCache::new();
        let metrics = cache.wrap(FixedMetrics::default());
        let small = font();
        let big = small.scaled(2.);
        assert!(metrics.width(&big, "x") > metrics.width(&small, "x"));
        assert_eq!(cache.stats().misses, 2);
    }

    #[test]
    fn shared_between_threads() {
        let cache = Arc::new(MetricsCache::new());
        let handles : Vec<_> = (0..4).map(|_| {
            let cache = Arc::clone(&cache);
            std::thread::spawn(move || {
                let metrics = cache.wrap(FixedMetrics::default());
                metrics.width(&font(), "shared").to_unitless()
            })
        }).collect();
        let widths : Vec<f64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]));
        let stats = cache.stats();
        assert_eq!(stats.hits + stats.misses, 4);
        assert_eq!(cache.len(), 1);
    }
}
