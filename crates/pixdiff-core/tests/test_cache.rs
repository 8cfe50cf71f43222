use std::sync::Arc;

use pixdiff_core::cache::ImageCache;
use pixdiff_core::raster::RasterImage;

fn img(w: u32, h: u32) -> RasterImage {
    RasterImage::from_rgba_bytes(w, h, vec![0; w as usize * h as usize * 4]).unwrap()
}

#[test]
fn get_returns_the_inserted_handle() {
    let mut cache = ImageCache::new();
    let inserted = cache.insert("a.png", img(2, 2));
    let fetched = cache.get("a.png").unwrap();
    assert!(Arc::ptr_eq(&inserted, &fetched));
    assert!(cache.get("missing.png").is_none());
}

#[test]
fn capacity_evicts_least_recently_used() {
    let mut cache = ImageCache::with_capacity(2);
    cache.insert("a", img(1, 1));
    cache.insert("b", img(1, 1));

    // Touch "a" so "b" becomes the eviction candidate.
    cache.get("a");
    cache.insert("c", img(1, 1));

    assert_eq!(cache.len(), 2);
    assert!(cache.contains("a"));
    assert!(!cache.contains("b"));
    assert!(cache.contains("c"));
}

#[test]
fn get_or_load_invokes_the_loader_once() {
    let mut cache = ImageCache::new();
    let mut loads = 0;
    for _ in 0..3 {
        cache
            .get_or_load("x", || {
                loads += 1;
                Ok(img(1, 1))
            })
            .unwrap();
    }
    assert_eq!(loads, 1);
}

#[test]
fn invalidate_and_clear_remove_entries() {
    let mut cache = ImageCache::new();
    cache.insert("a", img(1, 1));
    cache.insert("b", img(1, 1));

    cache.invalidate("a");
    assert!(!cache.contains("a"));
    assert!(cache.contains("b"));

    cache.clear();
    assert!(cache.is_empty());
}
