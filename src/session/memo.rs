use std::sync::Arc;

/// Single-slot cache for a derived value
///
/// Holds the last computed value with the key it was computed for. A lookup
/// with a different key recomputes, so the value is never older than its inputs.
#[derive(Debug)]
pub struct Memo<K, V> {
    slot: Option<(K, Arc<V>)>,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self { slot: None }
    }
}

impl<K: PartialEq, V> Memo<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached value for `key`, computing it first if needed
    pub fn get_or_compute<F>(&mut self, key: K, compute: F) -> Arc<V>
    where
        F: FnOnce() -> V,
    {
        if let Some((cached_key, value)) = &self.slot {
            if *cached_key == key {
                return Arc::clone(value);
            }
        }

        let value = Arc::new(compute());
        self.slot = Some((key, Arc::clone(&value)));
        value
    }
}
