/// A set of `i32` keys.
///
/// This is object safe, so callers that only care about the capability can hold a `&mut dyn Set`.
pub trait Set {
    /// The amount of keys in the set.
    fn size(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Inserts `key`. Inserting a key that is already present does nothing observable.
    fn insert(&mut self, key: i32);

    fn contains(&self, key: i32) -> bool;

    /// Removes `key`, if present. Removing an absent key is a no-op.
    fn remove(&mut self, key: i32);
}

#[cfg(test)]
mod tests {
    use super::*;

    // a dumb set, just to check the default `is_empty`
    struct VecSet(Vec<i32>);

    impl Set for VecSet {
        fn size(&self) -> usize { self.0.len() }

        fn insert(&mut self, key: i32) {
            if !self.contains(key) { self.0.push(key) }
        }

        fn contains(&self, key: i32) -> bool {
            self.0.contains(&key)
        }

        fn remove(&mut self, key: i32) {
            self.0.retain(|&k| k != key)
        }
    }

    #[test]
    fn is_empty_follows_size() {
        let mut s = VecSet(vec![]);
        let set: &mut dyn Set = &mut s;

        assert!(set.is_empty());
        set.insert(3);
        assert!(!set.is_empty());
        set.remove(3);
        assert!(set.is_empty());
    }
}
