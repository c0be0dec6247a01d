//! Implementation of maps, backed by an unbalanced binary search tree
#![warn(missing_docs)]

extern crate alloc;

use alloc::vec::Vec;
use compact_str::CompactString;
use core::{borrow::Borrow, fmt, iter::FusedIterator};

use crate::{
    error::{ContainerError, Result},
    util::{BaseTree, TreeCursor, TreeIter},
};

//-----------------------------------------------------------------------------------------------//

/// A map between unique keys and values
///
/// Keys are kept in ascending order. The tree underneath can hold duplicates, but every insertion
/// through a `Map` checks for the key first, so each key maps to exactly one value.
#[derive(Clone)]
pub struct Map<K, V> {
    tree: BaseTree<K, V>,
}

impl<K, V> Map<K, V>
where
    K: Ord,
{
    /// Constructor
    pub fn new() -> Map<K, V> {
        Map {
            tree: BaseTree::new(),
        }
    }

    /// Constructor
    pub fn with_capacity(capacity: usize) -> Map<K, V> {
        Map {
            tree: BaseTree::with_capacity(capacity),
        }
    }

    /// Get the number of key/value pairs in the `Map`
    #[inline]
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Check if there are any key/value pairs in the `Map`
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Remove all key/value pairs from the `Map`
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Get a value by key, failing if the key is absent
    pub fn at<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree
            .get(key)
            .map(|(_, value)| value)
            .ok_or(ContainerError::KeyNotFound)
    }

    /// Get a mutable reference to a value by key, failing if the key is absent
    pub fn at_mut<Q>(&mut self, key: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let pos = self.tree.find(key)?;
        Ok(self.tree.value_mut(pos))
    }

    /// Get a value by key.
    ///
    /// If the key is not in the map then `None` is returned.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.get(key).map(|(_, value)| value)
    }

    /// Get a mutable reference by key.
    ///
    /// If the key is not in the map then `None` is returned - this function will not create a key
    /// if it does not exist. In this case use `get_or_insert_default` instead.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.at_mut(key).ok()
    }

    /// Get a mutable reference by key, inserting a default value first if the key is absent
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        let pos = match self.tree.find(&key) {
            Ok(pos) => pos,
            Err(_) => self.tree.insert(key, V::default()).0,
        };
        self.tree.value_mut(pos)
    }

    /// Insert a key and value.
    ///
    /// If the key is already present the stored value is kept, `value` is dropped and the flag is
    /// `false`. Either way a reference to the value now stored for the key is returned.
    pub fn insert(&mut self, key: K, value: V) -> (&mut V, bool) {
        let (pos, inserted) = match self.tree.find(&key) {
            Ok(pos) => (pos, false),
            Err(_) => (self.tree.insert(key, value).0, true),
        };
        (self.tree.value_mut(pos), inserted)
    }

    /// Insert a key/value pair, see `insert`
    pub fn insert_pair(&mut self, pair: (K, V)) -> (&mut V, bool) {
        self.insert(pair.0, pair.1)
    }

    /// Insert a key and value, replacing the stored value if the key is present.
    ///
    /// The flag is `true` if the key was newly inserted.
    pub fn insert_or_assign(&mut self, key: K, value: V) -> (&mut V, bool) {
        match self.tree.find(&key) {
            Ok(pos) => {
                let stored = self.tree.value_mut(pos);
                *stored = value;
                (stored, false)
            }
            Err(_) => {
                let (pos, _) = self.tree.insert(key, value);
                (self.tree.value_mut(pos), true)
            }
        }
    }

    /// Insert each pair in turn, reporting for each whether it was inserted
    pub fn insert_many<I>(&mut self, pairs: I) -> Vec<bool>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        pairs
            .into_iter()
            .map(|(key, value)| self.insert(key, value).1)
            .collect()
    }

    /// Remove a key and its value.
    ///
    /// Returns `false` if the key does not exist.
    pub fn erase<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.remove(key)
    }

    /// Check if a key is in the map
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.contains(key)
    }

    /// Insert copies of the pairs in `other` whose keys are not already present
    ///
    /// `other` is left untouched.
    pub fn merge(&mut self, other: &Map<K, V>)
    where
        K: Clone,
        V: Clone,
    {
        tracing::trace!(len = self.len(), other = other.len(), "merging maps");

        for (key, value) in other.iter() {
            if !self.tree.contains(key) {
                self.tree.insert(key.clone(), value.clone());
            }
        }
    }

    /// Exchange the contents of two maps
    pub fn swap(&mut self, other: &mut Map<K, V>) {
        self.tree.swap(&mut other.tree);
    }

    /// Get the first key in the map
    pub fn first(&self) -> Option<(&K, &V)> {
        self.tree.key_value_at(self.tree.first()).ok()
    }

    /// Get the last key in the map
    pub fn last(&self) -> Option<(&K, &V)> {
        self.tree.key_value_at(self.tree.last()).ok()
    }

    /// Cursor at the key, failing if the key is absent
    pub fn find<Q>(&self, key: &Q) -> Result<TreeCursor<'_, K, V>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        Ok(self.tree.cursor_at(self.tree.find(key)?))
    }

    /// Cursor at the smallest key
    pub fn cursor(&self) -> TreeCursor<'_, K, V> {
        self.tree.cursor()
    }

    /// Cursor at the end marker
    pub fn cursor_end(&self) -> TreeCursor<'_, K, V> {
        self.tree.cursor_end()
    }

    /// Iterate over the key/value pairs in the `Map`
    pub fn iter(&self) -> TreeIter<'_, K, V> {
        self.tree.iter()
    }
}

impl<K, V> Default for Map<K, V>
where
    K: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for Map<K, V>
where
    K: Ord + fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.tree, f)
    }
}

impl<'a, K, V> IntoIterator for &'a Map<K, V>
where
    K: Ord,
{
    type Item = (&'a K, &'a V);
    type IntoIter = TreeIter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> FromIterator<(K, V)> for Map<K, V>
where
    K: Ord,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut map = Self::with_capacity(iter.size_hint().0);
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl<K, V> Extend<(K, V)> for Map<K, V>
where
    K: Ord,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

//-----------------------------------------------------------------------------------------------//

/// A map between strings and values.
///
/// This is specialised version of `Map` that stores keys as a `CompactString`, so short keys
/// are held inline, and looks them up by `&str`.
#[derive(Clone)]
pub struct StringMap<V> {
    map: Map<CompactString, V>,
}

impl<V> StringMap<V> {
    /// Constructor
    pub fn new() -> StringMap<V> {
        StringMap { map: Map::new() }
    }

    /// Constructor
    pub fn with_capacity(capacity: usize) -> StringMap<V> {
        StringMap {
            map: Map::with_capacity(capacity),
        }
    }

    /// Get the number of string/value pairs in the `StringMap`
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if there are any string/value pairs in the `StringMap`
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Remove all string/value pairs from the `StringMap`
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Get a value by string, failing if the string is absent
    pub fn at(&self, key: &str) -> Result<&V> {
        self.map.at(key)
    }

    /// Get a mutable reference to a value by string, failing if the string is absent
    pub fn at_mut(&mut self, key: &str) -> Result<&mut V> {
        self.map.at_mut(key)
    }

    /// Get a value by string.
    ///
    /// If the string is not in the map then `None` is returned.
    pub fn get(&self, key: &str) -> Option<&V> {
        self.map.get(key)
    }

    /// Get a mutable reference by string.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.map.get_mut(key)
    }

    /// Get a mutable reference by string, inserting a default value if the string is absent
    pub fn get_or_insert_default(&mut self, key: &str) -> &mut V
    where
        V: Default,
    {
        self.map.get_or_insert_default(CompactString::from(key))
    }

    /// Insert a string and value, keeping the stored value if the string is already present
    pub fn insert(&mut self, key: &str, value: V) -> (&mut V, bool) {
        self.map.insert(CompactString::from(key), value)
    }

    /// Insert a string and value, replacing the stored value if the string is present
    pub fn insert_or_assign(&mut self, key: &str, value: V) -> (&mut V, bool) {
        self.map.insert_or_assign(CompactString::from(key), value)
    }

    /// Remove a string and its value, returning `false` if it does not exist
    pub fn erase(&mut self, key: &str) -> bool {
        self.map.erase(key)
    }

    /// Check if a string is in the map
    pub fn contains(&self, key: &str) -> bool {
        self.map.contains(key)
    }

    /// Insert copies of the pairs in `other` whose strings are not already present
    pub fn merge(&mut self, other: &StringMap<V>)
    where
        V: Clone,
    {
        self.map.merge(&other.map);
    }

    /// Exchange the contents of two maps
    pub fn swap(&mut self, other: &mut StringMap<V>) {
        self.map.swap(&mut other.map);
    }

    /// Get the first string in the map
    pub fn first(&self) -> Option<(&str, &V)> {
        self.map.first().map(|(key, value)| (key.as_str(), value))
    }

    /// Get the last string in the map
    pub fn last(&self) -> Option<(&str, &V)> {
        self.map.last().map(|(key, value)| (key.as_str(), value))
    }

    /// Iterate over the string/value pairs in the `StringMap`
    pub fn iter(&self) -> StringMapIterator<'_, V> {
        StringMapIterator {
            iter: self.map.iter(),
        }
    }
}

impl<V> Default for StringMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for StringMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, V> IntoIterator for &'a StringMap<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = StringMapIterator<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, V> FromIterator<(&'a str, V)> for StringMap<V> {
    fn from_iter<I: IntoIterator<Item = (&'a str, V)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut map = Self::with_capacity(iter.size_hint().0);
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

//-----------------------------------------------------------------------------------------------//

/// Iterator over a `StringMap`
pub struct StringMapIterator<'a, V> {
    iter: TreeIter<'a, CompactString, V>,
}

impl<'a, V> Iterator for StringMapIterator<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<(&'a str, &'a V)> {
        self.iter.next().map(|(key, value)| (key.as_str(), value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<V> DoubleEndedIterator for StringMapIterator<'_, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back().map(|(key, value)| (key.as_str(), value))
    }
}

impl<V> ExactSizeIterator for StringMapIterator<'_, V> {}

impl<V> FusedIterator for StringMapIterator<'_, V> {}

//-----------------------------------------------------------------------------------------------//

#[test]
// Keys come back in order
fn test_map_0() {
    use alloc::{
        string::{String, ToString},
        vec,
    };

    let mut map = Map::new();

    map.insert(5, "Five".to_string());
    map.insert(1, "One".to_string());
    map.insert(9, "Nine".to_string());

    assert_eq!(map.get(&5), Some(&"Five".to_string()));
    assert_eq!(map.get(&4), None);

    let v: Vec<(i32, String)> = map.iter().map(|(k, v)| (*k, v.clone())).collect();
    assert_eq!(
        v,
        vec![
            (1, "One".to_string()),
            (5, "Five".to_string()),
            (9, "Nine".to_string())
        ]
    );
}

#[test]
// Duplicate keys are refused and keep their value
fn test_map_1() {
    use alloc::vec;

    let mut map = Map::new();

    let (value, inserted) = map.insert(1, 'a');
    assert_eq!((*value, inserted), ('a', true));

    let (value, inserted) = map.insert(1, 'b');
    assert_eq!((*value, inserted), ('a', false));
    assert_eq!(map.len(), 1);

    assert_eq!(map.insert_many([(2, 'b'), (1, 'c'), (3, 'c')]), vec![true, false, true]);
    assert_eq!(map.len(), 3);

    let (value, inserted) = map.insert_or_assign(1, 'z');
    assert_eq!((*value, inserted), ('z', false));
    let (value, inserted) = map.insert_or_assign(4, 'd');
    assert_eq!((*value, inserted), ('d', true));
    assert_eq!(map.at(&1), Ok(&'z'));
}

#[test]
// Lookups that fail
fn test_map_2() {
    let mut map: Map<i32, i32> = Map::new();

    assert_eq!(map.at(&1), Err(ContainerError::KeyNotFound));
    assert_eq!(map.find(&1).err(), Some(ContainerError::KeyNotFound));
    assert!(!map.erase(&1));

    *map.get_or_insert_default(1) += 5;
    *map.get_or_insert_default(1) += 5;
    assert_eq!(map.at(&1), Ok(&10));

    *map.at_mut(&1).unwrap() = 3;
    assert_eq!(map.get(&1), Some(&3));
    assert!(map.at_mut(&2).is_err());

    assert!(map.erase(&1));
    assert!(map.is_empty());
    assert!(map.first().is_none());
}

#[test]
// Cursors walk the keys and stop at the end marker
fn test_map_3() {
    let map: Map<i32, char> = [(2, 'b'), (1, 'a'), (3, 'c')].into_iter().collect();

    let mut cursor = map.find(&2).unwrap();
    assert_eq!(cursor.get(), Ok((&2, &'b')));
    cursor.move_next().unwrap();
    assert_eq!(cursor.get(), Ok((&3, &'c')));
    cursor.move_next().unwrap();
    assert_eq!(cursor, map.cursor_end());
    assert!(cursor.move_next().is_err());

    assert_eq!(map.first(), Some((&1, &'a')));
    assert_eq!(map.last(), Some((&3, &'c')));
}

#[test]
// Copies and merges
fn test_map_4() {
    use alloc::vec;

    let mut map: Map<i32, i32> = [(1, 10), (2, 20)].into_iter().collect();
    let other: Map<i32, i32> = [(2, 200), (3, 300)].into_iter().collect();

    let copy = map.clone();
    map.merge(&other);

    let v: Vec<(i32, i32)> = map.iter().map(|(k, v)| (*k, *v)).collect();
    assert_eq!(v, vec![(1, 10), (2, 20), (3, 300)]);
    assert_eq!(other.len(), 2);
    assert_eq!(copy.len(), 2);

    let mut empty = Map::new();
    empty.swap(&mut map);
    assert!(map.is_empty());
    assert_eq!(empty.len(), 3);
}

#[test]
// Strings as keys
fn test_map_5() {
    use alloc::vec;

    let mut map = StringMap::new();

    map.insert("Five", 5);
    map.insert("One", 1);
    map.insert("Nine", 9);
    assert!(!map.insert("One", 11).1);

    assert_eq!(map.get("Five"), Some(&5));
    assert_eq!(map.at("Seven"), Err(ContainerError::KeyNotFound));
    *map.get_or_insert_default("Seven") += 7;
    assert_eq!(map.at("Seven"), Ok(&7));

    let v: Vec<(&str, i32)> = map.iter().map(|(k, v)| (k, *v)).collect();
    assert_eq!(v, vec![("Five", 5), ("Nine", 9), ("One", 1), ("Seven", 7)]);

    assert!(map.erase("Nine"));
    assert_eq!(map.first(), Some(("Five", &5)));
    assert_eq!(map.last(), Some(("Seven", &7)));
}

#[test]
// A stress test with random keys
fn test_map_6() {
    use alloc::string::ToString;
    use rand::prelude::*;

    const COUNT: usize = 100000;

    let mut rng = SmallRng::seed_from_u64(1234567890);

    let mut map = Map::new();
    for _ in 0..COUNT {
        let key = rng.random_range(0..usize::MAX);
        let value = key.to_string();
        map.insert(key, value);
    }

    assert_eq!(map.len(), COUNT);

    let mut rng = SmallRng::seed_from_u64(1234567890);

    for _ in 0..COUNT {
        let key = rng.random_range(0..usize::MAX);
        let value = key.to_string();
        assert_eq!(map.get(&key), Some(&value));
        assert!(map.erase(&key));
    }

    assert!(map.is_empty());
}

#[test]
// Erasing a key releases its value
fn test_map_7() {
    use alloc::rc::Rc;

    let value = Rc::new("value");
    let mut map = Map::new();
    map.insert(1, value.clone());
    assert!(map.erase(&1));
    assert_eq!(Rc::strong_count(&value), 1);

    for k in [5, 3, 8, 7, 9] {
        map.insert(k, value.clone());
    }
    assert_eq!(Rc::strong_count(&value), 6);
    assert!(map.erase(&5));
    assert_eq!(Rc::strong_count(&value), 5);
    assert_eq!(map.first().map(|(k, _)| *k), Some(3));
    assert_eq!(map.iter().map(|(k, _)| *k).collect::<Vec<_>>(), [3, 7, 8, 9]);
}
