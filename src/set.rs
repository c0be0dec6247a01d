//! Implementation of sets and multisets, backed by an unbalanced binary search tree
#![warn(missing_docs)]

extern crate alloc;

use alloc::vec::Vec;
use compact_str::CompactString;
use core::{borrow::Borrow, fmt, iter::FusedIterator};

use crate::{
    error::Result,
    util::{BaseTree, TreeCursor, TreeIter, TreePos},
};

//-----------------------------------------------------------------------------------------------//

/// A set of unique keys, kept in ascending order
#[derive(Clone)]
pub struct Set<K> {
    tree: BaseTree<K, ()>,
}

impl<K> Set<K>
where
    K: Ord,
{
    /// Constructor
    pub fn new() -> Set<K> {
        Set {
            tree: BaseTree::new(),
        }
    }

    /// Constructor
    pub fn with_capacity(capacity: usize) -> Set<K> {
        Set {
            tree: BaseTree::with_capacity(capacity),
        }
    }

    /// Get the number of keys in the `Set`
    #[inline]
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Check if there are any keys in the `Set`
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Remove all keys from the `Set`
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Insert a key.
    ///
    /// If an equal key is already present, `key` is dropped and the flag is `false`. Either way a
    /// reference to the stored key is returned.
    pub fn insert(&mut self, key: K) -> (&K, bool) {
        let (pos, inserted) = match self.tree.find(&key) {
            Ok(pos) => (pos, false),
            Err(_) => (self.tree.insert(key, ()).0, true),
        };
        (self.tree.key(pos), inserted)
    }

    /// Insert each key in turn, reporting for each whether it was inserted
    pub fn insert_many<I>(&mut self, keys: I) -> Vec<bool>
    where
        I: IntoIterator<Item = K>,
    {
        keys.into_iter().map(|key| self.insert(key).1).collect()
    }

    /// Remove a key, returning `false` if it does not exist
    pub fn erase<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.remove(key)
    }

    /// Check if a key is in the set
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.contains(key)
    }

    /// Get the stored key equal to `key`
    pub fn get<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.get(key).map(|(key, _)| key)
    }

    /// Cursor at a key, failing if the key is absent
    pub fn find<Q>(&self, key: &Q) -> Result<SetCursor<'_, K>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let pos = self.tree.find(key)?;
        Ok(SetCursor(self.tree.cursor_at(pos)))
    }

    /// Insert copies of the keys in `other` that are not already present
    ///
    /// `other` is left untouched.
    pub fn merge(&mut self, other: &Set<K>)
    where
        K: Clone,
    {
        tracing::trace!(len = self.len(), other = other.len(), "merging sets");

        for key in other.iter() {
            if !self.tree.contains(key) {
                self.tree.insert(key.clone(), ());
            }
        }
    }

    /// Exchange the contents of two sets
    pub fn swap(&mut self, other: &mut Set<K>) {
        self.tree.swap(&mut other.tree);
    }

    /// Get the first key in the set
    pub fn first(&self) -> Option<&K> {
        self.tree.key_value_at(self.tree.first()).ok().map(|(key, _)| key)
    }

    /// Get the last key in the set
    pub fn last(&self) -> Option<&K> {
        self.tree.key_value_at(self.tree.last()).ok().map(|(key, _)| key)
    }

    /// Cursor at the smallest key
    pub fn cursor(&self) -> SetCursor<'_, K> {
        SetCursor(self.tree.cursor())
    }

    /// Cursor at the end marker
    pub fn cursor_end(&self) -> SetCursor<'_, K> {
        SetCursor(self.tree.cursor_end())
    }

    /// Iterate over the keys in the `Set`
    pub fn iter(&self) -> SetIterator<'_, K> {
        SetIterator {
            iter: self.tree.iter(),
        }
    }
}

impl<K> Default for Set<K>
where
    K: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> fmt::Debug for Set<K>
where
    K: Ord + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<'a, K> IntoIterator for &'a Set<K>
where
    K: Ord,
{
    type Item = &'a K;
    type IntoIter = SetIterator<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K> FromIterator<K> for Set<K>
where
    K: Ord,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut set = Self::with_capacity(iter.size_hint().0);
        for key in iter {
            set.insert(key);
        }
        set
    }
}

impl<K> Extend<K> for Set<K>
where
    K: Ord,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

//-----------------------------------------------------------------------------------------------//

/// A cursor over the keys of a `Set`
///
/// Reading or moving a cursor at the end marker fails.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SetCursor<'a, K>(TreeCursor<'a, K, ()>);

impl<'a, K> SetCursor<'a, K>
where
    K: Ord,
{
    /// Get the key under the cursor
    pub fn get(&self) -> Result<&'a K> {
        self.0.get().map(|(key, _)| key)
    }

    /// Move to the next larger key
    pub fn move_next(&mut self) -> Result<()> {
        self.0.move_next()
    }

    /// Move to the next smaller key
    pub fn move_prev(&mut self) -> Result<()> {
        self.0.move_prev()
    }

    /// Check if the cursor is at the end marker
    pub fn is_end(&self) -> bool {
        self.0.is_end()
    }
}

/// Iterator over a `Set`
pub struct SetIterator<'a, K> {
    iter: TreeIter<'a, K, ()>,
}

impl<'a, K> Iterator for SetIterator<'a, K>
where
    K: Ord,
{
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.iter.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<K> DoubleEndedIterator for SetIterator<'_, K>
where
    K: Ord,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back().map(|(key, _)| key)
    }
}

impl<K> ExactSizeIterator for SetIterator<'_, K> where K: Ord {}

impl<K> FusedIterator for SetIterator<'_, K> where K: Ord {}

//-----------------------------------------------------------------------------------------------//

/// A sorted collection of keys that allows duplicates
///
/// Equal keys share one node of the tree, which records how many times the key was inserted.
/// The first inserted copy is the one stored. `len` counts every copy.
#[derive(Clone)]
pub struct Multiset<K> {
    tree: BaseTree<K, ()>,
}

impl<K> Multiset<K>
where
    K: Ord,
{
    /// Constructor
    pub fn new() -> Multiset<K> {
        Multiset {
            tree: BaseTree::new(),
        }
    }

    /// Constructor
    pub fn with_capacity(capacity: usize) -> Multiset<K> {
        Multiset {
            tree: BaseTree::with_capacity(capacity),
        }
    }

    /// Get the number of keys in the `Multiset`, counting duplicates
    #[inline]
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Check if there are any keys in the `Multiset`
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Remove all keys from the `Multiset`
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Insert a key. This always succeeds, so the flag is always `true`.
    pub fn insert(&mut self, key: K) -> (&K, bool) {
        let (pos, _) = self.tree.insert(key, ());
        (self.tree.key(pos), true)
    }

    /// Insert each key in turn
    pub fn insert_many<I>(&mut self, keys: I) -> Vec<bool>
    where
        I: IntoIterator<Item = K>,
    {
        keys.into_iter().map(|key| self.insert(key).1).collect()
    }

    /// Remove one copy of a key, returning `false` if it does not exist
    pub fn erase<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.remove(key)
    }

    /// Check if a key is in the multiset
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.contains(key)
    }

    /// Get the number of copies of a key, zero if absent
    pub fn count<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.count(key)
    }

    /// Cursor at the first copy of a key, failing if the key is absent
    pub fn find<Q>(&self, key: &Q) -> Result<MultisetCursor<'_, K>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let pos = self.tree.find(key)?;
        Ok(self.cursor_at(pos))
    }

    /// Cursor at the first copy of the first key not less than `key`
    pub fn lower_bound<Q>(&self, key: &Q) -> MultisetCursor<'_, K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.cursor_at(self.tree.lower_bound(key))
    }

    /// Cursor at the first copy of the first key greater than `key`
    pub fn upper_bound<Q>(&self, key: &Q) -> MultisetCursor<'_, K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.cursor_at(self.tree.upper_bound(key))
    }

    /// The half open range of cursors covering every copy of `key`
    ///
    /// The range is empty, with both ends at the same position, if the key is absent.
    pub fn equal_range<Q>(&self, key: &Q) -> (MultisetCursor<'_, K>, MultisetCursor<'_, K>)
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        (self.lower_bound(key), self.upper_bound(key))
    }

    /// Insert every copy of every key in `other`
    ///
    /// `other` is left untouched.
    pub fn merge(&mut self, other: &Multiset<K>)
    where
        K: Clone,
    {
        self.tree.merge(&other.tree);
    }

    /// Exchange the contents of two multisets
    pub fn swap(&mut self, other: &mut Multiset<K>) {
        self.tree.swap(&mut other.tree);
    }

    /// Cursor at the first copy of the smallest key
    pub fn cursor(&self) -> MultisetCursor<'_, K> {
        self.cursor_at(self.tree.first())
    }

    /// Cursor at the end marker
    pub fn cursor_end(&self) -> MultisetCursor<'_, K> {
        self.cursor_at(TreePos::END)
    }

    /// Iterate over the keys in the `Multiset`, visiting each copy
    pub fn iter(&self) -> MultisetIterator<'_, K> {
        MultisetIterator {
            cursor: self.cursor(),
            count: self.len(),
        }
    }

    fn cursor_at(&self, pos: TreePos) -> MultisetCursor<'_, K> {
        MultisetCursor {
            cursor: self.tree.cursor_at(pos),
            index: 1,
        }
    }
}

impl<K> Default for Multiset<K>
where
    K: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> fmt::Debug for Multiset<K>
where
    K: Ord + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, K> IntoIterator for &'a Multiset<K>
where
    K: Ord,
{
    type Item = &'a K;
    type IntoIter = MultisetIterator<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K> FromIterator<K> for Multiset<K>
where
    K: Ord,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut set = Self::with_capacity(iter.size_hint().0);
        for key in iter {
            set.insert(key);
        }
        set
    }
}

impl<K> Extend<K> for Multiset<K>
where
    K: Ord,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

//-----------------------------------------------------------------------------------------------//

/// A cursor over the keys of a `Multiset`, stopping once at each copy
///
/// The position is the node plus the index of the copy within it, counting from 1. Two cursors
/// are equal only if both match. The end marker always has index 1.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct MultisetCursor<'a, K> {
    cursor: TreeCursor<'a, K, ()>,
    index: usize,
}

impl<'a, K> MultisetCursor<'a, K>
where
    K: Ord,
{
    /// Get the key under the cursor
    pub fn get(&self) -> Result<&'a K> {
        self.cursor.get().map(|(key, _)| key)
    }

    /// Get the index of the copy under the cursor, counting from 1
    pub fn index(&self) -> usize {
        self.index
    }

    /// Move to the next copy, or the first copy of the next larger key
    pub fn move_next(&mut self) -> Result<()> {
        if self.cursor.is_end() {
            return self.cursor.move_next();
        }

        if self.index < self.cursor.count() {
            self.index += 1;
        } else {
            self.cursor.move_next()?;
            self.index = 1;
        }
        Ok(())
    }

    /// Move to the previous copy, or the last copy of the next smaller key
    pub fn move_prev(&mut self) -> Result<()> {
        if self.cursor.is_end() {
            return self.cursor.move_prev();
        }

        if self.index > 1 {
            self.index -= 1;
        } else {
            self.cursor.move_prev()?;
            self.index = self.cursor.count().max(1);
        }
        Ok(())
    }

    /// Check if the cursor is at the end marker
    pub fn is_end(&self) -> bool {
        self.cursor.is_end()
    }
}

/// Iterator over a `Multiset`
pub struct MultisetIterator<'a, K> {
    cursor: MultisetCursor<'a, K>,
    count: usize,
}

impl<'a, K> Iterator for MultisetIterator<'a, K>
where
    K: Ord,
{
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        let key = self.cursor.get().ok()?;
        self.cursor.move_next().ok()?;
        self.count -= 1;
        Some(key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.count, Some(self.count))
    }
}

impl<K> ExactSizeIterator for MultisetIterator<'_, K> where K: Ord {}

impl<K> FusedIterator for MultisetIterator<'_, K> where K: Ord {}

//-----------------------------------------------------------------------------------------------//

/// A set of strings.
///
/// This is specialised version of `Set` that stores keys as a `CompactString` and looks them up
/// by `&str`.
#[derive(Clone, Default)]
pub struct StringSet {
    set: Set<CompactString>,
}

impl StringSet {
    /// Constructor
    pub fn new() -> StringSet {
        StringSet { set: Set::new() }
    }

    /// Constructor
    pub fn with_capacity(capacity: usize) -> StringSet {
        StringSet {
            set: Set::with_capacity(capacity),
        }
    }

    /// Get the number of strings in the `StringSet`
    #[inline]
    pub fn len(&self) -> usize {
        self.set.len()
    }

    /// Check if there are any strings in the `StringSet`
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Remove all strings from the `StringSet`
    pub fn clear(&mut self) {
        self.set.clear();
    }

    /// Insert a string, returning the stored copy and whether it was newly inserted
    pub fn insert(&mut self, key: &str) -> (&str, bool) {
        let (key, inserted) = self.set.insert(CompactString::from(key));
        (key.as_str(), inserted)
    }

    /// Remove a string, returning `false` if it does not exist
    pub fn erase(&mut self, key: &str) -> bool {
        self.set.erase(key)
    }

    /// Check if a string is in the set
    pub fn contains(&self, key: &str) -> bool {
        self.set.contains(key)
    }

    /// Insert copies of the strings in `other` that are not already present
    pub fn merge(&mut self, other: &StringSet) {
        self.set.merge(&other.set);
    }

    /// Exchange the contents of two sets
    pub fn swap(&mut self, other: &mut StringSet) {
        self.set.swap(&mut other.set);
    }

    /// Get the first string in the set
    pub fn first(&self) -> Option<&str> {
        self.set.first().map(CompactString::as_str)
    }

    /// Get the last string in the set
    pub fn last(&self) -> Option<&str> {
        self.set.last().map(CompactString::as_str)
    }

    /// Iterate over the strings in the `StringSet`
    pub fn iter(&self) -> StringSetIterator<'_> {
        StringSetIterator {
            iter: self.set.iter(),
        }
    }
}

impl fmt::Debug for StringSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a StringSet {
    type Item = &'a str;
    type IntoIter = StringSetIterator<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> FromIterator<&'a str> for StringSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut set = Self::with_capacity(iter.size_hint().0);
        for key in iter {
            set.insert(key);
        }
        set
    }
}

/// Iterator over a `StringSet`
pub struct StringSetIterator<'a> {
    iter: SetIterator<'a, CompactString>,
}

impl<'a> Iterator for StringSetIterator<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        self.iter.next().map(CompactString::as_str)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl DoubleEndedIterator for StringSetIterator<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back().map(CompactString::as_str)
    }
}

impl ExactSizeIterator for StringSetIterator<'_> {}

impl FusedIterator for StringSetIterator<'_> {}

//-----------------------------------------------------------------------------------------------//

#[test]
// Unique keys in order
fn test_set_0() {
    use alloc::vec;

    let mut set = Set::new();

    assert_eq!(set.insert(5), (&5, true));
    assert_eq!(set.insert(1), (&1, true));
    assert_eq!(set.insert(5), (&5, false));
    assert_eq!(set.insert_many([9, 1, 3]), vec![true, false, true]);
    assert_eq!(set.len(), 4);

    let v: Vec<i32> = set.iter().copied().collect();
    assert_eq!(v, vec![1, 3, 5, 9]);

    let v: Vec<i32> = set.iter().rev().copied().collect();
    assert_eq!(v, vec![9, 5, 3, 1]);

    assert!(set.erase(&3));
    assert!(!set.erase(&3));
    assert!(!set.contains(&3));
    assert_eq!(set.first(), Some(&1));
    assert_eq!(set.last(), Some(&9));
}

#[test]
// Finding keys
fn test_set_1() {
    use crate::error::ContainerError;

    let set: Set<i32> = [4, 2, 6].into_iter().collect();

    let mut cursor = set.find(&4).unwrap();
    assert_eq!(cursor.get(), Ok(&4));
    cursor.move_prev().unwrap();
    assert_eq!(cursor.get(), Ok(&2));
    cursor.move_prev().unwrap();
    assert!(cursor.is_end());
    assert_eq!(cursor, set.cursor_end());

    assert_eq!(set.find(&5).err(), Some(ContainerError::KeyNotFound));

    let empty: Set<i32> = Set::new();
    assert_eq!(empty.find(&5).err(), Some(ContainerError::KeyNotFound));
    assert!(empty.cursor().is_end());
}

#[test]
// Merge, copy and move
fn test_set_2() {
    use alloc::vec;

    let mut set: Set<i32> = [1, 2, 3].into_iter().collect();
    let other: Set<i32> = [3, 4].into_iter().collect();

    let copy = set.clone();
    set.merge(&other);
    assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    assert_eq!(other.len(), 2);
    assert_eq!(copy.len(), 3);

    let moved = core::mem::take(&mut set);
    assert_eq!(moved.len(), 4);
    assert!(set.is_empty());
    assert!(set.first().is_none());
}

#[test]
// Duplicates are counted
fn test_set_3() {
    use alloc::vec;

    let mut set = Multiset::new();
    for key in [1, 1, 2, 3, 3, 3] {
        assert!(set.insert(key).1);
    }

    assert_eq!(set.len(), 6);
    assert_eq!(set.count(&1), 2);
    assert_eq!(set.count(&2), 1);
    assert_eq!(set.count(&3), 3);
    assert_eq!(set.count(&4), 0);

    let v: Vec<i32> = set.iter().copied().collect();
    assert_eq!(v, vec![1, 1, 2, 3, 3, 3]);

    // Each copy is a distinct position
    let mut cursor = set.find(&3).unwrap();
    let first = cursor;
    cursor.move_next().unwrap();
    assert_eq!(cursor.get(), Ok(&3));
    assert_eq!(cursor.index(), 2);
    assert_ne!(cursor, first);

    assert!(set.erase(&3));
    assert_eq!(set.count(&3), 2);
    assert_eq!(set.len(), 5);
}

#[test]
// Walking a multiset backwards visits each copy
fn test_set_4() {
    use alloc::vec;

    let set: Multiset<i32> = [2, 1, 2, 1, 1].into_iter().collect();

    let mut cursor = set.upper_bound(&2);
    assert!(cursor.is_end());
    assert!(cursor.move_prev().is_err());

    let mut cursor = set.find(&2).unwrap();
    cursor.move_next().unwrap();
    let mut v = Vec::new();
    loop {
        v.push((*cursor.get().unwrap(), cursor.index()));
        cursor.move_prev().unwrap();
        if cursor.is_end() {
            break;
        }
    }
    assert_eq!(v, vec![(2, 2), (2, 1), (1, 3), (1, 2), (1, 1)]);
}

#[test]
// Ranges of equal keys
fn test_set_5() {
    let set: Multiset<i32> = [5, 3, 7, 3, 3, 9].into_iter().collect();

    let (mut begin, end) = set.equal_range(&3);
    let mut n = 0;
    while begin != end {
        assert_eq!(begin.get(), Ok(&3));
        begin.move_next().unwrap();
        n += 1;
    }
    assert_eq!(n, 3);
    assert_eq!(end.get(), Ok(&5));

    let (begin, end) = set.equal_range(&4);
    assert_eq!(begin, end);
    assert_eq!(set.lower_bound(&6).get(), Ok(&7));
    assert!(set.upper_bound(&9).is_end());
}

#[test]
// Merging multisets keeps every copy
fn test_set_6() {
    let mut set: Multiset<i32> = [3, 2, 1, 4, 5].into_iter().collect();
    let other: Multiset<i32> = [2, 1, 3].into_iter().collect();

    set.merge(&other);
    assert_eq!(set.len(), 8);
    assert_eq!(set.count(&2), 2);
    assert_eq!(other.len(), 3);
}

#[test]
// Strings
fn test_set_7() {
    use alloc::vec;

    let mut set = StringSet::new();

    set.insert("Five");
    set.insert("One");
    set.insert("Nine");
    assert_eq!(set.insert("One"), ("One", false));

    assert!(set.contains("Five"));
    assert!(!set.contains("Seven"));

    let v: Vec<&str> = set.iter().collect();
    assert_eq!(v, vec!["Five", "Nine", "One"]);

    assert!(set.erase("Nine"));
    assert_eq!(set.first(), Some("Five"));
    assert_eq!(set.last(), Some("One"));
}

#[test]
// A stress test comparing against a sorted vector
fn test_set_8() {
    use rand::prelude::*;

    const COUNT: usize = 20000;

    let mut rng = SmallRng::seed_from_u64(1234567890);

    let mut set = Set::new();
    let mut model: Vec<u32> = Vec::new();
    for _ in 0..COUNT {
        let key = rng.random_range(0..5000u32);
        match model.binary_search(&key) {
            Ok(index) => {
                assert!(!set.insert(key).1);
                if rng.random_range(0..2u8) == 0 {
                    assert!(set.erase(&key));
                    model.remove(index);
                }
            }
            Err(index) => {
                assert!(set.insert(key).1);
                model.insert(index, key);
            }
        }
    }

    assert_eq!(set.len(), model.len());
    assert!(set.iter().eq(model.iter()));
}
