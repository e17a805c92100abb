//! Key projection and ordering traits.
//!
//! A tree never inspects values directly. It asks a [`KeyOfValue`]
//! projection for the key of each stored value and a [`Compare`]
//! comparator whether one key orders before another.

use core::cmp::Ordering;
use core::marker::PhantomData;

/// Projection from a stored value to its ordering key.
///
/// Two projections are provided:
/// - [`Identity`]: the value is its own key (set-like trees)
/// - [`First`]: the value is a `(key, mapped)` pair (map-like trees)
pub trait KeyOfValue<V> {
    /// Key type the comparator orders.
    type Key;

    /// Borrow the key of a stored value.
    ///
    /// Must return the same key for the whole time the value is stored.
    fn key(value: &V) -> &Self::Key;
}

/// Set-like projection: key equals value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Identity;

impl<T> KeyOfValue<T> for Identity {
    type Key = T;

    #[inline(always)]
    fn key(value: &T) -> &T {
        value
    }
}

/// Map-like projection: key is the first component of a pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct First;

impl<K, M> KeyOfValue<(K, M)> for First {
    type Key = K;

    #[inline(always)]
    fn key(value: &(K, M)) -> &K {
        &value.0
    }
}

/// Strict weak ordering over keys.
///
/// `less` must be irreflexive and transitive, and must not change its
/// answer for keys already stored in a tree. Equivalence is derived:
/// `a` and `b` are equal when neither is less than the other.
pub trait Compare<K: ?Sized> {
    /// `true` if `a` orders strictly before `b`.
    fn less(&self, a: &K, b: &K) -> bool;

    /// `true` if neither key orders before the other.
    #[inline]
    fn equivalent(&self, a: &K, b: &K) -> bool {
        !self.less(a, b) && !self.less(b, a)
    }
}

/// Ordering by the key's own `Ord` implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Natural;

impl<K: Ord + ?Sized> Compare<K> for Natural {
    #[inline(always)]
    fn less(&self, a: &K, b: &K) -> bool {
        a < b
    }
}

/// Reverses another comparator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reverse<C>(pub C);

impl<K: ?Sized, C: Compare<K>> Compare<K> for Reverse<C> {
    #[inline(always)]
    fn less(&self, a: &K, b: &K) -> bool {
        self.0.less(b, a)
    }
}

/// Adapts a closure returning [`Ordering`] into a comparator.
///
/// # Example
/// ```rust
/// use ordered_rbtree::{FnCompare, Identity, RbTree};
///
/// // Order strings by length, then lexically.
/// let by_len = FnCompare::new(|a: &&str, b: &&str| a.len().cmp(&b.len()).then(a.cmp(b)));
/// let mut tree: RbTree<&str, Identity, _> = RbTree::with_comparator(by_len);
/// tree.insert_unique("ccc").unwrap();
/// tree.insert_unique("a").unwrap();
/// tree.insert_unique("bb").unwrap();
/// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), ["a", "bb", "ccc"]);
/// ```
pub struct FnCompare<K: ?Sized, F> {
    f: F,
    _key: PhantomData<fn(&K, &K)>,
}

impl<K: ?Sized, F> FnCompare<K, F>
where
    F: Fn(&K, &K) -> Ordering,
{
    /// Wrap a three-way comparison closure.
    pub fn new(f: F) -> Self {
        FnCompare {
            f,
            _key: PhantomData,
        }
    }
}

impl<K: ?Sized, F: Clone> Clone for FnCompare<K, F> {
    fn clone(&self) -> Self {
        FnCompare {
            f: self.f.clone(),
            _key: PhantomData,
        }
    }
}

impl<K: ?Sized, F> core::fmt::Debug for FnCompare<K, F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("FnCompare")
    }
}

impl<K: ?Sized, F> Compare<K> for FnCompare<K, F>
where
    F: Fn(&K, &K) -> Ordering,
{
    #[inline(always)]
    fn less(&self, a: &K, b: &K) -> bool {
        (self.f)(a, b) == Ordering::Less
    }
}
