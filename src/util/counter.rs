//! A sparse numeric accumulator keyed by arbitrary labels

use num_traits::{Float, Num};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::Hash;

/// Keeps track of numeric scores for a set of keys.
///
/// Every key that has never been set reads as zero. Reading a key does not insert it, so
/// [`Counter::len`] and iteration only reflect keys that were written.
///
/// Keys are iterated in the order they were first written. [`Counter::arg_max`] and
/// [`Counter::sorted_keys`] use this order to break ties.
///
/// ```
/// use gridworld_util::util::counter::Counter;
///
/// let mut counter = Counter::new();
/// assert_eq!(counter.get(&"test"), 0.0);
///
/// counter.set("test", 2.0);
/// assert_eq!(counter.get(&"test"), 2.0);
/// ```
#[derive(Clone, Debug)]
pub struct Counter<K, V = f64> {
    /// Keys in insertion order
    order: Vec<K>,
    values: HashMap<K, V>,
}

/// Orders values, ranking values that are not equal to themselves (NaN) below everything else.
#[allow(clippy::eq_op)]
fn compare_values<V: PartialOrd>(a: &V, b: &V) -> Ordering {
    match (a != a, b != b) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
    }
}

impl<K, V> Default for Counter<K, V> {
    fn default() -> Self {
        Self {
            order: vec![],
            values: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone, V: Num + Copy + PartialOrd> Counter<K, V> {
    /// Creates an empty Counter
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value stored for `key`, or zero if it was never set.
    pub fn get(&self, key: &K) -> V {
        self.values.get(key).copied().unwrap_or_else(V::zero)
    }

    /// Stores `value` under `key`, overwriting any previous value.
    pub fn set(&mut self, key: K, value: V) {
        if let Some(slot) = self.values.get_mut(&key) {
            *slot = value;
            return;
        }
        self.order.push(key.clone());
        self.values.insert(key, value);
    }

    /// Adds `amount` to the value of `key`.
    pub fn increment(&mut self, key: K, amount: V) {
        let current = self.get(&key);
        self.set(key, current + amount);
    }

    /// Increments every key in `keys` by the same amount.
    ///
    /// A key that appears more than once is incremented once per appearance.
    ///
    /// ```
    /// use gridworld_util::util::counter::Counter;
    ///
    /// let mut counter: Counter<&str, i32> = Counter::new();
    /// counter.increment_all(["one", "two", "one"], 1);
    /// assert_eq!(counter.get(&"one"), 2);
    /// assert_eq!(counter.get(&"two"), 1);
    /// ```
    pub fn increment_all<I>(&mut self, keys: I, amount: V)
    where
        I: IntoIterator<Item = K>,
    {
        for key in keys {
            self.increment(key, amount);
        }
    }

    /// Returns the key with the highest value, or `None` if the counter is empty.
    ///
    /// When several keys share the highest value, the one written first wins. NaN ranks below
    /// every other value.
    pub fn arg_max(&self) -> Option<&K> {
        let mut best: Option<(&K, V)> = None;
        for (key, value) in self.iter() {
            let replace = match best {
                None => true,
                Some((_, best_value)) => {
                    compare_values(&value, &best_value) == Ordering::Greater
                }
            };
            if replace {
                best = Some((key, value));
            }
        }
        best.map(|(key, _)| key)
    }

    /// Returns all keys sorted by their values, highest first.
    ///
    /// The sort is stable, so keys with equal values keep their insertion order. NaN values sort
    /// last, so the first key always matches [`Counter::arg_max`].
    ///
    /// ```
    /// use gridworld_util::util::counter::Counter;
    ///
    /// let counter = Counter::from([("first", -2), ("second", 4), ("third", 1)]);
    /// assert_eq!(counter.sorted_keys(), vec![&"second", &"third", &"first"]);
    /// ```
    pub fn sorted_keys(&self) -> Vec<&K> {
        let mut items: Vec<(&K, V)> = self.iter().collect();
        items.sort_by(|(_, a), (_, b)| compare_values(b, a));
        items.into_iter().map(|(key, _)| key).collect()
    }

    /// Returns the sum of the values of all keys.
    pub fn total_count(&self) -> V {
        self.values().fold(V::zero(), |acc, value| acc + value)
    }

    /// Returns the dot product of two counters, treating each key as a vector element.
    ///
    /// Only keys present in both counters contribute.
    ///
    /// ```
    /// use gridworld_util::util::counter::Counter;
    ///
    /// let a = Counter::from([("first", -2.0), ("second", 4.0), ("third", 1.5), ("fourth", 2.5)]);
    /// let b = Counter::from([("first", 3.0), ("second", 5.0)]);
    /// assert_eq!(a.dot(&b), 14.0);
    /// ```
    pub fn dot(&self, other: &Self) -> V {
        let (small, large) = if self.len() > other.len() {
            (other, self)
        } else {
            (self, other)
        };
        small
            .values
            .iter()
            .filter_map(|(key, &value)| large.values.get(key).map(|&o| value * o))
            .fold(V::zero(), |acc, product| acc + product)
    }

    /// Returns a new counter over the union of both key sets, holding the sum of both values.
    #[allow(clippy::should_implement_trait)]
    pub fn add(&self, other: &Self) -> Self {
        self.combine(other, |a, b| a + b)
    }

    /// Returns a new counter over the union of both key sets, holding `self - other`.
    ///
    /// Keys that only `other` holds end up negated.
    pub fn subtract(&self, other: &Self) -> Self {
        self.combine(other, |a, b| a - b)
    }

    /// Adds every value of `other` onto this counter in place.
    ///
    /// Unlike [`Counter::add`], this mutates `self` instead of building a new counter.
    pub fn accumulate(&mut self, other: &Self) {
        for (key, value) in other.iter() {
            self.increment(key.clone(), value);
        }
    }

    fn combine<F>(&self, other: &Self, op: F) -> Self
    where
        F: Fn(V, V) -> V,
    {
        let mut result = Self::new();
        for key in self.order.iter().chain(other.order.iter()) {
            if !result.contains_key(key) {
                result.set(key.clone(), op(self.get(key), other.get(key)));
            }
        }
        result
    }

    /// Returns whether `key` has been written to this counter.
    pub fn contains_key(&self, key: &K) -> bool {
        self.values.contains_key(key)
    }

    /// Returns the number of keys that have been written.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns whether no key has been written.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterates over the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.order.iter()
    }

    /// Iterates over the values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = V> + '_ {
        self.iter().map(|(_, value)| value)
    }

    /// Iterates over key, value pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, V)> {
        self.order.iter().map(move |key| (key, self.get(key)))
    }
}

impl<K: Eq + Hash + Clone, V: Float> Counter<K, V> {
    /// Scales all values so that they sum to one, keeping their ratios.
    ///
    /// Does nothing when the values sum to zero.
    pub fn normalize(&mut self) {
        let total = self.total_count();
        if total == V::zero() {
            return;
        }
        self.divide_all(total);
    }

    /// Divides every value by `divisor`.
    ///
    /// Dividing by zero is not checked and yields infinities or NaN.
    pub fn divide_all(&mut self, divisor: V) {
        for value in self.values.values_mut() {
            *value = *value / divisor;
        }
    }
}

impl<K: Eq + Hash + Clone, V: Num + Copy + PartialOrd> FromIterator<(K, V)> for Counter<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut counter = Self::new();
        for (key, value) in iter {
            counter.set(key, value);
        }
        counter
    }
}

impl<K: Eq + Hash + Clone, V: Num + Copy + PartialOrd, const N: usize> From<[(K, V); N]>
    for Counter<K, V>
{
    fn from(items: [(K, V); N]) -> Self {
        items.into_iter().collect()
    }
}

impl<K: Eq + Hash + Clone, V: Num + Copy + PartialOrd> From<HashMap<K, V>> for Counter<K, V> {
    fn from(map: HashMap<K, V>) -> Self {
        map.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn unseen_key_is_zero() {
        let counter: Counter<&str> = Counter::new();
        assert_eq!(counter.get(&"missing"), 0.0);

        let counter: Counter<&str, i32> = Counter::from([("a", 3)]);
        assert_eq!(counter.get(&"b"), 0);
    }

    #[test]
    fn get_does_not_insert() {
        let counter: Counter<&str, i32> = Counter::new();
        counter.get(&"a");
        assert!(counter.is_empty());
        assert!(!counter.contains_key(&"a"));
    }

    #[test]
    fn set_overwrites() {
        let mut counter: Counter<&str, i32> = Counter::new();
        counter.set("a", 1);
        counter.set("a", 5);
        assert_eq!(counter.get(&"a"), 5);
        assert_eq!(counter.len(), 1);
    }

    #[test]
    fn increment_all_counts_duplicates() {
        let mut counter: Counter<&str, i32> = Counter::new();
        counter.increment_all(["a", "b", "a"], 1);
        assert_eq!(counter.get(&"a"), 2);
        assert_eq!(counter.get(&"b"), 1);
        assert_eq!(counter.keys().collect::<Vec<_>>(), vec![&"a", &"b"]);
    }

    #[test]
    fn arg_max_empty() {
        let counter: Counter<&str> = Counter::new();
        assert_eq!(counter.arg_max(), None);
    }

    #[test]
    fn arg_max_ties_take_first_inserted() {
        let counter = Counter::from([("x", 1.0), ("y", 3.0), ("z", 3.0), ("w", -1.0)]);
        assert_eq!(counter.arg_max(), Some(&"y"));
        assert_eq!(counter.sorted_keys()[0], &"y");
    }

    #[test]
    fn arg_max_all_negative() {
        let counter = Counter::from([("a", -5), ("b", -2), ("c", -9)]);
        assert_eq!(counter.arg_max(), Some(&"b"));
    }

    #[test]
    fn sorted_keys_descending() {
        let counter = Counter::from([("first", -2), ("second", 4), ("third", 1)]);
        assert_eq!(counter.sorted_keys(), vec![&"second", &"third", &"first"]);
    }

    #[test]
    fn sorted_keys_stable_on_ties() {
        let counter = Counter::from([("a", 1), ("b", 2), ("c", 1), ("d", 2)]);
        assert_eq!(counter.sorted_keys(), vec![&"b", &"d", &"a", &"c"]);
    }

    #[test]
    fn total_count() {
        let counter: Counter<&str, i32> = Counter::new();
        assert_eq!(counter.total_count(), 0);

        let counter = Counter::from([("a", 1.5), ("b", -0.5), ("c", 2.0)]);
        assert!(approx_eq(counter.total_count(), 3.0));
    }

    #[test]
    fn normalize_zero_total_is_noop() {
        let mut counter = Counter::from([("a", 1.0), ("b", -1.0)]);
        counter.normalize();
        assert_eq!(counter.get(&"a"), 1.0);
        assert_eq!(counter.get(&"b"), -1.0);

        let mut empty: Counter<&str> = Counter::new();
        empty.normalize();
        assert!(empty.is_empty());
    }

    #[test]
    fn normalize_sums_to_one() {
        let mut counter = Counter::from([("a", 1.0), ("b", 3.0)]);
        counter.normalize();
        assert!(approx_eq(counter.get(&"a"), 0.25));
        assert!(approx_eq(counter.get(&"b"), 0.75));
        assert!(approx_eq(counter.total_count(), 1.0));
    }

    #[test]
    fn divide_all() {
        let mut counter = Counter::from([("a", 3.0), ("b", -6.0)]);
        counter.divide_all(3.0);
        assert_eq!(counter.get(&"a"), 1.0);
        assert_eq!(counter.get(&"b"), -2.0);
    }

    #[test]
    fn divide_all_by_zero() {
        let mut counter = Counter::from([("a", 1.0), ("b", 0.0)]);
        counter.divide_all(0.0);
        assert_eq!(counter.get(&"a"), f64::INFINITY);
        assert!(counter.get(&"b").is_nan());
    }

    #[test]
    fn sorted_keys_after_divide_by_zero() {
        let mut counter = Counter::from([("zero", 0.0), ("pos", 1.0), ("neg", -1.0)]);
        counter.divide_all(0.0);
        assert_eq!(counter.sorted_keys(), vec![&"pos", &"neg", &"zero"]);
        assert_eq!(counter.arg_max(), Some(&"pos"));
    }

    #[test]
    fn nan_ranks_last() {
        let counter = Counter::from([("x", f64::NAN), ("y", -3.0), ("z", f64::NAN), ("w", 2.0)]);
        assert_eq!(counter.sorted_keys(), vec![&"w", &"y", &"x", &"z"]);
        assert_eq!(counter.arg_max(), Some(&"w"));

        let all_nan = Counter::from([("a", f64::NAN), ("b", f64::NAN)]);
        assert_eq!(all_nan.arg_max(), Some(&"a"));
        assert_eq!(all_nan.sorted_keys(), vec![&"a", &"b"]);
    }

    #[test]
    fn arg_max_matches_sorted_keys_with_nan() {
        let choices = [-1.0, 0.0, 1.0];
        // every assignment of {-1, 0, 1} to six keys
        for mut code in 0..3usize.pow(6) {
            let mut counter = Counter::new();
            for key in 0..6 {
                counter.set(key, choices[code % 3]);
                code /= 3;
            }
            counter.divide_all(0.0);
            let sorted = counter.sorted_keys();
            assert_eq!(sorted.len(), 6);
            assert_eq!(Some(sorted[0]), counter.arg_max());
        }
    }

    #[test]
    fn clone_is_independent() {
        let original = Counter::from([("a", 1), ("b", 2)]);
        let mut copy = original.clone();
        copy.set("a", 10);
        copy.set("c", 3);
        assert_eq!(original.get(&"a"), 1);
        assert!(!original.contains_key(&"c"));
        assert_eq!(copy.get(&"a"), 10);
    }

    #[test]
    fn dot_product() {
        let a = Counter::from([("first", -2.0), ("second", 4.0), ("third", 1.5), ("fourth", 2.5)]);
        let b = Counter::from([("first", 3.0), ("second", 5.0)]);
        assert_eq!(a.dot(&b), 14.0);
        assert_eq!(b.dot(&a), 14.0);
    }

    #[test]
    fn dot_product_disjoint() {
        let a = Counter::from([("a", 1), ("b", 2)]);
        let b = Counter::from([("c", 3)]);
        assert_eq!(a.dot(&b), 0);
    }

    #[test]
    fn add_unions_keys() {
        let a = Counter::from([("first", -2), ("second", 4)]);
        let b = Counter::from([("first", 3), ("third", 1)]);
        let sum = a.add(&b);
        assert_eq!(sum.get(&"first"), 1);
        assert_eq!(sum.get(&"second"), 4);
        assert_eq!(sum.get(&"third"), 1);
        assert_eq!(sum.keys().collect::<Vec<_>>(), vec![&"first", &"second", &"third"]);
        // operands untouched
        assert_eq!(a.get(&"first"), -2);
        assert!(!a.contains_key(&"third"));
    }

    #[test]
    fn subtract_negates_other_only_keys() {
        let a = Counter::from([("first", -2), ("second", 4)]);
        let b = Counter::from([("first", 3), ("third", 1)]);
        let difference = a.subtract(&b);
        assert_eq!(difference.get(&"first"), -5);
        assert_eq!(difference.get(&"second"), 4);
        assert_eq!(difference.get(&"third"), -1);
    }

    #[test]
    fn accumulate_in_place() {
        let mut a = Counter::from([("first", -2), ("second", 4)]);
        let b = Counter::from([("first", 3), ("third", 1)]);
        a.accumulate(&b);
        assert_eq!(a.get(&"first"), 1);
        assert_eq!(a.get(&"second"), 4);
        assert_eq!(a.get(&"third"), 1);
        assert_eq!(b.get(&"first"), 3);
    }

    #[test]
    fn from_hash_map() {
        let mut map = HashMap::new();
        map.insert("a", 2.0);
        map.insert("b", 0.5);
        let counter = Counter::from(map);
        assert_eq!(counter.len(), 2);
        assert_eq!(counter.get(&"a"), 2.0);
        assert_eq!(counter.arg_max(), Some(&"a"));
    }
}
