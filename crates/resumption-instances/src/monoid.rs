//! Semigroups, monoids and monoids with an ideal
//!
//! The writer constructions need an associative `combine` with a unit. A
//! monoid with an ideal additionally separates its non-unit elements into a
//! type of their own, closed under combination with anything.

use std::num::NonZeroU64;

use serde::{Deserialize, Serialize};

use crate::non_empty::NonEmpty;

//-----------------------------------------------------------------------------
// Semigroup / Monoid
//-----------------------------------------------------------------------------

/// An associative binary operation
pub trait Semigroup {
    fn combine(self, other: Self) -> Self;
}

/// A semigroup with a two-sided unit
pub trait Monoid: Semigroup + Sized {
    fn empty() -> Self;

    fn concat_all<I: IntoIterator<Item = Self>>(items: I) -> Self {
        items.into_iter().fold(Self::empty(), Semigroup::combine)
    }
}

impl<T> Semigroup for Vec<T> {
    fn combine(mut self, other: Self) -> Self {
        self.extend(other);
        self
    }
}

impl<T> Monoid for Vec<T> {
    fn empty() -> Self {
        Vec::new()
    }
}

impl Semigroup for String {
    fn combine(mut self, other: Self) -> Self {
        self.push_str(&other);
        self
    }
}

impl Monoid for String {
    fn empty() -> Self {
        String::new()
    }
}

impl Semigroup for () {
    fn combine(self, _other: Self) -> Self {}
}

impl Monoid for () {
    fn empty() -> Self {}
}

/// Natural numbers under addition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Sum(pub u64);

impl Semigroup for Sum {
    fn combine(self, other: Self) -> Self {
        Sum(self.0.saturating_add(other.0))
    }
}

impl Monoid for Sum {
    fn empty() -> Self {
        Sum(0)
    }
}

//-----------------------------------------------------------------------------
// Ideals
//-----------------------------------------------------------------------------

/// A monoid whose non-unit elements form an ideal
///
/// # Laws
///
/// ```text
/// split_ideal(empty())               == None
/// split_ideal(embed_ideal(i))        == Some(i)
/// embed_ideal(absorb(i, w))          == embed_ideal(i).combine(w)
/// ```
pub trait IdealMonoid: Monoid {
    type Ideal;

    /// `None` for the unit, the ideal element otherwise
    fn split_ideal(self) -> Option<Self::Ideal>;

    fn embed_ideal(ideal: Self::Ideal) -> Self;

    /// Combine an ideal element with any element, staying in the ideal
    fn absorb(ideal: Self::Ideal, other: Self) -> Self::Ideal;
}

impl<T> IdealMonoid for Vec<T> {
    type Ideal = NonEmpty<T>;

    fn split_ideal(self) -> Option<NonEmpty<T>> {
        NonEmpty::from_vec(self)
    }

    fn embed_ideal(ideal: NonEmpty<T>) -> Self {
        ideal.into_vec()
    }

    fn absorb(mut ideal: NonEmpty<T>, other: Self) -> NonEmpty<T> {
        ideal.tail.extend(other);
        ideal
    }
}

impl IdealMonoid for Sum {
    type Ideal = NonZeroU64;

    fn split_ideal(self) -> Option<NonZeroU64> {
        NonZeroU64::new(self.0)
    }

    fn embed_ideal(ideal: NonZeroU64) -> Self {
        Sum(ideal.get())
    }

    fn absorb(ideal: NonZeroU64, other: Self) -> NonZeroU64 {
        ideal.saturating_add(other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concat_all() {
        assert_eq!(Vec::concat_all(vec![vec![1], vec![], vec![2, 3]]), vec![1, 2, 3]);
        assert_eq!(Sum::concat_all([Sum(2), Sum(5)]), Sum(7));
        assert_eq!(String::concat_all(["ab".to_string(), "c".to_string()]), "abc");
    }

    #[test]
    fn test_vec_ideal_split() {
        assert_eq!(Vec::<u8>::new().split_ideal(), None);
        let ideal = vec![1u8, 2].split_ideal();
        assert_eq!(ideal, Some(NonEmpty::new(1, vec![2])));
    }

    #[test]
    fn test_absorb_agrees_with_combine() {
        let ideal = NonEmpty::new('a', vec![]);
        let absorbed = Vec::absorb(ideal.clone(), vec!['b']);
        assert_eq!(Vec::embed_ideal(absorbed), Vec::embed_ideal(ideal).combine(vec!['b']));

        let positive = NonZeroU64::new(3).map(|n| Sum::absorb(n, Sum(4)));
        assert_eq!(positive.map(Sum::embed_ideal), Some(Sum(7)));
        assert_eq!(Sum(0).split_ideal(), None);
    }
}
