//! Non-empty lists and their ideal of lists with at least two elements
//!
//! `NonEmptyK` is the non-empty list monad (`bind` concatenates the
//! continuation's results in order). A list is a pure answer exactly when it
//! is a singleton; every longer list belongs to the ideal [`AtLeast2`].

use std::fmt;

use resumption_core::{DebugK, Either, EqK, Functor, Idealised, Kind, Monad, RModule, ShowWith};

//-----------------------------------------------------------------------------
// NonEmpty
//-----------------------------------------------------------------------------

/// A list with a guaranteed first element
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmpty<A> {
    pub head: A,
    pub tail: Vec<A>,
}

impl<A> NonEmpty<A> {
    pub fn new(head: A, tail: Vec<A>) -> Self {
        Self { head, tail }
    }

    pub fn singleton(head: A) -> Self {
        Self { head, tail: Vec::new() }
    }

    /// `None` for an empty vector
    pub fn from_vec(items: Vec<A>) -> Option<Self> {
        let mut items = items.into_iter();
        let head = items.next()?;
        Some(Self { head, tail: items.collect() })
    }

    pub fn into_vec(self) -> Vec<A> {
        let mut items = Vec::with_capacity(self.len());
        items.push(self.head);
        items.extend(self.tail);
        items
    }

    pub fn len(&self) -> usize {
        self.tail.len() + 1
    }

    pub fn iter(&self) -> impl Iterator<Item = &A> {
        std::iter::once(&self.head).chain(self.tail.iter())
    }

    /// Append all elements of `other`
    pub fn concat(mut self, other: NonEmpty<A>) -> Self {
        self.tail.push(other.head);
        self.tail.extend(other.tail);
        self
    }

    /// Put `prefix` in front of `self`
    pub fn prepend_all(self, prefix: Vec<A>) -> Self {
        match NonEmpty::from_vec(prefix) {
            Some(front) => front.concat(self),
            None => self,
        }
    }
}

impl<A> IntoIterator for NonEmpty<A> {
    type Item = A;
    type IntoIter = std::vec::IntoIter<A>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}

/// Brand for [`NonEmpty`]
#[derive(Debug, Clone, Copy, Default)]
pub struct NonEmptyK;

impl Kind for NonEmptyK {
    type Of<A> = NonEmpty<A>;
}

impl Functor for NonEmptyK {
    fn fmap<A: 'static, B: 'static, F>(fa: NonEmpty<A>, f: F) -> NonEmpty<B>
    where
        F: Fn(A) -> B + 'static,
    {
        NonEmpty { head: f(fa.head), tail: fa.tail.into_iter().map(f).collect() }
    }
}

impl Monad for NonEmptyK {
    fn pure<A: 'static>(a: A) -> NonEmpty<A> {
        NonEmpty::singleton(a)
    }

    fn bind<A: 'static, B: 'static, F>(ma: NonEmpty<A>, f: F) -> NonEmpty<B>
    where
        F: Fn(A) -> NonEmpty<B> + 'static,
    {
        ma.tail.into_iter().fold(f(ma.head), |acc, a| acc.concat(f(a)))
    }
}

struct ShowAll<'a, A> {
    items: &'a [A],
    show: &'a dyn Fn(&A, &mut fmt::Formatter<'_>) -> fmt::Result,
}

impl<A> fmt::Debug for ShowAll<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter().map(|a| ShowWith::new(a, self.show))).finish()
    }
}

fn eq_non_empty<A>(a: &NonEmpty<A>, b: &NonEmpty<A>, eq: &dyn Fn(&A, &A) -> bool) -> bool {
    a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| eq(x, y))
}

impl EqK for NonEmptyK {
    fn eq_by<A>(a: &NonEmpty<A>, b: &NonEmpty<A>, eq: &dyn Fn(&A, &A) -> bool) -> bool {
        eq_non_empty(a, b, eq)
    }
}

impl DebugK for NonEmptyK {
    fn fmt_by<A>(
        fa: &NonEmpty<A>,
        f: &mut fmt::Formatter<'_>,
        show: &dyn Fn(&A, &mut fmt::Formatter<'_>) -> fmt::Result,
    ) -> fmt::Result {
        f.debug_struct("NonEmpty")
            .field("head", &ShowWith::new(&fa.head, show))
            .field("tail", &ShowAll { items: &fa.tail, show })
            .finish()
    }
}

//-----------------------------------------------------------------------------
// AtLeast2
//-----------------------------------------------------------------------------

/// A list with at least two elements: a head followed by a non-empty tail
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AtLeast2<A> {
    pub head: A,
    pub tail: NonEmpty<A>,
}

impl<A> AtLeast2<A> {
    pub fn new(first: A, second: A, rest: Vec<A>) -> Self {
        Self { head: first, tail: NonEmpty::new(second, rest) }
    }

    pub fn into_non_empty(self) -> NonEmpty<A> {
        self.tail.prepend_all(vec![self.head])
    }

    pub fn len(&self) -> usize {
        self.tail.len() + 1
    }
}

/// Brand for [`AtLeast2`]
#[derive(Debug, Clone, Copy, Default)]
pub struct AtLeast2K;

impl Kind for AtLeast2K {
    type Of<A> = AtLeast2<A>;
}

impl Functor for AtLeast2K {
    fn fmap<A: 'static, B: 'static, F>(fa: AtLeast2<A>, f: F) -> AtLeast2<B>
    where
        F: Fn(A) -> B + 'static,
    {
        let head = f(fa.head);
        AtLeast2 { head, tail: NonEmptyK::fmap(fa.tail, f) }
    }
}

/// Each element expands to a non-empty list; two or more elements expand to
/// two or more.
impl RModule<NonEmptyK> for AtLeast2K {
    fn act<A: 'static, B: 'static, K>(ra: AtLeast2<A>, k: K) -> AtLeast2<B>
    where
        K: Fn(A) -> NonEmpty<B> + 'static,
    {
        let NonEmpty { head, tail: front } = k(ra.head);
        let rest = ra.tail.tail.into_iter().fold(k(ra.tail.head), |acc, a| acc.concat(k(a)));
        AtLeast2 { head, tail: rest.prepend_all(front) }
    }
}

impl EqK for AtLeast2K {
    fn eq_by<A>(a: &AtLeast2<A>, b: &AtLeast2<A>, eq: &dyn Fn(&A, &A) -> bool) -> bool {
        eq(&a.head, &b.head) && eq_non_empty(&a.tail, &b.tail, eq)
    }
}

impl DebugK for AtLeast2K {
    fn fmt_by<A>(
        fa: &AtLeast2<A>,
        f: &mut fmt::Formatter<'_>,
        show: &dyn Fn(&A, &mut fmt::Formatter<'_>) -> fmt::Result,
    ) -> fmt::Result {
        f.debug_struct("AtLeast2")
            .field("head", &ShowWith::new(&fa.head, show))
            .field("tail", &resumption_core::ShowKind::<NonEmptyK, A>::new(&fa.tail, show))
            .finish()
    }
}

impl Idealised for NonEmptyK {
    type Ideal = AtLeast2K;

    fn split<A: 'static>(ma: NonEmpty<A>) -> Either<A, AtLeast2<A>> {
        match NonEmpty::from_vec(ma.tail) {
            None => Either::Left(ma.head),
            Some(tail) => Either::Right(AtLeast2 { head: ma.head, tail }),
        }
    }

    fn embed<A: 'static>(ia: AtLeast2<A>) -> NonEmpty<A> {
        ia.into_non_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_concatenates_in_order() {
        let ma = NonEmpty::new(1, vec![2]);
        let out = NonEmptyK::bind(ma, |n| NonEmpty::new(n * 10, vec![n * 10 + 1]));
        assert_eq!(out.into_vec(), vec![10, 11, 20, 21]);
    }

    #[test]
    fn test_split_singleton_and_longer() {
        assert_eq!(NonEmptyK::split(NonEmpty::singleton(7)), Either::Left(7));
        assert_eq!(
            NonEmptyK::split(NonEmpty::new(1, vec![2, 3])),
            Either::Right(AtLeast2 { head: 1, tail: NonEmpty::new(2, vec![3]) })
        );
    }

    #[test]
    fn test_act_expands_every_element() {
        let acted = AtLeast2K::act(AtLeast2::new(1, 2, vec![]), |n: i32| NonEmpty::new(n, vec![-n]));
        assert_eq!(acted.into_non_empty().into_vec(), vec![1, -1, 2, -2]);
    }

    #[test]
    fn test_lifted_debug_matches_derived_shape() {
        let shown = format!("{:?}", resumption_core::ShowKind::<NonEmptyK, u8>::new(&NonEmpty::new(1, vec![2]), &|a: &u8, f: &mut fmt::Formatter<'_>| write!(f, "#{}", a)));
        assert_eq!(shown, "NonEmpty { head: #1, tail: [#2] }");
    }
}
