//! The identity constructor and its empty ideal
//!
//! `Identity` doubles as the one-slot shape functor (used by
//! [`RRRResumption`](crate::moggi::RRRResumption)) and as the identity monad.
//! The identity monad has no impure computations, so its ideal is the empty
//! module [`Void`].

use std::convert::Infallible;
use std::fmt;
use std::marker::PhantomData;

use crate::either::Either;
use crate::kind::{DebugK, EqK, Functor, Idealised, Kind, Monad, RModule, ShowWith, TailRec};

//-----------------------------------------------------------------------------
// Identity
//-----------------------------------------------------------------------------

/// A single slot holding an `A`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Identity<A>(pub A);

impl<A> Identity<A> {
    pub fn run(self) -> A {
        self.0
    }
}

/// Brand for [`Identity`]
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityK;

impl Kind for IdentityK {
    type Of<A> = Identity<A>;
}

impl Functor for IdentityK {
    fn fmap<A: 'static, B: 'static, F>(fa: Identity<A>, f: F) -> Identity<B>
    where
        F: Fn(A) -> B + 'static,
    {
        Identity(f(fa.0))
    }
}

impl Monad for IdentityK {
    fn pure<A: 'static>(a: A) -> Identity<A> {
        Identity(a)
    }

    fn bind<A: 'static, B: 'static, F>(ma: Identity<A>, f: F) -> Identity<B>
    where
        F: Fn(A) -> Identity<B> + 'static,
    {
        f(ma.0)
    }
}

impl TailRec for IdentityK {
    fn tail_rec<S: 'static, A: 'static, F>(seed: S, step: F) -> Identity<A>
    where
        F: Fn(S) -> Identity<Either<A, S>> + 'static,
    {
        let mut state = seed;
        loop {
            match step(state).0 {
                Either::Left(a) => return Identity(a),
                Either::Right(next) => state = next,
            }
        }
    }
}

impl EqK for IdentityK {
    fn eq_by<A>(a: &Identity<A>, b: &Identity<A>, eq: &dyn Fn(&A, &A) -> bool) -> bool {
        eq(&a.0, &b.0)
    }
}

impl DebugK for IdentityK {
    fn fmt_by<A>(
        fa: &Identity<A>,
        f: &mut fmt::Formatter<'_>,
        show: &dyn Fn(&A, &mut fmt::Formatter<'_>) -> fmt::Result,
    ) -> fmt::Result {
        f.debug_tuple("Identity").field(&ShowWith::new(&fa.0, show)).finish()
    }
}

//-----------------------------------------------------------------------------
// Void
//-----------------------------------------------------------------------------

/// The empty module: no value of `Void<A>` exists
pub struct Void<A>(Infallible, PhantomData<A>);

impl<A> Void<A> {
    /// Eliminate an impossible value
    pub fn absurd<B>(self) -> B {
        match self.0 {}
    }
}

impl<A> fmt::Debug for Void<A> {
    fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {}
    }
}

impl<A> PartialEq for Void<A> {
    fn eq(&self, _other: &Self) -> bool {
        match self.0 {}
    }
}

/// Brand for [`Void`]
#[derive(Debug, Clone, Copy, Default)]
pub struct VoidK;

impl Kind for VoidK {
    type Of<A> = Void<A>;
}

impl Functor for VoidK {
    fn fmap<A: 'static, B: 'static, F>(fa: Void<A>, _f: F) -> Void<B>
    where
        F: Fn(A) -> B + 'static,
    {
        fa.absurd()
    }
}

impl RModule<IdentityK> for VoidK {
    fn act<A: 'static, B: 'static, K>(ra: Void<A>, _k: K) -> Void<B>
    where
        K: Fn(A) -> Identity<B> + 'static,
    {
        ra.absurd()
    }
}

impl EqK for VoidK {
    fn eq_by<A>(a: &Void<A>, _b: &Void<A>, _eq: &dyn Fn(&A, &A) -> bool) -> bool {
        match a.0 {}
    }
}

impl DebugK for VoidK {
    fn fmt_by<A>(
        fa: &Void<A>,
        _f: &mut fmt::Formatter<'_>,
        _show: &dyn Fn(&A, &mut fmt::Formatter<'_>) -> fmt::Result,
    ) -> fmt::Result {
        match fa.0 {}
    }
}

impl Idealised for IdentityK {
    type Ideal = VoidK;

    fn split<A: 'static>(ma: Identity<A>) -> Either<A, Void<A>> {
        Either::Left(ma.0)
    }

    fn embed<A: 'static>(ia: Void<A>) -> Identity<A> {
        ia.absurd()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_monad_sequencing() {
        let m = IdentityK::bind(IdentityK::pure(20), |n: i32| Identity(n + 1));
        assert_eq!(IdentityK::fmap(m, |n| n * 2), Identity(42));
    }

    #[test]
    fn test_tail_rec_loops_without_growing_the_stack() {
        let total = IdentityK::tail_rec(
            (0u64, 0u64),
            |(i, acc): (u64, u64)| {
                if i == 1_000_000 {
                    Identity(Either::Left(acc))
                } else {
                    Identity(Either::Right((i + 1, acc + i)))
                }
            },
        );
        assert_eq!(total, Identity(499_999_500_000));
    }

    #[test]
    fn test_identity_split_is_always_pure() {
        assert_eq!(IdentityK::split(Identity("answer")), Either::Left("answer"));
    }
}
