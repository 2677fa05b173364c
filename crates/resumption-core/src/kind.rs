//! Type-constructor brands and the algebraic traits built on them
//!
//! Rust has no higher-kinded types, so every type constructor (`Option`,
//! `Free<R, _>`, `Resumption<M, R, _>`, ...) is named by a zero-sized brand
//! implementing [`Kind`]. The brand's generic associated type `Of<A>` is the
//! constructor applied to `A`.
//!
//! Methods whose type parameters only occur under `Of<_>` cannot be inferred
//! in generic code, so call sites spell them out with turbofish.

use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

use crate::either::Either;

//-----------------------------------------------------------------------------
// Kinds
//-----------------------------------------------------------------------------

/// A brand standing for a type constructor `* -> *`
pub trait Kind: Sized + 'static {
    /// The constructor applied to `A`
    type Of<A>;
}

/// Composition of two constructors: `ComposeK<F, G>::Of<A> = F (G A)`
pub struct ComposeK<F, G>(PhantomData<(F, G)>);

impl<F: Kind, G: Kind> Kind for ComposeK<F, G> {
    type Of<A> = F::Of<G::Of<A>>;
}

//-----------------------------------------------------------------------------
// Functor / Monad
//-----------------------------------------------------------------------------

/// Structure-preserving map over the payload of a constructor
///
/// Laws: `fmap(x, id) == x` and `fmap(fmap(x, f), g) == fmap(x, g ∘ f)`.
pub trait Functor: Kind {
    fn fmap<A: 'static, B: 'static, F>(fa: Self::Of<A>, f: F) -> Self::Of<B>
    where
        F: Fn(A) -> B + 'static;
}

/// A computation type: an identity-producing constructor and an associative
/// sequencing operation
///
/// # Laws
///
/// ```text
/// bind(pure(a), f)         == f(a)
/// bind(m, pure)            == m
/// bind(bind(m, f), g)      == bind(m, |a| bind(f(a), g))
/// ```
pub trait Monad: Functor {
    /// Wrap a pure answer
    fn pure<A: 'static>(a: A) -> Self::Of<A>;

    /// Sequence a computation with a continuation
    fn bind<A: 'static, B: 'static, F>(ma: Self::Of<A>, f: F) -> Self::Of<B>
    where
        F: Fn(A) -> Self::Of<B> + 'static;
}

/// A monad that can run a loop of binds in constant stack
///
/// `tail_rec(seed, step)` is `step(seed)` bound repeatedly: `Left` finishes
/// with an answer, `Right` continues from a new seed. It must agree with the
/// recursive definition
///
/// ```text
/// tail_rec(s, step) == bind(step(s), |e| either(e, pure, |s| tail_rec(s, step)))
/// ```
pub trait TailRec: Monad {
    fn tail_rec<S: 'static, A: 'static, F>(seed: S, step: F) -> Self::Of<A>
    where
        F: Fn(S) -> Self::Of<Either<A, S>> + 'static;
}

/// Flatten a doubly wrapped computation
pub fn join<M: Monad, A: 'static>(mma: M::Of<M::Of<A>>) -> M::Of<A> {
    M::bind::<M::Of<A>, A, _>(mma, |ma| ma)
}

//-----------------------------------------------------------------------------
// Modules and ideals
//-----------------------------------------------------------------------------

/// A right module over the monad `M`: `R a × (a → M b) → R b`
///
/// # Laws
///
/// ```text
/// act(r, M::pure)          == r
/// act(act(r, f), g)        == act(r, |a| M::bind(f(a), g))
/// ```
///
/// `act` only threads the effects of `M` through the structure of `R`. It
/// never introduces or consumes pure answers on its own.
pub trait RModule<M: Monad>: Functor {
    fn act<A: 'static, B: 'static, K>(ra: Self::Of<A>, k: K) -> Self::Of<B>
    where
        K: Fn(A) -> M::Of<B> + 'static;
}

/// A monad whose impure computations form a module embedded in it
///
/// # Laws
///
/// ```text
/// split(embed(i))          == Right(i)
/// split(pure(a))           == Left(a)
/// ```
///
/// and every `m` is recovered from `split(m)` by `pure` on the left and
/// `embed` on the right.
pub trait Idealised: Monad {
    /// The module of impure computations
    type Ideal: RModule<Self>;

    /// Decide whether a computation is a pure answer or an impure one
    fn split<A: 'static>(ma: Self::Of<A>) -> Either<A, <Self::Ideal as Kind>::Of<A>>;

    /// Embed an impure computation back into the monad
    fn embed<A: 'static>(ia: <Self::Ideal as Kind>::Of<A>) -> Self::Of<A>;
}

//-----------------------------------------------------------------------------
// Natural transformations
//-----------------------------------------------------------------------------

/// A conversion `F a → G a` that behaves uniformly for every payload `a`
pub trait NaturalTransformation<F: Kind, G: Kind>: 'static {
    fn transform<A: 'static>(&self, fa: F::Of<A>) -> G::Of<A>;
}

/// The identity transformation on any constructor
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTransformation;

impl<F: Kind> NaturalTransformation<F, F> for IdentityTransformation {
    fn transform<A: 'static>(&self, fa: F::Of<A>) -> F::Of<A> {
        fa
    }
}

/// The ideal embedding `Ideal(M) → M` of an idealised monad
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbedIdeal;

impl<M: Idealised> NaturalTransformation<M::Ideal, M> for EmbedIdeal {
    fn transform<A: 'static>(&self, fa: <M::Ideal as Kind>::Of<A>) -> M::Of<A> {
        M::embed::<A>(fa)
    }
}

impl<F: Kind, G: Kind, P: NaturalTransformation<F, G>> NaturalTransformation<F, G> for Rc<P> {
    fn transform<A: 'static>(&self, fa: F::Of<A>) -> G::Of<A> {
        <P as NaturalTransformation<F, G>>::transform::<A>(&**self, fa)
    }
}

//-----------------------------------------------------------------------------
// Lifted equality and formatting
//-----------------------------------------------------------------------------

/// Equality of `Of<A>` given an equality on `A`
pub trait EqK: Kind {
    fn eq_by<A>(a: &Self::Of<A>, b: &Self::Of<A>, eq: &dyn Fn(&A, &A) -> bool) -> bool;
}

/// Debug formatting of `Of<A>` given a formatter for `A`
pub trait DebugK: Kind {
    fn fmt_by<A>(
        fa: &Self::Of<A>,
        f: &mut fmt::Formatter<'_>,
        show: &dyn Fn(&A, &mut fmt::Formatter<'_>) -> fmt::Result,
    ) -> fmt::Result;
}

/// Adapter printing a payload with an explicit formatter
pub struct ShowWith<'a, A> {
    value: &'a A,
    show: &'a dyn Fn(&A, &mut fmt::Formatter<'_>) -> fmt::Result,
}

impl<'a, A> ShowWith<'a, A> {
    pub fn new(value: &'a A, show: &'a dyn Fn(&A, &mut fmt::Formatter<'_>) -> fmt::Result) -> Self {
        Self { value, show }
    }
}

impl<A> fmt::Debug for ShowWith<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (self.show)(self.value, f)
    }
}

/// Adapter printing a branded value through [`DebugK`]
pub struct ShowKind<'a, K: Kind, A> {
    value: &'a K::Of<A>,
    show: &'a dyn Fn(&A, &mut fmt::Formatter<'_>) -> fmt::Result,
}

impl<'a, K: Kind, A> ShowKind<'a, K, A> {
    pub fn new(value: &'a K::Of<A>, show: &'a dyn Fn(&A, &mut fmt::Formatter<'_>) -> fmt::Result) -> Self {
        Self { value, show }
    }
}

impl<K: DebugK, A> fmt::Debug for ShowKind<'_, K, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        K::fmt_by::<A>(self.value, f, self.show)
    }
}

impl<F: EqK, G: EqK> EqK for ComposeK<F, G> {
    fn eq_by<A>(a: &Self::Of<A>, b: &Self::Of<A>, eq: &dyn Fn(&A, &A) -> bool) -> bool {
        F::eq_by::<G::Of<A>>(a, b, &|x: &G::Of<A>, y: &G::Of<A>| G::eq_by::<A>(x, y, eq))
    }
}

impl<F: Functor, G: Functor> Functor for ComposeK<F, G> {
    fn fmap<A: 'static, B: 'static, H>(fa: Self::Of<A>, f: H) -> Self::Of<B>
    where
        H: Fn(A) -> B + 'static,
    {
        let f = Rc::new(f);
        F::fmap::<G::Of<A>, G::Of<B>, _>(fa, move |ga| {
            let f = Rc::clone(&f);
            G::fmap::<A, B, _>(ga, move |a| f(a))
        })
    }
}
