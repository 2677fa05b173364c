//! The free structure generated by a functor
//!
//! `Free<R, A>` is either a pure answer or one `R`-layer whose slots hold
//! further free structures. Ownership is strictly tree-shaped: every layer
//! owns its children, there is no sharing and no back-reference.
//!
//! Layers are [`Suspended`]: a layer may be built only when it is first
//! inspected, which lets unfolded structures be infinite and keeps the stack
//! shallow while they are consumed one layer at a time.
//!
//! Over a plain functor `F`, `Free<F, _>` is the free monad ([`FreeK`]) and
//! its ideal is the module of values with at least one layer ([`WrapK`]).
//! Over a module `R` of some monad `M`, [`distr`] pushes `M`-effects stored
//! at the leaves out to the top.

use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

use once_cell::unsync::Lazy;

use crate::either::Either;
use crate::kind::{DebugK, EqK, Functor, Idealised, Kind, Monad, NaturalTransformation, RModule, ShowKind, ShowWith};

//-----------------------------------------------------------------------------
// Suspended values
//-----------------------------------------------------------------------------

/// A value computed at most once, the first time it is needed
pub struct Suspended<T>(Box<Lazy<T, Box<dyn FnOnce() -> T>>>);

impl<T: 'static> Suspended<T> {
    /// An already available value
    pub fn now(value: T) -> Self {
        Self::later(move || value)
    }

    pub fn later<F>(build: F) -> Self
    where
        F: FnOnce() -> T + 'static,
    {
        Suspended(Box::new(Lazy::new(Box::new(build))))
    }
}

impl<T> Suspended<T> {
    /// Borrow the value, building it if needed
    pub fn force(&self) -> &T {
        Lazy::force(&self.0)
    }

    pub fn is_built(&self) -> bool {
        Lazy::get(&self.0).is_some()
    }

    pub fn into_inner(self) -> T {
        Lazy::into_value(*self.0).unwrap_or_else(|build| build())
    }
}

//-----------------------------------------------------------------------------
// Free structure
//-----------------------------------------------------------------------------

/// A pure answer or an `R`-layer of further free structures
pub enum Free<R: Kind, A> {
    Pure(A),
    Layer(Suspended<R::Of<Free<R, A>>>),
}

impl<R: Kind, A> Free<R, A> {
    pub fn is_pure(&self) -> bool {
        matches!(self, Free::Pure(_))
    }
}

impl<R: Kind, A: 'static> Free<R, A> {
    /// Build a layer node
    pub fn layer(layer: R::Of<Free<R, A>>) -> Self {
        Free::Layer(Suspended::now(layer))
    }

    /// A layer node built on first access
    pub fn defer<F>(build: F) -> Self
    where
        F: FnOnce() -> R::Of<Free<R, A>> + 'static,
    {
        Free::Layer(Suspended::later(build))
    }

    /// Peel the top node into an answer or a layer
    pub fn into_either(self) -> Either<A, R::Of<Free<R, A>>> {
        match self {
            Free::Pure(a) => Either::Left(a),
            Free::Layer(layer) => Either::Right(layer.into_inner()),
        }
    }
}

impl<R: Functor, A: 'static> Free<R, A> {
    /// A single layer whose slots are pure answers
    pub fn lift_layer(layer: R::Of<A>) -> Self {
        Free::layer(R::fmap::<A, Free<R, A>, _>(layer, Free::Pure))
    }

    /// Catamorphism: `leaf` on answers, `alg` bottom-up on every layer
    pub fn fold<B: 'static, L, G>(self, leaf: L, alg: G) -> B
    where
        L: Fn(A) -> B + 'static,
        G: Fn(R::Of<B>) -> B + 'static,
    {
        fold_with::<R, A, B>(self, Rc::new(leaf), Rc::new(alg))
    }

    /// Apply a natural transformation to every layer
    pub fn hoist<S: Kind, Q>(self, psi: Q) -> Free<S, A>
    where
        Q: NaturalTransformation<R, S>,
    {
        hoist_with::<R, S, A, Q>(self, Rc::new(psi))
    }
}

fn fold_with<R: Functor, A: 'static, B: 'static>(
    free: Free<R, A>,
    leaf: Rc<dyn Fn(A) -> B>,
    alg: Rc<dyn Fn(R::Of<B>) -> B>,
) -> B {
    match free {
        Free::Pure(a) => leaf(a),
        Free::Layer(layer) => {
            let (inner_leaf, inner_alg) = (Rc::clone(&leaf), Rc::clone(&alg));
            let folded = R::fmap::<Free<R, A>, B, _>(layer.into_inner(), move |child| {
                fold_with::<R, A, B>(child, Rc::clone(&inner_leaf), Rc::clone(&inner_alg))
            });
            alg(folded)
        }
    }
}

fn hoist_with<R: Functor, S: Kind, A: 'static, Q: NaturalTransformation<R, S>>(
    free: Free<R, A>,
    psi: Rc<Q>,
) -> Free<S, A> {
    match free {
        Free::Pure(a) => Free::Pure(a),
        Free::Layer(layer) => Free::defer(move || {
            let inner = Rc::clone(&psi);
            let children = R::fmap::<Free<R, A>, Free<S, A>, _>(layer.into_inner(), move |child| {
                hoist_with::<R, S, A, Q>(child, Rc::clone(&inner))
            });
            <Q as NaturalTransformation<R, S>>::transform::<Free<S, A>>(&psi, children)
        }),
    }
}

/// Distribute a free structure of `M`-computations into an `M`-computation
/// of a free structure
///
/// Leaves run their computation; layers are re-threaded through the module
/// action when first inspected and returned purely.
pub fn distr<M, R, A>(free: Free<R, M::Of<A>>) -> M::Of<Free<R, A>>
where
    M: Monad,
    R: RModule<M>,
    A: 'static,
{
    match free {
        Free::Pure(m) => M::fmap::<A, Free<R, A>, _>(m, Free::Pure),
        Free::Layer(layer) => M::pure::<Free<R, A>>(Free::defer(move || {
            R::act::<Free<R, M::Of<A>>, Free<R, A>, _>(layer.into_inner(), distr::<M, R, A>)
        })),
    }
}

//-----------------------------------------------------------------------------
// Equality and formatting
//-----------------------------------------------------------------------------

pub(crate) fn free_eq<R: EqK, A>(a: &Free<R, A>, b: &Free<R, A>, eq: &dyn Fn(&A, &A) -> bool) -> bool {
    match (a, b) {
        (Free::Pure(x), Free::Pure(y)) => eq(x, y),
        (Free::Layer(x), Free::Layer(y)) => {
            R::eq_by::<Free<R, A>>(x.force(), y.force(), &|p: &Free<R, A>, q: &Free<R, A>| free_eq::<R, A>(p, q, eq))
        }
        _ => false,
    }
}

pub(crate) fn free_fmt<R: DebugK, A>(
    free: &Free<R, A>,
    f: &mut fmt::Formatter<'_>,
    show: &dyn Fn(&A, &mut fmt::Formatter<'_>) -> fmt::Result,
) -> fmt::Result {
    match free {
        Free::Pure(a) => f.debug_tuple("Pure").field(&ShowWith::new(a, show)).finish(),
        Free::Layer(layer) => f
            .debug_tuple("Layer")
            .field(&ShowKind::<R, Free<R, A>>::new(layer.force(), &|child: &Free<R, A>, f: &mut fmt::Formatter<'_>| {
                free_fmt::<R, A>(child, f, show)
            }))
            .finish(),
    }
}

impl<R: EqK, A: PartialEq> PartialEq for Free<R, A> {
    fn eq(&self, other: &Self) -> bool {
        free_eq::<R, A>(self, other, &|x: &A, y: &A| x == y)
    }
}

impl<R: DebugK, A: fmt::Debug> fmt::Debug for Free<R, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        free_fmt::<R, A>(self, f, &|a: &A, f: &mut fmt::Formatter<'_>| fmt::Debug::fmt(a, f))
    }
}

//-----------------------------------------------------------------------------
// The free monad over a functor
//-----------------------------------------------------------------------------

/// Brand for `Free<F, _>`
pub struct FreeK<F>(PhantomData<F>);

impl<F: Kind> Kind for FreeK<F> {
    type Of<A> = Free<F, A>;
}

fn bind_free<F: Functor, A: 'static, B: 'static>(free: Free<F, A>, k: Rc<dyn Fn(A) -> Free<F, B>>) -> Free<F, B> {
    match free {
        Free::Pure(a) => k(a),
        Free::Layer(layer) => Free::defer(move || {
            F::fmap::<Free<F, A>, Free<F, B>, _>(layer.into_inner(), move |child| {
                bind_free::<F, A, B>(child, Rc::clone(&k))
            })
        }),
    }
}

impl<F: Functor> Functor for FreeK<F> {
    fn fmap<A: 'static, B: 'static, G>(fa: Free<F, A>, f: G) -> Free<F, B>
    where
        G: Fn(A) -> B + 'static,
    {
        bind_free::<F, A, B>(fa, Rc::new(move |a| Free::Pure(f(a))))
    }
}

impl<F: Functor> Monad for FreeK<F> {
    fn pure<A: 'static>(a: A) -> Free<F, A> {
        Free::Pure(a)
    }

    fn bind<A: 'static, B: 'static, G>(ma: Free<F, A>, f: G) -> Free<F, B>
    where
        G: Fn(A) -> Free<F, B> + 'static,
    {
        bind_free::<F, A, B>(ma, Rc::new(f))
    }
}

impl<F: EqK> EqK for FreeK<F> {
    fn eq_by<A>(a: &Free<F, A>, b: &Free<F, A>, eq: &dyn Fn(&A, &A) -> bool) -> bool {
        free_eq::<F, A>(a, b, eq)
    }
}

impl<F: DebugK> DebugK for FreeK<F> {
    fn fmt_by<A>(
        fa: &Free<F, A>,
        f: &mut fmt::Formatter<'_>,
        show: &dyn Fn(&A, &mut fmt::Formatter<'_>) -> fmt::Result,
    ) -> fmt::Result {
        free_fmt::<F, A>(fa, f, show)
    }
}

//-----------------------------------------------------------------------------
// Wrap: the ideal of the free monad
//-----------------------------------------------------------------------------

/// One layer of `F` over the free structure of `F`
pub struct Wrap<F: Kind, A>(pub F::Of<Free<F, A>>);

/// Brand for [`Wrap`]
pub struct WrapK<F>(PhantomData<F>);

impl<F: Kind> Kind for WrapK<F> {
    type Of<A> = Wrap<F, A>;
}

impl<F: Functor> Functor for WrapK<F> {
    fn fmap<A: 'static, B: 'static, G>(fa: Wrap<F, A>, f: G) -> Wrap<F, B>
    where
        G: Fn(A) -> B + 'static,
    {
        let f = Rc::new(f);
        Wrap(F::fmap::<Free<F, A>, Free<F, B>, _>(fa.0, move |child| {
            let f = Rc::clone(&f);
            FreeK::<F>::fmap::<A, B, _>(child, move |a| f(a))
        }))
    }
}

impl<F: Functor> RModule<FreeK<F>> for WrapK<F> {
    fn act<A: 'static, B: 'static, K>(ra: Wrap<F, A>, k: K) -> Wrap<F, B>
    where
        K: Fn(A) -> Free<F, B> + 'static,
    {
        let k: Rc<dyn Fn(A) -> Free<F, B>> = Rc::new(k);
        Wrap(F::fmap::<Free<F, A>, Free<F, B>, _>(ra.0, move |child| {
            bind_free::<F, A, B>(child, Rc::clone(&k))
        }))
    }
}

impl<F: Functor> Idealised for FreeK<F> {
    type Ideal = WrapK<F>;

    fn split<A: 'static>(ma: Free<F, A>) -> Either<A, Wrap<F, A>> {
        ma.into_either().map_right(Wrap)
    }

    fn embed<A: 'static>(ia: Wrap<F, A>) -> Free<F, A> {
        Free::layer(ia.0)
    }
}

impl<F: EqK, A: PartialEq> PartialEq for Wrap<F, A> {
    fn eq(&self, other: &Self) -> bool {
        F::eq_by::<Free<F, A>>(&self.0, &other.0, &|x: &Free<F, A>, y: &Free<F, A>| x == y)
    }
}

impl<F: DebugK, A: fmt::Debug> fmt::Debug for Wrap<F, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Wrap")
            .field(&ShowKind::<F, Free<F, A>>::new(&self.0, &|child: &Free<F, A>, f: &mut fmt::Formatter<'_>| {
                fmt::Debug::fmt(child, f)
            }))
            .finish()
    }
}

impl<F: EqK> EqK for WrapK<F> {
    fn eq_by<A>(a: &Wrap<F, A>, b: &Wrap<F, A>, eq: &dyn Fn(&A, &A) -> bool) -> bool {
        F::eq_by::<Free<F, A>>(&a.0, &b.0, &|x: &Free<F, A>, y: &Free<F, A>| free_eq::<F, A>(x, y, eq))
    }
}

impl<F: DebugK> DebugK for WrapK<F> {
    fn fmt_by<A>(
        fa: &Wrap<F, A>,
        f: &mut fmt::Formatter<'_>,
        show: &dyn Fn(&A, &mut fmt::Formatter<'_>) -> fmt::Result,
    ) -> fmt::Result {
        f.debug_tuple("Wrap")
            .field(&ShowKind::<F, Free<F, A>>::new(&fa.0, &|child: &Free<F, A>, f: &mut fmt::Formatter<'_>| {
                free_fmt::<F, A>(child, f, show)
            }))
            .finish()
    }
}
