//! Moggi resumptions: resumptions over the free module `F ∘ M`
//!
//! For any shape functor `F` and monad `M`, `FM<F, M, _>` (one `F`-shaped
//! effect whose slots are full `M`-computations) is a module over `M`. The
//! resumption it generates is the classic free monad transformer: an
//! `M`-computation yielding either a final answer or one `F`-shaped effect
//! whose slots recurse. [`force`](MoggiResumption::force) and
//! [`hold`](MoggiResumption::hold) convert between the two views.

use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

use tracing::trace;

use crate::either::Either;
use crate::free::Free;
use crate::identity::{Identity, IdentityK};
use crate::kind::{DebugK, EqK, Functor, Kind, Monad, NaturalTransformation, RModule, ShowKind, TailRec};
use crate::resumption::Resumption;

//-----------------------------------------------------------------------------
// The free module F ∘ M
//-----------------------------------------------------------------------------

/// One `F`-shaped effect whose slots are `M`-computations
pub struct FM<F: Kind, M: Kind, A>(pub F::Of<M::Of<A>>);

/// Brand for [`FM`]
pub struct FMK<F, M>(PhantomData<(F, M)>);

impl<F: Kind, M: Kind> Kind for FMK<F, M> {
    type Of<A> = FM<F, M, A>;
}

impl<F: Functor, M: Functor> Functor for FMK<F, M> {
    fn fmap<A: 'static, B: 'static, G>(fa: FM<F, M, A>, f: G) -> FM<F, M, B>
    where
        G: Fn(A) -> B + 'static,
    {
        let f = Rc::new(f);
        FM(F::fmap::<M::Of<A>, M::Of<B>, _>(fa.0, move |m| {
            let f = Rc::clone(&f);
            M::fmap::<A, B, _>(m, move |a| f(a))
        }))
    }
}

/// The shape is never touched; the continuation is bound into every slot.
impl<F: Functor, M: Monad> RModule<M> for FMK<F, M> {
    fn act<A: 'static, B: 'static, K>(ra: FM<F, M, A>, k: K) -> FM<F, M, B>
    where
        K: Fn(A) -> M::Of<B> + 'static,
    {
        let k = Rc::new(k);
        FM(F::fmap::<M::Of<A>, M::Of<B>, _>(ra.0, move |m| {
            let k = Rc::clone(&k);
            M::bind::<A, B, _>(m, move |a| k(a))
        }))
    }
}

impl<F: EqK, M: EqK> EqK for FMK<F, M> {
    fn eq_by<A>(a: &FM<F, M, A>, b: &FM<F, M, A>, eq: &dyn Fn(&A, &A) -> bool) -> bool {
        F::eq_by::<M::Of<A>>(&a.0, &b.0, &|x: &M::Of<A>, y: &M::Of<A>| M::eq_by::<A>(x, y, eq))
    }
}

impl<F: DebugK, M: DebugK> DebugK for FMK<F, M> {
    fn fmt_by<A>(
        fa: &FM<F, M, A>,
        f: &mut fmt::Formatter<'_>,
        show: &dyn Fn(&A, &mut fmt::Formatter<'_>) -> fmt::Result,
    ) -> fmt::Result {
        f.debug_tuple("FM")
            .field(&ShowKind::<F, M::Of<A>>::new(&fa.0, &|m: &M::Of<A>, f: &mut fmt::Formatter<'_>| {
                M::fmt_by::<A>(m, f, show)
            }))
            .finish()
    }
}

impl<F: EqK, M: EqK, A: PartialEq> PartialEq for FM<F, M, A> {
    fn eq(&self, other: &Self) -> bool {
        <FMK<F, M> as EqK>::eq_by::<A>(self, other, &|x: &A, y: &A| x == y)
    }
}

impl<F: DebugK, M: DebugK, A: fmt::Debug> fmt::Debug for FM<F, M, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        <FMK<F, M> as DebugK>::fmt_by::<A>(self, f, &|a: &A, f: &mut fmt::Formatter<'_>| fmt::Debug::fmt(a, f))
    }
}

//-----------------------------------------------------------------------------
// Moggi resumptions
//-----------------------------------------------------------------------------

/// The free monad transformer over shape `F` and computation type `M`
pub type MoggiResumption<F, M, A> = Resumption<M, FMK<F, M>, A>;

/// One step of a Moggi resumption: a final answer or the next effect
pub type Step<F, M, A> = Either<A, <F as Kind>::Of<MoggiResumption<F, M, A>>>;

impl<F: Functor, M: Monad, A: 'static> Resumption<M, FMK<F, M>, A> {
    /// Peel exactly one layer into the "answer or next effect" view
    pub fn force(self) -> M::Of<Step<F, M, A>> {
        trace!("forcing moggi resumption");
        M::fmap::<Free<FMK<F, M>, A>, Step<F, M, A>, _>(self.into_inner(), |free| match free {
            Free::Pure(a) => Either::Left(a),
            Free::Layer(layer) => {
                let FM(shape) = layer.into_inner();
                Either::Right(F::fmap::<M::Of<Free<FMK<F, M>, A>>, MoggiResumption<F, M, A>, _>(
                    shape,
                    Resumption::<M, FMK<F, M>, A>::from_inner,
                ))
            }
        })
    }

    /// Inverse of [`force`](Self::force)
    pub fn hold(step: M::Of<Step<F, M, A>>) -> Self {
        Resumption::from_inner(M::fmap::<Step<F, M, A>, Free<FMK<F, M>, A>, _>(step, |outcome| {
            outcome.either(Free::Pure, |shape| {
                Free::layer(FM(F::fmap::<MoggiResumption<F, M, A>, M::Of<Free<FMK<F, M>, A>>, _>(
                    shape,
                    Resumption::<M, FMK<F, M>, A>::into_inner,
                )))
            })
        }))
    }

    /// Suspend on one effect whose slots continue as resumptions
    pub fn suspend(shape: F::Of<MoggiResumption<F, M, A>>) -> Self {
        Self::hold(M::pure::<Step<F, M, A>>(Either::Right(shape)))
    }

    /// A single effect whose slots are final answers
    pub fn wrap_effect(shape: F::Of<A>) -> Self {
        Self::lift_module(FM(F::fmap::<A, M::Of<A>, _>(shape, M::pure::<A>)))
    }

    /// Remap the effect shape with `phi_shape` and the computation type with
    /// `phi_monad`, at every depth
    pub fn hoist_moggi<T, N, PF, PM>(self, phi_shape: PF, phi_monad: PM) -> MoggiResumption<T, N, A>
    where
        T: Kind,
        N: Kind,
        PF: NaturalTransformation<F, T>,
        PM: NaturalTransformation<M, N>,
    {
        let phi_monad = Rc::new(phi_monad);
        let layers = HoistLayer { shape: Rc::new(phi_shape), monad: Rc::clone(&phi_monad) };
        self.hoist::<N, FMK<T, N>, Rc<PM>, HoistLayer<PF, PM>>(phi_monad, layers)
    }

    /// Collapse with an `M`-algebra and an `F`-algebra
    pub fn fold_moggi<G, H>(self, f: G, g: H) -> A
    where
        G: Fn(M::Of<A>) -> A + 'static,
        H: Fn(F::Of<A>) -> A + 'static,
    {
        let f = Rc::new(f);
        let inner_f = Rc::clone(&f);
        self.fold(
            move |m| f(m),
            move |layer: FM<F, M, A>| {
                let inner_f = Rc::clone(&inner_f);
                g(F::fmap::<M::Of<A>, A, _>(layer.0, move |m| inner_f(m)))
            },
        )
    }

    /// Interpret effects with `psi` and computations with `phi`, sequencing
    /// everything in `K`
    pub fn interp_moggi<K, P, Q>(self, phi: P, psi: Q) -> K::Of<A>
    where
        K: Monad,
        P: NaturalTransformation<M, K>,
        Q: NaturalTransformation<F, K>,
    {
        let phi = Rc::new(phi);
        let layers = InterpLayer { shape: psi, monad: Rc::clone(&phi), _target: PhantomData };
        self.interp::<K, Rc<P>, InterpLayer<Q, P, K>>(phi, layers)
    }

    /// Grow a Moggi resumption from a seed
    pub fn unfold_moggi<S: 'static, G>(step: G, seed: S) -> Self
    where
        G: Fn(S) -> M::Of<Either<A, F::Of<S>>> + 'static,
    {
        Self::unfold::<S, _>(
            move |s: S| {
                M::fmap::<Either<A, F::Of<S>>, Either<A, FM<F, M, S>>, _>(step(s), |outcome| {
                    outcome.map_right(|shape| FM(F::fmap::<S, M::Of<S>, _>(shape, M::pure::<S>)))
                })
            },
            seed,
        )
    }
}

/// Layer transformation for [`hoist_moggi`](MoggiResumption::hoist_moggi)
struct HoistLayer<PF, PM> {
    shape: Rc<PF>,
    monad: Rc<PM>,
}

impl<F, M, T, N, PF, PM> NaturalTransformation<FMK<F, M>, FMK<T, N>> for HoistLayer<PF, PM>
where
    F: Functor,
    M: Kind,
    T: Kind,
    N: Kind,
    PF: NaturalTransformation<F, T>,
    PM: NaturalTransformation<M, N>,
{
    fn transform<A: 'static>(&self, fa: FM<F, M, A>) -> FM<T, N, A> {
        let monad = Rc::clone(&self.monad);
        let slots = F::fmap::<M::Of<A>, N::Of<A>, _>(fa.0, move |m| {
            <PM as NaturalTransformation<M, N>>::transform::<A>(&monad, m)
        });
        FM(<PF as NaturalTransformation<F, T>>::transform::<N::Of<A>>(&self.shape, slots))
    }
}

/// Layer interpretation for [`interp_moggi`](MoggiResumption::interp_moggi)
struct InterpLayer<Q, P, K> {
    shape: Q,
    monad: Rc<P>,
    _target: PhantomData<K>,
}

impl<F, M, K, Q, P> NaturalTransformation<FMK<F, M>, K> for InterpLayer<Q, P, K>
where
    F: Kind,
    M: Kind,
    K: Monad,
    Q: NaturalTransformation<F, K>,
    P: NaturalTransformation<M, K>,
{
    fn transform<A: 'static>(&self, fa: FM<F, M, A>) -> K::Of<A> {
        let monad = Rc::clone(&self.monad);
        let effect = <Q as NaturalTransformation<F, K>>::transform::<M::Of<A>>(&self.shape, fa.0);
        K::bind::<M::Of<A>, A, _>(effect, move |m| <P as NaturalTransformation<M, K>>::transform::<A>(&monad, m))
    }
}

//-----------------------------------------------------------------------------
// RRR resumptions
//-----------------------------------------------------------------------------

/// A Moggi resumption with the one-slot shape: a plain chain of
/// `M`-computations
pub type RRRResumption<M, A> = MoggiResumption<IdentityK, M, A>;

/// Run the whole chain, returning the final `M`-computation
///
/// Steps are forced one at a time inside [`TailRec::tail_rec`], so chains of
/// any length retract in constant stack.
pub fn retract_rrr<M: TailRec, A: 'static>(resumption: RRRResumption<M, A>) -> M::Of<A> {
    M::tail_rec::<RRRResumption<M, A>, A, _>(resumption, |current| {
        trace!("retracting rrr resumption step");
        M::fmap::<Step<IdentityK, M, A>, Either<A, RRRResumption<M, A>>, _>(current.force(), |step| {
            step.map_right(|Identity(next)| next)
        })
    })
}
