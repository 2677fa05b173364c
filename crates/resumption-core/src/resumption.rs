//! Generalised resumptions: `Resumption<M, R, A> = M (Free R A)`
//!
//! A resumption is an `M`-computation producing either a final answer or an
//! `R`-layer whose slots resume further. Because `R` is a module over `M`,
//! sequencing never has to run the inner layers: a continuation is pushed
//! into each layer with [`RModule::act`] and the outer computation stays a
//! pure `M`-return.
//!
//! Layers produced by [`Resumption::bind`] and [`Resumption::unfold`] are
//! built on first inspection, so a resumption may be infinite as long as it
//! is consumed one layer at a time.

use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

use tracing::trace;

use crate::either::Either;
use crate::free::{self, Free};
use crate::kind::{ComposeK, DebugK, EqK, Functor, Kind, Monad, NaturalTransformation, RModule, ShowKind};

//-----------------------------------------------------------------------------
// Resumption
//-----------------------------------------------------------------------------

/// An `M`-computation of the free structure generated by `R`
pub struct Resumption<M: Kind, R: Kind, A>(M::Of<Free<R, A>>);

/// Brand for `Resumption<M, R, _>`
pub struct ResumptionK<M, R>(PhantomData<(M, R)>);

impl<M: Kind, R: Kind> Kind for ResumptionK<M, R> {
    type Of<A> = Resumption<M, R, A>;
}

impl<M: Kind, R: Kind, A> Resumption<M, R, A> {
    /// Wrap an `M`-computation of a free structure
    pub fn from_inner(inner: M::Of<Free<R, A>>) -> Self {
        Resumption(inner)
    }

    /// The underlying `M`-computation
    pub fn into_inner(self) -> M::Of<Free<R, A>> {
        self.0
    }

    pub fn inner(&self) -> &M::Of<Free<R, A>> {
        &self.0
    }
}

impl<M: Monad, R: Kind, A: 'static> Resumption<M, R, A> {
    /// A resumption that is already a free structure, with no outer effect
    pub fn from_free(free: Free<R, A>) -> Self {
        Resumption(M::pure::<Free<R, A>>(free))
    }
}

//-----------------------------------------------------------------------------
// Monad structure
//-----------------------------------------------------------------------------

fn bind_layers<M, R, A, B>(free: Free<R, A>, k: Rc<dyn Fn(A) -> Resumption<M, R, B>>) -> M::Of<Free<R, B>>
where
    M: Monad,
    R: RModule<M>,
    A: 'static,
    B: 'static,
{
    match free {
        Free::Pure(a) => k(a).0,
        Free::Layer(layer) => M::pure::<Free<R, B>>(Free::defer(move || {
            R::act::<Free<R, A>, Free<R, B>, _>(layer.into_inner(), move |child| {
                bind_layers::<M, R, A, B>(child, Rc::clone(&k))
            })
        })),
    }
}

impl<M: Monad, R: RModule<M>, A: 'static> Resumption<M, R, A> {
    /// `return`: a pure answer with no layers
    pub fn pure(a: A) -> Self {
        Self::from_free(Free::Pure(a))
    }

    /// Sequence with a continuation
    ///
    /// A pure answer hands over to the continuation's own computation. A layer
    /// gets the continuation pushed into every slot through the module action
    /// and is returned with `M::pure`.
    pub fn bind<B: 'static, K>(self, k: K) -> Resumption<M, R, B>
    where
        K: Fn(A) -> Resumption<M, R, B> + 'static,
    {
        let k: Rc<dyn Fn(A) -> Resumption<M, R, B>> = Rc::new(k);
        Resumption(M::bind::<Free<R, A>, Free<R, B>, _>(self.0, move |free| {
            bind_layers::<M, R, A, B>(free, Rc::clone(&k))
        }))
    }

    pub fn map<B: 'static, F>(self, f: F) -> Resumption<M, R, B>
    where
        F: Fn(A) -> B + 'static,
    {
        self.bind(move |a| Resumption::<M, R, B>::pure(f(a)))
    }

    /// Run a bare `M`-computation as a resumption with no layers
    pub fn lift_monad(m: M::Of<A>) -> Self {
        Resumption(M::fmap::<A, Free<R, A>, _>(m, Free::Pure))
    }

    /// A single `R`-layer whose slots are pure answers
    pub fn lift_module(r: R::Of<A>) -> Self {
        Self::from_free(Free::lift_layer(r))
    }

    /// A free structure of `M`-computations as a resumption
    pub fn distr(free: Free<R, M::Of<A>>) -> Self {
        Resumption(free::distr::<M, R, A>(free))
    }

    /// Collapse the whole resumption with an `M`-algebra and an `R`-algebra
    ///
    /// Layers are folded bottom-up with `g`, then `f` collapses the outer
    /// computation.
    pub fn fold<F, G>(self, f: F, g: G) -> A
    where
        F: FnOnce(M::Of<A>) -> A,
        G: Fn(R::Of<A>) -> A + 'static,
    {
        let g: Rc<dyn Fn(R::Of<A>) -> A> = Rc::new(g);
        f(M::fmap::<Free<R, A>, A, _>(self.0, move |free| {
            let g = Rc::clone(&g);
            free.fold::<A, _, _>(|a| a, move |layer| g(layer))
        }))
    }

    /// Interpret the outer computation with `phi` and every layer with `psi`,
    /// sequencing them in `K`
    ///
    /// Layers run depth-first, left to right through each layer's slots, in
    /// the order `K::bind` visits them.
    pub fn interp<K, P, Q>(self, phi: P, psi: Q) -> K::Of<A>
    where
        K: Monad,
        P: NaturalTransformation<M, K>,
        Q: NaturalTransformation<R, K>,
    {
        let psi = Rc::new(psi);
        let outer = <P as NaturalTransformation<M, K>>::transform::<Free<R, A>>(&phi, self.0);
        K::bind::<Free<R, A>, A, _>(outer, move |free| interp_layers::<K, R, A, Q>(free, Rc::clone(&psi)))
    }

    /// Look at the first layer only
    ///
    /// `on_pure` receives a final answer, `on_layer` receives the first layer
    /// with each slot resumable. The result stays inside `M`.
    pub fn fold_first_layer<B: 'static, P, L>(self, on_pure: P, on_layer: L) -> M::Of<B>
    where
        P: Fn(A) -> B + 'static,
        L: Fn(R::Of<Resumption<M, R, A>>) -> B + 'static,
    {
        M::fmap::<Free<R, A>, B, _>(self.0, move |free| match free {
            Free::Pure(a) => on_pure(a),
            Free::Layer(layer) => on_layer(resumable_slots::<M, R, A>(layer.into_inner())),
        })
    }

    /// [`fold_first_layer`](Self::fold_first_layer) whose handlers continue as
    /// resumptions
    pub fn fold_first_layer_m<B: 'static, P, L>(self, on_pure: P, on_layer: L) -> Resumption<M, R, B>
    where
        P: Fn(A) -> Resumption<M, R, B> + 'static,
        L: Fn(R::Of<Resumption<M, R, A>>) -> Resumption<M, R, B> + 'static,
    {
        Resumption(M::bind::<Free<R, A>, Free<R, B>, _>(self.0, move |free| match free {
            Free::Pure(a) => on_pure(a).0,
            Free::Layer(layer) => on_layer(resumable_slots::<M, R, A>(layer.into_inner())).0,
        }))
    }

    /// Grow a resumption from a seed
    ///
    /// `step` either finishes with an answer or yields a layer of new seeds.
    /// Only the first step runs here; each seed in a layer is stepped when
    /// that layer is first inspected. Folds and interpretations terminate
    /// only when every explored path eventually reaches an answer.
    pub fn unfold<S: 'static, F>(step: F, seed: S) -> Self
    where
        F: Fn(S) -> M::Of<Either<A, R::Of<S>>> + 'static,
    {
        let step: Rc<dyn Fn(S) -> M::Of<Either<A, R::Of<S>>>> = Rc::new(step);
        Resumption(unfold_layers::<M, R, A, S>(seed, step))
    }
}

impl<M: Monad, R: RModule<M>, A: 'static> Resumption<M, R, Resumption<M, R, A>> {
    pub fn flatten(self) -> Resumption<M, R, A> {
        self.bind(|inner| inner)
    }
}

fn resumable_slots<M, R, A>(layer: R::Of<Free<R, A>>) -> R::Of<Resumption<M, R, A>>
where
    M: Monad,
    R: Functor,
    A: 'static,
{
    R::fmap::<Free<R, A>, Resumption<M, R, A>, _>(layer, Resumption::<M, R, A>::from_free)
}

fn interp_layers<K, R, A, Q>(free: Free<R, A>, psi: Rc<Q>) -> K::Of<A>
where
    K: Monad,
    R: Kind,
    A: 'static,
    Q: NaturalTransformation<R, K>,
{
    match free {
        Free::Pure(a) => K::pure::<A>(a),
        Free::Layer(layer) => {
            trace!("interpreting resumption layer");
            let next = Rc::clone(&psi);
            let effect = <Q as NaturalTransformation<R, K>>::transform::<Free<R, A>>(&psi, layer.into_inner());
            K::bind::<Free<R, A>, A, _>(effect, move |child| interp_layers::<K, R, A, Q>(child, Rc::clone(&next)))
        }
    }
}

fn unfold_layers<M, R, A, S>(seed: S, step: Rc<dyn Fn(S) -> M::Of<Either<A, R::Of<S>>>>) -> M::Of<Free<R, A>>
where
    M: Monad,
    R: RModule<M>,
    A: 'static,
    S: 'static,
{
    trace!("unfolding resumption step");
    let next = Rc::clone(&step);
    M::bind::<Either<A, R::Of<S>>, Free<R, A>, _>(step(seed), move |outcome| match outcome {
        Either::Left(a) => M::pure::<Free<R, A>>(Free::Pure(a)),
        Either::Right(seeds) => {
            let next = Rc::clone(&next);
            M::pure::<Free<R, A>>(Free::defer(move || {
                R::act::<S, Free<R, A>, _>(seeds, move |s| unfold_layers::<M, R, A, S>(s, Rc::clone(&next)))
            }))
        }
    })
}

//-----------------------------------------------------------------------------
// Changing the computation type
//-----------------------------------------------------------------------------

impl<M: Functor, R: Functor, A: 'static> Resumption<M, R, A> {
    /// Map the outer computation with `phi` and every layer with `psi`
    ///
    /// Both transformations must be natural at every payload type, since
    /// they are applied at each nesting depth.
    pub fn hoist<N, S, P, Q>(self, phi: P, psi: Q) -> Resumption<N, S, A>
    where
        N: Kind,
        S: Kind,
        P: NaturalTransformation<M, N>,
        Q: NaturalTransformation<R, S>,
    {
        let psi = Rc::new(psi);
        let inner = M::fmap::<Free<R, A>, Free<S, A>, _>(self.0, move |free| {
            free.hoist::<S, Rc<Q>>(Rc::clone(&psi))
        });
        Resumption(<P as NaturalTransformation<M, N>>::transform::<Free<S, A>>(&phi, inner))
    }
}

impl<M: Kind, R: Kind, A: 'static> Resumption<M, R, A> {
    /// Reinterpret the outer computation as producing a fresh first layer
    /// under a different computation type `K`
    pub fn split_head<K, P>(self, phi: P) -> Resumption<K, R, A>
    where
        K: Functor,
        P: NaturalTransformation<M, ComposeK<K, R>>,
    {
        let peeled: K::Of<R::Of<Free<R, A>>> =
            <P as NaturalTransformation<M, ComposeK<K, R>>>::transform::<Free<R, A>>(&phi, self.0);
        Resumption(K::fmap::<R::Of<Free<R, A>>, Free<R, A>, _>(peeled, Free::<R, A>::layer))
    }
}

//-----------------------------------------------------------------------------
// Brand instances
//-----------------------------------------------------------------------------

impl<M: Monad, R: RModule<M>> Functor for ResumptionK<M, R> {
    fn fmap<A: 'static, B: 'static, F>(fa: Resumption<M, R, A>, f: F) -> Resumption<M, R, B>
    where
        F: Fn(A) -> B + 'static,
    {
        fa.map(f)
    }
}

impl<M: Monad, R: RModule<M>> Monad for ResumptionK<M, R> {
    fn pure<A: 'static>(a: A) -> Resumption<M, R, A> {
        Resumption::pure(a)
    }

    fn bind<A: 'static, B: 'static, F>(ma: Resumption<M, R, A>, f: F) -> Resumption<M, R, B>
    where
        F: Fn(A) -> Resumption<M, R, B> + 'static,
    {
        ma.bind(f)
    }
}

impl<M: EqK, R: EqK> EqK for ResumptionK<M, R> {
    fn eq_by<A>(a: &Resumption<M, R, A>, b: &Resumption<M, R, A>, eq: &dyn Fn(&A, &A) -> bool) -> bool {
        M::eq_by::<Free<R, A>>(&a.0, &b.0, &|x: &Free<R, A>, y: &Free<R, A>| free::free_eq::<R, A>(x, y, eq))
    }
}

impl<M: DebugK, R: DebugK> DebugK for ResumptionK<M, R> {
    fn fmt_by<A>(
        fa: &Resumption<M, R, A>,
        f: &mut fmt::Formatter<'_>,
        show: &dyn Fn(&A, &mut fmt::Formatter<'_>) -> fmt::Result,
    ) -> fmt::Result {
        f.debug_tuple("Resumption")
            .field(&ShowKind::<M, Free<R, A>>::new(&fa.0, &|free: &Free<R, A>, f: &mut fmt::Formatter<'_>| {
                free::free_fmt::<R, A>(free, f, show)
            }))
            .finish()
    }
}

impl<M: EqK, R: EqK, A: PartialEq> PartialEq for Resumption<M, R, A> {
    fn eq(&self, other: &Self) -> bool {
        <ResumptionK<M, R> as EqK>::eq_by::<A>(self, other, &|x: &A, y: &A| x == y)
    }
}

impl<M: DebugK, R: DebugK, A: fmt::Debug> fmt::Debug for Resumption<M, R, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        <ResumptionK<M, R> as DebugK>::fmt_by::<A>(self, f, &|a: &A, f: &mut fmt::Formatter<'_>| {
            fmt::Debug::fmt(a, f)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::{Identity, IdentityK};
    use crate::kind::IdentityTransformation;
    use crate::moggi::{FMK, FM};

    // A resumption over the identity monad whose layers are single
    // identity-wrapped steps.
    type Steps<A> = Resumption<IdentityK, FMK<IdentityK, IdentityK>, A>;

    fn step_once<A: 'static>(next: Steps<A>) -> Steps<A> {
        Steps::from_free(Free::layer(FM(Identity(next.into_inner()))))
    }

    fn steps<A: 'static>(n: usize, a: A) -> Steps<A> {
        let mut r = Steps::pure(a);
        for _ in 0..n {
            r = step_once(r);
        }
        r
    }

    fn count_steps<A: 'static>(r: Steps<A>) -> usize {
        r.map(|_| 0usize).fold(
            |Identity(n): Identity<usize>| n,
            |layer: FM<IdentityK, IdentityK, usize>| {
                let FM(Identity(Identity(n))) = layer;
                n + 1
            },
        )
    }

    #[test]
    fn test_pure_then_bind_is_application() {
        let lhs = Steps::pure(4usize).bind(|n| steps(n, n * 10));
        assert_eq!(lhs, steps(4, 40));
    }

    #[test]
    fn test_bind_appends_steps_after_existing_layers() {
        let r = steps(2, 3usize).bind(|n| steps(n, n));
        assert_eq!(count_steps(r), 5);
    }

    #[test]
    fn test_fold_first_layer_reports_answer_or_layer() {
        let answer = Steps::pure("done").fold_first_layer(|a| Either::Left(a), |_| Either::Right(()));
        assert_eq!(answer, Identity(Either::Left("done")));

        let layered = steps(1, "done").fold_first_layer(
            |_| 0usize,
            |layer: FM<IdentityK, IdentityK, Steps<&'static str>>| {
                let FM(Identity(Identity(rest))) = layer;
                count_steps(rest) + 1
            },
        );
        assert_eq!(layered, Identity(1));
    }

    #[test]
    fn test_hoist_with_identities_is_identity() {
        let hoisted: Steps<u8> = steps(3, 7u8).hoist(IdentityTransformation, IdentityTransformation);
        assert_eq!(hoisted, steps(3, 7u8));
    }

    #[test]
    fn test_unfold_counts_down() {
        let r = Steps::unfold(
            |n: u32| {
                if n == 0 {
                    Identity(Either::Left("done"))
                } else {
                    Identity(Either::Right(FM(Identity(Identity(n - 1)))))
                }
            },
            3,
        );
        assert_eq!(r, steps(3, "done"));
    }

    /// Turns an identity computation into one extra leading step
    struct Delay;

    impl NaturalTransformation<IdentityK, ComposeK<IdentityK, FMK<IdentityK, IdentityK>>> for Delay {
        fn transform<A: 'static>(&self, fa: Identity<A>) -> Identity<FM<IdentityK, IdentityK, A>> {
            Identity(FM(Identity(fa)))
        }
    }

    #[test]
    fn test_split_head_adds_a_layer() {
        assert_eq!(steps(2, 'x').split_head::<IdentityK, _>(Delay), steps(3, 'x'));
    }

    #[test]
    fn test_fold_first_layer_m_continues() {
        let skipped = steps(2, 5u32).fold_first_layer_m(Steps::pure, |layer: FM<IdentityK, IdentityK, Steps<u32>>| {
            let FM(Identity(Identity(rest))) = layer;
            rest.map(|a| a + 1)
        });
        assert_eq!(skipped, steps(1, 6u32));

        let extended = Steps::pure(3u32).fold_first_layer_m(|a| steps(1, a), |_| Steps::pure(0));
        assert_eq!(extended, steps(1, 3u32));
    }

    #[test]
    fn test_flatten_joins_nested_resumptions() {
        let nested = steps(1, steps(2, 'z'));
        assert_eq!(nested.flatten(), steps(3, 'z'));
    }
}
