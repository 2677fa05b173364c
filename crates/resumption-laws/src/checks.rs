//! Sample-based checkers for the monad, module, ideal and resumption laws
//!
//! Every checker draws `samples` inputs from the [`Sampler`], evaluates both
//! sides of each law and compares them with the brand's lifted equality.
//! The first failing sample aborts the check with [`LawError::Violation`];
//! otherwise the law is recorded in the returned [`LawReport`].
//!
//! Payloads are always `u32`, which keeps the continuations supplied by the
//! caller monomorphic.

use std::fmt;

use tracing::{info, info_span, warn};

use resumption_core::{
    DebugK, Either, EqK, Functor, Idealised, IdentityTransformation, Kind, Monad, MoggiResumption, RModule,
    Resumption, ResumptionK, ShowKind, Step, FMK,
};

use crate::config::LawConfig;
use crate::error::{LawError, LawResult};
use crate::report::LawReport;
use crate::sampler::Sampler;

//-----------------------------------------------------------------------------
// Comparison helpers
//-----------------------------------------------------------------------------

fn show_payload(a: &u32, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Debug::fmt(a, f)
}

fn render<K: DebugK>(value: &K::Of<u32>) -> String {
    format!("{:?}", ShowKind::<K, u32>::new(value, &show_payload))
}

fn compare<K: EqK + DebugK>(lhs: &K::Of<u32>, rhs: &K::Of<u32>) -> Result<(), String> {
    if K::eq_by::<u32>(lhs, rhs, &|x: &u32, y: &u32| x == y) {
        Ok(())
    } else {
        Err(format!("{} != {}", render::<K>(lhs), render::<K>(rhs)))
    }
}

fn compare_payload(lhs: u32, rhs: u32) -> Result<(), String> {
    if lhs == rhs {
        Ok(())
    } else {
        Err(format!("{} != {}", lhs, rhs))
    }
}

fn step_eq<F, M>(a: &Step<F, M, u32>, b: &Step<F, M, u32>) -> bool
where
    F: Functor + EqK,
    M: Monad + EqK,
{
    match (a, b) {
        (Either::Left(x), Either::Left(y)) => x == y,
        (Either::Right(x), Either::Right(y)) => F::eq_by::<MoggiResumption<F, M, u32>>(
            x,
            y,
            &|p: &MoggiResumption<F, M, u32>, q: &MoggiResumption<F, M, u32>| p == q,
        ),
        _ => false,
    }
}

fn step_fmt<F, M>(step: &Step<F, M, u32>, f: &mut fmt::Formatter<'_>) -> fmt::Result
where
    F: Functor + DebugK,
    M: Monad + DebugK,
{
    match step {
        Either::Left(a) => write!(f, "Left({:?})", a),
        Either::Right(shape) => write!(
            f,
            "Right({:?})",
            ShowKind::<F, MoggiResumption<F, M, u32>>::new(
                shape,
                &|r: &MoggiResumption<F, M, u32>, f: &mut fmt::Formatter<'_>| fmt::Debug::fmt(r, f)
            )
        ),
    }
}

fn compare_observed<T: PartialEq + fmt::Debug>(lhs: T, rhs: T) -> Result<(), String> {
    if lhs == rhs {
        Ok(())
    } else {
        Err(format!("{:?} != {:?}", lhs, rhs))
    }
}

fn compare_steps<F, M>(lhs: &M::Of<Step<F, M, u32>>, rhs: &M::Of<Step<F, M, u32>>) -> Result<(), String>
where
    F: Functor + EqK + DebugK,
    M: Monad + EqK + DebugK,
{
    if M::eq_by::<Step<F, M, u32>>(lhs, rhs, &|a: &Step<F, M, u32>, b: &Step<F, M, u32>| step_eq::<F, M>(a, b)) {
        return Ok(());
    }
    let show = |value: &M::Of<Step<F, M, u32>>| {
        format!(
            "{:?}",
            ShowKind::<M, Step<F, M, u32>>::new(value, &|s: &Step<F, M, u32>, f: &mut fmt::Formatter<'_>| {
                step_fmt::<F, M>(s, f)
            })
        )
    };
    Err(format!("{} != {}", show(lhs), show(rhs)))
}

fn recover<M: Idealised>(split: Either<u32, <M::Ideal as Kind>::Of<u32>>) -> M::Of<u32> {
    split.either(M::pure::<u32>, M::embed::<u32>)
}

/// Run `holds` on `samples` inputs and record the law if none fails
fn verify<H>(samples: usize, report: &mut LawReport, law: &str, mut holds: H) -> LawResult<()>
where
    H: FnMut() -> Result<(), String>,
{
    for sample in 0..samples {
        if let Err(detail) = holds() {
            warn!(subject = %report.subject, law, sample, %detail, "law violated");
            return Err(LawError::violation(
                format!("{}: {}", report.subject, law),
                format!("sample {}: {}", sample, detail),
            ));
        }
    }
    info!(subject = %report.subject, law, samples, "law verified");
    report.record(law, samples);
    Ok(())
}

//-----------------------------------------------------------------------------
// Law Checker
//-----------------------------------------------------------------------------

/// Checks algebraic laws on sampled inputs
#[derive(Debug, Clone)]
pub struct LawChecker {
    samples: usize,
    sampler: Sampler,
}

impl LawChecker {
    pub fn new(config: &LawConfig) -> Self {
        Self { samples: config.samples, sampler: Sampler::from_config(config) }
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Left identity, right identity and associativity of `M`
    ///
    /// `generate` builds an arbitrary computation; `f` and `g` are the
    /// continuations used on both sides of each law.
    pub fn check_monad_laws<M, G, F, H>(&mut self, subject: &str, generate: G, f: F, g: H) -> LawResult<LawReport>
    where
        M: Monad + EqK + DebugK,
        G: Fn(&mut Sampler) -> M::Of<u32>,
        F: Fn(u32) -> M::Of<u32> + Clone + 'static,
        H: Fn(u32) -> M::Of<u32> + Clone + 'static,
    {
        let _span = info_span!("monad_laws", subject).entered();
        let mut report = LawReport::new(subject);
        let (samples, sampler) = (self.samples, &mut self.sampler);

        verify(samples, &mut report, "left identity", || {
            let a = sampler.value();
            let lhs = M::bind::<u32, u32, _>(M::pure::<u32>(a), f.clone());
            compare::<M>(&lhs, &f(a))
        })?;

        verify(samples, &mut report, "right identity", || {
            let (m, expected) = sampler.twice(&generate);
            compare::<M>(&M::bind::<u32, u32, _>(m, M::pure::<u32>), &expected)
        })?;

        verify(samples, &mut report, "associativity", || {
            let (m, copy) = sampler.twice(&generate);
            let lhs = M::bind::<u32, u32, _>(M::bind::<u32, u32, _>(m, f.clone()), g.clone());
            let (f, g) = (f.clone(), g.clone());
            let rhs = M::bind::<u32, u32, _>(copy, move |a| M::bind::<u32, u32, _>(f(a), g.clone()));
            compare::<M>(&lhs, &rhs)
        })?;

        Ok(report)
    }

    /// The monad laws for computations that can only be compared by running
    /// them
    ///
    /// Both sides of each law are passed to `observe` together with the same
    /// sampled input (an environment, an initial state, ...) and the
    /// observations are compared.
    pub fn check_monad_laws_observed<M, T, G, F, H, O>(
        &mut self,
        subject: &str,
        generate: G,
        f: F,
        g: H,
        observe: O,
    ) -> LawResult<LawReport>
    where
        M: Monad,
        T: PartialEq + fmt::Debug,
        G: Fn(&mut Sampler) -> M::Of<u32>,
        F: Fn(u32) -> M::Of<u32> + Clone + 'static,
        H: Fn(u32) -> M::Of<u32> + Clone + 'static,
        O: Fn(M::Of<u32>, u32) -> T,
    {
        let _span = info_span!("monad_laws", subject).entered();
        let mut report = LawReport::new(subject);
        let (samples, sampler) = (self.samples, &mut self.sampler);

        verify(samples, &mut report, "left identity", || {
            let (a, input) = (sampler.value(), sampler.value());
            let lhs = M::bind::<u32, u32, _>(M::pure::<u32>(a), f.clone());
            compare_observed(observe(lhs, input), observe(f(a), input))
        })?;

        verify(samples, &mut report, "right identity", || {
            let (m, expected) = sampler.twice(&generate);
            let input = sampler.value();
            compare_observed(observe(M::bind::<u32, u32, _>(m, M::pure::<u32>), input), observe(expected, input))
        })?;

        verify(samples, &mut report, "associativity", || {
            let (m, copy) = sampler.twice(&generate);
            let input = sampler.value();
            let lhs = M::bind::<u32, u32, _>(M::bind::<u32, u32, _>(m, f.clone()), g.clone());
            let (f, g) = (f.clone(), g.clone());
            let rhs = M::bind::<u32, u32, _>(copy, move |a| M::bind::<u32, u32, _>(f(a), g.clone()));
            compare_observed(observe(lhs, input), observe(rhs, input))
        })?;

        Ok(report)
    }

    /// Identity and associativity of the action of `M` on `R`
    pub fn check_module_laws<M, R, G, F, H>(
        &mut self,
        subject: &str,
        generate: G,
        f: F,
        g: H,
    ) -> LawResult<LawReport>
    where
        M: Monad,
        R: RModule<M> + EqK + DebugK,
        G: Fn(&mut Sampler) -> R::Of<u32>,
        F: Fn(u32) -> M::Of<u32> + Clone + 'static,
        H: Fn(u32) -> M::Of<u32> + Clone + 'static,
    {
        let _span = info_span!("module_laws", subject).entered();
        let mut report = LawReport::new(subject);
        let (samples, sampler) = (self.samples, &mut self.sampler);

        verify(samples, &mut report, "module identity", || {
            let (r, expected) = sampler.twice(&generate);
            compare::<R>(&R::act::<u32, u32, _>(r, M::pure::<u32>), &expected)
        })?;

        verify(samples, &mut report, "module associativity", || {
            let (r, copy) = sampler.twice(&generate);
            let lhs = R::act::<u32, u32, _>(R::act::<u32, u32, _>(r, f.clone()), g.clone());
            let (f, g) = (f.clone(), g.clone());
            let rhs = R::act::<u32, u32, _>(copy, move |a| M::bind::<u32, u32, _>(f(a), g.clone()));
            compare::<R>(&lhs, &rhs)
        })?;

        Ok(report)
    }

    /// `split(pure(a)) == Left(a)` on sampled payloads
    pub fn check_pure_split<M>(&mut self, subject: &str) -> LawResult<LawReport>
    where
        M: Idealised,
        M::Ideal: DebugK,
    {
        let _span = info_span!("ideal_laws", subject).entered();
        let mut report = LawReport::new(subject);
        let (samples, sampler) = (self.samples, &mut self.sampler);

        verify(samples, &mut report, "split of pure", || {
            let a = sampler.value();
            match M::split::<u32>(M::pure::<u32>(a)) {
                Either::Left(b) => compare_payload(b, a),
                Either::Right(ideal) => Err(format!("pure {} split as {}", a, render::<M::Ideal>(&ideal))),
            }
        })?;

        Ok(report)
    }

    /// The split/embed round trips of an idealised monad
    ///
    /// `generate` builds an arbitrary element of the ideal.
    pub fn check_ideal_laws<M, G>(&mut self, subject: &str, generate: G) -> LawResult<LawReport>
    where
        M: Idealised + EqK + DebugK,
        M::Ideal: EqK + DebugK,
        G: Fn(&mut Sampler) -> <M::Ideal as Kind>::Of<u32>,
    {
        let mut report = self.check_pure_split::<M>(subject)?;
        let _span = info_span!("ideal_laws", subject).entered();
        let (samples, sampler) = (self.samples, &mut self.sampler);

        verify(samples, &mut report, "split of embed", || {
            let (ideal, expected) = sampler.twice(&generate);
            match M::split::<u32>(M::embed::<u32>(ideal)) {
                Either::Right(back) => compare::<M::Ideal>(&back, &expected),
                Either::Left(a) => Err(format!("{} split as pure {}", render::<M::Ideal>(&expected), a)),
            }
        })?;

        verify(samples, &mut report, "split is recoverable", || {
            let (ideal, expected) = sampler.twice(&generate);
            compare::<M>(&recover::<M>(M::split::<u32>(M::embed::<u32>(ideal))), &M::embed::<u32>(expected))?;
            let a = sampler.value();
            compare::<M>(&recover::<M>(M::split::<u32>(M::pure::<u32>(a))), &M::pure::<u32>(a))
        })?;

        Ok(report)
    }

    /// Monad laws of `Resumption<M, R, _>` plus `hoist(id, id) == id`
    pub fn check_resumption_laws<M, R, G, F, H>(
        &mut self,
        subject: &str,
        generate: G,
        f: F,
        g: H,
    ) -> LawResult<LawReport>
    where
        M: Monad + EqK + DebugK,
        R: RModule<M> + EqK + DebugK,
        G: Fn(&mut Sampler) -> Resumption<M, R, u32>,
        F: Fn(u32) -> Resumption<M, R, u32> + Clone + 'static,
        H: Fn(u32) -> Resumption<M, R, u32> + Clone + 'static,
    {
        let mut report = self.check_monad_laws::<ResumptionK<M, R>, _, _, _>(subject, &generate, f, g)?;
        let _span = info_span!("resumption_laws", subject).entered();
        let (samples, sampler) = (self.samples, &mut self.sampler);

        verify(samples, &mut report, "hoist identity", || {
            let (r, expected) = sampler.twice(&generate);
            let hoisted = r.hoist::<M, R, _, _>(IdentityTransformation, IdentityTransformation);
            compare::<ResumptionK<M, R>>(&hoisted, &expected)
        })?;

        Ok(report)
    }

    /// `hold ∘ force` and `force ∘ hold` are identities
    pub fn check_moggi_round_trip<F, M, G>(&mut self, subject: &str, generate: G) -> LawResult<LawReport>
    where
        F: Functor + EqK + DebugK,
        M: Monad + EqK + DebugK,
        G: Fn(&mut Sampler) -> MoggiResumption<F, M, u32>,
    {
        let _span = info_span!("moggi_round_trip", subject).entered();
        let mut report = LawReport::new(subject);
        let (samples, sampler) = (self.samples, &mut self.sampler);

        verify(samples, &mut report, "hold after force", || {
            let (r, expected) = sampler.twice(&generate);
            compare::<ResumptionK<M, FMK<F, M>>>(&MoggiResumption::<F, M, u32>::hold(r.force()), &expected)
        })?;

        verify(samples, &mut report, "force after hold", || {
            let (r, copy) = sampler.twice(&generate);
            let forced_twice = MoggiResumption::<F, M, u32>::hold(r.force()).force();
            compare_steps::<F, M>(&forced_twice, &copy.force())
        })?;

        Ok(report)
    }

    /// Folding commutes with `lift_monad` and `lift_module`
    ///
    /// The outer algebra `f` must undo `M::pure`; that precondition is
    /// checked first.
    pub fn check_fold_constructors<M, R, GM, GR, FA, GA>(
        &mut self,
        subject: &str,
        generate_monad: GM,
        generate_module: GR,
        f: FA,
        g: GA,
    ) -> LawResult<LawReport>
    where
        M: Monad,
        R: RModule<M>,
        GM: Fn(&mut Sampler) -> M::Of<u32>,
        GR: Fn(&mut Sampler) -> R::Of<u32>,
        FA: Fn(M::Of<u32>) -> u32 + Clone + 'static,
        GA: Fn(R::Of<u32>) -> u32 + Clone + 'static,
    {
        let _span = info_span!("fold_constructors", subject).entered();
        let mut report = LawReport::new(subject);
        let (samples, sampler) = (self.samples, &mut self.sampler);

        verify(samples, &mut report, "outer algebra undoes pure", || {
            let a = sampler.value();
            compare_payload(f(M::pure::<u32>(a)), a)
        })?;

        verify(samples, &mut report, "fold of lift_monad", || {
            let (m, copy) = sampler.twice(&generate_monad);
            let folded = Resumption::<M, R, u32>::lift_monad(m).fold(f.clone(), g.clone());
            compare_payload(folded, f(copy))
        })?;

        verify(samples, &mut report, "fold of lift_module", || {
            let (r, copy) = sampler.twice(&generate_module);
            let folded = Resumption::<M, R, u32>::lift_module(r).fold(f.clone(), g.clone());
            compare_payload(folded, f(M::pure::<u32>(g(copy))))
        })?;

        Ok(report)
    }
}
