//! The option monad and the one-point module of failure

use std::fmt;
use std::marker::PhantomData;

use resumption_core::{DebugK, Either, EqK, Functor, Idealised, Kind, Monad, RModule, ShowWith, TailRec};

/// Brand for `Option`
#[derive(Debug, Clone, Copy, Default)]
pub struct OptionK;

impl Kind for OptionK {
    type Of<A> = Option<A>;
}

impl Functor for OptionK {
    fn fmap<A: 'static, B: 'static, F>(fa: Option<A>, f: F) -> Option<B>
    where
        F: Fn(A) -> B + 'static,
    {
        fa.map(f)
    }
}

impl Monad for OptionK {
    fn pure<A: 'static>(a: A) -> Option<A> {
        Some(a)
    }

    fn bind<A: 'static, B: 'static, F>(ma: Option<A>, f: F) -> Option<B>
    where
        F: Fn(A) -> Option<B> + 'static,
    {
        ma.and_then(f)
    }
}

impl TailRec for OptionK {
    fn tail_rec<S: 'static, A: 'static, F>(seed: S, step: F) -> Option<A>
    where
        F: Fn(S) -> Option<Either<A, S>> + 'static,
    {
        let mut state = seed;
        loop {
            match step(state)? {
                Either::Left(a) => return Some(a),
                Either::Right(next) => state = next,
            }
        }
    }
}

impl EqK for OptionK {
    fn eq_by<A>(a: &Option<A>, b: &Option<A>, eq: &dyn Fn(&A, &A) -> bool) -> bool {
        match (a, b) {
            (Some(x), Some(y)) => eq(x, y),
            (None, None) => true,
            _ => false,
        }
    }
}

impl DebugK for OptionK {
    fn fmt_by<A>(
        fa: &Option<A>,
        f: &mut fmt::Formatter<'_>,
        show: &dyn Fn(&A, &mut fmt::Formatter<'_>) -> fmt::Result,
    ) -> fmt::Result {
        match fa {
            Some(a) => f.debug_tuple("Some").field(&ShowWith::new(a, show)).finish(),
            None => f.write_str("None"),
        }
    }
}

/// The failed computation, carrying no payload
pub struct Unit<A>(PhantomData<A>);

impl<A> Unit<A> {
    pub fn new() -> Self {
        Unit(PhantomData)
    }
}

impl<A> Default for Unit<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Clone for Unit<A> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<A> Copy for Unit<A> {}

impl<A> PartialEq for Unit<A> {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl<A> Eq for Unit<A> {}

impl<A> fmt::Debug for Unit<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Unit")
    }
}

/// Brand for [`Unit`]
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitK;

impl Kind for UnitK {
    type Of<A> = Unit<A>;
}

impl Functor for UnitK {
    fn fmap<A: 'static, B: 'static, F>(_fa: Unit<A>, _f: F) -> Unit<B>
    where
        F: Fn(A) -> B + 'static,
    {
        Unit::new()
    }
}

impl RModule<OptionK> for UnitK {
    fn act<A: 'static, B: 'static, K>(_ra: Unit<A>, _k: K) -> Unit<B>
    where
        K: Fn(A) -> Option<B> + 'static,
    {
        Unit::new()
    }
}

impl EqK for UnitK {
    fn eq_by<A>(_a: &Unit<A>, _b: &Unit<A>, _eq: &dyn Fn(&A, &A) -> bool) -> bool {
        true
    }
}

impl DebugK for UnitK {
    fn fmt_by<A>(
        fa: &Unit<A>,
        f: &mut fmt::Formatter<'_>,
        _show: &dyn Fn(&A, &mut fmt::Formatter<'_>) -> fmt::Result,
    ) -> fmt::Result {
        fmt::Debug::fmt(fa, f)
    }
}

impl Idealised for OptionK {
    type Ideal = UnitK;

    fn split<A: 'static>(ma: Option<A>) -> Either<A, Unit<A>> {
        match ma {
            Some(a) => Either::Left(a),
            None => Either::Right(Unit::new()),
        }
    }

    fn embed<A: 'static>(_ia: Unit<A>) -> Option<A> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split() {
        assert_eq!(OptionK::split(Some(5)), Either::Left(5));
        assert_eq!(OptionK::split(None::<i32>), Either::Right(Unit::new()));
    }

    #[test]
    fn test_embed_is_failure() {
        assert_eq!(OptionK::embed(Unit::<u8>::new()), None);
    }
}
