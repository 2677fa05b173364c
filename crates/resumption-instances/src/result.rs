//! The error monad and the constant module of its errors

use std::fmt;
use std::marker::PhantomData;

use resumption_core::{DebugK, Either, EqK, Functor, Idealised, Kind, Monad, RModule, ShowWith, TailRec};

/// Brand for `Result<_, E>`
pub struct ResultK<E>(PhantomData<E>);

impl<E: 'static> Kind for ResultK<E> {
    type Of<A> = Result<A, E>;
}

impl<E: 'static> Functor for ResultK<E> {
    fn fmap<A: 'static, B: 'static, F>(fa: Result<A, E>, f: F) -> Result<B, E>
    where
        F: Fn(A) -> B + 'static,
    {
        fa.map(f)
    }
}

impl<E: 'static> Monad for ResultK<E> {
    fn pure<A: 'static>(a: A) -> Result<A, E> {
        Ok(a)
    }

    fn bind<A: 'static, B: 'static, F>(ma: Result<A, E>, f: F) -> Result<B, E>
    where
        F: Fn(A) -> Result<B, E> + 'static,
    {
        ma.and_then(f)
    }
}

impl<E: 'static> TailRec for ResultK<E> {
    fn tail_rec<S: 'static, A: 'static, F>(seed: S, step: F) -> Result<A, E>
    where
        F: Fn(S) -> Result<Either<A, S>, E> + 'static,
    {
        let mut state = seed;
        loop {
            match step(state)? {
                Either::Left(a) => return Ok(a),
                Either::Right(next) => state = next,
            }
        }
    }
}

impl<E: PartialEq + 'static> EqK for ResultK<E> {
    fn eq_by<A>(a: &Result<A, E>, b: &Result<A, E>, eq: &dyn Fn(&A, &A) -> bool) -> bool {
        match (a, b) {
            (Ok(x), Ok(y)) => eq(x, y),
            (Err(x), Err(y)) => x == y,
            _ => false,
        }
    }
}

impl<E: fmt::Debug + 'static> DebugK for ResultK<E> {
    fn fmt_by<A>(
        fa: &Result<A, E>,
        f: &mut fmt::Formatter<'_>,
        show: &dyn Fn(&A, &mut fmt::Formatter<'_>) -> fmt::Result,
    ) -> fmt::Result {
        match fa {
            Ok(a) => f.debug_tuple("Ok").field(&ShowWith::new(a, show)).finish(),
            Err(e) => f.debug_tuple("Err").field(e).finish(),
        }
    }
}

/// An error value, ignoring the payload type
pub struct Const<E, A>(pub E, PhantomData<A>);

impl<E, A> Const<E, A> {
    pub fn new(error: E) -> Self {
        Const(error, PhantomData)
    }

    pub fn into_inner(self) -> E {
        self.0
    }

    /// Reinterpret at another payload type
    pub fn retag<B>(self) -> Const<E, B> {
        Const::new(self.0)
    }
}

impl<E: Clone, A> Clone for Const<E, A> {
    fn clone(&self) -> Self {
        Const::new(self.0.clone())
    }
}

impl<E: PartialEq, A> PartialEq for Const<E, A> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<E: Eq, A> Eq for Const<E, A> {}

impl<E: fmt::Debug, A> fmt::Debug for Const<E, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Const").field(&self.0).finish()
    }
}

/// Brand for `Const<E, _>`
pub struct ConstK<E>(PhantomData<E>);

impl<E: 'static> Kind for ConstK<E> {
    type Of<A> = Const<E, A>;
}

impl<E: 'static> Functor for ConstK<E> {
    fn fmap<A: 'static, B: 'static, F>(fa: Const<E, A>, _f: F) -> Const<E, B>
    where
        F: Fn(A) -> B + 'static,
    {
        fa.retag()
    }
}

impl<E: 'static> RModule<ResultK<E>> for ConstK<E> {
    fn act<A: 'static, B: 'static, K>(ra: Const<E, A>, _k: K) -> Const<E, B>
    where
        K: Fn(A) -> Result<B, E> + 'static,
    {
        ra.retag()
    }
}

impl<E: PartialEq + 'static> EqK for ConstK<E> {
    fn eq_by<A>(a: &Const<E, A>, b: &Const<E, A>, _eq: &dyn Fn(&A, &A) -> bool) -> bool {
        a == b
    }
}

impl<E: fmt::Debug + 'static> DebugK for ConstK<E> {
    fn fmt_by<A>(
        fa: &Const<E, A>,
        f: &mut fmt::Formatter<'_>,
        _show: &dyn Fn(&A, &mut fmt::Formatter<'_>) -> fmt::Result,
    ) -> fmt::Result {
        fmt::Debug::fmt(fa, f)
    }
}

impl<E: 'static> Idealised for ResultK<E> {
    type Ideal = ConstK<E>;

    fn split<A: 'static>(ma: Result<A, E>) -> Either<A, Const<E, A>> {
        match ma {
            Ok(a) => Either::Left(a),
            Err(e) => Either::Right(Const::new(e)),
        }
    }

    fn embed<A: 'static>(ia: Const<E, A>) -> Result<A, E> {
        Err(ia.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_and_embed() {
        assert_eq!(ResultK::<&str>::split(Ok::<u8, &str>(1)), Either::Left(1));
        match ResultK::<&str>::split(Err::<u8, &str>("boom")) {
            Either::Right(c) => assert_eq!(ResultK::<&str>::embed(c), Err("boom")),
            Either::Left(_) => panic!("expected an error split"),
        }
    }

    #[test]
    fn test_act_keeps_error() {
        let acted = ConstK::<String>::act(Const::<String, u8>::new("e".into()), |n| Ok::<u16, String>(n.into()));
        assert_eq!(acted.into_inner(), "e");
    }
}
