//! The reader monad over an environment `E`

use std::fmt;
use std::marker::PhantomData;

use resumption_core::{Either, Functor, Kind, Monad, TailRec};

/// A computation reading an environment of type `E`
///
/// Readers are run at most once, so the payload never needs to be cloned.
pub struct Reader<E, A>(Box<dyn FnOnce(E) -> A>);

impl<E, A> Reader<E, A> {
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce(E) -> A + 'static,
    {
        Reader(Box::new(f))
    }

    pub fn run(self, env: E) -> A {
        (self.0)(env)
    }
}

impl<E: 'static, A: 'static> Reader<E, A> {
    /// Run `self` under an environment derived from the outer one
    pub fn local<D: 'static, F>(self, f: F) -> Reader<D, A>
    where
        F: FnOnce(D) -> E + 'static,
    {
        Reader::new(move |env| self.run(f(env)))
    }
}

impl<E: Clone + 'static> Reader<E, E> {
    /// The environment itself
    pub fn ask() -> Self {
        Reader::new(|env| env)
    }
}

impl<E, A> fmt::Debug for Reader<E, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Reader(<fn>)")
    }
}

/// Brand for `Reader<E, _>`
pub struct ReaderK<E>(PhantomData<E>);

impl<E: 'static> Kind for ReaderK<E> {
    type Of<A> = Reader<E, A>;
}

impl<E: 'static> Functor for ReaderK<E> {
    fn fmap<A: 'static, B: 'static, F>(fa: Reader<E, A>, f: F) -> Reader<E, B>
    where
        F: Fn(A) -> B + 'static,
    {
        Reader::new(move |env| f(fa.run(env)))
    }
}

/// Sequencing hands a copy of the environment to each side.
impl<E: Clone + 'static> Monad for ReaderK<E> {
    fn pure<A: 'static>(a: A) -> Reader<E, A> {
        Reader::new(move |_| a)
    }

    fn bind<A: 'static, B: 'static, F>(ma: Reader<E, A>, f: F) -> Reader<E, B>
    where
        F: Fn(A) -> Reader<E, B> + 'static,
    {
        Reader::new(move |env: E| f(ma.run(env.clone())).run(env))
    }
}

/// Every iteration reads the same environment.
impl<E: Clone + 'static> TailRec for ReaderK<E> {
    fn tail_rec<S: 'static, A: 'static, F>(seed: S, step: F) -> Reader<E, A>
    where
        F: Fn(S) -> Reader<E, Either<A, S>> + 'static,
    {
        Reader::new(move |env: E| {
            let mut state = seed;
            loop {
                match step(state).run(env.clone()) {
                    Either::Left(a) => return a,
                    Either::Right(next) => state = next,
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_shares_environment() {
        let r = ReaderK::<u32>::bind(Reader::<u32, u32>::ask(), |a| Reader::new(move |env: u32| a + env));
        assert_eq!(r.run(21), 42);
    }

    #[test]
    fn test_tail_rec_counts_up_to_environment() {
        let r = ReaderK::<u32>::tail_rec(0u32, |n: u32| {
            Reader::new(move |limit: u32| if n >= limit { Either::Left(n) } else { Either::Right(n + 1) })
        });
        assert_eq!(r.run(200_000), 200_000);
    }

    #[test]
    fn test_local_changes_environment() {
        let r = Reader::<String, usize>::new(|s| s.len()).local(|n: usize| "x".repeat(n));
        assert_eq!(r.run(3), 3);
    }
}
