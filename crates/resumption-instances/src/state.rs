//! The state monad over a state type `S`

use std::fmt;
use std::marker::PhantomData;

use resumption_core::{Either, Functor, Kind, Monad, TailRec};

/// A one-shot state transformer returning an answer and the next state
pub struct State<S, A>(Box<dyn FnOnce(S) -> (A, S)>);

impl<S, A> State<S, A> {
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce(S) -> (A, S) + 'static,
    {
        State(Box::new(f))
    }

    pub fn run(self, state: S) -> (A, S) {
        (self.0)(state)
    }

    pub fn eval(self, state: S) -> A {
        self.run(state).0
    }

    pub fn exec(self, state: S) -> S {
        self.run(state).1
    }
}

impl<S: Clone + 'static> State<S, S> {
    /// Read the current state
    pub fn get() -> Self {
        State::new(|s: S| (s.clone(), s))
    }
}

impl<S: 'static> State<S, ()> {
    /// Replace the current state
    pub fn put(next: S) -> Self {
        State::new(move |_| ((), next))
    }

    pub fn modify<F>(f: F) -> Self
    where
        F: FnOnce(S) -> S + 'static,
    {
        State::new(move |s| ((), f(s)))
    }
}

impl<S, A> fmt::Debug for State<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("State(<fn>)")
    }
}

/// Brand for `State<S, _>`
pub struct StateK<S>(PhantomData<S>);

impl<S: 'static> Kind for StateK<S> {
    type Of<A> = State<S, A>;
}

impl<S: 'static> Functor for StateK<S> {
    fn fmap<A: 'static, B: 'static, F>(fa: State<S, A>, f: F) -> State<S, B>
    where
        F: Fn(A) -> B + 'static,
    {
        State::new(move |s| {
            let (a, next) = fa.run(s);
            (f(a), next)
        })
    }
}

impl<S: 'static> Monad for StateK<S> {
    fn pure<A: 'static>(a: A) -> State<S, A> {
        State::new(move |s| (a, s))
    }

    fn bind<A: 'static, B: 'static, F>(ma: State<S, A>, f: F) -> State<S, B>
    where
        F: Fn(A) -> State<S, B> + 'static,
    {
        State::new(move |s| {
            let (a, next) = ma.run(s);
            f(a).run(next)
        })
    }
}

impl<S: 'static> TailRec for StateK<S> {
    fn tail_rec<T: 'static, A: 'static, F>(seed: T, step: F) -> State<S, A>
    where
        F: Fn(T) -> State<S, Either<A, T>> + 'static,
    {
        State::new(move |initial: S| {
            let (mut seed, mut state) = (seed, initial);
            loop {
                let (outcome, next_state) = step(seed).run(state);
                state = next_state;
                match outcome {
                    Either::Left(a) => return (a, state),
                    Either::Right(next) => seed = next,
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_threads_state() {
        let counter = StateK::<u32>::bind(State::get(), |n| {
            StateK::<u32>::bind(State::put(n + 1), move |_| StateK::<u32>::pure(n))
        });
        assert_eq!(counter.run(9), (9, 10));
    }

    #[test]
    fn test_tail_rec_threads_state_through_iterations() {
        let sum = StateK::<u64>::tail_rec(0u64, |i: u64| {
            State::new(move |acc: u64| if i == 100_000 { (Either::Left(i), acc) } else { (Either::Right(i + 1), acc + i) })
        });
        assert_eq!(sum.run(0), (100_000, 4_999_950_000));
    }

    #[test]
    fn test_modify_then_eval() {
        let m = StateK::<Vec<u8>>::bind(State::modify(|s: Vec<u8>| [s, vec![1]].concat()), |_| State::get());
        assert_eq!(m.eval(vec![0]), vec![0, 1]);
    }
}
