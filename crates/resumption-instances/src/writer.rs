//! Writer pairs as modules over reader and state, and as a monad over a
//! monoid
//!
//! A [`Writer`] pairs an answer with an accumulated output. The same brand
//! plays three roles:
//!
//! - a module over [`ReaderK<W>`]: the continuation reads the current
//!   output, which is kept unchanged;
//! - a module over [`StateK<W>`]: the continuation runs from the current
//!   output and its final state replaces it;
//! - the writer monad when `W` is a [`Monoid`], whose ideal
//!   ([`WriterIdealK`]) exists when `W` is an [`IdealMonoid`].

use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use resumption_core::{DebugK, Either, EqK, Functor, Idealised, Kind, Monad, RModule, ShowWith, TailRec};

use crate::monoid::{IdealMonoid, Monoid};
use crate::reader::{Reader, ReaderK};
use crate::state::{State, StateK};

//-----------------------------------------------------------------------------
// Writer
//-----------------------------------------------------------------------------

/// An answer together with its output
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Writer<W, A> {
    pub value: A,
    pub output: W,
}

impl<W, A> Writer<W, A> {
    pub fn new(value: A, output: W) -> Self {
        Self { value, output }
    }

    pub fn into_parts(self) -> (A, W) {
        (self.value, self.output)
    }
}

impl<W> Writer<W, ()> {
    /// Emit output with no answer
    pub fn tell(output: W) -> Self {
        Self { value: (), output }
    }
}

/// Brand for `Writer<W, _>`
pub struct WriterK<W>(PhantomData<W>);

impl<W: 'static> Kind for WriterK<W> {
    type Of<A> = Writer<W, A>;
}

impl<W: 'static> Functor for WriterK<W> {
    fn fmap<A: 'static, B: 'static, F>(fa: Writer<W, A>, f: F) -> Writer<W, B>
    where
        F: Fn(A) -> B + 'static,
    {
        Writer { value: f(fa.value), output: fa.output }
    }
}

impl<W: Clone + 'static> RModule<ReaderK<W>> for WriterK<W> {
    fn act<A: 'static, B: 'static, K>(ra: Writer<W, A>, k: K) -> Writer<W, B>
    where
        K: Fn(A) -> Reader<W, B> + 'static,
    {
        let Writer { value, output } = ra;
        Writer { value: k(value).run(output.clone()), output }
    }
}

/// The continuation's final state replaces the running output.
impl<W: 'static> RModule<StateK<W>> for WriterK<W> {
    fn act<A: 'static, B: 'static, K>(ra: Writer<W, A>, k: K) -> Writer<W, B>
    where
        K: Fn(A) -> State<W, B> + 'static,
    {
        let (value, output) = k(ra.value).run(ra.output);
        Writer { value, output }
    }
}

impl<W: Monoid + 'static> Monad for WriterK<W> {
    fn pure<A: 'static>(a: A) -> Writer<W, A> {
        Writer { value: a, output: W::empty() }
    }

    fn bind<A: 'static, B: 'static, F>(ma: Writer<W, A>, f: F) -> Writer<W, B>
    where
        F: Fn(A) -> Writer<W, B> + 'static,
    {
        let Writer { value, output } = f(ma.value);
        Writer { value, output: ma.output.combine(output) }
    }
}

impl<W: Monoid + 'static> TailRec for WriterK<W> {
    fn tail_rec<S: 'static, A: 'static, F>(seed: S, step: F) -> Writer<W, A>
    where
        F: Fn(S) -> Writer<W, Either<A, S>> + 'static,
    {
        let (mut state, mut written) = (seed, W::empty());
        loop {
            let Writer { value, output } = step(state);
            written = written.combine(output);
            match value {
                Either::Left(a) => return Writer { value: a, output: written },
                Either::Right(next) => state = next,
            }
        }
    }
}

impl<W: PartialEq + 'static> EqK for WriterK<W> {
    fn eq_by<A>(a: &Writer<W, A>, b: &Writer<W, A>, eq: &dyn Fn(&A, &A) -> bool) -> bool {
        a.output == b.output && eq(&a.value, &b.value)
    }
}

impl<W: fmt::Debug + 'static> DebugK for WriterK<W> {
    fn fmt_by<A>(
        fa: &Writer<W, A>,
        f: &mut fmt::Formatter<'_>,
        show: &dyn Fn(&A, &mut fmt::Formatter<'_>) -> fmt::Result,
    ) -> fmt::Result {
        f.debug_struct("Writer")
            .field("value", &ShowWith::new(&fa.value, show))
            .field("output", &fa.output)
            .finish()
    }
}

//-----------------------------------------------------------------------------
// Writer over an ideal
//-----------------------------------------------------------------------------

/// An answer whose output lies in the ideal of `W`
pub struct WriterIdeal<W: IdealMonoid, A> {
    pub value: A,
    pub output: W::Ideal,
}

impl<W: IdealMonoid, A> WriterIdeal<W, A> {
    pub fn new(value: A, output: W::Ideal) -> Self {
        Self { value, output }
    }
}

impl<W: IdealMonoid, A: Clone> Clone for WriterIdeal<W, A>
where
    W::Ideal: Clone,
{
    fn clone(&self) -> Self {
        Self { value: self.value.clone(), output: self.output.clone() }
    }
}

impl<W: IdealMonoid, A: PartialEq> PartialEq for WriterIdeal<W, A>
where
    W::Ideal: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.output == other.output
    }
}

impl<W: IdealMonoid, A: fmt::Debug> fmt::Debug for WriterIdeal<W, A>
where
    W::Ideal: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterIdeal").field("value", &self.value).field("output", &self.output).finish()
    }
}

/// Brand for `WriterIdeal<W, _>`
pub struct WriterIdealK<W>(PhantomData<W>);

impl<W: IdealMonoid + 'static> Kind for WriterIdealK<W> {
    type Of<A> = WriterIdeal<W, A>;
}

impl<W: IdealMonoid + 'static> Functor for WriterIdealK<W> {
    fn fmap<A: 'static, B: 'static, F>(fa: WriterIdeal<W, A>, f: F) -> WriterIdeal<W, B>
    where
        F: Fn(A) -> B + 'static,
    {
        WriterIdeal { value: f(fa.value), output: fa.output }
    }
}

/// Further output is absorbed into the ideal element.
impl<W: IdealMonoid + 'static> RModule<WriterK<W>> for WriterIdealK<W> {
    fn act<A: 'static, B: 'static, K>(ra: WriterIdeal<W, A>, k: K) -> WriterIdeal<W, B>
    where
        K: Fn(A) -> Writer<W, B> + 'static,
    {
        let Writer { value, output } = k(ra.value);
        WriterIdeal { value, output: W::absorb(ra.output, output) }
    }
}

impl<W: IdealMonoid + 'static> EqK for WriterIdealK<W>
where
    W::Ideal: PartialEq,
{
    fn eq_by<A>(a: &WriterIdeal<W, A>, b: &WriterIdeal<W, A>, eq: &dyn Fn(&A, &A) -> bool) -> bool {
        a.output == b.output && eq(&a.value, &b.value)
    }
}

impl<W: IdealMonoid + 'static> DebugK for WriterIdealK<W>
where
    W::Ideal: fmt::Debug,
{
    fn fmt_by<A>(
        fa: &WriterIdeal<W, A>,
        f: &mut fmt::Formatter<'_>,
        show: &dyn Fn(&A, &mut fmt::Formatter<'_>) -> fmt::Result,
    ) -> fmt::Result {
        f.debug_struct("WriterIdeal")
            .field("value", &ShowWith::new(&fa.value, show))
            .field("output", &fa.output)
            .finish()
    }
}

/// A computation is pure exactly when it wrote the unit output.
impl<W: IdealMonoid + 'static> Idealised for WriterK<W> {
    type Ideal = WriterIdealK<W>;

    fn split<A: 'static>(ma: Writer<W, A>) -> Either<A, WriterIdeal<W, A>> {
        match ma.output.split_ideal() {
            None => Either::Left(ma.value),
            Some(output) => Either::Right(WriterIdeal { value: ma.value, output }),
        }
    }

    fn embed<A: 'static>(ia: WriterIdeal<W, A>) -> Writer<W, A> {
        Writer { value: ia.value, output: W::embed_ideal(ia.output) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monoid::Sum;
    use crate::non_empty::NonEmpty;
    use std::num::NonZeroU64;

    #[test]
    fn test_reader_module_keeps_output() {
        let w = Writer::new(2u32, 10u32);
        let acted = <WriterK<u32> as RModule<ReaderK<u32>>>::act(w, |a| Reader::new(move |env: u32| a * env));
        assert_eq!(acted, Writer::new(20, 10));
    }

    #[test]
    fn test_state_module_replaces_output() {
        let w = Writer::new(2u32, 10u32);
        let acted = <WriterK<u32> as RModule<StateK<u32>>>::act(w, |a| State::new(move |s: u32| (a + s, s * 3)));
        assert_eq!(acted, Writer::new(12, 30));
    }

    #[test]
    fn test_writer_monad_accumulates() {
        let m = WriterK::<Vec<&str>>::bind(Writer::new(1, vec!["a"]), |n| Writer::new(n + 1, vec!["b"]));
        assert_eq!(m, Writer::new(2, vec!["a", "b"]));
    }

    #[test]
    fn test_tail_rec_accumulates_every_iteration() {
        let w = WriterK::<Sum>::tail_rec(0u32, |n: u32| {
            Writer::new(if n == 50_000 { Either::Left(n) } else { Either::Right(n + 1) }, Sum(1))
        });
        assert_eq!(w, Writer::new(50_000, Sum(50_001)));
    }

    #[test]
    fn test_split_on_output() {
        assert_eq!(WriterK::<Sum>::split(Writer::new('x', Sum(0))), Either::Left('x'));

        let split = WriterK::<Vec<u8>>::split(Writer::new('y', vec![4, 5]));
        assert_eq!(split, Either::Right(WriterIdeal::new('y', NonEmpty::new(4, vec![5]))));

        let embedded = WriterK::<Sum>::embed(WriterIdeal::new('z', NonZeroU64::MIN));
        assert_eq!(embedded, Writer::new('z', Sum(1)));
    }

    #[test]
    fn test_ideal_absorbs_further_output() {
        let ideal = WriterIdeal::<Vec<u8>, u8>::new(1, NonEmpty::singleton(7));
        let acted = WriterIdealK::<Vec<u8>>::act(ideal, |n| Writer::new(n + 1, vec![8]));
        assert_eq!(acted, WriterIdeal::new(2, NonEmpty::new(7, vec![8])));
    }
}
