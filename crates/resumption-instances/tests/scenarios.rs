//! End-to-end behaviour of resumptions over the concrete instances

use pretty_assertions::assert_eq;

use resumption_core::{
    retract_rrr, Either, EmbedIdeal, Free, Identity, IdentityK, IdentityTransformation, Idealised,
    NaturalTransformation, RRRResumption, Resumption,
};
use resumption_instances::{
    AtLeast2, AtLeast2K, NonEmpty, NonEmptyK, OptionK, Reader, ReaderK, State, StateK, Unit, UnitK, Writer, WriterK,
};

//-----------------------------------------------------------------------------
// Splits
//-----------------------------------------------------------------------------

#[test]
fn test_option_split() {
    assert_eq!(OptionK::split(Some(5)), Either::Left(5));
    assert_eq!(OptionK::split(None::<i32>), Either::Right(Unit::new()));
}

#[test]
fn test_non_empty_split() {
    assert_eq!(
        NonEmptyK::split(NonEmpty::new(1, vec![2, 3])),
        Either::Right(AtLeast2 { head: 1, tail: NonEmpty::new(2, vec![3]) })
    );
    assert_eq!(NonEmptyK::split(NonEmpty::singleton(1)), Either::Left(1));
}

//-----------------------------------------------------------------------------
// RRR resumptions over Option
//-----------------------------------------------------------------------------

type Chain<A> = RRRResumption<OptionK, A>;

fn countdown(from: u32, fail_at: Option<u32>) -> Chain<&'static str> {
    Chain::unfold_moggi(
        move |n: u32| {
            if Some(n) == fail_at {
                None
            } else if n == 0 {
                Some(Either::Left("done"))
            } else {
                Some(Either::Right(Identity(n - 1)))
            }
        },
        from,
    )
}

#[test]
fn test_retract_countdown_from_three() {
    assert_eq!(retract_rrr(countdown(3, None)), Some("done"));
}

#[test]
fn test_countdown_takes_three_steps() {
    let mut current = countdown(3, None);
    let mut taken = 0;
    let answer = loop {
        match current.force() {
            Some(Either::Left(answer)) => break answer,
            Some(Either::Right(Identity(next))) => {
                taken += 1;
                current = next;
            }
            None => panic!("countdown failed after {} steps", taken),
        }
    };
    assert_eq!((taken, answer), (3, "done"));
}

#[test]
fn test_retract_propagates_failure() {
    assert_eq!(retract_rrr(countdown(3, Some(1))), None);
}

#[test]
fn test_long_countdown_retracts() {
    assert_eq!(retract_rrr(countdown(100_000, None)), Some("done"));
    assert_eq!(retract_rrr(countdown(100_000, Some(7))), None);
}

#[test]
fn test_endless_chain_is_forced_lazily() {
    let endless: Chain<u32> = Chain::unfold_moggi(|n: u32| Some(Either::Right(Identity(n + 1))), 0);
    let first = endless.force();
    assert!(matches!(first, Some(Either::Right(_))));

    let second = first.and_then(|step| match step {
        Either::Right(Identity(next)) => next.force(),
        Either::Left(_) => None,
    });
    assert!(matches!(second, Some(Either::Right(_))));
}

#[test]
fn test_partly_consumed_countdown_drops_cheaply() {
    let mut current = countdown(1_000_000, None);
    for _ in 0..10 {
        current = match current.force() {
            Some(Either::Right(Identity(next))) => next,
            _ => panic!("countdown ended early"),
        };
    }
    drop(current);
}

/// Every step succeeds
struct AlwaysSome;

impl NaturalTransformation<IdentityK, OptionK> for AlwaysSome {
    fn transform<A: 'static>(&self, fa: Identity<A>) -> Option<A> {
        Some(fa.run())
    }
}

#[test]
fn test_interp_moggi_agrees_with_retract() {
    let interpreted = countdown(3, None).interp_moggi::<OptionK, _, _>(IdentityTransformation, AlwaysSome);
    assert_eq!(interpreted, Some("done"));

    let failed = countdown(3, Some(2)).interp_moggi::<OptionK, _, _>(IdentityTransformation, AlwaysSome);
    assert_eq!(failed, None);
}

//-----------------------------------------------------------------------------
// Interpreting through the ideal embedding
//-----------------------------------------------------------------------------

#[test]
fn test_interp_option_resumption() {
    let ok: Resumption<OptionK, UnitK, u8> = Resumption::pure(3);
    assert_eq!(ok.interp::<OptionK, _, _>(IdentityTransformation, EmbedIdeal), Some(3));

    let failed: Resumption<OptionK, UnitK, u8> = Resumption::lift_module(Unit::new());
    assert_eq!(failed.interp::<OptionK, _, _>(IdentityTransformation, EmbedIdeal), None);
}

type Branching<A> = Resumption<NonEmptyK, AtLeast2K, A>;

#[test]
fn test_interp_non_empty_resumption_is_left_to_right() {
    let r = Branching::lift_module(AtLeast2::new(1u32, 2, vec![3]));
    let expanded = r.bind(|n: u32| Branching::lift_monad(NonEmpty::new(n, vec![n * 10])));
    let flat = expanded.interp::<NonEmptyK, _, _>(IdentityTransformation, EmbedIdeal);
    assert_eq!(flat.into_vec(), vec![1, 10, 2, 20, 3, 30]);
}

#[test]
fn test_fold_non_empty_resumption() {
    let sum = |ne: NonEmpty<u32>| ne.iter().sum::<u32>();
    let sum_layer = |layer: AtLeast2<u32>| layer.into_non_empty().iter().sum::<u32>();

    let from_monad = Branching::lift_monad(NonEmpty::new(1u32, vec![2, 3]));
    assert_eq!(from_monad.fold(sum, sum_layer), 6);

    let from_module = Branching::lift_module(AtLeast2::new(1u32, 2, vec![3]));
    assert_eq!(from_module.fold(sum, sum_layer), 6);
}

//-----------------------------------------------------------------------------
// Writer modules
//-----------------------------------------------------------------------------

#[test]
fn test_resumption_over_state_writer() {
    type Logged<A> = Resumption<StateK<u32>, WriterK<u32>, A>;

    let r = Logged::lift_module(Writer::new(5u32, 100u32))
        .bind(|a: u32| Logged::lift_monad(State::new(move |s: u32| (a + s, s + 1))));
    let (free, state) = r.into_inner().run(0);
    assert_eq!(state, 0);
    let expected: Free<WriterK<u32>, u32> = Free::layer(Writer::new(Free::Pure(105), 101));
    assert_eq!(free, expected);
}

#[test]
fn test_resumption_over_reader_writer() {
    type Scaled<A> = Resumption<ReaderK<u32>, WriterK<u32>, A>;

    let r = Scaled::lift_module(Writer::new(5u32, 100u32))
        .bind(|a: u32| Scaled::lift_monad(Reader::new(move |env: u32| a * env)));
    let free = r.into_inner().run(7);
    let expected: Free<WriterK<u32>, u32> = Free::layer(Writer::new(Free::Pure(500), 100));
    assert_eq!(free, expected);
}
