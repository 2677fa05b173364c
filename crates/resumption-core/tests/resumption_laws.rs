//! Property-based tests for the resumption monad
//!
//! Resumptions here run over the identity monad with single-step layers, so
//! a value is fully described by its number of steps and its final answer.

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use resumption_core::{
    retract_rrr, Either, Free, Identity, IdentityK, IdentityTransformation, Monad, RRRResumption, Resumption,
    ResumptionK, FM, FMK,
};

type Steps<A> = RRRResumption<IdentityK, A>;

fn steps(n: u8, a: u32) -> Steps<u32> {
    let mut r = Steps::pure(a);
    for _ in 0..n {
        r = Steps::suspend(Identity(r));
    }
    r
}

fn continuation(a: u32) -> Steps<u32> {
    steps((a % 4) as u8, a.wrapping_add(1))
}

fn other_continuation(a: u32) -> Steps<u32> {
    steps((a % 3) as u8, a.wrapping_mul(3))
}

/// Strategy for generating resumptions of bounded depth
fn steps_strategy() -> impl Strategy<Value = (u8, u32)> {
    (0u8..6, any::<u32>())
}

proptest! {
    #[test]
    fn prop_left_identity(a in any::<u32>()) {
        prop_assert_eq!(Steps::pure(a).bind(continuation), continuation(a));
    }

    #[test]
    fn prop_right_identity((n, a) in steps_strategy()) {
        prop_assert_eq!(steps(n, a).bind(Steps::pure), steps(n, a));
    }

    #[test]
    fn prop_associativity((n, a) in steps_strategy()) {
        let lhs = steps(n, a).bind(continuation).bind(other_continuation);
        let rhs = steps(n, a).bind(|x| continuation(x).bind(other_continuation));
        prop_assert_eq!(lhs, rhs);
    }

    #[test]
    fn prop_brand_bind_matches_inherent_bind((n, a) in steps_strategy()) {
        let via_brand = ResumptionK::<IdentityK, FMK<IdentityK, IdentityK>>::bind(steps(n, a), continuation);
        prop_assert_eq!(via_brand, steps(n, a).bind(continuation));
    }

    #[test]
    fn prop_hold_inverts_force((n, a) in steps_strategy()) {
        prop_assert_eq!(Steps::hold(steps(n, a).force()), steps(n, a));
    }

    #[test]
    fn prop_force_inverts_hold((n, a) in steps_strategy()) {
        let step = Identity(Either::Right(Identity(steps(n, a))));
        let forced = Steps::hold(Identity(Either::Right(Identity(steps(n, a))))).force();
        prop_assert_eq!(forced, step);
    }

    #[test]
    fn prop_hoist_identity_is_identity((n, a) in steps_strategy()) {
        let hoisted: Steps<u32> = steps(n, a).hoist(IdentityTransformation, IdentityTransformation);
        prop_assert_eq!(hoisted, steps(n, a));
    }

    #[test]
    fn prop_retract_returns_final_answer((n, a) in steps_strategy()) {
        prop_assert_eq!(retract_rrr(steps(n, a)), Identity(a));
    }

    #[test]
    fn prop_fold_of_lift_monad_applies_outer_algebra(a in any::<u32>()) {
        let folded = Steps::lift_monad(Identity(a)).fold(|Identity(x): Identity<u32>| x, |_| 0);
        prop_assert_eq!(folded, a);
    }

    #[test]
    fn prop_fold_of_lift_module_applies_layer_algebra(a in 0u32..1_000_000) {
        let folded = Steps::lift_module(FM(Identity(Identity(a)))).fold(
            |Identity(x): Identity<u32>| x,
            |layer: FM<IdentityK, IdentityK, u32>| {
                let FM(Identity(Identity(x))) = layer;
                x * 2 + 1
            },
        );
        prop_assert_eq!(folded, a * 2 + 1);
    }
}

#[test]
fn test_distr_runs_leaf_computations() {
    let free: Free<FMK<IdentityK, IdentityK>, Identity<u32>> = Free::Pure(Identity(9));
    let r: Resumption<IdentityK, FMK<IdentityK, IdentityK>, u32> = Resumption::distr(free);
    assert_eq!(r, Steps::pure(9));
}

#[test]
fn test_unfold_then_retract() {
    let r = Steps::unfold_moggi(
        |n: u32| if n == 0 { Identity(Either::Left(100)) } else { Identity(Either::Right(Identity(n - 1))) },
        4,
    );
    assert_eq!(r, steps(4, 100));
    assert_eq!(retract_rrr(r), Identity(100));
}
