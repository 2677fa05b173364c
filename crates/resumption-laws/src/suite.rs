//! The law suite over every shipped instance

use std::num::NonZeroU64;

use tracing::info;

use resumption_core::{Either, Free, FreeK, Identity, IdentityK, MoggiResumption, Resumption, Wrap, WrapK};
use resumption_instances::{
    AtLeast2, AtLeast2K, Const, ConstK, NonEmpty, NonEmptyK, OptionK, Reader, ReaderK, ResultK, State, StateK, Sum,
    Unit, UnitK, Writer, WriterIdeal, WriterIdealK, WriterK,
};

use crate::checks::LawChecker;
use crate::config::LawConfig;
use crate::error::LawResult;
use crate::report::LawReport;
use crate::sampler::Sampler;

fn delay(steps: usize, a: u32) -> Free<IdentityK, u32> {
    let mut free: Free<IdentityK, u32> = Free::Pure(a);
    for _ in 0..steps {
        free = Free::layer(Identity(free));
    }
    free
}

fn sample_option(s: &mut Sampler) -> Option<u32> {
    let v = s.value();
    if v % 5 == 0 {
        None
    } else {
        Some(v)
    }
}

fn sample_non_empty(s: &mut Sampler) -> NonEmpty<u32> {
    NonEmpty::new(s.value(), s.values(0))
}

fn sample_at_least_2(s: &mut Sampler) -> AtLeast2<u32> {
    AtLeast2 { head: s.value(), tail: sample_non_empty(s) }
}

fn sample_delay(s: &mut Sampler) -> Free<IdentityK, u32> {
    let steps = s.depth();
    delay(steps, s.value())
}

fn sample_option_resumption(s: &mut Sampler) -> Resumption<OptionK, UnitK, u32> {
    let v = s.value();
    match v % 3 {
        0 => Resumption::lift_module(Unit::new()),
        1 => Resumption::lift_monad(None),
        _ => Resumption::pure(v),
    }
}

fn sample_branching(s: &mut Sampler) -> MoggiResumption<OptionK, NonEmptyK, u32> {
    let v = s.value();
    let depth = s.depth();
    MoggiResumption::<OptionK, NonEmptyK, u32>::unfold_moggi(
        move |n: usize| {
            if n == 0 {
                NonEmpty::singleton(Either::Left(v))
            } else if n % 3 == 0 {
                NonEmpty::new(Either::Right(None), vec![Either::Left(v)])
            } else {
                NonEmpty::new(Either::Right(Some(n - 1)), vec![Either::Left(v + n as u32)])
            }
        },
        depth,
    )
}

fn sample_chain(s: &mut Sampler) -> MoggiResumption<IdentityK, OptionK, u32> {
    let v = s.value();
    let depth = s.depth();
    let fails = s.flip();
    MoggiResumption::<IdentityK, OptionK, u32>::unfold_moggi(
        move |n: usize| match n {
            0 => Some(Either::Left(v)),
            1 if fails => None,
            _ => Some(Either::Right(Identity(n - 1))),
        },
        depth,
    )
}

fn sum_non_empty(ne: NonEmpty<u32>) -> u32 {
    ne.into_iter().fold(0, u32::wrapping_add)
}

fn sum_at_least_2(r: AtLeast2<u32>) -> u32 {
    sum_non_empty(r.into_non_empty())
}

/// Check every law of every shipped instance
///
/// Stops at the first violated law.
pub fn check_all_instances(config: &LawConfig) -> LawResult<Vec<LawReport>> {
    let mut checker = LawChecker::new(config);
    let mut reports = Vec::new();

    // Identity
    let identity = checker
        .check_monad_laws::<IdentityK, _, _, _>(
            "Identity",
            |s| Identity(s.value()),
            |a| Identity(a + 1),
            |a| Identity(a * 2),
        )?
        .merge(checker.check_pure_split::<IdentityK>("Identity")?);
    reports.push(identity);

    // Option
    let option = checker
        .check_monad_laws::<OptionK, _, _, _>(
            "Option",
            sample_option,
            |a| if a % 3 == 0 { None } else { Some(a + 1) },
            |a| Some(a * 2),
        )?
        .merge(checker.check_ideal_laws::<OptionK, _>("Option", |_| Unit::new())?)
        .merge(checker.check_module_laws::<OptionK, UnitK, _, _, _>(
            "Option",
            |_| Unit::new(),
            |a| Some(a + 1),
            |_| None,
        )?);
    reports.push(option);

    // Result
    let result = checker
        .check_monad_laws::<ResultK<String>, _, _, _>(
            "Result<String>",
            |s| {
                let v = s.value();
                if v % 4 == 0 {
                    Err(format!("e{}", v))
                } else {
                    Ok(v)
                }
            },
            |a| if a % 2 == 0 { Err("even".to_string()) } else { Ok(a + 1) },
            |a| Ok(a * 3),
        )?
        .merge(checker.check_ideal_laws::<ResultK<String>, _>("Result<String>", |s| {
            Const::new(format!("e{}", s.value()))
        })?)
        .merge(checker.check_module_laws::<ResultK<String>, ConstK<String>, _, _, _>(
            "Result<String>",
            |s| Const::new(format!("e{}", s.value())),
            |a| Ok(a + 1),
            |_| Err("late".to_string()),
        )?);
    reports.push(result);

    // NonEmpty
    let non_empty = checker
        .check_monad_laws::<NonEmptyK, _, _, _>(
            "NonEmpty",
            sample_non_empty,
            |a| NonEmpty::new(a, vec![a + 1]),
            |a| if a % 2 == 0 { NonEmpty::singleton(a / 2) } else { NonEmpty::new(a, vec![a]) },
        )?
        .merge(checker.check_ideal_laws::<NonEmptyK, _>("NonEmpty", sample_at_least_2)?)
        .merge(checker.check_module_laws::<NonEmptyK, AtLeast2K, _, _, _>(
            "NonEmpty",
            sample_at_least_2,
            |a| NonEmpty::new(a, vec![a + 1]),
            |a| NonEmpty::singleton(a * 2),
        )?)
        .merge(checker.check_fold_constructors::<NonEmptyK, AtLeast2K, _, _, _, _>(
            "NonEmpty",
            sample_non_empty,
            sample_at_least_2,
            sum_non_empty,
            sum_at_least_2,
        )?);
    reports.push(non_empty);

    // Free over Identity
    let free = checker
        .check_monad_laws::<FreeK<IdentityK>, _, _, _>(
            "Free<Identity>",
            sample_delay,
            |a| delay(1, a + 1),
            |a| delay((a % 3) as usize, a * 2),
        )?
        .merge(checker.check_ideal_laws::<FreeK<IdentityK>, _>("Free<Identity>", |s| {
            Wrap(Identity(sample_delay(s)))
        })?)
        .merge(checker.check_module_laws::<FreeK<IdentityK>, WrapK<IdentityK>, _, _, _>(
            "Free<Identity>",
            |s| Wrap(Identity(sample_delay(s))),
            |a| delay(2, a),
            |a| Free::Pure(a + 7),
        )?);
    reports.push(free);

    // Writer over lists
    let writer_vec = checker
        .check_monad_laws::<WriterK<Vec<u32>>, _, _, _>(
            "Writer<Vec>",
            |s| Writer::new(s.value(), s.values(0)),
            |a| Writer::new(a + 1, vec![a]),
            |a| Writer::new(a * 2, Vec::new()),
        )?
        .merge(checker.check_ideal_laws::<WriterK<Vec<u32>>, _>("Writer<Vec>", |s| {
            WriterIdeal::new(s.value(), sample_non_empty(s))
        })?)
        .merge(checker.check_module_laws::<WriterK<Vec<u32>>, WriterIdealK<Vec<u32>>, _, _, _>(
            "Writer<Vec>",
            |s| WriterIdeal::new(s.value(), sample_non_empty(s)),
            |a| Writer::new(a + 1, vec![a]),
            |a| Writer::new(a, vec![a, a]),
        )?);
    reports.push(writer_vec);

    // Writer over sums
    let writer_sum = checker
        .check_monad_laws::<WriterK<Sum>, _, _, _>(
            "Writer<Sum>",
            |s| Writer::new(s.value(), Sum(u64::from(s.value()))),
            |a| Writer::new(a + 1, Sum(1)),
            |a| Writer::new(a, Sum(u64::from(a))),
        )?
        .merge(checker.check_ideal_laws::<WriterK<Sum>, _>("Writer<Sum>", |s| {
            WriterIdeal::new(s.value(), NonZeroU64::MIN.saturating_add(u64::from(s.value())))
        })?);
    reports.push(writer_sum);

    // Reader and state, observed by running them
    reports.push(checker.check_monad_laws_observed::<ReaderK<u32>, _, _, _, _, _>(
        "Reader",
        |s| {
            let k = s.value();
            Reader::new(move |env: u32| env.wrapping_mul(k))
        },
        |a| Reader::new(move |env: u32| a.wrapping_add(env)),
        |a| Reader::new(move |env: u32| a ^ env),
        |r: Reader<u32, u32>, env| r.run(env),
    )?);
    reports.push(checker.check_monad_laws_observed::<StateK<u32>, _, _, _, _, _>(
        "State",
        |s| {
            let k = s.value();
            State::new(move |st: u32| (st.wrapping_add(k), st.wrapping_mul(3)))
        },
        |a| State::new(move |st: u32| (a ^ st, st.wrapping_add(a))),
        |a| State::new(move |st: u32| (a.wrapping_mul(st), a)),
        |m: State<u32, u32>, st| m.run(st),
    )?);

    // Reader and state acting on writer pairs
    reports.push(checker.check_module_laws::<ReaderK<u32>, WriterK<u32>, _, _, _>(
        "Reader/Writer",
        |s| Writer::new(s.value(), s.value()),
        |a| Reader::new(move |env: u32| a + env),
        |a| Reader::new(move |env: u32| a.wrapping_mul(env)),
    )?);
    reports.push(checker.check_module_laws::<StateK<u32>, WriterK<u32>, _, _, _>(
        "State/Writer",
        |s| Writer::new(s.value(), s.value()),
        |a| State::new(move |s: u32| (a + s, s + 1)),
        |a| State::new(move |s: u32| (a ^ s, s.wrapping_mul(2))),
    )?);

    // Resumptions
    reports.push(checker.check_resumption_laws::<OptionK, UnitK, _, _, _>(
        "Resumption<Option, Unit>",
        sample_option_resumption,
        |a| if a % 4 == 0 { Resumption::lift_module(Unit::new()) } else { Resumption::pure(a + 1) },
        |a| Resumption::lift_monad(Some(a * 2)),
    )?);
    reports.push(checker.check_moggi_round_trip::<OptionK, NonEmptyK, _>("Moggi<Option, NonEmpty>", sample_branching)?);
    reports.push(checker.check_moggi_round_trip::<IdentityK, OptionK, _>("RRR<Option>", sample_chain)?);

    info!(subjects = reports.len(), "all instance laws verified");
    Ok(reports)
}
