//! Unit tests for the schedule algebra.

use super::prelude::*;
use crate::either::Either;
use crate::testing::{replay, run_steps};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn outputs<O: Clone>(steps: &[crate::testing::Step<O>]) -> Vec<O> {
    steps.iter().map(|s| s.output.clone()).collect()
}

fn delays<O>(steps: &[crate::testing::Step<O>]) -> Vec<Duration> {
    steps.iter().map(|s| s.delay).collect()
}

fn conts<O>(steps: &[crate::testing::Step<O>]) -> Vec<bool> {
    steps.iter().map(|s| s.cont).collect()
}

// ==================== Constructors ====================

#[test]
fn test_identity_reports_input() {
    let steps = run_steps(&identity::<&str>(), ["a", "b"]);
    assert_eq!(outputs(&steps), vec!["a", "b"]);
    assert_eq!(conts(&steps), vec![true, true]);
    assert_eq!(delays(&steps), vec![Duration::ZERO; 2]);
}

#[test]
fn test_forever_counts_from_one() {
    let steps = replay(&forever::<()>(), &(), 4);
    assert_eq!(outputs(&steps), vec![1, 2, 3, 4]);
    assert!(steps.iter().all(|s| s.cont && s.delay_nanos == 0.0));
}

#[test]
fn test_recurs_continues_n_times() {
    let steps = replay(&recurs::<()>(3), &(), 10);
    assert_eq!(conts(&steps), vec![true, true, true, false]);
    assert_eq!(outputs(&steps), vec![1, 2, 3, 3]);
}

#[test]
fn test_recurs_zero_stops_immediately() {
    let steps = replay(&recurs::<()>(0), &(), 10);
    assert_eq!(steps.len(), 1);
    assert!(!steps[0].cont);
    assert_eq!(steps[0].output, 0);
}

#[test]
fn test_once_and_unit() {
    assert_eq!(conts(&replay(&once::<()>(), &(), 5)), vec![true, false]);

    let steps = replay(&unit::<()>(), &(), 3);
    assert_eq!(outputs(&steps), vec![(), (), ()]);
    assert!(steps.iter().all(|s| s.cont));
}

#[test]
fn test_spaced_fixed_delay() {
    let steps = replay(&spaced::<()>(ms(250)), &(), 3);
    assert_eq!(delays(&steps), vec![ms(250); 3]);
    assert_eq!(outputs(&steps), vec![1, 2, 3]);
}

#[test]
fn test_linear_grows_by_base() {
    let steps = replay(&linear::<()>(ms(100)), &(), 4);
    assert_eq!(delays(&steps), vec![ms(100), ms(200), ms(300), ms(400)]);
    assert_eq!(outputs(&steps), delays(&steps));
}

#[test]
fn test_exponential_doubles() {
    let steps = replay(&exponential::<()>(ms(100), 2.0), &(), 3);
    assert_eq!(delays(&steps), vec![ms(200), ms(400), ms(800)]);
}

#[test]
fn test_exponential_rounds_the_factor_power() {
    let steps = replay(&exponential::<()>(ms(10), 1.5), &(), 3);
    // 1.5, 2.25, 3.375 rounded
    assert_eq!(delays(&steps), vec![ms(20), ms(20), ms(30)]);
}

#[test]
fn test_exponential_saturates_instead_of_overflowing() {
    let schedule = exponential::<()>(Duration::from_secs(1), 10.0);
    let steps = replay(&schedule, &(), 40);
    let last = steps.last().map(|s| s.delay).unwrap_or_default();
    // u64::MAX nanoseconds is a little over 584 years
    assert!(last >= Duration::from_secs(584 * 365 * 24 * 3600));
    assert!(steps.iter().all(|s| s.cont));
}

#[test]
fn test_fibonacci_delays() {
    let steps = replay(&fibonacci::<()>(ms(10)), &(), 6);
    assert_eq!(
        delays(&steps),
        vec![ms(10), ms(10), ms(20), ms(30), ms(50), ms(80)]
    );
}

#[test]
fn test_unfold_and_unfold_lazy() {
    let doubling = unfold::<(), _, _>(1u32, |n| n * 2);
    assert_eq!(outputs(&replay(&doubling, &(), 3)), vec![2, 4, 8]);

    let seeds = Arc::new(AtomicU32::new(0));
    let lazy = {
        let seeds = seeds.clone();
        unfold_lazy::<(), _, _, _>(move || seeds.fetch_add(1, Ordering::SeqCst) * 10, |n| n + 1)
    };
    assert_eq!(outputs(&replay(&lazy, &(), 2)), vec![1, 2]);
    assert_eq!(outputs(&replay(&lazy, &(), 2)), vec![11, 12]);
    assert_eq!(seeds.load(Ordering::SeqCst), 2);
}

#[test]
fn test_do_while_and_do_until() {
    let while_small = run_steps(&do_while(|n: &i32| *n < 3), [1, 2, 3]);
    assert_eq!(conts(&while_small), vec![true, true, false]);
    assert_eq!(outputs(&while_small), vec![1, 2, 3]);

    let until_big = run_steps(&do_until(|n: &i32| *n >= 3), [1, 2, 3]);
    assert_eq!(conts(&until_big), vec![true, true, false]);
}

#[test]
fn test_collect_every_input() {
    let steps = run_steps(&collect::<char>(), ['x', 'y', 'z']);
    assert_eq!(steps[2].output, vec!['x', 'y', 'z']);
}

#[test]
fn test_from_fn() {
    let halving = from_fn(
        || 100u32,
        |_: &(), n: u32| {
            let next = n / 2;
            if next > 0 {
                Decision::cont(f64::from(next), next, Lazy::now(next))
            } else {
                Decision::done(0.0, next, Lazy::now(next))
            }
        },
    );
    let steps = replay(&halving, &(), 20);
    assert_eq!(outputs(&steps), vec![50, 25, 12, 6, 3, 1, 0]);
    assert_eq!(steps[0].delay_nanos, 50.0);
}

// ==================== Shaping ====================

#[test]
fn test_map_void_constant() {
    let mapped = recurs::<()>(2).map(|n| n * 10);
    assert_eq!(outputs(&replay(&mapped, &(), 5)), vec![10, 20, 20]);

    let constant = forever::<()>().constant("tick");
    assert_eq!(outputs(&replay(&constant, &(), 2)), vec!["tick", "tick"]);

    let void = forever::<()>().void();
    assert_eq!(outputs(&replay(&void, &(), 1)), vec![()]);
}

#[test]
fn test_contramap_and_dimap() {
    let by_length = do_while(|n: &usize| *n < 4).contramap(|s: &&str| s.len());
    assert_eq!(conts(&run_steps(&by_length, ["ab", "abcd"])), vec![true, false]);

    let described = identity::<u8>().dimap(|s: &String| s.len() as u8, |n| n * 2);
    assert_eq!(outputs(&run_steps(&described, ["abc".to_string()])), vec![6]);
}

// ==================== Continuation ====================

#[test]
fn test_check_only_consulted_while_continuing() {
    let calls = Arc::new(AtomicU32::new(0));
    let schedule = {
        let calls = calls.clone();
        recurs::<()>(1).check(move |_, _| {
            calls.fetch_add(1, Ordering::SeqCst);
            true
        })
    };
    let steps = replay(&schedule, &(), 5);
    assert_eq!(conts(&steps), vec![true, false]);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_while_and_until_output() {
    let schedule = forever::<()>().while_output(|n| *n < 3);
    assert_eq!(conts(&replay(&schedule, &(), 5)), vec![true, true, false]);

    let schedule = forever::<()>().until_output(|n| *n == 2);
    assert_eq!(conts(&replay(&schedule, &(), 5)), vec![true, false]);
}

#[test]
fn test_until_input() {
    let schedule = forever::<u16>().until_input(|status| *status == 200);
    assert_eq!(conts(&run_steps(&schedule, [503, 503, 200])), vec![true, true, false]);
}

#[test]
fn test_not_flips_and_double_not_restores() {
    let once = recurs::<()>(1);
    let flipped = recurs::<()>(1).not();
    let restored = recurs::<()>(1).not().not();

    let original = run_steps(&once, [(), (), ()]);
    let negated = run_steps(&flipped, [(), (), ()]);
    let twice = run_steps(&restored, [(), (), ()]);

    for ((a, b), c) in original.iter().zip(&negated).zip(&twice) {
        assert_eq!(a.cont, !b.cont);
        assert_eq!(a, c);
    }
}

// ==================== Composition ====================

#[test]
fn test_and_needs_both_and_takes_max_delay() {
    let schedule = spaced::<()>(ms(100)).and(linear(ms(30)).and(recurs(4)));
    let steps = replay(&schedule, &(), 10);

    assert_eq!(steps.len(), 5);
    assert_eq!(
        delays(&steps),
        vec![ms(100), ms(100), ms(100), ms(120), ms(150)]
    );
    assert_eq!(steps[0].output.0, 1);
}

#[test]
fn test_or_needs_either_and_takes_min_delay() {
    let schedule = recurs::<()>(1).or(spaced(ms(40)).while_output(|n| *n < 3));
    let steps = replay(&schedule, &(), 10);

    assert_eq!(conts(&steps), vec![true, true, false]);
    assert_eq!(delays(&steps), vec![Duration::ZERO, Duration::ZERO, Duration::ZERO]);
}

#[test]
fn test_or_delay_when_both_continue() {
    let schedule = spaced::<()>(ms(40)).or(spaced(ms(70)));
    assert_eq!(delays(&replay(&schedule, &(), 2)), vec![ms(40); 2]);
}

#[test]
fn test_and_does_not_force_outputs() {
    let forced = Arc::new(AtomicU32::new(0));
    let expensive = {
        let forced = forced.clone();
        forever::<()>().map(move |n| {
            forced.fetch_add(1, Ordering::SeqCst);
            n
        })
    };
    let schedule = expensive.and(recurs(3));

    let mut state = schedule.initial_state();
    for _ in 0..3 {
        let d = schedule.update(&(), state);
        state = d.state;
    }
    assert_eq!(forced.load(Ordering::SeqCst), 0);
}

#[test]
fn test_combine_with_custom_rules() {
    let schedule = spaced::<()>(ms(10)).combine(
        spaced(ms(20)),
        |a, b| a && b,
        |a, b| a + b,
        |a, b| a + b,
    );
    let steps = replay(&schedule, &(), 2);
    assert_eq!(delays(&steps), vec![ms(30); 2]);
    assert_eq!(outputs(&steps), vec![2, 4]);

    let nanos = forever::<()>().combine_nanos(forever(), |_, _| false, |_, _| 7.0, |a, _| a);
    let steps = replay(&nanos, &(), 3);
    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0].delay_nanos, 7.0);
}

#[test]
fn test_zip_pairs_inputs_and_outputs() {
    let schedule = collect::<char>().zip(do_while(|n: &u8| *n < 2));
    let steps = run_steps(&schedule, [('a', 0), ('b', 1), ('c', 2)]);

    assert_eq!(conts(&steps), vec![true, true, false]);
    assert_eq!(steps[2].output, (vec!['a', 'b', 'c'], 2));

    let summed = forever::<()>().zip_with(recurs::<()>(5), |a, b| a + b);
    assert_eq!(outputs(&run_steps(&summed, [((), ())])), vec![2]);
}

#[test]
fn test_zip_left_and_zip_right() {
    let left = spaced::<()>(ms(5)).zip_left(recurs(1));
    let right = spaced::<()>(ms(5)).zip_right(linear(ms(1)));

    assert_eq!(outputs(&replay(&left, &(), 5)), vec![1, 2]);
    assert_eq!(outputs(&replay(&right, &(), 2)), vec![ms(1), ms(2)]);
    assert_eq!(delays(&replay(&right, &(), 2)), vec![ms(5), ms(5)]);
}

#[test]
fn test_and_then_switches_on_stop() {
    let schedule = recurs::<()>(2).and_then(spaced(ms(9)));
    let steps = replay(&schedule, &(), 5);

    assert_eq!(
        outputs(&steps),
        vec![
            Either::Left(1),
            Either::Left(2),
            Either::Right(1),
            Either::Right(2),
            Either::Right(3),
        ]
    );
    assert_eq!(steps[1].delay, Duration::ZERO);
    assert_eq!(steps[2].delay, ms(9));
    assert!(steps.iter().all(|s| s.cont));
}

#[test]
fn test_and_then_stops_when_second_stops() {
    let schedule = recurs::<()>(0).and_then(recurs(1));
    let steps = replay(&schedule, &(), 5);
    assert_eq!(outputs(&steps), vec![Either::Right(1), Either::Right(1)]);
    assert_eq!(conts(&steps), vec![true, false]);
}

#[test]
fn test_pipe_feeds_output_downstream() {
    let schedule = linear::<()>(ms(1)).pipe(do_while(|d: &Duration| *d < ms(3)));
    let steps = replay(&schedule, &(), 10);

    assert_eq!(conts(&steps), vec![true, true, false]);
    assert_eq!(outputs(&steps), vec![ms(1), ms(2), ms(3)]);
}

#[test]
fn test_pipe_adds_delays_and_compose_mirrors_pipe() {
    let piped = spaced::<()>(ms(10)).pipe(spaced::<u32>(ms(5)));
    assert_eq!(delays(&replay(&piped, &(), 2)), vec![ms(15); 2]);

    let composed = spaced::<u32>(ms(5)).compose(spaced::<()>(ms(10)));
    let a = replay(&piped, &(), 3);
    let b = replay(&composed, &(), 3);
    assert_eq!(a, b);
}

#[test]
fn test_choose_routes_and_keeps_other_state() {
    let schedule = forever::<()>().choose(recurs::<()>(1));
    let steps = run_steps(
        &schedule,
        [
            Either::Left(()),
            Either::Right(()),
            Either::Left(()),
            Either::Right(()),
        ],
    );

    assert_eq!(
        outputs(&steps),
        vec![
            Either::Left(1),
            Either::Right(1),
            Either::Left(2),
            Either::Right(1),
        ]
    );
    assert_eq!(conts(&steps), vec![true, true, true, false]);
}

#[test]
fn test_forever_restarts_a_finished_schedule() {
    let schedule = recurs::<()>(1).forever();
    let steps = replay(&schedule, &(), 6);

    assert_eq!(outputs(&steps), vec![1, 1, 1, 1, 1, 1]);
    assert!(steps.iter().all(|s| s.cont));
}

#[test]
fn test_forever_restarts_exponential_backoff() {
    let schedule = exponential::<()>(ms(1), 2.0).while_output(|d| *d < ms(5)).forever();
    let steps = replay(&schedule, &(), 6);
    assert_eq!(delays(&steps), vec![ms(2), ms(4), ms(8), ms(2), ms(4), ms(8)]);
}

// ==================== Delays ====================

#[test]
fn test_map_delay_and_modify_delay() {
    let capped = linear::<()>(ms(100)).map_delay(|d| d.min(ms(250)));
    assert_eq!(
        delays(&replay(&capped, &(), 4)),
        vec![ms(100), ms(200), ms(250), ms(250)]
    );

    let by_output = forever::<()>().modify_delay(|n, d| d + ms(u64::from(*n)));
    assert_eq!(delays(&replay(&by_output, &(), 3)), vec![ms(1), ms(2), ms(3)]);

    let nanos = forever::<()>().modify_delay_nanos(|n, d| d + f64::from(*n) * 0.5);
    assert_eq!(replay(&nanos, &(), 2)[1].delay_nanos, 1.0);
}

#[test]
fn test_delayed_adds_output_to_delay() {
    let schedule = delayed(spaced::<()>(ms(10)).map(|n| ms(u64::from(n))));
    let steps = replay(&schedule, &(), 2);

    assert_eq!(delays(&steps), vec![ms(11), ms(12)]);
    assert_eq!(outputs(&steps), vec![ms(11), ms(12)]);
}

#[test]
fn test_jittered_with_scales_delay() {
    let schedule = spaced::<()>(ms(100)).jittered_with(|| 0.5);
    assert_eq!(delays(&replay(&schedule, &(), 3)), vec![ms(50); 3]);
}

#[test]
fn test_jittered_never_lengthens() {
    let schedule = spaced::<()>(ms(100)).jittered();
    for step in replay(&schedule, &(), 50) {
        assert!(step.delay < ms(100));
    }
}

#[test]
fn test_jittered_top_of_range_still_shortens() {
    let schedule = spaced::<()>(ms(1)).jittered_with(|| 0.999);
    for step in replay(&schedule, &(), 3) {
        assert!(step.delay < ms(1));
        assert!(step.delay >= Duration::from_micros(998));
    }
}

#[test]
fn test_jittered_rng_is_reproducible() {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    let a = spaced::<()>(Duration::from_secs(1)).jittered_rng(StdRng::seed_from_u64(42));
    let b = spaced::<()>(Duration::from_secs(1)).jittered_rng(StdRng::seed_from_u64(42));
    assert_eq!(delays(&replay(&a, &(), 5)), delays(&replay(&b, &(), 5)));
}

// ==================== Accumulation and observation ====================

#[test]
fn test_fold_skips_the_stopping_step() {
    let schedule = recurs::<()>(3).fold(Vec::new(), |mut acc, n| {
        acc.push(n);
        acc
    });
    let steps = replay(&schedule, &(), 10);
    assert_eq!(steps[3].output, vec![1, 2, 3]);
}

#[test]
fn test_fold_restarts_each_run() {
    let schedule = forever::<()>().fold(0u32, |acc, n| acc + n);
    assert_eq!(outputs(&replay(&schedule, &(), 3)), vec![1, 3, 6]);
    assert_eq!(outputs(&replay(&schedule, &(), 3)), vec![1, 3, 6]);
}

#[test]
fn test_fold_lazy_and_collect() {
    let schedule = forever::<()>().fold_lazy(|| String::from(">"), |acc, n| format!("{}{}", acc, n));
    assert_eq!(replay(&schedule, &(), 3)[2].output, ">123");

    let collected = linear::<()>(ms(1)).collect();
    assert_eq!(replay(&collected, &(), 2)[1].output, vec![ms(1), ms(2)]);
}

#[test]
fn test_log_hooks_see_every_step() {
    let inputs = Arc::new(Mutex::new(Vec::new()));
    let outputs_seen = Arc::new(Mutex::new(Vec::new()));

    let schedule = {
        let inputs = inputs.clone();
        let outputs_seen = outputs_seen.clone();
        recurs::<&'static str>(1)
            .log_input(move |i| inputs.lock().unwrap().push(*i))
            .log_output(move |o| outputs_seen.lock().unwrap().push(*o))
    };
    run_steps(&schedule, ["a", "b"]);

    assert_eq!(*inputs.lock().unwrap(), vec!["a", "b"]);
    assert_eq!(*outputs_seen.lock().unwrap(), vec![1, 1]);
}

#[test]
fn test_log_constructors() {
    let seen = Arc::new(AtomicU32::new(0));
    let schedule = {
        let seen = seen.clone();
        log_input(move |n: &u32| {
            seen.fetch_add(*n, Ordering::SeqCst);
        })
    };
    let steps = run_steps(&schedule, [2, 3]);
    assert_eq!(outputs(&steps), vec![2, 3]);
    assert_eq!(seen.load(Ordering::SeqCst), 5);

    let echoed = run_steps(&log_output(|_: &char| {}), ['q']);
    assert_eq!(echoed[0].output, 'q');
}

// ==================== Boxing ====================

#[test]
fn test_boxed_matches_unboxed() {
    let build = || {
        exponential::<()>(ms(10), 2.0)
            .and(recurs(3))
            .zip_right(forever())
    };
    let unboxed = replay(&build(), &(), 10);
    let boxed = replay(&build().boxed(), &(), 10);
    assert_eq!(unboxed, boxed);
}

#[test]
fn test_boxed_schedules_in_collections() {
    let policies: Vec<BoxedSchedule<(), u32>> = vec![
        recurs(1).boxed(),
        spaced(ms(5)).boxed(),
        forever().while_output(|n| *n < 2).boxed(),
    ];

    let lengths: Vec<usize> = policies.iter().map(|p| replay(p, &(), 10).len()).collect();
    assert_eq!(lengths, vec![2, 10, 2]);

    let cloned = policies[1].clone();
    assert_eq!(replay(&cloned, &(), 1)[0].delay, ms(5));
}
