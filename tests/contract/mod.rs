use super::*;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

#[test]
fn should_return_the_function_result() {
    let f = cached(|x: i32| x * 2);

    assert_eq!(42, f.call(21));
}

#[test]
fn should_call_function_once_for_equal_arguments() {
    let sentinel = Arc::new(Mutex::new(0));

    let f = cached(|(a, b): (i32, i32)| {
        *sentinel.lock().unwrap() += 1;
        a + b
    });

    assert_eq!(5, f.call((2, 3)));
    assert_eq!(5, f.call((2, 3)));
    assert_eq!(1, *sentinel.lock().unwrap());
}

#[test]
fn should_call_function_again_for_different_arguments() {
    let sentinel = Arc::new(Mutex::new(0));

    let f = cached(|(a, b): (i32, i32)| {
        *sentinel.lock().unwrap() += 1;
        a + b
    });

    assert_eq!(5, f.call((2, 3)));
    assert_eq!(6, f.call((3, 3)));
    assert_eq!(2, *sentinel.lock().unwrap());
    assert_eq!(Some((3, 3)), f.last_arguments());
    assert_eq!(Some(6), f.cached());
}

#[test]
fn should_compare_arguments_by_value() {
    let sentinel = Arc::new(Mutex::new(0));

    let f = cached(|name: String| {
        *sentinel.lock().unwrap() += 1;
        name.len()
    });

    f.call("weights".to_string());
    f.call(String::from("weights"));
    assert_eq!(1, *sentinel.lock().unwrap());
}

#[test]
fn should_distinguish_named_arguments_by_key() {
    let sentinel = Arc::new(Mutex::new(0));

    let f = cached(|kwargs: BTreeMap<&'static str, i32>| {
        *sentinel.lock().unwrap() += 1;
        kwargs.values().sum::<i32>()
    });

    let by_a: BTreeMap<_, _> = vec![("a", 1)].into_iter().collect();
    let by_b: BTreeMap<_, _> = vec![("b", 1)].into_iter().collect();

    assert_eq!(1, f.call(by_a));
    assert_eq!(1, f.call(by_b.clone()));
    assert_eq!(1, f.call(by_b));
    assert_eq!(2, *sentinel.lock().unwrap());
}

#[test]
fn should_remember_only_the_last_arguments() {
    let sentinel = Arc::new(Mutex::new(0));

    let f = cached(|x: i32| {
        *sentinel.lock().unwrap() += 1;
        x
    });

    f.call(1);
    f.call(2);
    f.call(1);
    assert_eq!(3, *sentinel.lock().unwrap());
}

#[test]
fn empty_results_are_cached_too() {
    let sentinel = Arc::new(Mutex::new(0));

    let f = cached(|_: ()| {
        *sentinel.lock().unwrap() += 1;
        0
    });

    assert_eq!(0, f.call(()));
    assert_eq!(0, f.call(()));
    assert_eq!(1, *sentinel.lock().unwrap());
}

#[test]
fn failures_propagate_and_are_not_cached() {
    let attempts = Arc::new(Mutex::new(0));

    let f = fallible(|x: i32| {
        let mut attempts = attempts.lock().unwrap();
        *attempts += 1;
        if *attempts == 1 {
            Err("not ready")
        } else {
            Ok(x * 10)
        }
    });

    assert_eq!(Err("not ready"), f.try_call(4));
    assert_eq!(None, f.cached());
    assert_eq!(Ok(40), f.try_call(4));
    assert_eq!(Ok(40), f.try_call(4));
    assert_eq!(2, *attempts.lock().unwrap());
}

#[test]
fn stats_count_hits_and_misses() {
    let f = cached(|x: u8| x);

    f.call(1);
    f.call(1);
    f.call(1);
    f.call(2);

    assert_eq!(CacheStats { hits: 2, misses: 2 }, f.stats());
    assert_eq!(4, f.stats().calls());
}

#[test]
fn clear_forces_a_new_computation() {
    let sentinel = Arc::new(Mutex::new(0));

    let f = cached(|x: i32| {
        *sentinel.lock().unwrap() += 1;
        x
    });

    f.call(1);
    f.clear();
    f.call(1);

    assert_eq!(2, *sentinel.lock().unwrap());
    assert_eq!(2, f.stats().misses);
}

#[test]
fn should_work_with_string_too() {
    let f = cached(|_: ()| "string slice".to_string());

    assert_eq!("string slice", f.call(()));
    assert_eq!("string slice", f.call(()));
}

#[test]
fn legacy_policy_recomputes_empty_results() {
    // Known defect of the truthiness check, kept behind `NonEmpty`.
    let sentinel = Arc::new(Mutex::new(0));

    let f = cached(|_: ()| {
        *sentinel.lock().unwrap() += 1;
        0
    })
    .with_policy::<NonEmpty>();

    assert_eq!(0, f.call(()));
    assert_eq!(0, f.call(()));
    assert_eq!(2, *sentinel.lock().unwrap());
}

#[test]
fn legacy_policy_still_caches_non_empty_results() {
    let sentinel = Arc::new(Mutex::new(0));

    let f = cached(|n: usize| {
        *sentinel.lock().unwrap() += 1;
        vec![0u8; n]
    })
    .with_policy::<NonEmpty>();

    f.call(3);
    f.call(3);
    f.call(0);
    f.call(0);
    assert_eq!(3, *sentinel.lock().unwrap());
}

#[test]
fn use_function_as_computation() {
    fn double(x: i32) -> i32 {
        x * 2
    }

    let f = cached(double);

    assert_eq!(84, f.call(42));
}

#[test]
fn recursive_function_can_call_itself() {
    use std::cell::RefCell;
    use std::rc::Rc;

    type Handle = Rc<RefCell<Option<Rc<dyn Fn(u64) -> u64>>>>;

    let handle: Handle = Rc::new(RefCell::new(None));
    let inner = handle.clone();
    let factorial = Rc::new(cached(move |n: u64| {
        if n <= 1 {
            return 1;
        }
        let recurse = inner.borrow().clone().unwrap();
        n * recurse(n - 1)
    }));
    let f = factorial.clone();
    *handle.borrow_mut() = Some(Rc::new(move |n| f.call(n)));

    assert_eq!(6, factorial.call(3));
    assert_eq!(Some(3), factorial.last_arguments());
    assert_eq!(6, factorial.call(3));
    assert_eq!(CacheStats { hits: 1, misses: 3 }, factorial.stats());
}
