//! Identity predicate tests

use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

use extkit::*;

// ═══════════════════════════════════════════════════════════════════════
// Value kinds are never the same reference
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_is_scalars() {
    let x = 42;
    let y = x;
    assert_eq!(x, y);
    assert!(!is_same_reference(&x, &y));
    assert!(!is_same_reference(&x, &x));

    let s = String::from("hello\u{1234}");
    assert!(!is_same_reference(&s, &s));
    assert!(!is_same_reference("hello", "hello"));
}

#[test]
fn test_is_array() {
    let x = [1, 2];
    let mut y = x;
    assert_eq!(x, y);
    assert!(!is_same_reference(&x, &y));

    y[0] = 42;
    assert_ne!(x, y);
    assert_eq!(x[0], 1);
    assert!(!is_same_reference(&x, &x));
}

#[test]
fn test_is_tuple_and_result() {
    let t = (1, "a");
    assert!(!is_same_reference(&t, &t));

    let r: std::result::Result<i32, String> = Ok(1);
    assert!(!is_same_reference(&r, &r));
}

// ═══════════════════════════════════════════════════════════════════════
// Pointers
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_is_pointer_nil() {
    let x: Option<Box<i32>> = None;
    let y = x.clone();
    assert_eq!(x, y);
    assert!(!is_same_reference(&x, &y));
}

#[test]
fn test_is_pointer_shared() {
    let x = Rc::new(std::cell::Cell::new(0));
    let y = Rc::clone(&x);
    assert!(is_same_reference(&x, &y));

    y.set(42);
    assert_eq!(x.get(), 42);
    assert!(is_same_reference(&x, &y));
}

#[test]
fn test_is_pointer_equal_but_distinct() {
    let x = Arc::new(42);
    let y = Arc::new(42);
    assert_eq!(x, y);
    assert!(!is_same_reference(&x, &y));

    let a = Box::new(42);
    let b = Box::new(42);
    assert!(is_same_reference(&a, &a));
    assert!(!is_same_reference(&a, &b));
}

#[test]
fn test_is_borrowed_reference() {
    let n = 7_u64;
    let r1 = &n;
    let r2 = &n;
    assert!(is_same_reference(&r1, &r2));

    let m = 7_u64;
    assert!(!is_same_reference(&r1, &&m));
}

// ═══════════════════════════════════════════════════════════════════════
// Slices
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_is_slice() {
    let x: Vec<i32> = Vec::new();
    assert!(!is_same_reference(&x, &x));

    let x = vec![0; 3];
    assert!(is_same_reference(&x, &x));
    assert!(is_same_reference(x.as_slice(), &x[..]));

    let y = vec![0; 3];
    assert_eq!(x, y);
    assert!(!is_same_reference(&x, &y));
}

#[test]
fn test_is_subslice_is_distinct_view() {
    let x = vec![1, 2, 3];
    // Same start, so the same storage
    assert!(is_same_reference(&x[..2], &x[..]));
    assert!(!is_same_reference(&x[1..], &x[..]));
    assert!(!is_same_reference(&x[..0], &x[..0]));
}

// ═══════════════════════════════════════════════════════════════════════
// Maps
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_is_map() {
    let x = HashMap::from([(1, 1), (2, 2), (3, 3)]);
    let y = HashMap::from([(1, 1), (2, 2), (3, 3)]);
    assert_eq!(x, y);
    assert!(is_same_reference(&x, &x));
    assert!(!is_same_reference(&x, &y));
}

// ═══════════════════════════════════════════════════════════════════════
// Queues and functions
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_is_queue() {
    let x: Option<Queue<i32>> = None;
    assert!(!is_same_reference(&x, &x));

    let x = Queue::bounded(0);
    let y = x.clone();
    assert!(is_same_reference(&x, &y));

    let sender = std::thread::spawn(move || y.send(42).is_ok());
    assert_eq!(x.recv(), Some(42));
    assert!(sender.join().unwrap());

    let a: Queue<i32> = Queue::bounded(0);
    let b: Queue<i32> = Queue::bounded(0);
    assert!(!is_same_reference(&a, &b));
}

#[test]
fn test_is_func() {
    let x: Option<Func<dyn Fn(i32) -> i32>> = None;
    assert!(!is_same_reference(&x, &x));

    let x: Func<dyn Fn(i32) -> i32> = Func::new(Box::new(|n: i32| n) as Box<dyn Fn(i32) -> i32>);
    let y = x.clone();
    assert_eq!(y(42), x(42));
    assert!(is_same_reference(&x, &y));

    let y: Func<dyn Fn(i32) -> i32> =
        Func::new(Box::new(|n: i32| n + n) as Box<dyn Fn(i32) -> i32>);
    assert!(!is_same_reference(&x, &y));
}

// ═══════════════════════════════════════════════════════════════════════
// Untyped comparison
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_is_any_nil() {
    assert!(!is_same_reference_any(None, None));

    let v = vec![1];
    assert!(!is_same_reference_any(Some(&v), None));
    assert!(!is_same_reference_any(None, Some(&v)));
    assert!(is_same_reference_any(Some(&v), Some(&v)));
}

#[test]
fn test_is_any_type_mismatch() {
    let a = Arc::new(1_i32);
    let b = Arc::new(1_i64);
    assert!(!is_same_reference_any(Some(&a), Some(&b)));

    let n = 42;
    let s = String::from("42");
    assert!(!is_same_reference_any(Some(&n), Some(&s)));
}

#[test]
fn test_is_any_value_kinds() {
    let x = [1, 2];
    assert!(!is_same_reference_any(Some(&x), Some(&x)));
}
