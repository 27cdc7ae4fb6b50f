//! Dynamic value duplication and identity tests

use std::thread;
use std::time::Duration;

use extkit::*;
use indexmap::IndexMap;
use pretty_assertions::assert_eq;

fn ints(ns: &[i64]) -> Vec<Value> {
    ns.iter().copied().map(Value::Int).collect()
}

fn adder() -> FuncValue {
    FuncValue::new("add", 2, |args| {
        let a = args[0].as_i64().unwrap_or_default();
        let b = args[1].as_i64().unwrap_or_default();
        Ok(Value::Int(a + b))
    })
}

// ═══════════════════════════════════════════════════════════════════════
// Value kinds
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_value_kinds_are_copied() {
    for v in [
        Value::Nil,
        Value::Bool(true),
        Value::Int(-3),
        Value::Uint(3),
        Value::Float(0.5),
        Value::Char('x'),
        Value::string("hello\u{1234}"),
        Value::array(ints(&[1, 2])),
    ] {
        let copy = deep_clone(&v);
        assert_eq!(copy, v);
        assert!(!is_same_reference(&v, &v));
        assert!(!is_same_reference(&v, &copy));
    }
}

#[test]
fn test_numeric_copies_keep_kind_and_payload() {
    let x = Value::Float(0.25);
    let y = deep_clone(&x);
    assert!(y.is_numeric());
    assert_eq!(y.as_f64(), Some(0.25));
    assert_eq!(deep_clone(&Value::Uint(7)).as_i64(), Some(7));
    assert!(!deep_clone(&Value::string("7")).is_numeric());
    assert_eq!(Value::Int(1).as_f64(), None);
}

#[test]
fn test_array_duplicates_elements() -> anyhow::Result<()> {
    let x = Value::array(vec![Value::slice(ints(&[1]))]);
    let mut y = deep_clone(&x);
    assert_eq!(y, x);

    y.index(0)?.set_index(0, Value::Int(42))?;
    assert_eq!(x.index(0)?.index(0)?, Value::Int(1));

    y.set_array_index(0, Value::Nil)?;
    assert_ne!(y, x);
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════
// Maps
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_map_duplicate_is_independent() -> anyhow::Result<()> {
    let x = Value::map_from([
        (Value::string("foo"), Value::Int(1)),
        (Value::string("bar"), Value::Int(2)),
    ])?;
    let y = deep_clone(&x);
    assert_eq!(y, x);
    assert!(!is_same_reference(&x, &y));

    y.insert(Value::string("foo"), Value::Int(42))?;
    assert_ne!(y, x);
    assert_eq!(x.get(&Value::string("foo"))?, Some(Value::Int(1)));
    assert_eq!(y.get(&Value::string("foo"))?, Some(Value::Int(42)));
    Ok(())
}

#[test]
fn test_map_pointer_keys_are_new_pointers() -> anyhow::Result<()> {
    let p = Value::pointer(Value::Int(1));
    let q = Value::pointer(Value::Int(2));
    assert!(HashableValue::is_hashable(&p));
    let x = Value::map_from([
        (p.clone(), Value::string("a")),
        (q.clone(), Value::string("b")),
    ])?;
    let y = deep_clone(&x);
    assert_eq!(y.len()?, x.len()?);

    let Value::Map(Some(entries)) = &y else {
        panic!("expected a map, got {y:?}");
    };
    let keys: Vec<Value> = entries.read().keys().map(|k| k.value().clone()).collect();
    assert_eq!(keys.len(), 2);
    for key in &keys {
        assert!(HashableValue::is_hashable(key));
        assert!(!is_same_reference(key, &p));
        assert!(!is_same_reference(key, &q));
        // A copied key still finds its own entry
        assert!(y.get(key)?.is_some());
        assert_eq!(x.get(key)?, None);
    }

    // The source's keys index only the source
    assert_eq!(y.get(&p)?, None);
    assert_eq!(y.get(&q)?, None);
    assert_eq!(x.get(&p)?, Some(Value::string("a")));

    let mut pointees: Vec<i64> = keys
        .iter()
        .map(|k| k.load().map(|v| v.as_i64().unwrap_or_default()))
        .collect::<Result<_>>()?;
    pointees.sort_unstable();
    assert_eq!(pointees, vec![1, 2]);
    Ok(())
}

#[test]
fn test_map_alias_shares_entries() -> anyhow::Result<()> {
    let x = Value::map();
    let alias = x.clone();
    alias.insert(Value::Int(1), Value::Bool(true))?;
    assert_eq!(x.len()?, 1);
    assert!(is_same_reference(&x, &alias));
    Ok(())
}

#[test]
fn test_map_rejects_unhashable_key() {
    let err = Value::map().insert(Value::Float(1.0), Value::Nil).unwrap_err();
    assert_eq!(err, ExtError::UnhashableKey(Kind::Float));
    assert!(Value::map_from([(Value::slice(vec![]), Value::Nil)]).is_err());
}

#[test]
fn test_nil_map() {
    let x = Value::Map(None);
    assert!(x.is_nil());
    assert_eq!(x.get(&Value::Int(1)), Ok(None));
    assert_eq!(
        x.insert(Value::Int(1), Value::Nil),
        Err(ExtError::NilDereference(Kind::Map))
    );
    assert!(deep_clone(&x).is_nil());
    assert!(!is_same_reference(&x, &x));
}

// ═══════════════════════════════════════════════════════════════════════
// Pointers
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_pointer_duplicate_gets_new_storage() -> anyhow::Result<()> {
    let x = Value::pointer(Value::Int(0));
    let y = deep_clone(&x);
    assert_eq!(y, x);
    assert!(!is_same_reference(&x, &y));

    y.store(Value::Int(42))?;
    assert_ne!(y, x);
    assert_eq!(x.load()?, Value::Int(0));

    let alias = x.clone();
    alias.store(Value::Int(7))?;
    assert_eq!(x.load()?, Value::Int(7));
    assert!(is_same_reference(&x, &alias));
    Ok(())
}

#[test]
fn test_nil_pointer() {
    let x = Value::Pointer(None);
    let y = deep_clone(&x);
    assert!(y.is_nil());
    assert!(!is_same_reference(&x, &y));
    assert_eq!(x.load(), Err(ExtError::NilDereference(Kind::Pointer)));
}

// ═══════════════════════════════════════════════════════════════════════
// Slices
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_slice_duplicate() -> anyhow::Result<()> {
    let x = Value::slice(ints(&[0, 0, 0]));
    let y = deep_clone(&x);
    assert_eq!(y, x);
    assert!(!is_same_reference(&x, &y));

    y.set_index(0, Value::Int(42))?;
    assert_ne!(y, x);
    assert_eq!(x.index(0)?, Value::Int(0));
    Ok(())
}

#[test]
fn test_slice_duplicate_keeps_capacity() -> anyhow::Result<()> {
    let x = Value::slice_with_capacity(2, 16);
    let y = deep_clone(&x);
    assert_eq!(y.len()?, 2);
    assert!(y.capacity()? >= 16);
    Ok(())
}

#[test]
fn test_nil_slice_push_allocates() -> anyhow::Result<()> {
    let mut x = Value::Slice(None);
    assert!(x.is_nil());
    assert_eq!(x.len()?, 0);
    assert!(!is_same_reference(&x, &x));

    x.push(Value::Int(1))?;
    assert!(!x.is_nil());
    assert!(is_same_reference(&x, &x));
    assert_eq!(x.to_vec()?, ints(&[1]));
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════
// Interfaces
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_interface_nil() {
    let x = Value::interface(Value::Nil);
    let y = deep_clone(&x);
    assert!(y.concrete().is_nil());
    assert_eq!(y.kind(), Kind::Interface);
    assert_eq!(Identity::kind(&y), Kind::Nil);
}

#[test]
fn test_interface_holding_map() -> anyhow::Result<()> {
    let x = Value::interface(Value::map());
    let y = deep_clone(&x);
    assert!(!is_same_reference(&x, &y));

    y.concrete().insert(Value::string("foo"), Value::Int(42))?;
    assert_eq!(x.concrete().len()?, 0);
    assert_eq!(y.concrete().len()?, 1);

    // Identity looks through the interface to the map
    let alias = Value::interface(x.concrete().clone());
    assert!(is_same_reference(&x, &alias));
    assert_eq!(Identity::kind(&x), Kind::Map);
    Ok(())
}

#[test]
fn test_slice_of_interfaces() -> anyhow::Result<()> {
    let x = Value::slice(vec![Value::interface(Value::Nil); 3]);
    let y = deep_clone(&x);
    y.set_index(0, Value::interface(Value::Int(42)))?;
    assert!(x.index(0)?.concrete().is_nil());
    assert_eq!(y.index(0)?.concrete(), &Value::Int(42));
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════
// Records and enums
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_struct_duplicate() -> anyhow::Result<()> {
    let x = Value::structure(
        StructValue::new("S")
            .with_field("foo", Value::Int(1))
            .with_field("bar", Value::Int(2)),
    );
    let mut y = deep_clone(&x);
    assert_eq!(y, x);

    y.set_field("foo", Value::Int(42))?;
    assert_ne!(y, x);
    assert_eq!(x.field("foo")?, Value::Int(1));
    assert!(y.set_field("baz", Value::Nil).is_err());
    assert_eq!(y.as_struct().map(|s| s.type_name.as_str()), Some("S"));
    assert_eq!(Value::Int(1).as_struct(), None);
    assert!(!is_same_reference(&x, &x));
    Ok(())
}

#[test]
fn test_nested_record_map_pointer_slice() -> anyhow::Result<()> {
    let inner = Value::pointer(Value::slice(ints(&[1, 2])));
    let x = Value::structure(
        StructValue::new("Outer").with_field("m", Value::map_from([(Value::Int(1), inner)])?),
    );
    let y = deep_clone(&x);
    assert_eq!(y, x);

    let ys = y.field("m")?.get(&Value::Int(1))?.unwrap_or_default().load()?;
    ys.set_index(0, Value::Int(42))?;

    let xs = x.field("m")?.get(&Value::Int(1))?.unwrap_or_default().load()?;
    assert_eq!(xs.to_vec()?, ints(&[1, 2]));
    assert!(!is_same_reference(&xs, &ys));
    Ok(())
}

#[test]
fn test_enum_duplicate() -> anyhow::Result<()> {
    let x = Value::enumeration(EnumValue::tuple(
        "Shape",
        "Poly",
        vec![Value::slice(ints(&[1]))],
    ));
    let y = deep_clone(&x);
    assert_eq!(y, x);

    let (Some(xe), Some(ye)) = (x.as_enum(), y.as_enum()) else {
        panic!("expected enum values");
    };
    assert!(ye.is_variant("Poly"));
    let xs: Vec<_> = xe.data.values().collect();
    let ys: Vec<_> = ye.data.values().collect();
    ys[0].set_index(0, Value::Int(42))?;
    assert_eq!(xs[0].index(0)?, Value::Int(1));
    Ok(())
}

#[test]
fn test_struct_variant_duplicate() -> anyhow::Result<()> {
    let fields = IndexMap::from([
        ("w".to_string(), Value::Int(1)),
        ("tags".to_string(), Value::map()),
    ]);
    let x = Value::enumeration(EnumValue::with_struct("Shape", "Rect", fields));
    let y = deep_clone(&x);
    assert_eq!(y, x);

    let Some(EnumData::Struct(copied)) = y.as_enum().map(|e| &e.data) else {
        panic!("expected a struct variant, got {y:?}");
    };
    copied["tags"].insert(Value::string("red"), Value::Bool(true))?;

    let Some(EnumData::Struct(source)) = x.as_enum().map(|e| &e.data) else {
        panic!("expected a struct variant, got {x:?}");
    };
    assert_eq!(source["tags"].len()?, 0);
    assert_ne!(y, x);
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════
// Queues and functions
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_queue_unbuffered() -> anyhow::Result<()> {
    let x = Value::queue(0);
    let sender = {
        let x = x.clone();
        thread::spawn(move || x.send(Value::Int(42)).is_ok())
    };
    thread::sleep(Duration::from_millis(100));

    let y = deep_clone(&x);
    assert!(!is_same_reference(&x, &y));
    assert_eq!(y.len()?, 0);
    assert_eq!(y.capacity()?, 0);

    assert_eq!(x.recv()?, Value::Int(42));
    assert!(sender.join().unwrap_or(false));
    assert_eq!(y.try_recv()?, None);
    Ok(())
}

#[test]
fn test_queue_buffered() -> anyhow::Result<()> {
    let x = Value::queue(3);
    x.send(Value::Int(42))?;

    let y = deep_clone(&x);
    assert!(!is_same_reference(&x, &y));
    assert_eq!(y.len()?, 0);
    assert_eq!(y.capacity()?, 3);
    assert_eq!(x.len()?, 1);

    // Queues are equal only to themselves
    assert_ne!(y, x);
    assert_eq!(x, x.clone());
    Ok(())
}

#[test]
fn test_queue_unbounded() -> anyhow::Result<()> {
    let x = Value::unbounded_queue();
    x.send(Value::Int(1))?;
    x.send(Value::Int(2))?;

    let y = deep_clone(&x);
    assert_eq!(y.capacity()?, usize::MAX);
    assert!(y.is_empty()?);
    assert_eq!(x.recv()?, Value::Int(1));
    Ok(())
}

#[test]
fn test_nil_queue() {
    let x = Value::Queue(None);
    assert!(deep_clone(&x).is_nil());
    assert!(!is_same_reference(&x, &x));
    assert_eq!(x.try_recv(), Err(ExtError::NilDereference(Kind::Queue)));
}

#[test]
fn test_func_aliases() -> anyhow::Result<()> {
    let x = Value::func(adder());
    let y = deep_clone(&x);
    assert!(is_same_reference(&x, &y));
    assert_eq!(y.call(&[Value::Int(40), Value::Int(2)])?, Value::Int(42));

    let other = Value::func(adder());
    assert!(!is_same_reference(&x, &other));

    let err = x.call(&[Value::Int(1)]).unwrap_err();
    assert_eq!(
        err,
        ExtError::ArityMismatch {
            name: "add".to_string(),
            expected: 2,
            got: 1,
        }
    );

    assert!(y.is_callable());

    let nil = Value::Func(None);
    assert!(deep_clone(&nil).is_nil());
    assert!(!deep_clone(&nil).is_callable());
    assert!(!is_same_reference(&nil, &nil));
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════
// Untyped comparison
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_any_comparison_of_values() {
    let x = Value::slice(ints(&[1]));
    let alias = x.clone();
    assert!(is_same_reference_any(Some(&x), Some(&alias)));
    assert!(!is_same_reference_any(Some(&x), None));

    // Same storage, different static types
    let v = Value::slice(ints(&[1]));
    let wrapped = Value::interface(v.clone());
    assert!(is_same_reference(&v, &wrapped));
    assert!(!is_same_reference_any(Some(&v), Some(&Some(wrapped))));
}
