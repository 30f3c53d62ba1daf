//! The join battery from the reference fixtures: key joins, explicit
//! columns, fan-out, empty results, outer padding, and rejections.

mod fixtures;

use fixtures::ints;
use jrel_core::error::Error;
use jrel_core::prelude::*;

fn t1() -> Table {
    ints(&["a", "b"], Some("b"), &[&[1, 2], &[3, 4]])
}

fn t2() -> Table {
    ints(&["b", "c"], Some("b"), &[&[2, 1], &[4, 3]])
}

#[test]
fn natural_join_on_the_shared_key() {
    let j = t1().join(&t2(), false, None, None).unwrap();
    assert_eq!(j, ints(&["a", "b", "c"], None, &[&[1, 2, 1], &[3, 4, 3]]));
}

#[test]
fn explicit_self_column() {
    let t3 = ints(&["a", "B"], Some("b"), &[&[1, 2], &[3, 4]]);
    let j = t3.join(&t2(), false, Some("b"), None).unwrap();
    assert_eq!(j.columns(), ["a", "B", "c"]);
    assert_eq!(j, ints(&["a", "B", "c"], None, &[&[1, 2, 1], &[3, 4, 3]]));
}

#[test]
fn explicit_both_columns() {
    let t3 = ints(&["a", "B"], Some("b"), &[&[1, 2], &[3, 4]]);
    let t7 = ints(&["d", "c"], Some("d"), &[&[2, 1], &[4, 3]]);
    let j = t3.join(&t7, false, Some("b"), Some("d")).unwrap();
    assert_eq!(j, ints(&["a", "B", "c"], None, &[&[1, 2, 1], &[3, 4, 3]]));
}

#[test]
fn unkeyed_side_fans_out() {
    let t4 = ints(&["b", "c"], None, &[&[2, 1], &[2, 2], &[3, 1], &[4, 1]]);
    let j = t1().inner_join(&t4).unwrap();
    assert_eq!(
        j,
        ints(&["a", "b", "c"], None, &[&[1, 2, 1], &[1, 2, 2], &[3, 4, 1]])
    );
}

#[test]
fn partial_and_empty_inner_joins() {
    let t5 = ints(&["b", "c"], Some("b"), &[&[2, 2]]);
    let t6 = ints(&["b", "c"], Some("b"), &[&[1, 2]]);
    assert_eq!(
        t1().inner_join(&t5).unwrap(),
        ints(&["a", "b", "c"], None, &[&[1, 2, 2]])
    );
    let empty = t1().inner_join(&t6).unwrap();
    assert!(empty.is_empty());
    assert_eq!(empty.columns(), ["a", "b", "c"]);
}

#[test]
fn outer_join_pads_missing_matches_with_nulls() {
    let t5 = ints(&["b", "c"], Some("b"), &[&[2, 2]]);
    let j = t1().outer_join(&t5).unwrap();
    assert_eq!(
        j.rows(),
        [
            vec![Value::Int(1), Value::Int(2), Value::Int(2)],
            vec![Value::Int(3), Value::Int(4), Value::Null],
        ]
    );
}

#[test]
fn inner_join_is_never_larger_than_outer() {
    let t5 = ints(&["b", "c"], Some("b"), &[&[2, 2]]);
    let inner = t1().inner_join(&t5).unwrap();
    let outer = t1().outer_join(&t5).unwrap();
    assert!(inner.len() <= outer.len());

    // equal sizes exactly when every left row matches
    let full = t1().inner_join(&t2()).unwrap();
    assert_eq!(full.len(), t1().outer_join(&t2()).unwrap().len());
}

#[test]
fn join_result_drops_the_primary_key() {
    let j = t1().inner_join(&t2()).unwrap();
    assert_eq!(j.primary_key(), None);
}

#[test]
fn self_join_is_ambiguous() {
    assert!(matches!(
        t1().join(&t1(), false, None, None),
        Err(Error::AmbiguousJoinColumn(_))
    ));
}

#[test]
fn disjoint_columns_would_be_cartesian() {
    let t = ints(&["c", "d"], Some("c"), &[&[2, 1], &[4, 3]]);
    assert!(matches!(
        t1().join(&t, false, None, None),
        Err(Error::NoJoinColumn)
    ));
}

#[test]
fn unknown_explicit_column_fails() {
    assert!(matches!(
        t1().join(&t2(), false, Some("zzz"), None),
        Err(Error::UnknownColumn(_))
    ));
}
