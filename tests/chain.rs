//! End-to-end chain semantics: type-guarded assignment, dotted paths,
//! scope entry/exit, repeat and result capture.

mod common;

use cascade::engine::scope::{VAR_RESULT, VAR_RESULTS};
use cascade::{cascade, cascade_with, Options, Value};
use common::*;
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn assigns_within_the_same_type() {
    let subject = one_field();
    cascade(subject.clone())
        .step([Value::from("x"), Value::from(2)])
        .unwrap();
    assert_eq!(subject.member_str("x"), Value::from(2));
}

#[test]
fn mutations_are_visible_through_the_callers_handle() {
    let subject = one_field();
    let released = cascade(subject.clone())
        .step([Value::from("x"), Value::from(9)])
        .unwrap()
        .release();
    // Released value and the caller's handle alias the same storage.
    assert_eq!(released, subject);
    assert_eq!(subject.member_str("x"), Value::from(9));
}

#[test]
fn refuses_cross_type_assignment_by_default() {
    let subject = one_field();
    cascade(subject.clone())
        .step([Value::from("x"), Value::from("hi")])
        .unwrap();
    assert_eq!(subject.member_str("x"), Value::from(1));
}

#[test]
fn maintain_data_type_off_allows_cross_type_assignment() {
    let subject = one_field();
    let options = Options {
        maintain_data_type: false,
        ..Options::default()
    };
    cascade_with(subject.clone(), options)
        .step([Value::from("x"), Value::from("hi")])
        .unwrap();
    assert_eq!(subject.member_str("x"), Value::from("hi"));
}

#[test]
fn absent_member_stays_absent_by_default() {
    let subject = one_field();
    cascade(subject.clone())
        .step([Value::from("missing"), Value::from(5)])
        .unwrap();
    assert!(subject.member_str("missing").is_undefined());
}

#[test]
fn override_undefined_populates_absent_members_of_any_type() {
    let subject = one_field();
    let options = Options {
        override_undefined: true,
        ..Options::default()
    };
    cascade_with(subject.clone(), options)
        .step([Value::from("missing"), Value::from("anything")])
        .unwrap();
    assert_eq!(subject.member_str("missing"), Value::from("anything"));
}

#[test]
fn dotted_operand_targets_the_nested_member() {
    let subject = nested_subject();
    cascade(subject.clone())
        .step([Value::from("a.b"), Value::from(5)])
        .unwrap();
    assert_eq!(subject.member_str("a").member_str("b"), Value::from(5));
}

#[test]
fn dotted_assignment_honors_the_type_guard() {
    let subject = nested_subject();
    cascade(subject.clone())
        .step([Value::from("a.b"), Value::from("nope")])
        .unwrap();
    assert_eq!(subject.member_str("a").member_str("b"), Value::from(1));
}

#[test]
fn invokes_member_functions_with_the_subject_as_this() {
    let subject = empty_subject();
    subject.set_member(
        &Value::from("mark"),
        Value::native("mark", |this, args| {
            let flag = args.first().cloned().unwrap_or(Value::Bool(true));
            this.set_member(&Value::from("marked"), flag);
            Ok(Value::Null)
        }),
    );

    cascade(subject.clone())
        .step([Value::from("mark"), Value::from(true)])
        .unwrap();
    assert_eq!(subject.member_str("marked"), Value::from(true));
}

#[test]
fn invokes_a_function_operand_directly() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let subject = one_field();
    cascade(subject)
        .step([recording_fn(Rc::clone(&log)), Value::from(1), Value::from(2)])
        .unwrap();
    assert_eq!(*log.borrow(), vec![Value::from(1), Value::from(2)]);
}

#[test]
fn captures_every_invocation_result_in_order() {
    let subject = empty_subject();
    subject.set_member(&Value::from("tick"), counter_fn());

    let chain = cascade(subject)
        .step([Value::from("tick")])
        .unwrap()
        .step([Value::from("tick")])
        .unwrap()
        .step([Value::from("tick")])
        .unwrap();

    let results = chain.variable(VAR_RESULTS).unwrap();
    let results = results.as_array().unwrap();
    assert_eq!(
        *results,
        vec![Value::from(0), Value::from(1), Value::from(2)]
    );
    assert_eq!(chain.variable(VAR_RESULT), Some(Value::from(2)));
}

#[test]
fn store_results_off_disables_capture() {
    let subject = empty_subject();
    subject.set_member(&Value::from("tick"), counter_fn());

    let options = Options {
        store_results: false,
        ..Options::default()
    };
    let chain = cascade_with(subject, options)
        .step([Value::from("tick")])
        .unwrap();

    assert_eq!(chain.variable(VAR_RESULT), Some(Value::Undefined));
    assert_eq!(
        chain.variable(VAR_RESULTS).unwrap().as_array().unwrap().len(),
        0
    );
}

#[test]
fn repeat_reruns_the_last_step_and_advances_the_index() {
    let subject = empty_subject();
    subject.set_member(&Value::from("tick"), counter_fn());

    let chain = cascade(subject)
        .step([Value::from("tick")])
        .unwrap()
        .repeat(3)
        .unwrap();

    assert_eq!(chain.index(), 4);
    assert_eq!(
        chain.variable(VAR_RESULTS).unwrap().as_array().unwrap().len(),
        4
    );
}

#[test]
fn repeat_sees_fresh_variable_state_per_run() {
    // The repeated step assigns $index, so each run must observe a
    // different counter value.
    let subject = empty_subject();
    let options = Options {
        override_undefined: true,
        ..Options::default()
    };
    let chain = cascade_with(subject.clone(), options)
        .step([Value::from("n"), Value::from("$index")])
        .unwrap()
        .repeat(2)
        .unwrap();

    assert_eq!(subject.member_str("n"), Value::from(2));
    assert_eq!(chain.index(), 3);
}

#[test]
fn repeat_zero_or_without_a_step_is_a_no_op() {
    let subject = one_field();
    let chain = cascade(subject.clone());
    assert_eq!(chain.repeat(5).unwrap().index(), 0);

    let chain = chain.step([Value::from("x"), Value::from(2)]).unwrap();
    assert_eq!(chain.repeat(0).unwrap().index(), 1);
    assert_eq!(subject.member_str("x"), Value::from(2));
}

#[test]
fn enter_descends_and_exit_returns_to_the_parent() {
    let subject = nested_subject();
    let root = cascade(subject.clone());

    let inner = root.enter("a").unwrap();
    inner.step([Value::from("b"), Value::from(7)]).unwrap();
    assert_eq!(subject.member_str("a").member_str("b"), Value::from(7));

    // Back on the root subject, not on `a`.
    let outer = inner.exit();
    assert_eq!(outer.release(), subject);
}

#[test]
fn enter_resolves_dotted_paths() {
    let subject = nested_subject();
    let inner = cascade(subject.clone()).enter("a").unwrap();
    assert_eq!(inner.release(), subject.member_str("a"));
}

#[test]
fn exit_at_the_root_is_a_no_op() {
    let subject = one_field();
    let root = cascade(subject.clone());
    assert_eq!(root.exit().release(), subject);
}

#[test]
fn entered_scope_has_its_own_variables() {
    let subject = nested_subject();
    let root = cascade(subject)
        .step([Value::from("a.b"), Value::from(2)])
        .unwrap();
    let inner = root.enter("a").unwrap();
    assert_eq!(root.index(), 1);
    assert_eq!(inner.index(), 0);
}

#[test]
fn chain_steps_run_against_the_full_subject_suite() {
    let subject = make_subject();
    cascade(subject.clone())
        .step([Value::from("valueNumber"), Value::from(1)])
        .unwrap()
        .step([Value::from("valueString"), Value::from("world")])
        .unwrap()
        .step([Value::from("valueBoolean"), Value::from(false)])
        .unwrap();

    assert_eq!(subject.member_str("valueNumber"), Value::from(1));
    assert_eq!(subject.member_str("valueString"), Value::from("world"));
    assert_eq!(subject.member_str("valueBoolean"), Value::from(false));
}
