//! Property tests over randomly built chains

use liberr::{loggable_level_with, with_level, with_level_msg, with_message, with_stack, wrapf, Error, Severity};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Step {
    Message(String),
    Stack,
    Wrapf(String),
    Level(Severity),
    LevelMsg(Severity, String),
}

fn severity() -> impl Strategy<Value = Severity> {
    prop::sample::select(Severity::ALL.to_vec())
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        "[a-z ]{0,12}".prop_map(Step::Message),
        Just(Step::Stack),
        "[a-z ]{1,12}".prop_map(Step::Wrapf),
        severity().prop_map(Step::Level),
        (severity(), "[a-z]{1,8}").prop_map(|(s, m)| Step::LevelMsg(s, m)),
    ]
}

fn apply(err: Option<Error>, step: &Step) -> Option<Error> {
    match step {
        Step::Message(m) => with_message(err, m),
        Step::Stack => with_stack(err),
        Step::Wrapf(m) => wrapf(err, m),
        Step::Level(s) => with_level(err, *s),
        Step::LevelMsg(s, m) => with_level_msg(err, *s, m),
    }
}

fn stack_count(err: &Error) -> usize {
    err.chain().filter(|e| e.stack_trace().is_some()).count()
}

proptest! {
    #[test]
    fn prop_none_stays_none(steps in prop::collection::vec(step(), 0..12)) {
        let out = steps.iter().fold(None, apply);
        prop_assert!(out.is_none());
    }

    #[test]
    fn prop_root_cause_survives_any_wrapping(
        base_msg in "[a-z]{1,16}",
        steps in prop::collection::vec(step(), 0..12),
    ) {
        let base = Error::new(base_msg.clone());
        let out = steps.iter().fold(Some(base.clone()), apply).unwrap();

        prop_assert!(Error::ptr_eq(&out.root_cause(), &base));
        prop_assert!(out.to_string().ends_with(&base_msg));
        prop_assert_eq!(base.to_string(), base_msg);
    }

    #[test]
    fn prop_at_most_one_wrapper_stack_over_a_foreign_leaf(
        steps in prop::collection::vec(step(), 0..12),
    ) {
        let base = Error::from_std(std::fmt::Error);
        let out = steps.iter().fold(Some(base), apply).unwrap();
        prop_assert!(stack_count(&out) <= 1);
    }

    #[test]
    fn prop_aggregate_is_max_of_tags_or_default(
        steps in prop::collection::vec(step(), 0..12),
        default in severity(),
    ) {
        let base = Error::new("leaf");
        let out = steps.iter().fold(Some(base.clone()), apply);

        let tags: Vec<Severity> = steps
            .iter()
            .filter_map(|s| match s {
                Step::Level(l) | Step::LevelMsg(l, _) => Some(*l),
                _ => None,
            })
            .collect();

        let (root, level, ok) = loggable_level_with(out.as_ref(), default);
        prop_assert!(Error::ptr_eq(&root.unwrap(), &base));
        prop_assert_eq!(ok, !tags.is_empty());
        prop_assert_eq!(level, tags.into_iter().max().unwrap_or(default));
    }

    #[test]
    fn prop_plain_text_has_no_stack_data(steps in prop::collection::vec(step(), 0..12)) {
        let out = steps.iter().fold(Some(Error::new("leaf")), apply).unwrap();
        let plain = out.to_string();
        prop_assert!(!plain.contains('\n'));
        prop_assert!(!plain.contains("chain_properties_test.rs"));
    }
}
