//! Integration tests for the rule parser

use kfilter_core::rule::{parse, BUILTIN_EXPRESSION};
use kfilter_core::{Error, FilterRule, Polarity, RuleSet};

#[test]
fn test_escaped_annotation_key() {
    let rules = parse(
        "metadata.annotations.kubectl\\.kubernetes\\.io/last-applied-configuration",
        Polarity::Drop,
    )
    .expect("Failed to parse");

    assert_eq!(rules.len(), 1);
    let rule = &rules.as_slice()[0];
    assert_eq!(rule.polarity, Polarity::Drop);
    assert_eq!(
        rule.path,
        vec![
            "metadata",
            "annotations",
            "kubectl.kubernetes.io/last-applied-configuration"
        ]
    );
}

#[test]
fn test_builtin_defaults() {
    let parsed = parse(BUILTIN_EXPRESSION, Polarity::Drop).expect("Failed to parse");
    let builtin = RuleSet::builtin();

    assert_eq!(parsed, builtin);
    assert_eq!(builtin.as_slice()[0], FilterRule::drop(["metadata", "managedFields"]));
    assert_eq!(builtin.as_slice()[1], FilterRule::drop(["metadata", "selfLink"]));
}

#[test]
fn test_user_rules_default_to_keep() {
    let rules = RuleSet::parse_user("metadata.name,-status,+spec.containers").unwrap();

    let polarities: Vec<_> = rules.iter().map(|r| r.polarity).collect();
    assert_eq!(polarities, vec![Polarity::Keep, Polarity::Drop, Polarity::Keep]);
}

#[test]
fn test_rule_order_is_preserved() {
    let rules = RuleSet::parse_user("c,a,b").unwrap();
    let first: Vec<_> = rules.iter().map(|r| r.path[0].as_str()).collect();
    assert_eq!(first, vec!["c", "a", "b"]);
}

#[test]
fn test_user_rules_follow_builtins() {
    let user = RuleSet::parse_user("+metadata.selfLink").unwrap();
    let all = RuleSet::chain(RuleSet::builtin(), user);

    assert_eq!(all.len(), 4);
    assert!(all.as_slice()[..3].iter().all(|r| r.polarity == Polarity::Drop));
    assert_eq!(all.as_slice()[3], FilterRule::keep(["metadata", "selfLink"]));
}

#[test]
fn test_display_roundtrip() {
    let expr = "+metadata.name,-metadata.annotations.example\\.com/owner,spec";
    let rules = RuleSet::parse_user(expr).unwrap();

    assert_eq!(
        rules.to_string(),
        "+metadata.name,-metadata.annotations.example\\.com/owner,+spec"
    );
    assert_eq!(RuleSet::parse_user(&rules.to_string()).unwrap(), rules);
}

#[test]
fn test_parse_error_message() {
    let err = RuleSet::parse_user("spec,,status").unwrap_err();
    assert!(matches!(err, Error::Parse { .. }));
    assert!(err.to_string().contains("empty rule"));
}
