//! Unit tests for rule tables, tool classification, and compiled groups.

use auto_approve::policy::rules::{
    CaseMode, RuleGroup, RuleGroupSpec, Rulebook, ToolKind, DANGEROUS_COMMANDS, SAFE_COMMANDS,
    SAFE_WRITES, SENSITIVE_PATHS,
};

#[test]
fn builtin_rulebook_compiles() {
    let rules = Rulebook::builtin().expect("built-in patterns are valid");
    assert_eq!(rules.sensitive_paths.name(), "sensitive_paths");
    assert_eq!(rules.safe_writes.name(), "safe_writes");
    assert_eq!(rules.dangerous_commands.name(), "dangerous_commands");
    assert_eq!(rules.safe_commands.name(), "safe_commands");
}

#[test]
fn risk_groups_ignore_case_and_allow_lists_do_not() {
    assert_eq!(SENSITIVE_PATHS.case, CaseMode::Insensitive);
    assert_eq!(DANGEROUS_COMMANDS.case, CaseMode::Insensitive);
    assert_eq!(SAFE_WRITES.case, CaseMode::Sensitive);
    assert_eq!(SAFE_COMMANDS.case, CaseMode::Sensitive);
}

#[test]
fn classify_maps_known_tools() {
    assert_eq!(ToolKind::classify("Read"), ToolKind::ReadOnly);
    assert_eq!(ToolKind::classify("Task"), ToolKind::ReadOnly);
    assert_eq!(ToolKind::classify("Edit"), ToolKind::Edit);
    assert_eq!(ToolKind::classify("MultiEdit"), ToolKind::Edit);
    assert_eq!(ToolKind::classify("Write"), ToolKind::Write);
    assert_eq!(ToolKind::classify("Bash"), ToolKind::Shell);
    assert_eq!(ToolKind::classify("bash"), ToolKind::Unknown);
    assert_eq!(ToolKind::classify("NotebookEdit"), ToolKind::Unknown);
}

#[test]
fn insensitive_group_matches_any_case() {
    let group = RuleGroup::compile(&SENSITIVE_PATHS).unwrap();
    assert_eq!(group.case(), CaseMode::Insensitive);
    assert!(group.is_match("/ETC/passwd"));
    assert!(group.is_match("My-SECRETS.txt"));
    assert!(!group.is_match("notes.md"));
}

#[test]
fn sensitive_group_requires_exact_case() {
    let group = RuleGroup::compile(&SAFE_COMMANDS).unwrap();
    assert!(group.is_match("git log -5"));
    assert!(!group.is_match("Git log -5"));
}

#[test]
fn patterns_search_rather_than_match_whole_string() {
    let group = RuleGroup::compile(&DANGEROUS_COMMANDS).unwrap();
    assert!(group.is_match("cd /tmp && rm -rf cache"));
}

#[test]
fn first_match_prefers_earliest_listed_pattern() {
    let group = RuleGroup::compile(&DANGEROUS_COMMANDS).unwrap();
    // Both `rm\s+-rf` and `sudo\s` fire; `rm\s+-rf` is listed first.
    assert_eq!(group.first_match("sudo rm -rf /"), Some(r"rm\s+-rf"));
    assert_eq!(group.first_match("ls"), None);
}

#[test]
fn matched_rule_is_group_qualified() {
    let group = RuleGroup::compile(&SAFE_WRITES).unwrap();
    assert_eq!(
        group.matched_rule("notes.txt").as_deref(),
        Some(r"safe_writes:\.txt$")
    );
    assert!(group.matched_rule("notes.yaml").is_none());
}

#[test]
fn invalid_pattern_is_a_policy_error() {
    let spec = RuleGroupSpec {
        name: "broken",
        case: CaseMode::Sensitive,
        patterns: &["(unclosed"],
    };
    let err = RuleGroup::compile(&spec).unwrap_err();
    assert!(err.to_string().starts_with("policy:"), "{err}");
}

#[test]
fn empty_group_matches_nothing() {
    let spec = RuleGroupSpec {
        name: "empty",
        case: CaseMode::Insensitive,
        patterns: &[],
    };
    let group = RuleGroup::compile(&spec).unwrap();
    assert!(!group.is_match(""));
    assert!(group.matched_rule("anything").is_none());
}

#[test]
fn trailing_dollar_matches_before_final_newline() {
    let group = RuleGroup::compile(&SENSITIVE_PATHS).unwrap();
    assert_eq!(group.first_match("id.KEY\n"), Some(r"\.key$"));
    assert!(!group.is_match("id.key\nx"));
}

#[test]
fn escaped_trailing_dollar_stays_literal() {
    let spec = RuleGroupSpec {
        name: "literal",
        case: CaseMode::Sensitive,
        patterns: &[r"cost\$"],
    };
    let group = RuleGroup::compile(&spec).unwrap();
    assert!(group.is_match("total cost$ here"));
    assert!(!group.is_match("total cost"));
}
