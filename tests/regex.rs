use std::sync::Arc;
use std::thread;

use regex_nfa::{compile, CompiledPattern, ParseError};

fn assert_matches(pattern: &str, accepted: &[&str], rejected: &[&str]) {
    let compiled = compile(pattern).unwrap();
    for input in accepted {
        assert!(
            compiled.matches(input),
            "pattern {pattern:?} should match {input:?}"
        );
    }
    for input in rejected {
        assert!(
            !compiled.matches(input),
            "pattern {pattern:?} should not match {input:?}"
        );
    }
}

#[test]
fn matches_plain_string() {
    assert_matches(
        "hello world",
        &["hello world"],
        &["", "h", "hello worl", "world", "helloworld"],
    );
}

#[test]
fn matches_any_string() {
    assert_matches(
        ".*",
        &["ioiahsoeahswe", "", "hello world", "89acjoizcmn';#';e2-103"],
        &[],
    );
}

#[test]
fn matches_string_with_dots() {
    assert_matches(
        "h.llo .orld",
        &["hello world", "hallo morld", "h3llo .orld"],
        &["ehllo world", "hllo world", "hello orld"],
    );
}

#[test]
fn matches_or() {
    assert_matches(
        "hello|world",
        &["hello", "world"],
        &["", "helloworld", "hell", "o", "w", "hello|world", "hellooworld"],
    );
}

#[test]
fn matches_string_preceded_and_followed_by_anything() {
    assert_matches(
        ".*hello world.*",
        &[
            "hello world",
            " hello world ",
            "hellohellohello worldworldworld",
            "oiniqnweoqinwehello world",
            "hello worldaojsdia0sdias",
            "hhello worldd",
        ],
        &["hello somethingithemiddleworld", "helloworld"],
    );
}

#[test]
fn matches_plus() {
    assert_matches(
        "hello+",
        &["hello", "helloo", "helloooooooo"],
        &["hell"],
    );
}

#[test]
fn matches_optional_character() {
    assert_matches("hell?o", &["hello", "helo"], &["helllo", "heo"]);
}

#[test]
fn matches_complex_expression_with_groups() {
    assert_matches(
        "h*(ello)* world|(here (be|are) dragons)",
        &[
            "here be dragons",
            "here are dragons",
            " world",
            "ello world",
            "h world",
            "hello world",
            "helloelloello world",
            "hhhhhello world",
            "hhhhhelloelloello world",
        ],
        &[
            "here  dragons",
            "here beare dragons",
            "here",
            "dragons",
            "elloh world",
            "a world",
            "llo world",
            "ahello world",
            "helloa world",
        ],
    );
}

#[test]
fn empty_pattern_matches_only_the_empty_string() {
    assert_matches("", &[""], &["a", " ", "ab"]);
}

#[test]
fn groups_never_change_the_matched_language() {
    assert_matches("(hello)", &["hello"], &["", "hell", "helloo"]);
    assert_matches("a(bc)d", &["abcd"], &["ad", "abd", "abcbcd"]);
    assert_matches("(())", &[""], &["()"]);
}

#[test]
fn matches_character_classes() {
    assert_matches("[abc]+", &["a", "cab", "bbbb"], &["", "d", "abd"]);
    assert_matches("[^0-9]", &["a", "_", " "], &["0", "5", "9", "", "aa"]);
    assert_matches("[a-f0-9]+", &["deadbeef", "0a1b"], &["g", "A", ""]);
}

#[test]
fn matches_predefined_classes() {
    assert_matches(r"\d+", &["0", "42", "007"], &["", "4a", "a"]);
    assert_matches(r"\w+", &["snake_case7", "X"], &["", "a b", "-"]);
    assert_matches(r"\s\S", &[" a", "\t!"], &["  ", "a ", "ab", " "]);
}

#[test]
fn matches_escaped_specials_literally() {
    assert_matches(r"\(\)", &["()"], &["", "(", ")"]);
    assert_matches(r"a\|b", &["a|b"], &["a", "b", "ab"]);
    assert_matches(r"\.", &["."], &["a"]);
}

#[test]
fn matching_is_deterministic_across_calls() {
    let compiled = compile("(ab)*c?").unwrap();
    for _ in 0..10 {
        assert!(compiled.matches("ababc"));
        assert!(!compiled.matches("aba"));
    }
}

#[test]
fn compiled_pattern_is_shareable_across_threads() {
    let compiled: Arc<CompiledPattern> = Arc::new(compile("(a|b)+c").unwrap());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let compiled = Arc::clone(&compiled);
            thread::spawn(move || {
                assert!(compiled.matches("ababc"));
                assert!(!compiled.matches("abab"));
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn malformed_patterns_fail_to_compile() {
    assert_eq!(Err(ParseError::UnclosedGroup), compile("(").map(|_| ()));
    assert_eq!(Err(ParseError::LeftoverTokens), compile(")").map(|_| ()));
    assert_eq!(Err(ParseError::DanglingBackslash), compile("ab\\").map(|_| ()));
    assert_eq!(Err(ParseError::StackedModifiers), compile("a**").map(|_| ()));
    assert_eq!(Err(ParseError::ExpectedSymbols), compile("*").map(|_| ()));
    assert_eq!(Err(ParseError::UnclosedClass), compile("[").map(|_| ()));
    assert_eq!(Err(ParseError::DescendingRange('z', 'a')), compile("[z-a]").map(|_| ()));
    assert_eq!(Err(ParseError::IncompleteRange), compile("[a-]").map(|_| ()));
    assert_eq!(Err(ParseError::IncompleteRange), compile("[-z]").map(|_| ()));
}

#[test]
fn parse_errors_carry_descriptive_messages() {
    let error = compile("(").unwrap_err();
    assert_eq!("unclosed group", error.to_string());
    let error = compile(r"\a").unwrap_err();
    assert_eq!(r"invalid character after a backslash: \a", error.to_string());
}
