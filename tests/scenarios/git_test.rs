//! Multi-command scenarios built around the git example.

use super::common::{Calls, GitClone};
use docargs::{Arguments, DocargsError, Options, Program, Value};
use pretty_assertions::assert_eq;

fn git_program() -> (Program, Calls) {
    let calls = Calls::default();
    let git = GitClone {
        calls: calls.clone(),
    };
    let program = Program::registry(&git, Options::default().prog_name("git")).unwrap();
    (program, calls)
}

fn commit(a: bool, m: Option<&str>, amend: bool) -> (String, Arguments) {
    (
        "commit".to_string(),
        Arguments::from_pairs([
            ("a", Value::from(a)),
            ("m", Value::from(m)),
            ("amend", Value::from(amend)),
        ]),
    )
}

#[test]
fn test_simple_clone() {
    let (program, calls) = git_program();
    program
        .dispatch(["clone", "git@github.com/user/repo"])
        .unwrap();
    assert_eq!(
        calls.only(),
        (
            "clone".to_string(),
            Arguments::from_pairs([
                ("src", Value::from("git@github.com/user/repo")),
                ("_dest", Value::None),
            ])
        )
    );
}

#[test]
fn test_clone_with_destination() {
    let (program, calls) = git_program();
    program.dispatch(["clone", "repo", "checkout"]).unwrap();
    assert_eq!(calls.only().1.str("_dest"), Some("checkout"));
}

#[test]
fn test_invalid_clone_parameters() {
    let (program, calls) = git_program();
    let err = program.dispatch(["clone"]).unwrap_err();
    let DocargsError::Parse(e) = &err else {
        panic!("expected a parse error, got {err}");
    };
    let message = e.to_string();
    assert!(message.contains("git clone"));
    assert!(message.contains("<src>"));
    assert!(calls.all().is_empty());
}

#[test]
fn test_commit_no_parameters() {
    let (program, calls) = git_program();
    program.dispatch(["commit"]).unwrap();
    assert_eq!(calls.only(), commit(false, None, false));
}

#[test]
fn test_commit_add_no_message() {
    let (program, calls) = git_program();
    program.dispatch(["commit", "-a"]).unwrap();
    assert_eq!(calls.only(), commit(true, None, false));
}

#[test]
fn test_commit_with_message() {
    let (program, calls) = git_program();
    program
        .dispatch(["commit", "-m", "This is my message"])
        .unwrap();
    assert_eq!(calls.only(), commit(false, Some("This is my message"), false));
}

#[test]
fn test_commit_with_amend_flag() {
    let (program, calls) = git_program();
    program.dispatch(["commit", "--amend"]).unwrap();
    assert_eq!(calls.only(), commit(false, None, true));
}

#[test]
fn test_commit_with_all_options() {
    let (program, calls) = git_program();
    program
        .dispatch(["commit", "-am", "Foo", "--amend"])
        .unwrap();
    assert_eq!(calls.only(), commit(true, Some("Foo"), true));
}

#[test]
fn test_private_method_is_not_a_subcommand() {
    let (program, calls) = git_program();
    let err = program.dispatch(["_bottom", "c", "d"]).unwrap_err();
    assert!(matches!(err, DocargsError::Parse(_)));
    assert!(calls.all().is_empty());
}

#[test]
fn test_unknown_subcommand_fails() {
    let (program, calls) = git_program();
    let err = program.dispatch(["push"]).unwrap_err();
    assert_eq!(err.exit_code(), 2);
    assert!(calls.all().is_empty());
}

#[test]
fn test_parse_only_then_invoke() {
    let (program, calls) = git_program();
    let invocation = program.parse(["commit", "-a"]).unwrap();
    assert_eq!(invocation.command.name, "commit");
    assert!(calls.all().is_empty());

    invocation.invoke().unwrap();
    assert_eq!(calls.only(), commit(true, None, false));
}
