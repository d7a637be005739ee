//! Help output produced for derived schemas.

use super::common::{Calls, GitClone};
use docargs::{DocargsError, Options, Program};

fn help_for(program: &Program, argv: &[&str]) -> String {
    match program.dispatch(argv) {
        Err(DocargsError::Parse(e)) => {
            assert_eq!(e.exit_code(), 0, "expected a help request: {e}");
            e.to_string()
        }
        other => panic!("expected help output, got {other:?}"),
    }
}

fn git_program() -> Program {
    let git = GitClone {
        calls: Calls::default(),
    };
    Program::registry(&git, Options::default().prog_name("git")).unwrap()
}

#[test]
fn test_top_level_help_lists_subcommands() {
    let program = git_program();
    let help = help_for(&program, &["-h"]);

    assert!(help.contains("A git clone"));
    assert!(help.contains("clone"));
    assert!(help.contains("Clone a repository"));
    assert!(help.contains("Commit a change to the index"));
    assert!(!help.contains("param"));
    assert!(!help.contains("_bottom"));
    assert!(help.find("clone").unwrap() < help.find("commit").unwrap());
}

#[test]
fn test_clone_help_text() {
    let program = git_program();
    let help = help_for(&program, &["clone", "-h"]);

    assert!(help.contains("<src>"));
    assert!(help.contains("[dest]"));
    assert!(help.contains("the repository to clone"));
    assert!(help.contains("the destination for cloning"));
    assert!(!help.contains("param"));
}

#[test]
fn test_commit_help_text() {
    let program = git_program();
    let help = help_for(&program, &["commit", "--help"]);

    assert!(help.contains("-a"));
    assert!(help.contains("Add all modified flags to the index"));
    assert!(help.contains("-m <M>"));
    assert!(help.contains("--amend"));
    assert!(help.contains("Amend the last commit"));
    assert!(!help.contains("param"));
}

#[test]
fn test_poorly_formatted_docstring() {
    let calls = Calls::default();
    let callable = calls.callable(
        "poor_formatting(src, _dest)",
        "
            Clone a repository, but
            with a new line
            :    param src: the repository to clone
            :param    _dest     : the destination for cloning
            ",
    );
    let program =
        Program::function(callable, Options::default().prog_name("poor")).unwrap();
    let help = program.help();

    assert!(help.contains("butwith"));
    assert!(help.contains("<src>"));
    assert!(help.contains("[dest]"));
    assert!(help.contains("the repository to clone"));
    assert!(help.contains("the destination for cloning"));
    assert!(!help.contains("param"));
}
