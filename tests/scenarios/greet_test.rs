//! Single-function scenarios built around `greet(name, count=1, greeting="Hello")`.

use super::common::Calls;
use docargs::{CommandSpec, DocargsError, Options, Program, Schema, Value};
use pretty_assertions::assert_eq;

fn greet_program(calls: &Calls) -> Program {
    let callable = calls.callable(
        "greet(name, count=1, greeting='Hello')",
        "A simple greeting program
        :param name:      Name to greet.
        :param count:     How many times to greet them.
        :param greeting:  Which greeting to use.",
    );
    Program::function(callable, Options::default().prog_name("greet")).unwrap()
}

#[test]
fn test_only_positional_uses_defaults() {
    let calls = Calls::default();
    let program = greet_program(&calls);

    program.dispatch(["Joe"]).unwrap();

    let (name, args) = calls.only();
    assert_eq!(name, "greet");
    assert_eq!(
        args.iter().collect::<Vec<_>>(),
        vec![
            ("name", &Value::from("Joe")),
            ("count", &Value::Int(1)),
            ("greeting", &Value::from("Hello")),
        ]
    );
}

#[test]
fn test_count_flag_coerced_to_int() {
    let calls = Calls::default();
    let program = greet_program(&calls);

    program.dispatch(["Joe", "--count", "4"]).unwrap();

    let (_, args) = calls.only();
    assert_eq!(args.get("count"), Some(&Value::Int(4)));
    assert_eq!(args.str("greeting"), Some("Hello"));
}

#[test]
fn test_flags_in_any_order() {
    let calls = Calls::default();
    let program = greet_program(&calls);

    program
        .dispatch(["--greeting", "Hi", "Ann", "--count", "2"])
        .unwrap();

    let (_, args) = calls.only();
    assert_eq!(args.str("name"), Some("Ann"));
    assert_eq!(args.str("greeting"), Some("Hi"));
    assert_eq!(args.int("count"), Some(2));
}

#[test]
fn test_missing_positional_never_calls_handler() {
    let calls = Calls::default();
    let program = greet_program(&calls);

    let err = program.dispatch(Vec::<String>::new()).unwrap_err();
    assert!(matches!(err, DocargsError::Parse(_)));
    assert_eq!(err.exit_code(), 2);
    assert!(calls.all().is_empty());
}

#[test]
fn test_unknown_flag_fails() {
    let calls = Calls::default();
    let program = greet_program(&calls);

    assert!(program.dispatch(["Joe", "--loud"]).is_err());
    assert!(calls.all().is_empty());
}

#[test]
fn test_function_with_no_arguments() {
    let calls = Calls::default();
    let program =
        Program::function(calls.callable("main()", ""), Options::default().prog_name("main"))
            .unwrap();
    program.dispatch(Vec::<String>::new()).unwrap();
    assert!(calls.only().1.is_empty());
}

#[test]
fn test_only_positional_arguments() {
    let calls = Calls::default();
    let program = Program::function(
        calls.callable("main(arg1, arg2, arg3)", ""),
        Options::default().prog_name("main"),
    )
    .unwrap();
    program.dispatch(["a1", "a2", "a3"]).unwrap();
    let (_, args) = calls.only();
    assert_eq!(args.str("arg3"), Some("a3"));
}

#[test]
fn test_only_optional_arguments() {
    let calls = Calls::default();
    let program = Program::function(
        calls.callable("main(arg1=None, arg2=None, arg3=None)", ""),
        Options::default().prog_name("main"),
    )
    .unwrap();

    program
        .dispatch(["--arg1", "1", "--arg3", "3", "--arg2", "2"])
        .unwrap();
    program.dispatch(["--arg2", "x"]).unwrap();

    let calls = calls.all();
    assert_eq!(calls[0].1.str("arg1"), Some("1"));
    assert_eq!(calls[0].1.str("arg2"), Some("2"));
    assert_eq!(calls[1].1.get("arg1"), Some(&Value::None));
    assert_eq!(calls[1].1.get("arg3"), Some(&Value::None));
}

#[test]
fn test_value_returned_from_handler() {
    let callable =
        docargs::Callable::declare("return_some_value(value=5)", |args| {
            Ok(args.get("value").cloned().unwrap_or_default())
        })
        .unwrap();
    let program = Program::function(callable, Options::default().prog_name("rv")).unwrap();
    assert_eq!(program.dispatch(Vec::<String>::new()).unwrap(), Value::Int(5));
}

#[test]
fn test_schema_description_from_docstring() {
    let calls = Calls::default();
    let program = greet_program(&calls);
    let Schema::Single(spec) = program.schema() else {
        panic!("expected a single command");
    };
    let spec: &CommandSpec = spec;
    assert_eq!(spec.help_text, "A simple greeting program");
    assert_eq!(spec.arguments.len(), 3);
    assert_eq!(
        spec.argument("count").and_then(|a| a.help_text.as_deref()),
        Some("How many times to greet them.")
    );
}
