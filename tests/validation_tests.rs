use fissure::ast::Program;
use fissure::lexer::Token;
use fissure::parser::{ParseState, parse};
use fissure::validate::{ValidationError, validate_entry};

fn parse_program(input: &str) -> Program {
    let tokens = Token::lex_file("test.fs", input).expect("lexing failed");
    let mut state = ParseState::new(tokens);
    match parse(&mut state) {
        Ok(program) => program,
        Err(err) => panic!("parsing failed: {err}"),
    }
}

fn errors_for(input: &str) -> Vec<ValidationError> {
    validate_entry(&parse_program(input)).expect_err("expected validation errors")
}

#[test]
fn accepts_program_with_main() {
    let program = parse_program(concat!(
        "struct Program:\n",
        "  count :: Int\n",
        "  Main(system):\n",
        "    system {Print value: count}\n",
        "\n",
        "struct Helper:\n",
        "  Main():\n",
        "    1\n",
    ));
    assert_eq!(validate_entry(&program), Ok(()));
}

#[test]
fn rejects_missing_program_struct() {
    let errors = errors_for("struct Other:\n  x :: Int\n");
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], ValidationError::MissingProgram { .. }));
    assert_eq!(
        errors[0].to_string(),
        "test.fs:1:1: program must declare a struct named 'Program'"
    );
}

#[test]
fn rejects_program_without_main() {
    let errors = errors_for("struct Program:\n  Start(system):\n    1\n");
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], ValidationError::MissingMain { .. }));
    assert_eq!(errors[0].location().row(), Some(1));
}

#[test]
fn rejects_main_with_wrong_parameters() {
    let errors = errors_for("struct Program:\n  Main():\n    1\n");
    let [ValidationError::InvalidMainParameters { found, location }] = errors.as_slice() else {
        panic!("unexpected errors: {errors:?}");
    };
    assert_eq!(found, "none");
    assert_eq!(location.row(), Some(2));
    assert_eq!(location.column(), Some(3));

    let errors = errors_for("struct Program:\n  Main(sys):\n    1\n");
    assert!(matches!(
        errors.as_slice(),
        [ValidationError::InvalidMainParameters { found, .. }] if found == "'sys'"
    ));

    let errors = errors_for("struct Program:\n  Main(system, extra):\n    1\n");
    assert!(matches!(
        errors.as_slice(),
        [ValidationError::InvalidMainParameters { found, .. }] if found == "'system', 'extra'"
    ));
}

#[test]
fn reports_duplicates_with_both_locations() {
    let errors = errors_for(concat!(
        "struct Program:\n",
        "  x :: Int\n",
        "  x :: String\n",
        "  Main(system):\n",
        "    1\n",
        "  Main(system):\n",
        "    2\n",
        "struct Program:\n",
        "  y :: Int\n",
    ));
    assert_eq!(errors.len(), 3, "unexpected errors: {errors:?}");

    let ValidationError::DuplicateStruct {
        name,
        previous,
        location,
    } = &errors[0]
    else {
        panic!("expected duplicate struct first, got {errors:?}");
    };
    assert_eq!(name, "Program");
    assert_eq!(previous.row(), Some(1));
    assert_eq!(location.row(), Some(8));

    assert!(matches!(
        &errors[1],
        ValidationError::DuplicateMember { owner, name, .. } if owner == "Program" && name == "x"
    ));
    assert!(matches!(
        &errors[2],
        ValidationError::DuplicateHandler { name, location, .. }
            if name == "Main" && location.row() == Some(6)
    ));
}
