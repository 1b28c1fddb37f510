use std::collections::HashSet;

use insta::assert_snapshot;
use mathtext_core::interpreter::Interpreter;
use mathtext_core::loader::load_from_buffer;

#[test]
fn main() {
    let problems = [
        ("unterminated_fraction", "@1~2"),
        ("unterminated_exponent", "x^(2"),
        ("unterminated_subscript", "x_(2"),
        ("unterminated_root_index", "_/[2"),
        ("unterminated_root_argument", "_/(2"),
        ("unterminated_modifier_group", "`V(abc"),
        ("modifier_missing_argument", "`BAR"),
        ("unknown_command", "$$Frobnicate"),
    ];

    for (name, problem) in problems {
        let lines = load_from_buffer(problem, "test.mt");
        let result = Interpreter::new(HashSet::new()).interpret(&lines);
        let err = result.error.unwrap_or_else(|| panic!("problem `{problem}` did not produce an error"));
        let output = format!("{err}\ndiagnostics: {}", result.diagnostics.len());
        assert_snapshot!(name, &output, problem);
    }
}
