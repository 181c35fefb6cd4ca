//! Integration tests for end-to-end compilation.
//!
//! These tests drive the complete pipeline from source text through
//! tokenization, parsing, type checking and JavaScript generation.

use scriptc::{
    analyze_source, compile_source,
    config::{CompileOptions, Target},
    errors::errors::{Error, ErrorKind},
    format_error,
    type_checker::builtins::root_environment,
};

fn compile(source: &str) -> Result<String, Error> {
    let root = root_environment();
    compile_source(source, "test.sc", &root, &CompileOptions::default())
}

fn error_kind(source: &str) -> ErrorKind {
    compile(source).expect_err("expected compilation to fail").kind()
}

#[test]
fn test_redeclaration_and_shadowing() {
    assert_eq!(error_kind("let a = 1; let a = 2;"), ErrorKind::Declaration);
    assert_eq!(error_kind("let a = 1; const a = 2;"), ErrorKind::Declaration);
    assert!(compile("let a = 1; while true { let a = 2; break; }").is_ok());
    assert!(compile("fn f(a: int) { let b = a; { let b = 2; } }").is_ok());
}

#[test]
fn test_integer_arithmetic() {
    for operator in ["^", "-", "*", "%", "/"] {
        assert!(compile(&format!("let a: int = 8 {} 2;", operator)).is_ok());
        assert_eq!(
            error_kind(&format!("let a = 8 {} true;", operator)),
            ErrorKind::Type
        );
        assert_eq!(
            error_kind(&format!("let a = \"8\" {} 2;", operator)),
            ErrorKind::Type
        );
    }
}

#[test]
fn test_plus_typing() {
    assert!(compile("let a: string = \"x\" + \"y\";").is_ok());
    assert!(compile("let a: int = 1 + 2;").is_ok());
    assert_eq!(error_kind("let a = \"x\" + 1;"), ErrorKind::Type);
    assert_eq!(error_kind("let a = 1n + 1n;"), ErrorKind::Type);
}

#[test]
fn test_void_function_returning_value() {
    assert_eq!(error_kind("fn f() { return 1; }"), ErrorKind::ControlFlow);
    assert_eq!(error_kind("fn f() -> none { return \"a\"; }"), ErrorKind::ControlFlow);
    assert!(compile("fn f() { return; }").is_ok());
}

#[test]
fn test_break_and_continue_need_a_loop() {
    assert_eq!(error_kind("break;"), ErrorKind::ControlFlow);
    assert_eq!(error_kind("continue;"), ErrorKind::ControlFlow);
    assert_eq!(error_kind("fn f() { break; }"), ErrorKind::ControlFlow);
    assert!(compile("while true { break; }").is_ok());
    assert!(compile("for (let i = 0; i < 3; i++) { if i == 1 { continue; } }").is_ok());
}

#[test]
fn test_declaration_then_reassignment() {
    let output = compile("let x: int = 5;\nx = 9;").unwrap();
    assert_eq!(output, "let x_1 = 5;\nx_1 = 9;\n");
}

#[test]
fn test_function_printing_concatenation() {
    let output = compile("fn greet(name: string) {\n    print \"Hello, \" + name;\n}\ngreet(\"world\");").unwrap();

    assert_eq!(
        output,
        "function greet_1(name_2) {\n    console.log((\"Hello, \" + name_2));\n}\ngreet_1(\"world\");\n"
    );
    assert_eq!(output.matches("console.log").count(), 1);
}

#[test]
fn test_counting_loop() {
    let output = compile("for (let i: int = 0; i <= 10; i++) {\n    print i;\n}").unwrap();
    assert_eq!(
        output,
        "for (let i_1 = 0; (i_1 <= 10); i_1++) {\n    console.log(i_1);\n}\n"
    );
}

#[test]
fn test_switch_with_default() {
    let output = compile(
        "let x: int = 1;\n\
         switch (x) {\n\
             case x == 1: print \"one\";\n\
             case x == 2: print \"two\";\n\
             default: print \"many\";\n\
         }",
    )
    .unwrap();

    assert!(output.contains("switch (true) {"));
    assert!(output.contains("case (x_1 === 1):"));
    assert_eq!(output.matches("case ").count(), 2);
    assert_eq!(output.matches("break;").count(), 2);
    assert_eq!(output.matches("default:").count(), 1);

    // Every case ends in an exit before the next label
    let cases = output.split("case ").skip(1).collect::<Vec<_>>();
    for case in cases {
        let body = case.split("default:").next().unwrap_or(case);
        assert!(body.trim_end().ends_with("break;"), "{}", body);
    }
}

#[test]
fn test_empty_collections_fix_element_type() {
    assert!(compile("let a = []; let s = {};").is_ok());
    assert_eq!(error_kind("let a = []; a = [1];"), ErrorKind::Type);
    assert_eq!(error_kind("let s: set<int> = {};"), ErrorKind::Type);
    assert_eq!(error_kind("let xs: int[] = [];"), ErrorKind::Type);
}

#[test]
fn test_analysis_annotates_every_declaration() {
    let root = root_environment();
    let program = analyze_source(
        "let a = 1; fn f(b: int) -> int { return a + b; } class C { }",
        "test.sc",
        &root,
    )
    .unwrap();

    assert_eq!(program.body.len(), 3);
    let debug = format!("{:?}", program);
    assert!(!debug.contains("id: None"));
    assert!(!debug.contains("ty: None"));
    assert!(!debug.contains("resolution: None"));
}

#[test]
fn test_root_scope_is_shared_between_compiles() {
    let root = root_environment();
    let options = CompileOptions::default();

    let first = compile_source("let a = str(1);", "a.sc", &root, &options).unwrap();
    let second = compile_source("let a = str(2);", "b.sc", &root, &options).unwrap();

    assert_eq!(first, "let a_1 = String(1);\n");
    assert_eq!(second, "let a_1 = String(2);\n");
}

#[test]
fn test_full_program() {
    let source = r#"
// Sum the even numbers below a bound
const limit: int = 10;
let total = 0;

fn is_even(n: int) -> bool {
    return n % 2 == 0;
}

for (let i = 0; i < limit; i++) {
    if is_even(i) {
        total = total + i;
    }
}

class Counter(start: int) {
    let count: int = 0;
    fn next() -> int {
        return count + 1;
    }
}

let counter: Counter = Counter(total);
async fn fetch() -> string { return "done"; }
async fn main() {
    let result = await fetch();
    print result + " " + str(counter.next());
}
"#;

    let expected = "\
const limit_1 = 10;
let total_2 = 0;
function is_even_3(n_4) {
    return ((n_4 % 2) === 0);
}
for (let i_5 = 0; (i_5 < limit_1); i_5++) {
    if (is_even_3(i_5)) {
        total_2 = (total_2 + i_5);
    }
}
let count_8 = 0;
function next_9() {
    return (count_8 + 1);
}
function Counter_6(start_7) {
    this.count_8 = count_8;
}
Counter_6.prototype.next_9 = next_9;
let counter_10 = new Counter_6(total_2);
async function fetch_11() {
    return \"done\";
}
async function main_12() {
    let result_13 = (await fetch_11());
    console.log(((result_13 + \" \") + String(counter_10.next_9())));
}
";

    assert_eq!(compile(source).unwrap(), expected);
}

#[test]
fn test_syntax_errors_carry_positions() {
    let source = "let a = 1;\nlet b = @;";
    let err = compile(source).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Syntax);
    assert_eq!(err.get_error_name(), "UnrecognisedToken");

    let rendered = format_error(&err, source);
    assert!(rendered.starts_with("Error: UnrecognisedToken"));
    assert!(rendered.contains("-> test.sc"));
    assert!(rendered.contains("2 | let b = @;"));
}

#[test]
fn test_semantic_errors_render_header_only() {
    let source = "print missing;";
    let err = compile(source).unwrap_err();

    assert_eq!(
        format_error(&err, source),
        "Error: UndeclaredIdentifier (`missing` is not declared)\n"
    );
}

#[test]
fn test_unsupported_target() {
    let root = root_environment();
    let options = CompileOptions {
        target: Target::Lua,
        ..CompileOptions::default()
    };

    let err = compile_source("let a = 1;", "a.sc", &root, &options).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
}
