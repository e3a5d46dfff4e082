use kplc::{ErrorKind, KplError, compile, compile_str};

use std::io::Write;

#[test]
fn compile_reads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "(* sum the first ten numbers *)
PROGRAM Sum;
VAR i : INTEGER; s : INTEGER;
BEGIN
  s := 0;
  FOR i := 1 TO 10 DO s := s + i;
  CALL WRITEI(s);
  CALL WRITELN
END."
    )
    .unwrap();

    let symtab = compile(file.path()).unwrap();
    assert!(symtab.dump().starts_with("Program Sum\n"));
}

#[test]
fn compile_reports_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.kpl");
    assert!(matches!(compile(&missing), Err(KplError::Io(_))));
}

#[test]
fn compile_reports_compile_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "program P; begin x := 1 end.").unwrap();
    match compile(file.path()) {
        Err(KplError::Compile(err)) => {
            assert_eq!(err.kind, ErrorKind::UndeclaredIdentifier("x".to_string()))
        }
        other => panic!("expected a compile error, got {:?}", other.map(|_| ())),
    }
}

fn render(source: &str) -> String {
    let err = compile_str(source).unwrap_err();
    let mut rendered = Vec::new();
    err.report("test.kpl")
        .write(("test.kpl".to_string(), ariadne::Source::from(source)), &mut rendered)
        .unwrap();
    String::from_utf8_lossy(&rendered).into_owned()
}

#[test]
fn diagnostics_render() {
    let rendered = render("program P; begin x := 1 end.");
    assert!(rendered.contains("undeclared identifier"));
}

#[test]
fn diagnostics_render_after_multibyte_text() {
    let rendered = render("program P; var s: string; begin s := \"\u{e9}\u{e9}\u{e9}\"; y := 1 end.");
    assert!(rendered.contains("undeclared identifier `y` at line 1, column 45"));
}
