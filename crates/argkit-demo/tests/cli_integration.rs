use std::ffi::OsStr;
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn make_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock is before UNIX_EPOCH")
        .as_nanos();
    let pid = std::process::id();
    let dir = std::env::temp_dir().join(format!("argkit-integ-{prefix}-{pid}-{nanos}"));
    fs::create_dir_all(&dir).expect("failed to create temp dir");
    dir
}

fn demo<S: AsRef<OsStr>>(args: &[S]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_argkit-demo"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run argkit-demo")
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

#[test]
fn help_works() {
    let out = demo(&["--help"]);
    assert!(
        out.status.success(),
        "argkit-demo --help failed:\nstatus: {}\nstderr:\n{}",
        out.status,
        stderr(&out),
    );
    let text = stdout(&out);
    assert!(
        text.starts_with("Usage: argkit-demo [Options] INPUT OUTPUT\n"),
        "unexpected help output:\n{text}"
    );
    assert!(text.contains("Positional arguments:"));
    assert!(text.contains("Options:"));
    assert!(text.contains("-f, --file <file>"));
    assert!(text.contains("-L, --longer2"));
    for line in text.lines() {
        assert!(line.chars().count() <= 80, "line too long: {line:?}");
    }
}

#[test]
fn version_prints_name_and_version() {
    let out = demo(&["-v"]);
    assert!(out.status.success(), "stderr:\n{}", stderr(&out));
    assert_eq!(
        stdout(&out),
        format!("argkit-demo {}\n", env!("CARGO_PKG_VERSION"))
    );
}

#[test]
fn unknown_option_fails_with_message_and_help() {
    let out = demo(&["in.txt", "--bogus"]);
    assert_eq!(out.status.code(), Some(1), "stderr:\n{}", stderr(&out));
    let err = stderr(&out);
    assert!(
        err.contains("Unknown option(s): [--bogus]"),
        "unexpected stderr:\n{err}"
    );
    assert!(stdout(&out).starts_with("Usage: argkit-demo"));
}

#[test]
fn parsed_values_are_reported() {
    let out = demo(&["in.txt", "-f", "data.bin", "out.txt", "--longer", "spare"]);
    assert!(out.status.success(), "stderr:\n{}", stderr(&out));
    assert_eq!(
        stdout(&out),
        "input: in.txt\noutput: out.txt\nfile: data.bin\nlonger: true\nextra: spare\n"
    );
}

#[test]
fn width_option_narrows_help() {
    let out = demo(&["--help", "--width", "50"]);
    assert!(out.status.success(), "stderr:\n{}", stderr(&out));
    let text = stdout(&out);
    for line in text.lines() {
        assert!(line.chars().count() <= 50, "line too long: {line:?}");
    }
    let wide = stdout(&demo(&["--help"]));
    assert!(text.lines().count() > wide.lines().count());
}

#[test]
fn invalid_width_is_an_error() {
    let out = demo(&["-w", "wide"]);
    assert!(!out.status.success());
    assert!(
        stderr(&out).contains("invalid value 'wide'"),
        "unexpected stderr:\n{}",
        stderr(&out)
    );
}

#[test]
fn layout_file_changes_indentation() {
    let dir = make_temp_dir("layout");
    let path = dir.join("layout.json");
    fs::write(&path, r#"{ "indentation": "    ", "line-length": 100 }"#)
        .expect("failed to write layout file");

    let out = demo(&["--layout", path.to_str().expect("non-utf8 temp path"), "-h"]);
    assert!(out.status.success(), "stderr:\n{}", stderr(&out));
    let text = stdout(&out);
    assert!(
        text.contains("\n    -f, --file <file>"),
        "unexpected help output:\n{text}"
    );

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_layout_file_is_reported() {
    let out = demo(&["--layout", "/nonexistent/argkit/layout.json"]);
    assert!(!out.status.success());
    assert!(
        stderr(&out).contains("failed to read layout file"),
        "unexpected stderr:\n{}",
        stderr(&out)
    );
}

#[test]
fn help_ignores_bad_width() {
    for width in ["wide", "3"] {
        let out = demo(&["-h", "-w", width]);
        assert!(
            out.status.success(),
            "argkit-demo -h -w {width} failed:\nstderr:\n{}",
            stderr(&out)
        );
        let text = stdout(&out);
        assert!(text.starts_with("Usage: argkit-demo"), "unexpected help output:\n{text}");
        assert!(stderr(&out).contains("using the default help layout"));
    }
}

#[cfg(unix)]
#[test]
fn non_utf8_argument_is_replaced_not_fatal() {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;

    let input = OsString::from_vec(b"i\xffn".to_vec());
    let out = demo(&[input, OsString::from("out.txt")]);
    assert!(
        out.status.success(),
        "status: {}\nstderr:\n{}",
        out.status,
        stderr(&out)
    );
    assert!(
        stdout(&out).starts_with("input: i\u{FFFD}n\noutput: out.txt\n"),
        "unexpected output:\n{}",
        stdout(&out)
    );
}
