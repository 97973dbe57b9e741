use std::process::Command;

fn demo() -> Command {
    Command::new(env!("CARGO_BIN_EXE_argot-demo"))
}

#[test]
fn sums_positional_integers() {
    let out = demo()
        .args(["1", "2", "3"])
        .output()
        .expect("failed to run argot-demo");
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(String::from_utf8_lossy(&out.stdout), "result: 6\n");
}

#[test]
fn product_scale_and_label_options() {
    let out = demo()
        .args(["--product", "-s3", "--label=total", "2", "4"])
        .output()
        .expect("failed to run argot-demo");
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(String::from_utf8_lossy(&out.stdout), "total: 24\n");
}

#[test]
fn double_dash_passes_negative_numbers() {
    let out = demo()
        .args(["--", "-5", "3"])
        .output()
        .expect("failed to run argot-demo");
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(String::from_utf8_lossy(&out.stdout), "result: -2\n");
}

#[test]
fn help_prints_declarations_and_succeeds() {
    let out = demo()
        .arg("--help")
        .output()
        .expect("failed to run argot-demo --help");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("argot-demo"), "unexpected help output:\n{stdout}");
    assert!(stdout.contains("--product"), "unexpected help output:\n{stdout}");
    assert!(stdout.contains("--scale=<int>"), "unexpected help output:\n{stdout}");
}

#[test]
fn no_values_fails_with_nonzero_exit() {
    let out = demo().output().expect("failed to run argot-demo");
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("needs at least"), "unexpected stderr:\n{stderr}");
}
