use assert_cmd::Command;
use insta::assert_snapshot;
use serde_json::{Value, json};

struct Run {
    success: bool,
    stdout: String,
    stderr: String,
}

fn ohm<I, S>(args: I) -> Run
where
    I: IntoIterator<Item = S>,
    S: AsRef<std::ffi::OsStr>,
{
    let output = Command::cargo_bin("ohm")
        .unwrap()
        .args(args)
        .env("NO_COLOR", "1")
        .env("CLICOLOR", "0")
        .env_remove("RUST_LOG")
        .output()
        .unwrap();
    Run {
        success: output.status.success(),
        stdout: String::from_utf8(output.stdout).unwrap(),
        stderr: String::from_utf8(output.stderr).unwrap(),
    }
}

fn solve_json(assignments: &[&str]) -> Value {
    let mut args = vec!["solve", "--format", "json"];
    args.extend_from_slice(assignments);
    let run = ohm(args);
    assert!(run.success, "ohm failed: {}", run.stderr);
    serde_json::from_str(&run.stdout).unwrap()
}

#[test]
fn test_solve_voltage_and_current() {
    let run = ohm(["solve", "V=10", "I=2"]);
    assert!(run.success);
    assert_snapshot!(run.stdout, @r"
    Calculation Results:
    Voltage (V): 10V
    Current (I): 2A
    Resistance (Ω): 5Ω
    Power (W): 20W
    ");
}

#[test]
fn test_solve_with_prefixes() {
    let run = ohm(["solve", "R=4k7", "I=1mA", "P="]);
    assert!(run.success, "{}", run.stderr);
    assert_snapshot!(run.stdout, @r"
    Calculation Results:
    Voltage (V): 4.7V
    Current (I): 1mA
    Resistance (Ω): 4.7kΩ
    Power (W): 4.7mW
    ");
}

#[test]
fn test_solve_json() {
    assert_eq!(
        solve_json(&["V=10", "I=2"]),
        json!({"V": 10.0, "I": 2.0, "R": 5.0, "P": 20.0})
    );
    assert_eq!(
        solve_json(&["power=100", "resistance=25"]),
        json!({"V": 50.0, "I": 2.0, "R": 25.0, "P": 100.0})
    );
}

#[test]
fn test_solve_inconsistent() {
    let run = ohm(["solve", "V=10", "I=2", "R=6"]);
    assert!(!run.success);
    assert!(run.stdout.is_empty());
    assert_snapshot!(run.stderr, @"Error: inconsistent values: V is 10 but I × R is 12");
}

#[test]
fn test_solve_errors() {
    let run = ohm(["solve", "V=10", "R=0"]);
    assert!(!run.success);
    assert_snapshot!(run.stderr, @"Error: resistance cannot be zero when deriving current");

    let run = ohm(["solve", "V=-5"]);
    assert!(!run.success);
    assert_snapshot!(run.stderr, @"Error: negative value not allowed: voltage is -5");

    let run = ohm(["solve", "P=50"]);
    assert!(!run.success);
    assert_snapshot!(
        run.stderr,
        @"Error: insufficient data: at least two of V, I, R must be known or derivable"
    );

    let run = ohm(["solve", "V=abc", "I=2"]);
    assert!(!run.success);
    assert_snapshot!(run.stderr, @r"
    Error: Failed to parse voltage 'abc'
      Invalid value format
    ");
}

#[test]
fn test_solve_duplicate_quantity() {
    let run = ohm(["solve", "V=10", "voltage=5"]);
    assert!(!run.success);
    assert_snapshot!(run.stderr, @"Error: V given more than once");
}

#[test]
fn test_tutorial_link() {
    let run = ohm(["tutorial", "--no-open"]);
    assert!(run.success);
    assert_snapshot!(run.stdout, @r"
    Learn Ohm's Law fundamentals
    Watch this explanation by The Organic Chemistry Tutor:
    https://www.youtube.com/watch?v=_rSHqvjDksg
    ");
}
