use std::fs;
use std::process::Command;

fn salary_bin() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_salary"));
    command.env_remove("SALARY_RATES").env("RUST_LOG", "warn");
    command
}

#[test]
fn writes_normalized_salary_csv() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("dump.csv");
    let output = dir.path().join("out.csv");
    fs::write(
        &input,
        "id,salary\n\
         1,\"{'from': 1000, 'currency': 'RUB', 'gross': False}\"\n\
         2,\n\
         3,\"{'from': 100, 'to': 300, 'gross': False}\"\n",
    )
    .unwrap();

    let status = salary_bin()
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .status()
        .unwrap();

    assert!(status.success());
    let written = fs::read_to_string(&output).unwrap();
    assert_eq!(written, "index,salary\n0,1000.0\n2,200.0\n");
}

#[test]
fn applies_rates_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("dump.csv");
    let rates = dir.path().join("rates.toml");
    let output = dir.path().join("out.csv");
    fs::write(
        &input,
        "salary\n\"{'from': 10, 'currency': 'USD', 'gross': False}\"\n",
    )
    .unwrap();
    fs::write(&rates, "[rates]\nUSD = 90.0\n").unwrap();

    let status = salary_bin()
        .args(["--input", input.to_str().unwrap()])
        .args(["--output", output.to_str().unwrap()])
        .args(["--rates", rates.to_str().unwrap()])
        .status()
        .unwrap();

    assert!(status.success());
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "index,salary\n0,900.0\n"
    );
}

#[test]
fn malformed_record_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("dump.csv");
    let output = dir.path().join("out.csv");
    fs::write(&input, "salary\n\"{'from': 10}\"\n\"__import__('os')\"\n").unwrap();

    let result = salary_bin()
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .output()
        .unwrap();

    assert!(!result.status.success());
    assert!(!output.exists());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("Row 1"), "stderr was: {stderr}");
}

#[test]
fn input_is_required() {
    let result = salary_bin().output().unwrap();
    assert!(!result.status.success());
}
