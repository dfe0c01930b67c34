use regex::Regex;
use std::process::Command;

fn tune_coeffs(seed: &str) -> String {
    let output = Command::new(env!("CARGO_BIN_EXE_annealforge"))
        .args([
            "tune",
            "--seed",
            seed,
            "--tuner-cooling-steps",
            "3",
            "--tuner-steps-per-temperature",
            "3",
        ])
        .output()
        .expect("Failed to execute annealforge");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        output.status.success(),
        "tune failed:\n{}{}",
        stdout,
        String::from_utf8_lossy(&output.stderr)
    );

    let re = Regex::new(r"Coeffs: (\[[^\]]*\])").unwrap();
    re.captures(&stdout)
        .map(|c| c[1].to_string())
        .unwrap_or_else(|| panic!("no coefficients in output:\n{stdout}"))
}

#[test]
fn test_tune_is_reproducible_for_a_seed() {
    let first = tune_coeffs("42");
    let second = tune_coeffs("42");
    assert_eq!(first, second);

    let count = first.trim_matches(['[', ']']).split(", ").count();
    assert_eq!(count, 4);
}
