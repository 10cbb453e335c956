use std::process::Command;

#[test]
fn sim_binary_smoke() {
    let output = Command::new(env!("CARGO_BIN_EXE_sim"))
        .arg("42")
        .output()
        .expect("failed to run sim binary");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("non utf8 output");
    let v: serde_json::Value = serde_json::from_str(stdout.trim()).expect("invalid json");
    assert_eq!(v["ended"], true);
    assert_eq!(v["hits"], 17);
    assert!(v["shots"].as_u64().unwrap() >= 17);
}

#[test]
fn sim_binary_is_reproducible() {
    let run = || {
        let output = Command::new(env!("CARGO_BIN_EXE_sim"))
            .arg("7")
            .output()
            .expect("failed to run sim binary");
        String::from_utf8(output.stdout).expect("non utf8 output")
    };
    assert_eq!(run(), run());
}
