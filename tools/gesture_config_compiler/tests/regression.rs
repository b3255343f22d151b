use std::{fs, path::PathBuf};

use gesture_config_compiler::{
    generate_from_path, generate_from_str, parse_gesture_file, render_generated_config,
    validate_config, ConfigCompilerError, KinematicsSpec, RegionSpec, RepeatSpec,
};

fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("missing tools dir")
        .parent()
        .expect("missing repo root")
        .to_path_buf()
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn snapshot(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("snapshots")
        .join(name)
}

#[test]
fn default_config_matches_snapshot() {
    let config = repo_root().join("config/gestures.toml");
    let actual = generate_from_path(&config).expect("default config should compile");
    let expected = fs::read_to_string(snapshot("default_generated.rs"))
        .expect("missing default snapshot file");

    assert_eq!(
        actual, expected,
        "generated output changed; if intentional, update tools/gesture_config_compiler/tests/snapshots/default_generated.rs"
    );
}

#[test]
fn generation_is_deterministic_for_same_input() {
    let config = fixture("valid_default.toml");
    let first = generate_from_path(&config).expect("first generation failed");
    let second = generate_from_path(&config).expect("second generation failed");
    assert_eq!(first, second);

    let source = fs::read_to_string(&config).expect("fixture readable");
    assert_eq!(generate_from_str(&source).expect("str generation failed"), first);
}

#[test]
fn centered_region_and_infinite_repeat_render() {
    let path = fixture("valid_centered_infinite.toml");
    let gestures = parse_gesture_file(&path).expect("fixture should parse");
    assert_eq!(
        gestures.swipe.region,
        RegionSpec::Centered {
            x: 120,
            y: 120,
            half_width: 100,
            half_height: 90,
        }
    );
    assert_eq!(gestures.animation.repeat, RepeatSpec::Infinite);
    assert_eq!(gestures.bindings.up.kinematics, KinematicsSpec::Item);
    validate_config(&gestures).expect("fixture should validate");

    let rendered = render_generated_config(&gestures);
    for needle in [
        "region: Region::centered(Point::new(120, 120), 100, 90),",
        "repeat: Repeat::Infinite,",
        "left: Binding::new(Kinematics::Rotate, -3600),",
    ] {
        assert!(
            rendered.contains(needle),
            "rendered output missing `{needle}`"
        );
    }
}

#[test]
fn semantic_validation_rejects_unusable_values() {
    let cases = [
        ("invalid/min_length_zero.toml", "swipe.min_length must be > 0"),
        (
            "invalid/confirm_reads_zero.toml",
            "swipe.release_confirm_reads must be >= 1",
        ),
        (
            "invalid/tap_outside_panel.toml",
            "tap.region must lie inside the panel",
        ),
        (
            "invalid/empty_swipe_region.toml",
            "swipe.region must not be empty",
        ),
        (
            "invalid/zero_duration.toml",
            "animation.duration_ms must be > 0",
        ),
        (
            "invalid/zero_poll_interval.toml",
            "polling intervals must be > 0",
        ),
    ];

    for (fixture_name, expected_msg) in cases {
        let path = fixture(fixture_name);
        let err = generate_from_path(&path).expect_err("fixture should fail validation");
        match err {
            ConfigCompilerError::Validation(msg) => {
                assert!(
                    msg.contains(expected_msg),
                    "expected validation message containing `{expected_msg}`, got `{msg}`"
                );
            }
            other => panic!("expected validation error, got {other}"),
        }
    }
}

#[test]
fn parse_errors_are_reported_for_schema_mismatches() {
    let cases = [
        ("invalid/missing_down_binding.toml", "down"),
        ("invalid/unknown_kinematics.toml", "spin"),
    ];

    for (fixture_name, needle) in cases {
        let err = generate_from_path(&fixture(fixture_name)).expect_err("fixture should fail parsing");
        match err {
            ConfigCompilerError::Parse(msg) => {
                assert!(
                    msg.contains(needle),
                    "expected parse error mentioning {needle}, got `{msg}`"
                );
            }
            other => panic!("expected parse error, got {other}"),
        }
    }
}

#[test]
fn missing_file_is_an_io_error() {
    let err = generate_from_path(&fixture("does_not_exist.toml")).expect_err("file is absent");
    assert!(matches!(err, ConfigCompilerError::Io(_)), "got {err}");
}
