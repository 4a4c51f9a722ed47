use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::tempdir;

use famtree_cli::{Args, OutputFormat, run};

fn demos_dir() -> PathBuf {
    // Demos are at workspace root, relative to workspace not the crate
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

/// Collects all snapshot files (.json, .toml) from a directory
fn collect_snapshots(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && matches!(
                        path.extension().and_then(|s| s.to_str()),
                        Some("json" | "toml")
                    )
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

fn args_for(input: &Path, output: &Path, format: OutputFormat) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: output.to_string_lossy().to_string(),
        config: None,
        format,
        active_user: None,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let valid_demos = collect_snapshots(demos_dir());
    assert!(!valid_demos.is_empty(), "No valid demos found in demos/");

    let mut failed_demos = Vec::new();

    for demo_path in &valid_demos {
        let stem = demo_path.file_stem().unwrap().to_string_lossy().to_string();

        for (format, extension) in [(OutputFormat::Svg, "svg"), (OutputFormat::Json, "json")] {
            let output_path = temp_dir.path().join(format!("{stem}.{extension}"));
            let args = args_for(demo_path, &output_path, format);

            match run(&args) {
                Ok(()) => assert!(output_path.exists()),
                Err(e) => failed_demos.push((demo_path.clone(), e)),
            }
        }
    }

    if !failed_demos.is_empty() {
        eprintln!("\nValid demos that failed:");
        for (path, err) in &failed_demos {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} valid demo run(s) failed unexpectedly", failed_demos.len());
    }

    println!("✅ All {} valid demos passed", valid_demos.len());
}

#[test]
fn e2e_smoke_test_error_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let error_demos = collect_snapshots(demos_dir().join("errors"));
    assert!(
        !error_demos.is_empty(),
        "No error demos found in demos/errors/"
    );

    let mut unexpectedly_succeeded = Vec::new();

    for demo_path in &error_demos {
        let output_filename = format!(
            "error_{}.svg",
            demo_path.file_stem().unwrap().to_string_lossy()
        );
        let output_path = temp_dir.path().join(output_filename);
        let args = args_for(demo_path, &output_path, OutputFormat::Svg);

        if run(&args).is_ok() {
            unexpectedly_succeeded.push(demo_path.clone());
        }
    }

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError demos that unexpectedly succeeded:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error demo(s) succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }

    println!("✅ All {} error demos failed as expected", error_demos.len());
}

#[test]
fn e2e_sample_config_and_active_user() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("martin.svg");

    let mut args = args_for(
        &demos_dir().join("martin_family.json"),
        &output_path,
        OutputFormat::Svg,
    );
    args.config = Some(
        demos_dir()
            .join("config")
            .join("compact.toml")
            .to_string_lossy()
            .to_string(),
    );
    args.active_user = Some("u-hugo".to_string());

    run(&args).expect("martin_family.json should render");

    let svg = fs::read_to_string(&output_path).unwrap();
    assert_eq!(svg.matches("class=\"active\"").count(), 1);
}

#[test]
fn e2e_unknown_extension_rejected() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input_path = temp_dir.path().join("family.txt");
    fs::write(&input_path, "{}").unwrap();

    let args = args_for(
        &input_path,
        &temp_dir.path().join("out.svg"),
        OutputFormat::Svg,
    );
    assert!(run(&args).is_err());
}
