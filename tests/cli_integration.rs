use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "solarreel-{prefix}-{}-{nanos}",
        std::process::id()
    ));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dirs");
    }
    fs::write(path, content).expect("write test file");
}

/// Run the binary with HOME pointed at `home` so no user config leaks in
fn run_solarreel(args: &[&str], home: &Path) -> (bool, Vec<u8>, Vec<u8>) {
    let bin = std::env::var("CARGO_BIN_EXE_solarreel").unwrap_or_else(|_| {
        let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        path.push("target");
        path.push("debug");
        if cfg!(windows) {
            path.push("solarreel.exe");
        } else {
            path.push("solarreel");
        }
        path.to_string_lossy().into_owned()
    });
    let output = Command::new(bin)
        .args(args)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .current_dir(home)
        .output()
        .expect("run solarreel");
    (output.status.success(), output.stdout, output.stderr)
}

#[test]
fn fetch_dry_run_json_builds_urls_without_separator() {
    let root = unique_temp_dir("fetch-plan");

    let (ok, stdout, stderr) = run_solarreel(
        &["fetch", "--dry-run", "--json", "--dates", "25aug16", "--out-dir", "sun/"],
        &root,
    );
    assert!(ok, "stderr: {}", String::from_utf8_lossy(&stderr));

    let json: Value = serde_json::from_slice(&stdout).expect("json");
    let arr = json.as_array().expect("array output");
    assert_eq!(arr.len(), 2);
    assert_eq!(
        arr[0]["url"].as_str(),
        Some("http://spaceweather.com/images2016/25aug16coronalhole_sdo_blank.jpg")
    );
    assert_eq!(arr[0]["dest"].as_str(), Some("sun/25aug16_coronalhole.jpg"));
    assert_eq!(
        arr[1]["url"].as_str(),
        Some("http://spaceweather.com/images2016/25aug16hmi1898.gif")
    );
    assert_eq!(arr[1]["dest"].as_str(), Some("sun/25aug16_sunspot.jpg"));

    let _ = fs::remove_dir_all(root);
}

#[test]
fn fetch_dry_run_range_expands_days() {
    let root = unique_temp_dir("fetch-range");

    let (ok, stdout, stderr) = run_solarreel(
        &[
            "fetch",
            "--dry-run",
            "-j",
            "--since",
            "2016-08-30",
            "--until",
            "2016-09-01",
        ],
        &root,
    );
    assert!(ok, "stderr: {}", String::from_utf8_lossy(&stderr));

    let json: Value = serde_json::from_slice(&stdout).expect("json");
    let dates: Vec<&str> = json
        .as_array()
        .expect("array output")
        .iter()
        .filter_map(|j| j["date"].as_str())
        .collect();
    assert_eq!(
        dates,
        vec!["30aug16", "30aug16", "31aug16", "31aug16", "01sep16", "01sep16"]
    );

    let _ = fs::remove_dir_all(root);
}

#[test]
fn mismatched_name_lists_fail_before_fetching() {
    let root = unique_temp_dir("fetch-mismatch");
    let config = root.join("solarreel.toml");
    write_file(
        &config,
        r#"
[fetch]
names = ["coronalhole_sdo_blank", "hmi1898"]
out_names = ["coronalhole"]
"#,
    );

    let (ok, stdout, stderr) = run_solarreel(
        &["fetch", "--dry-run", "--config", config.to_str().unwrap()],
        &root,
    );
    assert!(!ok);
    assert!(stdout.is_empty());
    let stderr = String::from_utf8_lossy(&stderr);
    assert!(
        stderr.contains("2 input name(s) vs 1 output name(s)"),
        "stderr: {stderr}"
    );

    let _ = fs::remove_dir_all(root);
}

#[test]
fn invalid_config_file_is_fatal() {
    let root = unique_temp_dir("bad-config");
    let config = root.join("solarreel.toml");
    write_file(&config, "[render\nfps = 1");

    let (ok, _, stderr) = run_solarreel(&["config", "-C", config.to_str().unwrap()], &root);
    assert!(!ok);
    assert!(String::from_utf8_lossy(&stderr).contains("Invalid config"));

    let _ = fs::remove_dir_all(root);
}

#[test]
fn render_frames_dir_writes_one_frame_per_date() {
    let root = unique_temp_dir("render-frames");
    let images = root.join("images");
    fs::create_dir_all(&images).expect("create image dir");
    // Not an image: the coronal hole panel must degrade to a placeholder
    write_file(&images.join("12aug16_coronalhole.jpg"), "not really a jpeg");

    let config = root.join("solarreel.toml");
    write_file(
        &config,
        &format!(
            r#"
[render]
image_dir = '{}/'

[render.movie]
dpi = 20
"#,
            images.display()
        ),
    );
    let frames = root.join("frames");

    let (ok, _, stderr) = run_solarreel(
        &[
            "render",
            "-C",
            config.to_str().unwrap(),
            "--frames-dir",
            frames.to_str().unwrap(),
        ],
        &root,
    );
    let stderr = String::from_utf8_lossy(&stderr);
    assert!(ok, "stderr: {stderr}");
    assert!(stderr.contains("ERROR: Can't load image at"));

    let mut written: Vec<String> = fs::read_dir(&frames)
        .expect("frames dir")
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    written.sort();
    assert_eq!(written.len(), 20);
    assert_eq!(written[0], "frame_0000.png");
    assert_eq!(written[19], "frame_0019.png");

    let _ = fs::remove_dir_all(root);
}

#[test]
fn config_command_prints_effective_toml() {
    let root = unique_temp_dir("config-print");

    let (ok, stdout, stderr) = run_solarreel(&["config"], &root);
    assert!(ok, "stderr: {}", String::from_utf8_lossy(&stderr));

    let text = String::from_utf8_lossy(&stdout);
    assert!(text.contains("base_url = \"http://spaceweather.com/images2016/\""));
    assert!(text.contains("Sunspots"));
    assert!(text.contains("bitrate = 5000"));

    let _ = fs::remove_dir_all(root);
}
