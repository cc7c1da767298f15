//! Drives the sips/iconutil backend against stand-in shell scripts.
#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;

use icnsgen_lib::builder::{BuildOptions, IconBuilder};
use icnsgen_lib::error::{BuildError, ToolError};
use icnsgen_lib::toolchain::SystemTools;

/// Fake `sips -z N N <in> --out <out>`: logs N, copies the input, and fails
/// when N equals `$FAIL_AT` if the script was written with one.
fn fake_sips(dir: &Path, fail_at: Option<u32>) -> PathBuf {
    let log = dir.join("sips.log");
    let fail = fail_at
        .map(|n| format!("if [ \"$2\" = \"{n}\" ]; then echo \"Error: cannot render $2\" >&2; exit 13; fi\n"))
        .unwrap_or_default();
    let script = format!(
        "#!/bin/sh\necho \"$2\" >> \"{}\"\n{}cp \"$4\" \"$6\"\n",
        log.display(),
        fail
    );
    write_script(&dir.join("sips"), &script)
}

/// Fake `iconutil -c icns <dir> -o <out>`: concatenates the iconset.
fn fake_iconutil(dir: &Path, fail: bool) -> PathBuf {
    let script = if fail {
        "#!/bin/sh\necho \"invalid iconset\" >&2\nexit 1\n".to_string()
    } else {
        "#!/bin/sh\ncat \"$3\"/*.png > \"$5\"\n".to_string()
    };
    write_script(&dir.join("iconutil"), &script)
}

fn write_script(path: &Path, body: &str) -> PathBuf {
    fs::write(path, body).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
    path.to_path_buf()
}

fn scaled_sizes(dir: &Path) -> Vec<u32> {
    fs::read_to_string(dir.join("sips.log"))
        .unwrap_or_default()
        .lines()
        .map(|l| l.parse().unwrap())
        .collect()
}

struct Fixture {
    tmp: tempfile::TempDir,
    input: PathBuf,
    output: PathBuf,
    options: BuildOptions,
}

fn fixture() -> Fixture {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("logo.png");
    fs::write(&input, b"pretend png").unwrap();
    let output = tmp.path().join("Resources").join("AppIcon.icns");
    let options = BuildOptions {
        iconset_dir: tmp.path().join("VeloxClip.iconset"),
        ..BuildOptions::quiet()
    };
    Fixture {
        tmp,
        input,
        output,
        options,
    }
}

#[test]
fn system_backend_success() {
    let f = fixture();
    let tools = SystemTools::new(
        fake_sips(f.tmp.path(), None).to_string_lossy(),
        fake_iconutil(f.tmp.path(), false).to_string_lossy(),
    );

    IconBuilder::new(tools, f.options.clone())
        .build(&f.input, &f.output)
        .expect("build");

    assert_eq!(
        scaled_sizes(f.tmp.path()),
        vec![16, 32, 32, 64, 128, 256, 256, 512, 512, 1024]
    );
    assert!(fs::metadata(&f.output).unwrap().len() > 0);
    assert!(!f.options.iconset_dir.exists());
}

#[test]
fn system_backend_rendition_failure_is_fail_fast() {
    let f = fixture();
    let tools = SystemTools::new(
        fake_sips(f.tmp.path(), Some(64)).to_string_lossy(),
        fake_iconutil(f.tmp.path(), false).to_string_lossy(),
    );

    let err = IconBuilder::new(tools, f.options.clone())
        .build(&f.input, &f.output)
        .unwrap_err();

    match &err {
        BuildError::Rendition {
            file,
            source: ToolError::Failed { diagnostic, .. },
        } => {
            assert_eq!(file, "icon_32x32@2x.png");
            assert_eq!(diagnostic, "Error: cannot render 64");
        }
        other => panic!("unexpected error: {}", other),
    }
    assert_eq!(scaled_sizes(f.tmp.path()), vec![16, 32, 32, 64]);
    assert!(!f.options.iconset_dir.exists());
    assert!(!f.output.exists());
}

#[test]
fn system_backend_compile_failure_cleans_up() {
    let f = fixture();
    let tools = SystemTools::new(
        fake_sips(f.tmp.path(), None).to_string_lossy(),
        fake_iconutil(f.tmp.path(), true).to_string_lossy(),
    );

    let err = IconBuilder::new(tools, f.options.clone())
        .build(&f.input, &f.output)
        .unwrap_err();

    assert!(matches!(err, BuildError::Compile { .. }));
    assert!(err.to_string().contains("invalid iconset"));
    assert!(!f.options.iconset_dir.exists());
}

#[test]
fn system_backend_cli_exit_codes() {
    let f = fixture();
    let sips = fake_sips(f.tmp.path(), None);
    let ok_iconutil = fake_iconutil(f.tmp.path(), false);

    let status = Command::new(env!("CARGO_BIN_EXE_icnsgen"))
        .current_dir(f.tmp.path())
        .arg("--backend")
        .arg("system")
        .arg("--sips")
        .arg(&sips)
        .arg("--iconutil")
        .arg(&ok_iconutil)
        .arg("logo.png")
        .status()
        .unwrap();
    assert_eq!(status.code(), Some(0));
    assert!(f.tmp.path().join("Resources/AppIcon.icns").is_file());
    assert!(!f.tmp.path().join("VeloxClip.iconset").exists());

    let bad_iconutil = fake_iconutil(f.tmp.path(), true);
    let status = Command::new(env!("CARGO_BIN_EXE_icnsgen"))
        .current_dir(f.tmp.path())
        .env("ICNSGEN_BACKEND", "system")
        .env("ICNSGEN_SIPS", &sips)
        .env("ICNSGEN_ICONUTIL", &bad_iconutil)
        .arg("logo.png")
        .status()
        .unwrap();
    assert_eq!(status.code(), Some(1));
    assert!(!f.tmp.path().join("VeloxClip.iconset").exists());
}
