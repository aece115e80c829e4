use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

fn main() {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let defaults = manifest_dir.join("sdkconfig.defaults");

    println!("cargo:rerun-if-changed=sdkconfig.defaults");
    println!("cargo:rerun-if-env-changed=ESP_IDF_SDKCONFIG_DEFAULTS");

    if env::var("ESP_IDF_SDKCONFIG_DEFAULTS").is_err() {
        eprintln!("WARNING: ESP_IDF_SDKCONFIG_DEFAULTS not set, PSRAM and stack settings will be ignored.");
        eprintln!("Build from crates/panel-firmware so .cargo/config.toml applies.");
    }

    // esp-idf-sys only reads sdkconfig.defaults when it has no sdkconfig yet
    if let Some(defaults_time) = modified(&defaults) {
        for build_dir in esp_idf_sys_build_dirs(&manifest_dir.join("../../target")) {
            let sdkconfig = build_dir.join("out/esp-idf/sdkconfig");
            if modified(&sdkconfig).is_some_and(|t| defaults_time > t) {
                eprintln!("sdkconfig.defaults is newer than {}, regenerating", sdkconfig.display());
                let _ = fs::remove_file(&sdkconfig);
                let _ = fs::remove_dir_all(build_dir.join("out/esp-idf/sdkconfig.d"));
            }
        }
    }

    embuild::espidf::sysenv::output();
}

fn modified(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}

/// `target/<triple>/<profile>/build/esp-idf-sys-*` directories
fn esp_idf_sys_build_dirs(target_dir: &Path) -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    for profile in read_dirs(target_dir).into_iter().flat_map(|d| read_dirs(&d)) {
        for build in read_dirs(&profile.join("build")) {
            let is_sys = build
                .file_name()
                .is_some_and(|n| n.to_string_lossy().starts_with("esp-idf-sys"));
            if is_sys {
                dirs.push(build);
            }
        }
    }
    dirs
}

fn read_dirs(path: &Path) -> Vec<PathBuf> {
    fs::read_dir(path)
        .map(|entries| {
            entries
                .flatten()
                .map(|e| e.path())
                .filter(|p| p.is_dir())
                .collect()
        })
        .unwrap_or_default()
}
