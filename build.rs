//! Build script: embeds version information at compile time.
use std::process::Command;

fn main() {
    // SPINUP_VERSION from the environment wins (release builds); local builds
    // fall back to git describe.
    if let Ok(version) = std::env::var("SPINUP_VERSION") {
        println!("cargo:rustc-env=SPINUP_VERSION={version}");
    } else if let Ok(output) = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        && output.status.success()
    {
        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if !version.is_empty() {
            println!("cargo:rustc-env=SPINUP_VERSION={version}");
        }
    }

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");
    println!("cargo:rerun-if-changed=conf/tools.toml");
    println!("cargo:rerun-if-env-changed=SPINUP_VERSION");
}
