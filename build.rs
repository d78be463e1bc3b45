use std::env;

fn main() {
    // Build metadata is handed in by the release pipeline
    let revision = env::var("PUBSUBC_REVISION").unwrap_or_else(|_| "<not set>".to_string());
    let commit = env::var("PUBSUBC_COMMIT_HASH").unwrap_or_else(|_| "<not set>".to_string());
    let target = env::var("TARGET").unwrap_or_else(|_| "unknown".to_string());

    println!("cargo:rustc-env=PUBSUBC_REVISION={}", revision);
    println!("cargo:rustc-env=PUBSUBC_COMMIT_HASH={}", commit);
    println!("cargo:rustc-env=PUBSUBC_TARGET={}", target);

    println!("cargo:rerun-if-env-changed=PUBSUBC_REVISION");
    println!("cargo:rerun-if-env-changed=PUBSUBC_COMMIT_HASH");
}
