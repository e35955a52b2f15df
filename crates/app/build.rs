use std::process::Command;

/// Run `git` with `args` and return trimmed stdout if it succeeded.
fn git(args: &[&str]) -> Option<String> {
    let out = Command::new("git").args(args).output().ok()?;
    out.status
        .success()
        .then(|| String::from_utf8_lossy(&out.stdout).trim().to_string())
}

fn main() {
    // Packaged builds without a checkout can pin the hash explicitly.
    println!("cargo:rerun-if-env-changed=WHEREIS_GIT_HASH");
    let hash = match std::env::var("WHEREIS_GIT_HASH") {
        Ok(pinned) if !pinned.trim().is_empty() => pinned.trim().to_string(),
        _ => {
            let short = git(&["rev-parse", "--short", "HEAD"]).unwrap_or_else(|| "unknown".to_string());
            let dirty = git(&["status", "--porcelain"]).is_some_and(|s| !s.is_empty());
            if dirty { format!("{short}-dirty") } else { short }
        }
    };

    println!("cargo:rustc-env=WHEREIS_GIT_HASH={hash}");
    println!("cargo:rerun-if-changed=../../.git/HEAD");
    println!("cargo:rerun-if-changed=../../.git/index");
}
