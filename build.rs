fn main() {
    let revision = std::process::Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .unwrap_or_default();
    let revision = match revision.trim() {
        "" => "dev",
        rev => rev,
    };
    println!("cargo:rustc-env=ORBITAL_STACK_REVISION={}", revision);
}
