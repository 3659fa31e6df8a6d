// File: crates/timechart-core/build.rs
// Summary: Links the extra Windows system library Skia's font manager pulls in.

fn main() {
    #[cfg(target_os = "windows")]
    {
        // RegOpenKeyExW and friends, used by Skia's font lookup.
        println!("cargo:rustc-link-lib=advapi32");
    }
}
