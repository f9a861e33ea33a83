//! Version stamp for the arena binary, generated by `build.rs`.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// One-line version banner, e.g. `stick-ranger 0.1.0 (a1b2c3d, 2026-01-31, release)`.
pub fn version_line() -> String {
    format!(
        "stick-ranger {} ({}, {}, {})",
        BUILD_VERSION, BUILD_COMMIT, BUILD_DATE, BUILD_PROFILE
    )
}
