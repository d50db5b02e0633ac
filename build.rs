// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Gida Search contributors

use std::env;

fn main() {
    let version = env::var("CARGO_PKG_VERSION").expect("CARGO_PKG_VERSION not set");
    let mut parts = version.splitn(3, '.');
    let (Some(major), Some(minor), Some(patch)) = (parts.next(), parts.next(), parts.next())
    else {
        panic!("invalid version in Cargo.toml: {version}");
    };

    // A release pipeline can stamp its own patch segment onto the build.
    let patch = env::var("GIDA_PATCH_VERSION").unwrap_or_else(|_| patch.to_string());
    println!("cargo:rustc-env=GIDA_VERSION={major}.{minor}.{patch}");

    println!("cargo:rerun-if-changed=Cargo.toml");
    println!("cargo:rerun-if-env-changed=GIDA_PATCH_VERSION");
}
