use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-env-changed=ULTIMATE_MRZ_SDK_DIR");
    println!("cargo:rerun-if-env-changed=ULTIMATE_MRZ_SDK_LIB_DIR");

    // The default build only carries the dry-run engine
    if env::var_os("CARGO_FEATURE_NATIVE").is_none() {
        return;
    }

    let sdk_dir = PathBuf::from(
        env::var("ULTIMATE_MRZ_SDK_DIR")
            .expect("ULTIMATE_MRZ_SDK_DIR must point at the ultimateMRZ SDK checkout"),
    );

    // Binaries live under binaries/<os>/<arch> in the SDK layout
    let lib_dir = match env::var("ULTIMATE_MRZ_SDK_LIB_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => {
            let os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_else(|_| "linux".to_string());
            let arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_else(|_| "x86_64".to_string());
            sdk_dir.join("binaries").join(os).join(arch)
        }
    };

    cc::Build::new()
        .cpp(true)
        .file("shim/mrzkit_shim.cxx")
        .include("shim")
        .include(sdk_dir.join("c++"))
        .warnings(false)
        .compile("mrzkit_shim");

    println!("cargo:rustc-link-search=native={}", lib_dir.display());
    println!("cargo:rustc-link-lib=dylib=ultimate_mrz-sdk");

    println!("cargo:rerun-if-changed=shim/mrzkit_shim.cxx");
    println!("cargo:rerun-if-changed=shim/mrzkit_shim.h");
}
