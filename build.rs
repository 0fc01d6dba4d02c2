// Author: Eshan Roy
// SPDX-License-Identifier: MIT

use vergen::EmitBuilder;

// Emits VERGEN_GIT_SHA and VERGEN_GIT_COMMIT_DATE for `formcheck version`.
// Outside a git checkout vergen falls back to placeholder values.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    EmitBuilder::builder()
        .git_sha(true)
        .git_commit_date()
        .emit()?;
    println!("cargo:rerun-if-changed=build.rs");
    Ok(())
}
