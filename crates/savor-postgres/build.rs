#![forbid(unsafe_code)]

/// `embed_migrations!` cannot tell when files under the migration directory
/// change, so the crate is rebuilt whenever that directory is touched.
fn main() {
    println!("cargo:rerun-if-changed=./migrations");
}
