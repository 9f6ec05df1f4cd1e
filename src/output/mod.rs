pub mod host;
pub mod ping;
pub mod progress;

/// Convert a string into a tree label.
fn tree_label<S: Into<String>>(s: S) -> String {
    s.into()
}
