//! Operator-facing status lines.
//!
//! These go to stdout for whoever runs the loader by hand. Structured logs go
//! through `tracing` to stderr; the two are independent.

/// Print a `✓` line.
pub fn success(message: impl AsRef<str>) {
    println!("✓ {}", message.as_ref());
}

/// Print a `⚠` line.
pub fn warning(message: impl AsRef<str>) {
    println!("⚠ {}", message.as_ref());
}

/// Print a `✗` line.
pub fn failure(message: impl AsRef<str>) {
    println!("✗ {}", message.as_ref());
}

/// Print an indented detail line under the previous status line.
pub fn detail(message: impl AsRef<str>) {
    println!("  {}", message.as_ref());
}

/// Print the start banner.
pub fn started(message: impl AsRef<str>) {
    println!("🚀 {}", message.as_ref());
}

/// Print a connection line.
pub fn connecting(message: impl AsRef<str>) {
    println!("📡 {}", message.as_ref());
}

/// Print the completion banner.
pub fn finished(message: impl AsRef<str>) {
    println!("🎉 {}", message.as_ref());
}
