//! Host delimiter restoration.
//!
//! GitHub Actions expressions use the same `{{ }}` delimiters as our template
//! engine. The workflow template spells host expressions with the placeholder
//! pair `¿¿ … ??` instead; once rendering is done, this pass turns the
//! placeholders back into the host's own delimiters.

/// Placeholder for the host's opening delimiter.
pub const HOST_OPEN_PLACEHOLDER: &str = "¿¿";

/// Placeholder for the host's closing delimiter.
pub const HOST_CLOSE_PLACEHOLDER: &str = "??";

/// Host opening delimiter.
pub const HOST_OPEN: &str = "{{";

/// Host closing delimiter.
pub const HOST_CLOSE: &str = "}}";

/// Replace every placeholder pair with the host delimiters.
pub fn restore_host_delimiters(rendered: &str) -> String {
    rendered
        .replace(HOST_OPEN_PLACEHOLDER, HOST_OPEN)
        .replace(HOST_CLOSE_PLACEHOLDER, HOST_CLOSE)
}
