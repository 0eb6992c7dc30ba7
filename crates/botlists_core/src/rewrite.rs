use crate::UrlSpan;

/// Outcome of resolving one URL found in a description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub span: UrlSpan,
    /// `None` when the lookup failed; the original text is kept.
    pub resolved: Option<String>,
}

impl Resolution {
    pub fn new(span: UrlSpan, resolved: Option<String>) -> Self {
        Self { span, resolved }
    }
}

/// Replaces every resolved span of `text` with its destination.
///
/// Each replacement is tied to the span it was resolved from, so a failed or
/// missing lookup only leaves its own URL untouched. Spans must be ascending
/// and non-overlapping; any that are not are ignored.
pub fn rewrite_description(text: &str, resolutions: &[Resolution]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for resolution in resolutions {
        let UrlSpan { start, end, .. } = resolution.span;
        let Some(resolved) = resolution.resolved.as_deref() else {
            continue;
        };
        if start < cursor || end > text.len() || start > end {
            continue;
        }
        if !text.is_char_boundary(start) || !text.is_char_boundary(end) {
            continue;
        }
        out.push_str(&text[cursor..start]);
        out.push_str(resolved);
        cursor = end;
    }
    out.push_str(&text[cursor..]);
    out
}
