//! Expression splitting and per-segment positional metadata.

/// Splits a raw expression into segment tokens on `separator`.
///
/// The split is literal; escaping only exists inside predicate-call argument
/// lists and is handled by the call parser. An empty expression yields an
/// empty sequence, which chain building rejects.
pub fn split_expression(expression: &str, separator: char) -> Vec<String> {
    if expression.is_empty() {
        return Vec::new();
    }
    expression
        .split(separator)
        .map(str::to_string)
        .collect::<Vec<_>>()
}

/// One segment of an expression, with its position in the chain.
///
/// Strategy factories receive this instead of the bare text so positional
/// special cases (the drive-root literal in the first segment) are decided at
/// construction rather than patched in afterwards.
#[derive(Debug, Clone, Copy)]
pub struct SegmentToken<'a> {
    pub text: &'a str,
    pub index: usize,
    pub is_first: bool,
}

impl<'a> SegmentToken<'a> {
    pub fn new(text: &'a str, index: usize) -> Self {
        Self {
            text,
            index,
            is_first: index == 0,
        }
    }
}
