pub fn truncate_with_ellipsis(input: &str, max_chars: usize) -> String {
    if max_chars == 0 {
        return String::new();
    }

    let mut chars = input.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_none() {
        return head;
    }
    if max_chars == 1 {
        return ".".to_string();
    }

    let mut out: String = head.chars().take(max_chars - 1).collect();
    out.push('…');
    out
}

/// Truncates or right-pads `input` to exactly `width` characters.
pub fn fit_column(input: &str, width: usize) -> String {
    let cell = truncate_with_ellipsis(input, width);
    let pad = width.saturating_sub(cell.chars().count());
    format!("{cell}{}", " ".repeat(pad))
}
