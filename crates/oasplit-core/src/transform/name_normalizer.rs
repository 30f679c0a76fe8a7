use heck::ToSnakeCase;

/// Derive the canonical lower-snake identifier for an arbitrary source name.
///
/// Sanitizes first (non-identifier characters become segment boundaries),
/// then applies snake-casing, which splits between a lowercase letter or
/// digit and a following uppercase letter, and between an uppercase letter
/// and an uppercase-then-lowercase run:
///
/// - `HTTPServer` → `http_server`
/// - `fooBar` → `foo_bar`
/// - `assignment-id` → `assignment_id`
///
/// The function is pure and idempotent: `snake_name(snake_name(x))` equals
/// `snake_name(x)` for all inputs.
pub fn snake_name(name: &str) -> String {
    sanitize_identifier(name).to_snake_case()
}

/// Fallback operation name for operations without an `operationId`. The
/// sanitizer strips path separators and parameter braces, so
/// `("get", "/widgets/{widgetId}")` becomes `get_widgets_widget_id`.
pub fn fallback_operation_name(method: &str, path: &str) -> String {
    snake_name(&format!("{method}_{path}"))
}

/// Uppercase the first character and lowercase the rest, the casing used for
/// synthesized document titles ("widgets" → "Widgets").
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Strip non-identifier characters, turning every run of them into a single
/// `_` boundary between the surrounding alphanumeric runs.
fn sanitize_identifier(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut prev_was_separator = false;

    for ch in name.chars() {
        if ch.is_alphanumeric() {
            if prev_was_separator && !result.is_empty() {
                result.push('_');
            }
            result.push(ch);
            prev_was_separator = false;
        } else {
            prev_was_separator = true;
        }
    }

    if result.is_empty() {
        return "unnamed".to_string();
    }

    result
}
