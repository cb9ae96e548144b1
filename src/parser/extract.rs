use regex::Regex;

/// Find the index of the close bracket matching the open bracket at `start`.
///
/// `text[start]` must be `{` or `[`. The scan is string-aware: brackets
/// inside JSON string literals (including escaped quotes) do not affect
/// the depth count, so a comment value like `"use {x} here"` cannot throw
/// the match off. Returns `None` when the text ends before depth returns
/// to zero (truncated or malformed payload).
pub fn find_matching_close(text: &str, start: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let open = *bytes.get(start)?;
    let close = match open {
        b'{' => b'}',
        b'[' => b']',
        _ => return None,
    };

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate().skip(start) {
        if escaped {
            escaped = false;
            continue;
        }
        if in_string {
            match b {
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            _ if b == open => depth += 1,
            _ if b == close => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }

    None
}

/// Extract the inner text of the first triple-backtick fenced block,
/// skipping an optional language hint after the opening fence.
/// Anything before or after the fence is discarded.
pub fn extract_fence(text: &str) -> Option<&str> {
    let re = Regex::new(r"```[a-zA-Z0-9]*[ \t]*\r?\n?([\s\S]*?)```").ok()?;
    let cap = re.captures(text)?;
    Some(cap.get(1)?.as_str().trim())
}

/// Index of the first JSON-looking token (`{` or `[`) in the text.
/// No string-awareness here; this is the fallback entry point and assumes
/// the payload begins at the first such character outside any fence.
pub fn locate_json_start(text: &str) -> Option<usize> {
    text.find(|c| c == '{' || c == '[')
}

/// First bracket-delimited substring of the text, inclusive of both
/// brackets, or `None` if no candidate start or no matching close exists.
pub fn extract_first_json_object(text: &str) -> Option<&str> {
    let start = locate_json_start(text)?;
    let end = find_matching_close(text, start)?;
    Some(&text[start..=end])
}
