const META_KEYS: [&str; 4] = ["title:", "date:", "description:", "collection:"];

/// Example of an annotated post file:
///
/// <!-- title: My Post Title -->
/// <!-- date: 2024-01-15 -->
/// <!-- description: One-line summary -->
/// <!-- collection: my-collection -->
/// <p>Body HTML...</p>
///
/// The metadata comments are optional and order-independent, but each one
/// must occupy a full line of its own.
pub fn extract_meta(lines: &[&str], key: &str) -> String {
    let prefix = format!("<!-- {}: ", key);
    for &line in lines {
        if let Some(rest) = line.strip_prefix(prefix.as_str()) {
            let value = rest.strip_suffix(" -->").unwrap_or(rest);
            return value.trim().to_string();
        }
    }
    String::new()
}

/// Removes the metadata comment lines and returns everything else, in order.
/// This is a line filter, not a parser: any comment line containing one of
/// the reserved key substrings is dropped, wherever it appears in the file.
pub fn extract_body(lines: &[&str]) -> String {
    let mut content_lines: Vec<&str> = Vec::new();
    for &line in lines {
        if line.starts_with("<!--") && META_KEYS.iter().any(|key| line.contains(key)) {
            continue;
        }
        content_lines.push(line);
    }
    content_lines.join("\n")
}
