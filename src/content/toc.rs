use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::content::TocEntry;

lazy_static! {
    static ref H2_REGEX: Regex = Regex::new(r"<h2>(.*?)</h2>").unwrap();
    static ref H3_REGEX: Regex = Regex::new(r"<h3>(.*?)</h3>").unwrap();
    static ref TAG_REGEX: Regex = Regex::new(r"<[^>]*>").unwrap();
    static ref NON_ALNUM_REGEX: Regex = Regex::new(r"[^a-z0-9]+").unwrap();
}

/// URL-fragment identifier derived from the heading text alone. Two headings
/// with the same text get the same identifier.
pub fn anchor_id(text: &str) -> String {
    let text = TAG_REGEX.replace_all(text, "");
    let text = text.to_lowercase();
    let text = NON_ALNUM_REGEX.replace_all(text.trim(), "-");
    text.trim_matches('-').to_string()
}

/// Rewrites `<h2>` and `<h3>` tags to carry an id attribute and collects the
/// outline. Headings are matched within a single line only; a tag spanning
/// multiple lines is left untouched. The h2 pass runs to completion before
/// the h3 pass, so the outline is in pass order rather than document order.
pub fn index_headings(body: &str) -> (String, Vec<TocEntry>) {
    let mut toc: Vec<TocEntry> = Vec::new();

    let body = rewrite_headings(&H2_REGEX, body, 2, &mut toc);
    let body = rewrite_headings(&H3_REGEX, &body, 3, &mut toc);

    (body, toc)
}

fn rewrite_headings(heading_regex: &Regex, body: &str, level: u8, toc: &mut Vec<TocEntry>) -> String {
    let rewritten = heading_regex.replace_all(body, |caps: &Captures| {
        let text = caps.get(1).unwrap().as_str();
        let anchor = anchor_id(text);
        toc.push(TocEntry {
            anchor: anchor.clone(),
            text: text.to_string(),
            level,
        });
        format!(r#"<h{} id="{}">{}</h{}>"#, level, anchor, text, level)
    });

    rewritten.to_string()
}
