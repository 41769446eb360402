use scraper::Html;

/// Renders an HTML fragment as normalized plain text.
///
/// Collects the visible text of the fragment, drops lines that are blank after
/// trimming, and strips trailing whitespace from every remaining line. Line
/// order is preserved and the result carries no leading or trailing blank
/// lines. Pure function; safe to apply to its own output.
pub fn extract_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let raw: String = fragment.root_element().text().collect();

    raw.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join("\n")
}
