use anyhow::{Context, Result};
use url::Url;

use super::EngineProfile;

const SEARCH_URL: &str = "https://duckduckgo.com/";

pub(super) const PROFILE: EngineProfile = EngineProfile {
    name: "DuckDuckGo",
    search_url,
    // DuckDuckGo renders results client-side; older layouts use <article>
    ready_selectors: &["[data-testid=\"result\"]", "article"],
    scrape_script: SCRAPE_SCRIPT,
    resolve_href: super::absolute_only,
};

fn search_url(query: &str) -> Result<Url> {
    let mut url = Url::parse(SEARCH_URL).context("Failed to parse DuckDuckGo base URL")?;
    url.query_pairs_mut()
        .append_pair("q", query)
        .append_pair("ia", "web");
    Ok(url)
}

const SCRAPE_SCRIPT: &str = r#"
    (() => {
        let nodes = document.querySelectorAll('[data-testid="result"]');
        if (nodes.length === 0) nodes = document.querySelectorAll('article');
        return Array.from(nodes).map(el => {
            const link = el.querySelector('h2 a, [data-testid="result-title-a"]');
            const snippet = el.querySelector('[data-result="snippet"]');
            return {
                title: link ? (link.innerText || '').trim() : '',
                url: link ? (link.getAttribute('href') || '') : '',
                snippet: snippet ? (snippet.innerText || '').trim() : ''
            };
        });
    })()
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_url_targets_web_results() {
        let url = search_url("rust").unwrap();
        assert_eq!(url.as_str(), "https://duckduckgo.com/?q=rust&ia=web");
    }
}
