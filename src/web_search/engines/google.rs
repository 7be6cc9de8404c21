use anyhow::{Context, Result};
use url::Url;

use super::EngineProfile;

const SEARCH_URL: &str = "https://www.google.com/search";

pub(super) const PROFILE: EngineProfile = EngineProfile {
    name: "Google",
    search_url,
    ready_selectors: &["#search", "[data-ved]", "h3"],
    scrape_script: SCRAPE_SCRIPT,
    resolve_href,
};

fn search_url(query: &str) -> Result<Url> {
    let mut url = Url::parse(SEARCH_URL).context("Failed to parse Google base URL")?;
    url.query_pairs_mut()
        .append_pair("q", query)
        .append_pair("num", "20");
    Ok(url)
}

/// Result containers carry an `h3` title; the snippet is the first
/// descriptive text block that is neither the title nor a bare URL.
const SCRAPE_SCRIPT: &str = r#"
    (() => {
        const containers = document.querySelectorAll(
            '#search div[data-ved], #search .g, #search [jscontroller], .MjjYud'
        );
        const snippetSelectors = ['[data-snf="nke7rc"]', '.VwiC3b', '.s3v9rd', '.hgKElc', 'span', 'div'];
        const out = [];
        const seen = new Set();
        for (const el of containers) {
            const h3 = el.querySelector('h3');
            if (!h3) continue;
            const title = (h3.innerText || '').trim();
            if (!title) continue;
            const link = h3.closest('a[href]') || el.querySelector('a[href]');
            if (!link) continue;
            const href = link.getAttribute('href') || '';
            if (!href || href.startsWith('#')) continue;
            const key = href + '\u0000' + title;
            if (seen.has(key)) continue;
            seen.add(key);

            let snippet = '';
            outer: for (const sel of snippetSelectors) {
                for (const node of el.querySelectorAll(sel)) {
                    const text = (node.innerText || '').trim();
                    if (text.length > 50 && text !== title && !text.startsWith('http')) {
                        snippet = text;
                        break outer;
                    }
                }
            }
            out.push({ title, url: href, snippet });
        }
        return out;
    })()
"#;

/// Unwrap `/url?q=` redirect links to their target
fn resolve_href(href: &str) -> Option<String> {
    if href.starts_with("/url?") {
        let base = Url::parse("https://www.google.com").ok()?;
        let redirect = base.join(href).ok()?;
        return redirect
            .query_pairs()
            .find(|(k, _)| k == "q")
            .map(|(_, v)| v.into_owned());
    }
    if href.starts_with('/') {
        // Internal Google links (images, maps, "more results")
        return None;
    }
    Some(href.to_string())
}
