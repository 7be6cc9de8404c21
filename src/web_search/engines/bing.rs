use anyhow::{Context, Result};
use url::Url;

use super::EngineProfile;

const SEARCH_URL: &str = "https://www.bing.com/search";

pub(super) const PROFILE: EngineProfile = EngineProfile {
    name: "Bing",
    search_url,
    ready_selectors: &[".b_algo"],
    scrape_script: SCRAPE_SCRIPT,
    resolve_href: super::absolute_only,
};

fn search_url(query: &str) -> Result<Url> {
    let mut url = Url::parse(SEARCH_URL).context("Failed to parse Bing base URL")?;
    url.query_pairs_mut()
        .append_pair("q", query)
        .append_pair("count", "20");
    Ok(url)
}

const SCRAPE_SCRIPT: &str = r#"
    (() => Array.from(document.querySelectorAll('.b_algo')).map(el => {
        const link = el.querySelector('h2 a');
        const snippet = el.querySelector('.b_caption p, .b_descript');
        return {
            title: link ? (link.innerText || '').trim() : '',
            url: link ? (link.getAttribute('href') || '') : '',
            snippet: snippet ? (snippet.innerText || '').trim() : ''
        };
    }))()
"#;
