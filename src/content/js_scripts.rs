//! JavaScript evaluated in pages for content extraction

/// Removes noise elements, then returns the page metadata and the text of
/// the first content container holding more than 100 characters, falling
/// back to the whole body.
pub const EXTRACT_CONTENT_SCRIPT: &str = r#"
    (() => {
        const noise = [
            'nav', 'header', 'footer', 'aside', 'script', 'style', 'noscript',
            '.ads', '.advertisement', '.sidebar', '.menu', '.navigation',
            '[role="banner"]', '[role="navigation"]', '.cookie', '.popup', '.modal',
            '.related-posts', '.comments', '.social-share', '.breadcrumb'
        ];
        for (const sel of noise) {
            document.querySelectorAll(sel).forEach(el => el.remove());
        }

        const selectors = [
            'main article', 'main', 'article', '[role="main"]',
            '.content-body', '.post-body', '.entry-content', '.article-content',
            '.main-content', '.article-body', '.post-content', '.content'
        ];
        let text = '';
        for (const sel of selectors) {
            const el = document.querySelector(sel);
            const candidate = el ? (el.innerText || '').trim() : '';
            if (candidate.length > 100) {
                text = candidate;
                break;
            }
        }
        if (!text && document.body) {
            text = document.body.innerText || '';
        }

        const description = document.querySelector('meta[name="description"]');
        return {
            title: document.title || '',
            description: description ? (description.getAttribute('content') || '') : '',
            language: document.documentElement.lang || 'en',
            text
        };
    })()
"#;
