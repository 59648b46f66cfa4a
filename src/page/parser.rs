// HTML -> PageRecord parsing, built on `scraper`.
//
// Headings are read from the whole document. Links, images, structured
// content and body text skip page chrome (nav, header, footer) along with
// script and style blocks, since those repeat on every page of a site.

use anyhow::{anyhow, Result};
use scraper::{ElementRef, Html, Node, Selector};

use super::{Image, Link, PageRecord, StructuredValue};

/// Elements whose contents never count as page content.
const EXCLUDED_TAGS: &[&str] = &["script", "style", "nav", "footer", "header"];

/// Elements that separate words in body text.
const BLOCK_TAGS: &[&str] = &[
    "p", "div", "br", "li", "ul", "ol", "td", "th", "tr", "table", "section", "article",
    "aside", "main", "blockquote", "pre", "h1", "h2", "h3", "h4", "h5", "h6",
];

const HEADING_LEVELS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

/// Pre-compiled selectors. Build once and reuse across pages.
#[derive(Debug, Clone)]
pub struct PageParser {
    title: Selector,
    meta_description: Selector,
    meta_keywords: Selector,
    headings: Vec<(&'static str, Selector)>,
    body: Selector,
    links: Selector,
    images: Selector,
    product_title: Selector,
    article_title: Selector,
    breadcrumbs: Selector,
}

impl PageParser {
    pub fn new() -> Result<Self> {
        let mut headings = Vec::with_capacity(HEADING_LEVELS.len());
        for level in HEADING_LEVELS {
            headings.push((level, selector(level)?));
        }

        Ok(Self {
            title: selector("title")?,
            meta_description: selector(r#"meta[name="description"]"#)?,
            meta_keywords: selector(r#"meta[name="keywords"]"#)?,
            headings,
            body: selector("body")?,
            links: selector("a[href]")?,
            images: selector("img")?,
            product_title: selector(
                r#"#productTitle, .product-title, [data-testid="product-title"]"#,
            )?,
            article_title: selector(r#"article h1, .article-title, [itemprop="headline"]"#)?,
            breadcrumbs: selector(
                r#".breadcrumb a, [aria-label="breadcrumb"] a, #breadcrumbs a"#,
            )?,
        })
    }

    /// Parse raw markup into a PageRecord. Malformed HTML is repaired by the
    /// parser rather than rejected, so this never fails.
    pub fn parse(&self, html: &str) -> PageRecord {
        let document = Html::parse_document(html);

        let mut page = PageRecord {
            title: first_text(&document, &self.title),
            meta_description: first_attr(&document, &self.meta_description, "content"),
            meta_keywords: first_attr(&document, &self.meta_keywords, "content"),
            body_text: self.body_text(&document),
            ..PageRecord::default()
        };

        for (level, sel) in &self.headings {
            let texts: Vec<String> = document
                .select(sel)
                .map(|el| element_text(&el))
                .filter(|text| !text.is_empty())
                .collect();
            if !texts.is_empty() {
                page.headings.insert((*level).to_string(), texts);
            }
        }

        page.links = document
            .select(&self.links)
            .filter(|el| !in_excluded(el))
            .filter_map(|el| {
                let href = el.value().attr("href")?.trim();
                let text = element_text(&el);
                (!href.is_empty() && !text.is_empty()).then(|| Link {
                    href: href.to_string(),
                    text,
                })
            })
            .collect();

        page.images = document
            .select(&self.images)
            .filter(|el| !in_excluded(el))
            .filter_map(|el| {
                let src = el.value().attr("src")?.trim();
                (!src.is_empty()).then(|| Image {
                    src: src.to_string(),
                    alt: el.value().attr("alt").unwrap_or_default().trim().to_string(),
                })
            })
            .collect();

        self.structured_content(&document, &mut page);
        page
    }

    fn body_text(&self, document: &Html) -> String {
        let Some(body) = document.select(&self.body).next() else {
            return String::new();
        };

        // Inline markup joins its text directly; block elements start a new word
        let mut text = String::new();
        for node in body.descendants() {
            if is_excluded(node.value()) || node.ancestors().any(|a| is_excluded(a.value())) {
                continue;
            }
            match node.value() {
                Node::Text(chunk) => text.push_str(chunk),
                Node::Element(el) if BLOCK_TAGS.contains(&el.name()) => text.push(' '),
                _ => {}
            }
        }
        collapse_whitespace(&text)
    }

    fn structured_content(&self, document: &Html, page: &mut PageRecord) {
        let first_content = |sel: &Selector| {
            document
                .select(sel)
                .find(|el| !in_excluded(el))
                .map(|el| element_text(&el))
                .filter(|text| !text.is_empty())
        };

        if let Some(product) = first_content(&self.product_title) {
            page.structured_content
                .insert("product_title".to_string(), StructuredValue::Text(product));
        }
        if let Some(article) = first_content(&self.article_title) {
            page.structured_content
                .insert("article_title".to_string(), StructuredValue::Text(article));
        }

        let crumbs: Vec<String> = document
            .select(&self.breadcrumbs)
            .filter(|el| !in_excluded(el))
            .map(|el| element_text(&el))
            .filter(|text| !text.is_empty())
            .collect();
        if !crumbs.is_empty() {
            page.structured_content
                .insert("breadcrumbs".to_string(), StructuredValue::List(crumbs));
        }
    }
}

/// Parse markup with a one-off parser.
pub fn parse_html(html: &str) -> Result<PageRecord> {
    Ok(PageParser::new()?.parse(html))
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("Invalid selector {css:?}: {e:?}"))
}

fn is_excluded(node: &Node) -> bool {
    node.as_element()
        .is_some_and(|el| EXCLUDED_TAGS.contains(&el.name()))
}

fn in_excluded(el: &ElementRef<'_>) -> bool {
    EXCLUDED_TAGS.contains(&el.value().name()) || el.ancestors().any(|a| is_excluded(a.value()))
}

fn element_text(el: &ElementRef<'_>) -> String {
    collapse_whitespace(&el.text().collect::<String>())
}

fn first_text(document: &Html, sel: &Selector) -> String {
    document
        .select(sel)
        .next()
        .map(|el| element_text(&el))
        .unwrap_or_default()
}

fn first_attr(document: &Html, sel: &Selector, attr: &str) -> String {
    document
        .select(sel)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a \n\t b  "), "a b");
        assert_eq!(collapse_whitespace(""), "");
    }

    #[test]
    fn test_script_and_chrome_excluded_from_body() {
        let page = parse_html(
            "<html><body><header>Site Header</header><nav>Menu</nav>\
             <p>Real content</p><script>var x = 1;</script><style>p{}</style>\
             <footer>Copyright</footer></body></html>",
        )
        .unwrap();
        assert_eq!(page.body_text, "Real content");
    }

    #[test]
    fn test_block_elements_separate_words() {
        let page = parse_html("<body><p>first</p><p>second<br>third</p><ul><li>a1</li><li>b2</li></ul></body>")
            .unwrap();
        assert_eq!(page.body_text, "first second third a1 b2");
    }

    #[test]
    fn test_headings_inside_header_still_counted() {
        let page = parse_html("<body><header><h1>Brand</h1></header><h2>Section</h2></body>")
            .unwrap();
        assert_eq!(page.headings("h1"), ["Brand".to_string()]);
        assert_eq!(page.headings("h2"), ["Section".to_string()]);
    }
}
