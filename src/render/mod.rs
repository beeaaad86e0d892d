//! Index page rendering.
//!
//! The page template is a plain HTML file in the site root with
//! `__TITLE__`, `__DESCRIPTION__` and `__CARDS__` placeholders; the
//! per-record card markup is an embedded template. All interpolated
//! text is HTML-escaped.
//!
//! Records are shuffled per request with a biased random key so that
//! sites linking back tend to surface first; card and button styles
//! cycle by the record's position in the loaded catalog, not its
//! display position.

mod template;

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use rand::Rng;

use crate::catalog::CatalogItem;
use crate::config::SiteConfig;
use crate::utils::html::escape;
use template::{Template, TemplateVars};

const CARD_CLASSES: [&str; 4] = ["card-1", "card-2", "card-3", "card-4"];
const BTN_CLASSES: [&str; 4] = ["btn-primary", "btn-success", "btn-warning", "btn-danger"];

/// Extra class for first-party records.
const FEATURED_CLASS: &str = "card-featured";

/// Variables for the embedded card template.
struct CardVars {
    card_class: String,
    /// Pre-rendered `<img>` markup, empty when the record has no image.
    image: String,
    title: String,
    description: String,
    /// Pre-rendered action button, empty when the record has no link.
    action: String,
}

impl TemplateVars for CardVars {
    fn apply(&self, content: &str) -> String {
        content
            .replace("__CARD_CLASS__", &self.card_class)
            .replace("__IMAGE__", &self.image)
            .replace("__TITLE__", &escape(&self.title))
            .replace("__DESCRIPTION__", &escape(&self.description))
            .replace("__ACTION__", &self.action)
    }
}

const CARD_HTML: Template<CardVars> = Template::new(include_str!("card.html"));

/// Renders the index page from the site template.
pub struct Renderer {
    template_path: PathBuf,
    template: String,
    /// Re-read the template on every request (editing convenience).
    reload: bool,
    title: String,
    description: String,
}

impl Renderer {
    /// Load the page template; a missing or unreadable template is fatal.
    pub fn new(config: &SiteConfig) -> Result<Self> {
        let template = fs::read_to_string(&config.content.template).with_context(|| {
            format!(
                "failed to read template {}",
                config.content.template.display()
            )
        })?;

        Ok(Self {
            template_path: config.content.template.clone(),
            template,
            reload: config.serve.reload_template,
            title: config.site.title.clone(),
            description: config.site.description.clone(),
        })
    }

    /// Render the index page for the given catalog.
    pub fn render(&self, items: &[CatalogItem]) -> Result<String> {
        let template = if self.reload {
            Cow::Owned(fs::read_to_string(&self.template_path).with_context(|| {
                format!("failed to re-read template {}", self.template_path.display())
            })?)
        } else {
            Cow::Borrowed(self.template.as_str())
        };

        Ok(template
            .replace("__TITLE__", &escape(&self.title))
            .replace("__DESCRIPTION__", &escape(&self.description))
            .replace("__CARDS__", &render_cards(items)))
    }
}

/// Exponent for the per-request random sort key. Keys are drawn from
/// [0, 1) and sorted ascending, so a larger exponent pulls a record
/// toward the front of the page.
fn sort_bias(item: &CatalogItem) -> f64 {
    if item.has_link_back { 1.3 } else { 1.0 }
}

fn render_cards(items: &[CatalogItem]) -> String {
    let mut rng = rand::rng();
    let mut ordered: Vec<(f64, usize)> = items
        .iter()
        .enumerate()
        .map(|(position, item)| (rng.random::<f64>().powf(sort_bias(item)), position))
        .collect();
    ordered.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

    ordered
        .iter()
        .map(|&(_, position)| render_card(&items[position], position))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_card(item: &CatalogItem, position: usize) -> String {
    let mut card_class = CARD_CLASSES[position % CARD_CLASSES.len()].to_string();
    if item.first_party {
        card_class.push(' ');
        card_class.push_str(FEATURED_CLASS);
    }

    let image = match (&item.image_src, &item.image_srcset) {
        (Some(src), Some(srcset)) => format!(
            r#"<img class="card-img" src="{}" srcset="{}" alt="{}">"#,
            src.to_encoded(),
            escape(srcset),
            escape(&item.title)
        ),
        (Some(src), None) => format!(
            r#"<img class="card-img" src="{}" alt="{}">"#,
            src.to_encoded(),
            escape(&item.title)
        ),
        _ => String::new(),
    };

    let action = item
        .link
        .as_deref()
        .map(|link| {
            format!(
                r#"<a class="btn {}" href="{}">Visit</a>"#,
                BTN_CLASSES[position % BTN_CLASSES.len()],
                escape(link)
            )
        })
        .unwrap_or_default();

    CARD_HTML.render(&CardVars {
        card_class,
        image,
        title: item.title.clone(),
        description: item.description.clone(),
        action,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::UrlPath;

    fn item(title: &str) -> CatalogItem {
        CatalogItem {
            title: title.to_string(),
            ..CatalogItem::default()
        }
    }

    fn renderer_with_template(template: &str) -> (tempfile::TempDir, Renderer) {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("template.html"), template).unwrap();

        let mut config = SiteConfig::default();
        config.site.title = "Catalog".to_string();
        config.site.description = "All <our> games".to_string();
        config.content.template = dir.path().join("template.html");

        let renderer = Renderer::new(&config).unwrap();
        (dir, renderer)
    }

    #[test]
    fn test_render_page_substitutes_placeholders() {
        let (_dir, renderer) = renderer_with_template(
            "<title>__TITLE__</title><meta content=\"__DESCRIPTION__\"><main>__CARDS__</main>",
        );

        let html = renderer
            .render(&[item("Alpha"), item("Beta")])
            .unwrap();

        assert!(html.contains("<title>Catalog</title>"));
        // Description is escaped
        assert!(html.contains("All &lt;our&gt; games"));
        assert!(html.contains("Alpha"));
        assert!(html.contains("Beta"));
        assert!(!html.contains("__CARDS__"));
    }

    #[test]
    fn test_missing_template_is_fatal() {
        let mut config = SiteConfig::default();
        config.content.template = PathBuf::from("/nonexistent/template.html");
        assert!(Renderer::new(&config).is_err());
    }

    #[test]
    fn test_card_classes_cycle_by_position() {
        for (position, expected) in [(0, "card-1"), (3, "card-4"), (4, "card-1")] {
            let html = render_card(&item("X"), position);
            assert!(html.contains(expected), "{position}: {html}");
        }
    }

    #[test]
    fn test_button_classes_cycle_by_position() {
        let mut with_link = item("X");
        with_link.link = Some("https://example.com".to_string());

        assert!(render_card(&with_link, 0).contains("btn-primary"));
        assert!(render_card(&with_link, 1).contains("btn-success"));
        assert!(render_card(&with_link, 5).contains("btn-success"));
    }

    #[test]
    fn test_first_party_gets_featured_class() {
        let mut featured = item("X");
        featured.first_party = true;

        assert!(render_card(&featured, 0).contains("card-1 card-featured"));
        assert!(!render_card(&item("X"), 0).contains(FEATURED_CLASS));
    }

    #[test]
    fn test_interpolated_fields_are_escaped() {
        let mut sneaky = item("<script>alert(1)</script>");
        sneaky.description = "a & b".to_string();

        let html = render_card(&sneaky, 0);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("a &amp; b"));
    }

    #[test]
    fn test_image_markup() {
        let mut with_image = item("X");
        with_image.image_src = Some(UrlPath::from_asset("/static/abc/400.png"));
        with_image.image_srcset = Some("/static/abc/1200.png 1200w".to_string());

        let html = render_card(&with_image, 0);
        assert!(html.contains(r#"src="/static/abc/400.png""#));
        assert!(html.contains(r#"srcset="/static/abc/1200.png 1200w""#));

        // No image: no img tag at all
        assert!(!render_card(&item("X"), 0).contains("<img"));
    }

    #[test]
    fn test_sort_bias() {
        let plain = item("X");
        assert_eq!(sort_bias(&plain), 1.0);

        let mut linked = item("Y");
        linked.has_link_back = true;
        assert_eq!(sort_bias(&linked), 1.3);
    }

    #[test]
    fn test_render_cards_includes_every_item() {
        let items: Vec<_> = (0..8).map(|i| item(&format!("game-{i}"))).collect();
        let html = render_cards(&items);
        for i in 0..8 {
            assert!(html.contains(&format!("game-{i}")));
        }
    }
}
