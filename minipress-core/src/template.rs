use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::site::Post;

const PAGE_TEMPLATE: &str = include_str!("../templates/page.html");
const POST_TEMPLATE: &str = include_str!("../templates/post.html");
const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");

/// Renders full pages from converted posts.
///
/// The templates ship inside the crate and are registered under `.html`
/// names, so Tera escapes every metadata value it interpolates; only the
/// markdown fragment (already entity-escaped during conversion) is inserted
/// with `safe`.
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("page.html", PAGE_TEMPLATE),
            ("post.html", POST_TEMPLATE),
            ("index.html", INDEX_TEMPLATE),
        ])?;

        Ok(Self { tera })
    }

    /// Render the standalone page for one post.
    pub fn render_post(&self, post: &Post, site: &SiteConfig) -> Result<String, tera::Error> {
        let mut context = Context::new();
        context.insert("site", site);
        context.insert("post", post);
        self.tera.render("post.html", &context)
    }

    /// Render the index page listing every post.
    pub fn render_index(&self, posts: &[Post], site: &SiteConfig) -> Result<String, tera::Error> {
        let mut context = Context::new();
        context.insert("site", site);
        context.insert("posts", posts);
        self.tera.render("index.html", &context)
    }
}
