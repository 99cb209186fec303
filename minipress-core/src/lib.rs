pub mod builder;
pub mod config;
pub mod frontmatter;
pub mod markdown;
pub mod site;
pub mod template;
pub mod theme;

// Re-export main types
pub use builder::{BuildError, Site, SiteBuilder, clean_output};
pub use config::{Config, SiteConfig};
pub use frontmatter::{FrontMatter, parse_front_matter};
pub use markdown::render_markdown;
pub use site::{Post, load_posts};
pub use template::TemplateRenderer;
