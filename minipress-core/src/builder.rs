use std::path::{Path, PathBuf};

use crate::config::SiteConfig;
use crate::site::{Post, load_posts};
use crate::template::TemplateRenderer;
use crate::theme;

#[derive(Debug)]
pub enum BuildError {
    Io(std::io::Error),
    Template(tera::Error),
}

impl From<std::io::Error> for BuildError {
    fn from(err: std::io::Error) -> Self {
        BuildError::Io(err)
    }
}

impl From<tera::Error> for BuildError {
    fn from(err: tera::Error) -> Self {
        BuildError::Template(err)
    }
}

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildError::Io(e) => write!(f, "IO error: {}", e),
            BuildError::Template(e) => write!(f, "Template error: {}", e),
        }
    }
}

impl std::error::Error for BuildError {}

/// Assembles a [`Site`] from a content directory and site settings.
pub struct SiteBuilder {
    content_dir: PathBuf,
    output_dir: PathBuf,
    site: SiteConfig,
}

impl Default for SiteBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SiteBuilder {
    pub fn new() -> Self {
        Self {
            content_dir: PathBuf::from("./content"),
            output_dir: PathBuf::from("."),
            site: SiteConfig::default(),
        }
    }

    pub fn content_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.content_dir = path.as_ref().to_path_buf();
        self
    }

    pub fn output_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output_dir = path.as_ref().to_path_buf();
        self
    }

    pub fn site_config(mut self, site: SiteConfig) -> Self {
        self.site = site;
        self
    }

    /// Load and convert all posts. Rendering to disk happens separately,
    /// in [`Site::render_all`].
    pub fn build(self) -> Result<Site, BuildError> {
        let renderer = TemplateRenderer::new()?;
        let posts = load_posts(&self.content_dir)?;

        Ok(Site {
            posts,
            renderer,
            output_dir: self.output_dir,
            site: self.site,
        })
    }
}

pub struct Site {
    posts: Vec<Post>,
    renderer: TemplateRenderer,
    output_dir: PathBuf,
    site: SiteConfig,
}

impl Site {
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Write the whole site: one page per post under `posts/`, the index
    /// page, and the stylesheet. Stale post pages from earlier builds are
    /// removed first. Returns the number of posts written.
    pub fn render_all(&self) -> Result<usize, BuildError> {
        let posts_dir = self.output_dir.join("posts");
        std::fs::create_dir_all(&posts_dir)?;
        remove_generated_files(&posts_dir)?;

        for post in &self.posts {
            let html = self.renderer.render_post(post, &self.site)?;
            std::fs::write(self.output_dir.join(post.out_path()), html)?;
        }

        let index = self.renderer.render_index(&self.posts, &self.site)?;
        std::fs::write(self.output_dir.join("index.html"), index)?;
        std::fs::write(self.output_dir.join("style.css"), theme::STYLESHEET)?;

        Ok(self.posts.len())
    }
}

/// Remove generated outputs from a previous build: everything in `posts/`
/// plus the index page and stylesheet. Source content is never touched.
pub fn clean_output<P: AsRef<Path>>(output_dir: P) -> Result<(), std::io::Error> {
    let output_dir = output_dir.as_ref();

    let posts_dir = output_dir.join("posts");
    if posts_dir.exists() {
        remove_generated_files(&posts_dir)?;
    }

    for name in ["index.html", "style.css"] {
        let path = output_dir.join(name);
        if path.exists() {
            std::fs::remove_file(path)?;
        }
    }

    Ok(())
}

// Plain files only; subdirectories are left alone.
fn remove_generated_files(dir: &Path) -> Result<(), std::io::Error> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            std::fs::remove_file(entry.path())?;
        }
    }

    Ok(())
}
