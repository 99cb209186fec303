use std::path::{Path, PathBuf};

use serde::Serialize;
use walkdir::WalkDir;

use crate::frontmatter::parse_front_matter;
use crate::markdown::render_markdown;

/// Date used for posts whose front matter has none. Sorts last.
pub const FALLBACK_DATE: &str = "1970-01-01";

/// One post, fully converted and ready for the template layer.
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    pub slug: String,
    pub title: String,
    pub date: String,
    pub summary: Option<String>,
    pub html: String,
}

impl Post {
    /// Convert one raw document. The slug doubles as the title fallback.
    pub fn from_source(slug: &str, raw: &str) -> Self {
        let (meta, body) = parse_front_matter(raw);
        Self {
            slug: slug.to_string(),
            title: meta.title.unwrap_or_else(|| slug.to_string()),
            date: meta.date.unwrap_or_else(|| FALLBACK_DATE.to_string()),
            summary: meta.summary,
            html: render_markdown(body),
        }
    }

    /// Location of the generated page, relative to the output root.
    pub fn out_path(&self) -> PathBuf {
        PathBuf::from("posts").join(format!("{}.html", self.slug))
    }
}

/// Load and convert every markdown file directly under `content_dir`,
/// newest first. A missing content directory is an empty site, not an error.
pub fn load_posts<P: AsRef<Path>>(content_dir: P) -> Result<Vec<Post>, std::io::Error> {
    let content_dir = content_dir.as_ref();
    if !content_dir.exists() {
        return Ok(Vec::new());
    }

    let mut paths: Vec<PathBuf> = WalkDir::new(content_dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.path().is_file() && e.path().extension().map(|ext| ext == "md").unwrap_or(false)
        })
        .map(|e| e.path().to_path_buf())
        .collect();
    paths.sort();

    let mut posts = Vec::new();
    for path in paths {
        let Some(stem) = path.file_stem() else {
            continue;
        };
        let slug = stem.to_string_lossy().to_string();
        let raw = std::fs::read_to_string(&path)?;
        posts.push(Post::from_source(&slug, &raw));
    }

    // Lexicographic comparison is enough for ISO-style dates. The sort is
    // stable, so same-day posts keep their file-name order.
    posts.sort_by(|a, b| b.date.cmp(&a.date));

    Ok(posts)
}
