use serde::Serialize;

/// Metadata recognized at the top of a post source file.
///
/// Keys that are missing from the source are simply `None`; there are no
/// placeholder values. Anything other than `title`, `date` and `summary`
/// is dropped.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
    pub summary: Option<String>,
}

impl FrontMatter {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.date.is_none() && self.summary.is_none()
    }
}

/// Split a raw document into front matter and markdown body.
///
/// A front matter block opens with a `---` line at the very start of the
/// document and closes at the next `---` line. When the opener is missing,
/// or the block is never closed, the whole input is returned as the body
/// with empty metadata. This never fails.
pub fn parse_front_matter(raw: &str) -> (FrontMatter, &str) {
    let Some(after_open) = raw.strip_prefix("---\n") else {
        return (FrontMatter::default(), raw);
    };

    // The closing delimiter must be a full `---` line of its own.
    let Some(close) = after_open.find("\n---\n") else {
        return (FrontMatter::default(), raw);
    };

    let block = &after_open[..close];
    let body = &after_open[close + "\n---\n".len()..];

    let mut meta = FrontMatter::default();
    for line in block.trim().lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        match key.trim() {
            "title" => meta.title = Some(value.to_string()),
            "date" => meta.date = Some(value.to_string()),
            "summary" => meta.summary = Some(value.to_string()),
            _ => {}
        }
    }

    (meta, body)
}
