/// The stylesheet bundled with every generated site, written to
/// `style.css` in the output root on each build.
pub const STYLESHEET: &str = include_str!("../assets/style.css");
