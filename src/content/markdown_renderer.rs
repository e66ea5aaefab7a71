use anyhow::{anyhow, Result};
use markdown::Options;

pub struct MarkdownRenderer {}

impl MarkdownRenderer {
    /// Renders a post body to HTML with GitHub flavoured markdown.
    /// Raw HTML embedded in the post is passed through untouched.
    pub fn render(md_text: &str) -> Result<String> {
        let mut options = Options::gfm();
        options.compile.allow_dangerous_html = true;

        match markdown::to_html_with_options(md_text, &options) {
            Ok(html) => Ok(html),
            Err(e) => Err(anyhow!("Error rendering markdown: {}", e.reason)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render() {
        let html = MarkdownRenderer::render("## Non technical\n\nThe __earlier__ the better.\n").unwrap();
        assert_eq!(html, "<h2>Non technical</h2>\n<p>The <strong>earlier</strong> the better.</p>\n");
    }

    #[test]
    fn test_render_gfm_and_html() {
        let html = MarkdownRenderer::render("~~old~~ <kbd>Ctrl</kbd>\n").unwrap();
        assert_eq!(html, "<p><del>old</del> <kbd>Ctrl</kbd></p>\n");
    }
}
