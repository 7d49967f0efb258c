//! Template composition.
//!
//! Every `*.html` under the templates directory is loaded into one named
//! registry at construction, and the required template names are validated
//! up front, so a missing base layout or page template is a build-time
//! error instead of a mid-render surprise. Page templates extend
//! `base.html`; partials are included by name (`partials/*.html`).
//!
//! Three context shapes flow through the same base layout:
//! a single page (`post`), the site collection (`posts`), and no page at
//! all for the landing page. Site-level values are injected into every
//! context so shared chrome renders identically everywhere.

use crate::config::SiteSection;
use crate::content::Page;
use crate::error::BuildError;
use std::path::Path;
use tera::{Context, Tera};

/// Entry-point layout every page template extends.
pub const BASE_TEMPLATE: &str = "base.html";
/// Landing page template.
pub const LANDING_TEMPLATE: &str = "index.html";
/// Post detail template.
pub const POST_TEMPLATE: &str = "posts/post.html";
/// Post listing template.
pub const POST_INDEX_TEMPLATE: &str = "posts/index.html";

/// Templates that must exist for a build to start.
const REQUIRED_TEMPLATES: &[&str] = &[
    BASE_TEMPLATE,
    LANDING_TEMPLATE,
    POST_TEMPLATE,
    POST_INDEX_TEMPLATE,
];

/// Named template registry plus the site values shared by every context.
pub struct Composer {
    tera: Tera,
    site: SiteSection,
}

impl Composer {
    /// Load every `*.html` under `templates_dir` and validate that the
    /// required template names are present.
    pub fn from_dir(templates_dir: &Path, site: SiteSection) -> Result<Self, BuildError> {
        let pattern = templates_dir.join("**").join("*.html");
        let tera = Tera::new(&pattern.to_string_lossy())?;

        for name in REQUIRED_TEMPLATES {
            if !tera.get_template_names().any(|loaded| loaded == *name) {
                return Err(BuildError::Template(tera::Error::msg(format!(
                    "required template `{name}` not found under {}",
                    templates_dir.display()
                ))));
            }
        }

        Ok(Self { tera, site })
    }

    /// Render the landing page. No page context, only site values.
    pub fn landing_page(&self) -> Result<Vec<u8>, BuildError> {
        self.render(LANDING_TEMPLATE, self.base_context())
    }

    /// Render a post detail page.
    pub fn post_page(&self, page: &Page) -> Result<Vec<u8>, BuildError> {
        let mut context = self.base_context();
        context.insert("post", page);
        self.render(POST_TEMPLATE, context)
    }

    /// Render the post listing over the whole site collection.
    pub fn post_index(&self, pages: &[Page]) -> Result<Vec<u8>, BuildError> {
        let mut context = self.base_context();
        context.insert("posts", pages);
        self.render(POST_INDEX_TEMPLATE, context)
    }

    fn base_context(&self) -> Context {
        let mut context = Context::new();
        context.insert("site", &self.site);
        context
    }

    fn render(&self, name: &str, context: Context) -> Result<Vec<u8>, BuildError> {
        let html = self.tera.render(name, &context)?;
        Ok(html.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    const TEST_BASE: &str = "<!DOCTYPE html>\n<html><head><title>{% block title %}{{ site.title }}{% endblock title %}</title></head>\n<body>{% include \"partials/nav.html\" %}<main>{% block content %}{% endblock content %}</main></body></html>\n";
    const TEST_NAV: &str = "<nav><a href=\"/\">{{ site.title }}</a></nav>\n";
    const TEST_LANDING: &str = "{% extends \"base.html\" %}{% block content %}<h1>welcome</h1>{% endblock content %}\n";
    const TEST_POST: &str = "{% extends \"base.html\" %}{% block title %}{{ post.title }}{% endblock title %}{% block content %}<article>{{ post.content | safe }}</article>{% endblock content %}\n";
    const TEST_POST_INDEX: &str = "{% extends \"base.html\" %}{% block content %}<ul>{% for post in posts %}<li>{{ post.title }}</li>{% endfor %}</ul>{% endblock content %}\n";

    fn write_templates(root: &Path) {
        fs::create_dir_all(root.join("partials")).unwrap();
        fs::create_dir_all(root.join("posts")).unwrap();
        fs::write(root.join("base.html"), TEST_BASE).unwrap();
        fs::write(root.join("partials/nav.html"), TEST_NAV).unwrap();
        fs::write(root.join("index.html"), TEST_LANDING).unwrap();
        fs::write(root.join("posts/post.html"), TEST_POST).unwrap();
        fs::write(root.join("posts/index.html"), TEST_POST_INDEX).unwrap();
    }

    fn site() -> SiteSection {
        SiteSection {
            title: "Test Site".to_owned(),
            base_url: String::new(),
            author: None,
        }
    }

    fn page(title: &str, slug: &str, content: &str) -> Page {
        Page {
            title: title.to_owned(),
            date: None,
            tags: Vec::new(),
            slug: slug.to_owned(),
            summary: None,
            content: content.to_owned(),
            draft: false,
        }
    }

    #[test]
    fn test_landing_page_renders_through_base_layout() {
        let dir = tempfile::tempdir().unwrap();
        write_templates(dir.path());

        let composer = Composer::from_dir(dir.path(), site()).unwrap();
        let html = String::from_utf8(composer.landing_page().unwrap()).unwrap();
        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains("<title>Test Site</title>"));
        // Shared chrome from the partial
        assert!(html.contains("<nav>"));
        assert!(html.contains("<h1>welcome</h1>"));
    }

    #[test]
    fn test_post_page_inserts_content_unescaped() {
        let dir = tempfile::tempdir().unwrap();
        write_templates(dir.path());

        let composer = Composer::from_dir(dir.path(), site()).unwrap();
        let page = page("A", "a", "<h1>Hi</h1>");
        let html = String::from_utf8(composer.post_page(&page).unwrap()).unwrap();
        assert!(html.contains("<article><h1>Hi</h1></article>"));
        assert!(html.contains("<title>A</title>"));
        assert!(!html.contains("&lt;h1&gt;"));
    }

    #[test]
    fn test_post_index_lists_every_page() {
        let dir = tempfile::tempdir().unwrap();
        write_templates(dir.path());

        let composer = Composer::from_dir(dir.path(), site()).unwrap();
        let pages = vec![page("A", "a", ""), page("B", "b", "")];
        let html = String::from_utf8(composer.post_index(&pages).unwrap()).unwrap();
        assert!(html.contains("<li>A</li>"));
        assert!(html.contains("<li>B</li>"));
    }

    #[test]
    fn test_missing_required_template_fails_at_construction() {
        let dir = tempfile::tempdir().unwrap();
        write_templates(dir.path());
        fs::remove_file(dir.path().join("posts/post.html")).unwrap();

        assert!(matches!(
            Composer::from_dir(dir.path(), site()),
            Err(BuildError::Template(_))
        ));
    }

    #[test]
    fn test_missing_base_layout_fails_at_construction() {
        let dir = tempfile::tempdir().unwrap();
        write_templates(dir.path());
        fs::remove_file(dir.path().join("base.html")).unwrap();

        // Tera resolves `extends` when the registry is built
        assert!(Composer::from_dir(dir.path(), site()).is_err());
    }

    #[test]
    fn test_missing_partial_fails_the_render_step() {
        let dir = tempfile::tempdir().unwrap();
        write_templates(dir.path());
        fs::remove_file(dir.path().join("partials/nav.html")).unwrap();

        // Registry construction may already reject the dangling include;
        // if not, the render step must.
        match Composer::from_dir(dir.path(), site()) {
            Ok(composer) => assert!(matches!(
                composer.landing_page(),
                Err(BuildError::Template(_))
            )),
            Err(err) => assert!(matches!(err, BuildError::Template(_))),
        }
    }

    #[test]
    fn test_empty_templates_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Composer::from_dir(dir.path(), site()),
            Err(BuildError::Template(_))
        ));
    }
}
