//! HTML preview rendering.
//!
//! Crawlers read the Open Graph tags; browsers follow the meta refresh to the
//! link's target.

use handlebars::Handlebars;
use serde::Serialize;
use thiserror::Error;

use crate::links::LinkValues;

const PREVIEW_TEMPLATE: &str = "preview";

/// Preview rendering errors.
#[derive(Debug, Error)]
pub enum PreviewError {
    /// The built-in template failed to compile.
    #[error("failed to register preview template: {0}")]
    Template(String),

    /// Rendering failed.
    #[error("failed to render preview: {0}")]
    Render(String),
}

/// Data handed to the template.
#[derive(Serialize)]
struct PreviewContext<'a> {
    title: &'a str,
    description: &'a str,
    site_name: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
    url: &'a str,
    image: Option<&'a str>,
    image_width: Option<u32>,
    image_height: Option<u32>,
}

/// Renders link values into a shareable HTML page.
pub struct PreviewRenderer {
    engine: Handlebars<'static>,
}

impl PreviewRenderer {
    /// Compile the built-in preview template.
    ///
    /// # Errors
    ///
    /// Returns [`PreviewError::Template`] if the template does not compile.
    pub fn new() -> Result<Self, PreviewError> {
        let mut engine = Handlebars::new();
        engine.set_strict_mode(false);
        engine
            .register_template_string(
                PREVIEW_TEMPLATE,
                include_str!("../templates/preview.hbs"),
            )
            .map_err(|e| PreviewError::Template(e.to_string()))?;

        Ok(Self { engine })
    }

    /// Render `values`. `dimensions` are the hosted image's width and height,
    /// when known.
    ///
    /// # Errors
    ///
    /// Returns [`PreviewError::Render`] if rendering fails.
    pub fn render(
        &self,
        values: &LinkValues,
        dimensions: Option<(u32, u32)>,
    ) -> Result<String, PreviewError> {
        let context = PreviewContext {
            title: &values.title,
            description: &values.description,
            site_name: &values.site_name,
            kind: &values.kind,
            url: &values.url,
            image: values.image.as_deref(),
            image_width: dimensions.map(|(width, _)| width),
            image_height: dimensions.map(|(_, height)| height),
        };

        self.engine
            .render(PREVIEW_TEMPLATE, &context)
            .map_err(|e| PreviewError::Render(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values() -> LinkValues {
        LinkValues {
            title: "Sharknado (TV Movie 2013)".to_string(),
            description: "When a freak hurricane swamps Los Angeles".to_string(),
            site_name: "IMDb".to_string(),
            kind: "video.movie".to_string(),
            url: "http://www.imdb.com/title/tt2724064/".to_string(),
            image: Some("http://localhost:9000/link-images/abc".to_string()),
        }
    }

    fn render(values: &LinkValues, dimensions: Option<(u32, u32)>) -> String {
        PreviewRenderer::new()
            .expect("template compiles")
            .render(values, dimensions)
            .expect("should render")
    }

    #[test]
    fn test_renders_open_graph_tags() {
        let html = render(&values(), None);

        assert!(html.contains(r#"<meta property="og:title" content="Sharknado (TV Movie 2013)">"#));
        assert!(html.contains(r#"<meta property="og:site_name" content="IMDb">"#));
        assert!(html.contains(r#"<meta property="og:type" content="video.movie">"#));
        assert!(html.contains(r#"<meta property="og:image" content="http://localhost:9000/link-images/abc">"#));
        assert!(html.contains(r#"<meta name="twitter:card" content="summary_large_image">"#));
        assert!(!html.contains("og:image:width"));
    }

    #[test]
    fn test_renders_image_dimensions() {
        let html = render(&values(), Some((712, 1000)));

        assert!(html.contains(r#"<meta property="og:image:width" content="712">"#));
        assert!(html.contains(r#"<meta property="og:image:height" content="1000">"#));
    }

    #[test]
    fn test_omits_empty_optional_tags() {
        let values = LinkValues {
            description: String::new(),
            site_name: String::new(),
            image: None,
            ..values()
        };

        let html = render(&values, None);

        assert!(!html.contains("og:description"));
        assert!(!html.contains("og:site_name"));
        assert!(!html.contains("og:image"));
        assert!(html.contains(r#"<meta name="twitter:card" content="summary">"#));
    }

    #[test]
    fn test_escapes_markup() {
        let values = LinkValues {
            title: r#""><script>alert(1)</script>"#.to_string(),
            ..values()
        };

        let html = render(&values, None);

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("&quot;&gt;"));
    }

    #[test]
    fn test_redirects_to_target() {
        let html = render(&values(), None);
        assert!(html.contains(r#"<a href="http://www.imdb.com/title/tt2724064/">"#));
        assert!(html.contains("http-equiv=\"refresh\""));
    }
}
