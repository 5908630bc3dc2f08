//! Built-in site templates using the Tera template engine
//!
//! Templates are embedded in the binary. Page handlers build one of the view
//! models below and hand it to [`TemplateRenderer::render`].

use anyhow::Result;
use chrono::{Datelike, Local};
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::content::Post;

/// Template renderer with the embedded site templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all site templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("base.html", include_str!("site/base.html")),
            ("home.html", include_str!("site/home.html")),
            ("blog_index.html", include_str!("site/blog_index.html")),
            ("blog_post.html", include_str!("site/blog_post.html")),
            ("tag.html", include_str!("site/tag.html")),
            ("not_found.html", include_str!("site/not_found.html")),
            ("error.html", include_str!("site/error.html")),
            (
                "partials/post_list.html",
                include_str!("site/partials/post_list.html"),
            ),
        ])?;

        tera.register_filter("strip_html", strip_html_filter);
        tera.register_filter("truncate_chars", truncate_chars_filter);

        Ok(Self { tera })
    }

    /// Build a renderer from raw `(name, source)` pairs
    pub fn from_raw(templates: Vec<(&str, &str)>) -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(templates)?;
        tera.register_filter("strip_html", strip_html_filter);
        tera.register_filter("truncate_chars", truncate_chars_filter);
        Ok(Self { tera })
    }

    /// Render a template with a serializable view model
    pub fn render<T: Serialize>(&self, template_name: &str, data: &T) -> Result<String> {
        let context = Context::from_serialize(data)?;
        Ok(self.tera.render(template_name, &context)?)
    }
}

/// Tera filter: strip HTML tags and decode the entities the renderer emits,
/// so autoescaping does not double-encode them
fn strip_html_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("strip_html", "value", String, value);
    let mut result = String::with_capacity(s.len());
    let mut in_tag = false;
    for c in s.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }
    Ok(tera::Value::String(decode_entities(result.trim())))
}

fn decode_entities(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}

/// Tera filter: truncate by character count
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 160,
    };

    if s.chars().count() <= length {
        Ok(tera::Value::String(s))
    } else {
        let truncated: String = s.chars().take(length).collect();
        Ok(tera::Value::String(format!("{}…", truncated.trim_end())))
    }
}

/// Data every page needs
#[derive(Debug, Clone, Serialize)]
pub struct PageData<'a> {
    pub site: &'a SiteConfig,
    pub year: i32,
    pub title: String,
}

impl<'a> PageData<'a> {
    /// Page data stamped with the current year
    pub fn new(site: &'a SiteConfig, title: impl Into<String>) -> Self {
        Self {
            site,
            year: Local::now().year(),
            title: title.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HomeData<'a> {
    pub page: PageData<'a>,
    pub recent_posts: Vec<Post>,
}

/// View model for pages with no content of their own (404, 500)
#[derive(Debug, Serialize)]
pub struct StatusPageData<'a> {
    pub page: PageData<'a>,
}

#[derive(Debug, Serialize)]
pub struct BlogIndexData<'a> {
    pub page: PageData<'a>,
    pub posts: Vec<Post>,
}

#[derive(Debug, Serialize)]
pub struct BlogPostData<'a> {
    pub page: PageData<'a>,
    pub post: Post,
}

#[derive(Debug, Serialize)]
pub struct TagPageData<'a> {
    pub page: PageData<'a>,
    pub tag: String,
    pub posts: Vec<Post>,
}
