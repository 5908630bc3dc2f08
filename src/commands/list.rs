//! List site content

use anyhow::Result;
use std::io::Write;

use crate::Site;

/// List posts or tags, as visible to the server with the same draft setting
pub fn run(site: &Site, content_type: &str, show_drafts: bool) -> Result<()> {
    let store = site.open_store(show_drafts)?;
    let stdout = std::io::stdout();
    write_listing(&mut stdout.lock(), &store, content_type)
}

fn write_listing(
    out: &mut impl Write,
    store: &crate::content::PostStore,
    content_type: &str,
) -> Result<()> {
    match content_type {
        "post" | "posts" => {
            let posts = store.all();
            writeln!(out, "Posts ({}):", posts.len())?;
            for post in posts {
                let date = post
                    .date
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "----------".to_string());
                let draft = if post.draft { " (draft)" } else { "" };
                writeln!(
                    out,
                    "  {} - {}{} /blog/{} [{}]",
                    date,
                    post.title,
                    draft,
                    post.slug,
                    post.source.display()
                )?;
            }
        }
        "tag" | "tags" => {
            let tags = store.tags();
            writeln!(out, "Tags ({}):", tags.len())?;
            for (tag, count) in tags {
                writeln!(out, "  {} ({})", tag, count)?;
            }
        }
        _ => {
            anyhow::bail!("Unknown type: {}. Available: post, tag", content_type);
        }
    }

    Ok(())
}
