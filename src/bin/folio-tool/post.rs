use std::path::PathBuf;

use anyhow::{Context, Result};

use folio::model::Post;
use folio::store::{Collection, BLOGS_FILE};
use folio::text_utils::today;

use crate::PostArgs;

fn get_author(args: &PostArgs) -> String {
    if let Some(ref name) = args.author {
        return name.clone();
    }

    let name = whoami::realname();
    if name.is_empty() {
        return whoami::username();
    }
    name
}

fn render_body() -> String {
    [
        "## Introduction",
        "This is a body example. Please remove it and replace with your content.",
        "",
        "### What you can write",
        "- Lines starting with ## or ### are headings",
        "- Lines starting with - are list items",
        "- [video:youtube:VIDEO_ID] embeds a video, [image:URL] an image",
        "",
        "And this is the rest of your post",
    ].join("\n")
}

fn draft_post(title: &str, author: &str) -> Post {
    Post {
        id: 0,
        title: title.to_string(),
        excerpt: format!("A few words about {}", title),
        content: render_body(),
        tags: vec!["draft".to_string()],
        date: today(),
        read_time: "5 min".to_string(),
        author: author.to_string(),
        likes: 0,
        thumbnail_path: None,
    }
}

pub fn post_cmd(args: PostArgs) -> Result<()> {
    let author = get_author(&args);
    let blogs_file = PathBuf::from(&args.data_dir).join(BLOGS_FILE);

    let mut blogs: Collection<Post> = Collection::open(blogs_file.clone())
        .with_context(|| format!("Error opening {}", blogs_file.display()))?;
    let post = blogs.insert(draft_post(&args.title, &author))?;

    println!("Created post {} [{}] by {} in {}", post.id, post.title, post.author, blogs_file.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use folio::markup::{render, ContentBlock};

    use super::*;

    #[test]
    fn test_draft_body_renders() {
        let post = draft_post("Hello", "Jane");
        let blocks: Vec<_> = render(&post.content).collect();
        assert_eq!(blocks[0], ContentBlock::Heading2("Introduction".to_string()));
        assert!(blocks.iter().any(|b| b.is_list_item()));
        assert_eq!(blocks.len(), post.content.lines().count());
    }

    #[test]
    fn test_post_cmd_appends() {
        let data_dir = tempfile::tempdir().unwrap();
        let args = |title: &str| PostArgs {
            title: title.to_string(),
            author: Some("Jane".to_string()),
            data_dir: data_dir.path().to_string_lossy().to_string(),
        };
        post_cmd(args("First")).unwrap();
        post_cmd(args("Second")).unwrap();

        let blogs: Collection<Post> = Collection::open(data_dir.path().join(BLOGS_FILE)).unwrap();
        let titles: Vec<_> = blogs.all().iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["First", "Second"]);
        assert_eq!(blogs.all()[1].id, 2);
    }
}
