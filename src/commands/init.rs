//! Initialize a new shelf

use anyhow::Result;
use std::fs;
use std::path::Path;

/// Scaffold a shelf in the given directory
pub fn init_shelf(target_dir: &Path) -> Result<()> {
    // Create directory structure
    fs::create_dir_all(target_dir)?;
    fs::create_dir_all(target_dir.join("content/posts"))?;
    fs::create_dir_all(target_dir.join("content/projects"))?;

    // Create default shelf.yml
    let config_content = r#"# mdshelf Configuration

# Directory
content_dir: content

# Writing
new_post_name: :title.mdx
default_category: tech
preview_drafts: false

# Reading time
words_per_minute: 200

# Code highlighting
highlight:
  theme: base16-ocean.dark
  line_number: true
"#;

    fs::write(target_dir.join("shelf.yml"), config_content)?;

    // Create a sample post
    let now = chrono::Local::now();
    let sample_post = format!(
        r#"---
title: Hello World
description: Your very first post, safe to delete.
date: {}
category: tech
tags:
  - meta
---

Welcome to your shelf! This is your very first post.

## Quick Start

### Create a new post

```bash
$ mdshelf new "My New Post"
```

### Check your content against the schemas

```bash
$ mdshelf validate
```

### List published posts

```bash
$ mdshelf list post
```

### Watch for changes

```bash
$ mdshelf watch
```
"#,
        now.format("%Y-%m-%d %H:%M:%S")
    );

    fs::write(target_dir.join("content/posts/hello-world.mdx"), sample_post)?;

    Ok(())
}
