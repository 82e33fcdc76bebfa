use anyhow::{Context, Result};
use clap::{Arg, Command};
use std::fs;

use doctree::renderer::MarkdownRenderer;
use doctree::xref::{LinkResolver, NullResolver, TableResolver};
use doctree::DocNode;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let matches = Command::new("doctree")
        .about("Render a documentation tree to text markup")
        .arg(
            Arg::new("input")
                .help("Input JSON file holding a document tree")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("links")
                .long("links")
                .help("JSON table mapping cross-reference keys to link targets"),
        )
        .get_matches();

    let input_file = matches.get_one::<String>("input").unwrap();
    let json_content =
        fs::read_to_string(input_file).with_context(|| format!("cannot read {input_file}"))?;
    let tree: DocNode =
        serde_json::from_str(&json_content).context("input is not a document tree")?;

    let resolver: Box<dyn LinkResolver> = match matches.get_one::<String>("links") {
        Some(path) => {
            let text = fs::read_to_string(path).with_context(|| format!("cannot read {path}"))?;
            Box::new(TableResolver::from_json(&text)?)
        }
        None => Box::new(NullResolver),
    };

    let renderer = MarkdownRenderer::new(resolver.as_ref());
    let output = renderer.render(&tree)?;

    println!("{}", output);

    Ok(())
}
