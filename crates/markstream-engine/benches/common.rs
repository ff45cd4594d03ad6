// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_markdown_content(size: usize) -> String {
    let base = "# Title\n## Section\nParagraph with **bold**, *italic* and `code` content.\n- Bullet point\n- Another item\n1. First\n> A *quoted* line\n---\nSee [the docs](https://example.com/docs).\n```rust\nfn example() {\n    println!(\"Hello\");\n}\n```\n";
    base.repeat(size)
}

/// Splits content into token-sized pieces, as a streaming reply arrives.
#[allow(dead_code)]
pub fn tokenize(content: &str, chars_per_token: usize) -> Vec<String> {
    let chars: Vec<char> = content.chars().collect();
    chars
        .chunks(chars_per_token)
        .map(|c| c.iter().collect())
        .collect()
}
