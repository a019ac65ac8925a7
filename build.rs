//! Build script to generate embedded word lists
//!
//! Reads the curated seed lists and generates Rust source code with const arrays.

use std::env;
use std::fs;
use std::io::Write;
use std::path::Path;

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();

    // Common words used when no word-list asset can be loaded
    generate_word_list(
        "data/common.txt",
        &Path::new(&out_dir).join("common.rs"),
        "COMMON",
        "Curated common 5-letter words (offline seed)",
    );

    // Words rejected regardless of what the filter or providers say
    generate_word_list(
        "data/exclusions.txt",
        &Path::new(&out_dir).join("exclusions.rs"),
        "EXCLUSIONS",
        "Curated exclusions (never accepted)",
    );

    println!("cargo:rerun-if-changed=data/common.txt");
    println!("cargo:rerun-if-changed=data/exclusions.txt");
}

fn generate_word_list(input_path: &str, output_path: &Path, const_name: &str, doc_comment: &str) {
    let content = fs::read_to_string(input_path)
        .unwrap_or_else(|e| panic!("Failed to read {input_path}: {e}"));

    let words: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect();
    let count = words.len();

    let mut output = fs::File::create(output_path)
        .unwrap_or_else(|e| panic!("Failed to create {}: {e}", output_path.display()));

    writeln!(output, "// Generated word list").unwrap();
    writeln!(output, "//").unwrap();
    writeln!(output, "// {doc_comment}").unwrap();
    writeln!(output).unwrap();
    writeln!(output, "/// {doc_comment}").unwrap();
    writeln!(output, "pub const {const_name}: &[&str] = &[").unwrap();

    for word in words {
        writeln!(output, "    \"{word}\",").unwrap();
    }

    writeln!(output, "];").unwrap();
    writeln!(output).unwrap();
    writeln!(output, "/// Number of words in {const_name}").unwrap();
    writeln!(output, "pub const {const_name}_COUNT: usize = {count};").unwrap();
}
