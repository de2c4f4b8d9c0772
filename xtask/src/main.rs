//! Build automation tasks for Starfall
//!
//! Usage:
//!   cargo xtask build-web       # Build WASM for web deployment
//!   cargo xtask build-web --dev # Same, with a DEV marker in the page title
//!   cargo xtask package-itch    # Create zip for itch.io upload

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::Command;

const WASM_NAME: &str = "starfall.wasm";
const MQ_JS_BUNDLE: &str = "https://raw.githubusercontent.com/not-fl3/macroquad/v0.4.14/js/mq_js_bundle.js";

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation for Starfall")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build WASM and assemble dist/web
    BuildWeb {
        /// Mark as dev build (adds DEV to the page title)
        #[arg(long)]
        dev: bool,
    },
    /// Create zip file ready for itch.io upload
    PackageItch,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::BuildWeb { dev } => build_web(dev),
        Commands::PackageItch => package_itch(),
    }
}

/// Get the project root directory
fn project_root() -> Result<PathBuf> {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .context("xtask must live one level below the project root")
}

/// Run `program` in `dir`, failing with `what` if it exits non-zero
fn run(what: &str, program: &str, args: &[&str], dir: &Path) -> Result<()> {
    let status = Command::new(program)
        .args(args)
        .current_dir(dir)
        .status()
        .with_context(|| format!("{}: could not launch `{}`", what, program))?;
    anyhow::ensure!(status.success(), "{}: `{}` exited with {}", what, program, status);
    Ok(())
}

/// Fetch `url` into `dest`, treating HTTP errors as failures
fn fetch(url: &str, dest: &Path) -> Result<()> {
    let dest_str = dest.to_str().context("download path is not valid UTF-8")?;
    println!("Fetching {}", url);
    run(
        "download",
        "curl",
        &["--location", "--fail", "--silent", "--show-error", "--output", dest_str, url],
        Path::new("."),
    )
}

/// Mirror `src` into `dst`, skipping dotfiles. Returns the number of files copied.
fn mirror_tree(src: &Path, dst: &Path) -> Result<usize> {
    let mut pending = vec![PathBuf::new()];
    let mut copied = 0;
    while let Some(rel) = pending.pop() {
        std::fs::create_dir_all(dst.join(&rel))?;
        let dir = src.join(&rel);
        for entry in std::fs::read_dir(&dir).with_context(|| format!("listing {}", dir.display()))? {
            let entry = entry?;
            let name = entry.file_name();
            if name.to_string_lossy().starts_with('.') {
                continue;
            }
            let rel_child = rel.join(&name);
            if entry.file_type()?.is_dir() {
                pending.push(rel_child);
            } else {
                std::fs::copy(entry.path(), dst.join(&rel_child))
                    .with_context(|| format!("copying {}", rel_child.display()))?;
                copied += 1;
            }
        }
    }
    Ok(copied)
}

/// Tag the page title so dev deploys are easy to tell apart
fn mark_dev(index: &str) -> String {
    index
        .replace("Loading Starfall", "Loading Starfall (DEV)")
        .replace("<title>Starfall", "<title>[DEV] Starfall")
}

/// Build WASM for web deployment
fn build_web(dev: bool) -> Result<()> {
    let root = project_root()?;
    let dist = root.join("dist/web");

    println!("Building WASM...");
    run(
        "wasm build",
        "cargo",
        &["build", "--release", "--target", "wasm32-unknown-unknown"],
        &root,
    )?;

    // Clean and create dist folder
    if dist.exists() {
        std::fs::remove_dir_all(&dist)?;
    }
    std::fs::create_dir_all(&dist)?;

    println!("Copying files to dist/web...");
    std::fs::copy(
        root.join("target/wasm32-unknown-unknown/release").join(WASM_NAME),
        dist.join(WASM_NAME),
    )
    .context("WASM binary missing after build")?;

    std::fs::copy(root.join("web/index.html"), dist.join("index.html")).context("web/index.html missing")?;

    let mq_js = dist.join("mq_js_bundle.js");
    if !mq_js.exists() {
        fetch(MQ_JS_BUNDLE, &mq_js)?;
    }

    // Config (and any local images) are fetched at runtime relative to the page
    let copied = mirror_tree(&root.join("assets"), &dist.join("assets"))?;
    println!("Copied {} asset files", copied);

    if dev {
        println!("Applying DEV build modifications...");
        let index_path = dist.join("index.html");
        let index = std::fs::read_to_string(&index_path)?;
        std::fs::write(&index_path, mark_dev(&index))?;
    }

    println!("Web build complete: dist/web/");
    Ok(())
}

/// Create zip for itch.io
fn package_itch() -> Result<()> {
    build_web(false)?;

    let root = project_root()?;
    let dist = root.join("dist");
    let zip_path = dist.join("starfall-itch.zip");

    if zip_path.exists() {
        std::fs::remove_file(&zip_path)?;
    }

    println!("Creating itch.io zip...");
    run("itch zip", "zip", &["-r", "../starfall-itch.zip", "."], &dist.join("web"))?;

    println!("itch.io package ready: dist/starfall-itch.zip");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_dev() {
        let page = "<title>Starfall</title><div>Loading Starfall...</div>";
        let marked = mark_dev(page);
        assert!(marked.contains("<title>[DEV] Starfall</title>"));
        assert!(marked.contains("Loading Starfall (DEV)..."));
    }

    #[test]
    fn test_mirror_tree_skips_dotfiles() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(src.path().join("config/nested")).unwrap();
        std::fs::write(src.path().join("config/game.ron"), "()").unwrap();
        std::fs::write(src.path().join("config/nested/star.png"), [1u8, 2, 3]).unwrap();
        std::fs::write(src.path().join(".DS_Store"), "x").unwrap();

        let copied = mirror_tree(src.path(), dst.path()).unwrap();
        assert_eq!(copied, 2);
        assert_eq!(std::fs::read_to_string(dst.path().join("config/game.ron")).unwrap(), "()");
        assert_eq!(std::fs::read(dst.path().join("config/nested/star.png")).unwrap(), vec![1, 2, 3]);
        assert!(!dst.path().join(".DS_Store").exists());
    }

    #[test]
    fn test_run_reports_failure() {
        let dir = tempfile::tempdir().unwrap();
        let err = run("missing tool", "starfall-no-such-binary", &[], dir.path()).unwrap_err();
        assert!(err.to_string().starts_with("missing tool"));
    }

    #[test]
    fn test_project_root_has_manifest() {
        let root = project_root().unwrap();
        assert!(root.join("Cargo.toml").exists());
    }
}
