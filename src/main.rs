//! rforge – command-line résumé exporter.
//!
//! Usage:
//!   rforge <resume.json> [output] [--theme ID] [--title "My Resume"] [--save-theme]
//!
//! The input is a saved résumé snapshot. The output format follows the
//! output extension: `.pdf` (default), `.html`, or `.docx`. If the output
//! path is omitted the PDF is written next to the input with the same stem.

use std::{env, fs, path::PathBuf, process};

use resume_forge::docx::export_docx;
use resume_forge::pipeline::{export_html, export_pdf, ExportConfig};
use resume_forge::storage::{save_or_warn, FileStore, SnapshotStore};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut input_path: Option<PathBuf> = None;
    let mut output_path: Option<PathBuf> = None;
    let mut theme: Option<String> = None;
    let mut title: Option<String> = None;
    let mut save_theme = false;
    let mut positional = 0usize;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--theme" => match iter.next() {
                Some(v) => theme = Some(v.clone()),
                None => {
                    eprintln!("--theme requires a value (corporate | modern | academic)");
                    process::exit(1);
                }
            },
            "--title" | "-t" => match iter.next() {
                Some(v) => title = Some(v.clone()),
                None => {
                    eprintln!("--title requires a value");
                    process::exit(1);
                }
            },
            "--save-theme" => save_theme = true,
            "--help" | "-h" => {
                print_usage(&args[0]);
                process::exit(0);
            }
            other if other.starts_with('-') => {
                eprintln!("Unknown flag: {other}");
                print_usage(&args[0]);
                process::exit(1);
            }
            path => {
                if positional == 0 {
                    input_path = Some(PathBuf::from(path));
                } else if positional == 1 {
                    output_path = Some(PathBuf::from(path));
                } else {
                    eprintln!("Unexpected argument: {path}");
                    print_usage(&args[0]);
                    process::exit(1);
                }
                positional += 1;
            }
        }
    }

    let input = match input_path {
        Some(p) => p,
        None => {
            eprintln!("Error: no input snapshot specified.");
            print_usage(&args[0]);
            process::exit(1);
        }
    };

    let output = output_path.unwrap_or_else(|| {
        let mut o = input.clone();
        o.set_extension("pdf");
        o
    });

    let store = FileStore::new(&input);
    let mut snapshot = match store.load() {
        Ok(Some(s)) => s,
        Ok(None) => {
            eprintln!("Error: no snapshot found at '{}'", input.display());
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    // A theme override is a mutation: persist it (when asked) before
    // rendering, so the render always reflects the saved state.
    if let Some(theme) = &theme {
        snapshot.selected_theme = resume_forge::model::ThemeId::from_str(theme);
        if save_theme {
            save_or_warn(&store, &snapshot);
        }
    }

    let doc = snapshot.document();
    let theme_id = snapshot.selected_theme.as_str();

    let extension = output
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("pdf")
        .to_ascii_lowercase();

    let result: Result<(Vec<u8>, String), String> = match extension.as_str() {
        "pdf" => {
            let config = ExportConfig {
                title: title.unwrap_or_default(),
                ..ExportConfig::default()
            };
            export_pdf(&doc, theme_id, &config).map(|(bytes, layout)| {
                let pages = layout.pages.len();
                (
                    bytes,
                    format!("{} page{}", pages, if pages == 1 { "" } else { "s" }),
                )
            })
        }
        "html" => Ok((
            export_html(&doc, theme_id).into_bytes(),
            format!("{theme_id} theme"),
        )),
        "docx" => export_docx(&doc).map(|bytes| (bytes, "word document".to_string())),
        other => Err(format!(
            "unsupported output extension '.{other}' (expected .pdf, .html, or .docx)"
        )),
    };

    match result {
        Ok((bytes, detail)) => {
            if let Some(parent) = output.parent() {
                if !parent.as_os_str().is_empty() {
                    if let Err(e) = fs::create_dir_all(parent) {
                        eprintln!("Error creating output directory: {e}");
                        process::exit(1);
                    }
                }
            }
            if let Err(e) = fs::write(&output, &bytes) {
                eprintln!("Error writing '{}': {e}", output.display());
                process::exit(1);
            }
            eprintln!(
                "Wrote '{}' ({} bytes, {detail})",
                output.display(),
                bytes.len()
            );
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

fn print_usage(prog: &str) {
    eprintln!("rforge – résumé exporter (resume-forge)");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {prog} <resume.json> [output] [--theme ID] [--title \"My Resume\"] [--save-theme]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  <resume.json>  Saved résumé snapshot");
    eprintln!("  [output]       Output path; extension selects the format");
    eprintln!("                 (.pdf default, .html, .docx)");
    eprintln!();
    eprintln!("Flags:");
    eprintln!("  --theme        Override the saved theme (corporate | modern | academic;");
    eprintln!("                 anything else renders as corporate)");
    eprintln!("  --save-theme   Persist a --theme override back into the snapshot");
    eprintln!("  --title, -t    PDF metadata title (default: the résumé's name)");
    eprintln!("  --help         Print this message");
}
