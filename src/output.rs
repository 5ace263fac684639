//! Printing the run summary

use std::io::{self, Write};

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::runner::RunSummary;

/// Options for the text summary.
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryConfig {
    pub use_color: bool,
    /// Print one line per modified file, and a conflict count, before the total
    pub list_files: bool,
}

/// Print the summary to stdout.
pub fn print_summary(summary: &RunSummary, config: SummaryConfig) -> io::Result<()> {
    let choice = if config.use_color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(choice);
    write_summary(&mut stdout, summary, config)
}

/// Write the summary to any colour-capable writer.
pub fn write_summary<W: WriteColor>(
    out: &mut W,
    summary: &RunSummary,
    config: SummaryConfig,
) -> io::Result<()> {
    let verb = if summary.dry_run {
        "Would update"
    } else {
        "Updated"
    };

    if config.list_files {
        let mut path_color = ColorSpec::new();
        path_color.set_fg(Some(Color::Cyan));

        for file in &summary.modified {
            write!(out, "{} ", verb)?;
            out.set_color(&path_color)?;
            write!(out, "{}", file.path.display())?;
            out.reset()?;
            writeln!(out, " ({})", file.moved.join(", "))?;
        }
    }

    if config.list_files && !summary.conflicts.is_empty() {
        let mut warn_color = ColorSpec::new();
        warn_color.set_fg(Some(Color::Yellow));
        out.set_color(&warn_color)?;
        writeln!(
            out,
            "Left {} conflicting import{} in place.",
            summary.conflicts.len(),
            plural(summary.conflicts.len())
        )?;
        out.reset()?;
    }

    let mut bold = ColorSpec::new();
    bold.set_bold(true);
    write!(out, "{} ", verb)?;
    out.set_color(&bold)?;
    write!(out, "{}", summary.modified_count())?;
    out.reset()?;
    writeln!(out, " file{}.", plural(summary.modified_count()))?;

    Ok(())
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Print the summary as JSON.
pub fn print_summary_json(summary: &RunSummary) -> io::Result<()> {
    let json = serde_json::to_string_pretty(summary).map_err(io::Error::other)?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relocate::Conflict;
    use crate::runner::{FileConflict, ModifiedFile};
    use std::path::PathBuf;
    use termcolor::NoColor;

    fn render(summary: &RunSummary, config: SummaryConfig) -> String {
        let mut out = NoColor::new(Vec::new());
        write_summary(&mut out, summary, config).unwrap();
        String::from_utf8(out.into_inner()).unwrap()
    }

    fn sample() -> RunSummary {
        RunSummary {
            dry_run: false,
            scanned: 4,
            modified: vec![
                ModifiedFile {
                    path: PathBuf::from("app/cart/page.tsx"),
                    moved: vec!["Product".into(), "CartItem".into()],
                },
                ModifiedFile {
                    path: PathBuf::from("components/OrderRow.tsx"),
                    moved: vec!["Order".into()],
                },
            ],
            conflicts: Vec::new(),
        }
    }

    #[test]
    fn test_single_summary_line() {
        assert_eq!(render(&sample(), SummaryConfig::default()), "Updated 2 files.\n");
    }

    #[test]
    fn test_singular_and_zero() {
        let mut summary = sample();
        summary.modified.truncate(1);
        assert_eq!(render(&summary, SummaryConfig::default()), "Updated 1 file.\n");
        summary.modified.clear();
        assert_eq!(render(&summary, SummaryConfig::default()), "Updated 0 files.\n");
    }

    #[test]
    fn test_listing_in_dry_run() {
        let mut summary = sample();
        summary.dry_run = true;
        let config = SummaryConfig {
            list_files: true,
            ..Default::default()
        };
        let text = render(&summary, config);
        assert!(text.contains("Would update app/cart/page.tsx (Product, CartItem)\n"));
        assert!(text.ends_with("Would update 2 files.\n"));
    }

    #[test]
    fn test_conflict_line_only_when_listing() {
        let mut summary = sample();
        summary.conflicts.push(FileConflict {
            path: PathBuf::from("app/profile.tsx"),
            conflict: Conflict {
                type_name: "User".into(),
                source_module: "@/utils/userStorage".into(),
                other_module: "next-auth".into(),
            },
        });
        assert_eq!(render(&summary, SummaryConfig::default()), "Updated 2 files.\n");

        let config = SummaryConfig {
            list_files: true,
            ..Default::default()
        };
        let text = render(&summary, config);
        assert!(text.ends_with("Left 1 conflicting import in place.\nUpdated 2 files.\n"));
    }

    #[test]
    fn test_json_shape() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["scanned"], 4);
        assert_eq!(value["modified"][0]["moved"][1], "CartItem");
        assert!(value.get("conflicts").is_none());
    }
}
