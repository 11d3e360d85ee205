use anyhow::{bail, Context};
use clap::Args;
use pagestack::{
    merged_file_name_today, LopdfBackend, NoticeLevel, PageCollection, PageId, Source,
};
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

#[derive(Args)]
pub struct MergeArgs {
    /// Input files, extracted in the order given
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output file (defaults to merged-pdf-YYYY-MM-DD.pdf)
    #[arg(long)]
    out: Option<PathBuf>,

    /// Final page order as 1-based positions, e.g. "3,1,2"; every page once
    #[arg(long)]
    order: Option<String>,

    /// Drop these 1-based positions before merging
    #[arg(long, value_delimiter = ',')]
    drop: Vec<usize>,
}

pub fn run(args: MergeArgs) -> anyhow::Result<()> {
    let mut sources = Vec::with_capacity(args.inputs.len());
    for path in &args.inputs {
        let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        sources.push(Source::new(name, bytes));
    }

    let mut collection = PageCollection::new(LopdfBackend::default());
    let report = collection.extract(&sources, |progress| {
        eprint!(
            "\rprocessing pages {}/{} ({:.0}%)",
            progress.done,
            progress.total,
            progress.percent()
        );
    });
    if report.total_pages > 0 {
        eprintln!();
    }
    let notice = report.notice();
    println!("{notice}");
    for failure in &report.failures {
        match failure.page_number {
            Some(page) => println!("  {} page {}: {}", failure.source_name, page, failure.reason),
            None => println!("  {}: {}", failure.source_name, failure.reason),
        }
    }
    if notice.level == NoticeLevel::Error {
        bail!("no pages could be read");
    }

    let ids = collection.ids();
    if let Some(order) = &args.order {
        let order = positions_to_ids(&ids, &parse_positions(order)?)?;
        collection
            .apply_order(&order)
            .context("apply --order")?;
    }
    let dropped = positions_to_ids(&ids, &unique_positions(&args.drop))?;
    for id in dropped {
        let record = collection.remove(id)?;
        println!("dropped {}", record.label());
    }

    let output = match collection.merge() {
        Ok(output) => output,
        Err(err) => {
            println!("{}", err.notice());
            return Err(err.into());
        }
    };
    println!("{}", output.notice());

    let out = args
        .out
        .unwrap_or_else(|| PathBuf::from(merged_file_name_today()));
    fs::write(&out, &output.bytes).with_context(|| format!("write {}", out.display()))?;
    println!("wrote {}", out.display());
    Ok(())
}

fn parse_positions(text: &str) -> anyhow::Result<Vec<usize>> {
    text.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<usize>()
                .with_context(|| format!("invalid page position {part:?}"))
        })
        .collect()
}

/// First occurrence of each position, in the order given.
fn unique_positions(positions: &[usize]) -> Vec<usize> {
    let mut seen = HashSet::new();
    positions
        .iter()
        .copied()
        .filter(|position| seen.insert(*position))
        .collect()
}

/// Positions refer to the order right after extraction.
fn positions_to_ids(ids: &[PageId], positions: &[usize]) -> anyhow::Result<Vec<PageId>> {
    positions
        .iter()
        .map(|&position| {
            if position == 0 || position > ids.len() {
                bail!("page position {position} out of range 1..={}", ids.len());
            }
            Ok(ids[position - 1])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_parse_with_spaces() {
        assert_eq!(parse_positions("3, 1,2").expect("parse"), vec![3, 1, 2]);
        assert!(parse_positions("1,x").is_err());
    }

    #[test]
    fn repeated_drops_remove_a_page_once() {
        assert_eq!(unique_positions(&[2, 2, 1, 2]), vec![2, 1]);
        assert!(unique_positions(&[]).is_empty());
    }

    #[test]
    fn positions_are_one_based() {
        let mut collection = PageCollection::new(LopdfBackend::default());
        collection.extract(&[], |_| {});
        assert!(positions_to_ids(&collection.ids(), &[1]).is_err());
        assert!(positions_to_ids(&[], &[]).expect("empty").is_empty());
    }
}
