//! End-of-run summary.

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use uw_cards_sync::{LocaleOutcome, LocaleReport};

/// Print one block per locale. Returns the number of failed locales.
pub(crate) fn print_summary(outcomes: &[LocaleOutcome]) -> usize {
    let mut failed = 0;

    println!();
    for outcome in outcomes {
        match &outcome.result {
            Ok(report) => print_report(report),
            Err(e) => {
                failed += 1;
                log::error!(
                    "{} {}: {}",
                    "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                    outcome.locale.if_supports_color(Stdout, |t| t.bold()),
                    e,
                );
            }
        }
    }
    failed
}

fn print_report(report: &LocaleReport) {
    log::info!(
        "{} {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        report.locale.if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Upstream cards:   {:>6}", report.upstream);
    log::info!("  Merged:           {:>6}", report.merged);
    log::info!("  Missing:          {:>6}", report.missing);
    if report.name_mismatches > 0 {
        log::info!("  Names corrected:  {:>6}", report.name_mismatches);
    }
    if report.conflicts > 0 {
        log::info!(
            "  Conflicts kept:   {:>6}",
            report.conflicts.if_supports_color(Stdout, |t| t.yellow())
        );
    }
    if let Some(images) = &report.images {
        log::info!(
            "  Images:           {:>6} new, {} cached",
            images.downloaded,
            images.cached
        );
        if images.failed + images.skipped > 0 {
            log::info!(
                "  Images missing:   {:>6}",
                (images.failed + images.skipped).if_supports_color(Stdout, |t| t.yellow())
            );
        }
    }
    log::info!("  Wrote {}", report.paths.merged.display());
    log::info!("  Wrote {}", report.paths.missing.display());
}
