//! Plain text output format.

use std::io::Write;

use crate::{FormatError, Report, ReportFormatter};

/// Text formatter producing one statistic per line.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFormatter;

impl TextFormatter {
    /// Creates a new text formatter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ReportFormatter for TextFormatter {
    fn write_report<W: Write>(&self, report: &Report, mut writer: W) -> Result<(), FormatError> {
        let longest = report.longest();
        let shortest = report.shortest();

        writeln!(writer, "Date range of matches analyzed: {}", report.date_range())?;
        writeln!(writer, "Number of games analyzed: {}", report.total_matches())?;
        writeln!(
            writer,
            "Average game time: {:.2} minutes",
            report.average_duration_minutes()
        )?;
        writeln!(
            writer,
            "Longest game: {:.2} minutes (Match ID: {})",
            longest.minutes(),
            longest.match_id
        )?;
        writeln!(
            writer,
            "Shortest game: {:.2} minutes (Match ID: {})",
            shortest.minutes(),
            shortest.match_id
        )?;
        for summary in report.buckets() {
            writeln!(
                writer,
                "{}: {} ({:.2}%) | Avg kills: {:.2}",
                summary.bucket.label(),
                summary.count,
                summary.percentage,
                summary.average_kills
            )?;
        }
        writeln!(writer, "Average total kills: {:.2}", report.average_total_kills())?;
        writeln!(writer, "Average Radiant kills: {:.2}", report.average_radiant_kills())?;
        writeln!(writer, "Average Dire kills: {:.2}", report.average_dire_kills())?;
        Ok(())
    }

    fn extension(&self) -> &str {
        "txt"
    }
}
