use crate::domain::reward::RewardSummary;
use crate::error::Result;
use std::io::Write;

/// Writes reward summaries as pretty-printed JSON.
pub struct SummaryWriter<W: Write> {
    writer: W,
}

impl<W: Write> SummaryWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_summary(&mut self, summary: &RewardSummary) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, summary)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }

    pub fn write_summaries(&mut self, summaries: &[RewardSummary]) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, summaries)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
