use crate::core::cache::SetCache;
use crate::core::report;
use crate::core::scoring::ScoringPipeline;
use crate::domain::ports::{CatalogClient, Storage};
use crate::utils::error::Result;
use std::io::Write;

/// Cache → scoring → report, for one command invocation.
pub struct MtgaEngine<C: CatalogClient, S: Storage> {
    cache: SetCache<C, S>,
    scoring: ScoringPipeline,
    report_threshold: u32,
}

impl<C: CatalogClient, S: Storage> MtgaEngine<C, S> {
    pub fn new(cache: SetCache<C, S>, scoring: ScoringPipeline, report_threshold: u32) -> Self {
        Self {
            cache,
            scoring,
            report_threshold,
        }
    }

    /// Scores the set and writes the cards above the report threshold.
    /// Returns how many cards were reported.
    pub async fn analyse<W: Write>(&self, set_code: &str, refresh: bool, out: &mut W) -> Result<usize> {
        tracing::info!("Analysing set {}", set_code);

        let mut set = self.cache.get_set(set_code, refresh).await?;
        self.scoring.run(&mut set)?;

        let reported = report::render_analysis(&set.cards, self.report_threshold, out)?;
        tracing::info!(
            "{} of {} cards in {} scored above {}",
            reported,
            set.len(),
            set_code,
            self.report_threshold
        );
        Ok(reported)
    }

    pub async fn list_sets<W: Write>(&self, refresh: bool, out: &mut W) -> Result<usize> {
        let sets = self.cache.get_sets(refresh).await?;
        report::render_sets(&sets, out)
    }

    /// Raw card listing, no scoring.
    pub async fn show_set<W: Write>(&self, set_code: &str, refresh: bool, out: &mut W) -> Result<usize> {
        let set = self.cache.get_set(set_code, refresh).await?;
        report::render_set(&set.cards, out)
    }
}
