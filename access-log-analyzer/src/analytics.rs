use chrono::NaiveDate;
use clap::ValueEnum;
use regex::Regex;
use std::{
    collections::{BTreeMap, HashMap, hash_map::Entry},
    sync::LazyLock,
};

use crate::{error::AnalyticsError, invariants::BotName, store::RecordStore};

// Letters immediately followed by "bot": Googlebot, bingbot, AhrefsBot.
static BOT_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z]+(?i:bot)").expect("valid bot name pattern"));

const SHARE_SCALE: f64 = 100_000.0;

/// How a bot name's occurrences are accumulated.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Tally {
    /// Every occurrence counts.
    #[default]
    Corrected,
    /// First sighting counts as zero, so every name ends one short.
    Literal,
}

impl Tally {
    fn first_sight(self) -> usize {
        match self {
            Self::Corrected => 1,
            Self::Literal => 0,
        }
    }
}

/// Read-only queries over a finished [`RecordStore`].
#[derive(Debug, Clone, Copy)]
pub struct Analytics<'a> {
    store: &'a RecordStore,
}

impl<'a> Analytics<'a> {
    pub fn new(store: &'a RecordStore) -> Self {
        Self { store }
    }

    pub fn failure_rate(&self) -> Result<f64, AnalyticsError> {
        let (bots, ok) = self
            .store
            .filter(|r| r.is_bot())
            .fold((0usize, 0usize), |(bots, ok), r| {
                (bots + 1, ok + usize::from(r.status() == 200))
            });
        if bots == 0 {
            return Err(AnalyticsError::DivisionUndefined);
        }
        Ok(ok as f64 / bots as f64)
    }

    pub fn not_found_count(&self) -> usize {
        self.store.filter(|r| r.status() == 404).count()
    }

    pub fn bot_name_counts(&self, tally: Tally) -> Vec<(BotName, usize)> {
        let mut counts: HashMap<BotName, usize> = HashMap::new();
        for record in self.store.filter(|r| r.is_bot()) {
            let Some(found) = BOT_NAME.find(record.user_agent().as_str()) else {
                continue;
            };
            match counts.entry(BotName::from(found.as_str())) {
                Entry::Occupied(mut e) => *e.get_mut() += 1,
                Entry::Vacant(e) => {
                    e.insert(tally.first_sight());
                }
            }
        }
        let mut entries: Vec<_> = counts.into_iter().collect();
        entries.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        entries
    }

    /// Bot name table as numbers. With `normalize`, each count becomes its
    /// share of the total rounded to five places; a zero total gives zero shares.
    pub fn bot_name_frequency(&self, normalize: bool, tally: Tally) -> Vec<(BotName, f64)> {
        let counts = self.bot_name_counts(tally);
        let total: usize = counts.iter().map(|(_, c)| *c).sum();
        let mut entries: Vec<_> = counts
            .into_iter()
            .map(|(name, count)| {
                let value = match (normalize, total) {
                    (false, _) => count as f64,
                    (true, 0) => 0.0,
                    (true, total) => {
                        (count as f64 / total as f64 * SHARE_SCALE).round() / SHARE_SCALE
                    }
                };
                (name, value)
            })
            .collect();
        entries.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        entries
    }

    /// Requests per calendar day in each record's own offset, oldest first.
    pub fn daily_request_counts(&self) -> Vec<(NaiveDate, usize)> {
        let mut by_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
        for record in self.store {
            *by_day.entry(record.timestamp().date_naive()).or_default() += 1;
        }
        by_day.into_iter().collect()
    }
}
