// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2024 Jonathan Lee
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License version 3
// as published by the Free Software Foundation.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see https://www.gnu.org/licenses/.

pub mod density;
pub mod dispatch;
pub mod distribution;
pub mod error;
pub mod group;
pub mod profile;
pub mod series;
pub mod value;
pub mod venn;

pub use density::DensityMatrix;
pub use dispatch::chart_data;
pub use distribution::FiveNumberSummary;
pub use error::{ChartDataError, ConfigError, Result, SerialisationError};
pub use profile::{
    ColumnKind, ColumnStats, DatasetSummary, NumericSummary, Profiler, ProfilerConfig,
};
pub use series::{Aggregation, ChartConfig, ChartKind, OutputRecord};
pub use value::{Row, Value};

/// Convenience facade bundling the profiler and the dispatcher behind
/// one handle, with a memoised series cache for UI hosts that re-render
/// on every state change.
///
/// The cache key is `(rows_version, config)` by structural equality -
/// callers bump `rows_version` whenever the dataset changes. Reference
/// identity plays no part.
#[derive(Debug, Default)]
pub struct ChartDataSystem {
    profiler: Profiler,
    cache: Option<CachedSeries>,
}

#[derive(Debug)]
struct CachedSeries {
    rows_version: u64,
    config: ChartConfig,
    records: Vec<OutputRecord>,
}

impl ChartDataSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ProfilerConfig) -> Result<Self> {
        config.validate().map_err(ChartDataError::Config)?;
        Ok(Self {
            profiler: Profiler::with_config(config),
            cache: None,
        })
    }

    pub fn profile(&self, rows: &[Row], headers: &[String]) -> Vec<ColumnStats> {
        self.profiler.profile_dataset(rows, headers)
    }

    pub fn summary(&self, profiles: &[ColumnStats]) -> DatasetSummary {
        self.profiler.dataset_summary(profiles)
    }

    pub fn chart_data(&self, rows: &[Row], config: &ChartConfig) -> Vec<OutputRecord> {
        dispatch::chart_data(rows, config)
    }

    /// Dispatches with memoisation: if `rows_version` and `config` both
    /// equal the previous call's, the cached records are returned
    /// without recomputation. The engine itself is pure, so a hit is
    /// indistinguishable from a recompute.
    pub fn chart_data_cached(
        &mut self,
        rows_version: u64,
        rows: &[Row],
        config: &ChartConfig,
    ) -> &[OutputRecord] {
        let hit = self
            .cache
            .as_ref()
            .is_some_and(|c| c.rows_version == rows_version && c.config == *config);
        if !hit {
            self.cache = Some(CachedSeries {
                rows_version,
                config: config.clone(),
                records: dispatch::chart_data(rows, config),
            });
        }
        match &self.cache {
            Some(cached) => &cached.records,
            None => &[],
        }
    }

    pub fn export_stats_json(&self, profiles: &[ColumnStats]) -> Result<String> {
        serde_json::to_string_pretty(profiles)
            .map_err(|e| ChartDataError::Serialisation(e.into()))
    }

    pub fn export_records_json(&self, records: &[OutputRecord]) -> Result<String> {
        serde_json::to_string_pretty(records)
            .map_err(|e| ChartDataError::Serialisation(e.into()))
    }
}
