//! Fetch → transform → cache pipelines for the two widgets.

use std::cell::RefCell;

use async_trait::async_trait;
use common::{ChartConfig, GenerationRecord, ProjectRecord, WidgetKind, GENERATION_CACHE_KEY};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::cache::{ChartCache, Clock, DurableStorage, SystemClock};
use crate::error::FetchError;
use crate::transform::{build_capacity_chart, build_generation_chart};

/// Transport used to reach the chart backend.
///
/// Futures are not required to be `Send` so browser fetch implementations
/// fit the same trait.
#[async_trait(?Send)]
pub trait ChartApi {
    /// Sends a body-less `POST` to `endpoint` and returns the decoded JSON
    /// body of a 2xx response.
    async fn post_json(&self, endpoint: &str) -> Result<Value, FetchError>;
}

/// Cache holding the generation chart configuration.
pub type GenerationCache<S, C = SystemClock> = ChartCache<ChartConfig, S, C>;

/// A chart configuration ready to render.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedChart {
    pub config: ChartConfig,
    /// Served from the cache without touching the network.
    pub from_cache: bool,
}

/// Fetches `endpoint` and decodes the body as an array of records.
///
/// A body that is not a JSON array fails with [`FetchError::NotAnArray`].
pub async fn fetch_records<T, A>(api: &A, endpoint: &str) -> Result<Vec<T>, FetchError>
where
    T: DeserializeOwned,
    A: ChartApi + ?Sized,
{
    let body = api.post_json(endpoint).await?;
    if !body.is_array() {
        warn!(endpoint, "Chart endpoint did not return an array");
        return Err(FetchError::NotAnArray);
    }

    let records: Vec<T> =
        serde_json::from_value(body).map_err(|e| FetchError::InvalidRecords(e.to_string()))?;
    debug!(endpoint, count = records.len(), "Fetched chart records");
    Ok(records)
}

/// Loads the daily generation chart, consulting `cache` first.
///
/// A fresh configuration is written back to the cache. A cache write that
/// fails even after eviction is logged and otherwise ignored.
#[instrument(skip_all)]
pub async fn load_generation_chart<A, S, C>(
    api: &A,
    cache: &RefCell<GenerationCache<S, C>>,
) -> Result<LoadedChart, FetchError>
where
    A: ChartApi + ?Sized,
    S: DurableStorage,
    C: Clock,
{
    let cached = cache.borrow_mut().get(GENERATION_CACHE_KEY);
    if let Some(config) = cached {
        info!("Daily generation chart served from cache");
        return Ok(LoadedChart {
            config,
            from_cache: true,
        });
    }

    let records: Vec<GenerationRecord> =
        fetch_records(api, WidgetKind::DailyGeneration.endpoint()).await?;
    let config = build_generation_chart(&records);

    if let Err(err) = cache
        .borrow_mut()
        .set(GENERATION_CACHE_KEY, config.clone())
    {
        warn!(%err, "Could not persist daily generation chart");
    }

    info!(categories = config.categories().len(), "Daily generation chart loaded");
    Ok(LoadedChart {
        config,
        from_cache: false,
    })
}

/// Loads the capacity chart. This widget is never cached.
#[instrument(skip_all)]
pub async fn load_capacity_chart<A>(api: &A) -> Result<LoadedChart, FetchError>
where
    A: ChartApi + ?Sized,
{
    let records: Vec<ProjectRecord> =
        fetch_records(api, WidgetKind::ProjectCapacity.endpoint()).await?;
    let config = build_capacity_chart(&records);

    info!(sources = config.categories().len(), "Capacity chart loaded");
    Ok(LoadedChart {
        config,
        from_cache: false,
    })
}

/// Runs the pipeline belonging to `kind`.
pub async fn load_widget<A, S, C>(
    kind: WidgetKind,
    api: &A,
    cache: &RefCell<GenerationCache<S, C>>,
) -> Result<LoadedChart, FetchError>
where
    A: ChartApi + ?Sized,
    S: DurableStorage,
    C: Clock,
{
    match kind {
        WidgetKind::DailyGeneration => load_generation_chart(api, cache).await,
        WidgetKind::ProjectCapacity => load_capacity_chart(api).await,
    }
}
