use anyhow::{bail, Result};
use common::WidgetKind;
use compute::pipeline::load_widget;
use compute::presenter::{Presenter, WidgetState};
use tracing::{debug, info, trace};

use crate::config::ClientConfig;
use crate::http_client::ReqwestChartApi;

/// Mounts a widget, runs its pipeline once and returns the settled state.
pub async fn load_widget_state(config: &ClientConfig, kind: WidgetKind) -> Result<WidgetState> {
    trace!("Entering load_widget_state for {:?}", kind);
    let api = ReqwestChartApi::new(&config.api_url)?;
    let cache = config.open_cache()?;

    let mut presenter = Presenter::mount(kind);
    let outcome = load_widget(kind, &api, &cache).await;
    presenter.complete(outcome);
    debug!("Widget {:?} settled", kind);

    Ok(presenter.into_state())
}

pub async fn chart(config: &ClientConfig, kind: WidgetKind, pretty: bool) -> Result<()> {
    info!("Loading {:?} chart from {}", kind, config.api_url);

    match load_widget_state(config, kind).await? {
        WidgetState::Ready {
            config: chart,
            from_cache,
        } => {
            if from_cache {
                eprintln!("(Datos en caché)");
            }
            let json = if pretty {
                serde_json::to_string_pretty(&chart)?
            } else {
                serde_json::to_string(&chart)?
            };
            println!("{}", json);
            Ok(())
        }
        WidgetState::Error { message } => bail!(message),
        WidgetState::Loading => bail!("{:?} chart did not finish loading", kind),
    }
}
