use common::WidgetKind;
use compute::pipeline::load_widget;
use compute::presenter::{MountGuard, WidgetState};
use yew::prelude::*;

use crate::api_client::HttpChartApi;
use crate::storage;

/// Loads the chart behind `kind` once when the calling component mounts.
///
/// The returned state starts at [`WidgetState::Loading`] and settles once.
/// A load that finishes after the component unmounted is discarded.
#[hook]
pub fn use_chart_widget(kind: WidgetKind) -> UseStateHandle<WidgetState> {
    let state = use_state(|| WidgetState::Loading);

    {
        let state = state.clone();
        use_effect_with(kind, move |kind| {
            let kind = *kind;
            let guard = MountGuard::new();
            let task_guard = guard.clone();

            log::debug!("Loading chart for {:?}", kind);
            wasm_bindgen_futures::spawn_local(async move {
                let api = HttpChartApi::from_settings();
                let cache = storage::generation_cache();
                let outcome = load_widget(kind, &api, &*cache).await;

                if task_guard.is_mounted() {
                    state.set(WidgetState::from_outcome(kind, outcome));
                } else {
                    log::debug!("Discarding chart for unmounted {:?} widget", kind);
                }
            });

            move || guard.unmount()
        });
    }

    state
}
