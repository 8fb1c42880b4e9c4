use common::WidgetKind;
use compute::presenter::WidgetState;
use yew::prelude::*;

use crate::components::plotly_chart::PlotlyChart;
use crate::hooks::use_chart_widget;
use crate::ui::error::ChartError;
use crate::ui::loading::ChartLoading;

#[derive(Properties, PartialEq)]
pub struct ChartWidgetProps {
    pub kind: WidgetKind,
}

fn show_help(kind: WidgetKind) {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.alert_with_message(kind.help_text()) {
            log::warn!("Failed to show help for {:?}: {:?}", kind, e);
        }
    }
}

/// Card hosting one dashboard chart through its whole lifecycle.
#[function_component(ChartWidget)]
pub fn chart_widget(props: &ChartWidgetProps) -> Html {
    let kind = props.kind;
    let state = use_chart_widget(kind);

    let body = match &*state {
        WidgetState::Loading => html! {
            <ChartLoading text={kind.loading_text()} height={kind.placeholder_height()} />
        },
        WidgetState::Error { message } => html! {
            <ChartError
                message={message.clone()}
                recovery={kind.recovery()}
                height={kind.placeholder_height()}
            />
        },
        WidgetState::Ready { config, from_cache } => {
            log::trace!("Rendering {:?} chart (cached: {})", kind, from_cache);
            html! {
                <>
                    <div class="flex justify-end gap-2 mb-2">
                        {if *from_cache {
                            html! { <span class="badge badge-ghost badge-sm">{"(Datos en caché)"}</span> }
                        } else {
                            html! {}
                        }}
                        <button
                            type="button"
                            class="btn btn-circle btn-xs"
                            title="Ayuda"
                            onclick={Callback::from(move |_| show_help(kind))}
                        >
                            {"?"}
                        </button>
                    </div>
                    <PlotlyChart config={config.clone()} element_id={kind.element_id()} />
                </>
            }
        }
    };

    html! {
        <section class="card bg-base-100 shadow mt-6">
            <div class="card-body">
                {body}
            </div>
        </section>
    }
}
