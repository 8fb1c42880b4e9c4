use common::Recovery;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ChartErrorProps {
    pub message: AttrValue,
    #[prop_or(Recovery::None)]
    pub recovery: Recovery,
    #[prop_or(350)]
    pub height: u32,
}

fn reload_page() {
    log::debug!("User requested page reload");
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.location().reload() {
            log::error!("Failed to reload page: {:?}", e);
        }
    }
}

#[function_component(ChartError)]
pub fn chart_error(props: &ChartErrorProps) -> Html {
    log::warn!("Displaying chart error to user: {}", props.message);

    html! {
        <div
            class="flex flex-col items-center justify-center gap-4"
            style={format!("min-height:{}px;", props.height)}
        >
            <div class="alert alert-error max-w-lg">
                <i class="fas fa-exclamation-circle text-2xl"></i>
                <span class="text-sm">{&props.message}</span>
            </div>
            {match props.recovery {
                Recovery::ReloadPage => html! {
                    <button
                        class="btn btn-primary btn-sm"
                        onclick={Callback::from(|_| reload_page())}
                    >
                        <i class="fas fa-redo"></i>
                        {" Reintentar"}
                    </button>
                },
                Recovery::None => html! {},
            }}
        </div>
    }
}
