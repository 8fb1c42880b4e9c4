use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ChartLoadingProps {
    pub text: AttrValue,
    #[prop_or(350)]
    pub height: u32,
}

/// Placeholder shown while a chart is being fetched.
#[function_component(ChartLoading)]
pub fn chart_loading(props: &ChartLoadingProps) -> Html {
    html! {
        <div
            class="flex flex-col justify-center items-center gap-4"
            style={format!("min-height:{}px;", props.height)}
        >
            <span class="loading loading-dots loading-lg"></span>
            <p class="text-sm text-gray-500">{&props.text}</p>
        </div>
    }
}
