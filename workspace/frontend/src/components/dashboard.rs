use common::WidgetKind;
use yew::prelude::*;

use crate::components::chart_widget::ChartWidget;

#[function_component(Dashboard)]
pub fn dashboard() -> Html {
    log::trace!("Dashboard component rendering");

    html! {
        <div class="container mx-auto p-4">
            <ChartWidget kind={WidgetKind::DailyGeneration} />
            <ChartWidget kind={WidgetKind::ProjectCapacity} />
        </div>
    }
}
