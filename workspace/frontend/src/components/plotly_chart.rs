use std::cell::RefCell;
use std::rc::Rc;

use common::ChartConfig;
use compute::presenter::REDRAW_DELAY;
use gloo_timers::callback::Timeout;
use web_sys::HtmlElement;
use yew::prelude::*;

use crate::plot;

#[derive(Properties, PartialEq)]
pub struct PlotlyChartProps {
    pub config: ChartConfig,
    pub element_id: AttrValue,
}

#[function_component(PlotlyChart)]
pub fn plotly_chart(props: &PlotlyChartProps) -> Html {
    let container_ref = use_node_ref();
    let redraw_timer: Rc<RefCell<Option<Timeout>>> = use_mut_ref(|| None);

    use_effect_with(
        (container_ref.clone(), props.config.clone(), props.element_id.clone()),
        move |(container_ref, config, element_id)| {
            if let Some(element) = container_ref.cast::<HtmlElement>() {
                element.set_id(element_id);

                match plot::render(element_id, config) {
                    Ok(()) => {
                        // Plotly sizes the chart before the card settles, redraw once afterwards
                        let div_id = element_id.to_string();
                        *redraw_timer.borrow_mut() = Some(Timeout::new(
                            REDRAW_DELAY.as_millis() as u32,
                            move || plot::redraw_chart(&div_id),
                        ));
                    }
                    Err(e) => log::error!("Failed to render #{}: {}", element_id, e),
                }
            }

            move || {
                // Dropping the handle clears a redraw that has not fired yet
                redraw_timer.borrow_mut().take();
            }
        },
    );

    html! {
        <div
            ref={container_ref}
            style={format!("width:100%; height:{}px;", props.config.chart.height)}
        ></div>
    }
}
