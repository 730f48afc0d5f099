/// Floating visited-cases panel

use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Event, Node};
use yew::prelude::*;

use crate::browser::{self, EventListener};
use crate::record::VisitedPageRecord;
use crate::ui::components::{PageRow, PanelHeader, ToggleButton};
use crate::widget::Widget;

#[derive(Properties, Clone)]
pub struct VisitedPanelProps {
    pub widget: Rc<Widget>,
}

impl PartialEq for VisitedPanelProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.widget, &other.widget)
    }
}

#[function_component(VisitedPanel)]
pub fn visited_panel(props: &VisitedPanelProps) -> Html {
    let force_update = use_force_update();
    let toggle_ref = use_node_ref();
    let panel_ref = use_node_ref();

    // Let the widget trigger re-renders while mounted
    {
        let widget = props.widget.clone();
        use_effect_with((), move |_| {
            widget.set_render_hook(Some(Callback::from(move |_| force_update.force_update())));
            move || widget.set_render_hook(None)
        });
    }

    // Close on clicks outside the toggle and panel; registered once per mount
    {
        let widget = props.widget.clone();
        let toggle_ref = toggle_ref.clone();
        let panel_ref = panel_ref.clone();
        use_effect_with((), move |_| {
            let listener = browser::window()
                .ok()
                .and_then(|window| window.document())
                .and_then(|document| {
                    EventListener::new(&document, "click", move |event: Event| {
                        let Some(target) = event.target().and_then(|t| t.dyn_into::<Node>().ok()) else {
                            return;
                        };
                        // detached by a re-render during this click
                        if !target.is_connected() {
                            return;
                        }
                        let inside = [&toggle_ref, &panel_ref]
                            .iter()
                            .filter_map(|node_ref| node_ref.get())
                            .any(|node| node.contains(Some(&target)));
                        if !inside {
                            widget.close_panel();
                        }
                    })
                    .map_err(|e| log::warn!("outside click listener not installed: {}", e))
                    .ok()
                });
            move || drop(listener)
        });
    }

    let on_toggle = {
        let widget = props.widget.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            widget.toggle_panel();
        })
    };

    let on_clear = {
        let widget = props.widget.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            widget.clear_all();
        })
    };

    let on_open = {
        let widget = props.widget.clone();
        Callback::from(move |record: VisitedPageRecord| widget.open_page(&record))
    };

    let on_remove = {
        let widget = props.widget.clone();
        Callback::from(move |record: VisitedPageRecord| {
            widget.remove_page(&record);
        })
    };

    let pages = props.widget.panel_pages();
    if pages.is_empty() {
        return html! {};
    }

    let current_url = props.widget.current_url();
    let panel_style = format!(
        "position: fixed; bottom: 90px; right: 20px; width: 350px; max-height: 400px; \
         background: #fff; color: #000; border: 1px solid #ccc; border-radius: 8px; \
         box-shadow: 0 4px 16px rgba(0,0,0,0.2); overflow-y: auto; display: {}; z-index: 1000; \
         padding: 10px;",
        if props.widget.is_open() { "block" } else { "none" }
    );

    html! {
        <>
            <ToggleButton node_ref={toggle_ref} onclick={on_toggle} />
            <div ref={panel_ref} style={panel_style}>
                <PanelHeader title={props.widget.config().panel_title.clone()} on_clear={on_clear} />
                {for pages.into_iter().map(|record| {
                    let is_current = record.url == current_url;
                    let key = record.id.clone();
                    html! {
                        <PageRow
                            key={key}
                            record={record}
                            is_current={is_current}
                            on_open={on_open.clone()}
                            on_remove={on_remove.clone()}
                        />
                    }
                })}
            </div>
        </>
    }
}
