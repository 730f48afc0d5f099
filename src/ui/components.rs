/// Building blocks of the floating panel.
///
/// The widget is injected into pages it does not control, so every element
/// carries inline styles instead of relying on a stylesheet.

use yew::prelude::*;

use crate::record::VisitedPageRecord;

pub const ACCENT: &str = "#007BFF";
pub const DANGER: &str = "#dc3545";
pub const CURRENT_ROW: &str = "#e0f7fa";

#[derive(Properties, PartialEq)]
pub struct ToggleButtonProps {
    pub onclick: Callback<MouseEvent>,
    pub node_ref: NodeRef,
}

/// Round floating button in the bottom-right corner
#[function_component(ToggleButton)]
pub fn toggle_button(props: &ToggleButtonProps) -> Html {
    let style = format!(
        "position: fixed; bottom: 20px; right: 20px; width: 60px; height: 60px; \
         background: {}; color: #fff; border-radius: 50%; display: flex; align-items: center; \
         justify-content: center; cursor: pointer; box-shadow: 0 4px 8px rgba(0,0,0,0.2); \
         z-index: 1000; font-size: 24px;",
        ACCENT
    );

    html! {
        <div ref={props.node_ref.clone()} style={style} onclick={props.onclick.clone()} title="Visited cases">
            {"📂"}
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct PanelHeaderProps {
    pub title: AttrValue,
    pub on_clear: Callback<MouseEvent>,
}

#[function_component(PanelHeader)]
pub fn panel_header(props: &PanelHeaderProps) -> Html {
    let clear_style = format!(
        "background: {}; color: #fff; border: none; border-radius: 4px; padding: 5px 10px; \
         cursor: pointer; font-size: 14px;",
        DANGER
    );

    html! {
        <div style="display: flex; justify-content: space-between; align-items: center; margin-bottom: 10px;">
            <span style="font-weight: bold; font-size: 16px;">{props.title.to_string()}</span>
            <button style={clear_style} onclick={props.on_clear.clone()} title="Clear all visited cases">{"Clear All"}</button>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct PageRowProps {
    pub record: VisitedPageRecord,
    pub is_current: bool,
    pub on_open: Callback<VisitedPageRecord>,
    pub on_remove: Callback<VisitedPageRecord>,
}

/// One visited page: a link that navigates client-side and a remove button
#[function_component(PageRow)]
pub fn page_row(props: &PageRowProps) -> Html {
    let on_link_click = {
        let record = props.record.clone();
        let on_open = props.on_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            e.stop_propagation();
            on_open.emit(record.clone());
        })
    };

    let on_remove_click = {
        let record = props.record.clone();
        let on_remove = props.on_remove.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_remove.emit(record.clone());
        })
    };

    let remove_style = format!(
        "background: none; border: none; color: {}; cursor: pointer; font-size: 16px;",
        DANGER
    );

    html! {
        <div style="display: flex; justify-content: space-between; align-items: center; margin-bottom: 8px;">
            <a
                href={props.record.url.clone()}
                style={link_style(props.is_current)}
                title={props.record.url.clone()}
                onclick={on_link_click}
            >
                {props.record.display_label()}
            </a>
            <button style={remove_style} onclick={on_remove_click} title="Remove">{"✖"}</button>
        </div>
    }
}

/// Single-line label; the page on screen is bold on a tinted background
pub fn link_style(is_current: bool) -> String {
    let (background, weight) = if is_current {
        (CURRENT_ROW, "bold")
    } else {
        ("transparent", "normal")
    };

    format!(
        "color: {}; text-decoration: none; flex: 1; margin-right: 10px; word-break: normal; \
         padding: 4px; border-radius: 4px; background: {}; font-weight: {}; white-space: nowrap; \
         overflow: hidden; text-overflow: ellipsis;",
        ACCENT, background, weight
    )
}
