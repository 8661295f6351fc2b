use frostwheel_core::{Prize, WinRecord};
use yew::prelude::*;

/// Banner under the title once the result modal has been dismissed.
pub fn banner_text(selected: Option<&Prize>, spinning: bool, show_result: bool) -> Option<String> {
    match selected {
        Some(prize) if !spinning && !show_result => {
            Some(format!("You got: {} {}!", prize.icon, prize.label))
        }
        _ => None,
    }
}

#[derive(Properties, PartialEq)]
pub struct HistoryProps {
    pub records: Vec<WinRecord>,
}

#[function_component(HistoryList)]
pub fn history_list(props: &HistoryProps) -> Html {
    html! {
        <section class="history">
            <h2>{"Recent Wins"}</h2>
            if props.records.is_empty() {
                <p class="history-empty">{"🧊 The ice remains unbroken..."}</p>
            } else {
                <ul>
                    { for props.records.iter().rev().map(|record| html! {
                        <li key={record.id.clone()}>
                            <span class="icon">{ &record.prize.icon }</span>
                            <span class="label">{ &record.prize.label }</span>
                            <span class="time">{ record.clock_label() }</span>
                            <span class="swatch" style={format!("background-color: {}", record.prize.color)}></span>
                        </li>
                    }) }
                </ul>
            }
        </section>
    }
}

#[derive(Properties, PartialEq)]
pub struct ResultModalProps {
    pub prize: Option<Prize>,
    pub open: bool,
    pub on_close: Callback<MouseEvent>,
}

#[function_component(ResultModal)]
pub fn result_modal(props: &ResultModalProps) -> Html {
    let Some(prize) = props.prize.as_ref().filter(|_| props.open) else {
        return html! {};
    };
    html! {
        <div class="modal-backdrop">
            <div class="modal">
                <div class="modal-icon">{ &prize.icon }</div>
                <h2>{"FROZEN WIN!"}</h2>
                <div class="modal-prize">{ &prize.label }</div>
                <button onclick={props.on_close.clone()}>{"FREEZE IT!"}</button>
            </div>
        </div>
    }
}
