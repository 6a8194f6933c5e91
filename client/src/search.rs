use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

use pinroute_shared::config::SELECT_ZOOM;
use pinroute_shared::{MapView, RequestSequencer, Suggestion};

use crate::api;
use crate::app::{Config, Manager, Markers};
use crate::map_view::with_view;

const SEARCH_DEBOUNCE_MS: u32 = 250;

/// Place search with a suggestion dropdown. Selecting a suggestion drops a marker.
#[component]
pub fn SearchBox() -> impl IntoView {
    let Config(config) = expect_context();
    let Manager(manager) = expect_context();
    let Markers(markers) = expect_context();

    let query: RwSignal<String> = RwSignal::new(String::new());
    let suggestions: RwSignal<Vec<Suggestion>> = RwSignal::new(Vec::new());
    // Every search takes a ticket; only the newest ticket's response is shown.
    let search_seq = StoredValue::new(RequestSequencer::new());
    let debounce_timeout = Rc::new(RefCell::new(None::<Timeout>));

    let run_search = move |value: String| {
        // Input moved on (or a suggestion was picked) since this was scheduled.
        if query.get_untracked() != value {
            return;
        }
        let Some(ticket) = search_seq.try_update_value(|seq| seq.issue()) else {
            return;
        };
        if value.trim().is_empty() {
            suggestions.set(Vec::new());
            return;
        }

        let cfg = config.get_value();
        spawn_local(async move {
            let result = api::fetch_suggestions(&cfg, &value).await;
            if !search_seq.with_value(|seq| seq.is_current(ticket)) {
                return;
            }
            match result {
                Ok(list) => suggestions.set(list),
                Err(e) => {
                    suggestions.set(Vec::new());
                    web_sys::console::warn_1(&format!("Geocoding failed: {e}").into());
                }
            }
        });
    };

    let on_input = {
        let debounce_timeout = Rc::clone(&debounce_timeout);
        move |e: leptos::ev::Event| {
            let Some(target) = e.target() else {
                return;
            };
            let Ok(input) = target.dyn_into::<web_sys::HtmlInputElement>() else {
                return;
            };
            let value = input.value();
            query.set(value.clone());

            if let Some(timeout) = debounce_timeout.borrow_mut().take() {
                timeout.cancel();
            }
            let timeout = Timeout::new(SEARCH_DEBOUNCE_MS, move || run_search(value));
            *debounce_timeout.borrow_mut() = Some(timeout);
        }
    };

    let select = move |suggestion: Suggestion| {
        search_seq.update_value(|seq| seq.invalidate());
        query.set(suggestion.label.clone());
        suggestions.set(Vec::new());

        let placed = manager
            .try_update_value(|m| {
                with_view(|view| {
                    view.fly_to(suggestion.center, SELECT_ZOOM);
                    m.add(view, suggestion.to_marker()).clone()
                })
            })
            .flatten();
        match placed {
            Some(set) => markers.set(set),
            None => web_sys::console::warn_1(&"Map is not ready; marker not placed".into()),
        }
    };

    let on_keydown = move |e: web_sys::KeyboardEvent| {
        if e.key() == "Escape" {
            search_seq.update_value(|seq| seq.invalidate());
            suggestions.set(Vec::new());
        }
    };

    view! {
        <div style="position: relative; width: 300px;">
            <input
                data-search-input=""
                type="text"
                placeholder="search for location"
                autocomplete="off"
                style="width: 100%; padding: 10px 14px; background: #1a1d2a; border: 1px solid #282c3e; border-radius: 6px; color: #e2e0d8; font-family: 'Inter', system-ui, sans-serif; font-size: 0.9rem; outline: none; box-sizing: border-box;"
                prop:value=move || query.get()
                on:input=on_input
                on:keydown=on_keydown
            />
            {move || {
                let list = suggestions.get();
                (!list.is_empty())
                    .then(|| {
                        view! {
                            <ul style="position: absolute; top: calc(100% + 4px); left: 0; right: 0; margin: 0; padding: 4px 0; list-style: none; background: #161921; border: 1px solid #282c3e; border-radius: 6px; box-shadow: 0 4px 16px rgba(0,0,0,0.5); max-height: 320px; overflow-y: auto; z-index: 5;">
                                {list
                                    .into_iter()
                                    .map(|suggestion| {
                                        let label = suggestion.label.clone();
                                        view! {
                                            <li
                                                class="suggestion"
                                                style="padding: 8px 14px; cursor: pointer; color: #e2e0d8; font-family: 'Inter', system-ui, sans-serif; font-size: 0.82rem;"
                                                on:click=move |_| select(suggestion.clone())
                                            >
                                                {label}
                                            </li>
                                        }
                                    })
                                    .collect_view()}
                            </ul>
                        }
                    })
            }}
        </div>
    }
}
