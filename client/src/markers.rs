use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use pinroute_shared::manager::MIN_ROUTE_WAYPOINTS;
use pinroute_shared::{FitBoundsOptions, MapView, RequestSequencer, RouteOutcome, RouteOverlay};

use crate::api;
use crate::app::{Config, Manager, Markers, Notices, RoutePending};
use crate::map_view::with_view;
use crate::notice::schedule_dismiss;

/// Placed markers with per-row removal and the route trigger.
#[component]
pub fn MarkerPanel() -> impl IntoView {
    let Markers(markers) = expect_context();
    let Manager(manager) = expect_context();
    let Config(config) = expect_context();
    let Notices(notices) = expect_context();
    let RoutePending(pending) = expect_context();
    let route_seq = StoredValue::new(RequestSequencer::new());

    let remove = move |index: usize| {
        let removed = manager
            .try_update_value(|m| with_view(|view| m.remove_at(view, index)))
            .flatten();
        match removed {
            Some(Ok(_)) => markers.set(manager.with_value(|m| m.markers().clone())),
            Some(Err(e)) => web_sys::console::warn_1(&format!("Remove failed: {e}").into()),
            None => web_sys::console::warn_1(&"Map is not ready; marker not removed".into()),
        }
    };

    let generate_route = move |_: leptos::ev::MouseEvent| {
        let Some(waypoints) = manager.with_value(|m| m.routable_path()) else {
            return;
        };
        let Some(ticket) = route_seq.try_update_value(|seq| seq.issue()) else {
            return;
        };
        pending.set(true);

        let cfg = config.get_value();
        spawn_local(async move {
            let result = api::fetch_route(&cfg, &waypoints).await;
            if !route_seq.with_value(|seq| seq.is_current(ticket)) {
                return;
            }
            pending.set(false);
            if let Err(e) = &result {
                web_sys::console::warn_1(&format!("Directions failed: {e}").into());
            }

            let mut board = notices.get_untracked();
            let outcome = with_view(|view| {
                let outcome =
                    RouteOverlay::new().apply_directions(view, result, &mut board, chrono::Utc::now());
                if matches!(outcome, RouteOutcome::Drawn { .. })
                    && let Some(bounds) = manager.with_value(|m| m.bounding_box())
                {
                    view.fit_bounds(&bounds, FitBoundsOptions::default());
                }
                outcome
            });
            notices.set(board);
            if let Some(RouteOutcome::Noticed(id)) = outcome {
                schedule_dismiss(notices, id);
            }
        });
    };

    view! {
        <div style="width: 280px; background: #13161f; border: 1px solid #282c3e; border-radius: 8px; box-shadow: 0 4px 16px rgba(0,0,0,0.4); overflow: hidden;">
            <div style="padding: 10px 14px; border-bottom: 1px solid #282c3e; font-family: 'Inter', system-ui, sans-serif; font-size: 0.72rem; letter-spacing: 0.08em; text-transform: uppercase; color: #9a9590;">
                "Markers"
            </div>
            <div style="max-height: 45vh; overflow-y: auto;">
                {move || {
                    let set = markers.get();
                    if set.is_empty() {
                        return view! {
                            <div style="padding: 12px 14px; color: #5a5860; font-family: 'Inter', system-ui, sans-serif; font-size: 0.8rem;">
                                "Search for a place to drop a marker"
                            </div>
                        }
                            .into_any();
                    }
                    set.iter()
                        .enumerate()
                        .map(|(index, marker)| {
                            let label = marker.label.clone();
                            let coords = format!(
                                "{:.4}, {:.4}",
                                marker.position.lng(),
                                marker.position.lat(),
                            );
                            view! {
                                <div style="display: flex; align-items: center; gap: 10px; padding: 8px 14px; border-bottom: 1px solid rgba(40,44,62,0.5);">
                                    <span style="font-family: 'JetBrains Mono', monospace; font-size: 0.7rem; color: #3887be; min-width: 16px;">
                                        {index + 1}
                                    </span>
                                    <div style="flex: 1; min-width: 0;">
                                        <div style="color: #e2e0d8; font-family: 'Inter', system-ui, sans-serif; font-size: 0.8rem; white-space: nowrap; overflow: hidden; text-overflow: ellipsis;">
                                            {label}
                                        </div>
                                        <div style="color: #5a5860; font-family: 'JetBrains Mono', monospace; font-size: 0.65rem;">
                                            {coords}
                                        </div>
                                    </div>
                                    <button
                                        title="Remove marker"
                                        style="background: none; border: 1px solid #282c3e; border-radius: 4px; color: #9a9590; cursor: pointer; width: 24px; height: 24px; line-height: 1;"
                                        on:click=move |_| remove(index)
                                    >
                                        "\u{00D7}"
                                    </button>
                                </div>
                            }
                        })
                        .collect_view()
                        .into_any()
                }}
            </div>
            <div style="padding: 10px 14px;">
                <button
                    style="width: 100%; padding: 8px 0; background: #1a1d2a; border: 1px solid #3887be; border-radius: 6px; color: #e2e0d8; font-family: 'Inter', system-ui, sans-serif; font-size: 0.82rem; cursor: pointer;"
                    disabled=move || markers.get().len() < MIN_ROUTE_WAYPOINTS || pending.get()
                    on:click=generate_route
                >
                    {move || if pending.get() { "Routing..." } else { "Generate route" }}
                </button>
            </div>
        </div>
    }
}
