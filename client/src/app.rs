use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

use std::cell::RefCell;

use pinroute_shared::{
    CameraState, ClientConfig, MarkerManager, MarkerSet, NoticeBoard, NoticeLevel,
};

use crate::api;
use crate::map_view;
use crate::markers::MarkerPanel;
use crate::notice::{NoticeBanner, raise_notice};
use crate::search::SearchBox;
use crate::store::LocalMarkerStore;

struct KeydownBinding {
    window: web_sys::Window,
    _handler: wasm_bindgen::closure::Closure<dyn Fn(web_sys::KeyboardEvent)>,
}

thread_local! {
    static KEYDOWN_BINDING: RefCell<Option<KeydownBinding>> = const { RefCell::new(None) };
}

/// Newtype wrappers so each shared signal has a distinct type for Leptos context.
#[derive(Clone, Copy)]
pub(crate) struct Markers(pub RwSignal<MarkerSet>);
#[derive(Clone, Copy)]
pub(crate) struct Manager(pub StoredValue<MarkerManager<LocalMarkerStore>>);
#[derive(Clone, Copy)]
pub(crate) struct Config(pub StoredValue<ClientConfig>);
#[derive(Clone, Copy)]
pub(crate) struct Notices(pub RwSignal<NoticeBoard>);
#[derive(Clone, Copy)]
pub(crate) struct Camera(pub RwSignal<CameraState>);
#[derive(Clone, Copy)]
pub(crate) struct RoutePending(pub RwSignal<bool>);

/// Token baked in at build time, used when the server does not hand one out.
fn build_time_config() -> ClientConfig {
    ClientConfig {
        access_token: option_env!("MAPBOX_TOKEN").unwrap_or_default().to_string(),
        ..ClientConfig::default()
    }
}

#[component]
pub fn App() -> impl IntoView {
    let manager = StoredValue::new(MarkerManager::new(LocalMarkerStore::default()));
    let markers: RwSignal<MarkerSet> =
        RwSignal::new(manager.with_value(|m| m.markers().clone()));
    let config = StoredValue::new(ClientConfig::default());
    let config_ready: RwSignal<bool> = RwSignal::new(false);
    let notices: RwSignal<NoticeBoard> = RwSignal::new(NoticeBoard::new());
    let camera: RwSignal<CameraState> = RwSignal::new(ClientConfig::default().initial_camera);
    let route_pending: RwSignal<bool> = RwSignal::new(false);
    let map_mounted = StoredValue::new(false);
    let map_ref: NodeRef<leptos::html::Div> = NodeRef::new();

    provide_context(Markers(markers));
    provide_context(Manager(manager));
    provide_context(Config(config));
    provide_context(Notices(notices));
    provide_context(Camera(camera));
    provide_context(RoutePending(route_pending));

    // Fetch runtime config on mount
    Effect::new(move || {
        spawn_local(async move {
            let loaded = match api::fetch_config().await {
                Ok(cfg) if cfg.validate().is_ok() => cfg,
                Ok(_) => build_time_config(),
                Err(e) => {
                    web_sys::console::warn_1(&format!("Config fetch failed: {e}").into());
                    build_time_config()
                }
            };
            if let Err(e) = loaded.validate() {
                raise_notice(notices, NoticeLevel::Warning, e.to_string());
            }
            config.set_value(loaded);
            config_ready.set(true);
        });
    });

    // Create the map once config is known and the container exists.
    Effect::new(move || {
        if !config_ready.get() || map_mounted.get_value() {
            return;
        }
        let Some(container) = map_ref.get() else {
            return;
        };
        map_mounted.set_value(true);

        let mounted = config.with_value(|cfg| map_view::mount(&container, cfg, camera));
        match mounted {
            Ok(()) => {
                manager.update_value(|m| {
                    map_view::with_view(|view| m.restore_pins(view));
                });
                let restored = manager.with_value(|m| m.markers().len());
                if restored > 0 {
                    raise_notice(
                        notices,
                        NoticeLevel::Info,
                        format!("Restored {restored} saved marker(s)"),
                    );
                }
            }
            Err(e) => {
                web_sys::console::error_1(&format!("Map mount failed: {e}").into());
                raise_notice(notices, NoticeLevel::Warning, format!("Map unavailable: {e}"));
            }
        }
    });

    // "/" focuses search, Escape leaves it.
    Effect::new(move || {
        use wasm_bindgen::prelude::*;
        let Some(window) = web_sys::window() else {
            return;
        };

        KEYDOWN_BINDING.with(|slot| {
            if let Some(old) = slot.borrow_mut().take() {
                let _ = old.window.remove_event_listener_with_callback(
                    "keydown",
                    old._handler.as_ref().unchecked_ref(),
                );
            }
        });

        let handler =
            Closure::<dyn Fn(web_sys::KeyboardEvent)>::new(move |e: web_sys::KeyboardEvent| {
                let key = e.key();
                let target = e
                    .target()
                    .and_then(|t| t.dyn_into::<web_sys::HtmlElement>().ok());
                let target_tag = target.as_ref().map(|el| el.tag_name()).unwrap_or_default();

                if target_tag == "INPUT" || target_tag == "TEXTAREA" {
                    if key == "Escape"
                        && let Some(el) = target
                    {
                        el.blur().ok();
                    }
                    return;
                }

                if key == "/" {
                    e.prevent_default();
                    let Some(window) = web_sys::window() else {
                        return;
                    };
                    let Some(doc) = window.document() else {
                        return;
                    };
                    if let Some(el) = doc.query_selector("[data-search-input]").ok().flatten()
                        && let Ok(input) = el.dyn_into::<web_sys::HtmlElement>()
                    {
                        input.focus().ok();
                    }
                }
            });

        if window
            .add_event_listener_with_callback("keydown", handler.as_ref().unchecked_ref())
            .is_ok()
        {
            KEYDOWN_BINDING.with(|slot| {
                *slot.borrow_mut() = Some(KeydownBinding {
                    window: window.clone(),
                    _handler: handler,
                });
            });
        }
    });

    view! {
        <div style="width: 100%; height: 100%; position: relative; overflow: hidden; background: #0c0e17;">
            <div node_ref=map_ref style="position: absolute; inset: 0;" />
            <div style="position: absolute; top: 16px; left: 16px; z-index: 10;">
                <SearchBox />
            </div>
            <div style="position: absolute; top: 16px; right: 56px; z-index: 10;">
                <MarkerPanel />
            </div>
            <InfoPanel />
            <NoticeBanner />
        </div>
    }
}

/// Live camera readout in the bottom-left corner.
#[component]
fn InfoPanel() -> impl IntoView {
    let Camera(camera) = expect_context();

    view! {
        <div style="position: absolute; bottom: 36px; left: 16px; z-index: 10; padding: 8px 12px; background: rgba(19,22,31,0.9); border: 1px solid #282c3e; border-radius: 6px; pointer-events: none;">
            <div style="font-family: 'Inter', system-ui, sans-serif; font-size: 0.62rem; letter-spacing: 0.08em; text-transform: uppercase; color: #9a9590; margin-bottom: 2px;">
                "Position"
            </div>
            <div style="font-family: 'JetBrains Mono', monospace; font-size: 0.72rem; color: #e2e0d8; font-variant-numeric: tabular-nums;">
                {move || camera.get().readout()}
            </div>
        </div>
    }
}
