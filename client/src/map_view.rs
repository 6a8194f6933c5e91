use std::cell::RefCell;
use std::collections::HashMap;

use gloo_storage::Storage;
use leptos::prelude::*;
use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;

use pinroute_shared::config::{INITIAL_PITCH, SCALE_CONTROL_MAX_WIDTH};
use pinroute_shared::route::{line_feature, line_source_spec};
use pinroute_shared::{
    BoundingBox, CameraState, ClientConfig, FitBoundsOptions, LineLayer, LngLat, MapView, Marker,
    MarkerHandle,
};

use crate::mapbox;
use crate::store;

const CAMERA_STORAGE_KEY: &str = "pinroute_camera";

/// [`MapView`] backed by a live mapbox-gl map.
pub(crate) struct MapboxView {
    map: mapbox::Map,
    pins: HashMap<u64, mapbox::Pin>,
    next_pin: u64,
}

struct MapBinding {
    view: MapboxView,
    _on_move: Closure<dyn Fn()>,
    _on_move_end: Closure<dyn Fn()>,
}

thread_local! {
    static MAP_BINDING: RefCell<Option<MapBinding>> = const { RefCell::new(None) };
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> JsValue {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .unwrap_or(JsValue::UNDEFINED)
}

fn warn(context: &str, err: &JsValue) {
    web_sys::console::warn_1(&format!("{context}: {err:?}").into());
}

fn read_camera(map: &mapbox::Map) -> CameraState {
    let center = map.get_center();
    CameraState {
        lng: center.lng(),
        lat: center.lat(),
        zoom: map.get_zoom(),
    }
}

/// Create the map inside `container`, replacing any previous one.
pub(crate) fn mount(
    container: &web_sys::HtmlElement,
    config: &ClientConfig,
    camera: RwSignal<CameraState>,
) -> Result<(), String> {
    if !mapbox::set_access_token(&config.access_token) {
        return Err("mapbox-gl is not loaded".to_string());
    }

    let start: CameraState =
        gloo_storage::LocalStorage::get(CAMERA_STORAGE_KEY).unwrap_or(config.initial_camera);
    camera.set(start);

    let options = to_js(&serde_json::json!({
        "style": config.map_style,
        "center": [start.lng, start.lat],
        "zoom": start.zoom,
        "pitch": INITIAL_PITCH,
        "attributionControl": false,
        "renderWorldCopies": false,
    }));
    js_sys::Reflect::set(&options, &JsValue::from_str("container"), container)
        .map_err(|e| format!("map options: {e:?}"))?;
    let map = mapbox::Map::new(&options).map_err(|e| format!("map init: {e:?}"))?;

    let scale = mapbox::ScaleControl::new(&to_js(&serde_json::json!({
        "maxWidth": SCALE_CONTROL_MAX_WIDTH,
    })));
    map.add_control(scale.as_ref());
    map.add_control(mapbox::FullscreenControl::new().as_ref());

    let map_for_move = map.clone();
    let on_move = Closure::<dyn Fn()>::new(move || {
        camera.set(read_camera(&map_for_move));
    });
    map.on("move", on_move.as_ref().unchecked_ref());

    let map_for_move_end = map.clone();
    let on_move_end = Closure::<dyn Fn()>::new(move || {
        store::persist(CAMERA_STORAGE_KEY, read_camera(&map_for_move_end), "camera");
    });
    map.on("moveend", on_move_end.as_ref().unchecked_ref());

    MAP_BINDING.with(|slot| {
        if let Some(old) = slot.borrow_mut().take() {
            old.view
                .map
                .off("move", old._on_move.as_ref().unchecked_ref());
            old.view
                .map
                .off("moveend", old._on_move_end.as_ref().unchecked_ref());
        }
        *slot.borrow_mut() = Some(MapBinding {
            view: MapboxView {
                map,
                pins: HashMap::new(),
                next_pin: 0,
            },
            _on_move: on_move,
            _on_move_end: on_move_end,
        });
    });
    Ok(())
}

/// Run `f` against the mounted map. `None` until [`mount`] succeeded.
pub(crate) fn with_view<R>(f: impl FnOnce(&mut MapboxView) -> R) -> Option<R> {
    MAP_BINDING.with(|slot| slot.borrow_mut().as_mut().map(|binding| f(&mut binding.view)))
}

impl MapView for MapboxView {
    fn fly_to(&mut self, center: LngLat, zoom: f64) {
        self.map.fly_to(&to_js(&serde_json::json!({
            "center": [center.lng(), center.lat()],
            "zoom": zoom,
        })));
    }

    fn fit_bounds(&mut self, bounds: &BoundingBox, options: FitBoundsOptions) {
        self.map.fit_bounds(
            &to_js(&bounds.to_sw_ne()),
            &to_js(&serde_json::json!({ "padding": options.padding })),
        );
    }

    fn add_marker(&mut self, marker: &Marker) -> MarkerHandle {
        let popup = mapbox::Popup::new().set_text(&marker.label);
        let pin = mapbox::Pin::new()
            .set_lng_lat(&to_js(&<[f64; 2]>::from(marker.position)))
            .set_popup(&popup)
            .add_to(&self.map);
        self.next_pin += 1;
        self.pins.insert(self.next_pin, pin);
        MarkerHandle(self.next_pin)
    }

    fn remove_marker(&mut self, handle: MarkerHandle) {
        if let Some(pin) = self.pins.remove(&handle.0) {
            pin.remove();
        }
    }

    fn has_source(&self, id: &str) -> bool {
        self.map.get_source(id).is_some()
    }

    fn add_line_source(&mut self, id: &str, path: &[LngLat]) {
        if let Err(e) = self.map.add_source(id, &to_js(&line_source_spec(path))) {
            warn("addSource failed", &e);
        }
    }

    fn set_line_source_data(&mut self, id: &str, path: &[LngLat]) {
        if let Some(source) = self.map.get_source(id) {
            source.set_data(&to_js(&line_feature(path)));
        }
    }

    fn add_line_layer(&mut self, layer: &LineLayer) {
        if let Err(e) = self.map.add_layer(&to_js(&layer.to_spec())) {
            warn("addLayer failed", &e);
        }
    }
}
