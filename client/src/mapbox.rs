//! Bindings to the subset of the `mapboxgl` global used by the app.
//! The SDK itself is loaded by `index.html`.

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = mapboxgl)]
    #[derive(Debug, Clone)]
    pub type Map;

    #[wasm_bindgen(constructor, catch, js_namespace = mapboxgl)]
    pub fn new(options: &JsValue) -> Result<Map, JsValue>;

    #[wasm_bindgen(method, js_name = flyTo)]
    pub fn fly_to(this: &Map, options: &JsValue);

    #[wasm_bindgen(method, js_name = fitBounds)]
    pub fn fit_bounds(this: &Map, bounds: &JsValue, options: &JsValue);

    #[wasm_bindgen(method, js_name = addControl)]
    pub fn add_control(this: &Map, control: &JsValue);

    #[wasm_bindgen(method, js_name = getSource)]
    pub fn get_source(this: &Map, id: &str) -> Option<GeoJsonSource>;

    #[wasm_bindgen(method, catch, js_name = addSource)]
    pub fn add_source(this: &Map, id: &str, source: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = addLayer)]
    pub fn add_layer(this: &Map, layer: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(method, js_name = getCenter)]
    pub fn get_center(this: &Map) -> MapLngLat;

    #[wasm_bindgen(method, js_name = getZoom)]
    pub fn get_zoom(this: &Map) -> f64;

    #[wasm_bindgen(method)]
    pub fn on(this: &Map, event: &str, handler: &js_sys::Function);

    #[wasm_bindgen(method)]
    pub fn off(this: &Map, event: &str, handler: &js_sys::Function);

    #[wasm_bindgen(js_namespace = mapboxgl, js_name = LngLat)]
    pub type MapLngLat;

    #[wasm_bindgen(method, getter)]
    pub fn lng(this: &MapLngLat) -> f64;

    #[wasm_bindgen(method, getter)]
    pub fn lat(this: &MapLngLat) -> f64;

    #[wasm_bindgen(js_namespace = mapboxgl, js_name = GeoJSONSource)]
    pub type GeoJsonSource;

    #[wasm_bindgen(method, js_name = setData)]
    pub fn set_data(this: &GeoJsonSource, data: &JsValue);

    #[wasm_bindgen(js_namespace = mapboxgl, js_name = Marker)]
    #[derive(Debug, Clone)]
    pub type Pin;

    #[wasm_bindgen(constructor, js_namespace = mapboxgl, js_class = "Marker")]
    pub fn new() -> Pin;

    #[wasm_bindgen(method, js_class = "Marker", js_name = setLngLat)]
    pub fn set_lng_lat(this: &Pin, lng_lat: &JsValue) -> Pin;

    #[wasm_bindgen(method, js_class = "Marker", js_name = setPopup)]
    pub fn set_popup(this: &Pin, popup: &Popup) -> Pin;

    #[wasm_bindgen(method, js_class = "Marker", js_name = addTo)]
    pub fn add_to(this: &Pin, map: &Map) -> Pin;

    #[wasm_bindgen(method, js_class = "Marker")]
    pub fn remove(this: &Pin) -> Pin;

    #[wasm_bindgen(js_namespace = mapboxgl)]
    pub type Popup;

    #[wasm_bindgen(constructor, js_namespace = mapboxgl)]
    pub fn new() -> Popup;

    #[wasm_bindgen(method, js_name = setText)]
    pub fn set_text(this: &Popup, text: &str) -> Popup;

    #[wasm_bindgen(js_namespace = mapboxgl)]
    pub type ScaleControl;

    #[wasm_bindgen(constructor, js_namespace = mapboxgl)]
    pub fn new(options: &JsValue) -> ScaleControl;

    #[wasm_bindgen(js_namespace = mapboxgl)]
    pub type FullscreenControl;

    #[wasm_bindgen(constructor, js_namespace = mapboxgl)]
    pub fn new() -> FullscreenControl;
}

/// Set `mapboxgl.accessToken`. Returns false when the SDK is not loaded.
pub fn set_access_token(token: &str) -> bool {
    let global = js_sys::global();
    let Ok(mapboxgl) = js_sys::Reflect::get(&global, &JsValue::from_str("mapboxgl")) else {
        return false;
    };
    if mapboxgl.is_undefined() {
        return false;
    }
    js_sys::Reflect::set(
        &mapboxgl,
        &JsValue::from_str("accessToken"),
        &JsValue::from_str(token),
    )
    .unwrap_or(false)
}
