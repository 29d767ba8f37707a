use wasm_bindgen::JsCast;
use web_sys as web;

pub fn window() -> anyhow::Result<web::Window> {
    web::window().ok_or_else(|| anyhow::anyhow!("no window"))
}

pub fn document() -> anyhow::Result<web::Document> {
    window()?
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))
}

pub fn canvas_by_id(id: &str) -> anyhow::Result<web::HtmlCanvasElement> {
    document()?
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{id}"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("#{id} is not a canvas: {:?}", e)))
}

/// Match the canvas backing size to CSS size * devicePixelRatio, with the
/// ratio capped per quality tier.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, dpr_cap: f64) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio().min(dpr_cap);
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}
