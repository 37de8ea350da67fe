fn main() -> eframe::Result {
    mask_canvas_app::run_native()
}
