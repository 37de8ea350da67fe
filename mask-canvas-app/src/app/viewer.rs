use egui::{ColorImage, Pos2, Rect, Sense, TextureOptions};
use log::warn;
use mask_canvas::{GestureEvent, MaskCanvasError, PointerEvent, PointerKind};

impl crate::app::MaskCanvasApp {
    pub(super) fn viewer_ui(&mut self, ui: &mut egui::Ui) {
        let size = ui.available_size().floor();
        let (rect, response) = ui.allocate_exact_size(size, Sense::drag());
        let viewport = (size.x as u32, size.y as u32);
        if viewport.0 == 0 || viewport.1 == 0 {
            return;
        }
        if self.canvas.viewport() != viewport {
            let result = self.canvas.resize_viewport(viewport.0, viewport.1);
            self.report(result);
            self.dirty = true;
        }
        self.prepare();
        if !self.canvas.is_prepared() {
            return;
        }

        let to_viewport = |pos: Pos2| pos - rect.min.to_vec2();
        let pointer = if response.drag_started() {
            response
                .interact_pointer_pos()
                .map(|pos| (PointerKind::Down, pos))
        } else if response.drag_stopped() {
            ui.input(|i| i.pointer.latest_pos())
                .map(|pos| (PointerKind::Up, pos))
        } else if response.dragged() && response.drag_delta() != egui::Vec2::ZERO {
            response
                .interact_pointer_pos()
                .map(|pos| (PointerKind::Move, pos))
        } else {
            None
        };
        if let Some((kind, pos)) = pointer {
            let p = to_viewport(pos);
            let result = self
                .canvas
                .handle_pointer(PointerEvent::new(kind, p.x, p.y));
            self.report(result);
            self.dirty = true;
        }

        let zoom = ui.input(|i| i.zoom_delta());
        if zoom != 1.0 && response.hovered() {
            let result = self
                .canvas
                .handle_gesture(GestureEvent::Scale { factor: zoom });
            self.report(result);
            self.dirty = true;
        }

        if self.dirty || self.texture.is_none() {
            match self.canvas.render_composite() {
                Ok(pixmap) => {
                    let image = ColorImage::from_rgba_premultiplied(
                        [pixmap.width() as usize, pixmap.height() as usize],
                        pixmap.data(),
                    );
                    match &mut self.texture {
                        Some(texture) => texture.set(image, TextureOptions::NEAREST),
                        None => {
                            self.texture = Some(ui.ctx().load_texture(
                                "Composite",
                                image,
                                TextureOptions::NEAREST,
                            ))
                        }
                    }
                    self.dirty = false;
                }
                Err(e) => warn!("Cannot render composite: {e}"),
            }
        }

        if let Some(texture) = &self.texture {
            let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
            ui.painter()
                .with_clip_rect(rect)
                .image(texture.id(), rect, uv, egui::Color32::WHITE);
        }
    }

    fn report(&mut self, result: Result<(), MaskCanvasError>) {
        if let Err(e) = result {
            warn!("{e}");
            self.status = e.to_string();
        }
    }
}
