use egui::Key;
use log::warn;
use mask_canvas::ToolMode;

const ICON_SAVE: &str = "\u{1F4BE}";

impl crate::app::MaskCanvasApp {
    pub(super) fn menu_ui(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let mut tool_mode = self.canvas.tool_mode();
            egui::ComboBox::from_label("Tool")
                .selected_text(tool_label(tool_mode))
                .show_ui(ui, |ui| {
                    for mode in ToolMode::ALL {
                        ui.selectable_value(&mut tool_mode, mode, tool_label(mode));
                    }
                });
            if tool_mode != self.canvas.tool_mode() {
                self.canvas.set_tool_mode(tool_mode);
                self.dirty = true;
            }

            let mut stroke_width = self.canvas.settings().stroke_width;
            if ui
                .add_enabled(
                    tool_mode.is_paint(),
                    egui::Slider::new(&mut stroke_width, 1.0..=100.0).text("Stroke"),
                )
                .changed()
            {
                self.canvas.set_stroke_width(stroke_width);
            }

            ui.scope(|ui| {
                if !self.canvas.is_prepared() {
                    ui.disable();
                }
                if ui.button("Reset zoom").clicked() && self.canvas.set_scale(1.0).is_ok() {
                    self.dirty = true;
                }
                if ui
                    .button(ICON_SAVE)
                    .on_hover_text("Export (cmd + S)")
                    .clicked()
                    || ui.input(|i| i.modifiers.command && i.key_pressed(Key::S) && ui.is_enabled())
                {
                    if let Err(e) = self.export() {
                        warn!("Export failed: {e}");
                        self.status = format!("Error during export: {e}");
                    }
                }
            });

            ui.label(self.status.as_str());
        });
    }
}

fn tool_label(mode: ToolMode) -> &'static str {
    match mode {
        ToolMode::Mask => "Mask",
        ToolMode::Recover => "Recover",
        ToolMode::Pan => "Pan",
    }
}
