use buoyancy_physics::FloatState;
use buoyancy_simulation::{format_density, InteractionController, LiquidGradient, Rgb, TrendBuffer};
use catppuccin::PALETTE;
use egui::{Align2, Color32, Context, CornerRadius, FontId, Pos2, Rect, Sense, Stroke, StrokeKind};
use egui_wgpu::Renderer;
use egui_winit::State;
use wgpu::{Device, TextureFormat};
use winit::{event::WindowEvent, window::Window};

use crate::config::ViewConfig;

/// Side length of the test object in points
const OBJECT_SIZE: f32 = 56.0;
/// Horizontal room reserved for y-axis labels on the chart
const CHART_MARGIN_LEFT: f32 = 64.0;
const CHART_MARGIN_BOTTOM: f32 = 36.0;

fn catppuccin_color(color: &catppuccin::Color) -> Color32 {
    Color32::from_rgb(color.rgb.r, color.rgb.g, color.rgb.b)
}

fn rgb_color(rgb: Rgb) -> Color32 {
    Color32::from_rgb(rgb.r, rgb.g, rgb.b)
}

/// Fill color of the object for each resting state
fn object_color(state: FloatState) -> Color32 {
    let colors = &PALETTE.mocha.colors;
    match state {
        FloatState::Floating => catppuccin_color(&colors.peach),
        FloatState::Sunk => catppuccin_color(&colors.maroon),
        FloatState::Suspended => catppuccin_color(&colors.yellow),
    }
}

pub struct Gui {
    context: Context,
    state: State,
    renderer: Renderer,
}

impl Gui {
    pub fn new(device: &Device, output_color_format: TextureFormat, window: &Window) -> Self {
        let context = Context::default();
        let id = context.viewport_id();

        let state = State::new(
            context.clone(),
            id,
            window,
            Some(window.scale_factor() as f32),
            None,
            Some(device.limits().max_texture_dimension_2d as usize),
        );

        let renderer = Renderer::new(
            device,
            output_color_format,
            egui_wgpu::RendererOptions {
                msaa_samples: 1,
                depth_stencil_format: None,
                dithering: false,
                predictable_texture_filtering: false,
            },
        );

        Self {
            context,
            state,
            renderer,
        }
    }

    pub fn handle_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        let response = self.state.on_window_event(window, event);
        response.consumed
    }

    /// Whether egui currently owns the keyboard (e.g. a focused slider)
    pub fn wants_keyboard_input(&self) -> bool {
        self.context.wants_keyboard_input()
    }

    /// Run one egui frame and record it into `encoder`. Returns true when egui
    /// wants another frame right away.
    #[allow(clippy::too_many_arguments)]
    pub fn render(
        &mut self,
        device: &Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        window: &Window,
        view: &wgpu::TextureView,
        controller: &mut InteractionController,
        view_config: &ViewConfig,
    ) -> bool {
        let raw_input = self.state.take_egui_input(window);

        let full_output = self.context.run(raw_input, |ctx| {
            ui(ctx, controller, view_config);
        });

        self.state
            .handle_platform_output(window, full_output.platform_output);

        let clipped_primitives = self
            .context
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        let size = window.inner_size();
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [size.width, size.height],
            pixels_per_point: window.scale_factor() as f32,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            self.renderer
                .update_texture(device, queue, *id, image_delta);
        }

        self.renderer.update_buffers(
            device,
            queue,
            encoder,
            &clipped_primitives,
            &screen_descriptor,
        );

        let mut render_pass = encoder
            .begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            })
            .forget_lifetime();

        self.renderer
            .render(&mut render_pass, &clipped_primitives, &screen_descriptor);
        drop(render_pass);

        for id in &full_output.textures_delta.free {
            self.renderer.free_texture(id);
        }

        // egui asks for an immediate repaint while layout is settling
        full_output
            .viewport_output
            .get(&egui::ViewportId::ROOT)
            .is_some_and(|viewport| viewport.repaint_delay.is_zero())
    }
}

fn ui(ctx: &Context, controller: &mut InteractionController, view_config: &ViewConfig) {
    // Controls + readouts (left)
    egui::SidePanel::left("controls")
        .resizable(false)
        .default_width(300.0)
        .show(ctx, |ui| {
            ui.heading("Controls");
            controls(ui, controller);

            ui.separator();
            ui.heading("Readouts");
            readouts(ui, controller);
        });

    // Tank + chart (center)
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.heading("Tank");
        paint_tank(ui, controller, view_config.tank_height);

        ui.add_space(12.0);
        ui.heading("Buoyant force vs. liquid density");
        paint_chart(ui, controller.trend(), view_config.chart_height);
    });
}

fn controls(ui: &mut egui::Ui, controller: &mut InteractionController) {
    let params = controller.params().clone();

    let mut liquid = controller.state().liquid_density();
    let response = ui.add(
        egui::Slider::new(&mut liquid, params.density_range())
            .step_by(params.density_step)
            .fixed_decimals(1)
            .text("Liquid density (g/cm³)"),
    );
    if response.changed() {
        if let Err(err) = controller.set_liquid_density(liquid) {
            log::warn!("Ignoring liquid slider input: {}", err);
        }
    }

    let mut object = controller.state().object_density();
    let response = ui.add(
        egui::Slider::new(&mut object, params.density_range())
            .step_by(params.density_step)
            .fixed_decimals(1)
            .text("Object density (g/cm³)"),
    );
    if response.changed() {
        if let Err(err) = controller.set_object_density(object) {
            log::warn!("Ignoring object slider input: {}", err);
        }
    }

    ui.add_space(4.0);
    if ui.button("Reset").on_hover_text("Shortcut: R").clicked() {
        controller.reset();
    }
}

fn readouts(ui: &mut egui::Ui, controller: &InteractionController) {
    let readout = controller.readout();
    let report = controller.report();

    egui::Grid::new("readouts")
        .num_columns(2)
        .striped(true)
        .show(ui, |ui| {
            ui.label("Liquid density");
            ui.label(format!("{} g/cm³", readout.liquid_density));
            ui.end_row();

            ui.label("Object density");
            ui.label(format!("{} g/cm³", readout.object_density));
            ui.end_row();

            ui.label("Buoyant force");
            ui.label(format!("{} N", readout.buoyant_force))
                .on_hover_text(format!(
                    "{:.3e} N (weight {:.3e} N, net {:+.3e} N)",
                    report.buoyant_force,
                    report.object_weight,
                    report.net_force()
                ));
            ui.end_row();

            ui.label("Submerged volume");
            ui.label(format!("{} cm³", readout.submerged_volume));
            ui.end_row();

            ui.label("State");
            ui.label(egui::RichText::new(readout.state).strong());
            ui.end_row();
        });
}

/// Fill `rect` with the liquid gradient, surface color along the top edge
fn gradient_mesh(rect: Rect, gradient: LiquidGradient) -> egui::Mesh {
    let surface = rgb_color(gradient.surface);
    let floor = rgb_color(gradient.floor);

    let mut mesh = egui::Mesh::default();
    mesh.colored_vertex(rect.left_top(), surface);
    mesh.colored_vertex(rect.right_top(), surface);
    mesh.colored_vertex(rect.right_bottom(), floor);
    mesh.colored_vertex(rect.left_bottom(), floor);
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(0, 2, 3);
    mesh
}

fn paint_tank(ui: &mut egui::Ui, controller: &InteractionController, tank_height: f32) {
    let colors = &PALETTE.mocha.colors;
    let width = ui.available_width().min(420.0);

    // Headroom above the liquid so a floating object can stick out
    let (response, painter) =
        ui.allocate_painter(egui::vec2(width, tank_height + OBJECT_SIZE), Sense::hover());
    let outer = response.rect;
    let liquid = Rect::from_min_max(
        Pos2::new(outer.left(), outer.bottom() - tank_height),
        outer.right_bottom(),
    );

    painter.add(egui::Shape::mesh(gradient_mesh(liquid, controller.gradient())));
    painter.rect_stroke(
        liquid,
        CornerRadius::ZERO,
        Stroke::new(2.0, catppuccin_color(&colors.overlay0)),
        StrokeKind::Outside,
    );

    let offset = controller.object_offset(liquid.height());
    let object_bottom = liquid.bottom() - offset;
    let object = Rect::from_min_max(
        Pos2::new(liquid.center().x - OBJECT_SIZE / 2.0, object_bottom - OBJECT_SIZE),
        Pos2::new(liquid.center().x + OBJECT_SIZE / 2.0, object_bottom),
    );
    let state = controller.report().state;
    painter.rect_filled(object, CornerRadius::same(4), object_color(state));
    painter.rect_stroke(
        object,
        CornerRadius::same(4),
        Stroke::new(1.5, catppuccin_color(&colors.crust)),
        StrokeKind::Inside,
    );
    painter.text(
        object.center(),
        Align2::CENTER_CENTER,
        state.label(),
        FontId::proportional(11.0),
        catppuccin_color(&colors.crust),
    );
}

fn paint_chart(ui: &mut egui::Ui, trend: &TrendBuffer, chart_height: f32) {
    let colors = &PALETTE.mocha.colors;
    let text_color = catppuccin_color(&colors.subtext0);
    let axis_stroke = Stroke::new(1.0, catppuccin_color(&colors.overlay0));
    let font = FontId::proportional(11.0);

    let width = ui.available_width().min(640.0);
    let (response, painter) = ui.allocate_painter(egui::vec2(width, chart_height), Sense::hover());
    let outer = response.rect;
    painter.rect_filled(outer, CornerRadius::same(4), catppuccin_color(&colors.mantle));

    let plot = Rect::from_min_max(
        Pos2::new(outer.left() + CHART_MARGIN_LEFT, outer.top() + 12.0),
        Pos2::new(outer.right() - 12.0, outer.bottom() - CHART_MARGIN_BOTTOM),
    );
    painter.line_segment([plot.left_bottom(), plot.right_bottom()], axis_stroke);
    painter.line_segment([plot.left_bottom(), plot.left_top()], axis_stroke);

    painter.text(
        Pos2::new(plot.center().x, outer.bottom() - 4.0),
        Align2::CENTER_BOTTOM,
        "Liquid density (g/cm³)",
        font.clone(),
        text_color,
    );
    painter.text(
        Pos2::new(outer.left() + 4.0, outer.top() + 2.0),
        Align2::LEFT_TOP,
        "Buoyant force (N)",
        font.clone(),
        text_color,
    );

    let Some((lo, hi)) = trend.value_range() else {
        painter.text(
            plot.center(),
            Align2::CENTER_CENTER,
            "Move the liquid density slider to record samples",
            font,
            text_color,
        );
        return;
    };

    // Keep a flat series away from the axes
    let pad = if hi > lo { (hi - lo) * 0.1 } else { lo.abs().max(1e-9) * 0.1 };
    let (lo, hi) = (lo - pad, hi + pad);

    let count = trend.len();
    let x_at = |index: usize| -> f32 {
        if count <= 1 {
            plot.center().x
        } else {
            plot.left() + plot.width() * index as f32 / (count - 1) as f32
        }
    };
    let y_at = |value: f64| -> f32 {
        let t = ((value - lo) / (hi - lo)) as f32;
        plot.bottom() - plot.height() * t
    };

    painter.text(
        Pos2::new(plot.left() - 4.0, plot.top()),
        Align2::RIGHT_TOP,
        format!("{:.2e}", hi),
        font.clone(),
        text_color,
    );
    painter.text(
        Pos2::new(plot.left() - 4.0, plot.bottom()),
        Align2::RIGHT_BOTTOM,
        format!("{:.2e}", lo),
        font.clone(),
        text_color,
    );

    let line_color = catppuccin_color(&colors.blue);
    let points: Vec<Pos2> = trend
        .iter()
        .enumerate()
        .map(|(i, sample)| Pos2::new(x_at(i), y_at(sample.value)))
        .collect();

    if points.len() > 1 {
        painter.add(egui::Shape::line(points.clone(), Stroke::new(2.0, line_color)));
    }

    for (point, sample) in points.iter().zip(trend.iter()) {
        painter.circle_filled(*point, 3.5, line_color);
        painter.text(
            Pos2::new(point.x, plot.bottom() + 3.0),
            Align2::CENTER_TOP,
            &sample.label,
            font.clone(),
            text_color,
        );
    }

    if let Some(hover) = response.hover_pos() {
        let nearest = points
            .iter()
            .zip(trend.iter())
            .min_by(|(a, _), (b, _)| (a.x - hover.x).abs().total_cmp(&(b.x - hover.x).abs()));
        if let Some((point, sample)) = nearest {
            painter.text(
                *point + egui::vec2(6.0, -6.0),
                Align2::LEFT_BOTTOM,
                format!("{} g/cm³: {:.3e} N", sample.label, sample.value),
                font,
                catppuccin_color(&colors.text),
            );
        }
    }
}

/// Title suffix shown in the window bar
pub fn window_title(base: &str, controller: &InteractionController) -> String {
    format!(
        "{} - liquid {} g/cm³ - {}",
        base,
        format_density(controller.state().liquid_density()),
        controller.report().state
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use buoyancy_simulation::liquid_gradient;

    #[test]
    fn test_gradient_mesh_puts_surface_on_top() {
        let rect = Rect::from_min_max(Pos2::new(0.0, 0.0), Pos2::new(100.0, 300.0));
        let gradient = liquid_gradient(1.0);
        let mesh = gradient_mesh(rect, gradient);

        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices.len(), 6);
        for vertex in &mesh.vertices {
            // Screen y grows downward, so y == 0 is the liquid surface
            let expected = if vertex.pos.y == rect.top() {
                rgb_color(gradient.surface)
            } else {
                rgb_color(gradient.floor)
            };
            assert_eq!(vertex.color, expected);
        }
        assert_eq!(mesh.vertices[0].color, Color32::from_rgb(41, 128, 170));
        assert_eq!(mesh.vertices[2].color, Color32::from_rgb(52, 152, 200));
    }

    #[test]
    fn test_object_color_differs_per_state() {
        let floating = object_color(FloatState::Floating);
        let sunk = object_color(FloatState::Sunk);
        let suspended = object_color(FloatState::Suspended);
        assert_ne!(floating, sunk);
        assert_ne!(floating, suspended);
        assert_ne!(sunk, suspended);
    }
}
