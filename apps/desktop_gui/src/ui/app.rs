//! egui application shell: navigation, the predictor form, and gauge
//! rendering. All lifecycle and numeric logic lives in `predictor_client`;
//! this file only paints state and forwards user actions.

use std::time::Duration;

use chrono::{Local, NaiveDate};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use egui_extras::DatePickerButton;
use predictor_client::{
    gauge::THRESHOLD_NOTE, GaugeReading, PredictController, PredictError, RequestState,
};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppView {
    Predictor,
    About,
}

pub struct PredictorApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    controller: PredictController,
    view: AppView,
    flight_number_buf: String,
    flight_date: NaiveDate,
    status: String,
}

impl PredictorApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        let controller = PredictController::new();
        let flight_number_buf = controller.form().flight_number().to_string();
        let flight_date = NaiveDate::parse_from_str(controller.form().flight_date(), "%Y-%m-%d")
            .unwrap_or_else(|_| Local::now().date_naive());

        Self {
            cmd_tx,
            ui_rx,
            controller,
            view: AppView::Predictor,
            flight_number_buf,
            flight_date,
            status: "Prediction worker starting...".to_string(),
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::PredictionResolved {
                    submission,
                    outcome,
                } => {
                    if self.controller.complete(submission, outcome) {
                        self.status = match self.controller.state() {
                            RequestState::Success(_) => "Prediction received".to_string(),
                            RequestState::Error(_) => "Prediction failed".to_string(),
                            _ => self.status.clone(),
                        };
                    }
                }
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::WorkerFailed(message) => {
                    if let RequestState::Loading { submission } = *self.controller.state() {
                        self.controller
                            .complete(submission, Err(PredictError::Transport(message.clone())));
                    }
                    self.status = message;
                }
            }
        }
    }

    fn submit(&mut self) {
        let Some((submission, request)) = self.controller.begin_submission() else {
            return;
        };

        self.status = "Predicting...".to_string();
        if let Err(message) = dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::Predict {
                submission,
                request,
            },
        ) {
            self.controller
                .complete(submission, Err(PredictError::Transport(message.clone())));
            self.status = message;
        }
    }

    fn show_nav_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("nav_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("Flight Predictor").strong().size(18.0));
                ui.separator();
                ui.selectable_value(&mut self.view, AppView::Predictor, "Predict");
                ui.selectable_value(&mut self.view, AppView::About, "About");
            });
            ui.add_space(4.0);
        });
    }

    fn show_predictor_view(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let avail = ui.available_size();
            let card_width = avail.x.clamp(420.0, 520.0);
            ui.add_space((avail.y * 0.05).clamp(10.0, 40.0));

            ui.vertical_centered(|ui| {
                ui.set_width(card_width);

                egui::Frame::NONE
                    .fill(ui.visuals().faint_bg_color)
                    .corner_radius(12.0)
                    .stroke(egui::Stroke::new(
                        1.0,
                        ui.visuals().widgets.noninteractive.bg_stroke.color,
                    ))
                    .inner_margin(egui::Margin::symmetric(20, 16))
                    .show(ui, |ui| {
                        ui.style_mut().spacing.item_spacing = egui::vec2(10.0, 10.0);

                        ui.heading("Flight Delay Predictor");
                        ui.add_space(2.0);

                        ui.label(egui::RichText::new("Flight number (e.g., UA245)").strong());
                        let edit = egui::TextEdit::singleline(&mut self.flight_number_buf)
                            .id_salt("flight_number")
                            .hint_text("AA100")
                            .desired_width(f32::INFINITY);
                        let flight_resp = ui.add_sized([ui.available_width(), 32.0], edit);
                        if flight_resp.changed() {
                            self.controller.set_flight_number(&self.flight_number_buf);
                            // Reflect the upper-cased value back into the box.
                            self.flight_number_buf =
                                self.controller.form().flight_number().to_string();
                        }

                        ui.label(egui::RichText::new("Flight date (YYYY-MM-DD)").strong());
                        let date_resp = ui.add(DatePickerButton::new(&mut self.flight_date));
                        if date_resp.changed() {
                            let date = self.flight_date.format("%Y-%m-%d").to_string();
                            self.controller.set_flight_date(&date);
                        }

                        ui.add_space(4.0);

                        let loading = self.controller.is_loading();
                        let can_submit = !loading && self.controller.form().is_complete();
                        let btn_label = if loading { "Predicting..." } else { "Predict" };
                        let btn = egui::Button::new(egui::RichText::new(btn_label).strong())
                            .min_size(egui::vec2(ui.available_width(), 36.0));
                        let clicked = ui.add_enabled(can_submit, btn).clicked();

                        let enter_submitted = flight_resp.lost_focus()
                            && ctx.input(|i| i.key_pressed(egui::Key::Enter));
                        if clicked || (can_submit && enter_submitted) {
                            self.submit();
                        }

                        if loading {
                            ui.horizontal(|ui| {
                                ui.add(egui::Spinner::new());
                                ui.weak("Contacting prediction service...");
                            });
                        }

                        let state = self.controller.state().clone();
                        match &state {
                            RequestState::Error(message) => show_error_panel(ui, message),
                            RequestState::Success(result) => {
                                show_result_panel(ui, &GaugeReading::from_result(result));
                            }
                            RequestState::Idle | RequestState::Loading { .. } => {}
                        }

                        ui.add_space(4.0);
                        ui.separator();
                        ui.horizontal_wrapped(|ui| {
                            ui.small("Status:");
                            ui.small(egui::RichText::new(&self.status).weak());
                        });
                    });
            });
        });
    }

    fn show_about_view(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let avail = ui.available_size();
            ui.add_space((avail.y * 0.05).clamp(10.0, 40.0));
            ui.vertical_centered(|ui| {
                ui.set_width(avail.x.clamp(420.0, 560.0));
                ui.heading("About");
                ui.add_space(8.0);
                ui.label(
                    "This application predicts flight delay probability using a machine \
                     learning model served by a remote prediction API. The desktop front-end \
                     calls /api/predict/ with a flight number and date, and shows a simple \
                     gauge.",
                );
                ui.add_space(6.0);
                ui.label(
                    "On free data plans, the service may use current conditions or fallback \
                     behavior to stay responsive. Model version info is returned with each \
                     prediction.",
                );
            });
        });
    }
}

impl eframe::App for PredictorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        self.show_nav_bar(ctx);
        match self.view {
            AppView::Predictor => self.show_predictor_view(ctx),
            AppView::About => self.show_about_view(ctx),
        }

        // Keep polling the event queue while a request is pending, even
        // without input events.
        if self.controller.is_loading() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

fn show_error_panel(ui: &mut egui::Ui, message: &str) {
    egui::Frame::NONE
        .fill(egui::Color32::from_rgb(0xfe, 0xe2, 0xe2))
        .corner_radius(8.0)
        .inner_margin(egui::Margin::symmetric(10, 8))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            // The message is rendered exactly as produced by the request
            // lifecycle; no rewording here.
            ui.colored_label(egui::Color32::from_rgb(0xb9, 0x1c, 0x1c), message);
        });
}

fn show_result_panel(ui: &mut egui::Ui, reading: &GaugeReading) {
    egui::Frame::NONE
        .stroke(egui::Stroke::new(
            1.0,
            ui.visuals().widgets.noninteractive.bg_stroke.color,
        ))
        .corner_radius(12.0)
        .inner_margin(egui::Margin::symmetric(14, 12))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            draw_gauge(ui, reading);
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new(format!("{} delay risk", reading.percent))
                        .strong()
                        .size(18.0),
                );
                ui.small(THRESHOLD_NOTE);
                ui.add_space(4.0);
                ui.label(format!("Label: {}", reading.label));
                ui.label(format!("Model: {}", reading.model_version));
            });
        });
}

const GAUGE_BAND_WIDTH: f32 = 14.0;

/// Point on the dial: 0 degrees points straight up from the pivot, -90 and
/// +90 are the left and right horizontal extremes.
fn gauge_point(center: egui::Pos2, radius: f32, angle_degrees: f32) -> egui::Pos2 {
    let rad = angle_degrees.to_radians();
    egui::pos2(center.x + radius * rad.sin(), center.y - radius * rad.cos())
}

fn arc_points(center: egui::Pos2, radius: f32, start_deg: f32, end_deg: f32) -> Vec<egui::Pos2> {
    let steps = 48;
    (0..=steps)
        .map(|i| {
            let t = i as f32 / steps as f32;
            gauge_point(center, radius, start_deg + (end_deg - start_deg) * t)
        })
        .collect()
}

fn draw_gauge(ui: &mut egui::Ui, reading: &GaugeReading) {
    let width = ui.available_width().min(280.0);
    let radius = width * 0.42;
    let (rect, _) =
        ui.allocate_exact_size(egui::vec2(width, radius + 32.0), egui::Sense::hover());
    let painter = ui.painter();
    let center = egui::pos2(rect.center().x, rect.bottom() - 10.0);

    // Background arc, then the three risk bands.
    painter.add(egui::Shape::line(
        arc_points(center, radius, -90.0, 90.0),
        egui::Stroke::new(GAUGE_BAND_WIDTH, egui::Color32::from_gray(90)),
    ));
    painter.add(egui::Shape::line(
        arc_points(center, radius, -90.0, -30.0),
        egui::Stroke::new(GAUGE_BAND_WIDTH, egui::Color32::from_rgb(0x22, 0xc5, 0x5e)),
    ));
    painter.add(egui::Shape::line(
        arc_points(center, radius, -30.0, 30.0),
        egui::Stroke::new(GAUGE_BAND_WIDTH, egui::Color32::from_rgb(0xf5, 0x9e, 0x0b)),
    ));
    painter.add(egui::Shape::line(
        arc_points(center, radius, 30.0, 90.0),
        egui::Stroke::new(GAUGE_BAND_WIDTH, egui::Color32::from_rgb(0xef, 0x44, 0x44)),
    ));

    // Needle at the mapped angle, hub on the pivot.
    let needle_color = ui.visuals().strong_text_color();
    let tip = gauge_point(center, radius - GAUGE_BAND_WIDTH, reading.angle_degrees as f32);
    painter.line_segment([center, tip], egui::Stroke::new(4.0, needle_color));
    painter.circle_filled(center, 7.0, needle_color);
}

#[cfg(test)]
mod tests {
    use predictor_client::PredictionResult;

    use super::*;

    #[test]
    fn gauge_points_span_the_semicircle() {
        let center = egui::pos2(100.0, 100.0);

        let left = gauge_point(center, 80.0, -90.0);
        assert!((left.x - 20.0).abs() < 1e-3);
        assert!((left.y - 100.0).abs() < 1e-3);

        let up = gauge_point(center, 80.0, 0.0);
        assert!((up.x - 100.0).abs() < 1e-3);
        assert!((up.y - 20.0).abs() < 1e-3);

        let right = gauge_point(center, 80.0, 90.0);
        assert!((right.x - 180.0).abs() < 1e-3);
        assert!((right.y - 100.0).abs() < 1e-3);
    }

    #[test]
    fn midpoint_probability_points_the_needle_straight_up() {
        let result: PredictionResult =
            serde_json::from_value(serde_json::json!({ "delayed_probability": 0.5 }))
                .expect("deserialize");
        let reading = GaugeReading::from_result(&result);

        let center = egui::pos2(0.0, 0.0);
        let tip = gauge_point(center, 50.0, reading.angle_degrees as f32);
        assert!(tip.x.abs() < 1e-3);
        assert!((tip.y + 50.0).abs() < 1e-3);
    }
}
