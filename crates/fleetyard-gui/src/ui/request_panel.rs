//! Repair/part request form.
//!
//! Thin input panel: the only check is a non-empty vehicle id. Submission
//! goes through the worker; the outcome lands in the status line.

use fleetyard_core::status::{color_for_status, known_statuses};
use fleetyard_sync::ServiceRequest;

/// Locations a vehicle can be reported from.
const LOCATIONS: &[&str] = &["Yard", "Depot", "Office", "Field"];

/// Form state kept across frames.
#[derive(Debug)]
pub struct RequestFormState {
    pub vehicle_id: String,
    pub location: usize,
    pub notes: String,
}

impl Default for RequestFormState {
    fn default() -> Self {
        Self {
            vehicle_id: String::new(),
            location: 0,
            notes: String::new(),
        }
    }
}

impl RequestFormState {
    fn build_request(&self) -> ServiceRequest {
        ServiceRequest {
            vehicle_id: self.vehicle_id.trim().to_string(),
            location: LOCATIONS[self.location].to_string(),
            notes: self.notes.clone(),
        }
    }

    fn clear(&mut self) {
        self.vehicle_id.clear();
        self.location = 0;
        self.notes.clear();
    }
}

/// Shows the form; returns a request when the user submits.
pub fn show(ui: &mut egui::Ui, state: &mut RequestFormState) -> Option<ServiceRequest> {
    ui.heading("Service request");
    ui.add_space(4.0);

    ui.label("Vehicle id");
    ui.text_edit_singleline(&mut state.vehicle_id);

    ui.add_space(4.0);
    ui.label("Location");
    egui::ComboBox::from_id_salt("request-location")
        .selected_text(LOCATIONS[state.location])
        .show_ui(ui, |ui| {
            for (i, location) in LOCATIONS.iter().enumerate() {
                ui.selectable_value(&mut state.location, i, *location);
            }
        });

    ui.add_space(4.0);
    ui.label("Notes");
    ui.text_edit_multiline(&mut state.notes);

    ui.add_space(8.0);
    let can_submit = !state.vehicle_id.trim().is_empty();
    let submitted = ui
        .add_enabled(can_submit, egui::Button::new("Submit request"))
        .clicked();

    if submitted {
        let request = state.build_request();
        state.clear();
        Some(request)
    } else {
        None
    }
}

/// Shows the status color legend.
pub fn show_legend(ui: &mut egui::Ui) {
    ui.separator();
    ui.label("Vehicle statuses");
    for status in known_statuses() {
        let color = color_for_status(status);
        ui.horizontal(|ui| {
            let (rect, _) = ui.allocate_exact_size(egui::vec2(10.0, 10.0), egui::Sense::hover());
            ui.painter().rect_filled(
                rect,
                egui::CornerRadius::same(2),
                egui::Color32::from_rgb(color.r, color.g, color.b),
            );
            ui.small(status);
        });
    }
}
