//! GUI application for the Fleetyard vehicle map.
//!
//! This crate provides a native desktop view built with egui/eframe: the
//! schematic yard map with draggable vehicle markers, a reload toolbar, and
//! the service request form. The map session (entity snapshot plus marker
//! arena) is owned by the UI thread and mutated only here; all network I/O
//! happens on the worker bridge.

use eframe::egui;
use fleetyard_core::config::AppConfig;
use fleetyard_gateway::SheetGateway;
use fleetyard_sync::session::MapSession;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub mod backend;
mod ui;

use backend::{WorkerBridge, WorkerCommand, WorkerEvent};
use ui::map_panel::{MapAction, MapPanelState};
use ui::request_panel::RequestFormState;

/// How long a status message stays visible.
const STATUS_TTL: Duration = Duration::from_secs(5);

/// Status message level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// UI state (not part of the session).
#[derive(Default)]
pub struct UiState {
    map_panel: MapPanelState,
    request_form: RequestFormState,
    status_message: Option<(String, StatusLevel)>,
    status_expiry: Option<Instant>,
}

/// Main application.
pub struct FleetyardApp {
    config: AppConfig,
    session: MapSession,
    worker: WorkerBridge,
    ui_state: UiState,
}

impl FleetyardApp {
    /// Creates the application: builds the gateway, spawns the worker, and
    /// optionally kicks off the initial snapshot fetch.
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> anyhow::Result<Self> {
        let gateway = Arc::new(SheetGateway::from_config(&config.gateway)?);
        let worker = WorkerBridge::new(gateway)?;

        if config.map.refresh_on_launch {
            worker.send(WorkerCommand::Refresh);
        }

        Ok(Self {
            config,
            session: MapSession::new(),
            worker,
            ui_state: UiState::default(),
        })
    }

    fn set_status(&mut self, message: impl Into<String>, level: StatusLevel) {
        self.ui_state.status_message = Some((message.into(), level));
        self.ui_state.status_expiry = Some(Instant::now() + STATUS_TTL);
    }

    /// Drains worker events into the session and the status line.
    fn pump_events(&mut self) {
        while let Some(event) = self.worker.try_recv_event() {
            match event {
                WorkerEvent::Snapshot(vehicles) => {
                    let count = vehicles.len();
                    let summary = self.session.apply_snapshot(vehicles);
                    tracing::debug!(
                        removed = summary.removed.len(),
                        updated = summary.updated.len(),
                        created = summary.created.len(),
                        "snapshot applied"
                    );
                    self.set_status(format!("Loaded {count} vehicles"), StatusLevel::Info);
                }
                WorkerEvent::FetchFailed(reason) => {
                    self.set_status(
                        format!("Reload failed, showing last data: {reason}"),
                        StatusLevel::Error,
                    );
                }
                WorkerEvent::PersistFailed { id, reason } => {
                    self.set_status(
                        format!("Could not save position of {id}: {reason}"),
                        StatusLevel::Warning,
                    );
                }
                WorkerEvent::RequestSubmitted => {
                    self.set_status("Service request submitted", StatusLevel::Success);
                }
                WorkerEvent::RequestFailed(reason) => {
                    self.set_status(format!("Request failed: {reason}"), StatusLevel::Error);
                }
            }
        }

        if let Some(expiry) = self.ui_state.status_expiry {
            if Instant::now() >= expiry {
                self.ui_state.status_message = None;
                self.ui_state.status_expiry = None;
            }
        }
    }

    fn toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("Reload vehicles").clicked() {
                self.worker.send(WorkerCommand::Refresh);
            }
            ui.separator();
            ui.label(format!("Vehicles: {}", self.session.vehicle_count()));

            if let Some((message, level)) = &self.ui_state.status_message {
                ui.separator();
                let color = match level {
                    StatusLevel::Info => egui::Color32::LIGHT_BLUE,
                    StatusLevel::Success => egui::Color32::LIGHT_GREEN,
                    StatusLevel::Warning => egui::Color32::YELLOW,
                    StatusLevel::Error => egui::Color32::LIGHT_RED,
                };
                ui.colored_label(color, message);
            }
        });
    }
}

impl eframe::App for FleetyardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.pump_events();

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.toolbar(ui);
        });

        egui::SidePanel::right("request-form")
            .resizable(false)
            .default_width(260.0)
            .show(ctx, |ui| {
                if let Some(request) = ui::request_panel::show(ui, &mut self.ui_state.request_form)
                {
                    self.worker.send(WorkerCommand::SubmitRequest(request));
                    self.set_status("Submitting service request", StatusLevel::Info);
                }
                ui.add_space(12.0);
                ui::request_panel::show_legend(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            let action = ui::map_panel::show(
                ui,
                &self.session,
                &mut self.ui_state.map_panel,
                self.config.map.canvas_size,
            );

            if let Some(MapAction::DragReleased { id, at }) = action {
                // Optimistic: patch the local entity first, then persist.
                if let Some(position) = self.session.apply_drag(&id, at) {
                    self.worker.send(WorkerCommand::Persist(id, position));
                }
            }
        });

        // Worker events arrive off-frame; poll at a gentle cadence.
        ctx.request_repaint_after(Duration::from_millis(250));
    }
}
