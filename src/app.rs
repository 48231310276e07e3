use std::sync::mpsc::{Receiver, TryRecvError};

use eframe::egui;

use crate::config::Config;
use crate::data::loader;
use crate::data::model::FinancialRecord;
use crate::state::AppState;
use crate::ui::{panels, table};

type FetchResult = anyhow::Result<Vec<FinancialRecord>>;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct IncomeLensApp {
    pub state: AppState,
    title: String,
    pending_fetch: Option<Receiver<FetchResult>>,
}

impl IncomeLensApp {
    /// Build the app and start the one startup fetch in the background.
    pub fn new(cc: &eframe::CreationContext<'_>, config: Config) -> Self {
        let mut state = AppState::default();

        let ctx = cc.egui_ctx.clone();
        state.subscribe(move |ev| {
            log::trace!("Repaint after {:?}, {} rows", ev.cause, ev.rows);
            ctx.request_repaint();
        });

        let title = config.title();
        let ctx = cc.egui_ctx.clone();
        let pending_fetch = Some(loader::spawn_fetch(config, move || ctx.request_repaint()));

        Self {
            state,
            title,
            pending_fetch,
        }
    }

    /// Move a finished fetch result into the state, if one arrived.
    fn poll_fetch(&mut self) {
        let Some(rx) = &self.pending_fetch else {
            return;
        };
        match rx.try_recv() {
            Ok(result) => {
                self.state.finish_fetch(result);
                self.pending_fetch = None;
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                let err = anyhow::anyhow!("fetch worker exited without a result");
                self.state.finish_fetch(Err(err));
                self.pending_fetch = None;
            }
        }
    }
}

impl eframe::App for IncomeLensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_fetch();

        // ---- Top panel: title + status ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state, &self.title);
        });

        // ---- Left side panel: filters and sorting ----
        egui::SidePanel::left("filter_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                // Controls stay locked while a validation notice is open.
                let enabled = self.state.notice.is_none();
                ui.add_enabled_ui(enabled, |ui| panels::side_panel(ui, &mut self.state));
            });

        // ---- Central panel: statement table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            table::statement_table(ui, &self.state);
        });

        panels::notice_window(ctx, &mut self.state);
    }
}
