use crate::component::{
    self, DocumentWindowEvent, SearchBarEvent, SearchOptionsEvent, SearchResultViewerEvent,
    prelude::*,
};
use crate::config::Config;
use crate::ui::{self, Accents};
use api::SearchService;
use controller::{Controller, HistoryStore, SearchState, loading_message};
use std::sync::Arc;
use tokio::runtime::Runtime;
use tracing::{error, info, warn};

pub struct App {
    controller: Controller,
    accents: Accents,

    /// Whether this application finishes initialization
    initialized: bool,

    search_bar: component::SearchBar,
    search_options: component::SearchOptions,
    status_bar: component::StatusBar,
    result_viewer: component::SearchResultViewer,
    document_window: component::DocumentWindow,

    // Dropped after the controller so its pollers are aborted first
    _runtime: Runtime,
}

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: Config,
        runtime: Runtime,
        service: Arc<dyn SearchService>,
    ) -> Self {
        let accents = ui::setup_ui(&cc.egui_ctx, &config.ui);
        Self::setup_i18n();

        #[cfg(debug_assertions)]
        Self::setup_debug_options(&cc.egui_ctx);

        let ctx = cc.egui_ctx.clone();
        let notify = Arc::new(move || ctx.request_repaint());

        let mut controller = Controller::new(
            service,
            runtime.handle().clone(),
            HistoryStore::in_data_dir(),
            notify,
        )
        .with_poll_intervals(config.api.poll_intervals());
        controller.start_polling();

        Self {
            controller,
            accents,
            initialized: false,
            search_bar: Default::default(),
            search_options: Default::default(),
            status_bar: Default::default(),
            result_viewer: Default::default(),
            document_window: Default::default(),
            _runtime: runtime,
        }
    }

    fn setup_i18n() {
        let en = String::from_utf8_lossy(include_bytes!("../../assets/trans/en.ftl"));
        let zh = String::from_utf8_lossy(include_bytes!("../../assets/trans/zh-tw.ftl"));

        for (language, content) in [
            (crate::constants::FALLBACK_LANGUAGE, en),
            (crate::constants::LANGUAGE, zh),
        ] {
            if let Err(e) = egui_i18n::load_translations_from_text(language, content) {
                error!("Failed to load {language} translations: {e:?}");
            }
        }

        egui_i18n::set_language(crate::constants::LANGUAGE);
        egui_i18n::set_fallback(crate::constants::FALLBACK_LANGUAGE);
    }

    #[cfg(debug_assertions)]
    fn setup_debug_options(ctx: &egui::Context) {
        ctx.style_mut(|style| style.debug.debug_on_hover_with_all_modifiers = true);
    }

    fn submit(&mut self, query: &str) {
        // Validation failures land in the controller state and show as a banner
        if let Ok(seq) = self.controller.submit_search(query) {
            info!(seq, "search submitted");
        }
    }

    fn submit_input(&mut self) {
        if let Ok(seq) = self.controller.submit() {
            info!(seq, "search submitted");
        }
    }

    fn download(url: &str) {
        info!(url, "opening download");
        if let Err(e) = open::that(url) {
            warn!("Failed to open {url}: {e}");
        }
    }

    pub fn render_search_bar(&mut self, ctx: &egui::Context) {
        let is_loading = self.controller.state().is_loading();
        let (query, history) = self.controller.search_input();
        let props = component::SearchBarProps {
            query,
            history,
            is_loading,
        };
        let output = self.search_bar.render(ctx, props);

        for event in output.events {
            match event {
                SearchBarEvent::StartSearch => self.submit_input(),
                SearchBarEvent::SelectHistory(query) => {
                    if let Err(e) = self.controller.select_history(&query) {
                        warn!("History entry rejected: {e}");
                    }
                }
                SearchBarEvent::Clear => {
                    self.controller.clear();
                    self.search_bar.request_focus();
                }
            }
        }
    }

    pub fn render_search_options(&mut self, ctx: &egui::Context) {
        let state = self.controller.state();
        let props = component::SearchOptionsProps {
            mode: state.mode,
            result_count: state.result_count,
            use_generated_answer: state.use_generated_answer,
            doc_type_filter: &state.doc_type_filter,
            enabled: !state.is_loading(),
        };
        let output = self.search_options.render(ctx, props);

        for event in output.events {
            match event {
                SearchOptionsEvent::ChangeMode(mode) => self.controller.set_mode(mode),
                SearchOptionsEvent::ChangeResultCount(count) => {
                    self.controller.set_result_count(count);
                }
                SearchOptionsEvent::SetGeneratedAnswer(enabled) => {
                    self.controller.set_generated_answer(enabled)
                }
                SearchOptionsEvent::ToggleDocType(doc_type) => {
                    self.controller.toggle_doc_type(doc_type)
                }
            }
        }
    }

    pub fn render_status_bar(&mut self, ctx: &egui::Context) {
        let state = self.controller.state();
        let props = component::StatusBarProps {
            health: state.health.as_ref(),
            stats: state.stats.as_ref(),
            last_search_time: state.last_search_time.as_deref(),
            accents: &self.accents,
        };
        self.status_bar.render(ctx, props);
    }

    pub fn render_document_window(&mut self, ctx: &egui::Context) {
        let state = self.controller.state();
        let Some(document) = state.document.as_ref() else {
            return;
        };
        let props = component::DocumentWindowProps {
            document,
            related: state.related.as_ref(),
        };
        let output = self.document_window.render(ctx, props);

        for event in output.events {
            match event {
                DocumentWindowEvent::Close => self.controller.close_document(),
                DocumentWindowEvent::LoadRelated(ids) => self.controller.request_related(ids),
                DocumentWindowEvent::ShowDocument(id) => self.controller.request_document(&id),
            }
        }
    }

    pub fn render_results(&mut self, ctx: &egui::Context) {
        let mut events = vec![];

        egui::CentralPanel::default()
            .frame(
                egui::Frame::NONE
                    .inner_margin(egui::vec2(10.0, 6.0))
                    .fill(ctx.style().visuals.panel_fill),
            )
            .show(ctx, |ui| {
                let state = self.controller.state();
                let activity = match state.search {
                    SearchState::Submitting { mode, .. } => Some(loading_message(mode)),
                    _ => None,
                };
                let props = component::SearchResultViewerProps {
                    results: state.results.as_ref(),
                    history: state.history.entries(),
                    error: state.error.as_deref(),
                    activity,
                    accents: &self.accents,
                };
                events = self.result_viewer.render(ui, props).events;
            });

        for event in events {
            match event {
                SearchResultViewerEvent::DismissError => self.controller.dismiss_error(),
                SearchResultViewerEvent::SearchAgain(query) => self.submit(&query),
                SearchResultViewerEvent::Download(url) => Self::download(&url),
                SearchResultViewerEvent::ShowDocument(id) => self.controller.request_document(&id),
            }
        }
    }

    pub fn update_window_title(&self, ctx: &egui::Context) {
        let title = egui_i18n::tr!("app-title");
        ctx.send_viewport_cmd(egui::ViewportCommand::Title(title));
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.initialized {
            self.search_bar.request_focus();
            self.update_window_title(ctx);
            self.initialized = true;
        }

        if ctx.input_mut(|i| i.consume_key(egui::Modifiers::NONE, egui::Key::F11)) {
            let fullscreen = ctx.input(|i| i.viewport().fullscreen.unwrap_or(false));
            ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(!fullscreen));
        }

        self.controller.pump();

        // Panels first, the central panel takes what is left
        self.render_search_bar(ctx);
        self.render_search_options(ctx);
        self.render_status_bar(ctx);
        self.render_document_window(ctx);
        self.render_results(ctx);
    }
}
