use super::ContextComponent;
use crate::constants;
use crate::ui::Accents;
use api::{HealthStatus, StatsReport};
use egui::{Align, Color32, Layout, Response, Sense, TextStyle, Ui, Widget, pos2, vec2};
use egui_i18n::tr;

#[derive(Default)]
pub struct StatusBar;

pub struct StatusBarProps<'a> {
    /// `None` until the first health check finished
    pub health: Option<&'a HealthStatus>,
    pub stats: Option<&'a StatsReport>,
    pub last_search_time: Option<&'a str>,
    pub accents: &'a Accents,
}

/// A colored dot followed by a label
struct IndicatorWidget {
    color: Color32,
    text: String,
}

impl Widget for IndicatorWidget {
    fn ui(self, ui: &mut Ui) -> Response {
        let circle_radius = 5.0;
        let circle_diam = circle_radius * 2.0;
        let gap = ui.spacing().item_spacing.x / 2.0;
        let font_id = TextStyle::Name(constants::TEXT_STYLE_STATUS_BAR.into()).resolve(ui.style());
        let text_color = ui.visuals().text_color();
        let galley = ui.painter().layout_no_wrap(self.text, font_id, text_color);
        let width = circle_diam + gap + galley.size().x;
        let height = f32::max(circle_diam, galley.size().y);
        let (rect, response) = ui.allocate_exact_size(vec2(width, height), Sense::hover());
        if ui.is_rect_visible(rect) {
            let circle_center = pos2(rect.min.x + circle_radius, rect.center().y);
            ui.painter().circle_filled(circle_center, circle_radius, self.color);
            let text_pos = pos2(
                rect.min.x + circle_diam + gap,
                rect.center().y - (galley.size().y / 2.0),
            );
            ui.painter().galley(text_pos, galley, text_color);
        }
        response
    }
}

fn overall_text(health: Option<&HealthStatus>) -> String {
    match health.map(|h| h.status) {
        None => tr!("status-checking"),
        Some(api::ServiceStatus::Ok) => tr!("status-ok"),
        Some(api::ServiceStatus::Warning) => tr!("status-warning"),
        Some(api::ServiceStatus::Error) => tr!("status-error"),
    }
}

impl StatusBar {
    fn render_health(ui: &mut Ui, health: Option<&HealthStatus>, accents: &Accents) {
        ui.add(IndicatorWidget {
            color: accents.status(health.map(|h| h.status)),
            text: overall_text(health),
        });
        ui.separator();

        let services = [
            ("ES", health.map(|h| h.elasticsearch_up)),
            ("MySQL", health.map(|h| h.mysql_up)),
            ("OpenAI", health.map(|h| h.openai_up)),
        ];
        for (name, up) in services {
            ui.add(IndicatorWidget {
                color: accents.service(up),
                text: name.to_string(),
            });
        }
    }
}

impl ContextComponent for StatusBar {
    type Props<'a> = StatusBarProps<'a>;
    type Output = ();

    fn render(&mut self, ctx: &egui::Context, props: Self::Props<'_>) -> Self::Output {
        egui::TopBottomPanel::bottom(constants::ID_PANEL_STATUS_BAR)
            .frame(
                egui::Frame::NONE
                    .inner_margin(egui::vec2(8.0, 3.0))
                    .fill(ctx.style().visuals.panel_fill),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    Self::render_health(ui, props.health, props.accents);

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        let font_id = TextStyle::Name(constants::TEXT_STYLE_STATUS_BAR.into())
                            .resolve(ui.style());

                        if let Some(time) = props.last_search_time {
                            ui.label(
                                egui::RichText::new(format!("{}: {time}", tr!("status-last-search")))
                                    .font(font_id.clone()),
                            );
                        }

                        // Only trusted when the backend flagged success
                        if let Some(stats) = props.stats.and_then(StatsReport::stats) {
                            let response = ui.label(
                                egui::RichText::new(format!(
                                    "{}: {}",
                                    tr!("status-documents"),
                                    stats.total_documents
                                ))
                                .font(font_id),
                            );
                            if !stats.index_counts.is_empty() {
                                let per_index = stats
                                    .index_counts
                                    .iter()
                                    .map(|(index, count)| format!("{index}: {count}"))
                                    .collect::<Vec<_>>()
                                    .join("\n");
                                response.on_hover_text(per_index);
                            }
                        }
                    });
                });
            });
    }
}
