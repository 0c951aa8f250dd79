use eframe::egui::{self, Color32, RichText, Ui};

use crate::config::{ALL_CLUSTERS, CLUSTER_COLUMN, SHEET_URL};
use crate::data::filter::{ClusterFilter, cluster_choices};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top bar: document locator, row counts, reload.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.label(RichText::new("📄 RAW 데이터 조회").strong());
        ui.separator();
        ui.label(format!("대상 시트: {SHEET_URL}"));
        ui.separator();

        if ui.button("새로고침").clicked() {
            state.reload();
        }

        if let Some(table) = &state.table {
            ui.separator();
            ui.label(format!(
                "전체 {}행, 표시 {}행",
                table.len(),
                state.visible_indices.len()
            ));
        }

        if let Some(msg) = &state.load_error {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – cluster filter
// ---------------------------------------------------------------------------

/// Render the filter panel: one single-select over the distinct cluster
/// values, with the "all" sentinel on top.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("필터");
    ui.separator();

    let choices = match &state.table {
        Some(table) if table.has_column(CLUSTER_COLUMN) => cluster_choices(table),
        Some(_) => {
            ui.label("클러스터 컬럼이 없어 필터를 사용할 수 없습니다.");
            return;
        }
        None => {
            ui.label("아직 데이터가 없습니다.");
            return;
        }
    };

    ui.strong("클러스터 선택:");

    let current = state.filter.clone();
    let mut picked: Option<ClusterFilter> = None;

    egui::ComboBox::from_id_salt("cluster_select")
        .selected_text(current.label())
        .width(ui.available_width() * 0.9)
        .show_ui(ui, |ui: &mut Ui| {
            if ui
                .selectable_label(current == ClusterFilter::All, ALL_CLUSTERS)
                .clicked()
            {
                picked = Some(ClusterFilter::All);
            }
            for val in &choices {
                let selected = current == ClusterFilter::Only(val.clone());
                let mut text = RichText::new(val.to_string());
                if let Some(colors) = &state.colors {
                    text = text.color(colors.color_for(val));
                }
                if ui.selectable_label(selected, text).clicked() {
                    picked = Some(ClusterFilter::Only(val.clone()));
                }
            }
        });

    if let Some(filter) = picked {
        state.set_filter(filter);
    }
}
