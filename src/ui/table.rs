use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::config::{
    CLUSTER_COLUMN, DEFAULT_WORKSHEET, DISPLAY_COLUMNS, SERVICE_ACCOUNT_ENV,
    SERVICE_ACCOUNT_FILE,
};
use crate::data::filter::{mean_hours, project_columns};
use crate::data::model::RawTable;
use crate::error::ViewerError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Central panel – RAW data table + summary metric
// ---------------------------------------------------------------------------

/// Render the central panel. Degrades step by step: credential hint,
/// load failure, empty sheet, missing-column warning, then the table and
/// the mean-hours metric.
pub fn central_panel(ui: &mut Ui, state: &AppState) {
    if let Some(err) = &state.auth_error {
        ui.colored_label(Color32::RED, err.to_string());
        ui.label(format!(
            "로컬에서는 '{SERVICE_ACCOUNT_FILE}' 파일이 필요하고, \
             배포 시에는 {SERVICE_ACCOUNT_ENV} 환경 변수 설정이 필요합니다."
        ));
        return;
    }

    let Some(table) = &state.table else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("데이터를 불러오는 중입니다…");
        });
        return;
    };

    if state.load_error.is_some() || table.is_empty() {
        ui.colored_label(
            Color32::RED,
            format!(
                "'{DEFAULT_WORKSHEET}' 시트에서 데이터를 불러오는 데 실패했거나 \
                 데이터가 없습니다."
            ),
        );
        return;
    }

    let projection = project_columns(table, DISPLAY_COLUMNS);

    if !projection.missing.is_empty() {
        ui.colored_label(
            Color32::YELLOW,
            format!(
                "시트에서 다음 컬럼을 찾을 수 없습니다: {}",
                projection.missing.join(", ")
            ),
        );
    }

    if projection.available.is_empty() {
        ui.colored_label(Color32::RED, ViewerError::NoColumnsAvailable.to_string());
        ui.label(format!("'{DEFAULT_WORKSHEET}' 시트의 헤더를 확인하세요."));
        return;
    }

    ui.heading("RAW 데이터");
    ui.add_space(4.0);

    let table_height = ui.available_height() - 80.0;
    egui::ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
        data_table(ui, state, table, &projection.available, table_height);
    });

    ui.separator();
    ui.heading("간단 요약");
    match mean_hours(table, &state.visible_indices) {
        Some(mean) => {
            ui.label(RichText::new(format!("평균 누적 시간: {mean:.1} 시간")).strong());
        }
        None => {
            ui.label("평균 누적 시간: 데이터 없음");
        }
    }
}

/// The scrollable table itself, restricted to the available columns and the
/// rows passing the current filter.
fn data_table(
    ui: &mut Ui,
    state: &AppState,
    table: &RawTable,
    columns: &[String],
    max_height: f32,
) {
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .columns(Column::auto().at_least(90.0), columns.len())
        .min_scrolled_height(0.0)
        .max_scroll_height(max_height.max(120.0))
        .header(22.0, |mut header| {
            for col in columns {
                header.col(|ui| {
                    ui.strong(col);
                });
            }
        })
        .body(|body| {
            body.rows(20.0, state.visible_indices.len(), |mut row| {
                let rec = &table.records[state.visible_indices[row.index()]];
                for col in columns {
                    row.col(|ui| {
                        let value = rec.get(col);
                        let label = value.map(|v| v.to_string()).unwrap_or_default();
                        if col.as_str() == CLUSTER_COLUMN {
                            if let (Some(v), Some(colors)) = (value, &state.colors) {
                                ui.label(
                                    RichText::new(label).color(colors.color_for(v)),
                                );
                                return;
                            }
                        }
                        ui.label(label);
                    });
                }
            });
        });
}
