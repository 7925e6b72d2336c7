use crate::core::controller::Snapshot;
use crate::domain::kind::{FormKind, LOADING_LABEL};
use crate::domain::model::{FieldKind, FieldSpec};
use crate::domain::presets::PresetCatalog;
use regex::Regex;
use std::fmt::Write;
use std::sync::OnceLock;

fn uppercase_boundary() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([A-Z])").unwrap())
}

/// 由 camelCase key 推出標籤：大寫字母前補空白，首字大寫
pub fn label_from_key(key: &str) -> String {
    let spaced = uppercase_boundary().replace_all(key, " $1");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn field_label(spec: &FieldSpec) -> String {
    spec.label
        .map(str::to_string)
        .unwrap_or_else(|| label_from_key(spec.name))
}

pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        value.to_string()
    }
}

pub fn submit_label(kind: FormKind, loading: bool) -> &'static str {
    if loading {
        LOADING_LABEL
    } else {
        kind.submit_label()
    }
}

/// 把表單畫成純文字，順序與網頁一致：欄位、錯誤、按鈕、結果
pub fn render_form(kind: FormKind, snapshot: &Snapshot, presets: Option<&PresetCatalog>) -> String {
    let mut out = String::new();
    let form = &snapshot.form;
    let view = &snapshot.view;

    let _ = writeln!(out, "{}", kind.title());
    let _ = writeln!(out, "{}", kind.subtitle());
    let _ = writeln!(out);

    if let Some(catalog) = presets.filter(|_| kind.has_presets()) {
        let _ = writeln!(out, "Examples:");
        for example in catalog.iter() {
            let _ = writeln!(out, "  * {} ({})", example.name, example.image);
        }
        let _ = writeln!(out);
    }

    let mut rendered_groups = Vec::new();
    for (spec, value) in form.record().iter() {
        match spec.kind {
            FieldKind::Encoded(group, _) => {
                if rendered_groups.contains(&group) {
                    continue;
                }
                rendered_groups.push(group);
                let choice = form
                    .selection(group)
                    .and_then(|index| group.choice_label(index))
                    .unwrap_or("");
                let _ = writeln!(out, "  {:<26} [{}]", group.label(), choice);
            }
            FieldKind::Flag => {
                let mark = if value == 1.0 { "x" } else { " " };
                let _ = writeln!(out, "  {:<26} [{}]", field_label(spec), mark);
            }
            FieldKind::Numeric => {
                let _ = writeln!(out, "  {:<26} {}", field_label(spec), format_number(value));
            }
        }
    }
    let _ = writeln!(out);

    if let Some(message) = view.error_message() {
        let _ = writeln!(out, "! {}", message);
    }

    let disabled = if view.loading { " (disabled)" } else { "" };
    let _ = writeln!(out, "[ {} ]{}", submit_label(kind, view.loading), disabled);

    if let Some(prediction) = view.visible_prediction() {
        let _ = writeln!(out);
        let _ = writeln!(out, "=> {}", kind.outcome_message(prediction));
    }

    out
}

/// `fields` 子命令的輸出：key、標籤、預設值、輸入方式
pub fn render_fields(kind: FormKind) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({} -> {})", kind.title(), kind.default_endpoint(), kind.response_field());

    let variant = kind.variant();
    for spec in variant.fields() {
        let input = match spec.kind {
            FieldKind::Numeric => "number".to_string(),
            FieldKind::Flag => "flag 0/1".to_string(),
            FieldKind::Encoded(group, _) => format!("--choose {}", group.name()),
        };
        let _ = writeln!(
            out,
            "  {:<34} {:<24} {:>4}  {}",
            spec.name,
            field_label(spec),
            spec.default,
            input
        );
    }

    for group in variant.groups() {
        let choices: Vec<String> = group
            .choices()
            .iter()
            .enumerate()
            .map(|(index, choice)| format!("{}={}", index, choice))
            .collect();
        let _ = writeln!(out, "  {} choices: {}", group.name(), choices.join(", "));
    }

    out
}

pub fn render_presets(catalog: &PresetCatalog) -> String {
    let mut out = String::new();
    for example in catalog.iter() {
        let selections: Vec<String> = example
            .selections()
            .into_iter()
            .map(|(group, index)| {
                format!("{}={}", group.name(), group.choice_label(index).unwrap_or("?"))
            })
            .collect();
        let _ = writeln!(out, "{} ({})", example.name, example.image);
        let _ = writeln!(out, "  {}", selections.join(", "));
    }
    out
}
