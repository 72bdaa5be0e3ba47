use serde::Serialize;

use crate::model::target::{Target, TargetKind};
use crate::util::unicode::{display_width, pad_to_width, truncate_to_width};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TargetJson {
    pub number: usize,
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: TargetKind,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,
}

pub fn target_to_json(index: usize, target: &Target) -> TargetJson {
    TargetJson {
        number: index + 1,
        name: target.display_name.clone(),
        path: target.path.to_string_lossy().into_owned(),
        kind: target.kind,
        content: target.content.clone(),
        value: target.is_integer().then(|| target.value()),
    }
}

// ---------------------------------------------------------------------------
// Text output
// ---------------------------------------------------------------------------

/// Widest content preview shown by `foobs list`
const CONTENT_PREVIEW_WIDTH: usize = 40;

/// One-line content preview: newlines shown as `⏎`, long text truncated.
pub fn content_preview(content: &str, max_width: usize) -> String {
    let flat = content.trim_end_matches('\n').replace('\n', " \u{23CE} ");
    truncate_to_width(&flat, max_width)
}

/// Format the `foobs list` table, one line per target.
pub fn format_target_table(rows: &[(usize, &Target)]) -> Vec<String> {
    let num_w = rows
        .iter()
        .map(|(i, _)| (i + 1).to_string().len())
        .max()
        .unwrap_or(1);
    let name_w = rows
        .iter()
        .map(|(_, t)| display_width(&t.display_name))
        .max()
        .unwrap_or(0)
        .clamp(4, 30);

    rows.iter()
        .map(|(i, t)| {
            let name = pad_to_width(&truncate_to_width(&t.display_name, name_w), name_w);
            format!(
                "{:>num_w$}  {}  {:<7}  {}",
                i + 1,
                name,
                t.kind.as_str(),
                content_preview(&t.content, CONTENT_PREVIEW_WIDTH),
                num_w = num_w,
            )
        })
        .collect()
}

/// Format the `foobs show` block.
pub fn format_target_detail(index: usize, target: &Target) -> String {
    let mut out = String::new();
    out.push_str(&format!("#{} {}\n", index + 1, target.display_name));
    out.push_str(&format!("type: {}\n", target.kind));
    out.push_str(&format!("path: {}\n", target.path.display()));
    if target.is_integer() {
        out.push_str(&format!("value: {}\n", target.value()));
    } else {
        out.push_str("content:\n");
        for line in target.content.lines() {
            out.push_str(&format!("  {}\n", line));
        }
    }
    out
}
