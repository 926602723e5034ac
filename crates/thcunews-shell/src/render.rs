use std::fmt::Write;

use thcunews_models::PredictResponse;

use crate::state::ShellSnapshot;

const BAR_WIDTH: usize = 40;
const TOP_GLYPH: char = '█';
const REST_GLYPH: char = '▒';

fn bar(value: f64, glyph: char) -> String {
    let cells = ((value.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    std::iter::repeat(glyph).take(cells).collect()
}

/// Summary cards followed by the Top-5 bar chart. The leading entry is
/// marked and drawn with a solid bar.
pub fn render_result(result: &PredictResponse) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "预测分类   {}", result.category);
    let _ = writeln!(out, "置信度     {:.1}%", result.confidence_percent());
    let _ = writeln!(out, "推理耗时   {} ms", result.inference_time_ms);
    let _ = writeln!(out);
    let _ = writeln!(out, "Top 5 概率分布");
    for (index, entry) in result.probabilities.iter().enumerate() {
        let (marker, glyph) = if index == 0 {
            ('▶', TOP_GLYPH)
        } else {
            (' ', REST_GLYPH)
        };
        let _ = writeln!(
            out,
            "{marker} {} {} {:.1}%",
            entry.name,
            bar(entry.value, glyph),
            entry.value
        );
    }
    out
}

pub fn render_snapshot(snapshot: &ShellSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "模型 {} | 字数 {}{}",
        snapshot.model,
        snapshot.text.chars().count(),
        if snapshot.loading { " | AI 思考中..." } else { "" }
    );
    if let Some(notice) = &snapshot.notice {
        let _ = writeln!(out, "! {notice}");
    }
    if let Some(result) = &snapshot.result {
        let _ = writeln!(out);
        out.push_str(&render_result(result));
    }
    out
}
