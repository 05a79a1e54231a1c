use geom::Polygon;
use widgetry::{Color, ControlState, EventCtx, GeomBatch, Widget};

/// A table with measured columns, where every row is one clickable button
/// named by the caller's key. One Outcome::Clicked handler deals with all
/// of them.
pub fn clickable_rows(
    ctx: &mut EventCtx,
    headers: Vec<Widget>,
    rows: Vec<(String, Vec<GeomBatch>)>,
    extra_margin: f64,
) -> Widget {
    let mut width_per_col: Vec<f64> = headers.iter().map(|w| w.get_width_for_forcing()).collect();
    for (_, row) in &rows {
        for (cell, width) in row.iter().zip(width_per_col.iter_mut()) {
            *width = width.max(cell.get_dims().width);
        }
    }
    let total_width = width_per_col.iter().sum::<f64>()
        + extra_margin * (width_per_col.len().max(2) - 1) as f64;

    let mut col = vec![Widget::custom_row(
        headers
            .into_iter()
            .enumerate()
            .map(|(idx, w)| {
                let margin = extra_margin + width_per_col[idx] - w.get_width_for_forcing();
                if idx == width_per_col.len() - 1 {
                    w.margin_right((margin - extra_margin) as usize)
                } else {
                    w.margin_right(margin as usize)
                }
            })
            .collect(),
    )];

    for (key, row) in rows {
        let mut batch = GeomBatch::new();
        batch.autocrop_dims = false;
        let mut x1 = 0.0;
        for (cell, width) in row.into_iter().zip(width_per_col.iter()) {
            batch.append(cell.translate(x1, 0.0));
            x1 += *width + extra_margin;
        }

        let rect = Polygon::rectangle(total_width, batch.get_dims().height);
        let mut hovered = GeomBatch::new();
        hovered.push(Color::hex("#7C7C7C"), rect);
        hovered.append(batch.clone());

        col.push(
            ctx.style()
                .btn_plain
                .btn()
                .custom_batch(batch, ControlState::Default)
                .custom_batch(hovered, ControlState::Hovered)
                .no_tooltip()
                .build_widget(ctx, &key),
        );
    }

    Widget::custom_col(col)
}
