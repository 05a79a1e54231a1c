use serde::{Deserialize, Serialize};
use widgetry::{EventCtx, HorizontalAlignment, Line, Panel, VerticalAlignment, Widget};

use crate::{App, Transition};

/// Which page is showing. Saved across native restarts.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Mode {
    Explore,
    Overview,
}

pub struct MainMenu;

impl MainMenu {
    /// The shared frame for every page: a heading, the page switcher, and
    /// a "contents" slot for the page to fill in.
    pub fn panel(ctx: &mut EventCtx, current: Mode) -> Panel {
        let mut switcher = Vec::new();
        for (label, mode) in [
            ("Nearby schedules", Mode::Explore),
            ("Routes overview", Mode::Overview),
        ] {
            switcher.push(if mode == current {
                ctx.style().btn_solid.text(label).build_def(ctx)
            } else {
                ctx.style().btn_outline.text(label).build_def(ctx)
            });
        }

        Panel::new_builder(Widget::col(vec![
            Line("Schedule Scout").small_heading().into_widget(ctx),
            Widget::row(switcher),
            Widget::placeholder(ctx, "contents"),
        ]))
        .aligned(HorizontalAlignment::Left, VerticalAlignment::Top)
        .build(ctx)
    }

    pub fn on_click(ctx: &mut EventCtx, app: &mut App, x: &str) -> Option<Transition> {
        match x {
            "Nearby schedules" => {
                app.set_mode(Mode::Explore);
                Some(Transition::Replace(crate::explore::Explorer::new_state(
                    ctx, app,
                )))
            }
            "Routes overview" => {
                app.set_mode(Mode::Overview);
                Some(Transition::Replace(crate::overview::Overview::new_state(
                    ctx, app,
                )))
            }
            _ => None,
        }
    }
}
