use api::{RouteRow, ScheduleFlag};

use crate::time;

/// Visual treatment of one schedule-type cell. NoService cells never
/// become interactive controls.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Cell {
    NoService,
    Badge(Tone),
}

/// Exactly one tone applies to any cell with service.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tone {
    /// Service exists but misses the requested frequency
    Warning,
    /// Service meets the requested frequency
    Success,
}

/// One table row, ready to draw. Pure data, so tests can compare fixture
/// responses against expected output without any UI in the loop.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedRow {
    pub route_id: api::RouteID,
    pub branch_letter: Option<String>,
    pub route_label: String,
    pub branch_label: String,
    pub cells: [(&'static str, Cell); 5],
    pub detail: Vec<String>,
}

/// Transform response rows for display, preserving server order.
pub fn render_rows(rows: &[RouteRow]) -> Vec<RenderedRow> {
    rows.iter().map(render_row).collect()
}

fn render_row(row: &RouteRow) -> RenderedRow {
    let mut cells = [("", Cell::NoService); 5];
    for (slot, (name, flag)) in cells.iter_mut().zip(row.flags()) {
        *slot = (name, render_cell(flag));
    }

    let mut detail = vec![
        format!("First trip: {}", time::fmt_clock(row.first_run_seconds)),
        format!("Last trip: {}", time::fmt_clock(row.last_run_seconds)),
    ];
    if let Some(trips) = row.total_trips {
        detail.push(format!("{trips} trips today"));
    }
    if row.most_frequent_minutes.is_some() || row.least_frequent_minutes.is_some() {
        detail.push(format!(
            "Headway: best {}, worst {}",
            time::fmt_headway(row.most_frequent_minutes),
            time::fmt_headway(row.least_frequent_minutes)
        ));
    }

    RenderedRow {
        route_id: row.route_id.clone(),
        branch_letter: row.branch_letter.clone(),
        route_label: format!("Route {}", row.route_id),
        branch_label: row.branch_label().to_string(),
        cells,
        detail,
    }
}

fn render_cell(flag: ScheduleFlag) -> Cell {
    match flag {
        ScheduleFlag::NoTrips => Cell::NoService,
        ScheduleFlag::BelowFrequency => Cell::Badge(Tone::Warning),
        ScheduleFlag::MeetsFrequency => Cell::Badge(Tone::Success),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::RouteID;

    fn row(route: &str, branch: Option<&str>, flags: [ScheduleFlag; 5]) -> RouteRow {
        RouteRow {
            route_id: RouteID(route.to_string()),
            branch_letter: branch.map(|b| b.to_string()),
            reduced: flags[0],
            holiday: flags[1],
            saturday: flags[2],
            sunday: flags[3],
            weekday: flags[4],
            first_run_seconds: Some(18000),
            last_run_seconds: Some(93240),
            total_trips: Some(120),
            most_frequent_minutes: Some(8.5),
            least_frequent_minutes: Some(30.0),
        }
    }

    #[test]
    fn test_flag_mapping() {
        use ScheduleFlag::*;

        let rendered = render_rows(&[row(
            "21",
            Some("A"),
            [NoTrips, BelowFrequency, MeetsFrequency, NoTrips, MeetsFrequency],
        )]);
        let cells = &rendered[0].cells;

        assert_eq!(cells[0], ("Reduced", Cell::NoService));
        assert_eq!(cells[1], ("Holiday", Cell::Badge(Tone::Warning)));
        assert_eq!(cells[2], ("Saturday", Cell::Badge(Tone::Success)));
        assert_eq!(cells[3], ("Sunday", Cell::NoService));
        assert_eq!(cells[4], ("Weekday", Cell::Badge(Tone::Success)));
    }

    #[test]
    fn test_labels() {
        use ScheduleFlag::*;

        let rendered = render_rows(&[
            row("21", Some("A"), [NoTrips; 5]),
            row("5", None, [MeetsFrequency; 5]),
        ]);
        assert_eq!(rendered[0].route_label, "Route 21");
        assert_eq!(rendered[0].branch_label, "A");
        assert_eq!(rendered[1].branch_label, "Main");
    }

    #[test]
    fn test_server_order_preserved() {
        use ScheduleFlag::*;

        let input = vec![
            row("94", None, [NoTrips; 5]),
            row("5", None, [NoTrips; 5]),
            row("21", None, [NoTrips; 5]),
        ];
        let ids: Vec<String> = render_rows(&input)
            .into_iter()
            .map(|r| r.route_id.0)
            .collect();
        assert_eq!(ids, vec!["94", "5", "21"]);
    }

    #[test]
    fn test_detail_lines() {
        use ScheduleFlag::*;

        let rendered = render_rows(&[row("21", None, [MeetsFrequency; 5])]);
        let detail = &rendered[0].detail;
        assert_eq!(detail[0], "First trip: 05:00:00");
        assert_eq!(detail[1], "Last trip: 25:54:00");
        assert_eq!(detail[2], "120 trips today");
        assert_eq!(detail[3], "Headway: best every 9 min, worst every 30 min");

        // Rows without stats just show the times as N/A
        let mut bare = row("5", None, [NoTrips; 5]);
        bare.first_run_seconds = None;
        bare.last_run_seconds = None;
        bare.total_trips = None;
        bare.most_frequent_minutes = None;
        bare.least_frequent_minutes = None;
        let rendered = render_rows(&[bare]);
        assert_eq!(
            rendered[0].detail,
            vec!["First trip: N/A", "Last trip: N/A"]
        );
    }
}
