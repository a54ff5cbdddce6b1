//! Integration tests for tooltip content, visibility and placement

use chart_tooltip::{
    config_system::{TooltipConfig, TooltipOrder},
    shared_types::{ChartData, ChartGeometry, DataPoint, PhysicalPosition, SeriesTarget, XValue},
    ContentBuilder, LinearScale, MemoryHost, PositionCalculator, ShowRequest, TooltipAnchor,
    TooltipChart, TooltipContext,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn geometry() -> ChartGeometry {
    ChartGeometry {
        width: 560.0,
        height: 320.0,
        current_width: 640.0,
        current_height: 400.0,
        svg_left: 50.0,
        padding_left: 10.0,
        padding_right: 30.0,
        legend_right_width: None,
        rotated: false,
    }
}

fn point(id: &str, name: &str, value: Option<f64>) -> Option<DataPoint> {
    Some(DataPoint::new(id, 0, XValue::Number(0.0), value).with_name(Some(name)))
}

fn row_names(html: &str) -> Vec<String> {
    html.split("<td class=\"name\">")
        .skip(1)
        .filter_map(|cell| cell.split("</span>").nth(1))
        .filter_map(|rest| rest.split("</td>").next())
        .map(str::to_string)
        .collect()
}

#[test]
fn test_null_value_row_is_omitted() {
    init_logger();
    let ctx = TooltipContext::new(TooltipConfig::default(), geometry());
    let mut points = vec![point("a", "A", Some(10.0)), point("b", "B", None)];

    let html = ContentBuilder::new(&ctx).html(&mut points);

    assert_eq!(row_names(&html), vec!["A"]);
    assert!(html.contains("<td class=\"value\">10</td>"));
    assert!(!html.contains("chart-tooltip-name-b"));
}

#[test]
fn test_ascending_order() {
    let ctx = TooltipContext::new(TooltipConfig::default().with_order(TooltipOrder::Asc), geometry());
    let mut points = vec![
        point("a", "five", Some(5.0)),
        point("b", "one", Some(1.0)),
        point("c", "three", Some(3.0)),
    ];

    let html = ContentBuilder::new(&ctx).html(&mut points);
    assert_eq!(row_names(&html), vec!["one", "three", "five"]);
}

#[test]
fn test_one_row_per_named_valued_point() {
    let config = TooltipConfig::default().with_name_format(|name, args| format!("{name}#{}", args.index));
    let ctx = TooltipContext::new(config, geometry());
    let mut points = vec![
        point("a", "A", Some(1.0)),
        None,
        Some(DataPoint::new("hidden", 0, XValue::Number(0.0), Some(2.0)).with_name(None)),
        point("c", "C", Some(0.0)),
        point("d", "D", Some(f64::NAN)),
    ];

    let html = ContentBuilder::new(&ctx).html(&mut points);
    assert_eq!(row_names(&html), vec!["A#0", "C#0"]);
    assert!(html.ends_with("</table>"));
}

#[test]
fn test_position_clamping_invariant() {
    let g = geometry();
    let ctx = TooltipContext::new(TooltipConfig::default(), g.clone())
        .with_scale(LinearScale::new([0.0, 100.0], [0.0, g.width]));
    let calc = PositionCalculator::new(&ctx);

    for x in [0.0, 25.0, 50.0, 90.0, 100.0] {
        for (w, h) in [(40.0, 20.0), (150.0, 80.0), (300.0, 390.0)] {
            for y in [0.0, 200.0, 399.0] {
                let points = vec![DataPoint::new("a", 0, XValue::Number(x), Some(1.0))];
                let pos = calc.position(&points, w, h, PhysicalPosition::new(y, y));

                assert!(pos.top >= 0.0);
                assert!(
                    pos.left + w <= g.chart_right(),
                    "x={x} w={w}: {} > {}",
                    pos.left + w,
                    g.chart_right()
                );
            }
        }
    }
}

fn chart(config: TooltipConfig, host: MemoryHost) -> TooltipChart {
    let values = (0..4)
        .map(|i| DataPoint::new("a", i, XValue::Number(i as f64), Some(i as f64)))
        .collect();
    let data = ChartData::new(vec![SeriesTarget {
        id: "a".into(),
        values,
    }]);
    TooltipChart::new(TooltipContext::new(config, geometry()), data, host)
}

#[test]
fn test_idempotent_show_still_repositions() {
    init_logger();
    let host = MemoryHost::new().with_container_size(60.0, 30.0);
    let mut chart = chart(TooltipConfig::default().with_order(TooltipOrder::Desc), host.clone());
    let anchor = host.container().unwrap();
    let selection = chart.data().selection_at(1);

    chart
        .show(ShowRequest::Points {
            points: selection.clone(),
            pointer: PhysicalPosition::new(10.0, 10.0),
        })
        .unwrap();
    let first_top = chart.controller().anchor().style("top");

    chart
        .show(ShowRequest::Points {
            points: selection,
            pointer: PhysicalPosition::new(10.0, 200.0),
        })
        .unwrap();

    assert_eq!(anchor.html_writes(), 1);
    assert_eq!(anchor.measurements(), 1);
    assert_ne!(chart.controller().anchor().style("top"), first_top);
}

#[test]
fn test_hide_after_show() {
    let host = MemoryHost::new();
    let mut chart = chart(TooltipConfig::default(), host.clone());

    chart.show(ShowRequest::Index(2)).unwrap();
    assert!(chart.is_visible());

    assert!(chart.hide_tooltip(false));
    assert!(!chart.is_visible());
    assert!(chart.render_state().is_none());
    assert_eq!(host.container().unwrap().style("display").as_deref(), Some("none"));
}

#[test]
fn test_forced_hide_overrides_do_not_hide() {
    let mut config = TooltipConfig::default();
    config.do_not_hide = true;
    let mut chart = chart(config, MemoryHost::new());

    chart.show(ShowRequest::Index(2)).unwrap();
    assert!(!chart.hide_tooltip(false));
    assert!(chart.render_state().is_some());

    assert!(chart.hide_tooltip(true));
    assert!(chart.render_state().is_none());
    assert!(!chart.is_visible());
}

#[test]
fn test_desc_order_keeps_declared_swatches() {
    let data = ChartData::new(
        ["a", "b"]
            .iter()
            .enumerate()
            .map(|(i, id)| SeriesTarget {
                id: id.to_string(),
                values: vec![DataPoint::new(*id, 0, XValue::Number(0.0), Some(i as f64 + 1.0))
                    .with_name(Some(&id.to_uppercase()))],
            })
            .collect(),
    );
    let host = MemoryHost::new();
    let ctx = TooltipContext::new(TooltipConfig::default().with_order(TooltipOrder::Desc), geometry());
    let mut chart = TooltipChart::new(ctx, data, host.clone());

    chart.show(ShowRequest::Index(0)).unwrap();

    let html = host.container().unwrap().html();
    assert_eq!(row_names(&html), vec!["B", "A"]);
    assert!(html.contains("chart-tooltip-name-b\"><td class=\"name\"><span style=\"background-color:#ff7f0e\">"));
    assert_eq!((chart.context().color())("a"), "#1f77b4");
}
