//! Tooltip content generation
//!
//! Turns a selected set into an HTML fragment: rows are ordered, formatted,
//! filtered and substituted into the active template.

use std::rc::Rc;

use config_system::{
    ColorResolver, ContentArgs, ContentsOption, FormatArgs, NameFormatter, TitleFormatter,
    ValueFormatter,
};
use shared_types::DataPoint;

use crate::context::TooltipContext;
use crate::order::sort_rows;
use crate::template::{
    classes, sanitise, target_selector_suffix, tpl_process, TooltipTemplate, TABLE_CLOSE,
};

fn identity_name(name: &str, _: &FormatArgs<'_>) -> String {
    name.to_string()
}

fn normalized_ratio(_: f64, args: &FormatArgs<'_>) -> Option<String> {
    Some(format!("{:.2}%", args.ratio.unwrap_or(f64::NAN) * 100.0))
}

/// Builds tooltip markup for one chart instance
pub struct ContentBuilder<'a> {
    ctx: &'a TooltipContext,
}

impl<'a> ContentBuilder<'a> {
    pub fn new(ctx: &'a TooltipContext) -> Self {
        Self { ctx }
    }

    /// Markup for a selection, using the custom content function when one is configured
    pub fn html(&self, points: &mut [Option<DataPoint>]) -> String {
        let title_format = self.ctx.x_tick_format.clone();
        let value_format = self.ctx.y_format.clone();
        let color = self.ctx.color().clone();

        match &self.ctx.config.contents {
            ContentsOption::Custom(render) => render(&ContentArgs {
                points,
                title_format: &title_format,
                value_format: &value_format,
                color: &color,
            }),
            _ => self.build(points, &title_format, &value_format, &color),
        }
    }

    /// Default content pipeline: order, format, skip, substitute
    pub fn build(
        &self,
        points: &mut [Option<DataPoint>],
        default_title_format: &TitleFormatter,
        default_value_format: &ValueFormatter,
        color: &ColorResolver,
    ) -> String {
        let ctx = self.ctx;
        let config = &ctx.config;
        let format = &config.format;

        let title_format = format.title.as_ref().unwrap_or(default_title_format);
        let name_format: NameFormatter = format
            .name
            .clone()
            .unwrap_or_else(|| Rc::new(identity_name));
        let value_format: ValueFormatter = match &format.value {
            Some(f) => f.clone(),
            None if ctx.stack_normalized => Rc::new(normalized_ratio),
            None => default_value_format.clone(),
        };

        let custom_template = config.contents.template();
        let text = if custom_template.is_some() {
            config.contents.text()
        } else {
            None
        };

        sort_rows(points, ctx);
        let points: &[Option<DataPoint>] = points;
        let tpl = TooltipTemplate::parse(custom_template);

        let mut html: Option<String> = None;

        for (i, row) in points.iter().enumerate() {
            let Some(row) = row else { continue };
            let Some(base) = row.value.filter(|v| !v.is_nan()) else {
                continue;
            };

            if html.is_none() {
                let title = title_format(&row.x)
                    .map(|t| sanitise(&t))
                    .filter(|t| !t.is_empty());
                let title = match title {
                    Some(t) if custom_template.is_some() => t,
                    Some(t) => format!("<tr><th colspan=\"2\">{t}</th></tr>"),
                    None => String::new(),
                };

                html = Some(tpl_process(
                    &tpl.title,
                    &[("CLASS_TOOLTIP", classes::TOOLTIP), ("TITLE", title.as_str())],
                ));
            }

            let args = ctx.format_args(row, points);
            let mut value = value_format(base, &args).map(|v| sanitise(&v));

            if let Some(range) = row.range {
                let [high, low] = [range.high, range.low]
                    .map(|v| value_format(v, &args).map(|v| sanitise(&v)).unwrap_or_default());
                value = Some(format!(
                    "<b>Mid:</b> {} <b>High:</b> {} <b>Low:</b> {}",
                    value.unwrap_or_default(),
                    high,
                    low
                ));
            }

            let Some(value) = value else { continue };
            let Some(name) = row.name.as_deref() else {
                continue;
            };

            let name = sanitise(&name_format(name, &args));
            let bg_color = match &ctx.level_color {
                Some(level) => level(base),
                None => color(&row.id),
            };

            let class_name = format!("{}{}", classes::TOOLTIP_NAME, target_selector_suffix(&row.id));
            let swatch = if custom_template.is_some() {
                bg_color
            } else if ctx.patterns {
                format!(
                    "<svg><rect style=\"fill:{bg_color}\" width=\"10\" height=\"10\"></rect></svg>"
                )
            } else {
                format!("<span style=\"background-color:{bg_color}\"></span>")
            };

            let mut values: Vec<(&str, &str)> = vec![
                ("CLASS_TOOLTIP_NAME", class_name.as_str()),
                ("COLOR", swatch.as_str()),
                ("NAME", name.as_str()),
                ("VALUE", value.as_str()),
            ];
            if let Some(text) = text {
                // Text keys take precedence over the built-in placeholders
                for (key, rows) in text {
                    let entry = rows.get(i).map_or("", String::as_str);
                    match values.iter_mut().find(|(k, _)| *k == key.as_str()) {
                        Some(slot) => slot.1 = entry,
                        None => values.push((key.as_str(), entry)),
                    }
                }
            }

            let rendered = tpl_process(&tpl.row, &values);
            html.get_or_insert_with(String::new).push_str(&rendered);
        }

        let mut html = html.unwrap_or_default();
        html.push_str(TABLE_CLOSE);
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config_system::{TemplateContents, TooltipConfig, TooltipOrder};
    use shared_types::{ChartGeometry, XValue};
    use std::collections::BTreeMap;

    use crate::context::DEFAULT_PALETTE;

    fn point(id: &str, value: Option<f64>) -> Option<DataPoint> {
        Some(DataPoint::new(id, 0, XValue::Number(1.0), value).with_name(Some(&id.to_uppercase())))
    }

    fn build(config: TooltipConfig, mut points: Vec<Option<DataPoint>>) -> String {
        let mut ctx = TooltipContext::new(config, ChartGeometry::default());
        ctx.declare_series(points.iter().flatten().map(|p| p.id.clone()).collect());
        ContentBuilder::new(&ctx).html(&mut points)
    }

    #[test]
    fn test_default_markup() {
        let html = build(TooltipConfig::default(), vec![point("a", Some(10.0))]);

        assert_eq!(
            html,
            concat!(
                "<table class=\"chart-tooltip\"><tbody>",
                "<tr><th colspan=\"2\">1</th></tr>",
                "<tr class=\"chart-tooltip-name-a\">",
                "<td class=\"name\"><span style=\"background-color:#1f77b4\"></span>A</td>",
                "<td class=\"value\">10</td></tr>",
                "</table>"
            )
        );
    }

    #[test]
    fn test_null_value_and_null_name_rows_skipped() {
        let hidden = Some(DataPoint::new("c", 0, XValue::Number(1.0), Some(3.0)).with_name(None));
        let html = build(
            TooltipConfig::default(),
            vec![point("a", Some(10.0)), point("b", None), hidden],
        );

        assert!(html.contains(">A</td>"));
        assert!(!html.contains(">B</td>"));
        assert!(!html.contains("chart-tooltip-name-c"));
        assert_eq!(html.matches("<tr class=").count(), 1);
    }

    #[test]
    fn test_zero_value_is_displayed() {
        let html = build(TooltipConfig::default(), vec![point("a", Some(0.0))]);
        assert!(html.contains("<td class=\"value\">0</td>"));
    }

    #[test]
    fn test_value_formatter_can_decline() {
        let config = TooltipConfig::default()
            .with_value_format(|v, args| if args.id == "b" { None } else { Some(format!("{v}!")) });
        let html = build(config, vec![point("a", Some(1.0)), point("b", Some(2.0))]);

        assert!(html.contains("1!"));
        assert!(!html.contains(">B</td>"));
    }

    #[test]
    fn test_values_are_sanitised() {
        let config = TooltipConfig::default()
            .with_name_format(|name, _| format!("<i>{name}</i>"))
            .with_title_format(|_| Some("<b>t</b>".into()));
        let html = build(config, vec![point("a", Some(1.0))]);

        assert!(html.contains("&lt;i&gt;A&lt;/i&gt;"));
        assert!(html.contains("&lt;b&gt;t&lt;/b&gt;"));
    }

    #[test]
    fn test_empty_title_renders_nothing() {
        let config = TooltipConfig::default().with_title_format(|_| None);
        let html = build(config, vec![point("a", Some(1.0))]);
        assert!(html.starts_with("<table class=\"chart-tooltip\"><tbody><tr class="));
    }

    #[test]
    fn test_area_range_row() {
        let range = Some(
            DataPoint::new("r", 0, XValue::Number(1.0), Some(5.0))
                .with_range(8.0, 2.0)
                .with_name(Some("R")),
        );
        let html = build(TooltipConfig::default(), vec![range]);
        assert!(html.contains("<b>Mid:</b> 5 <b>High:</b> 8 <b>Low:</b> 2"));
    }

    #[test]
    fn test_normalized_stack_shows_ratio() {
        let mut ctx = TooltipContext::new(TooltipConfig::default(), ChartGeometry::default());
        ctx.stack_normalized = true;
        let mut points = vec![Some(
            DataPoint::new("a", 0, XValue::Number(1.0), Some(30.0)).with_ratio(0.25),
        )];

        let html = ContentBuilder::new(&ctx).html(&mut points);
        assert!(html.contains("25.00%"));
    }

    #[test]
    fn test_custom_template_with_text() {
        let mut text = BTreeMap::new();
        text.insert("UNIT".to_string(), vec!["kg".to_string(), "lb".to_string()]);
        let config = TooltipConfig::default()
            .with_order(TooltipOrder::Asc)
            .with_template(TemplateContents {
                template: Some("<ul><li>{=TITLE}</li>{{<li style=\"color:{=COLOR}\">{=NAME} {=VALUE}{=UNIT}</li>}}</ul>".into()),
                text,
                ..Default::default()
            });

        let html = build(config, vec![point("a", Some(9.0)), point("b", Some(4.0))]);
        assert_eq!(
            html,
            "<ul><li>1</li><li style=\"color:#ff7f0e\">B 4kg</li><li style=\"color:#1f77b4\">A 9lb</li></table>"
        );
    }

    #[test]
    fn test_text_overrides_builtin_placeholder() {
        let mut text = BTreeMap::new();
        text.insert("NAME".to_string(), vec!["Apples".to_string()]);
        let config = TooltipConfig::default().with_template(TemplateContents {
            template: Some("<ul>{{<li>{=NAME}: {=VALUE}</li>}}</ul>".into()),
            text,
            ..Default::default()
        });

        let html = build(config, vec![point("a", Some(3.0))]);
        assert_eq!(html, "<ul><li>Apples: 3</li></table>");
    }

    #[test]
    fn test_desc_order_keeps_series_colors() {
        let mut ctx = TooltipContext::new(
            TooltipConfig::default().with_order(TooltipOrder::Desc),
            ChartGeometry::default(),
        );
        ctx.declare_series(vec!["a".to_string(), "b".to_string()]);
        let mut points = vec![point("a", Some(1.0)), point("b", Some(2.0))];

        let html = ContentBuilder::new(&ctx).html(&mut points);
        let b_row = html.find("background-color:#ff7f0e").unwrap();
        let a_row = html.find("background-color:#1f77b4").unwrap();
        assert!(b_row < a_row);
        assert_eq!((ctx.color())("a"), DEFAULT_PALETTE[0]);
    }

    #[test]
    fn test_pattern_swatch() {
        let mut ctx = TooltipContext::new(TooltipConfig::default(), ChartGeometry::default());
        ctx.patterns = true;
        let mut points = vec![point("a", Some(1.0))];

        let html = ContentBuilder::new(&ctx).html(&mut points);
        assert!(html.contains("<svg><rect style=\"fill:#1f77b4\" width=\"10\" height=\"10\"></rect></svg>"));
    }

    #[test]
    fn test_level_color() {
        let mut ctx = TooltipContext::new(TooltipConfig::default(), ChartGeometry::default());
        ctx.level_color = Some(Rc::new(|v: f64| if v > 50.0 { "red".into() } else { "green".into() }));
        let mut points = vec![point("a", Some(80.0))];

        let html = ContentBuilder::new(&ctx).html(&mut points);
        assert!(html.contains("background-color:red"));
    }

    #[test]
    fn test_custom_contents_function() {
        let config = TooltipConfig::default().with_contents(|args| {
            let count = args.points.iter().flatten().count();
            format!("<p>{count} points, first {}</p>", (args.color)("a"))
        });
        let html = build(config, vec![point("a", Some(1.0)), None]);
        assert_eq!(html, "<p>1 points, first #1f77b4</p>");
    }

    #[test]
    fn test_title_from_first_valued_row() {
        let leading_null = Some(DataPoint::new("z", 0, XValue::Number(7.0), None));
        let html = build(
            TooltipConfig::default(),
            vec![leading_null, point("a", Some(2.0))],
        );
        assert!(html.contains("<th colspan=\"2\">1</th>"));
        assert!(!html.contains("undefined"));
    }
}
